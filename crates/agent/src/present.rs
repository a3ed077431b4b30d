//! Presentation of a triage result as ordered display segments.

use std::fmt;
use medtriage_core::triage::{DEFAULT_DISCLAIMER, Reference, TriageLevel, TriageResult};

/// Shown in the references block when no source was cited.
pub const REFERENCES_UNAVAILABLE: &str = "Information unavailable";

/// One block of the rendered reply, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Summary(String),
    /// Causes already joined with `"; "`.
    Causes(String),
    Recommendation(TriageLevel),
    /// Steps already joined with a single space.
    NextSteps(String),
    /// Empty means the "unavailable" line is shown.
    References(Vec<Reference>),
    Disclaimer(String),
}

/// Break a result into display segments.
///
/// Causes and next steps are omitted when empty; every other segment is
/// always present.
pub fn present(result: &TriageResult) -> Vec<Segment> {
    let mut segments = vec![Segment::Summary(result.summary.clone())];

    if !result.possible_causes.is_empty() {
        segments.push(Segment::Causes(result.possible_causes.join("; ")));
    }

    segments.push(Segment::Recommendation(result.triage_recommendation));

    if !result.next_steps.is_empty() {
        segments.push(Segment::NextSteps(result.next_steps.join(" ")));
    }

    segments.push(Segment::References(result.references.clone()));

    let disclaimer = if result.disclaimer.trim().is_empty() {
        DEFAULT_DISCLAIMER.to_string()
    } else {
        result.disclaimer.clone()
    };
    segments.push(Segment::Disclaimer(disclaimer));

    segments
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Summary(summary) => write!(f, "**Summary:** {summary}"),
            Segment::Causes(causes) => write!(f, "**Possible Causes:** {causes}"),
            Segment::Recommendation(level) => write!(f, "**Triage Recommendation:** {level}"),
            Segment::NextSteps(steps) => write!(f, "**Next Steps:** {steps}"),
            Segment::References(refs) if refs.is_empty() => {
                write!(f, "**References:** {REFERENCES_UNAVAILABLE}")
            }
            Segment::References(refs) => {
                f.write_str("**References:**")?;
                for r in refs {
                    write!(f, "\n- [{}]({})", r.name, r.url)?;
                }
                Ok(())
            }
            Segment::Disclaimer(disclaimer) => write!(f, "**Disclaimer:** {disclaimer}"),
        }
    }
}

/// Render segments as Markdown blocks separated by blank lines.
pub fn render_markdown(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(Segment::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TriageResult {
        TriageResult {
            summary: "Probably a tension headache.".into(),
            possible_causes: vec!["Stress".into(), "Dehydration".into()],
            triage_recommendation: TriageLevel::SelfCare,
            next_steps: vec!["Drink water.".into(), "Rest.".into()],
            disclaimer: "Not medical advice.".into(),
            references: vec![
                Reference::new("NHS", "https://www.nhs.uk/conditions/headaches/"),
                Reference::new("Mayo Clinic", "https://www.mayoclinic.org/headache"),
            ],
        }
    }

    #[test]
    fn full_result_has_six_segments_in_order() {
        let segments = present(&sample());
        assert_eq!(
            segments,
            vec![
                Segment::Summary("Probably a tension headache.".into()),
                Segment::Causes("Stress; Dehydration".into()),
                Segment::Recommendation(TriageLevel::SelfCare),
                Segment::NextSteps("Drink water. Rest.".into()),
                Segment::References(sample().references),
                Segment::Disclaimer("Not medical advice.".into()),
            ]
        );
    }

    #[test]
    fn empty_sequences_are_omitted() {
        let segments = present(&TriageResult::degraded("raw text"));
        assert_eq!(segments.len(), 4);
        assert!(matches!(segments[0], Segment::Summary(ref s) if s == "raw text"));
        assert!(matches!(segments[1], Segment::Recommendation(TriageLevel::Unknown)));
        assert!(matches!(segments[2], Segment::References(ref r) if r.is_empty()));
        assert!(matches!(segments[3], Segment::Disclaimer(ref d) if d == DEFAULT_DISCLAIMER));
    }

    #[test]
    fn blank_disclaimer_is_replaced() {
        let result = TriageResult {
            disclaimer: "  ".into(),
            ..sample()
        };
        assert_eq!(
            present(&result).last(),
            Some(&Segment::Disclaimer(DEFAULT_DISCLAIMER.into()))
        );
    }

    #[test]
    fn renders_markdown() {
        let text = render_markdown(&present(&sample()));
        assert_eq!(
            text,
            "**Summary:** Probably a tension headache.\n\n\
             **Possible Causes:** Stress; Dehydration\n\n\
             **Triage Recommendation:** Self-Care\n\n\
             **Next Steps:** Drink water. Rest.\n\n\
             **References:**\n\
             - [NHS](https://www.nhs.uk/conditions/headaches/)\n\
             - [Mayo Clinic](https://www.mayoclinic.org/headache)\n\n\
             **Disclaimer:** Not medical advice."
        );
    }

    #[test]
    fn missing_references_render_unavailable_line() {
        let text = Segment::References(vec![]).to_string();
        assert_eq!(text, "**References:** Information unavailable");
    }
}
