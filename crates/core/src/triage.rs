//! The triage result schema.
//!
//! `TriageResult` is what the structured extractor produces from raw model
//! output. Serialization uses the wire field names the model is instructed
//! to emit (`Summary`, `Possible_Causes`, ...), so a serialized result can
//! be fed back through the extractor and comes out unchanged.

use serde::{Deserialize, Serialize};

/// Substituted whenever the model omits a disclaimer or leaves it blank.
pub const DEFAULT_DISCLAIMER: &str =
    "This is not medical advice. Consult a doctor for diagnosis and treatment.";

/// How urgently the user should seek care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TriageLevel {
    #[serde(rename = "Self-Care")]
    SelfCare,
    #[serde(rename = "See Doctor Soon")]
    SeeDoctorSoon,
    #[serde(rename = "Urgent GP")]
    UrgentGp,
    #[serde(rename = "Emergency")]
    Emergency,
    /// The query was not health-related.
    #[serde(rename = "N/A")]
    NotApplicable,
    /// The model's recommendation was missing or outside the enumeration.
    #[serde(rename = "Unknown")]
    Unknown,
}

impl TriageLevel {
    /// Every level the model is allowed to emit, in increasing urgency.
    pub const RECOGNIZED: [TriageLevel; 5] = [
        TriageLevel::SelfCare,
        TriageLevel::SeeDoctorSoon,
        TriageLevel::UrgentGp,
        TriageLevel::Emergency,
        TriageLevel::NotApplicable,
    ];

    /// The label used on the wire and in rendered output.
    pub fn label(&self) -> &'static str {
        match self {
            TriageLevel::SelfCare => "Self-Care",
            TriageLevel::SeeDoctorSoon => "See Doctor Soon",
            TriageLevel::UrgentGp => "Urgent GP",
            TriageLevel::Emergency => "Emergency",
            TriageLevel::NotApplicable => "N/A",
            TriageLevel::Unknown => "Unknown",
        }
    }

    /// Coerce a raw label into a level.
    ///
    /// Accepts both the wire labels ("See Doctor Soon", "N/A") and the
    /// hyphenated names ("See-Doctor-Soon", "Not-Applicable"), ignoring
    /// ASCII case and separator style. Anything else is `Unknown`.
    pub fn from_label(raw: &str) -> TriageLevel {
        let normalized = raw
            .to_ascii_lowercase()
            .replace(['-', '_'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        match normalized.as_str() {
            "self care" => TriageLevel::SelfCare,
            "see doctor soon" => TriageLevel::SeeDoctorSoon,
            "urgent gp" => TriageLevel::UrgentGp,
            "emergency" => TriageLevel::Emergency,
            "n/a" | "not applicable" => TriageLevel::NotApplicable,
            _ => TriageLevel::Unknown,
        }
    }
}

impl std::fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A cited source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    pub url: String,
}

impl Reference {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// The validated verdict for one user query.
///
/// Constructed fresh per query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriageResult {
    #[serde(rename = "Summary")]
    pub summary: String,

    #[serde(rename = "Possible_Causes")]
    pub possible_causes: Vec<String>,

    #[serde(rename = "Triage_Recommendation")]
    pub triage_recommendation: TriageLevel,

    #[serde(rename = "Next_Steps")]
    pub next_steps: Vec<String>,

    #[serde(rename = "Disclaimer")]
    pub disclaimer: String,

    #[serde(rename = "References")]
    pub references: Vec<Reference>,
}

impl TriageResult {
    /// The fallback for output that could not be parsed at all: the raw
    /// text becomes the summary and every other field takes its default.
    pub fn degraded(raw_text: impl Into<String>) -> Self {
        Self {
            summary: raw_text.into(),
            possible_causes: Vec::new(),
            triage_recommendation: TriageLevel::Unknown,
            next_steps: Vec::new(),
            disclaimer: DEFAULT_DISCLAIMER.to_string(),
            references: Vec::new(),
        }
    }

    /// Canonical JSON in the wire schema.
    pub fn to_wire_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
