use medtriage_agent::extract;
use medtriage_core::triage::{Reference, TriageLevel, TriageResult};
use proptest::prelude::*;

fn level() -> impl Strategy<Value = TriageLevel> {
    prop::sample::select(vec![
        TriageLevel::SelfCare,
        TriageLevel::SeeDoctorSoon,
        TriageLevel::UrgentGp,
        TriageLevel::Emergency,
        TriageLevel::NotApplicable,
        TriageLevel::Unknown,
    ])
}

prop_compose! {
    fn triage_result()(
        summary in ".*",
        possible_causes in prop::collection::vec(".*", 0..4),
        triage_recommendation in level(),
        next_steps in prop::collection::vec(".*", 0..4),
        disclaimer in "[A-Za-z][A-Za-z .]{0,40}",
        references in prop::collection::vec(("[A-Za-z ]{1,20}", "https://[a-z]{3,10}\\.org/[a-z]{0,10}"), 0..3),
    ) -> TriageResult {
        TriageResult {
            summary,
            possible_causes,
            triage_recommendation,
            next_steps,
            disclaimer,
            references: references.into_iter().map(|(n, u)| Reference::new(n, u)).collect(),
        }
    }
}

// ── Totality: every input yields a usable result ──────────────────────────

proptest! {
    #[test]
    fn any_input_has_disclaimer_and_known_level(raw in ".*") {
        let result = extract(&raw);
        prop_assert!(!result.disclaimer.trim().is_empty());
        prop_assert!(
            TriageLevel::RECOGNIZED.contains(&result.triage_recommendation)
                || result.triage_recommendation == TriageLevel::Unknown
        );
    }

    #[test]
    fn input_without_open_brace_degrades_untouched(raw in "[^{]*") {
        prop_assert_eq!(extract(&raw), TriageResult::degraded(raw.clone()));
    }
}

// ── Idempotence: wire JSON is a fixed point ───────────────────────────────

proptest! {
    #[test]
    fn wire_json_of_any_extraction_round_trips(raw in ".*") {
        let first = extract(&raw);
        let second = extract(&first.to_wire_json());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn wire_json_of_valid_result_round_trips(result in triage_result()) {
        prop_assert_eq!(extract(&result.to_wire_json()), result);
    }

    #[test]
    fn fenced_wire_json_parses_like_unfenced(result in triage_result()) {
        let wire = result.to_wire_json();
        let fenced = format!("```json\n{wire}\n```");
        prop_assert_eq!(extract(&fenced), extract(&wire));
    }
}
