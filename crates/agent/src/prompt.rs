//! Prompt composition for the triage call.

/// Rendered in place of an empty context block.
pub const NO_WEB_DATA: &str = "No web data found.";

/// Build the triage instruction prompt for `query` with gathered `context`.
///
/// The template spells out the exact output schema, the allowed
/// recommendation values and the fallback object for non-health queries.
pub fn compose(query: &str, context: &str) -> String {
    let context = if context.trim().is_empty() {
        NO_WEB_DATA
    } else {
        context
    };

    format!(
        r#"
You are a friendly, safe AI healthcare triage assistant.

Your task is to analyze the user's described symptoms or health query and return a structured JSON response.

User symptoms or question:
{query}

Available web information:
{context}

Respond strictly in JSON with the following fields:
{{
  "Summary": "One concise paragraph summarizing the possible context or concern.",
  "Possible_Causes": ["Possible cause 1", "Possible cause 2"],
  "Triage_Recommendation": "One of ['Self-Care', 'See Doctor Soon', 'Urgent GP', 'Emergency']",
  "Next_Steps": ["Step 1", "Step 2"],
  "Disclaimer": "This is not medical advice. Consult a doctor.",
  "References": [
      {{"name": "NHS - Fever", "url": "https://www.nhs.uk/conditions/fever"}},
      {{"name": "Mayo Clinic - Fatigue", "url": "https://www.mayoclinic.org/diseases-conditions/fatigue"}}
  ]
}}

If the query is unrelated to health, respond with:
{{
  "Summary": "This triage assistant cannot answer questions unrelated to health.",
  "Possible_Causes": [],
  "Triage_Recommendation": "N/A",
  "Next_Steps": [],
  "Disclaimer": "This is not medical advice. Consult a healthcare provider for real symptoms.",
  "References": []
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_query_and_context() {
        let prompt = compose("I have a headache", "NHS: drink water.");
        assert!(prompt.contains("User symptoms or question:\nI have a headache\n"));
        assert!(prompt.contains("Available web information:\nNHS: drink water.\n"));
    }

    #[test]
    fn empty_context_renders_placeholder() {
        let prompt = compose("cough", "");
        assert!(prompt.contains("Available web information:\nNo web data found.\n"));
        assert_eq!(compose("cough", "   "), prompt);
    }

    #[test]
    fn states_schema_and_allowed_values() {
        let prompt = compose("fever", "ctx");
        for field in [
            "\"Summary\"",
            "\"Possible_Causes\"",
            "\"Triage_Recommendation\"",
            "\"Next_Steps\"",
            "\"Disclaimer\"",
            "\"References\"",
        ] {
            assert!(prompt.contains(field), "missing {field}");
        }
        assert!(prompt.contains("'Self-Care', 'See Doctor Soon', 'Urgent GP', 'Emergency'"));
        assert!(prompt.contains("\"Triage_Recommendation\": \"N/A\""));
        // literal braces survive formatting
        assert!(prompt.contains("{\"name\": \"NHS - Fever\""));
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(compose("a", "b"), compose("a", "b"));
    }

    #[test]
    fn query_is_not_length_limited() {
        let long = "x".repeat(50_000);
        assert!(compose(&long, "").contains(&long));
    }
}
