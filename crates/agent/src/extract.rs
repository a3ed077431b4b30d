//! Structured extraction — turns raw model output into a [`TriageResult`].
//!
//! Model output is untrusted. It may be wrapped in a Markdown fence,
//! surrounded by chatter, truncated, or shaped differently from what the
//! prompt asked for. Extraction never fails: unparseable text becomes the
//! degraded result, and individual fields with the wrong shape fall back
//! to their defaults.

use medtriage_core::triage::{DEFAULT_DISCLAIMER, TriageLevel, TriageResult};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

/// Extract a validated triage result from raw completion text.
pub fn extract(raw_text: &str) -> TriageResult {
    let working = clean_model_output(raw_text);

    match serde_json::from_str::<Value>(working) {
        Ok(Value::Object(fields)) => normalize(&fields),
        Ok(other) => {
            debug!(kind = json_kind(&other), "Model output is JSON but not an object");
            TriageResult::degraded(raw_text)
        }
        Err(e) => {
            debug!(error = %e, chars = raw_text.len(), "Model output is not parseable JSON");
            TriageResult::degraded(raw_text)
        }
    }
}

/// Strip a surrounding code fence, then isolate the `{ ... }` span.
pub fn clean_model_output(raw_text: &str) -> &str {
    isolate_object(strip_fences(raw_text))
}

/// Remove an enclosing ```` ``` ```` / ```` ```json ```` fence.
///
/// Only applies when the trimmed text opens with a fence line and closes
/// with a fence line. Otherwise the trimmed text is returned unchanged.
fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some((tag, body)) = rest.split_once('\n') else {
        return trimmed;
    };
    let tag = tag.trim();
    if !tag.is_empty() && !tag.eq_ignore_ascii_case("json") {
        return trimmed;
    }
    let Some(body) = body.strip_suffix("```") else {
        return trimmed;
    };

    // the closing marker must sit on its own line
    let body = body.trim_end_matches([' ', '\t']);
    if !body.is_empty() && !body.ends_with('\n') {
        return trimmed;
    }

    body.trim()
}

/// First `{` through last `}`, greedy. Text without such a span is kept.
fn isolate_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end > start => &text[start..=end],
        _ => text,
    }
}

fn normalize(fields: &Map<String, Value>) -> TriageResult {
    let summary = fields
        .get("Summary")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let triage_recommendation = match fields.get("Triage_Recommendation") {
        Some(Value::String(label)) => {
            let level = TriageLevel::from_label(label);
            if level == TriageLevel::Unknown {
                debug!(label = %label, "Unrecognized triage recommendation");
            }
            level
        }
        Some(other) => {
            debug!(kind = json_kind(other), "Triage recommendation is not a string");
            TriageLevel::Unknown
        }
        None => TriageLevel::Unknown,
    };

    let disclaimer = fields
        .get("Disclaimer")
        .and_then(Value::as_str)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(DEFAULT_DISCLAIMER)
        .to_string();

    TriageResult {
        summary,
        possible_causes: parse_array_lenient(fields, "Possible_Causes"),
        triage_recommendation,
        next_steps: parse_array_lenient(fields, "Next_Steps"),
        disclaimer,
        references: parse_array_lenient(fields, "References"),
    }
}

/// Parse an array field leniently, skipping items that fail to deserialize.
///
/// A missing field or a non-array value yields an empty list.
fn parse_array_lenient<T: DeserializeOwned>(fields: &Map<String, Value>, key: &str) -> Vec<T> {
    match fields.get(key) {
        None => vec![],
        Some(Value::Array(items)) => {
            let parsed: Vec<T> = items
                .iter()
                .filter_map(|v| serde_json::from_value(v.clone()).ok())
                .collect();
            if parsed.len() < items.len() {
                debug!(
                    field = key,
                    dropped = items.len() - parsed.len(),
                    "Dropped malformed entries"
                );
            }
            parsed
        }
        Some(other) => {
            debug!(field = key, kind = json_kind(other), "Expected an array");
            vec![]
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
