//! Paragraph extraction from HTML search pages.
//!
//! Only `<p>` elements are read. Anything that is not paragraph text
//! (navigation, scripts, result metadata) is ignored.

use std::sync::LazyLock;
use regex::Regex;

static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p(?:\s[^>]*)?>(.*?)</p\s*>").expect("valid regex"));

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));

static NUMERIC_ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Collapse runs of whitespace to a single space and trim.
pub fn clean_text(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Decode the handful of entities that show up in paragraph text.
pub fn decode_entities(text: &str) -> String {
    let decoded = NUMERIC_ENTITY_RE.replace_all(text, |caps: &regex::Captures<'_>| {
        let code = &caps[1];
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        value
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });

    decoded
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        // last, so "&amp;lt;" stays literal
        .replace("&amp;", "&")
}

/// Text of the first `max` paragraphs, tags stripped and whitespace cleaned.
///
/// Paragraphs that are empty after cleaning still count towards `max`.
pub fn extract_paragraphs(html: &str, max: usize) -> Vec<String> {
    PARAGRAPH_RE
        .captures_iter(html)
        .take(max)
        .map(|caps| {
            let inner = TAG_RE.replace_all(&caps[1], " ");
            clean_text(&decode_entities(&inner))
        })
        .filter(|p| !p.is_empty())
        .collect()
}

/// The first `max` paragraphs joined into one line of text.
pub fn page_text(html: &str, max: usize) -> String {
    extract_paragraphs(html, max).join(" ")
}

/// Truncate to at most `max_chars` characters (not bytes).
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
