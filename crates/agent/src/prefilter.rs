//! Keyword pre-filter for queries unrelated to health.
//!
//! Runs in front of the pipeline. It is a cheap heuristic, not a
//! classifier: a hit short-circuits the turn with a fixed refusal.

use medtriage_config::PrefilterConfig;

/// The reply sent instead of running the pipeline.
pub const REFUSAL: &str = "This triage assistant cannot answer questions unrelated to health or \
                           medicine. If you have a medical-related query, please describe your symptoms.";

#[derive(Debug, Clone)]
pub struct OffTopicFilter {
    enabled: bool,
    keywords: Vec<String>,
}

impl OffTopicFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            enabled: true,
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// A filter that never matches.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            keywords: Vec::new(),
        }
    }

    pub fn from_config(config: &PrefilterConfig) -> Self {
        if config.enabled {
            Self::new(&config.keywords)
        } else {
            Self::disabled()
        }
    }

    /// The first configured keyword found in `input`, if any.
    ///
    /// Single-word keywords match whole alphanumeric tokens, not substrings,
    /// so "car" does not fire on "cardiac" and "code" does not fire on
    /// "codeine". This is intended: a plain substring test refuses genuine
    /// health questions. Keywords containing spaces or punctuation still
    /// match as a substring of the lowercased input.
    pub fn matched_keyword(&self, input: &str) -> Option<&str> {
        if !self.enabled {
            return None;
        }

        let lowered = input.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();

        self.keywords
            .iter()
            .find(|k| {
                if k.chars().all(char::is_alphanumeric) {
                    tokens.contains(&k.as_str())
                } else {
                    lowered.contains(k.as_str())
                }
            })
            .map(String::as_str)
    }

    pub fn is_off_topic(&self, input: &str) -> bool {
        self.matched_keyword(input).is_some()
    }
}

impl Default for OffTopicFilter {
    fn default() -> Self {
        Self::from_config(&PrefilterConfig::default())
    }
}
