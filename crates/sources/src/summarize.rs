//! Condensing scraped text with the language model.

use std::sync::Arc;
use medtriage_core::error::ProviderError;
use medtriage_core::provider::{Provider, ProviderRequest};
use tracing::debug;

/// Instruction template for condensing scraped source text.
pub fn compose_source_summary(text: &str) -> String {
    format!(
        "You are a medical research assistant.
Summarize the following content focusing only on:
- Common causes
- Red flag symptoms
- When to seek urgent care
- Self-care advice (non-medical)

DO NOT diagnose, prescribe, or recommend drugs.

Content:
{text}

Summary:
"
    )
}

/// Summarizes gathered text through a completion provider.
#[derive(Clone)]
pub struct Summarizer {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
}

impl Summarizer {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
        }
    }

    pub async fn summarize(&self, text: &str) -> Result<String, ProviderError> {
        let request = ProviderRequest::prompt(&self.model, compose_source_summary(text))
            .with_temperature(self.temperature);

        debug!(provider = self.provider.name(), chars = text.len(), "Summarizing source text");

        let response = self.provider.complete(request).await?;
        Ok(response.message.content.trim().to_string())
    }
}
