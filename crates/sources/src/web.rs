//! Web context gatherer — scrapes trusted search pages for a query.
//!
//! Sources are fetched one after another. A source that fails (transport
//! error, non-200 status, no paragraph text) is logged and skipped; only
//! when every source comes back empty does the gatherer report
//! `FetchError::NoData`.

use std::time::Duration;
use async_trait::async_trait;
use medtriage_config::GathererConfig;
use medtriage_core::error::FetchError;
use medtriage_core::gather::{ContextGatherer, GatheredContext};
use tracing::{debug, info, warn};

use crate::scrape::{page_text, truncate_chars};
use crate::source::TrustedSource;
use crate::summarize::Summarizer;

/// Substituted when the model fails to condense the scraped text.
pub const SUMMARY_UNAVAILABLE: &str = "Summary unavailable due to processing error.";

/// Gathers background text from trusted medical websites.
pub struct WebContextGatherer {
    sources: Vec<TrustedSource>,
    client: reqwest::Client,
    user_agent: String,
    max_paragraphs: usize,
    max_chars: usize,
    summarizer: Option<Summarizer>,
}

impl WebContextGatherer {
    /// Build a gatherer from the `[gatherer]` config section.
    ///
    /// Summarization is attached separately with [`with_summarizer`](Self::with_summarizer)
    /// since it needs a provider.
    pub fn from_config(config: &GathererConfig) -> Result<Self, FetchError> {
        let sources = config
            .sources
            .iter()
            .map(TrustedSource::from_config)
            .collect::<Result<Vec<_>, _>>()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::InvalidSource(format!("HTTP client: {e}")))?;

        Ok(Self {
            sources,
            client,
            user_agent: config.user_agent.clone(),
            max_paragraphs: config.max_paragraphs,
            max_chars: config.max_chars,
            summarizer: None,
        })
    }

    pub fn with_summarizer(mut self, summarizer: Summarizer) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    pub fn sources(&self) -> &[TrustedSource] {
        &self.sources
    }

    /// Fetch one source and return its paragraph text (possibly empty).
    async fn fetch_source(&self, source: &TrustedSource, query: &str) -> Result<String, FetchError> {
        let url = source.url_for(query);
        debug!(source = source.name(), %url, "Fetching trusted source");

        let response = self
            .client
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| FetchError::Network {
                source_name: source.name().to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(FetchError::Status {
                source_name: source.name().to_string(),
                status,
            });
        }

        let html = response.text().await.map_err(|e| FetchError::Network {
            source_name: source.name().to_string(),
            reason: e.to_string(),
        })?;

        Ok(page_text(&html, self.max_paragraphs))
    }
}

#[async_trait]
impl ContextGatherer for WebContextGatherer {
    fn name(&self) -> &str {
        "web"
    }

    async fn gather(&self, query: &str) -> Result<GatheredContext, FetchError> {
        let mut texts = Vec::new();
        let mut references = Vec::new();

        for source in &self.sources {
            match self.fetch_source(source, query).await {
                Ok(text) if !text.is_empty() => {
                    debug!(source = source.name(), chars = text.len(), "Source returned text");
                    texts.push(text);
                    references.push(source.reference_for(query));
                }
                Ok(_) => debug!(source = source.name(), "Source returned no paragraph text"),
                Err(e) => warn!(error = %e, "Skipping trusted source"),
            }
        }

        if texts.is_empty() {
            return Err(FetchError::NoData);
        }

        let combined = truncate_chars(&texts.join(" "), self.max_chars);
        info!(
            sources = references.len(),
            chars = combined.chars().count(),
            "Gathered trusted source text"
        );

        let summary = match &self.summarizer {
            Some(summarizer) => match summarizer.summarize(&combined).await {
                Ok(summary) if !summary.is_empty() => summary,
                Ok(_) => {
                    warn!("Summarizer returned no text");
                    SUMMARY_UNAVAILABLE.to_string()
                }
                Err(e) => {
                    warn!(error = %e, "Failed to summarize source text");
                    SUMMARY_UNAVAILABLE.to_string()
                }
            },
            None => combined,
        };

        Ok(GatheredContext { summary, references })
    }
}
