//! Triage pipeline — gather, compose, complete, extract.
//!
//! `TriageAgent` is built once per process and holds nothing that changes
//! between turns, so one instance can serve every query behind an `Arc`.
//! Each stage is awaited before the next starts.

use std::sync::Arc;
use medtriage_config::AppConfig;
use medtriage_core::error::FetchError;
use medtriage_core::gather::{ContextGatherer, GatheredContext};
use medtriage_core::provider::{Provider, ProviderRequest};
use medtriage_core::triage::{Reference, TriageResult};
use tracing::{debug, error, info, warn};

use crate::extract::extract;
use crate::prompt::{NO_WEB_DATA, compose};

/// Context text when every trusted source came back empty.
pub const NO_RELIABLE_DATA: &str = "No reliable web data found.";

/// Context text when gathering failed for any other reason.
pub const INFORMATION_UNAVAILABLE: &str = "Information unavailable";

/// Everything produced by one pipeline run.
#[derive(Debug, Clone)]
pub struct TriageReport {
    /// The validated verdict.
    pub result: TriageResult,
    /// Completion text as returned by the provider (or the failure placeholder).
    pub raw_response: String,
    /// The context block that went into the prompt.
    pub context: String,
    /// Sources the gatherer drew on. Distinct from the model's own citations.
    pub sources: Vec<Reference>,
}

/// The configured triage pipeline.
pub struct TriageAgent {
    provider: Arc<dyn Provider>,
    gatherer: Option<Arc<dyn ContextGatherer>>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl TriageAgent {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            gatherer: None,
            model: model.into(),
            temperature: 0.3,
            max_tokens: None,
        }
    }

    /// Model and sampling settings from the loaded config.
    pub fn from_config(provider: Arc<dyn Provider>, config: &AppConfig) -> Self {
        Self::new(provider, config.effective_model())
            .with_temperature(config.default_temperature)
            .with_max_tokens(config.default_max_tokens)
    }

    pub fn with_gatherer(mut self, gatherer: Arc<dyn ContextGatherer>) -> Self {
        self.gatherer = Some(gatherer);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Run one query through the pipeline.
    pub async fn run(&self, query: &str) -> TriageResult {
        self.run_detailed(query).await.result
    }

    /// Run one query and keep the intermediate artifacts.
    pub async fn run_detailed(&self, query: &str) -> TriageReport {
        info!(
            provider = self.provider.name(),
            model = %self.model,
            chars = query.len(),
            "Starting triage"
        );

        let (context, sources) = self.gather_context(query).await;
        let prompt = compose(query, &context);
        let raw_response = self.complete(prompt).await;
        let result = extract(&raw_response);

        info!(
            recommendation = %result.triage_recommendation,
            causes = result.possible_causes.len(),
            references = result.references.len(),
            "Triage complete"
        );

        TriageReport {
            result,
            raw_response,
            context,
            sources,
        }
    }

    /// Collect context, substituting a sentinel when gathering fails.
    async fn gather_context(&self, query: &str) -> (String, Vec<Reference>) {
        let Some(gatherer) = &self.gatherer else {
            return (NO_WEB_DATA.to_string(), Vec::new());
        };

        match gatherer.gather(query).await {
            Ok(gathered) => {
                debug!(
                    gatherer = gatherer.name(),
                    sources = gathered.references.len(),
                    "Context gathered"
                );
                let references = gathered.references.clone();
                (render_context(&gathered), references)
            }
            Err(FetchError::NoData) => {
                warn!(gatherer = gatherer.name(), "No trusted source returned data");
                (NO_RELIABLE_DATA.to_string(), Vec::new())
            }
            Err(e) => {
                warn!(gatherer = gatherer.name(), error = %e, "Context gathering failed");
                (INFORMATION_UNAVAILABLE.to_string(), Vec::new())
            }
        }
    }

    /// Send the prompt, turning a provider failure into placeholder text.
    async fn complete(&self, prompt: String) -> String {
        let mut request =
            ProviderRequest::prompt(&self.model, prompt).with_temperature(self.temperature);
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        match self.provider.complete(request).await {
            Ok(response) => {
                if let Some(usage) = &response.usage {
                    debug!(
                        prompt_tokens = usage.prompt_tokens,
                        completion_tokens = usage.completion_tokens,
                        "Completion usage"
                    );
                }
                response.message.content
            }
            Err(e) => {
                error!(provider = self.provider.name(), error = %e, "Completion failed");
                format!("The triage service is currently unavailable: {e}")
            }
        }
    }
}

/// The context block: summary text, then a `Sources:` list when present.
///
/// A blank summary is replaced by [`NO_WEB_DATA`].
pub fn render_context(gathered: &GatheredContext) -> String {
    let summary = match gathered.summary.trim() {
        "" => NO_WEB_DATA,
        text => text,
    };
    if gathered.references.is_empty() {
        return summary.to_string();
    }

    let sources = gathered
        .references
        .iter()
        .map(|r| format!("- {}: {}", r.name, r.url))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{summary}\n\nSources:\n{sources}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{SELF_CARE_JSON, SequentialMockProvider, StaticGatherer};
    use medtriage_core::error::ProviderError;
    use medtriage_core::triage::{DEFAULT_DISCLAIMER, TriageLevel};

    fn cold_context() -> GatheredContext {
        GatheredContext {
            summary: "Colds usually clear up within a week.".into(),
            references: vec![Reference::new("NHS", "https://www.nhs.uk/search/?q=cold")],
        }
    }

    #[tokio::test]
    async fn run_parses_fenced_completion() {
        let provider = Arc::new(SequentialMockProvider::single_text(SELF_CARE_JSON));
        let agent = TriageAgent::new(provider.clone(), "phi3");

        let result = agent.run("runny nose").await;

        assert_eq!(result.summary, "Likely a common cold.");
        assert_eq!(result.triage_recommendation, TriageLevel::SelfCare);
        assert_eq!(result.next_steps, vec!["Rest.", "Drink fluids."]);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn prompt_carries_query_and_rendered_context() {
        let provider = Arc::new(SequentialMockProvider::single_text(SELF_CARE_JSON));
        let agent = TriageAgent::new(provider.clone(), "phi3")
            .with_gatherer(Arc::new(StaticGatherer(Ok(cold_context()))));

        let report = agent.run_detailed("runny nose").await;

        let prompt = &provider.prompts()[0];
        assert!(prompt.contains("runny nose"));
        assert!(prompt.contains(
            "Colds usually clear up within a week.\n\nSources:\n- NHS: https://www.nhs.uk/search/?q=cold"
        ));
        assert_eq!(report.sources, cold_context().references);
        assert_eq!(report.raw_response, SELF_CARE_JSON);
    }

    #[tokio::test]
    async fn no_gatherer_uses_no_web_data() {
        let provider = Arc::new(SequentialMockProvider::single_text("{}"));
        let agent = TriageAgent::new(provider.clone(), "phi3");

        let report = agent.run_detailed("headache").await;

        assert_eq!(report.context, NO_WEB_DATA);
        assert!(provider.prompts()[0].contains("Available web information:\nNo web data found.\n"));
    }

    #[tokio::test]
    async fn no_data_uses_reliable_sentinel() {
        let provider = Arc::new(SequentialMockProvider::single_text("{}"));
        let agent = TriageAgent::new(provider.clone(), "phi3")
            .with_gatherer(Arc::new(StaticGatherer(Err(FetchError::NoData))));

        let report = agent.run_detailed("headache").await;

        assert_eq!(report.context, NO_RELIABLE_DATA);
        assert!(report.sources.is_empty());
        assert!(provider.prompts()[0].contains(NO_RELIABLE_DATA));
    }

    #[tokio::test]
    async fn other_fetch_error_uses_unavailable_sentinel() {
        let provider = Arc::new(SequentialMockProvider::single_text("{}"));
        let agent = TriageAgent::new(provider.clone(), "phi3").with_gatherer(Arc::new(
            StaticGatherer(Err(FetchError::InvalidSource("bad".into()))),
        ));

        let report = agent.run_detailed("headache").await;

        assert_eq!(report.context, INFORMATION_UNAVAILABLE);
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_placeholder_summary() {
        let provider = Arc::new(SequentialMockProvider::failing(ProviderError::Network(
            "connection refused".into(),
        )));
        let agent = TriageAgent::new(provider, "phi3");

        let result = agent.run("chest pain").await;

        assert!(result.summary.starts_with("The triage service is currently unavailable:"));
        assert!(result.summary.contains("connection refused"));
        assert_eq!(result.triage_recommendation, TriageLevel::Unknown);
        assert_eq!(result.disclaimer, DEFAULT_DISCLAIMER);
    }

    #[tokio::test]
    async fn request_uses_configured_sampling() {
        let provider = Arc::new(SequentialMockProvider::single_text("{}"));
        let agent = TriageAgent::new(provider.clone(), "llama3")
            .with_temperature(0.1)
            .with_max_tokens(512);

        agent.run("x").await;

        let request = &provider.requests()[0];
        assert_eq!(request.model, "llama3");
        assert_eq!(request.temperature, 0.1);
        assert_eq!(request.max_tokens, Some(512));
        assert_eq!(request.messages.len(), 1);
    }

    #[tokio::test]
    async fn agent_is_reusable_across_turns() {
        let provider = Arc::new(SequentialMockProvider::new(vec![
            Ok(SELF_CARE_JSON.into()),
            Ok("plain text".into()),
        ]));
        let agent = TriageAgent::new(provider.clone(), "phi3");

        let first = agent.run("one").await;
        let second = agent.run("two").await;

        assert_eq!(first.triage_recommendation, TriageLevel::SelfCare);
        assert_eq!(second, TriageResult::degraded("plain text"));
        assert_eq!(provider.call_count(), 2);
    }

    #[test]
    fn from_config_prefers_provider_model() {
        let provider = Arc::new(SequentialMockProvider::new(vec![]));
        let mut config = AppConfig::default();
        assert_eq!(TriageAgent::from_config(provider.clone(), &config).model(), "phi3");

        config.providers.insert(
            config.default_provider.clone(),
            medtriage_config::ProviderConfig {
                default_model: Some("llama3.1:8b".into()),
                ..Default::default()
            },
        );
        assert_eq!(TriageAgent::from_config(provider.clone(), &config).model(), "llama3.1:8b");

        config.apply_env_overrides(|key| (key == "MEDTRIAGE_MODEL").then(|| "mistral".into()));
        assert_eq!(TriageAgent::from_config(provider, &config).model(), "mistral");
    }

    #[test]
    fn render_context_without_references_is_summary_only() {
        let gathered = GatheredContext {
            summary: "  some text ".into(),
            references: vec![],
        };
        assert_eq!(render_context(&gathered), "some text");

        let empty = GatheredContext {
            summary: String::new(),
            references: vec![],
        };
        assert_eq!(render_context(&empty), NO_WEB_DATA);
    }

    #[test]
    fn render_context_with_blank_summary_keeps_sources() {
        let gathered = GatheredContext {
            summary: "  \n".into(),
            references: vec![Reference::new("NHS", "https://www.nhs.uk/search/?q=cold")],
        };
        assert_eq!(
            render_context(&gathered),
            "No web data found.\n\nSources:\n- NHS: https://www.nhs.uk/search/?q=cold"
        );
    }
}
