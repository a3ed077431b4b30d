pub mod ask;
pub mod chat;
pub mod doctor;
pub mod onboard;
pub mod sources;

use std::sync::Arc;
use medtriage_agent::TriageAgent;
use medtriage_config::AppConfig;
use medtriage_sources::{Summarizer, WebContextGatherer};
use tracing::debug;

/// Load the config, failing with a readable message.
pub fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    AppConfig::load().map_err(|e| format!("Failed to load config: {e}").into())
}

/// Wire the triage pipeline from config: default provider, plus the web
/// gatherer (and its summarizer) when enabled.
pub fn build_agent(config: &AppConfig) -> Result<TriageAgent, Box<dyn std::error::Error>> {
    let router = medtriage_providers::build_from_config(config);
    let provider = router.default().ok_or("No default provider configured")?;

    let mut agent = TriageAgent::from_config(provider.clone(), config);

    if config.gatherer.enabled {
        let mut gatherer = WebContextGatherer::from_config(&config.gatherer)
            .map_err(|e| format!("Invalid gatherer config: {e}"))?;
        if config.gatherer.summarize {
            gatherer = gatherer.with_summarizer(Summarizer::new(
                provider,
                agent.model(),
                config.default_temperature,
            ));
        }
        debug!(sources = gatherer.sources().len(), "Web context gatherer enabled");
        agent = agent.with_gatherer(Arc::new(gatherer));
    }

    Ok(agent)
}
