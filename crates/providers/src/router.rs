//! Provider router — selects the completion provider based on config.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use medtriage_config::ProviderConfig;
use medtriage_core::provider::Provider;
use tracing::debug;
use crate::openai_compat::OpenAiCompatProvider;

/// Routes completion requests to the configured provider.
pub struct ProviderRouter {
    providers: HashMap<String, Arc<dyn Provider>>,
    default_provider: String,
}

impl ProviderRouter {
    /// Create a new router with a default provider.
    pub fn new(default_provider: impl Into<String>) -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider.into(),
        }
    }

    /// Register a provider.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn Provider>) {
        self.providers.insert(name.into(), provider);
    }

    /// Get the default provider.
    pub fn default(&self) -> Option<Arc<dyn Provider>> {
        self.providers.get(&self.default_provider).cloned()
    }

    /// Get a specific provider by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).cloned()
    }
}

/// Build providers from configuration.
///
/// Every backend speaks the OpenAI chat-completions dialect, so they all
/// share one implementation and differ only in base URL and key.
pub fn build_from_config(config: &medtriage_config::AppConfig) -> ProviderRouter {
    let mut router = ProviderRouter::new(&config.default_provider);

    for (name, provider_config) in &config.providers {
        let provider = build_provider(name, provider_config, config.api_key.as_deref());
        router.register(name.clone(), Arc::new(provider));
    }

    // Ensure the default provider exists (even if not explicitly configured)
    if router.get(&config.default_provider).is_none() {
        let provider = build_provider(
            &config.default_provider,
            &ProviderConfig::default(),
            config.api_key.as_deref(),
        );
        router.register(config.default_provider.clone(), Arc::new(provider));
    }

    router
}

fn build_provider(
    name: &str,
    provider_config: &ProviderConfig,
    fallback_key: Option<&str>,
) -> OpenAiCompatProvider {
    let api_key = provider_config
        .api_key
        .as_deref()
        .or(fallback_key)
        .unwrap_or_default();

    let base_url = provider_config
        .api_url
        .clone()
        .unwrap_or_else(|| default_base_url(name));

    let mut provider = OpenAiCompatProvider::new(name, &base_url, api_key);
    if let Some(secs) = provider_config.timeout_secs {
        provider = provider.with_timeout(Duration::from_secs(secs));
    }

    debug!(provider = name, base_url = provider.base_url(), "Registered provider");
    provider
}

/// Get the default base URL for well-known providers.
fn default_base_url(provider_name: &str) -> String {
    match provider_name {
        "ollama" => "http://localhost:11434/v1".into(),
        "vllm" => "http://localhost:8000/v1".into(),
        "llamacpp" | "llama.cpp" => "http://localhost:8080/v1".into(),
        "lmstudio" => "http://localhost:1234/v1".into(),
        "openai" => "https://api.openai.com/v1".into(),
        _ => "http://localhost:11434/v1".into(),
    }
}
