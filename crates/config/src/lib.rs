//! Configuration loading, validation, and management for MedTriage.
//!
//! Loads configuration from `~/.medtriage/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Placeholder substituted with the encoded query in source URL templates.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// The root configuration structure.
///
/// Maps directly to `~/.medtriage/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key (can be overridden per-provider). Local runtimes ignore it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Completion service backend
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// Model name passed to the completion service
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Max tokens per completion
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,

    /// Provider-specific configurations
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,

    /// Trusted-source scraping
    #[serde(default)]
    pub gatherer: GathererConfig,

    /// Off-topic keyword filter
    #[serde(default)]
    pub prefilter: PrefilterConfig,
}

fn default_provider() -> String {
    "ollama".into()
}
fn default_model() -> String {
    "phi3".into()
}
fn default_temperature() -> f32 {
    0.3
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_true() -> bool {
    true
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("default_provider", &self.default_provider)
            .field("default_model", &self.default_model)
            .field("default_temperature", &self.default_temperature)
            .field("default_max_tokens", &self.default_max_tokens)
            .field("providers", &self.providers)
            .field("gatherer", &self.gatherer)
            .field("prefilter", &self.prefilter)
            .finish()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("default_model", &self.default_model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,

    /// Completion request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// A trusted medical website with a search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Display name, also used as the reference name
    pub name: String,

    /// Search URL template containing `{query}`
    pub search_url: String,
}

impl SourceConfig {
    pub fn new(name: impl Into<String>, search_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            search_url: search_url.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GathererConfig {
    /// Scrape trusted sources before asking the model
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Condense scraped text with the model before triage
    #[serde(default = "default_true")]
    pub summarize: bool,

    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Paragraphs taken from each page
    #[serde(default = "default_max_paragraphs")]
    pub max_paragraphs: usize,

    /// Character budget for the combined text
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
}

fn default_fetch_timeout() -> u64 {
    10
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; HealthcareTriageBot/1.0)".into()
}
fn default_max_paragraphs() -> usize {
    10
}
fn default_max_chars() -> usize {
    10_000
}
fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig::new("NHS", "https://www.nhs.uk/search/?q={query}"),
        SourceConfig::new(
            "Mayo Clinic",
            "https://www.mayoclinic.org/search/search-results?q={query}",
        ),
        SourceConfig::new("MedlinePlus", "https://medlineplus.gov/search?q={query}"),
    ]
}

impl Default for GathererConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            summarize: true,
            timeout_secs: default_fetch_timeout(),
            user_agent: default_user_agent(),
            max_paragraphs: default_max_paragraphs(),
            max_chars: default_max_chars(),
            sources: default_sources(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefilterConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Words that mark a query as unrelated to health
    #[serde(default = "default_off_topic_keywords")]
    pub keywords: Vec<String>,
}

fn default_off_topic_keywords() -> Vec<String> {
    [
        "code", "python", "sql", "movie", "game", "recipe", "football", "stocks", "car", "music",
        "politics", "book",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for PrefilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            keywords: default_off_topic_keywords(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.medtriage/config.toml).
    ///
    /// Environment overrides (highest priority):
    /// - `MEDTRIAGE_PROVIDER`, `MEDTRIAGE_MODEL`
    /// - `MEDTRIAGE_API_URL` (endpoint of the default provider)
    /// - `MEDTRIAGE_API_KEY`, then `OPENAI_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = lookup("MEDTRIAGE_PROVIDER") {
            self.default_provider = provider;
        }

        if let Some(model) = lookup("MEDTRIAGE_MODEL") {
            // a per-provider model would otherwise shadow the override
            if let Some(provider) = self.providers.get_mut(&self.default_provider) {
                provider.default_model = Some(model.clone());
            }
            self.default_model = model;
        }

        if let Some(url) = lookup("MEDTRIAGE_API_URL") {
            self.providers
                .entry(self.default_provider.clone())
                .or_default()
                .api_url = Some(url);
        }

        if self.api_key.is_none() {
            self.api_key = lookup("MEDTRIAGE_API_KEY").or_else(|| lookup("OPENAI_API_KEY"));
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".medtriage")
    }

    /// Path of the default config file.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_temperature < 0.0 || self.default_temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "default_temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.default_model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "default_model must not be empty".into(),
            ));
        }

        if self.gatherer.enabled {
            if self.gatherer.sources.is_empty() {
                return Err(ConfigError::ValidationError(
                    "gatherer is enabled but no sources are configured".into(),
                ));
            }
            if self.gatherer.timeout_secs == 0 {
                return Err(ConfigError::ValidationError(
                    "gatherer.timeout_secs must be > 0".into(),
                ));
            }
            if self.gatherer.max_chars == 0 {
                return Err(ConfigError::ValidationError(
                    "gatherer.max_chars must be > 0".into(),
                ));
            }
        }

        for source in &self.gatherer.sources {
            if !source.search_url.contains(QUERY_PLACEHOLDER) {
                return Err(ConfigError::ValidationError(format!(
                    "source '{}' search_url must contain {QUERY_PLACEHOLDER}",
                    source.name
                )));
            }
            if !source.search_url.starts_with("http://") && !source.search_url.starts_with("https://") {
                return Err(ConfigError::ValidationError(format!(
                    "source '{}' search_url must start with http:// or https://",
                    source.name
                )));
            }
        }

        Ok(())
    }

    /// Configuration block for the default provider, if one was given.
    pub fn default_provider_config(&self) -> Option<&ProviderConfig> {
        self.providers.get(&self.default_provider)
    }

    /// The model sent with every request: the default provider's
    /// `default_model` if set, else the top-level one.
    pub fn effective_model(&self) -> &str {
        self.default_provider_config()
            .and_then(|p| p.default_model.as_deref())
            .unwrap_or(&self.default_model)
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_provider: default_provider(),
            default_model: default_model(),
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
            providers: HashMap::new(),
            gatherer: GathererConfig::default(),
            prefilter: PrefilterConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
