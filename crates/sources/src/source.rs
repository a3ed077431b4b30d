//! Trusted source definitions.

use medtriage_config::{QUERY_PLACEHOLDER, SourceConfig};
use medtriage_core::error::FetchError;
use medtriage_core::triage::Reference;

/// A trusted site with a search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedSource {
    name: String,
    search_url: String,
}

impl TrustedSource {
    /// Create a source from a name and a URL template containing `{query}`.
    pub fn new(name: impl Into<String>, search_url: impl Into<String>) -> Result<Self, FetchError> {
        let name = name.into();
        let search_url = search_url.into();

        if !search_url.contains(QUERY_PLACEHOLDER) {
            return Err(FetchError::InvalidSource(format!(
                "{name}: search URL has no {QUERY_PLACEHOLDER} placeholder"
            )));
        }
        if !search_url.starts_with("http://") && !search_url.starts_with("https://") {
            return Err(FetchError::InvalidSource(format!(
                "{name}: search URL must be http(s)"
            )));
        }

        Ok(Self { name, search_url })
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self, FetchError> {
        Self::new(&config.name, &config.search_url)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The search URL for `query`.
    pub fn url_for(&self, query: &str) -> String {
        self.search_url.replace(QUERY_PLACEHOLDER, &encode_query(query))
    }

    /// A reference pointing at this source's results for `query`.
    pub fn reference_for(&self, query: &str) -> Reference {
        Reference::new(&self.name, self.url_for(query))
    }
}

/// Form-style query encoding: spaces become `+`, reserved bytes are
/// percent-encoded.
pub fn encode_query(query: &str) -> String {
    query
        .split(' ')
        .map(|part| urlencoding::encode(part).into_owned())
        .collect::<Vec<_>>()
        .join("+")
}
