//! ContextGatherer trait — background text from trusted sources.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::FetchError;
use crate::triage::Reference;

/// Background information collected for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatheredContext {
    /// Cleaned (and possibly summarized) text.
    pub summary: String,

    /// The sources that contributed text.
    #[serde(default)]
    pub references: Vec<Reference>,
}

/// Retrieves background text for a user query.
///
/// Implementations report failures as `FetchError`; deciding what to put in
/// the prompt instead is the caller's job.
#[async_trait]
pub trait ContextGatherer: Send + Sync {
    fn name(&self) -> &str;

    async fn gather(&self, query: &str) -> std::result::Result<GatheredContext, FetchError>;
}
