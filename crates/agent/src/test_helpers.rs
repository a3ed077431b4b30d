//! Shared test helpers for pipeline and session tests.

use std::sync::Mutex;
use medtriage_core::error::{FetchError, ProviderError};
use medtriage_core::gather::{ContextGatherer, GatheredContext};
use medtriage_core::message::Message;
use medtriage_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};

/// A mock provider that returns a sequence of scripted completions.
///
/// Each call to `complete` returns the next entry and records the request.
/// Panics if more calls are made than entries provided.
pub struct SequentialMockProvider {
    responses: Vec<Result<String, ProviderError>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl SequentialMockProvider {
    pub fn new(responses: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            responses,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn single_text(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The prompt text of every request seen so far.
    pub fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.messages[0].content.clone())
            .collect()
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut requests = self.requests.lock().unwrap();
        let index = requests.len();
        requests.push(request);

        let Some(scripted) = self.responses.get(index) else {
            panic!(
                "SequentialMockProvider: no more responses (call #{}, have {})",
                index,
                self.responses.len()
            );
        };

        scripted.clone().map(|text| make_text_response(&text))
    }
}

pub fn make_text_response(text: &str) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
        model: "mock-model".into(),
    }
}

/// A gatherer that always returns the same outcome.
pub struct StaticGatherer(pub Result<GatheredContext, FetchError>);

#[async_trait::async_trait]
impl ContextGatherer for StaticGatherer {
    fn name(&self) -> &str {
        "static"
    }

    async fn gather(&self, _query: &str) -> Result<GatheredContext, FetchError> {
        self.0.clone()
    }
}

/// A well-formed triage completion.
pub const SELF_CARE_JSON: &str = r#"```json
{
  "Summary": "Likely a common cold.",
  "Possible_Causes": ["Viral infection"],
  "Triage_Recommendation": "Self-Care",
  "Next_Steps": ["Rest.", "Drink fluids."],
  "Disclaimer": "This is not medical advice. Consult a doctor.",
  "References": [{"name": "NHS - Colds", "url": "https://www.nhs.uk/conditions/common-cold/"}]
}
```"#;
