//! Error types for the MedTriage domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error type; the pipeline absorbs all
//! of them, so there is no crate-wide error enum.
//!
//! Note that the structured extractor has no error type at all: malformed
//! model output is recovered locally and never surfaces as an error.

use thiserror::Error;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Failures while gathering background text from trusted sources.
///
/// The pipeline never aborts on these; it substitutes a sentinel context
/// string and logs the error.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Request to {source_name} failed: {reason}")]
    Network { source_name: String, reason: String },

    #[error("{source_name} returned HTTP {status}")]
    Status { source_name: String, status: u16 },

    #[error("No trusted source returned usable text")]
    NoData,

    #[error("Invalid source definition: {0}")]
    InvalidSource(String),
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("Message delivery failed to {channel}: {reason}")]
    DeliveryFailed { channel: String, reason: String },

    #[error("Channel connection lost: {0}")]
    ConnectionLost(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = ProviderError::ApiError {
            status_code: 503,
            message: "model is loading".into(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("model is loading"));
    }

    #[test]
    fn fetch_error_names_the_source() {
        let err = FetchError::Status {
            source_name: "NHS".into(),
            status: 404,
        };
        assert!(err.to_string().contains("NHS"));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn channel_error_names_the_channel() {
        let err = ChannelError::DeliveryFailed {
            channel: "cli".into(),
            reason: "broken pipe".into(),
        };
        assert_eq!(err.to_string(), "Message delivery failed to cli: broken pipe");
    }
}
