//! Error types for the assistant subsystem.

use thiserror::Error;

/// Errors that can occur while talking to the text-to-structured-data
/// service.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Network/HTTP request failed
    #[error("Network error: {message}")]
    Network { message: String },

    /// The service answered with an error payload
    #[error("Assistant API error: {message}")]
    Api { message: String },

    /// No usable model was advertised by the service
    #[error("No model supporting generateContent was found")]
    NoModel,

    /// The response carried no candidates
    #[error("Assistant returned no candidates")]
    Empty,

    /// Candidate text did not contain a parseable JSON object
    #[error("Could not extract JSON from assistant output")]
    Unparseable,
}

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        AssistantError::Network {
            message: err.to_string(),
        }
    }
}
