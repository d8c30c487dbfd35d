//! Provider error types.

use thiserror::Error;

use crate::models::ValidationError;

/// Errors that can occur while generating questions.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No credential was configured. Every call fails the same way.
    #[error("API key is missing, set the API_KEY environment variable")]
    MissingApiKey,

    /// The API rejected the credential.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The API returned a 429 rate limit response.
    #[error("rate limited")]
    RateLimited,

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The response carried no generated text.
    #[error("no response text received")]
    EmptyResponse,

    /// The generated text could not be turned into questions.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Reading a local question file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The questions were parsed but break an invariant.
    #[error("invalid questions: {0}")]
    Invalid(#[from] ValidationError),
}
