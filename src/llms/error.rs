//! Errors raised by model clients.

use thiserror::Error;

/// Errors that can occur while building or calling a model client.
#[derive(Debug, Error)]
pub enum LLMError {
    /// The client was constructed without a model name.
    #[error("Model name is required and cannot be empty")]
    MissingModel,

    /// No API key was supplied and none was found in the environment.
    #[error("API key not set for provider '{provider}'")]
    MissingApiKey { provider: String },

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The provider answered, but the body could not be understood.
    #[error("Unexpected response: {0}")]
    Response(String),

    /// The blocking runtime used by `call` could not be started.
    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),

    /// Any other client-specific failure.
    #[error("{0}")]
    Other(String),
}
