//! Errors that end an exchange.

use agentcc_config::ConfigError;
use agentcc_llm::LlmError;
use thiserror::Error;

/// Result type alias using the exchange error type.
pub type Result<T> = std::result::Result<T, ExchangeError>;

/// Anything that stops a prompt from turning into a persisted reply.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// No credential or executable could be found.
    #[error(transparent)]
    Resolve(#[from] ConfigError),

    /// The backend failed to produce a reply.
    #[error(transparent)]
    Backend(#[from] LlmError),

    /// The context file could not be written.
    #[error("Could not save context file: {0}")]
    Save(#[source] agentcc_session::Error),

    /// The context file could not be removed.
    #[error("Could not clear context file: {0}")]
    Clear(#[source] agentcc_session::Error),
}
