//! Errors raised while producing agents, tasks and crews.

use thiserror::Error;

use crate::llms::error::LLMError;
use crate::project::error::ConfigError;

#[derive(Debug, Error)]
pub enum CrewError {
    /// Configuration lookup or loading failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The model client for an agent could not be built.
    #[error(transparent)]
    Llm(#[from] LLMError),
}
