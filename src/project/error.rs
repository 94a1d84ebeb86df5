//! Configuration errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration or looking up configured
/// agents and tasks.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An agent producer asked for a role that is not configured.
    #[error("Agent '{0}' not found in agents config")]
    MissingAgent(String),

    /// A task producer asked for a task id that is not configured.
    #[error("Task '{0}' not found in tasks config")]
    MissingTask(String),

    /// A config file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config file is not valid YAML for its schema.
    #[error("Invalid YAML in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
