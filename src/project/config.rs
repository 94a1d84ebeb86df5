//! Agent and task configuration entries.
//!
//! Both files are YAML mappings keyed by id:
//!
//! ```yaml
//! github_profile_researcher:
//!   role: "GitHub Profile Analyst"
//!   goal: "Analyze {github_username}'s public profile"
//!   backstory: "..."
//! ```
//!
//! Fields the crate does not know about are kept in `extra` so a config entry
//! survives a load untouched.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ConfigError;

/// Agents configuration: role id -> entry.
pub type AgentsConfig = HashMap<String, AgentConfig>;

/// Tasks configuration: task id -> entry.
pub type TasksConfig = HashMap<String, TaskConfig>;

/// One entry of `agents.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub role: String,
    pub goal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backstory: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl AgentConfig {
    pub fn new(role: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: None,
            extra: HashMap::new(),
        }
    }

    pub fn with_backstory(mut self, backstory: impl Into<String>) -> Self {
        self.backstory = Some(backstory.into());
        self
    }
}

/// One entry of `tasks.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskConfig {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    /// Role id of the agent expected to handle the task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl TaskConfig {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            expected_output: None,
            agent: None,
            extra: HashMap::new(),
        }
    }

    pub fn with_expected_output(mut self, expected_output: impl Into<String>) -> Self {
        self.expected_output = Some(expected_output.into());
        self
    }

    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }
}

/// Parse an agents mapping from YAML text.
pub fn parse_agents_config(yaml: &str) -> Result<AgentsConfig, serde_yaml::Error> {
    parse_mapping(yaml)
}

/// Parse a tasks mapping from YAML text.
pub fn parse_tasks_config(yaml: &str) -> Result<TasksConfig, serde_yaml::Error> {
    parse_mapping(yaml)
}

/// Load `agents.yaml` from disk.
pub fn load_agents_config(path: impl AsRef<Path>) -> Result<AgentsConfig, ConfigError> {
    load_mapping(path.as_ref())
}

/// Load `tasks.yaml` from disk.
pub fn load_tasks_config(path: impl AsRef<Path>) -> Result<TasksConfig, ConfigError> {
    load_mapping(path.as_ref())
}

// An empty file is an empty mapping, not an error.
fn parse_mapping<T>(yaml: &str) -> Result<HashMap<String, T>, serde_yaml::Error>
where
    T: for<'de> Deserialize<'de>,
{
    if yaml.trim().is_empty() {
        return Ok(HashMap::new());
    }
    serde_yaml::from_str(yaml)
}

fn load_mapping<T>(path: &Path) -> Result<HashMap<String, T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mapping = parse_mapping(&content).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Loaded {} entries from {}", mapping.len(), path.display());
    Ok(mapping)
}
