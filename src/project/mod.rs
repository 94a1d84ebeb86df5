//! Crew project layout and configuration loading.
//!
//! A crew project keeps its agent and task definitions in two YAML files,
//! `config/agents.yaml` and `config/tasks.yaml` by default. [`CrewBase`]
//! records where those files live and loads them into typed mappings that
//! crew factories such as
//! [`GithubResumeGenerator`](crate::crews::GithubResumeGenerator) consume.

pub mod config;
pub mod error;

use std::path::{Path, PathBuf};

pub use config::{
    load_agents_config, load_tasks_config, parse_agents_config, parse_tasks_config, AgentConfig,
    AgentsConfig, TaskConfig, TasksConfig,
};
pub use error::ConfigError;

/// Default agents file, relative to the project root.
pub const DEFAULT_AGENTS_CONFIG: &str = "config/agents.yaml";

/// Default tasks file, relative to the project root.
pub const DEFAULT_TASKS_CONFIG: &str = "config/tasks.yaml";

/// Locations of a crew project's configuration files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrewBase {
    /// Path to the agents YAML config file.
    pub agents_config: PathBuf,
    /// Path to the tasks YAML config file.
    pub tasks_config: PathBuf,
}

impl Default for CrewBase {
    fn default() -> Self {
        Self {
            agents_config: PathBuf::from(DEFAULT_AGENTS_CONFIG),
            tasks_config: PathBuf::from(DEFAULT_TASKS_CONFIG),
        }
    }
}

impl CrewBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `agents.yaml` and `tasks.yaml` inside `dir`.
    pub fn from_config_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            agents_config: dir.join("agents.yaml"),
            tasks_config: dir.join("tasks.yaml"),
        }
    }

    /// Resolve relative paths against `root`. Absolute paths are kept.
    pub fn resolve(&self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            agents_config: root.join(&self.agents_config),
            tasks_config: root.join(&self.tasks_config),
        }
    }

    /// Load both configuration files.
    pub fn load(&self) -> Result<(AgentsConfig, TasksConfig), ConfigError> {
        let agents = load_agents_config(&self.agents_config)?;
        let tasks = load_tasks_config(&self.tasks_config)?;
        log::info!(
            "Loaded {} agent(s) from {} and {} task(s) from {}",
            agents.len(),
            self.agents_config.display(),
            tasks.len(),
            self.tasks_config.display()
        );
        Ok((agents, tasks))
    }
}
