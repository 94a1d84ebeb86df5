//! Main Task struct.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::project::config::TaskConfig;
use crate::utilities::string_utils::interpolate_only;

/// Represents a task to be executed by a crew.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    /// Unique identifier for the task.
    pub id: Uuid,
    /// Descriptive text detailing the task's purpose and execution.
    pub description: String,
    /// Clear definition of expected task outcome.
    pub expected_output: String,
    /// Role id of the agent expected to handle the task, if configured.
    pub agent: Option<String>,
    /// The config entry this task was built from, unchanged.
    pub config: TaskConfig,

    #[serde(skip)]
    original_description: Option<String>,
    #[serde(skip)]
    original_expected_output: Option<String>,
}

impl Task {
    /// Build a task from its config entry.
    pub fn from_config(config: TaskConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: config.description.clone(),
            expected_output: config.expected_output.clone().unwrap_or_default(),
            agent: config.agent.clone(),
            config,
            original_description: None,
            original_expected_output: None,
        }
    }

    /// Interpolate inputs into the task description and expected output.
    pub fn interpolate_inputs(&mut self, inputs: &HashMap<String, String>) {
        let description = self
            .original_description
            .get_or_insert_with(|| self.description.clone());
        let expected = self
            .original_expected_output
            .get_or_insert_with(|| self.expected_output.clone());

        self.description = interpolate_only(description, inputs);
        self.expected_output = interpolate_only(expected, inputs);
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Task(description={}, expected_output={})",
            self.description, self.expected_output
        )
    }
}
