//! Process types for crew execution.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the runtime works through a crew's tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Process {
    /// Tasks are executed one after another in order.
    #[default]
    Sequential,
    /// A manager agent delegates tasks to other agents.
    Hierarchical,
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Process::Sequential => write!(f, "sequential"),
            Process::Hierarchical => write!(f, "hierarchical"),
        }
    }
}
