//! Main Crew struct.
//!
//! A crew is the hand-off unit for the orchestration runtime: an ordered list
//! of agents, an ordered list of tasks and the process that says how to work
//! through them. Agents and tasks are held behind `Arc` so the crew shares
//! exactly the objects its factory produced.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::agent::{Agent, AgentLlm};
use crate::process::Process;
use crate::task::Task;
use crate::utilities::string_utils::template_variables;

/// Represents a group of agents and the tasks they should perform.
#[derive(Debug, Clone)]
pub struct Crew {
    /// Unique identifier for the crew instance.
    pub id: Uuid,
    /// Optional name for the crew.
    pub name: Option<String>,
    /// Agents part of this crew, in registration order.
    pub agents: Vec<Arc<Agent>>,
    /// Tasks assigned to the crew, in registration order.
    pub tasks: Vec<Arc<Task>>,
    /// The process flow that the crew will follow.
    pub process: Process,
    /// Verbosity for logging during execution.
    pub verbose: bool,
}

impl Crew {
    pub fn new(agents: Vec<Arc<Agent>>, tasks: Vec<Arc<Task>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: Some("crew".to_string()),
            agents,
            tasks,
            process: Process::default(),
            verbose: false,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn process(mut self, process: Process) -> Self {
        self.process = process;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Placeholders used by any agent role, goal or backstory, or any task
    /// description or expected output, that `inputs` does not fill.
    pub fn missing_inputs(&self, inputs: &HashMap<String, String>) -> BTreeSet<String> {
        let agent_fields = self
            .agents
            .iter()
            .flat_map(|a| [a.role.as_str(), a.goal.as_str(), a.backstory.as_str()]);
        let task_fields = self
            .tasks
            .iter()
            .flat_map(|t| [t.description.as_str(), t.expected_output.as_str()]);

        agent_fields
            .chain(task_fields)
            .flat_map(template_variables)
            .filter(|name| !inputs.contains_key(name))
            .collect()
    }

    /// A serializable view of the crew with `inputs` filled into every agent
    /// and task. The crew itself is left untouched.
    pub fn plan(&self, inputs: &HashMap<String, String>) -> CrewPlan {
        if self.agents.is_empty() || self.tasks.is_empty() {
            log::warn!(
                "Crew {} has {} agent(s) and {} task(s)",
                self.id,
                self.agents.len(),
                self.tasks.len()
            );
        }

        for name in self.missing_inputs(inputs) {
            log::warn!("No input for placeholder '{{{}}}'", name);
        }

        let agents = self
            .agents
            .iter()
            .map(|agent| {
                let mut agent = Agent::clone(agent);
                agent.interpolate_inputs(inputs);
                AgentPlan {
                    role: agent.role,
                    goal: agent.goal,
                    backstory: agent.backstory,
                    llm: agent.llm,
                }
            })
            .collect();

        let tasks = self
            .tasks
            .iter()
            .map(|task| {
                let mut task = Task::clone(task);
                task.interpolate_inputs(inputs);
                TaskPlan {
                    description: task.description,
                    expected_output: task.expected_output,
                    agent: task.agent,
                }
            })
            .collect();

        CrewPlan {
            id: self.id,
            name: self.name.clone(),
            process: self.process,
            verbose: self.verbose,
            agents,
            tasks,
        }
    }
}

impl fmt::Display for Crew {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Crew(id={}, process={}, number_of_agents={}, number_of_tasks={})",
            self.id,
            self.process,
            self.agents.len(),
            self.tasks.len()
        )
    }
}

/// Serializable summary of a crew, as handed to the runtime.
#[derive(Debug, Clone, Serialize)]
pub struct CrewPlan {
    pub id: Uuid,
    pub name: Option<String>,
    pub process: Process,
    pub verbose: bool,
    pub agents: Vec<AgentPlan>,
    pub tasks: Vec<TaskPlan>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentPlan {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub llm: AgentLlm,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskPlan {
    pub description: String,
    pub expected_output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}
