//! The GitHub resume generator crew.
//!
//! Two agents and two tasks, run sequentially:
//!
//! | producer                     | kind  | model binding                 |
//! |------------------------------|-------|-------------------------------|
//! | `github_profile_researcher`  | agent | Gemini + Google Search        |
//! | `resume_writer`              | agent | plain Gemini model string     |
//! | `profile_research_task`      | task  |                               |
//! | `resume_generation_task`     | task  |                               |
//!
//! Every producer looks its id up in the loaded configuration, builds the
//! object, appends it to the factory's `agents`/`tasks` list and returns it.
//! [`GithubResumeGenerator::crew`] then packages whatever has been produced.

use std::path::Path;
use std::sync::Arc;

use crate::agent::{Agent, AgentLlm};
use crate::crew::Crew;
use crate::llms::google_search::GeminiWithGoogleSearch;
use crate::process::Process;
use crate::project::config::{AgentsConfig, TasksConfig};
use crate::project::{ConfigError, CrewBase};
use crate::task::Task;

use super::error::CrewError;

/// Model used by every agent of this crew.
pub const GEMINI_MODEL: &str = "gemini/gemini-2.5-flash-preview-04-17";

/// Model for roles missing from [`AGENT_LLM_POLICY`].
pub const DEFAULT_MODEL: &str = GEMINI_MODEL;

/// How an agent's model client is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmPolicy {
    /// Bind the agent to a plain model-name string.
    Model(&'static str),
    /// Bind the agent to a [`GeminiWithGoogleSearch`] client for the model.
    SearchAugmented(&'static str),
}

impl LlmPolicy {
    /// Build the binding this policy describes.
    pub fn build(self) -> Result<AgentLlm, CrewError> {
        Ok(match self {
            LlmPolicy::Model(model) => AgentLlm::from(model),
            LlmPolicy::SearchAugmented(model) => GeminiWithGoogleSearch::new(model)?.into(),
        })
    }
}

/// Role id -> model binding policy.
pub const AGENT_LLM_POLICY: &[(&str, LlmPolicy)] = &[
    ("github_profile_researcher", LlmPolicy::SearchAugmented(GEMINI_MODEL)),
    ("resume_writer", LlmPolicy::Model(GEMINI_MODEL)),
];

/// Agent producers, in the order [`GithubResumeGenerator::build_all`] runs them.
pub const AGENT_ORDER: &[&str] = &["github_profile_researcher", "resume_writer"];

/// Task producers, in the order [`GithubResumeGenerator::build_all`] runs them.
pub const TASK_ORDER: &[&str] = &["profile_research_task", "resume_generation_task"];

/// Look up the binding policy for a role.
pub fn llm_policy_for(role_id: &str) -> LlmPolicy {
    AGENT_LLM_POLICY
        .iter()
        .find(|(id, _)| *id == role_id)
        .map(|(_, policy)| *policy)
        .unwrap_or(LlmPolicy::Model(DEFAULT_MODEL))
}

/// Factory for the resume generator's agents, tasks and crew.
#[derive(Debug, Clone, Default)]
pub struct GithubResumeGenerator {
    /// Role id -> agent configuration entry.
    pub agents_config: AgentsConfig,
    /// Task id -> task configuration entry.
    pub tasks_config: TasksConfig,
    /// Agents produced so far, in production order.
    pub agents: Vec<Arc<Agent>>,
    /// Tasks produced so far, in production order.
    pub tasks: Vec<Arc<Task>>,
}

impl GithubResumeGenerator {
    /// An empty factory; fill `agents_config`/`tasks_config` before producing.
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory over already-parsed configuration mappings.
    pub fn with_config(agents_config: AgentsConfig, tasks_config: TasksConfig) -> Self {
        Self {
            agents_config,
            tasks_config,
            ..Self::default()
        }
    }

    /// Load the configuration files named by `base`.
    pub fn from_crew_base(base: &CrewBase) -> Result<Self, ConfigError> {
        let (agents_config, tasks_config) = base.load()?;
        Ok(Self::with_config(agents_config, tasks_config))
    }

    /// Load `agents.yaml` and `tasks.yaml` from `dir`.
    pub fn from_config_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_crew_base(&CrewBase::from_config_dir(dir))
    }

    // -----------------------------------------------------------------------
    // Generic producers
    // -----------------------------------------------------------------------

    /// Build and register the agent configured under `role_id`.
    pub fn agent(&mut self, role_id: &str) -> Result<Arc<Agent>, CrewError> {
        let config = self
            .agents_config
            .get(role_id)
            .cloned()
            .ok_or_else(|| ConfigError::MissingAgent(role_id.to_string()))?;
        let llm = llm_policy_for(role_id).build()?;

        let agent = Arc::new(Agent::from_config(config, llm).verbose(true));
        log::debug!("Produced agent '{}' ({})", role_id, agent);
        self.agents.push(Arc::clone(&agent));
        Ok(agent)
    }

    /// Build and register the task configured under `task_id`.
    pub fn task(&mut self, task_id: &str) -> Result<Arc<Task>, CrewError> {
        let config = self
            .tasks_config
            .get(task_id)
            .cloned()
            .ok_or_else(|| ConfigError::MissingTask(task_id.to_string()))?;

        let task = Arc::new(Task::from_config(config));
        log::debug!("Produced task '{}'", task_id);
        self.tasks.push(Arc::clone(&task));
        Ok(task)
    }

    // -----------------------------------------------------------------------
    // Named producers
    // -----------------------------------------------------------------------

    pub fn github_profile_researcher(&mut self) -> Result<Arc<Agent>, CrewError> {
        self.agent("github_profile_researcher")
    }

    pub fn resume_writer(&mut self) -> Result<Arc<Agent>, CrewError> {
        self.agent("resume_writer")
    }

    pub fn profile_research_task(&mut self) -> Result<Arc<Task>, CrewError> {
        self.task("profile_research_task")
    }

    pub fn resume_generation_task(&mut self) -> Result<Arc<Task>, CrewError> {
        self.task("resume_generation_task")
    }

    /// Run every producer in declared order, stopping at the first failure.
    pub fn build_all(&mut self) -> Result<(), CrewError> {
        for role_id in AGENT_ORDER {
            self.agent(role_id)?;
        }
        for task_id in TASK_ORDER {
            self.task(task_id)?;
        }
        Ok(())
    }

    /// Assemble the sequential crew from the agents and tasks produced so far.
    #[doc(alias = "assemble_crew")]
    pub fn crew(&self) -> Crew {
        let crew = Crew::new(self.agents.clone(), self.tasks.clone())
            .name("github_resume_generator")
            .process(Process::Sequential)
            .verbose(true);
        log::info!("Assembled {}", crew);
        crew
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::config::{AgentConfig, TaskConfig};
    use std::collections::HashMap;

    fn generator() -> GithubResumeGenerator {
        let mut agents = HashMap::new();
        agents.insert(
            "github_profile_researcher".to_string(),
            AgentConfig::new("GitHub Profile Analyst", "Analyze profile"),
        );
        agents.insert(
            "resume_writer".to_string(),
            AgentConfig::new("Technical Resume Generator", "Generate resume"),
        );

        let mut tasks = HashMap::new();
        tasks.insert(
            "profile_research_task".to_string(),
            TaskConfig::new("Conduct research"),
        );
        tasks.insert(
            "resume_generation_task".to_string(),
            TaskConfig::new("Generate resume"),
        );

        GithubResumeGenerator::with_config(agents, tasks)
    }

    #[test]
    fn test_researcher_uses_search_client() {
        let mut generator = generator();
        let agent = generator.github_profile_researcher().unwrap();

        assert_eq!(agent.config, generator.agents_config["github_profile_researcher"]);
        assert!(agent.llm.is_search_augmented());
        assert_eq!(agent.llm.model(), GEMINI_MODEL);
        assert!(agent.verbose);
    }

    #[test]
    fn test_writer_uses_plain_model_string() {
        let mut generator = generator();
        let agent = generator.resume_writer().unwrap();

        assert_eq!(agent.config, generator.agents_config["resume_writer"]);
        assert_eq!(
            agent.llm.as_model_name(),
            Some("gemini/gemini-2.5-flash-preview-04-17")
        );
    }

    #[test]
    fn test_agent_config_is_the_entry() {
        let mut generator = GithubResumeGenerator::new();
        generator
            .agents_config
            .insert("r".to_string(), AgentConfig::new("X", "Y"));

        let agent = generator.agent("r").unwrap();
        assert_eq!(agent.config, AgentConfig::new("X", "Y"));
        assert_eq!(agent.llm.as_model_name(), Some(DEFAULT_MODEL));
    }

    #[test]
    fn test_task_producers() {
        let mut generator = generator();
        let task1 = generator.profile_research_task().unwrap();
        assert_eq!(task1.config, generator.tasks_config["profile_research_task"]);

        let task2 = generator.resume_generation_task().unwrap();
        assert_eq!(task2.config, generator.tasks_config["resume_generation_task"]);
    }

    #[test]
    fn test_task_description_scenario() {
        let mut generator = GithubResumeGenerator::new();
        generator
            .tasks_config
            .insert("t1".to_string(), TaskConfig::new("d1"));

        let task = generator.task("t1").unwrap();
        assert_eq!(task.config.description, "d1");
    }

    #[test]
    fn test_missing_entries_fail_lookup() {
        let mut generator = GithubResumeGenerator::new();

        let err = generator.resume_writer().unwrap_err();
        assert!(matches!(
            err,
            CrewError::Config(ConfigError::MissingAgent(ref id)) if id == "resume_writer"
        ));

        let err = generator.profile_research_task().unwrap_err();
        assert!(matches!(err, CrewError::Config(ConfigError::MissingTask(_))));

        assert!(generator.agents.is_empty());
        assert!(generator.tasks.is_empty());
    }

    #[test]
    fn test_producers_register_in_call_order() {
        let mut generator = generator();
        let writer = generator.resume_writer().unwrap();
        let researcher = generator.github_profile_researcher().unwrap();

        assert_eq!(generator.agents.len(), 2);
        assert!(Arc::ptr_eq(&generator.agents[0], &writer));
        assert!(Arc::ptr_eq(&generator.agents[1], &researcher));
    }

    #[test]
    fn test_crew_shares_produced_objects() {
        let mut generator = generator();
        generator.build_all().unwrap();

        let crew = generator.crew();
        assert_eq!(crew.process, Process::Sequential);
        assert!(crew.verbose);
        assert_eq!(crew.agents.len(), generator.agents.len());
        assert_eq!(crew.tasks.len(), generator.tasks.len());
        for (a, b) in crew.agents.iter().zip(&generator.agents) {
            assert!(Arc::ptr_eq(a, b));
        }
        for (a, b) in crew.tasks.iter().zip(&generator.tasks) {
            assert!(Arc::ptr_eq(a, b));
        }
    }

    #[test]
    fn test_crew_only_contains_produced_objects() {
        let mut generator = generator();
        generator.profile_research_task().unwrap();

        let crew = generator.crew();
        assert!(crew.agents.is_empty());
        assert_eq!(crew.tasks.len(), 1);
        assert_eq!(crew.tasks[0].description, "Conduct research");
    }

    #[test]
    fn test_build_all_declared_order() {
        let mut generator = generator();
        generator.build_all().unwrap();

        let roles: Vec<&str> = generator.agents.iter().map(|a| a.role.as_str()).collect();
        assert_eq!(roles, vec!["GitHub Profile Analyst", "Technical Resume Generator"]);
        let descriptions: Vec<&str> = generator
            .tasks
            .iter()
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["Conduct research", "Generate resume"]);
    }

    #[test]
    fn test_build_all_stops_at_first_missing() {
        let mut generator = generator();
        generator.tasks_config.remove("profile_research_task");

        assert!(generator.build_all().is_err());
        assert_eq!(generator.agents.len(), 2);
        assert!(generator.tasks.is_empty());
    }

    #[test]
    fn test_policy_table() {
        assert_eq!(
            llm_policy_for("github_profile_researcher"),
            LlmPolicy::SearchAugmented(GEMINI_MODEL)
        );
        assert_eq!(llm_policy_for("resume_writer"), LlmPolicy::Model(GEMINI_MODEL));
        assert_eq!(llm_policy_for("unknown"), LlmPolicy::Model(DEFAULT_MODEL));
    }

    #[test]
    fn test_from_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("agents.yaml"),
            "resume_writer:\n  role: Writer\n  goal: Write\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("tasks.yaml"), "t1:\n  description: d1\n").unwrap();

        let mut generator = GithubResumeGenerator::from_config_dir(dir.path()).unwrap();
        assert_eq!(generator.resume_writer().unwrap().role, "Writer");
        assert_eq!(generator.task("t1").unwrap().description, "d1");
    }

    #[test]
    fn test_shipped_config_builds_full_crew() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config");
        let mut generator = GithubResumeGenerator::from_config_dir(dir).unwrap();
        generator.build_all().unwrap();

        let crew = generator.crew();
        assert_eq!(crew.agents.len(), 2);
        assert_eq!(crew.tasks.len(), 2);
        assert_eq!(crew.agents[0].role, "GitHub Profile Analyst");
        assert!(!crew.tasks[0].description.ends_with('\n'));
        assert!(crew.agents[0].llm.is_search_augmented());
        assert_eq!(crew.tasks[1].agent.as_deref(), Some("resume_writer"));

        let mut inputs = HashMap::new();
        inputs.insert("github_username".to_string(), "octocat".to_string());
        let plan = crew.plan(&inputs);
        assert!(plan.tasks[0].description.contains("octocat"));
        assert!(!plan.tasks[0].description.contains("{github_username}"));
    }
}
