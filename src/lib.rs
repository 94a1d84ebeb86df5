//! # github-resume-generator
//!
//! A two-agent crew that researches a GitHub profile and writes a technical
//! resume from it.
//!
//! The profile researcher runs on Gemini with Google Search declared on every
//! call ([`GeminiWithGoogleSearch`]); the resume writer runs on a plain Gemini
//! model. Agents and tasks are described in YAML (`config/agents.yaml`,
//! `config/tasks.yaml`) and assembled by [`GithubResumeGenerator`] into a
//! sequential [`Crew`].

pub mod agent;
pub mod cli;
pub mod crew;
pub mod crews;
pub mod llms;
pub mod process;
pub mod project;
pub mod task;
pub mod utilities;

pub use agent::{Agent, AgentLlm};
pub use crew::Crew;
pub use crews::{CrewError, GithubResumeGenerator};
pub use llms::base_llm::BaseLLM;
pub use llms::GeminiWithGoogleSearch;
pub use process::Process;
pub use task::Task;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
