//! Concrete crews.
//!
//! Each crew is a factory that turns its YAML configuration into agents and
//! tasks and packages them into a [`Crew`](crate::crew::Crew).

pub mod error;
pub mod github_resume_generator;

pub use error::CrewError;
pub use github_resume_generator::GithubResumeGenerator;
