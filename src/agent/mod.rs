//! Agents and their model bindings.

pub mod core;

pub use self::core::{Agent, AgentLlm};
