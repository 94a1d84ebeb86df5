//! Core Agent struct.
//!
//! An agent is a configured persona (role, goal, backstory) paired with the
//! model binding that will run it. Agents are built once from their config
//! entry and then shared (`Arc<Agent>`) between the factory that produced
//! them and the crew that runs them.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::llms::base_llm::BaseLLM;
use crate::llms::error::LLMError;
use crate::llms::google_search::{GeminiWithGoogleSearch, GOOGLE_SEARCH_TOOL};
use crate::llms::providers::gemini::GeminiCompletion;
use crate::llms::BaseLLMState;
use crate::project::config::AgentConfig;
use crate::utilities::string_utils::interpolate_only;

/// The model an agent runs on.
#[derive(Debug, Clone)]
pub enum AgentLlm {
    /// A plain model identifier, resolved to a client by the runtime.
    Model(String),
    /// A client that declares Google Search on every call.
    SearchAugmented(Arc<GeminiWithGoogleSearch>),
}

impl AgentLlm {
    /// The model identifier, whichever kind of binding this is.
    pub fn model(&self) -> &str {
        match self {
            AgentLlm::Model(name) => name,
            AgentLlm::SearchAugmented(client) => client.model(),
        }
    }

    /// The model string for a plain binding, `None` for a client binding.
    pub fn as_model_name(&self) -> Option<&str> {
        match self {
            AgentLlm::Model(name) => Some(name),
            AgentLlm::SearchAugmented(_) => None,
        }
    }

    pub fn is_search_augmented(&self) -> bool {
        matches!(self, AgentLlm::SearchAugmented(_))
    }

    /// A callable client for this binding.
    ///
    /// Plain model strings are resolved by provider prefix; only `gemini/`
    /// models have a client in this crate.
    pub fn client(&self) -> Result<Arc<dyn BaseLLM>, LLMError> {
        let client: Arc<dyn BaseLLM> = match self {
            AgentLlm::SearchAugmented(client) => client.clone(),
            AgentLlm::Model(name) => match BaseLLMState::extract_provider(name).as_str() {
                "gemini" | "google" => Arc::new(GeminiCompletion::new(name.as_str(), None)?),
                other => {
                    return Err(LLMError::Other(format!(
                        "no client available for provider '{}' (model '{}')",
                        other, name
                    )))
                }
            },
        };
        Ok(client)
    }
}

impl From<&str> for AgentLlm {
    fn from(model: &str) -> Self {
        AgentLlm::Model(model.to_string())
    }
}

impl From<GeminiWithGoogleSearch> for AgentLlm {
    fn from(client: GeminiWithGoogleSearch) -> Self {
        AgentLlm::SearchAugmented(Arc::new(client))
    }
}

// A plain binding serializes as its model string; a search-augmented one as
// `{"model": ..., "tools": ["googleSearch"]}`.
impl Serialize for AgentLlm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AgentLlm::Model(name) => serializer.serialize_str(name),
            AgentLlm::SearchAugmented(client) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("model", client.model())?;
                map.serialize_entry("tools", &[GOOGLE_SEARCH_TOOL])?;
                map.end()
            }
        }
    }
}

/// Represents an agent in a crew.
#[derive(Debug, Clone, Serialize)]
pub struct Agent {
    /// Unique identifier for the agent.
    pub id: Uuid,
    /// Role of the agent.
    pub role: String,
    /// Objective of the agent.
    pub goal: String,
    /// Backstory of the agent.
    pub backstory: String,
    /// The config entry this agent was built from, unchanged.
    pub config: AgentConfig,
    /// Model binding.
    pub llm: AgentLlm,
    /// Verbose mode for the agent execution.
    pub verbose: bool,

    #[serde(skip)]
    original_role: Option<String>,
    #[serde(skip)]
    original_goal: Option<String>,
    #[serde(skip)]
    original_backstory: Option<String>,
}

impl Agent {
    /// Build an agent from its config entry.
    pub fn from_config(config: AgentConfig, llm: impl Into<AgentLlm>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: config.role.clone(),
            goal: config.goal.clone(),
            backstory: config.backstory.clone().unwrap_or_default(),
            config,
            llm: llm.into(),
            verbose: false,
            original_role: None,
            original_goal: None,
            original_backstory: None,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Interpolate inputs into the agent role, goal, and backstory.
    ///
    /// Always works from the text as first configured, so repeated calls
    /// with different inputs do not compound.
    pub fn interpolate_inputs(&mut self, inputs: &HashMap<String, String>) {
        let role = self.original_role.get_or_insert_with(|| self.role.clone());
        let goal = self.original_goal.get_or_insert_with(|| self.goal.clone());
        let backstory = self
            .original_backstory
            .get_or_insert_with(|| self.backstory.clone());

        self.role = interpolate_only(role, inputs);
        self.goal = interpolate_only(goal, inputs);
        self.backstory = interpolate_only(backstory, inputs);
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Agent(role={}, llm={})", self.role, self.llm.model())
    }
}
