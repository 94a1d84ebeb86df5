//! Base trait for language-model clients.
//!
//! Every client the crew can hand to an agent implements [`BaseLLM`]. The
//! call signature is loose (`serde_json::Value` messages, tool
//! descriptors and options) so wrappers can sit in front of any provider
//! without knowing its wire format.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::LLMError;

/// A single message in a conversation: at least `role` and `content`.
pub type LLMMessage = HashMap<String, Value>;

/// A capability declaration passed to a model call, e.g. `{"googleSearch": {}}`.
pub type ToolDescriptor = Value;

/// Pass-through call options (temperature, token limits, ...).
pub type CallOptions = HashMap<String, Value>;

/// Provider assumed when a model name carries no `provider/` prefix.
pub const DEFAULT_PROVIDER: &str = "openai";

// ---------------------------------------------------------------------------
// BaseLLM trait
// ---------------------------------------------------------------------------

/// Interface shared by all model clients.
#[async_trait]
pub trait BaseLLM: Send + Sync + fmt::Debug {
    /// The model identifier this client targets.
    fn model(&self) -> &str;

    /// The provider name (e.g. `"gemini"`).
    fn provider(&self) -> &str {
        DEFAULT_PROVIDER
    }

    /// Call the model synchronously.
    fn call(
        &self,
        messages: Vec<LLMMessage>,
        tools: Option<Vec<ToolDescriptor>>,
        options: CallOptions,
    ) -> Result<Value, LLMError>;

    /// Call the model asynchronously.
    ///
    /// Defaults to the blocking [`call`](BaseLLM::call); network-backed
    /// clients override this.
    async fn acall(
        &self,
        messages: Vec<LLMMessage>,
        tools: Option<Vec<ToolDescriptor>>,
        options: CallOptions,
    ) -> Result<Value, LLMError> {
        self.call(messages, tools, options)
    }
}

// ---------------------------------------------------------------------------
// BaseLLMState
// ---------------------------------------------------------------------------

/// Model and credential configuration shared by concrete clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseLLMState {
    /// The model identifier, possibly prefixed (`gemini/gemini-2.5-flash`).
    pub model: String,
    /// Optional sampling temperature.
    pub temperature: Option<f64>,
    /// API key. Never serialized.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Optional endpoint override.
    pub base_url: Option<String>,
    /// Provider name.
    pub provider: String,
}

impl BaseLLMState {
    /// Create state for `model`, inferring the provider from its prefix.
    pub fn new(model: impl Into<String>) -> Result<Self, LLMError> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(LLMError::MissingModel);
        }
        let provider = Self::extract_provider(&model);
        Ok(Self {
            model,
            temperature: None,
            api_key: None,
            base_url: None,
            provider,
        })
    }

    /// Extract the provider from a model string (`"gemini/x"` -> `"gemini"`).
    pub fn extract_provider(model: &str) -> String {
        match model.split_once('/') {
            Some((prefix, _)) if !prefix.is_empty() => prefix.to_string(),
            _ => DEFAULT_PROVIDER.to_string(),
        }
    }

    /// The model name with any `provider/` prefix removed.
    pub fn bare_model(&self) -> &str {
        self.model
            .split_once('/')
            .map_or(self.model.as_str(), |(_, name)| name)
    }

    /// Build a single user message from plain text.
    pub fn string_to_messages(text: &str) -> Vec<LLMMessage> {
        let mut msg = HashMap::new();
        msg.insert("role".to_string(), Value::String("user".to_string()));
        msg.insert("content".to_string(), Value::String(text.to_string()));
        vec![msg]
    }
}

/// Pull the text out of a client response.
///
/// Clients return either a bare string or an object with a `content` field.
pub fn response_text(response: &Value) -> String {
    if let Some(s) = response.as_str() {
        return s.to_string();
    }
    if let Some(content) = response.get("content").and_then(|c| c.as_str()) {
        return content.to_string();
    }
    response.to_string()
}
