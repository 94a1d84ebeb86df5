//! Google Gemini completion client.
//!
//! Talks to the Gemini `generateContent` REST endpoint. Tool descriptors are
//! forwarded in order: OpenAI-style function specs are collected into one
//! `functionDeclarations` entry, any other descriptor (built-in tools such as
//! `{"googleSearch": {}}`) is sent verbatim.
//!
//! # Authentication
//!
//! Uses the explicit key if given, else `GOOGLE_API_KEY`, else
//! `GEMINI_API_KEY`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::runtime::{Handle, RuntimeFlavor};

use crate::llms::base_llm::{BaseLLM, BaseLLMState, CallOptions, LLMMessage, ToolDescriptor};
use crate::llms::error::LLMError;

/// Public Gemini API root.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Request timeout for a single call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Call options that map onto `generationConfig`.
const GENERATION_OPTIONS: &[&str] = &["temperature", "maxOutputTokens", "topP", "topK"];

/// Gemini client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiCompletion {
    /// Shared model/credential state.
    #[serde(flatten)]
    pub state: BaseLLMState,
}

impl GeminiCompletion {
    /// Create a client for `model` (with or without the `gemini/` prefix).
    pub fn new(model: impl Into<String>, api_key: Option<String>) -> Result<Self, LLMError> {
        let mut state = BaseLLMState::new(model)?;
        state.api_key = api_key
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok());
        state.provider = "gemini".to_string();
        Ok(Self { state })
    }

    /// Override the endpoint root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.state.base_url = Some(base_url.into());
        self
    }

    /// Set the default sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.state.temperature = Some(temperature);
        self
    }

    fn api_key(&self) -> Result<&str, LLMError> {
        self.state
            .api_key
            .as_deref()
            .ok_or_else(|| LLMError::MissingApiKey {
                provider: "gemini".to_string(),
            })
    }

    fn api_endpoint(&self) -> String {
        let base = self
            .state
            .base_url
            .as_deref()
            .unwrap_or(GEMINI_API_BASE)
            .trim_end_matches('/');
        format!("{}/models/{}:generateContent", base, self.state.bare_model())
    }

    /// Build `generationConfig` from the client defaults and call options.
    pub fn generation_config(&self, options: &CallOptions) -> Value {
        let mut config = Map::new();
        if let Some(temp) = self.state.temperature {
            config.insert("temperature".to_string(), json!(temp));
        }
        for (key, value) in options {
            if GENERATION_OPTIONS.contains(&key.as_str()) {
                config.insert(key.clone(), value.clone());
            } else {
                log::debug!("Gemini: ignoring unsupported call option '{}'", key);
            }
        }
        Value::Object(config)
    }

    /// Convert chat messages into Gemini `contents` plus an optional system
    /// instruction.
    pub fn format_messages(messages: &[LLMMessage]) -> (Option<String>, Vec<Value>) {
        let mut system_parts: Vec<String> = Vec::new();
        let mut contents: Vec<Value> = Vec::new();

        for msg in messages {
            let role = msg.get("role").and_then(|v| v.as_str()).unwrap_or("user");
            let text = match msg.get("content") {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            };

            if role == "system" {
                system_parts.push(text);
                continue;
            }

            let gemini_role = if role == "assistant" { "model" } else { "user" };
            contents.push(json!({
                "role": gemini_role,
                "parts": [{ "text": text }],
            }));
        }

        let system = if system_parts.is_empty() {
            None
        } else {
            Some(system_parts.join("\n\n"))
        };
        (system, contents)
    }

    /// Translate tool descriptors into the Gemini `tools` array.
    ///
    /// Built-in descriptors keep their position; function specs are merged
    /// into a single `functionDeclarations` entry placed where the first one
    /// appeared.
    pub fn format_tools(tools: &[ToolDescriptor]) -> Vec<Value> {
        let mut out: Vec<Value> = Vec::new();
        let mut declarations: Vec<Value> = Vec::new();
        let mut declarations_at: Option<usize> = None;

        for tool in tools {
            match tool.get("function") {
                Some(func) if tool.get("type").and_then(|t| t.as_str()) == Some("function") => {
                    if declarations_at.is_none() {
                        declarations_at = Some(out.len());
                    }
                    declarations.push(func.clone());
                }
                _ => out.push(tool.clone()),
            }
        }

        if let Some(idx) = declarations_at {
            out.insert(idx, json!({ "functionDeclarations": declarations }));
        }
        out
    }

    /// Build the complete request body.
    pub fn build_request_body(
        &self,
        messages: &[LLMMessage],
        tools: Option<&[ToolDescriptor]>,
        options: &CallOptions,
    ) -> Value {
        let (system, contents) = Self::format_messages(messages);

        let mut body = json!({
            "contents": contents,
            "generationConfig": self.generation_config(options),
        });

        if let Some(system_text) = system {
            body["systemInstruction"] = json!({ "parts": [{ "text": system_text }] });
        }

        if let Some(tools) = tools.filter(|t| !t.is_empty()) {
            body["tools"] = Value::Array(Self::format_tools(tools));
        }

        body
    }

    /// Extract the concatenated text of the first candidate.
    pub fn parse_response(response: &Value) -> Result<Value, LLMError> {
        if let Some(error) = response.get("error") {
            let message = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown Gemini API error");
            return Err(LLMError::Response(message.to_string()));
        }

        let candidate = response
            .get("candidates")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .ok_or_else(|| LLMError::Response("no candidates in Gemini response".to_string()))?;

        let parts = candidate
            .get("content")
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
            .ok_or_else(|| {
                let reason = candidate
                    .get("finishReason")
                    .and_then(|r| r.as_str())
                    .unwrap_or("unknown");
                LLMError::Response(format!(
                    "Gemini candidate has no content (finishReason: {})",
                    reason
                ))
            })?;

        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect();
        Ok(Value::String(text))
    }
}

#[async_trait]
impl BaseLLM for GeminiCompletion {
    fn model(&self) -> &str {
        &self.state.model
    }

    fn provider(&self) -> &str {
        "gemini"
    }

    fn call(
        &self,
        messages: Vec<LLMMessage>,
        tools: Option<Vec<ToolDescriptor>>,
        options: CallOptions,
    ) -> Result<Value, LLMError> {
        self.api_key()?;
        match Handle::try_current() {
            Err(_) => {
                let rt = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()?;
                rt.block_on(self.acall(messages, tools, options))
            }
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| {
                    handle.block_on(self.acall(messages, tools, options))
                })
            }
            Ok(_) => Err(LLMError::Other(
                "blocking Gemini call inside a current-thread runtime; use acall".to_string(),
            )),
        }
    }

    async fn acall(
        &self,
        messages: Vec<LLMMessage>,
        tools: Option<Vec<ToolDescriptor>>,
        options: CallOptions,
    ) -> Result<Value, LLMError> {
        let api_key = self.api_key()?;

        log::debug!(
            "GeminiCompletion.acall: model={}, messages={}, tools={}",
            self.state.model,
            messages.len(),
            tools.as_ref().map_or(0, |t| t.len()),
        );

        let body = self.build_request_body(&messages, tools.as_deref(), &options);

        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let response = client
            .post(self.api_endpoint())
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(LLMError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let json: Value = serde_json::from_str(&text).map_err(|e| {
            LLMError::Response(format!(
                "failed to parse Gemini response: {} - body: {}",
                e,
                text.chars().take(500).collect::<String>()
            ))
        })?;

        Self::parse_response(&json)
    }
}
