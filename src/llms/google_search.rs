//! Search-augmented model client.
//!
//! [`GeminiWithGoogleSearch`] wraps any [`BaseLLM`] and makes sure every
//! outgoing call declares Gemini's built-in Google Search tool. The
//! descriptor always goes first; caller-supplied tools follow in their
//! original order. Duplicates are not filtered: a caller that already passes
//! `{"googleSearch": {}}` gets a second copy prepended.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::llms::base_llm::{BaseLLM, CallOptions, LLMMessage, ToolDescriptor};
use crate::llms::error::LLMError;
use crate::llms::providers::gemini::GeminiCompletion;

/// Capability name of Gemini's built-in web search.
pub const GOOGLE_SEARCH_TOOL: &str = "googleSearch";

/// The fixed descriptor injected into every call: `{"googleSearch": {}}`.
pub fn google_search_descriptor() -> ToolDescriptor {
    let mut descriptor = Map::new();
    descriptor.insert(GOOGLE_SEARCH_TOOL.to_string(), json!({}));
    Value::Object(descriptor)
}

/// Return `tools` with the search descriptor prepended.
///
/// `None` and an empty list both yield exactly `[{"googleSearch": {}}]`.
pub fn with_google_search(tools: Option<Vec<ToolDescriptor>>) -> Vec<ToolDescriptor> {
    let mut tools = tools.unwrap_or_default();
    tools.insert(0, google_search_descriptor());
    tools
}

/// A model client that injects Google Search into every call.
#[derive(Debug, Clone)]
pub struct GeminiWithGoogleSearch<L: BaseLLM = GeminiCompletion> {
    inner: L,
}

impl GeminiWithGoogleSearch<GeminiCompletion> {
    /// Build a Gemini-backed client for `model`, reading the API key from the
    /// environment.
    pub fn new(model: impl Into<String>) -> Result<Self, LLMError> {
        Ok(Self::wrap(GeminiCompletion::new(model, None)?))
    }
}

impl<L: BaseLLM> GeminiWithGoogleSearch<L> {
    /// Wrap an existing client.
    pub fn wrap(inner: L) -> Self {
        Self { inner }
    }

    /// The wrapped client.
    pub fn inner(&self) -> &L {
        &self.inner
    }
}

#[async_trait]
impl<L: BaseLLM> BaseLLM for GeminiWithGoogleSearch<L> {
    fn model(&self) -> &str {
        self.inner.model()
    }

    fn provider(&self) -> &str {
        self.inner.provider()
    }

    fn call(
        &self,
        messages: Vec<LLMMessage>,
        tools: Option<Vec<ToolDescriptor>>,
        options: CallOptions,
    ) -> Result<Value, LLMError> {
        let tools = with_google_search(tools);
        log::debug!(
            "GeminiWithGoogleSearch.call: model={}, tools={}",
            self.inner.model(),
            tools.len()
        );
        self.inner.call(messages, Some(tools), options)
    }

    async fn acall(
        &self,
        messages: Vec<LLMMessage>,
        tools: Option<Vec<ToolDescriptor>>,
        options: CallOptions,
    ) -> Result<Value, LLMError> {
        let tools = with_google_search(tools);
        log::debug!(
            "GeminiWithGoogleSearch.acall: model={}, tools={}",
            self.inner.model(),
            tools.len()
        );
        self.inner.acall(messages, Some(tools), options).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Arguments seen by [`RecordingLLM`].
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct RecordedCall {
        pub messages: Vec<LLMMessage>,
        pub tools: Option<Vec<ToolDescriptor>>,
        pub options: CallOptions,
    }

    /// A client that records its arguments and replays a canned result.
    #[derive(Debug)]
    pub(crate) struct RecordingLLM {
        pub calls: Mutex<Vec<RecordedCall>>,
        pub fail: bool,
    }

    impl RecordingLLM {
        pub fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        pub fn last(&self) -> RecordedCall {
            self.calls.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl BaseLLM for RecordingLLM {
        fn model(&self) -> &str {
            "test-model"
        }

        fn call(
            &self,
            messages: Vec<LLMMessage>,
            tools: Option<Vec<ToolDescriptor>>,
            options: CallOptions,
        ) -> Result<Value, LLMError> {
            self.calls.lock().unwrap().push(RecordedCall {
                messages,
                tools,
                options,
            });
            if self.fail {
                Err(LLMError::Api {
                    status: 503,
                    message: "unavailable".to_string(),
                })
            } else {
                Ok(json!({"content": "ok"}))
            }
        }
    }

    fn messages() -> Vec<LLMMessage> {
        let mut m = HashMap::new();
        m.insert("role".to_string(), json!("user"));
        m.insert("content".to_string(), json!("test message"));
        vec![m]
    }

    #[test]
    fn test_descriptor_shape() {
        assert_eq!(google_search_descriptor(), json!({"googleSearch": {}}));
    }

    #[test]
    fn test_call_without_tools_injects_search() {
        let llm = GeminiWithGoogleSearch::wrap(RecordingLLM::new());
        llm.call(messages(), None, HashMap::new()).unwrap();

        let recorded = llm.inner().last();
        assert_eq!(recorded.tools, Some(vec![json!({"googleSearch": {}})]));
    }

    #[test]
    fn test_call_with_empty_tools_injects_search() {
        let llm = GeminiWithGoogleSearch::wrap(RecordingLLM::new());
        llm.call(messages(), Some(Vec::new()), HashMap::new()).unwrap();

        let recorded = llm.inner().last();
        assert_eq!(recorded.tools, Some(vec![json!({"googleSearch": {}})]));
    }

    #[test]
    fn test_call_with_tools_prepends_search() {
        let llm = GeminiWithGoogleSearch::wrap(RecordingLLM::new());
        let existing = vec![json!({"otherTool": {}}), json!({"thirdTool": {"x": 1}})];
        llm.call(messages(), Some(existing.clone()), HashMap::new())
            .unwrap();

        let tools = llm.inner().last().tools.unwrap();
        assert_eq!(tools.len(), 3);
        assert_eq!(tools[0], json!({"googleSearch": {}}));
        assert_eq!(&tools[1..], existing.as_slice());
    }

    #[test]
    fn test_call_does_not_deduplicate() {
        let llm = GeminiWithGoogleSearch::wrap(RecordingLLM::new());
        llm.call(messages(), Some(vec![google_search_descriptor()]), HashMap::new())
            .unwrap();

        let tools = llm.inner().last().tools.unwrap();
        assert_eq!(tools, vec![google_search_descriptor(), google_search_descriptor()]);
    }

    #[test]
    fn test_messages_and_options_pass_through() {
        let llm = GeminiWithGoogleSearch::wrap(RecordingLLM::new());
        let mut options = HashMap::new();
        options.insert("temperature".to_string(), json!(0.3));
        options.insert("custom".to_string(), json!({"nested": [1, 2]}));

        llm.call(messages(), None, options.clone()).unwrap();

        let recorded = llm.inner().last();
        assert_eq!(recorded.messages, messages());
        assert_eq!(recorded.options, options);
    }

    #[test]
    fn test_result_passes_through() {
        let llm = GeminiWithGoogleSearch::wrap(RecordingLLM::new());
        let result = llm.call(messages(), None, HashMap::new()).unwrap();
        assert_eq!(result, json!({"content": "ok"}));
    }

    #[test]
    fn test_error_propagates_unchanged() {
        let llm = GeminiWithGoogleSearch::wrap(RecordingLLM::failing());
        let err = llm.call(messages(), None, HashMap::new()).unwrap_err();
        assert!(matches!(err, LLMError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_acall_injects_search() {
        let llm = GeminiWithGoogleSearch::wrap(RecordingLLM::new());
        llm.acall(messages(), Some(vec![json!({"otherTool": {}})]), HashMap::new())
            .await
            .unwrap();

        let tools = llm.inner().last().tools.unwrap();
        assert_eq!(tools, vec![json!({"googleSearch": {}}), json!({"otherTool": {}})]);
    }

    #[tokio::test]
    async fn test_blocking_call_inside_runtime_returns_error() {
        let mut inner = GeminiCompletion::new("gemini/m", None).unwrap();
        inner.state.api_key = None;
        let llm = GeminiWithGoogleSearch::wrap(inner);

        let result = llm.call(
            crate::llms::BaseLLMState::string_to_messages("hi"),
            None,
            HashMap::new(),
        );
        assert!(matches!(result, Err(LLMError::MissingApiKey { .. })));
    }

    #[test]
    fn test_model_delegates() {
        let llm = GeminiWithGoogleSearch::wrap(RecordingLLM::new());
        assert_eq!(llm.model(), "test-model");
        assert_eq!(llm.provider(), "openai");
    }

    #[test]
    fn test_new_uses_gemini_client() {
        let llm = GeminiWithGoogleSearch::new("gemini/gemini-2.5-flash-preview-04-17").unwrap();
        assert_eq!(llm.model(), "gemini/gemini-2.5-flash-preview-04-17");
        assert_eq!(llm.provider(), "gemini");
    }
}
