//! Language-model clients.
//!
//! - [`base_llm`] - the [`BaseLLM`] trait every client implements
//! - [`providers`] - concrete provider clients (Gemini)
//! - [`google_search`] - the search-augmented wrapper used by the researcher

pub mod base_llm;
pub mod error;
pub mod google_search;
pub mod providers;

pub use base_llm::{BaseLLM, BaseLLMState, CallOptions, LLMMessage, ToolDescriptor};
pub use error::LLMError;
pub use google_search::{with_google_search, GeminiWithGoogleSearch, GOOGLE_SEARCH_TOOL};
