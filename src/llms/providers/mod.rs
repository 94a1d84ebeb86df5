//! Provider clients.
//!
//! Each provider implements [`BaseLLM`](crate::llms::base_llm::BaseLLM) and
//! owns its request formatting and authentication.

pub mod gemini;
