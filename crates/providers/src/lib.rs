//! LLM chat completion clients for Wayfinder.
//!
//! The only wire protocol implemented is the OpenAI-compatible
//! `/chat/completions` shape, which covers SiliconFlow (the default
//! endpoint), OpenAI, OpenRouter, Ollama, vLLM, and friends.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;
