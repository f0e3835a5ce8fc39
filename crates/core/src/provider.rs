//! ChatProvider trait — the abstraction over LLM completion backends.
//!
//! A provider knows how to send a chat request to an LLM and get text
//! back, either as one complete string or as a stream of fragments.
//! The agent loop calls `complete()` or `stream()` without knowing which
//! backend is configured.
//!
//! Transport failures (timeout, connectivity, bad status) are returned
//! as `ProviderError` and are NOT converted into observations anywhere —
//! they surface to the caller of the agent loop.

use crate::error::ProviderError;
use crate::message::ChatMessage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Configuration for a chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The model to use (e.g., "deepseek-ai/DeepSeek-V2.5")
    pub model: String,

    /// The conversation messages
    pub messages: Vec<ChatMessage>,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Whether to stream the response
    #[serde(default)]
    pub stream: bool,
}

fn default_temperature() -> f32 {
    0.7
}

/// A receiver of streamed text fragments.
///
/// The sequence is finite and non-restartable; the loop drains it fully
/// before parsing. A transport failure mid-stream arrives as an `Err`
/// item and ends the stream.
pub type FragmentStream =
    tokio::sync::mpsc::Receiver<std::result::Result<String, ProviderError>>;

/// The core ChatProvider trait.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// A human-readable name for this provider (e.g., "siliconflow").
    fn name(&self) -> &str;

    /// Send a request and get the complete response text.
    async fn complete(&self, request: ChatRequest)
    -> std::result::Result<String, ProviderError>;

    /// Send a request and get a lazy stream of text fragments.
    ///
    /// Default implementation calls `complete()` and yields the result
    /// as a single fragment.
    async fn stream(
        &self,
        request: ChatRequest,
    ) -> std::result::Result<FragmentStream, ProviderError> {
        let text = self.complete(request).await?;
        let (tx, rx) = tokio::sync::mpsc::channel(1);
        let _ = tx.send(Ok(text)).await;
        Ok(rx)
    }

    /// List available models for this provider.
    async fn list_models(&self) -> std::result::Result<Vec<String>, ProviderError> {
        Ok(Vec::new())
    }
}
