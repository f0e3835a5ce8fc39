//! Scripted providers for exercising the loop without a network.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use wayfinder_core::error::ProviderError;
use wayfinder_core::provider::{ChatProvider, ChatRequest};

/// Returns a fixed sequence of responses, one per `complete` call.
pub struct SequentialMockProvider {
    responses: Vec<String>,
    calls: AtomicUsize,
}

impl SequentialMockProvider {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            calls: AtomicUsize::new(0),
        }
    }

    /// How many completions have been requested so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatProvider for SequentialMockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(
        &self,
        _request: ChatRequest,
    ) -> std::result::Result<String, ProviderError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(index)
            .cloned()
            .ok_or_else(|| ProviderError::Network("mock ran out of scripted responses".into()))
    }
}

/// Fails every completion with a timeout.
pub struct FailingProvider;

#[async_trait]
impl ChatProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing-mock"
    }

    async fn complete(
        &self,
        _request: ChatRequest,
    ) -> std::result::Result<String, ProviderError> {
        Err(ProviderError::Timeout("simulated timeout".into()))
    }
}
