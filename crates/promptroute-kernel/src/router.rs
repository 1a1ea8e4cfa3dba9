//! End-to-end routing facade.
//!
//! [`PromptRouter`] runs the whole pipeline for one request, sequentially:
//! validate → dispatch (possibly classifying) → invoke adapter → normalize.
//! It holds no per-request state, so one instance can be shared across any
//! number of concurrent callers.

use crate::dispatch::{AdapterSet, Dispatcher};
use crate::error::Result;
use crate::normalize::{NormalizedResult, normalize};
use crate::request::RouteRequest;

/// Routes prompts to providers and normalizes their answers.
#[derive(Clone)]
pub struct PromptRouter {
    dispatcher: Dispatcher,
}

impl PromptRouter {
    /// Create a router over the given adapters with the built-in classifier.
    pub fn new(adapters: AdapterSet) -> Self {
        Self {
            dispatcher: Dispatcher::new(adapters),
        }
    }

    /// Validate raw caller input and route it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::KernelError::EmptyPrompt`] before any dispatch when
    /// the prompt is empty, and [`crate::KernelError::UnknownProvider`] when
    /// the explicit provider is not recognized.  Provider failures are *not*
    /// errors; they come back as diagnostic text.
    pub async fn route_input(
        &self,
        prompt: &str,
        explicit_provider: Option<String>,
    ) -> Result<NormalizedResult> {
        let request = RouteRequest::new(prompt, explicit_provider)?;
        self.route(&request).await
    }

    /// Route an already-validated request.
    pub async fn route(&self, request: &RouteRequest) -> Result<NormalizedResult> {
        let (adapter, label) = self.dispatcher.dispatch(request)?;

        let payload = adapter.generate(request.prompt().as_str()).await;
        if payload.is_error() {
            tracing::warn!(provider = %adapter.kind(), label, "provider returned an error payload");
        } else {
            tracing::debug!(provider = %adapter.kind(), payload = payload.kind(), "provider answered");
        }

        Ok(normalize(&payload, label))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
