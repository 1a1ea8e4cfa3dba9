//! Provider adapter trait.
//!
//! Every backend integration implements [`ProviderAdapter`].  The kernel
//! only ever sees this trait; network access, credentials and wire formats
//! stay inside the implementing crate.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::payload::ProviderPayload;

/// The four adapter slots the dispatch policy can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Code generation backend.
    Code,
    /// Friendly chat backend.
    Conversational,
    /// Prompt expansion plus image synthesis.
    Image,
    /// Structured logical reasoning backend.
    Reasoning,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code => write!(f, "code"),
            Self::Conversational => write!(f, "conversational"),
            Self::Image => write!(f, "image"),
            Self::Reasoning => write!(f, "reasoning"),
        }
    }
}

/// A component that talks to exactly one backend generation service.
///
/// Implementations must not return errors: every failure (transport,
/// malformed output, missing credentials) is reported as
/// [`ProviderPayload::ProviderError`].
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Which slot this adapter fills.
    fn kind(&self) -> ProviderKind;

    /// Produce a payload for the given prompt.
    async fn generate(&self, prompt: &str) -> ProviderPayload;
}
