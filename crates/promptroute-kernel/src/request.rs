//! Incoming request types.
//!
//! A [`RouteRequest`] is created once per incoming call and dropped when the
//! call completes.  The [`Prompt`] it carries is guaranteed non-empty, so
//! nothing downstream has to re-check.

use std::fmt;

use crate::error::{KernelError, Result};

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

/// A validated, non-empty prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Validate and wrap a prompt.
    ///
    /// Returns [`KernelError::EmptyPrompt`] if the text is empty.  Text made
    /// only of whitespace is still a prompt.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(KernelError::EmptyPrompt);
        }
        Ok(Self(text))
    }

    /// Borrow the prompt text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// RouteRequest
// ---------------------------------------------------------------------------

/// One routing request: a prompt plus an optional explicit provider.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    prompt: Prompt,
    explicit_provider: Option<String>,
}

impl RouteRequest {
    /// Build a request from raw caller input.
    ///
    /// An explicit provider given as an empty string is treated as absent.
    pub fn new(prompt: impl Into<String>, explicit_provider: Option<String>) -> Result<Self> {
        let prompt = Prompt::new(prompt)?;
        let explicit_provider = explicit_provider.filter(|p| !p.is_empty());
        Ok(Self {
            prompt,
            explicit_provider,
        })
    }

    /// The validated prompt.
    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    /// The explicit provider identifier, if the caller supplied one.
    pub fn explicit_provider(&self) -> Option<&str> {
        self.explicit_provider.as_deref()
    }
}
