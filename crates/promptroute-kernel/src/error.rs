//! Kernel error types.
//!
//! The kernel is pure: classification and normalization never fail.  The
//! only errors it surfaces are request-level problems detected before any
//! provider is invoked.

/// Unified error type for the PromptRoute kernel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KernelError {
    /// The caller supplied an empty prompt.
    #[error("No input provided")]
    EmptyPrompt,

    /// An explicit provider identifier matched none of the known providers.
    #[error("unknown provider: {provider}")]
    UnknownProvider {
        /// The identifier exactly as the caller sent it.
        provider: String,
    },
}

/// Convenience alias used throughout the kernel crate.
pub type Result<T> = std::result::Result<T, KernelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_prompt_message_matches_http_contract() {
        assert_eq!(KernelError::EmptyPrompt.to_string(), "No input provided");
    }

    #[test]
    fn unknown_provider_names_identifier() {
        let err = KernelError::UnknownProvider {
            provider: "bard".into(),
        };
        assert_eq!(err.to_string(), "unknown provider: bard");
    }
}
