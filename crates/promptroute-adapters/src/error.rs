//! Configuration error types.

use std::path::PathBuf;

/// Failures while assembling a [`crate::config::RouterConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or has unknown keys.
    #[error("failed to parse config file: {reason}")]
    Parse { reason: String },
}

/// Convenience alias for configuration results.
pub type Result<T> = std::result::Result<T, ConfigError>;
