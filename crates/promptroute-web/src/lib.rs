//! HTTP surface for PromptRoute.
//!
//! Exposes the router over a small JSON API:
//!
//! - `POST /route` (and the legacy aliases `POST /api/chat`,
//!   `POST /api/predict`) routes one prompt.
//! - `GET /health` is a liveness probe.

pub mod api;
pub mod config;
pub mod server;
pub mod state;

pub use config::WebConfigError;
pub use server::WebServer;
pub use state::AppState;

/// Web server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    /// The address to bind the HTTP server to.
    pub bind_addr: String,
    /// The port to listen on.
    pub port: u16,
    /// Allowed CORS origins.  Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".into(),
            port: 5000,
            cors_origins: Vec::new(),
        }
    }
}
