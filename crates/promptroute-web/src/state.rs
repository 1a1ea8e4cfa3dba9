//! Shared application state for the web server.

use std::sync::Arc;

use promptroute_kernel::PromptRouter;

use crate::WebConfig;

/// Shared state accessible from every Axum handler.
///
/// Read-only after startup; requests never coordinate with each other.
#[derive(Clone)]
pub struct AppState {
    /// The routing pipeline.
    pub router: Arc<PromptRouter>,

    /// Web server configuration.
    pub config: WebConfig,
}
