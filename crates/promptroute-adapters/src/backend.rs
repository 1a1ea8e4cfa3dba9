//! Construction-time client handle shared by the adapters.

use promptroute_agent::AgentError;
use promptroute_kernel::ProviderPayload;

/// A backend client, or the reason it could not be built.
///
/// Missing credentials are not fatal at startup; the adapter answers every
/// call with a [`ProviderPayload::ProviderError`] instead.
pub(crate) struct Backend<T> {
    inner: Result<T, String>,
}

impl<T> Backend<T> {
    /// `service` names the configured backend (`anthropic`, `openai`,
    /// `gemini`) in diagnostics.
    pub(crate) fn connect(service: &'static str, client: promptroute_agent::Result<T>) -> Self {
        let inner = client.map_err(|e| {
            tracing::warn!(service, error = %e, "backend unavailable");
            match e {
                AgentError::MissingApiKey { .. } => {
                    format!("missing api key for provider: {service}")
                }
                other => other.to_string(),
            }
        });
        Self { inner }
    }

    /// The client, or an error payload describing why it is unavailable.
    pub(crate) fn get(&self) -> Result<&T, ProviderPayload> {
        self.inner
            .as_ref()
            .map_err(|reason| ProviderPayload::error(reason.clone()))
    }
}
