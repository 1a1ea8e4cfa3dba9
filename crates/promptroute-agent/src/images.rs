//! Image synthesis client for the OpenAI Images API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Value, json};

use crate::error::{AgentError, Result};
use crate::llm::client::{OPENAI_BASE_URL, bearer};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Connection settings for an images endpoint.
#[derive(Debug, Clone)]
pub struct ImageClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Requested resolution, e.g. `1024x1024`.
    pub size: String,
}

impl ImageClientConfig {
    /// DALL-E 3 at 1024x1024 against the public OpenAI endpoint.
    pub fn dalle3(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: OPENAI_BASE_URL.to_owned(),
            model: "dall-e-3".to_owned(),
            size: "1024x1024".to_owned(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Generates a single image per call and returns its URL.
#[derive(Debug, Clone)]
pub struct ImageClient {
    config: Arc<ImageClientConfig>,
    http: reqwest::Client,
}

impl ImageClient {
    /// # Errors
    ///
    /// Returns [`AgentError::MissingApiKey`] when the key is empty.
    pub fn new(config: ImageClientConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(AgentError::MissingApiKey {
                provider: "openai".into(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AgentError::ImageGenerationFailed {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// Request one image for `prompt` and return the URL of the result.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/images/generations", self.config.base_url);
        let body = self.build_request_body(prompt);

        tracing::debug!(url = %url, model = %self.config.model, "sending image request");

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            bearer(&self.config.api_key)
                .map_err(|reason| AgentError::ImageGenerationFailed { reason })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let resp = self
            .http
            .post(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::ImageGenerationFailed {
                reason: e.to_string(),
            })?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| AgentError::ImageGenerationFailed {
                reason: format!("failed to read response body: {e}"),
            })?;

        if !status.is_success() {
            return Err(AgentError::ImageGenerationFailed {
                reason: format!("API returned {status}: {text}"),
            });
        }

        let v: Value = serde_json::from_str(&text)?;
        parse_image_response(&v)
    }

    fn build_request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.config.model,
            "prompt": prompt,
            "n": 1,
            "size": self.config.size,
        })
    }
}

fn parse_image_response(v: &Value) -> Result<String> {
    v["data"][0]["url"]
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| AgentError::ImageGenerationFailed {
            reason: "missing `data[0].url` in response".into(),
        })
}
