//! Backend configuration.
//!
//! A [`RouterConfig`] is assembled once at startup and handed to the adapter
//! constructors by reference.  Sources, lowest to highest precedence:
//!
//! 1. Built-in defaults.
//! 2. An optional TOML file.
//! 3. Environment variables.
//!
//! Empty values from any source are treated as unset.
//!
//! ```toml
//! image_model = "dall-e-3"
//!
//! [anthropic]
//! model = "claude-3-opus-20240229"
//!
//! [openai]
//! base_url = "http://localhost:8080/v1"
//!
//! [server]
//! port = 8000
//! ```
//!
//! The `[server]` table is accepted here but owned by the web crate's
//! listener settings.

use std::path::Path;

use promptroute_agent::llm::client::{ANTHROPIC_BASE_URL, GEMINI_BASE_URL, OPENAI_BASE_URL};
use promptroute_agent::{ImageClientConfig, LlmClientConfig};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

// ---------------------------------------------------------------------------
// Resolved settings
// ---------------------------------------------------------------------------

/// Connection and sampling settings for one hosted model API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderSettings {
    /// Empty when no credential was supplied.
    #[serde(skip_serializing)]
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ProviderSettings {
    fn new(base_url: &str, model: &str, max_tokens: u32) -> Self {
        Self {
            api_key: String::new(),
            base_url: base_url.to_owned(),
            model: model.to_owned(),
            max_tokens,
            temperature: 0.7,
        }
    }

    /// Whether a credential is present.
    pub fn has_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Client configuration for the Anthropic Messages API.
    pub fn anthropic_client(&self) -> LlmClientConfig {
        let mut config = LlmClientConfig::anthropic(&self.api_key, &self.model)
            .with_base_url(&self.base_url);
        config.max_tokens = self.max_tokens;
        config
    }

    /// Client configuration for an OpenAI-compatible Chat Completions API.
    pub fn openai_client(&self) -> LlmClientConfig {
        let mut config =
            LlmClientConfig::openai_compatible(&self.api_key, &self.model, &self.base_url);
        config.max_tokens = self.max_tokens;
        config
    }
}

/// Credentials, models and endpoints for every backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouterConfig {
    /// Code adapter backend.
    pub anthropic: ProviderSettings,
    /// Conversational backend and image synthesis.
    pub openai: ProviderSettings,
    /// Reasoning backend and image prompt expansion.
    pub gemini: ProviderSettings,
    pub image_model: String,
    pub image_size: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            anthropic: ProviderSettings::new(ANTHROPIC_BASE_URL, "claude-3-opus-20240229", 800),
            openai: ProviderSettings::new(OPENAI_BASE_URL, "gpt-4", 500),
            gemini: ProviderSettings::new(GEMINI_BASE_URL, "gemini-1.5-pro", 2048),
            image_model: "dall-e-3".into(),
            image_size: "1024x1024".into(),
        }
    }
}

impl RouterConfig {
    /// Client configuration for the image synthesis endpoint.  Shares the
    /// OpenAI credential and base URL.
    pub fn image_client(&self) -> ImageClientConfig {
        ImageClientConfig {
            api_key: self.openai.api_key.clone(),
            base_url: self.openai.base_url.clone(),
            model: self.image_model.clone(),
            size: self.image_size.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Read a configuration file into memory.
///
/// The same text feeds [`RouterConfig::from_sources`] and the web crate's
/// listener settings, so callers read it once.
pub fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

impl RouterConfig {
    /// Build the backend configuration from optional TOML text and an
    /// environment lookup.
    ///
    /// `lookup` stands in for `std::env::var` so callers can supply any
    /// source of variables.
    pub fn from_sources<F>(toml_text: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(text) = toml_text {
            let file: ConfigFile = toml::from_str(text).map_err(|e| ConfigError::Parse {
                reason: e.to_string(),
            })?;
            file.apply(&mut config);
        }

        apply_env(&mut config, |key| lookup(key).filter(|v| !v.trim().is_empty()));
        tracing::debug!(
            from_file = toml_text.is_some(),
            anthropic_key = config.anthropic.has_key(),
            openai_key = config.openai.has_key(),
            gemini_key = config.gemini.has_key(),
            "backend configuration loaded"
        );
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// File layer
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    anthropic: ProviderOverrides,
    openai: ProviderOverrides,
    gemini: ProviderOverrides,
    image_model: Option<String>,
    image_size: Option<String>,
    /// Listener settings, read by the web crate.
    server: Option<toml::Table>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ProviderOverrides {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl ConfigFile {
    fn apply(self, router: &mut RouterConfig) {
        self.anthropic.apply(&mut router.anthropic);
        self.openai.apply(&mut router.openai);
        self.gemini.apply(&mut router.gemini);
        set_text(&mut router.image_model, self.image_model);
        set_text(&mut router.image_size, self.image_size);
    }
}

impl ProviderOverrides {
    fn apply(self, target: &mut ProviderSettings) {
        set_text(&mut target.api_key, self.api_key);
        set_text(&mut target.base_url, self.base_url);
        set_text(&mut target.model, self.model);
        if let Some(max_tokens) = self.max_tokens {
            target.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            target.temperature = temperature;
        }
    }
}

fn set_text(target: &mut String, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        *target = value;
    }
}

// ---------------------------------------------------------------------------
// Environment layer
// ---------------------------------------------------------------------------

fn apply_env<F>(router: &mut RouterConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let first = |keys: &[&str]| keys.iter().find_map(|k| env(*k));

    set_text(
        &mut router.anthropic.api_key,
        first(&["ANTHROPIC_API_KEY", "CLAUDE_API_KEY"]),
    );
    set_text(&mut router.openai.api_key, env("OPENAI_API_KEY"));
    set_text(
        &mut router.gemini.api_key,
        first(&["GEMINI_API_KEY", "GOOGLE_API_KEY"]),
    );

    for (name, target) in [
        ("ANTHROPIC", &mut router.anthropic),
        ("OPENAI", &mut router.openai),
        ("GEMINI", &mut router.gemini),
    ] {
        set_text(&mut target.base_url, env(&format!("PROMPTROUTE_{name}_BASE_URL")));
        set_text(&mut target.model, env(&format!("PROMPTROUTE_{name}_MODEL")));
    }
    set_text(&mut router.image_model, env("PROMPTROUTE_IMAGE_MODEL"));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
