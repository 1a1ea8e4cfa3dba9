//! Shared helper functions used across CLI subcommands.

use std::path::Path;

use anyhow::{Context, Result};
use promptroute_adapters::{RouterConfig, read_config_file};
use promptroute_web::WebConfig;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

/// Initialize the tracing subscriber with the given default log level.
///
/// `RUST_LOG` overrides the default.  Logs go to stderr so command output
/// on stdout stays clean.
pub fn init_tracing(default_level: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Backend and listener configuration assembled from one file read.
pub struct Settings {
    pub router: RouterConfig,
    pub web: WebConfig,
}

/// Load settings and warn about every backend that has no credential.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let text = path
        .map(read_config_file)
        .transpose()
        .context("failed to load configuration")?;
    let env = |key: &str| std::env::var(key).ok();

    let router = RouterConfig::from_sources(text.as_deref(), env)
        .context("failed to load configuration")?;
    let web = WebConfig::from_sources(text.as_deref(), env)
        .context("failed to load server configuration")?;

    for (provider, backend, vars) in [
        ("anthropic", &router.anthropic, "ANTHROPIC_API_KEY / CLAUDE_API_KEY"),
        ("openai", &router.openai, "OPENAI_API_KEY"),
        ("gemini", &router.gemini, "GEMINI_API_KEY / GOOGLE_API_KEY"),
    ] {
        if !backend.has_key() {
            tracing::warn!(provider, env = vars, "no api key configured; adapters using it will answer with an error");
        }
    }

    Ok(Settings { router, web })
}
