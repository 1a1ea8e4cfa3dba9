//! Loading [`WebConfig`] from the shared configuration sources.
//!
//! The `[server]` table of the configuration file and the listener
//! environment variables belong to this crate.  Every other key in the file
//! is left to the adapter configuration.

use serde::Deserialize;

use crate::WebConfig;

/// Errors produced while building a [`WebConfig`].
#[derive(Debug, thiserror::Error)]
pub enum WebConfigError {
    #[error("invalid server configuration: {reason}")]
    Parse { reason: String },

    #[error("invalid value for {key}: {value:?}")]
    InvalidEnv { key: String, value: String },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileLayer {
    server: ServerOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ServerOverrides {
    bind_addr: Option<String>,
    port: Option<u16>,
    cors_origins: Option<Vec<String>>,
}

impl WebConfig {
    /// Build the listener settings from optional TOML text and an
    /// environment lookup.  Precedence: defaults, then `[server]`, then
    /// `PROMPTROUTE_BIND_ADDR` and `PORT`.  Blank values count as unset.
    pub fn from_sources<F>(toml_text: Option<&str>, lookup: F) -> Result<Self, WebConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(text) = toml_text {
            let file: FileLayer = toml::from_str(text).map_err(|e| WebConfigError::Parse {
                reason: e.to_string(),
            })?;
            if let Some(bind_addr) = file.server.bind_addr.filter(|v| !v.trim().is_empty()) {
                config.bind_addr = bind_addr;
            }
            if let Some(port) = file.server.port {
                config.port = port;
            }
            if let Some(origins) = file.server.cors_origins {
                config.cors_origins = origins.into_iter().filter(|o| !o.is_empty()).collect();
            }
        }

        let env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(bind_addr) = env("PROMPTROUTE_BIND_ADDR") {
            config.bind_addr = bind_addr;
        }
        if let Some(port) = env("PORT") {
            config.port = port.trim().parse().map_err(|_| WebConfigError::InvalidEnv {
                key: "PORT".into(),
                value: port.clone(),
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_owned())
        }
    }

    #[test]
    fn server_table_overrides_defaults() {
        let toml = r#"
            image_model = "dall-e-2"

            [openai]
            model = "gpt-4o"

            [server]
            bind_addr = "127.0.0.1"
            port = 9000
            cors_origins = ["http://localhost:3000", ""]
        "#;
        let config = WebConfig::from_sources(Some(toml), env(&[])).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.cors_origins, vec!["http://localhost:3000"]);
    }

    #[test]
    fn env_overrides_file() {
        let toml = "[server]\nport = 9000\n";
        let config = WebConfig::from_sources(
            Some(toml),
            env(&[("PORT", "8080"), ("PROMPTROUTE_BIND_ADDR", "10.0.0.1")]),
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_addr, "10.0.0.1");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let config = WebConfig::from_sources(None, env(&[("PORT", ""), ("PROMPTROUTE_BIND_ADDR", " ")]))
            .unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.bind_addr, "0.0.0.0");
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = WebConfig::from_sources(None, env(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, WebConfigError::InvalidEnv { ref key, .. } if key == "PORT"));
    }

    #[test]
    fn unknown_server_key_is_rejected() {
        let err = WebConfig::from_sources(Some("[server]\nhost = \"x\"\n"), env(&[])).unwrap_err();
        assert!(matches!(err, WebConfigError::Parse { .. }));
    }

    #[test]
    fn wrong_port_type_is_rejected() {
        let err = WebConfig::from_sources(Some("[server]\nport = \"high\"\n"), env(&[])).unwrap_err();
        assert!(matches!(err, WebConfigError::Parse { .. }));
    }
}
