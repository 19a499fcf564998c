//! Process configuration for the rocketbot runtime.
//!
//! The core only needs one value: the address of the realtime service. The
//! websocket endpoint is derived from the HTTP address unless overridden.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON5 parse error: {0}")]
    Json5(#[from] json5::Error),
    #[error("Config directory not found")]
    NoDirFound,
    #[error("No server URL configured")]
    MissingUrl,
    #[error("Invalid server URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Top-level rocketbot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Base HTTP(S) address of the chat service, e.g. "https://my.server/".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Explicit websocket endpoint. When unset it is derived from `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub websocket_url: Option<String>,
}

impl Config {
    /// Resolve the websocket endpoint the transport should dial.
    ///
    /// An explicit `websocket_url` wins; otherwise the base address is
    /// rewritten scheme-wise (http→ws, https→wss) with path `/websocket`,
    /// so `https://my.server/` becomes `wss://my.server/websocket`.
    pub fn websocket_url(&self) -> Result<String, ConfigError> {
        if let Some(explicit) = &self.websocket_url {
            return Ok(explicit.clone());
        }

        let base = self.url.as_deref().ok_or(ConfigError::MissingUrl)?;
        let mut parsed = Url::parse(base).map_err(|e| ConfigError::InvalidUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;

        let scheme = match parsed.scheme() {
            "http" => "ws",
            "https" => "wss",
            "ws" => "ws",
            "wss" => "wss",
            other => {
                return Err(ConfigError::InvalidUrl {
                    url: base.to_string(),
                    reason: format!("unsupported scheme `{other}`"),
                });
            }
        };
        // http(s) and ws(s) are all "special" schemes, so this cannot fail
        // for the values matched above.
        let _ = parsed.set_scheme(scheme);
        parsed.set_path("/websocket");

        Ok(parsed.to_string())
    }
}

/// Resolve the rocketbot config directory (~/.rocketbot/).
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|h| h.join(".rocketbot"))
        .ok_or(ConfigError::NoDirFound)
}

/// Resolve the config file path (~/.rocketbot/config.json5).
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.json5"))
}

/// Load configuration from the default path, then apply env overrides.
pub fn load_config() -> Result<Config, ConfigError> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let path = config_file_path()?;
    let mut config = load_config_from(&path)?;

    if let Ok(server_url) = std::env::var("ROCKETBOT_URL") {
        config.url = Some(server_url);
    }
    if let Ok(ws_url) = std::env::var("ROCKETBOT_WEBSOCKET_URL") {
        config.websocket_url = Some(ws_url);
    }

    Ok(config)
}

/// Load configuration from a specific path, falling back to defaults if not found.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        tracing::debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config = json5::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_websocket_url() {
        let config = Config {
            url: Some("https://my.server/".into()),
            websocket_url: None,
        };
        assert_eq!(config.websocket_url().unwrap(), "wss://my.server/websocket");
    }

    #[test]
    fn test_derive_websocket_url_plain_http() {
        let config = Config {
            url: Some("http://localhost:3000".into()),
            websocket_url: None,
        };
        assert_eq!(
            config.websocket_url().unwrap(),
            "ws://localhost:3000/websocket"
        );
    }

    #[test]
    fn test_explicit_websocket_url_wins() {
        let config = Config {
            url: Some("https://my.server/".into()),
            websocket_url: Some("wss://other.server/sock".into()),
        };
        assert_eq!(config.websocket_url().unwrap(), "wss://other.server/sock");
    }

    #[test]
    fn test_missing_url_errors() {
        let config = Config::default();
        assert!(matches!(
            config.websocket_url(),
            Err(ConfigError::MissingUrl)
        ));
    }

    #[test]
    fn test_unsupported_scheme_errors() {
        let config = Config {
            url: Some("ftp://my.server/".into()),
            websocket_url: None,
        };
        assert!(matches!(
            config.websocket_url(),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_json5_parse() {
        let json5_str = r#"{
            url: "https://chat.example.org/",
        }"#;
        let config: Config = json5::from_str(json5_str).unwrap();
        assert_eq!(config.url.as_deref(), Some("https://chat.example.org/"));
        assert!(config.websocket_url.is_none());
    }
}
