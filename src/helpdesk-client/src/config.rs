// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Configuration file support for the helpdesk client.
//!
//! Reads the `[helpdesk-client]` section of `helpdesk.toml`, searched in:
//! 1. Path specified via `--config` CLI argument
//! 2. `./helpdesk.toml` (current directory)
//! 3. `~/.config/helpdesk-rs/helpdesk.toml` (XDG config)
//! 4. `/etc/helpdesk-rs/helpdesk.toml` (system-wide)

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use helpdesk_app::{ConfigError, ConfigFile};

use crate::transport::DEFAULT_BASE_URL;

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "HELPDESK_API_BASE_URL";

/// Top-level client configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Backend API settings
    pub api: ApiConfig,
    /// Local session storage
    pub storage: StorageConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: Option<String>,
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL all endpoint paths are joined to.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 30,
        }
    }
}

/// Where the access/refresh tokens are kept between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Token file path; defaults to `~/.config/helpdesk-rs/session.db`.
    pub token_path: Option<PathBuf>,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<(), String> {
        validate_log_level(self.general.log_level.as_deref())?;

        if self.api.timeout_secs == 0 {
            return Err("[api].timeout_secs must be > 0".to_string());
        }
        if let Some(url) = &self.api.base_url {
            validate_base_url("[api].base_url", url)?;
        }
        if let Some(path) = &self.storage.token_path {
            if path.as_os_str().is_empty() {
                return Err("[storage].token_path must not be empty when set".to_string());
            }
        }
        Ok(())
    }

    /// Base URL precedence: CLI flag > environment > config file > default.
    pub fn resolve_base_url(&self, cli: Option<&str>, env: Option<String>) -> String {
        cli.map(str::to_string)
            .or(env)
            .or_else(|| self.api.base_url.clone())
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        <Self as ConfigFile>::load_from_file(path)
    }

    /// Load configuration from the default search paths.
    /// Returns default config if no config file is found.
    pub fn load_from_default_paths() -> Result<(Self, Option<PathBuf>), ConfigError> {
        <Self as ConfigFile>::load_from_default_paths()
    }

    /// Generate an example configuration as a TOML string.
    pub fn example_toml() -> String {
        let example = ClientConfig {
            general: GeneralConfig {
                log_level: Some("info".to_string()),
            },
            api: ApiConfig {
                base_url: Some(DEFAULT_BASE_URL.to_string()),
                timeout_secs: 30,
            },
            storage: StorageConfig {
                token_path: Some(PathBuf::from("/home/user/.config/helpdesk-rs/session.db")),
            },
        };

        let mut table = toml::Table::new();
        if let Ok(toml::Value::Table(section)) = toml::Value::try_from(&example) {
            table.insert(
                <Self as ConfigFile>::section_key().to_string(),
                toml::Value::Table(section),
            );
        }
        toml::to_string_pretty(&table).unwrap_or_default()
    }
}

impl ConfigFile for ClientConfig {
    fn section_key() -> &'static str {
        "helpdesk-client"
    }
}

pub fn validate_base_url(field: &str, url: &str) -> Result<(), String> {
    let url = url.trim();
    if url.is_empty() {
        return Err(format!("{field} must not be empty when set"));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(format!(
            "{field} '{url}' must start with http:// or https://"
        ));
    }
    Ok(())
}

fn validate_log_level(level: Option<&str>) -> Result<(), String> {
    if let Some(level) = level {
        match level {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(format!(
                    "[general].log_level '{}' is invalid (expected one of: trace, debug, info, warn, error)",
                    level
                ))
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.api.base_url.is_none());
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.storage.token_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_client_toml() {
        let toml_str = r#"
[general]
log_level = "debug"

[api]
base_url = "https://helpdesk.example.com/api/v1"

[storage]
token_path = "/tmp/helpdesk/session.db"
"#;

        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level.as_deref(), Some("debug"));
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("https://helpdesk.example.com/api/v1")
        );
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(
            config.storage.token_path,
            Some(PathBuf::from("/tmp/helpdesk/session.db"))
        );
    }

    #[test]
    fn test_example_toml_loads_as_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("helpdesk.toml");
        std::fs::write(&path, ClientConfig::example_toml()).unwrap();

        let config = ClientConfig::load_from_file(&path).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some(DEFAULT_BASE_URL));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_url_precedence() {
        let mut config = ClientConfig::default();
        assert_eq!(config.resolve_base_url(None, None), DEFAULT_BASE_URL);

        config.api.base_url = Some("http://config".to_string());
        assert_eq!(config.resolve_base_url(None, None), "http://config");
        assert_eq!(
            config.resolve_base_url(None, Some("http://env".to_string())),
            "http://env"
        );
        assert_eq!(
            config.resolve_base_url(Some("http://cli"), Some("http://env".to_string())),
            "http://cli"
        );
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = ClientConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = ClientConfig::default();
        config.api.base_url = Some("localhost:8000".to_string());
        assert!(config.validate().is_err());
        config.api.base_url = Some("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let mut config = ClientConfig::default();
        config.general.log_level = Some("verbose".to_string());
        assert!(config.validate().is_err());
    }
}
