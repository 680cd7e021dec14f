//! # Folio Configuration
//!
//! Where data comes from, where the mock server listens, and where the
//! signed-in user is stored.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FOLIO_DATA_MODE=mock                                               │
//! │     FOLIO_BASE_URL=http://127.0.0.1:5173                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/folio-admin/config.toml (Linux)                          │
//! │     ~/Library/Application Support/com.folio.admin/config.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     mode from the FOLIO_USE_MOCK build flag, local base URL            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [data]
//! mode = "mock"                 # mock | static
//! base_url = "http://127.0.0.1:5173"
//! fixtures_dir = "./fixtures"   # optional: read fixtures from disk
//! request_timeout_secs = 10
//!
//! [server]
//! bind_addr = "127.0.0.1"
//! port = 5173
//!
//! [session]
//! path = "/tmp/folio-session.json"  # optional
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::endpoints::DataSourceMode;
use crate::error::{DataError, DataResult};

// =============================================================================
// Data Settings
// =============================================================================

/// Where the four resources are loaded from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    /// Mock routes or static fixture routes.
    #[serde(default = "DataSourceMode::build_default")]
    pub mode: DataSourceMode,

    /// Origin the routes are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Read fixtures from this directory instead of over HTTP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixtures_dir: Option<PathBuf>,

    /// Per-request timeout (seconds).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    format!("http://{}:{}", default_bind_addr(), default_port())
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for DataSettings {
    fn default() -> Self {
        DataSettings {
            mode: DataSourceMode::build_default(),
            base_url: default_base_url(),
            fixtures_dir: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

// =============================================================================
// Server Settings
// =============================================================================

/// Mock server listen address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind_addr() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5173
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

// =============================================================================
// Session Settings
// =============================================================================

/// Local storage location for the signed-in user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Storage file. Defaults to `session.json` in the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete Folio configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub data: DataSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub session: SessionSettings,
}

impl FolioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (config.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> DataResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| DataError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> DataResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| DataError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DataError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| DataError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> DataResult<()> {
        let url = url::Url::parse(&self.data.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DataError::InvalidUrl(format!(
                "Base URL must start with http:// or https://, got: {}",
                self.data.base_url
            )));
        }

        if self.data.request_timeout_secs == 0 {
            return Err(DataError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.server.bind_addr.trim().is_empty() {
            return Err(DataError::InvalidConfig("bind_addr must not be empty".into()));
        }

        Ok(())
    }

    /// Applies `FOLIO_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the environment in production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(flag) = lookup("FOLIO_USE_MOCK") {
            self.data.mode = DataSourceMode::from_flag(Some(flag.as_str()));
        }

        if let Some(mode) = lookup("FOLIO_DATA_MODE") {
            match mode.parse() {
                Ok(parsed) => {
                    debug!(mode = %mode, "Overriding data source mode from environment");
                    self.data.mode = parsed;
                }
                Err(_) => warn!(mode = %mode, "Unknown data source mode in environment"),
            }
        }

        if let Some(url) = lookup("FOLIO_BASE_URL") {
            debug!(url = %url, "Overriding base URL from environment");
            self.data.base_url = url;
        }

        if let Some(dir) = lookup("FOLIO_FIXTURES_DIR") {
            self.data.fixtures_dir = Some(PathBuf::from(dir));
        }

        if let Some(secs) = lookup("FOLIO_REQUEST_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse::<u64>() {
                self.data.request_timeout_secs = s;
            }
        }

        if let Some(addr) = lookup("FOLIO_BIND_ADDR") {
            self.server.bind_addr = addr;
        }

        if let Some(port) = lookup("FOLIO_PORT") {
            if let Ok(p) = port.parse::<u16>() {
                debug!(port = p, "Overriding server port from environment");
                self.server.port = p;
            }
        }

        if let Some(path) = lookup("FOLIO_SESSION_PATH") {
            self.session.path = Some(PathBuf::from(path));
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "folio", "admin")
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Returns the session storage path (configured or platform default).
    pub fn session_path(&self) -> Option<PathBuf> {
        self.session.path.clone().or_else(|| {
            Self::project_dirs().map(|dirs| dirs.data_dir().join("session.json"))
        })
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn mode(&self) -> DataSourceMode {
        self.data.mode
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.data.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = FolioConfig::default();
        assert_eq!(config.data.base_url, "http://127.0.0.1:5173");
        assert_eq!(config.server.bind_address(), "127.0.0.1:5173");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = FolioConfig::default();

        config.data.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.data.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(DataError::InvalidUrl(_))));

        config.data.base_url = "https://books.example.com".to_string();
        config.data.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_beat_file_values() {
        let mut config: FolioConfig = toml::from_str(
            r#"
            [data]
            mode = "static"
            base_url = "http://files.example.com"

            [server]
            port = 9000
            "#,
        )
        .unwrap();

        let env: HashMap<&str, &str> = [
            ("FOLIO_DATA_MODE", "mock"),
            ("FOLIO_PORT", "8088"),
            ("FOLIO_SESSION_PATH", "/tmp/folio-user.json"),
        ]
        .into_iter()
        .collect();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.mode(), DataSourceMode::Mock);
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.data.base_url, "http://files.example.com");
        assert_eq!(config.session_path(), Some(PathBuf::from("/tmp/folio-user.json")));
    }

    #[test]
    fn test_use_mock_flag_at_runtime() {
        let mut config = FolioConfig::default();
        config.data.mode = DataSourceMode::Static;
        config.apply_overrides(|key| (key == "FOLIO_USE_MOCK").then(|| "true".to_string()));
        assert!(config.mode().is_mock());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = FolioConfig::default();
        config.data.mode = DataSourceMode::Mock;
        config.data.fixtures_dir = Some(PathBuf::from("fixtures"));
        config.server.port = 7001;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[data]"));
        assert!(contents.contains("[server]"));

        let loaded: FolioConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded.mode(), DataSourceMode::Mock);
        assert_eq!(loaded.server.port, 7001);
        assert_eq!(loaded.data.fixtures_dir, Some(PathBuf::from("fixtures")));
    }
}
