//! Service configuration.
//!
//! Configuration is read from a TOML file and then overridden by environment
//! variables. Every setting has a default, so the service starts without any
//! configuration at all.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8090
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "SEGMENT_SERVICE_CONFIG";

/// File name searched for when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "segment-service.toml";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// IP address to bind; host names are not resolved
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `segment_service=debug,tower_http=info`
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_true")]
    pub with_target: bool,
    #[serde(default)]
    pub with_thread_ids: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            with_target: true,
            with_thread_ids: false,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Locate a config file in the standard locations.
    ///
    /// Searches for `segment-service.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    pub fn default_location() -> Option<PathBuf> {
        [
            PathBuf::from(DEFAULT_CONFIG_FILE),
            PathBuf::from("backend").join(DEFAULT_CONFIG_FILE),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// Load configuration the way the server does at startup.
    ///
    /// Uses the file named by `SEGMENT_SERVICE_CONFIG` if set, otherwise the
    /// first file found by [`ServiceConfig::default_location`], otherwise the
    /// defaults. Environment overrides are applied last.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => match Self::default_location() {
                Some(path) => Self::from_file(path)?,
                None => Self::default(),
            },
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `HOST`, `PORT` and `RUST_LOG` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.trim().parse().map_err(|e| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                message: format!("'{}': {}", port, e),
            })?;
        }
        if let Some(level) = lookup("RUST_LOG") {
            if !level.trim().is_empty() {
                self.logging.level = level;
            }
        }
        Ok(())
    }

    /// Address the server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| ConfigError::InvalidValue {
                key: "server.host".to_string(),
                message: format!("'{}': {}", self.server.host, e),
            })
    }
}
