//! HTTP Server Configuration
//!
//! Host, port, allowed origins, seed dataset and log level.
//!
//! Resolution order (later wins): built-in defaults, optional JSON config
//! file, `PORT` environment variable, command line flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::Severity;

/// Environment variable overriding the listening port
pub const PORT_ENV: &str = "PORT";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Invalid config JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid PORT value '{0}': expected an integer in 0..=65535")]
    InvalidPortEnv(String),

    #[error("Invalid log_level: {0}")]
    InvalidLogLevel(String),

    #[error("Invalid host '{0}'")]
    InvalidHost(String),
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins echoed back in `Access-Control-Allow-Origin`
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Alternate seed dataset; the bundled one is used when absent
    #[serde(default)]
    pub seed_path: Option<PathBuf>,

    /// Minimum log severity (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:8080".to_string(),
        "http://localhost:1234".to_string(),
        "http://localhost:movies.com".to_string(),
    ]
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            seed_path: None,
            log_level: default_log_level(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file. Missing keys take defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: HttpServerConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidJson(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `PORT` from the given environment lookup
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(PORT_ENV) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                self.port = trimmed
                    .parse()
                    .map_err(|_| ConfigError::InvalidPortEnv(raw.clone()))?;
            }
        }
        Ok(self)
    }

    /// Apply `PORT` from the process environment
    pub fn apply_process_env(self) -> Result<Self, ConfigError> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.severity()?;
        if self.host.trim().is_empty() || self.host.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidHost(self.host.clone()));
        }
        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> Result<Severity, ConfigError> {
        self.log_level
            .parse()
            .map_err(ConfigError::InvalidLogLevel)
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
