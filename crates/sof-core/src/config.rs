//! SOF Timeline configuration management
//!
//! Handles configuration from environment variables and TOML files with
//! sensible defaults for development. Laytime terms are explicit,
//! validated fields rather than constants baked into detection logic.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Laytime and demurrage terms
    #[serde(default)]
    pub laytime: LaytimeConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Server
        if let Ok(host) = std::env::var("API_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("API_PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "API_PORT".to_string(),
                value: port,
            })?;
        }

        // CORS origins from environment variable (comma-separated)
        if let Ok(origins) = std::env::var("CORS_ORIGINS") {
            config.server.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Laytime terms
        if let Ok(days) = std::env::var("ALLOWED_LAYTIME_DAYS") {
            config.laytime.allowed_laytime_days =
                days.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "ALLOWED_LAYTIME_DAYS".to_string(),
                    value: days,
                })?;
        }
        if let Ok(rate) = std::env::var("DEMURRAGE_RATE_PER_DAY") {
            config.laytime.demurrage_rate_per_day =
                rate.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "DEMURRAGE_RATE_PER_DAY".to_string(),
                    value: rate,
                })?;
        }
        if let Ok(hours) = std::env::var("FALLBACK_TOTAL_HOURS") {
            config.laytime.fallback_total_hours =
                Some(hours.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "FALLBACK_TOTAL_HOURS".to_string(),
                    value: hours,
                })?);
        }
        if let Ok(currency) = std::env::var("DEMURRAGE_CURRENCY") {
            config.laytime.currency = currency;
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }

        config.laytime.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })?;

        config.laytime.validate()?;
        Ok(config)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Request timeout in seconds; wraps the whole per-document pipeline
    pub request_timeout_secs: u64,

    /// Maximum request body size in bytes
    pub max_body_size: usize,

    /// Allowed origins for CORS
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8001,
            request_timeout_secs: 120,
            max_body_size: 25 * 1024 * 1024, // 25MB, several scanned SOF PDFs
            // Empty by default for security - set via CORS_ORIGINS env var
            cors_origins: vec![],
        }
    }
}

/// Laytime and demurrage terms
///
/// These are charter-party business parameters, not system tunables. They
/// vary per contract and must come from configuration, never from code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LaytimeConfig {
    /// Contractually allowed laytime in days
    pub allowed_laytime_days: f64,

    /// Demurrage rate charged per day of excess
    pub demurrage_rate_per_day: f64,

    /// Currency code used when formatting the demurrage amount
    pub currency: String,

    /// Total working hours to assume when no loading rows parse from the
    /// document. Unset means no demurrage event for such documents.
    pub fallback_total_hours: Option<f64>,
}

impl Default for LaytimeConfig {
    fn default() -> Self {
        Self {
            allowed_laytime_days: 15.0,
            demurrage_rate_per_day: 12_000.0,
            currency: "USD".to_string(),
            fallback_total_hours: None,
        }
    }
}

impl LaytimeConfig {
    /// Validate field ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.allowed_laytime_days > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "allowed_laytime_days".to_string(),
                value: self.allowed_laytime_days.to_string(),
            });
        }
        if self.demurrage_rate_per_day < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "demurrage_rate_per_day".to_string(),
                value: self.demurrage_rate_per_day.to_string(),
            });
        }
        if let Some(hours) = self.fallback_total_hours {
            if hours < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: "fallback_total_hours".to_string(),
                    value: hours.to_string(),
                });
            }
        }
        if self.currency.trim().is_empty() {
            return Err(ConfigError::MissingRequired("currency".to_string()));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8001);
        assert_eq!(config.laytime.allowed_laytime_days, 15.0);
        assert_eq!(config.laytime.demurrage_rate_per_day, 12_000.0);
        assert_eq!(config.laytime.currency, "USD");
        assert!(config.laytime.fallback_total_hours.is_none());
    }

    #[test]
    fn test_laytime_validation_rejects_zero_days() {
        let laytime = LaytimeConfig {
            allowed_laytime_days: 0.0,
            ..Default::default()
        };
        assert!(laytime.validate().is_err());
    }

    #[test]
    fn test_laytime_validation_rejects_negative_rate() {
        let laytime = LaytimeConfig {
            demurrage_rate_per_day: -1.0,
            ..Default::default()
        };
        assert!(laytime.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let toml_src = r#"
            [server]
            port = 9000
            cors_origins = ["http://localhost:5173"]

            [laytime]
            allowed_laytime_days = 10.0
            demurrage_rate_per_day = 8000.0
            fallback_total_hours = 225.5
        "#;

        let config: AppConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.laytime.allowed_laytime_days, 10.0);
        assert_eq!(config.laytime.fallback_total_hours, Some(225.5));
        // Unspecified sections fall back to defaults
        assert_eq!(config.logging.level, "info");
    }
}
