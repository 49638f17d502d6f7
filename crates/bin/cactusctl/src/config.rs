//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `cactus.toml` in the working directory unless another path is
//! given. Every field has a sensible default so the file is optional.
//! Environment variables take precedence over file values.

use std::path::Path;

use cactus_adapter_http_reqwest::{BackendConfig, HttpError, validate_endpoint};
use cactus_domain::scale::TimeScale;
use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;

/// Default configuration file name.
pub const DEFAULT_PATH: &str = "cactus.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend connection settings.
    pub backend: BackendConfig,
    /// Presentation settings.
    pub display: DisplayConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// How readings are presented.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Scale used when none is given on the command line.
    pub default_scale: TimeScale,
    /// Offset from UTC used for tick and timestamp labels, in minutes.
    pub utc_offset_minutes: i32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `path` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Apply overrides from a variable lookup. Unparsable values are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("CACTUS_ENDPOINT") {
            self.backend.endpoint = val;
        }
        if let Some(Ok(timeout)) = lookup("CACTUS_TIMEOUT_MS").map(|v| v.parse::<u64>()) {
            self.backend.timeout_ms = timeout;
        }
        if let Some(Ok(timeout)) = lookup("CACTUS_REQUEST_TIMEOUT_MS").map(|v| v.parse::<u64>()) {
            self.backend.request_timeout_ms = timeout;
        }
        if let Some(Ok(resolution)) = lookup("CACTUS_RESOLUTION").map(|v| v.parse::<u32>()) {
            self.backend.resolution = resolution;
        }
        if let Some(Ok(scale)) = lookup("CACTUS_SCALE").map(|v| v.parse::<TimeScale>()) {
            self.display.default_scale = scale;
        }
        if let Some(Ok(minutes)) = lookup("CACTUS_UTC_OFFSET_MINUTES").map(|v| v.parse::<i32>()) {
            self.display.utc_offset_minutes = minutes;
        }
        if let Some(val) = lookup("CACTUS_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_endpoint(&self.backend.endpoint)?;
        if self.backend.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "timeout_ms must be non-zero".to_string(),
            ));
        }
        if self.backend.request_timeout_ms < self.backend.timeout_ms {
            return Err(ConfigError::Validation(
                "request_timeout_ms must not be shorter than timeout_ms".to_string(),
            ));
        }
        if FixedOffset::east_opt(self.display.utc_offset_minutes.saturating_mul(60)).is_none() {
            return Err(ConfigError::Validation(
                "utc_offset_minutes must be within one day".to_string(),
            ));
        }
        Ok(())
    }

    /// Offset used to render labels. Falls back to UTC for invalid values.
    #[must_use]
    pub fn display_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.display.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_scale: TimeScale::FiveHours,
            utc_offset_minutes: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "cactusctl=info,cactus_app=info,cactus_adapter_http_reqwest=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// The backend endpoint is unusable.
    #[error(transparent)]
    Endpoint(#[from] HttpError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(
            config.backend.endpoint,
            "https://cactus-of-things-backend-m7qypuwi7a-uc.a.run.app"
        );
        assert_eq!(config.backend.timeout_ms, 15_000);
        assert_eq!(config.backend.resolution, 300);
        assert_eq!(config.display.default_scale, TimeScale::FiveHours);
        assert_eq!(config.display.utc_offset_minutes, 0);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.backend.timeout_ms, 15_000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [backend]
            endpoint = 'http://127.0.0.1:8080'
            timeout_ms = 2500
            resolution = 0

            [display]
            default_scale = 'week'
            utc_offset_minutes = -300

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.backend.endpoint, "http://127.0.0.1:8080");
        assert_eq!(config.backend.timeout_ms, 2500);
        assert_eq!(config.backend.resolution, 0);
        assert_eq!(config.display.default_scale, TimeScale::Week);
        assert_eq!(config.display.utc_offset_minutes, -300);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_reject_unknown_scale_in_toml() {
        let result: Result<Config, _> = toml::from_str("[display]\ndefault_scale = 'fortnight'");
        assert!(result.is_err());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file(Path::new("nonexistent.toml")).unwrap();
        assert_eq!(config.backend.resolution, 300);
    }

    #[test]
    fn should_apply_environment_overrides() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[
            ("CACTUS_ENDPOINT", "http://localhost:9000"),
            ("CACTUS_TIMEOUT_MS", "100"),
            ("CACTUS_REQUEST_TIMEOUT_MS", "1000"),
            ("CACTUS_RESOLUTION", "0"),
            ("CACTUS_SCALE", "month"),
            ("CACTUS_UTC_OFFSET_MINUTES", "60"),
            ("CACTUS_LOG", "warn"),
        ]));
        assert_eq!(config.backend.endpoint, "http://localhost:9000");
        assert_eq!(config.backend.timeout_ms, 100);
        assert_eq!(config.backend.request_timeout_ms, 1000);
        assert_eq!(config.backend.resolution, 0);
        assert_eq!(config.display.default_scale, TimeScale::Month);
        assert_eq!(config.display.utc_offset_minutes, 60);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_prefer_rust_log_over_cactus_log() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[("CACTUS_LOG", "warn"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparsable_overrides() {
        let mut config = Config::default();
        config.apply_overrides(lookup(&[
            ("CACTUS_TIMEOUT_MS", "soon"),
            ("CACTUS_SCALE", "fortnight"),
        ]));
        assert_eq!(config.backend.timeout_ms, 15_000);
        assert_eq!(config.display.default_scale, TimeScale::FiveHours);
    }

    #[test]
    fn should_reject_zero_timeout() {
        let mut config = Config::default();
        config.backend.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_non_http_endpoint() {
        let mut config = Config::default();
        config.backend.endpoint = "ftp://example.com".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Endpoint(_))));
    }

    #[test]
    fn should_reject_endpoint_with_query() {
        let mut config = Config::default();
        config.backend.endpoint = "http://example.com/api?k=v".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Endpoint(_))));
    }

    #[test]
    fn should_reject_request_timeout_shorter_than_timeout() {
        let mut config = Config::default();
        config.backend.timeout_ms = 5000;
        config.backend.request_timeout_ms = 1000;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_offset_beyond_a_day() {
        let mut config = Config::default();
        config.display.utc_offset_minutes = 24 * 60;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_build_display_offset_from_minutes() {
        let mut config = Config::default();
        config.display.utc_offset_minutes = -90;
        assert_eq!(config.display_offset().local_minus_utc(), -90 * 60);
    }
}
