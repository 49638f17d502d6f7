//! Backend connection configuration.

use serde::Deserialize;

/// Default backend serving the cactus sensor readings.
pub const DEFAULT_ENDPOINT: &str = "https://cactus-of-things-backend-m7qypuwi7a-uc.a.run.app";

/// The `[backend]` section of the configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL; resource paths such as `/readings` are appended to it.
    pub endpoint: String,
    /// Per-request timeout in milliseconds. A request still pending after
    /// this is reported as timed out but keeps running in the background.
    pub timeout_ms: u64,
    /// Hard limit in milliseconds after which a background request is
    /// cancelled. Must not be shorter than `timeout_ms`.
    pub request_timeout_ms: u64,
    /// Maximum number of points per history fetch (`0` = no limit).
    pub resolution: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: 15_000,
            request_timeout_ms: 60_000,
            resolution: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = BackendConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_ms, 15_000);
        assert_eq!(config.request_timeout_ms, 60_000);
        assert_eq!(config.resolution, 300);
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            endpoint = "http://localhost:8080"
            timeout_ms = 2000
            request_timeout_ms = 10000
            resolution = 0
        "#;
        let config: BackendConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080");
        assert_eq!(config.timeout_ms, 2000);
        assert_eq!(config.request_timeout_ms, 10_000);
        assert_eq!(config.resolution, 0);
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let toml = r#"endpoint = "http://10.0.0.2""#;
        let config: BackendConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.endpoint, "http://10.0.0.2");
        assert_eq!(config.timeout_ms, 15_000);
        assert_eq!(config.resolution, 300);
    }
}
