//! Server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default request body limit (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// Artificial delay before each repository call.
    pub min_latency: Duration,
    /// Largest accepted request body.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            log_level: "info".to_string(),
            cors_allowed_origins: "*".to_string(),
            min_latency: Duration::ZERO,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `PORT`: Server port (default: 8080)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    /// - `NOTES_MIN_LATENCY_MS`: Delay before each repository call (default: 0)
    /// - `NOTES_MAX_BODY_BYTES`: Request body limit (default: 1048576)
    ///
    /// Storage settings are read separately by `notes_store::StoreConfig`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = parse_var(&var, "PORT")?.unwrap_or(defaults.port);

        let log_level = var("LOG_LEVEL").unwrap_or(defaults.log_level);

        let cors_allowed_origins =
            var("CORS_ALLOWED_ORIGINS").unwrap_or(defaults.cors_allowed_origins);

        let min_latency = parse_var::<u64>(&var, "NOTES_MIN_LATENCY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.min_latency);

        let max_body_bytes =
            parse_var(&var, "NOTES_MAX_BODY_BYTES")?.unwrap_or(defaults.max_body_bytes);

        Ok(Self {
            port,
            log_level,
            cors_allowed_origins,
            min_latency,
            max_body_bytes,
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn parse_var<T>(var: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    var(name)
        .map(|raw| {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
                name: name.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = ServerConfig::from_vars(vars(&[])).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.cors_allowed_origins, "*");
        assert_eq!(config.min_latency, Duration::ZERO);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_vars(vars(&[
            ("PORT", "3000"),
            ("LOG_LEVEL", "debug"),
            ("NOTES_MIN_LATENCY_MS", "3000"),
            ("NOTES_MAX_BODY_BYTES", "512"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.min_latency, Duration::from_secs(3));
        assert_eq!(config.max_body_bytes, 512);
        assert_eq!(config.socket_addr().port(), 3000);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = ServerConfig::from_vars(vars(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref name, .. } if name == "PORT"));
    }

    #[test]
    fn test_negative_latency_is_rejected() {
        let err = ServerConfig::from_vars(vars(&[("NOTES_MIN_LATENCY_MS", "-5")])).unwrap_err();
        let ConfigError::InvalidValue { name, .. } = err;
        assert_eq!(name, "NOTES_MIN_LATENCY_MS");
    }
}
