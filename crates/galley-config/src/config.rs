//! Top-level configuration.

use serde::{Deserialize, Serialize};

use crate::schema::{LogFormat, LoggingConfig, OrdersConfig, SeedConfig, ServerConfig};
use crate::ConfigError;

/// Complete Galley configuration.
///
/// # Example
///
/// ```
/// use galley_config::GalleyConfig;
///
/// let config = GalleyConfig::default();
/// assert_eq!(config.server.http_addr, "127.0.0.1:5000");
/// assert!(config.orders.persist_updates);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GalleyConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Startup seed files.
    #[serde(default)]
    pub seed: SeedConfig,

    /// Order handling.
    #[serde(default)]
    pub orders: OrdersConfig,
}

impl GalleyConfig {
    /// Validates the configuration.
    ///
    /// Checks the bind address parses, timeouts and limits are non-zero, the
    /// service name is set and any seed file exists.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .server
            .http_addr
            .parse::<std::net::SocketAddr>()
            .is_err()
        {
            return Err(ConfigError::invalid_value(
                "server.http_addr",
                format!("invalid socket address: {}", self.server.http_addr),
            ));
        }

        if self.server.request_timeout_ms == 0 {
            return Err(ConfigError::invalid_value(
                "server.request_timeout_ms",
                "must be greater than 0",
            ));
        }

        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::invalid_value(
                "server.max_body_bytes",
                "must be greater than 0",
            ));
        }

        if self.server.service_name.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "server.service_name",
                "must not be empty",
            ));
        }

        for (field, path) in [
            ("seed.dishes_path", &self.seed.dishes_path),
            ("seed.orders_path", &self.seed.orders_path),
        ] {
            if let Some(path) = path {
                if !path.is_file() {
                    return Err(ConfigError::invalid_value(
                        field,
                        format!("no such file: {}", path.display()),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Local development preset: debug level, pretty logs with locations.
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.logging.include_location = true;
        config
    }

    /// Production preset: listen on all interfaces, JSON logs at info.
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();
        config.server.http_addr = "0.0.0.0:5000".to_string();
        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GalleyConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_addr_rejected() {
        let mut config = GalleyConfig::default();
        config.server.http_addr = "localhost".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.http_addr"));
    }

    #[test]
    fn test_zero_limits_rejected() {
        let mut config = GalleyConfig::default();
        config.server.max_body_bytes = 0;
        assert!(config.validate().is_err());

        let mut config = GalleyConfig::default();
        config.server.request_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_seed_file_rejected() {
        let mut config = GalleyConfig::default();
        config.seed.dishes_path = Some("/nonexistent/dishes.json".into());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("seed.dishes_path"));
    }

    #[test]
    fn test_existing_seed_file_accepted() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();

        let mut config = GalleyConfig::default();
        config.seed.orders_path = Some(file.path().to_path_buf());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let dev = GalleyConfig::development();
        assert_eq!(dev.logging.level, "debug");
        assert_eq!(dev.logging.format, LogFormat::Pretty);

        let prod = GalleyConfig::production();
        assert_eq!(prod.server.http_addr, "0.0.0.0:5000");
        assert_eq!(prod.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_toml_round_trip_sections() {
        let toml_str = toml::to_string_pretty(&GalleyConfig::default()).unwrap();
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[orders]"));
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result: Result<GalleyConfig, _> = toml::from_str("[menus]\nenabled = true\n");
        assert!(result.is_err());
    }
}
