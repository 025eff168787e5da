//! Configuration sections.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// HTTP server settings.
///
/// # Example
///
/// ```
/// use galley_config::ServerConfig;
///
/// let config = ServerConfig {
///     http_addr: "0.0.0.0:5000".to_string(),
///     ..ServerConfig::default()
/// };
/// assert_eq!(config.max_body_bytes, 1024 * 1024);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_http_addr")]
    pub http_addr: String,

    /// How long to wait for in-flight connections on shutdown.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,

    /// Limit for reading the body and running the route, in milliseconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Largest accepted request body.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Name reported by `/health` and in startup logs.
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: default_http_addr(),
            shutdown_timeout_secs: default_shutdown_timeout(),
            request_timeout_ms: default_request_timeout(),
            max_body_bytes: default_max_body_bytes(),
            service_name: default_service_name(),
        }
    }
}

fn default_http_addr() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_shutdown_timeout() -> u64 {
    30
}

fn default_request_timeout() -> u64 {
    30_000
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

fn default_service_name() -> String {
    "galley".to_string()
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Install a subscriber at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// `EnvFilter` directive, e.g. `info` or `galley_server=debug,info`.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Files loaded into the stores at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SeedConfig {
    /// JSON array of dishes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dishes_path: Option<PathBuf>,

    /// JSON array of orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders_path: Option<PathBuf>,
}

/// Order handling settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OrdersConfig {
    /// Whether `PUT /orders/{orderId}` writes the new order to the store.
    ///
    /// When false the update is validated and echoed but the stored order is
    /// left unchanged.
    #[serde(default = "default_true")]
    pub persist_updates: bool,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            persist_updates: true,
        }
    }
}

fn default_true() -> bool {
    true
}
