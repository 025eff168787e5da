//! Structured logging for Galley.
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either a
//! JSON or a pretty formatting layer. All crates in the workspace log through
//! the `tracing` macros with these field names:
//!
//! | Field | Meaning |
//! |---|---|
//! | `request_id` | UUID v7 assigned to the request |
//! | `http.method`, `http.path` | Request line |
//! | `route` | Matched route pattern |
//! | `http.status_code` | Response status |
//! | `duration_ms` | Time spent in the pipeline |
//!
//! # Example
//!
//! ```
//! use galley_config::GalleyConfig;
//! use galley_telemetry::{init_logging, LogConfig};
//!
//! let mut config = GalleyConfig::default();
//! config.logging.enabled = false;
//!
//! init_logging(&LogConfig::from_config(&config)).unwrap();
//! ```

#![doc(html_root_url = "https://docs.rs/galley-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig};

/// Result alias for telemetry setup.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
