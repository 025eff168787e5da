//! Typed configuration for Galley.
//!
//! Configuration is layered, later layers overriding earlier ones:
//!
//! 1. Built-in defaults (or the `development` / `production` presets)
//! 2. A TOML or JSON file
//! 3. `GALLEY__SECTION__KEY` environment variables, optionally from `.env`
//!
//! Unknown keys in files are rejected.
//!
//! # Example
//!
//! ```no_run
//! use galley_config::ConfigLoader;
//!
//! # fn main() -> Result<(), galley_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_optional_file("galley.toml")?
//!     .with_env_prefix("GALLEY")
//!     .load()?;
//!
//! println!("listening on {}", config.server.http_addr);
//! # Ok(())
//! # }
//! ```
//!
//! # File format
//!
//! ```toml
//! [server]
//! http_addr = "0.0.0.0:5000"
//! shutdown_timeout_secs = 30
//! request_timeout_ms = 30000
//! max_body_bytes = 1048576
//! service_name = "galley"
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [seed]
//! dishes_path = "data/dishes.json"
//! orders_path = "data/orders.json"
//!
//! [orders]
//! persist_updates = true
//! ```

#![doc(html_root_url = "https://docs.rs/galley-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::GalleyConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{LogFormat, LoggingConfig, OrdersConfig, SeedConfig, ServerConfig};
