//! # Galley
//!
//! An in-memory dishes and orders API.
//!
//! Every route runs an ordered chain of validators over the decoded request
//! before its handler touches the store. The first failing validator decides
//! the response:
//!
//! ```text
//! POST /orders
//!   has(deliverTo) ─▶ has(mobileNumber) ─▶ has(dishes) ─▶ dishes-shape
//!     ─▶ quantities ─▶ status-if-present ─▶ create
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use galley::{app, AppState};
//! use galley_config::GalleyConfig;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = GalleyConfig::default();
//! let state = AppState::from_config(&config)?;
//! app(&state, config.server).run().await?;
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/galley/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dishes;
pub mod orders;
pub mod routes;
pub mod seed;
pub mod state;

pub use routes::app;
pub use seed::SeedError;
pub use state::AppState;

/// Crate version, reported by `/health` and `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
