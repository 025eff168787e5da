//! # Galley Server
//!
//! HTTP/1.1 server for Galley, built on hyper and tokio.
//!
//! Routes map to [`Endpoint`]s. A [`ChainEndpoint`] decodes the request
//! payload, locks its resource store and runs a validator chain:
//!
//! ```text
//! TCP ─▶ hyper ─▶ body limit/timeout ─▶ pipeline (request id, access log)
//!                                          │
//!                                          ▼
//!                              /health │ router ─▶ endpoint ─▶ chain
//! ```
//!
//! Graceful shutdown is driven by a [`ShutdownSignal`]; open connections are
//! counted by a [`ConnectionTracker`] and given the configured grace period.

#![doc(html_root_url = "https://docs.rs/galley-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod endpoint;
mod error;
mod health;
mod server;
mod shutdown;

pub use endpoint::{BoxedEndpoint, ChainEndpoint, Endpoint, Routes};
pub use error::{ServerError, ServerResult};
pub use health::{HealthCheck, HealthStatus, HEALTH_PATH};
pub use server::{Server, ServerBuilder, BODY_READ_MESSAGE, REQUEST_TIMEOUT_MESSAGE};
pub use shutdown::{ConnectionToken, ConnectionTracker, ShutdownSignal};
