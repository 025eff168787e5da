//! # Galley Core
//!
//! Foundational types shared by every Galley crate:
//!
//! - [`ApiError`] - The error taxonomy surfaced to HTTP clients
//! - [`ErrorCategory`] - Classification of errors into status codes
//! - [`ErrorEnvelope`] - The `{ "error": <message> }` response body
//! - [`RequestId`] - UUID v7 request identifier

#![doc(html_root_url = "https://docs.rs/galley-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod error;

pub use context::RequestId;
pub use error::{ApiError, ApiResult, ErrorCategory, ErrorEnvelope, INTERNAL_ERROR_MESSAGE};
