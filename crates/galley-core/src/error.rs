//! Error types for Galley.
//!
//! [`ApiError`] is the single error type that reaches HTTP clients. Every
//! validator, handler and server stage produces one, and the server turns it
//! into a status code plus an [`ErrorEnvelope`] body:
//!
//! ```json
//! { "error": "Dish must include a name." }
//! ```
//!
//! | `ErrorCategory` | Status |
//! |---|---|
//! | `Validation` | 400 |
//! | `NotFound` | 404 |
//! | `MethodNotAllowed` | 405 |
//! | `Timeout` | 408 |
//! | `PayloadTooLarge` | 413 |
//! | `Internal` | 500 |

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`ApiError`].
pub type ApiResult<T> = Result<T, ApiError>;

/// Message reported to clients for internal failures.
///
/// The underlying detail is logged, never sent.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong!";

/// Categories of errors for classification and handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Missing or malformed field, id mismatch, ineligible state.
    Validation,
    /// Unknown identifier or unknown path.
    NotFound,
    /// Known path, unsupported verb.
    MethodNotAllowed,
    /// Request body or handling took too long.
    Timeout,
    /// Request body exceeded the configured limit.
    PayloadTooLarge,
    /// Anything else.
    Internal,
}

impl ErrorCategory {
    /// Returns the HTTP status code for this category.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Standard error type for Galley.
///
/// The `Display` output of the client-facing variants is exactly the message
/// placed in the response envelope.
///
/// # Example
///
/// ```
/// use galley_core::{ApiError, ErrorCategory};
///
/// fn check_name(name: &str) -> Result<(), ApiError> {
///     if name.is_empty() {
///         return Err(ApiError::validation("Dish must include a name."));
///     }
///     Ok(())
/// }
///
/// let err = check_name("").unwrap_err();
/// assert_eq!(err.category(), ErrorCategory::Validation);
/// assert_eq!(err.to_string(), "Dish must include a name.");
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed.
    #[error("{message}")]
    Validation {
        /// Human-readable error message.
        message: String,
    },

    /// Resource or path not found.
    #[error("{message}")]
    NotFound {
        /// Human-readable error message.
        message: String,
        /// The kind of resource that was not found, if any.
        resource_type: Option<String>,
        /// The identifier that was looked up, if any.
        resource_id: Option<String>,
    },

    /// The path exists but does not accept this method.
    #[error("{method} not allowed for {path}")]
    MethodNotAllowed {
        /// The rejected method.
        method: String,
        /// The requested path.
        path: String,
        /// Methods the path does accept.
        allowed: Vec<String>,
    },

    /// Reading or handling the request timed out.
    #[error("{message}")]
    Timeout {
        /// Human-readable error message.
        message: String,
    },

    /// Request body exceeded the configured size limit.
    #[error("Request body exceeds the limit of {limit} bytes")]
    PayloadTooLarge {
        /// The configured limit in bytes.
        limit: usize,
    },

    /// Internal server error.
    #[error("Internal error: {message}")]
    Internal {
        /// Detail for logs (not exposed to clients).
        message: String,
        /// The underlying error.
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl ApiError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a not found error with a free-form message.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            resource_type: None,
            resource_id: None,
        }
    }

    /// Creates a not found error for a resource lookup.
    ///
    /// The message reads `"<Kind> does not exist: <id>."`.
    #[must_use]
    pub fn not_found_resource(
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        let resource_type = resource_type.into();
        let resource_id = resource_id.into();
        Self::NotFound {
            message: format!("{resource_type} does not exist: {resource_id}."),
            resource_type: Some(resource_type),
            resource_id: Some(resource_id),
        }
    }

    /// Creates an error for an unknown path.
    #[must_use]
    pub fn path_not_found(path: &str) -> Self {
        Self::not_found(format!("Path not found: {path}"))
    }

    /// Creates a method not allowed error.
    #[must_use]
    pub fn method_not_allowed(
        method: impl Into<String>,
        path: impl Into<String>,
        allowed: Vec<String>,
    ) -> Self {
        Self::MethodNotAllowed {
            method: method.into(),
            path: path.into(),
            allowed,
        }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a payload too large error.
    #[must_use]
    pub const fn payload_too_large(limit: usize) -> Self {
        Self::PayloadTooLarge { limit }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an internal error with a source error.
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::MethodNotAllowed { .. } => ErrorCategory::MethodNotAllowed,
            Self::Timeout { .. } => ErrorCategory::Timeout,
            Self::PayloadTooLarge { .. } => ErrorCategory::PayloadTooLarge,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.category().status_code()
    }

    /// Returns the methods to advertise in an `Allow` header, if any.
    #[must_use]
    pub fn allowed_methods(&self) -> Option<&[String]> {
        match self {
            Self::MethodNotAllowed { allowed, .. } => Some(allowed),
            _ => None,
        }
    }

    /// Returns the message that is safe to send to clients.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Internal { .. } => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Converts this error to a serializable error envelope.
    #[must_use]
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: self.public_message(),
        }
    }
}

/// Serializable error body for HTTP responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Human-readable error message.
    pub error: String,
}
