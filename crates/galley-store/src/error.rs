//! Store error types.

use galley_core::ApiError;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a [`Repository`](crate::Repository).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A record with this identifier already exists.
    #[error("{kind} with id '{id}' already exists")]
    DuplicateId {
        /// Entity kind.
        kind: &'static str,
        /// The conflicting identifier.
        id: String,
    },

    /// No record carries this identifier.
    #[error("{kind} with id '{id}' not found")]
    NotFound {
        /// Entity kind.
        kind: &'static str,
        /// The missing identifier.
        id: String,
    },
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, id } => ApiError::not_found_resource(kind, id),
            StoreError::DuplicateId { .. } => {
                ApiError::internal_with_source("store rejected record", err)
            }
        }
    }
}
