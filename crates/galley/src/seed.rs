//! Startup seed data.
//!
//! A seed file is a JSON array of records in their wire format, e.g.
//!
//! ```json
//! [{ "id": "1", "name": "Soup", "description": "Hot", "price": 4, "image_url": "soup.png" }]
//! ```

use std::path::{Path, PathBuf};

use galley_store::StoreError;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors raised while loading seed data.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    Read {
        /// The file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSON array of records.
    #[error("invalid seed file {path}: {source}")]
    Parse {
        /// The file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The records could not be stored.
    #[error("invalid seed data: {0}")]
    Store(#[from] StoreError),
}

/// Reads the records in `path`.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SeedError> {
    let content = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<T> = serde_json::from_str(&content).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), records = records.len(), "seed file loaded");
    Ok(records)
}

/// Like [`load`], returning nothing when no path is configured.
pub fn load_optional<T: DeserializeOwned>(path: Option<&Path>) -> Result<Vec<T>, SeedError> {
    path.map_or_else(|| Ok(Vec::new()), load::<T>)
}
