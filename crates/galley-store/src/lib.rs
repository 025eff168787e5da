//! # Galley Store
//!
//! Process-memory persistence for Galley resources.
//!
//! Each resource collection is an ordered list of records owned by a
//! [`MemoryRepository`]. Handlers never touch the list directly: they go
//! through the [`Repository`] trait, which keeps stores injectable and lets
//! tests substitute their own implementation.
//!
//! ```
//! use galley_store::{Entity, MemoryRepository, Repository};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Note {
//!     id: String,
//!     text: String,
//! }
//!
//! impl Entity for Note {
//!     const KIND: &'static str = "Note";
//!
//!     fn id(&self) -> &str {
//!         &self.id
//!     }
//! }
//!
//! let mut notes = MemoryRepository::<Note>::new();
//! let id = notes.next_id();
//! notes.create(Note { id: id.clone(), text: "hello".into() }).unwrap();
//!
//! assert_eq!(notes.find(&id).map(|n| n.text), Some("hello".to_string()));
//! ```

#![doc(html_root_url = "https://docs.rs/galley-store/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod ids;
mod repository;
mod shared;

pub use error::{StoreError, StoreResult};
pub use ids::SequentialIds;
pub use repository::{Entity, MemoryRepository, Repository};
pub use shared::{shared, SharedStore};
