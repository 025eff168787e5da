//! Path and method routing for Galley.
//!
//! Routes are stored in a segment tree. Each node holds literal children, at
//! most one `{param}` child, and optionally a [`MethodRouter`] when a route
//! ends there:
//!
//! ```text
//!              (root)
//!           ┌────┴────┐
//!       "dishes"   "orders"
//!       [GET,POST] [GET,POST]
//!           │         │
//!       {dishId}   {orderId}
//!       [GET,PUT]  [GET,PUT,DELETE]
//! ```
//!
//! Matching yields a [`Match`], which tells the caller whether to dispatch,
//! answer 405 with the allowed methods, or answer 404.

#![doc(html_root_url = "https://docs.rs/galley-router/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod method_router;
mod node;
mod params;
mod router;

pub use method_router::MethodRouter;
pub use params::Params;
pub use router::{Match, Router};
