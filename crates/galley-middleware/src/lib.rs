//! # Galley Middleware
//!
//! Request processing for Galley, in two layers.
//!
//! ## Outer pipeline
//!
//! An async chain of [`Middleware`] stages that every request passes
//! through, ending in route dispatch:
//!
//! ```text
//! Request → RequestId → AccessLog → dispatch
//!                                       ↓
//! Response ← RequestId ← AccessLog ←────┘
//! ```
//!
//! ## Validator chains
//!
//! Each route owns a [`Chain`]: an ordered list of [`Validator`]s followed by
//! one [`Handler`]. Validators run synchronously against an [`Exchange`]
//! holding the route parameters, the decoded payload and the resource store.
//! The first validator to return an error ends the chain; the handler runs
//! only when every validator passed.
//!
//! ```
//! use galley_middleware::{Chain, Exchange, Reply};
//! # use galley_middleware::Payload;
//! # use galley_store::{Entity, MemoryRepository};
//! # use galley_router::Params;
//! # use serde_json::Value;
//! # #[derive(Clone)] struct Note { id: String }
//! # impl Entity for Note { const KIND: &'static str = "Note"; fn id(&self) -> &str { &self.id } }
//! # #[derive(Default, serde::Deserialize)] struct NotePayload { text: Option<Value> }
//! # impl Payload for NotePayload {
//! #     fn field(&self, name: &str) -> Option<&Value> {
//! #         match name { "text" => self.text.as_ref(), _ => None }
//! #     }
//! # }
//!
//! let chain = Chain::<Note, NotePayload>::builder()
//!     .validate(galley_middleware::validators::require_field("text"))
//!     .handle(|ex: &mut Exchange<'_, Note, NotePayload>| Reply::ok(&ex.store.len()));
//!
//! let params = Params::new();
//! let mut store = MemoryRepository::<Note>::new();
//! let mut ex: Exchange<'_, Note, NotePayload> =
//!     Exchange::new(&params, NotePayload::default(), &mut store);
//!
//! let err = chain.run(&mut ex).unwrap_err();
//! assert_eq!(err.to_string(), "Note must include a text.");
//! ```

#![doc(html_root_url = "https://docs.rs/galley-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chain;
pub mod context;
pub mod middleware;
pub mod payload;
pub mod pipeline;
pub mod reply;
pub mod stages;
pub mod types;
pub mod validators;

pub use chain::{Chain, ChainBuilder, Exchange, FnValidator, Handler, Validator};
pub use context::MiddlewareContext;
pub use middleware::{BoxFuture, Middleware, Next};
pub use payload::{decode_envelope, display_value, is_truthy, Payload, MALFORMED_BODY_MESSAGE};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use reply::Reply;
pub use types::{Request, Response, ResponseExt};
