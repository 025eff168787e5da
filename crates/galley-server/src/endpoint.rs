//! Route endpoints.
//!
//! An [`Endpoint`] turns a routed request into a [`Reply`]. The usual
//! implementation is [`ChainEndpoint`], which decodes the payload, locks the
//! resource store and runs a validator chain against it.

use std::sync::Arc;

use galley_core::ApiResult;
use galley_middleware::{decode_envelope, Chain, Exchange, Payload, Reply};
use galley_router::{MethodRouter, Params};
use galley_store::{Entity, SharedStore};

/// The target of a route.
pub trait Endpoint: Send + Sync + 'static {
    /// Handles a request whose body has already been collected.
    fn call(&self, params: &Params, body: &[u8]) -> ApiResult<Reply>;
}

/// A shareable endpoint.
pub type BoxedEndpoint = Arc<dyn Endpoint>;

/// Method table for one path.
pub type Routes = MethodRouter<BoxedEndpoint>;

/// Runs a [`Chain`] against a shared store.
pub struct ChainEndpoint<E: Entity, P> {
    chain: Chain<E, P>,
    store: SharedStore<E>,
}

impl<E: Entity, P: Payload> ChainEndpoint<E, P> {
    /// Binds `chain` to `store`.
    pub fn new(chain: Chain<E, P>, store: SharedStore<E>) -> Self {
        Self { chain, store }
    }

    /// Binds `chain` to `store` and erases the type for routing.
    pub fn boxed(chain: Chain<E, P>, store: SharedStore<E>) -> BoxedEndpoint {
        Arc::new(Self::new(chain, store))
    }
}

impl<E: Entity, P: Payload> Endpoint for ChainEndpoint<E, P> {
    fn call(&self, params: &Params, body: &[u8]) -> ApiResult<Reply> {
        let payload = decode_envelope::<P>(body)?;

        let mut store = self.store.lock();
        let mut ex = Exchange::new(params, payload, store.as_mut());
        self.chain.run(&mut ex)
    }
}

impl<E: Entity, P> std::fmt::Debug for ChainEndpoint<E, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainEndpoint")
            .field("kind", &E::KIND)
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galley_core::ApiError;
    use galley_middleware::validators::require_field;
    use galley_store::{shared, MemoryRepository};
    use http::StatusCode;
    use serde::Deserialize;
    use serde_json::{json, Value};

    #[derive(Debug, Clone, serde::Serialize)]
    struct Note {
        id: String,
        text: String,
    }

    impl Entity for Note {
        const KIND: &'static str = "Note";

        fn id(&self) -> &str {
            &self.id
        }
    }

    #[derive(Debug, Default, Deserialize)]
    struct NotePayload {
        text: Option<Value>,
    }

    impl Payload for NotePayload {
        fn field(&self, name: &str) -> Option<&Value> {
            match name {
                "text" => self.text.as_ref(),
                _ => None,
            }
        }
    }

    fn create_chain() -> Chain<Note, NotePayload> {
        Chain::<Note, NotePayload>::builder()
            .validate(require_field("text"))
            .handle(|ex: &mut Exchange<'_, Note, NotePayload>| {
                let text = ex
                    .payload
                    .text
                    .as_ref()
                    .and_then(Value::as_str)
                    .ok_or_else(|| ApiError::validation("text must be a string"))?
                    .to_string();
                let id = ex.store.next_id();
                let note = ex.store.create(Note { id, text })?;
                Reply::created(&note)
            })
    }

    #[test]
    fn test_chain_endpoint_mutates_shared_store() {
        let store = shared(MemoryRepository::<Note>::new());
        let endpoint = ChainEndpoint::new(create_chain(), Arc::clone(&store));

        let reply = endpoint
            .call(&Params::new(), br#"{"data":{"text":"hi"}}"#)
            .unwrap();

        assert_eq!(reply.status(), StatusCode::CREATED);
        assert_eq!(
            reply.body(),
            Some(&json!({ "data": { "id": "1", "text": "hi" } }))
        );
        assert_eq!(store.lock().len(), 1);
    }

    #[test]
    fn test_chain_endpoint_reports_validation_errors() {
        let store = shared(MemoryRepository::<Note>::new());
        let endpoint = ChainEndpoint::new(create_chain(), Arc::clone(&store));

        let err = endpoint.call(&Params::new(), b"").unwrap_err();

        assert_eq!(err.to_string(), "Note must include a text.");
        assert!(store.lock().is_empty());
    }

    #[test]
    fn test_malformed_body_never_reaches_chain() {
        let store = shared(MemoryRepository::<Note>::new());
        let endpoint = ChainEndpoint::new(create_chain(), store);

        let err = endpoint.call(&Params::new(), b"{oops").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Request body must be valid JSON");
    }
}
