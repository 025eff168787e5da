//! Request payload decoding.
//!
//! Bodies arrive wrapped as `{ "data": { ... } }`. Payload structs hold their
//! fields as raw JSON values so validators can distinguish a missing field
//! from one of the wrong type.

use galley_core::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Message returned when the body is not JSON.
pub const MALFORMED_BODY_MESSAGE: &str = "Request body must be valid JSON";

/// A decoded request payload with named fields.
pub trait Payload: Default + DeserializeOwned + Send + 'static {
    /// Returns the raw value of `name`, if the client sent it.
    fn field(&self, name: &str) -> Option<&Value>;

    /// Returns `name` only when it counts as present.
    fn present(&self, name: &str) -> Option<&Value> {
        self.field(name).filter(|value| is_truthy(value))
    }
}

impl Payload for () {
    fn field(&self, _name: &str) -> Option<&Value> {
        None
    }
}

/// JSON truthiness.
///
/// `null`, `false`, `0` and `""` are falsy. Arrays and objects are truthy
/// even when empty.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Renders a value for an error message: strings bare, anything else as JSON.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decodes `{ "data": { ... } }` into `P`.
///
/// An empty body, a body without `data`, or a `data` that is not an object
/// all decode to `P::default()`.
pub fn decode_envelope<P: Payload>(body: &[u8]) -> ApiResult<P> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(P::default());
    }

    let mut root: Value =
        serde_json::from_slice(body).map_err(|_| ApiError::validation(MALFORMED_BODY_MESSAGE))?;

    match root.get_mut("data").map(Value::take) {
        Some(data @ Value::Object(_)) => {
            serde_json::from_value(data).map_err(|_| ApiError::validation(MALFORMED_BODY_MESSAGE))
        }
        _ => Ok(P::default()),
    }
}
