//! HTTP request and response types used by the pipeline.

use bytes::Bytes;
use galley_core::ApiError;
use http::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use http::StatusCode;
use http_body_util::Full;
use serde_json::{json, Value};

/// The HTTP request type used in the pipeline.
pub type Request = http::Request<Full<Bytes>>;

/// The HTTP response type used in the pipeline.
pub type Response = http::Response<Full<Bytes>>;

/// Helpers for building JSON responses.
pub trait ResponseExt {
    /// Creates a JSON response.
    fn json(status: StatusCode, body: &Value) -> Response;

    /// Creates the `{ "error": ... }` response for an error.
    ///
    /// 405 responses also carry an `Allow` header.
    fn from_error(error: &ApiError) -> Response;
}

impl ResponseExt for Response {
    fn json(status: StatusCode, body: &Value) -> Response {
        let mut response = http::Response::new(Full::new(Bytes::from(body.to_string())));
        *response.status_mut() = status;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }

    fn from_error(error: &ApiError) -> Response {
        let mut response = Self::json(
            error.status_code(),
            &json!({ "error": error.public_message() }),
        );
        if let Some(allowed) = error.allowed_methods() {
            if let Ok(value) = HeaderValue::from_str(&allowed.join(", ")) {
                response.headers_mut().insert(ALLOW, value);
            }
        }
        response
    }
}
