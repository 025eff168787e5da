//! Successful handler results.

use bytes::Bytes;
use galley_core::{ApiError, ApiResult};
use http::StatusCode;
use http_body_util::Full;
use serde::Serialize;
use serde_json::{json, Value};

use crate::types::{Response, ResponseExt};

/// What a handler returns: a status and an optional `{ "data": ... }` body.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    status: StatusCode,
    body: Option<Value>,
}

impl Reply {
    /// `200 OK` with `data`.
    pub fn ok<T: Serialize + ?Sized>(data: &T) -> ApiResult<Self> {
        Self::data(StatusCode::OK, data)
    }

    /// `201 Created` with `data`.
    pub fn created<T: Serialize + ?Sized>(data: &T) -> ApiResult<Self> {
        Self::data(StatusCode::CREATED, data)
    }

    /// Any status with `data` wrapped in the success envelope.
    pub fn data<T: Serialize + ?Sized>(status: StatusCode, data: &T) -> ApiResult<Self> {
        let data = serde_json::to_value(data)
            .map_err(|e| ApiError::internal_with_source("failed to serialize reply", e))?;
        Ok(Self {
            status,
            body: Some(json!({ "data": data })),
        })
    }

    /// `204 No Content`.
    #[must_use]
    pub const fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body: None,
        }
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Converts into an HTTP response.
    #[must_use]
    pub fn into_response(self) -> Response {
        match self.body {
            Some(body) => Response::json(self.status, &body),
            None => {
                let mut response = Response::new(Full::new(Bytes::new()));
                *response.status_mut() = self.status;
                response
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_wraps_in_data() {
        let reply = Reply::created(&json!({ "id": "1" })).unwrap();
        assert_eq!(reply.status(), StatusCode::CREATED);
        assert_eq!(reply.body(), Some(&json!({ "data": { "id": "1" } })));
    }

    #[test]
    fn test_no_content_has_no_body() {
        let response = Reply::no_content().into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.headers().get(http::header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_into_response_sets_json_content_type() {
        let response = Reply::ok(&[1, 2]).unwrap().into_response();
        assert_eq!(
            response.headers().get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
