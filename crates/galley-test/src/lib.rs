//! # Galley Test
//!
//! In-memory HTTP testing for Galley: requests go through the server's
//! middleware pipeline, router and endpoints without binding a port.
//!
//! ```ignore
//! use galley_test::TestClient;
//! use serde_json::json;
//!
//! #[tokio::test]
//! async fn test_create_dish() {
//!     let client = TestClient::new(app());
//!
//!     let response = client
//!         .post("/dishes")
//!         .json(&json!({ "data": { "name": "Soup", "description": "Hot", "price": 4, "image_url": "x" } }))
//!         .send()
//!         .await;
//!
//!     response.assert_status(http::StatusCode::CREATED);
//!     assert_eq!(response.data()["name"], "Soup");
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/galley-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod request;
mod response;

pub use client::{TestClient, TestClientRequest};
pub use error::TestError;
pub use request::TestRequestBuilder;
pub use response::TestResponse;
