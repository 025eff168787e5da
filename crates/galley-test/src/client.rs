//! In-memory test client.

use std::sync::Arc;

use bytes::Bytes;
use galley_server::Server;
use http::Method;
use serde::Serialize;

use crate::error::TestError;
use crate::request::TestRequestBuilder;
use crate::response::TestResponse;

/// Sends requests straight into [`Server::handle`], without sockets.
///
/// Requests still pass through the full middleware pipeline and router.
///
/// # Example
///
/// ```
/// use galley_server::Server;
/// use galley_test::TestClient;
/// use http::StatusCode;
///
/// # tokio_test_block(async {
/// let client = TestClient::new(Server::builder().build());
/// let response = client.get("/health").send().await;
/// response.assert_status(StatusCode::OK);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) {
/// #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f);
/// # }
/// ```
#[must_use]
#[derive(Clone)]
pub struct TestClient {
    server: Arc<Server>,
    default_headers: Vec<(String, String)>,
}

impl TestClient {
    /// Wraps a server.
    pub fn new(server: Server) -> Self {
        Self {
            server: Arc::new(server),
            default_headers: Vec::new(),
        }
    }

    /// Adds a header sent with every request.
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Returns the wrapped server.
    #[must_use]
    pub fn server(&self) -> &Server {
        &self.server
    }

    /// Starts a GET request.
    pub fn get(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::GET, uri)
    }

    /// Starts a POST request.
    pub fn post(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::POST, uri)
    }

    /// Starts a PUT request.
    pub fn put(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::PUT, uri)
    }

    /// Starts a DELETE request.
    pub fn delete(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        self.request(Method::DELETE, uri)
    }

    /// Starts a request with any method.
    pub fn request(&self, method: Method, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        let mut builder = TestRequestBuilder::new(method, uri);
        for (name, value) in &self.default_headers {
            builder = builder.header(name, value);
        }
        TestClientRequest {
            client: self,
            builder,
        }
    }
}

impl std::fmt::Debug for TestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestClient")
            .field("server", &self.server)
            .field("default_headers", &self.default_headers)
            .finish()
    }
}

/// A request bound to a [`TestClient`].
#[must_use]
pub struct TestClientRequest<'a> {
    client: &'a TestClient,
    builder: TestRequestBuilder,
}

impl TestClientRequest<'_> {
    /// Sets a header.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Sets the raw body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Sets a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        self.builder = self.builder.json(value);
        self
    }

    /// Sends the request.
    ///
    /// # Panics
    ///
    /// Panics if the request could not be built.
    pub async fn send(self) -> TestResponse {
        match self.try_send().await {
            Ok(response) => response,
            Err(e) => panic!("failed to build test request: {e}"),
        }
    }

    /// Sends the request, reporting build failures.
    pub async fn try_send(self) -> Result<TestResponse, TestError> {
        let request = self.builder.build()?;
        let response = self.client.server.handle(request).await;
        Ok(TestResponse::from_response(response).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galley_core::ApiResult;
    use galley_middleware::Reply;
    use galley_router::{MethodRouter, Params};
    use galley_server::{BoxedEndpoint, Endpoint};
    use http::StatusCode;
    use serde_json::json;

    struct Greeting;

    impl Endpoint for Greeting {
        fn call(&self, params: &Params, body: &[u8]) -> ApiResult<Reply> {
            Reply::ok(&json!({ "name": params.get("name"), "len": body.len() }))
        }
    }

    fn client() -> TestClient {
        let server = Server::builder()
            .route(
                "/greet/{name}",
                MethodRouter::new().post(Arc::new(Greeting) as BoxedEndpoint),
            )
            .build();
        TestClient::new(server)
    }

    #[tokio::test]
    async fn test_sends_through_router() {
        let response = client().post("/greet/ada").json(&json!({})).send().await;

        response.assert_status(StatusCode::OK);
        assert_eq!(response.data(), json!({ "name": "ada", "len": 2 }));
        assert!(response.header("x-request-id").is_some());
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let response = client().get("/greet/ada").send().await;

        response.assert_error(StatusCode::METHOD_NOT_ALLOWED, "GET not allowed for /greet/ada");
        response.assert_header("allow", "POST");
    }

    #[tokio::test]
    async fn test_try_send_reports_bad_headers() {
        let result = client().post("/greet/ada").header("bad header", "x").try_send().await;
        assert!(matches!(result, Err(TestError::InvalidHeader(_))));
    }
}
