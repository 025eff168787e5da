//! HTTP server.
//!
//! The server has two layers:
//!
//! - [`Server::handle`] runs one fully-buffered request through the
//!   middleware pipeline, routes it and calls its endpoint. It needs no
//!   socket, which is how the test client drives it.
//! - [`Server::serve`] accepts TCP connections, speaks HTTP/1.1 through
//!   hyper, buffers each body under the configured size and time limits and
//!   hands the result to `handle`.
//!
//! # Example
//!
//! ```rust,no_run
//! use galley_config::ServerConfig;
//! use galley_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = Server::builder().config(ServerConfig::default()).build();
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use galley_config::ServerConfig;
use galley_core::{ApiError, RequestId};
use galley_middleware::stages::{AccessLogMiddleware, RequestIdMiddleware};
use galley_middleware::{BoxFuture, MiddlewareContext, Pipeline, Request, Response, ResponseExt};
use galley_router::{Match, Router};
use http::{Method, StatusCode, Uri};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};

use crate::endpoint::{BoxedEndpoint, Routes};
use crate::error::{ServerError, ServerResult};
use crate::health::{HealthCheck, HEALTH_PATH};
use crate::shutdown::{ConnectionTracker, ShutdownSignal};

/// Message sent when a request exceeds `server.request_timeout_ms`.
pub const REQUEST_TIMEOUT_MESSAGE: &str = "Request timed out";

/// Message sent when the request body cannot be read.
pub const BODY_READ_MESSAGE: &str = "Request body could not be read";

struct Route {
    pattern: Arc<str>,
    endpoint: BoxedEndpoint,
}

/// Routing state shared with every request task.
struct Dispatcher {
    routes: Router<Route>,
    health: HealthCheck,
    max_body_bytes: usize,
}

impl Dispatcher {
    fn dispatch(&self, ctx: &mut MiddlewareContext, request: Request) -> BoxFuture<'static, Response> {
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        // Error messages echo the URL as requested, query included.
        let url = request
            .uri()
            .path_and_query()
            .map_or_else(|| path.clone(), |pq| pq.as_str().to_string());
        let request_id = ctx.request_id();

        if method == Method::GET && path == HEALTH_PATH {
            ctx.set_route(HEALTH_PATH);
            let response = self.health_response(request_id);
            return Box::pin(async move { response });
        }

        let (endpoint, params) = match self.routes.match_route(&method, &path) {
            Match::Found { target, params } => {
                ctx.set_route(target.pattern.as_ref());
                (Arc::clone(&target.endpoint), params)
            }
            Match::MethodNotAllowed { allowed } => {
                let allowed = allowed.iter().map(|m| m.as_str().to_string()).collect();
                let error = ApiError::method_not_allowed(method.as_str(), url, allowed);
                let response = error_response(request_id, &error);
                return Box::pin(async move { response });
            }
            Match::NotFound => {
                let response = error_response(request_id, &ApiError::path_not_found(&url));
                return Box::pin(async move { response });
            }
        };

        let limit = self.max_body_bytes;
        Box::pin(async move {
            let body = match request.into_body().collect().await {
                Ok(collected) => collected.to_bytes(),
                Err(never) => match never {},
            };
            if body.len() > limit {
                return error_response(request_id, &ApiError::payload_too_large(limit));
            }

            match endpoint.call(&params, &body) {
                Ok(reply) => reply.into_response(),
                Err(error) => error_response(request_id, &error),
            }
        })
    }

    fn health_response(&self, request_id: RequestId) -> Response {
        match serde_json::to_value(self.health.status()) {
            Ok(body) => Response::json(StatusCode::OK, &body),
            Err(e) => error_response(
                request_id,
                &ApiError::internal_with_source("failed to serialize health status", e),
            ),
        }
    }
}

/// Builds the error response, logging internal failures with their detail.
fn error_response(request_id: RequestId, error: &ApiError) -> Response {
    if matches!(error, ApiError::Internal { .. }) {
        tracing::error!(request_id = %request_id, error = ?error, "request failed");
    }
    Response::from_error(error)
}

/// The Galley HTTP server.
pub struct Server {
    config: ServerConfig,
    dispatcher: Arc<Dispatcher>,
    pipeline: Pipeline,
}

impl Server {
    /// Creates a server builder.
    #[must_use]
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Returns the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the number of bound paths.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.dispatcher.routes.len()
    }

    /// Returns the per-request time limit.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.config.request_timeout_ms)
    }

    /// Returns how long shutdown waits for open connections.
    #[must_use]
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.config.shutdown_timeout_secs)
    }

    /// Handles one buffered request.
    ///
    /// Never fails: every outcome, including routing misses and endpoint
    /// errors, becomes a response.
    pub async fn handle(&self, request: Request) -> Response {
        let dispatcher = Arc::clone(&self.dispatcher);
        self.pipeline
            .process(MiddlewareContext::new(), request, move |ctx, request| {
                dispatcher.dispatch(ctx, request)
            })
            .await
    }

    /// Binds the configured address and serves until SIGINT or SIGTERM.
    pub async fn run(self) -> ServerResult<()> {
        let shutdown = ShutdownSignal::with_os_signals();
        self.run_with_shutdown(shutdown).await
    }

    /// Binds the configured address and serves until `shutdown` triggers.
    pub async fn run_with_shutdown(self, shutdown: ShutdownSignal) -> ServerResult<()> {
        let addr = self
            .config
            .http_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|e| ServerError::InvalidAddress {
                addr: self.config.http_addr.clone(),
                reason: e.to_string(),
            })?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        self.serve(listener, shutdown).await
    }

    /// Serves connections from `listener` until `shutdown` triggers, then
    /// waits up to the shutdown timeout for open connections to finish.
    pub async fn serve(self, listener: TcpListener, shutdown: ShutdownSignal) -> ServerResult<()> {
        let local_addr = listener.local_addr()?;
        tracing::info!(
            addr = %local_addr,
            service = self.dispatcher.health.service(),
            routes = self.route_count(),
            "server listening"
        );

        let server = Arc::new(self);
        let tracker = ConnectionTracker::new();

        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, remote_addr)) => {
                        let server = Arc::clone(&server);
                        let token = tracker.acquire();
                        let shutdown = shutdown.clone();

                        tokio::spawn(async move {
                            if let Err(e) = server.serve_connection(stream, shutdown).await {
                                tracing::debug!(remote_addr = %remote_addr, error = %e, "connection error");
                            }
                            drop(token);
                        });
                    }
                    Err(e) => tracing::error!(error = %e, "failed to accept connection"),
                },
                () = shutdown.recv() => {
                    tracing::info!("shutdown signal received, no longer accepting connections");
                    break;
                }
            }
        }
        drop(listener);

        let grace = server.shutdown_timeout();
        tracing::info!(
            active = tracker.active_connections(),
            grace_secs = grace.as_secs(),
            "draining connections"
        );
        if tokio::time::timeout(grace, tracker.drained()).await.is_err() {
            tracing::warn!(
                active = tracker.active_connections(),
                "shutdown timeout reached with connections still open"
            );
        }

        tracing::info!("server stopped");
        Ok(())
    }

    async fn serve_connection(
        self: Arc<Self>,
        stream: TcpStream,
        shutdown: ShutdownSignal,
    ) -> Result<(), hyper::Error> {
        let io = TokioIo::new(stream);
        let server = Arc::clone(&self);
        let service = service_fn(move |request: http::Request<Incoming>| {
            let server = Arc::clone(&server);
            async move { Ok::<_, Infallible>(server.handle_incoming(request).await) }
        });

        let conn = http1::Builder::new().serve_connection(io, service);
        tokio::pin!(conn);

        tokio::select! {
            result = conn.as_mut() => result,
            () = shutdown.recv() => {
                conn.as_mut().graceful_shutdown();
                conn.await
            }
        }
    }

    /// Buffers a streaming body under the size and time limits, then
    /// handles the request.
    async fn handle_incoming(&self, request: http::Request<Incoming>) -> Response {
        let timeout = self.request_timeout();
        let limit = self.config.max_body_bytes;
        let (parts, body) = request.into_parts();
        let method = parts.method.clone();
        let uri = parts.uri.clone();

        let body = match tokio::time::timeout(timeout, Limited::new(body, limit).collect()).await {
            Ok(Ok(collected)) => collected.to_bytes(),
            Ok(Err(e)) => {
                let error = if e.downcast_ref::<LengthLimitError>().is_some() {
                    ApiError::payload_too_large(limit)
                } else {
                    tracing::debug!(error = %e, "failed to read request body");
                    ApiError::validation(BODY_READ_MESSAGE)
                };
                return self.reject(method, uri, error).await;
            }
            Err(_) => {
                tracing::warn!(http.method = %method, http.path = uri.path(), "request body timed out");
                return self
                    .reject(method, uri, ApiError::timeout(REQUEST_TIMEOUT_MESSAGE))
                    .await;
            }
        };

        let request = http::Request::from_parts(parts, Full::new(body));
        match tokio::time::timeout(timeout, self.handle(request)).await {
            Ok(response) => response,
            Err(_) => {
                tracing::warn!(http.method = %method, http.path = uri.path(), "request handling timed out");
                self.reject(method, uri, ApiError::timeout(REQUEST_TIMEOUT_MESSAGE))
                    .await
            }
        }
    }

    /// Answers with `error` while still passing through the pipeline, so the
    /// response carries a request id and is logged.
    async fn reject(&self, method: Method, uri: Uri, error: ApiError) -> Response {
        let mut request = Request::new(Full::new(Bytes::new()));
        *request.method_mut() = method;
        *request.uri_mut() = uri;

        self.pipeline
            .process(MiddlewareContext::new(), request, move |ctx, _request| {
                let response = error_response(ctx.request_id(), &error);
                Box::pin(async move { response })
            })
            .await
    }
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("config", &self.config)
            .field("routes", &self.route_count())
            .field("pipeline", &self.pipeline)
            .finish()
    }
}

/// Builder for [`Server`].
///
/// # Example
///
/// ```rust
/// use galley_server::Server;
///
/// let server = Server::builder().version("1.0.0").build();
/// assert_eq!(server.route_count(), 0);
/// ```
pub struct ServerBuilder {
    config: ServerConfig,
    version: String,
    routes: Router<Route>,
    pipeline: Option<Pipeline>,
}

impl ServerBuilder {
    /// Creates a builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            routes: Router::new(),
            pipeline: None,
        }
    }

    /// Sets the server configuration.
    #[must_use]
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the version reported by `/health`.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Binds `routes` to `pattern`.
    ///
    /// Patterns use `{name}` for captured segments, e.g. `/orders/{orderId}`.
    #[must_use]
    pub fn route(mut self, pattern: &str, routes: Routes) -> Self {
        let shared: Arc<str> = Arc::from(pattern);
        let bound = routes.map(|endpoint| Route {
            pattern: Arc::clone(&shared),
            endpoint,
        });
        self.routes.insert(pattern, bound);
        self
    }

    /// Replaces the default request-id and access-log pipeline.
    #[must_use]
    pub fn pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Builds the server.
    #[must_use]
    pub fn build(self) -> Server {
        let pipeline = self.pipeline.unwrap_or_else(|| {
            Pipeline::builder()
                .add_stage(RequestIdMiddleware::new())
                .add_stage(AccessLogMiddleware::new())
                .build()
        });

        Server {
            dispatcher: Arc::new(Dispatcher {
                routes: self.routes,
                health: HealthCheck::new(self.config.service_name.clone(), self.version),
                max_body_bytes: self.config.max_body_bytes,
            }),
            config: self.config,
            pipeline,
        }
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::Endpoint;
    use galley_core::ApiResult;
    use galley_middleware::Reply;
    use galley_router::{MethodRouter, Params};
    use http::header::ALLOW;
    use serde_json::{json, Value};

    struct Echo;

    impl Endpoint for Echo {
        fn call(&self, params: &Params, body: &[u8]) -> ApiResult<Reply> {
            Reply::ok(&json!({ "id": params.get("id"), "bytes": body.len() }))
        }
    }

    struct Broken;

    impl Endpoint for Broken {
        fn call(&self, _params: &Params, _body: &[u8]) -> ApiResult<Reply> {
            Err(ApiError::internal("store poisoned"))
        }
    }

    fn server() -> Server {
        let config = ServerConfig {
            max_body_bytes: 16,
            ..ServerConfig::default()
        };
        Server::builder()
            .config(config)
            .version("9.9.9")
            .route(
                "/items/{id}",
                MethodRouter::new()
                    .get(Arc::new(Echo) as BoxedEndpoint)
                    .put(Arc::new(Echo) as BoxedEndpoint),
            )
            .route("/broken", MethodRouter::new().get(Arc::new(Broken) as BoxedEndpoint))
            .build()
    }

    fn request(method: Method, uri: &str, body: &'static str) -> Request {
        http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Full::new(Bytes::from_static(body.as_bytes())))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_routes_to_endpoint_with_params() {
        let response = server().handle(request(Method::GET, "/items/42", "")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(
            body_json(response).await,
            json!({ "data": { "id": "42", "bytes": 0 } })
        );
    }

    #[tokio::test]
    async fn test_health() {
        let response = server().handle(request(Method::GET, "/health", "")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "status": "ok", "service": "galley", "version": "9.9.9" })
        );
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let response = server().handle(request(Method::GET, "/nope", "")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Path not found: /nope" })
        );
    }

    #[tokio::test]
    async fn test_method_not_allowed_lists_methods() {
        let response = server().handle(request(Method::DELETE, "/items/1", "")).await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[ALLOW], "GET, PUT");
        assert_eq!(
            body_json(response).await,
            json!({ "error": "DELETE not allowed for /items/1" })
        );
    }

    #[tokio::test]
    async fn test_routing_errors_echo_query() {
        let response = server()
            .handle(request(Method::PATCH, "/items/1?x=1", ""))
            .await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "PATCH not allowed for /items/1?x=1" })
        );

        let response = server().handle(request(Method::GET, "/nope?page=2", "")).await;
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Path not found: /nope?page=2" })
        );
    }

    #[tokio::test]
    async fn test_body_over_limit() {
        let response = server()
            .handle(request(Method::PUT, "/items/1", "{\"data\":{\"x\":\"0123456789\"}}"))
            .await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_internal_error_is_masked() {
        let response = server().handle(request(Method::GET, "/broken", "")).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Something went wrong!" })
        );
    }

    #[tokio::test]
    async fn test_reject_still_runs_pipeline() {
        let server = server();
        let response = server
            .reject(
                Method::POST,
                Uri::from_static("/items/1"),
                ApiError::timeout(REQUEST_TIMEOUT_MESSAGE),
            )
            .await;

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[test]
    fn test_durations_follow_config() {
        let server = server();
        assert_eq!(server.request_timeout(), Duration::from_secs(30));
        assert_eq!(server.shutdown_timeout(), Duration::from_secs(30));
        assert_eq!(server.route_count(), 2);
    }
}
