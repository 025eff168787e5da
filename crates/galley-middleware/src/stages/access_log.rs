//! Access log stage.

use crate::context::MiddlewareContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::types::{Request, Response};

/// Logs one line per completed request.
///
/// Server errors log at `error`, client errors at `warn`, everything else at
/// `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessLogMiddleware;

impl AccessLogMiddleware {
    /// Creates the stage.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Middleware for AccessLogMiddleware {
    fn name(&self) -> &'static str {
        "access_log"
    }

    fn process<'a>(
        &'a self,
        ctx: &'a mut MiddlewareContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            let method = request.method().clone();
            let path = request.uri().path().to_string();

            let response = next.run(ctx, request).await;

            let status = response.status();
            let request_id = ctx.request_id().to_string();
            let route = ctx.route().unwrap_or("-");
            let duration_ms = u64::try_from(ctx.elapsed().as_millis()).unwrap_or(u64::MAX);

            if status.is_server_error() {
                tracing::error!(
                    request_id = %request_id,
                    http.method = %method,
                    http.path = %path,
                    route,
                    http.status_code = status.as_u16(),
                    duration_ms,
                    "request failed"
                );
            } else if status.is_client_error() {
                tracing::warn!(
                    request_id = %request_id,
                    http.method = %method,
                    http.path = %path,
                    route,
                    http.status_code = status.as_u16(),
                    duration_ms,
                    "request rejected"
                );
            } else {
                tracing::info!(
                    request_id = %request_id,
                    http.method = %method,
                    http.path = %path,
                    route,
                    http.status_code = status.as_u16(),
                    duration_ms,
                    "request completed"
                );
            }

            response
        })
    }
}
