//! Ordered middleware pipeline.

use crate::context::MiddlewareContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::types::{Request, Response};
use std::sync::Arc;

/// A type-erased middleware stage.
pub type BoxedMiddleware = Arc<dyn Middleware>;

/// Middleware stages wrapped around a terminal handler.
///
/// Stages run in the order they were added on the way in, and in reverse on
/// the way out.
///
/// # Example
///
/// ```
/// use galley_middleware::stages::{AccessLogMiddleware, RequestIdMiddleware};
/// use galley_middleware::Pipeline;
///
/// let pipeline = Pipeline::builder()
///     .add_stage(RequestIdMiddleware::new())
///     .add_stage(AccessLogMiddleware::new())
///     .build();
///
/// assert_eq!(pipeline.stage_names(), vec!["request_id", "access_log"]);
/// ```
#[derive(Clone, Default)]
pub struct Pipeline {
    stages: Vec<BoxedMiddleware>,
}

impl Pipeline {
    /// Creates a new pipeline builder.
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Runs `request` through every stage and then `handler`.
    pub async fn process<H>(
        &self,
        mut ctx: MiddlewareContext,
        request: Request,
        handler: H,
    ) -> Response
    where
        H: FnOnce(&mut MiddlewareContext, Request) -> BoxFuture<'static, Response> + Send + 'static,
    {
        let next = self.build_chain(handler);
        next.run(&mut ctx, request).await
    }

    fn build_chain<'a, H>(&'a self, handler: H) -> Next<'a>
    where
        H: FnOnce(&mut MiddlewareContext, Request) -> BoxFuture<'static, Response> + Send + 'a,
    {
        self.stages
            .iter()
            .rev()
            .fold(Next::handler(handler), |next, stage| {
                Next::new(stage.as_ref(), next)
            })
    }

    /// Returns stage names in execution order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    stages: Vec<BoxedMiddleware>,
}

impl PipelineBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage.
    #[must_use]
    pub fn add_stage<M: Middleware>(mut self, middleware: M) -> Self {
        self.stages.push(Arc::new(middleware));
        self
    }

    /// Builds the pipeline.
    #[must_use]
    pub fn build(self) -> Pipeline {
        Pipeline {
            stages: self.stages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::StatusCode;
    use http_body_util::Full;
    use std::sync::Mutex;

    struct Record {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Middleware for Record {
        fn name(&self) -> &'static str {
            self.name
        }

        fn process<'a>(
            &'a self,
            ctx: &'a mut MiddlewareContext,
            request: Request,
            next: Next<'a>,
        ) -> BoxFuture<'a, Response> {
            Box::pin(async move {
                self.log.lock().unwrap().push(format!("enter {}", self.name));
                let response = next.run(ctx, request).await;
                self.log.lock().unwrap().push(format!("leave {}", self.name));
                response
            })
        }
    }

    fn request() -> Request {
        http::Request::builder()
            .uri("/orders")
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    fn respond(status: StatusCode) -> BoxFuture<'static, Response> {
        Box::pin(async move {
            let mut response = Response::new(Full::new(Bytes::new()));
            *response.status_mut() = status;
            response
        })
    }

    #[tokio::test]
    async fn test_pipeline_executes_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::builder()
            .add_stage(Record {
                name: "first",
                log: Arc::clone(&log),
            })
            .add_stage(Record {
                name: "second",
                log: Arc::clone(&log),
            })
            .build();

        let handler_log = Arc::clone(&log);
        let response = pipeline
            .process(MiddlewareContext::new(), request(), move |_ctx, _req| {
                handler_log.lock().unwrap().push("handler".to_string());
                respond(StatusCode::OK)
            })
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["enter first", "enter second", "handler", "leave second", "leave first"]
        );
    }

    #[tokio::test]
    async fn test_empty_pipeline_calls_handler() {
        let pipeline = Pipeline::builder().build();
        assert_eq!(pipeline.stage_count(), 0);

        let response = pipeline
            .process(MiddlewareContext::new(), request(), |_ctx, _req| {
                respond(StatusCode::ACCEPTED)
            })
            .await;
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_handler_sees_context_updates() {
        let pipeline = Pipeline::builder().build();
        let response = pipeline
            .process(MiddlewareContext::new(), request(), |ctx, _req| {
                ctx.set_route("/orders");
                respond(StatusCode::OK)
            })
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
