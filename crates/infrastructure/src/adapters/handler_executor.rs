//! In-process executor.
//!
//! Calls a `tower::Service` (typically an `axum::Router`) directly, without
//! opening a socket. Useful for fast, deterministic tests of handler logic.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use axum::body::Body;
use futures::FutureExt;
use httpx_application::ports::{ExecuteError, Executor};
use httpx_domain::{BoxError, Request, RequestContext, Response};
use tower::{Service, ServiceExt};

use crate::config::{DEFAULT_BODY_LIMIT, ExecutorConfig};

/// Executor that hands requests to an in-memory service.
#[derive(Debug, Clone)]
pub struct HandlerExecutor<S> {
    service: S,
    body_limit: usize,
    default_timeout: Option<Duration>,
}

impl<S> HandlerExecutor<S> {
    /// Wraps `service` with the default body limit and no deadline.
    pub const fn new(service: S) -> Self {
        Self {
            service,
            body_limit: DEFAULT_BODY_LIMIT,
            default_timeout: None,
        }
    }

    /// Applies the body limit and default deadline from `config`.
    #[must_use]
    pub fn with_config(mut self, config: &ExecutorConfig) -> Self {
        self.body_limit = config.body_limit;
        self.default_timeout = config.timeout();
        self
    }

    /// Sets the largest response body that will be buffered.
    #[must_use]
    pub const fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    /// The wrapped service.
    pub const fn service(&self) -> &S {
        &self.service
    }
}

impl<S> HandlerExecutor<S>
where
    S: Service<http::Request<Body>, Response = http::Response<Body>> + Send,
    S::Future: Send,
    S::Error: Into<BoxError>,
{
    async fn call(
        service: S,
        request: http::Request<Body>,
        body_limit: usize,
    ) -> Result<Response, ExecuteError> {
        let response = AssertUnwindSafe(service.oneshot(request))
            .catch_unwind()
            .await
            .map_err(|payload| ExecuteError::HandlerPanicked(panic_message(payload.as_ref())))?
            .map_err(|e| ExecuteError::Handler(Into::<BoxError>::into(e).to_string()))?;

        let (parts, body) = response.into_parts();
        let body = axum::body::to_bytes(body, body_limit)
            .await
            .map_err(|e| ExecuteError::Body(e.to_string()))?;

        Ok(Response::from_parts(parts, body))
    }
}

impl<S> Executor for HandlerExecutor<S>
where
    S: Service<http::Request<Body>, Response = http::Response<Body>> + Clone + Send + Sync,
    S::Future: Send,
    S::Error: Into<BoxError>,
{
    async fn execute(&self, request: Request) -> Result<Response, ExecuteError> {
        let context = RequestContext::of(&request);
        let timeout = context.timeout().or(self.default_timeout);

        tracing::debug!(
            method = %request.method(),
            uri = %request.uri(),
            "calling in-process handler"
        );

        let call = Self::call(self.service.clone(), request.map(Body::from), self.body_limit);
        let call = async move {
            match timeout {
                Some(limit) => tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
                    Err(ExecuteError::Timeout {
                        timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                    })
                }),
                None => call.await,
            }
        };

        tokio::select! {
            biased;
            () = context.cancellation().cancelled() => Err(ExecuteError::Cancelled),
            result = call => result,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}
