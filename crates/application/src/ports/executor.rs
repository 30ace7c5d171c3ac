//! Executor port

use std::fmt;
use std::future::Future;

use httpx_domain::{Request, Response};
use thiserror::Error;

/// Errors an executor can report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecuteError {
    /// The request cannot be carried out as built (e.g. relative URI for a
    /// live call).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request deadline elapsed.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The deadline in milliseconds.
        timeout_ms: u64,
    },

    /// The request's cancellation token fired.
    #[error("request cancelled")]
    Cancelled,

    /// Host name resolution failed.
    #[error("DNS resolution failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// Nothing is listening on the target.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// Any other connection failure.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect limit was hit.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Configured limit.
        max: usize,
    },

    /// An in-process handler returned an error.
    #[error("handler error: {0}")]
    Handler(String),

    /// An in-process handler panicked.
    #[error("handler panicked: {0}")]
    HandlerPanicked(String),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

/// Port for turning a request into a response.
///
/// This is the single extension point for how a request is carried out:
/// over the network, against an in-memory handler, or through a mock.
pub trait Executor: Send + Sync {
    /// Executes `request` and returns the buffered response.
    ///
    /// Implementations should honour the request's
    /// [`RequestContext`](httpx_domain::RequestContext).
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be produced.
    fn execute(&self, request: Request)
    -> impl Future<Output = Result<Response, ExecuteError>> + Send;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, ExecuteError>> + Send {
        (**self).execute(request)
    }
}

/// An [`Executor`] backed by an async function.
///
/// Created with [`exec_fn`].
#[derive(Clone, Copy)]
pub struct ExecFn<F> {
    f: F,
}

/// Adapts an async function into an [`Executor`].
///
/// ```ignore
/// let executor = exec_fn(|request: Request| async move {
///     Ok(Response::new(request.into_body()))
/// });
/// ```
pub const fn exec_fn<F, Fut>(f: F) -> ExecFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response, ExecuteError>> + Send,
{
    ExecFn { f }
}

impl<F, Fut> Executor for ExecFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response, ExecuteError>> + Send,
{
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, ExecuteError>> + Send {
        (self.f)(request)
    }
}

impl<F> fmt::Debug for ExecFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecFn").finish_non_exhaustive()
    }
}
