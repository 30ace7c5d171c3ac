//! Build → execute → assert pipeline.
//!
//! [`Pipeline::make_request`] builds a request, applies the builders,
//! hands the request to the executor and returns an [`Assertable`] that runs
//! the assertion stage when invoked.
//!
//! # Example
//!
//! ```ignore
//! let pipeline = Pipeline::new(executor);
//! pipeline
//!     .make_request(&reporter, "GET", "http://localhost/health", [accept("application/json")])
//!     .await
//!     .expect_it([status(200), body_contains("ok")]);
//! ```

mod apply;
mod assertable;

use std::borrow::Borrow;

use http::{Method, Uri};
use httpx_domain::{RequestBuilder, Response, new_request};

pub use apply::{apply_assertions, apply_builders};
pub use assertable::Assertable;

use crate::error::PipelineResult;
use crate::ports::{Executor, Reporter};

/// Orchestrates the three pipeline stages over an [`Executor`].
///
/// The pipeline holds no state besides the executor, so one instance can
/// serve any number of requests.
#[derive(Debug, Clone, Default)]
pub struct Pipeline<E> {
    executor: E,
}

impl<E: Executor> Pipeline<E> {
    /// Creates a pipeline that executes requests with `executor`.
    pub const fn new(executor: E) -> Self {
        Self { executor }
    }

    /// The executor requests are sent through.
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Builds, customises and executes a request.
    ///
    /// Failures before a response exists are not reported here; they are
    /// held by the returned [`Assertable`], which reports them and aborts
    /// the test when invoked.
    pub async fn make_request<'t, R, M, U, I>(
        &self,
        reporter: &'t R,
        method: M,
        uri: U,
        builders: I,
    ) -> Assertable<'t, R>
    where
        R: Reporter + ?Sized,
        M: TryInto<Method>,
        M::Error: Into<http::Error>,
        U: TryInto<Uri>,
        U::Error: Into<http::Error>,
        I: IntoIterator,
        I::Item: Borrow<RequestBuilder>,
    {
        reporter.mark_helper();

        match self.run(method, uri, builders).await {
            Ok(response) => Assertable::ready(reporter, response),
            Err(error) => {
                tracing::warn!(%error, "pipeline stopped before assertions");
                Assertable::poisoned(reporter, error)
            }
        }
    }

    /// Runs the build and execute stages without a reporter.
    ///
    /// # Errors
    ///
    /// Returns the construction, builder or executor failure that stopped
    /// the pipeline.
    pub async fn run<M, U, I>(&self, method: M, uri: U, builders: I) -> PipelineResult<Response>
    where
        M: TryInto<Method>,
        M::Error: Into<http::Error>,
        U: TryInto<Uri>,
        U::Error: Into<http::Error>,
        I: IntoIterator,
        I::Item: Borrow<RequestBuilder>,
    {
        let mut request = new_request(method, uri)?;
        tracing::debug!(method = %request.method(), uri = %request.uri(), "building request");

        apply_builders(&mut request, builders)?;

        tracing::debug!(method = %request.method(), uri = %request.uri(), "executing request");
        let response = self.executor.execute(request).await?;
        tracing::debug!(status = %response.status(), "response received");

        Ok(response)
    }
}
