//! httpx - fluent HTTP endpoint testing
//!
//! A test builds a request, customises it with [`RequestBuilder`]s, executes
//! it through an [`Executor`] and checks the response with [`Assertion`]s:
//!
//! ```ignore
//! use httpx::prelude::*;
//!
//! #[tokio::test]
//! async fn creates_user() {
//!     let t = TestReporter::named("creates_user");
//!     let pipeline = httpx::live().unwrap();
//!
//!     pipeline
//!         .make_request(&t, "POST", "http://localhost:8080/users", [
//!             json_body(&serde_json::json!({ "name": "ada" })),
//!             bearer_auth("token"),
//!         ])
//!         .await
//!         .expect_it([status(201), json_path("$.name", "ada")]);
//! }
//! ```
//!
//! Failures before a response exists (a malformed URL, a failing builder, a
//! transport error) are reported once when the [`Assertable`] is invoked,
//! and the test is aborted. Assertion failures are reported one by one and
//! the test carries on.

pub use httpx_application::{
    Assertable, AssertionFailure, ExecFn, ExecuteError, Executor, Pipeline, PipelineError,
    PipelineResult, Reporter, apply_assertions, apply_builders, exec_fn,
};
pub use httpx_domain::{
    Assertion, AssertionError, BoxError, BuildError, CancellationToken, Request, RequestBuilder,
    RequestContext, Response, StatusExpectation, function_name, name_of, new_request,
};
pub use httpx_infrastructure::{
    ConfigError, ExecutorConfig, HandlerExecutor, RecordingReporter, ReqwestExecutor,
    TestReporter, assertions, builders, init_test_logging,
};

use axum::body::Body;

/// A pipeline that sends requests over the network.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created.
pub fn live() -> Result<Pipeline<ReqwestExecutor>, ExecuteError> {
    ReqwestExecutor::new().map(Pipeline::new)
}

/// A live pipeline configured from `config`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created.
pub fn live_with(config: &ExecutorConfig) -> Result<Pipeline<ReqwestExecutor>, ExecuteError> {
    ReqwestExecutor::from_config(config).map(Pipeline::new)
}

/// A pipeline that calls `service` in memory, typically an `axum::Router`.
///
/// Request URIs only need a path, e.g. `"/users/1"`.
pub fn in_process<S>(service: S) -> Pipeline<HandlerExecutor<S>>
where
    S: tower::Service<axum::http::Request<Body>, Response = axum::http::Response<Body>>
        + Clone
        + Send
        + Sync,
    S::Future: Send,
    S::Error: Into<BoxError>,
{
    Pipeline::new(HandlerExecutor::new(service))
}

/// Everything a test usually needs.
///
/// `content_type` here is the assertion; the builder of the same name is
/// reachable as `builders::content_type`.
pub mod prelude {
    pub use crate::assertions::{
        body_contains, body_empty, body_equals, body_matches, content_type, header_equals,
        header_exists, header_matches, is_json, json_equals, json_path, json_path_exists, status,
        status_in, status_success,
    };
    pub use crate::builders::{
        accept, basic_auth, bearer_auth, bytes_body, cancel_with, form_body, header, json_body,
        query, text_body, timeout, user_agent,
    };
    pub use crate::{
        Assertion, Executor, Pipeline, RecordingReporter, Reporter, Request, RequestBuilder,
        Response, StatusExpectation, TestReporter,
    };
}
