//! Request and response model
//!
//! The pipeline works on plain `http` types with fully buffered bodies.
//! Every request built by [`new_request`] carries a [`RequestContext`] in its
//! extensions; executors read it to honour cancellation and deadlines.

use std::time::Duration;

use bytes::Bytes;
use http::{Method, Uri};
use tokio_util::sync::CancellationToken;

/// An outbound HTTP call.
pub type Request = http::Request<Bytes>;

/// The result of executing a [`Request`].
pub type Response = http::Response<Bytes>;

/// Cancellation context attached to every request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancellation: CancellationToken,
    timeout: Option<Duration>,
}

impl RequestContext {
    /// A context that is never cancelled and has no deadline.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Sets the deadline applied by executors.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replaces the cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// The token executors race against.
    #[must_use]
    pub const fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// The deadline, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the context attached to `request`, or a background one.
    #[must_use]
    pub fn of(request: &Request) -> Self {
        request
            .extensions()
            .get::<Self>()
            .cloned()
            .unwrap_or_default()
    }

    /// Mutable access to the context attached to `request`, inserting a
    /// background context first if none is present.
    pub fn of_mut(request: &mut Request) -> &mut Self {
        request.extensions_mut().get_or_insert_default::<Self>()
    }
}

/// Creates an empty request bound to a background [`RequestContext`].
///
/// # Errors
///
/// Returns an error if the method or URI is malformed, e.g. a method with a
/// space in it or a URI containing a control character.
pub fn new_request<M, U>(method: M, uri: U) -> Result<Request, http::Error>
where
    M: TryInto<Method>,
    M::Error: Into<http::Error>,
    U: TryInto<Uri>,
    U::Error: Into<http::Error>,
{
    http::Request::builder()
        .method(method)
        .uri(uri)
        .extension(RequestContext::background())
        .body(Bytes::new())
}
