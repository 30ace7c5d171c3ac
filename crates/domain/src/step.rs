//! Named pipeline steps.
//!
//! A [`RequestBuilder`] customises a request before it is executed and an
//! [`Assertion`] checks a property of the response afterwards. Both carry a
//! label used in failure messages; see [`crate::naming`] for how default
//! labels are derived.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::BoxError;
use crate::exchange::{Request, Response};
use crate::naming::function_name;

type BuilderFn = dyn Fn(&mut Request) -> Result<(), BoxError> + Send + Sync;
type AssertionFn = dyn Fn(&Response) -> Result<(), BoxError> + Send + Sync;

/// A named function that customises a request.
#[derive(Clone)]
pub struct RequestBuilder {
    name: Cow<'static, str>,
    apply: Arc<BuilderFn>,
}

impl RequestBuilder {
    /// Wraps `builder`, naming it after its function type.
    pub fn new<F, E>(builder: F) -> Self
    where
        F: Fn(&mut Request) -> Result<(), E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::named(function_name::<F>(), builder)
    }

    /// Wraps `builder` under an explicit name.
    pub fn named<F, E>(name: impl Into<Cow<'static, str>>, builder: F) -> Self
    where
        F: Fn(&mut Request) -> Result<(), E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self {
            name: name.into(),
            apply: Arc::new(move |request: &mut Request| -> Result<(), BoxError> {
                builder(request).map_err(Into::into)
            }),
        }
    }

    /// The diagnostic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the builder to `request`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the wrapped function produced.
    pub fn apply(&self, request: &mut Request) -> Result<(), BoxError> {
        (self.apply)(request)
    }
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RequestBuilder").field(&self.name).finish()
    }
}

impl fmt::Display for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A named function that checks a response.
#[derive(Clone)]
pub struct Assertion {
    name: Cow<'static, str>,
    check: Arc<AssertionFn>,
}

impl Assertion {
    /// Wraps `check`, naming it after its function type.
    pub fn new<F, E>(check: F) -> Self
    where
        F: Fn(&Response) -> Result<(), E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self::named(function_name::<F>(), check)
    }

    /// Wraps `check` under an explicit name.
    pub fn named<F, E>(name: impl Into<Cow<'static, str>>, check: F) -> Self
    where
        F: Fn(&Response) -> Result<(), E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Self {
            name: name.into(),
            check: Arc::new(move |response: &Response| -> Result<(), BoxError> {
                check(response).map_err(Into::into)
            }),
        }
    }

    /// The diagnostic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the check against `response`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the wrapped function produced.
    pub fn check(&self, response: &Response) -> Result<(), BoxError> {
        (self.check)(response)
    }
}

impl fmt::Debug for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Assertion").field(&self.name).finish()
    }
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::exchange::new_request;
    use bytes::Bytes;
    use http::HeaderValue;
    use pretty_assertions::assert_eq;

    fn add_trace_header(request: &mut Request) -> Result<(), BoxError> {
        request
            .headers_mut()
            .insert("x-trace", HeaderValue::from_static("abc"));
        Ok(())
    }

    fn reject_everything(_response: &Response) -> Result<(), &'static str> {
        Err("rejected")
    }

    #[test]
    fn test_builder_named_after_function() {
        let builder = RequestBuilder::new(add_trace_header);
        assert!(builder.name().ends_with("add_trace_header"));
        assert_eq!(builder.to_string(), builder.name());
    }

    #[test]
    fn test_builder_applies_mutation() {
        let mut request = new_request("GET", "/").unwrap();
        RequestBuilder::new(add_trace_header)
            .apply(&mut request)
            .unwrap();
        assert_eq!(request.headers()["x-trace"], "abc");
    }

    #[test]
    fn test_explicit_name_wins() {
        let builder = RequestBuilder::named("with trace", add_trace_header);
        assert_eq!(builder.name(), "with trace");
        assert_eq!(format!("{builder:?}"), r#"RequestBuilder("with trace")"#);
    }

    #[test]
    fn test_assertion_error_is_boxed() {
        let assertion = Assertion::new(reject_everything);
        let response = Response::new(Bytes::new());
        let error = assertion.check(&response).unwrap_err();
        assert_eq!(error.to_string(), "rejected");
        assert!(assertion.name().ends_with("reject_everything"));
    }

    #[test]
    fn test_clones_share_function() {
        let assertion = Assertion::named("always ok", |_: &Response| Ok::<(), BoxError>(()));
        let copy = assertion.clone();
        assert_eq!(copy.name(), "always ok");
        assert!(copy.check(&Response::new(Bytes::new())).is_ok());
    }
}
