//! Body builders.
//!
//! Serialization happens when the builder is created; a value that cannot
//! be serialized yields a builder that fails when applied.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderValue};
use httpx_domain::{BuildError, Request, RequestBuilder};
use serde::Serialize;

/// Sets the body and a `Content-Type` unless one is already present.
fn set_body(request: &mut Request, body: Bytes, default_type: &'static str) {
    *request.body_mut() = body;
    request
        .headers_mut()
        .entry(CONTENT_TYPE)
        .or_insert(HeaderValue::from_static(default_type));
}

/// Sets a UTF-8 text body.
pub fn text_body(text: impl Into<String>) -> RequestBuilder {
    let body = Bytes::from(text.into());
    RequestBuilder::named("text_body", move |request: &mut Request| {
        set_body(request, body.clone(), "text/plain; charset=utf-8");
        Ok::<_, BuildError>(())
    })
}

/// Sets a raw body.
pub fn bytes_body(bytes: impl Into<Bytes>) -> RequestBuilder {
    let body = bytes.into();
    RequestBuilder::named("bytes_body", move |request: &mut Request| {
        set_body(request, body.clone(), "application/octet-stream");
        Ok::<_, BuildError>(())
    })
}

/// Serializes `value` as the JSON body.
pub fn json_body<T: Serialize + ?Sized>(value: &T) -> RequestBuilder {
    let encoded = serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(|e| BuildError::Serialization(e.to_string()));
    RequestBuilder::named("json_body", move |request: &mut Request| {
        let body = encoded.clone()?;
        set_body(request, body, "application/json");
        Ok::<_, BuildError>(())
    })
}

/// Serializes `value` as an `application/x-www-form-urlencoded` body.
pub fn form_body<T: Serialize + ?Sized>(value: &T) -> RequestBuilder {
    let encoded = serde_urlencoded::to_string(value)
        .map(Bytes::from)
        .map_err(|e| BuildError::Serialization(e.to_string()));
    RequestBuilder::named("form_body", move |request: &mut Request| {
        let body = encoded.clone()?;
        set_body(request, body, "application/x-www-form-urlencoded");
        Ok::<_, BuildError>(())
    })
}
