use bytes::Bytes;
use httpx_domain::{Assertion, AssertionError, Response};

use super::{body_text, compile, preview};

/// Expects the body to equal `expected` byte for byte.
pub fn body_equals(expected: impl Into<Bytes>) -> Assertion {
    let expected = expected.into();
    Assertion::named("body_equals", move |response: &Response| {
        if response.body() == &expected {
            Ok(())
        } else {
            Err(AssertionError::BodyMismatch {
                expected: preview(&String::from_utf8_lossy(&expected)),
                actual: preview(&String::from_utf8_lossy(response.body())),
            })
        }
    })
}

/// Expects the body to contain `text`.
pub fn body_contains(text: impl Into<String>) -> Assertion {
    let text = text.into();
    Assertion::named(format!("body_contains({text})"), move |response: &Response| {
        if body_text(response)?.contains(text.as_str()) {
            Ok(())
        } else {
            Err(AssertionError::BodyMissingText(text.clone()))
        }
    })
}

/// Expects the body to match the regular expression `pattern`.
pub fn body_matches(pattern: &str) -> Assertion {
    let regex = compile(pattern);
    Assertion::named(format!("body_matches({pattern})"), move |response: &Response| {
        let regex = regex.as_ref().map_err(Clone::clone)?;
        let body = body_text(response)?;
        if regex.is_match(body) {
            Ok(())
        } else {
            Err(AssertionError::PatternMismatch {
                subject: format!("body '{}'", preview(body)),
                pattern: regex.as_str().to_string(),
            })
        }
    })
}

/// Expects an empty body.
pub fn body_empty() -> Assertion {
    Assertion::named("body_empty", |response: &Response| {
        if response.body().is_empty() {
            Ok(())
        } else {
            Err(AssertionError::BodyNotEmpty(response.body().len()))
        }
    })
}
