use http::header::CONTENT_TYPE;
use httpx_domain::{Assertion, AssertionError, Response};

use super::compile;

fn header_value<'r>(response: &'r Response, name: &str) -> Result<&'r str, AssertionError> {
    let value = response
        .headers()
        .get(name)
        .ok_or_else(|| AssertionError::MissingHeader(name.to_string()))?;
    value.to_str().map_err(|_| AssertionError::HeaderMismatch {
        name: name.to_string(),
        expected: "visible ASCII".to_string(),
        actual: String::from_utf8_lossy(value.as_bytes()).into_owned(),
    })
}

/// Expects header `name` to be present.
pub fn header_exists(name: impl Into<String>) -> Assertion {
    let name = name.into();
    Assertion::named(format!("header_exists({name})"), move |response: &Response| {
        header_value(response, &name).map(|_| ())
    })
}

/// Expects header `name` to equal `expected`.
pub fn header_equals(name: impl Into<String>, expected: impl Into<String>) -> Assertion {
    let name = name.into();
    let expected = expected.into();
    Assertion::named(format!("header_equals({name})"), move |response: &Response| {
        let actual = header_value(response, &name)?;
        if actual == expected {
            Ok(())
        } else {
            Err(AssertionError::HeaderMismatch {
                name: name.clone(),
                expected: expected.clone(),
                actual: actual.to_string(),
            })
        }
    })
}

/// Expects header `name` to match the regular expression `pattern`.
pub fn header_matches(name: impl Into<String>, pattern: &str) -> Assertion {
    let name = name.into();
    let regex = compile(pattern);
    Assertion::named(format!("header_matches({name})"), move |response: &Response| {
        let regex = regex.as_ref().map_err(Clone::clone)?;
        let actual = header_value(response, &name)?;
        if regex.is_match(actual) {
            Ok(())
        } else {
            Err(AssertionError::PatternMismatch {
                subject: format!("header '{name}' value '{actual}'"),
                pattern: regex.as_str().to_string(),
            })
        }
    })
}

/// Expects the `Content-Type` media type to be `expected`.
///
/// Parameters such as `charset` are ignored on both sides, so
/// `content_type("application/json")` accepts
/// `application/json; charset=utf-8`.
pub fn content_type(expected: &str) -> Assertion {
    let wanted = essence(expected);
    Assertion::named(format!("content_type({wanted})"), move |response: &Response| {
        let actual = header_value(response, CONTENT_TYPE.as_str())?;
        if essence(actual) == wanted {
            Ok(())
        } else {
            Err(AssertionError::ContentTypeMismatch {
                expected: wanted.clone(),
                actual: actual.to_string(),
            })
        }
    })
}

fn essence(value: &str) -> String {
    value.parse::<mime::Mime>().map_or_else(
        |_| value.trim().to_ascii_lowercase(),
        |parsed| parsed.essence_str().to_string(),
    )
}
