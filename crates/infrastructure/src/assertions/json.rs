//! JSON assertions.
//!
//! Paths use a small subset of JSONPath: `$` for the document root, `.name`
//! for object members and `[n]` for array elements, e.g. `$.items[0].id`.
//! A trailing `[*]` selects the whole array; it cannot be followed by more
//! steps.

use httpx_domain::{Assertion, AssertionError, Response};
use serde::Serialize;
use serde_json::Value;

use super::body_text;

fn parse_body(response: &Response) -> Result<Value, AssertionError> {
    serde_json::from_str(body_text(response)?).map_err(|e| AssertionError::InvalidJson(e.to_string()))
}

fn expected_value<T: Serialize + ?Sized>(expected: &T) -> Result<Value, AssertionError> {
    serde_json::to_value(expected)
        .map_err(|e| AssertionError::InvalidJson(format!("expected value: {e}")))
}

/// Expects the body to be valid JSON.
pub fn is_json() -> Assertion {
    Assertion::named("is_json", |response: &Response| parse_body(response).map(|_| ()))
}

/// Expects the whole body to equal `expected` as JSON.
///
/// Comparison is structural, so key order and whitespace do not matter.
pub fn json_equals<T: Serialize + ?Sized>(expected: &T) -> Assertion {
    let expected = expected_value(expected);
    Assertion::named("json_equals", move |response: &Response| {
        let expected = expected.as_ref().map_err(Clone::clone)?;
        let actual = parse_body(response)?;
        if &actual == expected {
            Ok(())
        } else {
            Err(AssertionError::JsonMismatch {
                path: "$".to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            })
        }
    })
}

/// Expects the value at `path` to equal `expected`.
pub fn json_path<T: Serialize + ?Sized>(path: impl Into<String>, expected: &T) -> Assertion {
    let path = path.into();
    let expected = expected_value(expected);
    Assertion::named(format!("json_path({path})"), move |response: &Response| {
        let expected = expected.as_ref().map_err(Clone::clone)?;
        let document = parse_body(response)?;
        let actual = lookup(&document, &path)?;
        if actual == expected {
            Ok(())
        } else {
            Err(AssertionError::JsonMismatch {
                path: path.clone(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            })
        }
    })
}

/// Expects `path` to resolve to some value, `null` included.
pub fn json_path_exists(path: impl Into<String>) -> Assertion {
    let path = path.into();
    Assertion::named(format!("json_path_exists({path})"), move |response: &Response| {
        let document = parse_body(response)?;
        lookup(&document, &path).map(|_| ())
    })
}

fn lookup<'v>(document: &'v Value, path: &str) -> Result<&'v Value, AssertionError> {
    query_json_path(document, path)
        .map_err(|message| AssertionError::InvalidJsonPath {
            path: path.to_string(),
            message,
        })?
        .ok_or_else(|| AssertionError::JsonPathNotFound(path.to_string()))
}

/// Resolves `path` against `json`.
///
/// Returns `Ok(None)` when a member or element along the path is missing and
/// `Err` when the path itself is malformed.
fn query_json_path<'v>(json: &'v Value, path: &str) -> Result<Option<&'v Value>, String> {
    let mut current = json;
    for step in tokenize(path)? {
        let next = match step {
            Step::Member(name) => current.get(name),
            Step::At(position) => current.get(position),
            Step::All => current.is_array().then_some(current),
        };
        match next {
            Some(value) => current = value,
            None => return Ok(None),
        }
    }
    Ok(Some(current))
}

#[derive(Debug, PartialEq, Eq)]
enum Step<'p> {
    Member(&'p str),
    At(usize),
    All,
}

/// Parses `$.items[0].id` into `[Member("items"), At(0), Member("id")]`.
fn tokenize(path: &str) -> Result<Vec<Step<'_>>, String> {
    let Some(mut rest) = path.trim().strip_prefix('$') else {
        return Err("JSON path must start with '$'".to_string());
    };

    let mut steps = Vec::new();
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('.') {
            let end = after.find(['.', '[']).unwrap_or(after.len());
            if end == 0 {
                return Err(format!("empty member name in '{path}'"));
            }
            steps.push(Step::Member(&after[..end]));
            rest = &after[end..];
        } else if let Some(after) = rest.strip_prefix('[') {
            let Some(end) = after.find(']') else {
                return Err(format!("unclosed bracket in '{path}'"));
            };
            let index = &after[..end];
            steps.push(if index == "*" {
                Step::All
            } else {
                Step::At(
                    index
                        .parse()
                        .map_err(|_| format!("invalid array index: {index}"))?,
                )
            });
            rest = &after[end + 1..];
        } else {
            return Err(format!("unexpected '{rest}' in '{path}'"));
        }
    }

    if let Some(position) = steps.iter().position(|step| *step == Step::All)
        && position + 1 != steps.len()
    {
        return Err("wildcard must be the last path element".to_string());
    }

    Ok(steps)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn json_response(body: &'static str) -> Response {
        Response::new(Bytes::from_static(body.as_bytes()))
    }

    #[test]
    fn test_query_json_path() {
        let document = json!({
            "user": { "name": "ada", "roles": ["admin", "dev"] },
            "grid": [[1, 2], [3, 4]]
        });

        assert_eq!(query_json_path(&document, "$").unwrap(), Some(&document));
        assert_eq!(
            query_json_path(&document, "$.user.name").unwrap(),
            Some(&json!("ada"))
        );
        assert_eq!(
            query_json_path(&document, "$.user.roles[1]").unwrap(),
            Some(&json!("dev"))
        );
        assert_eq!(
            query_json_path(&document, "$.grid[1][0]").unwrap(),
            Some(&json!(3))
        );
        assert_eq!(
            query_json_path(&document, "$.user.roles[*]").unwrap(),
            Some(&json!(["admin", "dev"]))
        );
        assert_eq!(query_json_path(&document, "$.user.email").unwrap(), None);
        assert_eq!(query_json_path(&document, "$.user.roles[5]").unwrap(), None);
    }

    #[test]
    fn test_malformed_paths() {
        let document = json!({ "items": [] });

        assert!(query_json_path(&document, "items").is_err());
        assert!(query_json_path(&document, "$.items[x]").is_err());
        assert!(query_json_path(&document, "$.items[0").is_err());
        assert!(query_json_path(&document, "$..items").is_err());
    }

    #[test]
    fn test_wildcard_must_end_the_path() {
        let response = json_response(r#"{"items":[{"id":1},{"id":2}]}"#);

        let error = json_path_exists("$.items[*].does_not_exist")
            .check(&response)
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid JSON path '$.items[*].does_not_exist': wildcard must be the last path element"
        );

        let error = json_path("$.items[*].id", &json!([1, 2]))
            .check(&response)
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid JSON path '$.items[*].id': wildcard must be the last path element"
        );

        assert!(json_path("$.items[*]", &json!([{"id": 1}, {"id": 2}]))
            .check(&response)
            .is_ok());
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("$.grid[1][*]").unwrap(),
            vec![Step::Member("grid"), Step::At(1), Step::All]
        );
        assert_eq!(tokenize(" $ ").unwrap(), Vec::new());
    }

    #[test]
    fn test_is_json() {
        assert!(is_json().check(&json_response(r#"{"ok":true}"#)).is_ok());

        let error = is_json().check(&json_response("<html>")).unwrap_err();
        assert!(error.to_string().starts_with("body is not valid JSON:"));
    }

    #[test]
    fn test_json_equals_ignores_formatting() {
        let response = json_response(r#"{ "b": 2, "a": 1 }"#);

        assert!(json_equals(&json!({"a": 1, "b": 2})).check(&response).is_ok());
        let error = json_equals(&json!({"a": 1})).check(&response).unwrap_err();
        assert_eq!(
            error.to_string(),
            r#"JSON value at '$' mismatch: expected {"a":1}, got {"a":1,"b":2}"#
        );
    }

    #[test]
    fn test_json_path_assertion() {
        let response = json_response(r#"{"items":[{"id":7,"tags":null}]}"#);

        assert!(json_path("$.items[0].id", &7).check(&response).is_ok());
        assert!(json_path_exists("$.items[0].tags").check(&response).is_ok());

        let error = json_path("$.items[0].id", &8).check(&response).unwrap_err();
        assert_eq!(
            error.to_string(),
            "JSON value at '$.items[0].id' mismatch: expected 8, got 7"
        );

        let error = json_path_exists("$.items[1]").check(&response).unwrap_err();
        assert_eq!(error.to_string(), "JSON path '$.items[1]' not found");
    }

    #[test]
    fn test_json_path_name() {
        assert_eq!(json_path("$.id", &1).name(), "json_path($.id)");
    }
}
