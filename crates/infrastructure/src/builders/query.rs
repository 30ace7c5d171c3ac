use http::Uri;
use http::uri::PathAndQuery;
use httpx_domain::{BuildError, BuildResult, Request, RequestBuilder};
use serde::Serialize;

/// Appends `params` to the request's query string.
///
/// Existing query parameters are kept.
pub fn query<T: Serialize + ?Sized>(params: &T) -> RequestBuilder {
    let encoded =
        serde_urlencoded::to_string(params).map_err(|e| BuildError::Serialization(e.to_string()));
    RequestBuilder::named("query", move |request: &mut Request| {
        let encoded = encoded.clone()?;
        append_query(request, &encoded)
    })
}

fn append_query(request: &mut Request, encoded: &str) -> BuildResult {
    if encoded.is_empty() {
        return Ok(());
    }

    let uri = request.uri();
    let path_and_query = match uri.query() {
        Some(existing) if !existing.is_empty() => {
            format!("{}?{existing}&{encoded}", uri.path())
        }
        _ => format!("{}?{encoded}", uri.path()),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(
        PathAndQuery::try_from(path_and_query.as_str())
            .map_err(|e| BuildError::InvalidUri(e.to_string()))?,
    );
    *request.uri_mut() = Uri::from_parts(parts).map_err(|e| BuildError::InvalidUri(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use httpx_domain::new_request;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_query_on_absolute_uri() {
        let mut request = new_request("GET", "http://localhost:8080/search").unwrap();

        query(&[("q", "rust lang"), ("page", "2")])
            .apply(&mut request)
            .unwrap();

        assert_eq!(
            request.uri(),
            "http://localhost:8080/search?q=rust+lang&page=2"
        );
    }

    #[test]
    fn test_query_keeps_existing_parameters() {
        let mut request = new_request("GET", "/items?sort=asc").unwrap();

        query(&[("limit", 10)]).apply(&mut request).unwrap();

        assert_eq!(request.uri(), "/items?sort=asc&limit=10");
    }

    #[test]
    fn test_empty_query_is_a_no_op() {
        let mut request = new_request("GET", "/items").unwrap();

        query(&Vec::<(String, String)>::new())
            .apply(&mut request)
            .unwrap();

        assert_eq!(request.uri(), "/items");
    }

    #[test]
    fn test_unserializable_query() {
        let mut request = new_request("GET", "/").unwrap();

        // nested sequences have no urlencoded form
        let error = query(&[("a", vec![1, 2])]).apply(&mut request).unwrap_err();

        assert!(error.to_string().starts_with("serialization error:"));
    }
}
