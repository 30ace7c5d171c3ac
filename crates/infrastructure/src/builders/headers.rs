use http::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use httpx_domain::{Request, RequestBuilder};

use super::insert_header;

/// Sets header `name` to `value`, replacing earlier values.
pub fn header(name: impl Into<String>, value: impl Into<String>) -> RequestBuilder {
    let name = name.into();
    let value = value.into();
    RequestBuilder::named(format!("header({name})"), move |request: &mut Request| {
        insert_header(request, &name, &value)
    })
}

/// Sets the `User-Agent` header.
pub fn user_agent(value: impl Into<String>) -> RequestBuilder {
    let value = value.into();
    RequestBuilder::named("user_agent", move |request: &mut Request| {
        insert_header(request, USER_AGENT.as_str(), &value)
    })
}

/// Sets the `Accept` header.
pub fn accept(media_type: impl Into<String>) -> RequestBuilder {
    let media_type = media_type.into();
    RequestBuilder::named(format!("accept({media_type})"), move |request: &mut Request| {
        insert_header(request, ACCEPT.as_str(), &media_type)
    })
}

/// Sets the `Content-Type` header.
pub fn content_type(media_type: impl Into<String>) -> RequestBuilder {
    let media_type = media_type.into();
    RequestBuilder::named(
        format!("content_type({media_type})"),
        move |request: &mut Request| insert_header(request, CONTENT_TYPE.as_str(), &media_type),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use httpx_domain::new_request;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_replaces_value() {
        let mut request = new_request("GET", "/").unwrap();

        header("X-Trace", "one").apply(&mut request).unwrap();
        header("x-trace", "two").apply(&mut request).unwrap();

        let values: Vec<_> = request.headers().get_all("x-trace").iter().collect();
        assert_eq!(values, vec!["two"]);
    }

    #[test]
    fn test_header_is_named_after_header() {
        assert_eq!(header("x-request-id", "1").name(), "header(x-request-id)");
        assert_eq!(accept("application/json").name(), "accept(application/json)");
        assert_eq!(user_agent("probe").name(), "user_agent");
    }

    #[test]
    fn test_invalid_header_name() {
        let mut request = new_request("GET", "/").unwrap();

        let error = header("bad header", "v").apply(&mut request).unwrap_err();

        assert_eq!(error.to_string(), "invalid header name: bad header");
    }

    #[test]
    fn test_invalid_header_value() {
        let mut request = new_request("GET", "/").unwrap();

        let error = header("x-note", "line\nbreak").apply(&mut request).unwrap_err();

        assert_eq!(error.to_string(), "invalid value for header 'x-note'");
        assert!(request.headers().get("x-note").is_none());
    }

    #[test]
    fn test_accept_and_content_type() {
        let mut request = new_request("POST", "/").unwrap();

        accept("application/json").apply(&mut request).unwrap();
        content_type("text/csv").apply(&mut request).unwrap();
        user_agent("probe/1.0").apply(&mut request).unwrap();

        assert_eq!(request.headers()["accept"], "application/json");
        assert_eq!(request.headers()["content-type"], "text/csv");
        assert_eq!(request.headers()["user-agent"], "probe/1.0");
    }
}
