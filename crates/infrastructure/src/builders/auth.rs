use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::header::{AUTHORIZATION, HeaderValue};
use httpx_domain::{BuildError, Request, RequestBuilder};

/// Sets HTTP Basic credentials.
pub fn basic_auth(username: impl Into<String>, password: impl Into<String>) -> RequestBuilder {
    let credentials = format!("{}:{}", username.into(), password.into());
    let value = format!("Basic {}", STANDARD.encode(credentials.as_bytes()));
    RequestBuilder::named("basic_auth", move |request: &mut Request| {
        set_authorization(request, &value)
    })
}

/// Sets a bearer token.
pub fn bearer_auth(token: impl Into<String>) -> RequestBuilder {
    let value = format!("Bearer {}", token.into());
    RequestBuilder::named("bearer_auth", move |request: &mut Request| {
        set_authorization(request, &value)
    })
}

fn set_authorization(request: &mut Request, value: &str) -> Result<(), BuildError> {
    let mut value = HeaderValue::from_str(value).map_err(|_| BuildError::InvalidHeaderValue {
        name: AUTHORIZATION.to_string(),
    })?;
    value.set_sensitive(true);
    request.headers_mut().insert(AUTHORIZATION, value);
    Ok(())
}
