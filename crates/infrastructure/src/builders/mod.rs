//! Reference request builders.
//!
//! Every builder returned here carries an explicit name, e.g.
//! `header(x-request-id)` or `json_body`, so failure messages point at the
//! step that broke.

mod auth;
mod body;
mod context;
mod headers;
mod query;

pub use auth::{basic_auth, bearer_auth};
pub use body::{bytes_body, form_body, json_body, text_body};
pub use context::{cancel_with, timeout};
pub use headers::{accept, content_type, header, user_agent};
pub use query::query;

use http::header::{HeaderName, HeaderValue};
use httpx_domain::{BuildError, BuildResult, Request};

/// Replaces any existing value of `name` with `value`.
fn insert_header(request: &mut Request, name: &str, value: &str) -> BuildResult {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| BuildError::InvalidHeaderName(name.to_string()))?;
    let header_value = HeaderValue::from_str(value).map_err(|_| BuildError::InvalidHeaderValue {
        name: name.to_string(),
    })?;
    request.headers_mut().insert(header_name, header_value);
    Ok(())
}
