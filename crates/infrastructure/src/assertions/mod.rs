//! Reference assertions.
//!
//! Each function returns a named [`Assertion`](httpx_domain::Assertion) whose
//! failures are [`AssertionError`](httpx_domain::AssertionError)s. Patterns
//! and expected JSON are prepared when the assertion is created.

mod body;
mod headers;
mod json;
mod status;

pub use body::{body_contains, body_empty, body_equals, body_matches};
pub use headers::{content_type, header_equals, header_exists, header_matches};
pub use json::{is_json, json_equals, json_path, json_path_exists};
pub use status::{status, status_in, status_success};

use httpx_domain::{AssertionError, Response};
use regex::Regex;

const PREVIEW_LEN: usize = 100;

/// Shortens `text` for failure messages.
fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_LEN) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

fn body_text(response: &Response) -> Result<&str, AssertionError> {
    std::str::from_utf8(response.body()).map_err(|_| AssertionError::NotUtf8)
}

fn compile(pattern: &str) -> Result<Regex, AssertionError> {
    Regex::new(pattern).map_err(|e| AssertionError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(150);

        let shortened = preview(&long);

        assert_eq!(shortened.chars().count(), PREVIEW_LEN + 3);
        assert!(shortened.ends_with("..."));
        assert_eq!(preview("short"), "short");
    }
}
