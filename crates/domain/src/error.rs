//! Domain error types

use thiserror::Error;

/// Boxed error returned by builders and assertions.
///
/// Any error type convertible into this can be returned from a step, so
/// callers are free to use their own error enums, `String`s or `&str`s.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while customising a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The header name is not a valid HTTP header name.
    #[error("invalid header name: {0}")]
    InvalidHeaderName(String),

    /// The header value contains bytes not allowed in a header.
    #[error("invalid value for header '{name}'")]
    InvalidHeaderValue {
        /// Name of the header being set.
        name: String,
    },

    /// The rewritten URI could not be parsed.
    #[error("invalid URI: {0}")]
    InvalidUri(String),

    /// A body or query value could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors produced by a failed check against a response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssertionError {
    /// The status code did not meet the expectation.
    #[error("expected status {expected}, got {actual}")]
    StatusMismatch {
        /// Human readable description of the expectation.
        expected: String,
        /// Actual status code.
        actual: u16,
    },

    /// A required header is absent.
    #[error("header '{0}' not found")]
    MissingHeader(String),

    /// A header is present but has an unexpected value.
    #[error("header '{name}' value mismatch: expected '{expected}', got '{actual}'")]
    HeaderMismatch {
        /// Header name.
        name: String,
        /// Expected value.
        expected: String,
        /// Actual value.
        actual: String,
    },

    /// A value did not match a regular expression.
    #[error("{subject} does not match pattern '{pattern}'")]
    PatternMismatch {
        /// What was matched (e.g. "body" or "header 'x-id'").
        subject: String,
        /// The pattern.
        pattern: String,
    },

    /// The regular expression itself could not be compiled.
    #[error("invalid regex pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The pattern.
        pattern: String,
        /// Compiler message.
        message: String,
    },

    /// The body does not equal the expected content.
    #[error("body mismatch: expected '{expected}', got '{actual}'")]
    BodyMismatch {
        /// Expected body.
        expected: String,
        /// Preview of the actual body.
        actual: String,
    },

    /// The body does not contain the expected text.
    #[error("body does not contain '{0}'")]
    BodyMissingText(String),

    /// The body was expected to be empty.
    #[error("expected empty body, got {0} bytes")]
    BodyNotEmpty(usize),

    /// The body is not valid UTF-8.
    #[error("body is not valid UTF-8")]
    NotUtf8,

    /// The body is not valid JSON.
    #[error("body is not valid JSON: {0}")]
    InvalidJson(String),

    /// The JSON path expression is malformed.
    #[error("invalid JSON path '{path}': {message}")]
    InvalidJsonPath {
        /// The path expression.
        path: String,
        /// What is wrong with it.
        message: String,
    },

    /// The JSON path resolved to nothing.
    #[error("JSON path '{0}' not found")]
    JsonPathNotFound(String),

    /// The JSON value differs from the expected one.
    #[error("JSON value at '{path}' mismatch: expected {expected}, got {actual}")]
    JsonMismatch {
        /// The path that was compared (`$` for the whole document).
        path: String,
        /// Expected JSON, serialized.
        expected: String,
        /// Actual JSON, serialized.
        actual: String,
    },

    /// The Content-Type does not match.
    #[error("content type mismatch: expected '{expected}', got '{actual}'")]
    ContentTypeMismatch {
        /// Expected media type.
        expected: String,
        /// Actual header value.
        actual: String,
    },
}

/// Result type alias for reference builders.
pub type BuildResult = Result<(), BuildError>;

/// Result type alias for reference assertions.
pub type AssertionResult = Result<(), AssertionError>;
