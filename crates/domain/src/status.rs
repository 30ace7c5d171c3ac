//! Status code expectations.

use std::fmt;

use http::StatusCode;

/// An expectation on a response status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// Range of status codes, both ends inclusive.
    Range {
        /// Lowest accepted code.
        min: u16,
        /// Highest accepted code.
        max: u16,
    },
    /// Any of the listed codes.
    OneOf(Vec<u16>),
}

impl StatusExpectation {
    /// Check if a status code matches this expectation.
    #[must_use]
    pub fn matches(&self, status: StatusCode) -> bool {
        let status = status.as_u16();
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { min, max } => (*min..=*max).contains(&status),
            Self::OneOf(codes) => codes.contains(&status),
        }
    }

    /// Any 2xx status.
    #[must_use]
    pub const fn success() -> Self {
        Self::Range { min: 200, max: 299 }
    }

    /// Exactly `code`.
    #[must_use]
    pub const fn exact(code: u16) -> Self {
        Self::Exact(code)
    }
}

impl Default for StatusExpectation {
    fn default() -> Self {
        Self::success()
    }
}

impl From<StatusCode> for StatusExpectation {
    fn from(status: StatusCode) -> Self {
        Self::Exact(status.as_u16())
    }
}

impl From<u16> for StatusExpectation {
    fn from(code: u16) -> Self {
        Self::Exact(code)
    }
}

impl fmt::Display for StatusExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(code) => write!(f, "{code}"),
            Self::Range { min, max } => write!(f, "in {min}-{max}"),
            Self::OneOf(codes) => {
                let codes: Vec<_> = codes.iter().map(ToString::to_string).collect();
                write!(f, "in [{}]", codes.join(", "))
            }
        }
    }
}
