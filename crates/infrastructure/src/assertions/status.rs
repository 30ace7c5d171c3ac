use httpx_domain::{Assertion, AssertionError, Response, StatusExpectation};

/// Expects the given status, e.g. `status(201)` or `status(StatusCode::OK)`.
pub fn status(expected: impl Into<StatusExpectation>) -> Assertion {
    status_in(expected.into())
}

/// Expects a status matching `expectation`.
pub fn status_in(expectation: StatusExpectation) -> Assertion {
    Assertion::named(format!("status({expectation})"), move |response: &Response| {
        if expectation.matches(response.status()) {
            Ok(())
        } else {
            Err(AssertionError::StatusMismatch {
                expected: expectation.to_string(),
                actual: response.status().as_u16(),
            })
        }
    })
}

/// Expects any 2xx status.
pub fn status_success() -> Assertion {
    let expectation = StatusExpectation::success();
    Assertion::named("status_success", move |response: &Response| {
        if expectation.matches(response.status()) {
            Ok(())
        } else {
            Err(AssertionError::StatusMismatch {
                expected: expectation.to_string(),
                actual: response.status().as_u16(),
            })
        }
    })
}
