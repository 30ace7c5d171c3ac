//! Builder and assertion application loops.

use std::borrow::Borrow;

use httpx_domain::{Assertion, Request, RequestBuilder, Response};

use crate::error::{AssertionFailure, PipelineError};

/// Applies `builders` to `request` in order, stopping at the first failure.
///
/// Mutations made by builders before the failing one are kept.
///
/// # Errors
///
/// Returns [`PipelineError::Builder`] naming the first builder that failed.
pub fn apply_builders<I>(request: &mut Request, builders: I) -> Result<(), PipelineError>
where
    I: IntoIterator,
    I::Item: Borrow<RequestBuilder>,
{
    for builder in builders {
        let builder = builder.borrow();
        tracing::trace!(builder = builder.name(), "applying request builder");
        builder
            .apply(request)
            .map_err(|source| PipelineError::Builder {
                builder: builder.name().to_owned(),
                source,
            })?;
    }
    Ok(())
}

/// Runs every assertion against `response` and collects the failures.
///
/// All assertions run, in order, regardless of earlier outcomes.
pub fn apply_assertions<I>(response: &Response, assertions: I) -> Vec<AssertionFailure>
where
    I: IntoIterator,
    I::Item: Borrow<Assertion>,
{
    let mut failures = Vec::new();
    for assertion in assertions {
        let assertion = assertion.borrow();
        match assertion.check(response) {
            Ok(()) => tracing::trace!(assertion = assertion.name(), "assertion passed"),
            Err(source) => {
                tracing::trace!(assertion = assertion.name(), error = %source, "assertion failed");
                failures.push(AssertionFailure {
                    assertion: assertion.name().to_owned(),
                    source,
                });
            }
        }
    }
    failures
}
