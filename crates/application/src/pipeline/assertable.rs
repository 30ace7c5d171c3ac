//! Deferred assertion stage.

use std::borrow::Borrow;
use std::cell::Cell;
use std::fmt;

use httpx_domain::{Assertion, Response};

use super::apply::apply_assertions;
use crate::error::PipelineError;
use crate::ports::Reporter;

enum Outcome {
    Ready(Response),
    Poisoned(PipelineError),
}

/// The result of a pipeline run, waiting for assertions.
///
/// A ready assertable holds the executor's response and reports every
/// failing assertion passed to [`expect_it`](Self::expect_it). A poisoned
/// assertable holds the error that stopped the pipeline; invoking it reports
/// that error and aborts the test, so chained assertions never pass silently.
///
/// `expect_it` may be called more than once; each call re-runs the given
/// assertions against the same response.
#[must_use = "an assertable does nothing until `expect_it` is called"]
pub struct Assertable<'t, R: Reporter + ?Sized> {
    reporter: &'t R,
    outcome: Outcome,
    invoked: Cell<bool>,
}

impl<'t, R: Reporter + ?Sized> Assertable<'t, R> {
    pub(crate) const fn ready(reporter: &'t R, response: Response) -> Self {
        Self {
            reporter,
            outcome: Outcome::Ready(response),
            invoked: Cell::new(false),
        }
    }

    pub(crate) const fn poisoned(reporter: &'t R, error: PipelineError) -> Self {
        Self {
            reporter,
            outcome: Outcome::Poisoned(error),
            invoked: Cell::new(false),
        }
    }

    /// Runs `assertions` against the response, reporting each failure.
    ///
    /// On a poisoned assertable this reports the pipeline failure and
    /// aborts the test instead.
    pub fn expect_it<I>(&self, assertions: I)
    where
        I: IntoIterator,
        I::Item: Borrow<Assertion>,
    {
        self.reporter.mark_helper();
        self.invoked.set(true);

        match &self.outcome {
            Outcome::Ready(response) => {
                for failure in apply_assertions(response, assertions) {
                    self.reporter
                        .report_failure(format_args!("httpx: {failure}"));
                }
            }
            Outcome::Poisoned(error) => {
                self.reporter.report_failure(format_args!("httpx: {error}"));
                self.reporter.abort_test();
            }
        }
    }

    /// The captured response, if the pipeline got that far.
    #[must_use]
    pub const fn response(&self) -> Option<&Response> {
        match &self.outcome {
            Outcome::Ready(response) => Some(response),
            Outcome::Poisoned(_) => None,
        }
    }

    /// The error that stopped the pipeline, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&PipelineError> {
        match &self.outcome {
            Outcome::Ready(_) => None,
            Outcome::Poisoned(error) => Some(error),
        }
    }

    /// Whether the pipeline failed before producing a response.
    #[must_use]
    pub const fn is_poisoned(&self) -> bool {
        matches!(self.outcome, Outcome::Poisoned(_))
    }

    /// Consumes the assertable and returns the response or the pipeline error.
    ///
    /// Nothing is reported through the reporter.
    ///
    /// # Errors
    ///
    /// Returns the error that stopped the pipeline.
    pub fn into_result(mut self) -> Result<Response, PipelineError> {
        match std::mem::replace(&mut self.outcome, Outcome::Ready(Response::default())) {
            Outcome::Ready(response) => Ok(response),
            Outcome::Poisoned(error) => Err(error),
        }
    }
}

impl<R: Reporter + ?Sized> Drop for Assertable<'_, R> {
    fn drop(&mut self) {
        // A poisoned assertable that is never invoked still surfaces its failure.
        if let Outcome::Poisoned(error) = &self.outcome
            && !self.invoked.get()
        {
            self.reporter.report_failure(format_args!("httpx: {error}"));
        }
    }
}

impl<R: Reporter + ?Sized> fmt::Debug for Assertable<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Assertable");
        match &self.outcome {
            Outcome::Ready(response) => debug.field("status", &response.status()),
            Outcome::Poisoned(error) => debug.field("error", error),
        };
        debug.finish_non_exhaustive()
    }
}
