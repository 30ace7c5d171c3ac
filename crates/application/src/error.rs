//! Pipeline error types

use httpx_domain::BoxError;
use thiserror::Error;

use crate::ports::ExecuteError;

/// A failure that stops the pipeline before assertions can run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The method or URI was malformed.
    #[error("failed to create request: {0}")]
    Construction(#[from] http::Error),

    /// A builder returned an error.
    #[error("{builder} failed: {source}")]
    Builder {
        /// Name of the failing builder.
        builder: String,
        /// What the builder reported.
        #[source]
        source: BoxError,
    },

    /// The executor could not produce a response.
    #[error("failed to execute request: {0}")]
    Execute(#[from] ExecuteError),
}

/// A single failed assertion.
#[derive(Debug, Error)]
#[error("assertion {assertion} failed: {source}")]
pub struct AssertionFailure {
    /// Name of the failing assertion.
    pub assertion: String,
    /// What the assertion reported.
    #[source]
    pub source: BoxError,
}

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
