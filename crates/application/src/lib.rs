//! httpx Application - Pipeline and ports
//!
//! This crate defines the application layer with:
//! - Port traits for executors and reporters
//! - The build → execute → assert pipeline
//! - Pipeline error handling

pub mod error;
pub mod pipeline;
pub mod ports;

pub use error::{AssertionFailure, PipelineError, PipelineResult};
pub use pipeline::{Assertable, Pipeline, apply_assertions, apply_builders};
pub use ports::{ExecFn, ExecuteError, Executor, Reporter, exec_fn};
