//! httpx infrastructure: adapters for the application ports
//!
//! This crate provides the live and in-process executors, reporters for the
//! built-in test harness, and a library of reference builders and
//! assertions.

pub mod adapters;
pub mod assertions;
pub mod builders;
pub mod config;
pub mod logging;
pub mod reporting;

pub use adapters::{HandlerExecutor, ReqwestExecutor};
pub use config::{ConfigError, ExecutorConfig};
pub use logging::init_test_logging;
pub use reporting::{RecordingReporter, TestReporter};
