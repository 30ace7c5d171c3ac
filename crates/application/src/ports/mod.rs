//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the pipeline and the outside world.
//! Each port is a trait that can be implemented by adapters in the
//! infrastructure layer or by test doubles.

mod executor;
mod reporter;

pub use executor::{ExecFn, ExecuteError, Executor, exec_fn};
pub use reporter::Reporter;
