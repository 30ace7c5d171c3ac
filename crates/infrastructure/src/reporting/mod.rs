//! Reporter adapters.
//!
//! [`TestReporter`] plugs the pipeline into the built-in `cargo test`
//! harness. [`RecordingReporter`] records everything without failing and is
//! meant for testing builders, assertions and executors themselves.

mod recording;
mod test_reporter;

pub use recording::RecordingReporter;
pub use test_reporter::TestReporter;
