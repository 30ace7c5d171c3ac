//! Reporter for the built-in test harness.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use httpx_application::ports::Reporter;

/// Reporter backed by panics, for `#[test]` and `#[tokio::test]` functions.
///
/// `report_failure` records the message and lets the test continue.
/// `abort_test` panics with every message recorded so far. If failures were
/// recorded but the test never aborted, the reporter panics when it is
/// dropped, so a test cannot pass with reported failures.
///
/// ```ignore
/// #[tokio::test]
/// async fn health_is_ok() {
///     let t = TestReporter::named("health_is_ok");
///     httpx::live()
///         .unwrap()
///         .make_request(&t, "GET", "http://localhost:8080/health", [] as [RequestBuilder; 0])
///         .await
///         .expect_it([status(200)]);
/// }
/// ```
#[derive(Debug, Default)]
pub struct TestReporter {
    name: Option<String>,
    failures: Mutex<Vec<String>>,
}

impl TestReporter {
    /// Creates an anonymous reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reporter labelled with the test name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            failures: Mutex::default(),
        }
    }

    /// Messages reported so far.
    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Whether any failure has been reported.
    #[must_use]
    pub fn failed(&self) -> bool {
        !self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.failures.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn summary(&self, failures: &[String]) -> String {
        let header = self.name.as_deref().map_or_else(
            || format!("{} failure(s) reported", failures.len()),
            |name| format!("{name}: {} failure(s) reported", failures.len()),
        );
        let mut summary = header;
        for failure in failures {
            summary.push_str("\n  - ");
            summary.push_str(failure);
        }
        summary
    }
}

impl Reporter for TestReporter {
    fn report_failure(&self, message: fmt::Arguments<'_>) {
        let message = message.to_string();
        tracing::error!(test = self.name.as_deref(), "{message}");
        self.lock().push(message);
    }

    #[allow(clippy::panic)]
    fn abort_test(&self) {
        let failures = std::mem::take(&mut *self.lock());
        panic!("{}", self.summary(&failures));
    }

    fn mark_helper(&self) {
        tracing::trace!(test = self.name.as_deref(), "entering httpx helper");
    }
}

impl Drop for TestReporter {
    #[allow(clippy::panic)]
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        let failures = std::mem::take(&mut *self.lock());
        if !failures.is_empty() {
            panic!("{}", self.summary(&failures));
        }
    }
}
