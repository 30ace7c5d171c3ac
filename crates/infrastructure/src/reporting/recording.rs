//! Reporter that only records.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use httpx_application::ports::Reporter;

/// Reporter that records failures and abort requests without failing.
///
/// `abort_test` returns normally, so code after an abort keeps running.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<String>>,
    aborts: AtomicUsize,
    helper_calls: AtomicUsize,
}

impl RecordingReporter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Failure messages in the order they were reported.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of failures reported.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of times `abort_test` was called.
    #[must_use]
    pub fn abort_count(&self) -> usize {
        self.aborts.load(Ordering::SeqCst)
    }

    /// Whether `abort_test` was called at least once.
    #[must_use]
    pub fn aborted(&self) -> bool {
        self.abort_count() > 0
    }

    /// Number of times `mark_helper` was called.
    #[must_use]
    pub fn helper_calls(&self) -> usize {
        self.helper_calls.load(Ordering::SeqCst)
    }
}

impl Reporter for RecordingReporter {
    fn report_failure(&self, message: fmt::Arguments<'_>) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }

    fn abort_test(&self) {
        self.aborts.fetch_add(1, Ordering::SeqCst);
    }

    fn mark_helper(&self) {
        self.helper_calls.fetch_add(1, Ordering::SeqCst);
    }
}
