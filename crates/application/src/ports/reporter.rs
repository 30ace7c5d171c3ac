//! Reporter port

use std::fmt;

/// The failure-reporting capability of a host test framework.
///
/// The pipeline depends on this trait rather than on any concrete test
/// harness. `report_failure` records a failure and lets the test continue;
/// `abort_test` ends the test. Real hosts are expected not to return from
/// `abort_test` (usually by panicking); test doubles may return.
pub trait Reporter {
    /// Records a formatted failure message.
    fn report_failure(&self, message: fmt::Arguments<'_>);

    /// Stops the current test.
    fn abort_test(&self);

    /// Marks the calling function as a test helper.
    ///
    /// Hosts that attribute failures to source locations can use this to
    /// skip pipeline frames. The default does nothing.
    fn mark_helper(&self) {}
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report_failure(&self, message: fmt::Arguments<'_>) {
        (**self).report_failure(message);
    }

    fn abort_test(&self) {
        (**self).abort_test();
    }

    fn mark_helper(&self) {
        (**self).mark_helper();
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn report_failure(&self, message: fmt::Arguments<'_>) {
        (**self).report_failure(message);
    }

    fn abort_test(&self) {
        (**self).abort_test();
    }

    fn mark_helper(&self) {
        (**self).mark_helper();
    }
}
