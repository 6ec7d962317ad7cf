//! The `OutputWriter` trait implemented by backend writers.

use crate::{CompletionRow, OutputResult, TickMetricsRow};

/// Trait implemented by output backends (CSV today; anything with the same
/// two row streams tomorrow).
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`MetricsObserver::take_error`][crate::MetricsObserver::take_error].
pub trait OutputWriter {
    /// Write one tick-metrics row.
    fn write_tick(&mut self, row: &TickMetricsRow) -> OutputResult<()>;

    /// Write a batch of vehicle completion rows.
    fn write_completions(&mut self, rows: &[CompletionRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
