//! `MetricsObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use ft_sim::{CompletionRecord, RunSummary, SimObserver, TickMetrics};

use crate::row::{CompletionRow, TickMetricsRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that streams tick metrics to any [`OutputWriter`]
/// backend and writes the completion records at run end.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `model.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct MetricsObserver<W: OutputWriter> {
    writer: W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> MetricsObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `model.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for MetricsObserver<W> {
    fn on_tick_end(&mut self, metrics: &TickMetrics) {
        let row = TickMetricsRow::from(metrics);
        let result = self.writer.write_tick(&row);
        self.store_err(result);
    }

    fn on_run_end(&mut self, _summary: &RunSummary, completions: &[CompletionRecord]) {
        let rows: Vec<CompletionRow> = completions.iter().map(CompletionRow::from).collect();
        let result = self.writer.write_completions(&rows);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
