//! Simulation observer trait for progress reporting and data collection.

use ft_core::Tick;

use crate::metrics::{CompletionRecord, RunSummary, TickMetrics};

/// Callbacks invoked by [`Model::run`][crate::Model::run] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, metrics: &TickMetrics) {
///         if metrics.tick.0 % self.interval == 0 {
///             println!("{}: {} vehicles on road", metrics.tick, metrics.vehicles_on_road);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any stepping.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with that tick's metric sample.
    fn on_tick_end(&mut self, _metrics: &TickMetrics) {}

    /// Called once after the final tick completes, with the run aggregates
    /// and every vehicle completion record accumulated over the run.
    fn on_run_end(&mut self, _summary: &RunSummary, _completions: &[CompletionRecord]) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
