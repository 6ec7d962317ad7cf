//! `ft-output` — writes run observability data to disk.
//!
//! Two row streams come out of a run:
//!
//! - **tick metrics** — one row per tick (mean delay, mean driving time,
//!   collapse tallies, …), written as the run progresses;
//! - **vehicle completions** — one row per vehicle that reached a sink,
//!   written in a batch at run end.
//!
//! [`MetricsObserver`] bridges `ft_sim::SimObserver` to any
//! [`OutputWriter`] backend; [`CsvWriter`] is the standard backend.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = MetricsObserver::new(writer);
//! model.run(&mut obs).unwrap();
//! assert!(obs.take_error().is_none());
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::MetricsObserver;
pub use row::{CompletionRow, TickMetricsRow};
pub use writer::OutputWriter;
