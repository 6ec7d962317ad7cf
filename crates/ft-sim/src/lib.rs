//! `ft-sim` — the scheduler and vehicle state machine.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Infrastructure pass (table order):
//!        bridges   → one collapse evaluation each
//!        sources   → on cadence, generate one vehicle (route planned
//!                    immediately; failures log and skip)
//!   ② Vehicle pass (registration order, tick-start roster):
//!        WAIT      → count down; resume driving the tick the wait expires
//!        DRIVE     → consume the distance budget across path elements,
//!                    skipping wrong-side bridges, waiting at collapsed
//!                    ones, terminating at sinks
//!   ③ Metrics    — sample the per-tick observability set
//!   ④ Clock      — advance by one tick
//! ```
//!
//! Everything in one tick runs sequentially in a fixed order, and all
//! stochastic decisions (collapse draws, delay samples, sink selection) pull
//! from the model's single RNG stream in that order — agent order is a
//! correctness invariant (see `ft_core::rng`).
//!
//! Vehicles generated during ① are first stepped on the *next* tick, and a
//! vehicle removed during ② is never stepped again; the roster is compacted
//! at tick end without disturbing the registration order of survivors.

pub mod error;
pub mod metrics;
pub mod model;
pub mod observer;
pub mod vehicle;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SimError, SimResult};
pub use metrics::{CompletionRecord, RunSummary, TickMetrics};
pub use model::Model;
pub use observer::{NoopObserver, SimObserver};
pub use vehicle::{Vehicle, VehicleOutcome, VehicleState};
