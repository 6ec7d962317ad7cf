//! Run observability: per-vehicle completion records, per-tick metrics, and
//! the run-end summary.

use ft_core::{Tick, VehicleId};

// ── CompletionRecord ──────────────────────────────────────────────────────────

/// Emitted once per vehicle, when a sink removes it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRecord {
    pub vehicle: VehicleId,
    pub generated_at: Tick,
    pub removed_at: Tick,
    /// `removed_at − generated_at`, in minutes.
    pub driving_time_min: f64,
    /// Kilometres per hour over the whole journey, waits included.
    pub net_speed_kmh: f64,
    pub travel_distance_m: f64,
}

// ── TickMetrics ───────────────────────────────────────────────────────────────

/// The model-level metric set, sampled once per tick after stepping.
#[derive(Debug, Clone, PartialEq)]
pub struct TickMetrics {
    pub tick: Tick,
    /// Vehicles still registered at tick end.
    pub vehicles_on_road: usize,
    /// Mean of the bridges' most recently sampled delay, in minutes.
    pub mean_bridge_delay_min: f64,
    /// Mean driving time over all completions so far; 0 before the first.
    pub mean_driving_time_min: f64,
    /// Mean net speed over all completions so far; 0 before the first.
    pub mean_net_speed_kmh: f64,
    pub collapsed_total: u64,
    /// Collapsed bridges per condition, indexed like
    /// [`ft_core::BridgeCondition::ALL`].
    pub collapsed_by_condition: [u64; 5],
}

// ── RunSummary ────────────────────────────────────────────────────────────────

/// Aggregates handed to the orchestrator at run end.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub vehicles_generated: u64,
    pub vehicles_completed: u64,
    pub mean_driving_time_min: f64,
    pub mean_net_speed_kmh: f64,
    pub mean_bridge_delay_min: f64,
    pub collapsed_total: u64,
    pub collapsed_by_condition: [u64; 5],
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Mean driving time and mean net speed over the completions so far.
pub(crate) fn completion_means(completions: &[CompletionRecord]) -> (f64, f64) {
    if completions.is_empty() {
        return (0.0, 0.0);
    }
    let n = completions.len() as f64;
    let driving: f64 = completions.iter().map(|c| c.driving_time_min).sum();
    let speed: f64 = completions.iter().map(|c| c.net_speed_kmh).sum();
    (driving / n, speed / n)
}
