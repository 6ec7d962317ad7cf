//! Plain data row types written by output backends.

use ft_sim::{CompletionRecord, TickMetrics};

/// One tick's model-level metric sample.
#[derive(Debug, Clone, PartialEq)]
pub struct TickMetricsRow {
    pub tick: u64,
    pub vehicles_on_road: u64,
    pub mean_bridge_delay_min: f64,
    pub mean_driving_time_min: f64,
    pub mean_net_speed_kmh: f64,
    pub collapsed_total: u64,
    /// Collapsed-bridge counts by condition class A, B, C, D, X.
    pub collapsed_by_condition: [u64; 5],
}

impl From<&TickMetrics> for TickMetricsRow {
    fn from(m: &TickMetrics) -> Self {
        Self {
            tick: m.tick.0,
            vehicles_on_road: m.vehicles_on_road as u64,
            mean_bridge_delay_min: m.mean_bridge_delay_min,
            mean_driving_time_min: m.mean_driving_time_min,
            mean_net_speed_kmh: m.mean_net_speed_kmh,
            collapsed_total: m.collapsed_total,
            collapsed_by_condition: m.collapsed_by_condition,
        }
    }
}

/// One completed vehicle journey.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRow {
    pub vehicle_id: u32,
    pub generated_at: u64,
    pub removed_at: u64,
    pub driving_time_min: f64,
    pub net_speed_kmh: f64,
    pub travel_distance_m: f64,
}

impl From<&CompletionRecord> for CompletionRow {
    fn from(c: &CompletionRecord) -> Self {
        Self {
            vehicle_id: c.vehicle.0,
            generated_at: c.generated_at.0,
            removed_at: c.removed_at.0,
            driving_time_min: c.driving_time_min,
            net_speed_kmh: c.net_speed_kmh,
            travel_distance_m: c.travel_distance_m,
        }
    }
}
