//! Run configuration.
//!
//! One `SimConfig` value fully determines a run given an element table and a
//! collapse-probability table: same config + same inputs → identical output.

// ── RoutingKind ───────────────────────────────────────────────────────────────

/// Route-selection strategy, chosen at model construction.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RoutingKind {
    /// Origin fixed, destination drawn uniformly from the sinks; the path is
    /// the precomputed straight path for that (origin, sink) pair.
    Random,
    /// The path implied by table order on the origin's road, independent of
    /// destination choice.
    Straight,
    /// Minimum-weight path to a randomly chosen distinct sink, cached per
    /// (origin, destination).
    Shortest,
}

impl RoutingKind {
    /// Parse a strategy name.  Unknown names fall back to `Straight`.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "random" => RoutingKind::Random,
            "shortest" => RoutingKind::Shortest,
            _ => RoutingKind::Straight,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoutingKind::Random => "random",
            RoutingKind::Straight => "straight",
            RoutingKind::Shortest => "shortest",
        }
    }
}

// ── Bridge skip policy ────────────────────────────────────────────────────────

/// Which side of a dual carriageway a bridge serves.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BridgeSide {
    Left,
    Right,
}

/// Naming convention for directional bridge pairs.
///
/// Dual-carriageway bridges appear in the inventory as paired rows whose
/// names carry a trailing side marker.  A vehicle heading east (previous
/// element's longitude strictly less than the bridge's) passes the right-side
/// structure and skips the left one; heading west it is the other way round.
/// The comparisons are strict: a vehicle approaching from an equal longitude
/// skips neither side.
///
/// The markers are configuration because the convention is dataset-specific;
/// the defaults match the demo inventory's `"... (L"` / `"... (R"` suffixes.
#[derive(Clone, Debug)]
pub struct BridgeSkipPolicy {
    pub left_marker: String,
    pub right_marker: String,
}

impl BridgeSkipPolicy {
    /// Which side `name` designates, if either marker matches its tail.
    pub fn side_of(&self, name: &str) -> Option<BridgeSide> {
        if !self.left_marker.is_empty() && name.ends_with(&self.left_marker) {
            Some(BridgeSide::Left)
        } else if !self.right_marker.is_empty() && name.ends_with(&self.right_marker) {
            Some(BridgeSide::Right)
        } else {
            None
        }
    }

    /// `true` when a vehicle coming from longitude `prev_lon` should pass
    /// over `name`d bridge at `bridge_lon` without stopping on it.
    pub fn should_skip(&self, name: &str, prev_lon: f64, bridge_lon: f64) -> bool {
        match self.side_of(name) {
            Some(BridgeSide::Left) => prev_lon < bridge_lon,
            Some(BridgeSide::Right) => prev_lon > bridge_lon,
            None => false,
        }
    }
}

impl Default for BridgeSkipPolicy {
    fn default() -> Self {
        Self {
            left_marker: "(L".to_owned(),
            right_marker: "(R".to_owned(),
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Route-selection strategy for generated vehicles.
    pub routing: RoutingKind,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// A source generates one vehicle every `generation_interval` ticks,
    /// starting at tick 0.  Default: 5.
    pub generation_interval: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Vehicle speed in metres per simulated minute.
    /// Default: 800 (48 km/h).
    pub speed_m_per_min: f64,

    /// Simulated minutes per tick.  Default: 1.
    pub tick_minutes: f64,

    /// Directional-bridge naming convention.
    pub skip_policy: BridgeSkipPolicy,
}

impl SimConfig {
    /// Distance a vehicle covers in one tick, in metres.
    #[inline]
    pub fn distance_per_tick(&self) -> f64 {
        self.speed_m_per_min * self.tick_minutes
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> crate::SimClock {
        crate::SimClock::new(self.tick_minutes)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            routing: RoutingKind::Straight,
            total_ticks: 7_200,
            generation_interval: 5,
            seed: 0,
            speed_m_per_min: 48.0 * 1000.0 / 60.0,
            tick_minutes: 1.0,
            skip_policy: BridgeSkipPolicy::default(),
        }
    }
}
