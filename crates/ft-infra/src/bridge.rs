//! Bridge collapse state, collapse-probability table, and delay sampling.
//!
//! # Collapse
//!
//! Each bridge carries a collapse probability looked up by condition class at
//! registry build.  Once per tick (as the bridge's own step) the model calls
//! [`BridgeState::evaluate_collapse`]; a collapsed bridge never recovers.
//!
//! # Delay
//!
//! When a vehicle arrives at a collapsed bridge, the wait time is re-sampled
//! from a length-bucketed distribution — every approach rolls its own delay,
//! nothing is cached across visits:
//!
//! | Bridge length      | Delay (minutes)            |
//! |--------------------|----------------------------|
//! | > 200 m            | triangular(60, 120, 240)   |
//! | 50 m < L ≤ 200 m   | uniform(45, 90)            |
//! | 10 m < L ≤ 50 m    | uniform(15, 60)            |
//! | ≤ 10 m             | uniform(10, 20)            |

use rand_distr::{Distribution, Triangular, Uniform};

use ft_core::{BridgeCondition, SimRng};

use crate::{InfraError, InfraResult};

// ── CollapseTable ─────────────────────────────────────────────────────────────

/// Condition → collapse probability, supplied at model construction.
///
/// A condition absent from the table is a configuration error surfaced when
/// the first bridge of that condition is built, not a silent zero.
#[derive(Clone, Debug, Default)]
pub struct CollapseTable {
    chances: [Option<f64>; 5],
}

impl CollapseTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion: `CollapseTable::new().with(D, 0.8)`.
    pub fn with(mut self, condition: BridgeCondition, chance: f64) -> Self {
        self.chances[condition.index()] = Some(chance);
        self
    }

    /// The probability for `condition`, if configured.
    pub fn chance(&self, condition: BridgeCondition) -> Option<f64> {
        self.chances[condition.index()]
    }

    /// A table mapping every condition to probability 0 — the no-collapse
    /// baseline scenario.
    pub fn all_zero() -> Self {
        let mut table = Self::new();
        for c in BridgeCondition::ALL {
            table = table.with(c, 0.0);
        }
        table
    }
}

// ── BridgeState ───────────────────────────────────────────────────────────────

/// Mutable collapse state of one bridge.
#[derive(Debug, Clone)]
pub struct BridgeState {
    pub condition: BridgeCondition,
    /// Probability of collapsing per evaluation, from the collapse table.
    pub collapse_chance: f64,
    /// Monotonic: once `true`, stays `true` for the rest of the run.
    pub collapsed: bool,
    /// The most recently sampled delay in minutes; 0 whenever standing.
    pub delay_min: f64,
}

impl BridgeState {
    pub fn new(condition: BridgeCondition, collapse_chance: f64) -> Self {
        Self {
            condition,
            collapse_chance,
            collapsed: false,
            delay_min: 0.0,
        }
    }

    /// One collapse evaluation: draw uniform [0, 1) and collapse when the
    /// draw falls below the bridge's chance.  No-op once collapsed.
    ///
    /// Returns `true` only when the bridge collapsed on this call, so the
    /// caller can bump the per-condition tally exactly once.
    pub fn evaluate_collapse(&mut self, rng: &mut SimRng) -> bool {
        if self.collapsed {
            return false;
        }
        if rng.gen_unit() < self.collapse_chance {
            self.collapsed = true;
            return true;
        }
        false
    }

    /// Sample the delay a vehicle incurs approaching this bridge.
    ///
    /// Standing bridges impose no delay and draw nothing from the stream;
    /// collapsed bridges re-roll on every approach.  The draw is stored in
    /// `delay_min` for the per-tick mean-delay metric.
    pub fn sample_delay(
        &mut self,
        length_m: f64,
        profile: &DelayProfile,
        rng: &mut SimRng,
    ) -> f64 {
        self.delay_min = if self.collapsed {
            profile.sample(length_m, rng)
        } else {
            0.0
        };
        self.delay_min
    }
}

// ── DelayProfile ──────────────────────────────────────────────────────────────

/// Length-bucketed delay distributions.
///
/// Thresholds are configurable; the distributions themselves are fixed (see
/// the module table).  Distributions are validated and pre-built once at
/// model construction.
pub struct DelayProfile {
    pub long_threshold_m: f64,
    pub medium_threshold_m: f64,
    pub short_threshold_m: f64,
    long: Triangular<f64>,
    medium: Uniform<f64>,
    short: Uniform<f64>,
    minimal: Uniform<f64>,
}

impl DelayProfile {
    /// The default bucket boundaries: 200 m / 50 m / 10 m.
    pub fn new() -> InfraResult<Self> {
        Self::with_thresholds(200.0, 50.0, 10.0)
    }

    pub fn with_thresholds(long_m: f64, medium_m: f64, short_m: f64) -> InfraResult<Self> {
        let long = Triangular::new(60.0, 240.0, 120.0)
            .map_err(|e| InfraError::InvalidDelayProfile(format!("triangular: {e:?}")))?;
        Ok(Self {
            long_threshold_m: long_m,
            medium_threshold_m: medium_m,
            short_threshold_m: short_m,
            long,
            medium: Uniform::new(45.0, 90.0),
            short: Uniform::new(15.0, 60.0),
            minimal: Uniform::new(10.0, 20.0),
        })
    }

    /// Draw a delay in minutes for a bridge of the given length.
    pub fn sample(&self, length_m: f64, rng: &mut SimRng) -> f64 {
        if length_m > self.long_threshold_m {
            self.long.sample(rng.inner())
        } else if length_m > self.medium_threshold_m {
            self.medium.sample(rng.inner())
        } else if length_m > self.short_threshold_m {
            self.short.sample(rng.inner())
        } else {
            self.minimal.sample(rng.inner())
        }
    }
}

// ── CollapseTally ─────────────────────────────────────────────────────────────

/// Per-condition count of bridges that have collapsed this run.
///
/// Owned by the model instance — batch runs never share a tally.
#[derive(Clone, Debug, Default)]
pub struct CollapseTally {
    by_condition: [u64; 5],
}

impl CollapseTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one newly collapsed bridge.
    #[inline]
    pub fn record(&mut self, condition: BridgeCondition) {
        self.by_condition[condition.index()] += 1;
    }

    /// Collapsed count for one condition.
    #[inline]
    pub fn count(&self, condition: BridgeCondition) -> u64 {
        self.by_condition[condition.index()]
    }

    /// Total collapsed bridges across all conditions.
    pub fn total(&self) -> u64 {
        self.by_condition.iter().sum()
    }

    /// Dense per-condition counts, indexed like [`BridgeCondition::ALL`].
    pub fn counts(&self) -> [u64; 5] {
        self.by_condition
    }
}
