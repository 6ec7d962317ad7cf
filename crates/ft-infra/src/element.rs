//! Infrastructure elements: the per-row registry entry and its kind tag.

use ft_core::{ElementId, GeoPoint};

use crate::bridge::BridgeState;

// ── ElementKind ───────────────────────────────────────────────────────────────

/// The behavioral kind of an element, with per-kind mutable state.
///
/// Movement logic dispatches on this tag explicitly — there is no trait
/// object or downcasting anywhere in the traversal path.
#[derive(Debug, Clone)]
pub enum ElementKind {
    /// Generates vehicles on the model's cadence.
    Source {
        /// `true` in ticks where this source generated a vehicle.
        generated_flag: bool,
    },

    /// Removes arriving vehicles.
    Sink {
        /// Flipped on each removal (observability probe).
        removed_toggle: bool,
    },

    /// Simultaneously eligible to generate and to receive.
    SourceSink {
        generated_flag: bool,
        removed_toggle: bool,
    },

    /// Stochastic collapse and delay.
    Bridge(BridgeState),

    /// Plain road segment.
    Link,

    /// Junction row; its crossing edge lives in the road graph.
    Intersection,
}

impl ElementKind {
    /// `true` for kinds that can generate vehicles.
    #[inline]
    pub fn generates(&self) -> bool {
        matches!(self, ElementKind::Source { .. } | ElementKind::SourceSink { .. })
    }

    /// `true` for kinds that remove arriving vehicles.
    #[inline]
    pub fn removes(&self) -> bool {
        matches!(self, ElementKind::Sink { .. } | ElementKind::SourceSink { .. })
    }
}

// ── Element ───────────────────────────────────────────────────────────────────

/// One infrastructure element: identity, geometry, occupancy, and kind.
///
/// Created once at model build from the element table; `id`, geometry, and
/// names are immutable afterwards.  `vehicle_count` and the kind's inner
/// state mutate throughout the run.
#[derive(Debug, Clone)]
pub struct Element {
    pub id: ElementId,
    pub name: String,
    pub road: String,
    /// Physical length in metres (0 for point elements).
    pub length_m: f64,
    /// Placement metadata; movement math only reads `pos.lon`, and only for
    /// the directional bridge-side rule.
    pub pos: GeoPoint,
    /// Number of vehicles currently on this element.  For sources and sinks
    /// this accumulates generations/arrivals instead (a source never sees its
    /// vehicle depart "through" it, and a removed vehicle is not decremented
    /// out of its sink).  Never negative.
    pub vehicle_count: u32,
    pub kind: ElementKind,
}

impl Element {
    /// A vehicle entered this element.
    #[inline]
    pub fn enter(&mut self) {
        self.vehicle_count += 1;
    }

    /// A vehicle left this element.
    #[inline]
    pub fn depart(&mut self) {
        debug_assert!(self.vehicle_count > 0, "occupancy underflow on {}", self.id);
        self.vehicle_count = self.vehicle_count.saturating_sub(1);
    }

    #[inline]
    pub fn is_source(&self) -> bool {
        self.kind.generates()
    }

    #[inline]
    pub fn is_sink(&self) -> bool {
        self.kind.removes()
    }

    /// The bridge state, for bridge elements.
    pub fn bridge(&self) -> Option<&BridgeState> {
        match &self.kind {
            ElementKind::Bridge(state) => Some(state),
            _ => None,
        }
    }

    pub fn bridge_mut(&mut self) -> Option<&mut BridgeState> {
        match &mut self.kind {
            ElementKind::Bridge(state) => Some(state),
            _ => None,
        }
    }

    /// Record whether this source generated a vehicle this tick.
    /// No-op on kinds that cannot generate.
    pub fn set_generated_flag(&mut self, value: bool) {
        match &mut self.kind {
            ElementKind::Source { generated_flag }
            | ElementKind::SourceSink { generated_flag, .. } => *generated_flag = value,
            _ => {}
        }
    }

    /// Flip the removal probe on a sink.  No-op on kinds that cannot remove.
    pub fn toggle_removed(&mut self) {
        match &mut self.kind {
            ElementKind::Sink { removed_toggle }
            | ElementKind::SourceSink { removed_toggle, .. } => {
                *removed_toggle = !*removed_toggle;
            }
            _ => {}
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            ElementKind::Source { .. } => "Source",
            ElementKind::Sink { .. } => "Sink",
            ElementKind::SourceSink { .. } => "SourceSink",
            ElementKind::Bridge(_) => "Bridge",
            ElementKind::Link => "Link",
            ElementKind::Intersection => "Intersection",
        };
        write!(f, "{kind}{}", self.id.0)
    }
}
