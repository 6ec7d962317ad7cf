//! `ft-infra` — the typed infrastructure registry and the bridge collapse
//! model.
//!
//! The registry is the second structure derived from the finalized element
//! table (the first being the road graph in `ft-network`).  It holds one
//! [`Element`] per table row, tagged by behavioral kind, and is the only
//! mutable per-element state in a run: vehicle occupancy counts, bridge
//! collapse state, and the source/sink observability flags.  Topology never
//! changes after construction — vehicles refer to elements by id only.

pub mod bridge;
pub mod element;
pub mod error;
pub mod registry;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use bridge::{BridgeState, CollapseTable, CollapseTally, DelayProfile};
pub use element::{Element, ElementKind};
pub use error::{InfraError, InfraResult};
pub use registry::ElementRegistry;
