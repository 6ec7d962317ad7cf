//! `ft-core` — foundational types for the `rust_freightsim` simulation.
//!
//! This crate is a dependency of every other `ft-*` crate.  It intentionally
//! has no `ft-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`).
//!
//! # What lives here
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`ids`]       | `ElementId`, `VehicleId`                              |
//! | [`geo`]       | `GeoPoint` (f64 lat/lon)                              |
//! | [`time`]      | `Tick`, `SimClock`                                    |
//! | [`config`]    | `SimConfig`, `RoutingKind`, `BridgeSkipPolicy`        |
//! | [`rng`]       | `SimRng` — the one seeded stream per model instance   |
//! | [`condition`] | `BridgeCondition` enum                                |
//! | [`error`]     | `CoreError`, `CoreResult`                             |

pub mod condition;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use condition::BridgeCondition;
pub use config::{BridgeSide, BridgeSkipPolicy, RoutingKind, SimConfig};
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{ElementId, VehicleId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
