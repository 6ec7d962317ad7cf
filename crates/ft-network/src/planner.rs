//! Route planning: the three selection strategies and the route cache.
//!
//! # Strategies
//!
//! | Strategy   | Destination                  | Path source                    |
//! |------------|------------------------------|--------------------------------|
//! | `random`   | uniform among distinct sinks | precomputed straight table     |
//! | `straight` | implied by table order       | precomputed straight table     |
//! | `shortest` | uniform among distinct sinks | Dijkstra, cached per (o, d)    |
//!
//! The straight-path table is derived from table order at construction: for
//! every road, the forward id sequence is keyed by `(first, Some(last))` and
//! `(first, None)`, and the reversed sequence by `(last, Some(first))` and
//! `(last, None)`, so vehicles can drive a road in either direction.
//!
//! The shortest-path cache is lazy and never invalidated — the topology is
//! immutable for the duration of a run.
//!
//! Sink selection draws from the model's single RNG stream; the draw happens
//! inside the generating source's step, which keeps the stream order fixed.

use rustc_hash::FxHashMap;

use ft_core::{ElementId, RoutingKind, SimRng};

use crate::graph::RoadGraph;
use crate::route::{dijkstra, Route};
use crate::table::{road_runs, ElementRecord};
use crate::{NetworkError, NetworkResult};

// ── RoutePlanner ──────────────────────────────────────────────────────────────

/// Resolves an origin to a destination path according to the configured
/// strategy.
pub struct RoutePlanner {
    kind: RoutingKind,

    /// Straight paths keyed by `(origin, Some(destination))` and
    /// `(origin, None)`.
    straight: FxHashMap<(ElementId, Option<ElementId>), Route>,

    /// Lazily filled shortest-path cache keyed by `(origin, destination)`.
    cache: FxHashMap<(ElementId, ElementId), Route>,
}

impl RoutePlanner {
    /// Build the planner (and its straight-path table) from the element table.
    pub fn new(kind: RoutingKind, records: &[ElementRecord]) -> Self {
        let mut straight = FxHashMap::default();

        for (start, end) in road_runs(records) {
            let run = &records[start..end];
            let ids: Vec<ElementId> = run.iter().map(|r| r.id).collect();
            let total_m: f64 = run
                .windows(2)
                .map(|pair| (pair[1].km - pair[0].km).abs() * 1000.0)
                .sum();

            let (Some(&first), Some(&last)) = (ids.first(), ids.last()) else {
                continue;
            };

            let forward = Route {
                path: ids.clone(),
                total_m,
            };
            straight.insert((first, Some(last)), forward.clone());
            straight.insert((first, None), forward);

            let mut reversed_ids = ids;
            reversed_ids.reverse();
            let reverse = Route {
                path: reversed_ids,
                total_m,
            };
            straight.insert((last, Some(first)), reverse.clone());
            straight.insert((last, None), reverse);
        }

        Self {
            kind,
            straight,
            cache: FxHashMap::default(),
        }
    }

    pub fn kind(&self) -> RoutingKind {
        self.kind
    }

    /// Look up a straight route without going through a strategy.
    pub fn straight_route(
        &self,
        origin: ElementId,
        destination: Option<ElementId>,
    ) -> Option<&Route> {
        self.straight.get(&(origin, destination))
    }

    /// Read-only view of the shortest-path cache (determinism checks,
    /// run-end reporting).
    pub fn cache(&self) -> &FxHashMap<(ElementId, ElementId), Route> {
        &self.cache
    }

    // ── Planning ──────────────────────────────────────────────────────────

    /// Resolve `origin` to a full route under the configured strategy.
    ///
    /// `sinks` is the model's sink id list in registration order; `rng` is
    /// the run's single random stream.
    pub fn plan(
        &mut self,
        origin: ElementId,
        sinks: &[ElementId],
        graph: &RoadGraph,
        rng: &mut SimRng,
    ) -> NetworkResult<Route> {
        match self.kind {
            RoutingKind::Random => {
                let sink = pick_distinct_sink(origin, sinks, rng)?;
                self.straight
                    .get(&(origin, Some(sink)))
                    .cloned()
                    .ok_or(NetworkError::NoRoute {
                        origin,
                        destination: sink,
                    })
            }
            RoutingKind::Straight => self
                .straight
                .get(&(origin, None))
                .cloned()
                .ok_or(NetworkError::NoStraightRoute { origin }),
            RoutingKind::Shortest => {
                let sink = pick_distinct_sink(origin, sinks, rng)?;
                if let Some(route) = self.cache.get(&(origin, sink)) {
                    return Ok(route.clone());
                }
                let route = dijkstra(graph, origin, sink)?;
                self.cache.insert((origin, sink), route.clone());
                Ok(route)
            }
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Draw a destination uniformly from the sinks, excluding the origin itself.
///
/// Errors instead of spinning when no distinct sink exists (a lone
/// source-sink network would otherwise never terminate the draw).
fn pick_distinct_sink(
    origin: ElementId,
    sinks: &[ElementId],
    rng: &mut SimRng,
) -> NetworkResult<ElementId> {
    let eligible: Vec<ElementId> = sinks.iter().copied().filter(|&s| s != origin).collect();
    match rng.choose(&eligible) {
        Some(&sink) => Ok(sink),
        None => Err(NetworkError::NoDestination { origin }),
    }
}
