//! Shortest-path search over the road graph.
//!
//! Standard Dijkstra over the CSR adjacency, with metre weights.  The heap
//! key is `(OrderedFloat(cost), ElementId)` — the secondary id component
//! gives deterministic tie-breaking, so the same graph always yields the
//! same path regardless of insertion order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use ft_core::ElementId;

use crate::graph::RoadGraph;
use crate::{NetworkError, NetworkResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: an ordered id path (origin and destination
/// included) and its total weight in metres.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Element ids to traverse in order, from origin to destination.
    pub path: Vec<ElementId>,
    /// Cumulative path weight in metres.
    pub total_m: f64,
}

impl Route {
    /// `true` if origin and destination are the same element.
    pub fn is_trivial(&self) -> bool {
        self.path.len() <= 1
    }

    /// The final element of the path.
    pub fn destination(&self) -> Option<ElementId> {
        self.path.last().copied()
    }
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

/// Compute the minimum-weight path from `from` to `to`.
///
/// Returns [`NetworkError::NoRoute`] when `to` is unreachable.
pub fn dijkstra(graph: &RoadGraph, from: ElementId, to: ElementId) -> NetworkResult<Route> {
    if from == to {
        return Ok(Route {
            path: vec![from],
            total_m: 0.0,
        });
    }

    let n = graph.node_count();
    // dist[v] = best known cost (metres) to reach v.
    let mut dist = vec![f64::INFINITY; n];
    // prev[v] = node that reached v; INVALID for unreached nodes.
    let mut prev = vec![ElementId::INVALID; n];

    dist[from.index()] = 0.0;

    // Min-heap: Reverse makes BinaryHeap (max) behave as min-heap.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, ElementId)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), from)));

    while let Some(Reverse((OrderedFloat(cost), node))) = heap.pop() {
        if node == to {
            return Ok(reconstruct(prev, from, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in graph.out_edges(node) {
            let neighbor = graph.edge_to[edge];
            let new_cost = cost + graph.edge_weight_m[edge];

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev[neighbor.index()] = node;
                heap.push(Reverse((OrderedFloat(new_cost), neighbor)));
            }
        }
    }

    Err(NetworkError::NoRoute {
        origin: from,
        destination: to,
    })
}

fn reconstruct(prev: Vec<ElementId>, from: ElementId, to: ElementId, total_m: f64) -> Route {
    let mut path = vec![to];
    let mut cur = to;
    while cur != from {
        cur = prev[cur.index()];
        path.push(cur);
    }
    path.reverse();
    Route { path, total_m }
}
