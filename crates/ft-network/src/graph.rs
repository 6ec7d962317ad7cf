//! Road graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given an `ElementId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edges[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! The edge arrays (`edge_to`, `edge_weight_m`) are sorted by source node.
//! Iteration over a node's outgoing edges is therefore a contiguous memory
//! scan — ideal for Dijkstra's inner loop.
//!
//! # Construction
//!
//! [`RoadGraph::from_table`] derives the graph from the finalized element
//! table: consecutive rows on the same road become edges in both directions
//! weighted by their chainage difference in metres, and each matched
//! intersection pair gains a bidirectional zero-weight crossing edge.
//! Cycles (loops through an intersection and back) are legitimate and are
//! never pruned.

use ft_core::ElementId;

use crate::table::{check_contiguous_ids, road_runs, ElementRecord, ElementType};
use crate::BuildError;

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Directed weighted road graph in CSR format, one node per table row.
///
/// All fields are `pub` for direct indexed access on hot paths.  Construct
/// via [`RoadGraph::from_table`].
#[derive(Debug)]
pub struct RoadGraph {
    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing edges of node `n` are at edge indices
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by position in sorted order) ───────────────────
    /// Destination node of each edge.
    pub edge_to: Vec<ElementId>,

    /// Weight of each edge in metres (chainage distance; 0 for crossing
    /// edges between matched intersection rows).
    pub edge_weight_m: Vec<f64>,
}

impl RoadGraph {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_out_start.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the edge indices of all outgoing edges from `node`.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn out_edges(&self, node: ElementId) -> impl Iterator<Item = usize> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end = self.node_out_start[node.index() + 1] as usize;
        start..end
    }

    /// Out-degree of `node`.
    #[inline]
    pub fn out_degree(&self, node: ElementId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Total weight of an id path, or `None` if two consecutive ids are not
    /// connected by an edge (picks the cheapest parallel edge if several).
    pub fn path_weight(&self, path: &[ElementId]) -> Option<f64> {
        let mut total = 0.0;
        for pair in path.windows(2) {
            let weight = self
                .out_edges(pair[0])
                .filter(|&e| self.edge_to[e] == pair[1])
                .map(|e| self.edge_weight_m[e])
                .min_by(|a, b| a.total_cmp(b))?;
            total += weight;
        }
        Some(total)
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Build the graph from the finalized element table.
    ///
    /// Fails when ids are not dense from 0 or when an intersection reference
    /// cannot be resolved to exactly one row on the target road.
    pub fn from_table(records: &[ElementRecord]) -> Result<Self, BuildError> {
        check_contiguous_ids(records)?;

        let mut raw: Vec<(ElementId, ElementId, f64)> = Vec::new();

        // Chainage edges: consecutive rows of the same road, both directions.
        for (start, end) in road_runs(records) {
            for i in start..end.saturating_sub(1) {
                let a = &records[i];
                let b = &records[i + 1];
                let weight = (b.km - a.km).abs() * 1000.0;
                raw.push((a.id, b.id, weight));
                raw.push((b.id, a.id, weight));
            }
        }

        // Crossing edges: each intersection row links to the unique
        // intersection row on its target road that points back here.
        for record in records {
            if record.element_type != ElementType::Intersection {
                continue;
            }
            let Some(target) = &record.intersects_road else {
                continue;
            };

            let candidates: Vec<ElementId> = records
                .iter()
                .filter(|other| {
                    other.road == *target
                        && other.element_type == ElementType::Intersection
                        && other.intersects_road.as_deref() == Some(record.road.as_str())
                })
                .map(|other| other.id)
                .collect();

            if candidates.len() != 1 {
                return Err(BuildError::UnresolvedIntersection {
                    id: record.id,
                    road: record.road.clone(),
                    target: target.clone(),
                    found: candidates.len(),
                });
            }

            // Each unordered pair is visited from both sides; emit it once.
            let other = candidates[0];
            if record.id < other {
                raw.push((record.id, other, 0.0));
                raw.push((other, record.id, 0.0));
            }
        }

        Ok(Self::from_raw_edges(records.len(), raw))
    }

    /// Assemble the CSR arrays from an unordered edge list.
    fn from_raw_edges(node_count: usize, mut raw: Vec<(ElementId, ElementId, f64)>) -> Self {
        raw.sort_by_key(|&(from, to, _)| (from, to));

        let edge_to: Vec<ElementId> = raw.iter().map(|&(_, to, _)| to).collect();
        let edge_weight_m: Vec<f64> = raw.iter().map(|&(_, _, w)| w).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for &(from, _, _) in &raw {
            node_out_start[from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, raw.len());

        Self {
            node_out_start,
            edge_to,
            edge_weight_m,
        }
    }
}
