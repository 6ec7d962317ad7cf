//! The element registry: every table row as a typed, stateful element.

use ft_core::ElementId;
use ft_network::{check_contiguous_ids, ElementRecord, ElementType};

use crate::bridge::{BridgeState, CollapseTable};
use crate::element::{Element, ElementKind};
use crate::{InfraError, InfraResult};

/// The typed collection of network elements, indexed by `ElementId`.
///
/// The registry is a read-only lookup table as far as topology goes —
/// vehicles hold element *ids*, never references, and resolve them here.
/// Only occupancy counts and per-kind state (flags, bridge collapse) mutate
/// during a run.
#[derive(Debug)]
pub struct ElementRegistry {
    /// One element per table row; `elements[id.index()].id == id`.
    pub elements: Vec<Element>,

    sources: Vec<ElementId>,
    sinks: Vec<ElementId>,
}

impl ElementRegistry {
    /// Build the registry from the finalized element table.
    ///
    /// Bridge rows must carry a condition that appears in `collapse` with a
    /// probability inside [0, 1]; anything else aborts construction.
    pub fn from_table(records: &[ElementRecord], collapse: &CollapseTable) -> InfraResult<Self> {
        check_contiguous_ids(records)?;

        let mut elements = Vec::with_capacity(records.len());
        let mut sources = Vec::new();
        let mut sinks = Vec::new();

        for record in records {
            let kind = match record.element_type {
                ElementType::Source => {
                    sources.push(record.id);
                    ElementKind::Source {
                        generated_flag: false,
                    }
                }
                ElementType::Sink => {
                    sinks.push(record.id);
                    ElementKind::Sink {
                        removed_toggle: false,
                    }
                }
                ElementType::SourceSink => {
                    sources.push(record.id);
                    sinks.push(record.id);
                    ElementKind::SourceSink {
                        generated_flag: false,
                        removed_toggle: false,
                    }
                }
                ElementType::Bridge => ElementKind::Bridge(build_bridge(record, collapse)?),
                ElementType::Link => ElementKind::Link,
                ElementType::Intersection => ElementKind::Intersection,
            };

            elements.push(Element {
                id: record.id,
                name: record.name.clone(),
                road: record.road.clone(),
                length_m: record.length_m,
                pos: record.pos,
                vehicle_count: 0,
                kind,
            });
        }

        Ok(Self {
            elements,
            sources,
            sinks,
        })
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// The element with the given id.  Ids come from the same table the
    /// registry was built from, so direct indexing is safe by construction.
    #[inline]
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }

    #[inline]
    pub fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.index()]
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Ids of all generating elements, in table order.
    pub fn sources(&self) -> &[ElementId] {
        &self.sources
    }

    /// Ids of all removing elements, in table order.
    pub fn sinks(&self) -> &[ElementId] {
        &self.sinks
    }

    // ── Observability ─────────────────────────────────────────────────────

    /// Number of bridges per condition class (dense, indexed like
    /// [`ft_core::BridgeCondition::ALL`]).
    pub fn condition_census(&self) -> [u64; 5] {
        let mut census = [0u64; 5];
        for element in &self.elements {
            if let Some(bridge) = element.bridge() {
                census[bridge.condition.index()] += 1;
            }
        }
        census
    }

    /// Mean of the bridges' most recently sampled delay, in minutes.
    /// 0 when the network has no bridges.
    pub fn mean_bridge_delay_min(&self) -> f64 {
        let mut sum = 0.0;
        let mut count = 0u64;
        for element in &self.elements {
            if let Some(bridge) = element.bridge() {
                sum += bridge.delay_min;
                count += 1;
            }
        }
        if count == 0 { 0.0 } else { sum / count as f64 }
    }

    /// Longitude of an element, for the directional bridge-side rule.
    #[inline]
    pub fn lon_of(&self, id: ElementId) -> f64 {
        self.element(id).pos.lon
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn build_bridge(record: &ElementRecord, collapse: &CollapseTable) -> InfraResult<BridgeState> {
    let condition = record.condition.ok_or_else(|| InfraError::MissingCondition {
        id: record.id,
        name: record.name.clone(),
    })?;

    let chance = collapse
        .chance(condition)
        .ok_or_else(|| InfraError::UnknownCondition {
            id: record.id,
            name: record.name.clone(),
            condition,
        })?;

    if !(0.0..=1.0).contains(&chance) {
        return Err(InfraError::InvalidChance { condition, chance });
    }

    Ok(BridgeState::new(condition, chance))
}
