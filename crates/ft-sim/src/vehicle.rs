//! The vehicle agent and its per-tick movement state machine.
//!
//! A vehicle is either driving (consuming a fixed distance budget along its
//! path) or waiting (counting down a bridge delay).  Movement across element
//! boundaries is an explicit loop bounded by the path length — never
//! recursion — so a pathological table cannot blow the stack.

use ft_core::{ElementId, SimConfig, SimRng, Tick, VehicleId};
use ft_infra::{DelayProfile, ElementKind, ElementRegistry};
use ft_network::Route;

use crate::metrics::CompletionRecord;
use crate::{SimError, SimResult};

// ── Vehicle ───────────────────────────────────────────────────────────────────

/// Movement state of a vehicle.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum VehicleState {
    /// Consuming the distance budget along the path.
    Drive,
    /// Blocked at a collapsed bridge.
    Wait,
}

/// What a vehicle step produced.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum VehicleOutcome {
    /// Still on the road.
    Continue,
    /// Reached a sink and was deregistered; do not step it again.
    Removed,
}

/// One freight truck.
///
/// The vehicle holds element *ids*, never element references; every lookup
/// goes through the registry, which stays the single owner of element state.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: VehicleId,
    pub state: VehicleState,

    /// The element currently occupied.
    pub location: ElementId,
    /// Metres from the start of `location`; `0 ≤ offset_m < length` except
    /// transiently during computation.
    pub offset_m: f64,

    /// The full origin→destination id path, fixed at generation.
    pub path: Vec<ElementId>,
    /// Pointer into `path`; `path[path_index] == location` while driving.
    pub path_index: usize,

    /// Minutes left before resuming drive; floor 0.
    pub waiting_min: f64,
    /// The element this vehicle last finished waiting at.
    pub waited_at: Option<ElementId>,

    pub generated_at: Tick,
    /// Set exactly once, when a sink removes the vehicle.
    pub removed_at: Option<Tick>,

    /// Total path length in metres, fixed at generation.
    pub travel_distance_m: f64,
}

impl Vehicle {
    /// A freshly generated vehicle sitting at offset 0 of its origin.
    pub fn new(id: VehicleId, origin: ElementId, route: Route, generated_at: Tick) -> Self {
        Self {
            id,
            state: VehicleState::Drive,
            location: origin,
            offset_m: 0.0,
            travel_distance_m: route.total_m,
            path: route.path,
            path_index: 0,
            waiting_min: 0.0,
            waited_at: None,
            generated_at,
            removed_at: None,
        }
    }
}

// ── Per-tick step ─────────────────────────────────────────────────────────────

/// Advance one vehicle by one tick.
///
/// Free function rather than a method so the scheduler can borrow the
/// vehicle, the registry, and the RNG as disjoint model fields.
pub fn step_vehicle(
    vehicle: &mut Vehicle,
    registry: &mut ElementRegistry,
    config: &SimConfig,
    profile: &DelayProfile,
    rng: &mut SimRng,
    now: Tick,
    completions: &mut Vec<CompletionRecord>,
) -> SimResult<VehicleOutcome> {
    if vehicle.state == VehicleState::Wait {
        vehicle.waiting_min = (vehicle.waiting_min - config.tick_minutes).max(0.0);
        if vehicle.waiting_min == 0.0 {
            vehicle.waited_at = Some(vehicle.location);
            vehicle.state = VehicleState::Drive;
        }
    }

    // A wait that just expired resumes driving in the same tick.
    if vehicle.state == VehicleState::Drive {
        return drive(vehicle, registry, config, profile, rng, now, completions);
    }
    Ok(VehicleOutcome::Continue)
}

fn drive(
    vehicle: &mut Vehicle,
    registry: &mut ElementRegistry,
    config: &SimConfig,
    profile: &DelayProfile,
    rng: &mut SimRng,
    now: Tick,
    completions: &mut Vec<CompletionRecord>,
) -> SimResult<VehicleOutcome> {
    let budget = config.distance_per_tick();
    let length = registry.element(vehicle.location).length_m;
    let distance_rest = vehicle.offset_m + budget - length;

    if distance_rest <= 0.0 {
        // Stays on the current element.
        vehicle.offset_m += budget;
        return Ok(VehicleOutcome::Continue);
    }
    advance(vehicle, distance_rest, registry, config, profile, rng, now, completions)
}

/// Carry `leftover` metres of budget across the next path element(s).
///
/// Each iteration consumes one path entry, so the loop is bounded by the
/// path length.
fn advance(
    vehicle: &mut Vehicle,
    mut leftover: f64,
    registry: &mut ElementRegistry,
    config: &SimConfig,
    profile: &DelayProfile,
    rng: &mut SimRng,
    now: Tick,
    completions: &mut Vec<CompletionRecord>,
) -> SimResult<VehicleOutcome> {
    loop {
        vehicle.path_index += 1;
        let Some(&next_id) = vehicle.path.get(vehicle.path_index) else {
            return Err(SimError::PathExhausted {
                vehicle: vehicle.id,
                location: vehicle.location,
                tick: now,
            });
        };

        // Sinks terminate the journey regardless of remaining budget.
        if registry.element(next_id).is_sink() {
            arrive(vehicle, registry, next_id, 0.0);
            complete(vehicle, registry, config, now, completions);
            return Ok(VehicleOutcome::Removed);
        }

        // `location` is still the element the vehicle actually occupies —
        // pass-through hops below never update it — so the heading for the
        // bridge-side rule is taken from there.
        let prev_lon = registry.lon_of(vehicle.location);
        let next = registry.element_mut(next_id);
        let next_length = next.length_m;

        if let ElementKind::Bridge(bridge) = &mut next.kind {
            if config.skip_policy.should_skip(&next.name, prev_lon, next.pos.lon) {
                // Wrong-side structure of a directional pair: carry on past
                // it without consuming it as a stop.
                continue;
            }
            let delay = bridge.sample_delay(next_length, profile, rng);
            if delay > 0.0 {
                arrive(vehicle, registry, next_id, 0.0);
                vehicle.waiting_min = delay;
                vehicle.state = VehicleState::Wait;
                return Ok(VehicleOutcome::Continue);
            }
        }

        if next_length > leftover {
            // The budget runs out inside this element.
            arrive(vehicle, registry, next_id, leftover);
            return Ok(VehicleOutcome::Continue);
        }
        leftover -= next_length;
    }
}

/// Move the vehicle onto `next_id`, keeping occupancy counts in sync.
fn arrive(vehicle: &mut Vehicle, registry: &mut ElementRegistry, next_id: ElementId, offset_m: f64) {
    registry.element_mut(vehicle.location).depart();
    vehicle.location = next_id;
    vehicle.offset_m = offset_m;
    registry.element_mut(next_id).enter();
}

/// Finish the journey at the sink the vehicle currently occupies.
fn complete(
    vehicle: &mut Vehicle,
    registry: &mut ElementRegistry,
    config: &SimConfig,
    now: Tick,
    completions: &mut Vec<CompletionRecord>,
) {
    vehicle.removed_at = Some(now);

    let driving_time_min = now.since(vehicle.generated_at) as f64 * config.tick_minutes;
    let net_speed_kmh = (vehicle.travel_distance_m / 1000.0) / (driving_time_min / 60.0);

    completions.push(CompletionRecord {
        vehicle: vehicle.id,
        generated_at: vehicle.generated_at,
        removed_at: now,
        driving_time_min,
        net_speed_kmh,
        travel_distance_m: vehicle.travel_distance_m,
    });

    registry.element_mut(vehicle.location).toggle_removed();
}
