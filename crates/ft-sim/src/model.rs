//! The `Model` struct and its tick loop.

use log::warn;

use ft_core::{ElementId, SimClock, SimConfig, SimRng, Tick, VehicleId};
use ft_infra::{CollapseTable, CollapseTally, DelayProfile, ElementKind, ElementRegistry};
use ft_network::{ElementRecord, RoadGraph, RoutePlanner};

use crate::metrics::{completion_means, CompletionRecord, RunSummary, TickMetrics};
use crate::observer::SimObserver;
use crate::vehicle::{self, Vehicle};
use crate::{SimError, SimResult};

/// One simulation instance: the scheduler plus everything it schedules.
///
/// All state — the RNG stream, the vehicle id counter, the collapse tally —
/// is a field of this struct and constructed fresh per run, so independent
/// instances (different seeds, different collapse tables) never share
/// anything mutable and can be driven in parallel by an outer orchestrator.
pub struct Model {
    /// Run configuration (routing strategy, cadence, seed, …).
    pub config: SimConfig,

    /// The tick counter.
    pub clock: SimClock,

    /// Every element's mutable state, indexed by id in table order.
    pub registry: ElementRegistry,

    /// The weighted graph derived from the same table.  Immutable.
    pub graph: RoadGraph,

    /// Straight-path table, route cache, and strategy dispatch.
    pub planner: RoutePlanner,

    /// Length-bucketed bridge delay distributions.
    pub delay_profile: DelayProfile,

    /// The run's single random stream (see `ft_core::rng` for the ordering
    /// invariant).
    pub rng: SimRng,

    /// Live vehicles in registration order.  Removed vehicles are compacted
    /// out at tick end; survivors are never reordered.
    pub vehicles: Vec<Vehicle>,

    /// Per-condition collapsed-bridge counters.
    pub tally: CollapseTally,

    /// One record per vehicle that reached a sink.
    pub completions: Vec<CompletionRecord>,

    /// Monotonic id counter shared by all sources of this instance.
    next_vehicle_id: u32,
}

impl Model {
    /// Build a model from the finalized element table and the run's
    /// collapse-probability table.
    ///
    /// Construction is all-or-nothing: any table defect (id gaps, unresolved
    /// intersections, unrated bridges, probabilities outside [0, 1]) aborts
    /// here with no partially built model.
    pub fn new(
        config: SimConfig,
        records: &[ElementRecord],
        collapse: &CollapseTable,
    ) -> SimResult<Self> {
        if config.generation_interval == 0 {
            return Err(SimError::Config(
                "generation_interval must be at least 1".into(),
            ));
        }
        if config.tick_minutes <= 0.0 {
            return Err(SimError::Config("tick_minutes must be positive".into()));
        }

        let graph = RoadGraph::from_table(records).map_err(ft_network::NetworkError::Build)?;
        let registry = ElementRegistry::from_table(records, collapse)?;
        let planner = RoutePlanner::new(config.routing, records);
        let delay_profile = DelayProfile::new()?;

        Ok(Self {
            clock: config.make_clock(),
            rng: SimRng::new(config.seed),
            config,
            registry,
            graph,
            planner,
            delay_profile,
            vehicles: Vec::new(),
            tally: CollapseTally::new(),
            completions: Vec::new(),
            next_vehicle_id: 0,
        })
    }

    /// Total vehicles generated so far (the id counter).
    pub fn vehicles_generated(&self) -> u64 {
        self.next_vehicle_id as u64
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run `config.total_ticks` ticks, invoking the observer at each tick
    /// boundary and once at run end.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunSummary> {
        for _ in 0..self.config.total_ticks {
            observer.on_tick_start(self.clock.current_tick);
            let metrics = self.step()?;
            observer.on_tick_end(&metrics);
        }
        let summary = self.summary();
        observer.on_run_end(&summary, &self.completions);
        Ok(summary)
    }

    /// Run exactly `n` ticks from the current position (ignores
    /// `total_ticks`).  Useful for tests and incremental stepping.
    pub fn run_ticks(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Advance the simulation by one tick and sample the tick's metrics.
    pub fn step(&mut self) -> SimResult<TickMetrics> {
        let now = self.clock.current_tick;

        // Vehicles appended during the infrastructure pass below are first
        // stepped next tick; the vehicle pass walks the tick-start roster.
        let roster = self.vehicles.len();

        // ── Phase 1: infrastructure pass (table order) ────────────────────
        for i in 0..self.registry.len() {
            let id = ElementId(i as u32);

            let element = self.registry.element_mut(id);
            if let ElementKind::Bridge(bridge) = &mut element.kind {
                if bridge.evaluate_collapse(&mut self.rng) {
                    let condition = bridge.condition;
                    self.tally.record(condition);
                }
                continue;
            }

            if !element.is_source() {
                continue;
            }
            if now.0 % self.config.generation_interval == 0 {
                self.generate_vehicle(id, now);
            } else {
                self.registry.element_mut(id).set_generated_flag(false);
            }
        }

        // ── Phase 2: vehicle pass (registration order) ────────────────────
        for i in 0..roster {
            // Removal only happens inside a vehicle's own step, but guard
            // anyway so a removed agent is never stepped twice.
            if self.vehicles[i].removed_at.is_some() {
                continue;
            }
            vehicle::step_vehicle(
                &mut self.vehicles[i],
                &mut self.registry,
                &self.config,
                &self.delay_profile,
                &mut self.rng,
                now,
                &mut self.completions,
            )?;
        }
        // Compact removed vehicles; survivors keep their relative order.
        self.vehicles.retain(|v| v.removed_at.is_none());

        // ── Phase 3: metrics (sampled after stepping, every tick) ─────────
        let metrics = self.sample_metrics(now);

        // ── Phase 4: clock ────────────────────────────────────────────────
        self.clock.advance();
        Ok(metrics)
    }

    /// Generate one vehicle at `origin` and plan its route immediately.
    ///
    /// A planning failure is fatal for this cadence slot only: it is logged
    /// with the tick and source id, the slot is skipped, and the run goes on.
    fn generate_vehicle(&mut self, origin: ElementId, now: Tick) {
        let plan = self
            .planner
            .plan(origin, self.registry.sinks(), &self.graph, &mut self.rng);

        match plan {
            Ok(route) => {
                let id = VehicleId(self.next_vehicle_id);
                self.next_vehicle_id += 1;

                self.vehicles.push(Vehicle::new(id, origin, route, now));

                let element = self.registry.element_mut(origin);
                element.enter();
                element.set_generated_flag(true);
            }
            Err(e) => {
                warn!("tick {now}: source {origin} skipped generation: {e}");
                self.registry.element_mut(origin).set_generated_flag(false);
            }
        }
    }

    fn sample_metrics(&self, now: Tick) -> TickMetrics {
        let (mean_driving_time_min, mean_net_speed_kmh) = completion_means(&self.completions);
        TickMetrics {
            tick: now,
            vehicles_on_road: self.vehicles.len(),
            mean_bridge_delay_min: self.registry.mean_bridge_delay_min(),
            mean_driving_time_min,
            mean_net_speed_kmh,
            collapsed_total: self.tally.total(),
            collapsed_by_condition: self.tally.counts(),
        }
    }

    /// The run-end aggregate set.
    pub fn summary(&self) -> RunSummary {
        let (mean_driving_time_min, mean_net_speed_kmh) = completion_means(&self.completions);
        RunSummary {
            ticks: self.clock.current_tick.0,
            vehicles_generated: self.vehicles_generated(),
            vehicles_completed: self.completions.len() as u64,
            mean_driving_time_min,
            mean_net_speed_kmh,
            mean_bridge_delay_min: self.registry.mean_bridge_delay_min(),
            collapsed_total: self.tally.total(),
            collapsed_by_condition: self.tally.counts(),
        }
    }
}
