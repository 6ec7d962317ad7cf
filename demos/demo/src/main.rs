//! demo — two-road freight simulation for `rust_freightsim`.
//!
//! Simulates trucks on a pair of crossing highways whose bridges degrade
//! stochastically: dual-carriageway bridge pairs on the east-west road, a
//! single-deck bridge on the southern spur, and a mid-range collapse
//! scenario.  Swap the embedded table for a real inventory export to run at
//! country scale.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use ft_core::{BridgeCondition, RoutingKind, SimConfig, Tick};
use ft_infra::CollapseTable;
use ft_network::load_table_reader;
use ft_output::{CsvWriter, MetricsObserver, OutputWriter};
use ft_sim::{CompletionRecord, Model, RunSummary, SimObserver, TickMetrics};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED: u64 = 42;
const TOTAL_TICKS: u64 = 7_200; // 5 simulated days at 1 min/tick
const GENERATION_INTERVAL: u64 = 5;
const PROGRESS_INTERVAL: u64 = 1_440; // one progress line per simulated day

// ── Element table ─────────────────────────────────────────────────────────────

// Two crossing roads, sorted by (road, km), dense ids.  N1 runs west→east
// with two dual-carriageway bridge pairs; N2 branches south at the
// intersection with one single-deck bridge.
const ELEMENT_TABLE_CSV: &str = "\
id,road,km,model_type,name,length,condition,lat,lon,intersec_to
0,N1,0.0,sourcesink,N1 West,0,,23.700,90.400,
1,N1,3.0,link,,3000,,23.701,90.430,
2,N1,6.2,bridge,Kanchpur (R,394,C,23.702,90.462,
3,N1,6.2,bridge,Kanchpur (L,394,C,23.702,90.462,
4,N1,9.0,link,,2800,,23.703,90.490,
5,N1,12.0,intersection,N1/N2,0,,23.704,90.520,N2
6,N1,15.5,link,,3500,,23.705,90.550,
7,N1,19.0,bridge,Meghna (R,930,D,23.706,90.585,
8,N1,19.0,bridge,Meghna (L,930,D,23.706,90.585,
9,N1,22.0,link,,3000,,23.707,90.610,
10,N1,25.0,sourcesink,N1 East,0,,23.708,90.640,
11,N2,0.0,intersection,N2/N1,0,,23.704,90.520,N1
12,N2,4.0,link,,4000,,23.684,90.530,
13,N2,7.5,bridge,Gomti,140,B,23.668,90.540,
14,N2,10.0,link,,2500,,23.656,90.550,
15,N2,14.0,sourcesink,N2 South,0,,23.638,90.560,
";

// ── Progress observer ─────────────────────────────────────────────────────────

/// Wraps the CSV observer with a periodic progress line.
struct ProgressObserver<W: OutputWriter> {
    inner: MetricsObserver<W>,
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_tick_end(&mut self, metrics: &TickMetrics) {
        if metrics.tick.0 % PROGRESS_INTERVAL == PROGRESS_INTERVAL - 1 {
            println!(
                "{:>6}: {:>3} on road | {:>2} collapsed | mean speed {:>5.1} km/h",
                metrics.tick.to_string(),
                metrics.vehicles_on_road,
                metrics.collapsed_total,
                metrics.mean_net_speed_kmh,
            );
        }
        self.inner.on_tick_end(metrics);
    }

    fn on_run_end(&mut self, summary: &RunSummary, completions: &[CompletionRecord]) {
        self.inner.on_run_end(summary, completions);
    }

    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== demo — rust_freightsim ===");
    println!("Seed: {SEED}  |  Ticks: {TOTAL_TICKS}  |  Cadence: every {GENERATION_INTERVAL}");
    println!();

    // 1. Load the embedded element table.
    let records = load_table_reader(std::io::Cursor::new(ELEMENT_TABLE_CSV))?;
    println!("Element table: {} rows", records.len());

    // 2. Collapse scenario: only the worn condition classes are at risk.
    let collapse = CollapseTable::all_zero()
        .with(BridgeCondition::C, 0.05)
        .with(BridgeCondition::D, 0.10);

    // 3. Run configuration.
    let config = SimConfig {
        routing: RoutingKind::Shortest,
        total_ticks: TOTAL_TICKS,
        generation_interval: GENERATION_INTERVAL,
        seed: SEED,
        ..SimConfig::default()
    };

    // 4. Build the model (graph + registry + planner, all from the table).
    let mut model = Model::new(config, &records, &collapse)?;
    println!(
        "Network: {} nodes, {} edges  |  {} sources, {} sinks",
        model.graph.node_count(),
        model.graph.edge_count(),
        model.registry.sources().len(),
        model.registry.sinks().len(),
    );
    println!();

    // 5. Set up CSV output.
    std::fs::create_dir_all("output/demo")?;
    let writer = CsvWriter::new(Path::new("output/demo"))?;
    let mut observer = ProgressObserver {
        inner: MetricsObserver::new(writer),
    };

    // 6. Run.
    let t0 = Instant::now();
    let summary = model.run(&mut observer)?;
    let elapsed = t0.elapsed();
    if let Some(e) = observer.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 7. Summary.
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  vehicles generated : {}", summary.vehicles_generated);
    println!("  vehicles completed : {}", summary.vehicles_completed);
    println!("  mean driving time  : {:.1} min", summary.mean_driving_time_min);
    println!("  mean net speed     : {:.1} km/h", summary.mean_net_speed_kmh);
    println!("  collapsed bridges  : {}", summary.collapsed_total);
    for condition in BridgeCondition::ALL {
        let count = summary.collapsed_by_condition[condition.index()];
        if count > 0 {
            println!("    condition {condition}: {count}");
        }
    }
    println!("  shortest-path cache: {} routes", model.planner.cache().len());
    println!();
    println!("Output written to output/demo/");

    Ok(())
}
