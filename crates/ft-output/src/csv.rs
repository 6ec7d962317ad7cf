//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tick_metrics.csv`
//! - `vehicle_completions.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CompletionRow, OutputResult, TickMetricsRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    ticks: Writer<File>,
    completions: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut ticks = Writer::from_path(dir.join("tick_metrics.csv"))?;
        ticks.write_record([
            "tick",
            "vehicles_on_road",
            "mean_bridge_delay_min",
            "mean_driving_time_min",
            "mean_net_speed_kmh",
            "collapsed_total",
            "collapsed_a",
            "collapsed_b",
            "collapsed_c",
            "collapsed_d",
            "collapsed_x",
        ])?;

        let mut completions = Writer::from_path(dir.join("vehicle_completions.csv"))?;
        completions.write_record([
            "vehicle_id",
            "generated_at",
            "removed_at",
            "driving_time_min",
            "net_speed_kmh",
            "travel_distance_m",
        ])?;

        Ok(Self {
            ticks,
            completions,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick(&mut self, row: &TickMetricsRow) -> OutputResult<()> {
        let [a, b, c, d, x] = row.collapsed_by_condition;
        self.ticks.write_record(&[
            row.tick.to_string(),
            row.vehicles_on_road.to_string(),
            row.mean_bridge_delay_min.to_string(),
            row.mean_driving_time_min.to_string(),
            row.mean_net_speed_kmh.to_string(),
            row.collapsed_total.to_string(),
            a.to_string(),
            b.to_string(),
            c.to_string(),
            d.to_string(),
            x.to_string(),
        ])?;
        Ok(())
    }

    fn write_completions(&mut self, rows: &[CompletionRow]) -> OutputResult<()> {
        for row in rows {
            self.completions.write_record(&[
                row.vehicle_id.to_string(),
                row.generated_at.to_string(),
                row.removed_at.to_string(),
                row.driving_time_min.to_string(),
                row.net_speed_kmh.to_string(),
                row.travel_distance_m.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.ticks.flush()?;
        self.completions.flush()?;
        Ok(())
    }
}
