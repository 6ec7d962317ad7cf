//! Tests for ft-output: direct writer behavior plus one end-to-end run
//! through `MetricsObserver`.

#[cfg(test)]
mod csv_writer {
    use crate::writer::OutputWriter;
    use crate::{CompletionRow, CsvWriter, TickMetricsRow};

    fn tick_row(tick: u64) -> TickMetricsRow {
        TickMetricsRow {
            tick,
            vehicles_on_road: 2,
            mean_bridge_delay_min: 0.0,
            mean_driving_time_min: 2.0,
            mean_net_speed_kmh: 30.0,
            collapsed_total: 1,
            collapsed_by_condition: [0, 0, 0, 1, 0],
        }
    }

    #[test]
    fn writes_headers_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvWriter::new(dir.path()).unwrap();

        writer.write_tick(&tick_row(0)).unwrap();
        writer.write_tick(&tick_row(1)).unwrap();
        writer
            .write_completions(&[CompletionRow {
                vehicle_id: 0,
                generated_at: 0,
                removed_at: 2,
                driving_time_min: 2.0,
                net_speed_kmh: 30.0,
                travel_distance_m: 1000.0,
            }])
            .unwrap();
        writer.finish().unwrap();

        let ticks = std::fs::read_to_string(dir.path().join("tick_metrics.csv")).unwrap();
        let tick_lines: Vec<&str> = ticks.lines().collect();
        assert_eq!(tick_lines.len(), 3); // header + 2 rows
        assert!(tick_lines[0].starts_with("tick,vehicles_on_road"));
        assert!(tick_lines[1].starts_with("0,2,"));

        let completions =
            std::fs::read_to_string(dir.path().join("vehicle_completions.csv")).unwrap();
        let completion_lines: Vec<&str> = completions.lines().collect();
        assert_eq!(completion_lines.len(), 2);
        assert_eq!(completion_lines[1], "0,0,2,2,30,1000");
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvWriter::new(dir.path()).unwrap();
        writer.finish().unwrap();
        writer.finish().unwrap();
    }
}

#[cfg(test)]
mod end_to_end {
    use ft_core::{ElementId, GeoPoint, RoutingKind, SimConfig};
    use ft_infra::CollapseTable;
    use ft_network::{ElementRecord, ElementType};
    use ft_sim::Model;

    use crate::{CsvWriter, MetricsObserver};

    fn three_element_road() -> Vec<ElementRecord> {
        let rec = |id: u32, km: f64, ty: ElementType, length: f64| ElementRecord {
            id: ElementId(id),
            road: "N1".to_owned(),
            km,
            element_type: ty,
            name: String::new(),
            length_m: length,
            condition: None,
            pos: GeoPoint::new(23.7, 90.4 + km),
            intersects_road: None,
        };
        vec![
            rec(0, 0.0, ElementType::Source, 0.0),
            rec(1, 0.5, ElementType::Link, 1000.0),
            rec(2, 1.0, ElementType::Sink, 0.0),
        ]
    }

    #[test]
    fn full_run_produces_both_files() {
        let config = SimConfig {
            routing: RoutingKind::Straight,
            total_ticks: 10,
            generation_interval: 5,
            seed: 1,
            ..SimConfig::default()
        };
        let mut model =
            Model::new(config, &three_element_road(), &CollapseTable::all_zero()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut observer = MetricsObserver::new(writer);

        let summary = model.run(&mut observer).unwrap();
        assert!(observer.take_error().is_none());
        assert_eq!(summary.vehicles_completed, 2);

        let ticks = std::fs::read_to_string(dir.path().join("tick_metrics.csv")).unwrap();
        assert_eq!(ticks.lines().count(), 1 + 10); // header + one row per tick

        let completions =
            std::fs::read_to_string(dir.path().join("vehicle_completions.csv")).unwrap();
        assert_eq!(completions.lines().count(), 1 + 2); // header + 2 vehicles
    }
}
