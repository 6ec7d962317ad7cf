//! Unit tests for ft-network.
//!
//! All tests use a hand-crafted two-road table so they run without any CSV
//! file on disk.

#[cfg(test)]
mod helpers {
    use ft_core::{BridgeCondition, ElementId, GeoPoint};

    use crate::table::{ElementRecord, ElementType};

    pub fn rec(
        id: u32,
        road: &str,
        km: f64,
        element_type: ElementType,
        name: &str,
        length_m: f64,
        condition: Option<BridgeCondition>,
        lon: f64,
        intersects_road: Option<&str>,
    ) -> ElementRecord {
        ElementRecord {
            id: ElementId(id),
            road: road.to_owned(),
            km,
            element_type,
            name: name.to_owned(),
            length_m,
            condition,
            pos: GeoPoint::new(23.7, lon),
            intersects_road: intersects_road.map(str::to_owned),
        }
    }

    /// Two crossing roads:
    ///
    /// ```text
    /// N1:  0 ──2km── 1 ──3km── 2 ──3km── 3 ──2km── 4
    ///                          │ (zero-weight crossing)
    /// N2:                      5 ──3km── 6 ──4km── 7
    /// ```
    ///
    /// 0, 4, 7 are sourcesinks; 2 and 5 are the matched intersection pair;
    /// 3 is a right-side bridge.
    pub fn two_road_table() -> Vec<ElementRecord> {
        use ElementType::*;
        vec![
            rec(0, "N1", 0.0, SourceSink, "N1 start", 0.0, None, 90.40, None),
            rec(1, "N1", 2.0, Link, "", 2000.0, None, 90.42, None),
            rec(2, "N1", 5.0, Intersection, "N1/N2", 0.0, None, 90.45, Some("N2")),
            rec(
                3,
                "N1",
                8.0,
                Bridge,
                "Meghna (R",
                300.0,
                Some(ft_core::BridgeCondition::C),
                90.48,
                None,
            ),
            rec(4, "N1", 10.0, SourceSink, "N1 end", 0.0, None, 90.50, None),
            rec(5, "N2", 0.0, Intersection, "N2/N1", 0.0, None, 90.45, Some("N1")),
            rec(6, "N2", 3.0, Link, "", 3000.0, None, 90.47, None),
            rec(7, "N2", 7.0, SourceSink, "N2 end", 0.0, None, 90.51, None),
        ]
    }
}

// ── Table loading ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod table {
    use std::io::Cursor;

    use ft_core::BridgeCondition;

    use crate::table::{load_table_reader, ElementType};
    use crate::NetworkError;

    const TABLE_CSV: &str = "\
id,road,km,model_type,name,length,condition,lat,lon,intersec_to\n\
0,N1,0.0,sourcesink,N1 start,0,,23.70,90.40,\n\
1,N1,2.5,bridge,Kanchpur (R,300,C,23.70,90.42,\n\
2,N1,9.1,intersection,N1/N2,0,,23.71,90.48,N2\n\
3,N1,25.0,sink,N1 end,0,,23.72,90.60,\n\
";

    #[test]
    fn parses_rows_and_tags() {
        let records = load_table_reader(Cursor::new(TABLE_CSV)).unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].element_type, ElementType::SourceSink);
        assert_eq!(records[1].element_type, ElementType::Bridge);
        assert_eq!(records[1].condition, Some(BridgeCondition::C));
        assert_eq!(records[1].length_m, 300.0);
        assert_eq!(records[2].intersects_road.as_deref(), Some("N2"));
        assert_eq!(records[3].condition, None);
    }

    #[test]
    fn generates_and_removes_flags() {
        assert!(ElementType::SourceSink.generates());
        assert!(ElementType::SourceSink.removes());
        assert!(ElementType::Source.generates());
        assert!(!ElementType::Source.removes());
        assert!(!ElementType::Link.generates());
    }

    #[test]
    fn unknown_model_type_is_parse_error() {
        let csv = "id,road,km,model_type,name,length,condition,lat,lon,intersec_to\n\
                   0,N1,0.0,tunnel,,0,,23.7,90.4,\n";
        let err = load_table_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, NetworkError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn unknown_condition_is_parse_error() {
        let csv = "id,road,km,model_type,name,length,condition,lat,lon,intersec_to\n\
                   0,N1,0.0,bridge,B1,100,F,23.7,90.4,\n";
        let err = load_table_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, NetworkError::Parse(_)), "got {err:?}");
    }
}

// ── Graph construction ────────────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use ft_core::ElementId;

    use super::helpers::{rec, two_road_table};
    use crate::table::ElementType;
    use crate::{BuildError, RoadGraph};

    #[test]
    fn chainage_edges_both_directions() {
        let graph = RoadGraph::from_table(&two_road_table()).unwrap();
        // 4 N1 segments + 2 N2 segments, doubled, plus the crossing pair.
        assert_eq!(graph.edge_count(), (4 + 2) * 2 + 2);

        // 0 → 1 weighs 2 km in metres, in both directions.
        let forward = graph
            .out_edges(ElementId(0))
            .find(|&e| graph.edge_to[e] == ElementId(1))
            .unwrap();
        assert_eq!(graph.edge_weight_m[forward], 2000.0);
        let backward = graph
            .out_edges(ElementId(1))
            .find(|&e| graph.edge_to[e] == ElementId(0))
            .unwrap();
        assert_eq!(graph.edge_weight_m[backward], 2000.0);
    }

    #[test]
    fn intersection_crossing_edge_is_zero_weight() {
        let graph = RoadGraph::from_table(&two_road_table()).unwrap();
        let crossing = graph
            .out_edges(ElementId(2))
            .find(|&e| graph.edge_to[e] == ElementId(5))
            .expect("crossing edge 2 → 5 missing");
        assert_eq!(graph.edge_weight_m[crossing], 0.0);
        // And the reverse direction exists too.
        assert!(graph
            .out_edges(ElementId(5))
            .any(|e| graph.edge_to[e] == ElementId(2)));
    }

    #[test]
    fn unresolved_intersection_fails_build() {
        let mut records = two_road_table();
        // Break the back-reference on N2's intersection row.
        records[5].intersects_road = Some("N7".to_owned());
        let err = RoadGraph::from_table(&records).unwrap_err();
        assert!(
            matches!(err, BuildError::UnresolvedIntersection { found: 0, .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn ambiguous_intersection_fails_build() {
        let mut records = two_road_table();
        // A second N2 row also claiming to cross N1.
        records.push(rec(
            8,
            "N2",
            7.5,
            ElementType::Intersection,
            "dup",
            0.0,
            None,
            90.52,
            Some("N1"),
        ));
        let err = RoadGraph::from_table(&records).unwrap_err();
        assert!(
            matches!(err, BuildError::UnresolvedIntersection { found: 2, .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn id_gap_fails_build() {
        let mut records = two_road_table();
        records[3].id = ElementId(9);
        let err = RoadGraph::from_table(&records).unwrap_err();
        assert!(
            matches!(
                err,
                BuildError::NonContiguousIds {
                    row: 3,
                    found: 9,
                    expected: 3
                }
            ),
            "got {err:?}"
        );
    }

    #[test]
    fn path_weight_follows_edges() {
        let graph = RoadGraph::from_table(&two_road_table()).unwrap();
        let path = [ElementId(0), ElementId(1), ElementId(2), ElementId(5)];
        assert_eq!(graph.path_weight(&path), Some(5000.0));
        // 0 and 5 are not adjacent.
        assert_eq!(graph.path_weight(&[ElementId(0), ElementId(5)]), None);
    }
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use ft_core::ElementId;

    use super::helpers::two_road_table;
    use crate::{dijkstra, NetworkError, RoadGraph};

    #[test]
    fn trivial_same_node() {
        let graph = RoadGraph::from_table(&two_road_table()).unwrap();
        let route = dijkstra(&graph, ElementId(0), ElementId(0)).unwrap();
        assert!(route.is_trivial());
        assert_eq!(route.total_m, 0.0);
    }

    #[test]
    fn crosses_roads_through_intersection() {
        let graph = RoadGraph::from_table(&two_road_table()).unwrap();
        let route = dijkstra(&graph, ElementId(0), ElementId(7)).unwrap();
        // N1 to the crossing (5 km), zero-weight hop, N2 to its end (7 km).
        assert_eq!(
            route.path,
            vec![
                ElementId(0),
                ElementId(1),
                ElementId(2),
                ElementId(5),
                ElementId(6),
                ElementId(7)
            ]
        );
        assert_eq!(route.total_m, 12_000.0);
    }

    #[test]
    fn unreachable_is_no_route() {
        let mut records = two_road_table();
        // Orphan road with no intersection: unreachable from N1.
        records[5].element_type = crate::table::ElementType::Link;
        records[5].intersects_road = None;
        records[2].element_type = crate::table::ElementType::Link;
        records[2].intersects_road = None;
        let graph = RoadGraph::from_table(&records).unwrap();
        let err = dijkstra(&graph, ElementId(0), ElementId(7)).unwrap_err();
        assert!(matches!(err, NetworkError::NoRoute { .. }), "got {err:?}");
    }

    #[test]
    fn repeated_queries_are_identical() {
        let graph = RoadGraph::from_table(&two_road_table()).unwrap();
        let a = dijkstra(&graph, ElementId(0), ElementId(7)).unwrap();
        let b = dijkstra(&graph, ElementId(0), ElementId(7)).unwrap();
        assert_eq!(a, b);
    }
}

// ── Route planner ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod planner {
    use ft_core::{ElementId, RoutingKind, SimRng};

    use super::helpers::two_road_table;
    use crate::{NetworkError, RoadGraph, RoutePlanner};

    fn setup(kind: RoutingKind) -> (RoadGraph, RoutePlanner) {
        let records = two_road_table();
        let graph = RoadGraph::from_table(&records).unwrap();
        let planner = RoutePlanner::new(kind, &records);
        (graph, planner)
    }

    #[test]
    fn straight_table_forward_and_reverse() {
        let (_, planner) = setup(RoutingKind::Straight);

        let forward = planner
            .straight_route(ElementId(0), Some(ElementId(4)))
            .unwrap();
        let reverse = planner
            .straight_route(ElementId(4), Some(ElementId(0)))
            .unwrap();

        // Reversing a straight path swaps its endpoints and mirrors the
        // element sequence; the length is unchanged.
        let mut mirrored = forward.path.clone();
        mirrored.reverse();
        assert_eq!(reverse.path, mirrored);
        assert_eq!(reverse.total_m, forward.total_m);
        assert_eq!(forward.total_m, 10_000.0);
    }

    #[test]
    fn straight_strategy_uses_open_key() {
        let (graph, mut planner) = setup(RoutingKind::Straight);
        let mut rng = SimRng::new(1);
        let route = planner
            .plan(ElementId(4), &[ElementId(0)], &graph, &mut rng)
            .unwrap();
        // From id 4 the straight path runs N1 backwards to id 0.
        assert_eq!(route.path.first(), Some(&ElementId(4)));
        assert_eq!(route.path.last(), Some(&ElementId(0)));
    }

    #[test]
    fn straight_from_mid_road_element_fails() {
        let (graph, mut planner) = setup(RoutingKind::Straight);
        let mut rng = SimRng::new(1);
        let err = planner
            .plan(ElementId(1), &[], &graph, &mut rng)
            .unwrap_err();
        assert!(matches!(err, NetworkError::NoStraightRoute { .. }));
    }

    #[test]
    fn random_strategy_returns_straight_entry() {
        let (graph, mut planner) = setup(RoutingKind::Random);
        let mut rng = SimRng::new(1);
        // Only one eligible sink → the draw is forced.
        let route = planner
            .plan(ElementId(0), &[ElementId(4)], &graph, &mut rng)
            .unwrap();
        assert_eq!(route.path.last(), Some(&ElementId(4)));
        assert_eq!(route.total_m, 10_000.0);
    }

    #[test]
    fn random_strategy_missing_pair_is_no_route() {
        let (graph, mut planner) = setup(RoutingKind::Random);
        let mut rng = SimRng::new(1);
        // id 7 is on N2; there is no straight N1-table entry (0, 7).
        let err = planner
            .plan(ElementId(0), &[ElementId(7)], &graph, &mut rng)
            .unwrap_err();
        assert!(matches!(err, NetworkError::NoRoute { .. }), "got {err:?}");
    }

    #[test]
    fn no_distinct_sink_is_no_destination() {
        let (graph, mut planner) = setup(RoutingKind::Random);
        let mut rng = SimRng::new(1);
        let err = planner
            .plan(ElementId(0), &[ElementId(0)], &graph, &mut rng)
            .unwrap_err();
        assert!(matches!(err, NetworkError::NoDestination { .. }));
    }

    #[test]
    fn shortest_strategy_fills_cache() {
        let (graph, mut planner) = setup(RoutingKind::Shortest);
        let mut rng = SimRng::new(1);
        assert!(planner.cache().is_empty());

        let route = planner
            .plan(ElementId(0), &[ElementId(7)], &graph, &mut rng)
            .unwrap();
        assert_eq!(route.total_m, 12_000.0);
        assert_eq!(planner.cache().len(), 1);

        // Second query hits the cache and returns the same route.
        let again = planner
            .plan(ElementId(0), &[ElementId(7)], &graph, &mut rng)
            .unwrap();
        assert_eq!(again, route);
        assert_eq!(planner.cache().len(), 1);
    }

    #[test]
    fn same_seed_same_cache() {
        let sinks = [ElementId(4), ElementId(7)];

        let run = |seed: u64| {
            let (graph, mut planner) = setup(RoutingKind::Shortest);
            let mut rng = SimRng::new(seed);
            for _ in 0..20 {
                let _ = planner.plan(ElementId(0), &sinks, &graph, &mut rng);
            }
            let mut keys: Vec<_> = planner.cache().keys().copied().collect();
            keys.sort();
            keys
        };

        assert_eq!(run(42), run(42));
    }
}
