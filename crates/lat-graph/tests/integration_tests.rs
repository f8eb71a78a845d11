//! Integration tests for the latency graph engine
//!
//! These tests verify end-to-end behavior of the explorer including:
//! - Graph construction over the reference catalog and custom catalogs
//! - Provider, category and latency band filtering
//! - Historical series and stats for a selection
//! - Refresh ticks keeping connection identity

use std::sync::Arc;

use lat_geo::{
    CatalogConfig, FilterState, LatencyRange, Location, LocationCatalog, LocationKind, Provider,
    TimeRange,
};
use lat_graph::{ConnectionGraphBuilder, ExplorerConfig, ExplorerEvent, LatencyExplorer};

// ============================================================================
// Helper Functions
// ============================================================================

mod helpers {
    use super::*;

    /// Create a seeded explorer over the reference catalog
    pub fn explorer_with_seed(seed: u64) -> LatencyExplorer {
        let config = ExplorerConfig {
            seed: Some(seed),
            ..Default::default()
        };
        LatencyExplorer::with_config(Arc::new(LocationCatalog::reference()), config)
    }

    /// Create a seeded explorer over a custom catalog
    pub fn explorer_over(catalog: LocationCatalog, seed: u64, filters: FilterState) -> LatencyExplorer {
        let config = ExplorerConfig {
            seed: Some(seed),
            filters,
            ..Default::default()
        };
        LatencyExplorer::with_config(Arc::new(catalog), config)
    }

    /// One exchange and one region at the same spot, so latency is pure jitter
    pub fn colocated_catalog() -> LocationCatalog {
        LocationCatalog::from_config(CatalogConfig {
            exchanges: vec![Location::exchange("Here", 10.0, 20.0, "Somewhere", Provider::Aws)],
            regions: vec![Location::region("Also Here", 10.0, 20.0, Provider::Aws, "here-1")],
        })
        .unwrap()
    }

    /// A valid catalog with no records
    pub fn empty_catalog() -> LocationCatalog {
        LocationCatalog::from_config(CatalogConfig::default()).unwrap()
    }

    /// Latencies of the current graph in order
    pub fn latencies(explorer: &LatencyExplorer) -> Vec<u32> {
        explorer
            .graph()
            .connections()
            .iter()
            .map(|c| c.latency_ms())
            .collect()
    }

    /// Check if events contain a GraphRebuilt with this many connections
    pub fn has_rebuild_with(events: &[ExplorerEvent], count: usize) -> bool {
        events.iter().any(|e| {
            matches!(
                e,
                ExplorerEvent::GraphRebuilt { connections, .. } if *connections == count
            )
        })
    }
}

use helpers::*;

// ============================================================================
// Graph Construction Tests
// ============================================================================

#[test]
fn test_default_filters_give_full_cross_product() {
    let mut explorer = explorer_with_seed(1);
    let graph = explorer.graph();
    assert_eq!(graph.points().len(), 15);
    assert_eq!(graph.connections().len(), 8 * 7);
    assert!(has_rebuild_with(&explorer.drain_events(), 56));
}

#[test]
fn test_every_distance_is_fixed_by_endpoints() {
    let explorer = explorer_with_seed(2);
    for conn in explorer.graph().connections() {
        let expected = conn.src().distance_km_to(conn.dst());
        assert_eq!(conn.distance_km(), expected);
        let upper = (conn.distance_km() * 0.15 + 50.0).round() as u32;
        assert!(conn.latency_ms() <= upper, "{} exceeds {}", conn, upper);
    }
}

#[test]
fn test_disabling_aws_removes_aws_endpoints() {
    let mut explorer = explorer_with_seed(3);
    explorer.rebuild_graph(FilterState::default().with_provider(Provider::Aws, false));

    let graph = explorer.graph();
    assert!(graph
        .points()
        .iter()
        .all(|p| p.location.provider != Provider::Aws));
    assert!(graph
        .connections()
        .iter()
        .all(|c| c.src().provider != Provider::Aws && c.dst().provider != Provider::Aws));
    // 4 non-AWS exchanges x 4 non-AWS regions
    assert_eq!(graph.connections().len(), 16);
}

#[test]
fn test_hiding_exchanges_keeps_region_points() {
    let mut explorer = explorer_with_seed(4);
    let mut filters = FilterState::default();
    filters.toggle_exchanges();
    explorer.rebuild_graph(filters);

    let graph = explorer.graph();
    assert_eq!(graph.points().len(), 7);
    assert!(graph.points().iter().all(|p| p.kind == LocationKind::Region));
    assert!(graph.connections().is_empty());
}

#[test]
fn test_low_and_high_bands() {
    let mut explorer = explorer_with_seed(5);

    explorer.rebuild_graph(FilterState::default().with_latency_range(LatencyRange::Low));
    assert!(latencies(&explorer).iter().all(|&l| l < 50));

    explorer.rebuild_graph(FilterState::default().with_latency_range(LatencyRange::High));
    let high = latencies(&explorer);
    assert!(!high.is_empty());
    assert!(high.iter().all(|&l| l > 150));

    explorer.rebuild_graph(FilterState::default().with_latency_range(LatencyRange::Medium));
    assert!(latencies(&explorer).iter().all(|&l| (50..=150).contains(&l)));
}

#[test]
fn test_band_boundary_at_exactly_fifty() {
    // Colocated points draw latency from 0..=50; the same seed draws the
    // same value whatever band is requested.
    let mut saw_fifty = false;
    for seed in 0..2000 {
        let all = explorer_over(colocated_catalog(), seed, FilterState::default());
        let latency = latencies(&all)[0];

        let low = explorer_over(
            colocated_catalog(),
            seed,
            FilterState::default().with_latency_range(LatencyRange::Low),
        );
        let medium = explorer_over(
            colocated_catalog(),
            seed,
            FilterState::default().with_latency_range(LatencyRange::Medium),
        );

        assert_eq!(latencies(&low).len(), usize::from(latency < 50));
        assert_eq!(latencies(&medium).len(), usize::from(latency == 50));
        saw_fifty |= latency == 50;
    }
    assert!(saw_fifty);
}

#[test]
fn test_empty_catalog_is_empty_graph() {
    let mut explorer = explorer_over(empty_catalog(), 6, FilterState::default());
    assert!(explorer.graph().is_empty());
    assert!(has_rebuild_with(&explorer.drain_events(), 0));
    assert_eq!(explorer.graph().latency_stats(), None);
}

#[test]
fn test_builder_is_independent_of_previous_graph() {
    let catalog = Arc::new(LocationCatalog::reference());
    let mut builder = ConnectionGraphBuilder::new(Arc::clone(&catalog));
    let mut sim_a = lat_geo::LatencySimulator::seeded(9);
    let mut sim_b = lat_geo::LatencySimulator::seeded(9);

    let a = builder.build(&FilterState::default(), &mut sim_a);
    let mut fresh = ConnectionGraphBuilder::new(catalog);
    let b = fresh.build(&FilterState::default(), &mut sim_b);

    let la: Vec<u32> = a.connections().iter().map(|c| c.latency_ms()).collect();
    let lb: Vec<u32> = b.connections().iter().map(|c| c.latency_ms()).collect();
    assert_eq!(la, lb);
}

// ============================================================================
// Selection Tests
// ============================================================================

#[test]
fn test_series_labels_per_range() {
    let mut explorer = explorer_with_seed(7);
    let id = explorer.graph().connections()[0].id();
    explorer.select_connection(id).unwrap();

    let hour = explorer.set_range(TimeRange::OneHour).unwrap();
    assert_eq!(hour.series.len(), 12);
    assert_eq!(hour.series[0].label, "0m");
    assert_eq!(hour.series[11].label, "55m");

    let day = explorer.set_range(TimeRange::OneDay).unwrap();
    assert_eq!(day.series.len(), 24);
    assert_eq!(day.series[23].label, "23h");

    let week = explorer.set_range(TimeRange::OneWeek).unwrap();
    assert_eq!(week.series.len(), 7);
    assert_eq!(week.series[0].label, "Day 1");
    assert_eq!(week.series[6].label, "Day 7");
}

#[test]
fn test_series_stays_near_base_latency() {
    let mut explorer = explorer_with_seed(8);
    let id = explorer.graph().connections()[20].id();
    let selection = explorer.select_connection(id).unwrap();
    let base = selection.connection.latency_ms() as f64;
    for point in &selection.series {
        assert!(point.latency_ms >= base - 10.0 && point.latency_ms < base + 10.0);
    }
    assert!(selection.stats.min <= selection.stats.avg);
    assert!(selection.stats.avg <= selection.stats.max);
}

#[test]
fn test_stats_of_known_series() {
    let series: Vec<lat_geo::HistoricalPoint> = [10.0, 20.0, 30.0]
        .into_iter()
        .enumerate()
        .map(|(index, latency_ms)| lat_geo::HistoricalPoint {
            index,
            latency_ms,
            label: TimeRange::OneHour.label(index),
        })
        .collect();
    let stats = lat_geo::aggregate(&series).unwrap();
    assert_eq!((stats.min, stats.avg, stats.max), (10, 20, 30));
}

#[test]
fn test_selection_events_in_order() {
    let mut explorer = explorer_with_seed(10);
    explorer.drain_events();

    let id = explorer.graph().connections()[1].id();
    explorer.select_connection(id).unwrap();
    explorer.set_range(TimeRange::OneMonth);
    explorer.clear_selection();

    let events = explorer.drain_events();
    assert!(events.iter().all(|e| e.is_selection()));
    assert!(matches!(
        events.as_slice(),
        [
            ExplorerEvent::SelectionChanged { range: TimeRange::OneHour, .. },
            ExplorerEvent::RangeChanged { range: TimeRange::OneMonth, stats: Some(_) },
            ExplorerEvent::SelectionCleared,
        ]
    ));
}

// ============================================================================
// Refresh Tests
// ============================================================================

#[test]
fn test_refresh_keeps_ids_endpoints_and_distances() {
    let mut explorer = explorer_with_seed(11);
    let before = explorer.graph().clone();

    for _ in 0..5 {
        assert_eq!(explorer.refresh_latencies(), 56);
    }

    let after = explorer.graph();
    for (b, a) in before.connections().iter().zip(after.connections()) {
        assert_eq!(b.id(), a.id());
        assert!(Arc::ptr_eq(b.src(), a.src()));
        assert!(Arc::ptr_eq(b.dst(), a.dst()));
        assert_eq!(b.distance_km(), a.distance_km());
    }
    assert_ne!(latencies(&explorer), before.connections().iter().map(|c| c.latency_ms()).collect::<Vec<_>>());
    assert_eq!(explorer.refresh_count(), 5);
}

#[test]
fn test_refresh_never_changes_visibility() {
    let mut explorer = explorer_with_seed(12);
    explorer.rebuild_graph(FilterState::default().with_latency_range(LatencyRange::Low));
    let count = explorer.graph().connections().len();

    for _ in 0..20 {
        explorer.refresh_latencies();
        assert_eq!(explorer.graph().connections().len(), count);
    }
}

#[test]
fn test_refresh_on_empty_graph_is_noop() {
    let mut explorer = explorer_over(empty_catalog(), 13, FilterState::default());
    assert_eq!(explorer.refresh_latencies(), 0);
    assert!(explorer.graph().is_empty());
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn latency_range() -> impl Strategy<Value = LatencyRange> {
        prop_oneof![
            Just(LatencyRange::All),
            Just(LatencyRange::Low),
            Just(LatencyRange::Medium),
            Just(LatencyRange::High),
        ]
    }

    fn filter_state() -> impl Strategy<Value = FilterState> {
        (
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            latency_range(),
        )
            .prop_map(|(aws, gcp, azure, exchanges, regions, range)| FilterState {
                aws_enabled: aws,
                gcp_enabled: gcp,
                azure_enabled: azure,
                show_exchanges: exchanges,
                show_regions: regions,
                latency_range: range,
            })
    }

    proptest! {
        #[test]
        fn graph_respects_filters(filters in filter_state(), seed in any::<u64>()) {
            let catalog = LocationCatalog::reference();
            let visible_exchanges = catalog
                .exchanges()
                .iter()
                .filter(|l| filters.is_visible(LocationKind::Exchange, l.provider))
                .count();
            let visible_regions = catalog
                .regions()
                .iter()
                .filter(|l| filters.is_visible(LocationKind::Region, l.provider))
                .count();

            let explorer = explorer_over(catalog, seed, filters);
            let graph = explorer.graph();

            prop_assert_eq!(graph.points().len(), visible_exchanges + visible_regions);
            prop_assert!(graph.connections().len() <= visible_exchanges * visible_regions);
            if filters.latency_range == LatencyRange::All {
                prop_assert_eq!(graph.connections().len(), visible_exchanges * visible_regions);
            }
            for conn in graph.connections() {
                prop_assert!(filters.is_visible(LocationKind::Exchange, conn.src().provider));
                prop_assert!(filters.is_visible(LocationKind::Region, conn.dst().provider));
                prop_assert!(filters.latency_range.matches(conn.latency_ms()));
            }
        }

        #[test]
        fn refresh_preserves_everything_but_latency(seed in any::<u64>(), ticks in 1usize..10) {
            let mut explorer = explorer_with_seed(seed);
            let before = explorer.graph().clone();
            for _ in 0..ticks {
                explorer.refresh_latencies();
            }
            let after = explorer.graph();
            prop_assert_eq!(before.connections().len(), after.connections().len());
            for (b, a) in before.connections().iter().zip(after.connections()) {
                prop_assert_eq!(b.id(), a.id());
                prop_assert_eq!(b.distance_km(), a.distance_km());
                prop_assert_eq!(&b.src().name, &a.src().name);
                prop_assert_eq!(&b.dst().name, &a.dst().name);
            }
        }

        #[test]
        fn selection_stats_are_ordered(seed in any::<u64>(), index in 0usize..56) {
            let mut explorer = explorer_with_seed(seed);
            let id = explorer.graph().connections()[index].id();
            let selection = explorer.select_connection(id).unwrap();
            prop_assert!(selection.stats.min <= selection.stats.avg);
            prop_assert!(selection.stats.avg <= selection.stats.max);
        }
    }
}
