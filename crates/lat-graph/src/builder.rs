//! Connection graph construction
//!
//! A build is a pure function of the catalog, the filters and the random
//! source: it never looks at the previous graph.

use std::sync::Arc;

use lat_geo::{FilterState, LatencySimulator, Location, LocationCatalog, LocationKind};
use tracing::debug;

use crate::graph::{Connection, ConnectionId, LatencyGraph, MapPoint};

/// Builds the visible graph from an injected catalog
#[derive(Debug, Clone)]
pub struct ConnectionGraphBuilder {
    catalog: Arc<LocationCatalog>,
    next_id: u64,
}

impl ConnectionGraphBuilder {
    /// Create a builder over a catalog
    pub fn new(catalog: Arc<LocationCatalog>) -> Self {
        Self {
            catalog,
            next_id: 1,
        }
    }

    /// The catalog this builder reads
    pub fn catalog(&self) -> &Arc<LocationCatalog> {
        &self.catalog
    }

    /// Build the visible points and connections for `filters`
    ///
    /// 1. Exchanges and regions are kept when their category is shown and
    ///    their provider is enabled.
    /// 2. Every kept exchange is paired with every kept region.
    /// 3. Each pair gets a distance and a fresh latency sample.
    /// 4. Pairs outside the latency band are dropped.
    pub fn build(&mut self, filters: &FilterState, sim: &mut LatencySimulator) -> LatencyGraph {
        let exchanges = visible(self.catalog.exchanges(), LocationKind::Exchange, filters);
        let regions = visible(self.catalog.regions(), LocationKind::Region, filters);

        let points: Vec<MapPoint> = exchanges
            .iter()
            .map(|location| MapPoint {
                location: Arc::clone(location),
                kind: LocationKind::Exchange,
            })
            .chain(regions.iter().map(|location| MapPoint {
                location: Arc::clone(location),
                kind: LocationKind::Region,
            }))
            .collect();

        let mut candidates = 0usize;
        let mut connections = Vec::new();
        for exchange in &exchanges {
            for region in &regions {
                candidates += 1;
                let id = self.allocate_id();
                let conn = Connection::new(id, Arc::clone(exchange), Arc::clone(region), sim);
                if filters.latency_range.matches(conn.latency_ms()) {
                    connections.push(conn);
                }
            }
        }

        debug!(
            "Built graph: {} points, {}/{} connections kept ({} band)",
            points.len(),
            connections.len(),
            candidates,
            filters.latency_range.name()
        );

        LatencyGraph::new(points, connections)
    }

    fn allocate_id(&mut self) -> ConnectionId {
        let id = ConnectionId(self.next_id);
        self.next_id += 1;
        id
    }
}

fn visible(
    locations: &[Arc<Location>],
    kind: LocationKind,
    filters: &FilterState,
) -> Vec<Arc<Location>> {
    locations
        .iter()
        .filter(|l| filters.is_visible(kind, l.provider))
        .cloned()
        .collect()
}
