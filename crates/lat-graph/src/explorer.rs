//! Latency explorer engine
//!
//! The synchronous command API over the graph: rebuild on filter change,
//! select/deselect, change range, refresh. Every call finishes its whole
//! recomputation before returning, and buffers the events it produced for
//! push-style consumers.

use std::sync::Arc;

use lat_geo::{FilterState, LatencySimulator, LocationCatalog, TimeRange};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::builder::ConnectionGraphBuilder;
use crate::error::GraphError;
use crate::events::ExplorerEvent;
use crate::graph::{ConnectionId, LatencyGraph};
use crate::selection::Selection;

/// Default refresh period
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 5000;

/// Explorer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// RNG seed; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Filters for the initial graph
    pub filters: FilterState,
    /// Initial historical window
    pub time_range: TimeRange,
    /// Refresh period in milliseconds
    pub refresh_interval_ms: u64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            filters: FilterState::default(),
            time_range: TimeRange::default(),
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
        }
    }
}

/// The explorer engine
pub struct LatencyExplorer {
    config: ExplorerConfig,
    builder: ConnectionGraphBuilder,
    sim: LatencySimulator,
    filters: FilterState,
    graph: LatencyGraph,
    time_range: TimeRange,
    selection: Option<Selection>,
    refresh_count: u64,
    event_buffer: Vec<ExplorerEvent>,
}

impl LatencyExplorer {
    /// Create an explorer with default configuration
    pub fn new(catalog: Arc<LocationCatalog>) -> Self {
        Self::with_config(catalog, ExplorerConfig::default())
    }

    /// Create with custom configuration, building the initial graph
    pub fn with_config(catalog: Arc<LocationCatalog>, config: ExplorerConfig) -> Self {
        let mut explorer = Self {
            builder: ConnectionGraphBuilder::new(catalog),
            sim: LatencySimulator::from_seed_option(config.seed),
            filters: config.filters,
            graph: LatencyGraph::default(),
            time_range: config.time_range,
            selection: None,
            refresh_count: 0,
            event_buffer: Vec::new(),
            config,
        };
        let filters = explorer.filters;
        explorer.rebuild_graph(filters);
        explorer
    }

    /// Get the configuration the explorer was created with
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// The catalog graphs are built from
    pub fn catalog(&self) -> &Arc<LocationCatalog> {
        self.builder.catalog()
    }

    /// Filters the current graph was built under
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Current graph
    pub fn graph(&self) -> &LatencyGraph {
        &self.graph
    }

    /// Current historical window
    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    /// Current selection, if any
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Number of refresh ticks applied so far
    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    /// Replace the whole graph with one built for `filters`
    ///
    /// The selection, if any, is kept: it is a snapshot and does not point
    /// into the graph.
    pub fn rebuild_graph(&mut self, filters: FilterState) -> &LatencyGraph {
        self.filters = filters;
        self.graph = self.builder.build(&filters, &mut self.sim);

        info!(
            "Graph rebuilt: {} points, {} connections",
            self.graph.points().len(),
            self.graph.connections().len()
        );
        self.event_buffer.push(ExplorerEvent::GraphRebuilt {
            filters,
            points: self.graph.points().len(),
            connections: self.graph.connections().len(),
        });

        &self.graph
    }

    /// Select a connection of the current graph and generate its history
    pub fn select_connection(&mut self, id: ConnectionId) -> Result<&Selection, GraphError> {
        let connection = self
            .graph
            .connection(id)
            .cloned()
            .ok_or(GraphError::ConnectionNotFound(id))?;
        let selection = Selection::generate(connection, self.time_range, &mut self.sim);
        Ok(self.store_selection(selection))
    }

    /// Select the first connection touching the named point
    ///
    /// A point with no visible connection (or an unknown name) selects
    /// nothing and leaves the current selection alone.
    pub fn select_point(&mut self, name: &str) -> Option<&Selection> {
        let Some(connection) = self.graph.incident_connections(name).next().cloned() else {
            debug!("No connections for point {}, nothing selected", name);
            return None;
        };
        let selection = Selection::generate(connection, self.time_range, &mut self.sim);
        Some(self.store_selection(selection))
    }

    /// Change the historical window, regenerating the open series
    ///
    /// Without a selection the range is only remembered for the next one.
    pub fn set_range(&mut self, range: TimeRange) -> Option<&Selection> {
        self.time_range = range;
        let stats = self.selection.as_mut().map(|selection| {
            selection.regenerate(range, &mut self.sim);
            selection.stats
        });
        self.event_buffer
            .push(ExplorerEvent::RangeChanged { range, stats });
        self.selection.as_ref()
    }

    /// Drop the selection; returns whether anything was selected
    pub fn clear_selection(&mut self) -> bool {
        let had_selection = self.selection.take().is_some();
        if had_selection {
            info!("Selection cleared");
            self.event_buffer.push(ExplorerEvent::SelectionCleared);
        }
        had_selection
    }

    /// Apply one refresh tick to every connection
    ///
    /// Distances and endpoints stay put; the latency band is not re-applied.
    pub fn refresh_latencies(&mut self) -> usize {
        let updated = self.graph.refresh_latencies(&mut self.sim);
        self.refresh_count += 1;
        debug!(
            "Refresh tick {}: {} connections updated",
            self.refresh_count, updated
        );
        self.event_buffer.push(ExplorerEvent::LatenciesRefreshed {
            tick: self.refresh_count,
            connections: self.graph.connections().to_vec(),
        });
        updated
    }

    /// Take all buffered events
    pub fn drain_events(&mut self) -> Vec<ExplorerEvent> {
        std::mem::take(&mut self.event_buffer)
    }

    fn store_selection(&mut self, selection: Selection) -> &Selection {
        info!(
            "Selected {} ({} range, min {} / avg {} / max {})",
            selection.connection,
            selection.range,
            selection.stats.min,
            selection.stats.avg,
            selection.stats.max
        );
        self.event_buffer.push(ExplorerEvent::SelectionChanged {
            connection: selection.connection.id(),
            range: selection.range,
            stats: selection.stats,
        });
        self.selection.insert(selection)
    }
}
