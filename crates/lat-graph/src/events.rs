//! Push events for presentation collaborators
//!
//! Everything the explorer does that a renderer might want to redraw for
//! is emitted as an [`ExplorerEvent`], in the order it happened.

use lat_geo::{FilterState, Stats, TimeRange};

use crate::graph::{Connection, ConnectionId};

/// Unified event enum for explorer activity
#[derive(Debug, Clone)]
pub enum ExplorerEvent {
    // -------------------------------------------------------------------------
    // Graph events
    // -------------------------------------------------------------------------
    /// The graph was rebuilt for new filters
    GraphRebuilt {
        /// Filters the graph was built under
        filters: FilterState,
        /// Number of visible points
        points: usize,
        /// Number of visible connections
        connections: usize,
    },

    /// A refresh tick re-randomized every connection latency
    LatenciesRefreshed {
        /// Number of refresh ticks the explorer has applied, this one included
        tick: u64,
        /// The whole connection set after the tick
        connections: Vec<Connection>,
    },

    // -------------------------------------------------------------------------
    // Selection events
    // -------------------------------------------------------------------------
    /// A connection was selected and its history generated
    SelectionChanged {
        /// Selected connection
        connection: ConnectionId,
        /// Window of the generated series
        range: TimeRange,
        /// Reduction of the generated series
        stats: Stats,
    },

    /// The time range changed
    RangeChanged {
        /// New range
        range: TimeRange,
        /// Stats of the regenerated series, if something is selected
        stats: Option<Stats>,
    },

    /// The selection was cleared
    SelectionCleared,

    // -------------------------------------------------------------------------
    // Scheduler events
    // -------------------------------------------------------------------------
    /// Periodic refresh started
    RefreshStarted {
        /// Tick period in milliseconds
        interval_ms: u64,
    },

    /// Periodic refresh stopped
    RefreshStopped,
}

impl ExplorerEvent {
    /// Check if this event changes what the globe shows
    pub fn is_graph(&self) -> bool {
        matches!(
            self,
            ExplorerEvent::GraphRebuilt { .. } | ExplorerEvent::LatenciesRefreshed { .. }
        )
    }

    /// Check if this event changes the history panel
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            ExplorerEvent::SelectionChanged { .. }
                | ExplorerEvent::RangeChanged { .. }
                | ExplorerEvent::SelectionCleared
        )
    }

    /// Check if this is a scheduler lifecycle event
    pub fn is_scheduler(&self) -> bool {
        matches!(
            self,
            ExplorerEvent::RefreshStarted { .. } | ExplorerEvent::RefreshStopped
        )
    }
}
