//! Exchange-to-Cloud Latency Graph Engine
//!
//! This crate turns a [`lat_geo::LocationCatalog`] into the graph a latency
//! map renders: the visible exchanges and cloud regions, and a simulated
//! latency connection from every visible exchange to every visible region.
//!
//! # Architecture
//!
//! - [`ConnectionGraphBuilder`] rebuilds the whole graph from the catalog,
//!   the filters and the random source whenever the filters change
//! - [`LatencyExplorer`] is the synchronous command API: rebuild, select,
//!   change the historical range, refresh
//! - [`RefreshSchedule`] decides when a refresh tick happens
//! - [`run_explorer_actor`] hosts the explorer and the schedule on one task,
//!   so commands and ticks never interleave
//!
//! All state changes are emitted through a unified [`ExplorerEvent`] stream.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use lat_geo::{FilterState, LatencyRange, LocationCatalog, TimeRange};
//! use lat_graph::{ExplorerConfig, LatencyExplorer};
//!
//! let config = ExplorerConfig { seed: Some(42), ..Default::default() };
//! let mut explorer = LatencyExplorer::with_config(Arc::new(LocationCatalog::reference()), config);
//! assert_eq!(explorer.graph().connections().len(), 56);
//!
//! explorer.rebuild_graph(FilterState::default().with_latency_range(LatencyRange::Low));
//! assert!(explorer.graph().connections().iter().all(|c| c.latency_ms() < 50));
//!
//! explorer.set_range(TimeRange::OneDay);
//! if let Some(id) = explorer.graph().connections().first().map(|c| c.id()) {
//!     let selection = explorer.select_connection(id).unwrap();
//!     assert_eq!(selection.series.len(), 24);
//! }
//! ```

pub mod actor;
pub mod builder;
pub mod error;
pub mod events;
pub mod explorer;
pub mod graph;
pub mod scheduler;
pub mod selection;

// Re-export actor types
pub use actor::{run_explorer_actor, spawn_explorer, ExplorerCommand, ExplorerHandle};

// Re-export event types
pub use events::ExplorerEvent;

// Re-export engine types
pub use builder::ConnectionGraphBuilder;
pub use error::GraphError;
pub use explorer::{ExplorerConfig, LatencyExplorer, DEFAULT_REFRESH_INTERVAL_MS};
pub use graph::{Connection, ConnectionId, LatencyGraph, MapPoint};
pub use scheduler::{RefreshSchedule, SchedulerState};
pub use selection::Selection;
