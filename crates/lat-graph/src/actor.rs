//! Explorer Actor
//!
//! This module hosts a [`LatencyExplorer`] and its [`RefreshSchedule`] on a
//! single async task. Interactive commands and refresh ticks are handled one
//! at a time by the same `select!` loop, so every command and every tick is
//! atomic with respect to all others: a consumer sees either the whole
//! previous connection set or the whole new one.
//!
//! # Architecture
//!
//! The actor receives commands through an `mpsc` channel (requests carry a
//! `oneshot` reply) and publishes [`ExplorerEvent`]s on a `broadcast`
//! channel, so any number of presentation collaborators can subscribe.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lat_geo::{FilterState, LocationCatalog};
//! use lat_graph::{spawn_explorer, LatencyExplorer};
//!
//! let explorer = LatencyExplorer::new(Arc::new(LocationCatalog::reference()));
//! let (handle, mut events, task) = spawn_explorer(explorer);
//!
//! handle.start_refresh().await?;
//! let graph = handle.rebuild_graph(FilterState::default()).await?;
//! // ... events.recv().await ...
//! handle.stop_refresh().await?;
//! handle.shutdown().await?;
//! task.await?;
//! ```

use lat_geo::{FilterState, TimeRange};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::GraphError;
use crate::events::ExplorerEvent;
use crate::explorer::LatencyExplorer;
use crate::graph::{ConnectionId, LatencyGraph};
use crate::scheduler::RefreshSchedule;
use crate::selection::Selection;

/// Capacity of the command channel
const COMMAND_BUFFER: usize = 64;

/// Capacity of the event broadcast channel
const EVENT_BUFFER: usize = 256;

/// Commands sent to the explorer actor
#[derive(Debug)]
pub enum ExplorerCommand {
    /// Rebuild the graph for new filters
    RebuildGraph {
        /// Filters to build under
        filters: FilterState,
        /// Channel to send back the new graph
        response: oneshot::Sender<LatencyGraph>,
    },

    /// Read the current graph
    Snapshot {
        /// Channel to send back the graph
        response: oneshot::Sender<LatencyGraph>,
    },

    /// Select a connection by id
    SelectConnection {
        /// Connection to select
        id: ConnectionId,
        /// Channel to send back the selection
        response: oneshot::Sender<Result<Selection, GraphError>>,
    },

    /// Select the first connection touching a point
    SelectPoint {
        /// Point name
        name: String,
        /// Channel to send back the selection (None if nothing touches it)
        response: oneshot::Sender<Option<Selection>>,
    },

    /// Change the historical window
    SetRange {
        /// New range
        range: TimeRange,
        /// Channel to send back the regenerated selection, if any
        response: oneshot::Sender<Option<Selection>>,
    },

    /// Drop the selection
    ClearSelection {
        /// Channel to send back whether anything was selected
        response: oneshot::Sender<bool>,
    },

    /// Start periodic refresh
    StartRefresh {
        /// Channel to send back whether the scheduler changed state
        response: oneshot::Sender<bool>,
    },

    /// Stop periodic refresh
    StopRefresh {
        /// Channel to send back whether the scheduler changed state
        response: oneshot::Sender<bool>,
    },

    /// Shutdown the actor
    Shutdown,
}

/// Run the explorer actor
///
/// Owns the explorer and a refresh schedule built from its configured
/// interval. The schedule starts stopped. Returns when a `Shutdown` command
/// arrives or every command sender is dropped; the refresh timer dies with
/// the task.
pub async fn run_explorer_actor(
    mut explorer: LatencyExplorer,
    mut cmd_rx: mpsc::Receiver<ExplorerCommand>,
    event_tx: broadcast::Sender<ExplorerEvent>,
) {
    let mut schedule = RefreshSchedule::from_millis(explorer.config().refresh_interval_ms);
    info!(
        "Explorer actor started (refresh every {} ms)",
        schedule.period().as_millis()
    );

    // Events buffered during construction (the initial build)
    publish(&mut explorer, &event_tx);

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                let Some(cmd) = cmd else {
                    debug!("Command channel closed for explorer actor");
                    break;
                };
                match cmd {
                    ExplorerCommand::RebuildGraph { filters, response } => {
                        let graph = explorer.rebuild_graph(filters).clone();
                        let _ = response.send(graph);
                    }

                    ExplorerCommand::Snapshot { response } => {
                        let _ = response.send(explorer.graph().clone());
                    }

                    ExplorerCommand::SelectConnection { id, response } => {
                        let result = explorer.select_connection(id).cloned();
                        let _ = response.send(result);
                    }

                    ExplorerCommand::SelectPoint { name, response } => {
                        let selection = explorer.select_point(&name).cloned();
                        let _ = response.send(selection);
                    }

                    ExplorerCommand::SetRange { range, response } => {
                        let selection = explorer.set_range(range).cloned();
                        let _ = response.send(selection);
                    }

                    ExplorerCommand::ClearSelection { response } => {
                        let _ = response.send(explorer.clear_selection());
                    }

                    ExplorerCommand::StartRefresh { response } => {
                        let started = schedule.start();
                        if started {
                            info!("Latency refresh started");
                            let _ = event_tx.send(ExplorerEvent::RefreshStarted {
                                interval_ms: schedule.period().as_millis() as u64,
                            });
                        }
                        let _ = response.send(started);
                    }

                    ExplorerCommand::StopRefresh { response } => {
                        let stopped = schedule.stop();
                        if stopped {
                            info!("Latency refresh stopped after {} ticks", explorer.refresh_count());
                            let _ = event_tx.send(ExplorerEvent::RefreshStopped);
                        }
                        let _ = response.send(stopped);
                    }

                    ExplorerCommand::Shutdown => {
                        info!("Shutdown requested for explorer actor");
                        break;
                    }
                }
            }

            _ = schedule.tick(), if schedule.is_running() => {
                explorer.refresh_latencies();
            }
        }

        publish(&mut explorer, &event_tx);
    }

    info!("Explorer actor stopped");
}

/// Forward buffered explorer events to subscribers
///
/// Sending only fails when nobody is subscribed, which is fine.
fn publish(explorer: &mut LatencyExplorer, event_tx: &broadcast::Sender<ExplorerEvent>) {
    for event in explorer.drain_events() {
        let _ = event_tx.send(event);
    }
}

/// Spawn the explorer actor on the current runtime
///
/// Returns the client handle, an event receiver subscribed before the actor
/// starts (so the initial build is not missed), and the task handle.
pub fn spawn_explorer(
    explorer: LatencyExplorer,
) -> (
    ExplorerHandle,
    broadcast::Receiver<ExplorerEvent>,
    JoinHandle<()>,
) {
    let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_BUFFER);
    let (event_tx, event_rx) = broadcast::channel(EVENT_BUFFER);
    let handle = ExplorerHandle {
        cmd_tx,
        event_tx: event_tx.clone(),
    };
    let task = tokio::spawn(run_explorer_actor(explorer, cmd_rx, event_tx));
    (handle, event_rx, task)
}

/// Cloneable client for a running explorer actor
#[derive(Debug, Clone)]
pub struct ExplorerHandle {
    cmd_tx: mpsc::Sender<ExplorerCommand>,
    event_tx: broadcast::Sender<ExplorerEvent>,
}

impl ExplorerHandle {
    /// Subscribe to events emitted from now on
    pub fn subscribe(&self) -> broadcast::Receiver<ExplorerEvent> {
        self.event_tx.subscribe()
    }

    /// True once the actor has gone away
    pub fn is_closed(&self) -> bool {
        self.cmd_tx.is_closed()
    }

    /// Rebuild the graph for `filters`
    pub async fn rebuild_graph(&self, filters: FilterState) -> Result<LatencyGraph, GraphError> {
        self.request(|response| ExplorerCommand::RebuildGraph { filters, response })
            .await
    }

    /// Read the current graph
    pub async fn snapshot(&self) -> Result<LatencyGraph, GraphError> {
        self.request(|response| ExplorerCommand::Snapshot { response })
            .await
    }

    /// Select a connection by id
    pub async fn select_connection(&self, id: ConnectionId) -> Result<Selection, GraphError> {
        self.request(|response| ExplorerCommand::SelectConnection { id, response })
            .await?
    }

    /// Select the first connection touching a point
    pub async fn select_point(&self, name: impl Into<String>) -> Result<Option<Selection>, GraphError> {
        let name = name.into();
        self.request(|response| ExplorerCommand::SelectPoint { name, response })
            .await
    }

    /// Change the historical window
    pub async fn set_range(&self, range: TimeRange) -> Result<Option<Selection>, GraphError> {
        self.request(|response| ExplorerCommand::SetRange { range, response })
            .await
    }

    /// Drop the selection
    pub async fn clear_selection(&self) -> Result<bool, GraphError> {
        self.request(|response| ExplorerCommand::ClearSelection { response })
            .await
    }

    /// Start periodic refresh
    pub async fn start_refresh(&self) -> Result<bool, GraphError> {
        self.request(|response| ExplorerCommand::StartRefresh { response })
            .await
    }

    /// Stop periodic refresh; ticks already applied stay applied
    pub async fn stop_refresh(&self) -> Result<bool, GraphError> {
        self.request(|response| ExplorerCommand::StopRefresh { response })
            .await
    }

    /// Ask the actor to exit
    pub async fn shutdown(&self) -> Result<(), GraphError> {
        self.cmd_tx
            .send(ExplorerCommand::Shutdown)
            .await
            .map_err(|_| GraphError::ActorStopped)
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> ExplorerCommand,
    ) -> Result<T, GraphError> {
        let (response, reply) = oneshot::channel();
        self.cmd_tx
            .send(build(response))
            .await
            .map_err(|_| GraphError::ActorStopped)?;
        reply.await.map_err(|_| GraphError::ActorStopped)
    }
}
