//! Error types for the graph engine

use thiserror::Error;

use crate::graph::ConnectionId;

/// Errors that can occur in the graph engine
#[derive(Debug, Error)]
pub enum GraphError {
    /// Connection id is not in the current graph
    #[error("connection not found: {0}")]
    ConnectionNotFound(ConnectionId),

    /// The explorer actor has shut down
    #[error("explorer actor is not running")]
    ActorStopped,
}
