//! Connection snapshot export

use std::path::Path;

use anyhow::Context;
use lat_graph::LatencyGraph;
use serde::{Deserialize, Serialize};

/// One exported connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    /// Exchange name
    pub src: String,
    /// Region name
    pub dst: String,
    /// Latency at the time of export
    pub latency_ms: u32,
    /// Great-circle distance
    pub distance_km: f64,
}

/// Flatten the current connections, in graph order
pub fn snapshot_records(graph: &LatencyGraph) -> Vec<ExportRecord> {
    graph
        .connections()
        .iter()
        .map(|conn| ExportRecord {
            src: conn.src().name.clone(),
            dst: conn.dst().name.clone(),
            latency_ms: conn.latency_ms(),
            distance_km: conn.distance_km(),
        })
        .collect()
}

/// Format the snapshot as pretty JSON
pub fn format_snapshot(graph: &LatencyGraph) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&snapshot_records(graph))
}

/// Write the snapshot to a file; returns the number of records written
pub fn write_snapshot(graph: &LatencyGraph, path: &Path) -> anyhow::Result<usize> {
    let json = format_snapshot(graph).context("Failed to serialize snapshot")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
    Ok(graph.connections().len())
}
