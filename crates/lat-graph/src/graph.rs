//! Visible points and latency connections

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use lat_geo::{LatencySimulator, LatencyTier, Location, LocationKind, Stats};

/// Unique identifier for a connection
///
/// Ids are never reused: a rebuilt graph gets fresh ids for every
/// connection, so an id always refers to one connection object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

impl ConnectionId {
    /// Get the raw id value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A simulated latency edge from an exchange to a cloud region
///
/// `src`, `dst` and `distance_km` are fixed at creation. Only the latency
/// changes afterwards, and only through a refresh.
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    src: Arc<Location>,
    dst: Arc<Location>,
    distance_km: f64,
    latency_ms: u32,
}

impl Connection {
    /// Create a connection, computing its distance once
    pub(crate) fn new(
        id: ConnectionId,
        src: Arc<Location>,
        dst: Arc<Location>,
        sim: &mut LatencySimulator,
    ) -> Self {
        let distance_km = src.distance_km_to(&dst);
        let latency_ms = sim.latency_for(distance_km);
        Self {
            id,
            src,
            dst,
            distance_km,
            latency_ms,
        }
    }

    /// Connection id
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Source exchange
    pub fn src(&self) -> &Arc<Location> {
        &self.src
    }

    /// Destination region
    pub fn dst(&self) -> &Arc<Location> {
        &self.dst
    }

    /// Great-circle distance in kilometers
    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Current simulated latency in milliseconds
    pub fn latency_ms(&self) -> u32 {
        self.latency_ms
    }

    /// Display tier of the current latency
    pub fn tier(&self) -> LatencyTier {
        LatencyTier::classify(self.latency_ms)
    }

    /// Whether either endpoint has this name
    pub fn touches(&self, name: &str) -> bool {
        self.src.name == name || self.dst.name == name
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {}: {}ms, {}km",
            self.src.name,
            self.dst.name,
            self.latency_ms,
            self.distance_km.round()
        )
    }
}

/// A visible location and which side it sits on
#[derive(Debug, Clone)]
pub struct MapPoint {
    /// The catalog record
    pub location: Arc<Location>,
    /// Exchange or region
    pub kind: LocationKind,
}

/// The visible point set and connection set produced by one build
#[derive(Debug, Clone, Default)]
pub struct LatencyGraph {
    points: Vec<MapPoint>,
    connections: Vec<Connection>,
}

impl LatencyGraph {
    pub(crate) fn new(points: Vec<MapPoint>, connections: Vec<Connection>) -> Self {
        Self {
            points,
            connections,
        }
    }

    /// Visible points: exchanges first, then regions
    pub fn points(&self) -> &[MapPoint] {
        &self.points
    }

    /// Visible connections, exchange-major order
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Look up a connection by id
    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    /// Connections with an endpoint of the given name, in graph order
    pub fn incident_connections<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Connection> + 'a {
        self.connections.iter().filter(move |c| c.touches(name))
    }

    /// True if nothing is visible
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.connections.is_empty()
    }

    /// Re-randomize every connection's latency from its stored distance
    ///
    /// The latency band filter is not re-applied, so a connection may drift
    /// out of the band it was built under and stay visible. Returns the
    /// number of connections updated.
    pub fn refresh_latencies(&mut self, sim: &mut LatencySimulator) -> usize {
        for conn in &mut self.connections {
            conn.latency_ms = sim.latency_for(conn.distance_km);
        }
        self.connections.len()
    }

    /// Min/avg/max over current connection latencies
    pub fn latency_stats(&self) -> Option<Stats> {
        Stats::from_latencies(self.connections.iter().map(|c| c.latency_ms as f64))
    }

    /// Number of connections in each latency tier
    pub fn tier_counts(&self) -> HashMap<LatencyTier, usize> {
        let mut counts = HashMap::new();
        for conn in &self.connections {
            *counts.entry(conn.tier()).or_insert(0) += 1;
        }
        counts
    }
}
