//! Selected connection and its derived history

use lat_geo::{aggregate, generate_series, HistoricalPoint, LatencySimulator, Stats, TimeRange};

use crate::graph::Connection;

/// The connection under inspection plus its series and stats
///
/// The connection is a snapshot taken at selection time; later refresh
/// ticks do not change it, and range changes regenerate from its latency.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Snapshot of the selected connection
    pub connection: Connection,
    /// Window the series was generated for
    pub range: TimeRange,
    /// Generated samples
    pub series: Vec<HistoricalPoint>,
    /// Reduction of `series`
    pub stats: Stats,
}

impl Selection {
    /// Generate a fresh series for `connection` over `range`
    pub fn generate(connection: Connection, range: TimeRange, sim: &mut LatencySimulator) -> Self {
        let series = generate_series(connection.latency_ms() as f64, range, sim.rng());
        // Every range yields at least 7 samples
        let stats = aggregate(&series).unwrap_or_default();
        Self {
            connection,
            range,
            series,
            stats,
        }
    }

    /// Regenerate the series for another range
    pub fn regenerate(&mut self, range: TimeRange, sim: &mut LatencySimulator) {
        self.series = generate_series(self.connection.latency_ms() as f64, range, sim.rng());
        self.stats = aggregate(&self.series).unwrap_or_default();
        self.range = range;
    }
}
