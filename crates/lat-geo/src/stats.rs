//! Series statistics

use serde::{Deserialize, Serialize};

use crate::history::HistoricalPoint;

/// Rounded min/avg/max of a latency series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Smallest value, rounded
    pub min: i64,
    /// Largest value, rounded
    pub max: i64,
    /// Arithmetic mean of the unrounded values, rounded
    pub avg: i64,
}

impl Stats {
    /// Reduce raw latency values; `None` when there are none
    pub fn from_latencies<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut iter = values.into_iter();
        let first = iter.next()?;
        let (min, max, sum, count) = iter.fold((first, first, first, 1usize), |(lo, hi, sum, n), v| {
            (lo.min(v), hi.max(v), sum + v, n + 1)
        });
        Some(Self {
            min: round_half_up(min),
            max: round_half_up(max),
            avg: round_half_up(sum / count as f64),
        })
    }
}

/// Reduce a historical series to [`Stats`]
///
/// Every [`crate::TimeRange`] produces at least 7 samples, so `None` only
/// comes back for a hand-built empty slice.
pub fn aggregate(series: &[HistoricalPoint]) -> Option<Stats> {
    Stats::from_latencies(series.iter().map(|p| p.latency_ms))
}

/// Round to nearest, ties toward positive infinity
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
