//! Synthetic historical latency series

use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Half-width of the uniform jitter applied around the base latency
pub const HISTORY_JITTER_MS: f64 = 10.0;

/// Selectable historical window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    /// Last hour, 12 five-minute samples
    #[default]
    #[serde(rename = "1h")]
    OneHour,
    /// Last day, 24 hourly samples
    #[serde(rename = "24h")]
    OneDay,
    /// Last week, 7 daily samples
    #[serde(rename = "7d")]
    OneWeek,
    /// Last month, 30 daily samples
    #[serde(rename = "30d")]
    OneMonth,
}

impl TimeRange {
    /// Every range, in display order
    pub const ALL: [TimeRange; 4] = [Self::OneHour, Self::OneDay, Self::OneWeek, Self::OneMonth];

    /// Number of samples generated for this range
    pub fn sample_count(&self) -> usize {
        match self {
            Self::OneHour => 12,
            Self::OneDay => 24,
            Self::OneWeek => 7,
            Self::OneMonth => 30,
        }
    }

    /// Axis label for the sample at `index`
    pub fn label(&self, index: usize) -> String {
        match self {
            Self::OneHour => format!("{}m", index * 5),
            Self::OneDay => format!("{}h", index),
            Self::OneWeek | Self::OneMonth => format!("Day {}", index + 1),
        }
    }

    /// Get the short name ("1h", "24h", "7d", "30d")
    pub fn name(&self) -> &'static str {
        match self {
            Self::OneHour => "1h",
            Self::OneDay => "24h",
            Self::OneWeek => "7d",
            Self::OneMonth => "30d",
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.name() == s.trim())
            .ok_or_else(|| format!("unknown time range: {}", s))
    }
}

/// One sample of a historical series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    /// Position in the series, starting at 0
    pub index: usize,
    /// Latency in milliseconds (unrounded, may be negative for small bases)
    pub latency_ms: f64,
    /// Axis label
    pub label: String,
}

/// Generate a full series around `base_latency_ms`
///
/// Each sample is `base + uniform[-10, 10)`. Values are not clamped.
pub fn generate_series<R: Rng + ?Sized>(
    base_latency_ms: f64,
    range: TimeRange,
    rng: &mut R,
) -> Vec<HistoricalPoint> {
    (0..range.sample_count())
        .map(|index| HistoricalPoint {
            index,
            latency_ms: base_latency_ms + rng.gen_range(-HISTORY_JITTER_MS..HISTORY_JITTER_MS),
            label: range.label(index),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn labels(range: TimeRange) -> Vec<String> {
        let mut rng = StdRng::seed_from_u64(9);
        generate_series(100.0, range, &mut rng)
            .into_iter()
            .map(|p| p.label)
            .collect()
    }

    #[test]
    fn test_one_hour_labels() {
        let l = labels(TimeRange::OneHour);
        assert_eq!(l.len(), 12);
        assert_eq!(l.first().unwrap(), "0m");
        assert_eq!(l[1], "5m");
        assert_eq!(l.last().unwrap(), "55m");
    }

    #[test]
    fn test_one_day_labels() {
        let l = labels(TimeRange::OneDay);
        assert_eq!(l.len(), 24);
        assert_eq!(l[0], "0h");
        assert_eq!(l[23], "23h");
    }

    #[test]
    fn test_week_and_month_labels() {
        let week = labels(TimeRange::OneWeek);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0], "Day 1");
        assert_eq!(week[6], "Day 7");

        let month = labels(TimeRange::OneMonth);
        assert_eq!(month.len(), 30);
        assert_eq!(month[29], "Day 30");
    }

    #[test]
    fn test_indices_and_jitter_bounds() {
        let mut rng = StdRng::seed_from_u64(10);
        let series = generate_series(80.0, TimeRange::OneMonth, &mut rng);
        for (i, p) in series.iter().enumerate() {
            assert_eq!(p.index, i);
            assert!(p.latency_ms >= 70.0 && p.latency_ms < 90.0);
        }
    }

    #[test]
    fn test_small_base_may_go_negative() {
        let mut rng = StdRng::seed_from_u64(11);
        let series = generate_series(0.0, TimeRange::OneMonth, &mut rng);
        assert!(series.iter().all(|p| p.latency_ms >= -10.0 && p.latency_ms < 10.0));
    }

    #[test]
    fn test_time_range_names() {
        for range in TimeRange::ALL {
            assert_eq!(range.name().parse::<TimeRange>(), Ok(range));
            let json = serde_json::to_string(&range).unwrap();
            assert_eq!(json, format!("\"{}\"", range.name()));
        }
        assert!("2h".parse::<TimeRange>().is_err());
    }
}
