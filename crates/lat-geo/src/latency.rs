//! Synthetic latency
//!
//! Latency is a linear function of distance plus uniform jitter. All
//! randomness in the system is drawn from a [`LatencySimulator`] so a seeded
//! simulator reproduces the same graph, refresh sequence and history.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Milliseconds of latency per kilometer of great-circle distance
pub const MS_PER_KM: f64 = 0.15;

/// Upper bound (exclusive) of the uniform jitter added to every sample
pub const MAX_JITTER_MS: f64 = 50.0;

/// Latencies strictly below this are [`LatencyTier::Low`]
pub const LOW_LATENCY_THRESHOLD_MS: u32 = 50;

/// Latencies strictly below this (and not low) are [`LatencyTier::Medium`]
pub const MEDIUM_LATENCY_THRESHOLD_MS: u32 = 150;

/// Derive a latency sample in whole milliseconds from a distance
///
/// `round(distance * 0.15 + uniform[0, 50))`. Never negative for a
/// non-negative distance, and never above `round(distance * 0.15 + 50)`.
pub fn simulate_latency<R: Rng + ?Sized>(distance_km: f64, rng: &mut R) -> u32 {
    let base = distance_km * MS_PER_KM;
    let jitter = rng.gen_range(0.0..MAX_JITTER_MS);
    (base + jitter).round().max(0.0) as u32
}

/// Owner of the random source used for every synthetic value
#[derive(Debug, Clone)]
pub struct LatencySimulator {
    rng: StdRng,
}

impl LatencySimulator {
    /// Reproducible simulator
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Simulator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when a seed is given, entropy otherwise
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }

    /// Wrap an existing generator
    pub fn with_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Draw one latency sample for a distance
    pub fn latency_for(&mut self, distance_km: f64) -> u32 {
        simulate_latency(distance_km, &mut self.rng)
    }

    /// The underlying generator, for the other synthetic series
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl Default for LatencySimulator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Coarse latency class used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LatencyTier {
    /// Below 50 ms
    Low,
    /// 50 ms up to (not including) 150 ms
    Medium,
    /// 150 ms and above
    High,
}

impl LatencyTier {
    /// Classify a latency value
    pub fn classify(latency_ms: u32) -> Self {
        if latency_ms < LOW_LATENCY_THRESHOLD_MS {
            Self::Low
        } else if latency_ms < MEDIUM_LATENCY_THRESHOLD_MS {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}
