//! Latency Map Geography Library
//!
//! This crate provides the leaf data and math for simulating network latency
//! between cryptocurrency exchanges and cloud-provider regions:
//!
//! - **Catalog**: The immutable set of exchange and region [`Location`]s,
//!   validated once at load time
//! - **Distance**: Haversine great-circle distance on a 6371 km sphere
//! - **Latency**: Synthetic latency derived from distance plus uniform jitter
//! - **Filters**: Provider, category and latency-band visibility state
//! - **History**: Synthetic historical series for a selected connection
//! - **Stats**: Min/avg/max reduction of a series
//!
//! # Example
//!
//! ```rust
//! use lat_geo::{LatencySimulator, LocationCatalog, TimeRange};
//!
//! let catalog = LocationCatalog::reference();
//! let tokyo = catalog.find("Binance").unwrap();
//! let virginia = catalog.find("AWS US-East").unwrap();
//!
//! let distance = tokyo.distance_km_to(virginia);
//! let mut sim = LatencySimulator::seeded(7);
//! let latency = sim.latency_for(distance);
//!
//! let series = lat_geo::generate_series(latency as f64, TimeRange::OneHour, sim.rng());
//! let stats = lat_geo::aggregate(&series).unwrap();
//! assert!(stats.min <= stats.avg && stats.avg <= stats.max);
//! ```

pub mod catalog;
pub mod distance;
pub mod error;
pub mod filter;
pub mod history;
pub mod latency;
pub mod location;
pub mod stats;

pub use catalog::{CatalogConfig, LocationCatalog};
pub use distance::{haversine_km, EARTH_RADIUS_KM};
pub use error::CatalogError;
pub use filter::{FilterState, LatencyRange};
pub use history::{generate_series, HistoricalPoint, TimeRange};
pub use latency::{simulate_latency, LatencySimulator, LatencyTier};
pub use location::{Location, LocationKind};
pub use stats::{aggregate, Stats};

use serde::{Deserialize, Serialize};

/// Cloud provider hosting an exchange or owning a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    /// Amazon Web Services
    #[serde(rename = "AWS")]
    Aws,
    /// Google Cloud Platform
    #[serde(rename = "GCP")]
    Gcp,
    /// Microsoft Azure
    #[serde(rename = "Azure")]
    Azure,
}

impl Provider {
    /// Every provider, in display order
    pub const ALL: [Provider; 3] = [Provider::Aws, Provider::Gcp, Provider::Azure];

    /// Returns the provider's display name
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Aws => "AWS",
            Provider::Gcp => "GCP",
            Provider::Azure => "Azure",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
