//! Location catalog
//!
//! The catalog is the only data source for the graph. It is loaded once,
//! validated as a whole, and shared immutably (`Arc<Location>`) by every
//! connection built from it.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::location::{Location, LocationKind};
use crate::Provider;

/// Serializable catalog description (the on-disk JSON shape)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Exchange records
    #[serde(default)]
    pub exchanges: Vec<Location>,
    /// Cloud region records
    #[serde(default)]
    pub regions: Vec<Location>,
}

/// Validated, immutable set of exchanges and regions
#[derive(Debug, Clone)]
pub struct LocationCatalog {
    exchanges: Vec<Arc<Location>>,
    regions: Vec<Arc<Location>>,
}

impl LocationCatalog {
    /// Validate a catalog description
    ///
    /// Fails on the first record with out-of-range coordinates or a name
    /// already used by another record.
    pub fn from_config(config: CatalogConfig) -> Result<Self, CatalogError> {
        validate_records(&config)?;

        debug!(
            "Catalog validated: {} exchanges, {} regions",
            config.exchanges.len(),
            config.regions.len()
        );

        Ok(Self {
            exchanges: config.exchanges.into_iter().map(Arc::new).collect(),
            regions: config.regions.into_iter().map(Arc::new).collect(),
        })
    }

    /// Parse and validate a JSON catalog
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let config: CatalogConfig = serde_json::from_str(json)?;
        Self::from_config(config)
    }

    /// Read, parse and validate a JSON catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        info!(
            "Loaded catalog from {}: {} exchanges, {} regions",
            path.display(),
            catalog.exchanges.len(),
            catalog.regions.len()
        );
        Ok(catalog)
    }

    /// The built-in reference catalog: 8 exchanges and 7 regions
    pub fn reference() -> Self {
        Self {
            exchanges: REFERENCE_EXCHANGES
                .iter()
                .map(|s| Arc::new(Location::from(s)))
                .collect(),
            regions: REFERENCE_REGIONS
                .iter()
                .map(|s| Arc::new(Location::from(s)))
                .collect(),
        }
    }

    /// Convert back into the serializable description
    pub fn to_config(&self) -> CatalogConfig {
        CatalogConfig {
            exchanges: self.exchanges.iter().map(|l| l.as_ref().clone()).collect(),
            regions: self.regions.iter().map(|l| l.as_ref().clone()).collect(),
        }
    }

    /// All exchanges, in catalog order
    pub fn exchanges(&self) -> &[Arc<Location>] {
        &self.exchanges
    }

    /// All regions, in catalog order
    pub fn regions(&self) -> &[Arc<Location>] {
        &self.regions
    }

    /// Look up a location by name
    pub fn find(&self, name: &str) -> Option<&Arc<Location>> {
        self.exchanges
            .iter()
            .chain(self.regions.iter())
            .find(|l| l.name == name)
    }

    /// Which side a named location sits on
    pub fn kind_of(&self, name: &str) -> Option<LocationKind> {
        if self.exchanges.iter().any(|l| l.name == name) {
            Some(LocationKind::Exchange)
        } else if self.regions.iter().any(|l| l.name == name) {
            Some(LocationKind::Region)
        } else {
            None
        }
    }

    /// Total number of records
    pub fn len(&self) -> usize {
        self.exchanges.len() + self.regions.len()
    }

    /// True if the catalog holds no records
    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty() && self.regions.is_empty()
    }
}

impl Default for LocationCatalog {
    fn default() -> Self {
        Self::reference()
    }
}

fn validate_records(config: &CatalogConfig) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    let tagged = config
        .exchanges
        .iter()
        .map(|loc| (LocationKind::Exchange, loc))
        .chain(config.regions.iter().map(|loc| (LocationKind::Region, loc)));

    for (kind, location) in tagged {
        location.validate(kind)?;
        if !seen.insert(location.name.as_str()) {
            return Err(CatalogError::DuplicateName(location.name.clone()));
        }
    }
    Ok(())
}

/// Compile-time location record
#[derive(Debug, Clone, Copy)]
struct LocationStatic {
    name: &'static str,
    lat: f64,
    lng: f64,
    descriptive_location: Option<&'static str>,
    provider: Provider,
    region_code: Option<&'static str>,
}

impl From<&LocationStatic> for Location {
    fn from(s: &LocationStatic) -> Self {
        Self {
            name: s.name.to_string(),
            lat: s.lat,
            lng: s.lng,
            descriptive_location: s.descriptive_location.map(str::to_string),
            provider: s.provider,
            region_code: s.region_code.map(str::to_string),
        }
    }
}

const fn exchange(name: &'static str, lat: f64, lng: f64, city: &'static str, provider: Provider) -> LocationStatic {
    LocationStatic {
        name,
        lat,
        lng,
        descriptive_location: Some(city),
        provider,
        region_code: None,
    }
}

const fn region(name: &'static str, lat: f64, lng: f64, provider: Provider, code: &'static str) -> LocationStatic {
    LocationStatic {
        name,
        lat,
        lng,
        descriptive_location: None,
        provider,
        region_code: Some(code),
    }
}

static REFERENCE_EXCHANGES: &[LocationStatic] = &[
    exchange("Binance", 35.6762, 139.6503, "Tokyo", Provider::Aws),
    exchange("Coinbase", 37.7749, -122.4194, "San Francisco", Provider::Gcp),
    exchange("Kraken", 51.5074, -0.1278, "London", Provider::Aws),
    exchange("Bybit", 1.3521, 103.8198, "Singapore", Provider::Aws),
    exchange("OKX", 22.3193, 114.1694, "Hong Kong", Provider::Azure),
    exchange("Deribit", 52.3676, 4.9041, "Amsterdam", Provider::Gcp),
    exchange("Bitfinex", 48.8566, 2.3522, "Paris", Provider::Azure),
    exchange("Huobi", 37.5665, 126.9780, "Seoul", Provider::Aws),
];

static REFERENCE_REGIONS: &[LocationStatic] = &[
    region("AWS US-East", 38.9072, -77.0369, Provider::Aws, "us-east-1"),
    region("AWS EU-West", 53.3498, -6.2603, Provider::Aws, "eu-west-1"),
    region("AWS AP-South", 19.0760, 72.8777, Provider::Aws, "ap-south-1"),
    region("GCP US-Central", 41.2619, -95.8608, Provider::Gcp, "us-central1"),
    region("GCP EU-West", 50.4501, 3.8196, Provider::Gcp, "europe-west1"),
    region("Azure US-West", 47.6062, -122.3321, Provider::Azure, "westus2"),
    region("Azure EU-North", 53.3498, -6.2603, Provider::Azure, "northeurope"),
];
