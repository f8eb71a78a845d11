//! Exchange and cloud-region locations

use serde::{Deserialize, Serialize};

use crate::distance::haversine_km;
use crate::error::CatalogError;
use crate::Provider;

/// Which side of a connection a location sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationKind {
    /// A cryptocurrency trading venue (always a connection source)
    Exchange,
    /// A cloud-provider data-center region (always a connection destination)
    Region,
}

impl LocationKind {
    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exchange => "exchange",
            Self::Region => "region",
        }
    }
}

impl std::fmt::Display for LocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A named point on the globe
///
/// Locations are immutable once the catalog is loaded. Exchanges usually
/// carry a descriptive location (a city), regions usually carry a region code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Unique display name
    pub name: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
    /// Human-readable place, e.g. "Tokyo"
    #[serde(rename = "location", default, skip_serializing_if = "Option::is_none")]
    pub descriptive_location: Option<String>,
    /// Hosting or owning provider
    pub provider: Provider,
    /// Provider region code, e.g. "us-east-1"
    #[serde(rename = "region", default, skip_serializing_if = "Option::is_none")]
    pub region_code: Option<String>,
}

impl Location {
    /// Create an exchange location
    pub fn exchange(
        name: impl Into<String>,
        lat: f64,
        lng: f64,
        city: impl Into<String>,
        provider: Provider,
    ) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
            descriptive_location: Some(city.into()),
            provider,
            region_code: None,
        }
    }

    /// Create a cloud region location
    pub fn region(
        name: impl Into<String>,
        lat: f64,
        lng: f64,
        provider: Provider,
        region_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
            descriptive_location: None,
            provider,
            region_code: Some(region_code.into()),
        }
    }

    /// Check coordinate bounds, naming this record on failure
    pub fn validate(&self, kind: LocationKind) -> Result<(), CatalogError> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(CatalogError::LatitudeOutOfRange {
                kind,
                name: self.name.clone(),
                lat: self.lat,
            });
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(CatalogError::LongitudeOutOfRange {
                kind,
                name: self.name.clone(),
                lng: self.lng,
            });
        }
        Ok(())
    }

    /// Great-circle distance to another location in kilometers
    pub fn distance_km_to(&self, other: &Location) -> f64 {
        haversine_km(self.lat, self.lng, other.lat, other.lng)
    }

    /// Hover label: name, place (or region code), provider
    pub fn label(&self) -> String {
        let place = self
            .descriptive_location
            .as_deref()
            .or(self.region_code.as_deref())
            .unwrap_or("");
        format!("{}\n{}\n{}", self.name, place, self.provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_bounds() {
        let corner = Location::region("Corner", 90.0, -180.0, Provider::Gcp, "edge");
        assert!(corner.validate(LocationKind::Region).is_ok());
        let corner = Location::region("Corner", -90.0, 180.0, Provider::Gcp, "edge");
        assert!(corner.validate(LocationKind::Region).is_ok());
    }

    #[test]
    fn test_validate_rejects_latitude() {
        let bad = Location::exchange("Nowhere", 91.5, 0.0, "North of North", Provider::Aws);
        let err = bad.validate(LocationKind::Exchange).unwrap_err();
        assert!(matches!(err, CatalogError::LatitudeOutOfRange { .. }));
        assert_eq!(err.record_name(), Some("Nowhere"));
        assert!(err.to_string().contains("exchange 'Nowhere'"));
    }

    #[test]
    fn test_validate_rejects_longitude_and_nan() {
        let bad = Location::region("Far East", 10.0, 180.5, Provider::Azure, "x");
        assert!(matches!(
            bad.validate(LocationKind::Region),
            Err(CatalogError::LongitudeOutOfRange { .. })
        ));

        let nan = Location::region("Lost", f64::NAN, 0.0, Provider::Azure, "x");
        assert!(matches!(
            nan.validate(LocationKind::Region),
            Err(CatalogError::LatitudeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_label_prefers_descriptive_location() {
        let ex = Location::exchange("Kraken", 51.5074, -0.1278, "London", Provider::Aws);
        assert_eq!(ex.label(), "Kraken\nLondon\nAWS");

        let region = Location::region("GCP US-Central", 41.2619, -95.8608, Provider::Gcp, "us-central1");
        assert_eq!(region.label(), "GCP US-Central\nus-central1\nGCP");
    }

    #[test]
    fn test_json_field_names() {
        let json = r#"{"name":"OKX","lat":22.3193,"lng":114.1694,"location":"Hong Kong","provider":"Azure"}"#;
        let loc: Location = serde_json::from_str(json).unwrap();
        assert_eq!(loc.descriptive_location.as_deref(), Some("Hong Kong"));
        assert_eq!(loc.region_code, None);
        assert_eq!(loc.provider, Provider::Azure);
    }
}
