//! Error types for catalog loading and validation

use std::path::PathBuf;

use thiserror::Error;

use crate::location::LocationKind;

/// Errors that can occur while loading or validating a location catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Latitude outside [-90, 90] (or not a number)
    #[error("{kind} '{name}' has latitude {lat} outside [-90, 90]")]
    LatitudeOutOfRange {
        kind: LocationKind,
        name: String,
        lat: f64,
    },

    /// Longitude outside [-180, 180] (or not a number)
    #[error("{kind} '{name}' has longitude {lng} outside [-180, 180]")]
    LongitudeOutOfRange {
        kind: LocationKind,
        name: String,
        lng: f64,
    },

    /// Two records share a name
    #[error("duplicate location name: {0}")]
    DuplicateName(String),

    /// Catalog file could not be read
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog JSON is malformed
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// Name of the offending record, if the error is about a specific record
    pub fn record_name(&self) -> Option<&str> {
        match self {
            CatalogError::LatitudeOutOfRange { name, .. }
            | CatalogError::LongitudeOutOfRange { name, .. }
            | CatalogError::DuplicateName(name) => Some(name),
            CatalogError::Io { .. } | CatalogError::Json(_) => None,
        }
    }
}
