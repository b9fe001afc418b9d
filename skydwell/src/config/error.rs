//! Configuration error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::geo::PolygonError;

/// Malformed static configuration.
///
/// Raised while loading the configuration file or constructing airspace
/// volumes. These are fatal at startup and never recovered.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    /// An airspace polygon is degenerate or has an invalid vertex.
    #[error("airspace '{volume}': {source}")]
    InvalidPolygon {
        volume: String,
        #[source]
        source: PolygonError,
    },

    /// An airspace vertical band is empty, inverted or not finite.
    #[error("airspace '{volume}': vertical band {lower_ft} - {upper_ft} ft is empty or inverted")]
    InvertedBand {
        volume: String,
        lower_ft: f64,
        upper_ft: f64,
    },

    /// An airspace was given an empty name.
    #[error("airspace name must not be empty")]
    EmptyName,

    /// Two airspaces share a name.
    #[error("duplicate airspace '{0}'")]
    DuplicateVolume(String),

    /// A configuration value could not be parsed or is out of range.
    #[error("[{section}] {key}: {reason}")]
    InvalidValue {
        section: String,
        key: String,
        reason: String,
    },

    /// A required configuration key is missing.
    #[error("[{section}] missing required key '{key}'")]
    MissingKey { section: String, key: String },

    /// The configuration file exists but could not be read or parsed.
    #[error("failed to read {}: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },
}

impl ConfigurationError {
    /// Build an `InvalidValue` error.
    pub fn invalid_value(
        section: impl Into<String>,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            section: section.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }
}
