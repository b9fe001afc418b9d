//! Airspace volumes and membership.
//!
//! An [`AirspaceVolume`] pairs a [`VerticalBand`] with a horizontal
//! [`Polygon`](crate::geo::Polygon). The engine only ever asks one question of
//! it: is this sample inside? See [`is_inside`].
//!
//! Built-in volumes for the Campinas terminal area live in [`presets`].

pub mod presets;
mod volume;

pub use volume::{is_inside, AirspaceVolume, VerticalBand};

use std::collections::HashSet;

use crate::config::ConfigurationError;

/// Check a set of volumes for duplicate names.
///
/// Volume names double as metric keys, so they must be unique.
pub fn validate_unique_names(volumes: &[AirspaceVolume]) -> Result<(), ConfigurationError> {
    let mut seen = HashSet::new();
    for volume in volumes {
        if !seen.insert(volume.name()) {
            return Err(ConfigurationError::DuplicateVolume(volume.name().to_string()));
        }
    }
    Ok(())
}
