//! Track file reader.
//!
//! Reads the flight-tracking CSV export:
//!
//! ```text
//! Timestamp,UTC,Callsign,Position,Altitude,Speed,Direction
//! 1571007125,2019-10-13T22:52:05Z,AZU4171,"-23.00361,-47.13622",0,0,334
//! ```
//!
//! Only `Timestamp` (Unix seconds), `Position` (`"lat,lon"`), `Altitude`
//! (feet) and `Speed` (knots) are used; other columns are ignored.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::DateTime;
use serde::Deserialize;

use super::{RawSample, TelemetryError};
use crate::geo::Position;

/// A flight's raw samples together with its identifier.
#[derive(Debug, Clone)]
pub struct Track {
    /// Flight identifier (the track file stem).
    pub id: String,
    /// Samples in file order.
    pub samples: Vec<RawSample>,
}

#[derive(Debug, Deserialize)]
struct TrackRecord {
    #[serde(rename = "Timestamp")]
    timestamp: i64,
    #[serde(rename = "Position")]
    position: String,
    #[serde(rename = "Altitude")]
    altitude: f64,
    #[serde(rename = "Speed")]
    speed: f64,
}

impl TrackRecord {
    fn into_sample(self, line: u64) -> Result<RawSample, TelemetryError> {
        let invalid = |reason: String| TelemetryError::InvalidRecord { line, reason };

        let timestamp = DateTime::from_timestamp(self.timestamp, 0)
            .ok_or_else(|| invalid(format!("timestamp {} out of range", self.timestamp)))?;

        let position = parse_position(&self.position).ok_or_else(|| {
            invalid(format!("position '{}' is not 'lat,lon'", self.position))
        })?;

        if !self.altitude.is_finite() || self.altitude < 0.0 {
            return Err(invalid(format!("altitude {} is negative", self.altitude)));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(invalid(format!("speed {} is negative", self.speed)));
        }

        Ok(RawSample::new(timestamp, position, self.altitude, self.speed))
    }
}

/// Parse a `"lat,lon"` pair.
fn parse_position(text: &str) -> Option<Position> {
    let (lat, lon) = text.split_once(',')?;
    let position = Position::new(lat.trim().parse().ok()?, lon.trim().parse().ok()?);
    position.is_valid().then_some(position)
}

/// Parse track samples from any CSV source.
pub fn parse_track<R: Read>(reader: R) -> Result<Vec<RawSample>, TelemetryError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    for (row, record) in csv_reader.deserialize::<TrackRecord>().enumerate() {
        // Header is line 1
        let line = row as u64 + 2;
        samples.push(record?.into_sample(line)?);
    }
    Ok(samples)
}

/// Read a track file; the flight id is the file stem.
pub fn read_track(path: &Path) -> Result<Track, TelemetryError> {
    let file = File::open(path).map_err(|source| TelemetryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let samples = parse_track(file)?;
    let id = track_id(path);

    tracing::debug!(flight = %id, samples = samples.len(), "Track loaded");

    Ok(Track { id, samples })
}

/// Flight identifier for a track path.
pub fn track_id(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// List the `*.csv` track files in a directory, sorted by path.
pub fn discover_tracks(dir: &Path) -> Result<Vec<PathBuf>, TelemetryError> {
    let pattern = dir.join("*.csv");
    let pattern = pattern.to_string_lossy();

    let mut paths = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| TelemetryError::Io {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
