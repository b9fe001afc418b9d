//! Flight telemetry samples and track file ingestion.
//!
//! A flight is an ordered sequence of position reports. The engine consumes
//! [`RawSample`]s and produces enriched [`Sample`]s carrying the derived
//! vertical rate and phase label.
//!
//! # Example
//!
//! ```ignore
//! use skydwell::telemetry::{discover_tracks, read_track};
//!
//! for path in discover_tracks(Path::new("data/ops"))? {
//!     let track = read_track(&path)?;
//!     println!("{}: {} samples", track.id, track.samples.len());
//! }
//! ```

mod reader;
mod sample;

pub use reader::{discover_tracks, parse_track, read_track, track_id, Track};
pub use sample::{RawSample, Sample};

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading track files.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The file could not be opened or listed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV framing or field-type error.
    #[error("malformed track file: {0}")]
    Csv(#[from] csv::Error),

    /// A row parsed but its values make no sense.
    #[error("line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    /// The track directory could not be turned into a search pattern.
    #[error("invalid track directory pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}
