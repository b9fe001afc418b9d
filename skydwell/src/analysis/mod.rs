//! Per-flight analysis pipeline and batch processing.
//!
//! ```text
//! track.csv ─► read_track ─► classify ─► summarize ─► FlightAnalysis
//!                                 │            │
//!                                 │            └─ BoundaryNotFoundError: summary missing,
//!                                 │               classified samples kept
//!                                 └─ DegenerateIntervalError: flight rejected
//! ```
//!
//! Flights are independent; [`analyze_batch`] runs them in parallel and
//! reports failures per flight without stopping the batch.

mod batch;
mod export;
mod partition;

pub use batch::{analyze_batch, analyze_batch_with_progress, BatchFailure, BatchReport};
pub use export::{summary_columns, write_summary_csv, write_summary_csv_file};
pub use partition::Partition;

use std::path::Path;

use thiserror::Error;

use crate::airspace::AirspaceVolume;
use crate::phase::{classify, ClassifiedFlight, ClassifierConfig, DegenerateIntervalError};
use crate::telemetry::{read_track, RawSample, TelemetryError};
use crate::timing::{summarize, BoundaryNotFoundError, FlightTimingSummary};

/// Why a flight could not be fully analysed.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The track file could not be read.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    /// Rates could not be derived; the flight has no phase labels.
    #[error(transparent)]
    DegenerateInterval(#[from] DegenerateIntervalError),

    /// A boundary event is missing; the flight has no timing summary.
    #[error(transparent)]
    BoundaryNotFound(#[from] BoundaryNotFoundError),
}

impl AnalysisError {
    /// Short stable identifier of the error kind, for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Telemetry(_) => "telemetry",
            AnalysisError::DegenerateInterval(_) => "degenerate_interval",
            AnalysisError::BoundaryNotFound(_) => "boundary_not_found",
        }
    }
}

/// Result of analysing one flight.
#[derive(Debug, Clone)]
pub struct FlightAnalysis {
    /// Flight identifier.
    pub id: String,
    /// Labelled samples. Always available once classification succeeded.
    pub flight: ClassifiedFlight,
    /// Timing summary, or the boundary event that could not be found.
    pub summary: Result<FlightTimingSummary, BoundaryNotFoundError>,
}

impl FlightAnalysis {
    /// Whether a timing summary was produced.
    pub fn is_complete(&self) -> bool {
        self.summary.is_ok()
    }

    /// Timing summary, if any.
    pub fn summary(&self) -> Option<&FlightTimingSummary> {
        self.summary.as_ref().ok()
    }
}

/// Classify a flight and build its timing summary.
///
/// # Errors
///
/// Returns [`AnalysisError::DegenerateInterval`] if the samples cannot be
/// classified. A missing boundary event is not an error here; it is recorded
/// in [`FlightAnalysis::summary`].
pub fn analyze_flight(
    id: impl Into<String>,
    raw: &[RawSample],
    volumes: &[AirspaceVolume],
    config: &ClassifierConfig,
) -> Result<FlightAnalysis, AnalysisError> {
    let id = id.into();
    let flight = classify(raw, config)?;
    let summary = summarize(&flight, volumes, config);

    tracing::debug!(
        flight = %id,
        samples = flight.len(),
        complete = summary.is_ok(),
        "Flight analysed"
    );

    Ok(FlightAnalysis {
        id,
        flight,
        summary,
    })
}

/// Read a track file and analyse it.
pub fn analyze_track(
    path: &Path,
    volumes: &[AirspaceVolume],
    config: &ClassifierConfig,
) -> Result<FlightAnalysis, AnalysisError> {
    let track = read_track(path)?;
    analyze_flight(track.id, &track.samples, volumes, config)
}


#[cfg(test)]
mod tests {
    use super::test_support::{csv, raw, PROFILE};
    use super::*;
    use crate::timing::BoundaryKind;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_complete_analysis() {
        let analysis =
            analyze_flight("TST123", &raw(&PROFILE), &[], &ClassifierConfig::default()).unwrap();
        assert_eq!(analysis.id, "TST123");
        assert!(analysis.is_complete());
        assert_eq!(analysis.summary().unwrap().touchdown.index, 28);
    }

    #[test]
    fn test_missing_boundary_keeps_phases() {
        let analysis = analyze_flight(
            "TST123",
            &raw(&PROFILE[..18]),
            &[],
            &ClassifierConfig::default(),
        )
        .unwrap();
        assert!(!analysis.is_complete());
        assert!(analysis.summary().is_none());
        assert_eq!(analysis.flight.len(), 18);

        let err = AnalysisError::from(analysis.summary.unwrap_err());
        assert_eq!(err.kind(), "boundary_not_found");
        assert!(matches!(
            err,
            AnalysisError::BoundaryNotFound(BoundaryNotFoundError {
                kind: BoundaryKind::TopOfDescent,
                ..
            })
        ));
    }

    #[test]
    fn test_degenerate_flight_is_rejected() {
        let mut samples = raw(&PROFILE[..3]);
        samples[2].timestamp = samples[1].timestamp;
        let err =
            analyze_flight("BAD", &samples, &[], &ClassifierConfig::default()).unwrap_err();
        assert_eq!(err.kind(), "degenerate_interval");
    }

    #[test]
    fn test_analyze_track_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("AZU4171_2019-10-14.csv");
        fs::write(&path, csv(&PROFILE)).unwrap();

        let analysis = analyze_track(&path, &[], &ClassifierConfig::default()).unwrap();
        assert_eq!(analysis.id, "AZU4171_2019-10-14");
        assert_eq!(analysis.flight.len(), 31);
        assert!(analysis.is_complete());
    }

    #[test]
    fn test_unreadable_track_file() {
        let dir = TempDir::new().unwrap();
        let err = analyze_track(
            &dir.path().join("missing.csv"),
            &[],
            &ClassifierConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "telemetry");
    }
}
