//! Parallel analysis of many track files.
//!
//! Each track is read, classified and summarized on the rayon thread pool.
//! Flights share nothing but the read-only volumes and configuration, so a
//! failing flight is logged and collected without affecting the others.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{info, warn};

use super::{analyze_track, AnalysisError, FlightAnalysis};
use crate::airspace::AirspaceVolume;
use crate::phase::ClassifierConfig;
use crate::telemetry::track_id;
use crate::timing::FlightTimingSummary;

/// A flight that produced no classification.
#[derive(Debug)]
pub struct BatchFailure {
    /// Flight identifier (file stem).
    pub id: String,
    /// Track file.
    pub path: PathBuf,
    /// What went wrong.
    pub error: AnalysisError,
}

/// Outcome of a batch run, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Classified flights, with or without a timing summary.
    pub analyses: Vec<FlightAnalysis>,
    /// Flights that could not be read or classified.
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Number of tracks processed.
    pub fn total(&self) -> usize {
        self.analyses.len() + self.failures.len()
    }

    /// Flights with a complete timing summary.
    pub fn summaries(&self) -> impl Iterator<Item = (&str, &FlightTimingSummary)> {
        self.analyses
            .iter()
            .filter_map(|a| a.summary().map(|s| (a.id.as_str(), s)))
    }

    /// Classified flights missing a boundary event.
    pub fn incomplete(&self) -> impl Iterator<Item = &FlightAnalysis> {
        self.analyses.iter().filter(|a| !a.is_complete())
    }
}

/// Analyse every track file in parallel.
pub fn analyze_batch(
    paths: &[PathBuf],
    volumes: &[AirspaceVolume],
    config: &ClassifierConfig,
) -> BatchReport {
    analyze_batch_with_progress(paths, volumes, config, |_| {})
}

/// Analyse every track file in parallel, calling `on_done` after each one.
///
/// `on_done` receives the track path and runs on worker threads.
pub fn analyze_batch_with_progress<F>(
    paths: &[PathBuf],
    volumes: &[AirspaceVolume],
    config: &ClassifierConfig,
    on_done: F,
) -> BatchReport
where
    F: Fn(&Path) + Sync,
{
    let results: Vec<(&PathBuf, Result<FlightAnalysis, AnalysisError>)> = paths
        .par_iter()
        .map(|path| {
            let result = analyze_track(path, volumes, config);
            on_done(path);
            (path, result)
        })
        .collect();

    let mut report = BatchReport::default();
    for (path, result) in results {
        match result {
            Ok(analysis) => {
                if let Err(e) = &analysis.summary {
                    warn!(
                        flight = %analysis.id,
                        kind = "boundary_not_found",
                        error = %e,
                        "Flight has no timing summary"
                    );
                }
                report.analyses.push(analysis);
            }
            Err(error) => {
                let id = track_id(path);
                warn!(
                    flight = %id,
                    kind = error.kind(),
                    error = %error,
                    "Skipping flight"
                );
                report.failures.push(BatchFailure {
                    id,
                    path: path.clone(),
                    error,
                });
            }
        }
    }

    info!(
        tracks = report.total(),
        summarized = report.summaries().count(),
        incomplete = report.incomplete().count(),
        failed = report.failures.len(),
        "Batch analysis complete"
    );

    report
}
