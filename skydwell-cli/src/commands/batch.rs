//! Batch command - analyse a directory of tracks and write the summary CSV.

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use skydwell::analysis::{analyze_batch_with_progress, write_summary_csv_file, BatchReport};
use skydwell::telemetry::discover_tracks;

use super::common::load_config;
use crate::error::CliError;

/// Arguments for the batch command.
pub struct BatchArgs {
    pub dir: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
}

/// Run the batch command.
pub fn run(args: BatchArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;

    let paths = discover_tracks(&args.dir)?;
    if paths.is_empty() {
        println!("No track files found in {}", args.dir.display());
        return Ok(());
    }

    tracing::info!(
        dir = %args.dir.display(),
        tracks = paths.len(),
        volumes = config.airspaces.len(),
        "Starting batch analysis"
    );

    let progress = ProgressBar::new(paths.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let report = analyze_batch_with_progress(
        &paths,
        &config.airspaces,
        &config.classifier,
        |path| {
            if let Some(name) = path.file_name() {
                progress.set_message(name.to_string_lossy().into_owned());
            }
            progress.inc(1);
        },
    );
    progress.finish_and_clear();

    write_summary_csv_file(&args.output, report.summaries())
        .map_err(|e| CliError::Output(format!("{}: {}", args.output.display(), e)))?;

    print_report(&report);
    println!();
    println!("Summary written to {}", args.output.display());

    if report.failures.is_empty() {
        Ok(())
    } else {
        Err(CliError::BatchFailures {
            failed: report.failures.len(),
            total: report.total(),
        })
    }
}

fn print_report(report: &BatchReport) {
    println!(
        "Tracks: {}   Summarized: {}   Incomplete: {}   Failed: {}",
        report.total(),
        report.summaries().count(),
        report.incomplete().count(),
        report.failures.len()
    );

    let incomplete: Vec<_> = report.incomplete().collect();
    if !incomplete.is_empty() {
        println!();
        println!("Incomplete (classified, no timing summary):");
        for analysis in incomplete {
            if let Err(e) = &analysis.summary {
                println!("  {}: {}", analysis.id, e);
            }
        }
    }

    if !report.failures.is_empty() {
        println!();
        println!("Failed:");
        for failure in &report.failures {
            println!("  {} [{}]: {}", failure.id, failure.error.kind(), failure.error);
        }
    }
}
