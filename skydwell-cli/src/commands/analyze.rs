//! Analyze command - classify one flight and print its timing.

use std::path::PathBuf;

use serde_json::json;
use skydwell::analysis::{analyze_track, AnalysisError, FlightAnalysis};
use skydwell::phase::ClassifiedFlight;
use skydwell::timing::{BoundaryEvent, Estimate, FlightTimingSummary};

use super::common::{load_config, OutputFormat};
use crate::error::CliError;

/// Arguments for the analyze command.
pub struct AnalyzeArgs {
    pub track: PathBuf,
    pub format: OutputFormat,
    pub samples: bool,
    pub config: Option<PathBuf>,
}

/// Run the analyze command.
pub fn run(args: AnalyzeArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;

    let analysis = analyze_track(&args.track, &config.airspaces, &config.classifier)
        .map_err(|error| match error {
            AnalysisError::Telemetry(e) => CliError::Telemetry(e),
            error => CliError::Analysis {
                flight: skydwell::telemetry::track_id(&args.track),
                error,
            },
        })?;

    // Without a summary the labels are all there is to show
    let show_samples = args.samples || !analysis.is_complete();

    match args.format {
        OutputFormat::Text => print_text(&analysis, show_samples),
        OutputFormat::Json => print_json(&analysis, show_samples)?,
    }

    let FlightAnalysis { id, summary, .. } = analysis;
    summary.map(|_| ()).map_err(|e| CliError::Analysis {
        flight: id,
        error: AnalysisError::BoundaryNotFound(e),
    })
}

fn print_json(analysis: &FlightAnalysis, show_samples: bool) -> Result<(), CliError> {
    let value = json!({
        "flight": analysis.id,
        "phase_counts": phase_counts(&analysis.flight),
        "summary": analysis.summary(),
        "metrics": analysis.summary().map(FlightTimingSummary::metrics),
        "error": analysis.summary.as_ref().err().map(ToString::to_string),
        "samples": show_samples.then(|| analysis.flight.samples()),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn phase_counts(flight: &ClassifiedFlight) -> serde_json::Map<String, serde_json::Value> {
    flight
        .phase_counts()
        .into_iter()
        .map(|(phase, count)| {
            let key = phase.map_or("unclassified", |p| p.as_str());
            (key.to_string(), json!(count))
        })
        .collect()
}

fn print_text(analysis: &FlightAnalysis, show_samples: bool) {
    let flight = &analysis.flight;

    println!("Flight {}", analysis.id);
    println!("========={}", "=".repeat(analysis.id.len()));
    println!(
        "Samples: {}   Recorded: {}   Max altitude: {:.0} ft",
        flight.len(),
        skydwell::timing::format_duration(flight.recorded_duration()),
        flight.max_altitude_ft()
    );

    let counts: Vec<String> = flight
        .phase_counts()
        .into_iter()
        .map(|(phase, count)| {
            let name = phase.map_or("unclassified", |p| p.as_str());
            format!("{} {}", name, count)
        })
        .collect();
    println!("Phases:  {}", counts.join(", "));

    if show_samples {
        println!();
        print_samples(flight);
    }

    match &analysis.summary {
        Ok(summary) => {
            println!();
            print_summary(summary);
        }
        Err(e) => {
            println!();
            println!("No timing summary: {}", e);
        }
    }
}

fn print_samples(flight: &ClassifiedFlight) {
    println!(
        "{:>5}  {:<20} {:>8} {:>6} {:>8}  {}",
        "#", "Time (UTC)", "Alt ft", "Kt", "Fpm", "Phase"
    );
    for sample in flight.samples() {
        println!(
            "{:>5}  {:<20} {:>8.0} {:>6.0} {:>8}  {}",
            sample.index,
            sample.timestamp.format("%Y-%m-%d %H:%M:%S"),
            sample.altitude_ft,
            sample.ground_speed_kt,
            sample.vertical_rate_fpm,
            sample
                .phase
                .map_or_else(|| "-".to_string(), |p| p.to_string())
        );
    }
}

fn print_summary(summary: &FlightTimingSummary) {
    println!("Events");
    print_event("Liftoff", &summary.liftoff);
    print_event("Level-off", &summary.level_off);
    print_event("Top of descent", &summary.top_of_descent);
    print_event("Touchdown", &summary.touchdown);

    println!();
    println!("Durations");
    match summary.before_takeoff_ground {
        Some(before) => print_estimate("Before takeoff", before),
        None => println!("  {:<16} n/a (recording starts after taxi)", "Before takeoff"),
    }
    print_estimate("Climb", summary.climb);
    print_estimate("Cruise", summary.cruise);
    print_estimate("Descent", summary.descent);
    print_estimate("After landing", summary.after_landing_ground);
    print_estimate("Flight", summary.flight_time());
    if let Some(ground) = summary.ground_time() {
        print_estimate("Ground", ground);
    }

    if summary.volumes.is_empty() {
        return;
    }

    println!();
    println!("Airspace");
    for dwell in &summary.volumes {
        match (&dwell.entry, &dwell.exit) {
            (Some(entry), Some(exit)) => println!(
                "  {:<16} {}  in {} out {}{}",
                dwell.volume,
                dwell.estimate(),
                entry.time.format("%H:%M:%S"),
                exit.time.format("%H:%M:%S"),
                if dwell.gaps > 0 {
                    format!("  ({} gaps)", dwell.gaps)
                } else {
                    String::new()
                }
            ),
            _ => println!("  {:<16} not entered", dwell.volume),
        }
    }
    print_estimate("Outside", summary.outside_volumes);
}

fn print_event(label: &str, event: &BoundaryEvent) {
    println!(
        "  {:<16} {} ± {}s  #{} ({:.5}, {:.5})",
        label,
        event.time.format("%Y-%m-%d %H:%M:%S UTC"),
        event.uncertainty.num_seconds(),
        event.index,
        event.position.latitude,
        event.position.longitude
    );
}

fn print_estimate(label: &str, estimate: Estimate) {
    println!("  {:<16} {}", label, estimate);
}
