//! Per-flight timing summary.

use chrono::Duration;
use serde::Serialize;

use super::boundary::{
    locate_level_off, locate_liftoff, locate_top_of_descent, locate_touchdown, BoundaryEvent,
    BoundaryNotFoundError,
};
use super::dwell::{dwell_in, VolumeDwell};
use super::{seconds, Estimate};
use crate::airspace::AirspaceVolume;
use crate::phase::{ClassifiedFlight, ClassifierConfig, FlightPhase};

/// Timing results for one classified flight.
///
/// Computed once by [`summarize`] and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightTimingSummary {
    /// Time between the first and last sample.
    #[serde(rename = "recorded_seconds", serialize_with = "seconds::serialize")]
    pub recorded: Duration,
    /// First airborne sample.
    pub liftoff: BoundaryEvent,
    /// Top of climb.
    pub level_off: BoundaryEvent,
    /// First descent sample.
    pub top_of_descent: BoundaryEvent,
    /// Return to the runway.
    pub touchdown: BoundaryEvent,
    /// From the first sample to liftoff.
    ///
    /// Only defined when the recording starts parked or taxiing; a recording
    /// that starts on the takeoff roll or in the air has no meaningful ground
    /// time before takeoff.
    pub before_takeoff_ground: Option<Estimate>,
    /// From touchdown to the last sample.
    pub after_landing_ground: Estimate,
    /// Liftoff to level-off.
    pub climb: Estimate,
    /// Level-off to top of descent.
    pub cruise: Estimate,
    /// Top of descent to touchdown.
    pub descent: Estimate,
    /// Dwell per airspace volume, in configuration order.
    pub volumes: Vec<VolumeDwell>,
    /// Recorded time not spent in any volume.
    pub outside_volumes: Estimate,
}

impl FlightTimingSummary {
    /// Liftoff to touchdown.
    pub fn flight_time(&self) -> Estimate {
        Estimate::new(
            self.touchdown.time - self.liftoff.time,
            self.liftoff.uncertainty + self.touchdown.uncertainty,
        )
    }

    /// Ground time before takeoff plus after landing, when both are known.
    pub fn ground_time(&self) -> Option<Estimate> {
        self.before_takeoff_ground.map(|before| {
            Estimate::new(
                before.value + self.after_landing_ground.value,
                self.liftoff.uncertainty + self.touchdown.uncertainty,
            )
        })
    }

    /// Dwell for a volume by name.
    pub fn volume(&self, name: &str) -> Option<&VolumeDwell> {
        self.volumes.iter().find(|v| v.volume == name)
    }
}

/// Build the timing summary of a classified flight.
///
/// Volumes the flight never entered contribute zero dwell.
///
/// # Errors
///
/// Returns [`BoundaryNotFoundError`] for the first boundary event (in flight
/// order) that has no matching sample. The classified flight is untouched and
/// remains usable.
pub fn summarize(
    flight: &ClassifiedFlight,
    volumes: &[AirspaceVolume],
    config: &ClassifierConfig,
) -> Result<FlightTimingSummary, BoundaryNotFoundError> {
    let samples = flight.samples();

    let liftoff = locate_liftoff(samples)?;
    let level_off = locate_level_off(samples, config)?;
    let top_of_descent = locate_top_of_descent(samples)?;
    let touchdown = locate_touchdown(samples)?;

    let first = flight.first();
    let last = flight.last();
    let recorded = flight.recorded_duration();

    let before_takeoff_ground = match first.phase {
        Some(FlightPhase::Parked | FlightPhase::Taxi) => Some(Estimate::new(
            liftoff.time - first.timestamp,
            liftoff.uncertainty,
        )),
        _ => None,
    };
    let after_landing_ground =
        Estimate::new(last.timestamp - touchdown.time, touchdown.uncertainty);

    let climb = Estimate::new(
        level_off.time - liftoff.time,
        level_off.uncertainty + liftoff.uncertainty,
    );
    let cruise = Estimate::new(
        top_of_descent.time - level_off.time,
        level_off.uncertainty + top_of_descent.uncertainty,
    );
    let descent = Estimate::new(
        touchdown.time - top_of_descent.time,
        top_of_descent.uncertainty + touchdown.uncertainty,
    );

    let volumes: Vec<VolumeDwell> = volumes.iter().map(|v| dwell_in(v, samples)).collect();
    let inside = volumes
        .iter()
        .fold(Estimate::zero(), |acc, v| acc + v.estimate());
    let outside_volumes = Estimate::new(recorded - inside.value, inside.uncertainty);

    tracing::debug!(
        liftoff = liftoff.index,
        level_off = level_off.index,
        top_of_descent = top_of_descent.index,
        touchdown = touchdown.index,
        volumes = volumes.len(),
        "Flight timing summarized"
    );

    Ok(FlightTimingSummary {
        recorded,
        liftoff,
        level_off,
        top_of_descent,
        touchdown,
        before_takeoff_ground,
        after_landing_ground,
        climb,
        cruise,
        descent,
        volumes,
        outside_volumes,
    })
}
