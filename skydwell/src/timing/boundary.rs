//! Phase boundary events.
//!
//! | Event          | Triggering sample                                                  |
//! |----------------|--------------------------------------------------------------------|
//! | liftoff        | first sample above the ground                                      |
//! | level-off      | first `k` after a climb sample that is cruise, descent or has zero |
//! |                | rate, within the tolerance of the flight's highest altitude        |
//! | top of descent | first descent sample                                               |
//! | touchdown      | scanning backwards, first landing sample not preceded by landing,  |
//! |                | or taxi sample not preceded by descent                             |
//!
//! The event time is the timestamp of the triggering sample. Its uncertainty
//! is the gap to the preceding sample: the transition happened somewhere in
//! that interval.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;

use super::seconds;
use crate::geo::Position;
use crate::phase::{ClassifierConfig, FlightPhase};
use crate::telemetry::Sample;

/// Notable phase transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    /// First airborne sample.
    Liftoff,
    /// Top of climb.
    LevelOff,
    /// First descent sample.
    TopOfDescent,
    /// Return to the runway.
    Touchdown,
}

impl BoundaryKind {
    /// All events in flight order.
    pub const ALL: [BoundaryKind; 4] = [
        BoundaryKind::Liftoff,
        BoundaryKind::LevelOff,
        BoundaryKind::TopOfDescent,
        BoundaryKind::Touchdown,
    ];

    /// Stable identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryKind::Liftoff => "liftoff",
            BoundaryKind::LevelOff => "level_off",
            BoundaryKind::TopOfDescent => "top_of_descent",
            BoundaryKind::Touchdown => "touchdown",
        }
    }
}

impl std::fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A required boundary event has no matching sample.
///
/// The flight's per-sample phases remain valid; only the timing summary
/// cannot be produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("no {kind} found among {samples} samples")]
pub struct BoundaryNotFoundError {
    /// The missing event.
    pub kind: BoundaryKind,
    /// Number of samples searched.
    pub samples: usize,
}

/// A detected transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundaryEvent {
    /// Index of the triggering sample.
    pub index: usize,
    /// Timestamp of the triggering sample.
    pub time: DateTime<Utc>,
    /// Worst-case timing error.
    #[serde(rename = "uncertainty_seconds", serialize_with = "seconds::serialize")]
    pub uncertainty: Duration,
    /// Position of the triggering sample.
    pub position: Position,
}

impl BoundaryEvent {
    /// Event at `sample`, uncertain by the gap since its predecessor.
    ///
    /// The first sample of a flight has no predecessor; its uncertainty is zero.
    pub fn after_gap(samples: &[Sample], sample: &Sample) -> Self {
        let uncertainty = sample
            .index
            .checked_sub(1)
            .and_then(|prev| samples.get(prev))
            .map_or_else(Duration::zero, |prev| sample.timestamp - prev.timestamp);
        Self::with_uncertainty(sample, uncertainty)
    }

    /// Event at `sample`, uncertain by the gap until its successor.
    ///
    /// The last sample of a flight has no successor; its uncertainty is zero.
    pub fn before_gap(samples: &[Sample], sample: &Sample) -> Self {
        let uncertainty = samples
            .get(sample.index + 1)
            .map_or_else(Duration::zero, |next| next.timestamp - sample.timestamp);
        Self::with_uncertainty(sample, uncertainty)
    }

    fn with_uncertainty(sample: &Sample, uncertainty: Duration) -> Self {
        Self {
            index: sample.index,
            time: sample.timestamp,
            uncertainty,
            position: sample.position,
        }
    }
}

fn not_found(kind: BoundaryKind, samples: &[Sample]) -> BoundaryNotFoundError {
    BoundaryNotFoundError {
        kind,
        samples: samples.len(),
    }
}

/// First sample with altitude above zero.
pub fn locate_liftoff(samples: &[Sample]) -> Result<BoundaryEvent, BoundaryNotFoundError> {
    samples
        .iter()
        .find(|s| s.altitude_ft > 0.0)
        .map(|s| BoundaryEvent::after_gap(samples, s))
        .ok_or_else(|| not_found(BoundaryKind::Liftoff, samples))
}

/// Top of climb.
///
/// First sample `k ≥ 1` whose predecessor is labelled climb, which is itself
/// cruise or descent or has a zero vertical rate, and whose altitude lies
/// within `config.level_off_tolerance_ft` of the highest altitude of the
/// flight.
pub fn locate_level_off(
    samples: &[Sample],
    config: &ClassifierConfig,
) -> Result<BoundaryEvent, BoundaryNotFoundError> {
    let highest = samples
        .iter()
        .map(|s| s.altitude_ft)
        .fold(f64::NEG_INFINITY, f64::max);

    samples
        .windows(2)
        .find(|pair| {
            let (prev, cur) = (&pair[0], &pair[1]);
            let stopped_climbing = cur.is(FlightPhase::Cruise)
                || cur.is(FlightPhase::Descent)
                || cur.vertical_rate_fpm == 0;
            prev.is(FlightPhase::Climb)
                && stopped_climbing
                && (cur.altitude_ft - highest).abs() < config.level_off_tolerance_ft
        })
        .map(|pair| BoundaryEvent::after_gap(samples, &pair[1]))
        .ok_or_else(|| not_found(BoundaryKind::LevelOff, samples))
}

/// First sample labelled descent.
pub fn locate_top_of_descent(samples: &[Sample]) -> Result<BoundaryEvent, BoundaryNotFoundError> {
    samples
        .iter()
        .find(|s| s.is(FlightPhase::Descent))
        .map(|s| BoundaryEvent::after_gap(samples, s))
        .ok_or_else(|| not_found(BoundaryKind::TopOfDescent, samples))
}

/// Touchdown, searched from the end of the flight.
///
/// The last sample `k ≥ 1` that is either a landing sample following a
/// non-landing sample, or a taxi sample not following a descent sample.
pub fn locate_touchdown(samples: &[Sample]) -> Result<BoundaryEvent, BoundaryNotFoundError> {
    samples
        .windows(2)
        .rev()
        .find(|pair| {
            let (prev, cur) = (&pair[0], &pair[1]);
            (cur.is(FlightPhase::Landing) && !prev.is(FlightPhase::Landing))
                || (cur.is(FlightPhase::Taxi) && !prev.is(FlightPhase::Descent))
        })
        .map(|pair| BoundaryEvent::after_gap(samples, &pair[1]))
        .ok_or_else(|| not_found(BoundaryKind::Touchdown, samples))
}

/// Locate any boundary event by kind.
pub fn locate(
    kind: BoundaryKind,
    samples: &[Sample],
    config: &ClassifierConfig,
) -> Result<BoundaryEvent, BoundaryNotFoundError> {
    match kind {
        BoundaryKind::Liftoff => locate_liftoff(samples),
        BoundaryKind::LevelOff => locate_level_off(samples, config),
        BoundaryKind::TopOfDescent => locate_top_of_descent(samples),
        BoundaryKind::Touchdown => locate_touchdown(samples),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn labelled(points: &[(i64, f64, i32, Option<FlightPhase>)]) -> Vec<Sample> {
        let start = Utc.with_ymd_and_hms(2019, 10, 14, 9, 0, 0).unwrap();
        points
            .iter()
            .enumerate()
            .map(|(index, &(t, altitude_ft, vertical_rate_fpm, phase))| Sample {
                index,
                timestamp: start + Duration::seconds(t),
                position: Position::new(-23.0 + index as f64 * 0.01, -47.1),
                altitude_ft,
                ground_speed_kt: 0.0,
                vertical_rate_fpm,
                phase,
            })
            .collect()
    }

    use FlightPhase::*;

    fn flight() -> Vec<Sample> {
        labelled(&[
            (0, 0.0, 0, Some(Parked)),
            (60, 0.0, 0, Some(Taxi)),
            (120, 0.0, 3000, Some(Takeoff)),
            (150, 1500.0, 3000, Some(Climb)),
            (210, 4500.0, 1500, Some(Climb)),
            (270, 6000.0, 0, Some(Cruise)),
            (330, 6000.0, -3000, Some(Descent)),
            (390, 3000.0, 0, Some(DescentStep)),
            (420, 3000.0, -3000, Some(Descent)),
            (480, 0.0, 0, Some(Landing)),
            (500, 0.0, 0, Some(Landing)),
            (560, 0.0, 0, Some(Parked)),
        ])
    }

    #[test]
    fn test_liftoff_is_first_airborne_sample() {
        let samples = flight();
        let event = locate_liftoff(&samples).unwrap();
        assert_eq!(event.index, 3);
        assert_eq!(event.time, samples[3].timestamp);
        assert_eq!(event.uncertainty, Duration::seconds(30));
        assert_eq!(event.position, samples[3].position);
    }

    #[test]
    fn test_level_off_near_highest_altitude() {
        let samples = flight();
        let event = locate_level_off(&samples, &ClassifierConfig::default()).unwrap();
        assert_eq!(event.index, 5);
        assert_eq!(event.uncertainty, Duration::seconds(60));
    }

    #[test]
    fn test_level_off_ignores_intermediate_level_segments() {
        // Levels at 3000 ft first, then climbs on to 8000 ft
        let samples = labelled(&[
            (0, 0.0, 0, Some(Taxi)),
            (60, 1000.0, 2000, Some(Climb)),
            (120, 3000.0, 0, Some(Cruise)),
            (180, 3000.0, 5000, Some(Climb)),
            (240, 8000.0, 0, Some(Cruise)),
        ]);
        let event = locate_level_off(&samples, &ClassifierConfig::default()).unwrap();
        assert_eq!(event.index, 4);
    }

    #[test]
    fn test_level_off_on_zero_rate_without_label() {
        let samples = labelled(&[
            (0, 0.0, 0, Some(Taxi)),
            (60, 5000.0, 5000, Some(Climb)),
            (120, 10000.0, 0, None),
        ]);
        let event = locate_level_off(&samples, &ClassifierConfig::default()).unwrap();
        assert_eq!(event.index, 2);
    }

    #[test]
    fn test_top_of_descent() {
        let samples = flight();
        let event = locate_top_of_descent(&samples).unwrap();
        assert_eq!(event.index, 6);
    }

    #[test]
    fn test_touchdown_is_first_landing_sample() {
        let samples = flight();
        let event = locate_touchdown(&samples).unwrap();
        assert_eq!(event.index, 9);
        assert_eq!(event.uncertainty, Duration::seconds(60));
    }

    #[test]
    fn test_touchdown_from_taxi_after_unlabelled_sample() {
        let samples = labelled(&[
            (0, 0.0, 0, Some(Taxi)),
            (60, 2000.0, -2000, Some(Descent)),
            (120, 0.0, 0, None),
            (180, 0.0, 0, Some(Taxi)),
        ]);
        let event = locate_touchdown(&samples).unwrap();
        assert_eq!(event.index, 3);
    }

    #[test]
    fn test_taxi_right_after_descent_is_not_touchdown() {
        let samples = labelled(&[
            (0, 3000.0, -3000, Some(Descent)),
            (60, 0.0, 0, Some(Taxi)),
        ]);
        let err = locate_touchdown(&samples).unwrap_err();
        assert_eq!(err.kind, BoundaryKind::Touchdown);
    }

    #[test]
    fn test_missing_descent_is_reported() {
        let samples = labelled(&[
            (0, 0.0, 0, Some(Taxi)),
            (60, 3000.0, 3000, Some(Climb)),
            (120, 6000.0, 0, Some(Cruise)),
        ]);
        let err = locate_top_of_descent(&samples).unwrap_err();
        assert_eq!(
            err,
            BoundaryNotFoundError {
                kind: BoundaryKind::TopOfDescent,
                samples: 3
            }
        );
        assert_eq!(err.to_string(), "no top_of_descent found among 3 samples");
    }

    #[test]
    fn test_event_on_first_sample_has_zero_uncertainty() {
        let samples = labelled(&[(0, 500.0, 0, None), (60, 600.0, 0, None)]);
        let event = locate_liftoff(&samples).unwrap();
        assert_eq!(event.index, 0);
        assert_eq!(event.uncertainty, Duration::zero());
    }

    #[test]
    fn test_before_gap_uses_successor() {
        let samples = flight();
        let event = BoundaryEvent::before_gap(&samples, &samples[9]);
        assert_eq!(event.uncertainty, Duration::seconds(20));
        let last = BoundaryEvent::before_gap(&samples, &samples[11]);
        assert_eq!(last.uncertainty, Duration::zero());
    }

    #[test]
    fn test_locate_dispatches_by_kind() {
        let samples = flight();
        let config = ClassifierConfig::default();
        let indices: Vec<usize> = BoundaryKind::ALL
            .iter()
            .map(|&kind| locate(kind, &samples, &config).unwrap().index)
            .collect();
        assert_eq!(indices, vec![3, 5, 6, 9]);
    }
}
