//! Telemetry sample types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Position;
use crate::phase::FlightPhase;

/// One recorded position report, as read from a track file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// Observation instant (UTC).
    pub timestamp: DateTime<Utc>,
    /// Reported position.
    pub position: Position,
    /// Reported altitude in feet (0 means on the ground).
    pub altitude_ft: f64,
    /// Ground speed in knots.
    pub ground_speed_kt: f64,
}

impl RawSample {
    /// Create a new raw sample.
    pub fn new(
        timestamp: DateTime<Utc>,
        position: Position,
        altitude_ft: f64,
        ground_speed_kt: f64,
    ) -> Self {
        Self {
            timestamp,
            position,
            altitude_ft,
            ground_speed_kt,
        }
    }

    /// Whether the transponder reports the aircraft on the ground.
    #[inline]
    pub fn is_on_ground(&self) -> bool {
        self.altitude_ft == 0.0
    }
}

/// A sample enriched with its sequence index, vertical rate and phase.
///
/// Produced by [`classify`](crate::phase::classify); never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Position in the flight's sample sequence (0-based, contiguous).
    pub index: usize,
    /// Observation instant (UTC).
    pub timestamp: DateTime<Utc>,
    /// Reported position.
    pub position: Position,
    /// Altitude in feet.
    pub altitude_ft: f64,
    /// Ground speed in knots.
    pub ground_speed_kt: f64,
    /// Derived vertical rate in feet per minute.
    pub vertical_rate_fpm: i32,
    /// Derived phase label; `None` when no classification rule matched.
    pub phase: Option<FlightPhase>,
}

impl Sample {
    /// The raw observation this sample was derived from.
    pub fn raw(&self) -> RawSample {
        RawSample {
            timestamp: self.timestamp,
            position: self.position,
            altitude_ft: self.altitude_ft,
            ground_speed_kt: self.ground_speed_kt,
        }
    }

    /// Whether the sample carries the given phase label.
    #[inline]
    pub fn is(&self, phase: FlightPhase) -> bool {
        self.phase == Some(phase)
    }

    /// Whether the transponder reports the aircraft on the ground.
    #[inline]
    pub fn is_on_ground(&self) -> bool {
        self.altitude_ft == 0.0
    }
}
