//! Airspace dwell aggregation.
//!
//! A volume's membership subsequence is the samples inside it, in order,
//! each keeping its flight-wide index. Consecutive members whose indices
//! differ by one were inside for the whole interval between them. When
//! indices jump, the flight left and came back (or the position could not be
//! observed) somewhere in between:
//!
//! ```text
//! index:      4    5    6    7    8    9    10   11
//! inside:          ■    ■              ■    ■
//! dwell:           └────┘              └────┘
//! uncertainty: └───┘    └──────────────┘    └────┘
//!              entry         gap              exit
//! ```
//!
//! The gap span never counts as dwell; it is added to the uncertainty
//! together with the gaps before entry and after exit.

use chrono::Duration;
use serde::Serialize;
use thiserror::Error;

use super::{seconds, BoundaryEvent, Estimate};
use crate::airspace::AirspaceVolume;
use crate::telemetry::Sample;

/// A volume has no member samples.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("flight never entered airspace volume '{volume}'")]
pub struct EmptyMembershipError {
    /// Name of the volume.
    pub volume: String,
}

/// Time a flight spent inside one airspace volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeDwell {
    /// Volume name.
    pub volume: String,
    /// Sum of the intervals between index-adjacent member samples.
    #[serde(rename = "dwell_seconds", serialize_with = "seconds::serialize")]
    pub dwell: Duration,
    /// Entry gap + exit gap + every internal gap span.
    #[serde(rename = "uncertainty_seconds", serialize_with = "seconds::serialize")]
    pub uncertainty: Duration,
    /// First member sample; uncertain by the gap since its predecessor.
    pub entry: Option<BoundaryEvent>,
    /// Last member sample; uncertain by the gap until its successor.
    pub exit: Option<BoundaryEvent>,
    /// Number of member samples.
    pub samples: usize,
    /// Number of discontinuities inside the membership subsequence.
    pub gaps: usize,
}

impl VolumeDwell {
    /// Zero dwell for a volume the flight never entered.
    pub fn never_entered(volume: impl Into<String>) -> Self {
        Self {
            volume: volume.into(),
            dwell: Duration::zero(),
            uncertainty: Duration::zero(),
            entry: None,
            exit: None,
            samples: 0,
            gaps: 0,
        }
    }

    /// Whether at least one sample was inside.
    pub fn was_entered(&self) -> bool {
        self.samples > 0
    }

    /// Dwell time with its uncertainty.
    pub fn estimate(&self) -> Estimate {
        Estimate::new(self.dwell, self.uncertainty)
    }

    /// Entry and exit events, for callers that cannot proceed without them.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyMembershipError`] if the volume was never entered.
    pub fn require_entry_exit(
        &self,
    ) -> Result<(&BoundaryEvent, &BoundaryEvent), EmptyMembershipError> {
        match (&self.entry, &self.exit) {
            (Some(entry), Some(exit)) => Ok((entry, exit)),
            _ => Err(EmptyMembershipError {
                volume: self.volume.clone(),
            }),
        }
    }
}

/// Samples of the flight that lie inside the volume, in order.
pub fn membership_subsequence<'a>(samples: &'a [Sample], volume: &AirspaceVolume) -> Vec<&'a Sample> {
    samples
        .iter()
        .filter(|s| volume.contains(s.position, s.altitude_ft))
        .collect()
}

/// Aggregate dwell statistics from a membership subsequence.
///
/// `samples` is the whole flight; it supplies the neighbours of the entry and
/// exit samples. `members` must be ordered by index.
///
/// # Errors
///
/// Returns [`EmptyMembershipError`] if `members` is empty.
pub fn aggregate_dwell(
    volume: &str,
    samples: &[Sample],
    members: &[&Sample],
) -> Result<VolumeDwell, EmptyMembershipError> {
    let (first, last) = match (members.first(), members.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            return Err(EmptyMembershipError {
                volume: volume.to_string(),
            })
        }
    };

    let entry = BoundaryEvent::after_gap(samples, first);
    let exit = BoundaryEvent::before_gap(samples, last);

    let mut dwell = Duration::zero();
    let mut uncertainty = entry.uncertainty + exit.uncertainty;
    let mut gaps = 0;

    for pair in members.windows(2) {
        let span = pair[1].timestamp - pair[0].timestamp;
        if pair[1].index == pair[0].index + 1 {
            dwell += span;
        } else {
            uncertainty += span;
            gaps += 1;
        }
    }

    Ok(VolumeDwell {
        volume: volume.to_string(),
        dwell,
        uncertainty,
        entry: Some(entry),
        exit: Some(exit),
        samples: members.len(),
        gaps,
    })
}

/// Dwell of a flight in a volume; never-entered volumes yield zero dwell.
pub fn dwell_in(volume: &AirspaceVolume, samples: &[Sample]) -> VolumeDwell {
    let members = membership_subsequence(samples, volume);
    match aggregate_dwell(volume.name(), samples, &members) {
        Ok(dwell) => {
            tracing::debug!(
                volume = volume.name(),
                samples = dwell.samples,
                gaps = dwell.gaps,
                dwell_s = dwell.dwell.num_seconds(),
                "Volume dwell aggregated"
            );
            dwell
        }
        Err(e) => {
            tracing::warn!(volume = volume.name(), "{}", e);
            VolumeDwell::never_entered(volume.name())
        }
    }
}
