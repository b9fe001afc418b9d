//! Phase boundaries, airspace dwell and per-flight timing summaries.
//!
//! Works on an already classified flight:
//!
//! ```text
//! ClassifiedFlight ──► boundary ──► liftoff / level-off / top of descent / touchdown
//!        │
//!        └──────────► dwell ─────► per-volume dwell, entry and exit
//!                                        │
//!                                 summary + metrics
//! ```
//!
//! Every derived time carries an uncertainty that comes from the sampling
//! gaps around the samples it was measured from.

mod boundary;
mod dwell;
mod metrics;
mod summary;

pub use boundary::{
    locate, locate_level_off, locate_liftoff, locate_top_of_descent, locate_touchdown,
    BoundaryEvent, BoundaryKind, BoundaryNotFoundError,
};
pub use dwell::{
    aggregate_dwell, dwell_in, membership_subsequence, EmptyMembershipError, VolumeDwell,
};
pub use metrics::{Metric, MetricValue};
pub use summary::{summarize, FlightTimingSummary};

use chrono::Duration;
use serde::Serialize;

/// A duration together with its timing uncertainty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Estimate {
    /// Measured duration.
    #[serde(rename = "seconds", serialize_with = "seconds::serialize")]
    pub value: Duration,
    /// Worst-case error from discrete sampling.
    #[serde(rename = "uncertainty_seconds", serialize_with = "seconds::serialize")]
    pub uncertainty: Duration,
}

impl Estimate {
    /// Create an estimate.
    pub fn new(value: Duration, uncertainty: Duration) -> Self {
        Self { value, uncertainty }
    }

    /// An exact zero.
    pub fn zero() -> Self {
        Self::new(Duration::zero(), Duration::zero())
    }
}

impl std::ops::Add for Estimate {
    type Output = Estimate;

    fn add(self, rhs: Self) -> Self::Output {
        Estimate::new(self.value + rhs.value, self.uncertainty + rhs.uncertainty)
    }
}

impl std::fmt::Display for Estimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ± {}",
            format_duration(self.value),
            format_duration(self.uncertainty)
        )
    }
}

/// Render a duration as `[-]H:MM:SS`.
pub fn format_duration(duration: Duration) -> String {
    let sign = if duration < Duration::zero() { "-" } else { "" };
    let total = duration.num_seconds().unsigned_abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        total / 3600,
        (total / 60) % 60,
        total % 60
    )
}

/// Duration as fractional seconds.
pub fn as_seconds(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 1000.0
}

/// Serde helpers writing `chrono::Duration` as fractional seconds.
pub(crate) mod seconds {
    use chrono::Duration;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(super::as_seconds(*duration))
    }
}
