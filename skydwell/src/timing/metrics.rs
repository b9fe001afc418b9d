//! Flat metric map view of a timing summary.
//!
//! Keys are stable identifiers used for tabular export:
//!
//! | Key                               | Value     |
//! |-----------------------------------|-----------|
//! | `takeoff_time`                    | timestamp |
//! | `level_off_time`                  | timestamp |
//! | `descent_init_time`               | timestamp |
//! | `touchdown_time`                  | timestamp |
//! | `recorded_time`                   | duration  |
//! | `flight_time`                     | duration  |
//! | `ground_time`                     | duration (only with a known pre-takeoff ground time) |
//! | `before_takeoff_ground_duration`  | duration (same condition) |
//! | `after_landing_ground_duration`   | duration  |
//! | `climb_duration`                  | duration  |
//! | `cruise_duration`                 | duration  |
//! | `descent_duration`                | duration  |
//! | `<volume>_entry`, `<volume>_exit` | timestamp (only when entered) |
//! | `inside_<volume>`                 | duration  |
//! | `outside_volumes`                 | duration  |

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::{as_seconds, format_duration, BoundaryEvent, Estimate, FlightTimingSummary};
use crate::geo::Position;

/// Metric payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricValue {
    /// Elapsed time.
    Duration(Duration),
    /// Instant of an event.
    Timestamp(DateTime<Utc>),
}

impl MetricValue {
    /// Machine-readable form: seconds for durations, RFC 3339 for timestamps.
    pub fn to_field(&self) -> String {
        match self {
            MetricValue::Duration(d) => as_seconds(*d).to_string(),
            MetricValue::Timestamp(t) => t.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Duration(d) => f.write_str(&format_duration(*d)),
            MetricValue::Timestamp(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S UTC")),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetricValue::Duration(d) => serializer.serialize_f64(as_seconds(*d)),
            MetricValue::Timestamp(_) => serializer.serialize_str(&self.to_field()),
        }
    }
}

/// One named measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    /// Measured value.
    pub value: MetricValue,
    /// Worst-case error from discrete sampling.
    pub uncertainty: Duration,
    /// Where the event happened, for timestamp metrics.
    pub coordinates: Option<Position>,
}

impl Metric {
    fn event(event: &BoundaryEvent) -> Self {
        Self {
            value: MetricValue::Timestamp(event.time),
            uncertainty: event.uncertainty,
            coordinates: Some(event.position),
        }
    }

    fn duration(estimate: Estimate) -> Self {
        Self {
            value: MetricValue::Duration(estimate.value),
            uncertainty: estimate.uncertainty,
            coordinates: None,
        }
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Metric", 3)?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("uncertainty_seconds", &as_seconds(self.uncertainty))?;
        state.serialize_field("coordinates", &self.coordinates)?;
        state.end()
    }
}

impl FlightTimingSummary {
    /// All metrics keyed by name.
    pub fn metrics(&self) -> BTreeMap<String, Metric> {
        let mut map = BTreeMap::new();
        let mut put = |key: String, metric: Metric| {
            map.insert(key, metric);
        };

        put("takeoff_time".into(), Metric::event(&self.liftoff));
        put("level_off_time".into(), Metric::event(&self.level_off));
        put("descent_init_time".into(), Metric::event(&self.top_of_descent));
        put("touchdown_time".into(), Metric::event(&self.touchdown));

        put(
            "recorded_time".into(),
            Metric::duration(Estimate::new(self.recorded, Duration::zero())),
        );
        put("flight_time".into(), Metric::duration(self.flight_time()));
        if let Some(ground) = self.ground_time() {
            put("ground_time".into(), Metric::duration(ground));
        }
        if let Some(before) = self.before_takeoff_ground {
            put(
                "before_takeoff_ground_duration".into(),
                Metric::duration(before),
            );
        }
        put(
            "after_landing_ground_duration".into(),
            Metric::duration(self.after_landing_ground),
        );
        put("climb_duration".into(), Metric::duration(self.climb));
        put("cruise_duration".into(), Metric::duration(self.cruise));
        put("descent_duration".into(), Metric::duration(self.descent));

        for dwell in &self.volumes {
            if let Some(entry) = &dwell.entry {
                put(format!("{}_entry", dwell.volume), Metric::event(entry));
            }
            if let Some(exit) = &dwell.exit {
                put(format!("{}_exit", dwell.volume), Metric::event(exit));
            }
            put(
                format!("inside_{}", dwell.volume),
                Metric::duration(dwell.estimate()),
            );
        }
        put(
            "outside_volumes".into(),
            Metric::duration(self.outside_volumes),
        );

        map
    }
}
