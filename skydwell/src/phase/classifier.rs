//! Single forward pass assigning a phase label to every sample.

use std::collections::BTreeMap;

use chrono::Duration;
use serde::Serialize;

use super::rate::{derive_vertical_rates, DegenerateIntervalError};
use super::rules::{evaluate, RuleContext};
use super::tendency::compute_tendencies;
use super::{ClassifierConfig, FlightPhase};
use crate::telemetry::{RawSample, Sample};

/// A flight whose samples carry vertical rates and phase labels.
///
/// Holds at least two samples with strictly increasing timestamps; sample
/// `index` values equal their position in [`samples`](Self::samples).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedFlight {
    samples: Vec<Sample>,
}

impl ClassifiedFlight {
    /// All samples, in sequence order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; a classified flight holds at least two samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Phase labels in sequence order.
    pub fn phases(&self) -> Vec<Option<FlightPhase>> {
        self.samples.iter().map(|s| s.phase).collect()
    }

    /// First sample.
    pub fn first(&self) -> &Sample {
        &self.samples[0]
    }

    /// Last sample.
    pub fn last(&self) -> &Sample {
        &self.samples[self.samples.len() - 1]
    }

    /// Time between the first and last sample.
    pub fn recorded_duration(&self) -> Duration {
        self.last().timestamp - self.first().timestamp
    }

    /// Highest recorded altitude (feet).
    pub fn max_altitude_ft(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.altitude_ft)
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Sample count per label; unclassified samples are counted under `None`.
    pub fn phase_counts(&self) -> BTreeMap<Option<FlightPhase>, usize> {
        let mut counts = BTreeMap::new();
        for sample in &self.samples {
            *counts.entry(sample.phase).or_insert(0) += 1;
        }
        counts
    }

    /// Number of samples no rule could classify.
    pub fn unclassified_count(&self) -> usize {
        self.samples.iter().filter(|s| s.phase.is_none()).count()
    }

    /// Raw observations the flight was classified from.
    pub fn raw_samples(&self) -> Vec<RawSample> {
        self.samples.iter().map(Sample::raw).collect()
    }
}

/// Derive vertical rates and phase labels for a flight.
///
/// Pure transformation: the input is not modified and the same input always
/// yields the same labels.
///
/// # Errors
///
/// Returns [`DegenerateIntervalError`] if fewer than two samples are given or
/// timestamps do not strictly increase. No labels are produced in that case.
pub fn classify(
    raw: &[RawSample],
    config: &ClassifierConfig,
) -> Result<ClassifiedFlight, DegenerateIntervalError> {
    let rates = derive_vertical_rates(raw)?;
    let tendencies = compute_tendencies(&rates, config);

    let mut samples: Vec<Sample> = Vec::with_capacity(raw.len());
    for (index, observation) in raw.iter().enumerate() {
        let previous = index
            .checked_sub(1)
            .and_then(|prev| samples.get(prev))
            .and_then(|s| s.phase);

        let ctx = RuleContext {
            altitude_ft: observation.altitude_ft,
            ground_speed_kt: observation.ground_speed_kt,
            vertical_rate_fpm: rates[index],
            previous,
            tendency: tendencies[index],
            config,
        };

        samples.push(Sample {
            index,
            timestamp: observation.timestamp,
            position: observation.position,
            altitude_ft: observation.altitude_ft,
            ground_speed_kt: observation.ground_speed_kt,
            vertical_rate_fpm: rates[index],
            phase: evaluate(&ctx),
        });
    }

    let flight = ClassifiedFlight { samples };
    tracing::debug!(
        samples = flight.len(),
        unclassified = flight.unclassified_count(),
        max_altitude_ft = flight.max_altitude_ft(),
        "Flight classified"
    );

    Ok(flight)
}
