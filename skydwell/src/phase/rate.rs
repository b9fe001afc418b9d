//! Vertical-rate estimation.
//!
//! The rate for sample `k` is the altitude change to sample `k + 1` divided by
//! the elapsed minutes, rounded to the nearest ft/min (ties to even). The last
//! sample has no successor and reuses its predecessor's rate.

use thiserror::Error;

use crate::telemetry::RawSample;

const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// The sample sequence cannot yield a vertical rate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DegenerateIntervalError {
    /// Fewer than two samples.
    #[error("need at least 2 samples to derive vertical rates, got {0}")]
    TooFewSamples(usize),

    /// Consecutive samples share a timestamp or go back in time.
    #[error("samples {index} and {next} are {delta_ms} ms apart; time must strictly increase")]
    NonPositiveInterval {
        index: usize,
        next: usize,
        delta_ms: i64,
    },
}

/// Derive the vertical rate (ft/min) of every sample.
///
/// # Errors
///
/// Returns [`DegenerateIntervalError`] when fewer than two samples are given
/// or when any consecutive pair has a zero or negative time delta.
pub fn derive_vertical_rates(samples: &[RawSample]) -> Result<Vec<i32>, DegenerateIntervalError> {
    if samples.len() < 2 {
        return Err(DegenerateIntervalError::TooFewSamples(samples.len()));
    }

    let mut rates = Vec::with_capacity(samples.len());
    for (index, pair) in samples.windows(2).enumerate() {
        let delta_ms = (pair[1].timestamp - pair[0].timestamp).num_milliseconds();
        if delta_ms <= 0 {
            return Err(DegenerateIntervalError::NonPositiveInterval {
                index,
                next: index + 1,
                delta_ms,
            });
        }

        let minutes = delta_ms as f64 / MILLIS_PER_MINUTE;
        let climb_ft = pair[1].altitude_ft - pair[0].altitude_ft;
        rates.push((climb_ft / minutes).round_ties_even() as i32);
    }

    // Last sample repeats the final interval's rate
    let last = rates[rates.len() - 1];
    rates.push(last);

    Ok(rates)
}
