//! Flight phase classification.
//!
//! Labels every sample of a recorded flight with a [`FlightPhase`].
//!
//! # Pipeline
//!
//! ```text
//! RawSample[] ──► rate ──► tendency ──► rules ──► Sample[] (ClassifiedFlight)
//!                 (ft/min)  (5-sample    (ordered,
//!                            mean)        first match)
//! ```
//!
//! Classification is a pure function of the raw sample sequence: running it
//! twice on the same input yields identical labels.

mod classifier;
mod config;
pub mod rate;
pub mod rules;
pub mod tendency;

pub use classifier::{classify, ClassifiedFlight};
pub use config::{ClassifierConfig, MAX_TENDENCY_WINDOW};
pub use rate::{derive_vertical_rates, DegenerateIntervalError};
pub use rules::{PhaseRule, RuleContext, PHASE_RULES};
pub use tendency::{compute_tendencies, Tendency};

use serde::{Deserialize, Serialize};

/// Flight phase label for a single sample.
///
/// Labels follow a loose temporal order
/// (parked/taxi → takeoff → climb → cruise → descent/descent step → landing)
/// but nothing enforces monotonicity; noise may cause a label to revert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightPhase {
    /// On the ground, not moving.
    Parked,
    /// On the ground, moving slower than the taxi speed limit.
    Taxi,
    /// On the ground, fast, after taxi (takeoff roll).
    Takeoff,
    /// Airborne and climbing.
    Climb,
    /// Airborne and level.
    Cruise,
    /// Airborne and descending.
    Descent,
    /// Level segment interrupting a descent.
    DescentStep,
    /// On the ground, fast, after descent (landing roll).
    Landing,
}

impl FlightPhase {
    /// All labels in their nominal temporal order.
    pub const ALL: [FlightPhase; 8] = [
        FlightPhase::Parked,
        FlightPhase::Taxi,
        FlightPhase::Takeoff,
        FlightPhase::Climb,
        FlightPhase::Cruise,
        FlightPhase::Descent,
        FlightPhase::DescentStep,
        FlightPhase::Landing,
    ];

    /// Get a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            FlightPhase::Parked => "parked at the gate",
            FlightPhase::Taxi => "taxiing",
            FlightPhase::Takeoff => "takeoff roll",
            FlightPhase::Climb => "climbing",
            FlightPhase::Cruise => "level flight",
            FlightPhase::Descent => "descending",
            FlightPhase::DescentStep => "level step during descent",
            FlightPhase::Landing => "landing roll",
        }
    }

    /// Whether this label describes ground movement.
    pub fn is_ground(&self) -> bool {
        matches!(
            self,
            FlightPhase::Parked | FlightPhase::Taxi | FlightPhase::Takeoff | FlightPhase::Landing
        )
    }

    /// Stable lowercase name, as used in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightPhase::Parked => "parked",
            FlightPhase::Taxi => "taxi",
            FlightPhase::Takeoff => "takeoff",
            FlightPhase::Climb => "climb",
            FlightPhase::Cruise => "cruise",
            FlightPhase::Descent => "descent",
            FlightPhase::DescentStep => "descent_step",
            FlightPhase::Landing => "landing",
        }
    }
}

impl std::fmt::Display for FlightPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
