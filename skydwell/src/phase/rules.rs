//! Ordered phase rule table.
//!
//! Each sample is matched against [`PHASE_RULES`] top to bottom; the first
//! rule whose condition holds decides the label. When no rule matches the
//! sample stays unlabelled (`None`).
//!
//! | # | Condition                                              | Label          |
//! |---|--------------------------------------------------------|----------------|
//! | 1 | on ground, speed == 0                                  | `parked`       |
//! | 2 | on ground, speed < taxi limit                          | `taxi`         |
//! | 3 | on ground, previous ∈ {taxi, takeoff}                  | `takeoff`      |
//! | 4 | on ground, previous ∈ {descent, descent_step, landing} | `landing`      |
//! | 5 | previous ∈ {descent, descent_step}, level rate         | `descent_step` |
//! | 6 | tendency cruise, level rate                            | `cruise`       |
//! | 7 | tendency climb, rate above level threshold             | `climb`        |
//! | 8 | tendency descent, rate below negated level threshold   | `descent`      |
//!
//! The first sample of a flight has no previous label, so rules 3 to 5 never
//! match it.

use super::{ClassifierConfig, FlightPhase, Tendency};

/// Inputs a rule may inspect for one sample.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Sample altitude (feet).
    pub altitude_ft: f64,
    /// Sample ground speed (knots).
    pub ground_speed_kt: f64,
    /// Sample vertical rate (ft/min).
    pub vertical_rate_fpm: i32,
    /// Label of the immediately preceding sample, `None` for the first sample
    /// or when the predecessor was unclassifiable.
    pub previous: Option<FlightPhase>,
    /// Sticky windowed tendency at this sample.
    pub tendency: Option<Tendency>,
    /// Thresholds.
    pub config: &'a ClassifierConfig,
}

impl RuleContext<'_> {
    fn on_ground(&self) -> bool {
        self.altitude_ft == 0.0
    }

    fn previous_in(&self, phases: &[FlightPhase]) -> bool {
        self.previous.is_some_and(|p| phases.contains(&p))
    }

    fn is_level(&self) -> bool {
        self.vertical_rate_fpm.abs() < self.config.level_rate_fpm
    }
}

/// One row of the rule table.
#[derive(Clone, Copy)]
pub struct PhaseRule {
    /// Short rule name for diagnostics.
    pub name: &'static str,
    /// Label assigned when the rule matches.
    pub label: FlightPhase,
    /// Rule condition.
    pub applies: fn(&RuleContext<'_>) -> bool,
}

impl std::fmt::Debug for PhaseRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseRule")
            .field("name", &self.name)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

fn parked(ctx: &RuleContext<'_>) -> bool {
    ctx.on_ground() && ctx.ground_speed_kt == 0.0
}

fn taxi(ctx: &RuleContext<'_>) -> bool {
    ctx.on_ground() && ctx.ground_speed_kt < ctx.config.taxi_speed_kt
}

fn takeoff_roll(ctx: &RuleContext<'_>) -> bool {
    ctx.on_ground() && ctx.previous_in(&[FlightPhase::Taxi, FlightPhase::Takeoff])
}

fn landing_roll(ctx: &RuleContext<'_>) -> bool {
    ctx.on_ground()
        && ctx.previous_in(&[
            FlightPhase::Descent,
            FlightPhase::DescentStep,
            FlightPhase::Landing,
        ])
}

fn descent_step(ctx: &RuleContext<'_>) -> bool {
    ctx.previous_in(&[FlightPhase::Descent, FlightPhase::DescentStep]) && ctx.is_level()
}

fn cruise(ctx: &RuleContext<'_>) -> bool {
    ctx.tendency == Some(Tendency::Cruise) && ctx.is_level()
}

fn climb(ctx: &RuleContext<'_>) -> bool {
    ctx.tendency == Some(Tendency::Climb) && ctx.vertical_rate_fpm > ctx.config.level_rate_fpm
}

fn descent(ctx: &RuleContext<'_>) -> bool {
    ctx.tendency == Some(Tendency::Descent) && ctx.vertical_rate_fpm < -ctx.config.level_rate_fpm
}

/// The classification rules, in evaluation order.
pub static PHASE_RULES: [PhaseRule; 8] = [
    PhaseRule {
        name: "parked",
        label: FlightPhase::Parked,
        applies: parked,
    },
    PhaseRule {
        name: "taxi",
        label: FlightPhase::Taxi,
        applies: taxi,
    },
    PhaseRule {
        name: "takeoff_roll",
        label: FlightPhase::Takeoff,
        applies: takeoff_roll,
    },
    PhaseRule {
        name: "landing_roll",
        label: FlightPhase::Landing,
        applies: landing_roll,
    },
    PhaseRule {
        name: "descent_step",
        label: FlightPhase::DescentStep,
        applies: descent_step,
    },
    PhaseRule {
        name: "cruise",
        label: FlightPhase::Cruise,
        applies: cruise,
    },
    PhaseRule {
        name: "climb",
        label: FlightPhase::Climb,
        applies: climb,
    },
    PhaseRule {
        name: "descent",
        label: FlightPhase::Descent,
        applies: descent,
    },
];

/// Find the first rule matching the context.
pub fn first_match(ctx: &RuleContext<'_>) -> Option<&'static PhaseRule> {
    PHASE_RULES.iter().find(|rule| (rule.applies)(ctx))
}

/// Label for a sample, `None` when no rule applies.
pub fn evaluate(ctx: &RuleContext<'_>) -> Option<FlightPhase> {
    first_match(ctx).map(|rule| rule.label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(config: &ClassifierConfig) -> RuleContext<'_> {
        RuleContext {
            altitude_ft: 0.0,
            ground_speed_kt: 0.0,
            vertical_rate_fpm: 0,
            previous: None,
            tendency: None,
            config,
        }
    }

    #[test]
    fn test_parked_wins_over_everything() {
        let config = ClassifierConfig::default();
        let c = RuleContext {
            previous: Some(FlightPhase::Descent),
            tendency: Some(Tendency::Cruise),
            ..ctx(&config)
        };
        assert_eq!(evaluate(&c), Some(FlightPhase::Parked));
    }

    #[test]
    fn test_taxi_below_speed_limit() {
        let config = ClassifierConfig::default();
        let c = RuleContext {
            ground_speed_kt: 29.9,
            ..ctx(&config)
        };
        assert_eq!(evaluate(&c), Some(FlightPhase::Taxi));

        let c = RuleContext {
            ground_speed_kt: 30.0,
            ..ctx(&config)
        };
        // Fast on the ground with no predecessor: nothing applies
        assert_eq!(evaluate(&c), None);
    }

    #[test]
    fn test_takeoff_roll_follows_taxi() {
        let config = ClassifierConfig::default();
        for previous in [FlightPhase::Taxi, FlightPhase::Takeoff] {
            let c = RuleContext {
                ground_speed_kt: 120.0,
                previous: Some(previous),
                ..ctx(&config)
            };
            assert_eq!(evaluate(&c), Some(FlightPhase::Takeoff));
        }
    }

    #[test]
    fn test_landing_roll_follows_descent() {
        let config = ClassifierConfig::default();
        for previous in [
            FlightPhase::Descent,
            FlightPhase::DescentStep,
            FlightPhase::Landing,
        ] {
            let c = RuleContext {
                ground_speed_kt: 110.0,
                previous: Some(previous),
                ..ctx(&config)
            };
            assert_eq!(evaluate(&c), Some(FlightPhase::Landing));
        }
    }

    #[test]
    fn test_descent_step_takes_precedence_over_cruise() {
        let config = ClassifierConfig::default();
        let c = RuleContext {
            altitude_ft: 6000.0,
            ground_speed_kt: 220.0,
            vertical_rate_fpm: -10,
            previous: Some(FlightPhase::Descent),
            tendency: Some(Tendency::Cruise),
            ..ctx(&config)
        };
        let rule = first_match(&c).unwrap();
        assert_eq!(rule.name, "descent_step");
        assert_eq!(rule.label, FlightPhase::DescentStep);
    }

    #[test]
    fn test_airborne_rules_follow_tendency() {
        let config = ClassifierConfig::default();
        let airborne = RuleContext {
            altitude_ft: 12000.0,
            ground_speed_kt: 300.0,
            ..ctx(&config)
        };

        let c = RuleContext {
            vertical_rate_fpm: 30,
            tendency: Some(Tendency::Cruise),
            ..airborne
        };
        assert_eq!(evaluate(&c), Some(FlightPhase::Cruise));

        let c = RuleContext {
            vertical_rate_fpm: 1800,
            tendency: Some(Tendency::Climb),
            ..airborne
        };
        assert_eq!(evaluate(&c), Some(FlightPhase::Climb));

        let c = RuleContext {
            vertical_rate_fpm: -1200,
            tendency: Some(Tendency::Descent),
            ..airborne
        };
        assert_eq!(evaluate(&c), Some(FlightPhase::Descent));
    }

    #[test]
    fn test_unclassifiable_sample() {
        let config = ClassifierConfig::default();
        // Climbing tendency but the sample itself is level
        let c = RuleContext {
            altitude_ft: 8000.0,
            ground_speed_kt: 250.0,
            vertical_rate_fpm: 0,
            previous: Some(FlightPhase::Climb),
            tendency: Some(Tendency::Climb),
            ..ctx(&config)
        };
        assert_eq!(evaluate(&c), None);

        // Exactly at the level threshold matches neither level nor climb
        let c = RuleContext {
            vertical_rate_fpm: 50,
            tendency: Some(Tendency::Climb),
            ..c
        };
        assert_eq!(evaluate(&c), None);
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<&str> = PHASE_RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "parked",
                "taxi",
                "takeoff_roll",
                "landing_roll",
                "descent_step",
                "cruise",
                "climb",
                "descent"
            ]
        );
    }
}
