//! Thresholds for phase classification and boundary detection.
//!
//! # Example Configuration (INI)
//!
//! ```ini
//! [classifier]
//! taxi_speed_kt = 30
//! level_rate_fpm = 50
//! cruise_band_fpm = 20
//! trend_threshold_fpm = 100
//! tendency_window = 5
//! level_off_tolerance_ft = 250
//! ```

/// Default taxi speed limit (knots).
pub const DEFAULT_TAXI_SPEED_KT: f64 = 30.0;

/// Default per-sample vertical rate below which a sample is level (ft/min).
pub const DEFAULT_LEVEL_RATE_FPM: i32 = 50;

/// Default half-width of the cruise tendency band (ft/min).
pub const DEFAULT_CRUISE_BAND_FPM: i32 = 20;

/// Default mean rate beyond which the tendency is climb or descent (ft/min).
pub const DEFAULT_TREND_THRESHOLD_FPM: i32 = 100;

/// Default number of samples averaged for the tendency.
pub const DEFAULT_TENDENCY_WINDOW: usize = 5;

/// Largest tendency window accepted from configuration (samples).
pub const MAX_TENDENCY_WINDOW: usize = 1000;

/// Default distance from the flight's highest altitude within which a
/// climb-to-level transition counts as the top of climb (feet).
pub const DEFAULT_LEVEL_OFF_TOLERANCE_FT: f64 = 250.0;

/// Configuration for the phase classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Ground speed below which a sample on the ground is taxiing (knots).
    ///
    /// Ground samples at exactly zero speed are parked regardless.
    pub taxi_speed_kt: f64,

    /// Per-sample vertical rate threshold (ft/min).
    ///
    /// `|rate| < level_rate_fpm` is level; `rate > level_rate_fpm` climbs and
    /// `rate < -level_rate_fpm` descends.
    pub level_rate_fpm: i32,

    /// Tendency is cruise when the windowed mean lies strictly inside
    /// `(-cruise_band_fpm, cruise_band_fpm)`.
    pub cruise_band_fpm: i32,

    /// Tendency is climb above `trend_threshold_fpm` and descent below its
    /// negation. Means between the bands leave the tendency unchanged.
    pub trend_threshold_fpm: i32,

    /// Number of consecutive rates averaged for the tendency.
    pub tendency_window: usize,

    /// Level-off must happen within this many feet of the flight's highest
    /// recorded altitude.
    pub level_off_tolerance_ft: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            taxi_speed_kt: DEFAULT_TAXI_SPEED_KT,
            level_rate_fpm: DEFAULT_LEVEL_RATE_FPM,
            cruise_band_fpm: DEFAULT_CRUISE_BAND_FPM,
            trend_threshold_fpm: DEFAULT_TREND_THRESHOLD_FPM,
            tendency_window: DEFAULT_TENDENCY_WINDOW,
            level_off_tolerance_ft: DEFAULT_LEVEL_OFF_TOLERANCE_FT,
        }
    }
}

impl ClassifierConfig {
    /// Set the taxi speed limit.
    pub fn with_taxi_speed_kt(mut self, knots: f64) -> Self {
        self.taxi_speed_kt = knots;
        self
    }

    /// Set the tendency window length.
    pub fn with_tendency_window(mut self, samples: usize) -> Self {
        self.tendency_window = samples;
        self
    }

    /// Set the level-off altitude tolerance.
    pub fn with_level_off_tolerance_ft(mut self, feet: f64) -> Self {
        self.level_off_tolerance_ft = feet;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = ClassifierConfig::default();
        assert_eq!(config.taxi_speed_kt, 30.0);
        assert_eq!(config.level_rate_fpm, 50);
        assert_eq!(config.cruise_band_fpm, 20);
        assert_eq!(config.trend_threshold_fpm, 100);
        assert_eq!(config.tendency_window, 5);
        assert_eq!(config.level_off_tolerance_ft, 250.0);
    }

    #[test]
    fn test_builder_methods() {
        let config = ClassifierConfig::default()
            .with_taxi_speed_kt(25.0)
            .with_tendency_window(3)
            .with_level_off_tolerance_ft(500.0);

        assert_eq!(config.taxi_speed_kt, 25.0);
        assert_eq!(config.tendency_window, 3);
        assert_eq!(config.level_off_tolerance_ft, 500.0);
    }
}
