//! Built-in airspace definitions around Campinas (SBKP).
//!
//! Vertices are listed as (latitude, longitude) pairs in decimal degrees.
//!
//! ```text
//! 24500 ft ┬──────────────── tma_sao_paulo1
//!  5500 ft ┼──────────────── tma_sao_paulo2
//!  3700 ft ┤ ctr_campinas
//!  3600 ft ┤
//!     0 ft ┴
//! ```
//!
//! The published limits of CTR Campinas (0 - 3700 ft) and TMA São Paulo 2
//! (3600 - 5500 ft) overlap by 100 ft over the aerodrome. Samples in that
//! slice count towards both volumes, which slightly inflates the summed
//! dwell used for the outside-volume figure.

use crate::config::ConfigurationError;
use crate::geo::Position;

use super::AirspaceVolume;

/// Name of the Campinas control zone.
pub const CTR_CAMPINAS: &str = "ctr_campinas";

/// Name of the lower São Paulo terminal area.
pub const TMA_SAO_PAULO_2: &str = "tma_sao_paulo2";

/// Name of the upper São Paulo terminal area.
pub const TMA_SAO_PAULO_1: &str = "tma_sao_paulo1";

const CTR_CAMPINAS_VERTICES: &[(f64, f64)] = &[
    (-23.15639, -47.05833),
    (-23.03056, -46.95333),
    (-22.8275, -47.23694),
    (-22.98472, -47.36833),
    (-23.14306, -47.14778),
    (-23.15639, -47.05833),
];

const TMA_SAO_PAULO_2_VERTICES: &[(f64, f64)] = &[
    (-22.7633333330, -47.17722222200),
    (-22.8399787568, -47.07132252390),
    (-22.9165529453, -46.96530416120),
    (-22.9930555560, -46.85916666700),
    (-22.9850000000, -46.74861111100),
    (-23.0689190695, -46.65172677510),
    (-23.1527777780, -46.55472222200),
    (-23.2048157536, -46.38339956780),
    (-23.2566666670, -46.21194444400),
    (-23.3822222220, -46.13666666700),
    (-23.5299774042, -46.23866024820),
    (-23.6776628004, -46.34088179830),
    (-23.8252777780, -46.44333333300),
    (-23.8387861596, -46.54887798310),
    (-23.8522222220, -46.65444444400),
    (-23.7572562394, -46.79390572640),
    (-23.6621633984, -46.93316467380),
    (-23.5669444440, -47.07222222200),
    (-23.4036136619, -47.08849215850),
    (-23.2402777780, -47.10472222200),
    (-23.1347915266, -47.25192067260),
    (-23.0291666670, -47.39888888900),
    (-23.0069348209, -47.40531214760),
    (-22.9807166225, -47.40377565800),
    (-22.9547905659, -47.39928886810),
    (-22.9294404543, -47.39190255780),
    (-22.9049436329, -47.38169912370),
    (-22.8815679684, -47.36879161300),
    (-22.8595689372, -47.35332243130),
    (-22.8391868539, -47.33546173970),
    (-22.8206442696, -47.31540556250),
    (-22.8041435665, -47.29337362520),
    (-22.7898647741, -47.26960694870),
    (-22.7779636293, -47.24436522530),
    (-22.7685699005, -47.21792400390),
    (-22.7633333330, -47.17722222200),
];

const TMA_SAO_PAULO_1_VERTICES: &[(f64, f64)] = &[
    (-23.88307500, -45.38082500),
    (-23.25037780, -45.55586670),
    (-23.04041944, -45.61360000),
    (-23.05229444, -45.66710830),
    (-22.97498890, -45.92609170),
    (-22.55789720, -46.12291390),
    (-22.46140560, -46.98529170),
    (-22.69492780, -47.56018890),
    (-22.93983330, -47.68771110),
    (-23.25763330, -47.80167500),
    (-23.62205280, -47.73306390),
    (-24.40681670, -46.69168610),
    (-24.30751940, -46.16711110),
    (-24.07566111, -46.07171944),
    (-23.88307500, -45.38082500),
];

fn vertices(points: &[(f64, f64)]) -> Vec<Position> {
    points
        .iter()
        .map(|&(lat, lon)| Position::new(lat, lon))
        .collect()
}

/// Campinas control zone, surface to 3700 ft.
pub fn ctr_campinas() -> Result<AirspaceVolume, ConfigurationError> {
    AirspaceVolume::new(CTR_CAMPINAS, 0.0, 3700.0, vertices(CTR_CAMPINAS_VERTICES))
}

/// São Paulo terminal area sector 2, 3600 to 5500 ft.
pub fn tma_sao_paulo2() -> Result<AirspaceVolume, ConfigurationError> {
    AirspaceVolume::new(
        TMA_SAO_PAULO_2,
        3600.0,
        5500.0,
        vertices(TMA_SAO_PAULO_2_VERTICES),
    )
}

/// São Paulo terminal area sector 1, 5500 to 24500 ft.
pub fn tma_sao_paulo1() -> Result<AirspaceVolume, ConfigurationError> {
    AirspaceVolume::new(
        TMA_SAO_PAULO_1,
        5500.0,
        24500.0,
        vertices(TMA_SAO_PAULO_1_VERTICES),
    )
}

/// All built-in volumes, lowest first.
pub fn campinas_volumes() -> Result<Vec<AirspaceVolume>, ConfigurationError> {
    Ok(vec![ctr_campinas()?, tma_sao_paulo2()?, tma_sao_paulo1()?])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// SBKP aerodrome reference point.
    const SBKP: Position = Position::new(-23.00694, -47.13444);

    #[test]
    fn test_presets_are_valid() {
        let volumes = campinas_volumes().unwrap();
        let names: Vec<&str> = volumes.iter().map(|v| v.name()).collect();
        assert_eq!(names, vec![CTR_CAMPINAS, TMA_SAO_PAULO_2, TMA_SAO_PAULO_1]);
    }

    #[test]
    fn test_aerodrome_is_inside_ctr() {
        let ctr = ctr_campinas().unwrap();
        assert!(ctr.contains(SBKP, 1500.0));
        assert!(!ctr.contains(SBKP, 0.0));
        assert!(!ctr.contains(SBKP, 4000.0));
    }

    #[test]
    fn test_aerodrome_is_inside_upper_tma() {
        let tma1 = tma_sao_paulo1().unwrap();
        assert!(tma1.contains(SBKP, 10000.0));
        assert!(!tma1.contains(SBKP, 5500.0));
        assert!(tma1.contains(SBKP, 24500.0));
    }

    #[test]
    fn test_shared_limit_belongs_to_lower_volume() {
        let tma2 = tma_sao_paulo2().unwrap();
        let tma1 = tma_sao_paulo1().unwrap();
        assert!(tma2.contains(SBKP, 5500.0));
        assert!(!tma1.contains(SBKP, 5500.0));
    }

    #[test]
    fn test_far_away_position_is_outside_everything() {
        let rio = Position::new(-22.8089, -43.2436);
        for volume in campinas_volumes().unwrap() {
            for altitude in [1000.0, 4000.0, 10000.0] {
                assert!(
                    !volume.contains(rio, altitude),
                    "{} should not contain Rio at {} ft",
                    volume.name(),
                    altitude
                );
            }
        }
    }
}
