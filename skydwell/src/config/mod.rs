//! Configuration file handling.
//!
//! Settings live in an INI file at `~/.config/skydwell/config.ini` (or the
//! platform equivalent). A missing file is not an error: every value has a
//! default, and the built-in Campinas airspace volumes are used when the file
//! defines none.
//!
//! # Example
//!
//! ```ini
//! [classifier]
//! taxi_speed_kt = 30
//! tendency_window = 5
//!
//! [airspace.ctr_campinas]
//! lower_ft = 0
//! upper_ft = 3700
//! ; latitude longitude pairs separated by commas
//! vertices = -23.15639 -47.05833, -23.03056 -46.95333, -22.8275 -47.23694, -22.98472 -47.36833
//! ```

mod error;

pub use error::ConfigurationError;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;

use crate::airspace::{presets, validate_unique_names, AirspaceVolume};
use crate::geo::Position;
use crate::phase::{ClassifierConfig, MAX_TENDENCY_WINDOW};

/// Section holding classifier thresholds.
pub const CLASSIFIER_SECTION: &str = "classifier";

/// Prefix of airspace sections (`[airspace.NAME]`).
pub const AIRSPACE_SECTION_PREFIX: &str = "airspace.";

/// Directory holding the configuration file.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("skydwell")
}

/// Default configuration file location.
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.ini")
}

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Phase classifier thresholds.
    pub classifier: ClassifierConfig,
    /// Airspace volumes, in file order.
    pub airspaces: Vec<AirspaceVolume>,
}

impl Default for ConfigFile {
    /// Default thresholds with the built-in airspace presets.
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            airspaces: presets::campinas_volumes().unwrap_or_default(),
        }
    }
}

impl ConfigFile {
    /// Load from the default location, falling back to defaults if absent.
    pub fn load() -> Result<Self, ConfigurationError> {
        Self::load_from(&config_file_path())
    }

    /// Load from a specific path, falling back to defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigurationError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigurationError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config = Self::from_ini(&ini)?;
        tracing::debug!(
            path = %path.display(),
            airspaces = config.airspaces.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Parse configuration from INI text.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigurationError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigurationError::Unreadable {
            path: PathBuf::from("<inline>"),
            reason: e.to_string(),
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigurationError> {
        let classifier = parse_classifier(ini)?;

        let mut airspaces = Vec::new();
        for (section, props) in ini.iter() {
            let Some(name) = section.and_then(|s| s.strip_prefix(AIRSPACE_SECTION_PREFIX)) else {
                continue;
            };
            let section = format!("{}{}", AIRSPACE_SECTION_PREFIX, name);
            let lower_ft: f64 = required(&section, "lower_ft", props.get("lower_ft"))?;
            let upper_ft: f64 = required(&section, "upper_ft", props.get("upper_ft"))?;
            let vertices = match props.get("vertices") {
                Some(raw) => parse_vertices(&section, raw)?,
                None => {
                    return Err(ConfigurationError::MissingKey {
                        section,
                        key: "vertices".to_string(),
                    })
                }
            };
            airspaces.push(AirspaceVolume::new(name, lower_ft, upper_ft, vertices)?);
        }

        if airspaces.is_empty() {
            airspaces = presets::campinas_volumes()?;
        }
        validate_unique_names(&airspaces)?;

        Ok(Self {
            classifier,
            airspaces,
        })
    }
}

fn parse_classifier(ini: &Ini) -> Result<ClassifierConfig, ConfigurationError> {
    let mut config = ClassifierConfig::default();
    let Some(props) = ini.section(Some(CLASSIFIER_SECTION)) else {
        return Ok(config);
    };

    let s = CLASSIFIER_SECTION;
    if let Some(v) = optional(s, "taxi_speed_kt", props.get("taxi_speed_kt"))? {
        config.taxi_speed_kt = v;
    }
    if let Some(v) = optional(s, "level_rate_fpm", props.get("level_rate_fpm"))? {
        config.level_rate_fpm = v;
    }
    if let Some(v) = optional(s, "cruise_band_fpm", props.get("cruise_band_fpm"))? {
        config.cruise_band_fpm = v;
    }
    if let Some(v) = optional(s, "trend_threshold_fpm", props.get("trend_threshold_fpm"))? {
        config.trend_threshold_fpm = v;
    }
    if let Some(v) = optional(s, "tendency_window", props.get("tendency_window"))? {
        config.tendency_window = v;
    }
    if let Some(v) = optional(s, "level_off_tolerance_ft", props.get("level_off_tolerance_ft"))? {
        config.level_off_tolerance_ft = v;
    }

    if config.tendency_window == 0 || config.tendency_window > MAX_TENDENCY_WINDOW {
        return Err(ConfigurationError::invalid_value(
            s,
            "tendency_window",
            format!("must be between 1 and {}", MAX_TENDENCY_WINDOW),
        ));
    }
    if !config.taxi_speed_kt.is_finite() || config.taxi_speed_kt < 0.0 {
        return Err(ConfigurationError::invalid_value(
            s,
            "taxi_speed_kt",
            "must be a non-negative number",
        ));
    }
    if config.cruise_band_fpm < 0 || config.level_rate_fpm < 0 || config.trend_threshold_fpm < 0 {
        return Err(ConfigurationError::invalid_value(
            s,
            "rate thresholds",
            "must not be negative",
        ));
    }

    Ok(config)
}

fn optional<T: FromStr>(
    section: &str,
    key: &str,
    raw: Option<&str>,
) -> Result<Option<T>, ConfigurationError> {
    raw.map(|value| {
        value.trim().parse::<T>().map_err(|_| {
            ConfigurationError::invalid_value(section, key, format!("cannot parse '{}'", value))
        })
    })
    .transpose()
}

fn required<T: FromStr>(section: &str, key: &str, raw: Option<&str>) -> Result<T, ConfigurationError> {
    optional(section, key, raw)?.ok_or_else(|| ConfigurationError::MissingKey {
        section: section.to_string(),
        key: key.to_string(),
    })
}

/// Parse `"lat lon, lat lon, ..."`.
fn parse_vertices(section: &str, raw: &str) -> Result<Vec<Position>, ConfigurationError> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let mut parts = pair.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(lat), Some(lon), None) => {
                    let lat = lat.parse::<f64>();
                    let lon = lon.parse::<f64>();
                    match (lat, lon) {
                        (Ok(lat), Ok(lon)) => Ok(Position::new(lat, lon)),
                        _ => Err(ConfigurationError::invalid_value(
                            section,
                            "vertices",
                            format!("'{}' is not a 'lat lon' pair of numbers", pair),
                        )),
                    }
                }
                _ => Err(ConfigurationError::invalid_value(
                    section,
                    "vertices",
                    format!("'{}' is not a 'lat lon' pair", pair),
                )),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const TRIANGLE: &str = "-23.0 -47.0, -23.0 -46.0, -22.0 -46.5";

    #[test]
    fn test_default_uses_presets() {
        let config = ConfigFile::default();
        assert_eq!(config.classifier, ClassifierConfig::default());
        let names: Vec<&str> = config.airspaces.iter().map(|v| v.name()).collect();
        assert_eq!(
            names,
            vec![
                presets::CTR_CAMPINAS,
                presets::TMA_SAO_PAULO_2,
                presets::TMA_SAO_PAULO_1
            ]
        );
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(ConfigFile::from_ini_str("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_classifier_overrides() {
        let config = ConfigFile::from_ini_str(
            "[classifier]\ntaxi_speed_kt = 25\ntendency_window = 3\nlevel_off_tolerance_ft = 400\n",
        )
        .unwrap();
        assert_eq!(config.classifier.taxi_speed_kt, 25.0);
        assert_eq!(config.classifier.tendency_window, 3);
        assert_eq!(config.classifier.level_off_tolerance_ft, 400.0);
        // Untouched values keep their defaults
        assert_eq!(config.classifier.level_rate_fpm, 50);
    }

    #[test]
    fn test_custom_airspace_replaces_presets() {
        let text = format!(
            "[airspace.test_box]\nlower_ft = 1000\nupper_ft = 5000\nvertices = {}\n",
            TRIANGLE
        );
        let config = ConfigFile::from_ini_str(&text).unwrap();
        assert_eq!(config.airspaces.len(), 1);

        let volume = &config.airspaces[0];
        assert_eq!(volume.name(), "test_box");
        assert_eq!(volume.band().lower_ft, 1000.0);
        assert_eq!(volume.band().upper_ft, 5000.0);
        assert!(volume.contains(Position::new(-22.8, -46.5), 3000.0));
    }

    #[test]
    fn test_unparsable_value() {
        let err = ConfigFile::from_ini_str("[classifier]\ntaxi_speed_kt = fast\n").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::invalid_value("classifier", "taxi_speed_kt", "cannot parse 'fast'")
        );
    }

    #[test]
    fn test_zero_window_rejected() {
        let err = ConfigFile::from_ini_str("[classifier]\ntendency_window = 0\n").unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidValue { ref key, .. } if key == "tendency_window"));
    }

    #[test]
    fn test_oversized_window_rejected() {
        let err = ConfigFile::from_ini_str("[classifier]\ntendency_window = 18446744073709551615\n")
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::invalid_value("classifier", "tendency_window", "must be between 1 and 1000")
        );

        let config =
            ConfigFile::from_ini_str(&format!("[classifier]\ntendency_window = {}\n", MAX_TENDENCY_WINDOW))
                .unwrap();
        assert_eq!(config.classifier.tendency_window, MAX_TENDENCY_WINDOW);
    }

    #[test]
    fn test_missing_airspace_key() {
        let text = format!("[airspace.box]\nlower_ft = 0\nvertices = {}\n", TRIANGLE);
        let err = ConfigFile::from_ini_str(&text).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingKey {
                section: "airspace.box".to_string(),
                key: "upper_ft".to_string()
            }
        );
    }

    #[test]
    fn test_degenerate_airspace_polygon() {
        let text = "[airspace.line]\nlower_ft = 0\nupper_ft = 1000\nvertices = -23.0 -47.0, -22.0 -46.0\n";
        let err = ConfigFile::from_ini_str(text).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidPolygon { ref volume, .. } if volume == "line"));
    }

    #[test]
    fn test_inverted_band() {
        let text = format!(
            "[airspace.upside_down]\nlower_ft = 5000\nupper_ft = 1000\nvertices = {}\n",
            TRIANGLE
        );
        let err = ConfigFile::from_ini_str(&text).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvertedBand { .. }));
    }

    #[test]
    fn test_malformed_vertex() {
        let text = "[airspace.box]\nlower_ft = 0\nupper_ft = 1000\nvertices = -23.0 -47.0, north east, -22.0 -46.5\n";
        let err = ConfigFile::from_ini_str(text).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidValue { ref key, .. } if key == "vertices"));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&dir.path().join("absent.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(
            &path,
            format!(
                "[classifier]\nlevel_rate_fpm = 80\n\n[airspace.a]\nlower_ft = 0\nupper_ft = 3600\nvertices = {t}\n\n[airspace.b]\nlower_ft = 3600\nupper_ft = 5500\nvertices = {t}\n",
                t = TRIANGLE
            ),
        )
        .unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.classifier.level_rate_fpm, 80);
        let names: Vec<&str> = config.airspaces.iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_config_file_path_location() {
        let path = config_file_path();
        assert!(path.ends_with("skydwell/config.ini"));
    }
}
