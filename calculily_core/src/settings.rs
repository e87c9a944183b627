//! # Settings
//!
//! Display options and the defaults a calculator falls back to when an
//! optional field is left blank. Settings files are TOML; every key is
//! optional.
//!
//! ```toml
//! decimal_places = 2
//! currency_symbol = "$"
//! voltage_drop_percent = 3.0
//! concrete_waste_percent = 10.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Global settings shared by every calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Decimal places for general numeric output
    pub decimal_places: u8,

    /// Prefix for money amounts
    pub currency_symbol: String,

    /// Allowed voltage drop for wire sizing when none is given (percent)
    pub voltage_drop_percent: f64,

    /// Extra concrete ordered to cover spillage and over-excavation (percent)
    pub concrete_waste_percent: f64,

    /// Design air velocity for duct sizing when none is given (ft/min)
    pub duct_velocity_fpm: f64,

    /// Indicated speed used for speedometer comparison when none is given
    pub speedometer_test_speed: f64,

    /// Tolerated tire diameter change before flagging it (percent)
    pub tire_tolerance_percent: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            decimal_places: 2,
            currency_symbol: "$".to_string(),
            voltage_drop_percent: 3.0,
            concrete_waste_percent: 10.0,
            duct_velocity_fpm: 700.0,
            speedometer_test_speed: 60.0,
            tire_tolerance_percent: 3.0,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let settings: Settings = toml::from_str(text).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read settings", path.display().to_string(), e.to_string()))?;
        let settings = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Serialize to TOML (used to print the effective configuration).
    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.decimal_places > 10 {
            return Err(CalcError::invalid_input(
                "decimal_places",
                self.decimal_places.to_string(),
                "At most 10 decimal places",
            ));
        }
        if !(self.voltage_drop_percent > 0.0 && self.voltage_drop_percent <= 10.0) {
            return Err(CalcError::invalid_input(
                "voltage_drop_percent",
                self.voltage_drop_percent.to_string(),
                "Voltage drop must be between 0 and 10 percent",
            ));
        }
        if !(0.0..=50.0).contains(&self.concrete_waste_percent) {
            return Err(CalcError::invalid_input(
                "concrete_waste_percent",
                self.concrete_waste_percent.to_string(),
                "Waste must be between 0 and 50 percent",
            ));
        }
        if !(100.0..=3_000.0).contains(&self.duct_velocity_fpm) {
            return Err(CalcError::invalid_input(
                "duct_velocity_fpm",
                self.duct_velocity_fpm.to_string(),
                "Velocity must be between 100 and 3000 FPM",
            ));
        }
        if !(self.speedometer_test_speed > 0.0 && self.speedometer_test_speed <= 200.0) {
            return Err(CalcError::invalid_input(
                "speedometer_test_speed",
                self.speedometer_test_speed.to_string(),
                "Speed must be between 0 and 200",
            ));
        }
        if !(self.tire_tolerance_percent > 0.0 && self.tire_tolerance_percent <= 20.0) {
            return Err(CalcError::invalid_input(
                "tire_tolerance_percent",
                self.tire_tolerance_percent.to_string(),
                "Tolerance must be between 0 and 20 percent",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.decimal_places, 2);
        assert_eq!(s.currency_symbol, "$");
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let s = Settings::from_toml_str("currency_symbol = \"€\"\nvoltage_drop_percent = 5.0\n").unwrap();
        assert_eq!(s.currency_symbol, "€");
        assert_eq!(s.voltage_drop_percent, 5.0);
        assert_eq!(s.decimal_places, 2);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Settings::from_toml_str("decimal_places = \"two\"").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_out_of_range() {
        let err = Settings::from_toml_str("voltage_drop_percent = 25.0").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_ranges_match_calculators() {
        for text in [
            "duct_velocity_fpm = 50.0",
            "duct_velocity_fpm = 3500.0",
            "speedometer_test_speed = 250.0",
            "tire_tolerance_percent = 0.0",
            "tire_tolerance_percent = 25.0",
        ] {
            let err = Settings::from_toml_str(text).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT", "{}", text);
        }

        let s = Settings::from_toml_str("duct_velocity_fpm = 3000.0\ntire_tolerance_percent = 20.0").unwrap();
        assert_eq!(s.duct_velocity_fpm, 3_000.0);
        assert_eq!(s.tire_tolerance_percent, 20.0);
    }

    #[test]
    fn test_toml_round_trip() {
        let s = Settings::default();
        let text = s.to_toml_string().unwrap();
        assert_eq!(Settings::from_toml_str(&text).unwrap(), s);
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load(Path::new("/nonexistent/calculily.toml")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
