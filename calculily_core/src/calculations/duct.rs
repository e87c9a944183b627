//! # Duct Size Calculator
//!
//! Round duct diameter for an airflow at a design velocity.
//!
//! ```text
//! A (ft²) = CFM / FPM
//! d (in)  = √(4A/π) × 12
//! ```
//!
//! The computed diameter is rounded up to a stock round size; the air
//! velocity through that size is reported so it can be checked against
//! noise limits. An optional rectangular equivalent keeps the same area at
//! a given height.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::format::{format_number, format_with_unit, SummaryLine};
use crate::input::RawInput;
use crate::settings::Settings;
use crate::tables::{standard_duct_for, Recommendation};
use crate::validation::Validator;

/// Input parameters for duct sizing.
///
/// ## JSON Example
///
/// ```json
/// { "cfm": 400.0, "velocity_fpm": 700.0, "rect_height_in": 8.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuctInput {
    /// Airflow (ft³/min)
    pub cfm: f64,
    /// Design velocity (ft/min)
    pub velocity_fpm: f64,
    /// Height of a rectangular equivalent, if wanted
    #[serde(default)]
    pub rect_height_in: Option<f64>,
}

impl DuctInput {
    pub fn validate(&self) -> CalcResult<()> {
        let mut v = Validator::new();
        v.positive_max("cfm", self.cfm, 20_000.0);
        v.range("velocity_fpm", self.velocity_fpm, 100.0, 3_000.0);
        if let Some(height) = self.rect_height_in {
            v.positive_max("rect_height_in", height, 48.0);
        }
        v.finish()
    }

    pub fn from_raw(raw: &RawInput, settings: &Settings) -> CalcResult<Self> {
        let mut v = Validator::new();
        let cfm = raw.number(&mut v, "cfm");
        let velocity_fpm = raw.number_or(&mut v, "velocity_fpm", settings.duct_velocity_fpm);
        let rect_height_in = raw.optional_number(&mut v, "rect_height_in");
        v.finish()?;
        Ok(DuctInput {
            cfm: cfm.unwrap_or_default(),
            velocity_fpm,
            rect_height_in,
        })
    }
}

/// Cross-sectional area of a round duct (ft²)
pub fn round_area_sq_ft(diameter_in: f64) -> f64 {
    let radius_ft = diameter_in / 24.0;
    PI * radius_ft * radius_ft
}

/// Rectangular duct with the same area as the computed round duct
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangularDuct {
    pub width_in: u32,
    pub height_in: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuctResult {
    pub area_sq_ft: f64,
    pub computed_diameter_in: f64,
    pub recommended_diameter_in: Recommendation<u32>,
    /// Velocity through the recommended size (ft/min)
    pub actual_velocity_fpm: Option<f64>,
    pub rectangular: Option<RectangularDuct>,
}

impl DuctResult {
    pub fn summary(&self, settings: &Settings) -> Vec<SummaryLine> {
        let dp = usize::from(settings.decimal_places);
        let recommended = match &self.recommended_diameter_in {
            Recommendation::Standard(d) => format!("{} in round", d),
            Recommendation::BeyondTable(note) => note.clone(),
        };
        let mut lines = vec![
            SummaryLine::new("Duct area", format_with_unit(self.area_sq_ft, dp, "ft²")),
            SummaryLine::new("Calculated diameter", format_with_unit(self.computed_diameter_in, dp, "in")),
            SummaryLine::new("Recommended", recommended),
        ];
        if let Some(fpm) = self.actual_velocity_fpm {
            lines.push(SummaryLine::new("Actual velocity", format_with_unit(fpm, 0, "FPM")));
        }
        if let Some(rect) = self.rectangular {
            lines.push(SummaryLine::new(
                "Rectangular",
                format!("{} × {} in", rect.width_in, format_number(rect.height_in, 1)),
            ));
        }
        lines
    }
}

pub fn calculate(input: &DuctInput) -> CalcResult<DuctResult> {
    input.validate()?;

    let area_sq_ft = input.cfm / input.velocity_fpm;
    let computed_diameter_in = (4.0 * area_sq_ft / PI).sqrt() * 12.0;
    let recommended = standard_duct_for(computed_diameter_in);

    let actual_velocity_fpm = recommended
        .standard()
        .map(|&d| input.cfm / round_area_sq_ft(f64::from(d)));

    let rectangular = input.rect_height_in.map(|height_in| RectangularDuct {
        width_in: (area_sq_ft * 144.0 / height_in).ceil() as u32,
        height_in,
    });

    Ok(DuctResult {
        area_sq_ft,
        computed_diameter_in,
        recommended_diameter_in: recommended,
        actual_velocity_fpm,
        rectangular,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_hundred_cfm() {
        let input = DuctInput {
            cfm: 400.0,
            velocity_fpm: 700.0,
            rect_height_in: Some(8.0),
        };
        let result = calculate(&input).unwrap();
        assert!((result.area_sq_ft - 0.571_428_6).abs() < 1e-6);
        assert!((result.computed_diameter_in - 10.236).abs() < 1e-3);
        assert_eq!(result.recommended_diameter_in, Recommendation::Standard(12));
        // 400 / (π × 0.5²) = 509.3 FPM
        assert!((result.actual_velocity_fpm.unwrap() - 509.3).abs() < 0.1);
        assert_eq!(result.rectangular.unwrap().width_in, 11);
    }

    #[test]
    fn test_velocity_never_exceeds_design() {
        for cfm in [50.0, 120.0, 400.0, 900.0, 1_500.0] {
            let input = DuctInput {
                cfm,
                velocity_fpm: 800.0,
                rect_height_in: None,
            };
            let result = calculate(&input).unwrap();
            assert!(result.actual_velocity_fpm.unwrap() <= 800.0 + 1e-9);
        }
    }

    #[test]
    fn test_custom_fabrication() {
        let input = DuctInput {
            cfm: 5_000.0,
            velocity_fpm: 600.0,
            rect_height_in: None,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.recommended_diameter_in.to_string(), "Custom fabrication");
        assert!(result.actual_velocity_fpm.is_none());
    }

    #[test]
    fn test_validation() {
        let input = DuctInput {
            cfm: -10.0,
            velocity_fpm: 50.0,
            rect_height_in: Some(0.0),
        };
        assert_eq!(calculate(&input).unwrap_err().issues().len(), 3);
    }

    #[test]
    fn test_from_raw_default_velocity() {
        let raw = RawInput::new().with("cfm", "400");
        let input = DuctInput::from_raw(&raw, &Settings::default()).unwrap();
        assert_eq!(input.velocity_fpm, 700.0);
        assert!(input.rect_height_in.is_none());
    }
}
