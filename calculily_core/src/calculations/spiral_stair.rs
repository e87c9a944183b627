//! # Spiral Stair Calculator
//!
//! Lays out a spiral stair between two floors and checks it against IRC
//! R311.7.10.1.
//!
//! ## Layout
//!
//! ```text
//! risers      = ⌈height / max_riser⌉
//! riser       = height / risers
//! treads      = risers − 1                 (top landing is the upper floor)
//! °/step      = rotation / risers
//! walkline    = pole radius + 12 in
//! tread depth = 2π × walkline × °/step / 360
//! headroom    = riser × (360 / °/step) − tread thickness
//! ```
//!
//! ## Code Minimums (IRC R311.7.10.1)
//!
//! | Check | Limit |
//! |-------|-------|
//! | Clear width | ≥ 26 in |
//! | Tread depth at walkline | ≥ 6.75 in |
//! | Riser height | ≤ 9.5 in |
//! | Headroom | ≥ 78 in |

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::format::{format_number, format_with_unit, SummaryLine};
use crate::input::RawInput;
use crate::settings::Settings;
use crate::validation::Validator;

pub const MIN_CLEAR_WIDTH_IN: f64 = 26.0;
pub const MIN_TREAD_DEPTH_IN: f64 = 6.75;
pub const MAX_RISER_IN: f64 = 9.5;
pub const MIN_HEADROOM_IN: f64 = 78.0;

/// Walkline distance from the edge of the center pole
pub const WALKLINE_OFFSET_IN: f64 = 12.0;

/// Input parameters for spiral stair layout.
///
/// ## JSON Example
///
/// ```json
/// {
///   "floor_to_floor_in": 108.0,
///   "stair_diameter_in": 60.0,
///   "pole_diameter_in": 4.0,
///   "rotation_degrees": 360.0,
///   "max_riser_in": 9.5,
///   "tread_thickness_in": 1.5
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpiralStairInput {
    /// Finished floor to finished floor
    pub floor_to_floor_in: f64,
    /// Outside diameter of the stair
    pub stair_diameter_in: f64,
    pub pole_diameter_in: f64,
    /// Total turn from bottom to top
    pub rotation_degrees: f64,
    pub max_riser_in: f64,
    pub tread_thickness_in: f64,
}

impl SpiralStairInput {
    pub fn validate(&self) -> CalcResult<()> {
        let mut v = Validator::new();
        v.range("floor_to_floor_in", self.floor_to_floor_in, 24.0, 360.0);
        let stair_ok = v.range("stair_diameter_in", self.stair_diameter_in, 36.0, 144.0);
        let pole_ok = v.range("pole_diameter_in", self.pole_diameter_in, 1.0, 24.0);
        v.range("rotation_degrees", self.rotation_degrees, 90.0, 720.0);
        v.range("max_riser_in", self.max_riser_in, 4.0, 12.0);
        v.range("tread_thickness_in", self.tread_thickness_in, 0.0, 6.0);
        if stair_ok && pole_ok {
            v.cross_field(
                self.walkline_radius_in() < self.stair_diameter_in / 2.0,
                "stair_diameter_in",
                "pole_diameter_in",
                "Stair must extend past the walkline (pole radius + 12 in)",
            );
        }
        v.finish()
    }

    /// Rotation, riser limit and tread thickness default when blank.
    pub fn from_raw(raw: &RawInput, _settings: &Settings) -> CalcResult<Self> {
        let mut v = Validator::new();
        let floor_to_floor_in = raw.number(&mut v, "floor_to_floor_in");
        let stair_diameter_in = raw.number(&mut v, "stair_diameter_in");
        let pole_diameter_in = raw.number_or(&mut v, "pole_diameter_in", 4.0);
        let rotation_degrees = raw.number_or(&mut v, "rotation_degrees", 360.0);
        let max_riser_in = raw.number_or(&mut v, "max_riser_in", MAX_RISER_IN);
        let tread_thickness_in = raw.number_or(&mut v, "tread_thickness_in", 1.5);
        v.finish()?;
        Ok(SpiralStairInput {
            floor_to_floor_in: floor_to_floor_in.unwrap_or_default(),
            stair_diameter_in: stair_diameter_in.unwrap_or_default(),
            pole_diameter_in,
            rotation_degrees,
            max_riser_in,
            tread_thickness_in,
        })
    }

    pub fn walkline_radius_in(&self) -> f64 {
        self.pole_diameter_in / 2.0 + WALKLINE_OFFSET_IN
    }
}

/// Outcome of one code check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StairCheck {
    pub name: String,
    pub actual: f64,
    pub limit: f64,
    pub passes: bool,
}

impl StairCheck {
    fn at_least(name: &str, actual: f64, limit: f64) -> Self {
        StairCheck {
            name: name.to_string(),
            actual,
            limit,
            passes: actual >= limit,
        }
    }

    fn at_most(name: &str, actual: f64, limit: f64) -> Self {
        StairCheck {
            name: name.to_string(),
            actual,
            limit,
            passes: actual <= limit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpiralStairResult {
    pub risers: u32,
    pub treads: u32,
    pub riser_height_in: f64,
    pub degrees_per_step: f64,
    pub clear_width_in: f64,
    pub walkline_radius_in: f64,
    pub tread_depth_at_walkline_in: f64,
    pub headroom_in: f64,
    pub checks: Vec<StairCheck>,
    pub code_compliant: bool,
}

impl SpiralStairResult {
    pub fn summary(&self, settings: &Settings) -> Vec<SummaryLine> {
        let dp = usize::from(settings.decimal_places);
        let mut lines = vec![
            SummaryLine::new("Risers", self.risers.to_string()),
            SummaryLine::new("Treads", self.treads.to_string()),
            SummaryLine::new("Riser height", format_with_unit(self.riser_height_in, dp, "in")),
            SummaryLine::new("Rotation per step", format!("{}°", format_number(self.degrees_per_step, 1))),
            SummaryLine::new("Tread at walkline", format_with_unit(self.tread_depth_at_walkline_in, dp, "in")),
            SummaryLine::new("Headroom", format_with_unit(self.headroom_in, dp, "in")),
        ];
        for check in &self.checks {
            let verdict = if check.passes { "OK" } else { "FAILS" };
            lines.push(SummaryLine::new(check.name.clone(), verdict));
        }
        lines
    }
}

pub fn calculate(input: &SpiralStairInput) -> CalcResult<SpiralStairResult> {
    input.validate()?;

    let risers = (input.floor_to_floor_in / input.max_riser_in).ceil().max(1.0) as u32;
    let riser_height_in = input.floor_to_floor_in / f64::from(risers);
    let degrees_per_step = input.rotation_degrees / f64::from(risers);

    let clear_width_in = (input.stair_diameter_in - input.pole_diameter_in) / 2.0;
    let walkline_radius_in = input.walkline_radius_in();
    let tread_depth_at_walkline_in = 2.0 * PI * walkline_radius_in * degrees_per_step / 360.0;

    // One full turn above a tread brings the next tread overhead
    let steps_per_turn = 360.0 / degrees_per_step;
    let headroom_in = riser_height_in * steps_per_turn - input.tread_thickness_in;

    let checks = vec![
        StairCheck::at_least("Clear width", clear_width_in, MIN_CLEAR_WIDTH_IN),
        StairCheck::at_least("Tread depth", tread_depth_at_walkline_in, MIN_TREAD_DEPTH_IN),
        StairCheck::at_most("Riser height", riser_height_in, MAX_RISER_IN),
        StairCheck::at_least("Headroom", headroom_in, MIN_HEADROOM_IN),
    ];
    let code_compliant = checks.iter().all(|c| c.passes);

    Ok(SpiralStairResult {
        risers,
        treads: risers - 1,
        riser_height_in,
        degrees_per_step,
        clear_width_in,
        walkline_radius_in,
        tread_depth_at_walkline_in,
        headroom_in,
        checks,
        code_compliant,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_foot_stair() -> SpiralStairInput {
        SpiralStairInput {
            floor_to_floor_in: 108.0,
            stair_diameter_in: 60.0,
            pole_diameter_in: 4.0,
            rotation_degrees: 360.0,
            max_riser_in: 9.5,
            tread_thickness_in: 1.5,
        }
    }

    #[test]
    fn test_layout() {
        let result = calculate(&five_foot_stair()).unwrap();
        assert_eq!(result.risers, 12);
        assert_eq!(result.treads, 11);
        assert!((result.riser_height_in - 9.0).abs() < 1e-9);
        assert!((result.degrees_per_step - 30.0).abs() < 1e-9);
        assert!((result.clear_width_in - 28.0).abs() < 1e-9);
        assert!((result.walkline_radius_in - 14.0).abs() < 1e-9);
        assert!((result.tread_depth_at_walkline_in - 7.330).abs() < 1e-3);
        assert!((result.headroom_in - 106.5).abs() < 1e-9);
        assert!(result.code_compliant);
    }

    #[test]
    fn test_narrow_stair_fails_width() {
        let mut input = five_foot_stair();
        input.stair_diameter_in = 48.0;
        let result = calculate(&input).unwrap();
        let width = result.checks.iter().find(|c| c.name == "Clear width").unwrap();
        assert!(!width.passes);
        assert!(!result.code_compliant);
    }

    #[test]
    fn test_tall_risers_fail() {
        let mut input = five_foot_stair();
        input.max_riser_in = 11.0;
        let result = calculate(&input).unwrap();
        assert_eq!(result.risers, 10);
        let riser = result.checks.iter().find(|c| c.name == "Riser height").unwrap();
        assert!(!riser.passes);
    }

    #[test]
    fn test_walkline_must_fit() {
        let mut input = five_foot_stair();
        input.stair_diameter_in = 36.0;
        input.pole_diameter_in = 14.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.issues()[0].code(), "CROSS_FIELD");
    }

    #[test]
    fn test_from_raw_defaults() {
        let raw = RawInput::new()
            .with("floor_to_floor_in", "108")
            .with("stair_diameter_in", "60");
        let input = SpiralStairInput::from_raw(&raw, &Settings::default()).unwrap();
        assert_eq!(input.rotation_degrees, 360.0);
        assert_eq!(input.max_riser_in, 9.5);
        assert_eq!(input.pole_diameter_in, 4.0);
    }
}
