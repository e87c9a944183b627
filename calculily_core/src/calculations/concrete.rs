//! # Concrete Volume Calculator
//!
//! Volume of concrete for common pours, converted to cubic yards (the unit
//! ready-mix is ordered in) and to bags of pre-mix.
//!
//! ## Shapes
//!
//! | Shape | Dimensions | Volume |
//! |-------|------------|--------|
//! | Slab | length ft × width ft × thickness (any length unit) | `L·W·T` |
//! | Footing | length ft × width ft × depth in | `L·W·D/12` |
//! | Column | diameter in, height ft | `π·r²·h` |
//! | Stairs | steps, rise in, run in, width ft | `Σ W·run·rise·i` |
//!
//! `cubic_yards = cubic_feet / 27`. Waste is added on top of the net volume
//! before bag counts are rounded up.
//!
//! ## Example
//!
//! ```rust
//! use calculily_core::calculations::concrete::slab_cubic_yards;
//! use calculily_core::units::Unit;
//!
//! let yards = slab_cubic_yards(10.0, 10.0, 4.0, Unit::Inch).unwrap();
//! assert!((yards - 1.2345679).abs() < 1e-6);
//! ```

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::format::{format_number, format_with_unit, SummaryLine};
use crate::input::RawInput;
use crate::settings::Settings;
use crate::units::{convert, ConversionCategory, Unit};
use crate::validation::{ensure_finite, ValidationIssue, Validator};

pub const CUBIC_FEET_PER_YARD: f64 = 27.0;
pub const CUBIC_METERS_PER_CUBIC_FOOT: f64 = 0.028_316_846_592;

/// Yield of a 60 lb bag of pre-mix (ft³)
pub const BAG_60LB_YIELD: f64 = 0.45;
/// Yield of an 80 lb bag of pre-mix (ft³)
pub const BAG_80LB_YIELD: f64 = 0.60;

/// Largest linear dimension accepted for any pour (ft)
const MAX_DIMENSION_FT: f64 = 1_000.0;

/// Thickest slab or deepest footing accepted (ft)
const MAX_DEPTH_FT: f64 = 10.0;

/// Cubic yards in a rectangular slab.
pub fn slab_cubic_yards(length_ft: f64, width_ft: f64, thickness: f64, thickness_unit: Unit) -> CalcResult<f64> {
    let thickness_ft = convert(thickness, thickness_unit, Unit::Foot)?;
    Ok(length_ft * width_ft * thickness_ft / CUBIC_FEET_PER_YARD)
}

/// Pour geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum ConcreteShape {
    Slab {
        length_ft: f64,
        width_ft: f64,
        thickness: f64,
        /// Any length unit; inches by default
        #[serde(default = "default_thickness_unit")]
        thickness_unit: Unit,
    },
    Footing {
        length_ft: f64,
        width_ft: f64,
        depth_in: f64,
    },
    Column {
        diameter_in: f64,
        height_ft: f64,
    },
    Stairs {
        steps: u32,
        rise_in: f64,
        run_in: f64,
        width_ft: f64,
    },
}

fn default_thickness_unit() -> Unit {
    Unit::Inch
}

impl ConcreteShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ConcreteShape::Slab { .. } => ShapeKind::Slab,
            ConcreteShape::Footing { .. } => ShapeKind::Footing,
            ConcreteShape::Column { .. } => ShapeKind::Column,
            ConcreteShape::Stairs { .. } => ShapeKind::Stairs,
        }
    }

    fn validate_into(&self, v: &mut Validator) {
        match self {
            ConcreteShape::Slab {
                length_ft,
                width_ft,
                thickness,
                thickness_unit,
            } => {
                v.positive_max("length_ft", *length_ft, MAX_DIMENSION_FT);
                v.positive_max("width_ft", *width_ft, MAX_DIMENSION_FT);
                let thickness_ok = v.positive("thickness", *thickness);
                if thickness_unit.category() != ConversionCategory::Length {
                    v.push(ValidationIssue::UnknownOption {
                        field: "thickness_unit".to_string(),
                        raw: thickness_unit.symbol().to_string(),
                        expected: length_symbols(),
                    });
                } else if thickness_ok {
                    if let Ok(max) = convert(MAX_DEPTH_FT, Unit::Foot, *thickness_unit) {
                        if *thickness > max {
                            v.push(ValidationIssue::AboveMaximum {
                                field: "thickness".to_string(),
                                value: *thickness,
                                max,
                            });
                        }
                    }
                }
            }
            ConcreteShape::Footing {
                length_ft,
                width_ft,
                depth_in,
            } => {
                v.positive_max("length_ft", *length_ft, MAX_DIMENSION_FT);
                v.positive_max("width_ft", *width_ft, MAX_DIMENSION_FT);
                v.positive_max("depth_in", *depth_in, MAX_DEPTH_FT * 12.0);
            }
            ConcreteShape::Column { diameter_in, height_ft } => {
                v.positive_max("diameter_in", *diameter_in, 240.0);
                v.positive_max("height_ft", *height_ft, 200.0);
            }
            ConcreteShape::Stairs {
                steps,
                rise_in,
                run_in,
                width_ft,
            } => {
                v.count("steps", *steps, 1, 50);
                v.positive_max("rise_in", *rise_in, 24.0);
                v.positive_max("run_in", *run_in, 48.0);
                v.positive_max("width_ft", *width_ft, 50.0);
            }
        }
    }

    /// Net volume of one pour (ft³)
    pub fn cubic_feet(&self) -> CalcResult<f64> {
        let volume = match self {
            ConcreteShape::Slab {
                length_ft,
                width_ft,
                thickness,
                thickness_unit,
            } => slab_cubic_yards(*length_ft, *width_ft, *thickness, *thickness_unit)? * CUBIC_FEET_PER_YARD,
            ConcreteShape::Footing {
                length_ft,
                width_ft,
                depth_in,
            } => length_ft * width_ft * depth_in / 12.0,
            ConcreteShape::Column { diameter_in, height_ft } => {
                let radius_ft = diameter_in / 2.0 / 12.0;
                PI * radius_ft * radius_ft * height_ft
            }
            ConcreteShape::Stairs {
                steps,
                rise_in,
                run_in,
                width_ft,
            } => {
                // Step i is a solid block i risers tall
                let run_ft = run_in / 12.0;
                let rise_ft = rise_in / 12.0;
                (1..=*steps)
                    .map(|i| width_ft * run_ft * rise_ft * f64::from(i))
                    .sum()
            }
        };
        Ok(volume)
    }
}

fn length_symbols() -> Vec<String> {
    ConversionCategory::Length
        .units()
        .iter()
        .map(|u| u.symbol().to_string())
        .collect()
}

/// Shape selector for form input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ShapeKind {
    #[default]
    Slab,
    Footing,
    Column,
    Stairs,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [ShapeKind::Slab, ShapeKind::Footing, ShapeKind::Column, ShapeKind::Stairs];

    pub fn slug(&self) -> &'static str {
        match self {
            ShapeKind::Slab => "slab",
            ShapeKind::Footing => "footing",
            ShapeKind::Column => "column",
            ShapeKind::Stairs => "stairs",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for ShapeKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ShapeKind::ALL
            .iter()
            .copied()
            .find(|k| k.slug() == wanted || k.slug().trim_end_matches('s') == wanted)
            .ok_or_else(|| CalcError::invalid_input("shape", s, "Expected slab, footing, column or stairs"))
    }
}

/// Input parameters for the concrete calculator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "shape": { "shape": "Slab", "length_ft": 10.0, "width_ft": 10.0, "thickness": 4.0, "thickness_unit": "Inch" },
///   "quantity": 1,
///   "waste_percent": 10.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcreteInput {
    pub shape: ConcreteShape,
    /// Number of identical pours
    pub quantity: u32,
    /// Extra volume ordered on top of the net volume (0-50)
    pub waste_percent: f64,
}

impl ConcreteInput {
    pub fn validate(&self) -> CalcResult<()> {
        let mut v = Validator::new();
        self.shape.validate_into(&mut v);
        v.count("quantity", self.quantity, 1, 1_000);
        v.range("waste_percent", self.waste_percent, 0.0, 50.0);
        v.finish()
    }

    /// Waste defaults to the configured percentage when left blank.
    pub fn from_raw(raw: &RawInput, settings: &Settings) -> CalcResult<Self> {
        let mut v = Validator::new();
        let kind = raw.choice_or(&mut v, "shape", &["slab", "footing", "column", "stairs"], ShapeKind::Slab);
        let shape = match kind {
            ShapeKind::Slab => {
                let length_ft = raw.number(&mut v, "length_ft");
                let width_ft = raw.number(&mut v, "width_ft");
                let thickness = raw.number(&mut v, "thickness");
                let thickness_unit = raw.choice_or(&mut v, "thickness_unit", &["in", "ft", "cm", "mm", "m"], Unit::Inch);
                ConcreteShape::Slab {
                    length_ft: length_ft.unwrap_or_default(),
                    width_ft: width_ft.unwrap_or_default(),
                    thickness: thickness.unwrap_or_default(),
                    thickness_unit,
                }
            }
            ShapeKind::Footing => {
                let length_ft = raw.number(&mut v, "length_ft");
                let width_ft = raw.number(&mut v, "width_ft");
                let depth_in = raw.number(&mut v, "depth_in");
                ConcreteShape::Footing {
                    length_ft: length_ft.unwrap_or_default(),
                    width_ft: width_ft.unwrap_or_default(),
                    depth_in: depth_in.unwrap_or_default(),
                }
            }
            ShapeKind::Column => {
                let diameter_in = raw.number(&mut v, "diameter_in");
                let height_ft = raw.number(&mut v, "height_ft");
                ConcreteShape::Column {
                    diameter_in: diameter_in.unwrap_or_default(),
                    height_ft: height_ft.unwrap_or_default(),
                }
            }
            ShapeKind::Stairs => {
                let steps = raw.count(&mut v, "steps");
                let rise_in = raw.number(&mut v, "rise_in");
                let run_in = raw.number(&mut v, "run_in");
                let width_ft = raw.number(&mut v, "width_ft");
                ConcreteShape::Stairs {
                    steps: steps.unwrap_or_default(),
                    rise_in: rise_in.unwrap_or_default(),
                    run_in: run_in.unwrap_or_default(),
                    width_ft: width_ft.unwrap_or_default(),
                }
            }
        };
        let quantity = raw.count_or(&mut v, "quantity", 1);
        let waste_percent = raw.number_or(&mut v, "waste_percent", settings.concrete_waste_percent);
        v.finish()?;
        Ok(ConcreteInput {
            shape,
            quantity,
            waste_percent,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcreteResult {
    pub cubic_feet: f64,
    pub cubic_yards: f64,
    pub cubic_meters: f64,
    /// Cubic yards including waste
    pub cubic_yards_with_waste: f64,
    pub bags_60lb: u64,
    pub bags_80lb: u64,
}

impl ConcreteResult {
    pub fn summary(&self, settings: &Settings) -> Vec<SummaryLine> {
        let dp = usize::from(settings.decimal_places);
        vec![
            SummaryLine::new("Volume", format_with_unit(self.cubic_feet, dp, "ft³")),
            SummaryLine::new("Cubic yards", format_with_unit(self.cubic_yards, dp, "yd³")),
            SummaryLine::new("Cubic meters", format_with_unit(self.cubic_meters, dp, "m³")),
            SummaryLine::new("Order (with waste)", format_with_unit(self.cubic_yards_with_waste, dp, "yd³")),
            SummaryLine::new("60 lb bags", format_number(self.bags_60lb as f64, 0)),
            SummaryLine::new("80 lb bags", format_number(self.bags_80lb as f64, 0)),
        ]
    }
}

fn bags(cubic_feet: f64, yield_per_bag: f64) -> u64 {
    (cubic_feet / yield_per_bag).ceil() as u64
}

pub fn calculate(input: &ConcreteInput) -> CalcResult<ConcreteResult> {
    input.validate()?;

    let cubic_feet = input.shape.cubic_feet()? * f64::from(input.quantity);
    let with_waste_ft = cubic_feet * (1.0 + input.waste_percent / 100.0);
    ensure_finite("concrete", &[("cubic_feet", cubic_feet), ("cubic_feet_with_waste", with_waste_ft)])?;

    Ok(ConcreteResult {
        cubic_feet,
        cubic_yards: cubic_feet / CUBIC_FEET_PER_YARD,
        cubic_meters: cubic_feet * CUBIC_METERS_PER_CUBIC_FOOT,
        cubic_yards_with_waste: with_waste_ft / CUBIC_FEET_PER_YARD,
        bags_60lb: bags(with_waste_ft, BAG_60LB_YIELD),
        bags_80lb: bags(with_waste_ft, BAG_80LB_YIELD),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slab() -> ConcreteInput {
        ConcreteInput {
            shape: ConcreteShape::Slab {
                length_ft: 10.0,
                width_ft: 10.0,
                thickness: 4.0,
                thickness_unit: Unit::Inch,
            },
            quantity: 1,
            waste_percent: 0.0,
        }
    }

    #[test]
    fn test_slab_yards() {
        let yards = slab_cubic_yards(10.0, 10.0, 4.0, Unit::Inch).unwrap();
        assert!((yards - 100.0 / 3.0 / 27.0).abs() < 1e-12);

        let result = calculate(&slab()).unwrap();
        assert!((result.cubic_yards - 1.234_567_9).abs() < 1e-6);
        assert!((result.cubic_feet - 33.333_333).abs() < 1e-5);
    }

    #[test]
    fn test_slab_metric_thickness() {
        // 10.16 cm is exactly 4 in
        let yards = slab_cubic_yards(10.0, 10.0, 10.16, Unit::Centimeter).unwrap();
        assert!((yards - 1.234_567_9).abs() < 1e-6);
    }

    #[test]
    fn test_bags_round_up() {
        let result = calculate(&slab()).unwrap();
        // 33.33 ft³ / 0.45 = 74.07, / 0.60 = 55.56
        assert_eq!(result.bags_60lb, 75);
        assert_eq!(result.bags_80lb, 56);
    }

    #[test]
    fn test_largest_footing_counts_every_bag() {
        let input = ConcreteInput {
            shape: ConcreteShape::Footing {
                length_ft: 1_000.0,
                width_ft: 1_000.0,
                depth_in: 120.0,
            },
            quantity: 1_000,
            waste_percent: 50.0,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.cubic_feet, 1e10);
        // 1.5e10 ft³ / 0.45 = 33,333,333,333.3
        assert_eq!(result.bags_60lb, 33_333_333_334);
        assert!((result.bags_80lb as f64 - 2.5e10).abs() <= 1.0);
    }

    #[test]
    fn test_slab_thickness_limit() {
        let mut input = slab();
        input.shape = ConcreteShape::Slab {
            length_ft: 10.0,
            width_ft: 10.0,
            thickness: 1e308,
            thickness_unit: Unit::Meter,
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.issues()[0].code(), "ABOVE_MAXIMUM");
        assert_eq!(err.issues()[0].field(), "thickness");

        input.shape = ConcreteShape::Slab {
            length_ft: MAX_DIMENSION_FT,
            width_ft: MAX_DIMENSION_FT,
            thickness: 96.0,
            thickness_unit: Unit::Inch,
        };
        let result = calculate(&input).unwrap();
        assert!((result.cubic_feet - 8e6).abs() < 1e-3);
    }

    #[test]
    fn test_waste_and_quantity() {
        let mut input = slab();
        input.quantity = 2;
        input.waste_percent = 10.0;
        let result = calculate(&input).unwrap();
        assert!((result.cubic_yards - 2.469_135_8).abs() < 1e-6);
        assert!((result.cubic_yards_with_waste - result.cubic_yards * 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_column() {
        let input = ConcreteInput {
            shape: ConcreteShape::Column {
                diameter_in: 12.0,
                height_ft: 8.0,
            },
            quantity: 1,
            waste_percent: 0.0,
        };
        let result = calculate(&input).unwrap();
        assert!((result.cubic_feet - PI * 0.25 * 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_stairs() {
        // 3 steps, 6 in rise, 12 in run, 4 ft wide: 4 × 1 × 0.5 × (1+2+3) = 12 ft³
        let input = ConcreteInput {
            shape: ConcreteShape::Stairs {
                steps: 3,
                rise_in: 6.0,
                run_in: 12.0,
                width_ft: 4.0,
            },
            quantity: 1,
            waste_percent: 0.0,
        };
        let result = calculate(&input).unwrap();
        assert!((result.cubic_feet - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_length_thickness_unit() {
        let mut input = slab();
        input.shape = ConcreteShape::Slab {
            length_ft: 10.0,
            width_ft: 10.0,
            thickness: 4.0,
            thickness_unit: Unit::Pound,
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.issues()[0].field(), "thickness_unit");
    }

    #[test]
    fn test_invalid_dimensions_collected() {
        let input = ConcreteInput {
            shape: ConcreteShape::Footing {
                length_ft: 0.0,
                width_ft: -2.0,
                depth_in: 12.0,
            },
            quantity: 0,
            waste_percent: 80.0,
        };
        assert_eq!(calculate(&input).unwrap_err().issues().len(), 4);
    }

    #[test]
    fn test_from_raw() {
        let settings = Settings::default();
        let raw = RawInput::new()
            .with("shape", "footing")
            .with("length_ft", "20")
            .with("width_ft", "2")
            .with("depth_in", "12");
        let input = ConcreteInput::from_raw(&raw, &settings).unwrap();
        assert_eq!(input.shape.kind(), ShapeKind::Footing);
        assert_eq!(input.waste_percent, settings.concrete_waste_percent);
        let result = calculate(&input).unwrap();
        assert!((result.cubic_feet - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_shape_serialization() {
        let json = serde_json::to_string(&slab()).unwrap();
        assert!(json.contains("\"shape\":\"Slab\""));
        let roundtrip: ConcreteInput = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.shape, slab().shape);
    }
}
