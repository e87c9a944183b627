//! # Tire Size Calculator
//!
//! Parses metric tire size codes and derives overall dimensions.
//!
//! ## Size Codes
//!
//! ```text
//! [P|LT|ST|T] width / aspect [R|ZR|D|B|-] rim
//!     P215/65R15   LT265/70R17   225/40ZR18   7.00-15 (not supported)
//! ```
//!
//! - width: section width (mm)
//! - aspect: sidewall height as a percent of width
//! - rim: wheel diameter (in), decimals allowed (16.5)
//!
//! ## Dimensions
//!
//! ```text
//! sidewall = width × aspect / 100                    (mm)
//! diameter = 2 × sidewall + rim × 25.4               (mm)
//! revs/mile = 63,360 / (π × diameter_in)
//! ```
//!
//! Comparing two sizes: a larger tire turns fewer times per mile, so the
//! speedometer under-reads by the diameter ratio:
//! `actual_speed = indicated × new_diameter / old_diameter`.
//!
//! ## Example
//!
//! ```rust
//! use calculily_core::calculations::tire::parse_tire_size;
//!
//! let size = parse_tire_size("P215/65R15").unwrap();
//! assert_eq!((size.width_mm, size.aspect_ratio, size.rim_diameter_in), (215, 65, 15.0));
//! assert!((size.diameter_in() - 26.0).abs() < 0.1);
//!
//! assert!(parse_tire_size("215x65").is_err());
//! ```

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::format::{format_number, format_percent, format_with_unit, SummaryLine};
use crate::input::RawInput;
use crate::settings::Settings;
use crate::validation::Validator;

pub const MM_PER_INCH: f64 = 25.4;
pub const INCHES_PER_MILE: f64 = 63_360.0;

const EXPECTED_FORMAT: &str = "a size like 215/65R15";

static TIRE_SIZE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(P|LT|ST|T)?\s*(\d{3})\s*/\s*(\d{2,3})\s*(ZR|R|D|B|-)\s*(\d{2}(?:\.\d)?)$")
        .expect("tire size pattern is valid")
});

/// Service class prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    /// P: passenger
    Passenger,
    /// LT: light truck
    LightTruck,
    /// ST: special trailer
    SpecialTrailer,
    /// T: temporary spare
    TemporarySpare,
}

impl ServiceType {
    pub fn code(&self) -> &'static str {
        match self {
            ServiceType::Passenger => "P",
            ServiceType::LightTruck => "LT",
            ServiceType::SpecialTrailer => "ST",
            ServiceType::TemporarySpare => "T",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "P" => Some(ServiceType::Passenger),
            "LT" => Some(ServiceType::LightTruck),
            "ST" => Some(ServiceType::SpecialTrailer),
            "T" => Some(ServiceType::TemporarySpare),
            _ => None,
        }
    }
}

/// Carcass construction letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Construction {
    #[default]
    Radial,
    /// ZR: radial rated above 149 mph
    SpeedRatedRadial,
    /// D or `-`
    Diagonal,
    Belted,
}

impl Construction {
    pub fn code(&self) -> &'static str {
        match self {
            Construction::Radial => "R",
            Construction::SpeedRatedRadial => "ZR",
            Construction::Diagonal => "D",
            Construction::Belted => "B",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "R" => Some(Construction::Radial),
            "ZR" => Some(Construction::SpeedRatedRadial),
            "D" | "-" => Some(Construction::Diagonal),
            "B" => Some(Construction::Belted),
            _ => None,
        }
    }
}

/// A parsed metric tire size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TireSize {
    pub service: Option<ServiceType>,
    pub width_mm: u32,
    pub aspect_ratio: u32,
    pub construction: Construction,
    pub rim_diameter_in: f64,
}

/// Parse a size code such as `"215/65R15"` or `"LT265/70R17"`.
///
/// # Errors
///
/// * `CalcError::ParseFailure` - text does not match the size format
/// * `CalcError::InvalidInput` - aspect ratio or rim outside real-world sizes
pub fn parse_tire_size(text: &str) -> CalcResult<TireSize> {
    let trimmed = text.trim();
    let caps = TIRE_SIZE_RE
        .captures(trimmed)
        .ok_or_else(|| CalcError::parse_failure(text, EXPECTED_FORMAT))?;

    let number = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or_default();
    let width_mm: u32 = number(2)
        .parse()
        .map_err(|_| CalcError::parse_failure(text, EXPECTED_FORMAT))?;
    let aspect_ratio: u32 = number(3)
        .parse()
        .map_err(|_| CalcError::parse_failure(text, EXPECTED_FORMAT))?;
    let rim_diameter_in: f64 = number(5)
        .parse()
        .map_err(|_| CalcError::parse_failure(text, EXPECTED_FORMAT))?;
    let construction =
        Construction::from_code(number(4)).ok_or_else(|| CalcError::parse_failure(text, EXPECTED_FORMAT))?;
    let service = caps.get(1).and_then(|m| ServiceType::from_code(m.as_str()));

    if !(20..=95).contains(&aspect_ratio) {
        return Err(CalcError::invalid_input(
            "aspect_ratio",
            aspect_ratio.to_string(),
            "Aspect ratio must be between 20 and 95",
        ));
    }
    if !(10.0..=30.0).contains(&rim_diameter_in) {
        return Err(CalcError::invalid_input(
            "rim_diameter_in",
            rim_diameter_in.to_string(),
            "Rim diameter must be between 10 and 30 inches",
        ));
    }

    Ok(TireSize {
        service,
        width_mm,
        aspect_ratio,
        construction,
        rim_diameter_in,
    })
}

impl TireSize {
    pub fn sidewall_mm(&self) -> f64 {
        f64::from(self.width_mm) * f64::from(self.aspect_ratio) / 100.0
    }

    pub fn diameter_mm(&self) -> f64 {
        2.0 * self.sidewall_mm() + self.rim_diameter_in * MM_PER_INCH
    }

    pub fn diameter_in(&self) -> f64 {
        self.diameter_mm() / MM_PER_INCH
    }

    pub fn circumference_in(&self) -> f64 {
        PI * self.diameter_in()
    }

    pub fn revolutions_per_mile(&self) -> f64 {
        INCHES_PER_MILE / self.circumference_in()
    }

    pub fn specs(&self) -> TireSpecs {
        TireSpecs {
            size: self.to_string(),
            section_width_in: f64::from(self.width_mm) / MM_PER_INCH,
            sidewall_mm: self.sidewall_mm(),
            sidewall_in: self.sidewall_mm() / MM_PER_INCH,
            diameter_mm: self.diameter_mm(),
            diameter_in: self.diameter_in(),
            circumference_in: self.circumference_in(),
            revolutions_per_mile: self.revolutions_per_mile(),
        }
    }
}

impl fmt::Display for TireSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(service) = self.service {
            write!(f, "{}", service.code())?;
        }
        write!(f, "{}/{}{}", self.width_mm, self.aspect_ratio, self.construction.code())?;
        if self.rim_diameter_in.fract() == 0.0 {
            write!(f, "{}", self.rim_diameter_in as u32)
        } else {
            write!(f, "{:.1}", self.rim_diameter_in)
        }
    }
}

impl FromStr for TireSize {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tire_size(s)
    }
}

impl TryFrom<String> for TireSize {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_tire_size(&value)
    }
}

impl From<TireSize> for String {
    fn from(size: TireSize) -> Self {
        size.to_string()
    }
}

/// Derived dimensions of one size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TireSpecs {
    pub size: String,
    pub section_width_in: f64,
    pub sidewall_mm: f64,
    pub sidewall_in: f64,
    pub diameter_mm: f64,
    pub diameter_in: f64,
    pub circumference_in: f64,
    pub revolutions_per_mile: f64,
}

/// Input parameters for the tire calculator.
///
/// ## JSON Example
///
/// ```json
/// { "current": "215/65R15", "new": "225/60R16", "indicated_speed": 60.0, "tolerance_percent": 3.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TireInput {
    pub current: TireSize,
    /// Replacement size to compare against
    #[serde(default)]
    pub new: Option<TireSize>,
    /// Speedometer reading used for the comparison
    pub indicated_speed: f64,
    /// Allowed overall diameter change (percent)
    pub tolerance_percent: f64,
}

impl TireInput {
    pub fn validate(&self) -> CalcResult<()> {
        let mut v = Validator::new();
        v.positive_max("indicated_speed", self.indicated_speed, 200.0);
        v.positive_max("tolerance_percent", self.tolerance_percent, 20.0);
        v.finish()
    }

    /// Sizes are read from `current` and `new`; speed and tolerance fall
    /// back to the configured defaults.
    pub fn from_raw(raw: &RawInput, settings: &Settings) -> CalcResult<Self> {
        let mut v = Validator::new();
        let current = raw.text(&mut v, "current");
        let indicated_speed = raw.number_or(&mut v, "indicated_speed", settings.speedometer_test_speed);
        let tolerance_percent = raw.number_or(&mut v, "tolerance_percent", settings.tire_tolerance_percent);
        v.finish()?;

        let current = parse_tire_size(current.as_deref().unwrap_or_default())?;
        let new = raw.get("new").map(parse_tire_size).transpose()?;
        Ok(TireInput {
            current,
            new,
            indicated_speed,
            tolerance_percent,
        })
    }
}

/// Current size against a replacement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TireComparison {
    pub new: TireSpecs,
    /// Positive when the new tire is taller
    pub diameter_difference_percent: f64,
    pub indicated_speed: f64,
    pub actual_speed: f64,
    /// `actual − indicated`
    pub speedometer_error: f64,
    pub within_tolerance: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TireResult {
    pub current: TireSpecs,
    pub comparison: Option<TireComparison>,
}

impl TireResult {
    pub fn summary(&self, settings: &Settings) -> Vec<SummaryLine> {
        let dp = usize::from(settings.decimal_places);
        let mut lines = vec![
            SummaryLine::new("Size", self.current.size.clone()),
            SummaryLine::new("Diameter", format_with_unit(self.current.diameter_in, dp, "in")),
            SummaryLine::new("Sidewall", format_with_unit(self.current.sidewall_in, dp, "in")),
            SummaryLine::new("Circumference", format_with_unit(self.current.circumference_in, dp, "in")),
            SummaryLine::new("Revolutions per mile", format_number(self.current.revolutions_per_mile, 0)),
        ];
        if let Some(cmp) = &self.comparison {
            lines.push(SummaryLine::new("New size", cmp.new.size.clone()));
            lines.push(SummaryLine::new("New diameter", format_with_unit(cmp.new.diameter_in, dp, "in")));
            lines.push(SummaryLine::new("Difference", format_percent(cmp.diameter_difference_percent, dp)));
            lines.push(SummaryLine::new(
                format!("Speedometer {}", format_number(cmp.indicated_speed, 0)),
                format!("actual {}", format_number(cmp.actual_speed, 1)),
            ));
            let verdict = if cmp.within_tolerance {
                "Within tolerance"
            } else {
                "Outside tolerance"
            };
            lines.push(SummaryLine::new("Fitment", verdict));
        }
        lines
    }
}

pub fn calculate(input: &TireInput) -> CalcResult<TireResult> {
    input.validate()?;

    let comparison = input.new.map(|new| {
        let old_d = input.current.diameter_in();
        let new_d = new.diameter_in();
        let diameter_difference_percent = (new_d - old_d) / old_d * 100.0;
        let actual_speed = input.indicated_speed * new_d / old_d;
        TireComparison {
            new: new.specs(),
            diameter_difference_percent,
            indicated_speed: input.indicated_speed,
            actual_speed,
            speedometer_error: actual_speed - input.indicated_speed,
            within_tolerance: diameter_difference_percent.abs() <= input.tolerance_percent,
        }
    });

    Ok(TireResult {
        current: input.current.specs(),
        comparison,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let size = parse_tire_size("215/65R15").unwrap();
        assert_eq!(size.width_mm, 215);
        assert_eq!(size.aspect_ratio, 65);
        assert_eq!(size.rim_diameter_in, 15.0);
        assert_eq!(size.service, None);
        assert_eq!(size.construction, Construction::Radial);
    }

    #[test]
    fn test_parse_variants() {
        let lt = parse_tire_size("LT265/70R17").unwrap();
        assert_eq!(lt.service, Some(ServiceType::LightTruck));

        let zr = parse_tire_size("225/40zr18").unwrap();
        assert_eq!(zr.construction, Construction::SpeedRatedRadial);

        let spaced = parse_tire_size(" P 215 / 65 R 15 ").unwrap();
        assert_eq!(spaced.service, Some(ServiceType::Passenger));

        let dash = parse_tire_size("235/85-16").unwrap();
        assert_eq!(dash.construction, Construction::Diagonal);

        let half = parse_tire_size("LT235/85R16.5").unwrap();
        assert_eq!(half.rim_diameter_in, 16.5);
        assert_eq!(half.to_string(), "LT235/85R16.5");
    }

    #[test]
    fn test_parse_failures() {
        for bad in ["215x65", "", "215/65", "21/65R15", "215/65X15", "R15"] {
            let err = parse_tire_size(bad).unwrap_err();
            assert_eq!(err.error_code(), "PARSE_FAILURE", "{}", bad);
        }
        assert_eq!(parse_tire_size("215/05R15").unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_dimensions() {
        let size = parse_tire_size("215/65R15").unwrap();
        assert!((size.sidewall_mm() - 139.75).abs() < 1e-9);
        assert!((size.diameter_mm() - 660.5).abs() < 1e-9);
        assert!((size.diameter_in() - 26.003_937).abs() < 1e-5);
        assert!((size.revolutions_per_mile() - 775.6).abs() < 0.1);
    }

    #[test]
    fn test_comparison() {
        let input = TireInput {
            current: parse_tire_size("215/65R15").unwrap(),
            new: Some(parse_tire_size("225/60R16").unwrap()),
            indicated_speed: 60.0,
            tolerance_percent: 3.0,
        };
        let cmp = calculate(&input).unwrap().comparison.unwrap();
        // 225/60R16: 270 + 406.4 = 676.4 mm vs 660.5 mm
        let expected = (676.4 - 660.5) / 660.5 * 100.0;
        assert!((cmp.diameter_difference_percent - expected).abs() < 1e-9);
        assert!((cmp.actual_speed - 60.0 * 676.4 / 660.5).abs() < 1e-9);
        assert!(cmp.speedometer_error > 0.0);
        assert!(cmp.within_tolerance);
    }

    #[test]
    fn test_outside_tolerance() {
        let input = TireInput {
            current: parse_tire_size("215/65R15").unwrap(),
            new: Some(parse_tire_size("265/75R16").unwrap()),
            indicated_speed: 60.0,
            tolerance_percent: 3.0,
        };
        assert!(!calculate(&input).unwrap().comparison.unwrap().within_tolerance);
    }

    #[test]
    fn test_serde_as_string() {
        let json = r#"{"current":"215/65R15","new":null,"indicated_speed":60.0,"tolerance_percent":3.0}"#;
        let input: TireInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.current.width_mm, 215);
        let out = serde_json::to_string(&input).unwrap();
        assert!(out.contains("\"215/65R15\""));

        let bad = r#"{"current":"215x65","indicated_speed":60.0,"tolerance_percent":3.0}"#;
        assert!(serde_json::from_str::<TireInput>(bad).is_err());
    }

    #[test]
    fn test_from_raw() {
        let raw = RawInput::new().with("current", "215/65R15").with("new", "225/60R16");
        let input = TireInput::from_raw(&raw, &Settings::default()).unwrap();
        assert_eq!(input.indicated_speed, 60.0);
        assert!(input.new.is_some());

        let bad = RawInput::new().with("current", "215x65");
        assert_eq!(
            TireInput::from_raw(&bad, &Settings::default()).unwrap_err().error_code(),
            "PARSE_FAILURE"
        );
    }
}
