//! # Unit Conversion Registry
//!
//! Every unit the calculators understand, grouped by measurement category.
//! Linear categories store a scalar factor to a base unit; temperature is
//! affine and goes through Celsius.
//!
//! | Category | Base unit |
//! |----------|-----------|
//! | Length | meter |
//! | Weight | kilogram |
//! | Volume | liter |
//! | Area | square meter |
//! | Speed | meter per second |
//! | Temperature | degree Celsius (affine) |
//!
//! ## Example
//!
//! ```rust
//! use calculily_core::units::{convert, Unit};
//!
//! let inches = convert(1.0, Unit::Foot, Unit::Inch).unwrap();
//! assert!((inches - 12.0).abs() < 1e-9);
//!
//! let f = convert(100.0, Unit::Celsius, Unit::Fahrenheit).unwrap();
//! assert!((f - 212.0).abs() < 1e-9);
//!
//! // Units are also parsed from text
//! let from: Unit = "lb".parse().unwrap();
//! assert_eq!(from, Unit::Pound);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::format::{format_number, SummaryLine};
use crate::input::RawInput;
use crate::settings::Settings;
use crate::validation::{ensure_finite, ValidationIssue, Validator};

// ============================================================================
// Categories
// ============================================================================

/// Measurement category. Conversion is only defined within one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConversionCategory {
    Length,
    Weight,
    Volume,
    Area,
    Temperature,
    Speed,
}

impl ConversionCategory {
    /// All categories in menu order
    pub const ALL: [ConversionCategory; 6] = [
        ConversionCategory::Length,
        ConversionCategory::Weight,
        ConversionCategory::Volume,
        ConversionCategory::Area,
        ConversionCategory::Temperature,
        ConversionCategory::Speed,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ConversionCategory::Length => "Length",
            ConversionCategory::Weight => "Weight",
            ConversionCategory::Volume => "Volume",
            ConversionCategory::Area => "Area",
            ConversionCategory::Temperature => "Temperature",
            ConversionCategory::Speed => "Speed",
        }
    }

    /// Base unit of the category (the unit whose factor is 1.0)
    pub fn base_unit(&self) -> Unit {
        match self {
            ConversionCategory::Length => Unit::Meter,
            ConversionCategory::Weight => Unit::Kilogram,
            ConversionCategory::Volume => Unit::Liter,
            ConversionCategory::Area => Unit::SquareMeter,
            ConversionCategory::Temperature => Unit::Celsius,
            ConversionCategory::Speed => Unit::MeterPerSecond,
        }
    }

    /// Units belonging to this category, for selection lists
    pub fn units(&self) -> Vec<Unit> {
        Unit::ALL
            .iter()
            .copied()
            .filter(|u| u.category() == *self)
            .collect()
    }
}

impl fmt::Display for ConversionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for ConversionCategory {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ConversionCategory::ALL
            .iter()
            .copied()
            .find(|c| c.display_name().to_ascii_lowercase() == wanted)
            .ok_or_else(|| CalcError::invalid_input("category", s, "Unknown measurement category"))
    }
}

// ============================================================================
// Units
// ============================================================================

/// A unit of measure known to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    // Length
    Millimeter,
    Centimeter,
    Meter,
    Kilometer,
    Inch,
    Foot,
    Yard,
    Mile,
    // Weight
    Milligram,
    Gram,
    Kilogram,
    MetricTon,
    Ounce,
    Pound,
    Stone,
    ShortTon,
    // Volume
    Milliliter,
    Liter,
    CubicMeter,
    Teaspoon,
    Tablespoon,
    FluidOunce,
    Cup,
    Pint,
    Quart,
    Gallon,
    CubicFoot,
    CubicYard,
    // Area
    SquareMillimeter,
    SquareCentimeter,
    SquareMeter,
    Hectare,
    SquareKilometer,
    SquareInch,
    SquareFoot,
    SquareYard,
    Acre,
    SquareMile,
    // Temperature
    Celsius,
    Fahrenheit,
    Kelvin,
    // Speed
    MeterPerSecond,
    KilometerPerHour,
    MilePerHour,
    Knot,
    FootPerSecond,
}

impl Unit {
    /// Every unit in the registry, grouped by category
    pub const ALL: [Unit; 46] = [
        Unit::Millimeter,
        Unit::Centimeter,
        Unit::Meter,
        Unit::Kilometer,
        Unit::Inch,
        Unit::Foot,
        Unit::Yard,
        Unit::Mile,
        Unit::Milligram,
        Unit::Gram,
        Unit::Kilogram,
        Unit::MetricTon,
        Unit::Ounce,
        Unit::Pound,
        Unit::Stone,
        Unit::ShortTon,
        Unit::Milliliter,
        Unit::Liter,
        Unit::CubicMeter,
        Unit::Teaspoon,
        Unit::Tablespoon,
        Unit::FluidOunce,
        Unit::Cup,
        Unit::Pint,
        Unit::Quart,
        Unit::Gallon,
        Unit::CubicFoot,
        Unit::CubicYard,
        Unit::SquareMillimeter,
        Unit::SquareCentimeter,
        Unit::SquareMeter,
        Unit::Hectare,
        Unit::SquareKilometer,
        Unit::SquareInch,
        Unit::SquareFoot,
        Unit::SquareYard,
        Unit::Acre,
        Unit::SquareMile,
        Unit::Celsius,
        Unit::Fahrenheit,
        Unit::Kelvin,
        Unit::MeterPerSecond,
        Unit::KilometerPerHour,
        Unit::MilePerHour,
        Unit::Knot,
        Unit::FootPerSecond,
    ];

    pub fn category(&self) -> ConversionCategory {
        use Unit::*;
        match self {
            Millimeter | Centimeter | Meter | Kilometer | Inch | Foot | Yard | Mile => {
                ConversionCategory::Length
            }
            Milligram | Gram | Kilogram | MetricTon | Ounce | Pound | Stone | ShortTon => {
                ConversionCategory::Weight
            }
            Milliliter | Liter | CubicMeter | Teaspoon | Tablespoon | FluidOunce | Cup | Pint
            | Quart | Gallon | CubicFoot | CubicYard => ConversionCategory::Volume,
            SquareMillimeter | SquareCentimeter | SquareMeter | Hectare | SquareKilometer
            | SquareInch | SquareFoot | SquareYard | Acre | SquareMile => ConversionCategory::Area,
            Celsius | Fahrenheit | Kelvin => ConversionCategory::Temperature,
            MeterPerSecond | KilometerPerHour | MilePerHour | Knot | FootPerSecond => {
                ConversionCategory::Speed
            }
        }
    }

    /// Multiplier from this unit to its category's base unit.
    ///
    /// `None` for temperature, which is affine and handled separately.
    pub fn factor_to_base(&self) -> Option<f64> {
        use Unit::*;
        let factor = match self {
            Millimeter => 0.001,
            Centimeter => 0.01,
            Meter => 1.0,
            Kilometer => 1000.0,
            Inch => 0.0254,
            Foot => 0.3048,
            Yard => 0.9144,
            Mile => 1609.344,

            Milligram => 1e-6,
            Gram => 0.001,
            Kilogram => 1.0,
            MetricTon => 1000.0,
            Ounce => 0.028_349_523_125,
            Pound => 0.453_592_37,
            Stone => 6.350_293_18,
            ShortTon => 907.184_74,

            Milliliter => 0.001,
            Liter => 1.0,
            CubicMeter => 1000.0,
            Teaspoon => 0.004_928_921_593_75,
            Tablespoon => 0.014_786_764_781_25,
            FluidOunce => 0.029_573_529_562_5,
            Cup => 0.236_588_236_5,
            Pint => 0.473_176_473,
            Quart => 0.946_352_946,
            Gallon => 3.785_411_784,
            CubicFoot => 28.316_846_592,
            CubicYard => 764.554_857_984,

            SquareMillimeter => 1e-6,
            SquareCentimeter => 1e-4,
            SquareMeter => 1.0,
            Hectare => 10_000.0,
            SquareKilometer => 1_000_000.0,
            SquareInch => 0.000_645_16,
            SquareFoot => 0.092_903_04,
            SquareYard => 0.836_127_36,
            Acre => 4_046.856_422_4,
            SquareMile => 2_589_988.110_336,

            Celsius | Fahrenheit | Kelvin => return None,

            MeterPerSecond => 1.0,
            KilometerPerHour => 1.0 / 3.6,
            MilePerHour => 0.447_04,
            Knot => 1852.0 / 3600.0,
            FootPerSecond => 0.3048,
        };
        Some(factor)
    }

    /// Short symbol used in formatted output (e.g. "ft", "cup", "°F")
    pub fn symbol(&self) -> &'static str {
        use Unit::*;
        match self {
            Millimeter => "mm",
            Centimeter => "cm",
            Meter => "m",
            Kilometer => "km",
            Inch => "in",
            Foot => "ft",
            Yard => "yd",
            Mile => "mi",
            Milligram => "mg",
            Gram => "g",
            Kilogram => "kg",
            MetricTon => "t",
            Ounce => "oz",
            Pound => "lb",
            Stone => "st",
            ShortTon => "ton",
            Milliliter => "ml",
            Liter => "l",
            CubicMeter => "m³",
            Teaspoon => "tsp",
            Tablespoon => "tbsp",
            FluidOunce => "fl oz",
            Cup => "cup",
            Pint => "pt",
            Quart => "qt",
            Gallon => "gal",
            CubicFoot => "ft³",
            CubicYard => "yd³",
            SquareMillimeter => "mm²",
            SquareCentimeter => "cm²",
            SquareMeter => "m²",
            Hectare => "ha",
            SquareKilometer => "km²",
            SquareInch => "in²",
            SquareFoot => "ft²",
            SquareYard => "yd²",
            Acre => "ac",
            SquareMile => "mi²",
            Celsius => "°C",
            Fahrenheit => "°F",
            Kelvin => "K",
            MeterPerSecond => "m/s",
            KilometerPerHour => "km/h",
            MilePerHour => "mph",
            Knot => "kn",
            FootPerSecond => "ft/s",
        }
    }

    pub fn display_name(&self) -> &'static str {
        use Unit::*;
        match self {
            Millimeter => "Millimeters",
            Centimeter => "Centimeters",
            Meter => "Meters",
            Kilometer => "Kilometers",
            Inch => "Inches",
            Foot => "Feet",
            Yard => "Yards",
            Mile => "Miles",
            Milligram => "Milligrams",
            Gram => "Grams",
            Kilogram => "Kilograms",
            MetricTon => "Metric Tons",
            Ounce => "Ounces",
            Pound => "Pounds",
            Stone => "Stone",
            ShortTon => "US Tons",
            Milliliter => "Milliliters",
            Liter => "Liters",
            CubicMeter => "Cubic Meters",
            Teaspoon => "Teaspoons",
            Tablespoon => "Tablespoons",
            FluidOunce => "Fluid Ounces",
            Cup => "Cups",
            Pint => "Pints",
            Quart => "Quarts",
            Gallon => "Gallons",
            CubicFoot => "Cubic Feet",
            CubicYard => "Cubic Yards",
            SquareMillimeter => "Square Millimeters",
            SquareCentimeter => "Square Centimeters",
            SquareMeter => "Square Meters",
            Hectare => "Hectares",
            SquareKilometer => "Square Kilometers",
            SquareInch => "Square Inches",
            SquareFoot => "Square Feet",
            SquareYard => "Square Yards",
            Acre => "Acres",
            SquareMile => "Square Miles",
            Celsius => "Celsius",
            Fahrenheit => "Fahrenheit",
            Kelvin => "Kelvin",
            MeterPerSecond => "Meters per Second",
            KilometerPerHour => "Kilometers per Hour",
            MilePerHour => "Miles per Hour",
            Knot => "Knots",
            FootPerSecond => "Feet per Second",
        }
    }

    /// Extra spellings accepted by `from_str`, besides symbol and display name
    fn aliases(&self) -> &'static [&'static str] {
        use Unit::*;
        match self {
            Millimeter => &["millimeter", "millimetre"],
            Centimeter => &["centimeter", "centimetre"],
            Meter => &["meter", "metre", "meters", "metres"],
            Kilometer => &["kilometer", "kilometre"],
            Inch => &["inch", "inches", "\""],
            Foot => &["foot", "feet", "'"],
            Yard => &["yard"],
            Mile => &["mile"],
            Milligram => &["milligram"],
            Gram => &["gram", "grams"],
            Kilogram => &["kilogram", "kgs"],
            MetricTon => &["tonne", "tonnes", "metric ton"],
            Ounce => &["ounce"],
            Pound => &["pound", "lbs"],
            Stone => &["stones"],
            ShortTon => &["tons", "us ton", "short ton"],
            Milliliter => &["milliliter", "millilitre"],
            Liter => &["liter", "litre", "litres", "liters"],
            CubicMeter => &["m3", "cubic meter"],
            Teaspoon => &["teaspoon"],
            Tablespoon => &["tablespoon", "tbs"],
            FluidOunce => &["fl_oz", "floz", "fluid ounce"],
            Cup => &["cups"],
            Pint => &["pint", "pints"],
            Quart => &["quart", "quarts"],
            Gallon => &["gallon", "gallons"],
            CubicFoot => &["ft3", "cu ft", "cubic foot"],
            CubicYard => &["yd3", "cu yd", "cubic yard"],
            SquareMillimeter => &["mm2"],
            SquareCentimeter => &["cm2"],
            SquareMeter => &["m2", "sq m", "square meter"],
            Hectare => &["hectare"],
            SquareKilometer => &["km2"],
            SquareInch => &["in2", "sq in", "square inch"],
            SquareFoot => &["ft2", "sq ft", "square foot"],
            SquareYard => &["yd2", "sq yd", "square yard"],
            Acre => &["acre"],
            SquareMile => &["mi2", "sq mi", "square mile"],
            Celsius => &["c", "degc", "centigrade"],
            Fahrenheit => &["f", "degf"],
            Kelvin => &["kelvins"],
            MeterPerSecond => &["mps", "m/sec"],
            KilometerPerHour => &["kph", "kmh"],
            MilePerHour => &["mi/h"],
            Knot => &["knot", "kt", "kts"],
            FootPerSecond => &["fps"],
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Unit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        // Symbols are case-sensitive for "t" (tonne) vs "T"; match exact first
        if let Some(unit) = Unit::ALL.iter().find(|u| u.symbol() == wanted) {
            return Ok(*unit);
        }
        let lower = wanted.to_lowercase();
        Unit::ALL
            .iter()
            .copied()
            .find(|u| {
                u.symbol().to_lowercase() == lower
                    || u.display_name().to_lowercase() == lower
                    || u.aliases().iter().any(|a| *a == lower)
            })
            .ok_or_else(|| CalcError::unknown_unit(s))
    }
}

// ============================================================================
// Conversion
// ============================================================================

fn to_celsius(value: f64, unit: Unit) -> f64 {
    match unit {
        Unit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        Unit::Kelvin => value - 273.15,
        _ => value,
    }
}

fn from_celsius(celsius: f64, unit: Unit) -> f64 {
    match unit {
        Unit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        Unit::Kelvin => celsius + 273.15,
        _ => celsius,
    }
}

/// Convert `value` from one unit to another within the same category.
///
/// # Errors
///
/// * `CalcError::IncompatibleUnits` - units belong to different categories
/// * `CalcError::InvalidInput` - value is NaN or infinite
/// * `CalcError::CalculationFailed` - the converted value overflows `f64`
pub fn convert(value: f64, from: Unit, to: Unit) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input("value", value.to_string(), "Value must be a finite number"));
    }
    let category = from.category();
    if category != to.category() {
        return Err(CalcError::IncompatibleUnits {
            from: from.symbol().to_string(),
            from_category: category.to_string(),
            to: to.symbol().to_string(),
            to_category: to.category().to_string(),
        });
    }
    if from == to {
        return Ok(value);
    }

    let result = match (from.factor_to_base(), to.factor_to_base()) {
        (Some(from_factor), Some(to_factor)) => value * from_factor / to_factor,
        _ => from_celsius(to_celsius(value, from), to),
    };
    ensure_finite("unit conversion", &[("result", result)])?;
    Ok(result)
}

/// Parse both unit names and convert.
pub fn convert_named(value: f64, from: &str, to: &str) -> CalcResult<f64> {
    let from: Unit = from.parse()?;
    let to: Unit = to.parse()?;
    convert(value, from, to)
}

/// Input for the unit converter calculator.
///
/// ## JSON Example
///
/// ```json
/// { "value": 10.0, "from": "Foot", "to": "Meter" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionInput {
    pub value: f64,
    pub from: Unit,
    pub to: Unit,
}

impl ConversionInput {
    pub fn validate(&self) -> CalcResult<()> {
        let mut v = Validator::new();
        v.finite("value", self.value);
        let (from, to) = (self.from.category(), self.to.category());
        if from != to {
            v.push(ValidationIssue::CrossField {
                field: "to".to_string(),
                other: "from".to_string(),
                reason: format!("Cannot convert {} to {}", from.display_name(), to.display_name()),
            });
        }
        v.finish()
    }

    pub fn from_raw(raw: &RawInput, _settings: &Settings) -> CalcResult<Self> {
        let mut v = Validator::new();
        let value = raw.number(&mut v, "value");
        let from = raw.choice::<Unit>(&mut v, "from", &["a unit symbol or name"]);
        let to = raw.choice::<Unit>(&mut v, "to", &["a unit symbol or name"]);
        v.finish()?;
        Ok(ConversionInput {
            value: value.unwrap_or_default(),
            from: from.unwrap_or(Unit::Meter),
            to: to.unwrap_or(Unit::Meter),
        })
    }
}

/// Result of a unit conversion, with both units echoed for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    pub category: ConversionCategory,
    pub value: f64,
    pub from: Unit,
    pub to: Unit,
    pub result: f64,
}

impl ConversionResult {
    /// Extra precision for small results so they do not round to zero
    pub fn summary(&self, settings: &Settings) -> Vec<SummaryLine> {
        let dp = usize::from(settings.decimal_places);
        let result_dp = if self.result != 0.0 && self.result.abs() < 1.0 { dp + 4 } else { dp };
        vec![
            SummaryLine::new(
                format!("{} {}", format_number(self.value, dp), self.from.symbol()),
                format!("{} {}", format_number(self.result, result_dp), self.to.symbol()),
            ),
            SummaryLine::new("Category", self.category.display_name()),
        ]
    }
}

/// Run a conversion as a calculator.
pub fn calculate(input: &ConversionInput) -> CalcResult<ConversionResult> {
    input.validate()?;
    let result = convert(input.value, input.from, input.to)?;
    Ok(ConversionResult {
        category: input.from.category(),
        value: input.value,
        from: input.from,
        to: input.to,
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_feet_to_inches() {
        assert!(approx(convert(10.0, Unit::Foot, Unit::Inch).unwrap(), 120.0));
    }

    #[test]
    fn test_miles_to_kilometers() {
        assert!(approx(convert(1.0, Unit::Mile, Unit::Kilometer).unwrap(), 1.609344));
    }

    #[test]
    fn test_cups_to_tablespoons() {
        assert!(approx(convert(1.0, Unit::Cup, Unit::Tablespoon).unwrap(), 16.0));
        assert!(approx(convert(1.0, Unit::Tablespoon, Unit::Teaspoon).unwrap(), 3.0));
    }

    #[test]
    fn test_acre_to_square_feet() {
        assert!(approx(convert(1.0, Unit::Acre, Unit::SquareFoot).unwrap(), 43_560.0));
    }

    #[test]
    fn test_temperature() {
        assert!(approx(convert(212.0, Unit::Fahrenheit, Unit::Celsius).unwrap(), 100.0));
        assert!(approx(convert(0.0, Unit::Celsius, Unit::Kelvin).unwrap(), 273.15));
        assert!(approx(convert(-40.0, Unit::Fahrenheit, Unit::Celsius).unwrap(), -40.0));
        assert!(approx(convert(300.0, Unit::Kelvin, Unit::Fahrenheit).unwrap(), 80.33));
    }

    #[test]
    fn test_round_trip_every_pair() {
        for category in ConversionCategory::ALL {
            let units = category.units();
            for a in &units {
                for b in &units {
                    let x = 37.5;
                    let there = convert(x, *a, *b).unwrap();
                    let back = convert(there, *b, *a).unwrap();
                    assert!((back - x).abs() < 1e-6, "{} -> {} -> {}: {}", a, b, a, back);
                }
            }
        }
    }

    #[test]
    fn test_cross_category_rejected() {
        let err = convert(1.0, Unit::Foot, Unit::Pound).unwrap_err();
        assert_eq!(err.error_code(), "INCOMPATIBLE_UNITS");
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(convert(f64::NAN, Unit::Foot, Unit::Inch).is_err());
    }

    #[test]
    fn test_linear_factors_positive() {
        for unit in Unit::ALL {
            match unit.factor_to_base() {
                Some(f) => assert!(f > 0.0, "{:?}", unit),
                None => assert_eq!(unit.category(), ConversionCategory::Temperature),
            }
        }
    }

    #[test]
    fn test_base_unit_factor_is_one() {
        for category in ConversionCategory::ALL {
            if category == ConversionCategory::Temperature {
                continue;
            }
            assert_eq!(category.base_unit().factor_to_base(), Some(1.0));
        }
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("ft".parse::<Unit>().unwrap(), Unit::Foot);
        assert_eq!("Feet".parse::<Unit>().unwrap(), Unit::Foot);
        assert_eq!("TBSP".parse::<Unit>().unwrap(), Unit::Tablespoon);
        assert_eq!("F".parse::<Unit>().unwrap(), Unit::Fahrenheit);
        assert_eq!("t".parse::<Unit>().unwrap(), Unit::MetricTon);
        assert_eq!("sq ft".parse::<Unit>().unwrap(), Unit::SquareFoot);
        assert!("furlong".parse::<Unit>().is_err());
    }

    #[test]
    fn test_convert_named() {
        assert!(approx(convert_named(2.0, "lb", "oz").unwrap(), 32.0));
        assert_eq!(convert_named(2.0, "lb", "parsec").unwrap_err().error_code(), "UNKNOWN_UNIT");
    }

    #[test]
    fn test_category_units() {
        let temps = ConversionCategory::Temperature.units();
        assert_eq!(temps, vec![Unit::Celsius, Unit::Fahrenheit, Unit::Kelvin]);
        assert_eq!("volume".parse::<ConversionCategory>().unwrap(), ConversionCategory::Volume);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Unit::CubicYard).unwrap();
        assert_eq!(json, "\"CubicYard\"");
        let roundtrip: Unit = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, Unit::CubicYard);
    }

    #[test]
    fn test_converter_calculator() {
        let raw = RawInput::new().with("value", "10").with("from", "ft").with("to", "m");
        let input = ConversionInput::from_raw(&raw, &Settings::default()).unwrap();
        let result = calculate(&input).unwrap();
        assert!(approx(result.result, 3.048));
        assert_eq!(result.category, ConversionCategory::Length);
        assert_eq!(result.summary(&Settings::default())[0].value, "3.05 m");
    }

    #[test]
    fn test_converter_rejects_mixed_categories() {
        let input = ConversionInput {
            value: 1.0,
            from: Unit::Foot,
            to: Unit::Pound,
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.issues()[0].code(), "CROSS_FIELD");
    }

    #[test]
    fn test_overflowing_conversion_fails() {
        let input = ConversionInput {
            value: 1e308,
            from: Unit::Mile,
            to: Unit::Millimeter,
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "CALCULATION_FAILED");
        assert_eq!(
            convert(1e308, Unit::Mile, Unit::Millimeter).unwrap_err().error_code(),
            "CALCULATION_FAILED"
        );
    }
}
