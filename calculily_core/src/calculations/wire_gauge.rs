//! # Wire Gauge Calculator
//!
//! Sizes a branch-circuit conductor for voltage drop and ampacity.
//!
//! ## Voltage Drop Sizing
//!
//! ```text
//! CM = M × K × D × I / (V × drop)
//! ```
//!
//! Where:
//! - `M` = 2 for single-phase (out and back), √3 for three-phase
//! - `K` = resistivity constant (12.9 copper, 21.2 aluminum, Ω·cmil/ft)
//! - `D` = one-way length (ft)
//! - `I` = load current (A)
//! - `V` = source voltage
//! - `drop` = allowed drop as a fraction (3% → 0.03)
//!
//! The conductor is the smallest standard size whose area covers `CM` and
//! whose 75 °C ampacity (with NEC 240.4(D) limits) covers the load. The
//! drop is then recomputed with the chosen conductor's actual area.
//!
//! ## Example
//!
//! ```rust
//! use calculily_core::calculations::wire_gauge::{calculate, Phase, WireGaugeInput};
//! use calculily_core::tables::{Conductor, Recommendation, WireGauge};
//!
//! let input = WireGaugeInput {
//!     amps: 20.0,
//!     distance_ft: 100.0,
//!     voltage: 120.0,
//!     max_drop_percent: 3.0,
//!     conductor: Conductor::Copper,
//!     phase: Phase::Single,
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.gauge, Recommendation::Standard(WireGauge::Awg8));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::format::{format_percent, format_with_unit, SummaryLine};
use crate::input::RawInput;
use crate::settings::Settings;
use crate::tables::conductors::{gauge_for_circular_mils, gauge_for_overcurrent, CONDUCTOR_SENTINEL};
use crate::tables::{Conductor, Recommendation, WireGauge};
use crate::validation::Validator;

/// Supply system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Phase {
    #[default]
    Single,
    Three,
}

impl Phase {
    /// Circuit length multiplier `M`
    pub fn multiplier(&self) -> f64 {
        match self {
            Phase::Single => 2.0,
            Phase::Three => 3.0_f64.sqrt(),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Phase::Single => "Single-phase",
            Phase::Three => "Three-phase",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Phase {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "single" | "single-phase" | "1ph" => Ok(Phase::Single),
            "3" | "three" | "three-phase" | "3ph" => Ok(Phase::Three),
            _ => Err(CalcError::invalid_input("phase", s, "Expected single or three")),
        }
    }
}

/// Which requirement set the conductor size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizingLimit {
    VoltageDrop,
    Ampacity,
}

/// Input parameters for wire sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "amps": 20.0,
///   "distance_ft": 100.0,
///   "voltage": 120.0,
///   "max_drop_percent": 3.0,
///   "conductor": "Copper",
///   "phase": "Single"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireGaugeInput {
    /// Load current (A)
    pub amps: f64,
    /// One-way run length (ft)
    pub distance_ft: f64,
    pub voltage: f64,
    /// Allowed voltage drop, percent of source voltage
    pub max_drop_percent: f64,
    #[serde(default)]
    pub conductor: Conductor,
    #[serde(default)]
    pub phase: Phase,
}

impl WireGaugeInput {
    pub fn validate(&self) -> CalcResult<()> {
        let mut v = Validator::new();
        v.positive_max("amps", self.amps, 1_000.0);
        v.positive_max("distance_ft", self.distance_ft, 5_000.0);
        v.range("voltage", self.voltage, 1.0, 1_000.0);
        v.positive_max("max_drop_percent", self.max_drop_percent, 10.0);
        v.finish()
    }

    /// Allowed drop defaults to the configured percentage.
    pub fn from_raw(raw: &RawInput, settings: &Settings) -> CalcResult<Self> {
        let mut v = Validator::new();
        let amps = raw.number(&mut v, "amps");
        let distance_ft = raw.number(&mut v, "distance_ft");
        let voltage = raw.number_or(&mut v, "voltage", 120.0);
        let max_drop_percent = raw.number_or(&mut v, "max_drop_percent", settings.voltage_drop_percent);
        let conductor = raw.choice_or(&mut v, "conductor", &["copper", "aluminum"], Conductor::Copper);
        let phase = raw.choice_or(&mut v, "phase", &["single", "three"], Phase::Single);
        v.finish()?;
        Ok(WireGaugeInput {
            amps: amps.unwrap_or_default(),
            distance_ft: distance_ft.unwrap_or_default(),
            voltage,
            max_drop_percent,
            conductor,
            phase,
        })
    }

    /// `M × K × D × I`, the numerator shared by sizing and drop
    fn drop_factor(&self) -> f64 {
        self.phase.multiplier() * self.conductor.resistivity_k() * self.distance_ft * self.amps
    }

    /// Circular mils needed to stay within the allowed drop
    pub fn required_circular_mils(&self) -> f64 {
        self.drop_factor() / (self.voltage * self.max_drop_percent / 100.0)
    }

    /// Voltage drop across a conductor of the given area
    pub fn drop_volts(&self, circular_mils: f64) -> f64 {
        self.drop_factor() / circular_mils
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireGaugeResult {
    pub required_circular_mils: f64,
    pub gauge: Recommendation<WireGauge>,
    /// Set when a standard gauge was found
    pub limited_by: Option<SizingLimit>,
    pub allowed_drop_volts: f64,
    /// Drop with the selected conductor
    pub actual_drop_volts: Option<f64>,
    pub actual_drop_percent: Option<f64>,
    /// Voltage at the load with the selected conductor
    pub voltage_at_load: Option<f64>,
}

impl WireGaugeResult {
    pub fn summary(&self, settings: &Settings) -> Vec<SummaryLine> {
        let dp = usize::from(settings.decimal_places);
        let mut lines = vec![
            SummaryLine::new("Recommended wire", self.gauge.to_string()),
            SummaryLine::new("Required area", format_with_unit(self.required_circular_mils, 0, "cmil")),
            SummaryLine::new("Allowed drop", format_with_unit(self.allowed_drop_volts, dp, "V")),
        ];
        if let (Some(volts), Some(percent)) = (self.actual_drop_volts, self.actual_drop_percent) {
            lines.push(SummaryLine::new(
                "Actual drop",
                format!("{} ({})", format_with_unit(volts, dp, "V"), format_percent(percent, dp)),
            ));
        }
        if let Some(volts) = self.voltage_at_load {
            lines.push(SummaryLine::new("Voltage at load", format_with_unit(volts, dp, "V")));
        }
        if let Some(limit) = self.limited_by {
            let reason = match limit {
                SizingLimit::VoltageDrop => "Voltage drop",
                SizingLimit::Ampacity => "Ampacity",
            };
            lines.push(SummaryLine::new("Sized by", reason));
        }
        lines
    }
}

pub fn calculate(input: &WireGaugeInput) -> CalcResult<WireGaugeResult> {
    input.validate()?;

    let required = input.required_circular_mils();
    let allowed_drop_volts = input.voltage * input.max_drop_percent / 100.0;

    let by_drop = gauge_for_circular_mils(required);
    let by_ampacity = gauge_for_overcurrent(input.amps, input.conductor);

    let selected = match (by_drop.standard(), by_ampacity.standard()) {
        (Some(drop), Some(amp)) if amp > drop => Some((*amp, SizingLimit::Ampacity)),
        (Some(drop), Some(_)) => Some((*drop, SizingLimit::VoltageDrop)),
        _ => None,
    };

    let Some((gauge, limit)) = selected else {
        tracing::warn!(required, amps = input.amps, "no standard conductor for circuit");
        return Ok(WireGaugeResult {
            required_circular_mils: required,
            gauge: Recommendation::BeyondTable(CONDUCTOR_SENTINEL.to_string()),
            limited_by: None,
            allowed_drop_volts,
            actual_drop_volts: None,
            actual_drop_percent: None,
            voltage_at_load: None,
        });
    };

    // Second pass: the real drop with the conductor actually chosen
    let actual = input.drop_volts(gauge.circular_mils());
    tracing::debug!(required, %gauge, actual, "sized conductor");

    Ok(WireGaugeResult {
        required_circular_mils: required,
        gauge: Recommendation::Standard(gauge),
        limited_by: Some(limit),
        allowed_drop_volts,
        actual_drop_volts: Some(actual),
        actual_drop_percent: Some(actual / input.voltage * 100.0),
        voltage_at_load: Some(input.voltage - actual),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch_circuit() -> WireGaugeInput {
        WireGaugeInput {
            amps: 20.0,
            distance_ft: 100.0,
            voltage: 120.0,
            max_drop_percent: 3.0,
            conductor: Conductor::Copper,
            phase: Phase::Single,
        }
    }

    #[test]
    fn test_hundred_foot_twenty_amp_run() {
        let result = calculate(&branch_circuit()).unwrap();
        // 2 × 12.9 × 100 × 20 / (120 × 0.03) = 14,333 cmil
        assert!((result.required_circular_mils - 14_333.33).abs() < 0.01);
        assert_eq!(result.gauge, Recommendation::Standard(WireGauge::Awg8));
        assert_eq!(result.limited_by, Some(SizingLimit::VoltageDrop));
        // 51,600 / 16,510 = 3.125 V
        assert!((result.actual_drop_volts.unwrap() - 3.1254).abs() < 1e-3);
        assert!(result.actual_drop_volts.unwrap() <= result.allowed_drop_volts);
    }

    #[test]
    fn test_short_run_sized_by_ampacity() {
        let mut input = branch_circuit();
        input.distance_ft = 10.0;
        let result = calculate(&input).unwrap();
        // Drop alone would allow 14 AWG, but 20 A needs 12 AWG
        assert_eq!(result.gauge, Recommendation::Standard(WireGauge::Awg12));
        assert_eq!(result.limited_by, Some(SizingLimit::Ampacity));
    }

    #[test]
    fn test_three_phase_needs_less_copper() {
        let single = calculate(&branch_circuit()).unwrap();
        let mut input = branch_circuit();
        input.phase = Phase::Three;
        let three = calculate(&input).unwrap();
        let ratio = three.required_circular_mils / single.required_circular_mils;
        assert!((ratio - 3.0_f64.sqrt() / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_aluminum_needs_more_area() {
        let mut input = branch_circuit();
        input.conductor = Conductor::Aluminum;
        let result = calculate(&input).unwrap();
        assert!(result.required_circular_mils > 23_000.0);
        assert_eq!(result.gauge, Recommendation::Standard(WireGauge::Awg6));
    }

    #[test]
    fn test_beyond_table() {
        let mut input = branch_circuit();
        input.amps = 900.0;
        input.distance_ft = 4_000.0;
        let result = calculate(&input).unwrap();
        assert_eq!(result.gauge.to_string(), "Consult electrician");
        assert!(result.actual_drop_volts.is_none());
    }

    #[test]
    fn test_validation_ranges() {
        let input = WireGaugeInput {
            amps: 0.0,
            distance_ft: 6_000.0,
            voltage: 0.5,
            max_drop_percent: 12.0,
            conductor: Conductor::Copper,
            phase: Phase::Single,
        };
        assert_eq!(calculate(&input).unwrap_err().issues().len(), 4);
    }

    #[test]
    fn test_from_raw_uses_default_drop() {
        let raw = RawInput::new()
            .with("amps", "20")
            .with("distance_ft", "100")
            .with("phase", "3");
        let input = WireGaugeInput::from_raw(&raw, &Settings::default()).unwrap();
        assert_eq!(input.max_drop_percent, 3.0);
        assert_eq!(input.voltage, 120.0);
        assert_eq!(input.phase, Phase::Three);
    }
}
