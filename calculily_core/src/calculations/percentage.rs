//! # Percentage Calculator
//!
//! Four related identities:
//!
//! | Mode | Question | Formula |
//! |------|----------|---------|
//! | `PercentOf` | What is a% of b? | `a/100 × b` |
//! | `WhatPercent` | a is what % of b? | `a/b × 100` |
//! | `Increase` | % increase from a to b | `(b−a)/a × 100` |
//! | `Decrease` | % decrease from a to b | `(a−b)/a × 100` |
//!
//! Divisions by a zero denominator return [`CalcError::DivisionByZero`]
//! instead of producing infinity.
//!
//! ## Example
//!
//! ```rust
//! use calculily_core::calculations::percentage::{percent_of, what_percent};
//!
//! assert!((percent_of(20.0, 85.0) - 17.0).abs() < 1e-9);
//! assert!((what_percent(17.0, 85.0).unwrap() - 20.0).abs() < 1e-9);
//! assert!(what_percent(5.0, 0.0).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::format::{format_number, format_percent, SummaryLine};
use crate::input::RawInput;
use crate::settings::Settings;
use crate::validation::{ensure_finite, Validator};

/// `percent`% of `whole`
pub fn percent_of(percent: f64, whole: f64) -> f64 {
    percent / 100.0 * whole
}

/// `part` as a percentage of `whole`
pub fn what_percent(part: f64, whole: f64) -> CalcResult<f64> {
    if whole == 0.0 {
        return Err(CalcError::division_by_zero("whole"));
    }
    let value = part / whole * 100.0;
    ensure_finite("percentage", &[("percent", value)])?;
    Ok(value)
}

/// Percentage increase going from `from` to `to` (negative when it falls)
pub fn percent_increase(from: f64, to: f64) -> CalcResult<f64> {
    if from == 0.0 {
        return Err(CalcError::division_by_zero("from"));
    }
    let value = (to - from) / from * 100.0;
    ensure_finite("percentage", &[("percent", value)])?;
    Ok(value)
}

/// Percentage decrease going from `from` to `to` (negative when it rises)
pub fn percent_decrease(from: f64, to: f64) -> CalcResult<f64> {
    if from == 0.0 {
        return Err(CalcError::division_by_zero("from"));
    }
    let value = (from - to) / from * 100.0;
    ensure_finite("percentage", &[("percent", value)])?;
    Ok(value)
}

/// Which of the four questions is being asked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PercentageMode {
    #[default]
    PercentOf,
    WhatPercent,
    Increase,
    Decrease,
}

impl PercentageMode {
    pub const ALL: [PercentageMode; 4] = [
        PercentageMode::PercentOf,
        PercentageMode::WhatPercent,
        PercentageMode::Increase,
        PercentageMode::Decrease,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            PercentageMode::PercentOf => "percent-of",
            PercentageMode::WhatPercent => "what-percent",
            PercentageMode::Increase => "increase",
            PercentageMode::Decrease => "decrease",
        }
    }

    /// Field names of the two operands for this mode
    fn operand_names(&self) -> (&'static str, &'static str) {
        match self {
            PercentageMode::PercentOf => ("percent", "whole"),
            PercentageMode::WhatPercent => ("part", "whole"),
            PercentageMode::Increase | PercentageMode::Decrease => ("from", "to"),
        }
    }
}

impl fmt::Display for PercentageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for PercentageMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        PercentageMode::ALL
            .iter()
            .copied()
            .find(|m| m.slug() == wanted)
            .ok_or_else(|| CalcError::invalid_input("mode", s, "Unknown percentage mode"))
    }
}

/// Input for the percentage calculator.
///
/// ## JSON Example
///
/// ```json
/// { "mode": "Increase", "a": 80.0, "b": 100.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PercentageInput {
    pub mode: PercentageMode,
    /// First operand (percent, part, or starting value)
    pub a: f64,
    /// Second operand (whole or ending value)
    pub b: f64,
}

impl PercentageInput {
    pub fn validate(&self) -> CalcResult<()> {
        let (a_name, b_name) = self.mode.operand_names();
        let mut v = Validator::new();
        v.finite(a_name, self.a);
        v.finite(b_name, self.b);
        v.finish()
    }

    pub fn from_raw(raw: &RawInput, _settings: &Settings) -> CalcResult<Self> {
        let mut v = Validator::new();
        let mode = raw.choice_or(
            &mut v,
            "mode",
            &["percent-of", "what-percent", "increase", "decrease"],
            PercentageMode::PercentOf,
        );
        let (a_name, b_name) = mode.operand_names();
        let a = raw.number(&mut v, a_name);
        let b = raw.number(&mut v, b_name);
        v.finish()?;
        Ok(PercentageInput {
            mode,
            a: a.unwrap_or_default(),
            b: b.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PercentageResult {
    pub mode: PercentageMode,
    pub a: f64,
    pub b: f64,
    /// Answer: a plain number for `PercentOf`, a percentage otherwise
    pub value: f64,
}

impl PercentageResult {
    pub fn summary(&self, settings: &Settings) -> Vec<SummaryLine> {
        let dp = usize::from(settings.decimal_places);
        let (label, value) = match self.mode {
            PercentageMode::PercentOf => (
                format!("{}% of {}", format_number(self.a, dp), format_number(self.b, dp)),
                format_number(self.value, dp),
            ),
            PercentageMode::WhatPercent => (
                format!("{} is what % of {}", format_number(self.a, dp), format_number(self.b, dp)),
                format_percent(self.value, dp),
            ),
            PercentageMode::Increase => (
                format!("Increase from {} to {}", format_number(self.a, dp), format_number(self.b, dp)),
                format_percent(self.value, dp),
            ),
            PercentageMode::Decrease => (
                format!("Decrease from {} to {}", format_number(self.a, dp), format_number(self.b, dp)),
                format_percent(self.value, dp),
            ),
        };
        vec![SummaryLine::new(label, value)]
    }
}

pub fn calculate(input: &PercentageInput) -> CalcResult<PercentageResult> {
    input.validate()?;
    let value = match input.mode {
        PercentageMode::PercentOf => percent_of(input.a, input.b),
        PercentageMode::WhatPercent => what_percent(input.a, input.b)?,
        PercentageMode::Increase => percent_increase(input.a, input.b)?,
        PercentageMode::Decrease => percent_decrease(input.a, input.b)?,
    };
    ensure_finite("percentage", &[("value", value)])?;
    Ok(PercentageResult {
        mode: input.mode,
        a: input.a,
        b: input.b,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of() {
        assert!((percent_of(15.0, 200.0) - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_what_percent_identity() {
        for (part, whole) in [(1.0, 4.0), (50.0, 200.0), (-3.0, 12.0), (7.0, 3.0)] {
            assert_eq!(what_percent(part, whole).unwrap(), part / whole * 100.0);
        }
    }

    #[test]
    fn test_increase_and_decrease() {
        assert!((percent_increase(80.0, 100.0).unwrap() - 25.0).abs() < 1e-12);
        assert!((percent_decrease(100.0, 80.0).unwrap() - 20.0).abs() < 1e-12);
        assert!((percent_increase(100.0, 80.0).unwrap() + 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(what_percent(5.0, 0.0).unwrap_err(), CalcError::division_by_zero("whole"));
        assert_eq!(percent_increase(0.0, 5.0).unwrap_err().error_code(), "DIVISION_BY_ZERO");
        assert_eq!(percent_decrease(0.0, 5.0).unwrap_err().error_code(), "DIVISION_BY_ZERO");
    }

    #[test]
    fn test_overflow_is_reported() {
        assert_eq!(what_percent(1e308, 1e-308).unwrap_err().error_code(), "CALCULATION_FAILED");
        assert_eq!(percent_increase(1e-308, 1e308).unwrap_err().error_code(), "CALCULATION_FAILED");

        let input = PercentageInput {
            mode: PercentageMode::PercentOf,
            a: 1e308,
            b: 1e308,
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_from_raw_uses_mode_field_names() {
        let raw = RawInput::new().with("mode", "what percent").with("part", "17").with("whole", "85");
        let input = PercentageInput::from_raw(&raw, &Settings::default()).unwrap();
        let result = calculate(&input).unwrap();
        assert!((result.value - 20.0).abs() < 1e-12);
        assert_eq!(result.summary(&Settings::default())[0].value, "20.00%");
    }

    #[test]
    fn test_from_raw_missing_operand() {
        let raw = RawInput::new().with("mode", "increase").with("from", "10");
        let err = PercentageInput::from_raw(&raw, &Settings::default()).unwrap_err();
        assert_eq!(err.messages(), vec!["to is required".to_string()]);
    }
}
