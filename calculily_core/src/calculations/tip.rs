//! # Tip Calculator
//!
//! Splits a restaurant bill plus tip across a party.
//!
//! ## Example
//!
//! ```rust
//! use calculily_core::calculations::tip::{calculate, TipInput};
//!
//! let input = TipInput { bill_amount: 85.0, tip_percent: 20.0, people: 4 };
//! let result = calculate(&input).unwrap();
//!
//! assert!((result.tip_amount - 17.0).abs() < 1e-9);
//! assert!((result.total - 102.0).abs() < 1e-9);
//! assert!((result.per_person - 25.5).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::format::{format_currency, SummaryLine};
use crate::input::RawInput;
use crate::settings::Settings;
use crate::validation::{ensure_finite, Validator};

/// Input parameters for the tip calculator.
///
/// ## JSON Example
///
/// ```json
/// { "bill_amount": 85.0, "tip_percent": 20.0, "people": 4 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipInput {
    /// Bill before tip
    pub bill_amount: f64,
    /// Tip as a percentage of the bill (0-100)
    pub tip_percent: f64,
    /// Number of people splitting the bill
    pub people: u32,
}

impl TipInput {
    pub fn validate(&self) -> CalcResult<()> {
        let mut v = Validator::new();
        v.positive("bill_amount", self.bill_amount);
        v.range("tip_percent", self.tip_percent, 0.0, 100.0);
        v.count("people", self.people, 1, 100);
        v.finish()
    }

    pub fn from_raw(raw: &RawInput, _settings: &Settings) -> CalcResult<Self> {
        let mut v = Validator::new();
        let bill_amount = raw.number(&mut v, "bill_amount");
        let tip_percent = raw.number_or(&mut v, "tip_percent", 15.0);
        let people = raw.count_or(&mut v, "people", 1);
        v.finish()?;
        Ok(TipInput {
            bill_amount: bill_amount.unwrap_or_default(),
            tip_percent,
            people,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipResult {
    pub tip_amount: f64,
    pub total: f64,
    pub per_person: f64,
    pub tip_per_person: f64,
}

impl TipResult {
    pub fn summary(&self, settings: &Settings) -> Vec<SummaryLine> {
        vec![
            SummaryLine::new("Tip", format_currency(self.tip_amount, settings)),
            SummaryLine::new("Total", format_currency(self.total, settings)),
            SummaryLine::new("Per person", format_currency(self.per_person, settings)),
            SummaryLine::new("Tip per person", format_currency(self.tip_per_person, settings)),
        ]
    }
}

pub fn calculate(input: &TipInput) -> CalcResult<TipResult> {
    input.validate()?;

    let people = f64::from(input.people);
    let tip_amount = input.bill_amount * input.tip_percent / 100.0;
    let total = input.bill_amount + tip_amount;
    ensure_finite("tip", &[("tip_amount", tip_amount), ("total", total)])?;

    Ok(TipResult {
        tip_amount,
        total,
        per_person: total / people,
        tip_per_person: tip_amount / people,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dinner() -> TipInput {
        TipInput {
            bill_amount: 85.0,
            tip_percent: 20.0,
            people: 4,
        }
    }

    #[test]
    fn test_split_four_ways() {
        let result = calculate(&dinner()).unwrap();
        assert!((result.tip_amount - 17.0).abs() < 1e-9);
        assert!((result.total - 102.0).abs() < 1e-9);
        assert!((result.per_person - 25.5).abs() < 1e-9);
        assert!((result.tip_per_person - 4.25).abs() < 1e-9);
    }

    #[test]
    fn test_summary_formatting() {
        let lines = calculate(&dinner()).unwrap().summary(&Settings::default());
        assert_eq!(lines[0].value, "$17.00");
        assert_eq!(lines[1].value, "$102.00");
        assert_eq!(lines[2].value, "$25.50");
    }

    #[test]
    fn test_huge_bill_fails_instead_of_overflowing() {
        let input = TipInput {
            bill_amount: 1e308,
            tip_percent: 100.0,
            people: 1,
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_zero_tip() {
        let mut input = dinner();
        input.tip_percent = 0.0;
        let result = calculate(&input).unwrap();
        assert_eq!(result.tip_amount, 0.0);
        assert!((result.total - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_inputs_all_reported() {
        let input = TipInput {
            bill_amount: -1.0,
            tip_percent: 150.0,
            people: 0,
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.issues().len(), 3);
    }

    #[test]
    fn test_from_raw_defaults() {
        let raw = RawInput::new().with("bill_amount", "40");
        let input = TipInput::from_raw(&raw, &Settings::default()).unwrap();
        assert_eq!(input.tip_percent, 15.0);
        assert_eq!(input.people, 1);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&dinner()).unwrap();
        let roundtrip: TipInput = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.people, 4);
    }
}
