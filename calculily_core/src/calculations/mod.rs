//! # Calculators
//!
//! Every calculator follows the same pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable), with `validate()` and
//!   `from_raw()` for form-style `key=value` input
//! - `*Result` - Calculation results (JSON-serializable), with `summary()`
//!   for formatted display
//! - `calculate(input) -> CalcResult<*Result>` - Pure calculation function
//!   that validates before computing
//!
//! ## Available Calculations
//!
//! Finance:
//! - [`percentage`] - Percent of, what percent, increase/decrease
//! - [`tip`] - Tip and bill splitting
//! - [`discount`] - Sale price and savings
//! - [`loan`] - Fixed-rate loan payment and amortization
//! - [`mortgage`] - Monthly housing payment with escrow and PMI
//!
//! Construction:
//! - [`concrete`] - Concrete volume and bag counts
//! - [`board_foot`] - Lumber board feet
//! - [`insulation`] - R-value targets and thickness
//! - [`spiral_stair`] - Spiral stair layout and code checks
//!
//! Electrical / HVAC:
//! - [`wire_gauge`] - Conductor size for voltage drop
//! - [`breaker`] - Breaker size for a load
//! - [`duct`] - Round duct size for airflow
//!
//! Automotive / Kitchen:
//! - [`tire`] - Tire size dimensions and comparison
//! - [`cooking`] - Recipe volume/weight conversion
//!
//! Unit conversion lives in [`crate::units`].

pub mod board_foot;
pub mod breaker;
pub mod concrete;
pub mod cooking;
pub mod discount;
pub mod duct;
pub mod insulation;
pub mod loan;
pub mod mortgage;
pub mod percentage;
pub mod spiral_stair;
pub mod tip;
pub mod tire;
pub mod wire_gauge;

use serde::{Deserialize, Serialize};

use crate::catalog::Calculator;
use crate::errors::CalcResult;
use crate::format::SummaryLine;
use crate::input::RawInput;
use crate::settings::Settings;
use crate::units::{self, ConversionInput, ConversionResult};

// Re-export commonly used types
pub use board_foot::{BoardFootInput, BoardFootResult};
pub use breaker::{BreakerInput, BreakerResult};
pub use concrete::{ConcreteInput, ConcreteResult};
pub use cooking::{CookingInput, CookingResult};
pub use discount::{DiscountInput, DiscountResult};
pub use duct::{DuctInput, DuctResult};
pub use insulation::{InsulationInput, InsulationResult};
pub use loan::{LoanInput, LoanResult};
pub use mortgage::{MortgageInput, MortgageResult};
pub use percentage::{PercentageInput, PercentageResult};
pub use spiral_stair::{SpiralStairInput, SpiralStairResult};
pub use tip::{TipInput, TipResult};
pub use tire::{TireInput, TireResult};
pub use wire_gauge::{WireGaugeInput, WireGaugeResult};

/// Enum wrapper for all calculation inputs.
///
/// Lets heterogeneous calculations travel through one JSON shape, tagged by
/// `"type"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    Percentage(PercentageInput),
    Tip(TipInput),
    Discount(DiscountInput),
    Loan(LoanInput),
    Mortgage(MortgageInput),
    Concrete(ConcreteInput),
    WireGauge(WireGaugeInput),
    Breaker(BreakerInput),
    Tire(TireInput),
    Duct(DuctInput),
    Insulation(InsulationInput),
    BoardFoot(BoardFootInput),
    SpiralStair(SpiralStairInput),
    Cooking(CookingInput),
    UnitConverter(ConversionInput),
}

impl CalculationItem {
    /// Build typed input for `calculator` from raw form fields.
    pub fn from_raw(calculator: Calculator, raw: &RawInput, settings: &Settings) -> CalcResult<Self> {
        let item = match calculator {
            Calculator::Percentage => CalculationItem::Percentage(PercentageInput::from_raw(raw, settings)?),
            Calculator::Tip => CalculationItem::Tip(TipInput::from_raw(raw, settings)?),
            Calculator::Discount => CalculationItem::Discount(DiscountInput::from_raw(raw, settings)?),
            Calculator::Loan => CalculationItem::Loan(LoanInput::from_raw(raw, settings)?),
            Calculator::Mortgage => CalculationItem::Mortgage(MortgageInput::from_raw(raw, settings)?),
            Calculator::Concrete => CalculationItem::Concrete(ConcreteInput::from_raw(raw, settings)?),
            Calculator::WireGauge => CalculationItem::WireGauge(WireGaugeInput::from_raw(raw, settings)?),
            Calculator::Breaker => CalculationItem::Breaker(BreakerInput::from_raw(raw, settings)?),
            Calculator::Tire => CalculationItem::Tire(TireInput::from_raw(raw, settings)?),
            Calculator::Duct => CalculationItem::Duct(DuctInput::from_raw(raw, settings)?),
            Calculator::Insulation => CalculationItem::Insulation(InsulationInput::from_raw(raw, settings)?),
            Calculator::BoardFoot => CalculationItem::BoardFoot(BoardFootInput::from_raw(raw, settings)?),
            Calculator::SpiralStair => CalculationItem::SpiralStair(SpiralStairInput::from_raw(raw, settings)?),
            Calculator::Cooking => CalculationItem::Cooking(CookingInput::from_raw(raw, settings)?),
            Calculator::UnitConverter => CalculationItem::UnitConverter(ConversionInput::from_raw(raw, settings)?),
        };
        Ok(item)
    }

    /// Which calculator this input belongs to
    pub fn calculator(&self) -> Calculator {
        match self {
            CalculationItem::Percentage(_) => Calculator::Percentage,
            CalculationItem::Tip(_) => Calculator::Tip,
            CalculationItem::Discount(_) => Calculator::Discount,
            CalculationItem::Loan(_) => Calculator::Loan,
            CalculationItem::Mortgage(_) => Calculator::Mortgage,
            CalculationItem::Concrete(_) => Calculator::Concrete,
            CalculationItem::WireGauge(_) => Calculator::WireGauge,
            CalculationItem::Breaker(_) => Calculator::Breaker,
            CalculationItem::Tire(_) => Calculator::Tire,
            CalculationItem::Duct(_) => Calculator::Duct,
            CalculationItem::Insulation(_) => Calculator::Insulation,
            CalculationItem::BoardFoot(_) => Calculator::BoardFoot,
            CalculationItem::SpiralStair(_) => Calculator::SpiralStair,
            CalculationItem::Cooking(_) => Calculator::Cooking,
            CalculationItem::UnitConverter(_) => Calculator::UnitConverter,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        self.calculator().metadata().name
    }

    /// Validate without computing
    pub fn validate(&self) -> CalcResult<()> {
        match self {
            CalculationItem::Percentage(i) => i.validate(),
            CalculationItem::Tip(i) => i.validate(),
            CalculationItem::Discount(i) => i.validate(),
            CalculationItem::Loan(i) => i.validate(),
            CalculationItem::Mortgage(i) => i.validate(),
            CalculationItem::Concrete(i) => i.validate(),
            CalculationItem::WireGauge(i) => i.validate(),
            CalculationItem::Breaker(i) => i.validate(),
            CalculationItem::Tire(i) => i.validate(),
            CalculationItem::Duct(i) => i.validate(),
            CalculationItem::Insulation(i) => i.validate(),
            CalculationItem::BoardFoot(i) => i.validate(),
            CalculationItem::SpiralStair(i) => i.validate(),
            CalculationItem::Cooking(i) => i.validate(),
            CalculationItem::UnitConverter(i) => i.validate(),
        }
    }

    /// Run the calculation.
    pub fn calculate(&self) -> CalcResult<CalculationOutput> {
        tracing::debug!(calculator = self.calculator().slug(), "running calculation");
        let output = match self {
            CalculationItem::Percentage(i) => CalculationOutput::Percentage(percentage::calculate(i)?),
            CalculationItem::Tip(i) => CalculationOutput::Tip(tip::calculate(i)?),
            CalculationItem::Discount(i) => CalculationOutput::Discount(discount::calculate(i)?),
            CalculationItem::Loan(i) => CalculationOutput::Loan(loan::calculate(i)?),
            CalculationItem::Mortgage(i) => CalculationOutput::Mortgage(mortgage::calculate(i)?),
            CalculationItem::Concrete(i) => CalculationOutput::Concrete(concrete::calculate(i)?),
            CalculationItem::WireGauge(i) => CalculationOutput::WireGauge(wire_gauge::calculate(i)?),
            CalculationItem::Breaker(i) => CalculationOutput::Breaker(breaker::calculate(i)?),
            CalculationItem::Tire(i) => CalculationOutput::Tire(tire::calculate(i)?),
            CalculationItem::Duct(i) => CalculationOutput::Duct(duct::calculate(i)?),
            CalculationItem::Insulation(i) => CalculationOutput::Insulation(insulation::calculate(i)?),
            CalculationItem::BoardFoot(i) => CalculationOutput::BoardFoot(board_foot::calculate(i)?),
            CalculationItem::SpiralStair(i) => CalculationOutput::SpiralStair(spiral_stair::calculate(i)?),
            CalculationItem::Cooking(i) => CalculationOutput::Cooking(cooking::calculate(i)?),
            CalculationItem::UnitConverter(i) => CalculationOutput::UnitConverter(units::calculate(i)?),
        };
        Ok(output)
    }
}

/// Enum wrapper for all calculation results, tagged like [`CalculationItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    Percentage(PercentageResult),
    Tip(TipResult),
    Discount(DiscountResult),
    Loan(LoanResult),
    Mortgage(MortgageResult),
    Concrete(ConcreteResult),
    WireGauge(WireGaugeResult),
    Breaker(BreakerResult),
    Tire(TireResult),
    Duct(DuctResult),
    Insulation(InsulationResult),
    BoardFoot(BoardFootResult),
    SpiralStair(SpiralStairResult),
    Cooking(CookingResult),
    UnitConverter(ConversionResult),
}

impl CalculationOutput {
    /// Formatted label/value lines for a result card
    pub fn summary(&self, settings: &Settings) -> Vec<SummaryLine> {
        match self {
            CalculationOutput::Percentage(r) => r.summary(settings),
            CalculationOutput::Tip(r) => r.summary(settings),
            CalculationOutput::Discount(r) => r.summary(settings),
            CalculationOutput::Loan(r) => r.summary(settings),
            CalculationOutput::Mortgage(r) => r.summary(settings),
            CalculationOutput::Concrete(r) => r.summary(settings),
            CalculationOutput::WireGauge(r) => r.summary(settings),
            CalculationOutput::Breaker(r) => r.summary(settings),
            CalculationOutput::Tire(r) => r.summary(settings),
            CalculationOutput::Duct(r) => r.summary(settings),
            CalculationOutput::Insulation(r) => r.summary(settings),
            CalculationOutput::BoardFoot(r) => r.summary(settings),
            CalculationOutput::SpiralStair(r) => r.summary(settings),
            CalculationOutput::Cooking(r) => r.summary(settings),
            CalculationOutput::UnitConverter(r) => r.summary(settings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_dispatch() {
        let settings = Settings::default();
        let raw = RawInput::new()
            .with("bill_amount", "85")
            .with("tip_percent", "20")
            .with("people", "4");
        let item = CalculationItem::from_raw(Calculator::Tip, &raw, &settings).unwrap();
        assert_eq!(item.calculator(), Calculator::Tip);

        let output = item.calculate().unwrap();
        let lines = output.summary(&settings);
        assert_eq!(lines[0].value, "$17.00");
        assert_eq!(lines[1].value, "$102.00");
        assert_eq!(lines[2].value, "$25.50");
    }

    #[test]
    fn test_every_calculator_reports_missing_fields() {
        let settings = Settings::default();
        for calculator in crate::catalog::ALL_CALCULATORS {
            let result = CalculationItem::from_raw(calculator, &RawInput::new(), &settings);
            assert!(result.is_err(), "{} accepted empty input", calculator.slug());
        }
    }

    #[test]
    fn test_item_json_roundtrip() {
        let json = r#"{"type":"WireGauge","amps":20.0,"distance_ft":100.0,"voltage":120.0,"max_drop_percent":3.0}"#;
        let item: CalculationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.calculator(), Calculator::WireGauge);

        let output = item.calculate().unwrap();
        let out_json = serde_json::to_string(&output).unwrap();
        assert!(out_json.starts_with(r#"{"type":"WireGauge""#));
    }

    #[test]
    fn test_invalid_item_does_not_compute() {
        let item = CalculationItem::Loan(LoanInput {
            principal: -5.0,
            annual_rate_percent: 5.0,
            term_months: 12,
        });
        assert!(item.validate().is_err());
        assert_eq!(item.calculate().unwrap_err().error_code(), "VALIDATION_FAILED");
    }
}
