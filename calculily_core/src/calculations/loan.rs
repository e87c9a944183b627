//! # Loan / Amortization Calculator
//!
//! Fixed-rate, fully amortizing loan with monthly payments.
//!
//! ```text
//! payment = P·r·(1+r)^n / ((1+r)^n − 1)     r > 0
//! payment = P / n                           r = 0
//! ```
//!
//! where `P` is the principal, `r` the monthly rate (annual % / 1200) and
//! `n` the number of monthly payments.
//!
//! ## Example
//!
//! ```rust
//! use calculily_core::calculations::loan::{calculate, LoanInput};
//!
//! let input = LoanInput { principal: 12_000.0, annual_rate_percent: 0.0, term_months: 24 };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.monthly_payment, 500.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::format::{format_currency, SummaryLine};
use crate::input::RawInput;
use crate::settings::Settings;
use crate::validation::{ensure_finite, Validator};

/// Longest term accepted (50 years)
pub const MAX_TERM_MONTHS: u32 = 600;

/// Level monthly payment for a fully amortizing loan.
///
/// `(1+r)^n − 1` is evaluated as `exp_m1(n·ln_1p(r))` so rates too small to
/// move `1 + r` still produce a payment. When it is exactly zero the
/// principal is divided evenly.
pub fn monthly_payment(principal: f64, monthly_rate: f64, months: u32) -> f64 {
    let n = f64::from(months);
    let growth_less_one = (n * monthly_rate.ln_1p()).exp_m1();
    if growth_less_one == 0.0 {
        return principal / n;
    }
    principal * monthly_rate * (growth_less_one + 1.0) / growth_less_one
}

/// Input parameters for a loan.
///
/// ## JSON Example
///
/// ```json
/// { "principal": 25000.0, "annual_rate_percent": 6.5, "term_months": 60 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed
    pub principal: f64,
    /// Nominal annual interest rate, percent (0-100)
    pub annual_rate_percent: f64,
    /// Number of monthly payments (1-600)
    pub term_months: u32,
}

impl LoanInput {
    pub fn validate(&self) -> CalcResult<()> {
        let mut v = Validator::new();
        v.positive("principal", self.principal);
        v.range("annual_rate_percent", self.annual_rate_percent, 0.0, 100.0);
        v.count("term_months", self.term_months, 1, MAX_TERM_MONTHS);
        v.finish()
    }

    /// Accepts the term as `term_months` or `term_years`.
    pub fn from_raw(raw: &RawInput, _settings: &Settings) -> CalcResult<Self> {
        let mut v = Validator::new();
        let principal = raw.number(&mut v, "principal");
        let annual_rate_percent = raw.number(&mut v, "annual_rate_percent");
        let term_months = match raw.get("term_years") {
            Some(_) => raw.count(&mut v, "term_years").map(|years| years.saturating_mul(12)),
            None => raw.count(&mut v, "term_months"),
        };
        v.finish()?;
        Ok(LoanInput {
            principal: principal.unwrap_or_default(),
            annual_rate_percent: annual_rate_percent.unwrap_or_default(),
            term_months: term_months.unwrap_or_default(),
        })
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }
}

/// One month of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanResult {
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    pub term_months: u32,
}

impl LoanResult {
    pub fn summary(&self, settings: &Settings) -> Vec<SummaryLine> {
        vec![
            SummaryLine::new("Monthly payment", format_currency(self.monthly_payment, settings)),
            SummaryLine::new("Total paid", format_currency(self.total_paid, settings)),
            SummaryLine::new("Total interest", format_currency(self.total_interest, settings)),
            SummaryLine::new("Payments", self.term_months.to_string()),
        ]
    }
}

pub fn calculate(input: &LoanInput) -> CalcResult<LoanResult> {
    input.validate()?;

    let payment = monthly_payment(input.principal, input.monthly_rate(), input.term_months);
    let total_paid = payment * f64::from(input.term_months);
    ensure_finite("loan", &[("monthly_payment", payment), ("total_paid", total_paid)])?;

    Ok(LoanResult {
        monthly_payment: payment,
        total_paid,
        total_interest: total_paid - input.principal,
        term_months: input.term_months,
    })
}

/// Month-by-month breakdown of a loan.
///
/// The final payment absorbs floating-point residue so the schedule ends
/// at a balance of exactly zero.
pub fn amortization_schedule(input: &LoanInput) -> CalcResult<Vec<AmortizationRow>> {
    input.validate()?;

    let rate = input.monthly_rate();
    let payment = monthly_payment(input.principal, rate, input.term_months);
    let mut balance = input.principal;
    let mut rows = Vec::with_capacity(input.term_months as usize);

    for month in 1..=input.term_months {
        let interest = balance * rate;
        let (principal, payment) = if month == input.term_months {
            (balance, balance + interest)
        } else {
            (payment - interest, payment)
        };
        balance -= principal;
        rows.push(AmortizationRow {
            month,
            payment,
            principal,
            interest,
            balance: if month == input.term_months { 0.0 } else { balance },
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car_loan() -> LoanInput {
        LoanInput {
            principal: 25_000.0,
            annual_rate_percent: 6.0,
            term_months: 60,
        }
    }

    #[test]
    fn test_standard_payment() {
        // 25,000 at 6% for 60 months = 483.32/month
        let result = calculate(&car_loan()).unwrap();
        assert!((result.monthly_payment - 483.32).abs() < 0.01);
        assert!((result.total_interest - 3999.20).abs() < 1.0);
    }

    #[test]
    fn test_zero_rate_divides_evenly() {
        let input = LoanInput {
            principal: 10_000.0,
            annual_rate_percent: 0.0,
            term_months: 40,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.monthly_payment, input.principal / f64::from(input.term_months));
        assert!(result.monthly_payment.is_finite());
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_overflow_is_reported() {
        let input = LoanInput {
            principal: 1e308,
            annual_rate_percent: 100.0,
            term_months: MAX_TERM_MONTHS,
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_tiny_rate_matches_even_split() {
        let input = LoanInput {
            principal: 12_000.0,
            annual_rate_percent: 1e-15,
            term_months: 24,
        };
        let result = calculate(&input).unwrap();
        assert!((result.monthly_payment - 500.0).abs() < 1e-6);
        assert!(result.total_interest.abs() < 1e-6);
    }

    #[test]
    fn test_longest_term_at_highest_rate() {
        let input = LoanInput {
            principal: 25_000.0,
            annual_rate_percent: 100.0,
            term_months: MAX_TERM_MONTHS,
        };
        let result = calculate(&input).unwrap();
        // Growth is so large the payment is essentially the monthly interest
        let interest_only = input.principal * input.monthly_rate();
        assert!((result.monthly_payment - interest_only).abs() < 1e-6);
        assert!(result.total_paid.is_finite());

        let rows = amortization_schedule(&input).unwrap();
        assert_eq!(rows.len(), 600);
        assert!(rows.iter().all(|r| r.payment.is_finite() && r.balance.is_finite()));
        assert_eq!(rows.last().unwrap().balance, 0.0);
    }

    #[test]
    fn test_single_payment() {
        let input = LoanInput {
            principal: 1_000.0,
            annual_rate_percent: 12.0,
            term_months: 1,
        };
        let result = calculate(&input).unwrap();
        assert!((result.monthly_payment - 1_010.0).abs() < 1e-9);
    }

    #[test]
    fn test_schedule_pays_off() {
        let input = car_loan();
        let rows = amortization_schedule(&input).unwrap();
        assert_eq!(rows.len(), 60);
        assert_eq!(rows.last().unwrap().balance, 0.0);

        let principal_sum: f64 = rows.iter().map(|r| r.principal).sum();
        assert!((principal_sum - input.principal).abs() < 1e-6);

        // Interest share shrinks every month
        assert!(rows[0].interest > rows[59].interest);
        assert!((rows[0].interest - 125.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_term() {
        let mut input = car_loan();
        input.term_months = 0;
        assert!(calculate(&input).is_err());
        input.term_months = 601;
        assert!(amortization_schedule(&input).is_err());
    }

    #[test]
    fn test_from_raw_years() {
        let raw = RawInput::new()
            .with("principal", "300000")
            .with("annual_rate_percent", "7")
            .with("term_years", "30");
        let input = LoanInput::from_raw(&raw, &Settings::default()).unwrap();
        assert_eq!(input.term_months, 360);
    }
}
