//! # Mortgage Calculator
//!
//! Monthly housing cost: principal and interest (see [`loan`](super::loan))
//! plus escrowed property tax and insurance, HOA dues, and private mortgage
//! insurance while the loan-to-value ratio is above 80%.

use serde::{Deserialize, Serialize};

use super::loan::monthly_payment;
use crate::errors::CalcResult;
use crate::format::{format_currency, format_percent, SummaryLine};
use crate::input::RawInput;
use crate::settings::Settings;
use crate::validation::{ensure_finite, Validator};

/// Loan-to-value ratio above which PMI is charged
pub const PMI_LTV_THRESHOLD: f64 = 0.80;

/// Input parameters for a mortgage.
///
/// ## JSON Example
///
/// ```json
/// {
///   "home_price": 400000.0,
///   "down_payment": 80000.0,
///   "annual_rate_percent": 6.5,
///   "term_years": 30,
///   "property_tax_annual": 4800.0,
///   "insurance_annual": 1500.0,
///   "hoa_monthly": 0.0,
///   "pmi_rate_percent": 0.5
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    pub home_price: f64,
    pub down_payment: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
    #[serde(default)]
    pub property_tax_annual: f64,
    #[serde(default)]
    pub insurance_annual: f64,
    #[serde(default)]
    pub hoa_monthly: f64,
    /// Annual PMI premium as a percent of the loan amount
    #[serde(default)]
    pub pmi_rate_percent: f64,
}

impl MortgageInput {
    pub fn validate(&self) -> CalcResult<()> {
        let mut v = Validator::new();
        let price_ok = v.positive("home_price", self.home_price);
        if v.non_negative("down_payment", self.down_payment) && price_ok {
            v.cross_field(
                self.down_payment < self.home_price,
                "down_payment",
                "home_price",
                "Down payment must be less than the home price",
            );
        }
        v.range("annual_rate_percent", self.annual_rate_percent, 0.0, 30.0);
        v.count("term_years", self.term_years, 1, 50);
        v.non_negative("property_tax_annual", self.property_tax_annual);
        v.non_negative("insurance_annual", self.insurance_annual);
        v.non_negative("hoa_monthly", self.hoa_monthly);
        v.range("pmi_rate_percent", self.pmi_rate_percent, 0.0, 5.0);
        v.finish()
    }

    pub fn from_raw(raw: &RawInput, _settings: &Settings) -> CalcResult<Self> {
        let mut v = Validator::new();
        let home_price = raw.number(&mut v, "home_price");
        let down_payment = raw.number_or(&mut v, "down_payment", 0.0);
        let annual_rate_percent = raw.number(&mut v, "annual_rate_percent");
        let term_years = raw.count_or(&mut v, "term_years", 30);
        let property_tax_annual = raw.number_or(&mut v, "property_tax_annual", 0.0);
        let insurance_annual = raw.number_or(&mut v, "insurance_annual", 0.0);
        let hoa_monthly = raw.number_or(&mut v, "hoa_monthly", 0.0);
        let pmi_rate_percent = raw.number_or(&mut v, "pmi_rate_percent", 0.0);
        v.finish()?;
        Ok(MortgageInput {
            home_price: home_price.unwrap_or_default(),
            down_payment,
            annual_rate_percent: annual_rate_percent.unwrap_or_default(),
            term_years,
            property_tax_annual,
            insurance_annual,
            hoa_monthly,
            pmi_rate_percent,
        })
    }

    pub fn loan_amount(&self) -> f64 {
        self.home_price - self.down_payment
    }

    pub fn loan_to_value(&self) -> f64 {
        self.loan_amount() / self.home_price
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageResult {
    pub loan_amount: f64,
    pub down_payment_percent: f64,
    pub principal_and_interest: f64,
    pub monthly_tax: f64,
    pub monthly_insurance: f64,
    pub monthly_pmi: f64,
    pub monthly_hoa: f64,
    pub total_monthly: f64,
    /// Interest paid over the full term
    pub total_interest: f64,
}

impl MortgageResult {
    pub fn summary(&self, settings: &Settings) -> Vec<SummaryLine> {
        let mut lines = vec![
            SummaryLine::new("Loan amount", format_currency(self.loan_amount, settings)),
            SummaryLine::new("Down payment", format_percent(self.down_payment_percent, 1)),
            SummaryLine::new("Principal & interest", format_currency(self.principal_and_interest, settings)),
            SummaryLine::new("Property tax", format_currency(self.monthly_tax, settings)),
            SummaryLine::new("Insurance", format_currency(self.monthly_insurance, settings)),
        ];
        if self.monthly_pmi > 0.0 {
            lines.push(SummaryLine::new("PMI", format_currency(self.monthly_pmi, settings)));
        }
        if self.monthly_hoa > 0.0 {
            lines.push(SummaryLine::new("HOA", format_currency(self.monthly_hoa, settings)));
        }
        lines.push(SummaryLine::new("Total monthly", format_currency(self.total_monthly, settings)));
        lines.push(SummaryLine::new("Total interest", format_currency(self.total_interest, settings)));
        lines
    }
}

pub fn calculate(input: &MortgageInput) -> CalcResult<MortgageResult> {
    input.validate()?;

    let loan_amount = input.loan_amount();
    let months = input.term_years * 12;
    let principal_and_interest = monthly_payment(loan_amount, input.annual_rate_percent / 1200.0, months);

    let monthly_pmi = if input.loan_to_value() > PMI_LTV_THRESHOLD {
        loan_amount * input.pmi_rate_percent / 100.0 / 12.0
    } else {
        0.0
    };
    let monthly_tax = input.property_tax_annual / 12.0;
    let monthly_insurance = input.insurance_annual / 12.0;
    let total_monthly = principal_and_interest + monthly_tax + monthly_insurance + monthly_pmi + input.hoa_monthly;
    let total_interest = principal_and_interest * f64::from(months) - loan_amount;
    ensure_finite(
        "mortgage",
        &[
            ("principal_and_interest", principal_and_interest),
            ("total_monthly", total_monthly),
            ("total_interest", total_interest),
        ],
    )?;

    Ok(MortgageResult {
        loan_amount,
        down_payment_percent: input.down_payment / input.home_price * 100.0,
        principal_and_interest,
        monthly_tax,
        monthly_insurance,
        monthly_pmi,
        monthly_hoa: input.hoa_monthly,
        total_monthly,
        total_interest,
    })
}
