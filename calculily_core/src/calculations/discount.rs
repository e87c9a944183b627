//! # Discount / Sale Price Calculator
//!
//! Works in either direction: from a discount percentage to the sale price,
//! or from a known sale price back to the discount percentage. Sales tax is
//! applied to the discounted price.

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::format::{format_currency, format_percent, SummaryLine};
use crate::input::RawInput;
use crate::settings::Settings;
use crate::validation::{ensure_finite, ValidationIssue, Validator};

/// How the markdown is specified
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Discount {
    /// Percent off the original price (0-100)
    Percent(f64),
    /// Price after the discount
    SalePrice(f64),
}

/// Input parameters for the discount calculator.
///
/// ## JSON Example
///
/// ```json
/// { "original_price": 80.0, "discount": { "Percent": 25.0 }, "tax_percent": 8.25 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountInput {
    pub original_price: f64,
    pub discount: Discount,
    /// Sales tax percent applied after the discount (0-25)
    #[serde(default)]
    pub tax_percent: f64,
}

impl DiscountInput {
    pub fn validate(&self) -> CalcResult<()> {
        let mut v = Validator::new();
        let original_ok = v.positive("original_price", self.original_price);
        match self.discount {
            Discount::Percent(pct) => {
                v.range("discount_percent", pct, 0.0, 100.0);
            }
            Discount::SalePrice(sale) => {
                if v.non_negative("sale_price", sale) && original_ok {
                    v.cross_field(
                        sale <= self.original_price,
                        "sale_price",
                        "original_price",
                        "Sale price cannot exceed the original price",
                    );
                }
            }
        }
        v.range("tax_percent", self.tax_percent, 0.0, 25.0);
        v.finish()
    }

    pub fn from_raw(raw: &RawInput, _settings: &Settings) -> CalcResult<Self> {
        let mut v = Validator::new();
        let original_price = raw.number(&mut v, "original_price");
        let percent = raw.optional_number(&mut v, "discount_percent");
        let sale = raw.optional_number(&mut v, "sale_price");
        let tax_percent = raw.number_or(&mut v, "tax_percent", 0.0);

        let discount = match (percent, sale) {
            (Some(pct), None) => Some(Discount::Percent(pct)),
            (None, Some(price)) => Some(Discount::SalePrice(price)),
            (Some(_), Some(_)) => {
                v.push(ValidationIssue::CrossField {
                    field: "discount_percent".to_string(),
                    other: "sale_price".to_string(),
                    reason: "Enter either a discount percent or a sale price, not both".to_string(),
                });
                None
            }
            (None, None) => {
                // Only report when both fields were genuinely blank
                if raw.get("discount_percent").is_none() && raw.get("sale_price").is_none() {
                    v.push(ValidationIssue::Required {
                        field: "discount_percent".to_string(),
                    });
                }
                None
            }
        };
        v.finish()?;
        Ok(DiscountInput {
            original_price: original_price.unwrap_or_default(),
            discount: discount.unwrap_or(Discount::Percent(0.0)),
            tax_percent,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountResult {
    pub original_price: f64,
    pub sale_price: f64,
    pub savings: f64,
    pub discount_percent: f64,
    pub tax_amount: f64,
    pub final_price: f64,
}

impl DiscountResult {
    pub fn summary(&self, settings: &Settings) -> Vec<SummaryLine> {
        let mut lines = vec![
            SummaryLine::new("Sale price", format_currency(self.sale_price, settings)),
            SummaryLine::new("You save", format_currency(self.savings, settings)),
            SummaryLine::new("Discount", format_percent(self.discount_percent, 1)),
        ];
        if self.tax_amount > 0.0 {
            lines.push(SummaryLine::new("Tax", format_currency(self.tax_amount, settings)));
            lines.push(SummaryLine::new("Final price", format_currency(self.final_price, settings)));
        }
        lines
    }
}

pub fn calculate(input: &DiscountInput) -> CalcResult<DiscountResult> {
    input.validate()?;

    let (sale_price, discount_percent) = match input.discount {
        Discount::Percent(pct) => (input.original_price * (1.0 - pct / 100.0), pct),
        Discount::SalePrice(sale) => (sale, (input.original_price - sale) / input.original_price * 100.0),
    };
    let tax_amount = sale_price * input.tax_percent / 100.0;
    let final_price = sale_price + tax_amount;
    ensure_finite("discount", &[("sale_price", sale_price), ("final_price", final_price)])?;

    Ok(DiscountResult {
        original_price: input.original_price,
        sale_price,
        savings: input.original_price - sale_price,
        discount_percent,
        tax_amount,
        final_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxed_price_overflow_fails() {
        let input = DiscountInput {
            original_price: 1e308,
            discount: Discount::Percent(0.0),
            tax_percent: 25.0,
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_percent_off() {
        let input = DiscountInput {
            original_price: 80.0,
            discount: Discount::Percent(25.0),
            tax_percent: 0.0,
        };
        let result = calculate(&input).unwrap();
        assert!((result.sale_price - 60.0).abs() < 1e-9);
        assert!((result.savings - 20.0).abs() < 1e-9);
        assert_eq!(result.final_price, result.sale_price);
    }

    #[test]
    fn test_from_sale_price() {
        let input = DiscountInput {
            original_price: 120.0,
            discount: Discount::SalePrice(90.0),
            tax_percent: 10.0,
        };
        let result = calculate(&input).unwrap();
        assert!((result.discount_percent - 25.0).abs() < 1e-9);
        assert!((result.tax_amount - 9.0).abs() < 1e-9);
        assert!((result.final_price - 99.0).abs() < 1e-9);
    }

    #[test]
    fn test_sale_above_original_rejected() {
        let input = DiscountInput {
            original_price: 50.0,
            discount: Discount::SalePrice(60.0),
            tax_percent: 0.0,
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.issues()[0].code(), "CROSS_FIELD");
        assert!(err.messages()[0].contains("cannot exceed"));
    }

    #[test]
    fn test_from_raw_requires_one_discount_field() {
        let settings = Settings::default();
        let raw = RawInput::new().with("original_price", "100");
        assert_eq!(
            DiscountInput::from_raw(&raw, &settings).unwrap_err().issues()[0].code(),
            "REQUIRED"
        );

        let both = raw.clone().with("discount_percent", "10").with("sale_price", "90");
        assert_eq!(
            DiscountInput::from_raw(&both, &settings).unwrap_err().issues()[0].code(),
            "CROSS_FIELD"
        );

        let ok = raw.with("sale_price", "75");
        let input = DiscountInput::from_raw(&ok, &settings).unwrap();
        assert_eq!(input.discount, Discount::SalePrice(75.0));
    }
}
