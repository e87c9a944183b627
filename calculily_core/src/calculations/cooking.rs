//! # Cooking Converter
//!
//! Recipe conversions between volume and weight units. Volume-to-volume
//! and weight-to-weight conversions go straight through the unit registry.
//! Crossing between volume and weight needs the ingredient's density:
//!
//! ```text
//! grams = cups × grams_per_cup(ingredient)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calculily_core::calculations::cooking::{calculate, CookingInput};
//! use calculily_core::tables::Ingredient;
//! use calculily_core::units::Unit;
//!
//! let input = CookingInput {
//!     amount: 2.0,
//!     from: Unit::Cup,
//!     to: Unit::Gram,
//!     ingredient: Some(Ingredient::AllPurposeFlour),
//! };
//! assert!((calculate(&input).unwrap().result - 250.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::format::{format_number, SummaryLine};
use crate::input::RawInput;
use crate::settings::Settings;
use crate::tables::Ingredient;
use crate::units::{convert, ConversionCategory, Unit};
use crate::validation::{ValidationIssue, Validator};

/// Input parameters for the cooking converter.
///
/// ## JSON Example
///
/// ```json
/// { "amount": 2.0, "from": "Cup", "to": "Gram", "ingredient": "AllPurposeFlour" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookingInput {
    pub amount: f64,
    pub from: Unit,
    pub to: Unit,
    /// Needed only when converting between volume and weight
    #[serde(default)]
    pub ingredient: Option<Ingredient>,
}

fn is_kitchen_unit(unit: Unit) -> bool {
    matches!(unit.category(), ConversionCategory::Volume | ConversionCategory::Weight)
}

fn kitchen_symbols() -> Vec<String> {
    [ConversionCategory::Volume, ConversionCategory::Weight]
        .iter()
        .flat_map(|c| c.units())
        .map(|u| u.symbol().to_string())
        .collect()
}

impl CookingInput {
    pub fn validate(&self) -> CalcResult<()> {
        let mut v = Validator::new();
        v.non_negative("amount", self.amount);
        for (field, unit) in [("from", self.from), ("to", self.to)] {
            if !is_kitchen_unit(unit) {
                v.push(ValidationIssue::UnknownOption {
                    field: field.to_string(),
                    raw: unit.symbol().to_string(),
                    expected: kitchen_symbols(),
                });
            }
        }
        v.finish()
    }

    pub fn from_raw(raw: &RawInput, _settings: &Settings) -> CalcResult<Self> {
        let mut v = Validator::new();
        let amount = raw.number(&mut v, "amount");
        let from = raw.choice::<Unit>(&mut v, "from", &["cup", "tbsp", "tsp", "ml", "g", "oz", "lb"]);
        let to = raw.choice::<Unit>(&mut v, "to", &["cup", "tbsp", "tsp", "ml", "g", "oz", "lb"]);
        let names: Vec<&str> = Ingredient::ALL.iter().map(|i| i.slug()).collect();
        let ingredient = raw.optional_choice::<Ingredient>(&mut v, "ingredient", &names);
        v.finish()?;
        Ok(CookingInput {
            amount: amount.unwrap_or_default(),
            from: from.unwrap_or(Unit::Cup),
            to: to.unwrap_or(Unit::Cup),
            ingredient,
        })
    }

    /// Whether the conversion crosses between volume and weight
    pub fn needs_density(&self) -> bool {
        self.from.category() != self.to.category()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookingResult {
    pub amount: f64,
    pub from: Unit,
    pub to: Unit,
    pub result: f64,
    /// Density used, when one was needed (g per cup)
    pub grams_per_cup: Option<f64>,
}

impl CookingResult {
    pub fn summary(&self, settings: &Settings) -> Vec<SummaryLine> {
        let dp = usize::from(settings.decimal_places);
        let mut lines = vec![SummaryLine::new(
            format!("{} {}", format_number(self.amount, dp), self.from.symbol()),
            format!("{} {}", format_number(self.result, dp), self.to.symbol()),
        )];
        if let Some(density) = self.grams_per_cup {
            lines.push(SummaryLine::new("Density", format!("{} g/cup", format_number(density, 1))));
        }
        lines
    }
}

pub fn calculate(input: &CookingInput) -> CalcResult<CookingResult> {
    input.validate()?;

    if !input.needs_density() {
        return Ok(CookingResult {
            amount: input.amount,
            from: input.from,
            to: input.to,
            result: convert(input.amount, input.from, input.to)?,
            grams_per_cup: None,
        });
    }

    let ingredient = input.ingredient.ok_or_else(|| CalcError::missing_field("ingredient"))?;
    let density = ingredient.grams_per_cup();
    let result = if input.from.category() == ConversionCategory::Volume {
        let grams = convert(input.amount, input.from, Unit::Cup)? * density;
        convert(grams, Unit::Gram, input.to)?
    } else {
        let cups = convert(input.amount, input.from, Unit::Gram)? / density;
        convert(cups, Unit::Cup, input.to)?
    };

    Ok(CookingResult {
        amount: input.amount,
        from: input.from,
        to: input.to,
        result,
        grams_per_cup: Some(density),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cooking(amount: f64, from: Unit, to: Unit, ingredient: Option<Ingredient>) -> CookingInput {
        CookingInput {
            amount,
            from,
            to,
            ingredient,
        }
    }

    #[test]
    fn test_volume_to_volume() {
        let result = calculate(&cooking(0.5, Unit::Cup, Unit::Tablespoon, None)).unwrap();
        assert!((result.result - 8.0).abs() < 1e-9);
        assert!(result.grams_per_cup.is_none());
    }

    #[test]
    fn test_weight_to_weight() {
        let result = calculate(&cooking(1.0, Unit::Pound, Unit::Gram, None)).unwrap();
        assert!((result.result - 453.592_37).abs() < 1e-6);
    }

    #[test]
    fn test_volume_to_weight() {
        let result = calculate(&cooking(2.0, Unit::Cup, Unit::Gram, Some(Ingredient::AllPurposeFlour))).unwrap();
        assert!((result.result - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_weight_to_volume() {
        let result = calculate(&cooking(200.0, Unit::Gram, Unit::Cup, Some(Ingredient::GranulatedSugar))).unwrap();
        assert!((result.result - 1.0).abs() < 1e-9);

        // 16 tbsp per cup
        let result = calculate(&cooking(100.0, Unit::Gram, Unit::Tablespoon, Some(Ingredient::GranulatedSugar))).unwrap();
        assert!((result.result - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_overflowing_amount_fails() {
        let err = calculate(&cooking(1e308, Unit::Cup, Unit::Teaspoon, None)).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");

        let err = calculate(&cooking(1e308, Unit::Gallon, Unit::Gram, Some(Ingredient::Butter))).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
    }

    #[test]
    fn test_missing_ingredient() {
        let err = calculate(&cooking(1.0, Unit::Cup, Unit::Gram, None)).unwrap_err();
        assert_eq!(err, CalcError::missing_field("ingredient"));
    }

    #[test]
    fn test_non_kitchen_unit() {
        let err = calculate(&cooking(1.0, Unit::Foot, Unit::Gram, None)).unwrap_err();
        assert_eq!(err.issues()[0].field(), "from");
    }

    #[test]
    fn test_from_raw() {
        let raw = RawInput::new()
            .with("amount", "1")
            .with("from", "cup")
            .with("to", "g")
            .with("ingredient", "butter");
        let input = CookingInput::from_raw(&raw, &Settings::default()).unwrap();
        let result = calculate(&input).unwrap();
        assert!((result.result - 227.0).abs() < 1e-9);
    }
}
