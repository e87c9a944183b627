//! Cooking ingredient densities, in grams per US cup.
//!
//! Needed to bridge volume and weight in the cooking converter. Values are
//! the usual baking-reference figures for spooned-and-leveled dry goods.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ingredient {
    Water,
    Milk,
    AllPurposeFlour,
    BreadFlour,
    GranulatedSugar,
    BrownSugar,
    PowderedSugar,
    Butter,
    Honey,
    VegetableOil,
    Rice,
    RolledOats,
    CocoaPowder,
    TableSalt,
}

impl Ingredient {
    pub const ALL: [Ingredient; 14] = [
        Ingredient::Water,
        Ingredient::Milk,
        Ingredient::AllPurposeFlour,
        Ingredient::BreadFlour,
        Ingredient::GranulatedSugar,
        Ingredient::BrownSugar,
        Ingredient::PowderedSugar,
        Ingredient::Butter,
        Ingredient::Honey,
        Ingredient::VegetableOil,
        Ingredient::Rice,
        Ingredient::RolledOats,
        Ingredient::CocoaPowder,
        Ingredient::TableSalt,
    ];

    pub fn grams_per_cup(&self) -> f64 {
        match self {
            Ingredient::Water => 236.6,
            Ingredient::Milk => 245.0,
            Ingredient::AllPurposeFlour => 125.0,
            Ingredient::BreadFlour => 127.0,
            Ingredient::GranulatedSugar => 200.0,
            Ingredient::BrownSugar => 220.0,
            Ingredient::PowderedSugar => 120.0,
            Ingredient::Butter => 227.0,
            Ingredient::Honey => 340.0,
            Ingredient::VegetableOil => 218.0,
            Ingredient::Rice => 185.0,
            Ingredient::RolledOats => 90.0,
            Ingredient::CocoaPowder => 85.0,
            Ingredient::TableSalt => 292.0,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Ingredient::Water => "water",
            Ingredient::Milk => "milk",
            Ingredient::AllPurposeFlour => "flour",
            Ingredient::BreadFlour => "bread-flour",
            Ingredient::GranulatedSugar => "sugar",
            Ingredient::BrownSugar => "brown-sugar",
            Ingredient::PowderedSugar => "powdered-sugar",
            Ingredient::Butter => "butter",
            Ingredient::Honey => "honey",
            Ingredient::VegetableOil => "oil",
            Ingredient::Rice => "rice",
            Ingredient::RolledOats => "oats",
            Ingredient::CocoaPowder => "cocoa",
            Ingredient::TableSalt => "salt",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Ingredient::Water => "Water",
            Ingredient::Milk => "Milk",
            Ingredient::AllPurposeFlour => "All-Purpose Flour",
            Ingredient::BreadFlour => "Bread Flour",
            Ingredient::GranulatedSugar => "Granulated Sugar",
            Ingredient::BrownSugar => "Brown Sugar (packed)",
            Ingredient::PowderedSugar => "Powdered Sugar",
            Ingredient::Butter => "Butter",
            Ingredient::Honey => "Honey",
            Ingredient::VegetableOil => "Vegetable Oil",
            Ingredient::Rice => "Rice (uncooked)",
            Ingredient::RolledOats => "Rolled Oats",
            Ingredient::CocoaPowder => "Cocoa Powder",
            Ingredient::TableSalt => "Table Salt",
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Ingredient {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        Ingredient::ALL
            .iter()
            .copied()
            .find(|i| i.slug() == wanted)
            .ok_or_else(|| CalcError::invalid_input("ingredient", s, "Unknown ingredient"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_densities_positive() {
        for ingredient in Ingredient::ALL {
            assert!(ingredient.grams_per_cup() > 0.0);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("Brown Sugar".parse::<Ingredient>().unwrap(), Ingredient::BrownSugar);
        assert_eq!("flour".parse::<Ingredient>().unwrap(), Ingredient::AllPurposeFlour);
        assert!("saffron".parse::<Ingredient>().is_err());
    }
}
