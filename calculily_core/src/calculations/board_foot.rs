//! # Board Foot Calculator
//!
//! A board foot is 144 in³ of lumber (1" × 12" × 1').
//!
//! ```text
//! board_feet = T(in) × W(in) × L(ft) / 12 × quantity
//! ```
//!
//! Dimension lumber is billed on its nominal size, so a named size (2x4,
//! 4x4, ...) uses its nominal thickness and width.
//!
//! ## Example
//!
//! ```rust
//! use calculily_core::calculations::board_foot::board_feet;
//!
//! // One 2x4, 8 ft long
//! assert!((board_feet(2.0, 4.0, 8.0) - 5.333).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::format::{format_currency, format_number, SummaryLine};
use crate::input::RawInput;
use crate::settings::Settings;
use crate::tables::LumberSize;
use crate::validation::{ensure_finite, Validator};

/// Board feet in a single piece
pub fn board_feet(thickness_in: f64, width_in: f64, length_ft: f64) -> f64 {
    thickness_in * width_in * length_ft / 12.0
}

/// Cross-section of the stock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Stock {
    Nominal { size: LumberSize },
    Custom { thickness_in: f64, width_in: f64 },
}

impl Stock {
    /// (thickness, width) used for billing
    pub fn billing_dimensions(&self) -> (f64, f64) {
        match self {
            Stock::Nominal { size } => size.nominal_dimensions(),
            Stock::Custom { thickness_in, width_in } => (*thickness_in, *width_in),
        }
    }
}

/// Input parameters for the board foot calculator.
///
/// ## JSON Example
///
/// ```json
/// { "stock": { "kind": "Nominal", "size": "L2x6" }, "length_ft": 10.0, "quantity": 12, "price_per_board_foot": 1.25 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardFootInput {
    pub stock: Stock,
    pub length_ft: f64,
    pub quantity: u32,
    #[serde(default)]
    pub price_per_board_foot: Option<f64>,
}

impl BoardFootInput {
    pub fn validate(&self) -> CalcResult<()> {
        let mut v = Validator::new();
        if let Stock::Custom { thickness_in, width_in } = self.stock {
            v.positive_max("thickness_in", thickness_in, 48.0);
            v.positive_max("width_in", width_in, 48.0);
        }
        v.positive_max("length_ft", self.length_ft, 100.0);
        v.count("quantity", self.quantity, 1, 10_000);
        if let Some(price) = self.price_per_board_foot {
            v.non_negative("price_per_board_foot", price);
        }
        v.finish()
    }

    /// Stock comes from `lumber_size` when given, otherwise from
    /// `thickness_in` and `width_in`.
    pub fn from_raw(raw: &RawInput, _settings: &Settings) -> CalcResult<Self> {
        let mut v = Validator::new();
        let stock = if raw.get("lumber_size").is_some() {
            let names: Vec<&str> = LumberSize::ALL.iter().map(|s| s.display_name()).collect();
            let size = raw.choice::<LumberSize>(&mut v, "lumber_size", &names);
            Stock::Nominal {
                size: size.unwrap_or_default(),
            }
        } else {
            let thickness_in = raw.number(&mut v, "thickness_in");
            let width_in = raw.number(&mut v, "width_in");
            Stock::Custom {
                thickness_in: thickness_in.unwrap_or_default(),
                width_in: width_in.unwrap_or_default(),
            }
        };
        let length_ft = raw.number(&mut v, "length_ft");
        let quantity = raw.count_or(&mut v, "quantity", 1);
        let price_per_board_foot = raw.optional_number(&mut v, "price_per_board_foot");
        v.finish()?;
        Ok(BoardFootInput {
            stock,
            length_ft: length_ft.unwrap_or_default(),
            quantity,
            price_per_board_foot,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardFootResult {
    pub board_feet_each: f64,
    pub total_board_feet: f64,
    pub linear_feet: f64,
    pub total_cost: Option<f64>,
}

impl BoardFootResult {
    pub fn summary(&self, settings: &Settings) -> Vec<SummaryLine> {
        let dp = usize::from(settings.decimal_places);
        let mut lines = vec![
            SummaryLine::new("Board feet (each)", format_number(self.board_feet_each, dp)),
            SummaryLine::new("Total board feet", format_number(self.total_board_feet, dp)),
            SummaryLine::new("Linear feet", format_number(self.linear_feet, dp)),
        ];
        if let Some(cost) = self.total_cost {
            lines.push(SummaryLine::new("Cost", format_currency(cost, settings)));
        }
        lines
    }
}

pub fn calculate(input: &BoardFootInput) -> CalcResult<BoardFootResult> {
    input.validate()?;

    let (thickness, width) = input.stock.billing_dimensions();
    let each = board_feet(thickness, width, input.length_ft);
    let quantity = f64::from(input.quantity);
    let total = each * quantity;
    let total_cost = input.price_per_board_foot.map(|price| price * total);
    if let Some(cost) = total_cost {
        ensure_finite("board foot", &[("total_cost", cost)])?;
    }

    Ok(BoardFootResult {
        board_feet_each: each,
        total_board_feet: total,
        linear_feet: input.length_ft * quantity,
        total_cost,
    })
}
