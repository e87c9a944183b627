//! # Calculator Catalog
//!
//! Central registry of every calculator in Calculily, with the metadata a
//! front end needs to list it, build its form, and cite its formula.
//!
//! ## Architecture
//!
//! The catalog provides:
//! - Type-safe calculator identification via the [`Calculator`] enum
//! - Slugs for URLs and the command line (`wire-gauge`, `board-foot`, ...)
//! - Field lists matching each calculator's `from_raw` reader
//! - A markdown reference generated from the same metadata
//!
//! ## Usage
//!
//! ```rust
//! use calculily_core::catalog::{Calculator, CalculatorCategory};
//!
//! let calc = Calculator::from_slug("wire-gauge").unwrap();
//! let meta = calc.metadata();
//! assert_eq!(meta.category, CalculatorCategory::Electrical);
//! assert!(meta.fields.iter().any(|f| f.name == "amps" && f.required));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

// ============================================================================
// Code References
// ============================================================================

/// Source a calculator's formula or limits come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// NFPA 70 National Electrical Code
    Nec { year: u16, section: &'static str },
    /// International Residential Code
    Irc { year: u16, section: &'static str },
    /// International Energy Conservation Code
    Iecc { year: u16, section: &'static str },
    /// ACCA / ASHRAE duct design practice
    Acca { manual: &'static str },
    /// Published industry convention (tire codes, lumber, baking tables)
    Industry { source: &'static str },
    /// Standard financial mathematics
    Finance,
    /// Plain arithmetic or geometry
    Arithmetic,
}

impl CodeReference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Nec { year, section } => format!("NEC {} {}", year, section),
            CodeReference::Irc { year, section } => format!("IRC {} {}", year, section),
            CodeReference::Iecc { year, section } => format!("IECC {} {}", year, section),
            CodeReference::Acca { manual } => format!("ACCA {}", manual),
            CodeReference::Industry { source } => source.to_string(),
            CodeReference::Finance => "Standard annuity formula".to_string(),
            CodeReference::Arithmetic => "Arithmetic".to_string(),
        }
    }
}

// ============================================================================
// Categories
// ============================================================================

/// Grouping used for navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculatorCategory {
    Finance,
    Construction,
    Electrical,
    Hvac,
    Automotive,
    Kitchen,
    Conversion,
}

impl CalculatorCategory {
    pub const ALL: [CalculatorCategory; 7] = [
        CalculatorCategory::Finance,
        CalculatorCategory::Construction,
        CalculatorCategory::Electrical,
        CalculatorCategory::Hvac,
        CalculatorCategory::Automotive,
        CalculatorCategory::Kitchen,
        CalculatorCategory::Conversion,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            CalculatorCategory::Finance => "Finance",
            CalculatorCategory::Construction => "Construction",
            CalculatorCategory::Electrical => "Electrical",
            CalculatorCategory::Hvac => "HVAC",
            CalculatorCategory::Automotive => "Automotive",
            CalculatorCategory::Kitchen => "Kitchen",
            CalculatorCategory::Conversion => "Conversion",
        }
    }
}

impl fmt::Display for CalculatorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for CalculatorCategory {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        CalculatorCategory::ALL
            .iter()
            .copied()
            .find(|c| c.display_name().to_ascii_lowercase() == wanted)
            .ok_or_else(|| CalcError::invalid_input("category", s, "Unknown calculator category"))
    }
}

// ============================================================================
// Field Definition
// ============================================================================

/// One input field of a calculator form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Key read by `from_raw`
    pub name: &'static str,
    pub description: &'static str,
    /// Units or accepted values
    pub units: &'static str,
    pub required: bool,
}

impl Field {
    pub const fn required(name: &'static str, description: &'static str, units: &'static str) -> Self {
        Self {
            name,
            description,
            units,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, description: &'static str, units: &'static str) -> Self {
        Self {
            name,
            description,
            units,
            required: false,
        }
    }
}

// ============================================================================
// Calculator Metadata
// ============================================================================

/// Everything needed to list, document and render one calculator.
#[derive(Debug, Clone, Serialize)]
pub struct CalculatorMetadata {
    /// URL / command-line identifier (e.g. "wire-gauge")
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: CalculatorCategory,
    /// Main formula in plain text
    pub formula: &'static str,
    pub reference: CodeReference,
    pub fields: Vec<Field>,
    /// Source module implementing the calculator
    pub source_module: &'static str,
}

// ============================================================================
// Calculator Enum
// ============================================================================

/// Every calculator Calculily offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Calculator {
    Percentage,
    Tip,
    Discount,
    Loan,
    Mortgage,
    Concrete,
    BoardFoot,
    Insulation,
    SpiralStair,
    WireGauge,
    Breaker,
    Duct,
    Tire,
    Cooking,
    UnitConverter,
}

/// All calculators, in catalog order
pub const ALL_CALCULATORS: [Calculator; 15] = [
    Calculator::Percentage,
    Calculator::Tip,
    Calculator::Discount,
    Calculator::Loan,
    Calculator::Mortgage,
    Calculator::Concrete,
    Calculator::BoardFoot,
    Calculator::Insulation,
    Calculator::SpiralStair,
    Calculator::WireGauge,
    Calculator::Breaker,
    Calculator::Duct,
    Calculator::Tire,
    Calculator::Cooking,
    Calculator::UnitConverter,
];

impl Calculator {
    pub fn slug(&self) -> &'static str {
        match self {
            Calculator::Percentage => "percentage",
            Calculator::Tip => "tip",
            Calculator::Discount => "discount",
            Calculator::Loan => "loan",
            Calculator::Mortgage => "mortgage",
            Calculator::Concrete => "concrete",
            Calculator::BoardFoot => "board-foot",
            Calculator::Insulation => "insulation",
            Calculator::SpiralStair => "spiral-stair",
            Calculator::WireGauge => "wire-gauge",
            Calculator::Breaker => "breaker",
            Calculator::Duct => "duct",
            Calculator::Tire => "tire",
            Calculator::Cooking => "cooking",
            Calculator::UnitConverter => "unit-converter",
        }
    }

    /// Look up a calculator by slug; underscores and case are ignored.
    pub fn from_slug(slug: &str) -> Result<Self, CalcError> {
        let wanted = slug.trim().to_ascii_lowercase().replace('_', "-");
        ALL_CALCULATORS
            .iter()
            .copied()
            .find(|c| c.slug() == wanted)
            .ok_or_else(|| CalcError::UnknownCalculator {
                slug: slug.to_string(),
            })
    }

    /// Calculators in one category, catalog order
    pub fn in_category(category: CalculatorCategory) -> Vec<Calculator> {
        ALL_CALCULATORS
            .iter()
            .copied()
            .filter(|c| c.metadata().category == category)
            .collect()
    }

    pub fn metadata(&self) -> CalculatorMetadata {
        match self {
            Calculator::Percentage => CalculatorMetadata {
                slug: self.slug(),
                name: "Percentage",
                description: "Percent of a number, what percent one number is of another, and percent change.",
                category: CalculatorCategory::Finance,
                formula: "a/100 × b;  a/b × 100;  (b − a)/a × 100",
                reference: CodeReference::Arithmetic,
                fields: vec![
                    Field::optional("mode", "Question to answer", "percent-of | what-percent | increase | decrease"),
                    Field::required("percent", "Percentage (percent-of)", "%"),
                    Field::required("part", "Part (what-percent)", ""),
                    Field::required("whole", "Whole (percent-of, what-percent)", ""),
                    Field::required("from", "Starting value (increase, decrease)", ""),
                    Field::required("to", "Ending value (increase, decrease)", ""),
                ],
                source_module: "calculations/percentage.rs",
            },
            Calculator::Tip => CalculatorMetadata {
                slug: self.slug(),
                name: "Tip",
                description: "Tip amount, total, and each person's share of a bill.",
                category: CalculatorCategory::Finance,
                formula: "tip = bill × pct/100;  per_person = (bill + tip)/people",
                reference: CodeReference::Arithmetic,
                fields: vec![
                    Field::required("bill_amount", "Bill before tip", "$"),
                    Field::optional("tip_percent", "Tip percentage (default 15)", "%"),
                    Field::optional("people", "People splitting the bill (default 1)", "count"),
                ],
                source_module: "calculations/tip.rs",
            },
            Calculator::Discount => CalculatorMetadata {
                slug: self.slug(),
                name: "Discount",
                description: "Sale price from a discount, or the discount from a sale price, with sales tax.",
                category: CalculatorCategory::Finance,
                formula: "sale = original × (1 − pct/100);  final = sale × (1 + tax/100)",
                reference: CodeReference::Arithmetic,
                fields: vec![
                    Field::required("original_price", "Price before discount", "$"),
                    Field::optional("discount_percent", "Percent off (or give sale_price)", "%"),
                    Field::optional("sale_price", "Price after discount (or give discount_percent)", "$"),
                    Field::optional("tax_percent", "Sales tax", "%"),
                ],
                source_module: "calculations/discount.rs",
            },
            Calculator::Loan => CalculatorMetadata {
                slug: self.slug(),
                name: "Loan",
                description: "Monthly payment, total paid and total interest for a fixed-rate loan.",
                category: CalculatorCategory::Finance,
                formula: "payment = P·r·(1+r)^n / ((1+r)^n − 1);  r = 0: P/n",
                reference: CodeReference::Finance,
                fields: vec![
                    Field::required("principal", "Amount borrowed", "$"),
                    Field::required("annual_rate_percent", "Annual interest rate", "%"),
                    Field::required("term_months", "Number of monthly payments (or give term_years)", "months"),
                    Field::optional("term_years", "Term in years", "years"),
                ],
                source_module: "calculations/loan.rs",
            },
            Calculator::Mortgage => CalculatorMetadata {
                slug: self.slug(),
                name: "Mortgage",
                description: "Monthly housing payment including taxes, insurance, HOA and PMI.",
                category: CalculatorCategory::Finance,
                formula: "total = P&I + tax/12 + insurance/12 + HOA + PMI (LTV > 80%)",
                reference: CodeReference::Finance,
                fields: vec![
                    Field::required("home_price", "Purchase price", "$"),
                    Field::optional("down_payment", "Down payment", "$"),
                    Field::required("annual_rate_percent", "Annual interest rate", "%"),
                    Field::optional("term_years", "Loan term (default 30)", "years"),
                    Field::optional("property_tax_annual", "Annual property tax", "$"),
                    Field::optional("insurance_annual", "Annual homeowner's insurance", "$"),
                    Field::optional("hoa_monthly", "Monthly HOA dues", "$"),
                    Field::optional("pmi_rate_percent", "Annual PMI rate", "%"),
                ],
                source_module: "calculations/mortgage.rs",
            },
            Calculator::Concrete => CalculatorMetadata {
                slug: self.slug(),
                name: "Concrete",
                description: "Concrete volume for slabs, footings, columns and stairs, with bag counts.",
                category: CalculatorCategory::Construction,
                formula: "yd³ = ft³ / 27;  column = π·r²·h;  bags = ⌈ft³ / yield⌉",
                reference: CodeReference::Industry {
                    source: "Pre-mix yields: 0.45 ft³ (60 lb), 0.60 ft³ (80 lb)",
                },
                fields: vec![
                    Field::optional("shape", "Pour shape (default slab)", "slab | footing | column | stairs"),
                    Field::required("length_ft", "Length (slab, footing)", "ft"),
                    Field::required("width_ft", "Width (slab, footing, stairs)", "ft"),
                    Field::required("thickness", "Thickness (slab)", "thickness_unit"),
                    Field::optional("thickness_unit", "Unit of thickness (default in)", "in | ft | cm | mm | m"),
                    Field::required("depth_in", "Depth (footing)", "in"),
                    Field::required("diameter_in", "Diameter (column)", "in"),
                    Field::required("height_ft", "Height (column)", "ft"),
                    Field::required("steps", "Number of steps (stairs)", "count"),
                    Field::required("rise_in", "Rise per step (stairs)", "in"),
                    Field::required("run_in", "Run per step (stairs)", "in"),
                    Field::optional("quantity", "Identical pours (default 1)", "count"),
                    Field::optional("waste_percent", "Extra to order (default from settings)", "%"),
                ],
                source_module: "calculations/concrete.rs",
            },
            Calculator::BoardFoot => CalculatorMetadata {
                slug: self.slug(),
                name: "Board Foot",
                description: "Board feet and cost of lumber by nominal size or custom dimensions.",
                category: CalculatorCategory::Construction,
                formula: "BF = T × W × L / 12 × quantity",
                reference: CodeReference::Industry {
                    source: "NHLA board foot measure",
                },
                fields: vec![
                    Field::optional("lumber_size", "Nominal size (or give thickness_in and width_in)", "2x4, 2x6, ..."),
                    Field::optional("thickness_in", "Thickness", "in"),
                    Field::optional("width_in", "Width", "in"),
                    Field::required("length_ft", "Length", "ft"),
                    Field::optional("quantity", "Pieces (default 1)", "count"),
                    Field::optional("price_per_board_foot", "Price per board foot", "$"),
                ],
                source_module: "calculations/board_foot.rs",
            },
            Calculator::Insulation => CalculatorMetadata {
                slug: self.slug(),
                name: "Insulation",
                description: "Target R-value for a climate zone and the thickness needed to reach it.",
                category: CalculatorCategory::Construction,
                formula: "thickness = max(0, target − existing) / R-per-inch",
                reference: CodeReference::Iecc {
                    year: 2021,
                    section: "R402.1.3",
                },
                fields: vec![
                    Field::required("climate_zone", "IECC climate zone", "1-8"),
                    Field::optional("location", "Where it goes (default attic)", "attic | wall | floor | basement"),
                    Field::required("material", "Insulation material", "fiberglass-batt | cellulose | xps | ..."),
                    Field::optional("existing_r_value", "R-value already installed", "R"),
                    Field::optional("area_sq_ft", "Area to cover", "ft²"),
                ],
                source_module: "calculations/insulation.rs",
            },
            Calculator::SpiralStair => CalculatorMetadata {
                slug: self.slug(),
                name: "Spiral Stair",
                description: "Riser count, tread geometry and headroom for a spiral stair, checked against the IRC.",
                category: CalculatorCategory::Construction,
                formula: "risers = ⌈H / max riser⌉;  headroom = riser × 360/(°/step) − tread",
                reference: CodeReference::Irc {
                    year: 2021,
                    section: "R311.7.10.1",
                },
                fields: vec![
                    Field::required("floor_to_floor_in", "Finished floor to finished floor", "in"),
                    Field::required("stair_diameter_in", "Outside diameter", "in"),
                    Field::optional("pole_diameter_in", "Center pole diameter (default 4)", "in"),
                    Field::optional("rotation_degrees", "Total rotation (default 360)", "°"),
                    Field::optional("max_riser_in", "Maximum riser (default 9.5)", "in"),
                    Field::optional("tread_thickness_in", "Tread thickness (default 1.5)", "in"),
                ],
                source_module: "calculations/spiral_stair.rs",
            },
            Calculator::WireGauge => CalculatorMetadata {
                slug: self.slug(),
                name: "Wire Gauge",
                description: "Conductor size for a circuit from load, run length and allowed voltage drop.",
                category: CalculatorCategory::Electrical,
                formula: "CM = M × K × D × I / (V × drop)",
                reference: CodeReference::Nec {
                    year: 2023,
                    section: "Ch. 9 Table 8, 310.16, 210.19(A) IN 4",
                },
                fields: vec![
                    Field::required("amps", "Load current", "A"),
                    Field::required("distance_ft", "One-way run length", "ft"),
                    Field::optional("voltage", "Source voltage (default 120)", "V"),
                    Field::optional("max_drop_percent", "Allowed drop (default from settings)", "%"),
                    Field::optional("conductor", "Conductor material (default copper)", "copper | aluminum"),
                    Field::optional("phase", "Supply (default single)", "single | three"),
                ],
                source_module: "calculations/wire_gauge.rs",
            },
            Calculator::Breaker => CalculatorMetadata {
                slug: self.slug(),
                name: "Breaker Size",
                description: "Standard breaker rating and minimum wire for a load, with the 125% continuous-load rule.",
                category: CalculatorCategory::Electrical,
                formula: "required = I × 1.25 (continuous);  breaker = next standard size",
                reference: CodeReference::Nec {
                    year: 2023,
                    section: "210.20(A), 240.4(D), 240.6(A)",
                },
                fields: vec![
                    Field::optional("amps", "Load current (or give watts)", "A"),
                    Field::optional("watts", "Load power", "W"),
                    Field::optional("voltage", "Voltage for a watts load (default 120)", "V"),
                    Field::optional("continuous", "Runs 3 hours or more", "yes | no"),
                    Field::optional("conductor", "Conductor material (default copper)", "copper | aluminum"),
                ],
                source_module: "calculations/breaker.rs",
            },
            Calculator::Duct => CalculatorMetadata {
                slug: self.slug(),
                name: "Duct Size",
                description: "Round duct diameter for an airflow at a design velocity, with a rectangular equivalent.",
                category: CalculatorCategory::Hvac,
                formula: "A = CFM / FPM;  d = √(4A/π) × 12",
                reference: CodeReference::Acca { manual: "Manual D" },
                fields: vec![
                    Field::required("cfm", "Airflow", "CFM"),
                    Field::optional("velocity_fpm", "Design velocity (default from settings)", "FPM"),
                    Field::optional("rect_height_in", "Height of rectangular equivalent", "in"),
                ],
                source_module: "calculations/duct.rs",
            },
            Calculator::Tire => CalculatorMetadata {
                slug: self.slug(),
                name: "Tire Size",
                description: "Tire dimensions from a size code and comparison against a replacement size.",
                category: CalculatorCategory::Automotive,
                formula: "diameter = 2 × width × aspect/100 + rim × 25.4",
                reference: CodeReference::Industry {
                    source: "ETRTO / Tire and Rim Association size designation",
                },
                fields: vec![
                    Field::required("current", "Current tire size", "215/65R15"),
                    Field::optional("new", "Replacement tire size", "225/60R16"),
                    Field::optional("indicated_speed", "Speedometer reading (default from settings)", "mph"),
                    Field::optional("tolerance_percent", "Allowed diameter change (default from settings)", "%"),
                ],
                source_module: "calculations/tire.rs",
            },
            Calculator::Cooking => CalculatorMetadata {
                slug: self.slug(),
                name: "Cooking Converter",
                description: "Recipe conversions between cups, spoons, grams and ounces.",
                category: CalculatorCategory::Kitchen,
                formula: "grams = cups × grams_per_cup(ingredient)",
                reference: CodeReference::Industry {
                    source: "Baking ingredient weight charts",
                },
                fields: vec![
                    Field::required("amount", "Quantity", ""),
                    Field::required("from", "Unit to convert from", "cup | tbsp | tsp | ml | g | oz | lb"),
                    Field::required("to", "Unit to convert to", "cup | tbsp | tsp | ml | g | oz | lb"),
                    Field::optional("ingredient", "Needed for volume ↔ weight", "flour | sugar | butter | ..."),
                ],
                source_module: "calculations/cooking.rs",
            },
            Calculator::UnitConverter => CalculatorMetadata {
                slug: self.slug(),
                name: "Unit Converter",
                description: "Length, weight, volume, area, temperature and speed conversions.",
                category: CalculatorCategory::Conversion,
                formula: "value × factor(from) / factor(to)",
                reference: CodeReference::Industry {
                    source: "NIST SP 811",
                },
                fields: vec![
                    Field::required("value", "Value to convert", ""),
                    Field::required("from", "Unit to convert from", "symbol or name"),
                    Field::required("to", "Unit to convert to", "symbol or name"),
                ],
                source_module: "units.rs",
            },
        }
    }
}

impl fmt::Display for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for Calculator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Calculator::from_slug(s)
    }
}

// ============================================================================
// Markdown Generation
// ============================================================================

/// Render the full catalog as a markdown reference.
pub fn generate_catalog_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(
        r#"# Calculily Calculator Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-catalog`

Every calculator, its formula, its reference, and the fields it reads.
Fields marked required must be present for the calculator to run; which
ones apply can depend on a mode field (e.g. concrete `shape`).

---

"#,
    );

    for category in CalculatorCategory::ALL {
        let calculators = Calculator::in_category(category);
        if calculators.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for calculator in calculators {
            let meta = calculator.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Slug:** `{}`\n\n", meta.slug));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula));

            output.push_str("**Fields:**\n\n");
            output.push_str("| Field | Description | Units | Required |\n");
            output.push_str("|-------|-------------|-------|----------|\n");
            for field in &meta.fields {
                output.push_str(&format!(
                    "| `{}` | {} | {} | {} |\n",
                    field.name,
                    field.description,
                    field.units,
                    if field.required { "yes" } else { "no" }
                ));
            }
            output.push('\n');

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`](src/{})\n\n",
                meta.source_module, meta.source_module
            ));
            output.push_str("---\n\n");
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slugs_unique_and_round_trip() {
        let mut seen = HashSet::new();
        for calculator in ALL_CALCULATORS {
            assert!(seen.insert(calculator.slug()));
            assert_eq!(Calculator::from_slug(calculator.slug()).unwrap(), calculator);
            assert_eq!(calculator.metadata().slug, calculator.slug());
        }
    }

    #[test]
    fn test_from_slug_normalizes() {
        assert_eq!(Calculator::from_slug("Wire_Gauge").unwrap(), Calculator::WireGauge);
        assert_eq!(
            Calculator::from_slug("abacus").unwrap_err().error_code(),
            "UNKNOWN_CALCULATOR"
        );
    }

    #[test]
    fn test_every_category_populated() {
        for category in CalculatorCategory::ALL {
            assert!(!Calculator::in_category(category).is_empty(), "{}", category);
        }
        let total: usize = CalculatorCategory::ALL
            .iter()
            .map(|c| Calculator::in_category(*c).len())
            .sum();
        assert_eq!(total, ALL_CALCULATORS.len());
    }

    #[test]
    fn test_every_calculator_has_fields() {
        for calculator in ALL_CALCULATORS {
            let meta = calculator.metadata();
            assert!(!meta.fields.is_empty(), "{}", meta.slug);
            assert!(!meta.formula.is_empty(), "{}", meta.slug);
        }
    }

    #[test]
    fn test_markdown_lists_everything() {
        let md = generate_catalog_markdown();
        assert!(md.starts_with("# Calculily Calculator Reference"));
        for calculator in ALL_CALCULATORS {
            assert!(md.contains(&format!("`{}`", calculator.slug())));
        }
        assert!(md.contains("## HVAC"));
    }
}
