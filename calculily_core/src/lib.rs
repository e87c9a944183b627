//! # calculily_core - Everyday Calculator Engine
//!
//! `calculily_core` holds the math behind Calculily's calculators: finance,
//! construction, electrical, HVAC, automotive and kitchen. All inputs and
//! outputs are JSON-serializable, and every calculator can also be driven
//! from raw `key=value` text the way a web form or command line supplies it.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Validate first**: No calculator computes on input that failed validation
//! - **Rich Errors**: Structured error types, not just strings
//! - **Static tables**: Code tables are built once and shared read-only
//!
//! ## Quick Start
//!
//! ```rust
//! use calculily_core::calculations::CalculationItem;
//! use calculily_core::catalog::Calculator;
//! use calculily_core::input::RawInput;
//! use calculily_core::settings::Settings;
//!
//! let settings = Settings::default();
//! let raw = RawInput::new()
//!     .with("bill_amount", "85")
//!     .with("tip_percent", "20")
//!     .with("people", "4");
//!
//! let item = CalculationItem::from_raw(Calculator::Tip, &raw, &settings).unwrap();
//! let output = item.calculate().unwrap();
//! for line in output.summary(&settings) {
//!     println!("{}: {}", line.label, line.value);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Every calculator and the dispatch enum
//! - [`catalog`] - Calculator registry and reference generation
//! - [`tables`] - NEC, IECC, lumber and ingredient lookup tables
//! - [`units`] - Unit registry and conversion
//! - [`input`] / [`validation`] - Raw field parsing and issue collection
//! - [`format`] - Number, currency and unit display
//! - [`settings`] - Display options and calculator defaults
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod errors;
pub mod format;
pub mod input;
pub mod settings;
pub mod tables;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculationOutput};
pub use catalog::{Calculator, CalculatorCategory, ALL_CALCULATORS};
pub use errors::{CalcError, CalcResult};
pub use input::RawInput;
pub use settings::Settings;
