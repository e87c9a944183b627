//! # Input Validation
//!
//! Per-field checks that run before any formula. A [`Validator`] collects
//! every problem with the input instead of stopping at the first one, so a
//! form can show the whole list at once. An empty list means the input is
//! safe to compute.
//!
//! ## Example
//!
//! ```rust
//! use calculily_core::validation::Validator;
//!
//! let mut v = Validator::new();
//! v.positive("bill_amount", 85.0);
//! v.range("tip_percent", 120.0, 0.0, 100.0);
//!
//! let err = v.finish().unwrap_err();
//! assert_eq!(err.messages().len(), 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// A single problem with one field (or a pair of fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ValidationIssue {
    /// Field was left empty
    Required { field: String },
    /// Field could not be parsed as a number
    NotNumeric { field: String, raw: String },
    /// Field parsed to NaN or infinity
    NotFinite { field: String },
    /// Field must be greater than zero
    NotPositive { field: String, value: f64 },
    /// Field must be zero or greater
    Negative { field: String, value: f64 },
    /// Field is below its allowed minimum
    BelowMinimum { field: String, value: f64, min: f64 },
    /// Field is above its allowed maximum
    AboveMaximum { field: String, value: f64, max: f64 },
    /// Field must be a whole number
    NotInteger { field: String, value: f64 },
    /// Field is not one of the accepted options
    UnknownOption {
        field: String,
        raw: String,
        expected: Vec<String>,
    },
    /// Two fields are inconsistent with each other
    CrossField {
        field: String,
        other: String,
        reason: String,
    },
}

impl ValidationIssue {
    /// Name of the field the issue is attached to
    pub fn field(&self) -> &str {
        match self {
            ValidationIssue::Required { field }
            | ValidationIssue::NotNumeric { field, .. }
            | ValidationIssue::NotFinite { field }
            | ValidationIssue::NotPositive { field, .. }
            | ValidationIssue::Negative { field, .. }
            | ValidationIssue::BelowMinimum { field, .. }
            | ValidationIssue::AboveMaximum { field, .. }
            | ValidationIssue::NotInteger { field, .. }
            | ValidationIssue::UnknownOption { field, .. }
            | ValidationIssue::CrossField { field, .. } => field,
        }
    }

    /// Stable code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            ValidationIssue::Required { .. } => "REQUIRED",
            ValidationIssue::NotNumeric { .. } => "NOT_NUMERIC",
            ValidationIssue::NotFinite { .. } => "NOT_FINITE",
            ValidationIssue::NotPositive { .. } => "NOT_POSITIVE",
            ValidationIssue::Negative { .. } => "NEGATIVE",
            ValidationIssue::BelowMinimum { .. } => "BELOW_MINIMUM",
            ValidationIssue::AboveMaximum { .. } => "ABOVE_MAXIMUM",
            ValidationIssue::NotInteger { .. } => "NOT_INTEGER",
            ValidationIssue::UnknownOption { .. } => "UNKNOWN_OPTION",
            ValidationIssue::CrossField { .. } => "CROSS_FIELD",
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::Required { field } => write!(f, "{} is required", field),
            ValidationIssue::NotNumeric { field, raw } => {
                write!(f, "{} must be a number (got '{}')", field, raw)
            }
            ValidationIssue::NotFinite { field } => write!(f, "{} must be a finite number", field),
            ValidationIssue::NotPositive { field, value } => {
                write!(f, "{} must be greater than zero (got {})", field, value)
            }
            ValidationIssue::Negative { field, value } => {
                write!(f, "{} cannot be negative (got {})", field, value)
            }
            ValidationIssue::BelowMinimum { field, value, min } => {
                write!(f, "{} must be at least {} (got {})", field, min, value)
            }
            ValidationIssue::AboveMaximum { field, value, max } => {
                write!(f, "{} must be at most {} (got {})", field, max, value)
            }
            ValidationIssue::NotInteger { field, value } => {
                write!(f, "{} must be a whole number (got {})", field, value)
            }
            ValidationIssue::UnknownOption { field, raw, expected } => {
                write!(f, "{} must be one of [{}] (got '{}')", field, expected.join(", "), raw)
            }
            ValidationIssue::CrossField { field, other, reason } => {
                write!(f, "{} / {}: {}", field, other, reason)
            }
        }
    }
}

/// Accumulates validation issues for one calculator input.
///
/// Every check returns `true` when the value passed so callers can skip
/// dependent checks (e.g. a cross-field comparison on a field that already
/// failed).
#[derive(Debug, Clone, Default)]
pub struct Validator {
    issues: Vec<ValidationIssue>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue directly
    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Value must be finite
    pub fn finite(&mut self, field: &str, value: f64) -> bool {
        if value.is_finite() {
            true
        } else {
            self.push(ValidationIssue::NotFinite {
                field: field.to_string(),
            });
            false
        }
    }

    /// Value must be finite and > 0
    pub fn positive(&mut self, field: &str, value: f64) -> bool {
        if !self.finite(field, value) {
            return false;
        }
        if value <= 0.0 {
            self.push(ValidationIssue::NotPositive {
                field: field.to_string(),
                value,
            });
            return false;
        }
        true
    }

    /// Value must be finite and >= 0
    pub fn non_negative(&mut self, field: &str, value: f64) -> bool {
        if !self.finite(field, value) {
            return false;
        }
        if value < 0.0 {
            self.push(ValidationIssue::Negative {
                field: field.to_string(),
                value,
            });
            return false;
        }
        true
    }

    /// Value must lie in `[min, max]`
    pub fn range(&mut self, field: &str, value: f64, min: f64, max: f64) -> bool {
        if !self.finite(field, value) {
            return false;
        }
        if value < min {
            self.push(ValidationIssue::BelowMinimum {
                field: field.to_string(),
                value,
                min,
            });
            return false;
        }
        if value > max {
            self.push(ValidationIssue::AboveMaximum {
                field: field.to_string(),
                value,
                max,
            });
            return false;
        }
        true
    }

    /// Value must be > 0 and <= max
    pub fn positive_max(&mut self, field: &str, value: f64, max: f64) -> bool {
        if !self.positive(field, value) {
            return false;
        }
        if value > max {
            self.push(ValidationIssue::AboveMaximum {
                field: field.to_string(),
                value,
                max,
            });
            return false;
        }
        true
    }

    /// Integer count in `[min, max]`
    pub fn count(&mut self, field: &str, value: u32, min: u32, max: u32) -> bool {
        self.range(field, f64::from(value), f64::from(min), f64::from(max))
    }

    /// Record a cross-field issue when `ok` is false
    pub fn cross_field(&mut self, ok: bool, field: &str, other: &str, reason: &str) -> bool {
        if !ok {
            self.push(ValidationIssue::CrossField {
                field: field.to_string(),
                other: other.to_string(),
                reason: reason.to_string(),
            });
        }
        ok
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Plain-text messages; empty means safe to compute
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.to_string()).collect()
    }

    /// Merge issues collected elsewhere
    pub fn extend(&mut self, other: Validator) {
        self.issues.extend(other.issues);
    }

    /// `Ok(())` when nothing was recorded, otherwise a [`CalcError::Validation`]
    pub fn finish(self) -> CalcResult<()> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(CalcError::Validation {
                issues: self.issues,
            })
        }
    }
}

/// Fail with [`CalcError::CalculationFailed`] when a computed output is NaN
/// or infinite.
pub fn ensure_finite(calculation: &str, outputs: &[(&str, f64)]) -> CalcResult<()> {
    match outputs.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, _)) => Err(CalcError::calculation_failed(
            calculation,
            format!("{} is too large to represent", name),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_validator_passes() {
        let v = Validator::new();
        assert!(v.messages().is_empty());
        assert!(v.finish().is_ok());
    }

    #[test]
    fn test_collects_all_issues() {
        let mut v = Validator::new();
        assert!(!v.positive("length_ft", -1.0));
        assert!(!v.range("tip_percent", 150.0, 0.0, 100.0));
        assert!(!v.finite("width_ft", f64::NAN));
        assert!(v.non_negative("waste_percent", 0.0));

        let codes: Vec<_> = v.issues().iter().map(|i| i.code()).collect();
        assert_eq!(codes, vec!["NOT_POSITIVE", "ABOVE_MAXIMUM", "NOT_FINITE"]);

        let err = v.finish().unwrap_err();
        assert_eq!(err.issues().len(), 3);
    }

    #[test]
    fn test_cross_field() {
        let mut v = Validator::new();
        v.cross_field(120.0 <= 100.0, "sale_price", "original_price", "Sale price cannot exceed original price");
        let issue = &v.issues()[0];
        assert_eq!(issue.field(), "sale_price");
        assert!(issue.to_string().contains("cannot exceed"));
    }

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite("tip", &[("total", 102.0), ("per_person", 25.5)]).is_ok());

        let err = ensure_finite("tip", &[("total", f64::INFINITY), ("per_person", f64::NAN)]).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
        assert!(err.to_string().contains("total"));
    }

    #[test]
    fn test_count_bounds() {
        let mut v = Validator::new();
        assert!(v.count("people", 4, 1, 100));
        assert!(!v.count("people", 0, 1, 100));
        assert_eq!(v.issues()[0].code(), "BELOW_MINIMUM");
    }

    #[test]
    fn test_issue_serialization() {
        let issue = ValidationIssue::BelowMinimum {
            field: "people".to_string(),
            value: 0.0,
            min: 1.0,
        };
        let json = serde_json::to_string(&issue).unwrap();
        assert!(json.contains("\"kind\":\"BelowMinimum\""));
        let roundtrip: ValidationIssue = serde_json::from_str(&json).unwrap();
        assert_eq!(issue, roundtrip);
    }
}
