//! # Error Types
//!
//! Structured error types for calculily_core. Every failure a calculator can
//! report is a variant with its parameters attached, so a UI can render it,
//! a test can match on it, and a translator can localize it without string
//! matching.
//!
//! ## Example
//!
//! ```rust
//! use calculily_core::errors::{CalcError, CalcResult};
//!
//! fn validate_bill(bill: f64) -> CalcResult<()> {
//!     if bill <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "bill_amount",
//!             bill.to_string(),
//!             "Bill must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_bill(-5.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ValidationIssue;

/// Result type alias for calculily_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// One or more fields failed validation; nothing was computed
    #[error("Validation failed: {}", join_issues(.issues))]
    Validation { issues: Vec<ValidationIssue> },

    /// Unit name not present in the conversion registry
    #[error("Unknown unit: '{unit}'")]
    UnknownUnit { unit: String },

    /// Conversion requested between two different measurement categories
    #[error("Cannot convert {from} ({from_category}) to {to} ({to_category})")]
    IncompatibleUnits {
        from: String,
        from_category: String,
        to: String,
        to_category: String,
    },

    /// Calculator slug not present in the catalog
    #[error("Unknown calculator: '{slug}'")]
    UnknownCalculator { slug: String },

    /// Free-form text could not be parsed into the expected shape
    #[error("Could not parse '{input}': expected {expected}")]
    ParseFailure { input: String, expected: String },

    /// A formula would divide by a user-supplied zero
    #[error("Division by zero: '{field}' must not be zero")]
    DivisionByZero { field: String },

    /// Calculation failed after validation passed
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// TOML/JSON serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnknownUnit error
    pub fn unknown_unit(unit: impl Into<String>) -> Self {
        CalcError::UnknownUnit { unit: unit.into() }
    }

    /// Create a ParseFailure error
    pub fn parse_failure(input: impl Into<String>, expected: impl Into<String>) -> Self {
        CalcError::ParseFailure {
            input: input.into(),
            expected: expected.into(),
        }
    }

    /// Create a DivisionByZero error
    pub fn division_by_zero(field: impl Into<String>) -> Self {
        CalcError::DivisionByZero {
            field: field.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Human-readable messages for display next to a form.
    ///
    /// A validation failure expands to one message per issue; every other
    /// error is a single message.
    pub fn messages(&self) -> Vec<String> {
        match self {
            CalcError::Validation { issues } => issues.iter().map(|i| i.to_string()).collect(),
            other => vec![other.to_string()],
        }
    }

    /// Validation issues carried by this error, if any
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            CalcError::Validation { issues } => issues,
            _ => &[],
        }
    }

    /// True when the error was caused by user input rather than the engine
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            CalcError::CalculationFailed { .. } | CalcError::FileError { .. } | CalcError::Internal { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::Validation { .. } => "VALIDATION_FAILED",
            CalcError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            CalcError::IncompatibleUnits { .. } => "INCOMPATIBLE_UNITS",
            CalcError::UnknownCalculator { .. } => "UNKNOWN_CALCULATOR",
            CalcError::ParseFailure { .. } => "PARSE_FAILURE",
            CalcError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("bill_amount", "-5", "Bill must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("test").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::division_by_zero("whole").error_code(), "DIVISION_BY_ZERO");
        assert_eq!(CalcError::unknown_unit("furlong").error_code(), "UNKNOWN_UNIT");
    }

    #[test]
    fn test_validation_messages() {
        let error = CalcError::Validation {
            issues: vec![
                ValidationIssue::Required { field: "bill_amount".to_string() },
                ValidationIssue::NotPositive { field: "people".to_string(), value: 0.0 },
            ],
        };
        let messages = error.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("bill_amount"));
        assert_eq!(error.issues().len(), 2);
        assert!(error.is_user_error());
    }

    #[test]
    fn test_single_message() {
        let error = CalcError::division_by_zero("whole");
        assert_eq!(error.messages(), vec!["Division by zero: 'whole' must not be zero".to_string()]);
        assert!(error.issues().is_empty());
    }
}
