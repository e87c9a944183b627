//! # Raw Form Input
//!
//! [`RawInput`] holds field values exactly as a user typed them (strings
//! keyed by field name). Calculators turn it into their typed `*Input`
//! through `from_raw`, which reads every field through a [`Validator`] so a
//! blank or mistyped field is reported instead of silently becoming NaN.
//!
//! ## Example
//!
//! ```rust
//! use calculily_core::input::RawInput;
//! use calculily_core::validation::Validator;
//!
//! let raw = RawInput::parse_pairs(["bill_amount=$1,250.50", "people=4"]).unwrap();
//! let mut v = Validator::new();
//! assert_eq!(raw.number(&mut v, "bill_amount"), Some(1250.5));
//! assert_eq!(raw.count(&mut v, "people"), Some(4));
//! assert_eq!(raw.number(&mut v, "tip_percent"), None);
//! assert_eq!(v.messages(), vec!["tip_percent is required".to_string()]);
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::validation::{ValidationIssue, Validator};

/// Field name → raw string value, as entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInput {
    fields: BTreeMap<String, String>,
}

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Parse `key=value` pairs (command-line style).
    pub fn parse_pairs<I, S>(pairs: I) -> CalcResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut raw = RawInput::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| CalcError::parse_failure(pair, "key=value"))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(CalcError::parse_failure(pair, "a non-empty field name before '='"));
            }
            raw.insert(key, value.trim());
        }
        Ok(raw)
    }

    /// Trimmed value; blank counts as absent
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Required number. Records `Required` or `NotNumeric` on failure.
    pub fn number(&self, v: &mut Validator, field: &str) -> Option<f64> {
        match self.get(field) {
            Some(raw) => parse_number(v, field, raw),
            None => {
                v.push(ValidationIssue::Required {
                    field: field.to_string(),
                });
                None
            }
        }
    }

    /// Optional number; `None` when blank, issue recorded when malformed.
    pub fn optional_number(&self, v: &mut Validator, field: &str) -> Option<f64> {
        self.get(field).and_then(|raw| parse_number(v, field, raw))
    }

    /// Optional number with a default for blank fields
    pub fn number_or(&self, v: &mut Validator, field: &str, default: f64) -> f64 {
        match self.get(field) {
            Some(raw) => parse_number(v, field, raw).unwrap_or(default),
            None => default,
        }
    }

    /// Required whole number (people, steps, quantity)
    pub fn count(&self, v: &mut Validator, field: &str) -> Option<u32> {
        let value = self.number(v, field)?;
        to_count(v, field, value)
    }

    /// Optional whole number with a default
    pub fn count_or(&self, v: &mut Validator, field: &str, default: u32) -> u32 {
        match self.optional_number(v, field) {
            Some(value) => to_count(v, field, value).unwrap_or(default),
            None => default,
        }
    }

    /// Required option parsed with `FromStr` (units, materials, modes)
    pub fn choice<T: FromStr>(&self, v: &mut Validator, field: &str, expected: &[&str]) -> Option<T> {
        match self.get(field) {
            Some(raw) => parse_choice(v, field, raw, expected),
            None => {
                v.push(ValidationIssue::Required {
                    field: field.to_string(),
                });
                None
            }
        }
    }

    /// Optional option, `None` when blank
    pub fn optional_choice<T: FromStr>(&self, v: &mut Validator, field: &str, expected: &[&str]) -> Option<T> {
        self.get(field).and_then(|raw| parse_choice(v, field, raw, expected))
    }

    /// Optional option with a default for blank fields
    pub fn choice_or<T: FromStr>(&self, v: &mut Validator, field: &str, expected: &[&str], default: T) -> T {
        self.optional_choice(v, field, expected).unwrap_or(default)
    }

    /// Checkbox-style flag; blank is `false`
    pub fn flag(&self, v: &mut Validator, field: &str) -> bool {
        match self.get(field).map(|s| s.to_ascii_lowercase()) {
            None => false,
            Some(s) => match s.as_str() {
                "true" | "yes" | "y" | "1" | "on" => true,
                "false" | "no" | "n" | "0" | "off" => false,
                _ => {
                    v.push(ValidationIssue::UnknownOption {
                        field: field.to_string(),
                        raw: s,
                        expected: vec!["yes".to_string(), "no".to_string()],
                    });
                    false
                }
            },
        }
    }

    /// Required free text
    pub fn text(&self, v: &mut Validator, field: &str) -> Option<String> {
        match self.get(field) {
            Some(s) => Some(s.to_string()),
            None => {
                v.push(ValidationIssue::Required {
                    field: field.to_string(),
                });
                None
            }
        }
    }
}

/// Parse a typed number, tolerating currency signs, thousands separators,
/// and a trailing percent sign.
fn parse_number(v: &mut Validator, field: &str, raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .trim_end_matches('%')
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    match cleaned.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        Ok(_) => {
            v.push(ValidationIssue::NotFinite {
                field: field.to_string(),
            });
            None
        }
        Err(_) => {
            v.push(ValidationIssue::NotNumeric {
                field: field.to_string(),
                raw: raw.to_string(),
            });
            None
        }
    }
}

fn to_count(v: &mut Validator, field: &str, value: f64) -> Option<u32> {
    if value.fract() != 0.0 {
        v.push(ValidationIssue::NotInteger {
            field: field.to_string(),
            value,
        });
        return None;
    }
    if value < 0.0 {
        v.push(ValidationIssue::Negative {
            field: field.to_string(),
            value,
        });
        return None;
    }
    if value > f64::from(u32::MAX) {
        v.push(ValidationIssue::AboveMaximum {
            field: field.to_string(),
            value,
            max: f64::from(u32::MAX),
        });
        return None;
    }
    Some(value as u32)
}

fn parse_choice<T: FromStr>(v: &mut Validator, field: &str, raw: &str, expected: &[&str]) -> Option<T> {
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            v.push(ValidationIssue::UnknownOption {
                field: field.to_string(),
                raw: raw.to_string(),
                expected: expected.iter().map(|s| s.to_string()).collect(),
            });
            None
        }
    }
}
