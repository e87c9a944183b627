//! # Output Formatting
//!
//! Renders computed numbers the way result cards show them: fixed decimal
//! places, comma thousands separators, currency prefix, unit suffix.
//! Non-finite values render as `N/A` rather than leaking `NaN` to a page.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Placeholder for values that cannot be displayed
pub const NOT_AVAILABLE: &str = "N/A";

/// Fixed decimals with thousands separators: `1234567.891, 2 -> "1,234,567.89"`.
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0.00" reads badly; only show a sign when something non-zero is printed
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Money with the configured symbol: `-1234.5 -> "-$1,234.50"`.
pub fn format_currency(value: f64, settings: &Settings) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let body = format_number(value.abs(), 2);
    if value < 0.0 && body != "0.00" {
        format!("-{}{}", settings.currency_symbol, body)
    } else {
        format!("{}{}", settings.currency_symbol, body)
    }
}

/// Number followed by a unit suffix: `"1.23 yd³"`.
pub fn format_with_unit(value: f64, decimals: usize, unit: &str) -> String {
    let number = format_number(value, decimals);
    if number == NOT_AVAILABLE {
        number
    } else {
        format!("{} {}", number, unit)
    }
}

/// Percentage with a trailing sign: `"12.50%"`.
pub fn format_percent(value: f64, decimals: usize) -> String {
    let number = format_number(value, decimals);
    if number == NOT_AVAILABLE {
        number
    } else {
        format!("{}%", number)
    }
}

/// One labelled line of a rendered result card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub label: String,
    pub value: String,
}

impl SummaryLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        SummaryLine {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_separators() {
        assert_eq!(format_number(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1000.0, 0), "1,000");
        assert_eq!(format_number(-12_345.5, 1), "-12,345.5");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(format_number(-0.001, 2), "0.00");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_number(f64::NAN, 2), "N/A");
        assert_eq!(format_with_unit(f64::INFINITY, 2, "ft"), "N/A");
        assert_eq!(format_percent(f64::NAN, 1), "N/A");
    }

    #[test]
    fn test_currency() {
        let settings = Settings::default();
        assert_eq!(format_currency(102.0, &settings), "$102.00");
        assert_eq!(format_currency(-1234.5, &settings), "-$1,234.50");
        assert_eq!(format_currency(25.5, &settings), "$25.50");
    }

    #[test]
    fn test_unit_and_percent() {
        assert_eq!(format_with_unit(1.2345, 2, "yd³"), "1.23 yd³");
        assert_eq!(format_percent(12.5, 2), "12.50%");
    }
}
