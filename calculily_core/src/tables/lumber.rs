//! Standard Lumber Sizes
//!
//! Nominal lumber designations used for board-foot estimates. Lumber is
//! sold by nominal size, so board feet are computed from nominal thickness
//! and width (a 2x4 counts as 2" x 4" even though it measures 1.5" x 3.5").
//!
//! ## Nominal vs Actual Dimensions
//!
//! - 1x nominal = 0.75" actual
//! - 2x nominal = 1.5" actual
//! - 4x nominal = 3.5" actual
//! - 6x nominal = 5.5" actual

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Standard lumber size designation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LumberSize {
    L1x4,
    L1x6,
    L1x8,
    L1x10,
    L1x12,
    #[default]
    L2x4,
    L2x6,
    L2x8,
    L2x10,
    L2x12,
    L4x4,
    L4x6,
    L6x6,
    L8x8,
}

impl LumberSize {
    /// All sizes for selection lists (boards, then dimension lumber, then timbers)
    pub const ALL: [LumberSize; 14] = [
        LumberSize::L1x4,
        LumberSize::L1x6,
        LumberSize::L1x8,
        LumberSize::L1x10,
        LumberSize::L1x12,
        LumberSize::L2x4,
        LumberSize::L2x6,
        LumberSize::L2x8,
        LumberSize::L2x10,
        LumberSize::L2x12,
        LumberSize::L4x4,
        LumberSize::L4x6,
        LumberSize::L6x6,
        LumberSize::L8x8,
    ];

    /// Nominal (thickness, width) in inches
    pub fn nominal_dimensions(&self) -> (f64, f64) {
        match self {
            LumberSize::L1x4 => (1.0, 4.0),
            LumberSize::L1x6 => (1.0, 6.0),
            LumberSize::L1x8 => (1.0, 8.0),
            LumberSize::L1x10 => (1.0, 10.0),
            LumberSize::L1x12 => (1.0, 12.0),
            LumberSize::L2x4 => (2.0, 4.0),
            LumberSize::L2x6 => (2.0, 6.0),
            LumberSize::L2x8 => (2.0, 8.0),
            LumberSize::L2x10 => (2.0, 10.0),
            LumberSize::L2x12 => (2.0, 12.0),
            LumberSize::L4x4 => (4.0, 4.0),
            LumberSize::L4x6 => (4.0, 6.0),
            LumberSize::L6x6 => (6.0, 6.0),
            LumberSize::L8x8 => (8.0, 8.0),
        }
    }

    /// Actual dressed (thickness, width) in inches
    pub fn actual_dimensions(&self) -> (f64, f64) {
        let (t, w) = self.nominal_dimensions();
        // Timbers (5" and thicker) lose 1/2" on both faces
        if t >= 5.0 {
            (t - 0.5, w - 0.5)
        } else {
            (dressed(t), dressed(w))
        }
    }

    /// Get display name (e.g., "2x10")
    pub fn display_name(&self) -> &'static str {
        match self {
            LumberSize::L1x4 => "1x4",
            LumberSize::L1x6 => "1x6",
            LumberSize::L1x8 => "1x8",
            LumberSize::L1x10 => "1x10",
            LumberSize::L1x12 => "1x12",
            LumberSize::L2x4 => "2x4",
            LumberSize::L2x6 => "2x6",
            LumberSize::L2x8 => "2x8",
            LumberSize::L2x10 => "2x10",
            LumberSize::L2x12 => "2x12",
            LumberSize::L4x4 => "4x4",
            LumberSize::L4x6 => "4x6",
            LumberSize::L6x6 => "6x6",
            LumberSize::L8x8 => "8x8",
        }
    }
}

/// Nominal-to-dressed size for surfaced dry softwood
fn dressed(nominal: f64) -> f64 {
    if nominal <= 1.0 {
        0.75
    } else if nominal <= 6.0 {
        nominal - 0.5
    } else {
        nominal - 0.75
    }
}

impl fmt::Display for LumberSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for LumberSize {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('×', "x");
        LumberSize::ALL
            .iter()
            .copied()
            .find(|size| size.display_name() == wanted)
            .ok_or_else(|| CalcError::invalid_input("lumber_size", s, "Not a standard nominal lumber size"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_dimensions() {
        assert_eq!(LumberSize::L2x4.nominal_dimensions(), (2.0, 4.0));
        assert_eq!(LumberSize::L8x8.nominal_dimensions(), (8.0, 8.0));
    }

    #[test]
    fn test_actual_dimensions() {
        assert_eq!(LumberSize::L1x6.actual_dimensions(), (0.75, 5.5));
        assert_eq!(LumberSize::L2x4.actual_dimensions(), (1.5, 3.5));
        assert_eq!(LumberSize::L2x10.actual_dimensions(), (1.5, 9.25));
        assert_eq!(LumberSize::L6x6.actual_dimensions(), (5.5, 5.5));
        assert_eq!(LumberSize::L8x8.actual_dimensions(), (7.5, 7.5));
    }

    #[test]
    fn test_parse() {
        assert_eq!("2x10".parse::<LumberSize>().unwrap(), LumberSize::L2x10);
        assert_eq!("4X4".parse::<LumberSize>().unwrap(), LumberSize::L4x4);
        assert!("3x5".parse::<LumberSize>().is_err());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&LumberSize::L2x6).unwrap();
        let roundtrip: LumberSize = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, LumberSize::L2x6);
    }
}
