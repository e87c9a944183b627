//! Conductor sizes and ampacities
//!
//! Cross-sectional areas per NEC Chapter 9 Table 8 and 75 °C ampacities per
//! NEC 310.16, with the 240.4(D) small-conductor overcurrent limits applied
//! to 14-10 AWG.
//!
//! ## Example
//!
//! ```rust
//! use calculily_core::tables::conductors::{gauge_for_circular_mils, Conductor, WireGauge};
//! use calculily_core::tables::Recommendation;
//!
//! assert_eq!(gauge_for_circular_mils(14_333.0), Recommendation::Standard(WireGauge::Awg8));
//! assert_eq!(WireGauge::Awg12.max_overcurrent_amps(Conductor::Copper), 20.0);
//! ```

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{LookupTable, Recommendation};
use crate::errors::CalcError;

/// Conductor material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Conductor {
    #[default]
    Copper,
    Aluminum,
}

impl Conductor {
    pub const ALL: [Conductor; 2] = [Conductor::Copper, Conductor::Aluminum];

    /// Resistivity constant K (ohm-cmil/ft) used in voltage drop sizing
    pub fn resistivity_k(&self) -> f64 {
        match self {
            Conductor::Copper => 12.9,
            Conductor::Aluminum => 21.2,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Conductor::Copper => "Copper",
            Conductor::Aluminum => "Aluminum",
        }
    }
}

impl fmt::Display for Conductor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Conductor {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "copper" | "cu" => Ok(Conductor::Copper),
            "aluminum" | "aluminium" | "al" => Ok(Conductor::Aluminum),
            _ => Err(CalcError::invalid_input("conductor", s, "Expected copper or aluminum")),
        }
    }
}

/// Standard building-wire sizes, smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WireGauge {
    Awg14,
    Awg12,
    Awg10,
    Awg8,
    Awg6,
    Awg4,
    Awg3,
    Awg2,
    Awg1,
    Awg1_0,
    Awg2_0,
    Awg3_0,
    Awg4_0,
    Kcmil250,
    Kcmil300,
    Kcmil350,
    Kcmil400,
    Kcmil500,
}

impl WireGauge {
    /// All sizes in ascending area
    pub const ALL: [WireGauge; 18] = [
        WireGauge::Awg14,
        WireGauge::Awg12,
        WireGauge::Awg10,
        WireGauge::Awg8,
        WireGauge::Awg6,
        WireGauge::Awg4,
        WireGauge::Awg3,
        WireGauge::Awg2,
        WireGauge::Awg1,
        WireGauge::Awg1_0,
        WireGauge::Awg2_0,
        WireGauge::Awg3_0,
        WireGauge::Awg4_0,
        WireGauge::Kcmil250,
        WireGauge::Kcmil300,
        WireGauge::Kcmil350,
        WireGauge::Kcmil400,
        WireGauge::Kcmil500,
    ];

    /// Cross-sectional area in circular mils
    pub fn circular_mils(&self) -> f64 {
        match self {
            WireGauge::Awg14 => 4_110.0,
            WireGauge::Awg12 => 6_530.0,
            WireGauge::Awg10 => 10_380.0,
            WireGauge::Awg8 => 16_510.0,
            WireGauge::Awg6 => 26_240.0,
            WireGauge::Awg4 => 41_740.0,
            WireGauge::Awg3 => 52_620.0,
            WireGauge::Awg2 => 66_360.0,
            WireGauge::Awg1 => 83_690.0,
            WireGauge::Awg1_0 => 105_600.0,
            WireGauge::Awg2_0 => 133_100.0,
            WireGauge::Awg3_0 => 167_800.0,
            WireGauge::Awg4_0 => 211_600.0,
            WireGauge::Kcmil250 => 250_000.0,
            WireGauge::Kcmil300 => 300_000.0,
            WireGauge::Kcmil350 => 350_000.0,
            WireGauge::Kcmil400 => 400_000.0,
            WireGauge::Kcmil500 => 500_000.0,
        }
    }

    /// 75 °C ampacity (NEC 310.16). Aluminum 14 AWG is not a listed size.
    pub fn ampacity_75c(&self, conductor: Conductor) -> f64 {
        let (cu, al) = match self {
            WireGauge::Awg14 => (20.0, 0.0),
            WireGauge::Awg12 => (25.0, 20.0),
            WireGauge::Awg10 => (35.0, 30.0),
            WireGauge::Awg8 => (50.0, 40.0),
            WireGauge::Awg6 => (65.0, 50.0),
            WireGauge::Awg4 => (85.0, 65.0),
            WireGauge::Awg3 => (100.0, 75.0),
            WireGauge::Awg2 => (115.0, 90.0),
            WireGauge::Awg1 => (130.0, 100.0),
            WireGauge::Awg1_0 => (150.0, 120.0),
            WireGauge::Awg2_0 => (175.0, 135.0),
            WireGauge::Awg3_0 => (200.0, 155.0),
            WireGauge::Awg4_0 => (230.0, 180.0),
            WireGauge::Kcmil250 => (255.0, 205.0),
            WireGauge::Kcmil300 => (285.0, 230.0),
            WireGauge::Kcmil350 => (310.0, 250.0),
            WireGauge::Kcmil400 => (335.0, 270.0),
            WireGauge::Kcmil500 => (380.0, 310.0),
        };
        match conductor {
            Conductor::Copper => cu,
            Conductor::Aluminum => al,
        }
    }

    /// Largest overcurrent device allowed on this conductor.
    ///
    /// Ampacity capped by NEC 240.4(D) for small conductors.
    pub fn max_overcurrent_amps(&self, conductor: Conductor) -> f64 {
        let limit = match (self, conductor) {
            (WireGauge::Awg14, Conductor::Copper) => 15.0,
            (WireGauge::Awg12, Conductor::Copper) => 20.0,
            (WireGauge::Awg10, Conductor::Copper) => 30.0,
            (WireGauge::Awg12, Conductor::Aluminum) => 15.0,
            (WireGauge::Awg10, Conductor::Aluminum) => 25.0,
            _ => f64::INFINITY,
        };
        self.ampacity_75c(conductor).min(limit)
    }

    /// Display label (e.g. "8 AWG", "2/0 AWG", "250 kcmil")
    pub fn label(&self) -> &'static str {
        match self {
            WireGauge::Awg14 => "14 AWG",
            WireGauge::Awg12 => "12 AWG",
            WireGauge::Awg10 => "10 AWG",
            WireGauge::Awg8 => "8 AWG",
            WireGauge::Awg6 => "6 AWG",
            WireGauge::Awg4 => "4 AWG",
            WireGauge::Awg3 => "3 AWG",
            WireGauge::Awg2 => "2 AWG",
            WireGauge::Awg1 => "1 AWG",
            WireGauge::Awg1_0 => "1/0 AWG",
            WireGauge::Awg2_0 => "2/0 AWG",
            WireGauge::Awg3_0 => "3/0 AWG",
            WireGauge::Awg4_0 => "4/0 AWG",
            WireGauge::Kcmil250 => "250 kcmil",
            WireGauge::Kcmil300 => "300 kcmil",
            WireGauge::Kcmil350 => "350 kcmil",
            WireGauge::Kcmil400 => "400 kcmil",
            WireGauge::Kcmil500 => "500 kcmil",
        }
    }
}

impl fmt::Display for WireGauge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Sentinel returned when no standard conductor is large enough
pub const CONDUCTOR_SENTINEL: &str = "Consult electrician";

static CMIL_TABLE: Lazy<LookupTable<WireGauge>> = Lazy::new(|| {
    LookupTable::new(
        WireGauge::ALL.iter().map(|g| (g.circular_mils(), *g)).collect(),
        CONDUCTOR_SENTINEL,
    )
    .expect("conductor areas are strictly increasing")
});

/// Smallest standard conductor with at least `cmils` circular mils.
pub fn gauge_for_circular_mils(cmils: f64) -> Recommendation<WireGauge> {
    CMIL_TABLE.recommend(cmils)
}

/// Smallest conductor allowed to be protected at `amps`.
///
/// Not a threshold table: aluminum skips 14 AWG, so this is a linear scan.
pub fn gauge_for_overcurrent(amps: f64, conductor: Conductor) -> Recommendation<WireGauge> {
    match WireGauge::ALL
        .iter()
        .find(|g| g.max_overcurrent_amps(conductor) >= amps)
    {
        Some(g) => Recommendation::Standard(*g),
        None => {
            tracing::warn!(amps, %conductor, "no standard conductor carries this load");
            Recommendation::BeyondTable(CONDUCTOR_SENTINEL.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmil_selection() {
        assert_eq!(gauge_for_circular_mils(4_000.0), Recommendation::Standard(WireGauge::Awg14));
        assert_eq!(gauge_for_circular_mils(6_530.0), Recommendation::Standard(WireGauge::Awg12));
        assert_eq!(gauge_for_circular_mils(10_381.0), Recommendation::Standard(WireGauge::Awg8));
        assert_eq!(gauge_for_circular_mils(33_100.0), Recommendation::Standard(WireGauge::Awg4));
        assert!(!gauge_for_circular_mils(600_000.0).is_standard());
    }

    #[test]
    fn test_cmil_breakpoints_follow_nec_areas() {
        // Each gauge covers requirements up to its own Chapter 9 area
        assert_eq!(gauge_for_circular_mils(6_531.0), Recommendation::Standard(WireGauge::Awg10));
        assert_eq!(gauge_for_circular_mils(10_380.0), Recommendation::Standard(WireGauge::Awg10));
        assert_eq!(gauge_for_circular_mils(26_241.0), Recommendation::Standard(WireGauge::Awg4));
        assert_eq!(gauge_for_circular_mils(33_101.0), Recommendation::Standard(WireGauge::Awg4));
        assert_eq!(gauge_for_circular_mils(41_741.0), Recommendation::Standard(WireGauge::Awg3));
        assert_eq!(gauge_for_circular_mils(500_000.0), Recommendation::Standard(WireGauge::Kcmil500));
    }

    #[test]
    fn test_overcurrent_selection() {
        assert_eq!(
            gauge_for_overcurrent(20.0, Conductor::Copper),
            Recommendation::Standard(WireGauge::Awg12)
        );
        assert_eq!(
            gauge_for_overcurrent(15.0, Conductor::Aluminum),
            Recommendation::Standard(WireGauge::Awg12)
        );
        assert_eq!(
            gauge_for_overcurrent(60.0, Conductor::Copper),
            Recommendation::Standard(WireGauge::Awg6)
        );
        assert!(!gauge_for_overcurrent(400.0, Conductor::Copper).is_standard());
    }

    #[test]
    fn test_ordering() {
        assert!(WireGauge::Awg8 > WireGauge::Awg12);
        for pair in WireGauge::ALL.windows(2) {
            assert!(pair[0].circular_mils() < pair[1].circular_mils());
        }
    }

    #[test]
    fn test_conductor_parse() {
        assert_eq!("Cu".parse::<Conductor>().unwrap(), Conductor::Copper);
        assert_eq!("aluminium".parse::<Conductor>().unwrap(), Conductor::Aluminum);
        assert!("gold".parse::<Conductor>().is_err());
    }
}
