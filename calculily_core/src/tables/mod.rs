//! # Reference Tables
//!
//! Static breakpoint tables and reference data used by the calculators.
//!
//! ## Breakpoint Selection
//!
//! A [`LookupTable`] is an ordered list of `(threshold, value)` pairs with
//! strictly increasing thresholds. Selecting for a required quantity returns
//! the first entry whose threshold is at or above it ("round up to the next
//! standard size"). When the requirement exceeds the table, the table's
//! sentinel note is returned instead of a value.
//!
//! ## Tables
//!
//! - [`breakers`] - NEC 240.6(A) standard breaker ratings
//! - [`conductors`] - AWG/kcmil conductor areas and ampacities
//! - [`ducts`] - Standard round duct diameters
//! - [`insulation`] - IECC R-value targets and insulation materials
//! - [`lumber`] - Nominal lumber sizes
//! - [`ingredients`] - Cooking ingredient densities
//!
//! ## Example
//!
//! ```rust
//! use calculily_core::tables::{LookupTable, Recommendation};
//!
//! let table = LookupTable::new(
//!     vec![(15.0, 15_u32), (20.0, 20), (30.0, 30)],
//!     "Consult electrician",
//! ).unwrap();
//!
//! assert_eq!(table.recommend(18.0), Recommendation::Standard(20));
//! assert!(!table.recommend(45.0).is_standard());
//! ```

pub mod breakers;
pub mod conductors;
pub mod ducts;
pub mod ingredients;
pub mod insulation;
pub mod lumber;

pub use breakers::{standard_breaker_for, STANDARD_BREAKERS};
pub use conductors::{Conductor, WireGauge};
pub use ducts::{standard_duct_for, STANDARD_DUCTS};
pub use ingredients::Ingredient;
pub use insulation::{ClimateZone, InsulationLocation, InsulationMaterial};
pub use lumber::LumberSize;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// One row of a breakpoint table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint<V> {
    pub threshold: f64,
    pub value: V,
}

/// Outcome of a breakpoint lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Recommendation<V> {
    /// A standard table entry satisfies the requirement
    Standard(V),
    /// Requirement exceeds every entry; carries the table's sentinel note
    BeyondTable(String),
}

impl<V> Recommendation<V> {
    pub fn is_standard(&self) -> bool {
        matches!(self, Recommendation::Standard(_))
    }

    /// The standard value, if one was found
    pub fn standard(&self) -> Option<&V> {
        match self {
            Recommendation::Standard(v) => Some(v),
            Recommendation::BeyondTable(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> Recommendation<U> {
        match self {
            Recommendation::Standard(v) => Recommendation::Standard(f(v)),
            Recommendation::BeyondTable(note) => Recommendation::BeyondTable(note),
        }
    }
}

impl<V: fmt::Display> fmt::Display for Recommendation<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Standard(v) => write!(f, "{}", v),
            Recommendation::BeyondTable(note) => write!(f, "{}", note),
        }
    }
}

/// Ordered breakpoint table with a fallback sentinel.
#[derive(Debug, Clone)]
pub struct LookupTable<V> {
    entries: Vec<Breakpoint<V>>,
    sentinel: &'static str,
}

impl<V: Clone> LookupTable<V> {
    /// Build a table, checking that it is non-empty and that thresholds are
    /// finite and strictly increasing.
    pub fn new(entries: Vec<(f64, V)>, sentinel: &'static str) -> CalcResult<Self> {
        if entries.is_empty() {
            return Err(CalcError::Internal {
                message: "Lookup table must have at least one entry".to_string(),
            });
        }
        for (i, (threshold, _)) in entries.iter().enumerate() {
            if !threshold.is_finite() {
                return Err(CalcError::Internal {
                    message: format!("Lookup table threshold {} is not finite", i),
                });
            }
            if i > 0 && *threshold <= entries[i - 1].0 {
                return Err(CalcError::Internal {
                    message: format!(
                        "Lookup table thresholds must be strictly increasing ({} after {})",
                        threshold,
                        entries[i - 1].0
                    ),
                });
            }
        }
        Ok(LookupTable {
            entries: entries
                .into_iter()
                .map(|(threshold, value)| Breakpoint { threshold, value })
                .collect(),
            sentinel,
        })
    }

    /// First entry with threshold >= required
    pub fn select_entry(&self, required: f64) -> Option<&Breakpoint<V>> {
        let idx = self.entries.partition_point(|e| e.threshold < required);
        self.entries.get(idx)
    }

    /// Value of the first entry with threshold >= required
    pub fn select(&self, required: f64) -> Option<&V> {
        self.select_entry(required).map(|e| &e.value)
    }

    /// Like [`select`](Self::select) but falls back to the sentinel note
    pub fn recommend(&self, required: f64) -> Recommendation<V> {
        match self.select(required) {
            Some(v) => Recommendation::Standard(v.clone()),
            None => {
                tracing::warn!(required, sentinel = self.sentinel, "requirement exceeds lookup table");
                Recommendation::BeyondTable(self.sentinel.to_string())
            }
        }
    }

    pub fn sentinel(&self) -> &'static str {
        self.sentinel
    }

    pub fn entries(&self) -> &[Breakpoint<V>] {
        &self.entries
    }

    /// Largest threshold in the table
    pub fn max_threshold(&self) -> f64 {
        self.entries.last().map(|e| e.threshold).unwrap_or(f64::NEG_INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> LookupTable<&'static str> {
        LookupTable::new(vec![(10.0, "small"), (20.0, "medium"), (40.0, "large")], "custom").unwrap()
    }

    #[test]
    fn test_select_rounds_up() {
        let t = table();
        assert_eq!(t.select(0.0), Some(&"small"));
        assert_eq!(t.select(10.0), Some(&"small"));
        assert_eq!(t.select(10.01), Some(&"medium"));
        assert_eq!(t.select(40.0), Some(&"large"));
        assert_eq!(t.select(40.5), None);
    }

    #[test]
    fn test_recommend_sentinel() {
        let t = table();
        assert_eq!(t.recommend(25.0), Recommendation::Standard("large"));
        assert_eq!(t.recommend(99.0), Recommendation::BeyondTable("custom".to_string()));
        assert_eq!(t.recommend(99.0).to_string(), "custom");
    }

    #[test]
    fn test_rejects_unsorted() {
        assert!(LookupTable::new(vec![(10.0, 1), (10.0, 2)], "x").is_err());
        assert!(LookupTable::new(vec![(20.0, 1), (10.0, 2)], "x").is_err());
        assert!(LookupTable::<u32>::new(vec![], "x").is_err());
        assert!(LookupTable::new(vec![(f64::NAN, 1)], "x").is_err());
    }

    #[test]
    fn test_recommendation_map() {
        let r = Recommendation::Standard(20_u32).map(|a| a * 2);
        assert_eq!(r.standard(), Some(&40));
        let r: Recommendation<u32> = Recommendation::BeyondTable("200+".to_string());
        assert_eq!(r.map(|a| a * 2).standard(), None);
    }

    #[test]
    fn test_recommendation_serialization() {
        let r: Recommendation<u32> = Recommendation::Standard(20);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"kind":"Standard","value":20}"#);
    }
}
