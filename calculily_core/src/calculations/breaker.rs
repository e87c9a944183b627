//! # Breaker Size Calculator
//!
//! Picks an overcurrent device for a load. Continuous loads (three hours or
//! more) are sized at 125% of the load current (NEC 210.20(A)), then rounded
//! up to the next NEC 240.6(A) standard rating. The smallest conductor that
//! may be protected at that rating is recommended alongside it.

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::format::{format_percent, format_with_unit, SummaryLine};
use crate::input::RawInput;
use crate::settings::Settings;
use crate::tables::breakers::BREAKER_SENTINEL;
use crate::tables::conductors::gauge_for_overcurrent;
use crate::tables::{standard_breaker_for, Conductor, Recommendation, WireGauge};
use crate::validation::{ValidationIssue, Validator};

/// Multiplier applied to continuous loads
pub const CONTINUOUS_LOAD_FACTOR: f64 = 1.25;

/// How the load is specified
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum BreakerLoad {
    Amps { amps: f64 },
    Watts { watts: f64, voltage: f64 },
}

impl BreakerLoad {
    pub fn amps(&self) -> f64 {
        match self {
            BreakerLoad::Amps { amps } => *amps,
            BreakerLoad::Watts { watts, voltage } => watts / voltage,
        }
    }
}

/// Input parameters for breaker sizing.
///
/// ## JSON Example
///
/// ```json
/// { "load": { "kind": "Watts", "watts": 1800.0, "voltage": 120.0 }, "continuous": true, "conductor": "Copper" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakerInput {
    pub load: BreakerLoad,
    /// Load runs for three hours or more
    #[serde(default)]
    pub continuous: bool,
    #[serde(default)]
    pub conductor: Conductor,
}

impl BreakerInput {
    pub fn validate(&self) -> CalcResult<()> {
        let mut v = Validator::new();
        match self.load {
            BreakerLoad::Amps { amps } => {
                v.positive_max("amps", amps, 1_000.0);
            }
            BreakerLoad::Watts { watts, voltage } => {
                v.positive_max("watts", watts, 500_000.0);
                v.range("voltage", voltage, 1.0, 1_000.0);
            }
        }
        v.finish()
    }

    /// Load is read from `amps`, or from `watts` and `voltage` (120 V default).
    pub fn from_raw(raw: &RawInput, _settings: &Settings) -> CalcResult<Self> {
        let mut v = Validator::new();
        let load = if raw.get("watts").is_some() {
            let watts = raw.number(&mut v, "watts");
            let voltage = raw.number_or(&mut v, "voltage", 120.0);
            if raw.get("amps").is_some() {
                v.push(ValidationIssue::CrossField {
                    field: "amps".to_string(),
                    other: "watts".to_string(),
                    reason: "Enter the load in amps or in watts, not both".to_string(),
                });
            }
            BreakerLoad::Watts {
                watts: watts.unwrap_or_default(),
                voltage,
            }
        } else {
            let amps = raw.number(&mut v, "amps");
            BreakerLoad::Amps {
                amps: amps.unwrap_or_default(),
            }
        };
        let continuous = raw.flag(&mut v, "continuous");
        let conductor = raw.choice_or(&mut v, "conductor", &["copper", "aluminum"], Conductor::Copper);
        v.finish()?;
        Ok(BreakerInput {
            load,
            continuous,
            conductor,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakerResult {
    pub load_amps: f64,
    /// Load after the continuous-load factor
    pub required_amps: f64,
    pub breaker: Recommendation<u32>,
    pub wire: Recommendation<WireGauge>,
    /// Load as a percent of the breaker rating
    pub utilization_percent: Option<f64>,
}

impl BreakerResult {
    pub fn summary(&self, settings: &Settings) -> Vec<SummaryLine> {
        let dp = usize::from(settings.decimal_places);
        let breaker = match &self.breaker {
            Recommendation::Standard(amps) => format!("{} A", amps),
            Recommendation::BeyondTable(note) => format!("{} A", note),
        };
        let mut lines = vec![
            SummaryLine::new("Load", format_with_unit(self.load_amps, dp, "A")),
            SummaryLine::new("Required rating", format_with_unit(self.required_amps, dp, "A")),
            SummaryLine::new("Breaker", breaker),
            SummaryLine::new("Minimum wire", self.wire.to_string()),
        ];
        if let Some(pct) = self.utilization_percent {
            lines.push(SummaryLine::new("Utilization", format_percent(pct, 1)));
        }
        lines
    }
}

pub fn calculate(input: &BreakerInput) -> CalcResult<BreakerResult> {
    input.validate()?;

    let load_amps = input.load.amps();
    let required_amps = if input.continuous {
        load_amps * CONTINUOUS_LOAD_FACTOR
    } else {
        load_amps
    };

    let breaker = standard_breaker_for(required_amps);
    let (wire, utilization_percent) = match breaker.standard() {
        Some(&rating) => (
            gauge_for_overcurrent(f64::from(rating), input.conductor),
            Some(load_amps / f64::from(rating) * 100.0),
        ),
        None => (Recommendation::BeyondTable(BREAKER_SENTINEL.to_string()), None),
    };

    Ok(BreakerResult {
        load_amps,
        required_amps,
        breaker,
        wire,
        utilization_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amps(amps: f64, continuous: bool) -> BreakerInput {
        BreakerInput {
            load: BreakerLoad::Amps { amps },
            continuous,
            conductor: Conductor::Copper,
        }
    }

    #[test]
    fn test_continuous_load_factor() {
        let result = calculate(&amps(16.0, true)).unwrap();
        assert_eq!(result.required_amps, 20.0);
        assert_eq!(result.breaker, Recommendation::Standard(20));
        assert_eq!(result.wire, Recommendation::Standard(WireGauge::Awg12));
        assert!((result.utilization_percent.unwrap() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_continuous_rounds_up() {
        let result = calculate(&amps(16.0, false)).unwrap();
        assert_eq!(result.breaker, Recommendation::Standard(20));
        let result = calculate(&amps(41.0, false)).unwrap();
        assert_eq!(result.breaker, Recommendation::Standard(45));
    }

    #[test]
    fn test_watts_load() {
        let input = BreakerInput {
            load: BreakerLoad::Watts {
                watts: 1_800.0,
                voltage: 120.0,
            },
            continuous: true,
            conductor: Conductor::Copper,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.load_amps, 15.0);
        assert_eq!(result.breaker, Recommendation::Standard(20));
    }

    #[test]
    fn test_above_largest_rating() {
        let result = calculate(&amps(180.0, true)).unwrap();
        assert_eq!(result.breaker, Recommendation::BeyondTable("200+".to_string()));
        assert!(result.utilization_percent.is_none());
        assert!(result.summary(&Settings::default())[2].value.contains("200+"));
    }

    #[test]
    fn test_aluminum_wire() {
        let mut input = amps(40.0, false);
        input.conductor = Conductor::Aluminum;
        let result = calculate(&input).unwrap();
        assert_eq!(result.wire, Recommendation::Standard(WireGauge::Awg8));
    }

    #[test]
    fn test_from_raw() {
        let settings = Settings::default();
        let raw = RawInput::new().with("watts", "2400").with("continuous", "yes");
        let input = BreakerInput::from_raw(&raw, &settings).unwrap();
        assert!(input.continuous);
        assert_eq!(input.load.amps(), 20.0);

        let both = RawInput::new().with("watts", "2400").with("amps", "20");
        assert_eq!(
            BreakerInput::from_raw(&both, &settings).unwrap_err().issues()[0].code(),
            "CROSS_FIELD"
        );
    }
}
