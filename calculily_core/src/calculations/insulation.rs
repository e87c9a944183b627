//! # Insulation R-Value Calculator
//!
//! Looks up the IECC target R-value for a climate zone and location, then
//! works out how thick a chosen material must be to make up the shortfall
//! over what is already installed.
//!
//! ```text
//! shortfall = max(0, target − existing)
//! thickness = shortfall / R-per-inch
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::format::{format_number, format_with_unit, SummaryLine};
use crate::input::RawInput;
use crate::settings::Settings;
use crate::tables::insulation::target_r_value;
use crate::tables::{ClimateZone, InsulationLocation, InsulationMaterial, Recommendation};
use crate::validation::Validator;

/// Input parameters for the insulation calculator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "climate_zone": 5,
///   "location": "Attic",
///   "material": "BlownCellulose",
///   "existing_r_value": 19.0,
///   "area_sq_ft": 1200.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsulationInput {
    pub climate_zone: ClimateZone,
    pub location: InsulationLocation,
    pub material: InsulationMaterial,
    /// R-value already in place
    #[serde(default)]
    pub existing_r_value: f64,
    /// Area to cover, for a volume estimate
    #[serde(default)]
    pub area_sq_ft: Option<f64>,
}

impl InsulationInput {
    pub fn validate(&self) -> CalcResult<()> {
        let mut v = Validator::new();
        v.range("existing_r_value", self.existing_r_value, 0.0, 100.0);
        if let Some(area) = self.area_sq_ft {
            v.positive_max("area_sq_ft", area, 100_000.0);
        }
        v.finish()
    }

    pub fn from_raw(raw: &RawInput, _settings: &Settings) -> CalcResult<Self> {
        let mut v = Validator::new();
        let zone = raw.count(&mut v, "climate_zone");
        if let Some(zone) = zone {
            v.count("climate_zone", zone, u32::from(ClimateZone::MIN), u32::from(ClimateZone::MAX));
        }
        let location = raw.choice_or(
            &mut v,
            "location",
            &["attic", "wall", "floor", "basement"],
            InsulationLocation::Attic,
        );
        let material = raw.choice::<InsulationMaterial>(
            &mut v,
            "material",
            &["fiberglass-batt", "blown-fiberglass", "cellulose", "mineral-wool", "open-cell-foam", "closed-cell-foam", "xps", "polyiso"],
        );
        let existing_r_value = raw.number_or(&mut v, "existing_r_value", 0.0);
        let area_sq_ft = raw.optional_number(&mut v, "area_sq_ft");
        v.finish()?;

        let zone = u8::try_from(zone.unwrap_or_default()).unwrap_or_default();
        Ok(InsulationInput {
            climate_zone: ClimateZone::new(zone)?,
            location,
            material: material.unwrap_or(InsulationMaterial::FiberglassBatt),
            existing_r_value,
            area_sq_ft,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsulationResult {
    pub target_r_value: Recommendation<f64>,
    pub existing_r_value: f64,
    pub additional_r_value: f64,
    /// Thickness of the chosen material needed for the shortfall (in)
    pub thickness_in: f64,
    pub meets_target: bool,
    /// Material volume for the given area (ft³)
    pub volume_cubic_feet: Option<f64>,
}

impl InsulationResult {
    pub fn summary(&self, settings: &Settings) -> Vec<SummaryLine> {
        let dp = usize::from(settings.decimal_places);
        let target = match &self.target_r_value {
            Recommendation::Standard(r) => format!("R-{}", format_number(*r, 0)),
            Recommendation::BeyondTable(note) => note.clone(),
        };
        let mut lines = vec![
            SummaryLine::new("Target", target),
            SummaryLine::new("Existing", format!("R-{}", format_number(self.existing_r_value, 0))),
        ];
        if self.meets_target {
            lines.push(SummaryLine::new("Status", "Meets target"));
        } else {
            lines.push(SummaryLine::new("Add", format!("R-{}", format_number(self.additional_r_value, 1))));
            lines.push(SummaryLine::new("Thickness", format_with_unit(self.thickness_in, dp, "in")));
        }
        if let Some(volume) = self.volume_cubic_feet {
            lines.push(SummaryLine::new("Material volume", format_with_unit(volume, dp, "ft³")));
        }
        lines
    }
}

pub fn calculate(input: &InsulationInput) -> CalcResult<InsulationResult> {
    input.validate()?;

    let target = target_r_value(input.climate_zone, input.location);
    let target_r = target.standard().copied().unwrap_or(0.0);
    let additional_r_value = (target_r - input.existing_r_value).max(0.0);
    let thickness_in = additional_r_value / input.material.r_per_inch();

    Ok(InsulationResult {
        target_r_value: target,
        existing_r_value: input.existing_r_value,
        additional_r_value,
        thickness_in,
        meets_target: additional_r_value == 0.0,
        volume_cubic_feet: input.area_sq_ft.map(|area| area * thickness_in / 12.0),
    })
}
