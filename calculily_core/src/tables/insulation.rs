//! Insulation R-value targets and materials
//!
//! Targets follow the 2021 IECC prescriptive table (R402.1.3) for wood-frame
//! construction, expressed as a single cumulative R-value per location.
//! Zones are the table thresholds, so selecting zone `n` lands on row `n`.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{LookupTable, Recommendation};
use crate::errors::{CalcError, CalcResult};

/// IECC climate zone, 1 (hot) through 8 (subarctic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ClimateZone(u8);

impl ClimateZone {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;

    pub fn new(zone: u8) -> CalcResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&zone) {
            Ok(ClimateZone(zone))
        } else {
            Err(CalcError::invalid_input(
                "climate_zone",
                zone.to_string(),
                "Climate zone must be between 1 and 8",
            ))
        }
    }

    pub fn number(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ClimateZone {
    type Error = CalcError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ClimateZone::new(value)
    }
}

impl From<ClimateZone> for u8 {
    fn from(zone: ClimateZone) -> Self {
        zone.0
    }
}

impl fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Zone {}", self.0)
    }
}

/// Where the insulation goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InsulationLocation {
    #[default]
    Attic,
    Wall,
    Floor,
    BasementWall,
}

impl InsulationLocation {
    pub const ALL: [InsulationLocation; 4] = [
        InsulationLocation::Attic,
        InsulationLocation::Wall,
        InsulationLocation::Floor,
        InsulationLocation::BasementWall,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            InsulationLocation::Attic => "Attic / Ceiling",
            InsulationLocation::Wall => "Exterior Wall",
            InsulationLocation::Floor => "Floor",
            InsulationLocation::BasementWall => "Basement Wall",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            InsulationLocation::Attic => "attic",
            InsulationLocation::Wall => "wall",
            InsulationLocation::Floor => "floor",
            InsulationLocation::BasementWall => "basement",
        }
    }
}

impl FromStr for InsulationLocation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        InsulationLocation::ALL
            .iter()
            .copied()
            .find(|l| l.slug() == wanted || (wanted == "ceiling" && *l == InsulationLocation::Attic))
            .ok_or_else(|| CalcError::invalid_input("location", s, "Expected attic, wall, floor or basement"))
    }
}

/// Common insulation products and their nominal R per inch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InsulationMaterial {
    #[default]
    FiberglassBatt,
    BlownFiberglass,
    BlownCellulose,
    MineralWool,
    OpenCellSprayFoam,
    ClosedCellSprayFoam,
    RigidXps,
    RigidPolyiso,
}

impl InsulationMaterial {
    pub const ALL: [InsulationMaterial; 8] = [
        InsulationMaterial::FiberglassBatt,
        InsulationMaterial::BlownFiberglass,
        InsulationMaterial::BlownCellulose,
        InsulationMaterial::MineralWool,
        InsulationMaterial::OpenCellSprayFoam,
        InsulationMaterial::ClosedCellSprayFoam,
        InsulationMaterial::RigidXps,
        InsulationMaterial::RigidPolyiso,
    ];

    pub fn r_per_inch(&self) -> f64 {
        match self {
            InsulationMaterial::FiberglassBatt => 3.2,
            InsulationMaterial::BlownFiberglass => 2.5,
            InsulationMaterial::BlownCellulose => 3.5,
            InsulationMaterial::MineralWool => 4.0,
            InsulationMaterial::OpenCellSprayFoam => 3.6,
            InsulationMaterial::ClosedCellSprayFoam => 6.5,
            InsulationMaterial::RigidXps => 5.0,
            InsulationMaterial::RigidPolyiso => 6.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            InsulationMaterial::FiberglassBatt => "Fiberglass Batt",
            InsulationMaterial::BlownFiberglass => "Blown Fiberglass",
            InsulationMaterial::BlownCellulose => "Blown Cellulose",
            InsulationMaterial::MineralWool => "Mineral Wool",
            InsulationMaterial::OpenCellSprayFoam => "Open-Cell Spray Foam",
            InsulationMaterial::ClosedCellSprayFoam => "Closed-Cell Spray Foam",
            InsulationMaterial::RigidXps => "Rigid XPS Board",
            InsulationMaterial::RigidPolyiso => "Rigid Polyiso Board",
        }
    }

    fn slug(&self) -> &'static str {
        match self {
            InsulationMaterial::FiberglassBatt => "fiberglass-batt",
            InsulationMaterial::BlownFiberglass => "blown-fiberglass",
            InsulationMaterial::BlownCellulose => "cellulose",
            InsulationMaterial::MineralWool => "mineral-wool",
            InsulationMaterial::OpenCellSprayFoam => "open-cell-foam",
            InsulationMaterial::ClosedCellSprayFoam => "closed-cell-foam",
            InsulationMaterial::RigidXps => "xps",
            InsulationMaterial::RigidPolyiso => "polyiso",
        }
    }
}

impl FromStr for InsulationMaterial {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        InsulationMaterial::ALL
            .iter()
            .copied()
            .find(|m| m.slug() == wanted)
            .ok_or_else(|| {
                let expected: Vec<_> = InsulationMaterial::ALL.iter().map(|m| m.slug()).collect();
                CalcError::invalid_input("material", s, format!("Expected one of: {}", expected.join(", ")))
            })
    }
}

fn zone_table(targets: [f64; 8]) -> LookupTable<f64> {
    LookupTable::new(
        targets
            .iter()
            .enumerate()
            .map(|(i, r)| ((i + 1) as f64, *r))
            .collect(),
        "No prescriptive target",
    )
    .expect("climate zones 1-8 are strictly increasing")
}

static ATTIC_TARGETS: Lazy<LookupTable<f64>> =
    Lazy::new(|| zone_table([30.0, 49.0, 49.0, 60.0, 60.0, 60.0, 60.0, 60.0]));
static WALL_TARGETS: Lazy<LookupTable<f64>> =
    Lazy::new(|| zone_table([13.0, 13.0, 20.0, 20.0, 20.0, 25.0, 25.0, 25.0]));
static FLOOR_TARGETS: Lazy<LookupTable<f64>> =
    Lazy::new(|| zone_table([13.0, 13.0, 19.0, 19.0, 30.0, 30.0, 38.0, 38.0]));
static BASEMENT_TARGETS: Lazy<LookupTable<f64>> =
    Lazy::new(|| zone_table([0.0, 0.0, 5.0, 10.0, 15.0, 15.0, 15.0, 15.0]));

/// Recommended cumulative R-value for a zone and location.
pub fn target_r_value(zone: ClimateZone, location: InsulationLocation) -> Recommendation<f64> {
    let table = match location {
        InsulationLocation::Attic => &*ATTIC_TARGETS,
        InsulationLocation::Wall => &*WALL_TARGETS,
        InsulationLocation::Floor => &*FLOOR_TARGETS,
        InsulationLocation::BasementWall => &*BASEMENT_TARGETS,
    };
    table.recommend(f64::from(zone.number()))
}
