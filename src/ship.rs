//! Ships, captains, roles, and size variants.

use crate::corporation::CorpId;
use crate::formula;
use crate::modifier::Modifier;
use crate::science::SchematicId;
use crate::sector::SectorId;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Unique identifier for a ship.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ShipId(pub u32);

impl std::fmt::Display for ShipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ship-{}", self.0)
    }
}

/// Unique identifier for a captain.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CaptainId(pub u32);

impl std::fmt::Display for CaptainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "captain-{}", self.0)
    }
}

/// A ship's commanding officer. Experience accrues on mission completion and
/// decides task-force command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Captain {
    pub id: CaptainId,
    pub name: String,
    pub experience: u32,
}

/// Hull archetype; indexes the role stat table in configuration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumIter, EnumString,
)]
pub enum ShipRole {
    SystemPatrol,
    Surveyor,
    Escort,
    Freighter,
    Cruiser,
    Battleship,
}

/// Displacement variant applied over the role's raw size.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumIter, EnumString,
)]
pub enum SizeVariant {
    Light,
    Standard,
    Heavy,
}

/// One of the stats a schematic or tech bonus can target.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumIter,
)]
pub enum ShipStat {
    Firepower,
    Armor,
    Evasion,
    Speed,
    Sensors,
    Size,
    HullPoints,
    PowerProjection,
}

/// Where a ship is in its service lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ShipStatus {
    UnderConstruction,
    Stationed,
    OnMission,
    UnderRepair,
    Destroyed,
}

/// Who operates a ship. Government ships crew missions; corporate ships do
/// not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipOwner {
    Government,
    Corp(CorpId),
}

/// The five rolled primary stats plus final size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PrimaryStats {
    pub firepower: i64,
    pub armor: i64,
    pub evasion: i64,
    pub speed: i64,
    pub sensors: i64,
    pub size: i64,
}

/// Stats derived from the primaries at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DerivedStats {
    pub hull_points: i64,
    pub power_projection: i64,
}

/// Mission-facing abilities computed from the primaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Abilities {
    pub fight: i64,
    pub investigation: i64,
    pub support: i64,
}

impl Abilities {
    /// Derives all three abilities from a set of primary stats.
    pub fn from_primary(primary: &PrimaryStats) -> Self {
        Abilities {
            fight: formula::fight_ability(
                primary.firepower,
                primary.armor,
                primary.evasion,
                primary.size,
            ),
            investigation: formula::investigation_ability(
                primary.speed,
                primary.sensors,
                primary.size,
            ),
            support: formula::support_ability(primary.firepower, primary.sensors, primary.size),
        }
    }
}

/// A commissioned (or commissioning) vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub name: String,
    pub role: ShipRole,
    pub size_variant: SizeVariant,
    pub primary: PrimaryStats,
    pub derived: DerivedStats,
    pub abilities: Abilities,
    /// 0..=100
    pub condition: u32,
    pub captain: Option<CaptainId>,
    pub service_record: Vec<String>,
    pub status: ShipStatus,
    pub home_sector: SectorId,
    pub owner: ShipOwner,
    pub modifiers: Vec<Modifier>,
    pub schematics_applied: Vec<SchematicId>,
    pub built_turn: u32,
}

impl Ship {
    /// Whether this ship can be assigned to a new mission.
    pub fn mission_ready(&self) -> bool {
        self.owner == ShipOwner::Government && self.status == ShipStatus::Stationed
    }

    /// Applies mission wear: condition loss and a service-record line.
    pub fn record_mission(&mut self, entry: String, wear: u32) {
        self.condition = self.condition.saturating_sub(wear).max(10);
        self.service_record.push(entry);
    }
}
