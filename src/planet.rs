//! Planets, deposits, and surface features.
//!
//! A planet's status is strictly monotonic in the information dimension:
//! Undiscovered → OrbitScanned → (Accepted | GroundSurveyed) → Colonized.
//! Rejected is the only sideways terminal, and it is the player's. Planets
//! are created by exploration contract completions and mutated only by
//! contract completions and player accept/reject orders.

use crate::config::GameConfig;
use crate::modifier::ModifierSpec;
use crate::resource::InfraDomain;
use crate::rng::TurnRng;
use crate::sector::SectorId;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Unique identifier for a planet.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PlanetId(pub u32);

impl std::fmt::Display for PlanetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "planet-{}", self.0)
    }
}

/// Broad surface classification; sets the base habitability band.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumIter,
)]
pub enum PlanetType {
    Continental,
    Oceanic,
    Jungle,
    Arid,
    Tundra,
    Volcanic,
    Barren,
    Toxic,
}

impl PlanetType {
    /// Default base habitability before generation jitter.
    pub fn base_habitability(self) -> i64 {
        match self {
            PlanetType::Continental => 7,
            PlanetType::Oceanic => 6,
            PlanetType::Jungle => 6,
            PlanetType::Arid => 4,
            PlanetType::Tundra => 4,
            PlanetType::Volcanic => 2,
            PlanetType::Barren => 1,
            PlanetType::Toxic => 0,
        }
    }
}

/// Physical size class; drives the maximum population level via config.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumIter,
)]
pub enum PlanetSize {
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
}

/// Where a planet sits in the discovery pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum PlanetStatus {
    Undiscovered,
    OrbitScanned,
    Accepted,
    Rejected,
    GroundSurveyed,
    Colonized,
}

/// Abundance tier of a deposit. Display-only once the planet is accepted;
/// the infrastructure cap comes from the deposit type's configured bonus.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumIter,
)]
pub enum Richness {
    Poor,
    Moderate,
    Rich,
    Exceptional,
}

impl Richness {
    /// Extraction output multiplier.
    pub fn multiplier(self) -> f64 {
        match self {
            Richness::Poor => 0.5,
            Richness::Moderate => 1.0,
            Richness::Rich => 1.5,
            Richness::Exceptional => 2.0,
        }
    }
}

/// Kind of exploitable deposit. Each kind feeds exactly one extraction
/// domain.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumIter,
)]
pub enum DepositType {
    MetallicOre,
    RareMetals,
    VolatileGases,
    NobleGases,
    ExoticCompounds,
    PrecursorRelics,
}

impl DepositType {
    /// The extraction domain this deposit unlocks.
    pub fn domain(self) -> InfraDomain {
        match self {
            DepositType::MetallicOre | DepositType::RareMetals => InfraDomain::Mining,
            DepositType::VolatileGases | DepositType::NobleGases => InfraDomain::GasExtraction,
            DepositType::ExoticCompounds | DepositType::PrecursorRelics => {
                InfraDomain::Exploitation
            }
        }
    }
}

/// One exploitable deposit on a planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    pub deposit_type: DepositType,
    pub richness: Richness,
    /// Richness stays hidden until a ground survey
    pub richness_revealed: bool,
}

/// A named surface or orbital feature. Its modifier templates attach to the
/// colony at colonization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetFeature {
    pub name: String,
    /// Visible to tier-2 orbit scans; otherwise only a ground survey finds it
    pub orbit_visible: bool,
    pub revealed: bool,
    pub modifiers: Vec<ModifierSpec>,
}

/// A world known to the empire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub name: String,
    pub sector: SectorId,
    pub planet_type: PlanetType,
    pub size: PlanetSize,
    pub status: PlanetStatus,
    /// 0..=10 before colony modifiers
    pub base_habitability: i64,
    pub deposits: Vec<Deposit>,
    /// Ordered by discovery
    pub features: Vec<PlanetFeature>,
    /// Detail tier of the best orbit scan so far (0 = none)
    pub scan_tier: u8,
    pub orbit_scan_turn: Option<u32>,
    pub ground_survey_turn: Option<u32>,
}

impl Planet {
    /// Maximum population level this planet supports.
    pub fn max_population(&self, config: &GameConfig) -> u32 {
        config.max_population_for(self.size)
    }

    /// Best matching deposit bonus for an extraction domain, if any deposit
    /// of that domain exists.
    pub fn best_deposit_bonus(&self, domain: InfraDomain, config: &GameConfig) -> Option<u32> {
        self.deposits
            .iter()
            .filter(|d| d.deposit_type.domain() == domain)
            .map(|d| config.deposit_infra_bonus(d.deposit_type))
            .max()
    }

    /// Best richness among deposits matching an extraction domain.
    pub fn best_deposit_richness(&self, domain: InfraDomain) -> Option<Richness> {
        self.deposits
            .iter()
            .filter(|d| d.deposit_type.domain() == domain)
            .map(|d| d.richness)
            .max()
    }

    /// Marks every deposit's richness and every feature as surveyed.
    pub fn apply_ground_survey(&mut self, turn: u32) {
        for deposit in &mut self.deposits {
            deposit.richness_revealed = true;
        }
        for feature in &mut self.features {
            feature.revealed = true;
        }
        self.ground_survey_turn = Some(turn);
    }
}

/// Generates a freshly orbit-scanned planet.
///
/// Consumes the RNG in a fixed order (type, size, habitability jitter,
/// deposit count, per-deposit type and richness, feature count, per-feature
/// pick) so replays reproduce identical worlds.
pub fn generate_planet(
    id: PlanetId,
    name: String,
    sector: SectorId,
    scan_tier: u8,
    turn: u32,
    config: &GameConfig,
    rng: &mut TurnRng,
) -> Planet {
    let types: Vec<PlanetType> = PlanetType::iter().collect();
    let planet_type = types[rng.roll_range(0, types.len() as u32 - 1) as usize];

    let sizes: Vec<PlanetSize> = PlanetSize::iter().collect();
    let size_weights = [15.0, 25.0, 30.0, 20.0, 10.0];
    let size = sizes[rng.weighted_index(&size_weights).unwrap_or(2)];

    let jitter = rng.roll_range(0, 2) as i64 - 1;
    let base_habitability = (planet_type.base_habitability() + jitter).clamp(0, 10);

    let deposit_count = rng.roll_range(0, 3);
    let deposit_types: Vec<DepositType> = DepositType::iter().collect();
    let richness_tiers: Vec<Richness> = Richness::iter().collect();
    let richness_weights = [30.0, 40.0, 20.0, 10.0];
    let mut deposits = Vec::new();
    for _ in 0..deposit_count {
        let deposit_type =
            deposit_types[rng.roll_range(0, deposit_types.len() as u32 - 1) as usize];
        let richness = richness_tiers[rng.weighted_index(&richness_weights).unwrap_or(1)];
        deposits.push(Deposit { deposit_type, richness, richness_revealed: false });
    }

    let feature_count = rng.roll_range(0, 2);
    let mut features: Vec<PlanetFeature> = Vec::new();
    for _ in 0..feature_count {
        if config.planet_features.is_empty() {
            break;
        }
        let spec = &config.planet_features
            [rng.roll_range(0, config.planet_features.len() as u32 - 1) as usize];
        if features.iter().any(|f| f.name == spec.name) {
            continue;
        }
        features.push(PlanetFeature {
            name: spec.name.clone(),
            orbit_visible: spec.orbit_visible,
            revealed: scan_tier >= 2 && spec.orbit_visible,
            modifiers: spec.modifiers.clone(),
        });
    }

    Planet {
        id,
        name,
        sector,
        planet_type,
        size,
        status: PlanetStatus::OrbitScanned,
        base_habitability,
        deposits,
        features,
        scan_tier,
        orbit_scan_turn: Some(turn),
        ground_survey_turn: None,
    }
}
