//! Engine configuration: scalar knobs and every data table.
//!
//! Nothing the formulas consume is hard-coded: planet sizes, deposits, ship
//! roles, size variants, mission types, contract types, colony types,
//! corporate investment domains, planet features, and the discovery pool all
//! live here. `Default` provides the standard rule set; files in YAML or
//! TOML can override any of it.

use crate::colony::ColonyType;
use crate::contract::ContractType;
use crate::corporation::CorpType;
use crate::error::{Result, SimulationError};
use crate::mission::MissionType;
use crate::modifier::ModifierSpec;
use crate::planet::{DepositType, PlanetSize};
use crate::resource::InfraDomain;
use crate::science::{Discovery, DiscoveryEffect, DiscoveryId};
use crate::ship::{ShipRole, ShipStat, SizeVariant};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use strum::IntoEnumIterator;

/// Preset configuration names for typical simulation scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePreset {
    Default,
    SmallGalaxy,
    LargeGalaxy,
    QuickTest,
    DebtSpiral,
}

impl GamePreset {
    /// Get all available preset names
    pub fn all() -> Vec<GamePreset> {
        vec![
            GamePreset::Default,
            GamePreset::SmallGalaxy,
            GamePreset::LargeGalaxy,
            GamePreset::QuickTest,
            GamePreset::DebtSpiral,
        ]
    }

    /// Get the string identifier for this preset
    pub fn as_str(&self) -> &str {
        match self {
            GamePreset::Default => "default",
            GamePreset::SmallGalaxy => "small_galaxy",
            GamePreset::LargeGalaxy => "large_galaxy",
            GamePreset::QuickTest => "quick_test",
            GamePreset::DebtSpiral => "debt_spiral",
        }
    }

    /// Get a description of this preset
    pub fn description(&self) -> &str {
        match self {
            GamePreset::Default => "Standard eight-sector galaxy with the full rule set",
            GamePreset::SmallGalaxy => "Compact four-sector galaxy for shorter games",
            GamePreset::LargeGalaxy => "Sprawling sixteen-sector galaxy",
            GamePreset::QuickTest => "Tiny three-sector galaxy for rapid testing",
            GamePreset::DebtSpiral => "Starts nearly broke to exercise the debt mechanics",
        }
    }

    /// Materialize the preset as a configuration.
    pub fn to_config(self) -> GameConfig {
        let mut config = GameConfig::default();
        match self {
            GamePreset::Default => {}
            GamePreset::SmallGalaxy => {
                config.galaxy_sector_count = 4;
            }
            GamePreset::LargeGalaxy => {
                config.galaxy_sector_count = 16;
            }
            GamePreset::QuickTest => {
                config.galaxy_sector_count = 3;
                config.starting_bp = 30;
            }
            GamePreset::DebtSpiral => {
                config.starting_bp = 5;
            }
        }
        config
    }
}

impl FromStr for GamePreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(GamePreset::Default),
            "small_galaxy" | "small" => Ok(GamePreset::SmallGalaxy),
            "large_galaxy" | "large" => Ok(GamePreset::LargeGalaxy),
            "quick_test" | "quick" => Ok(GamePreset::QuickTest),
            "debt_spiral" | "debt" => Ok(GamePreset::DebtSpiral),
            _ => Err(format!("Unknown preset: '{}'", s)),
        }
    }
}

/// Base stat line for a ship role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleStats {
    pub base_size: i64,
    pub firepower: i64,
    pub armor: i64,
    pub evasion: i64,
    pub speed: i64,
    pub sensors: i64,
    pub build_time_bonus: i64,
    pub hull_bonus: i64,
    pub power_bonus: i64,
}

/// Multipliers a size variant applies to a role's raw blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSpec {
    pub size_multiplier: f64,
    pub build_time_multiplier: f64,
    pub cost_multiplier: f64,
}

/// Cost and duration envelope of a mission type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionSpec {
    pub base_bp_per_turn: i64,
    pub duration_min: u32,
    pub duration_max: u32,
}

/// Eligibility and base economics of a contract type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSpec {
    pub eligible_corp_types: Vec<CorpType>,
    pub base_bp_per_turn: i64,
    /// Ignored where the type derives duration (exploration, colonization,
    /// ship commission)
    pub base_duration: u32,
}

/// Starting shape and economics of a colony type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColonySpec {
    pub starting_infrastructure: BTreeMap<InfraDomain, u32>,
    pub bp_per_turn: i64,
    pub duration: u32,
    pub passive_modifiers: Vec<ModifierSpec>,
}

/// A planet feature the generator can roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub name: String,
    pub orbit_visible: bool,
    pub modifiers: Vec<ModifierSpec>,
}

/// A corporation seeded into the initial state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedCorp {
    pub name: String,
    pub corp_type: CorpType,
    pub level: u32,
    pub capital: i64,
}

/// Full engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Treasury at game start
    pub starting_bp: i64,
    #[serde(default)]
    pub starting_debt_tokens: u8,
    /// Sectors generated into the starting galaxy
    pub galaxy_sector_count: u32,
    /// Colony type of the homeworld settlement
    #[serde(default = "default_seed_colony_type")]
    pub seed_colony_type: ColonyType,
    #[serde(default = "default_seed_corps")]
    pub seed_corps: Vec<SeedCorp>,
    #[serde(default = "default_max_population")]
    pub max_population: BTreeMap<PlanetSize, u32>,
    #[serde(default = "default_deposit_bonuses")]
    pub deposit_infra_bonus_table: BTreeMap<DepositType, u32>,
    #[serde(default = "default_ship_roles")]
    pub ship_roles: BTreeMap<ShipRole, RoleStats>,
    #[serde(default = "default_size_variants")]
    pub size_variants: BTreeMap<SizeVariant, VariantSpec>,
    #[serde(default = "default_mission_types")]
    pub mission_types: BTreeMap<MissionType, MissionSpec>,
    #[serde(default = "default_contract_types")]
    pub contract_types: BTreeMap<ContractType, ContractSpec>,
    #[serde(default = "default_colony_types")]
    pub colony_types: BTreeMap<ColonyType, ColonySpec>,
    #[serde(default = "default_primary_domains")]
    pub corp_primary_domains: BTreeMap<CorpType, Vec<InfraDomain>>,
    #[serde(default = "default_planet_features")]
    pub planet_features: Vec<FeatureSpec>,
    #[serde(default = "default_discoveries")]
    pub discoveries: Vec<Discovery>,
}

fn default_seed_colony_type() -> ColonyType {
    ColonyType::Frontier
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            starting_bp: 50,
            starting_debt_tokens: 0,
            galaxy_sector_count: 8,
            seed_colony_type: ColonyType::Frontier,
            seed_corps: default_seed_corps(),
            max_population: default_max_population(),
            deposit_infra_bonus_table: default_deposit_bonuses(),
            ship_roles: default_ship_roles(),
            size_variants: default_size_variants(),
            mission_types: default_mission_types(),
            contract_types: default_contract_types(),
            colony_types: default_colony_types(),
            corp_primary_domains: default_primary_domains(),
            planet_features: default_planet_features(),
            discoveries: default_discoveries(),
        }
    }
}

impl GameConfig {
    /// Loads a configuration from a YAML or TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(SimulationError::ConfigFileRead)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        let config: GameConfig = match extension.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| SimulationError::YamlParse(e.to_string()))?,
            "toml" => toml::from_str(&contents)
                .map_err(|e| SimulationError::TomlParse(e.to_string()))?,
            other => return Err(SimulationError::UnsupportedConfigFormat(other.to_string())),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration: positive scalars, a complete entry for
    /// every enum-keyed table, and sane ranges.
    pub fn validate(&self) -> Result<()> {
        if self.galaxy_sector_count == 0 {
            return Err(SimulationError::ValidationError(
                "galaxy_sector_count must be greater than 0".to_string(),
            ));
        }
        if self.starting_bp < 0 {
            return Err(SimulationError::ValidationError(format!(
                "starting_bp must be non-negative, got: {}",
                self.starting_bp
            )));
        }
        if self.starting_debt_tokens > 10 {
            return Err(SimulationError::ValidationError(format!(
                "starting_debt_tokens must be at most 10, got: {}",
                self.starting_debt_tokens
            )));
        }
        for size in PlanetSize::iter() {
            match self.max_population.get(&size) {
                None => {
                    return Err(SimulationError::ValidationError(format!(
                        "max_population is missing an entry for {}",
                        size
                    )))
                }
                Some(0) => {
                    return Err(SimulationError::ValidationError(format!(
                        "max_population for {} must be at least 1",
                        size
                    )))
                }
                Some(_) => {}
            }
        }
        for deposit in DepositType::iter() {
            if !self.deposit_infra_bonus_table.contains_key(&deposit) {
                return Err(SimulationError::ValidationError(format!(
                    "deposit_infra_bonus_table is missing an entry for {}",
                    deposit
                )));
            }
        }
        for role in ShipRole::iter() {
            if !self.ship_roles.contains_key(&role) {
                return Err(SimulationError::ValidationError(format!(
                    "ship_roles is missing an entry for {}",
                    role
                )));
            }
        }
        for variant in SizeVariant::iter() {
            match self.size_variants.get(&variant) {
                None => {
                    return Err(SimulationError::ValidationError(format!(
                        "size_variants is missing an entry for {}",
                        variant
                    )))
                }
                Some(spec)
                    if spec.size_multiplier <= 0.0
                        || spec.build_time_multiplier <= 0.0
                        || spec.cost_multiplier <= 0.0 =>
                {
                    return Err(SimulationError::ValidationError(format!(
                        "size_variants for {} must have positive multipliers",
                        variant
                    )))
                }
                Some(_) => {}
            }
        }
        for mission in MissionType::iter() {
            match self.mission_types.get(&mission) {
                None => {
                    return Err(SimulationError::ValidationError(format!(
                        "mission_types is missing an entry for {}",
                        mission
                    )))
                }
                Some(spec) if spec.duration_min == 0 || spec.duration_min > spec.duration_max => {
                    return Err(SimulationError::ValidationError(format!(
                        "mission_types for {} has an invalid duration range",
                        mission
                    )))
                }
                Some(_) => {}
            }
        }
        for contract_type in [
            ContractType::Exploration,
            ContractType::GroundSurvey,
            ContractType::Colonization,
            ContractType::ShipCommission,
            ContractType::TradeRoute,
        ] {
            if !self.contract_types.contains_key(&contract_type) {
                return Err(SimulationError::ValidationError(format!(
                    "contract_types is missing an entry for {:?}",
                    contract_type
                )));
            }
        }
        for colony_type in [
            ColonyType::Frontier,
            ColonyType::Agrarian,
            ColonyType::Mining,
            ColonyType::Industrial,
            ColonyType::Science,
            ColonyType::Military,
            ColonyType::Trade,
        ] {
            if !self.colony_types.contains_key(&colony_type) {
                return Err(SimulationError::ValidationError(format!(
                    "colony_types is missing an entry for {}",
                    colony_type
                )));
            }
        }
        for corp_type in CorpType::iter() {
            if !self.corp_primary_domains.contains_key(&corp_type) {
                return Err(SimulationError::ValidationError(format!(
                    "corp_primary_domains is missing an entry for {}",
                    corp_type
                )));
            }
        }
        Ok(())
    }

    pub fn max_population_for(&self, size: PlanetSize) -> u32 {
        *self
            .max_population
            .get(&size)
            .expect("max_population table entry missing (config not validated)")
    }

    pub fn deposit_infra_bonus(&self, deposit: DepositType) -> u32 {
        *self
            .deposit_infra_bonus_table
            .get(&deposit)
            .expect("deposit bonus table entry missing (config not validated)")
    }

    pub fn role_stats(&self, role: ShipRole) -> &RoleStats {
        self.ship_roles
            .get(&role)
            .expect("ship role table entry missing (config not validated)")
    }

    pub fn variant_spec(&self, variant: SizeVariant) -> &VariantSpec {
        self.size_variants
            .get(&variant)
            .expect("size variant table entry missing (config not validated)")
    }

    pub fn mission_spec(&self, mission: MissionType) -> &MissionSpec {
        self.mission_types
            .get(&mission)
            .expect("mission table entry missing (config not validated)")
    }

    pub fn contract_spec(&self, contract_type: ContractType) -> &ContractSpec {
        self.contract_types
            .get(&contract_type)
            .expect("contract table entry missing (config not validated)")
    }

    pub fn colony_spec(&self, colony_type: ColonyType) -> &ColonySpec {
        self.colony_types
            .get(&colony_type)
            .expect("colony table entry missing (config not validated)")
    }

    pub fn primary_domains(&self, corp_type: CorpType) -> &[InfraDomain] {
        self.corp_primary_domains
            .get(&corp_type)
            .map(Vec::as_slice)
            .expect("corp domain table entry missing (config not validated)")
    }
}

fn default_max_population() -> BTreeMap<PlanetSize, u32> {
    BTreeMap::from([
        (PlanetSize::Tiny, 4),
        (PlanetSize::Small, 6),
        (PlanetSize::Medium, 8),
        (PlanetSize::Large, 10),
        (PlanetSize::Huge, 12),
    ])
}

fn default_deposit_bonuses() -> BTreeMap<DepositType, u32> {
    BTreeMap::from([
        (DepositType::MetallicOre, 6),
        (DepositType::RareMetals, 4),
        (DepositType::VolatileGases, 6),
        (DepositType::NobleGases, 4),
        (DepositType::ExoticCompounds, 5),
        (DepositType::PrecursorRelics, 3),
    ])
}

fn default_ship_roles() -> BTreeMap<ShipRole, RoleStats> {
    BTreeMap::from([
        (
            ShipRole::SystemPatrol,
            RoleStats {
                base_size: 3,
                firepower: 4,
                armor: 3,
                evasion: 5,
                speed: 5,
                sensors: 4,
                build_time_bonus: 0,
                hull_bonus: 0,
                power_bonus: 0,
            },
        ),
        (
            ShipRole::Surveyor,
            RoleStats {
                base_size: 4,
                firepower: 1,
                armor: 2,
                evasion: 4,
                speed: 6,
                sensors: 8,
                build_time_bonus: 1,
                hull_bonus: 0,
                power_bonus: 5,
            },
        ),
        (
            ShipRole::Escort,
            RoleStats {
                base_size: 5,
                firepower: 6,
                armor: 5,
                evasion: 4,
                speed: 4,
                sensors: 3,
                build_time_bonus: 1,
                hull_bonus: 10,
                power_bonus: 0,
            },
        ),
        (
            ShipRole::Freighter,
            RoleStats {
                base_size: 6,
                firepower: 1,
                armor: 4,
                evasion: 2,
                speed: 3,
                sensors: 2,
                build_time_bonus: 1,
                hull_bonus: 20,
                power_bonus: 0,
            },
        ),
        (
            ShipRole::Cruiser,
            RoleStats {
                base_size: 8,
                firepower: 8,
                armor: 7,
                evasion: 3,
                speed: 4,
                sensors: 5,
                build_time_bonus: 2,
                hull_bonus: 20,
                power_bonus: 10,
            },
        ),
        (
            ShipRole::Battleship,
            RoleStats {
                base_size: 10,
                firepower: 10,
                armor: 9,
                evasion: 2,
                speed: 3,
                sensors: 4,
                build_time_bonus: 3,
                hull_bonus: 40,
                power_bonus: 15,
            },
        ),
    ])
}

fn default_size_variants() -> BTreeMap<SizeVariant, VariantSpec> {
    BTreeMap::from([
        (
            SizeVariant::Light,
            VariantSpec {
                size_multiplier: 0.75,
                build_time_multiplier: 0.8,
                cost_multiplier: 0.8,
            },
        ),
        (
            SizeVariant::Standard,
            VariantSpec {
                size_multiplier: 1.0,
                build_time_multiplier: 1.0,
                cost_multiplier: 1.0,
            },
        ),
        (
            SizeVariant::Heavy,
            VariantSpec {
                size_multiplier: 1.25,
                build_time_multiplier: 1.3,
                cost_multiplier: 1.4,
            },
        ),
    ])
}

fn default_mission_types() -> BTreeMap<MissionType, MissionSpec> {
    BTreeMap::from([
        (
            MissionType::Patrol,
            MissionSpec { base_bp_per_turn: 2, duration_min: 2, duration_max: 4 },
        ),
        (
            MissionType::Reconnaissance,
            MissionSpec { base_bp_per_turn: 2, duration_min: 3, duration_max: 5 },
        ),
        (
            MissionType::Salvage,
            MissionSpec { base_bp_per_turn: 3, duration_min: 2, duration_max: 5 },
        ),
        (
            MissionType::Suppression,
            MissionSpec { base_bp_per_turn: 4, duration_min: 3, duration_max: 6 },
        ),
    ])
}

fn default_contract_types() -> BTreeMap<ContractType, ContractSpec> {
    BTreeMap::from([
        (
            ContractType::Exploration,
            ContractSpec {
                eligible_corp_types: vec![CorpType::Exploration],
                base_bp_per_turn: 3,
                base_duration: 4,
            },
        ),
        (
            ContractType::GroundSurvey,
            ContractSpec {
                eligible_corp_types: vec![CorpType::Exploration, CorpType::Science],
                base_bp_per_turn: 2,
                base_duration: 3,
            },
        ),
        (
            ContractType::Colonization,
            ContractSpec {
                eligible_corp_types: vec![CorpType::Construction],
                base_bp_per_turn: 4,
                base_duration: 6,
            },
        ),
        (
            ContractType::ShipCommission,
            ContractSpec {
                eligible_corp_types: vec![CorpType::Shipbuilding],
                base_bp_per_turn: 2,
                base_duration: 3,
            },
        ),
        (
            ContractType::TradeRoute,
            ContractSpec {
                eligible_corp_types: vec![CorpType::Transport],
                base_bp_per_turn: 2,
                base_duration: 9999,
            },
        ),
    ])
}

fn default_colony_types() -> BTreeMap<ColonyType, ColonySpec> {
    BTreeMap::from([
        (
            ColonyType::Frontier,
            ColonySpec {
                starting_infrastructure: BTreeMap::from([
                    (InfraDomain::Civilian, 2),
                    (InfraDomain::Agricultural, 1),
                ]),
                bp_per_turn: 4,
                duration: 6,
                passive_modifiers: vec![ModifierSpec::add("growth", 1.0)],
            },
        ),
        (
            ColonyType::Agrarian,
            ColonySpec {
                starting_infrastructure: BTreeMap::from([
                    (InfraDomain::Civilian, 2),
                    (InfraDomain::Agricultural, 3),
                ]),
                bp_per_turn: 4,
                duration: 5,
                passive_modifiers: vec![ModifierSpec::add("growth", 1.0)],
            },
        ),
        (
            ColonyType::Mining,
            ColonySpec {
                starting_infrastructure: BTreeMap::from([
                    (InfraDomain::Civilian, 2),
                    (InfraDomain::Mining, 2),
                ]),
                bp_per_turn: 5,
                duration: 6,
                passive_modifiers: vec![ModifierSpec::add("dynamism", 1.0)],
            },
        ),
        (
            ColonyType::Industrial,
            ColonySpec {
                starting_infrastructure: BTreeMap::from([
                    (InfraDomain::Civilian, 2),
                    (InfraDomain::LowIndustry, 2),
                ]),
                bp_per_turn: 6,
                duration: 7,
                passive_modifiers: vec![ModifierSpec::add("dynamism", 1.0)],
            },
        ),
        (
            ColonyType::Science,
            ColonySpec {
                starting_infrastructure: BTreeMap::from([
                    (InfraDomain::Civilian, 2),
                    (InfraDomain::Science, 2),
                ]),
                bp_per_turn: 6,
                duration: 7,
                passive_modifiers: vec![ModifierSpec::add("qualityOfLife", 1.0)],
            },
        ),
        (
            ColonyType::Military,
            ColonySpec {
                starting_infrastructure: BTreeMap::from([
                    (InfraDomain::Civilian, 2),
                    (InfraDomain::Military, 2),
                ]),
                bp_per_turn: 6,
                duration: 7,
                passive_modifiers: vec![ModifierSpec::add("stability", 1.0)],
            },
        ),
        (
            ColonyType::Trade,
            ColonySpec {
                starting_infrastructure: BTreeMap::from([
                    (InfraDomain::Civilian, 2),
                    (InfraDomain::Commerce, 2),
                    (InfraDomain::Transport, 1),
                ]),
                bp_per_turn: 5,
                duration: 6,
                passive_modifiers: vec![ModifierSpec::add("accessibility", 1.0)],
            },
        ),
    ])
}

fn default_primary_domains() -> BTreeMap<CorpType, Vec<InfraDomain>> {
    BTreeMap::from([
        (
            CorpType::Exploration,
            vec![InfraDomain::Transport, InfraDomain::Science],
        ),
        (
            CorpType::Construction,
            vec![InfraDomain::Civilian, InfraDomain::Commerce],
        ),
        (
            CorpType::Industrial,
            vec![InfraDomain::LowIndustry, InfraDomain::HighIndustry],
        ),
        (CorpType::Shipbuilding, vec![InfraDomain::SpaceIndustry]),
        (CorpType::Science, vec![InfraDomain::Science]),
        (
            CorpType::Transport,
            vec![InfraDomain::Transport, InfraDomain::Commerce],
        ),
        (CorpType::Military, vec![InfraDomain::Military]),
        (CorpType::Agriculture, vec![InfraDomain::Agricultural]),
        (
            CorpType::Exploitation,
            vec![
                InfraDomain::Mining,
                InfraDomain::GasExtraction,
                InfraDomain::Exploitation,
            ],
        ),
    ])
}

fn default_planet_features() -> Vec<FeatureSpec> {
    vec![
        FeatureSpec {
            name: "Fertile Lowlands".to_string(),
            orbit_visible: false,
            modifiers: vec![ModifierSpec::add("habitability", 1.0)],
        },
        FeatureSpec {
            name: "Vast Ocean Shelves".to_string(),
            orbit_visible: true,
            modifiers: vec![ModifierSpec::add("growth", 1.0)],
        },
        FeatureSpec {
            name: "Orbital Ring Fragments".to_string(),
            orbit_visible: true,
            modifiers: vec![ModifierSpec::add("accessibility", 1.0)],
        },
        FeatureSpec {
            name: "Geothermal Vents".to_string(),
            orbit_visible: false,
            modifiers: vec![ModifierSpec::add("dynamism", 1.0)],
        },
        FeatureSpec {
            name: "Corrosive Spores".to_string(),
            orbit_visible: false,
            modifiers: vec![ModifierSpec::add("habitability", -1.0)],
        },
        FeatureSpec {
            name: "Shattered Crust".to_string(),
            orbit_visible: true,
            modifiers: vec![ModifierSpec::add("habitability", -1.0)],
        },
        FeatureSpec {
            name: "Crystalline Caverns".to_string(),
            orbit_visible: false,
            modifiers: vec![ModifierSpec::add("qualityOfLife", 1.0)],
        },
        FeatureSpec {
            name: "Ancient Foundations".to_string(),
            orbit_visible: false,
            modifiers: vec![ModifierSpec::add("stability", 1.0)],
        },
    ]
}

fn default_seed_corps() -> Vec<SeedCorp> {
    vec![
        SeedCorp {
            name: "Meridian Charter Company".to_string(),
            corp_type: CorpType::Exploration,
            level: 2,
            capital: 6,
        },
        SeedCorp {
            name: "Hadley Construction Group".to_string(),
            corp_type: CorpType::Construction,
            level: 2,
            capital: 6,
        },
        SeedCorp {
            name: "Vulcan Forgeworks".to_string(),
            corp_type: CorpType::Industrial,
            level: 1,
            capital: 4,
        },
        SeedCorp {
            name: "Orbital Dynamics Yard".to_string(),
            corp_type: CorpType::Shipbuilding,
            level: 1,
            capital: 4,
        },
        SeedCorp {
            name: "Helix Research Collective".to_string(),
            corp_type: CorpType::Science,
            level: 1,
            capital: 4,
        },
        SeedCorp {
            name: "Translight Cartage".to_string(),
            corp_type: CorpType::Transport,
            level: 1,
            capital: 4,
        },
        SeedCorp {
            name: "Veridian Agrarian Combine".to_string(),
            corp_type: CorpType::Agriculture,
            level: 1,
            capital: 4,
        },
        SeedCorp {
            name: "Stratum Extraction Ventures".to_string(),
            corp_type: CorpType::Exploitation,
            level: 1,
            capital: 4,
        },
    ]
}

fn default_discoveries() -> Vec<Discovery> {
    vec![
        Discovery {
            id: DiscoveryId(1),
            name: "Ablative Hull Lattice".to_string(),
            min_level: 1,
            effect: DiscoveryEffect::TechBonus { stat: ShipStat::Armor, value: 1 },
        },
        Discovery {
            id: DiscoveryId(2),
            name: "Pulse Drive Tuning".to_string(),
            min_level: 1,
            effect: DiscoveryEffect::TechBonus { stat: ShipStat::Speed, value: 1 },
        },
        Discovery {
            id: DiscoveryId(3),
            name: "Wideband Sensor Arrays".to_string(),
            min_level: 2,
            effect: DiscoveryEffect::TechBonus { stat: ShipStat::Sensors, value: 2 },
        },
        Discovery {
            id: DiscoveryId(4),
            name: "Magnetic Accelerator Doctrine".to_string(),
            min_level: 3,
            effect: DiscoveryEffect::TechBonus { stat: ShipStat::Firepower, value: 2 },
        },
        Discovery {
            id: DiscoveryId(5),
            name: "Distributed Shipyard Logistics".to_string(),
            min_level: 2,
            effect: DiscoveryEffect::AttributeBonus {
                target: "accessibility".to_string(),
                value: 1.0,
            },
        },
        Discovery {
            id: DiscoveryId(6),
            name: "Arcology Planning".to_string(),
            min_level: 3,
            effect: DiscoveryEffect::AttributeBonus {
                target: "qualityOfLife".to_string(),
                value: 1.0,
            },
        },
        Discovery {
            id: DiscoveryId(7),
            name: "Civic Resilience Programs".to_string(),
            min_level: 4,
            effect: DiscoveryEffect::AttributeBonus {
                target: "stability".to_string(),
                value: 1.0,
            },
        },
        Discovery {
            id: DiscoveryId(8),
            name: "Hydroponic Towers".to_string(),
            min_level: 2,
            effect: DiscoveryEffect::AttributeBonus {
                target: "growth".to_string(),
                value: 1.0,
            },
        },
        Discovery {
            id: DiscoveryId(9),
            name: "Reinforced Keel Schematics".to_string(),
            min_level: 3,
            effect: DiscoveryEffect::Schematic { stat: ShipStat::HullPoints, bonus: 15 },
        },
        Discovery {
            id: DiscoveryId(10),
            name: "Vectored Thruster Schematics".to_string(),
            min_level: 4,
            effect: DiscoveryEffect::Schematic { stat: ShipStat::Evasion, bonus: 2 },
        },
        Discovery {
            id: DiscoveryId(11),
            name: "Autoloader Schematics".to_string(),
            min_level: 5,
            effect: DiscoveryEffect::Schematic { stat: ShipStat::Firepower, bonus: 3 },
        },
        Discovery {
            id: DiscoveryId(12),
            name: "Deep-Space Telemetry".to_string(),
            min_level: 6,
            effect: DiscoveryEffect::TechBonus { stat: ShipStat::Sensors, value: 3 },
        },
    ]
}
