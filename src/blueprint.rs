//! Ship blueprint generation.
//!
//! A blueprint derives every ship stat from the role's base line, empire
//! tech bonuses, the building corp's level, owned schematics, and a size
//! variant. Each primary stat consumes one random multiplier draw in a fixed
//! order (firepower, armor, evasion, speed, sensors, size); with the
//! mid-point source every multiplier is exactly 1.0, which is the
//! deterministic estimate the contract engine prices commissions with.
//! Intermediate values are floored before they are combined so rounding mode
//! cannot affect results.

use crate::config::{GameConfig, RoleStats, VariantSpec};
use crate::formula;
use crate::rng::TurnRng;
use crate::science::Schematic;
use crate::sector::SectorId;
use crate::ship::{
    Abilities, Captain, CaptainId, DerivedStats, PrimaryStats, Ship, ShipId, ShipOwner,
    ShipRole, ShipStat, ShipStatus, SizeVariant,
};
use serde::{Deserialize, Serialize};

/// A fully derived ship design plus its build economics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub role: ShipRole,
    pub size_variant: SizeVariant,
    pub primary: PrimaryStats,
    /// Size before the variant multiplier; drives cost and build time
    pub raw_size: i64,
    pub derived: DerivedStats,
    pub abilities: Abilities,
    pub bp_per_turn: i64,
    /// Variant-scaled build time before the builder's level discount
    pub build_time: u32,
}

fn schematic_sum(schematics: &[Schematic], stat: ShipStat) -> i64 {
    schematics.iter().filter(|s| s.stat == stat).map(|s| s.bonus).sum()
}

fn primary_stat(
    role_base: i64,
    tech_bonus: i64,
    corp_mod: f64,
    schematic_bonus: i64,
    random_multiplier: f64,
) -> i64 {
    let modded = ((role_base + tech_bonus) as f64 * corp_mod).floor() as i64;
    ((modded + schematic_bonus) as f64 * random_multiplier).floor() as i64
}

/// Generates a blueprint.
///
/// `tech` supplies the cumulative empire tech bonus per stat. The RNG is
/// consumed once per primary stat, in declaration order.
pub fn generate_blueprint(
    role: ShipRole,
    size_variant: SizeVariant,
    corp_level: u32,
    tech: &dyn Fn(ShipStat) -> i64,
    schematics: &[Schematic],
    config: &GameConfig,
    rng: &mut TurnRng,
) -> Blueprint {
    let stats: &RoleStats = config.role_stats(role);
    let variant: &VariantSpec = config.variant_spec(size_variant);
    let corp_mod = formula::corp_stat_modifier(corp_level);

    let mut roll = |base: i64, stat: ShipStat| {
        primary_stat(
            base,
            tech(stat),
            corp_mod,
            schematic_sum(schematics, stat),
            rng.uniform_mult(0.8, 1.2),
        )
    };

    let firepower = roll(stats.firepower, ShipStat::Firepower);
    let armor = roll(stats.armor, ShipStat::Armor);
    let evasion = roll(stats.evasion, ShipStat::Evasion);
    let speed = roll(stats.speed, ShipStat::Speed);
    let sensors = roll(stats.sensors, ShipStat::Sensors);
    let raw_size = roll(stats.base_size, ShipStat::Size);

    let size = (raw_size as f64 * variant.size_multiplier).floor() as i64;
    let primary = PrimaryStats { firepower, armor, evasion, speed, sensors, size };

    let hull_points = size * 5
        + armor * 10
        + schematic_sum(schematics, ShipStat::HullPoints)
        + stats.hull_bonus;
    let power_projection = size * 3 / 2
        + schematic_sum(schematics, ShipStat::PowerProjection)
        + stats.power_bonus;
    let derived = DerivedStats { hull_points, power_projection };

    let bp_per_turn =
        (((raw_size / 3).max(1) as f64 * variant.cost_multiplier).floor() as i64).max(1);
    let base_build_time = raw_size.max(3) + stats.build_time_bonus;
    let build_time =
        (((base_build_time as f64) * variant.build_time_multiplier).floor() as i64).max(1) as u32;

    Blueprint {
        role,
        size_variant,
        primary,
        raw_size,
        derived,
        abilities: Abilities::from_primary(&primary),
        bp_per_turn,
        build_time,
    }
}

/// Build time after the building corp's efficiency discount.
pub fn commission_build_time(build_time: u32, corp_level: u32) -> u32 {
    let discounted = (build_time as f64 * (1.0 - corp_level as f64 * 0.05)).floor() as i64;
    discounted.max(1) as u32
}

/// Materializes a blueprint as a hull under construction with a freshly
/// commissioned captain. The contract engine flips the status to Stationed
/// when the commission completes.
pub fn build_ship(
    ship_id: ShipId,
    captain: &Captain,
    name: String,
    blueprint: &Blueprint,
    schematics: &[Schematic],
    home_sector: SectorId,
    built_turn: u32,
) -> Ship {
    Ship {
        id: ship_id,
        name,
        role: blueprint.role,
        size_variant: blueprint.size_variant,
        primary: blueprint.primary,
        derived: blueprint.derived,
        abilities: blueprint.abilities,
        condition: 100,
        captain: Some(captain.id),
        service_record: Vec::new(),
        status: ShipStatus::UnderConstruction,
        home_sector,
        owner: ShipOwner::Government,
        modifiers: Vec::new(),
        schematics_applied: schematics.iter().map(|s| s.id).collect(),
        built_turn,
    }
}

/// Name for a newly commissioned captain, derived deterministically from the
/// captain id.
pub fn captain_name(id: CaptainId) -> String {
    const SURNAMES: [&str; 12] = [
        "Aldana", "Brandt", "Castellan", "Dray", "Evers", "Farrow", "Giray", "Halloran",
        "Ilves", "Junker", "Kade", "Loreno",
    ];
    format!("Captain {}", SURNAMES[id.0 as usize % SURNAMES.len()])
}
