//! Pure formula library.
//!
//! Every function here is stateless and total over its domain. Results are
//! integers unless noted; intermediate floating-point values are floored
//! before they are combined with integer logic so rounding mode can never
//! affect a turn resolution.

use crate::planet::Richness;
use crate::resource::InfraDomain;

// ---------------------------------------------------------------------------
// Production
// ---------------------------------------------------------------------------

/// Raw extraction output before the richness cap. May be non-integer by the
/// multiplier.
pub fn extraction(infra_level: u32, richness_modifier: f64) -> f64 {
    infra_level as f64 * richness_modifier
}

/// Hard output ceiling for an extraction domain backed by a deposit of the
/// given richness.
pub fn extraction_cap(richness: Richness) -> u32 {
    match richness {
        Richness::Poor => 5,
        Richness::Moderate => 10,
        Richness::Rich => 15,
        Richness::Exceptional => 20,
    }
}

/// Final per-colony extraction output: floored multiplier output, capped by
/// richness.
pub fn extraction_output(infra_level: u32, richness: Richness) -> i64 {
    let raw = extraction(infra_level, richness.multiplier()).floor() as i64;
    raw.min(extraction_cap(richness) as i64)
}

/// Manufacturing output. With all inputs available the domain runs at full
/// level; otherwise it limps at half rate, never below one while staffed.
pub fn manufacturing(infra_level: u32, inputs_available: bool) -> u32 {
    if infra_level == 0 {
        return 0;
    }
    if inputs_available {
        infra_level
    } else {
        (infra_level / 2).max(1)
    }
}

/// Input demand per required resource for a manufacturing domain.
pub fn industrial_input(infra_level: u32) -> u32 {
    infra_level
}

/// Population draw on food, consumer goods, and transport capacity alike.
pub fn population_consumption(pop_level: u32) -> u32 {
    pop_level
}

/// Population-driven infrastructure cap for a domain, before deposit gating.
///
/// Civilian infrastructure is uncapped (`None`); its `(pop+1)*2` figure is a
/// housing requirement, see [`civilian_housing_requirement`]. Extraction
/// domains are additionally capped by the best matching deposit, which the
/// colony cap recalculation applies on top of this value.
pub fn base_infra_cap(pop_level: u32, domain: InfraDomain) -> Option<u32> {
    match domain {
        InfraDomain::Civilian => None,
        _ => Some(pop_level * 2),
    }
}

/// Civilian levels required before the population can grow past `pop_level`.
pub fn civilian_housing_requirement(pop_level: u32) -> u32 {
    (pop_level + 1) * 2
}

// ---------------------------------------------------------------------------
// Taxation
// ---------------------------------------------------------------------------

/// Tax yield of a colony. Small outposts (pop < 5) are exempt; poor
/// habitability erodes the yield.
pub fn planet_tax(pop_level: u32, habitability: i64) -> i64 {
    if pop_level < 5 {
        return 0;
    }
    let pop = pop_level as i64;
    let gross = pop * pop / 4;
    let hab_penalty = (10 - habitability).max(0) * (pop / 3).max(1);
    (gross - hab_penalty).max(0)
}

/// Tax yield of a corporation by level.
pub fn corp_tax(level: u32) -> i64 {
    let level = level as i64;
    level * level / 5
}

// ---------------------------------------------------------------------------
// Colony attribute cascade (base values; modifier resolution and clamping
// happen in the colony simulation)
// ---------------------------------------------------------------------------

pub fn accessibility_base(transport_levels: u32) -> f64 {
    (3 + transport_levels / 2) as f64
}

pub fn dynamism_base(accessibility: i64, pop_level: u32, total_corporate_infra: u32) -> f64 {
    let commerce_pull = ((total_corporate_infra / 10) as i64).min(3);
    ((accessibility + pop_level as i64) / 2 + commerce_pull) as f64
}

pub fn quality_of_life_base(habitability: i64) -> f64 {
    (10 - (10 - habitability).max(0) / 3) as f64
}

pub fn stability_base(quality_of_life: i64, debt_tokens: u8, military_levels: u32) -> f64 {
    let qol_shortfall = (5 - quality_of_life).max(0);
    let garrison = ((military_levels / 3) as i64).min(3);
    (10 - qol_shortfall - stability_malus(debt_tokens) + garrison) as f64
}

pub fn growth_base(
    quality_of_life: i64,
    stability: i64,
    accessibility: i64,
    habitability: i64,
) -> f64 {
    let momentum = (quality_of_life + stability + accessibility) / 3;
    let hab_drag = (10 - habitability).max(0) / 3;
    (momentum - 3 - hab_drag) as f64
}

/// Empire-wide stability penalty per debt token pair.
pub fn stability_malus(debt_tokens: u8) -> i64 {
    debt_tokens as i64 / 2
}

// ---------------------------------------------------------------------------
// Growth accumulator
// ---------------------------------------------------------------------------

/// Outcome of one growth tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthOutcome {
    pub growth: i64,
    pub population: u32,
    pub leveled_up: bool,
    pub leveled_down: bool,
}

/// Advances the growth accumulator one turn and applies level transitions.
///
/// Level-up and level-down are mutually exclusive: a level-up requires the
/// accumulator to reach 10 with housing headroom, a level-down fires at -1
/// or below while population can still shrink.
pub fn growth_tick(
    previous_growth: i64,
    growth_per_turn: i64,
    population: u32,
    max_population: u32,
    civilian_levels: u32,
) -> GrowthOutcome {
    let new_growth = (previous_growth + growth_per_turn).min(10);

    if new_growth >= 10
        && population < max_population
        && civilian_levels >= civilian_housing_requirement(population)
    {
        return GrowthOutcome {
            growth: 0,
            population: population + 1,
            leveled_up: true,
            leveled_down: false,
        };
    }

    if new_growth <= -1 && population > 1 {
        return GrowthOutcome {
            growth: 9,
            population: population - 1,
            leveled_up: false,
            leveled_down: true,
        };
    }

    GrowthOutcome { growth: new_growth, population, leveled_up: false, leveled_down: false }
}

/// Percent chance per turn that a colony spontaneously develops one level of
/// infrastructure.
pub fn organic_growth_chance(dynamism: i64) -> f64 {
    (dynamism * 5) as f64
}

// ---------------------------------------------------------------------------
// Capital & contract completion
// ---------------------------------------------------------------------------

/// Per-turn capital drift for a corporation. `coin` is the 0-or-1 uniform
/// draw supplied by the caller's RNG capability.
pub fn capital_gain(coin: u32, owned_infra: u32) -> i64 {
    coin as i64 + (owned_infra / 10) as i64
}

/// Capital bonus paid to the assigned corporation when a contract completes.
pub fn completion_bonus(bp_per_turn: i64, duration: u32) -> i64 {
    bp_per_turn * duration as i64 / 5
}

pub fn level_up_cost(level: u32) -> i64 {
    level as i64 * 3
}

pub fn acquisition_cost(level: u32) -> i64 {
    level as i64 * 5
}

/// Ceiling on the infrastructure levels a corporation may operate.
pub fn max_owned_infra(level: u32) -> u32 {
    level * 4
}

// ---------------------------------------------------------------------------
// Exploration
// ---------------------------------------------------------------------------

/// Exploration contract duration shrinks with corp level, floor two turns.
pub fn exploration_duration(corp_level: u32) -> u32 {
    (4_i64 - (corp_level / 2) as i64).max(2) as u32
}

/// Orbit-scan detail tier granted by the exploring corp's level.
pub fn orbit_scan_tier(corp_level: u32) -> u8 {
    match corp_level {
        0..=2 => 1,
        3..=6 => 2,
        _ => 3,
    }
}

// ---------------------------------------------------------------------------
// Ships
// ---------------------------------------------------------------------------

/// Stat multiplier a corporation applies when building ships.
pub fn corp_stat_modifier(level: u32) -> f64 {
    0.7 + level as f64 * 0.06
}

pub fn fight_ability(firepower: i64, armor: i64, evasion: i64, size: i64) -> i64 {
    (firepower + armor * 3 / 4 + evasion / 2) * size / 2
}

pub fn investigation_ability(speed: i64, sensors: i64, size: i64) -> i64 {
    (speed * 3 / 4 + sensors) * size / 2
}

pub fn support_ability(firepower: i64, sensors: i64, size: i64) -> i64 {
    (firepower / 2 + sensors * 3 / 4) * size / 2
}

// ---------------------------------------------------------------------------
// Debt
// ---------------------------------------------------------------------------

/// Debt tokens accrued for a budget deficit (before the 10-token cap).
pub fn debt_tokens_for_deficit(deficit: i64) -> i64 {
    debug_assert!(deficit > 0);
    (deficit / 3).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planet_tax_corner_cases() {
        assert_eq!(planet_tax(7, 9), 10);
        assert_eq!(planet_tax(5, 2), 0);
        assert_eq!(planet_tax(10, 10), 25);
        assert_eq!(planet_tax(4, 10), 0);
        assert_eq!(planet_tax(4, 0), 0);
    }

    #[test]
    fn test_corp_tax() {
        assert_eq!(corp_tax(1), 0);
        assert_eq!(corp_tax(3), 1);
        assert_eq!(corp_tax(5), 5);
        assert_eq!(corp_tax(10), 20);
    }

    #[test]
    fn test_extraction_output_capped_by_richness() {
        assert_eq!(extraction_output(4, Richness::Poor), 2); // floor(4 * 0.5)
        assert_eq!(extraction_output(20, Richness::Poor), 5); // capped
        assert_eq!(extraction_output(6, Richness::Moderate), 6);
        assert_eq!(extraction_output(6, Richness::Rich), 9);
        assert_eq!(extraction_output(20, Richness::Exceptional), 20); // 40 capped at 20
    }

    #[test]
    fn test_manufacturing_half_rate_on_shortage() {
        assert_eq!(manufacturing(6, true), 6);
        assert_eq!(manufacturing(6, false), 3);
        assert_eq!(manufacturing(1, false), 1);
        assert_eq!(manufacturing(0, false), 0);
        assert_eq!(manufacturing(0, true), 0);
    }

    #[test]
    fn test_base_infra_cap() {
        assert_eq!(base_infra_cap(4, InfraDomain::Civilian), None);
        assert_eq!(base_infra_cap(4, InfraDomain::Mining), Some(8));
        assert_eq!(base_infra_cap(1, InfraDomain::Science), Some(2));
        assert_eq!(civilian_housing_requirement(4), 10);
    }

    #[test]
    fn test_attribute_bases() {
        assert_eq!(accessibility_base(0), 3.0);
        assert_eq!(accessibility_base(5), 5.0);
        assert_eq!(dynamism_base(6, 4, 35), 8.0); // (6+4)/2 + min(3, 3)
        assert_eq!(quality_of_life_base(10), 10.0);
        assert_eq!(quality_of_life_base(1), 7.0);
        assert_eq!(stability_base(7, 0, 0), 10.0);
        assert_eq!(stability_base(2, 4, 9), 8.0); // 10 - 3 - 2 + 3
        assert_eq!(growth_base(8, 8, 6, 10), 4.0); // 22/3 - 3 - 0
        assert_eq!(growth_base(2, 2, 3, 1), -4.0); // 7/3=2 - 3 - 3
    }

    #[test]
    fn test_growth_tick_level_up() {
        let out = growth_tick(8, 3, 3, 8, 8);
        assert!(out.leveled_up);
        assert_eq!(out.population, 4);
        assert_eq!(out.growth, 0);
    }

    #[test]
    fn test_growth_tick_level_up_blocked_by_housing() {
        // Needs (3+1)*2 = 8 civilian levels; only 7 present.
        let out = growth_tick(8, 3, 3, 8, 7);
        assert!(!out.leveled_up);
        assert_eq!(out.population, 3);
        assert_eq!(out.growth, 10);
    }

    #[test]
    fn test_growth_tick_level_up_blocked_at_max_pop() {
        let out = growth_tick(9, 5, 8, 8, 30);
        assert!(!out.leveled_up);
        assert_eq!(out.growth, 10);
    }

    #[test]
    fn test_growth_tick_level_down() {
        let out = growth_tick(1, -4, 3, 8, 8);
        assert!(out.leveled_down);
        assert_eq!(out.population, 2);
        assert_eq!(out.growth, 9);
    }

    #[test]
    fn test_growth_tick_no_level_down_at_pop_one() {
        let out = growth_tick(-3, -2, 1, 8, 4);
        assert!(!out.leveled_down);
        assert_eq!(out.population, 1);
        assert_eq!(out.growth, -5);
    }

    #[test]
    fn test_exploration_duration_scaling() {
        assert_eq!(exploration_duration(1), 4);
        assert_eq!(exploration_duration(3), 3);
        assert_eq!(exploration_duration(4), 2);
        assert_eq!(exploration_duration(10), 2);
    }

    #[test]
    fn test_orbit_scan_tiers() {
        assert_eq!(orbit_scan_tier(1), 1);
        assert_eq!(orbit_scan_tier(2), 1);
        assert_eq!(orbit_scan_tier(3), 2);
        assert_eq!(orbit_scan_tier(6), 2);
        assert_eq!(orbit_scan_tier(7), 3);
        assert_eq!(orbit_scan_tier(10), 3);
    }

    #[test]
    fn test_capital_and_completion() {
        assert_eq!(capital_gain(0, 9), 0);
        assert_eq!(capital_gain(1, 25), 3);
        assert_eq!(completion_bonus(4, 6), 4);
        assert_eq!(completion_bonus(10, 2), 4);
        assert_eq!(level_up_cost(4), 12);
        assert_eq!(acquisition_cost(3), 15);
        assert_eq!(max_owned_infra(5), 20);
    }

    #[test]
    fn test_ship_abilities() {
        // fight: (10 + floor(8*0.75) + floor(4*0.5)) * 6 / 2 = (10+6+2)*3 = 54
        assert_eq!(fight_ability(10, 8, 4, 6), 54);
        // investigation: (floor(6*0.75) + 8) * 4 / 2 = (4+8)*2 = 24
        assert_eq!(investigation_ability(6, 8, 4), 24);
        // support: (floor(10*0.5) + floor(8*0.75)) * 4 / 2 = (5+6)*2 = 22
        assert_eq!(support_ability(10, 8, 4), 22);
    }

    #[test]
    fn test_debt_tokens_for_deficit() {
        assert_eq!(debt_tokens_for_deficit(1), 1);
        assert_eq!(debt_tokens_for_deficit(5), 1);
        assert_eq!(debt_tokens_for_deficit(6), 2);
        assert_eq!(debt_tokens_for_deficit(100), 33);
    }

    #[test]
    fn test_corp_stat_modifier() {
        assert!((corp_stat_modifier(1) - 0.76).abs() < 1e-9);
        assert!((corp_stat_modifier(5) - 1.0).abs() < 1e-9);
        assert!((corp_stat_modifier(10) - 1.3).abs() < 1e-9);
    }
}
