//! Initial state construction: starting galaxy, homeworld, seed colony, and
//! seed corporations.

use crate::colony::found_colony;
use crate::corporation::Corporation;
use crate::config::GameConfig;
use crate::error::Result;
use crate::market::SectorMarket;
use crate::planet::{
    Deposit, DepositType, Planet, PlanetSize, PlanetStatus, PlanetType, Richness,
};
use crate::resource::InfraDomain;
use crate::rng::TurnRng;
use crate::sector::{Galaxy, Sector, SectorDensity, SectorId};
use crate::state::{GameState, IdCounters};
use chrono::Utc;
use log::info;
use std::collections::BTreeMap;

const SECTOR_NAMES: [&str; 16] = [
    "Meridian Reach",
    "Kessler Expanse",
    "Halcyon Drift",
    "Vanta Shallows",
    "Corvid Margin",
    "Aster Verge",
    "Pale Corridor",
    "Ophir Deeps",
    "Cinder Field",
    "Lattice Verge",
    "Umber Strand",
    "Noct Meridian",
    "Skein Hollow",
    "Tessera Span",
    "Garnet Veil",
    "Quiet Anchorage",
];

/// Builds the starting state: a ring galaxy, a settled homeworld in the
/// first sector, and the configured seed corporations headquartered there.
///
/// The RNG is consumed for sector densities and threat levels only, in
/// sector order.
pub fn create_initial_state(config: &GameConfig, rng: &mut TurnRng) -> Result<GameState> {
    config.validate()?;

    let mut counters = IdCounters::default();
    let mut galaxy = Galaxy::new();
    let sector_count = config.galaxy_sector_count;
    for i in 0..sector_count {
        let density = match rng.roll_range(0, 2) {
            0 => SectorDensity::Sparse,
            1 => SectorDensity::Moderate,
            _ => SectorDensity::Dense,
        };
        let mut sector = Sector::new(
            SectorId(i),
            sector_name(i),
            density,
        );
        sector.threat_modifier = rng.roll_range(0, 2);
        galaxy.insert(sector);
    }
    // Jump lanes form a ring (a chain when too small to close one).
    for i in 1..sector_count {
        galaxy.link(SectorId(i - 1), SectorId(i));
    }
    if sector_count >= 3 {
        galaxy.link(SectorId(sector_count - 1), SectorId(0));
    }

    let home_sector = SectorId(0);
    if let Some(sector) = galaxy.sectors.get_mut(&home_sector) {
        sector.advance_exploration(60, 0);
        sector.threat_modifier = 0;
    }

    let homeworld_id = counters.next_planet();
    let homeworld = Planet {
        id: homeworld_id,
        name: "Hearthfall".to_string(),
        sector: home_sector,
        planet_type: PlanetType::Continental,
        size: PlanetSize::Medium,
        status: PlanetStatus::Colonized,
        base_habitability: 8,
        deposits: vec![Deposit {
            deposit_type: DepositType::MetallicOre,
            richness: Richness::Moderate,
            richness_revealed: true,
        }],
        features: vec![],
        scan_tier: 3,
        orbit_scan_turn: Some(0),
        ground_survey_turn: Some(0),
    };

    let colony_id = counters.next_colony();
    let mut colony = found_colony(
        colony_id,
        &homeworld,
        config.seed_colony_type,
        None,
        0,
        config,
        &mut counters,
    );
    // The homeworld starts as an established settlement, not a fresh
    // outpost.
    colony.population = 4;
    colony.domain_mut(InfraDomain::Civilian).public_levels = 10;
    colony.domain_mut(InfraDomain::Agricultural).public_levels = 4;
    colony.domain_mut(InfraDomain::Mining).public_levels = 4;
    colony.domain_mut(InfraDomain::LowIndustry).public_levels = 4;
    colony.domain_mut(InfraDomain::Transport).public_levels = 4;
    colony.domain_mut(InfraDomain::SpaceIndustry).public_levels = 3;
    colony.domain_mut(InfraDomain::Science).public_levels = 1;
    colony.domain_mut(InfraDomain::Military).public_levels = 1;
    colony.recalc_caps(&homeworld, config);
    colony.recompute_attributes(&homeworld, config.starting_debt_tokens, &|_| 0.0);

    let mut corporations = BTreeMap::new();
    for seed in &config.seed_corps {
        let corp_id = counters.next_corporation();
        let mut corp = Corporation::new(
            corp_id,
            seed.name.clone(),
            seed.corp_type,
            seed.level,
            seed.capital,
            homeworld_id,
            0,
        );
        corp.register_planet(homeworld_id);
        colony.register_corporation(corp_id);
        corporations.insert(corp_id, corp);
    }

    let mut sector_markets = BTreeMap::new();
    for sector_id in galaxy.sectors.keys() {
        sector_markets.insert(*sector_id, SectorMarket::default());
    }

    let now = Utc::now();
    let state = GameState {
        config: config.clone(),
        turn: 1,
        current_bp: config.starting_bp,
        debt_tokens: config.starting_debt_tokens,
        budget: Default::default(),
        empire_bonuses: Vec::new(),
        galaxy,
        planets: BTreeMap::from([(homeworld_id, homeworld)]),
        colonies: BTreeMap::from([(colony_id, colony)]),
        corporations,
        contracts: BTreeMap::new(),
        ships: BTreeMap::new(),
        captains: BTreeMap::new(),
        missions: BTreeMap::new(),
        sector_markets,
        discovery_pool: config.discoveries.clone(),
        events: Vec::new(),
        counters,
        created_at: now,
        updated_at: now,
    };
    info!(
        "initial state created: {} sectors, {} seed corporations",
        state.galaxy.sectors.len(),
        state.corporations.len()
    );
    Ok(state)
}

fn sector_name(index: u32) -> String {
    let base = SECTOR_NAMES[index as usize % SECTOR_NAMES.len()];
    if (index as usize) < SECTOR_NAMES.len() {
        base.to_string()
    } else {
        format!("{} {}", base, index as usize / SECTOR_NAMES.len() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_shape() {
        let config = GameConfig::default();
        let state = create_initial_state(&config, &mut TurnRng::seeded(42)).unwrap();
        assert_eq!(state.turn, 1);
        assert_eq!(state.current_bp, config.starting_bp);
        assert_eq!(state.debt_tokens, 0);
        assert_eq!(state.galaxy.sectors.len(), 8);
        assert_eq!(state.colonies.len(), 1);
        assert_eq!(state.corporations.len(), config.seed_corps.len());
        assert_eq!(state.discovery_pool.len(), config.discoveries.len());

        let colony = state.colonies.values().next().unwrap();
        assert_eq!(colony.population, 4);
        assert!(colony.corporations_present.len() >= 2);
    }

    #[test]
    fn test_initial_state_is_deterministic() {
        let config = GameConfig::default();
        let a = create_initial_state(&config, &mut TurnRng::seeded(7)).unwrap();
        let b = create_initial_state(&config, &mut TurnRng::seeded(7)).unwrap();
        // Timestamps differ; everything that matters to play must not.
        assert_eq!(a.galaxy, b.galaxy);
        assert_eq!(a.planets, b.planets);
        assert_eq!(a.colonies, b.colonies);
        assert_eq!(a.corporations, b.corporations);
    }

    #[test]
    fn test_ring_topology_closes() {
        let config = GameConfig::default();
        let state = create_initial_state(&config, &mut TurnRng::seeded(42)).unwrap();
        assert!(state.galaxy.are_adjacent(SectorId(0), SectorId(7)));
        assert!(state.galaxy.are_adjacent(SectorId(0), SectorId(1)));
        // Opposite side of the ring is four hops out.
        assert_eq!(state.galaxy.hop_distance(SectorId(0), SectorId(4)), Some(4));
    }
}
