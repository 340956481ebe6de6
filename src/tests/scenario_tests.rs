//! Concrete end-to-end scenarios for the order surface and the contract
//! engine.

use super::test_helpers::*;
use crate::colony::ColonyType;
use crate::contract::{
    plan_contract, ColonizationParams, ContractParams, ContractStatus, ContractTarget,
    ContractType, ShipCommissionParams,
};
use crate::contract::run_contract_phase;
use crate::budget::run_expense_phase;
use crate::corporation::CorpType;
use crate::formula;
use crate::order::{apply_order, validate_order, Order, OrderError, INVEST_COST};
use crate::planet::PlanetStatus;
use crate::resource::InfraDomain;
use crate::rng::TurnRng;
use crate::sector::SectorId;
use crate::ship::{ShipRole, ShipStatus, SizeVariant};

// --- S1: planet accept/reject ---------------------------------------------

#[test]
fn test_accept_planet_transitions_and_preserves_fields() {
    let mut state = base_state();
    let planet_id = add_planet(&mut state, SectorId(1), PlanetStatus::OrbitScanned);
    let before = state.planets[&planet_id].clone();

    let next = apply_order(
        &state,
        &Order::AcceptPlanet { planet: planet_id },
        &mut TurnRng::midrand(),
    )
    .unwrap();

    let after = &next.planets[&planet_id];
    assert_eq!(after.status, PlanetStatus::Accepted);
    // Every other field is untouched.
    assert_eq!(after.name, before.name);
    assert_eq!(after.deposits, before.deposits);
    assert_eq!(after.base_habitability, before.base_habitability);
    assert_eq!(after.orbit_scan_turn, before.orbit_scan_turn);
    // The input state is untouched entirely.
    assert_eq!(state.planets[&planet_id].status, PlanetStatus::OrbitScanned);
}

#[test]
fn test_reject_colonized_planet_is_invalid() {
    let mut state = base_state();
    let planet_id = add_planet(&mut state, SectorId(1), PlanetStatus::Colonized);
    let result = validate_order(&state, &Order::RejectPlanet { planet: planet_id });
    assert_eq!(result, Err(OrderError::InvalidStatus));
}

#[test]
fn test_accepted_is_terminal_forward() {
    let mut state = base_state();
    let planet_id = add_planet(&mut state, SectorId(1), PlanetStatus::OrbitScanned);
    let state = apply_order(
        &state,
        &Order::AcceptPlanet { planet: planet_id },
        &mut TurnRng::midrand(),
    )
    .unwrap();
    // Accept then reject is not allowed.
    assert_eq!(
        validate_order(&state, &Order::RejectPlanet { planet: planet_id }),
        Err(OrderError::InvalidStatus)
    );
}

// --- S3: debt escalation ---------------------------------------------------

#[test]
fn test_debt_escalation_small_deficit() {
    let mut state = base_state();
    let corp = add_corp(&mut state, CorpType::Exploration, 3, 0);
    state.current_bp = 5;
    state.debt_tokens = 0;
    add_active_contract(
        &mut state,
        ContractType::Exploration,
        ContractTarget::Sector(SectorId(1)),
        corp,
        10,
        5,
        5,
    );

    run_expense_phase(&mut state);
    assert_eq!(state.current_bp, -5);
    assert_eq!(state.debt_tokens, 1); // max(1, floor(5/3))
    assert_eq!(state.budget.stability_malus, 0);
}

#[test]
fn test_debt_escalation_caps_at_ten() {
    let mut state = base_state();
    let corp = add_corp(&mut state, CorpType::Exploration, 3, 0);
    state.current_bp = 0;
    state.debt_tokens = 0;
    add_active_contract(
        &mut state,
        ContractType::Exploration,
        ContractTarget::Sector(SectorId(1)),
        corp,
        100,
        5,
        5,
    );

    run_expense_phase(&mut state);
    assert_eq!(state.current_bp, -100);
    assert_eq!(state.debt_tokens, 10); // min(10, floor(100/3))
    assert_eq!(state.budget.stability_malus, 5);
}

#[test]
fn test_completed_contracts_are_not_charged() {
    let mut state = base_state();
    let corp = add_corp(&mut state, CorpType::Exploration, 3, 0);
    state.current_bp = 5;
    let contract_id = add_active_contract(
        &mut state,
        ContractType::Exploration,
        ContractTarget::Sector(SectorId(1)),
        corp,
        10,
        5,
        5,
    );
    {
        let contract = state.contracts.get_mut(&contract_id).unwrap();
        contract.status = ContractStatus::Completed;
        contract.completed_turn = Some(1);
    }
    run_expense_phase(&mut state);
    assert_eq!(state.current_bp, 5);
    assert_eq!(state.debt_tokens, 0);
}

// --- S4: exploration duration scaling --------------------------------------

#[test]
fn test_exploration_duration_scales_with_corp_level() {
    for (level, expected) in [(1, 4), (3, 3), (4, 2), (10, 2)] {
        let mut state = base_state();
        let corp = add_corp(&mut state, CorpType::Exploration, level, 10);
        let params = ContractParams {
            contract_type: ContractType::Exploration,
            target: ContractTarget::Sector(SectorId(1)),
            corp,
            colonization: None,
            ship_commission: None,
        };
        let plan = plan_contract(&state, &params).unwrap();
        assert_eq!(plan.duration, expected, "corp level {}", level);
    }
}

#[test]
fn test_exploration_requires_colony_range() {
    let mut state = base_state();
    let corp = add_corp(&mut state, CorpType::Exploration, 1, 10);
    // Sector 4 is the far side of the eight-sector ring; the only colony is
    // in sector 0.
    let params = ContractParams {
        contract_type: ContractType::Exploration,
        target: ContractTarget::Sector(SectorId(4)),
        corp,
        colonization: None,
        ship_commission: None,
    };
    assert_eq!(plan_contract(&state, &params), Err(OrderError::SectorOutOfRange));
}

// --- S5: ship commission ----------------------------------------------------

#[test]
fn test_ship_commission_cost_and_duration() {
    let mut state = base_state();
    let corp = add_corp(&mut state, CorpType::Shipbuilding, 1, 10);
    let colony = home_colony(&state);
    // The homeworld seeds SpaceIndustry at 3, exactly the SystemPatrol
    // Standard requirement.
    assert_eq!(
        state.colonies[&colony].total_levels(InfraDomain::SpaceIndustry),
        3
    );
    let params = ContractParams {
        contract_type: ContractType::ShipCommission,
        target: ContractTarget::Colony(colony),
        corp,
        colonization: None,
        ship_commission: Some(ShipCommissionParams {
            role: ShipRole::SystemPatrol,
            size_variant: SizeVariant::Standard,
            ship_name: None,
        }),
    };
    let plan = plan_contract(&state, &params).unwrap();
    assert_eq!(plan.duration, 2);
    assert_eq!(plan.bp_per_turn, 1);
}

#[test]
fn test_ship_commission_insufficient_space_infra() {
    let mut state = base_state();
    let corp = add_corp(&mut state, CorpType::Shipbuilding, 1, 10);
    let colony = home_colony(&state);
    state
        .colonies
        .get_mut(&colony)
        .unwrap()
        .domain_mut(InfraDomain::SpaceIndustry)
        .public_levels = 2;
    let params = ContractParams {
        contract_type: ContractType::ShipCommission,
        target: ContractTarget::Colony(colony),
        corp,
        colonization: None,
        ship_commission: Some(ShipCommissionParams {
            role: ShipRole::SystemPatrol,
            size_variant: SizeVariant::Standard,
            ship_name: None,
        }),
    };
    assert_eq!(
        plan_contract(&state, &params),
        Err(OrderError::InsufficientSpaceInfra)
    );
}

#[test]
fn test_ship_commission_completion_stations_ship() {
    let mut state = base_state();
    let corp = add_corp(&mut state, CorpType::Shipbuilding, 1, 0);
    let colony = home_colony(&state);
    let contract_id = add_active_contract(
        &mut state,
        ContractType::ShipCommission,
        ContractTarget::Colony(colony),
        corp,
        1,
        1,
        2,
    );
    state.contracts.get_mut(&contract_id).unwrap().ship_commission =
        Some(ShipCommissionParams {
            role: ShipRole::SystemPatrol,
            size_variant: SizeVariant::Standard,
            ship_name: Some("ESV Vigil".to_string()),
        });

    let mut events = Vec::new();
    run_contract_phase(&mut state, &mut TurnRng::seeded(11), &mut events);

    assert_eq!(state.ships.len(), 1);
    let ship = state.ships.values().next().unwrap();
    assert_eq!(ship.name, "ESV Vigil");
    assert_eq!(ship.status, ShipStatus::Stationed);
    assert_eq!(ship.home_sector, SectorId(0));
    assert!(ship.captain.is_some());
    assert_eq!(state.captains.len(), 1);
}

// --- S6: colonization completion --------------------------------------------

#[test]
fn test_colonization_completion_founds_colony() {
    let mut state = base_state();
    let corp_id = add_corp(&mut state, CorpType::Construction, 2, 0);
    let planet_id = add_planet(&mut state, SectorId(1), PlanetStatus::Accepted);
    let contract_id = add_active_contract(
        &mut state,
        ContractType::Colonization,
        ContractTarget::Planet(planet_id),
        corp_id,
        4,
        1,
        6,
    );
    state.contracts.get_mut(&contract_id).unwrap().colonization =
        Some(ColonizationParams { colony_type: ColonyType::Frontier });

    let colonies_before = state.colonies.len();
    let mut events = Vec::new();
    run_contract_phase(&mut state, &mut TurnRng::seeded(7), &mut events);

    assert_eq!(state.colonies.len(), colonies_before + 1);
    let colony = state
        .colonies
        .values()
        .find(|c| c.planet == planet_id)
        .expect("a colony was founded on the target planet");
    assert_eq!(colony.colony_type, ColonyType::Frontier);
    assert_eq!(colony.corporations_present, vec![corp_id]);
    assert_eq!(colony.population, 1);
    // Frontier charter: Civilian 2, Agricultural 1.
    assert_eq!(colony.total_levels(InfraDomain::Civilian), 2);
    assert_eq!(colony.total_levels(InfraDomain::Agricultural), 1);

    assert_eq!(state.planets[&planet_id].status, PlanetStatus::Colonized);

    let corp = &state.corporations[&corp_id];
    assert_eq!(corp.capital, formula::completion_bonus(4, 6));
    assert!(corp.planets_present.contains(&planet_id));
    assert!(!corp.active_contracts.contains(&contract_id));

    let contract = &state.contracts[&contract_id];
    assert_eq!(contract.status, ContractStatus::Completed);
    assert_eq!(contract.completed_turn, Some(state.turn));

    // One Positive contract event with both related ids.
    let contract_events: Vec<_> = events
        .iter()
        .filter(|e| e.category == crate::event::EventCategory::Contract)
        .collect();
    assert_eq!(contract_events.len(), 1);
}

// --- exploration completion --------------------------------------------------

#[test]
fn test_exploration_completion_charts_planets() {
    let mut state = base_state();
    let corp = add_corp(&mut state, CorpType::Exploration, 4, 0);
    add_active_contract(
        &mut state,
        ContractType::Exploration,
        ContractTarget::Sector(SectorId(1)),
        corp,
        3,
        1,
        2,
    );
    let planets_before = state.planets.len();
    let exploration_before = state.galaxy.sectors[&SectorId(1)].exploration_percent;

    let mut events = Vec::new();
    run_contract_phase(&mut state, &mut TurnRng::seeded(19), &mut events);

    let charted = state.planets.len() - planets_before;
    assert!((2..=4).contains(&charted));
    let gained =
        state.galaxy.sectors[&SectorId(1)].exploration_percent - exploration_before;
    assert!((5..=15).contains(&gained));
    assert_eq!(state.galaxy.sectors[&SectorId(1)].first_entered_turn, Some(state.turn));

    for planet in state.planets.values().filter(|p| p.sector == SectorId(1)) {
        assert_eq!(planet.status, PlanetStatus::OrbitScanned);
        assert_eq!(planet.orbit_scan_turn, Some(state.turn));
        // Corp level 4 scans at tier 2.
        assert_eq!(planet.scan_tier, 2);
    }
    let exploration_events = events
        .iter()
        .filter(|e| e.category == crate::event::EventCategory::Exploration)
        .count();
    assert_eq!(exploration_events, charted);
}

// --- ground survey -----------------------------------------------------------

#[test]
fn test_ground_survey_reveals_and_promotes() {
    let mut state = base_state();
    let corp = add_corp(&mut state, CorpType::Science, 3, 0);
    let planet_id = add_planet(&mut state, SectorId(1), PlanetStatus::OrbitScanned);
    add_active_contract(
        &mut state,
        ContractType::GroundSurvey,
        ContractTarget::Planet(planet_id),
        corp,
        2,
        1,
        3,
    );
    let mut events = Vec::new();
    run_contract_phase(&mut state, &mut TurnRng::seeded(3), &mut events);

    let planet = &state.planets[&planet_id];
    assert_eq!(planet.status, PlanetStatus::GroundSurveyed);
    assert_eq!(planet.ground_survey_turn, Some(state.turn));
    assert!(planet.deposits.iter().all(|d| d.richness_revealed));
}

#[test]
fn test_ground_survey_leaves_accepted_status() {
    let mut state = base_state();
    let corp = add_corp(&mut state, CorpType::Science, 3, 0);
    let planet_id = add_planet(&mut state, SectorId(1), PlanetStatus::Accepted);
    add_active_contract(
        &mut state,
        ContractType::GroundSurvey,
        ContractTarget::Planet(planet_id),
        corp,
        2,
        1,
        3,
    );
    let mut events = Vec::new();
    run_contract_phase(&mut state, &mut TurnRng::seeded(3), &mut events);

    let planet = &state.planets[&planet_id];
    assert_eq!(planet.status, PlanetStatus::Accepted);
    assert!(planet.deposits.iter().all(|d| d.richness_revealed));
}

// --- orders -----------------------------------------------------------------

#[test]
fn test_invest_planet_costs_three_bp() {
    let state = base_state();
    let colony = home_colony(&state);
    let bp_before = state.current_bp;
    let next = apply_order(
        &state,
        &Order::InvestPlanet { colony, domain: InfraDomain::Science },
        &mut TurnRng::midrand(),
    )
    .unwrap();
    assert_eq!(next.current_bp, bp_before - INVEST_COST);
    assert_eq!(
        next.colonies[&colony].total_levels(InfraDomain::Science),
        state.colonies[&colony].total_levels(InfraDomain::Science) + 1
    );
}

#[test]
fn test_invest_extraction_without_deposit_fails() {
    let state = base_state();
    let colony = home_colony(&state);
    // The homeworld has an ore deposit but no gas field.
    assert_eq!(
        validate_order(
            &state,
            &Order::InvestPlanet { colony, domain: InfraDomain::GasExtraction }
        ),
        Err(OrderError::NoMatchingDeposit)
    );
}

#[test]
fn test_invest_at_cap_fails() {
    let mut state = base_state();
    let colony_id = home_colony(&state);
    {
        let colony = state.colonies.get_mut(&colony_id).unwrap();
        let cap = colony.domain(InfraDomain::Science).current_cap.unwrap();
        colony.domain_mut(InfraDomain::Science).public_levels = cap;
    }
    assert_eq!(
        validate_order(
            &state,
            &Order::InvestPlanet { colony: colony_id, domain: InfraDomain::Science }
        ),
        Err(OrderError::AtCap)
    );
}

#[test]
fn test_insufficient_bp_blocks_investment() {
    let mut state = base_state();
    state.current_bp = 2;
    let colony = home_colony(&state);
    assert_eq!(
        validate_order(
            &state,
            &Order::InvestPlanet { colony, domain: InfraDomain::Science }
        ),
        Err(OrderError::InsufficientBp)
    );
}

// --- trade routes -----------------------------------------------------------

#[test]
fn test_trade_route_creation_and_cancellation() {
    let mut state = base_state();
    let corp = add_corp(&mut state, CorpType::Transport, 2, 0);
    let state = apply_order(
        &state,
        &Order::CreateTradeRoute {
            sector_a: SectorId(0),
            sector_b: SectorId(1),
            corp,
        },
        &mut TurnRng::midrand(),
    )
    .unwrap();

    let contract = state
        .contracts
        .values()
        .find(|c| c.contract_type == ContractType::TradeRoute)
        .expect("trade route exists");
    assert_eq!(contract.turns_remaining, 9999);
    assert_eq!(contract.bp_per_turn, 2);

    let contract_id = contract.id;
    let next = apply_order(
        &state,
        &Order::CancelTradeRoute { contract: contract_id },
        &mut TurnRng::midrand(),
    )
    .unwrap();
    let cancelled = &next.contracts[&contract_id];
    assert_eq!(cancelled.status, ContractStatus::Completed);
    assert!(cancelled.completed_turn.is_some());
}

#[test]
fn test_trade_route_requires_adjacency() {
    let mut state = base_state();
    let corp = add_corp(&mut state, CorpType::Transport, 2, 0);
    assert_eq!(
        validate_order(
            &state,
            &Order::CreateTradeRoute {
                sector_a: SectorId(0),
                sector_b: SectorId(4),
                corp,
            }
        ),
        Err(OrderError::SectorsNotAdjacent)
    );
}

#[test]
fn test_cancel_non_trade_route_fails() {
    let mut state = base_state();
    let corp = add_corp(&mut state, CorpType::Exploration, 3, 0);
    let contract_id = add_active_contract(
        &mut state,
        ContractType::Exploration,
        ContractTarget::Sector(SectorId(1)),
        corp,
        3,
        3,
        4,
    );
    assert_eq!(
        validate_order(&state, &Order::CancelTradeRoute { contract: contract_id }),
        Err(OrderError::NotATradeRoute)
    );
}

// --- eligibility ladder ------------------------------------------------------

#[test]
fn test_eligibility_ladder() {
    let mut state = base_state();
    // A level-1 military corp may not explore.
    let low_military = add_corp(&mut state, CorpType::Military, 1, 10);
    // A level-3 military corp may (non-specialized).
    let mid_military = add_corp(&mut state, CorpType::Military, 3, 10);
    // A level-3 military corp still may not colonize (specialized).
    // A level-6 military megacorp may do anything.
    let megacorp = add_corp(&mut state, CorpType::Military, 6, 10);
    let planet = add_planet(&mut state, SectorId(1), PlanetStatus::Accepted);

    let explore = |corp| ContractParams {
        contract_type: ContractType::Exploration,
        target: ContractTarget::Sector(SectorId(1)),
        corp,
        colonization: None,
        ship_commission: None,
    };
    let colonize = |corp| ContractParams {
        contract_type: ContractType::Colonization,
        target: ContractTarget::Planet(planet),
        corp,
        colonization: Some(ColonizationParams { colony_type: ColonyType::Frontier }),
        ship_commission: None,
    };

    assert_eq!(
        plan_contract(&state, &explore(low_military)),
        Err(OrderError::CorpNotEligible)
    );
    assert!(plan_contract(&state, &explore(mid_military)).is_ok());
    assert_eq!(
        plan_contract(&state, &colonize(mid_military)),
        Err(OrderError::CorpNotEligible)
    );
    assert!(plan_contract(&state, &colonize(megacorp)).is_ok());
}

#[test]
fn test_missing_colony_type_is_rejected() {
    let mut state = base_state();
    let corp = add_corp(&mut state, CorpType::Construction, 2, 0);
    let planet = add_planet(&mut state, SectorId(1), PlanetStatus::Accepted);
    let params = ContractParams {
        contract_type: ContractType::Colonization,
        target: ContractTarget::Planet(planet),
        corp,
        colonization: None,
        ship_commission: None,
    };
    assert_eq!(plan_contract(&state, &params), Err(OrderError::MissingColonyType));
}

#[test]
fn test_wrong_target_variant_is_rejected() {
    let mut state = base_state();
    let corp = add_corp(&mut state, CorpType::Exploration, 3, 0);
    let params = ContractParams {
        contract_type: ContractType::Exploration,
        target: ContractTarget::SectorPair(SectorId(0), SectorId(1)),
        corp,
        colonization: None,
        ship_commission: None,
    };
    assert_eq!(plan_contract(&state, &params), Err(OrderError::InvalidTargetType));
}
