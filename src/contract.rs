//! The contract state machine.
//!
//! Contracts are time-bound tasks the empire issues to corporations. They
//! are validated at creation against the target rules and the corp
//! eligibility ladder, advanced once per turn by the contract phase, and
//! apply their completion effects the turn the counter reaches zero. A
//! completed contract is immutable. Trade routes are the exception to the
//! countdown: they carry a sentinel duration and only end by cancellation.

use crate::blueprint::{
    build_ship, captain_name, commission_build_time, generate_blueprint,
};
use crate::colony::{found_colony, ColonyType};
use crate::corporation::CorpId;
use crate::event::{emit, EntityRef, EventCategory, EventPriority, GameEvent};
use crate::formula;
use crate::order::OrderError;
use crate::planet::{generate_planet, PlanetId, PlanetStatus};
use crate::resource::InfraDomain;
use crate::rng::TurnRng;
use crate::sector::SectorId;
use crate::ship::{Captain, ShipRole, ShipStatus, SizeVariant};
use crate::state::GameState;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Unique identifier for a contract.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ContractId(pub u32);

impl std::fmt::Display for ContractId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "contract-{}", self.0)
    }
}

/// Duration sentinel for trade routes: never counts down.
pub const TRADE_ROUTE_SENTINEL: u32 = 9999;

/// Kind of work a contract commissions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ContractType {
    Exploration,
    GroundSurvey,
    Colonization,
    ShipCommission,
    TradeRoute,
}

impl ContractType {
    /// Specialized contract types are excluded from the level-3 blanket
    /// eligibility; only the listed corp types (or megacorps) may take them.
    pub fn is_specialized(self) -> bool {
        matches!(
            self,
            ContractType::Colonization | ContractType::ShipCommission | ContractType::TradeRoute
        )
    }
}

/// Lifecycle state of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStatus {
    Active,
    Completed,
    Failed,
}

/// What a contract acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractTarget {
    Sector(SectorId),
    Planet(PlanetId),
    Colony(crate::colony::ColonyId),
    SectorPair(SectorId, SectorId),
}

/// Parameters specific to colonization contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColonizationParams {
    pub colony_type: ColonyType,
}

/// Parameters specific to ship commissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipCommissionParams {
    pub role: ShipRole,
    pub size_variant: SizeVariant,
    pub ship_name: Option<String>,
}

/// Creation request for a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractParams {
    pub contract_type: ContractType,
    pub target: ContractTarget,
    pub corp: CorpId,
    pub colonization: Option<ColonizationParams>,
    pub ship_commission: Option<ShipCommissionParams>,
}

/// A task issued to a corporation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub contract_type: ContractType,
    pub status: ContractStatus,
    pub target: ContractTarget,
    pub corp: CorpId,
    /// >= 1
    pub bp_per_turn: i64,
    pub duration: u32,
    /// 0..=duration; stays at the sentinel for trade routes
    pub turns_remaining: u32,
    pub start_turn: u32,
    pub completed_turn: Option<u32>,
    pub colonization: Option<ColonizationParams>,
    pub ship_commission: Option<ShipCommissionParams>,
}

/// Cost and duration a validated creation request would carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractPlan {
    pub bp_per_turn: i64,
    pub duration: u32,
}

/// Whether a corporation may take a contract of this type.
///
/// The ladder: its type is in the allowed set, or level 6+ (unrestricted),
/// or level 3+ for non-specialized types.
pub fn corp_is_eligible(
    corp: &crate::corporation::Corporation,
    contract_type: ContractType,
    config: &crate::config::GameConfig,
) -> bool {
    if config
        .contract_spec(contract_type)
        .eligible_corp_types
        .contains(&corp.corp_type)
    {
        return true;
    }
    if corp.level >= 6 {
        return true;
    }
    corp.level >= 3 && !contract_type.is_specialized()
}

/// Validates a creation request and computes its cost and duration.
///
/// No state mutation. Ship commissions are priced with the deterministic
/// mid-point blueprint estimate.
pub fn plan_contract(
    state: &GameState,
    params: &ContractParams,
) -> Result<ContractPlan, OrderError> {
    let config = &state.config;
    let corp = state
        .corporations
        .get(&params.corp)
        .ok_or(OrderError::CorpNotFound)?;
    if !corp_is_eligible(corp, params.contract_type, config) {
        return Err(OrderError::CorpNotEligible);
    }
    let spec = config.contract_spec(params.contract_type);

    match params.contract_type {
        ContractType::Exploration => {
            let ContractTarget::Sector(sector) = params.target else {
                return Err(OrderError::InvalidTargetType);
            };
            if !state.galaxy.contains(sector) {
                return Err(OrderError::TargetNotFound);
            }
            // Range restriction only applies once the empire has a colony.
            if !state.colonies.is_empty() && !state.sector_in_colony_range(sector) {
                return Err(OrderError::SectorOutOfRange);
            }
            Ok(ContractPlan {
                bp_per_turn: spec.base_bp_per_turn,
                duration: formula::exploration_duration(corp.level),
            })
        }
        ContractType::GroundSurvey => {
            let ContractTarget::Planet(planet_id) = params.target else {
                return Err(OrderError::InvalidTargetType);
            };
            let planet = state
                .planets
                .get(&planet_id)
                .ok_or(OrderError::TargetNotFound)?;
            if !matches!(
                planet.status,
                PlanetStatus::OrbitScanned | PlanetStatus::Accepted
            ) {
                return Err(OrderError::InvalidPlanetStatus);
            }
            Ok(ContractPlan {
                bp_per_turn: spec.base_bp_per_turn,
                duration: spec.base_duration,
            })
        }
        ContractType::Colonization => {
            let ContractTarget::Planet(planet_id) = params.target else {
                return Err(OrderError::InvalidTargetType);
            };
            let planet = state
                .planets
                .get(&planet_id)
                .ok_or(OrderError::TargetNotFound)?;
            if !matches!(
                planet.status,
                PlanetStatus::Accepted | PlanetStatus::GroundSurveyed
            ) {
                return Err(OrderError::InvalidPlanetStatus);
            }
            let colonization = params
                .colonization
                .as_ref()
                .ok_or(OrderError::MissingColonyType)?;
            let colony_spec = config.colony_spec(colonization.colony_type);
            Ok(ContractPlan {
                bp_per_turn: colony_spec.bp_per_turn,
                duration: colony_spec.duration,
            })
        }
        ContractType::ShipCommission => {
            let ContractTarget::Colony(colony_id) = params.target else {
                return Err(OrderError::InvalidTargetType);
            };
            let colony = state
                .colonies
                .get(&colony_id)
                .ok_or(OrderError::TargetNotFound)?;
            let commission = params
                .ship_commission
                .as_ref()
                .ok_or(OrderError::MissingShipParams)?;
            let role_stats = config.role_stats(commission.role);
            let variant = config.variant_spec(commission.size_variant);
            let required =
                (role_stats.base_size as f64 * variant.size_multiplier).floor() as u32;
            if colony.total_levels(InfraDomain::SpaceIndustry) < required {
                return Err(OrderError::InsufficientSpaceInfra);
            }
            let estimate = generate_blueprint(
                commission.role,
                commission.size_variant,
                corp.level,
                &|stat| state.empire_tech_bonus(stat),
                &corp.schematics,
                config,
                &mut TurnRng::midrand(),
            );
            Ok(ContractPlan {
                bp_per_turn: estimate.bp_per_turn,
                duration: commission_build_time(estimate.build_time, corp.level),
            })
        }
        ContractType::TradeRoute => {
            let ContractTarget::SectorPair(a, b) = params.target else {
                return Err(OrderError::InvalidTargetType);
            };
            if !state.galaxy.contains(a) || !state.galaxy.contains(b) {
                return Err(OrderError::TargetNotFound);
            }
            if !state.galaxy.are_adjacent(a, b) {
                return Err(OrderError::SectorsNotAdjacent);
            }
            Ok(ContractPlan {
                bp_per_turn: spec.base_bp_per_turn,
                duration: TRADE_ROUTE_SENTINEL,
            })
        }
    }
}

/// Validates and inserts a new contract, registering it with its corp.
pub fn create_contract(
    state: &mut GameState,
    params: ContractParams,
) -> Result<ContractId, OrderError> {
    let plan = plan_contract(state, &params)?;
    let id = state.counters.next_contract();
    let contract = Contract {
        id,
        contract_type: params.contract_type,
        status: ContractStatus::Active,
        target: params.target,
        corp: params.corp,
        bp_per_turn: plan.bp_per_turn.max(1),
        duration: plan.duration,
        turns_remaining: plan.duration,
        start_turn: state.turn,
        completed_turn: None,
        colonization: params.colonization,
        ship_commission: params.ship_commission,
    };
    let corp = state
        .corporations
        .get_mut(&params.corp)
        .expect("contract corp vanished after validation");
    corp.active_contracts.push(id);
    info!(
        "{} created: {:?} for {} ({} BP/turn, {} turns)",
        id, contract.contract_type, contract.corp, contract.bp_per_turn, contract.duration
    );
    state.contracts.insert(id, contract);
    Ok(id)
}

/// Runs the contract phase: every active non-trade-route contract counts
/// down one turn, and contracts reaching zero complete and apply their
/// effects, in ascending contract-id order.
pub fn run_contract_phase(
    state: &mut GameState,
    rng: &mut TurnRng,
    events: &mut Vec<GameEvent>,
) {
    let contract_ids: Vec<ContractId> = state
        .contracts
        .values()
        .filter(|c| {
            c.status == ContractStatus::Active
                && c.contract_type != ContractType::TradeRoute
        })
        .map(|c| c.id)
        .collect();

    for contract_id in contract_ids {
        let remaining = {
            let contract = state
                .contracts
                .get_mut(&contract_id)
                .expect("contract vanished mid-phase");
            contract.turns_remaining = contract.turns_remaining.saturating_sub(1);
            contract.turns_remaining
        };
        if remaining > 0 {
            continue;
        }
        complete_contract(state, contract_id, rng, events);
    }
}

/// Marks a contract completed, pays the completion bonus, and applies the
/// type-specific completion effects.
fn complete_contract(
    state: &mut GameState,
    contract_id: ContractId,
    rng: &mut TurnRng,
    events: &mut Vec<GameEvent>,
) {
    let turn = state.turn;
    let contract = {
        let contract = state
            .contracts
            .get_mut(&contract_id)
            .expect("contract vanished mid-phase");
        contract.status = ContractStatus::Completed;
        contract.completed_turn = Some(turn);
        contract.clone()
    };

    let bonus = formula::completion_bonus(contract.bp_per_turn, contract.duration);
    let corp_name = {
        let corp = state
            .corporations
            .get_mut(&contract.corp)
            .expect("contract references a missing corporation");
        corp.capital += bonus;
        corp.active_contracts.retain(|c| *c != contract_id);
        corp.name.clone()
    };
    debug!("{} completed; {} paid {} capital", contract_id, contract.corp, bonus);

    match contract.contract_type {
        ContractType::Exploration => {
            complete_exploration(state, &contract, rng, events);
        }
        ContractType::GroundSurvey => {
            if let ContractTarget::Planet(planet_id) = contract.target {
                let planet = state
                    .planets
                    .get_mut(&planet_id)
                    .expect("survey contract references a missing planet");
                if planet.status == PlanetStatus::OrbitScanned {
                    planet.status = PlanetStatus::GroundSurveyed;
                }
                planet.apply_ground_survey(turn);
            }
        }
        ContractType::Colonization => {
            complete_colonization(state, &contract, events);
        }
        ContractType::ShipCommission => {
            complete_ship_commission(state, &contract, rng, events);
        }
        ContractType::TradeRoute => {
            // Trade routes never reach this path; they end by cancellation.
        }
    }

    emit(
        events,
        turn,
        EventCategory::Contract,
        EventPriority::Positive,
        format!("Contract completed by {}", corp_name),
        format!(
            "{} has fulfilled its {:?} contract.",
            corp_name, contract.contract_type
        ),
        vec![EntityRef::Contract(contract_id), EntityRef::Corp(contract.corp)],
    );
}

fn complete_exploration(
    state: &mut GameState,
    contract: &Contract,
    rng: &mut TurnRng,
    events: &mut Vec<GameEvent>,
) {
    let ContractTarget::Sector(sector_id) = contract.target else {
        return;
    };
    let turn = state.turn;
    let corp_level = state
        .corporations
        .get(&contract.corp)
        .map(|c| c.level)
        .unwrap_or(1);
    let tier = formula::orbit_scan_tier(corp_level);

    let gain = rng.roll_range(5, 15);
    let sector_name = {
        let sector = state
            .galaxy
            .sectors
            .get_mut(&sector_id)
            .expect("exploration contract references a missing sector");
        sector.advance_exploration(gain, turn);
        sector.name.clone()
    };

    // 2-4 points of interest, weighted 40/40/20.
    let poi_weights = [40.0, 40.0, 20.0];
    let planet_count = 2 + rng.weighted_index(&poi_weights).unwrap_or(0) as u32;
    for _ in 0..planet_count {
        let planet_id = state.counters.next_planet();
        let name = format!("{}-{}", sector_name, planet_id.0);
        let planet = generate_planet(
            planet_id,
            name.clone(),
            sector_id,
            tier,
            turn,
            &state.config,
            rng,
        );
        state.planets.insert(planet_id, planet);
        emit(
            events,
            turn,
            EventCategory::Exploration,
            EventPriority::Positive,
            format!("New world charted: {}", name),
            format!(
                "Orbital survey of {} has charted {} (scan tier {}).",
                sector_name, name, tier
            ),
            vec![EntityRef::Planet(planet_id), EntityRef::Sector(sector_id)],
        );
    }
}

fn complete_colonization(
    state: &mut GameState,
    contract: &Contract,
    _events: &mut [GameEvent],
) {
    let ContractTarget::Planet(planet_id) = contract.target else {
        return;
    };
    let colony_type = contract
        .colonization
        .as_ref()
        .expect("colonization contract without colony type")
        .colony_type;
    let turn = state.turn;

    let colony_id = state.counters.next_colony();
    let planet = state
        .planets
        .get_mut(&planet_id)
        .expect("colonization contract references a missing planet");
    planet.status = PlanetStatus::Colonized;
    let planet_snapshot = planet.clone();

    let colony = found_colony(
        colony_id,
        &planet_snapshot,
        colony_type,
        Some(contract.corp),
        turn,
        &state.config,
        &mut state.counters,
    );
    state.colonies.insert(colony_id, colony);

    let corp = state
        .corporations
        .get_mut(&contract.corp)
        .expect("contract references a missing corporation");
    corp.register_planet(planet_id);
    info!(
        "{} founded a {:?} colony on {}",
        contract.corp, colony_type, planet_snapshot.name
    );
}

fn complete_ship_commission(
    state: &mut GameState,
    contract: &Contract,
    rng: &mut TurnRng,
    events: &mut Vec<GameEvent>,
) {
    let ContractTarget::Colony(colony_id) = contract.target else {
        return;
    };
    let commission = contract
        .ship_commission
        .as_ref()
        .expect("ship commission contract without ship params");
    let turn = state.turn;
    let home_sector = state
        .colonies
        .get(&colony_id)
        .map(|c| c.sector)
        .expect("commission contract references a missing colony");

    let (corp_level, schematics) = {
        let corp = state
            .corporations
            .get(&contract.corp)
            .expect("contract references a missing corporation");
        (corp.level, corp.schematics.clone())
    };

    let blueprint = generate_blueprint(
        commission.role,
        commission.size_variant,
        corp_level,
        &|stat| state.empire_tech_bonus(stat),
        &schematics,
        &state.config,
        rng,
    );

    let captain_id = state.counters.next_captain();
    let captain = Captain {
        id: captain_id,
        name: captain_name(captain_id),
        experience: 0,
    };
    let ship_id = state.counters.next_ship();
    let name = commission
        .ship_name
        .clone()
        .unwrap_or_else(|| format!("ESV {}-{}", commission.role, ship_id.0));
    let mut ship = build_ship(
        ship_id,
        &captain,
        name,
        &blueprint,
        &schematics,
        home_sector,
        turn,
    );
    ship.status = ShipStatus::Stationed;

    let ship_name = ship.name.clone();
    state.captains.insert(captain_id, captain);
    state.ships.insert(ship_id, ship);
    info!("{} commissioned at {} by {}", ship_id, colony_id, contract.corp);

    emit(
        events,
        turn,
        EventCategory::Fleet,
        EventPriority::Positive,
        format!("{} enters service", ship_name),
        format!(
            "{} has been commissioned and is stationed in its home sector.",
            ship_name
        ),
        vec![EntityRef::Ship(ship_id), EntityRef::Corp(contract.corp)],
    );
}
