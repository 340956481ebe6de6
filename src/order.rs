//! Player orders: validation and application.
//!
//! Orders are the only player-driven mutations. Every order is validated
//! with a stable, typed error kind before anything changes; a failed
//! validation leaves the state untouched. Validation errors are recoverable
//! and surfaced to the caller, in contrast to invariant violations which
//! panic.

use crate::colony::ColonyId;
use crate::contract::{
    create_contract, plan_contract, ContractId, ContractParams, ContractStatus,
    ContractTarget, ContractType,
};
use crate::corporation::CorpId;
use crate::mission::{create_mission, MissionType};
use crate::planet::{PlanetId, PlanetStatus};
use crate::resource::InfraDomain;
use crate::rng::TurnRng;
use crate::sector::SectorId;
use crate::ship::ShipId;
use crate::state::GameState;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed BP cost of a public infrastructure investment.
pub const INVEST_COST: i64 = 3;

/// A player-issued instruction, applied before the turn pipeline runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Order {
    AcceptPlanet {
        planet: PlanetId,
    },
    RejectPlanet {
        planet: PlanetId,
    },
    InvestPlanet {
        colony: ColonyId,
        domain: InfraDomain,
    },
    CreateContract {
        params: ContractParams,
    },
    CreateTradeRoute {
        sector_a: SectorId,
        sector_b: SectorId,
        corp: CorpId,
    },
    CancelTradeRoute {
        contract: ContractId,
    },
    CreateMission {
        mission_type: MissionType,
        target_sector: SectorId,
        ships: Vec<ShipId>,
    },
}

/// Typed validation failure with a stable kind code.
///
/// These are recoverable: the engine guarantees no state mutation occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderError {
    PlanetNotFound,
    InvalidStatus,
    ColonyNotFound,
    InsufficientBp,
    NoMatchingDeposit,
    AtCap,
    TargetNotFound,
    InvalidTargetType,
    InvalidPlanetStatus,
    SectorsNotAdjacent,
    SectorOutOfRange,
    CorpNotFound,
    CorpNotEligible,
    MissingColonyType,
    MissingShipParams,
    InsufficientSpaceInfra,
    ShipNotFound,
    ShipNotAvailable,
    EmptyTaskForce,
    ContractNotFound,
    NotATradeRoute,
}

impl OrderError {
    /// Stable machine-readable code for UI dispatch.
    pub fn kind(self) -> &'static str {
        match self {
            OrderError::PlanetNotFound => "PlanetNotFound",
            OrderError::InvalidStatus => "InvalidStatus",
            OrderError::ColonyNotFound => "ColonyNotFound",
            OrderError::InsufficientBp => "InsufficientBP",
            OrderError::NoMatchingDeposit => "NoMatchingDeposit",
            OrderError::AtCap => "AtCap",
            OrderError::TargetNotFound => "TargetNotFound",
            OrderError::InvalidTargetType => "InvalidTargetType",
            OrderError::InvalidPlanetStatus => "InvalidPlanetStatus",
            OrderError::SectorsNotAdjacent => "SectorsNotAdjacent",
            OrderError::SectorOutOfRange => "SectorOutOfRange",
            OrderError::CorpNotFound => "CorpNotFound",
            OrderError::CorpNotEligible => "CorpNotEligible",
            OrderError::MissingColonyType => "MissingColonyType",
            OrderError::MissingShipParams => "MissingShipParams",
            OrderError::InsufficientSpaceInfra => "InsufficientSpaceInfra",
            OrderError::ShipNotFound => "ShipNotFound",
            OrderError::ShipNotAvailable => "ShipNotAvailable",
            OrderError::EmptyTaskForce => "EmptyTaskForce",
            OrderError::ContractNotFound => "ContractNotFound",
            OrderError::NotATradeRoute => "NotATradeRoute",
        }
    }
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            OrderError::PlanetNotFound => "the referenced planet does not exist",
            OrderError::InvalidStatus => "the planet's status does not permit this order",
            OrderError::ColonyNotFound => "the referenced colony does not exist",
            OrderError::InsufficientBp => "not enough budget points",
            OrderError::NoMatchingDeposit => {
                "the colony's planet has no deposit for this extraction domain"
            }
            OrderError::AtCap => "the domain is already at its infrastructure cap",
            OrderError::TargetNotFound => "the contract target does not exist",
            OrderError::InvalidTargetType => "the target kind does not match the contract type",
            OrderError::InvalidPlanetStatus => {
                "the target planet's status does not permit this contract"
            }
            OrderError::SectorsNotAdjacent => "the two sectors are not adjacent",
            OrderError::SectorOutOfRange => "the sector is beyond colonial reach",
            OrderError::CorpNotFound => "the assigned corporation does not exist",
            OrderError::CorpNotEligible => "the corporation may not take this contract type",
            OrderError::MissingColonyType => "colonization requires a colony type",
            OrderError::MissingShipParams => "ship commission requires ship parameters",
            OrderError::InsufficientSpaceInfra => {
                "the colony's space industry is too small for this hull"
            }
            OrderError::ShipNotFound => "a task-force ship does not exist",
            OrderError::ShipNotAvailable => "a task-force ship is not stationed or not public",
            OrderError::EmptyTaskForce => "a mission needs at least one ship",
            OrderError::ContractNotFound => "the referenced contract does not exist",
            OrderError::NotATradeRoute => "only trade-route contracts can be cancelled",
        };
        write!(f, "{}", message)
    }
}

impl std::error::Error for OrderError {}

/// Pre-flight validation used by the UI. Never mutates.
pub fn validate_order(state: &GameState, order: &Order) -> Result<(), OrderError> {
    match order {
        Order::AcceptPlanet { planet } | Order::RejectPlanet { planet } => {
            let planet = state.planets.get(planet).ok_or(OrderError::PlanetNotFound)?;
            match planet.status {
                PlanetStatus::OrbitScanned | PlanetStatus::GroundSurveyed => Ok(()),
                _ => Err(OrderError::InvalidStatus),
            }
        }
        Order::InvestPlanet { colony, domain } => {
            let colony = state.colonies.get(colony).ok_or(OrderError::ColonyNotFound)?;
            if state.current_bp < INVEST_COST {
                return Err(OrderError::InsufficientBp);
            }
            if domain.is_extraction() {
                let planet = state
                    .planets
                    .get(&colony.planet)
                    .ok_or(OrderError::PlanetNotFound)?;
                if planet.best_deposit_richness(*domain).is_none() {
                    return Err(OrderError::NoMatchingDeposit);
                }
            }
            if !colony.domain(*domain).is_below_cap() {
                return Err(OrderError::AtCap);
            }
            Ok(())
        }
        Order::CreateContract { params } => plan_contract(state, params).map(|_| ()),
        Order::CreateTradeRoute { sector_a, sector_b, corp } => {
            let params = trade_route_params(*sector_a, *sector_b, *corp);
            plan_contract(state, &params).map(|_| ())
        }
        Order::CancelTradeRoute { contract } => {
            let contract = state
                .contracts
                .get(contract)
                .ok_or(OrderError::ContractNotFound)?;
            if contract.contract_type != ContractType::TradeRoute {
                return Err(OrderError::NotATradeRoute);
            }
            if contract.status != ContractStatus::Active {
                return Err(OrderError::InvalidStatus);
            }
            Ok(())
        }
        Order::CreateMission { target_sector, ships, .. } => {
            if ships.is_empty() {
                return Err(OrderError::EmptyTaskForce);
            }
            if !state.galaxy.contains(*target_sector) {
                return Err(OrderError::TargetNotFound);
            }
            for ship_id in ships {
                let ship = state.ships.get(ship_id).ok_or(OrderError::ShipNotFound)?;
                if !ship.mission_ready() {
                    return Err(OrderError::ShipNotAvailable);
                }
            }
            let departure = state.ships[&ships[0]].home_sector;
            state
                .galaxy
                .hop_distance(departure, *target_sector)
                .map(|_| ())
                .ok_or(OrderError::SectorOutOfRange)
        }
    }
}

/// Applies one validated order to a working state. The RNG is consumed only
/// by mission creation (execution-duration draw).
pub(crate) fn apply_order_mut(
    state: &mut GameState,
    order: &Order,
    rng: &mut TurnRng,
) -> Result<(), OrderError> {
    validate_order(state, order)?;
    match order {
        Order::AcceptPlanet { planet } => {
            let planet = state
                .planets
                .get_mut(planet)
                .expect("planet vanished after validation");
            planet.status = PlanetStatus::Accepted;
            info!("{} accepted for settlement", planet.id);
        }
        Order::RejectPlanet { planet } => {
            let planet = state
                .planets
                .get_mut(planet)
                .expect("planet vanished after validation");
            planet.status = PlanetStatus::Rejected;
            info!("{} rejected", planet.id);
        }
        Order::InvestPlanet { colony, domain } => {
            state.current_bp -= INVEST_COST;
            let colony = state
                .colonies
                .get_mut(colony)
                .expect("colony vanished after validation");
            colony.domain_mut(*domain).public_levels += 1;
            info!("public investment: +1 {} on {}", domain, colony.id);
        }
        Order::CreateContract { params } => {
            create_contract(state, params.clone())?;
        }
        Order::CreateTradeRoute { sector_a, sector_b, corp } => {
            create_contract(state, trade_route_params(*sector_a, *sector_b, *corp))?;
        }
        Order::CancelTradeRoute { contract } => {
            let turn = state.turn;
            let corp_id = {
                let contract = state
                    .contracts
                    .get_mut(contract)
                    .expect("contract vanished after validation");
                contract.status = ContractStatus::Completed;
                contract.completed_turn = Some(turn);
                contract.corp
            };
            if let Some(corp) = state.corporations.get_mut(&corp_id) {
                corp.active_contracts.retain(|c| c != contract);
            }
            info!("{} cancelled", contract);
        }
        Order::CreateMission { mission_type, target_sector, ships } => {
            create_mission(state, *mission_type, *target_sector, ships, rng)?;
        }
    }
    Ok(())
}

/// Applies a single order to produce a new state. The input is untouched;
/// on error, nothing is returned and nothing changed.
pub fn apply_order(
    state: &GameState,
    order: &Order,
    rng: &mut TurnRng,
) -> Result<GameState, OrderError> {
    let mut next = state.clone();
    apply_order_mut(&mut next, order, rng)?;
    Ok(next)
}

fn trade_route_params(a: SectorId, b: SectorId, corp: CorpId) -> ContractParams {
    ContractParams {
        contract_type: ContractType::TradeRoute,
        target: ContractTarget::SectorPair(a, b),
        corp,
        colonization: None,
        ship_commission: None,
    }
}
