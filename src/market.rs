//! Sector markets: production/consumption balance and shortages.
//!
//! Markets are recomputed from scratch every turn. Production reads the
//! markets as they stood at entry to the phase, so a manufacturing input
//! shortage only throttles tier-2 industry on the following turn. Trade
//! routes move surplus toward deficit at 50% efficiency. Once the new
//! balance is known, shortage modifiers are re-inserted on every colony in
//! an undersupplied sector.

use crate::colony::Colony;
use crate::event::GameEvent;
use crate::formula;
use crate::modifier::{ModifierOp, ModifierSourceKind, Modifier};
use crate::planet::Planet;
use crate::resource::{InfraDomain, Resource};
use crate::state::GameState;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// Per-sector, per-resource market balance for one turn.
///
/// Stored in the state for inspection, but logically transient: the market
/// phase rebuilds every entry each turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SectorMarket {
    pub production: BTreeMap<Resource, i64>,
    pub consumption: BTreeMap<Resource, i64>,
    pub inbound: BTreeMap<Resource, i64>,
    pub outbound: BTreeMap<Resource, i64>,
}

impl SectorMarket {
    fn get(map: &BTreeMap<Resource, i64>, resource: Resource) -> i64 {
        map.get(&resource).copied().unwrap_or(0)
    }

    /// Net surplus after trade flows. Negative means shortage.
    pub fn net_surplus(&self, resource: Resource) -> i64 {
        Self::get(&self.production, resource) + Self::get(&self.inbound, resource)
            - Self::get(&self.consumption, resource)
            - Self::get(&self.outbound, resource)
    }

    pub fn in_shortage(&self, resource: Resource) -> bool {
        self.net_surplus(resource) < 0
    }

    /// Every resource currently in shortage, in enum order.
    pub fn shortage_resources(&self) -> Vec<Resource> {
        Resource::iter().filter(|r| self.in_shortage(*r)).collect()
    }
}

/// Computes one colony's per-resource production.
///
/// `inputs_in_shortage` reports whether a manufacturing input was short in
/// this sector at entry to the market phase (the previous turn's balance).
pub fn colony_production(
    colony: &Colony,
    planet: &Planet,
    inputs_in_shortage: &dyn Fn(Resource) -> bool,
) -> BTreeMap<Resource, i64> {
    let mut output = BTreeMap::new();
    for domain in InfraDomain::iter() {
        let Some(resource) = domain.produced_resource() else {
            continue;
        };
        let levels = colony.total_levels(domain);
        if levels == 0 {
            continue;
        }
        let amount = if domain.is_extraction() {
            match planet.best_deposit_richness(domain) {
                Some(richness) => formula::extraction_output(levels, richness),
                None => 0,
            }
        } else if domain.is_manufacturing() {
            let available = !domain.required_inputs().iter().any(|r| inputs_in_shortage(*r));
            formula::manufacturing(levels, available) as i64
        } else {
            levels as i64
        };
        if amount > 0 {
            *output.entry(resource).or_default() += amount;
        }
    }
    output
}

/// Computes one colony's per-resource consumption: population draw plus
/// manufacturing inputs.
pub fn colony_consumption(colony: &Colony) -> BTreeMap<Resource, i64> {
    let mut demand: BTreeMap<Resource, i64> = BTreeMap::new();
    for resource in Resource::iter() {
        if resource.consumed_by_population() {
            *demand.entry(resource).or_default() +=
                formula::population_consumption(colony.population) as i64;
        }
    }
    for domain in InfraDomain::iter() {
        let levels = colony.total_levels(domain);
        if levels == 0 {
            continue;
        }
        for input in domain.required_inputs() {
            *demand.entry(*input).or_default() += formula::industrial_input(levels) as i64;
        }
    }
    demand
}

/// Runs the market phase.
///
/// Order of operations: clear transient shortage modifiers everywhere,
/// rebuild per-sector balances from colony production/consumption (reading
/// the previous balances for manufacturing inputs), route trade flows in
/// contract-id order, then insert fresh shortage modifiers.
pub fn run_market_phase(state: &mut GameState, _events: &mut Vec<GameEvent>) {
    for colony in state.colonies.values_mut() {
        colony.clear_shortage_modifiers();
    }

    let previous = state.sector_markets.clone();
    let mut markets: BTreeMap<_, SectorMarket> = BTreeMap::new();
    for sector_id in state.galaxy.sectors.keys() {
        markets.insert(*sector_id, SectorMarket::default());
    }

    for colony in state.colonies.values() {
        let planet = state
            .planets
            .get(&colony.planet)
            .expect("colony references a missing planet");
        let prev_market = previous.get(&colony.sector);
        let production = colony_production(colony, planet, &|resource| {
            prev_market.map(|m| m.in_shortage(resource)).unwrap_or(false)
        });
        let consumption = colony_consumption(colony);

        let market = markets.entry(colony.sector).or_default();
        for (resource, amount) in production {
            *market.production.entry(resource).or_default() += amount;
        }
        for (resource, amount) in consumption {
            *market.consumption.entry(resource).or_default() += amount;
        }
    }

    route_trade_flows(state, &mut markets);

    // Insert fresh shortage modifiers on every colony of an undersupplied
    // sector.
    let mut pending: Vec<(crate::colony::ColonyId, Resource, f64)> = Vec::new();
    for (sector_id, market) in &markets {
        let food_short = market.in_shortage(Resource::Food);
        let goods_short = market.in_shortage(Resource::ConsumerGoods);
        if !food_short && !goods_short {
            continue;
        }
        for colony in state.colonies.values().filter(|c| c.sector == *sector_id) {
            if food_short {
                pending.push((colony.id, Resource::Food, -2.0));
            }
            if goods_short {
                pending.push((colony.id, Resource::ConsumerGoods, -1.0));
            }
        }
    }
    for (colony_id, resource, value) in pending {
        let modifier_id = state.counters.next_modifier();
        let colony = state
            .colonies
            .get_mut(&colony_id)
            .expect("colony vanished mid-phase");
        colony.modifiers.push(Modifier::new(
            modifier_id,
            "qualityOfLife",
            ModifierOp::Add,
            value,
            ModifierSourceKind::Shortage,
            resource.to_string(),
            format!("{} shortage", resource),
        ));
        trace!("{}: {} shortage modifier ({})", colony_id, resource, value);
    }

    state.sector_markets = markets;
}

/// Moves surplus along active trade routes at 50% efficiency.
///
/// Routes are visited in ascending contract id; within a route, resources in
/// enum order, first A→B then B→A, against running balances.
fn route_trade_flows(
    state: &GameState,
    markets: &mut BTreeMap<crate::sector::SectorId, SectorMarket>,
) {
    use crate::contract::{ContractStatus, ContractTarget, ContractType};

    for contract in state.contracts.values() {
        if contract.contract_type != ContractType::TradeRoute
            || contract.status != ContractStatus::Active
        {
            continue;
        }
        let ContractTarget::SectorPair(a, b) = contract.target else {
            continue;
        };
        for resource in Resource::iter() {
            for (from, to) in [(a, b), (b, a)] {
                let from_net = markets.get(&from).map(|m| m.net_surplus(resource)).unwrap_or(0);
                let to_net = markets.get(&to).map(|m| m.net_surplus(resource)).unwrap_or(0);
                if from_net <= 0 || to_net >= 0 {
                    continue;
                }
                let flow = from_net.min(-to_net);
                if let Some(market) = markets.get_mut(&from) {
                    *market.outbound.entry(resource).or_default() += flow;
                }
                if let Some(market) = markets.get_mut(&to) {
                    *market.inbound.entry(resource).or_default() += flow / 2;
                }
                debug!(
                    "trade route {}: {} x{} from {} to {}",
                    contract.id, resource, flow, from, to
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colony::{Colony, ColonyId, ColonyType};
    use crate::planet::{PlanetId, PlanetSize, PlanetStatus, PlanetType, Deposit, DepositType, Richness};
    use crate::sector::SectorId;

    fn planet_with_ore() -> Planet {
        Planet {
            id: PlanetId(1),
            name: "Forge".to_string(),
            sector: SectorId(0),
            planet_type: PlanetType::Continental,
            size: PlanetSize::Medium,
            status: PlanetStatus::Colonized,
            base_habitability: 7,
            deposits: vec![Deposit {
                deposit_type: DepositType::MetallicOre,
                richness: Richness::Rich,
                richness_revealed: true,
            }],
            features: vec![],
            scan_tier: 3,
            orbit_scan_turn: Some(0),
            ground_survey_turn: Some(0),
        }
    }

    fn colony_with(levels: &[(InfraDomain, u32)], population: u32) -> Colony {
        let mut colony =
            Colony::new(ColonyId(1), PlanetId(1), SectorId(0), ColonyType::Mining, 0);
        colony.population = population;
        for (domain, n) in levels {
            colony.domain_mut(*domain).public_levels = *n;
        }
        colony
    }

    #[test]
    fn test_net_surplus_includes_flows() {
        let mut market = SectorMarket::default();
        market.production.insert(Resource::Food, 5);
        market.consumption.insert(Resource::Food, 8);
        market.inbound.insert(Resource::Food, 2);
        assert_eq!(market.net_surplus(Resource::Food), -1);
        assert!(market.in_shortage(Resource::Food));
        assert_eq!(market.shortage_resources(), vec![Resource::Food]);
    }

    #[test]
    fn test_colony_production_extraction_and_agriculture() {
        let planet = planet_with_ore();
        let colony = colony_with(
            &[(InfraDomain::Agricultural, 3), (InfraDomain::Mining, 4)],
            2,
        );
        let production = colony_production(&colony, &planet, &|_| false);
        assert_eq!(production[&Resource::Food], 3);
        // 4 levels * 1.5 rich multiplier = 6
        assert_eq!(production[&Resource::Minerals], 6);
    }

    #[test]
    fn test_colony_production_manufacturing_throttled_by_input_shortage() {
        let planet = planet_with_ore();
        let colony = colony_with(&[(InfraDomain::LowIndustry, 4)], 2);
        let full = colony_production(&colony, &planet, &|_| false);
        assert_eq!(full[&Resource::ConsumerGoods], 4);
        let throttled =
            colony_production(&colony, &planet, &|r| r == Resource::Minerals);
        assert_eq!(throttled[&Resource::ConsumerGoods], 2);
    }

    #[test]
    fn test_colony_consumption_population_and_inputs() {
        let colony = colony_with(&[(InfraDomain::HighIndustry, 3)], 4);
        let demand = colony_consumption(&colony);
        assert_eq!(demand[&Resource::Food], 4);
        assert_eq!(demand[&Resource::ConsumerGoods], 4);
        assert_eq!(demand[&Resource::TransportCapacity], 4);
        assert_eq!(demand[&Resource::Minerals], 3);
        assert_eq!(demand[&Resource::Gases], 3);
    }
}
