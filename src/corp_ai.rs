//! Autonomous corporate behavior: capital drift, deficit-driven investment,
//! and megacorp acquisitions.
//!
//! Corporations act once per turn in level-descending, id-ascending order.
//! Investment chases sector-market deficits: each deficit whose producing
//! domain the corp may operate (and whose required inputs are locally
//! available) is weighted by the size of the shortfall, one is drawn, and
//! the highest-dynamism eligible colony in that sector receives the level.

use crate::corporation::CorpId;
use crate::event::{emit, EntityRef, EventCategory, EventPriority, GameEvent};
use crate::formula;
use crate::resource::{InfraDomain, Resource};
use crate::rng::TurnRng;
use crate::ship::ShipOwner;
use crate::state::GameState;
use log::{debug, info};
use strum::IntoEnumIterator;

/// Capital a corp must hold before attempting an infrastructure investment.
const INVESTMENT_COST: i64 = 2;

/// Capital floor for attempting an acquisition.
const ACQUISITION_CAPITAL_FLOOR: i64 = 5;

/// Level lead required over an acquisition target.
const ACQUISITION_LEVEL_LEAD: u32 = 3;

/// Runs the corporate phase.
pub fn run_corporate_phase(
    state: &mut GameState,
    rng: &mut TurnRng,
    events: &mut Vec<GameEvent>,
) {
    for corp_id in state.corporate_order() {
        // A corp may have been absorbed earlier in this same phase.
        if !state.corporations.contains_key(&corp_id) {
            continue;
        }

        let gain = {
            let corp = state.corporations.get_mut(&corp_id).expect("corp vanished");
            let gain = formula::capital_gain(rng.coin(), corp.total_owned_infra());
            corp.capital += gain;
            gain
        };
        debug!("{} capital drift +{}", corp_id, gain);

        if state.corporations[&corp_id].capital >= INVESTMENT_COST {
            attempt_investment(state, corp_id, rng, events);
        }

        attempt_level_up(state, corp_id, events);

        let corp = &state.corporations[&corp_id];
        if corp.level >= 6 && corp.capital >= ACQUISITION_CAPITAL_FLOOR {
            attempt_acquisition(state, corp_id, events);
        }
    }
}

/// Pays for a level if the corp can afford it twice over (the reserve keeps
/// investment going the following turns).
fn attempt_level_up(state: &mut GameState, corp_id: CorpId, events: &mut Vec<GameEvent>) {
    let turn = state.turn;
    let corp = state.corporations.get_mut(&corp_id).expect("corp vanished");
    if corp.level >= crate::corporation::MAX_CORP_LEVEL {
        return;
    }
    let cost = formula::level_up_cost(corp.level);
    if corp.capital < cost * 2 {
        return;
    }
    corp.capital -= cost;
    corp.level += 1;
    let (name, level) = (corp.name.clone(), corp.level);
    info!("{} grows to level {}", corp_id, level);
    emit(
        events,
        turn,
        EventCategory::Corporation,
        EventPriority::Info,
        format!("{} grows to level {}", name, level),
        format!("{} has reinvested its profits and reached level {}.", name, level),
        vec![EntityRef::Corp(corp_id)],
    );
}

/// One deficit-weighted infrastructure investment attempt.
fn attempt_investment(
    state: &mut GameState,
    corp_id: CorpId,
    rng: &mut TurnRng,
    events: &mut Vec<GameEvent>,
) {
    let turn = state.turn;
    let (level, corp_type, owned) = {
        let corp = &state.corporations[&corp_id];
        (corp.level, corp.corp_type, corp.total_owned_infra())
    };
    if owned >= formula::max_owned_infra(level) {
        debug!("{} at ownership ceiling, skipping investment", corp_id);
        return;
    }
    let allowed: Vec<InfraDomain> = if level < 3 {
        state.config.primary_domains(corp_type).to_vec()
    } else {
        InfraDomain::iter().collect()
    };

    // Candidate deficits in sector-id then resource-enum order, weighted by
    // the shortfall.
    let mut candidates: Vec<(crate::sector::SectorId, InfraDomain)> = Vec::new();
    let mut weights: Vec<f64> = Vec::new();
    for (sector_id, market) in &state.sector_markets {
        for resource in Resource::iter() {
            let surplus = market.net_surplus(resource);
            if surplus >= 0 {
                continue;
            }
            let domain = resource.producing_domain();
            if !allowed.contains(&domain) {
                continue;
            }
            if domain
                .required_inputs()
                .iter()
                .any(|input| market.in_shortage(*input))
            {
                continue;
            }
            candidates.push((*sector_id, domain));
            weights.push(surplus.unsigned_abs() as f64);
        }
    }
    let Some(picked) = rng.weighted_index(&weights) else {
        return;
    };
    let (sector_id, domain) = candidates[picked];

    // Highest-dynamism eligible colony in that sector; ascending id breaks
    // ties.
    let mut best: Option<(i64, crate::colony::ColonyId)> = None;
    for colony_id in state.colonies_in_sector(sector_id) {
        let colony = &state.colonies[&colony_id];
        if !colony.domain(domain).is_below_cap() {
            continue;
        }
        if domain.is_extraction() {
            let planet = state
                .planets
                .get(&colony.planet)
                .expect("colony references a missing planet");
            if planet.best_deposit_richness(domain).is_none() {
                continue;
            }
        }
        let dynamism = colony.attributes.dynamism;
        if best.map(|(top, _)| dynamism > top).unwrap_or(true) {
            best = Some((dynamism, colony_id));
        }
    }
    let Some((_, colony_id)) = best else {
        debug!("{} found no eligible colony for {} in {}", corp_id, domain, sector_id);
        return;
    };

    let planet_id = state.colonies[&colony_id].planet;
    {
        let colony = state.colonies.get_mut(&colony_id).expect("colony vanished");
        *colony
            .domain_mut(domain)
            .corporate_levels
            .entry(corp_id)
            .or_default() += 1;
        colony.register_corporation(corp_id);
    }
    let corp_name = {
        let corp = state.corporations.get_mut(&corp_id).expect("corp vanished");
        corp.capital -= INVESTMENT_COST;
        corp.add_holding(colony_id, domain, 1);
        corp.register_planet(planet_id);
        corp.name.clone()
    };
    info!("{} invests in {} at {}", corp_id, domain, colony_id);

    emit(
        events,
        turn,
        EventCategory::Corporation,
        EventPriority::Info,
        format!("{} expands", corp_name),
        format!("{} has built a new {} facility.", corp_name, domain),
        vec![EntityRef::Corp(corp_id), EntityRef::Colony(colony_id)],
    );
}

/// One acquisition attempt by a megacorp.
fn attempt_acquisition(state: &mut GameState, buyer_id: CorpId, events: &mut Vec<GameEvent>) {
    let turn = state.turn;
    let (buyer_level, buyer_capital) = {
        let buyer = &state.corporations[&buyer_id];
        (buyer.level, buyer.capital)
    };

    // Target with the most owned infrastructure; ascending id breaks ties.
    let mut best: Option<(u32, CorpId, i64)> = None;
    for target in state.corporations.values() {
        if target.id == buyer_id {
            continue;
        }
        if buyer_level.saturating_sub(target.level) < ACQUISITION_LEVEL_LEAD {
            continue;
        }
        let cost = formula::acquisition_cost(target.level);
        if buyer_capital < cost {
            continue;
        }
        let owned = target.total_owned_infra();
        if best.map(|(top, _, _)| owned > top).unwrap_or(true) {
            best = Some((owned, target.id, cost));
        }
    }
    let Some((_, target_id, cost)) = best else {
        return;
    };

    let target = state
        .corporations
        .remove(&target_id)
        .expect("acquisition target vanished");

    // Re-key the target's colony levels and presence to the buyer so the
    // holdings ledger and the colony view stay in agreement.
    for colony in state.colonies.values_mut() {
        for domain_state in colony.infrastructure.values_mut() {
            if let Some(levels) = domain_state.corporate_levels.remove(&target_id) {
                *domain_state.corporate_levels.entry(buyer_id).or_default() += levels;
            }
        }
        colony.corporations_present.retain(|c| *c != target_id);
        if target.holdings.contains_key(&colony.id) {
            colony.register_corporation(buyer_id);
        }
    }
    for contract in state.contracts.values_mut() {
        if contract.corp == target_id {
            contract.corp = buyer_id;
        }
    }
    for ship in state.ships.values_mut() {
        if ship.owner == ShipOwner::Corp(target_id) {
            ship.owner = ShipOwner::Corp(buyer_id);
        }
    }

    let buyer_name = {
        let buyer = state.corporations.get_mut(&buyer_id).expect("buyer vanished");
        buyer.capital -= cost;
        buyer.level = (buyer.level + 1).min(crate::corporation::MAX_CORP_LEVEL);
        buyer.absorb(&target);
        buyer.name.clone()
    };
    info!("{} acquires {} for {} capital", buyer_id, target_id, cost);

    emit(
        events,
        turn,
        EventCategory::Corporation,
        EventPriority::Info,
        format!("{} acquires {}", buyer_name, target.name),
        format!(
            "{} has absorbed {} and its holdings across {} colonies.",
            buyer_name,
            target.name,
            target.holdings.len()
        ),
        vec![EntityRef::Corp(buyer_id)],
    );
}
