//! Discoveries, schematics, and the science phase.
//!
//! The state carries a finite discovery pool. Each turn every science
//! corporation rolls once for a breakthrough; a success draws a discovery
//! the corp's level qualifies for, removes it from the pool, patents it to
//! the corp, and applies its empire-wide effect. Effects are cumulative and
//! permanent.

use crate::corporation::CorpType;
use crate::event::{emit, EntityRef, EventCategory, EventPriority, GameEvent};
use crate::rng::TurnRng;
use crate::ship::ShipStat;
use crate::state::GameState;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Unique identifier for a discovery.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DiscoveryId(pub u32);

impl std::fmt::Display for DiscoveryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "discovery-{}", self.0)
    }
}

/// Unique identifier for a schematic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SchematicId(pub u32);

impl std::fmt::Display for SchematicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "schematic-{}", self.0)
    }
}

/// A reusable ship-design improvement held by a corporation and applied to
/// every blueprint it builds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schematic {
    pub id: SchematicId,
    pub name: String,
    pub stat: ShipStat,
    pub bonus: i64,
}

/// What a discovery grants the empire when drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DiscoveryEffect {
    /// Cumulative empire-wide ship-stat bonus consumed by the blueprint
    /// generator
    TechBonus { stat: ShipStat, value: i64 },
    /// The discovering corp gains a schematic
    Schematic { stat: ShipStat, bonus: i64 },
    /// Cumulative empire-wide additive bonus to a colony attribute
    AttributeBonus { target: String, value: f64 },
}

/// One entry of the discovery pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discovery {
    pub id: DiscoveryId,
    pub name: String,
    /// Minimum corp level required to draw this entry
    pub min_level: u32,
    pub effect: DiscoveryEffect,
}

/// A permanent empire-wide bonus produced by a past discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpireBonus {
    pub source: DiscoveryId,
    pub source_name: String,
    pub target: BonusTarget,
}

/// What an empire bonus adjusts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BonusTarget {
    ShipStat(ShipStat, i64),
    Attribute(String, f64),
}

/// Breakthrough chance (percent) for a science corp of the given level.
pub fn breakthrough_chance(level: u32) -> f64 {
    (15 + 5 * level as i64).min(75) as f64
}

/// Runs the science phase: one breakthrough roll per science corporation in
/// the standard corporate determinism order (level descending, id
/// ascending).
pub fn run_science_phase(
    state: &mut GameState,
    rng: &mut TurnRng,
    events: &mut Vec<GameEvent>,
) {
    let turn = state.turn;
    let mut science_corps: Vec<_> = state
        .corporations
        .values()
        .filter(|c| c.corp_type == CorpType::Science)
        .map(|c| (c.level, c.id))
        .collect();
    science_corps.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    for (level, corp_id) in science_corps {
        let eligible: Vec<usize> = state
            .discovery_pool
            .iter()
            .enumerate()
            .filter(|(_, d)| d.min_level <= level)
            .map(|(i, _)| i)
            .collect();
        if eligible.is_empty() {
            debug!("{} has no eligible discoveries remaining", corp_id);
            continue;
        }
        if !rng.chance(breakthrough_chance(level)) {
            continue;
        }

        let pick = eligible[rng.roll_range(0, eligible.len() as u32 - 1) as usize];
        let discovery = state.discovery_pool.remove(pick);
        info!("{} achieves breakthrough: {}", corp_id, discovery.name);

        match &discovery.effect {
            DiscoveryEffect::TechBonus { stat, value } => {
                state.empire_bonuses.push(EmpireBonus {
                    source: discovery.id,
                    source_name: discovery.name.clone(),
                    target: BonusTarget::ShipStat(*stat, *value),
                });
            }
            DiscoveryEffect::AttributeBonus { target, value } => {
                state.empire_bonuses.push(EmpireBonus {
                    source: discovery.id,
                    source_name: discovery.name.clone(),
                    target: BonusTarget::Attribute(target.clone(), *value),
                });
            }
            DiscoveryEffect::Schematic { stat, bonus } => {
                let schematic_id = state.counters.next_schematic();
                let corp = state
                    .corporations
                    .get_mut(&corp_id)
                    .expect("science corp vanished mid-phase");
                corp.schematics.push(Schematic {
                    id: schematic_id,
                    name: discovery.name.clone(),
                    stat: *stat,
                    bonus: *bonus,
                });
            }
        }

        let corp = state
            .corporations
            .get_mut(&corp_id)
            .expect("science corp vanished mid-phase");
        corp.patents.push(discovery.id);
        let corp_name = corp.name.clone();

        emit(
            events,
            turn,
            EventCategory::Science,
            EventPriority::Positive,
            format!("Breakthrough: {}", discovery.name),
            format!("{} has completed research into {}.", corp_name, discovery.name),
            vec![EntityRef::Corp(corp_id)],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakthrough_chance_scales_and_caps() {
        assert_eq!(breakthrough_chance(1), 20.0);
        assert_eq!(breakthrough_chance(5), 40.0);
        assert_eq!(breakthrough_chance(12), 75.0);
    }
}
