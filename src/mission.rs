//! Missions: government task forces operating in the field.
//!
//! A mission moves through Travel → Execute → Return → Complete, one
//! decrement per turn. Travel and return times come from the shortest hop
//! path between the departure sector and the target; execution time is drawn
//! from the mission type's configured range at creation. Ships are locked to
//! the mission for its whole life and restored to station on completion.

use crate::event::{emit, EntityRef, EventCategory, EventPriority, GameEvent};
use crate::order::OrderError;
use crate::rng::TurnRng;
use crate::sector::SectorId;
use crate::ship::{CaptainId, ShipId, ShipStatus};
use crate::state::GameState;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Unique identifier for a mission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MissionId(pub u32);

impl std::fmt::Display for MissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mission-{}", self.0)
    }
}

/// Kind of operation; indexes the mission-type config table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumIter, EnumString,
)]
pub enum MissionType {
    Patrol,
    Reconnaissance,
    Salvage,
    Suppression,
}

/// Where a mission is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum MissionPhase {
    Travel,
    Execute,
    Return,
    Complete,
}

/// Task-force fight total a suppression mission needs to pacify a sector.
pub const SUPPRESSION_FIGHT_THRESHOLD: i64 = 20;

/// Outcome summary attached to a completed mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionReport {
    pub fight_total: i64,
    pub investigation_total: i64,
    pub support_total: i64,
    pub summary: String,
}

/// A government task force in the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub mission_type: MissionType,
    pub phase: MissionPhase,
    pub target_sector: SectorId,
    pub task_force: Vec<ShipId>,
    /// Captain with the most experience at assembly time
    pub commander: Option<CaptainId>,
    pub bp_per_turn: i64,
    pub travel_turns_remaining: u32,
    pub execution_turns_remaining: u32,
    pub return_turns_remaining: u32,
    /// Execution duration as drawn at creation
    pub execution_duration: u32,
    pub start_turn: u32,
    pub completed_turn: Option<u32>,
    pub report: Option<MissionReport>,
}

/// Validates and creates a mission, locking its ships.
///
/// The departure sector is the first ship's home sector; travel and return
/// each take the shortest hop distance to the target. The commander is the
/// task-force captain with the highest experience, first-listed winning
/// ties.
pub fn create_mission(
    state: &mut GameState,
    mission_type: MissionType,
    target_sector: SectorId,
    ship_ids: &[ShipId],
    rng: &mut TurnRng,
) -> Result<MissionId, OrderError> {
    if ship_ids.is_empty() {
        return Err(OrderError::EmptyTaskForce);
    }
    if !state.galaxy.contains(target_sector) {
        return Err(OrderError::TargetNotFound);
    }
    for ship_id in ship_ids {
        let ship = state.ships.get(ship_id).ok_or(OrderError::ShipNotFound)?;
        if !ship.mission_ready() {
            return Err(OrderError::ShipNotAvailable);
        }
    }

    let departure = state.ships[&ship_ids[0]].home_sector;
    let travel = state
        .galaxy
        .hop_distance(departure, target_sector)
        .ok_or(OrderError::SectorOutOfRange)?;

    let mut commander: Option<(u32, CaptainId)> = None;
    for ship_id in ship_ids {
        let Some(captain_id) = state.ships[ship_id].captain else {
            continue;
        };
        let experience = state
            .captains
            .get(&captain_id)
            .map(|c| c.experience)
            .unwrap_or(0);
        // Strict comparison keeps the first-listed captain on ties.
        if commander.map(|(best, _)| experience > best).unwrap_or(true) {
            commander = Some((experience, captain_id));
        }
    }

    let spec = state.config.mission_spec(mission_type);
    let execution_duration = rng.roll_range(spec.duration_min, spec.duration_max);
    let heavies = ship_ids
        .iter()
        .filter(|id| state.ships[*id].primary.size >= 7)
        .count() as i64;
    let bp_per_turn = spec.base_bp_per_turn + heavies;

    let id = state.counters.next_mission();
    for ship_id in ship_ids {
        state
            .ships
            .get_mut(ship_id)
            .expect("task-force ship vanished after validation")
            .status = ShipStatus::OnMission;
    }

    let mission = Mission {
        id,
        mission_type,
        phase: MissionPhase::Travel,
        target_sector,
        task_force: ship_ids.to_vec(),
        commander: commander.map(|(_, id)| id),
        bp_per_turn,
        travel_turns_remaining: travel,
        execution_turns_remaining: execution_duration,
        return_turns_remaining: travel,
        execution_duration,
        start_turn: state.turn,
        completed_turn: None,
        report: None,
    };
    info!(
        "{} created: {:?} to {} with {} ships ({} BP/turn)",
        id,
        mission_type,
        target_sector,
        mission.task_force.len(),
        bp_per_turn
    );
    state.missions.insert(id, mission);
    Ok(id)
}

/// Condition at or below which a returning ship goes into the yards instead
/// of back on station.
pub const REPAIR_THRESHOLD: u32 = 30;

/// Condition a ship must recover before leaving the yards.
pub const REPAIR_RELEASE: u32 = 80;

/// Condition recovered per turn in the yards.
pub const REPAIR_RATE: u32 = 15;

/// Runs the mission phase: yard repairs first, then the phase machine for
/// every active mission in ascending id order.
pub fn run_mission_phase(state: &mut GameState, events: &mut Vec<GameEvent>) {
    run_repairs(state, events);

    let mission_ids: Vec<MissionId> = state
        .missions
        .values()
        .filter(|m| m.completed_turn.is_none())
        .map(|m| m.id)
        .collect();

    for mission_id in mission_ids {
        let phase = state.missions[&mission_id].phase;
        match phase {
            MissionPhase::Travel => {
                let mission = state.missions.get_mut(&mission_id).expect("mission vanished");
                mission.travel_turns_remaining =
                    mission.travel_turns_remaining.saturating_sub(1);
                if mission.travel_turns_remaining == 0 {
                    mission.phase = MissionPhase::Execute;
                    debug!("{} on station at {}", mission_id, mission.target_sector);
                }
            }
            MissionPhase::Execute => {
                let mission = state.missions.get_mut(&mission_id).expect("mission vanished");
                mission.execution_turns_remaining =
                    mission.execution_turns_remaining.saturating_sub(1);
                if mission.execution_turns_remaining == 0 {
                    mission.phase = MissionPhase::Return;
                    debug!("{} heading home", mission_id);
                }
            }
            MissionPhase::Return => {
                let done = {
                    let mission =
                        state.missions.get_mut(&mission_id).expect("mission vanished");
                    mission.return_turns_remaining =
                        mission.return_turns_remaining.saturating_sub(1);
                    mission.return_turns_remaining == 0
                };
                if done {
                    complete_mission(state, mission_id, events);
                }
            }
            MissionPhase::Complete => {}
        }
    }
}

/// Repair tick: ships in the yards recover condition and return to station
/// once fit for duty.
fn run_repairs(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let turn = state.turn;
    let mut released: Vec<(ShipId, String)> = Vec::new();
    for ship in state.ships.values_mut() {
        if ship.status != ShipStatus::UnderRepair {
            continue;
        }
        ship.condition = (ship.condition + REPAIR_RATE).min(100);
        if ship.condition >= REPAIR_RELEASE {
            ship.status = ShipStatus::Stationed;
            released.push((ship.id, ship.name.clone()));
        }
    }
    for (ship_id, name) in released {
        emit(
            events,
            turn,
            EventCategory::Fleet,
            EventPriority::Info,
            format!("{} back on station", name),
            format!("{} has completed repairs and returned to duty.", name),
            vec![EntityRef::Ship(ship_id)],
        );
    }
}

/// Finalizes a mission: restores ships, credits captains, applies sector
/// effects, and files the report.
fn complete_mission(state: &mut GameState, mission_id: MissionId, events: &mut Vec<GameEvent>) {
    let turn = state.turn;
    let (mission_type, target_sector, task_force, execution_duration) = {
        let mission = state.missions.get_mut(&mission_id).expect("mission vanished");
        mission.phase = MissionPhase::Complete;
        mission.completed_turn = Some(turn);
        (
            mission.mission_type,
            mission.target_sector,
            mission.task_force.clone(),
            mission.execution_duration,
        )
    };

    let mut fight_total = 0;
    let mut investigation_total = 0;
    let mut support_total = 0;
    let wear = execution_duration * 2;
    for ship_id in &task_force {
        let ship = state
            .ships
            .get_mut(ship_id)
            .expect("mission references a missing ship");
        fight_total += ship.abilities.fight;
        investigation_total += ship.abilities.investigation;
        support_total += ship.abilities.support;
        ship.record_mission(
            format!("{:?} of {} (turn {})", mission_type, target_sector, turn),
            wear,
        );
        ship.status = if ship.condition <= REPAIR_THRESHOLD {
            ShipStatus::UnderRepair
        } else {
            ShipStatus::Stationed
        };
        if let Some(captain_id) = ship.captain {
            if let Some(captain) = state.captains.get_mut(&captain_id) {
                captain.experience += execution_duration;
            }
        }
    }

    let sector_name = state
        .galaxy
        .sectors
        .get(&target_sector)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| target_sector.to_string());

    let mut pacified = false;
    if mission_type == MissionType::Suppression && fight_total >= SUPPRESSION_FIGHT_THRESHOLD {
        if let Some(sector) = state.galaxy.sectors.get_mut(&target_sector) {
            if sector.threat_modifier > 0 {
                sector.threat_modifier -= 1;
                pacified = true;
            }
        }
    }

    let summary = if pacified {
        format!("Hostile activity in {} suppressed; threat reduced.", sector_name)
    } else {
        format!("Task force returned from {} without incident.", sector_name)
    };
    let report = MissionReport {
        fight_total,
        investigation_total,
        support_total,
        summary: summary.clone(),
    };
    state
        .missions
        .get_mut(&mission_id)
        .expect("mission vanished")
        .report = Some(report);

    emit(
        events,
        turn,
        EventCategory::Mission,
        EventPriority::Positive,
        format!("Mission report: {:?} of {}", mission_type, sector_name),
        summary,
        vec![EntityRef::Mission(mission_id), EntityRef::Sector(target_sector)],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suppression_threshold_constant() {
        assert_eq!(SUPPRESSION_FIGHT_THRESHOLD, 20);
    }
}
