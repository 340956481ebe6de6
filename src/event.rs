//! Typed events surfaced to the player.
//!
//! Phases collect events into a per-turn buffer; the event phase assigns
//! identifiers and appends the buffer to the state's undismissed list in
//! emission order (phase order, then per-phase determinism). Dismissal is
//! idempotent.

use crate::colony::ColonyId;
use crate::contract::ContractId;
use crate::corporation::CorpId;
use crate::mission::MissionId;
use crate::planet::PlanetId;
use crate::sector::SectorId;
use crate::ship::ShipId;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Unique identifier for an event. Assigned when the event enters the state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EventId(pub u64);

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "event-{}", self.0)
    }
}

/// Urgency tier of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum EventPriority {
    Info,
    Positive,
    Warning,
    Negative,
}

/// Which subsystem emitted an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EventCategory {
    Contract,
    Exploration,
    Colony,
    Corporation,
    Fleet,
    Mission,
    Science,
    Budget,
}

/// Typed reference to the entity an event concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityRef {
    Sector(SectorId),
    Planet(PlanetId),
    Colony(ColonyId),
    Corp(CorpId),
    Ship(ShipId),
    Contract(ContractId),
    Mission(MissionId),
}

/// One event in the player-facing stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: EventId,
    pub turn: u32,
    pub category: EventCategory,
    pub priority: EventPriority,
    pub title: String,
    pub description: String,
    pub related: Vec<EntityRef>,
    pub dismissed: bool,
}

/// Pushes an event onto a phase buffer. The id is a placeholder until the
/// event phase appends the buffer to the state.
pub fn emit(
    events: &mut Vec<GameEvent>,
    turn: u32,
    category: EventCategory,
    priority: EventPriority,
    title: String,
    description: String,
    related: Vec<EntityRef>,
) {
    events.push(GameEvent {
        id: EventId(0),
        turn,
        category,
        priority,
        title,
        description,
        related,
        dismissed: false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display_is_lowercase() {
        assert_eq!(EventCategory::Contract.to_string(), "contract");
        assert_eq!(EventCategory::Exploration.to_string(), "exploration");
        assert_eq!(EventCategory::Budget.to_string(), "budget");
    }

    #[test]
    fn test_emit_pushes_undismissed() {
        let mut buffer = Vec::new();
        emit(
            &mut buffer,
            4,
            EventCategory::Colony,
            EventPriority::Warning,
            "Unrest".to_string(),
            "Stability is low.".to_string(),
            vec![EntityRef::Colony(ColonyId(2))],
        );
        assert_eq!(buffer.len(), 1);
        assert!(!buffer[0].dismissed);
        assert_eq!(buffer[0].turn, 4);
    }
}
