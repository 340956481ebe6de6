//! The complete game state.
//!
//! The state exclusively owns every entity; all cross-entity references are
//! by id, and lookups go through the owning maps. Maps are `BTreeMap` so
//! that iteration order is the documented deterministic processing order.

use crate::budget::BudgetBreakdown;
use crate::colony::{Colony, ColonyId};
use crate::config::GameConfig;
use crate::contract::{Contract, ContractId};
use crate::corporation::{Corporation, CorpId};
use crate::event::{EventId, GameEvent};
use crate::market::SectorMarket;
use crate::mission::{Mission, MissionId};
use crate::modifier::ModifierId;
use crate::planet::{Planet, PlanetId};
use crate::science::{Discovery, EmpireBonus, BonusTarget, SchematicId};
use crate::sector::{Galaxy, SectorId};
use crate::ship::{Captain, CaptainId, Ship, ShipId, ShipStat};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Monotonic id allocators for every entity family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IdCounters {
    planet: u32,
    colony: u32,
    corporation: u32,
    ship: u32,
    captain: u32,
    contract: u32,
    mission: u32,
    modifier: u32,
    schematic: u32,
    event: u64,
}

impl IdCounters {
    pub fn next_planet(&mut self) -> PlanetId {
        self.planet += 1;
        PlanetId(self.planet)
    }

    pub fn next_colony(&mut self) -> ColonyId {
        self.colony += 1;
        ColonyId(self.colony)
    }

    pub fn next_corporation(&mut self) -> CorpId {
        self.corporation += 1;
        CorpId(self.corporation)
    }

    pub fn next_ship(&mut self) -> ShipId {
        self.ship += 1;
        ShipId(self.ship)
    }

    pub fn next_captain(&mut self) -> CaptainId {
        self.captain += 1;
        CaptainId(self.captain)
    }

    pub fn next_contract(&mut self) -> ContractId {
        self.contract += 1;
        ContractId(self.contract)
    }

    pub fn next_mission(&mut self) -> MissionId {
        self.mission += 1;
        MissionId(self.mission)
    }

    pub fn next_modifier(&mut self) -> ModifierId {
        self.modifier += 1;
        ModifierId(self.modifier)
    }

    pub fn next_schematic(&mut self) -> SchematicId {
        self.schematic += 1;
        SchematicId(self.schematic)
    }

    pub fn next_event(&mut self) -> EventId {
        self.event += 1;
        EventId(self.event)
    }
}

/// Everything the simulation knows between turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    pub turn: u32,
    /// Budget points; may run negative (the debt spiral handles it)
    pub current_bp: i64,
    /// 0..=10
    pub debt_tokens: u8,
    pub budget: BudgetBreakdown,
    /// Cumulative permanent bonuses from discoveries
    pub empire_bonuses: Vec<EmpireBonus>,
    pub galaxy: Galaxy,
    pub planets: BTreeMap<PlanetId, Planet>,
    pub colonies: BTreeMap<ColonyId, Colony>,
    pub corporations: BTreeMap<CorpId, Corporation>,
    pub contracts: BTreeMap<ContractId, Contract>,
    pub ships: BTreeMap<ShipId, Ship>,
    pub captains: BTreeMap<CaptainId, Captain>,
    pub missions: BTreeMap<MissionId, Mission>,
    /// Last resolved per-sector balances; rebuilt every market phase
    pub sector_markets: BTreeMap<SectorId, SectorMarket>,
    /// Discoveries not yet drawn
    pub discovery_pool: Vec<Discovery>,
    /// Player-facing event stream, in emission order
    pub events: Vec<GameEvent>,
    pub counters: IdCounters,
    pub created_at: DateTime<Utc>,
    /// Refreshed by the caller, never by turn resolution
    pub updated_at: DateTime<Utc>,
}

impl GameState {
    /// Corporation visitation order for AI-style phases: level descending,
    /// then id ascending.
    pub fn corporate_order(&self) -> Vec<CorpId> {
        let mut order: Vec<(u32, CorpId)> =
            self.corporations.values().map(|c| (c.level, c.id)).collect();
        order.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        order.into_iter().map(|(_, id)| id).collect()
    }

    /// Sums empire-wide additive attribute bonuses by target key.
    pub fn empire_attribute_bonuses(&self) -> BTreeMap<String, f64> {
        let mut sums: BTreeMap<String, f64> = BTreeMap::new();
        for bonus in &self.empire_bonuses {
            if let BonusTarget::Attribute(target, value) = &bonus.target {
                *sums.entry(target.clone()).or_default() += value;
            }
        }
        sums
    }

    /// Sums empire-wide ship-stat tech bonuses for one stat.
    pub fn empire_tech_bonus(&self, stat: ShipStat) -> i64 {
        self.empire_bonuses
            .iter()
            .filter_map(|b| match &b.target {
                BonusTarget::ShipStat(s, value) if *s == stat => Some(*value),
                _ => None,
            })
            .sum()
    }

    /// Assigns identifiers to per-turn events in emission order and appends
    /// them to the stream. The caller keeps the (now id-bearing) buffer.
    pub fn record_events(&mut self, events: &mut [GameEvent]) {
        for event in events.iter_mut() {
            event.id = self.counters.next_event();
        }
        self.events.extend(events.iter().cloned());
    }

    /// Marks an event dismissed. Idempotent: dismissing an unknown or
    /// already-dismissed event changes nothing. Returns whether the flag
    /// flipped.
    pub fn dismiss_event(&mut self, id: EventId) -> bool {
        match self.events.iter_mut().find(|e| e.id == id) {
            Some(event) if !event.dismissed => {
                event.dismissed = true;
                true
            }
            _ => false,
        }
    }

    /// Colonies located in a sector, ascending id order.
    pub fn colonies_in_sector(&self, sector: SectorId) -> Vec<ColonyId> {
        self.colonies
            .values()
            .filter(|c| c.sector == sector)
            .map(|c| c.id)
            .collect()
    }

    /// Whether a sector hosts, or neighbors a sector hosting, a colony.
    pub fn sector_in_colony_range(&self, sector: SectorId) -> bool {
        let has_colony = |s: SectorId| self.colonies.values().any(|c| c.sector == s);
        if has_colony(sector) {
            return true;
        }
        self.galaxy.neighbors(sector).iter().any(|n| has_colony(*n))
    }
}
