//! Corporations: autonomous economic agents.
//!
//! A corporation holds capital, operates infrastructure across colonies, and
//! executes contracts for the empire. The holdings ledger mirrors the
//! corporate levels recorded on colonies; the two views must always agree
//! (checked by the holdings invariant).

use crate::colony::ColonyId;
use crate::contract::ContractId;
use crate::planet::PlanetId;
use crate::resource::InfraDomain;
use crate::science::{DiscoveryId, Schematic};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{Display, EnumIter};

/// Unique identifier for a corporation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CorpId(pub u32);

impl std::fmt::Display for CorpId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "corp-{}", self.0)
    }
}

/// Corporate sector of operation; gates contract eligibility and, below
/// level 3, the domains a corp will invest in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumIter,
)]
pub enum CorpType {
    Exploration,
    Construction,
    Industrial,
    Shipbuilding,
    Science,
    Transport,
    Military,
    Agriculture,
    Exploitation,
}

/// Maximum corporation level.
pub const MAX_CORP_LEVEL: u32 = 10;

/// An autonomous corporate actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corporation {
    pub id: CorpId,
    pub name: String,
    pub corp_type: CorpType,
    /// 1..=10; level 6+ is a megacorp
    pub level: u32,
    /// Never negative
    pub capital: i64,
    pub home_planet: PlanetId,
    /// Sorted, duplicate-free
    pub planets_present: Vec<PlanetId>,
    /// Per-colony, per-domain owned level counts
    pub holdings: BTreeMap<ColonyId, BTreeMap<InfraDomain, u32>>,
    pub schematics: Vec<Schematic>,
    pub patents: Vec<DiscoveryId>,
    pub active_contracts: Vec<ContractId>,
    pub founded_turn: u32,
}

impl Corporation {
    pub fn new(
        id: CorpId,
        name: impl Into<String>,
        corp_type: CorpType,
        level: u32,
        capital: i64,
        home_planet: PlanetId,
        founded_turn: u32,
    ) -> Self {
        Corporation {
            id,
            name: name.into(),
            corp_type,
            level: level.clamp(1, MAX_CORP_LEVEL),
            capital,
            home_planet,
            planets_present: vec![home_planet],
            holdings: BTreeMap::new(),
            schematics: Vec::new(),
            patents: Vec::new(),
            active_contracts: Vec::new(),
            founded_turn,
        }
    }

    /// Whether this corp has unrestricted contract eligibility.
    pub fn is_megacorp(&self) -> bool {
        self.level >= 6
    }

    /// Total infrastructure levels this corp operates across all colonies.
    pub fn total_owned_infra(&self) -> u32 {
        self.holdings
            .values()
            .map(|domains| domains.values().sum::<u32>())
            .sum()
    }

    /// Records one more owned level in the ledger.
    pub fn add_holding(&mut self, colony: ColonyId, domain: InfraDomain, levels: u32) {
        *self
            .holdings
            .entry(colony)
            .or_default()
            .entry(domain)
            .or_default() += levels;
    }

    /// Removes owned levels from the ledger, dropping empty entries.
    pub fn remove_holding(&mut self, colony: ColonyId, domain: InfraDomain, levels: u32) {
        if let Some(domains) = self.holdings.get_mut(&colony) {
            if let Some(entry) = domains.get_mut(&domain) {
                *entry = entry.saturating_sub(levels);
                if *entry == 0 {
                    domains.remove(&domain);
                }
            }
            if domains.is_empty() {
                self.holdings.remove(&colony);
            }
        }
    }

    /// Registers presence on a planet, keeping the list sorted and unique.
    pub fn register_planet(&mut self, planet: PlanetId) {
        if !self.planets_present.contains(&planet) {
            self.planets_present.push(planet);
            self.planets_present.sort();
        }
    }

    /// Absorbs another corporation's assets during an acquisition: holdings
    /// are summed per colony per domain, schematics, patents, presence, and
    /// contracts are unioned.
    pub fn absorb(&mut self, target: &Corporation) {
        for (colony, domains) in &target.holdings {
            for (domain, levels) in domains {
                self.add_holding(*colony, *domain, *levels);
            }
        }
        for schematic in &target.schematics {
            if !self.schematics.iter().any(|s| s.id == schematic.id) {
                self.schematics.push(schematic.clone());
            }
        }
        for patent in &target.patents {
            if !self.patents.contains(patent) {
                self.patents.push(*patent);
            }
        }
        for planet in &target.planets_present {
            self.register_planet(*planet);
        }
        for contract in &target.active_contracts {
            if !self.active_contracts.contains(contract) {
                self.active_contracts.push(*contract);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::science::SchematicId;
    use crate::ship::ShipStat;

    fn corp(id: u32, level: u32) -> Corporation {
        Corporation::new(
            CorpId(id),
            format!("Corp {}", id),
            CorpType::Industrial,
            level,
            10,
            PlanetId(1),
            0,
        )
    }

    #[test]
    fn test_level_clamped_on_creation() {
        assert_eq!(corp(1, 0).level, 1);
        assert_eq!(corp(1, 99).level, MAX_CORP_LEVEL);
    }

    #[test]
    fn test_total_owned_infra_sums_ledger() {
        let mut c = corp(1, 3);
        c.add_holding(ColonyId(1), InfraDomain::Mining, 2);
        c.add_holding(ColonyId(1), InfraDomain::LowIndustry, 1);
        c.add_holding(ColonyId(2), InfraDomain::Mining, 3);
        assert_eq!(c.total_owned_infra(), 6);
    }

    #[test]
    fn test_absorb_merges_everything() {
        let mut buyer = corp(1, 7);
        buyer.add_holding(ColonyId(1), InfraDomain::Mining, 2);
        buyer.patents.push(DiscoveryId(1));

        let mut target = corp(2, 2);
        target.add_holding(ColonyId(1), InfraDomain::Mining, 1);
        target.add_holding(ColonyId(3), InfraDomain::Transport, 2);
        target.patents.push(DiscoveryId(1));
        target.patents.push(DiscoveryId(2));
        target.schematics.push(Schematic {
            id: SchematicId(5),
            name: "Reinforced Plating".to_string(),
            stat: ShipStat::Armor,
            bonus: 2,
        });
        target.register_planet(PlanetId(9));

        buyer.absorb(&target);
        assert_eq!(buyer.holdings[&ColonyId(1)][&InfraDomain::Mining], 3);
        assert_eq!(buyer.holdings[&ColonyId(3)][&InfraDomain::Transport], 2);
        assert_eq!(buyer.patents, vec![DiscoveryId(1), DiscoveryId(2)]);
        assert_eq!(buyer.schematics.len(), 1);
        assert!(buyer.planets_present.contains(&PlanetId(9)));
        assert_eq!(buyer.total_owned_infra(), 6);
    }

    #[test]
    fn test_megacorp_threshold() {
        assert!(!corp(1, 5).is_megacorp());
        assert!(corp(1, 6).is_megacorp());
    }
}
