//! Colonies: population, infrastructure, and the six-attribute cascade.
//!
//! Attributes cascade in a fixed order each turn: habitability feeds quality
//! of life, transport feeds accessibility, accessibility and population feed
//! dynamism, quality of life feeds stability, and the first five feed the
//! growth rate. Every attribute except growth is clamped to 0..=10 after
//! modifier resolution. Debt tokens are read straight from the global state
//! inside the stability formula; they are never expressed as a per-colony
//! modifier.

use crate::config::GameConfig;
use crate::corporation::CorpId;
use crate::event::{emit, EventCategory, EventPriority, EntityRef, GameEvent};
use crate::formula;
use crate::modifier::{
    resolve_modifiers, ConditionContext, Modifier, ModifierSourceKind,
};
use crate::planet::{Planet, PlanetId};
use crate::resource::InfraDomain;
use crate::rng::TurnRng;
use crate::sector::SectorId;
use crate::state::GameState;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use strum_macros::Display;

/// Unique identifier for a colony.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ColonyId(pub u32);

impl std::fmt::Display for ColonyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "colony-{}", self.0)
    }
}

/// Settlement archetype; sets starting infrastructure and passive modifiers
/// via the colony-type config table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
pub enum ColonyType {
    Frontier,
    Agrarian,
    Mining,
    Industrial,
    Science,
    Military,
    Trade,
}

/// Ownership split of one infrastructure domain on one colony.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DomainState {
    pub public_levels: u32,
    pub corporate_levels: BTreeMap<CorpId, u32>,
    /// `None` means uncapped (Civilian only)
    pub current_cap: Option<u32>,
}

impl DomainState {
    pub fn total_levels(&self) -> u32 {
        self.public_levels + self.corporate_total()
    }

    pub fn corporate_total(&self) -> u32 {
        self.corporate_levels.values().sum()
    }

    pub fn is_below_cap(&self) -> bool {
        match self.current_cap {
            None => true,
            Some(cap) => self.total_levels() < cap,
        }
    }
}

/// The six cascading colony attributes as of the latest colony phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ColonyAttributes {
    pub habitability: i64,
    pub accessibility: i64,
    pub dynamism: i64,
    pub quality_of_life: i64,
    pub stability: i64,
    /// Not clamped; may be negative
    pub growth_per_turn: i64,
}

/// A settled planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colony {
    pub id: ColonyId,
    pub planet: PlanetId,
    /// Denormalized from the planet for sector-level lookups
    pub sector: SectorId,
    pub colony_type: ColonyType,
    /// 1..=planet max
    pub population: u32,
    /// Growth accumulator; levels up at 10, down at -1
    pub growth: i64,
    pub attributes: ColonyAttributes,
    /// Snapshot taken before the latest recomputation
    pub previous_attributes: ColonyAttributes,
    pub infrastructure: BTreeMap<InfraDomain, DomainState>,
    pub corporations_present: Vec<CorpId>,
    pub modifiers: Vec<Modifier>,
    pub founded_turn: u32,
}

impl Colony {
    /// Creates a colony with an entry for every infrastructure domain.
    pub fn new(
        id: ColonyId,
        planet: PlanetId,
        sector: SectorId,
        colony_type: ColonyType,
        founded_turn: u32,
    ) -> Self {
        let mut infrastructure = BTreeMap::new();
        for domain in InfraDomain::iter() {
            infrastructure.insert(domain, DomainState::default());
        }
        Colony {
            id,
            planet,
            sector,
            colony_type,
            population: 1,
            growth: 0,
            attributes: ColonyAttributes::default(),
            previous_attributes: ColonyAttributes::default(),
            infrastructure,
            corporations_present: Vec::new(),
            modifiers: Vec::new(),
            founded_turn,
        }
    }

    pub fn domain(&self, domain: InfraDomain) -> &DomainState {
        self.infrastructure
            .get(&domain)
            .expect("colony is missing an infrastructure domain entry")
    }

    pub fn domain_mut(&mut self, domain: InfraDomain) -> &mut DomainState {
        self.infrastructure
            .get_mut(&domain)
            .expect("colony is missing an infrastructure domain entry")
    }

    pub fn total_levels(&self, domain: InfraDomain) -> u32 {
        self.domain(domain).total_levels()
    }

    /// Corporate-owned levels summed across every domain.
    pub fn total_corporate_infra(&self) -> u32 {
        self.infrastructure.values().map(DomainState::corporate_total).sum()
    }

    /// Registers a corporation as present, keeping the list sorted and
    /// duplicate-free.
    pub fn register_corporation(&mut self, corp: CorpId) {
        if !self.corporations_present.contains(&corp) {
            self.corporations_present.push(corp);
            self.corporations_present.sort();
        }
    }

    /// Drops every transient shortage modifier. Called by the market phase
    /// before shortages are re-evaluated.
    pub fn clear_shortage_modifiers(&mut self) {
        self.modifiers.retain(|m| m.source_kind != ModifierSourceKind::Shortage);
    }

    /// Recomputes every domain cap from population and deposits.
    ///
    /// Extraction domains without a matching deposit are capped at zero;
    /// Civilian stays uncapped.
    pub fn recalc_caps(&mut self, planet: &Planet, config: &GameConfig) {
        for domain in InfraDomain::iter() {
            let cap = match formula::base_infra_cap(self.population, domain) {
                None => None,
                Some(base) => {
                    if domain.is_extraction() {
                        match planet.best_deposit_bonus(domain, config) {
                            Some(bonus) => Some(base.min(bonus)),
                            None => Some(0),
                        }
                    } else {
                        Some(base)
                    }
                }
            };
            self.domain_mut(domain).current_cap = cap;
        }
    }

    /// Recomputes the attribute cascade, snapshotting the previous values.
    ///
    /// The condition context is built progressively: each attribute becomes
    /// visible to the conditions of everything computed after it.
    pub fn recompute_attributes(
        &mut self,
        planet: &Planet,
        debt_tokens: u8,
        empire_attribute_bonus: &dyn Fn(&str) -> f64,
    ) {
        self.previous_attributes = self.attributes;

        let mut ctx = ConditionContext::new();
        ctx.insert("population".to_string(), self.population as f64);

        let habitability = resolve_modifiers(
            planet.base_habitability as f64 + empire_attribute_bonus("habitability"),
            "habitability",
            &self.modifiers,
            Some(0.0),
            Some(10.0),
            Some(&ctx),
        )
        .floor() as i64;
        ctx.insert("habitability".to_string(), habitability as f64);

        let accessibility = resolve_modifiers(
            formula::accessibility_base(self.total_levels(InfraDomain::Transport))
                + empire_attribute_bonus("accessibility"),
            "accessibility",
            &self.modifiers,
            Some(0.0),
            Some(10.0),
            Some(&ctx),
        )
        .floor() as i64;
        ctx.insert("accessibility".to_string(), accessibility as f64);

        let dynamism = resolve_modifiers(
            formula::dynamism_base(accessibility, self.population, self.total_corporate_infra())
                + empire_attribute_bonus("dynamism"),
            "dynamism",
            &self.modifiers,
            Some(0.0),
            Some(10.0),
            Some(&ctx),
        )
        .floor() as i64;
        ctx.insert("dynamism".to_string(), dynamism as f64);

        let quality_of_life = resolve_modifiers(
            formula::quality_of_life_base(habitability)
                + empire_attribute_bonus("qualityOfLife"),
            "qualityOfLife",
            &self.modifiers,
            Some(0.0),
            Some(10.0),
            Some(&ctx),
        )
        .floor() as i64;
        ctx.insert("qualityOfLife".to_string(), quality_of_life as f64);

        let stability = resolve_modifiers(
            formula::stability_base(
                quality_of_life,
                debt_tokens,
                self.total_levels(InfraDomain::Military),
            ) + empire_attribute_bonus("stability"),
            "stability",
            &self.modifiers,
            Some(0.0),
            Some(10.0),
            Some(&ctx),
        )
        .floor() as i64;
        ctx.insert("stability".to_string(), stability as f64);

        let growth_per_turn = resolve_modifiers(
            formula::growth_base(quality_of_life, stability, accessibility, habitability)
                + empire_attribute_bonus("growth"),
            "growth",
            &self.modifiers,
            None,
            None,
            Some(&ctx),
        )
        .floor() as i64;

        self.attributes = ColonyAttributes {
            habitability,
            accessibility,
            dynamism,
            quality_of_life,
            stability,
            growth_per_turn,
        };
    }
}

/// Founds a colony on a planet: starting infrastructure and passive
/// modifiers from the colony-type table, plus the planet's feature-derived
/// modifiers. Caps and attributes are computed immediately so the colony is
/// consistent before its first colony phase.
pub fn found_colony(
    id: ColonyId,
    planet: &Planet,
    colony_type: ColonyType,
    founder: Option<CorpId>,
    turn: u32,
    config: &GameConfig,
    counters: &mut crate::state::IdCounters,
) -> Colony {
    let mut colony = Colony::new(id, planet.id, planet.sector, colony_type, turn);

    let spec = config.colony_spec(colony_type);
    for (domain, levels) in &spec.starting_infrastructure {
        colony.domain_mut(*domain).public_levels = *levels;
    }
    for template in &spec.passive_modifiers {
        colony.modifiers.push(template.instantiate(
            counters.next_modifier(),
            ModifierSourceKind::ColonyType,
            colony_type.to_string(),
            format!("{} colony", colony_type),
        ));
    }
    for feature in &planet.features {
        for template in &feature.modifiers {
            colony.modifiers.push(template.instantiate(
                counters.next_modifier(),
                ModifierSourceKind::Feature,
                feature.name.clone(),
                feature.name.clone(),
            ));
        }
    }

    if let Some(corp) = founder {
        colony.register_corporation(corp);
    }

    colony.recalc_caps(planet, config);
    colony.recompute_attributes(planet, 0, &|_| 0.0);
    colony
}

/// Runs the colony phase: cap recalculation, attribute cascade, growth tick,
/// and organic infrastructure growth, for every colony in ascending id
/// order. Reads the previous turn's sector markets (still present in state)
/// for organic-growth shortage weighting.
pub fn run_colony_phase(
    state: &mut GameState,
    rng: &mut TurnRng,
    events: &mut Vec<GameEvent>,
) {
    let debt_tokens = state.debt_tokens;
    let turn = state.turn;
    let config = state.config.clone();
    let empire = state.empire_attribute_bonuses();
    let colony_ids: Vec<ColonyId> = state.colonies.keys().copied().collect();
    for colony_id in colony_ids {
        let planet_id = state.colonies[&colony_id].planet;
        let planet = state
            .planets
            .get(&planet_id)
            .cloned()
            .expect("colony references a missing planet");
        let max_population = planet.max_population(&config);
        let shortage_resources = state
            .sector_markets
            .get(&state.colonies[&colony_id].sector)
            .map(|m| m.shortage_resources())
            .unwrap_or_default();

        let colony = state
            .colonies
            .get_mut(&colony_id)
            .expect("colony vanished mid-phase");

        colony.recalc_caps(&planet, &config);
        colony.recompute_attributes(&planet, debt_tokens, &|target| {
            empire.get(target).copied().unwrap_or(0.0)
        });

        let outcome = formula::growth_tick(
            colony.growth,
            colony.attributes.growth_per_turn,
            colony.population,
            max_population,
            colony.total_levels(InfraDomain::Civilian),
        );
        colony.growth = outcome.growth;
        colony.population = outcome.population;

        // Population changes move the caps. Recompute, and shed any overflow
        // so the cap invariant holds at end of turn: public levels go first,
        // then corporate levels from the highest corp id down.
        let mut shed: Vec<(CorpId, InfraDomain, u32)> = Vec::new();
        if outcome.leveled_up || outcome.leveled_down {
            colony.recalc_caps(&planet, &config);
            for domain in InfraDomain::iter() {
                let domain_state = colony.domain_mut(domain);
                let Some(cap) = domain_state.current_cap else {
                    continue;
                };
                let mut excess = domain_state.total_levels().saturating_sub(cap);
                if excess == 0 {
                    continue;
                }
                let from_public = domain_state.public_levels.min(excess);
                domain_state.public_levels -= from_public;
                excess -= from_public;
                let corp_ids: Vec<CorpId> =
                    domain_state.corporate_levels.keys().copied().rev().collect();
                for corp_id in corp_ids {
                    if excess == 0 {
                        break;
                    }
                    let levels = domain_state
                        .corporate_levels
                        .get_mut(&corp_id)
                        .expect("corp id collected from this map");
                    let taken = (*levels).min(excess);
                    *levels -= taken;
                    excess -= taken;
                    if *levels == 0 {
                        domain_state.corporate_levels.remove(&corp_id);
                    }
                    shed.push((corp_id, domain, taken));
                }
            }
        }

        // Organic infrastructure growth: dynamism-driven chance of one free
        // public level in an eligible domain, shortage-producing domains
        // weighted triple.
        if rng.chance(formula::organic_growth_chance(colony.attributes.dynamism)) {
            let eligible: Vec<InfraDomain> = InfraDomain::iter()
                .filter(|d| *d != InfraDomain::Civilian)
                .filter(|d| {
                    let s = colony.domain(*d);
                    s.total_levels() >= 1 && s.is_below_cap()
                })
                .collect();
            let weights: Vec<f64> = eligible
                .iter()
                .map(|d| match d.produced_resource() {
                    Some(resource) if shortage_resources.contains(&resource) => 3.0,
                    _ => 1.0,
                })
                .collect();
            if let Some(picked) = rng.weighted_index(&weights) {
                let domain = eligible[picked];
                colony.domain_mut(domain).public_levels += 1;
                debug!(
                    "organic growth on {}: +1 public {} level",
                    colony_id, domain
                );
            }
        }

        trace!(
            "{} attributes after colony phase: {:?}",
            colony_id, colony.attributes
        );

        let attributes = colony.attributes;
        let population = colony.population;
        if outcome.leveled_up {
            emit(
                events,
                turn,
                EventCategory::Colony,
                EventPriority::Positive,
                format!("Population boom on {}", planet.name),
                format!(
                    "{} has grown to population level {}.",
                    planet.name, population
                ),
                vec![EntityRef::Colony(colony_id), EntityRef::Planet(planet_id)],
            );
        }
        if outcome.leveled_down {
            emit(
                events,
                turn,
                EventCategory::Colony,
                EventPriority::Warning,
                format!("Population decline on {}", planet.name),
                format!(
                    "{} has shrunk to population level {}.",
                    planet.name, population
                ),
                vec![EntityRef::Colony(colony_id), EntityRef::Planet(planet_id)],
            );
        }
        if attributes.stability <= 2 {
            emit(
                events,
                turn,
                EventCategory::Colony,
                EventPriority::Warning,
                format!("Unrest on {}", planet.name),
                format!(
                    "Stability on {} has fallen to {}.",
                    planet.name, attributes.stability
                ),
                vec![EntityRef::Colony(colony_id)],
            );
        }
        if attributes.quality_of_life <= 2 {
            emit(
                events,
                turn,
                EventCategory::Colony,
                EventPriority::Warning,
                format!("Hardship on {}", planet.name),
                format!(
                    "Quality of life on {} has fallen to {}.",
                    planet.name, attributes.quality_of_life
                ),
                vec![EntityRef::Colony(colony_id)],
            );
        }

        for (corp_id, domain, taken) in shed {
            if let Some(corp) = state.corporations.get_mut(&corp_id) {
                corp.remove_holding(colony_id, domain, taken);
            }
        }
    }
}
