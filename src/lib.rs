//! # Empire Simulation Core
//!
//! The turn resolution engine of a deterministic 4X-style space-empire
//! simulation: given a complete game state and a set of player orders, it
//! computes the next state and the events to surface. The engine is a pure
//! function over state. No rendering, no persistence layer, no input
//! handling.
//!
//! ## Overview
//!
//! Each turn runs a fixed phase pipeline: player orders are applied, then
//! contracts advance, colonies simulate, sector markets resolve,
//! corporations act, science corps research, missions tick, income is
//! collected, expenses are charged, and the turn's events are appended. The
//! input state is never mutated.
//!
//! ## Quick Start
//!
//! ```
//! use empire_simulation::{create_initial_state, resolve_turn, GameConfig, TurnRng};
//!
//! let config = GameConfig::default();
//! let mut rng = TurnRng::seeded(42);
//! let mut state = create_initial_state(&config, &mut rng).unwrap();
//!
//! // Resolve ten quiet turns.
//! for _ in 0..10 {
//!     let (next, events) = resolve_turn(&state, &[], &mut rng).unwrap();
//!     for event in &events {
//!         println!("[{}] {}", event.category, event.title);
//!     }
//!     state = next;
//! }
//! ```
//!
//! ## Determinism
//!
//! Randomness enters only through the injected [`TurnRng`] capability.
//! Entity maps are ordered, every phase visits entities in a documented
//! order, and all weighted draws consume the random stream in visitation
//! order, so replays from the same seed are bit-identical.
//!
//! ## Modules
//!
//! - [`blueprint`] - Ship stat derivation from role, tech, corp level, and schematics
//! - [`budget`] - Income/expense accounting and the debt spiral
//! - [`colony`] - Colony attributes, infrastructure, growth
//! - [`config`] - Configuration and every data table
//! - [`contract`] - Contract validation, advancement, and completion effects
//! - [`corp_ai`] - Autonomous corporate investment and acquisitions
//! - [`corporation`] - Corporation entities and holdings ledgers
//! - [`database`] - SQLite export of run history
//! - [`engine`] - The turn pipeline
//! - [`error`] - Fatal/configuration error types
//! - [`event`] - Typed player-facing events
//! - [`formula`] - The pure formula library
//! - [`invariant`] - Invariant checking framework
//! - [`market`] - Sector market resolution and shortages
//! - [`mission`] - Task-force mission scheduling
//! - [`modifier`] - Named-stat modifier resolution
//! - [`order`] - Player orders and validation
//! - [`planet`] - Planets, deposits, features
//! - [`resource`] - Resources and infrastructure domains
//! - [`result`] - Run summaries and streaming output
//! - [`rng`] - The injectable random capability
//! - [`science`] - Discovery pool and the science phase
//! - [`sector`] - Sectors and the galaxy graph
//! - [`setup`] - Initial state construction
//! - [`ship`] - Ships, captains, roles
//! - [`state`] - The owning game state

pub mod blueprint;
pub mod budget;
pub mod colony;
pub mod config;
pub mod contract;
pub mod corp_ai;
pub mod corporation;
pub mod database;
pub mod engine;
pub mod error;
pub mod event;
pub mod formula;
pub mod invariant;
pub mod market;
pub mod mission;
pub mod modifier;
pub mod order;
pub mod planet;
pub mod resource;
pub mod result;
pub mod rng;
pub mod science;
pub mod sector;
pub mod setup;
pub mod ship;
pub mod state;

pub use blueprint::{generate_blueprint, Blueprint};
pub use budget::{BudgetBreakdown, BudgetEntry, MAX_DEBT_TOKENS};
pub use colony::{Colony, ColonyAttributes, ColonyId, ColonyType, DomainState};
pub use config::{GameConfig, GamePreset};
pub use contract::{
    Contract, ContractId, ContractParams, ContractStatus, ContractTarget, ContractType,
};
pub use corporation::{Corporation, CorpId, CorpType};
pub use engine::resolve_turn;
pub use error::{Result, SimulationError};
pub use event::{EntityRef, EventCategory, EventId, EventPriority, GameEvent};
pub use invariant::{Invariant, InvariantChecker, InvariantViolation};
pub use market::SectorMarket;
pub use mission::{Mission, MissionId, MissionPhase, MissionType};
pub use modifier::{
    modifier_breakdown, resolve_modifiers, Modifier, ModifierId, ModifierOp,
    ModifierSourceKind,
};
pub use order::{apply_order, validate_order, Order, OrderError};
pub use planet::{Planet, PlanetId, PlanetSize, PlanetStatus, PlanetType, Richness};
pub use resource::{InfraDomain, Resource};
pub use result::{RunMetadata, RunResult, TurnSummary};
pub use rng::TurnRng;
pub use science::{Discovery, DiscoveryId, Schematic, SchematicId};
pub use sector::{Galaxy, Sector, SectorId};
pub use setup::create_initial_state;
pub use ship::{Captain, CaptainId, Ship, ShipId, ShipOwner, ShipRole, ShipStatus, SizeVariant};
pub use state::GameState;

#[cfg(test)]
mod tests;
