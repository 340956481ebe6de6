//! The turn pipeline.
//!
//! A turn is a pure state transformation: given the previous state, the
//! player's orders, and an injected random source, [`resolve_turn`] produces
//! the next state and the events to surface. The input state is never
//! mutated; phases run in a fixed order against a working copy and each runs
//! to completion before the next begins. There is no partial-turn commit: an
//! invalid order aborts the whole turn before anything escapes.

use crate::budget::{run_expense_phase, run_income_phase};
use crate::colony::run_colony_phase;
use crate::contract::run_contract_phase;
use crate::corp_ai::run_corporate_phase;
use crate::event::{emit, EventCategory, EventPriority, GameEvent};
use crate::market::run_market_phase;
use crate::mission::run_mission_phase;
use crate::order::{apply_order_mut, Order, OrderError};
use crate::rng::TurnRng;
use crate::science::run_science_phase;
use crate::state::GameState;
use log::{debug, info};

/// Resolves one turn.
///
/// Phase order: orders → contract → colony → market → corporate → science →
/// mission → income → expense → event. Events are returned with their final
/// identifiers, already appended to the next state's stream in emission
/// order.
///
/// # Errors
///
/// Returns the first order-validation failure. No state is returned in that
/// case and the input is untouched.
pub fn resolve_turn(
    state: &GameState,
    orders: &[Order],
    rng: &mut TurnRng,
) -> Result<(GameState, Vec<GameEvent>), OrderError> {
    let mut next = state.clone();
    let mut events: Vec<GameEvent> = Vec::new();

    for order in orders {
        apply_order_mut(&mut next, order, rng)?;
    }
    debug!("turn {}: {} orders applied", next.turn, orders.len());

    run_contract_phase(&mut next, rng, &mut events);
    run_colony_phase(&mut next, rng, &mut events);
    run_market_phase(&mut next, &mut events);
    run_corporate_phase(&mut next, rng, &mut events);
    run_science_phase(&mut next, rng, &mut events);
    run_mission_phase(&mut next, &mut events);
    run_income_phase(&mut next);
    let debt_before = next.debt_tokens;
    run_expense_phase(&mut next);

    // Event phase: surface the turn's debt escalation (the expense phase
    // itself is silent), then assign ids in emission order, append, and
    // advance the clock.
    if next.debt_tokens > debt_before {
        emit(
            &mut events,
            next.turn,
            EventCategory::Budget,
            EventPriority::Negative,
            "The empire slides into debt".to_string(),
            format!(
                "The treasury ran a deficit this turn; debt now stands at {} token(s).",
                next.debt_tokens
            ),
            Vec::new(),
        );
    }
    next.record_events(&mut events);
    next.turn += 1;

    info!(
        "turn {} resolved: {} BP, {} debt tokens, {} events",
        next.turn,
        next.current_bp,
        next.debt_tokens,
        events.len()
    );
    Ok((next, events))
}
