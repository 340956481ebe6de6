//! Income and expense accounting, and the debt spiral.
//!
//! The income phase rebuilds the budget breakdown from colony and corporate
//! taxation. The expense phase charges every active contract and mission,
//! and converts any deficit into debt tokens. Debt tokens feed the stability
//! formula globally; the expense phase itself is silent (no events).

use crate::contract::ContractStatus;
use crate::formula;
use crate::state::GameState;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Maximum number of debt tokens the empire can carry.
pub const MAX_DEBT_TOKENS: u8 = 10;

/// One line of the per-turn budget breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEntry {
    pub label: String,
    pub amount: i64,
}

/// Per-turn income/expense ledger, rebuilt every turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BudgetBreakdown {
    pub income: Vec<BudgetEntry>,
    pub expenses: Vec<BudgetEntry>,
    /// Stability penalty currently applied empire-wide from debt
    pub stability_malus: i64,
}

impl BudgetBreakdown {
    pub fn total_income(&self) -> i64 {
        self.income.iter().map(|e| e.amount).sum()
    }

    pub fn total_expenses(&self) -> i64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }
}

/// Runs the income phase: colony taxation then corporate taxation, both in
/// ascending id order, appended to a fresh breakdown and credited to the
/// treasury.
pub fn run_income_phase(state: &mut GameState) {
    let mut breakdown = BudgetBreakdown {
        stability_malus: formula::stability_malus(state.debt_tokens),
        ..BudgetBreakdown::default()
    };

    for colony in state.colonies.values() {
        let tax = formula::planet_tax(colony.population, colony.attributes.habitability);
        if tax > 0 {
            let planet_name = state
                .planets
                .get(&colony.planet)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| colony.planet.to_string());
            breakdown.income.push(BudgetEntry {
                label: format!("Colonial tax: {}", planet_name),
                amount: tax,
            });
        }
    }

    for corp in state.corporations.values() {
        let tax = formula::corp_tax(corp.level);
        if tax > 0 {
            breakdown.income.push(BudgetEntry {
                label: format!("Corporate tax: {}", corp.name),
                amount: tax,
            });
        }
    }

    let total = breakdown.total_income();
    state.current_bp += total;
    debug!("income phase: +{} BP", total);
    state.budget = breakdown;
}

/// Runs the expense phase: one entry per active contract and mission, then
/// debt token accrual on deficit.
pub fn run_expense_phase(state: &mut GameState) {
    let mut expenses = Vec::new();

    for contract in state.contracts.values() {
        if contract.status == ContractStatus::Active && contract.completed_turn.is_none() {
            expenses.push(BudgetEntry {
                label: format!("Contract upkeep: {}", contract.id),
                amount: contract.bp_per_turn,
            });
        }
    }

    for mission in state.missions.values() {
        if mission.completed_turn.is_none() {
            expenses.push(BudgetEntry {
                label: format!("Mission upkeep: {}", mission.id),
                amount: mission.bp_per_turn,
            });
        }
    }

    let total: i64 = expenses.iter().map(|e| e.amount).sum();
    state.current_bp -= total;
    state.budget.expenses = expenses;
    debug!("expense phase: -{} BP, balance {}", total, state.current_bp);

    if state.current_bp < 0 {
        let deficit = -state.current_bp;
        let new_tokens = formula::debt_tokens_for_deficit(deficit);
        let before = state.debt_tokens;
        state.debt_tokens =
            (state.debt_tokens as i64 + new_tokens).min(MAX_DEBT_TOKENS as i64) as u8;
        warn!(
            "budget deficit of {} BP: debt tokens {} -> {}",
            deficit, before, state.debt_tokens
        );
    }

    state.budget.stability_malus = formula::stability_malus(state.debt_tokens);
}
