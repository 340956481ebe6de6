//! Invariant checking framework.
//!
//! A trait-based system for validating that a game state satisfies the
//! engine's structural guarantees. Violations indicate bugs in the turn
//! pipeline, never normal play; the test suite runs the standard checker
//! after every resolved turn, and the CLI can do the same on demand.

use crate::budget::MAX_DEBT_TOKENS;
use crate::contract::{ContractStatus, ContractType};
use crate::state::GameState;
use std::collections::BTreeMap;
use std::fmt;
use strum::IntoEnumIterator;

/// Represents a violation of an invariant.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Name of the violated invariant
    pub invariant_name: String,
    /// Description of what went wrong
    pub description: String,
    /// Turn at which the violation was observed
    pub turn: u32,
    /// Optional: expected value
    pub expected: Option<String>,
    /// Optional: actual value observed
    pub actual: Option<String>,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invariant violation '{}' at turn {}: {}",
            self.invariant_name, self.turn, self.description
        )?;
        if let (Some(expected), Some(actual)) = (&self.expected, &self.actual) {
            write!(f, " (expected: {}, actual: {})", expected, actual)?;
        }
        Ok(())
    }
}

impl std::error::Error for InvariantViolation {}

/// Trait for structural guarantees that must hold in any resolved state.
pub trait Invariant: Send + Sync {
    /// Returns the name of this invariant for reporting purposes.
    fn name(&self) -> &str;

    /// Checks if the invariant holds for the given state.
    fn check(&self, state: &GameState) -> Result<(), InvariantViolation>;

    /// Optional: returns a description of what this invariant checks.
    fn description(&self) -> String {
        format!("Checks the '{}' invariant", self.name())
    }
}

/// Every infrastructure domain stays at or below its current cap.
pub struct InfrastructureCapInvariant;

impl Invariant for InfrastructureCapInvariant {
    fn name(&self) -> &str {
        "InfrastructureCap"
    }

    fn check(&self, state: &GameState) -> Result<(), InvariantViolation> {
        for colony in state.colonies.values() {
            for domain in crate::resource::InfraDomain::iter() {
                let domain_state = colony.domain(domain);
                if let Some(cap) = domain_state.current_cap {
                    let total = domain_state.total_levels();
                    if total > cap {
                        return Err(InvariantViolation {
                            invariant_name: self.name().to_string(),
                            description: format!(
                                "{} exceeds the {} cap",
                                colony.id, domain
                            ),
                            turn: state.turn,
                            expected: Some(format!("<= {}", cap)),
                            actual: Some(total.to_string()),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Every clamped colony attribute stays within 0..=10.
pub struct AttributeRangeInvariant;

impl Invariant for AttributeRangeInvariant {
    fn name(&self) -> &str {
        "AttributeRange"
    }

    fn check(&self, state: &GameState) -> Result<(), InvariantViolation> {
        for colony in state.colonies.values() {
            let a = &colony.attributes;
            let clamped = [
                ("habitability", a.habitability),
                ("accessibility", a.accessibility),
                ("dynamism", a.dynamism),
                ("qualityOfLife", a.quality_of_life),
                ("stability", a.stability),
            ];
            for (name, value) in clamped {
                if !(0..=10).contains(&value) {
                    return Err(InvariantViolation {
                        invariant_name: self.name().to_string(),
                        description: format!("{} {} out of range", colony.id, name),
                        turn: state.turn,
                        expected: Some("0..=10".to_string()),
                        actual: Some(value.to_string()),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Corporate holdings ledgers agree with the levels recorded on colonies.
pub struct HoldingsLedgerInvariant;

impl Invariant for HoldingsLedgerInvariant {
    fn name(&self) -> &str {
        "HoldingsLedger"
    }

    fn check(&self, state: &GameState) -> Result<(), InvariantViolation> {
        // Colony view: corp -> total attributed levels.
        let mut colony_view: BTreeMap<crate::corporation::CorpId, u32> = BTreeMap::new();
        for colony in state.colonies.values() {
            for domain_state in colony.infrastructure.values() {
                for (corp, levels) in &domain_state.corporate_levels {
                    *colony_view.entry(*corp).or_default() += levels;
                }
            }
        }
        for corp in state.corporations.values() {
            let from_colonies = colony_view.remove(&corp.id).unwrap_or(0);
            let from_ledger = corp.total_owned_infra();
            if from_colonies != from_ledger {
                return Err(InvariantViolation {
                    invariant_name: self.name().to_string(),
                    description: format!("{} holdings ledger disagrees with colonies", corp.id),
                    turn: state.turn,
                    expected: Some(from_colonies.to_string()),
                    actual: Some(from_ledger.to_string()),
                });
            }
        }
        if let Some((orphan, levels)) = colony_view.into_iter().next() {
            return Err(InvariantViolation {
                invariant_name: self.name().to_string(),
                description: format!(
                    "colonies attribute {} levels to {}, which does not exist",
                    levels, orphan
                ),
                turn: state.turn,
                expected: None,
                actual: None,
            });
        }
        Ok(())
    }
}

/// Contract lifecycle fields stay mutually consistent.
pub struct ContractStatusInvariant;

impl Invariant for ContractStatusInvariant {
    fn name(&self) -> &str {
        "ContractStatus"
    }

    fn check(&self, state: &GameState) -> Result<(), InvariantViolation> {
        for contract in state.contracts.values() {
            match contract.status {
                ContractStatus::Active => {
                    let countdown_ok = contract.contract_type == ContractType::TradeRoute
                        || (contract.turns_remaining > 0
                            && contract.turns_remaining <= contract.duration);
                    if !countdown_ok || contract.completed_turn.is_some() {
                        return Err(InvariantViolation {
                            invariant_name: self.name().to_string(),
                            description: format!("{} active-state fields inconsistent", contract.id),
                            turn: state.turn,
                            expected: Some("0 < remaining <= duration, no completion turn".to_string()),
                            actual: Some(format!(
                                "remaining {}, completed {:?}",
                                contract.turns_remaining, contract.completed_turn
                            )),
                        });
                    }
                }
                ContractStatus::Completed => {
                    if contract.completed_turn.is_none() {
                        return Err(InvariantViolation {
                            invariant_name: self.name().to_string(),
                            description: format!("{} completed without a completion turn", contract.id),
                            turn: state.turn,
                            expected: None,
                            actual: None,
                        });
                    }
                }
                ContractStatus::Failed => {}
            }
        }
        Ok(())
    }
}

/// Debt tokens stay within 0..=10.
pub struct DebtTokenInvariant;

impl Invariant for DebtTokenInvariant {
    fn name(&self) -> &str {
        "DebtTokens"
    }

    fn check(&self, state: &GameState) -> Result<(), InvariantViolation> {
        if state.debt_tokens > MAX_DEBT_TOKENS {
            return Err(InvariantViolation {
                invariant_name: self.name().to_string(),
                description: "debt tokens above the cap".to_string(),
                turn: state.turn,
                expected: Some(format!("<= {}", MAX_DEBT_TOKENS)),
                actual: Some(state.debt_tokens.to_string()),
            });
        }
        Ok(())
    }
}

/// Runs a set of invariants against a state.
pub struct InvariantChecker {
    invariants: Vec<Box<dyn Invariant>>,
}

impl InvariantChecker {
    /// The standard set covering the engine's structural guarantees.
    pub fn standard() -> Self {
        InvariantChecker {
            invariants: vec![
                Box::new(InfrastructureCapInvariant),
                Box::new(AttributeRangeInvariant),
                Box::new(HoldingsLedgerInvariant),
                Box::new(ContractStatusInvariant),
                Box::new(DebtTokenInvariant),
            ],
        }
    }

    pub fn with(invariants: Vec<Box<dyn Invariant>>) -> Self {
        InvariantChecker { invariants }
    }

    /// Checks every invariant, collecting all violations.
    pub fn check_all(&self, state: &GameState) -> Vec<InvariantViolation> {
        self.invariants
            .iter()
            .filter_map(|inv| inv.check(state).err())
            .collect()
    }

    /// Panics on the first violation. For use at trust boundaries where a
    /// violation is unrecoverable by contract.
    pub fn assert_all(&self, state: &GameState) {
        let violations = self.check_all(state);
        if let Some(first) = violations.first() {
            panic!("{}", first);
        }
    }
}
