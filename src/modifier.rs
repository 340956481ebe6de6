//! Per-entity stat modifiers and their resolution.
//!
//! A modifier is a declarative adjustment to a named numeric stat on the
//! entity that hosts it. Resolution is strictly add-then-multiply: the sum of
//! every applicable `Add` modifier is folded into the base first, then each
//! `Multiply` modifier is applied in insertion order. Reversing that order
//! changes results and is not permitted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unique identifier for a modifier instance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ModifierId(pub u32);

impl std::fmt::Display for ModifierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "modifier-{}", self.0)
    }
}

/// How a modifier combines with the base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierOp {
    Add,
    Multiply,
}

/// Where a modifier came from. Lifetime is tied to the source: shortage
/// modifiers are cleared every market phase, feature and colony-type
/// modifiers live as long as the colony, schematic modifiers as long as the
/// ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModifierSourceKind {
    Feature,
    ColonyType,
    Schematic,
    Shortage,
    Event,
}

/// Comparison direction for a modifier condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    /// Condition holds when the attribute is `>=` the threshold
    AtLeast,
    /// Condition holds when the attribute is `<=` the threshold
    AtMost,
}

/// Which entity's attributes a condition reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionScope {
    Colony,
    Planet,
    Ship,
}

/// Optional gate on a modifier. A condition whose attribute is missing from
/// the evaluation context fails, and the modifier is omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierCondition {
    /// Attribute path looked up in the condition context, e.g. "stability"
    pub attribute: String,
    pub comparison: Comparison,
    pub threshold: f64,
    pub scope: ConditionScope,
}

impl ModifierCondition {
    fn holds(&self, context: Option<&ConditionContext>) -> bool {
        let Some(ctx) = context else { return false };
        let Some(value) = ctx.get(&self.attribute) else {
            return false;
        };
        match self.comparison {
            Comparison::AtLeast => *value >= self.threshold,
            Comparison::AtMost => *value <= self.threshold,
        }
    }
}

/// Attribute values a condition can read, keyed by attribute path.
pub type ConditionContext = BTreeMap<String, f64>;

/// A declarative adjustment to a named stat on the host entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub id: ModifierId,
    /// Stat key this modifier adjusts, e.g. "habitability" or "growth"
    pub target: String,
    pub op: ModifierOp,
    pub value: f64,
    pub source_kind: ModifierSourceKind,
    /// Stringified identifier of the originating entity or table entry
    pub source_id: String,
    /// Human-readable origin, surfaced in breakdowns and event text
    pub source_name: String,
    pub condition: Option<ModifierCondition>,
}

impl Modifier {
    /// Creates an unconditional modifier.
    pub fn new(
        id: ModifierId,
        target: impl Into<String>,
        op: ModifierOp,
        value: f64,
        source_kind: ModifierSourceKind,
        source_id: impl Into<String>,
        source_name: impl Into<String>,
    ) -> Self {
        Modifier {
            id,
            target: target.into(),
            op,
            value,
            source_kind,
            source_id: source_id.into(),
            source_name: source_name.into(),
            condition: None,
        }
    }

    fn applies(&self, target: &str, context: Option<&ConditionContext>) -> bool {
        if self.target != target {
            return false;
        }
        match &self.condition {
            None => true,
            Some(cond) => cond.holds(context),
        }
    }
}

/// A modifier template carried by data tables (planet features, colony
/// types). Stamped into a concrete [`Modifier`] when its source attaches to
/// an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierSpec {
    pub target: String,
    pub op: ModifierOp,
    pub value: f64,
}

impl ModifierSpec {
    pub fn add(target: impl Into<String>, value: f64) -> Self {
        ModifierSpec { target: target.into(), op: ModifierOp::Add, value }
    }

    pub fn multiply(target: impl Into<String>, value: f64) -> Self {
        ModifierSpec { target: target.into(), op: ModifierOp::Multiply, value }
    }

    /// Instantiates the template against a concrete source.
    pub fn instantiate(
        &self,
        id: ModifierId,
        source_kind: ModifierSourceKind,
        source_id: impl Into<String>,
        source_name: impl Into<String>,
    ) -> Modifier {
        Modifier {
            id,
            target: self.target.clone(),
            op: self.op,
            value: self.value,
            source_kind,
            source_id: source_id.into(),
            source_name: source_name.into(),
            condition: None,
        }
    }
}

/// Applies every applicable modifier for `target` to `base`.
///
/// Resolution order is fixed: filter by target, drop modifiers whose
/// condition fails against `context`, add the sum of all `Add` values, then
/// apply each `Multiply` in list order, then clamp.
pub fn resolve_modifiers(
    base: f64,
    target: &str,
    modifiers: &[Modifier],
    clamp_min: Option<f64>,
    clamp_max: Option<f64>,
    context: Option<&ConditionContext>,
) -> f64 {
    let mut adjusted = base;

    let add_sum: f64 = modifiers
        .iter()
        .filter(|m| m.op == ModifierOp::Add && m.applies(target, context))
        .map(|m| m.value)
        .sum();
    adjusted += add_sum;

    for modifier in modifiers
        .iter()
        .filter(|m| m.op == ModifierOp::Multiply && m.applies(target, context))
    {
        adjusted *= modifier.value;
    }

    if let Some(min) = clamp_min {
        adjusted = adjusted.max(min);
    }
    if let Some(max) = clamp_max {
        adjusted = adjusted.min(max);
    }
    adjusted
}

/// One line of a modifier breakdown, in preserved list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub source_name: String,
    pub op: ModifierOp,
    pub value: f64,
}

/// Returns every applicable modifier for `target` as display entries, in the
/// same order resolution observes them. Diagnostics/UI contract.
pub fn modifier_breakdown(
    target: &str,
    modifiers: &[Modifier],
    context: Option<&ConditionContext>,
) -> Vec<BreakdownEntry> {
    modifiers
        .iter()
        .filter(|m| m.applies(target, context))
        .map(|m| BreakdownEntry {
            source_name: m.source_name.clone(),
            op: m.op,
            value: m.value,
        })
        .collect()
}
