//! Property-based tests for core formulas and the modifier resolver.
//! These verify invariants and edge cases across a wide range of inputs.

use crate::formula;
use crate::modifier::{
    resolve_modifiers, Modifier, ModifierId, ModifierOp, ModifierSourceKind,
};
use crate::rng::TurnRng;
use proptest::prelude::*;

/// Property: planet tax is never negative and never exceeds pop^2/4.
#[test]
fn proptest_planet_tax_bounds() {
    proptest!(|(pop in 0u32..30, hab in 0i64..=10)| {
        let tax = formula::planet_tax(pop, hab);
        prop_assert!(tax >= 0);
        prop_assert!(tax <= (pop as i64 * pop as i64) / 4);
        if pop < 5 {
            prop_assert_eq!(tax, 0);
        }
    });
}

/// Property: the growth tick keeps population within [1, max] and the
/// accumulator at or below 10, and never levels up and down at once.
#[test]
fn proptest_growth_tick_bounds() {
    proptest!(|(
        previous in -20i64..=10,
        per_turn in -10i64..=10,
        pop in 1u32..=12,
        max_pop in 1u32..=12,
        civilian in 0u32..=30
    )| {
        let pop = pop.min(max_pop);
        let out = formula::growth_tick(previous, per_turn, pop, max_pop, civilian);
        prop_assert!(out.population >= 1);
        prop_assert!(out.population <= max_pop.max(pop));
        prop_assert!(out.growth <= 10);
        prop_assert!(!(out.leveled_up && out.leveled_down));
        if out.leveled_up {
            prop_assert_eq!(out.growth, 0);
            prop_assert!(civilian >= formula::civilian_housing_requirement(pop));
        }
        if out.leveled_down {
            prop_assert_eq!(out.growth, 9);
        }
    });
}

/// Property: add-then-multiply equals the hand-computed fold, regardless of
/// how adds and multiplies are interleaved in the list.
#[test]
fn proptest_modifier_resolution_order() {
    proptest!(|(
        base in -50.0f64..50.0,
        adds in prop::collection::vec(-10.0f64..10.0, 0..5),
        muls in prop::collection::vec(0.0f64..3.0, 0..4)
    )| {
        let mut modifiers = Vec::new();
        let mut id = 0u32;
        // Interleave: multiplies first in the list, adds after, to prove
        // list position does not change add-before-multiply semantics.
        for m in &muls {
            id += 1;
            modifiers.push(Modifier::new(
                ModifierId(id), "stat", ModifierOp::Multiply, *m,
                ModifierSourceKind::Event, "prop", "prop",
            ));
        }
        for a in &adds {
            id += 1;
            modifiers.push(Modifier::new(
                ModifierId(id), "stat", ModifierOp::Add, *a,
                ModifierSourceKind::Event, "prop", "prop",
            ));
        }
        let resolved = resolve_modifiers(base, "stat", &modifiers, None, None, None);
        let mut expected = base + adds.iter().sum::<f64>();
        for m in &muls {
            expected *= m;
        }
        prop_assert!((resolved - expected).abs() < 1e-9);
    });
}

/// Property: clamping bounds hold for any modifier set.
#[test]
fn proptest_modifier_clamping() {
    proptest!(|(
        base in -100.0f64..100.0,
        value in -100.0f64..100.0
    )| {
        let modifier = Modifier::new(
            ModifierId(1), "stat", ModifierOp::Add, value,
            ModifierSourceKind::Event, "prop", "prop",
        );
        let resolved =
            resolve_modifiers(base, "stat", &[modifier], Some(0.0), Some(10.0), None);
        prop_assert!((0.0..=10.0).contains(&resolved));
    });
}

/// Property: debt accrual never pushes the token count past the cap, and
/// always adds at least one token on any deficit.
#[test]
fn proptest_debt_token_accrual() {
    proptest!(|(deficit in 1i64..10_000, existing in 0u8..=10)| {
        let new_tokens = formula::debt_tokens_for_deficit(deficit);
        prop_assert!(new_tokens >= 1);
        let total = (existing as i64 + new_tokens).min(10) as u8;
        prop_assert!(total <= 10);
        prop_assert!(total >= existing.min(10));
    });
}

/// Property: roll_range stays inclusive-bounded for arbitrary seeds.
#[test]
fn proptest_roll_range_bounds() {
    proptest!(|(seed: u64, min in 0u32..50, span in 0u32..50)| {
        let max = min + span;
        let mut rng = TurnRng::seeded(seed);
        for _ in 0..10 {
            let v = rng.roll_range(min, max);
            prop_assert!(v >= min && v <= max);
        }
    });
}

/// Property: weighted_index only ever picks positive-weight entries.
#[test]
fn proptest_weighted_index_validity() {
    proptest!(|(
        seed: u64,
        weights in prop::collection::vec(0.0f64..5.0, 1..8)
    )| {
        let mut rng = TurnRng::seeded(seed);
        match rng.weighted_index(&weights) {
            Some(i) => prop_assert!(weights[i] > 0.0),
            None => prop_assert!(weights.iter().all(|w| *w <= 0.0)),
        }
    });
}

/// Property: ship abilities are monotone in their inputs.
#[test]
fn proptest_abilities_monotone_in_size() {
    proptest!(|(
        firepower in 0i64..20,
        armor in 0i64..20,
        evasion in 0i64..20,
        size in 1i64..15
    )| {
        let smaller = formula::fight_ability(firepower, armor, evasion, size);
        let larger = formula::fight_ability(firepower, armor, evasion, size + 1);
        prop_assert!(larger >= smaller);
    });
}
