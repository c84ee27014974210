//! Saturating Counter Tests.
//!
//! Verifies saturation at both ends, the taken threshold, the weak states
//! and usefulness halving for the 2-bit and 3-bit counters.

use bpsim_core::common::counter::{three_bit, two_bit};
use bpsim_core::common::{Counter2, Counter3, SaturatingCounter};
use proptest::prelude::*;
use rstest::rstest;

// ══════════════════════════════════════════════════════════
// 1. Saturation
// ══════════════════════════════════════════════════════════

#[test]
fn two_bit_saturates_high() {
    let mut c = Counter2::new(two_bit::WT);
    c.increment();
    c.increment();
    c.increment();
    assert_eq!(c.value(), two_bit::ST);
    assert!(c.is_saturated());
}

#[test]
fn two_bit_saturates_low() {
    let mut c = Counter2::new(two_bit::WN);
    c.decrement();
    c.decrement();
    assert_eq!(c.value(), two_bit::SN);
    assert!(c.is_zero());
}

#[test]
fn three_bit_range_is_zero_to_seven() {
    assert_eq!(Counter3::MAX, 7);
    let mut c = Counter3::new(0);
    for _ in 0..20 {
        c.update(true);
    }
    assert_eq!(c.value(), three_bit::STRONG_TAKEN);
    for _ in 0..20 {
        c.update(false);
    }
    assert_eq!(c.value(), three_bit::STRONG_NOT_TAKEN);
}

/// Values above the maximum are clamped at construction.
#[test]
fn new_clamps_to_max() {
    assert_eq!(Counter2::new(9).value(), 3);
    assert_eq!(Counter3::new(200).value(), 7);
}

// ══════════════════════════════════════════════════════════
// 2. Taken threshold and weak states
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(two_bit::SN, false)]
#[case(two_bit::WN, false)]
#[case(two_bit::WT, true)]
#[case(two_bit::ST, true)]
fn two_bit_threshold(#[case] value: u8, #[case] taken: bool) {
    assert_eq!(Counter2::new(value).is_taken(), taken);
}

#[rstest]
#[case(0, false)]
#[case(3, false)]
#[case(4, true)]
#[case(7, true)]
fn three_bit_threshold(#[case] value: u8, #[case] taken: bool) {
    assert_eq!(Counter3::new(value).is_taken(), taken);
}

#[rstest]
#[case(0, false)]
#[case(2, false)]
#[case(3, true)]
#[case(4, true)]
#[case(5, false)]
#[case(7, false)]
fn three_bit_weak_states(#[case] value: u8, #[case] weak: bool) {
    assert_eq!(Counter3::new(value).is_weak(), weak);
}

#[test]
fn two_bit_weak_states_are_wn_and_wt() {
    let weak: Vec<u8> = (0..=3).filter(|&v| Counter2::new(v).is_weak()).collect();
    assert_eq!(weak, vec![two_bit::WN, two_bit::WT]);
}

#[test]
fn halve_shifts_right() {
    let mut c = Counter2::new(3);
    c.halve();
    assert_eq!(c.value(), 1);
    c.halve();
    assert_eq!(c.value(), 0);
    c.halve();
    assert_eq!(c.value(), 0);
}

// ══════════════════════════════════════════════════════════
// 3. Properties
// ══════════════════════════════════════════════════════════

fn apply<const BITS: u8>(start: u8, outcomes: &[bool]) -> SaturatingCounter<BITS> {
    let mut c = SaturatingCounter::<BITS>::new(start);
    for &taken in outcomes {
        c.update(taken);
    }
    c
}

proptest! {
    #[test]
    fn counter_stays_in_range(start in 0u8..8, outcomes in prop::collection::vec(any::<bool>(), 0..64)) {
        prop_assert!(apply::<2>(start, &outcomes).value() <= Counter2::MAX);
        prop_assert!(apply::<3>(start, &outcomes).value() <= Counter3::MAX);
    }

    #[test]
    fn update_moves_by_at_most_one(start in 0u8..8, taken in any::<bool>()) {
        let before = Counter3::new(start).value();
        let after = apply::<3>(start, &[taken]).value();
        prop_assert!(after.abs_diff(before) <= 1);
        if taken {
            prop_assert!(after >= before);
        } else {
            prop_assert!(after <= before);
        }
    }

    #[test]
    fn enough_agreeing_updates_saturate(start in 0u8..4, taken in any::<bool>()) {
        let c = apply::<2>(start, &[taken; 4]);
        prop_assert_eq!(c.is_taken(), taken);
        prop_assert!(!c.is_weak());
    }
}
