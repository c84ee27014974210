//! Branch Predictor Direction Tests.
//!
//! Verifies the direction prediction and training logic of the Static,
//! GShare and Tournament predictors, plus the static dispatch wrapper.
//! TAGE internals are covered in tage.rs.

use bpsim_core::bru::gshare::GSharePredictor;
use bpsim_core::bru::static_bp::StaticPredictor;
use bpsim_core::bru::tage::TagePredictor;
use bpsim_core::bru::tournament::{Chooser, TournamentPredictor};
use bpsim_core::bru::{BranchPredictor, BranchPredictorWrapper};
use bpsim_core::common::counter::{three_bit, two_bit};
use bpsim_core::config::{
    BranchPredictor as BpType, Config, GShareConfig, TageConfig, TournamentConfig,
};
use proptest::prelude::*;

use crate::common::harness::{steady_state_mispredictions, train_n};
use crate::common::traces::{counted_loop, repeating};

// ══════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════

fn gshare(history_bits: u32) -> GSharePredictor {
    GSharePredictor::new(&GShareConfig { history_bits })
}

fn tournament() -> TournamentPredictor {
    TournamentPredictor::new(&TournamentConfig {
        global_history_bits: 8,
        local_history_bits: 6,
        pc_index_bits: 6,
    })
}

const TTTN: [bool; 4] = [true, true, true, false];

// ══════════════════════════════════════════════════════════
// 1. Static Predictor
// ══════════════════════════════════════════════════════════

/// Static predictor always predicts taken.
#[test]
fn static_always_taken() {
    let bp = StaticPredictor::new();
    assert!(bp.predict(0x1000));
    assert!(bp.predict(0));
}

/// Training never changes the static verdict.
#[test]
fn static_ignores_training() {
    let mut bp = StaticPredictor::new();
    train_n(&mut bp, 0x1000, false, 50);
    assert!(bp.predict(0x1000));
}

// ══════════════════════════════════════════════════════════
// 2. GShare
// ══════════════════════════════════════════════════════════

#[test]
fn gshare_table_size_follows_history_bits() {
    assert_eq!(gshare(2).table_size(), 4);
    assert_eq!(gshare(15).table_size(), 1 << 15);
}

#[test]
fn gshare_counters_start_weakly_not_taken() {
    let bp = gshare(4);
    assert!((0..16).all(|i| bp.counter(i).value() == two_bit::WN));
    assert!(!bp.predict(0x40));
}

/// The first taken outcome moves slot 0 to WT and the history to
/// 1, so the next lookup for the same PC lands on the untouched slot 1.
#[test]
fn gshare_history_moves_the_index() {
    let mut bp = gshare(2);
    assert_eq!(bp.index(0), 0);
    assert!(!bp.predict(0));

    bp.train(0, true);
    assert_eq!(bp.counter(0).value(), two_bit::WT);
    assert_eq!(bp.history().bits(), 1);
    assert_eq!(bp.index(0), 1);
    assert!(!bp.predict(0));
}

#[test]
fn gshare_index_is_pc_xor_history() {
    let mut bp = gshare(4);
    for taken in [true, false, true] {
        bp.train(0x3, taken);
    }
    // History 0b101.
    assert_eq!(bp.index(0x3), 0x3 ^ 0b101);
    assert_eq!(bp.index(0x13), 0x3 ^ 0b101);
}

/// Only the low index bits of the 64-bit history take part in indexing.
#[test]
fn gshare_ignores_history_above_index_width() {
    let mut bp = gshare(3);
    bp.train(0, true);
    train_n(&mut bp, 0, false, 3);
    assert_eq!(bp.history().bits(), 0b1000);
    assert_eq!(bp.index(0), 0);
}

#[test]
fn gshare_learns_repeating_pattern() {
    let mut bp = gshare(8);
    let misses = steady_state_mispredictions(
        &mut bp,
        repeating(0x400, &TTTN, 100),
        repeating(0x400, &TTTN, 50),
    );
    assert_eq!(misses, 0);
}

proptest! {
    /// Training moves the indexed counter one step toward the outcome.
    #[test]
    fn gshare_counter_moves_toward_outcome(
        prefix in prop::collection::vec(any::<bool>(), 0..32),
        pc in any::<u32>(),
        taken in any::<bool>(),
    ) {
        let mut bp = gshare(6);
        for &t in &prefix {
            bp.train(pc, t);
        }
        let idx = bp.index(pc);
        let before = bp.counter(idx).value();
        bp.train(pc, taken);
        let after = bp.counter(idx).value();
        if taken {
            prop_assert_eq!(after, (before + 1).min(two_bit::ST));
        } else {
            prop_assert_eq!(after, before.saturating_sub(1));
        }
    }
}

// ══════════════════════════════════════════════════════════
// 3. Tournament
// ══════════════════════════════════════════════════════════

#[test]
fn tournament_initial_state() {
    let bp = tournament();
    assert_eq!(bp.chooser(0), Chooser::WeakLocal);
    assert_eq!(bp.global_counter(0).value(), two_bit::WN);
    assert_eq!(bp.local_counter(0).value(), three_bit::SLIGHTLY_NOT_TAKEN);
    assert!(!bp.predict(0x1234));
}

#[test]
fn tournament_histories_record_outcomes() {
    let mut bp = tournament();
    bp.train(0x5, true);
    bp.train(0x5, false);
    bp.train(0x6, true);
    assert_eq!(bp.local_history(0x5), 0b10);
    assert_eq!(bp.local_history(0x6), 0b1);
    assert_eq!(bp.history().bits(), 0b101);
    assert_eq!(bp.global_index(), 0b101);
}

/// The global history register is masked to the global index width.
#[test]
fn tournament_global_history_masked() {
    let mut bp = tournament();
    train_n(&mut bp, 0, true, 20);
    assert_eq!(bp.global_index(), 0xFF);
}

#[test]
fn tournament_learns_repeating_pattern() {
    let mut bp = tournament();
    let misses = steady_state_mispredictions(
        &mut bp,
        repeating(0x80, &TTTN, 100),
        repeating(0x80, &TTTN, 50),
    );
    assert_eq!(misses, 0);
}

#[test]
fn tournament_learns_counted_loop() {
    let mut bp = tournament();
    let misses = steady_state_mispredictions(
        &mut bp,
        counted_loop(0x200, 5, 100),
        counted_loop(0x200, 5, 40),
    );
    assert_eq!(misses, 0);
}

proptest! {
    /// When the components agree the chooser entry is left alone.
    #[test]
    fn tournament_chooser_moves_only_on_disagreement(
        outcomes in prop::collection::vec(any::<bool>(), 1..200),
    ) {
        let mut bp = tournament();
        for (i, &taken) in outcomes.iter().enumerate() {
            let pc = (i as u32 % 3) * 4;
            let g_idx = bp.global_index();
            let before = bp.chooser(g_idx);
            let agree = bp.local_prediction(pc) == bp.global_prediction();
            bp.train(pc, taken);
            if agree {
                prop_assert_eq!(bp.chooser(g_idx), before);
            }
        }
    }
}

// ══════════════════════════════════════════════════════════
// 4. Dispatch wrapper
// ══════════════════════════════════════════════════════════

fn wrapper(kind: BpType) -> BranchPredictorWrapper {
    let config = Config {
        predictor: kind,
        ..Config::default()
    };
    BranchPredictorWrapper::new(&config).expect("default configuration is valid")
}

#[test]
fn wrapper_builds_selected_algorithm() {
    for kind in [BpType::Static, BpType::GShare, BpType::Tournament, BpType::Tage] {
        assert_eq!(wrapper(kind).kind(), kind);
    }
}

/// Every table-based predictor starts out predicting not-taken.
#[test]
fn table_predictors_start_not_taken() {
    for kind in [BpType::GShare, BpType::Tournament, BpType::Tage] {
        let bp = wrapper(kind);
        for pc in [0, 0x400, 0xFFFF_FFFC] {
            assert!(!bp.predict(pc), "{} at {pc:#x}", kind.name());
        }
    }
    assert!(wrapper(BpType::Static).predict(0x400));
}

#[test]
fn wrapper_rejects_invalid_geometry() {
    let config = Config {
        predictor: BpType::Tage,
        tage: TageConfig {
            base_entries: 1000,
            ..TageConfig::default()
        },
        ..Config::default()
    };
    assert!(BranchPredictorWrapper::new(&config).is_err());
}

/// The wrapper forwards training to the live predictor.
#[test]
fn wrapper_matches_direct_predictor() {
    let mut direct = TagePredictor::new(&TageConfig::default());
    let mut wrapped = wrapper(BpType::Tage);
    for (pc, taken) in counted_loop(0x4000, 7, 30) {
        assert_eq!(direct.predict(pc), wrapped.predict(pc));
        direct.train(pc, taken);
        wrapped.train(pc, taken);
    }
}
