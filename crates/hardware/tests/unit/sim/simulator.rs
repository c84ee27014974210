//! Simulator Tests.
//!
//! Runs whole traces through the predict/score/train loop and checks the
//! resulting statistics.

use std::io::Cursor;

use bpsim_core::common::{SimError, TraceError};
use bpsim_core::config::{BranchPredictor, Config};
use bpsim_core::sim::{BranchRecord, Simulator, TraceReader, simulator};

use crate::common::traces::{counted_loop, repeating, to_trace_text};

fn config(predictor: BranchPredictor) -> Config {
    Config {
        predictor,
        ..Config::default()
    }
}

fn records(stream: &[(u32, bool)]) -> Vec<Result<BranchRecord, TraceError>> {
    stream
        .iter()
        .map(|&(pc, taken)| Ok(BranchRecord::conditional(pc, taken)))
        .collect()
}

#[test]
fn static_mispredicts_every_not_taken() {
    let stream = repeating(0x400, &[true, false, true, true], 25);
    let stats = simulator::run(config(BranchPredictor::Static), records(&stream))
        .expect("valid run");
    assert_eq!(stats.conditional_branches, 100);
    assert_eq!(stats.mispredictions, 25);
}

#[test]
fn unconditional_branches_are_counted_not_scored() {
    let mut sim = Simulator::new(config(BranchPredictor::Static)).expect("valid config");
    let jump = BranchRecord {
        conditional: false,
        outcome: false,
        ..BranchRecord::default()
    };
    sim.step(&jump);
    sim.step(&BranchRecord::conditional(0x10, false));

    assert_eq!(sim.stats.branches, 2);
    assert_eq!(sim.stats.conditional_branches, 1);
    assert_eq!(sim.stats.mispredictions, 1);
}

#[test]
fn learning_predictors_beat_static_on_loops() {
    let stream = counted_loop(0x1000, 3, 400);
    let static_misses = simulator::run(config(BranchPredictor::Static), records(&stream))
        .expect("valid run")
        .mispredictions;

    for kind in [BranchPredictor::GShare, BranchPredictor::Tournament] {
        let stats = simulator::run(config(kind), records(&stream)).expect("valid run");
        assert!(
            stats.mispredictions < static_misses / 4,
            "{} missed {} of {}",
            kind.name(),
            stats.mispredictions,
            stats.conditional_branches
        );
    }
}

#[test]
fn run_from_trace_text() {
    let text = to_trace_text(&repeating(0x2000, &[true], 10));
    let stats = simulator::run(
        config(BranchPredictor::GShare),
        TraceReader::new(Cursor::new(text)),
    )
    .expect("valid run");
    assert_eq!(stats.predictor, BranchPredictor::GShare);
    assert_eq!(stats.conditional_branches, 10);
    assert!(stats.mispredictions >= 1);
}

#[test]
fn run_stops_at_malformed_line() {
    let text = "1000 1\n1004 maybe\n1008 1\n";
    let err = simulator::run(
        config(BranchPredictor::Tage),
        TraceReader::new(Cursor::new(text)),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SimError::Trace(TraceError::Malformed { line: 2, .. })
    ));
}

#[test]
fn run_rejects_invalid_config() {
    let mut bad = config(BranchPredictor::Tournament);
    bad.tournament.pc_index_bits = 0;
    let err = simulator::run(bad, records(&[])).unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
}

#[test]
fn finish_releases_predictor() {
    let mut sim = Simulator::new(config(BranchPredictor::Tage)).expect("valid config");
    let _ = sim
        .run(records(&counted_loop(0x40, 4, 10)))
        .expect("valid run");
    assert!(sim.dispatcher.is_initialized());
    let stats = sim.finish();
    assert_eq!(stats.conditional_branches, 40);
}
