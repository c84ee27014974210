//! Trace-driven simulation.
//!
//! This module connects the predictors to a stream of resolved branches:
//! 1. **Dispatcher:** Predictor lifecycle (`init_predictor`, `make_prediction`,
//!    `train_predictor`, `cleanup`).
//! 2. **Trace:** Parsing of text branch traces.
//! 3. **Simulator:** The predict-score-train loop.

/// Predictor lifecycle and call routing.
pub mod dispatcher;

/// Predict/score/train loop over a trace.
pub mod simulator;

/// Branch trace records and reader.
pub mod trace;

pub use dispatcher::Dispatcher;
pub use simulator::Simulator;
pub use trace::{BranchRecord, TraceReader};
