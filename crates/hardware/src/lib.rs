//! Conditional branch direction predictor library.
//!
//! This crate implements the direction predictors of a CPU pipeline simulator:
//! 1. **Primitives:** Saturating counters and global/local history registers.
//! 2. **Predictors:** Static (always taken), gshare, tournament, and TAGE.
//! 3. **Dispatch:** Predictor lifecycle and per-branch predict/train routing.
//! 4. **Simulation:** Trace parsing, the predict-score-train loop, and statistics.

/// Common types (counters, history registers, errors).
pub mod common;
/// Predictor configuration (defaults, enums, per-algorithm structures).
pub mod config;
/// Branch prediction unit (predictor algorithms and their wrapper).
pub mod bru;
/// Dispatcher, trace reader, and simulation loop.
pub mod sim;
/// Prediction statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Predictor lifecycle entry points.
pub use crate::sim::Dispatcher;
/// Trace-driven simulator.
pub use crate::sim::Simulator;
