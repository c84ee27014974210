//! Simulation layer tests.


/// Predict/score/train loop.
pub mod simulator;
