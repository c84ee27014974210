//! Static Branch Predictor.
//!
//! Implements an "Always Taken" policy for conditional branches. It keeps no
//! state, allocates nothing, and ignores training.

use super::BranchPredictor;

/// Static Branch Predictor structure.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticPredictor;

impl StaticPredictor {
    /// Creates a new Static Predictor.
    pub const fn new() -> Self {
        Self
    }
}

impl BranchPredictor for StaticPredictor {
    /// Always predicts taken.
    fn predict(&self, _pc: u32) -> bool {
        true
    }

    /// Static prediction never learns.
    fn train(&mut self, _pc: u32, _taken: bool) {}
}
