//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that every direction
//! predictor implements. The simulator calls `predict` before a conditional
//! branch resolves and `train` after it resolves, in program order.

/// Trait for conditional branch direction predictors.
pub trait BranchPredictor {
    /// Predicts whether the conditional branch at `pc` will be taken.
    ///
    /// This is a pure read of predictor state: calling it any number of times
    /// without an intervening `train` returns the same answer.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter of the branch instruction
    fn predict(&self, pc: u32) -> bool;

    /// Trains the predictor with the resolved outcome of the branch at `pc`.
    ///
    /// Only conditional branches are passed here; each call advances the
    /// predictor's history by exactly one outcome.
    ///
    /// # Arguments
    ///
    /// * `pc` - Program counter of the branch instruction
    /// * `taken` - Whether the branch was actually taken
    fn train(&mut self, pc: u32, taken: bool);
}
