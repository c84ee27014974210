//! Prediction statistics collection and reporting.
//!
//! This module tracks how well a predictor did over a trace. It provides:
//! 1. **Branch counts:** All branches seen and the conditional subset that was predicted.
//! 2. **Accuracy:** Mispredictions, misprediction rate, and accuracy.
//! 3. **Reporting:** A fixed-format text report for the CLI.

use std::fmt;
use std::time::Instant;

use crate::config::BranchPredictor;

/// Prediction statistics for one run.
#[derive(Clone, Debug)]
pub struct PredictionStats {
    start_time: Instant,
    /// Algorithm that produced the predictions.
    pub predictor: BranchPredictor,
    /// Branches of any kind seen in the trace.
    pub branches: u64,
    /// Conditional branches predicted and trained.
    pub conditional_branches: u64,
    /// Conditional branches predicted in the wrong direction.
    pub mispredictions: u64,
}

impl PredictionStats {
    /// Starts an empty record for `predictor`.
    pub fn new(predictor: BranchPredictor) -> Self {
        Self {
            start_time: Instant::now(),
            predictor,
            branches: 0,
            conditional_branches: 0,
            mispredictions: 0,
        }
    }

    /// Records a predicted conditional branch.
    pub const fn record_conditional(&mut self, correct: bool) {
        self.branches += 1;
        self.conditional_branches += 1;
        if !correct {
            self.mispredictions += 1;
        }
    }

    /// Records a branch that was not predicted.
    pub const fn record_unconditional(&mut self) {
        self.branches += 1;
    }

    /// Mispredictions as a percentage of conditional branches (0 when none were seen).
    pub fn misprediction_rate(&self) -> f64 {
        if self.conditional_branches == 0 {
            0.0
        } else {
            100.0 * self.mispredictions as f64 / self.conditional_branches as f64
        }
    }

    /// Correct predictions as a percentage of conditional branches.
    pub fn accuracy(&self) -> f64 {
        if self.conditional_branches == 0 {
            0.0
        } else {
            100.0 - self.misprediction_rate()
        }
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for PredictionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.start_time.elapsed().as_secs_f64();
        writeln!(f, "==========================================================")?;
        writeln!(f, "BRANCH PREDICTION ({})", self.predictor.name())?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "host_seconds             {seconds:.4} s")?;
        writeln!(f, "bp.branches              {}", self.branches)?;
        writeln!(f, "bp.conditional           {}", self.conditional_branches)?;
        writeln!(f, "bp.mispredicts           {}", self.mispredictions)?;
        writeln!(f, "bp.mispredict_rate       {:.3}%", self.misprediction_rate())?;
        writeln!(f, "bp.accuracy              {:.3}%", self.accuracy())?;
        write!(f, "----------------------------------------------------------")
    }
}
