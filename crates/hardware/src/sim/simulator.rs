//! Simulator: drives a dispatcher over a branch trace and scores it.
//!
//! Each record is handled the way a pipeline would: a conditional branch is
//! predicted before it resolves, then every record is handed to the trainer,
//! which ignores the non-conditional ones.

use crate::common::error::{ConfigError, SimError, TraceError};
use crate::config::Config;
use crate::sim::dispatcher::Dispatcher;
use crate::sim::trace::BranchRecord;
use crate::stats::PredictionStats;

/// Top-level simulator: predictor dispatcher + statistics.
#[derive(Debug)]
pub struct Simulator {
    /// Predictor under evaluation.
    pub dispatcher: Dispatcher,
    /// Accuracy so far.
    pub stats: PredictionStats,
}

impl Simulator {
    /// Creates a simulator with an initialized predictor.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let stats = PredictionStats::new(config.predictor);
        let mut dispatcher = Dispatcher::new(config);
        dispatcher.init_predictor()?;
        Ok(Self { dispatcher, stats })
    }

    /// Predicts (if conditional), scores, and trains one branch.
    pub fn step(&mut self, record: &BranchRecord) {
        if record.conditional {
            let predicted = self
                .dispatcher
                .make_prediction(record.pc, record.target, record.direct);
            self.stats.record_conditional(predicted == record.outcome);
        } else {
            self.stats.record_unconditional();
        }
        self.dispatcher.train_record(record);
    }

    /// Feeds every record in order, stopping at the first trace error.
    ///
    /// # Errors
    ///
    /// Returns the first [`TraceError`] produced by `records`.
    pub fn run<I>(&mut self, records: I) -> Result<&PredictionStats, TraceError>
    where
        I: IntoIterator<Item = Result<BranchRecord, TraceError>>,
    {
        for record in records {
            self.step(&record?);
        }
        Ok(&self.stats)
    }

    /// Releases the predictor tables and returns the final statistics.
    pub fn finish(mut self) -> PredictionStats {
        self.dispatcher.cleanup();
        self.stats
    }
}

/// Runs `records` through a fresh simulator built from `config`.
///
/// # Errors
///
/// Returns [`SimError::Config`] for an invalid configuration and
/// [`SimError::Trace`] for unreadable trace input.
pub fn run<I>(config: Config, records: I) -> Result<PredictionStats, SimError>
where
    I: IntoIterator<Item = Result<BranchRecord, TraceError>>,
{
    let mut sim = Simulator::new(config)?;
    let _ = sim.run(records)?;
    Ok(sim.finish())
}
