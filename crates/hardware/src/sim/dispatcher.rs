//! Predictor lifecycle and call routing.
//!
//! The `Dispatcher` owns the configuration and, once initialized, exactly one
//! predictor. It exposes the entry points a pipeline simulator calls for every
//! branch: `init_predictor`, `make_prediction`, `train_predictor`, and
//! `cleanup`.

use tracing::debug;

use crate::bru::{BranchPredictor, BranchPredictorWrapper};
use crate::common::error::ConfigError;
use crate::config::{BranchPredictor as BpType, Config};
use crate::sim::trace::BranchRecord;

/// Routes predict/train calls to the configured algorithm.
#[derive(Debug)]
pub struct Dispatcher {
    config: Config,
    predictor: Option<BranchPredictorWrapper>,
}

impl Dispatcher {
    /// Creates a dispatcher for `config`. No tables are allocated until
    /// [`Dispatcher::init_predictor`].
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            predictor: None,
        }
    }

    /// Configuration this dispatcher was built with.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Selected algorithm.
    pub const fn kind(&self) -> BpType {
        self.config.predictor
    }

    /// Returns true between `init_predictor` and `cleanup`.
    pub const fn is_initialized(&self) -> bool {
        self.predictor.is_some()
    }

    /// The live predictor, if initialized.
    pub const fn predictor(&self) -> Option<&BranchPredictorWrapper> {
        self.predictor.as_ref()
    }

    /// Allocates and default-initializes the tables of the selected algorithm.
    ///
    /// Calling it again discards all learned state.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the selected algorithm's configuration is
    /// invalid; the dispatcher is left uninitialized.
    pub fn init_predictor(&mut self) -> Result<(), ConfigError> {
        self.predictor = None;
        self.predictor = Some(BranchPredictorWrapper::new(&self.config)?);
        Ok(())
    }

    /// Predicts the direction of the conditional branch at `pc`.
    ///
    /// `target` and `direct` are accepted for interface compatibility and
    /// ignored. An uninitialized dispatcher predicts not-taken.
    pub fn make_prediction(&self, pc: u32, _target: u32, _direct: bool) -> bool {
        self.predictor.as_ref().is_some_and(|bp| bp.predict(pc))
    }

    /// Trains the predictor with a resolved branch.
    ///
    /// State changes only when `condition` is true; `target`, `call`, `ret`
    /// and `direct` are accepted and ignored.
    #[allow(clippy::too_many_arguments, clippy::fn_params_excessive_bools)]
    pub fn train_predictor(
        &mut self,
        pc: u32,
        _target: u32,
        outcome: bool,
        condition: bool,
        _call: bool,
        _ret: bool,
        _direct: bool,
    ) {
        if !condition {
            return;
        }
        if let Some(bp) = self.predictor.as_mut() {
            bp.train(pc, outcome);
        }
    }

    /// Trains with every field of a trace record.
    pub fn train_record(&mut self, record: &BranchRecord) {
        self.train_predictor(
            record.pc,
            record.target,
            record.outcome,
            record.conditional,
            record.call,
            record.ret,
            record.direct,
        );
    }

    /// Releases all predictor tables.
    pub fn cleanup(&mut self) {
        if self.predictor.take().is_some() {
            debug!(predictor = self.config.predictor.name(), "released predictor tables");
        }
    }
}
