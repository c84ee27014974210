//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the conditional branch direction predictors: static
//! (always taken), gshare, tournament, and TAGE, plus the enum wrapper that
//! selects one of them from configuration.

pub use self::branch_predictor::BranchPredictor;

/// Branch predictor trait.
pub mod branch_predictor;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

/// Static branch predictor (always taken).
pub mod static_bp;

/// Tagged Geometric History Length branch predictor.
pub mod tage;

/// Tournament branch predictor (combines local and global predictors).
pub mod tournament;

use tracing::debug;

use self::{
    gshare::GSharePredictor, static_bp::StaticPredictor, tage::TagePredictor,
    tournament::TournamentPredictor,
};
use crate::common::error::ConfigError;
use crate::config::{BranchPredictor as BpType, Config};

/// Enum wrapper for static dispatch of Branch Predictors.
/// This avoids vtable lookups in the per-branch predict/train path.
#[derive(Clone, Debug)]
pub enum BranchPredictorWrapper {
    /// Always taken.
    Static(StaticPredictor),
    /// PC XOR global history.
    GShare(GSharePredictor),
    /// Local/global hybrid with a chooser.
    Tournament(TournamentPredictor),
    /// Tagged geometric history.
    Tage(TagePredictor),
}

impl BranchPredictorWrapper {
    /// Creates a new branch predictor wrapper based on configuration.
    ///
    /// Validates the selected algorithm's geometry, then allocates exactly
    /// the tables that algorithm needs.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the selected algorithm's configuration is invalid.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let bp = match config.predictor {
            BpType::Static => Self::Static(StaticPredictor::new()),
            BpType::GShare => Self::GShare(GSharePredictor::new(&config.gshare)),
            BpType::Tournament => Self::Tournament(TournamentPredictor::new(&config.tournament)),
            BpType::Tage => Self::Tage(TagePredictor::new(&config.tage)),
        };
        debug!(predictor = config.predictor.name(), "allocated predictor tables");
        Ok(bp)
    }

    /// Algorithm held by this wrapper.
    pub const fn kind(&self) -> BpType {
        match self {
            Self::Static(_) => BpType::Static,
            Self::GShare(_) => BpType::GShare,
            Self::Tournament(_) => BpType::Tournament,
            Self::Tage(_) => BpType::Tage,
        }
    }
}

impl BranchPredictor for BranchPredictorWrapper {
    #[inline(always)]
    fn predict(&self, pc: u32) -> bool {
        match self {
            Self::Static(bp) => bp.predict(pc),
            Self::GShare(bp) => bp.predict(pc),
            Self::Tournament(bp) => bp.predict(pc),
            Self::Tage(bp) => bp.predict(pc),
        }
    }

    #[inline(always)]
    fn train(&mut self, pc: u32, taken: bool) {
        match self {
            Self::Static(bp) => bp.train(pc, taken),
            Self::GShare(bp) => bp.train(pc, taken),
            Self::Tournament(bp) => bp.train(pc, taken),
            Self::Tage(bp) => bp.train(pc, taken),
        }
    }
}
