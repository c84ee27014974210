//! Tournament Branch Predictor.
//!
//! A hybrid predictor that employs a meta-predictor (the chooser) to select
//! between a Global predictor and a Local predictor (PAg). This allows the
//! predictor to adapt to different types of branch behaviors.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(1)
//!   - `train()`: O(1)
//! - **Space Complexity:** O(2^G + 2^L + 2^P) for global, local counter and local history tables
//! - **Hardware Cost:** Three table reads per prediction plus a 2:1 mux
//! - **Best Case:** Programs mixing self-correlated loops and globally correlated branches
//! - **Worst Case:** Branches whose best sub-predictor changes faster than the chooser adapts

use super::BranchPredictor;
use crate::common::counter::{Counter2, Counter3, three_bit, two_bit};
use crate::common::history::{GlobalHistory, LocalHistoryTable};
use crate::config::TournamentConfig;

/// 2-bit chooser state selecting the sub-predictor to trust.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Chooser {
    /// Strongly prefer the local predictor.
    StrongLocal,
    /// Weakly prefer the local predictor.
    #[default]
    WeakLocal,
    /// Weakly prefer the global predictor.
    WeakGlobal,
    /// Strongly prefer the global predictor.
    StrongGlobal,
}

impl Chooser {
    /// Returns true when the local predictor's verdict is used.
    #[inline]
    pub const fn prefers_local(self) -> bool {
        matches!(self, Self::StrongLocal | Self::WeakLocal)
    }

    /// One step toward `StrongLocal`, clamped.
    #[inline]
    pub const fn toward_local(self) -> Self {
        match self {
            Self::StrongLocal | Self::WeakLocal => Self::StrongLocal,
            Self::WeakGlobal => Self::WeakLocal,
            Self::StrongGlobal => Self::WeakGlobal,
        }
    }

    /// One step toward `StrongGlobal`, clamped.
    #[inline]
    pub const fn toward_global(self) -> Self {
        match self {
            Self::StrongLocal => Self::WeakLocal,
            Self::WeakLocal => Self::WeakGlobal,
            Self::WeakGlobal | Self::StrongGlobal => Self::StrongGlobal,
        }
    }
}

/// Tournament Predictor structure.
#[derive(Clone, Debug)]
pub struct TournamentPredictor {
    /// Global History Register, masked to the global index width.
    ghr: GlobalHistory,
    /// Number of GHR bits indexing the global table and chooser.
    global_bits: u32,

    /// Global Pattern History Table (2-bit counters).
    global_pht: Vec<Counter2>,

    /// Choice table indexed like the global table.
    choice_pht: Vec<Chooser>,

    /// Local History Table storing history patterns per branch.
    local_history: LocalHistoryTable,

    /// Local Pattern History Table (3-bit counters) indexed by local history patterns.
    local_pht: Vec<Counter3>,
}

impl TournamentPredictor {
    /// Creates a new Tournament Predictor based on the provided configuration.
    pub fn new(config: &TournamentConfig) -> Self {
        let global_size = 1 << config.global_history_bits;
        let local_pred_size = 1 << config.local_history_bits;

        Self {
            ghr: GlobalHistory::new(config.global_history_bits),
            global_bits: config.global_history_bits,

            global_pht: vec![Counter2::new(two_bit::WN); global_size],
            choice_pht: vec![Chooser::WeakLocal; global_size],

            local_history: LocalHistoryTable::new(
                config.pc_index_bits,
                config.local_history_bits,
            ),
            local_pht: vec![Counter3::new(three_bit::SLIGHTLY_NOT_TAKEN); local_pred_size],
        }
    }

    /// Index into the global table and chooser for the current history.
    #[inline]
    pub const fn global_index(&self) -> usize {
        self.ghr.low(self.global_bits) as usize
    }

    /// Index into the local counter table for the branch at `pc`.
    #[inline]
    pub fn local_index(&self, pc: u32) -> usize {
        usize::from(self.local_history.get(pc))
    }

    /// Retrieves the prediction from the Global component.
    pub fn global_prediction(&self) -> bool {
        self.global_pht[self.global_index()].is_taken()
    }

    /// Retrieves the prediction from the Local component.
    pub fn local_prediction(&self, pc: u32) -> bool {
        self.local_pht[self.local_index(pc)].is_taken()
    }

    /// Chooser state at `index`.
    pub fn chooser(&self, index: usize) -> Chooser {
        self.choice_pht[index]
    }

    /// Global counter at `index`.
    pub fn global_counter(&self, index: usize) -> Counter2 {
        self.global_pht[index]
    }

    /// Local counter at `index`.
    pub fn local_counter(&self, index: usize) -> Counter3 {
        self.local_pht[index]
    }

    /// Local history register for `pc`.
    pub fn local_history(&self, pc: u32) -> u16 {
        self.local_history.get(pc)
    }

    /// Current global history.
    pub const fn history(&self) -> &GlobalHistory {
        &self.ghr
    }
}

impl BranchPredictor for TournamentPredictor {
    /// Uses the chooser entry for the current global history to pick the
    /// local or the global verdict.
    fn predict(&self, pc: u32) -> bool {
        if self.choice_pht[self.global_index()].prefers_local() {
            self.local_prediction(pc)
        } else {
            self.global_prediction()
        }
    }

    /// Updates the chooser on disagreement, then both counter tables, then
    /// both histories.
    fn train(&mut self, pc: u32, taken: bool) {
        let g_idx = self.global_index();
        let l_idx = self.local_index(pc);

        let local_pred = self.local_pht[l_idx].is_taken();
        let global_pred = self.global_pht[g_idx].is_taken();

        if local_pred != global_pred {
            let choice = &mut self.choice_pht[g_idx];
            *choice = if local_pred == taken {
                choice.toward_local()
            } else {
                choice.toward_global()
            };
        }

        self.local_pht[l_idx].update(taken);
        self.global_pht[g_idx].update(taken);

        self.local_history.push(pc, taken);
        self.ghr.push(taken);
    }
}
