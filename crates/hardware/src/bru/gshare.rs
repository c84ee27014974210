//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the program counter using an XOR
//! hash. This allows the predictor to distinguish the same branch instruction
//! in different execution contexts.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(1)
//!   - `train()`: O(1)
//! - **Space Complexity:** O(2^N) where N is the history length (15 bits = 32K 2-bit counters)
//! - **Hardware Cost:** Moderate - single PHT lookup, XOR, and counter update
//! - **Best Case:** Correlated branches where outcome depends on recent history
//! - **Worst Case:** Uncorrelated branches or history length too short/long for pattern

use tracing::warn;

use super::BranchPredictor;
use crate::common::counter::{Counter2, two_bit};
use crate::common::history::GlobalHistory;
use crate::config::GShareConfig;

/// The gshare GHR is a plain 64-bit shift register; only the low index bits are read.
const GHR_BITS: u32 = u64::BITS;

/// GShare Predictor structure.
#[derive(Clone, Debug)]
pub struct GSharePredictor {
    /// Global History Register storing recent branch outcomes.
    ghr: GlobalHistory,
    /// Pattern History Table containing 2-bit saturating counters.
    pht: Vec<Counter2>,
    /// Number of history/PC bits forming the index.
    history_bits: u32,
}

impl GSharePredictor {
    /// Creates a new GShare Predictor with every counter weakly not-taken.
    pub fn new(config: &GShareConfig) -> Self {
        Self {
            ghr: GlobalHistory::new(GHR_BITS),
            pht: vec![Counter2::new(two_bit::WN); 1 << config.history_bits],
            history_bits: config.history_bits,
        }
    }

    /// Calculates the index into the Pattern History Table.
    ///
    /// XOR of the low PC bits and the low Global History Register bits.
    pub fn index(&self, pc: u32) -> usize {
        let mask = (self.pht.len() - 1) as u64;
        let pc_part = u64::from(pc) & mask;
        let ghr_part = self.ghr.low(self.history_bits) & mask;
        (pc_part ^ ghr_part) as usize
    }

    /// Counter stored at `index`.
    pub fn counter(&self, index: usize) -> Counter2 {
        self.pht[index]
    }

    /// Number of counters in the table.
    pub fn table_size(&self) -> usize {
        self.pht.len()
    }

    /// Current global history.
    pub const fn history(&self) -> &GlobalHistory {
        &self.ghr
    }
}

impl BranchPredictor for GSharePredictor {
    /// Returns true if the 2-bit counter at the hashed index is WT or ST.
    fn predict(&self, pc: u32) -> bool {
        let idx = self.index(pc);
        match self.pht[idx].value() {
            two_bit::SN | two_bit::WN => false,
            two_bit::WT | two_bit::ST => true,
            state => {
                warn!(pc, idx, state, "gshare counter outside 2-bit range");
                false
            }
        }
    }

    /// Moves the counter one step toward the outcome and shifts the outcome
    /// into the Global History Register.
    fn train(&mut self, pc: u32, taken: bool) {
        let idx = self.index(pc);
        self.pht[idx].update(taken);
        self.ghr.push(taken);
    }
}
