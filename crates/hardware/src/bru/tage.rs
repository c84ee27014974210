//! TAGE (Tagged Geometric History Length) Branch Predictor.
//!
//! TAGE uses a base bimodal predictor and multiple tagged tables indexed with
//! geometrically increasing history lengths. It provides high accuracy by
//! matching long history patterns while falling back to shorter histories
//! or the base predictor when necessary.
//!
//! The global history is a 128-bit register. Each tagged table folds the
//! newest `history_bits` outcomes down to its index width and, separately,
//! down to its tag width.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(T) where T is the number of tagged tables (typically 4)
//!   - `train()`: O(T), plus O(T × S) on a usefulness decay cycle
//! - **Space Complexity:** O(B + T × S) where B is the base size and S the tagged table size
//! - **Hardware Cost:** High - multiple table lookups, tag compares, priority selection
//! - **Best Case:** Complex history-correlated patterns with varying lengths
//! - **Worst Case:** Random or completely uncorrelated branches (~50% accuracy)

use tracing::trace;

use super::BranchPredictor;
use crate::common::counter::{Counter2, Counter3, three_bit, two_bit};
use crate::common::history::{GlobalHistory, MAX_GLOBAL_HISTORY_BITS};
use crate::config::{TageConfig, TageTableConfig};

/// An entry in a tagged TAGE table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaggedEntry {
    /// Folded history/PC signature.
    pub tag: u16,
    /// 3-bit saturating counter for prediction.
    pub ctr: Counter3,
    /// 2-bit usefulness counter for replacement policy.
    pub useful: Counter2,
    /// Slot is occupied.
    pub valid: bool,
}

impl Default for TaggedEntry {
    fn default() -> Self {
        Self {
            tag: 0,
            ctr: Counter3::new(three_bit::SLIGHTLY_TAKEN),
            useful: Counter2::new(0),
            valid: false,
        }
    }
}

impl TaggedEntry {
    /// Entry created on allocation: weakly biased toward `taken`, not useful.
    const fn allocated(tag: u16, taken: bool) -> Self {
        Self {
            tag,
            ctr: Counter3::new(if taken {
                three_bit::WEAK_TAKEN
            } else {
                three_bit::WEAK_NOT_TAKEN
            }),
            useful: Counter2::new(0),
            valid: true,
        }
    }

    /// True when the entry may be (re)allocated.
    #[inline]
    const fn is_replaceable(&self) -> bool {
        !self.valid || self.useful.is_zero()
    }
}

/// One tagged table and its masks.
#[derive(Clone, Debug)]
struct TaggedTable {
    geometry: TageTableConfig,
    entries: Vec<TaggedEntry>,
    index_mask: u32,
    tag_mask: u32,
}

impl TaggedTable {
    fn new(geometry: TageTableConfig) -> Self {
        Self {
            geometry,
            entries: vec![TaggedEntry::default(); geometry.size],
            index_mask: (geometry.size - 1) as u32,
            tag_mask: ((1u64 << geometry.tag_bits) - 1) as u32,
        }
    }
}

/// Component supplying a prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provider {
    /// The untagged base table.
    Base,
    /// A tagged table hit.
    Tagged {
        /// Table number, 0 = shortest history.
        table: usize,
        /// Slot within the table.
        index: usize,
    },
}

/// Result of scanning the tagged tables for a branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lookup {
    /// Longest-history hit, or the base table.
    pub provider: Provider,
    /// Next hit below the provider, or the base table.
    pub alternate: Provider,
    /// Base table slot for this branch.
    pub base_index: usize,
}

/// Verdicts derived from a [`Lookup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prediction {
    /// Final prediction returned to the caller.
    pub taken: bool,
    /// The provider's own counter verdict.
    pub provider_taken: bool,
    /// The alternate's verdict.
    pub alternate_taken: bool,
}

/// TAGE Predictor structure.
#[derive(Clone, Debug)]
pub struct TagePredictor {
    /// Global History Register.
    ghr: GlobalHistory,

    /// Base bimodal predictor table.
    base: Vec<Counter2>,
    /// Mask for indexing the base table.
    base_mask: usize,

    /// Tagged tables, shortest history first.
    tables: Vec<TaggedTable>,

    /// Conditional branches trained since init.
    branch_count: u64,
    /// Interval for halving usefulness counters.
    useful_reset_period: u64,
}

impl TagePredictor {
    /// Creates a new TAGE Predictor based on configuration.
    ///
    /// The configuration is expected to have passed [`TageConfig::validate`].
    pub fn new(config: &TageConfig) -> Self {
        debug_assert!(config.validate().is_ok());

        Self {
            ghr: GlobalHistory::new(MAX_GLOBAL_HISTORY_BITS),
            base: vec![Counter2::new(two_bit::WN); config.base_entries],
            base_mask: config.base_entries - 1,
            tables: config.tables.iter().copied().map(TaggedTable::new).collect(),
            branch_count: 0,
            useful_reset_period: config.useful_reset_period,
        }
    }

    /// Number of tagged tables.
    pub fn num_tables(&self) -> usize {
        self.tables.len()
    }

    /// Geometry of tagged table `table`.
    pub fn geometry(&self, table: usize) -> TageTableConfig {
        self.tables[table].geometry
    }

    /// Entries of tagged table `table`.
    pub fn entries(&self, table: usize) -> &[TaggedEntry] {
        &self.tables[table].entries
    }

    /// Base table counter used for `pc`.
    pub fn base_counter(&self, pc: u32) -> Counter2 {
        self.base[self.base_index(pc)]
    }

    /// Conditional branches trained since init.
    pub const fn trained_branches(&self) -> u64 {
        self.branch_count
    }

    /// Current global history.
    pub const fn history(&self) -> &GlobalHistory {
        &self.ghr
    }

    #[inline]
    const fn base_index(&self, pc: u32) -> usize {
        (pc as usize) & self.base_mask
    }

    /// Index of `pc` in tagged table `table` under the current history.
    pub fn index(&self, pc: u32, table: usize) -> usize {
        let t = &self.tables[table];
        let folded = self
            .ghr
            .fold(t.geometry.history_bits, t.geometry.index_bits());
        ((pc ^ folded) & t.index_mask) as usize
    }

    /// Tag of `pc` in tagged table `table` under the current history.
    pub fn tag(&self, pc: u32, table: usize) -> u16 {
        let t = &self.tables[table];
        let folded = self
            .ghr
            .fold(t.geometry.history_bits, t.geometry.tag_bits);
        ((pc ^ folded) & t.tag_mask) as u16
    }

    /// Finds the provider and alternate for `pc`.
    ///
    /// Scans from the longest history to the shortest; the first valid tag
    /// match provides, the second is the alternate.
    pub fn lookup(&self, pc: u32) -> Lookup {
        let mut hits = (0..self.tables.len()).rev().filter_map(|table| {
            let index = self.index(pc, table);
            let entry = &self.tables[table].entries[index];
            (entry.valid && entry.tag == self.tag(pc, table))
                .then_some(Provider::Tagged { table, index })
        });

        let provider = hits.next().unwrap_or(Provider::Base);
        let alternate = if provider == Provider::Base {
            Provider::Base
        } else {
            hits.next().unwrap_or(Provider::Base)
        };

        Lookup {
            provider,
            alternate,
            base_index: self.base_index(pc),
        }
    }

    fn verdict(&self, component: Provider, base_index: usize) -> bool {
        match component {
            Provider::Base => self.base[base_index].is_taken(),
            Provider::Tagged { table, index } => self.tables[table].entries[index].ctr.is_taken(),
        }
    }

    /// Applies the provider/alternate selection rule to a lookup.
    ///
    /// A tagged provider that is not useful and only weakly confident defers
    /// to the alternate.
    pub fn resolve(&self, lookup: &Lookup) -> Prediction {
        let provider_taken = self.verdict(lookup.provider, lookup.base_index);
        let alternate_taken = self.verdict(lookup.alternate, lookup.base_index);

        let taken = match lookup.provider {
            Provider::Base => provider_taken,
            Provider::Tagged { table, index } => {
                let entry = &self.tables[table].entries[index];
                if entry.useful.is_zero() && entry.ctr.is_weak() {
                    alternate_taken
                } else {
                    provider_taken
                }
            }
        };

        Prediction {
            taken,
            provider_taken,
            alternate_taken,
        }
    }

    /// Claims a slot in a table shorter than `provider_table`, nearest first.
    ///
    /// Nothing is allocated if every candidate slot is valid and useful.
    fn allocate(&mut self, pc: u32, provider_table: usize, taken: bool) {
        for table in (0..provider_table).rev() {
            let index = self.index(pc, table);
            let tag = self.tag(pc, table);
            let entry = &mut self.tables[table].entries[index];
            if entry.is_replaceable() {
                *entry = TaggedEntry::allocated(tag, taken);
                trace!(pc, table, index, tag, taken, "TAGE allocated entry");
                return;
            }
        }
        trace!(pc, provider_table, "TAGE allocation found no free slot");
    }

    /// Halves every usefulness counter in every tagged table.
    fn decay_usefulness(&mut self) {
        for table in &mut self.tables {
            for entry in &mut table.entries {
                entry.useful.halve();
            }
        }
        trace!(branches = self.branch_count, "TAGE usefulness decay");
    }
}

impl BranchPredictor for TagePredictor {
    /// Predicts from the longest matching tagged table, the alternate when the
    /// provider is weak and not useful, or the base table when nothing matches.
    fn predict(&self, pc: u32) -> bool {
        self.resolve(&self.lookup(pc)).taken
    }

    /// Updates the provider, allocates on a misprediction, decays usefulness
    /// periodically and shifts the outcome into the history.
    fn train(&mut self, pc: u32, taken: bool) {
        let lookup = self.lookup(pc);
        let prediction = self.resolve(&lookup);
        self.branch_count += 1;

        match lookup.provider {
            Provider::Base => self.base[lookup.base_index].update(taken),
            Provider::Tagged { table, index } => {
                let entry = &mut self.tables[table].entries[index];
                if prediction.alternate_taken != prediction.taken {
                    if prediction.taken == taken {
                        entry.useful.increment();
                    } else {
                        entry.useful.decrement();
                    }
                }
                entry.ctr.update(taken);

                if prediction.taken != taken && table + 1 < self.tables.len() {
                    self.allocate(pc, table, taken);
                }
            }
        }

        if self.branch_count % self.useful_reset_period == 0 {
            self.decay_usefulness();
        }

        self.ghr.push(taken);
    }
}
