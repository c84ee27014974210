//! Branch history registers.
//!
//! This module provides the two history structures the direction predictors
//! index with:
//! 1. **Global history:** one shift register of the most recent conditional
//!    outcomes, up to 128 bits wide, with XOR folding down to index/tag widths.
//! 2. **Local history:** a table of short per-branch shift registers selected
//!    by the low bits of the PC.

/// Widest global history register supported.
pub const MAX_GLOBAL_HISTORY_BITS: u32 = u128::BITS;

/// Widest per-branch local history supported.
pub const MAX_LOCAL_HISTORY_BITS: u32 = u16::BITS;

#[inline]
const fn mask_u128(bits: u32) -> u128 {
    if bits >= u128::BITS {
        u128::MAX
    } else {
        (1u128 << bits) - 1
    }
}

#[inline]
const fn mask_u64(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Global History Register.
///
/// The newest outcome sits at bit 0. The register is a 128-bit value, so a
/// shift carries the top bit of the low 64-bit half into the high half.
/// Bits at or above `width` are always zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct GlobalHistory {
    bits: u128,
    width: u32,
}

impl GlobalHistory {
    /// Creates an all-zero history register `width` bits wide.
    ///
    /// Widths above [`MAX_GLOBAL_HISTORY_BITS`] are clamped.
    pub const fn new(width: u32) -> Self {
        let width = if width > MAX_GLOBAL_HISTORY_BITS {
            MAX_GLOBAL_HISTORY_BITS
        } else {
            width
        };
        Self { bits: 0, width }
    }

    /// Register width in bits.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Raw register contents.
    #[inline]
    pub const fn bits(&self) -> u128 {
        self.bits
    }

    /// The low 64 bits (the newest outcomes).
    #[inline]
    pub const fn newer_half(&self) -> u64 {
        self.bits as u64
    }

    /// The high 64 bits (the oldest outcomes).
    #[inline]
    pub const fn older_half(&self) -> u64 {
        (self.bits >> 64) as u64
    }

    /// The `n` newest outcomes as an integer (`n` is capped at 64).
    #[inline]
    pub const fn low(&self, n: u32) -> u64 {
        (self.bits as u64) & mask_u64(n)
    }

    /// Shifts the resolved outcome in at bit 0.
    #[inline]
    pub const fn push(&mut self, taken: bool) {
        self.bits = ((self.bits << 1) | taken as u128) & mask_u128(self.width);
    }

    /// Compresses the `length` newest outcomes into `out_bits` bits.
    ///
    /// The history is cut into consecutive `out_bits`-wide chunks starting at
    /// bit 0 (the final chunk may be narrower) and the chunks are XORed
    /// together. `length` is capped at the register width and `out_bits` at 32.
    pub fn fold(&self, length: u32, out_bits: u32) -> u32 {
        let out_bits = out_bits.min(u32::BITS);
        if out_bits == 0 {
            return 0;
        }

        let mut remaining = length.min(self.width);
        let mut shift = 0;
        let mut folded = 0u32;
        while remaining > 0 {
            let take = remaining.min(out_bits);
            let chunk = ((self.bits >> shift) as u64) & mask_u64(take);
            folded ^= chunk as u32;
            shift += take;
            remaining -= take;
        }
        folded & (mask_u64(out_bits) as u32)
    }
}

/// Per-branch local history table.
///
/// Registers are selected by `pc & (2^pc_index_bits - 1)`; branches sharing
/// those bits share a register.
#[derive(Clone, Debug)]
pub struct LocalHistoryTable {
    entries: Vec<u16>,
    index_mask: usize,
    history_mask: u16,
}

impl LocalHistoryTable {
    /// Allocates `2^pc_index_bits` zeroed registers of `history_bits` each.
    ///
    /// `history_bits` is capped at [`MAX_LOCAL_HISTORY_BITS`].
    pub fn new(pc_index_bits: u32, history_bits: u32) -> Self {
        let size = 1usize << pc_index_bits;
        Self {
            entries: vec![0; size],
            index_mask: size - 1,
            history_mask: mask_u64(history_bits.min(MAX_LOCAL_HISTORY_BITS)) as u16,
        }
    }

    /// Number of registers in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the table has no registers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    const fn slot(&self, pc: u32) -> usize {
        (pc as usize) & self.index_mask
    }

    /// History register for the branch at `pc`.
    #[inline]
    pub fn get(&self, pc: u32) -> u16 {
        self.entries[self.slot(pc)] & self.history_mask
    }

    /// Shifts the resolved outcome into the register for `pc`.
    #[inline]
    pub fn push(&mut self, pc: u32, taken: bool) {
        let slot = self.slot(pc);
        let pattern = self.entries[slot];
        self.entries[slot] = ((pattern << 1) | u16::from(taken)) & self.history_mask;
    }
}
