//! Fixed-width saturating counters.
//!
//! Every predictor table in this crate is built from small unsigned counters
//! that clamp at their bounds instead of wrapping. The width is a const
//! parameter so a table of 2-bit counters and a table of 3-bit counters are
//! distinct types, and the saturation bounds are checked at compile time.
//!
//! # Performance
//!
//! - **Space Complexity:** one byte per counter regardless of `BITS`
//! - **Hardware Cost:** `BITS` flip-flops plus an incrementer/decrementer

/// An unsigned `BITS`-wide saturating counter.
///
/// The value always lies in `[0, 2^BITS - 1]`. The upper half of the range
/// predicts taken, the lower half predicts not-taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct SaturatingCounter<const BITS: u8> {
    value: u8,
}

/// 2-bit counter used by gshare, the tournament global table, the TAGE base
/// table and the TAGE usefulness field.
pub type Counter2 = SaturatingCounter<2>;

/// 3-bit counter used by the tournament local table and TAGE tagged entries.
pub type Counter3 = SaturatingCounter<3>;

impl<const BITS: u8> SaturatingCounter<BITS> {
    /// Largest representable value.
    pub const MAX: u8 = {
        assert!(BITS >= 1 && BITS <= 7, "counter width must be 1..=7 bits");
        (1 << BITS) - 1
    };

    /// Smallest value that predicts taken.
    pub const TAKEN_THRESHOLD: u8 = 1 << (BITS - 1);

    /// Creates a counter holding `value`, clamped to the counter's range.
    #[inline]
    pub const fn new(value: u8) -> Self {
        let value = if value > Self::MAX { Self::MAX } else { value };
        Self { value }
    }

    /// Current raw value.
    #[inline]
    pub const fn value(self) -> u8 {
        self.value
    }

    /// Steps up by one, stopping at [`Self::MAX`].
    #[inline]
    pub const fn increment(&mut self) {
        if self.value < Self::MAX {
            self.value += 1;
        }
    }

    /// Steps down by one, stopping at zero.
    #[inline]
    pub const fn decrement(&mut self) {
        if self.value > 0 {
            self.value -= 1;
        }
    }

    /// Moves one step toward the resolved outcome.
    #[inline]
    pub const fn update(&mut self, taken: bool) {
        if taken {
            self.increment();
        } else {
            self.decrement();
        }
    }

    /// Returns true when the counter sits in the taken half of its range.
    #[inline]
    pub fn is_taken(self) -> bool {
        debug_assert!(self.value <= Self::MAX);
        self.value >= Self::TAKEN_THRESHOLD
    }

    /// Returns true for the two values adjacent to the taken threshold.
    ///
    /// For a 3-bit counter these are 3 and 4; for a 2-bit counter, 1 and 2.
    #[inline]
    pub const fn is_weak(self) -> bool {
        self.value == Self::TAKEN_THRESHOLD || self.value + 1 == Self::TAKEN_THRESHOLD
    }

    /// Halves the value (integer shift right by one).
    #[inline]
    pub const fn halve(&mut self) {
        self.value >>= 1;
    }

    /// Returns true when the value is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.value == 0
    }

    /// Returns true when the value equals [`Self::MAX`].
    #[inline]
    pub const fn is_saturated(self) -> bool {
        self.value == Self::MAX
    }
}

impl<const BITS: u8> From<SaturatingCounter<BITS>> for u8 {
    fn from(counter: SaturatingCounter<BITS>) -> Self {
        counter.value
    }
}

/// Named states of a 2-bit direction counter.
pub mod two_bit {
    /// Strongly not-taken.
    pub const SN: u8 = 0;
    /// Weakly not-taken.
    pub const WN: u8 = 1;
    /// Weakly taken.
    pub const WT: u8 = 2;
    /// Strongly taken.
    pub const ST: u8 = 3;
}

/// Named states of a 3-bit direction counter.
pub mod three_bit {
    /// Strongly not-taken.
    pub const STRONG_NOT_TAKEN: u8 = 0;
    /// Weakly not-taken (the not-taken allocation seed for TAGE entries).
    pub const WEAK_NOT_TAKEN: u8 = 2;
    /// Slightly not-taken: the highest not-taken value.
    pub const SLIGHTLY_NOT_TAKEN: u8 = 3;
    /// Slightly taken: the lowest taken value.
    pub const SLIGHTLY_TAKEN: u8 = 4;
    /// Weakly taken (the taken allocation seed for TAGE entries).
    pub const WEAK_TAKEN: u8 = 5;
    /// Strongly taken.
    pub const STRONG_TAKEN: u8 = 7;
}
