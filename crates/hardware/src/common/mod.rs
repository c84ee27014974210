//! Building blocks shared by every predictor.
//!
//! This module provides:
//! 1. **Counters:** Fixed-width saturating counters for table entries.
//! 2. **History:** Global and per-branch local history registers.
//! 3. **Errors:** Configuration and trace error types.

/// Saturating counter primitives.
pub mod counter;

/// Error types for configuration and trace input.
pub mod error;

/// Global and local branch history registers.
pub mod history;

pub use counter::{Counter2, Counter3, SaturatingCounter};
pub use error::{ConfigError, SimError, TraceError};
pub use history::{GlobalHistory, LocalHistoryTable};
