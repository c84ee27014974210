//! Error types.
//!
//! This module defines the recoverable failures of the crate. It provides:
//! 1. **Configuration errors:** Rejected table geometry, unknown predictor names,
//!    and configuration files that cannot be read or parsed.
//! 2. **Trace errors:** Branch trace input that cannot be read or parsed.
//! 3. **Run errors:** Either of the above, raised by a complete simulation run.
//!
//! Predictor operations themselves are total: once a predictor has been
//! initialized, `predict` and `train` cannot fail.

use std::io;

use thiserror::Error;

/// Invalid predictor configuration.
///
/// Reported by `Config::validate` and by `Dispatcher::init_predictor` before
/// any table is allocated.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A table size that must be a power of two is not.
    #[error("{what} must be a non-zero power of two (got {value})")]
    NotPowerOfTwo {
        /// Name of the offending parameter.
        what: &'static str,
        /// Rejected value.
        value: usize,
    },

    /// A bit width lies outside its supported range.
    #[error("{what} must be between {min} and {max} bits (got {value})")]
    BitsOutOfRange {
        /// Name of the offending parameter.
        what: &'static str,
        /// Rejected value.
        value: u32,
        /// Smallest accepted value.
        min: u32,
        /// Largest accepted value.
        max: u32,
    },

    /// TAGE was configured without any tagged table.
    #[error("TAGE needs at least one tagged table")]
    NoTaggedTables,

    /// Tagged table history lengths are not strictly increasing.
    #[error(
        "TAGE table {table} history length {history_bits} must exceed the previous table's {previous}"
    )]
    HistoryNotIncreasing {
        /// Index of the offending table.
        table: usize,
        /// Its history length.
        history_bits: u32,
        /// History length of the table before it.
        previous: u32,
    },

    /// The usefulness decay period is zero.
    #[error("TAGE usefulness reset period must be at least 1")]
    ZeroResetPeriod,

    /// A predictor name that does not match any algorithm.
    #[error("unknown branch predictor '{0}' (expected static, gshare, tournament or tage)")]
    UnknownPredictor(String),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),

    /// The configuration JSON is malformed.
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Unreadable or malformed branch trace input.
#[derive(Debug, Error)]
pub enum TraceError {
    /// Reading from the underlying source failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),

    /// A line does not match any supported trace format.
    #[error("trace line {line}: {reason}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },
}

/// Failure of a complete simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// The predictor could not be initialized.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The trace could not be read.
    #[error(transparent)]
    Trace(#[from] TraceError),
}
