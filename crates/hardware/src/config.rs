//! Configuration system for the branch predictor engine.
//!
//! This module defines all configuration structures and enums used to size
//! the predictor tables. It provides:
//! 1. **Defaults:** Baseline table geometry for every algorithm.
//! 2. **Structures:** Per-algorithm config (gshare, tournament, TAGE) under a root `Config`.
//! 3. **Validation:** Geometry checks run before any table is allocated.
//!
//! Configuration is read-only for the lifetime of a run. It can be built with
//! `Config::default()`, deserialized from JSON, or adjusted field by field by the CLI.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::common::error::ConfigError;
use crate::common::history::{MAX_GLOBAL_HISTORY_BITS, MAX_LOCAL_HISTORY_BITS};

/// Default configuration constants for the predictors.
mod defaults {
    /// Gshare global history / index width (2^15 = 32K counters).
    pub const GSHARE_HISTORY_BITS: u32 = 15;

    /// Tournament global history width (global table and chooser, 32K entries each).
    pub const TOURNAMENT_GLOBAL_BITS: u32 = 15;

    /// Tournament local history width (local counter table, 4K entries).
    pub const TOURNAMENT_LOCAL_BITS: u32 = 12;

    /// Tournament PC index width (local history table, 4K registers).
    pub const TOURNAMENT_PC_INDEX_BITS: u32 = 12;

    /// TAGE base (bimodal) table size.
    pub const TAGE_BASE_ENTRIES: usize = 2048;

    /// TAGE tagged table size.
    pub const TAGE_TABLE_SIZE: usize = 1024;

    /// TAGE usefulness decay period (256K trained branches).
    pub const TAGE_USEFUL_RESET_PERIOD: u64 = 262_144;

    /// TAGE history lengths per tagged table, shortest first.
    pub const TAGE_HISTORY_LENGTHS: [u32; 4] = [14, 15, 44, 128];

    /// TAGE tag widths per tagged table.
    pub const TAGE_TAG_WIDTHS: [u32; 4] = [9, 9, 10, 10];
}

/// Largest table index width accepted for PC-indexed tables.
pub const MAX_INDEX_BITS: u32 = 30;

/// Largest tag width stored in a TAGE entry.
pub const MAX_TAG_BITS: u32 = u16::BITS;

/// Branch prediction algorithm types.
///
/// Selects which algorithm the dispatcher allocates and routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BranchPredictor {
    /// Static predictor: every conditional branch is predicted taken.
    #[default]
    #[serde(alias = "static")]
    Static,
    /// Global history predictor (gshare).
    ///
    /// Indexes one counter table with PC XOR global history.
    #[serde(alias = "gshare", alias = "Gshare")]
    GShare,
    /// Tournament predictor choosing between local and global predictors.
    #[serde(alias = "tournament")]
    Tournament,
    /// Tagged Geometric History Length predictor.
    #[serde(alias = "TAGE", alias = "tage", alias = "Custom", alias = "custom")]
    Tage,
}

impl BranchPredictor {
    /// Human-readable algorithm name used in reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Static => "Static",
            Self::GShare => "Gshare",
            Self::Tournament => "Tournament",
            Self::Tage => "TAGE",
        }
    }
}

impl FromStr for BranchPredictor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "gshare" => Ok(Self::GShare),
            "tournament" => Ok(Self::Tournament),
            "tage" | "custom" => Ok(Self::Tage),
            _ => Err(ConfigError::UnknownPredictor(s.to_string())),
        }
    }
}

/// Root configuration structure.
///
/// # Examples
///
/// Deserializing from JSON:
///
/// ```
/// use bpsim_core::config::{BranchPredictor, Config};
///
/// let json = r#"{
///     "predictor": "Tournament",
///     "tournament": { "global_history_bits": 13 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.predictor, BranchPredictor::Tournament);
/// assert_eq!(config.tournament.global_history_bits, 13);
/// assert_eq!(config.tournament.local_history_bits, 12);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Algorithm selected for this run
    #[serde(default)]
    pub predictor: BranchPredictor,

    /// Gshare geometry
    #[serde(default)]
    pub gshare: GShareConfig,

    /// Tournament geometry
    #[serde(default)]
    pub tournament: TournamentConfig,

    /// TAGE geometry
    #[serde(default)]
    pub tage: TageConfig,
}

impl Config {
    /// Parses a JSON configuration. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the text is not a valid configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Json`] if it cannot be parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks the geometry of the selected algorithm.
    ///
    /// Only the selected algorithm is checked; the others are never allocated.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.predictor {
            BranchPredictor::Static => Ok(()),
            BranchPredictor::GShare => self.gshare.validate(),
            BranchPredictor::Tournament => self.tournament.validate(),
            BranchPredictor::Tage => self.tage.validate(),
        }
    }
}

fn check_bits(what: &'static str, value: u32, max: u32) -> Result<(), ConfigError> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::BitsOutOfRange {
            what,
            value,
            min: 1,
            max,
        })
    }
}

fn check_power_of_two(what: &'static str, value: usize) -> Result<(), ConfigError> {
    if value.is_power_of_two() && value.trailing_zeros() <= MAX_INDEX_BITS {
        Ok(())
    } else {
        Err(ConfigError::NotPowerOfTwo { what, value })
    }
}

/// Gshare predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GShareConfig {
    /// Global history bits used for indexing (table has 2^bits counters)
    #[serde(default = "GShareConfig::default_history_bits")]
    pub history_bits: u32,
}

impl GShareConfig {
    /// Returns the default gshare history width.
    fn default_history_bits() -> u32 {
        defaults::GSHARE_HISTORY_BITS
    }

    /// Checks the history width.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BitsOutOfRange`] if the width is 0 or above 30.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_bits("gshare history_bits", self.history_bits, MAX_INDEX_BITS)
    }
}

impl Default for GShareConfig {
    fn default() -> Self {
        Self {
            history_bits: defaults::GSHARE_HISTORY_BITS,
        }
    }
}

/// Tournament predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TournamentConfig {
    /// Global history width; sizes the global table and the chooser
    #[serde(default = "TournamentConfig::default_global")]
    pub global_history_bits: u32,

    /// Per-branch local history width; sizes the local counter table
    #[serde(default = "TournamentConfig::default_local")]
    pub local_history_bits: u32,

    /// PC bits selecting a local history register
    #[serde(default = "TournamentConfig::default_pc_index")]
    pub pc_index_bits: u32,
}

impl TournamentConfig {
    /// Returns the default tournament global history width.
    fn default_global() -> u32 {
        defaults::TOURNAMENT_GLOBAL_BITS
    }

    /// Returns the default tournament local history width.
    fn default_local() -> u32 {
        defaults::TOURNAMENT_LOCAL_BITS
    }

    /// Returns the default tournament PC index width.
    fn default_pc_index() -> u32 {
        defaults::TOURNAMENT_PC_INDEX_BITS
    }

    /// Checks all three widths.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BitsOutOfRange`] for the first width out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_bits(
            "tournament global_history_bits",
            self.global_history_bits,
            MAX_INDEX_BITS,
        )?;
        check_bits(
            "tournament local_history_bits",
            self.local_history_bits,
            MAX_LOCAL_HISTORY_BITS,
        )?;
        check_bits(
            "tournament pc_index_bits",
            self.pc_index_bits,
            MAX_INDEX_BITS,
        )
    }
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            global_history_bits: defaults::TOURNAMENT_GLOBAL_BITS,
            local_history_bits: defaults::TOURNAMENT_LOCAL_BITS,
            pc_index_bits: defaults::TOURNAMENT_PC_INDEX_BITS,
        }
    }
}

/// Geometry of one TAGE tagged table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TageTableConfig {
    /// Number of entries (power of two)
    #[serde(default = "TageTableConfig::default_size")]
    pub size: usize,

    /// Global history bits folded into this table's index and tag
    pub history_bits: u32,

    /// Width of the stored tag
    pub tag_bits: u32,
}

impl TageTableConfig {
    /// Returns the default tagged table size.
    fn default_size() -> usize {
        defaults::TAGE_TABLE_SIZE
    }

    /// Index width: log2 of the table size.
    pub const fn index_bits(&self) -> u32 {
        self.size.trailing_zeros()
    }
}

/// TAGE (Tagged Geometric) predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TageConfig {
    /// Base table entries (power of two)
    #[serde(default = "TageConfig::default_base_entries")]
    pub base_entries: usize,

    /// Tagged tables ordered from shortest to longest history
    #[serde(default = "TageConfig::default_tables")]
    pub tables: Vec<TageTableConfig>,

    /// Trained branches between usefulness decays
    #[serde(default = "TageConfig::default_useful_reset_period")]
    pub useful_reset_period: u64,
}

impl TageConfig {
    /// Returns the default base table size.
    fn default_base_entries() -> usize {
        defaults::TAGE_BASE_ENTRIES
    }

    /// Returns the default tagged table geometry.
    ///
    /// Four 1K-entry tables with history lengths [14, 15, 44, 128] and tag
    /// widths [9, 9, 10, 10].
    pub fn default_tables() -> Vec<TageTableConfig> {
        defaults::TAGE_HISTORY_LENGTHS
            .iter()
            .zip(defaults::TAGE_TAG_WIDTHS.iter())
            .map(|(&history_bits, &tag_bits)| TageTableConfig {
                size: defaults::TAGE_TABLE_SIZE,
                history_bits,
                tag_bits,
            })
            .collect()
    }

    /// Returns the default usefulness decay period.
    fn default_useful_reset_period() -> u64 {
        defaults::TAGE_USEFUL_RESET_PERIOD
    }

    /// Checks table sizes, history ordering, tag widths and the decay period.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_power_of_two("TAGE base_entries", self.base_entries)?;
        if self.tables.is_empty() {
            return Err(ConfigError::NoTaggedTables);
        }
        if self.useful_reset_period == 0 {
            return Err(ConfigError::ZeroResetPeriod);
        }

        let mut previous = 0;
        for (table, geometry) in self.tables.iter().enumerate() {
            check_power_of_two("TAGE table size", geometry.size)?;
            check_bits(
                "TAGE history_bits",
                geometry.history_bits,
                MAX_GLOBAL_HISTORY_BITS,
            )?;
            check_bits("TAGE tag_bits", geometry.tag_bits, MAX_TAG_BITS)?;
            if table > 0 && geometry.history_bits <= previous {
                return Err(ConfigError::HistoryNotIncreasing {
                    table,
                    history_bits: geometry.history_bits,
                    previous,
                });
            }
            previous = geometry.history_bits;
        }
        Ok(())
    }
}

impl Default for TageConfig {
    fn default() -> Self {
        Self {
            base_entries: defaults::TAGE_BASE_ENTRIES,
            tables: Self::default_tables(),
            useful_reset_period: defaults::TAGE_USEFUL_RESET_PERIOD,
        }
    }
}
