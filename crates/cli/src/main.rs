//! Branch predictor trace simulator CLI.
//!
//! This binary runs one predictor over a branch trace and prints its accuracy. It performs:
//! 1. **Configuration:** Built-in defaults, an optional JSON file, then command-line overrides.
//! 2. **Simulation:** Reads the trace from a file or stdin and predicts every conditional branch.
//! 3. **Report:** Prints branch counts, mispredictions, and the misprediction rate.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bpsim_core::common::SimError;
use bpsim_core::config::{BranchPredictor, Config};
use bpsim_core::sim::{TraceReader, simulator};

#[derive(Parser, Debug)]
#[command(
    name = "bpsim",
    author,
    version,
    about = "Trace-driven conditional branch predictor simulator",
    long_about = "Run a branch direction predictor over a text branch trace and report its accuracy.\n\nTrace lines are `<pc> <outcome>` or `<pc> <target> <outcome> <conditional> <call> <ret> <direct>` in hex.\n\nExamples:\n  bpsim --predictor gshare --ghistory-bits 13 trace.txt\n  bpsim --predictor tournament < trace.txt\n  bpsim --config tage.json trace.txt"
)]
struct Cli {
    /// Trace file; reads stdin when omitted.
    trace: Option<PathBuf>,

    /// Predictor: static, gshare, tournament or tage (overrides the config file).
    #[arg(short, long)]
    predictor: Option<BranchPredictor>,

    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Global history bits (gshare index width, tournament global width).
    #[arg(long)]
    ghistory_bits: Option<u32>,

    /// Tournament local history bits.
    #[arg(long)]
    lhistory_bits: Option<u32>,

    /// Tournament PC index bits.
    #[arg(long)]
    pc_index_bits: Option<u32>,

    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, defaulting to `info`
/// (or `debug` with `--verbose`).
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Builds the configuration: file (or defaults), then flag overrides.
fn build_config(cli: &Cli) -> Result<Config, SimError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(predictor) = cli.predictor {
        config.predictor = predictor;
    }
    if let Some(bits) = cli.ghistory_bits {
        config.gshare.history_bits = bits;
        config.tournament.global_history_bits = bits;
    }
    if let Some(bits) = cli.lhistory_bits {
        config.tournament.local_history_bits = bits;
    }
    if let Some(bits) = cli.pc_index_bits {
        config.tournament.pc_index_bits = bits;
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), SimError> {
    let config = build_config(cli)?;
    info!(predictor = config.predictor.name(), "starting simulation");

    let stats = match &cli.trace {
        Some(path) => {
            let file = File::open(path).map_err(bpsim_core::common::TraceError::from)?;
            simulator::run(config, TraceReader::new(BufReader::new(file)))?
        }
        None => simulator::run(config, TraceReader::new(io::stdin().lock()))?,
    };

    stats.print();
    Ok(())
}
