//! Single-shot sample of the VM generation counter.
//!
//! Opens the counter file, reads one machine word at offset 0, prints it,
//! and exits. Any failure is fatal: one diagnostic on standard error and
//! exit status 1.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use vmgen_cli::init_logging;
use vmgen_probe::{CounterSource, FdSource};

/// Read probe command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "read_probe",
    about = "Print the current VM generation counter once",
    version,
    long_about = None
)]
struct Args {
    /// Path to the generation counter file.
    path: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut source = FdSource::open(&args.path)?;
    let counter = source.read_current()?;
    debug!(%counter, "counter sampled");

    println!("VM generation counter: {counter}");
    Ok(())
}
