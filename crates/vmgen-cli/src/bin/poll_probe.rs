//! Report VM generation counter changes via a blocking poll(2) wait.
//!
//! Opens the counter file, reads a baseline, then blocks indefinitely on
//! priority/error conditions of the descriptor. Each wakeup re-reads the
//! counter and prints one line per detected change. The loop never
//! terminates voluntarily; a fatal error exits with status 1.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use vmgen_cli::init_logging;
use vmgen_probe::PollWatcher;

/// Poll probe command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "poll_probe",
    about = "Wait for VM generation counter changes via poll(2)",
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

    let mut watcher = PollWatcher::open(&args.path)?;
    info!(baseline = %watcher.baseline(), "watching counter descriptor");

    loop {
        if let Some(change) = watcher.wait()? {
            println!(
                "VM generation counter changed. Old: {} New: {}",
                change.old, change.new
            );
        }
    }
}
