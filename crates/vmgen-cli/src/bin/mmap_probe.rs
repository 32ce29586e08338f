//! Report VM generation counter changes by sampling a mapped page.
//!
//! Maps one read-only private page of the counter file and re-reads the
//! first word on a fixed interval, printing one line per detected change.
//! Responsiveness is bounded by the interval; no kernel notification is
//! involved. The loop never terminates voluntarily; a fatal error exits
//! with status 1.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::thread;
use tracing::info;
use vmgen_cli::init_logging;
use vmgen_probe::{MmapWatcher, SAMPLE_INTERVAL};

/// Mmap probe command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "mmap_probe",
    about = "Watch for VM generation counter changes through a memory mapping",
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

    let mut watcher = MmapWatcher::open(&args.path)?;
    info!(
        baseline = %watcher.baseline(),
        interval_secs = SAMPLE_INTERVAL.as_secs(),
        "sampling mapped counter"
    );

    loop {
        thread::sleep(SAMPLE_INTERVAL);
        if let Some(change) = watcher.sample() {
            println!(
                "VM generation counter changed! Old: {} New: {}",
                change.old, change.new
            );
        }
    }
}
