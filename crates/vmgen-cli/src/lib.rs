//! Shared front-end plumbing for the probe executables.

use tracing_subscriber::EnvFilter;

/// Initialize logging with the specified log level.
///
/// Diagnostics go to standard error; standard out belongs to probe output.
/// `RUST_LOG` overrides the level when set.
pub fn init_logging(level: &str) {
    let filter = format!(
        "read_probe={level},poll_probe={level},mmap_probe={level},\
         vmgen_probe={level},vmgen_common={level}"
    );

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
