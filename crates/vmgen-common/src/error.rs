use thiserror::Error;

/// Probe error types covering the four syscall-level failure classes.
///
/// Every error is immediately fatal: the binaries print one diagnostic to
/// standard error and exit with status 1. There is no retry or recovery.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The counter file could not be opened (missing path, permission
    /// denied, no such device).
    #[error("could not open counter file: {0}")]
    Open(String),

    /// The counter could not be read: short read (fewer bytes than one
    /// machine word) or I/O error.
    #[error("could not read generation counter: {0}")]
    Read(String),

    /// The wait primitive failed, or reported readiness that cannot occur
    /// given the absence of a timeout.
    #[error("poll wait failed: {0}")]
    Poll(String),

    /// The counter file could not be memory-mapped.
    #[error("could not mmap counter file: {0}")]
    Mmap(String),
}

/// Convenience type alias for probe operations.
pub type ProbeResult<T> = Result<T, ProbeError>;
