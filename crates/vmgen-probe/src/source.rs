//! Direct-read access to the generation counter.

use std::fs::File;
use std::os::fd::{AsFd, BorrowedFd};
use std::os::unix::fs::FileExt;
use std::path::Path;

use tracing::debug;
use vmgen_common::{GenCounter, ProbeError, ProbeResult, COUNTER_SIZE};

/// Capability shared by every counter access mechanism: sample the
/// current value of the generation counter.
pub trait CounterSource {
    /// Observe the counter as it is right now.
    fn read_current(&mut self) -> ProbeResult<GenCounter>;
}

/// Samples the counter with `pread(2)` calls on an open descriptor.
///
/// Every read targets offset 0, where the counter lives, so repeated
/// samples through one descriptor always observe the same word. The
/// descriptor is held for the lifetime of the value and closed on drop.
#[derive(Debug)]
pub struct FdSource {
    file: File,
}

impl FdSource {
    /// Open the counter file read-only.
    pub fn open(path: &Path) -> ProbeResult<Self> {
        let file = File::open(path)
            .map_err(|e| ProbeError::Open(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "counter file opened");
        Ok(Self { file })
    }
}

impl CounterSource for FdSource {
    fn read_current(&mut self) -> ProbeResult<GenCounter> {
        let mut buf = [0u8; COUNTER_SIZE];
        self.file
            .read_exact_at(&mut buf, 0)
            .map_err(|e| ProbeError::Read(e.to_string()))?;
        Ok(GenCounter::from_ne_bytes(buf))
    }
}

impl AsFd for FdSource {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.file.as_fd()
    }
}
