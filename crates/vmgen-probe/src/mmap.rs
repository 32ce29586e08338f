//! Mapped-memory access to the generation counter.
//!
//! Maps one read-only private page of the counter file and samples the
//! first word of it on a fixed interval. The mapping reflects host-side
//! counter updates without further syscalls, at the cost of responsiveness
//! bounded by the sample interval.

use std::ffi::c_void;
use std::fs::File;
use std::num::NonZeroUsize;
use std::path::Path;
use std::ptr::NonNull;
use std::time::Duration;

use nix::sys::mman::{mmap, munmap, MapFlags, ProtFlags};
use tracing::{debug, warn};
use vmgen_common::{ChangeTracker, GenCounter, ProbeError, ProbeResult, Transition};

use crate::source::CounterSource;

/// Fixed delay between samples of the mapped counter.
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(10);

/// One read-only private page of the counter file, mapped at offset 0.
///
/// The counter occupies the first machine word of the page. The mapping
/// and its backing descriptor are released together on drop.
#[derive(Debug)]
pub struct MappedCounter {
    base: NonNull<c_void>,
    len: NonZeroUsize,
    _file: File,
}

impl MappedCounter {
    /// Open `path` read-only and map the first page of it.
    pub fn map(path: &Path) -> ProbeResult<Self> {
        let file = File::open(path)
            .map_err(|e| ProbeError::Open(format!("{}: {e}", path.display())))?;

        let len = NonZeroUsize::new(page_size())
            .ok_or_else(|| ProbeError::Mmap("page size reported as zero".into()))?;

        // SAFETY: fresh kernel-chosen region; the descriptor outlives the
        // mapping, and failure surfaces as Err rather than a sentinel value.
        let base = unsafe {
            mmap(
                None,
                len,
                ProtFlags::PROT_READ,
                MapFlags::MAP_PRIVATE,
                &file,
                0,
            )
        }
        .map_err(|e| ProbeError::Mmap(e.to_string()))?;

        debug!(path = %path.display(), len = len.get(), "counter page mapped");
        Ok(Self {
            base,
            len,
            _file: file,
        })
    }

    /// Sample the counter word at the start of the mapping.
    #[must_use]
    pub fn read(&self) -> GenCounter {
        // The page changes underneath the process, so the load must be
        // volatile or the compiler may hoist it out of the sampling loop.
        // SAFETY: the mapping is page-aligned, readable, and at least one
        // word long for the lifetime of `self`.
        let value = unsafe { std::ptr::read_volatile(self.base.as_ptr().cast::<usize>()) };
        GenCounter::new(value)
    }
}

impl CounterSource for MappedCounter {
    fn read_current(&mut self) -> ProbeResult<GenCounter> {
        Ok(self.read())
    }
}

impl Drop for MappedCounter {
    fn drop(&mut self) {
        // SAFETY: `base`/`len` describe exactly the region mapped in `map`.
        if let Err(e) = unsafe { munmap(self.base, self.len.get()) } {
            warn!("munmap of counter page failed: {e}");
        }
    }
}

/// Get system page size.
fn page_size() -> usize {
    // SAFETY: sysconf is safe to call
    unsafe { libc::sysconf(libc::_SC_PAGESIZE) as usize }
}

/// Periodic sampler over a [`MappedCounter`].
pub struct MmapWatcher {
    map: MappedCounter,
    tracker: ChangeTracker,
}

impl MmapWatcher {
    /// Map the counter file and take the baseline reading.
    pub fn open(path: &Path) -> ProbeResult<Self> {
        let map = MappedCounter::map(path)?;
        let baseline = map.read();
        debug!(%baseline, "baseline counter read from mapping");
        Ok(Self {
            map,
            tracker: ChangeTracker::new(baseline),
        })
    }

    /// The most recently observed counter value.
    #[must_use]
    pub fn baseline(&self) -> GenCounter {
        self.tracker.last()
    }

    /// Re-sample the mapped counter.
    ///
    /// Returns `Some(Transition)` when the value differs from the previous
    /// observation; the baseline advances either way. Infallible once the
    /// mapping is established.
    pub fn sample(&mut self) -> Option<Transition> {
        self.tracker.observe(self.map.read())
    }
}
