//! Blocking notification wait on the counter descriptor.
//!
//! The counter file signals a generation change through the "exceptional
//! condition" channel, so the wait registers interest in priority data
//! (`POLLPRI`) and error (`POLLERR`) conditions specifically, not ordinary
//! readability. The kernel edge-triggers a wakeup when the counter moves.

use std::os::fd::AsFd;
use std::path::Path;

use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use tracing::{debug, trace};
use vmgen_common::{ChangeTracker, GenCounter, ProbeError, ProbeResult, Transition};

use crate::source::{CounterSource, FdSource};

/// Conditions that wake the wait: priority data or a descriptor error.
const WAKE_EVENTS: PollFlags = PollFlags::POLLPRI.union(PollFlags::POLLERR);

/// Blocks in `poll(2)` until the counter descriptor signals a change.
#[derive(Debug)]
pub struct PollWatcher {
    source: FdSource,
    tracker: ChangeTracker,
}

impl PollWatcher {
    /// Open the counter file and take the baseline reading.
    pub fn open(path: &Path) -> ProbeResult<Self> {
        let mut source = FdSource::open(path)?;
        let baseline = source.read_current()?;
        debug!(%baseline, "baseline counter read");
        Ok(Self {
            source,
            tracker: ChangeTracker::new(baseline),
        })
    }

    /// The most recently observed counter value.
    #[must_use]
    pub fn baseline(&self) -> GenCounter {
        self.tracker.last()
    }

    /// Block indefinitely until the descriptor wakes, then re-sample.
    ///
    /// Returns `Some(Transition)` when the re-read value differs from the
    /// previous observation. The stored baseline advances on every wakeup
    /// whether or not the value changed.
    pub fn wait(&mut self) -> ProbeResult<Option<Transition>> {
        let ready = {
            let mut fds = [PollFd::new(self.source.as_fd(), WAKE_EVENTS)];
            poll(&mut fds, PollTimeout::NONE)
                .map_err(|e| ProbeError::Poll(e.to_string()))?
        };

        // No timeout is armed, so a ready count of zero cannot happen.
        if ready == 0 {
            return Err(ProbeError::Poll(
                "no ready descriptors despite the absence of a timeout".into(),
            ));
        }
        trace!(ready, "counter descriptor woke");

        let current = self.source.read_current()?;
        Ok(self.tracker.observe(current))
    }
}
