//! The generation counter value and change detection over it.
//!
//! The host exposes the counter as a single machine word at offset 0 of a
//! special file. The value is opaque: the probes compare observations for
//! equality and never assume any arithmetic meaning.

use std::fmt;

/// Width of the counter on the wire: one native machine word.
pub const COUNTER_SIZE: usize = std::mem::size_of::<usize>();

/// One observation of the host's generation counter.
///
/// An opaque unsigned integer of native word width, decoded in native
/// endianness from the first [`COUNTER_SIZE`] bytes of the counter file.
/// The value changes asynchronously, driven by the host; probes never
/// mutate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenCounter(usize);

impl GenCounter {
    /// Wrap a raw counter value.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value)
    }

    /// Decode a counter from the bytes stored at offset 0 of the file.
    #[must_use]
    pub fn from_ne_bytes(bytes: [u8; COUNTER_SIZE]) -> Self {
        Self(usize::from_ne_bytes(bytes))
    }

    /// The raw counter value.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl fmt::Display for GenCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A detected change between two consecutive observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The previously observed value.
    pub old: GenCounter,
    /// The value observed now.
    pub new: GenCounter,
}

/// Detects transitions across a sequence of counter observations.
///
/// Holds the most recent observation as its baseline. Feeding in a new
/// observation reports a [`Transition`] exactly when the value differs
/// from the baseline; the baseline advances on every observation either
/// way, so updates collapsed between two samples are reported as a single
/// transition from the previous observation to the current one.
///
/// # Example
///
/// ```
/// use vmgen_common::counter::{ChangeTracker, GenCounter};
///
/// let mut tracker = ChangeTracker::new(GenCounter::new(5));
///
/// // Unchanged observation - nothing to report
/// assert!(tracker.observe(GenCounter::new(5)).is_none());
///
/// // The counter moved
/// let change = tracker.observe(GenCounter::new(7)).unwrap();
/// assert_eq!(change.old.value(), 5);
/// assert_eq!(change.new.value(), 7);
///
/// // Stable again
/// assert!(tracker.observe(GenCounter::new(7)).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ChangeTracker {
    last: GenCounter,
}

impl ChangeTracker {
    /// Start tracking from a baseline observation.
    #[must_use]
    pub fn new(baseline: GenCounter) -> Self {
        Self { last: baseline }
    }

    /// Feed in a new observation.
    ///
    /// Returns the transition if the value differs from the previous
    /// observation. The baseline is updated regardless.
    pub fn observe(&mut self, current: GenCounter) -> Option<Transition> {
        let previous = self.last;
        self.last = current;
        (previous != current).then_some(Transition {
            old: previous,
            new: current,
        })
    }

    /// The most recent observation.
    #[must_use]
    pub fn last(&self) -> GenCounter {
        self.last
    }
}
