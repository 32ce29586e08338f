//! Access mechanisms for the VM generation counter file.
//!
//! The host exposes a generation counter as the first machine word of a
//! special file. This crate provides the three ways the probes observe it:
//!
//! - [`FdSource`] - direct `pread(2)` of the word at offset 0
//! - [`PollWatcher`] - blocking `poll(2)` wait for priority/error events
//!   on the descriptor, re-reading on each wakeup
//! - [`MmapWatcher`] - a read-only private mapping of the first page,
//!   re-sampled at a fixed interval
//!
//! All mechanisms own their descriptor (and mapping) and release it when
//! dropped, on every exit path.

pub mod mmap;
pub mod poll;
pub mod source;

pub use mmap::{MappedCounter, MmapWatcher, SAMPLE_INTERVAL};
pub use poll::PollWatcher;
pub use source::{CounterSource, FdSource};
