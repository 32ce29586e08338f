//! Transition detection scenarios over a descriptor-backed source.
//!
//! The host-side counter update is simulated by rewriting the word at
//! offset 0 of the backing file between observations.

use vmgen_common::{ChangeTracker, GenCounter};
use vmgen_probe::{CounterSource, FdSource};

use crate::acceptance::common::{counter_file, update_counter};

#[test]
fn test_transition_five_to_seven() {
    let file = counter_file(5);
    let mut source = FdSource::open(file.path()).unwrap();
    let mut tracker = ChangeTracker::new(source.read_current().unwrap());

    update_counter(&file, 7);

    let change = tracker.observe(source.read_current().unwrap()).unwrap();
    assert_eq!(change.old, GenCounter::new(5));
    assert_eq!(change.new, GenCounter::new(7));
}

#[test]
fn test_unchanged_counter_reports_nothing() {
    let file = counter_file(5);
    let mut source = FdSource::open(file.path()).unwrap();
    let mut tracker = ChangeTracker::new(source.read_current().unwrap());

    for _ in 0..3 {
        assert!(tracker.observe(source.read_current().unwrap()).is_none());
    }
}

#[test]
fn test_updates_between_observations_collapse() {
    let file = counter_file(5);
    let mut source = FdSource::open(file.path()).unwrap();
    let mut tracker = ChangeTracker::new(source.read_current().unwrap());

    // Two host updates land before the probe looks again.
    update_counter(&file, 6);
    update_counter(&file, 9);

    let change = tracker.observe(source.read_current().unwrap()).unwrap();
    assert_eq!(change.old, GenCounter::new(5));
    assert_eq!(change.new, GenCounter::new(9));

    // The collapsed value is the new baseline.
    assert!(tracker.observe(source.read_current().unwrap()).is_none());
}

#[test]
fn test_each_observed_transition_reported_once() {
    let file = counter_file(1);
    let mut source = FdSource::open(file.path()).unwrap();
    let mut tracker = ChangeTracker::new(source.read_current().unwrap());

    let mut changes = Vec::new();
    for value in [2usize, 2, 3] {
        update_counter(&file, value);
        if let Some(change) = tracker.observe(source.read_current().unwrap()) {
            changes.push(change);
        }
    }

    assert_eq!(changes.len(), 2);
    assert_eq!((changes[0].old.value(), changes[0].new.value()), (1, 2));
    assert_eq!((changes[1].old.value(), changes[1].new.value()), (2, 3));
}
