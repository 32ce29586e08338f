//! Single-shot sampling scenarios.

use std::path::Path;

use vmgen_common::{GenCounter, ProbeError};
use vmgen_probe::{CounterSource, FdSource, MappedCounter, PollWatcher};

use crate::acceptance::common::{counter_file, page_counter_file};

#[test]
fn test_read_probe_observes_stored_value() {
    let file = counter_file(5);
    let mut source = FdSource::open(file.path()).unwrap();
    assert_eq!(source.read_current().unwrap(), GenCounter::new(5));
}

#[test]
fn test_all_mechanisms_agree_on_the_same_file() {
    let file = page_counter_file(42);

    let mut direct = FdSource::open(file.path()).unwrap();
    let mut mapped = MappedCounter::map(file.path()).unwrap();
    let polled = PollWatcher::open(file.path()).unwrap();

    assert_eq!(direct.read_current().unwrap(), GenCounter::new(42));
    assert_eq!(mapped.read_current().unwrap(), GenCounter::new(42));
    assert_eq!(polled.baseline(), GenCounter::new(42));
}

#[test]
fn test_missing_path_fails_every_mechanism() {
    let path = Path::new("/nonexistent/gen_counter");

    assert!(matches!(FdSource::open(path), Err(ProbeError::Open(_))));
    assert!(matches!(PollWatcher::open(path), Err(ProbeError::Open(_))));
    assert!(matches!(MappedCounter::map(path), Err(ProbeError::Open(_))));
}

#[test]
fn test_short_file_fails_word_read() {
    let file = {
        use std::io::Write;
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&[1, 2, 3]).unwrap();
        f.flush().unwrap();
        f
    };

    let mut source = FdSource::open(file.path()).unwrap();
    assert!(matches!(source.read_current(), Err(ProbeError::Read(_))));
    assert!(matches!(
        PollWatcher::open(file.path()),
        Err(ProbeError::Read(_))
    ));
}
