// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::recording_sink::RecordingSink;
use crate::test_data::TestEntry;

/// Asserts non-decreasing timestamps.
pub fn assert_sorted(printed: &[TestEntry]) {
    for pair in printed.windows(2) {
        assert!(
            pair[0].timestamp <= pair[1].timestamp,
            "out of order: {:?} printed before {:?}",
            pair[0],
            pair[1]
        );
    }
}

pub fn payloads(printed: &[TestEntry]) -> Vec<&str> {
    printed.iter().map(|e| e.payload.as_str()).collect()
}

pub fn assert_done_once<T>(sink: &RecordingSink<T>) {
    assert_eq!(sink.done_calls(), 1, "done must fire exactly once");
    assert_eq!(sink.printed_after_done(), 0, "print after done");
}
