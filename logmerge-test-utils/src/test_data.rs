// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use logmerge_core::LogEntry;

/// The entry type used throughout the workspace tests.
pub type TestEntry = LogEntry<u64, String>;

pub fn entry(timestamp: u64, message: &str) -> TestEntry {
    LogEntry::new(timestamp, message.to_string())
}

/// Builds one source's worth of entries named `{prefix}{timestamp}`.
pub fn entries(prefix: &str, timestamps: &[u64]) -> Vec<TestEntry> {
    timestamps
        .iter()
        .map(|&ts| entry(ts, &format!("{prefix}{ts}")))
        .collect()
}

/// `[[{1,"A"}], []]`
pub fn one_entry_and_one_empty() -> Vec<Vec<TestEntry>> {
    vec![vec![entry(1, "A")], vec![]]
}

/// `[[{1,"L1"},{3,"L3"}], [{2,"L2"}]]`
pub fn interleaved_pair() -> Vec<Vec<TestEntry>> {
    vec![vec![entry(1, "L1"), entry(3, "L3")], vec![entry(2, "L2")]]
}

/// `[[{1,"L1"}], [{1,"L2"}]]`
pub fn tied_pair() -> Vec<Vec<TestEntry>> {
    vec![vec![entry(1, "L1")], vec![entry(1, "L2")]]
}

/// `count` sources holding exactly one entry each, timestamps descending by
/// source so the merge has to reverse them.
pub fn single_entry_sources(count: usize) -> Vec<Vec<TestEntry>> {
    (0..count as u64)
        .rev()
        .map(|ts| vec![entry(ts, &format!("Log {ts}"))])
        .collect()
}
