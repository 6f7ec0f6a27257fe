// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::test_data::TestEntry;
use async_trait::async_trait;
use logmerge_core::{AsyncLogSink, LogSink};
use std::time::Duration;
use tokio::time::sleep;

/// Remembers every printed entry and counts `done` calls.
#[derive(Debug)]
pub struct RecordingSink<T> {
    printed: Vec<T>,
    done_calls: usize,
    printed_after_done: usize,
}

impl<T> RecordingSink<T> {
    pub fn new() -> Self {
        Self {
            printed: Vec::new(),
            done_calls: 0,
            printed_after_done: 0,
        }
    }

    pub fn printed(&self) -> &[T] {
        &self.printed
    }

    pub fn into_printed(self) -> Vec<T> {
        self.printed
    }

    pub const fn done_calls(&self) -> usize {
        self.done_calls
    }

    /// Prints that arrived after `done` had already fired. Always zero for a
    /// well-behaved driver.
    pub const fn printed_after_done(&self) -> usize {
        self.printed_after_done
    }

    fn record(&mut self, entry: T) {
        if self.done_calls > 0 {
            self.printed_after_done += 1;
        }
        self.printed.push(entry);
    }
}

impl<T> Default for RecordingSink<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LogSink<T> for RecordingSink<T> {
    fn print(&mut self, entry: T) {
        self.record(entry);
    }

    fn done(&mut self) {
        self.done_calls += 1;
    }
}

/// A recording sink whose `print` suspends for a while.
///
/// Only asynchronous, so it exercises drivers without the blanket
/// `LogSink` lift.
#[derive(Debug)]
pub struct SlowSink {
    inner: RecordingSink<TestEntry>,
    delay: Duration,
}

impl SlowSink {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: RecordingSink::new(),
            delay,
        }
    }

    pub const fn recorded(&self) -> &RecordingSink<TestEntry> {
        &self.inner
    }
}

#[async_trait]
impl AsyncLogSink<TestEntry> for SlowSink {
    async fn print(&mut self, entry: TestEntry) {
        sleep(self.delay).await;
        self.inner.record(entry);
    }

    async fn done(&mut self) {
        self.inner.done_calls += 1;
    }
}
