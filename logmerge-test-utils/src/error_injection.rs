// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sources that fail on purpose.

use crate::sources::PopCounter;
use crate::test_data::TestEntry;
use async_trait::async_trait;
use logmerge_core::{AsyncLogSource, LogSource};
use std::collections::VecDeque;
use std::convert::Infallible;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Simulated error: {0}")]
pub struct TestError(pub String);

impl TestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Fails every single fetch.
#[derive(Debug, Default)]
pub struct FailingSource {
    counter: PopCounter,
}

impl FailingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> PopCounter {
        self.counter.clone()
    }
}

impl LogSource for FailingSource {
    type Entry = TestEntry;
    type Error = TestError;

    fn pop(&mut self) -> Result<Option<TestEntry>, TestError> {
        self.counter.bump();
        Err(TestError::new("source unavailable"))
    }
}

#[async_trait]
impl AsyncLogSource for FailingSource {
    type Entry = TestEntry;
    type Error = TestError;

    async fn pop_async(&mut self) -> Result<Option<TestEntry>, TestError> {
        self.counter.bump();
        Err(TestError::new("source unavailable"))
    }
}

/// Replays a script of successes and failures, then reports end-of-stream.
///
/// ```rust
/// use logmerge_core::LogSource;
/// use logmerge_test_utils::{test_data::entry, FlakySource, TestError};
///
/// let mut source = FlakySource::new(vec![
///     Ok(entry(1, "a")),
///     Err(TestError::new("hiccup")),
///     Ok(entry(2, "b")),
/// ]);
///
/// assert!(source.pop().unwrap().is_some());
/// assert!(source.pop().is_err());
/// assert!(source.pop().unwrap().is_some());
/// assert!(source.pop().unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct FlakySource {
    script: VecDeque<Result<TestEntry, TestError>>,
    counter: PopCounter,
}

impl FlakySource {
    pub fn new(script: Vec<Result<TestEntry, TestError>>) -> Self {
        Self {
            script: script.into(),
            counter: PopCounter::default(),
        }
    }

    pub fn counter(&self) -> PopCounter {
        self.counter.clone()
    }

    fn next_step(&mut self) -> Result<Option<TestEntry>, TestError> {
        self.counter.bump();
        self.script.pop_front().transpose()
    }
}

impl LogSource for FlakySource {
    type Entry = TestEntry;
    type Error = TestError;

    fn pop(&mut self) -> Result<Option<TestEntry>, TestError> {
        self.next_step()
    }
}

#[async_trait]
impl AsyncLogSource for FlakySource {
    type Entry = TestEntry;
    type Error = TestError;

    async fn pop_async(&mut self) -> Result<Option<TestEntry>, TestError> {
        self.next_step()
    }
}

/// Yields its entries, then panics instead of reporting end-of-stream.
#[derive(Debug)]
pub struct PanickingSource {
    entries: VecDeque<TestEntry>,
}

impl PanickingSource {
    pub fn new(entries: Vec<TestEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }
}

#[async_trait]
impl AsyncLogSource for PanickingSource {
    type Entry = TestEntry;
    type Error = Infallible;

    async fn pop_async(&mut self) -> Result<Option<TestEntry>, Infallible> {
        match self.entries.pop_front() {
            Some(entry) => Ok(Some(entry)),
            None => panic!("source blew up"),
        }
    }
}
