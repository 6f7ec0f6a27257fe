// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::concurrency_probe::ConcurrencyProbe;
use crate::test_data::TestEntry;
use async_trait::async_trait;
use logmerge_core::{AsyncLogSource, LogSource};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Shared handle to the number of times a source was asked for an entry.
///
/// Stays readable after the source itself has been moved into a driver.
#[derive(Debug, Clone, Default)]
pub struct PopCounter(Arc<AtomicUsize>);

impl PopCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    pub(crate) fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Replays a fixed list of entries, then reports end-of-stream forever.
///
/// Every call is counted, including the ones after the end, so tests can check
/// that an exhausted source is left alone.
#[derive(Debug)]
pub struct VecSource {
    entries: VecDeque<TestEntry>,
    counter: PopCounter,
}

impl VecSource {
    pub fn new(entries: Vec<TestEntry>) -> Self {
        Self {
            entries: entries.into(),
            counter: PopCounter::default(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn pops(&self) -> usize {
        self.counter.get()
    }

    pub fn counter(&self) -> PopCounter {
        self.counter.clone()
    }

    /// One source per inner vector.
    pub fn many(all: Vec<Vec<TestEntry>>) -> Vec<Self> {
        all.into_iter().map(Self::new).collect()
    }

    fn next_entry(&mut self) -> Option<TestEntry> {
        self.counter.bump();
        self.entries.pop_front()
    }
}

impl LogSource for VecSource {
    type Entry = TestEntry;
    type Error = Infallible;

    fn pop(&mut self) -> Result<Option<TestEntry>, Infallible> {
        Ok(self.next_entry())
    }
}

#[async_trait]
impl AsyncLogSource for VecSource {
    type Entry = TestEntry;
    type Error = Infallible;

    async fn pop_async(&mut self) -> Result<Option<TestEntry>, Infallible> {
        Ok(self.next_entry())
    }
}

/// An async source that sleeps before each answer.
///
/// With a [`ConcurrencyProbe`] attached, every `pop_async` is registered as
/// in flight for the duration of its sleep.
#[derive(Debug)]
pub struct DelayedSource {
    entries: VecDeque<(Duration, TestEntry)>,
    end_delay: Duration,
    probe: Option<ConcurrencyProbe>,
    counter: PopCounter,
}

impl DelayedSource {
    /// All answers, including end-of-stream, take `delay`.
    pub fn uniform(entries: Vec<TestEntry>, delay: Duration) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (delay, e)).collect(),
            end_delay: delay,
            probe: None,
            counter: PopCounter::default(),
        }
    }

    /// Each entry with its own delay; end-of-stream answers immediately.
    pub fn scripted(entries: Vec<(Duration, TestEntry)>) -> Self {
        Self {
            entries: entries.into(),
            end_delay: Duration::ZERO,
            probe: None,
            counter: PopCounter::default(),
        }
    }

    #[must_use]
    pub fn with_probe(mut self, probe: ConcurrencyProbe) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn counter(&self) -> PopCounter {
        self.counter.clone()
    }
}

#[async_trait]
impl AsyncLogSource for DelayedSource {
    type Entry = TestEntry;
    type Error = Infallible;

    async fn pop_async(&mut self) -> Result<Option<TestEntry>, Infallible> {
        self.counter.bump();
        let _guard = self.probe.as_ref().map(ConcurrencyProbe::enter);

        match self.entries.pop_front() {
            Some((delay, entry)) => {
                sleep(delay).await;
                Ok(Some(entry))
            }
            None => {
                sleep(self.end_delay).await;
                Ok(None)
            }
        }
    }
}
