// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use logmerge_core::{HasTimestamp, SourceId};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A pending entry together with the source that produced it.
///
/// Items order by `(timestamp, source_id, seq)`, where `seq` is the insertion
/// counter of the owning [`Frontier`]. Equal timestamps therefore come out by
/// ascending source id, and equal timestamps within one source keep their
/// arrival order.
#[derive(Debug, Clone)]
pub struct FrontierItem<T> {
    pub entry: T,
    pub source_id: SourceId,
    seq: u64,
}

impl<T: HasTimestamp> FrontierItem<T> {
    fn key(&self) -> (T::Timestamp, SourceId, u64) {
        (self.entry.timestamp(), self.source_id, self.seq)
    }

    /// Splits the item back into the entry and its source.
    pub fn into_parts(self) -> (T, SourceId) {
        (self.entry, self.source_id)
    }
}

impl<T: HasTimestamp> PartialEq for FrontierItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T: HasTimestamp> Eq for FrontierItem<T> {}

impl<T: HasTimestamp> PartialOrd for FrontierItem<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: HasTimestamp> Ord for FrontierItem<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Min-priority queue of the next not-yet-emitted entries of every source.
///
/// `push` and `pop_min` are both O(log n). The structure itself does not
/// restrict how many items a source has queued; the synchronous driver keeps
/// at most one per source, the concurrent driver up to its batch size.
#[derive(Debug)]
pub struct Frontier<T> {
    heap: BinaryHeap<Reverse<FrontierItem<T>>>,
    next_seq: u64,
}

impl<T: HasTimestamp> Frontier<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, entry: T, source_id: SourceId) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(FrontierItem {
            entry,
            source_id,
            seq,
        }));
    }

    /// Removes and returns the globally smallest item.
    pub fn pop_min(&mut self) -> Option<FrontierItem<T>> {
        self.heap.pop().map(|Reverse(item)| item)
    }

    #[must_use]
    pub fn peek_min(&self) -> Option<&FrontierItem<T>> {
        self.heap.peek().map(|Reverse(item)| item)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T: HasTimestamp> Default for Frontier<T> {
    fn default() -> Self {
        Self::new()
    }
}
