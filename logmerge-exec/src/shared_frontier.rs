// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Frontier shared between the drain loop and the fetch rounds.
//!
//! Next to the heap it keeps, per source, how many entries are buffered and
//! where the source stands in its fetch lifecycle. A source is *starved* while
//! it is live and has nothing buffered: its next entry may still be smaller
//! than everything in the heap, so popping must wait for it.

use logmerge_core::{HasTimestamp, SourceId};
use logmerge_ordered_merge::{Frontier, FrontierItem};
use parking_lot::Mutex;
use tokio::sync::futures::Notified;
use tokio::sync::Notify;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Fetching,
    Exhausted,
    Abandoned,
}

impl Phase {
    const fn is_terminal(self) -> bool {
        matches!(self, Self::Exhausted | Self::Abandoned)
    }
}

#[derive(Debug)]
struct Slot {
    buffered: usize,
    phase: Phase,
}

/// How a fetch round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RoundEnd {
    /// Pulled as many entries as there was room for.
    Filled,
    Exhausted,
    Failed,
    Panicked,
}

/// What the driver does with a source once its round is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Settled {
    /// Buffer still has room: start another round right away.
    Rearm,
    /// Wait for the next pop of this source.
    Idle,
    Exhausted,
    Abandoned,
}

struct State<T> {
    frontier: Frontier<T>,
    slots: Vec<Slot>,
    starved: usize,
}

pub(crate) struct SharedFrontier<T> {
    state: Mutex<State<T>>,
    arrivals: Notify,
    batch_size: usize,
}

impl<T: HasTimestamp> SharedFrontier<T> {
    /// Every source starts idle and starved.
    pub(crate) fn new(source_count: usize, batch_size: usize) -> Self {
        let slots = (0..source_count)
            .map(|_| Slot {
                buffered: 0,
                phase: Phase::Idle,
            })
            .collect();

        Self {
            state: Mutex::new(State {
                frontier: Frontier::with_capacity(source_count),
                slots,
                starved: source_count,
            }),
            arrivals: Notify::new(),
            batch_size,
        }
    }

    /// Entries the source may pull this round, never less than one.
    pub(crate) fn room(&self, source_id: SourceId) -> usize {
        let state = self.state.lock();
        self.batch_size
            .saturating_sub(state.slots[source_id.index()].buffered)
            .max(1)
    }

    pub(crate) fn insert(&self, entry: T, source_id: SourceId) {
        {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            state.frontier.push(entry, source_id);

            let slot = &mut state.slots[source_id.index()];
            slot.buffered += 1;
            if slot.buffered == 1 && !slot.phase.is_terminal() {
                state.starved -= 1;
            }
        }
        self.arrivals.notify_one();
    }

    /// Removes the smallest entry, or `None` while any live source is starved.
    pub(crate) fn try_pop(&self) -> Option<FrontierItem<T>> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        if state.starved > 0 {
            return None;
        }

        let item = state.frontier.pop_min()?;
        let slot = &mut state.slots[item.source_id.index()];
        slot.buffered -= 1;
        if slot.buffered == 0 && !slot.phase.is_terminal() {
            state.starved += 1;
        }
        Some(item)
    }

    /// Moves an idle source to fetching. `false` if a round is already in
    /// flight or the source is finished.
    pub(crate) fn begin_round(&self, source_id: SourceId) -> bool {
        let mut state = self.state.lock();
        let slot = &mut state.slots[source_id.index()];
        if slot.phase == Phase::Idle {
            slot.phase = Phase::Fetching;
            true
        } else {
            false
        }
    }

    pub(crate) fn settle(&self, source_id: SourceId, end: RoundEnd) -> Settled {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let slot = &mut state.slots[source_id.index()];

        let settled = match end {
            RoundEnd::Filled if slot.buffered < self.batch_size => Settled::Rearm,
            RoundEnd::Filled => Settled::Idle,
            RoundEnd::Failed if slot.buffered > 0 => Settled::Idle,
            RoundEnd::Failed | RoundEnd::Panicked => Settled::Abandoned,
            RoundEnd::Exhausted => Settled::Exhausted,
        };

        slot.phase = match settled {
            Settled::Rearm | Settled::Idle => Phase::Idle,
            Settled::Exhausted => Phase::Exhausted,
            Settled::Abandoned => Phase::Abandoned,
        };
        // A finished source with nothing left no longer holds back emission
        if slot.phase.is_terminal() && slot.buffered == 0 {
            state.starved -= 1;
        }
        settled
    }

    /// Resolves on the next insert, or at once if one happened unobserved.
    pub(crate) fn arrival(&self) -> Notified<'_> {
        self.arrivals.notified()
    }

    pub(crate) fn len(&self) -> usize {
        self.state.lock().frontier.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.state.lock().frontier.is_empty()
    }
}
