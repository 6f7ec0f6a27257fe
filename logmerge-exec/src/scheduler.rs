// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::MergeConfig;
use crate::shared_frontier::{RoundEnd, SharedFrontier};
use futures::FutureExt;
use logmerge_core::{AsyncLogSource, MergeError, Result, SourceId};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Receives every isolated failure of one merge.
pub(crate) type Reporter = Arc<dyn Fn(MergeError) + Send + Sync>;

/// A finished fetch round. The source travels back to the driver unless the
/// round panicked.
pub(crate) struct RoundOutcome<S> {
    pub(crate) source_id: SourceId,
    pub(crate) source: Option<S>,
    pub(crate) end: RoundEnd,
}

/// Runs fetch rounds as background tasks under one merge's permit pool.
pub(crate) struct FetchScheduler<S: AsyncLogSource> {
    permits: Arc<Semaphore>,
    shared: Arc<SharedFrontier<S::Entry>>,
    reporter: Reporter,
    pending: JoinSet<RoundOutcome<S>>,
}

impl<S> FetchScheduler<S>
where
    S: AsyncLogSource + 'static,
    S::Entry: 'static,
{
    pub(crate) fn new(
        config: &MergeConfig,
        shared: Arc<SharedFrontier<S::Entry>>,
        reporter: Reporter,
    ) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(config.max_concurrent_fetches())),
            shared,
            reporter,
            pending: JoinSet::new(),
        }
    }

    /// Spawns one round for `source`. The caller must have moved the source's
    /// slot to fetching first.
    pub(crate) fn spawn_round(&mut self, source_id: SourceId, source: S) {
        self.pending.spawn(fetch_round(
            Arc::clone(&self.permits),
            Arc::clone(&self.shared),
            Arc::clone(&self.reporter),
            source_id,
            source,
        ));
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Waits for the next round to finish. `None` once nothing is in flight.
    pub(crate) async fn next_completed(&mut self) -> Option<Result<RoundOutcome<S>>> {
        let joined = self.pending.join_next().await?;
        Some(joined.map_err(|join_error| MergeError::task_failed(join_error.to_string())))
    }
}

async fn fetch_round<S>(
    permits: Arc<Semaphore>,
    shared: Arc<SharedFrontier<S::Entry>>,
    reporter: Reporter,
    source_id: SourceId,
    mut source: S,
) -> RoundOutcome<S>
where
    S: AsyncLogSource,
{
    let Ok(_permit) = permits.acquire_owned().await else {
        reporter(MergeError::invalid_state("fetch permit pool was closed"));
        return RoundOutcome {
            source_id,
            source: Some(source),
            end: RoundEnd::Failed,
        };
    };

    // Measured after the permit: pops may have freed room while we waited
    let room = shared.room(source_id);
    let pulled = AssertUnwindSafe(pull(&mut source, &shared, &reporter, source_id, room))
        .catch_unwind()
        .await;

    match pulled {
        Ok(end) => RoundOutcome {
            source_id,
            source: Some(source),
            end,
        },
        Err(payload) => {
            reporter(MergeError::source_panic(
                source_id,
                panic_message(payload.as_ref()),
            ));
            RoundOutcome {
                source_id,
                source: None,
                end: RoundEnd::Panicked,
            }
        }
    }
}

async fn pull<S: AsyncLogSource>(
    source: &mut S,
    shared: &SharedFrontier<S::Entry>,
    reporter: &Reporter,
    source_id: SourceId,
    room: usize,
) -> RoundEnd {
    for _ in 0..room {
        match source.pop_async().await {
            Ok(Some(entry)) => shared.insert(entry, source_id),
            Ok(None) => return RoundEnd::Exhausted,
            Err(error) => {
                reporter(MergeError::source_fetch(source_id, error));
                return RoundEnd::Failed;
            }
        }
    }
    RoundEnd::Filled
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "fetch panicked with a non-string payload".to_string()
    }
}
