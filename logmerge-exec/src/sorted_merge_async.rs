// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Concurrent k-way merge over asynchronous sources.
//!
//! Sources are fetched in rounds of up to `batch_size` entries by background
//! tasks, at most `max_concurrent_fetches` at a time. The drain loop only
//! emits while every live source has at least one entry buffered, so output
//! order never depends on which fetch happened to answer first.

use crate::config::MergeConfig;
use crate::scheduler::{FetchScheduler, Reporter, RoundOutcome};
use crate::shared_frontier::{RoundEnd, Settled, SharedFrontier};
use async_trait::async_trait;
use logmerge_core::{AsyncLogSink, AsyncLogSource, MergeError, MergeSummary, Result, SourceId};
use std::sync::Arc;

/// Merges `sources` into `sink` in timestamp order, fetching concurrently.
///
/// A failing or panicking source is reported through `on_error` (or logged
/// when no callback is given) and the merge carries on with the others. A
/// source that fails with entries still buffered is retried on its next pop;
/// one that fails with nothing buffered is abandoned.
///
/// `sink.done()` is awaited exactly once on every path, before any error is
/// returned.
///
/// # Errors
///
/// * [`MergeError::InvalidConfig`] if `config` does not validate
/// * [`MergeError::TaskFailed`] if a fetch task could not be joined
/// * [`MergeError::InvalidState`] if the merge stopped with entries left over
///
/// # Example
///
/// ```
/// use logmerge_core::{IterSource, LogEntry, MergeError, LogSink};
/// use logmerge_exec::{merge_sorted_async, MergeConfig};
///
/// struct Lines(Vec<String>);
///
/// impl LogSink<LogEntry<u32, &'static str>> for Lines {
///     fn print(&mut self, entry: LogEntry<u32, &'static str>) {
///         self.0.push(entry.to_string());
///     }
///     fn done(&mut self) {}
/// }
///
/// # #[tokio::main]
/// # async fn main() -> logmerge_core::Result<()> {
/// let sources = vec![
///     IterSource::new(vec![LogEntry::new(1_u32, "a"), LogEntry::new(3, "c")]),
///     IterSource::new(vec![LogEntry::new(2_u32, "b")]),
/// ];
/// let mut sink = Lines(Vec::new());
///
/// let summary =
///     merge_sorted_async(sources, &mut sink, MergeConfig::default(), None::<fn(MergeError)>)
///         .await?;
///
/// assert_eq!(sink.0, vec!["1 a", "2 b", "3 c"]);
/// assert!(summary.is_complete());
/// # Ok(())
/// # }
/// ```
pub async fn merge_sorted_async<S, K, OnError>(
    sources: Vec<S>,
    sink: &mut K,
    config: MergeConfig,
    on_error: Option<OnError>,
) -> Result<MergeSummary>
where
    S: AsyncLogSource + 'static,
    S::Entry: 'static,
    K: AsyncLogSink<S::Entry> + ?Sized,
    OnError: Fn(MergeError) + Send + Sync + 'static,
{
    let result = match config.validate() {
        Ok(()) => {
            AsyncSortedMerge::new(sources, &config, reporter_from(on_error))
                .run(sink)
                .await
        }
        Err(error) => Err(error),
    };

    sink.done().await;

    match &result {
        Ok(summary) => crate::debug!(
            "Merged {} entries from {} sources ({} abandoned)",
            summary.emitted, summary.sources, summary.abandoned
        ),
        Err(top_level) => crate::error!("Error processing logs: {}", top_level),
    }
    result
}

fn reporter_from<OnError>(on_error: Option<OnError>) -> Reporter
where
    OnError: Fn(MergeError) + Send + Sync + 'static,
{
    match on_error {
        Some(callback) => Arc::new(callback),
        None => Arc::new(|failure: MergeError| match &failure {
            MergeError::SourceFetch { source_id, error } => {
                crate::error!("Error fetching log entry from source {}: {}", source_id, error);
            }
            other => crate::error!("{}", other),
        }),
    }
}

struct AsyncSortedMerge<S: AsyncLogSource> {
    // `None` while the source is out in a fetch round or after it finished
    sources: Vec<Option<S>>,
    shared: Arc<SharedFrontier<S::Entry>>,
    scheduler: FetchScheduler<S>,
    summary: MergeSummary,
}

impl<S> AsyncSortedMerge<S>
where
    S: AsyncLogSource + 'static,
    S::Entry: 'static,
{
    fn new(sources: Vec<S>, config: &MergeConfig, reporter: Reporter) -> Self {
        let shared = Arc::new(SharedFrontier::new(sources.len(), config.batch_size()));
        let scheduler = FetchScheduler::new(config, Arc::clone(&shared), reporter);

        Self {
            summary: MergeSummary::new(sources.len()),
            sources: sources.into_iter().map(Some).collect(),
            shared,
            scheduler,
        }
    }

    async fn run<K>(mut self, sink: &mut K) -> Result<MergeSummary>
    where
        K: AsyncLogSink<S::Entry> + ?Sized,
    {
        self.seed().await?;
        self.drain(sink).await?;
        Ok(self.summary)
    }

    async fn seed(&mut self) -> Result<()> {
        for index in 0..self.sources.len() {
            self.rearm(SourceId::new(index));
        }
        crate::debug!("Seeding {} sources", self.scheduler.in_flight());

        while let Some(outcome) = self.scheduler.next_completed().await {
            self.settle(outcome?);
        }
        Ok(())
    }

    async fn drain<K>(&mut self, sink: &mut K) -> Result<()>
    where
        K: AsyncLogSink<S::Entry> + ?Sized,
    {
        loop {
            if let Some(item) = self.shared.try_pop() {
                let (entry, source_id) = item.into_parts();
                sink.print(entry).await;
                self.summary.emitted += 1;
                self.rearm(source_id);
                continue;
            }

            if self.scheduler.is_idle() {
                break;
            }

            let completed = tokio::select! {
                () = self.shared.arrival() => None,
                completed = self.scheduler.next_completed() => completed,
            };
            if let Some(outcome) = completed {
                self.settle(outcome?);
            }
        }

        if self.shared.is_empty() {
            Ok(())
        } else {
            Err(MergeError::invalid_state(format!(
                "{} entries left in the frontier with no fetch in flight",
                self.shared.len()
            )))
        }
    }

    /// Starts a round for the source if it is idle.
    fn rearm(&mut self, source_id: SourceId) {
        let Some(slot) = self.sources.get_mut(source_id.index()) else {
            return;
        };
        if slot.is_none() || !self.shared.begin_round(source_id) {
            return;
        }
        if let Some(source) = slot.take() {
            self.scheduler.spawn_round(source_id, source);
        }
    }

    fn settle(&mut self, outcome: RoundOutcome<S>) {
        let RoundOutcome {
            source_id,
            source,
            end,
        } = outcome;

        if matches!(end, RoundEnd::Failed | RoundEnd::Panicked) {
            self.summary.failed_fetches += 1;
        }

        match self.shared.settle(source_id, end) {
            Settled::Rearm => {
                self.sources[source_id.index()] = source;
                self.rearm(source_id);
            }
            Settled::Idle => self.sources[source_id.index()] = source,
            Settled::Exhausted => self.summary.exhausted += 1,
            Settled::Abandoned => {
                self.summary.abandoned += 1;
                crate::warn!("Abandoning source {} with nothing left buffered", source_id);
            }
        }
    }
}

/// Extension trait running the concurrent merge straight off a `Vec` of sources.
#[async_trait]
pub trait SortedMergeAsyncExt: Sized {
    type Entry: Send + 'static;

    /// See [`merge_sorted_async`].
    async fn sorted_merge_async<K, OnError>(
        self,
        sink: &mut K,
        config: MergeConfig,
        on_error: Option<OnError>,
    ) -> Result<MergeSummary>
    where
        K: AsyncLogSink<Self::Entry> + ?Sized,
        OnError: Fn(MergeError) + Send + Sync + 'static;
}

#[async_trait]
impl<S> SortedMergeAsyncExt for Vec<S>
where
    S: AsyncLogSource + 'static,
    S::Entry: 'static,
{
    type Entry = S::Entry;

    async fn sorted_merge_async<K, OnError>(
        self,
        sink: &mut K,
        config: MergeConfig,
        on_error: Option<OnError>,
    ) -> Result<MergeSummary>
    where
        K: AsyncLogSink<Self::Entry> + ?Sized,
        OnError: Fn(MergeError) + Send + Sync + 'static,
    {
        merge_sorted_async(self, sink, config, on_error).await
    }
}
