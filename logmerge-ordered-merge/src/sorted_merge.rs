// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Frontier;
use logmerge_core::{LogSink, LogSource, MergeError, MergeSummary, Result, SourceId};

/// Merges synchronous sources into `sink` in global timestamp order.
///
/// Each source contributes one pending entry to a [`Frontier`]; the smallest is
/// printed and replaced by the next entry of the same source until every source
/// is exhausted. Timestamp ties go to the lower source id.
///
/// `sink.done()` is called exactly once, whether the merge succeeds or not.
///
/// # Errors
///
/// The first failing `pop` aborts the merge with
/// [`MergeError::SourceFetch`] naming the source. Entries printed before the
/// failure stay printed.
///
/// # Examples
///
/// ```
/// use logmerge_core::{IterSource, LogEntry, LogSink};
/// use logmerge_ordered_merge::merge_sorted;
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
/// let sources = vec![
///     IterSource::new(vec![LogEntry::new(1_u32, "L1"), LogEntry::new(3, "L3")]),
///     IterSource::new(vec![LogEntry::new(2_u32, "L2")]),
/// ];
/// let mut lines = Lines(Vec::new());
///
/// let summary = merge_sorted(sources, &mut lines).unwrap();
/// assert_eq!(lines.0, vec!["1 L1", "2 L2", "3 L3"]);
/// assert_eq!(summary.emitted, 3);
/// ```
pub fn merge_sorted<S, K>(sources: Vec<S>, sink: &mut K) -> Result<MergeSummary>
where
    S: LogSource,
    K: LogSink<S::Entry> + ?Sized,
{
    let result = drain(sources, sink);
    sink.done();
    result
}

fn drain<S, K>(mut sources: Vec<S>, sink: &mut K) -> Result<MergeSummary>
where
    S: LogSource,
    K: LogSink<S::Entry> + ?Sized,
{
    let mut summary = MergeSummary::new(sources.len());
    let mut frontier = Frontier::with_capacity(sources.len());

    for (index, source) in sources.iter_mut().enumerate() {
        let source_id = SourceId::new(index);
        match fetch(source, source_id)? {
            Some(entry) => frontier.push(entry, source_id),
            None => summary.exhausted += 1,
        }
    }

    while let Some(item) = frontier.pop_min() {
        let (entry, source_id) = item.into_parts();
        sink.print(entry);
        summary.emitted += 1;

        match fetch(&mut sources[source_id.index()], source_id)? {
            Some(next) => frontier.push(next, source_id),
            None => summary.exhausted += 1,
        }
    }

    Ok(summary)
}

fn fetch<S: LogSource>(source: &mut S, source_id: SourceId) -> Result<Option<S::Entry>> {
    source
        .pop()
        .map_err(|error| MergeError::source_fetch(source_id, error))
}

/// Extension trait for merging a vector of synchronous sources.
pub trait SortedMergeExt {
    type Entry;

    /// Merges the sources into `sink`, see [`merge_sorted`].
    ///
    /// # Errors
    ///
    /// Returns the first source failure, after `sink.done()` has been called.
    fn sorted_merge<K>(self, sink: &mut K) -> Result<MergeSummary>
    where
        K: LogSink<Self::Entry> + ?Sized;
}

impl<S: LogSource> SortedMergeExt for Vec<S> {
    type Entry = S::Entry;

    fn sorted_merge<K>(self, sink: &mut K) -> Result<MergeSummary>
    where
        K: LogSink<Self::Entry> + ?Sized,
    {
        merge_sorted(self, sink)
    }
}
