// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # logmerge
//!
//! Merges any number of individually time-ordered log sources into one
//! time-ordered output.
//!
//! ## Overview
//!
//! Two drivers share the same ordering rule: entries come out by timestamp, and
//! entries with equal timestamps come out by ascending source index.
//!
//! - [`merge_sorted`] pulls one entry at a time from synchronous sources and
//!   stops at the first failure.
//! - [`merge_sorted_async`] prefetches from asynchronous sources in small
//!   batches, with a per-merge ceiling on concurrent fetches. A failing source
//!   is reported and dropped while the others carry on.
//!
//! Either way the sink's `done` is called exactly once, whether the merge
//! succeeds or not.
//!
//! ## Quick Start
//!
//! ```rust
//! use logmerge::prelude::*;
//!
//! struct Stdout;
//!
//! impl LogSink<LogEntry<u64, &'static str>> for Stdout {
//!     fn print(&mut self, entry: LogEntry<u64, &'static str>) {
//!         println!("{entry}");
//!     }
//!     fn done(&mut self) {
//!         println!("-- end of logs --");
//!     }
//! }
//!
//! let sources = vec![
//!     IterSource::new(vec![LogEntry::new(10_u64, "db: ready"), LogEntry::new(30, "db: query")]),
//!     IterSource::new(vec![LogEntry::new(20_u64, "web: listening")]),
//! ];
//!
//! let summary = sources.sorted_merge(&mut Stdout)?;
//! assert_eq!(summary.emitted, 3);
//! # Ok::<(), MergeError>(())
//! ```

// Re-export core types
pub use logmerge_core::{
    AsyncLogSink, AsyncLogSource, HasTimestamp, IterSource, LogEntry, LogSink, LogSource,
    MergeError, MergeSummary, Result, SourceId, StreamSource,
};

// Re-export both drivers
pub use logmerge_exec::{
    merge_sorted_async, MergeConfig, SortedMergeAsyncExt, DEFAULT_BATCH_SIZE,
    DEFAULT_MAX_CONCURRENT_FETCHES,
};
pub use logmerge_ordered_merge::{merge_sorted, Frontier, FrontierItem, SortedMergeExt};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        merge_sorted, merge_sorted_async, AsyncLogSink, AsyncLogSource, IterSource, LogEntry,
        LogSink, LogSource, MergeConfig, MergeError, MergeSummary, SortedMergeAsyncExt,
        SortedMergeExt, SourceId,
    };
}
