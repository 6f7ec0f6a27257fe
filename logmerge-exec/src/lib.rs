// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
mod logging;
pub mod config;
mod scheduler;
mod shared_frontier;
pub mod sorted_merge_async;

// Re-export commonly used types
pub use config::{MergeConfig, DEFAULT_BATCH_SIZE, DEFAULT_MAX_CONCURRENT_FETCHES};
pub use sorted_merge_async::{merge_sorted_async, SortedMergeAsyncExt};
