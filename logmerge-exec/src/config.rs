// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use logmerge_core::{MergeError, Result};
use tokio::sync::Semaphore;

/// Fetch rounds allowed in flight at once when not configured otherwise.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 50;

/// Entries prefetched per source per round when not configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 2;

/// Knobs of one concurrent merge.
///
/// Each merge builds its own permit pool from this value, so two merges running
/// side by side never share a ceiling.
///
/// ```
/// use logmerge_exec::MergeConfig;
///
/// let config = MergeConfig::default()
///     .with_max_concurrent_fetches(8)
///     .with_batch_size(16);
///
/// assert!(config.validate().is_ok());
/// assert!(MergeConfig::default().with_batch_size(0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeConfig {
    max_concurrent_fetches: usize,
    batch_size: usize,
}

impl MergeConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Caps the fetch rounds running at the same time across all sources.
    #[must_use]
    pub fn with_max_concurrent_fetches(mut self, max_concurrent_fetches: usize) -> Self {
        self.max_concurrent_fetches = max_concurrent_fetches;
        self
    }

    /// Caps how many entries of one source sit buffered in the frontier.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    #[must_use]
    pub const fn max_concurrent_fetches(&self) -> usize {
        self.max_concurrent_fetches
    }

    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// # Errors
    ///
    /// Returns [`MergeError::InvalidConfig`] when either limit is zero or the
    /// permit count exceeds what the runtime's semaphore supports.
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_fetches == 0 {
            return Err(MergeError::invalid_config(
                "max_concurrent_fetches must be at least 1",
            ));
        }
        if self.max_concurrent_fetches > Semaphore::MAX_PERMITS {
            return Err(MergeError::invalid_config(format!(
                "max_concurrent_fetches must not exceed {}",
                Semaphore::MAX_PERMITS
            )));
        }
        if self.batch_size == 0 {
            return Err(MergeError::invalid_config("batch_size must be at least 1"));
        }
        Ok(())
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self::new()
    }
}
