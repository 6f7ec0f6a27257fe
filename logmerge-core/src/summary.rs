// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Counters reported by a merge that ran to completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Number of sources handed to the driver
    pub sources: usize,
    /// Entries delivered to the sink
    pub emitted: usize,
    /// Sources that reached end-of-stream
    pub exhausted: usize,
    /// Sources dropped after a failed fetch left them with nothing buffered
    pub abandoned: usize,
    /// Fetch rounds that ended in an error or a panic
    pub failed_fetches: usize,
}

impl MergeSummary {
    #[must_use]
    pub const fn new(sources: usize) -> Self {
        Self {
            sources,
            emitted: 0,
            exhausted: 0,
            abandoned: 0,
            failed_fetches: 0,
        }
    }

    /// True when every source was read to its end.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.abandoned == 0 && self.exhausted == self.sources
    }
}
