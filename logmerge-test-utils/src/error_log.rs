// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use logmerge_core::{MergeError, SourceId};
use parking_lot::Mutex;
use std::sync::Arc;

/// Collects the errors handed to a driver's error callback.
///
/// ```rust
/// use logmerge_core::{MergeError, SourceId};
/// use logmerge_test_utils::ErrorLog;
///
/// let log = ErrorLog::new();
/// let callback = log.callback();
/// callback(MergeError::source_panic(SourceId::new(0), "boom"));
///
/// assert_eq!(log.source_ids(), vec![SourceId::new(0)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ErrorLog {
    reports: Arc<Mutex<Vec<(Option<SourceId>, String)>>>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback suitable for the concurrent driver's `on_error` argument.
    pub fn callback(&self) -> impl Fn(MergeError) + Clone + Send + Sync + 'static {
        let reports = self.reports.clone();
        move |error: MergeError| {
            reports.lock().push((error.source_id(), error.to_string()));
        }
    }

    pub fn len(&self) -> usize {
        self.reports.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.lock().is_empty()
    }

    pub fn source_ids(&self) -> Vec<SourceId> {
        self.reports
            .lock()
            .iter()
            .filter_map(|(source_id, _)| *source_id)
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.reports
            .lock()
            .iter()
            .map(|(_, message)| message.clone())
            .collect()
    }
}
