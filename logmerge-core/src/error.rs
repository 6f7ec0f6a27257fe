// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the logmerge drivers
//!
//! Both drivers report failures through a single [`MergeError`] type. Whether a
//! failure aborts the merge depends on the driver: the synchronous driver
//! propagates the first source failure, the concurrent driver isolates it and
//! hands it to the caller's error callback.
//!
//! # Examples
//!
//! ```
//! use logmerge_core::{MergeError, Result, SourceId};
//!
//! fn fetch() -> Result<()> {
//!     let cause = std::io::Error::other("connection reset");
//!     Err(MergeError::source_fetch(SourceId::new(3), cause))
//! }
//!
//! let err = fetch().unwrap_err();
//! assert_eq!(err.source_id(), Some(SourceId::new(3)));
//! ```

use crate::SourceId;

/// Root error type for all merge operations
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// A source failed to produce its next entry
    #[error("Failed to fetch from source {source_id}: {error}")]
    SourceFetch {
        /// The source whose fetch failed
        source_id: SourceId,
        /// The error returned by the source
        #[source]
        error: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A source panicked while being fetched from
    ///
    /// The panic is caught at the fetch-round boundary; the source itself is
    /// lost and never queried again.
    #[error("Source {source_id} panicked while fetching: {context}")]
    SourcePanic {
        /// The source that panicked
        source_id: SourceId,
        /// Panic payload, when it was a string
        context: String,
    },

    /// The merge configuration cannot be run
    #[error("Invalid merge configuration: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration
        message: String,
    },

    /// A background fetch task could not be joined
    #[error("Fetch task failed: {context}")]
    TaskFailed {
        /// Details from the runtime
        context: String,
    },

    /// Driver bookkeeping went out of sync with the frontier
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Description of the invalid state
        message: String,
    },
}

impl MergeError {
    /// Wrap an error returned by a source
    pub fn source_fetch(
        source_id: SourceId,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::SourceFetch {
            source_id,
            error: Box::new(error),
        }
    }

    /// Create a source panic error with the given context
    pub fn source_panic(source_id: SourceId, context: impl Into<String>) -> Self {
        Self::SourcePanic {
            source_id,
            context: context.into(),
        }
    }

    /// Create an invalid configuration error with the given message
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a task failure error with the given context
    pub fn task_failed(context: impl Into<String>) -> Self {
        Self::TaskFailed {
            context: context.into(),
        }
    }

    /// Create an invalid state error with the given message
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// The source this error is attributed to, if any
    #[must_use]
    pub const fn source_id(&self) -> Option<SourceId> {
        match self {
            Self::SourceFetch { source_id, .. } | Self::SourcePanic { source_id, .. } => {
                Some(*source_id)
            }
            _ => None,
        }
    }

    /// Check if the concurrent driver confines this error to a single source
    ///
    /// Isolated errors are reported and the merge carries on; every other
    /// variant ends the merge.
    #[must_use]
    pub const fn is_isolated(&self) -> bool {
        matches!(self, Self::SourceFetch { .. } | Self::SourcePanic { .. })
    }
}

/// Specialized Result type for merge operations
pub type Result<T> = std::result::Result<T, MergeError>;
