// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core vocabulary shared by the logmerge drivers.
//!
//! The engine never looks inside an entry beyond its timestamp, so everything
//! here is expressed in terms of a handful of small traits:
//!
//! - [`HasTimestamp`] for anything that can be ordered in time
//! - [`LogSource`] / [`AsyncLogSource`] for the inputs
//! - [`LogSink`] / [`AsyncLogSink`] for the single ordered output
//!
//! plus the shared [`MergeError`] type and the [`MergeSummary`] reported by both drivers.

pub mod error;
pub mod has_timestamp;
pub mod log_entry;
pub mod sink;
pub mod source;
pub mod source_id;
pub mod summary;

pub use self::error::{MergeError, Result};
pub use self::has_timestamp::HasTimestamp;
pub use self::log_entry::LogEntry;
pub use self::sink::{AsyncLogSink, LogSink};
pub use self::source::{AsyncLogSource, IterSource, LogSource, StreamSource};
pub use self::source_id::SourceId;
pub use self::summary::MergeSummary;
