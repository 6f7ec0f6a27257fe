// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the logmerge drivers.
//!
//! This crate provides scripted sources, recording sinks, and assertion helpers
//! for testing the merge drivers. It is designed for use in development and
//! testing only, not for production code.
//!
//! # Key Types
//!
//! - [`VecSource`] - replays a fixed list of entries and counts every `pop`
//! - [`FlakySource`] / [`FailingSource`] / [`PanickingSource`] - inject failures
//! - [`DelayedSource`] - sleeps before answering, optionally reporting to a [`ConcurrencyProbe`]
//! - [`RecordingSink`] / [`SlowSink`] - remember what was printed and how often `done` fired
//! - [`ErrorLog`] - collects the diagnostics handed to an error callback
//!
//! # Examples
//!
//! ```rust
//! use logmerge_core::LogSource;
//! use logmerge_test_utils::test_data::entry;
//! use logmerge_test_utils::VecSource;
//!
//! let mut source = VecSource::new(vec![entry(1, "A")]);
//! assert_eq!(source.pop().unwrap(), Some(entry(1, "A")));
//! assert_eq!(source.pop().unwrap(), None);
//! assert_eq!(source.pops(), 2);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod concurrency_probe;
pub mod error_injection;
pub mod error_log;
pub mod helpers;
pub mod recording_sink;
pub mod sources;
pub mod test_data;

pub use concurrency_probe::ConcurrencyProbe;
pub use error_injection::{FailingSource, FlakySource, PanickingSource, TestError};
pub use error_log::ErrorLog;
pub use helpers::{assert_done_once, assert_sorted, payloads};
pub use recording_sink::{RecordingSink, SlowSink};
pub use sources::{DelayedSource, PopCounter, VecSource};
pub use test_data::{entry, TestEntry};
