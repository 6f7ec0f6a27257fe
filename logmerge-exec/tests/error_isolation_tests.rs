// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use logmerge_core::{AsyncLogSource, MergeError, SourceId};
use logmerge_exec::{merge_sorted_async, MergeConfig};
use logmerge_test_utils::test_data::{entry, TestEntry};
use logmerge_test_utils::{
    assert_done_once, payloads, ErrorLog, FailingSource, FlakySource, PanickingSource,
    RecordingSink, TestError, VecSource,
};
use std::convert::Infallible;

type FallibleSource = Box<dyn AsyncLogSource<Entry = TestEntry, Error = TestError>>;
type InfallibleSource = Box<dyn AsyncLogSource<Entry = TestEntry, Error = Infallible>>;

#[tokio::test]
async fn test_failing_source_is_isolated() -> anyhow::Result<()> {
    // Arrange
    let failing = FailingSource::new();
    let failing_pops = failing.counter();
    let sources: Vec<FallibleSource> = vec![
        Box::new(failing),
        Box::new(FlakySource::new(vec![Ok(entry(1, "B"))])),
    ];
    let log = ErrorLog::new();
    let mut sink = RecordingSink::new();

    // Act
    let summary = merge_sorted_async(
        sources,
        &mut sink,
        MergeConfig::default(),
        Some(log.callback()),
    )
    .await?;

    // Assert
    assert_eq!(payloads(sink.printed()), vec!["B"]);
    assert_done_once(&sink);
    assert_eq!(log.source_ids(), vec![SourceId::new(0)]);
    assert!(log.messages()[0].contains("source unavailable"));
    assert_eq!(failing_pops.get(), 1);
    assert_eq!(summary.abandoned, 1);
    assert_eq!(summary.failed_fetches, 1);
    assert_eq!(summary.exhausted, 1);
    assert!(!summary.is_complete());
    Ok(())
}

#[tokio::test]
async fn test_all_failing_sources_still_signal_done() -> anyhow::Result<()> {
    // Arrange
    let sources = vec![FailingSource::new(), FailingSource::new(), FailingSource::new()];
    let log = ErrorLog::new();
    let mut sink = RecordingSink::new();

    // Act
    let summary = merge_sorted_async(
        sources,
        &mut sink,
        MergeConfig::default(),
        Some(log.callback()),
    )
    .await?;

    // Assert
    assert!(sink.printed().is_empty());
    assert_done_once(&sink);
    assert_eq!(log.len(), 3);
    let mut reported = log.source_ids();
    reported.sort();
    assert_eq!(
        reported,
        vec![SourceId::new(0), SourceId::new(1), SourceId::new(2)]
    );
    assert_eq!(summary.abandoned, 3);
    Ok(())
}

#[tokio::test]
async fn test_failure_with_entries_buffered_is_retried() -> anyhow::Result<()> {
    // Arrange
    let flaky = FlakySource::new(vec![
        Ok(entry(1, "a1")),
        Err(TestError::new("hiccup")),
        Ok(entry(3, "a3")),
    ]);
    let flaky_pops = flaky.counter();
    let sources = vec![flaky, FlakySource::new(vec![Ok(entry(2, "b2"))])];
    let log = ErrorLog::new();
    let mut sink = RecordingSink::new();

    // Act
    let summary = merge_sorted_async(
        sources,
        &mut sink,
        MergeConfig::default().with_batch_size(2),
        Some(log.callback()),
    )
    .await?;

    // Assert
    assert_eq!(payloads(sink.printed()), vec!["a1", "b2", "a3"]);
    assert_done_once(&sink);
    assert_eq!(log.len(), 1);
    assert!(log.messages()[0].contains("hiccup"));
    assert_eq!(flaky_pops.get(), 4);
    assert_eq!(summary.failed_fetches, 1);
    assert_eq!(summary.abandoned, 0);
    assert!(summary.is_complete());
    Ok(())
}

#[tokio::test]
async fn test_failure_with_nothing_buffered_abandons_source() -> anyhow::Result<()> {
    // Arrange
    let flaky = FlakySource::new(vec![
        Ok(entry(1, "a1")),
        Err(TestError::new("gone")),
        Ok(entry(5, "a5")),
    ]);
    let flaky_pops = flaky.counter();
    let sources = vec![flaky, FlakySource::new(vec![Ok(entry(2, "b2"))])];
    let log = ErrorLog::new();
    let mut sink = RecordingSink::new();

    // Act
    let summary = merge_sorted_async(
        sources,
        &mut sink,
        MergeConfig::default().with_batch_size(1),
        Some(log.callback()),
    )
    .await?;

    // Assert
    assert_eq!(payloads(sink.printed()), vec!["a1", "b2"]);
    assert_done_once(&sink);
    assert_eq!(log.source_ids(), vec![SourceId::new(0)]);
    assert_eq!(flaky_pops.get(), 2);
    assert_eq!(summary.abandoned, 1);
    Ok(())
}

#[tokio::test]
async fn test_panicking_source_is_isolated() -> anyhow::Result<()> {
    // Arrange
    let sources: Vec<InfallibleSource> = vec![
        Box::new(PanickingSource::new(vec![entry(1, "p1")])),
        Box::new(VecSource::new(vec![entry(2, "v2"), entry(4, "v4")])),
    ];
    let log = ErrorLog::new();
    let mut sink = RecordingSink::new();

    // Act
    let summary = merge_sorted_async(
        sources,
        &mut sink,
        MergeConfig::default(),
        Some(log.callback()),
    )
    .await?;

    // Assert
    assert_eq!(payloads(sink.printed()), vec!["p1", "v2", "v4"]);
    assert_done_once(&sink);
    assert_eq!(log.source_ids(), vec![SourceId::new(0)]);
    assert!(log.messages()[0].contains("source blew up"));
    assert_eq!(summary.abandoned, 1);
    assert_eq!(summary.failed_fetches, 1);
    Ok(())
}

#[tokio::test]
async fn test_failures_are_logged_without_callback() -> anyhow::Result<()> {
    // Arrange
    let sources: Vec<FallibleSource> = vec![
        Box::new(FailingSource::new()),
        Box::new(FlakySource::new(vec![Ok(entry(7, "kept"))])),
    ];
    let mut sink = RecordingSink::new();

    // Act
    let summary = merge_sorted_async(
        sources,
        &mut sink,
        MergeConfig::default(),
        None::<fn(MergeError)>,
    )
    .await?;

    // Assert
    assert_eq!(payloads(sink.printed()), vec!["kept"]);
    assert_done_once(&sink);
    assert_eq!(summary.abandoned, 1);
    Ok(())
}
