// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use logmerge_core::{AsyncLogSink, LogSink};
use logmerge_test_utils::test_data::{entry, TestEntry};
use logmerge_test_utils::{assert_done_once, assert_sorted, payloads, RecordingSink, SlowSink};
use std::time::Duration;

#[test]
fn test_recording_sink_tracks_prints_and_done() {
    // Arrange
    let mut sink = RecordingSink::new();

    // Act
    LogSink::print(&mut sink, entry(1, "a"));
    LogSink::print(&mut sink, entry(2, "b"));
    LogSink::done(&mut sink);

    // Assert
    assert_eq!(payloads(sink.printed()), vec!["a", "b"]);
    assert_sorted(sink.printed());
    assert_done_once(&sink);
}

#[test]
fn test_recording_sink_flags_print_after_done() {
    // Arrange
    let mut sink = RecordingSink::new();

    // Act
    LogSink::done(&mut sink);
    LogSink::print(&mut sink, entry(1, "late"));

    // Assert
    assert_eq!(sink.printed_after_done(), 1);
}

#[test]
#[should_panic(expected = "out of order")]
fn test_assert_sorted_rejects_descending() {
    assert_sorted(&[entry(2, "b"), entry(1, "a")]);
}

#[tokio::test(start_paused = true)]
async fn test_slow_sink_records_in_order() {
    // Arrange
    let mut sink = SlowSink::new(Duration::from_millis(5));

    // Act
    sink.print(entry(1, "a")).await;
    sink.print(entry(1, "b")).await;
    sink.done().await;

    // Assert
    assert_eq!(payloads(sink.recorded().printed()), vec!["a", "b"]);
    assert_done_once(sink.recorded());
}

async fn replay<K>(sink: &mut K, entries: Vec<TestEntry>)
where
    K: AsyncLogSink<TestEntry> + ?Sized,
{
    for e in entries {
        sink.print(e).await;
    }
    sink.done().await;
}

#[tokio::test(start_paused = true)]
async fn test_sync_and_slow_sinks_share_async_interface() {
    // Arrange
    let mut recording = RecordingSink::new();
    let mut slow = SlowSink::new(Duration::from_millis(3));

    // Act
    replay(&mut recording, vec![entry(1, "a"), entry(2, "b")]).await;
    replay(&mut slow, vec![entry(1, "a"), entry(2, "b")]).await;

    // Assert
    assert_eq!(payloads(recording.printed()), vec!["a", "b"]);
    assert_eq!(payloads(slow.recorded().printed()), vec!["a", "b"]);
    assert_done_once(&recording);
    assert_done_once(slow.recorded());
}

#[tokio::test(start_paused = true)]
async fn test_sinks_usable_as_trait_objects() {
    // Arrange
    let mut sinks: Vec<Box<dyn AsyncLogSink<TestEntry>>> = vec![
        Box::new(RecordingSink::<TestEntry>::new()),
        Box::new(SlowSink::new(Duration::from_millis(1))),
    ];

    // Act
    for sink in &mut sinks {
        replay(sink.as_mut(), vec![entry(7, "x")]).await;
    }

    // Assert
    assert_eq!(sinks.len(), 2);
}
