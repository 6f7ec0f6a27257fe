// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use logmerge_core::{AsyncLogSource, LogSource};
use logmerge_test_utils::test_data::{entries, entry};
use logmerge_test_utils::{ConcurrencyProbe, DelayedSource, FailingSource, VecSource};
use std::time::Duration;

#[test]
fn test_vec_source_counts_pops_past_the_end() -> anyhow::Result<()> {
    // Arrange
    let mut source = VecSource::new(entries("L", &[1, 2]));
    let counter = source.counter();

    // Act
    let first = source.pop()?;
    let second = source.pop()?;
    let end = source.pop()?;
    let again = source.pop()?;

    // Assert
    assert_eq!(first, Some(entry(1, "L1")));
    assert_eq!(second, Some(entry(2, "L2")));
    assert!(end.is_none() && again.is_none());
    assert_eq!(counter.get(), 4);
    Ok(())
}

#[tokio::test]
async fn test_failing_source_always_errors() {
    // Arrange
    let mut source = FailingSource::new();

    // Act
    let first = source.pop_async().await;
    let second = source.pop_async().await;

    // Assert
    assert!(first.is_err() && second.is_err());
    assert_eq!(source.counter().get(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_delayed_source_reports_to_probe() -> anyhow::Result<()> {
    // Arrange
    let probe = ConcurrencyProbe::new();
    let mut left = DelayedSource::uniform(vec![entry(1, "a")], Duration::from_millis(20))
        .with_probe(probe.clone());
    let mut right = DelayedSource::uniform(vec![entry(2, "b")], Duration::from_millis(20))
        .with_probe(probe.clone());

    // Act
    let (a, b) = tokio::join!(left.pop_async(), right.pop_async());

    // Assert
    assert_eq!(a?, Some(entry(1, "a")));
    assert_eq!(b?, Some(entry(2, "b")));
    assert_eq!(probe.peak(), 2);
    assert_eq!(probe.current(), 0);
    assert_eq!(probe.total(), 2);
    Ok(())
}
