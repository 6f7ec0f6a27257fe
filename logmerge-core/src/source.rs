// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::HasTimestamp;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::convert::Infallible;

/// A source that hands out its entries without suspending.
///
/// `Ok(None)` marks the end of the stream; drivers never call `pop` again on a
/// source that returned it. Entries must come out in non-decreasing timestamp
/// order. This is not checked.
pub trait LogSource {
    type Entry: HasTimestamp;
    type Error: std::error::Error + Send + Sync + 'static;

    fn pop(&mut self) -> Result<Option<Self::Entry>, Self::Error>;
}

impl<S: LogSource + ?Sized> LogSource for Box<S> {
    type Entry = S::Entry;
    type Error = S::Error;

    fn pop(&mut self) -> Result<Option<Self::Entry>, Self::Error> {
        (**self).pop()
    }
}

/// A source whose next entry may take a while to arrive (disk, network, ...).
///
/// Same contract as [`LogSource`]: `Ok(None)` is terminal and entries come in
/// timestamp order. Errors are per call; the concurrent driver decides whether
/// to ask again.
#[async_trait]
pub trait AsyncLogSource: Send {
    type Entry: HasTimestamp + Send;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn pop_async(&mut self) -> Result<Option<Self::Entry>, Self::Error>;
}

#[async_trait]
impl<S: AsyncLogSource + ?Sized> AsyncLogSource for Box<S> {
    type Entry = S::Entry;
    type Error = S::Error;

    async fn pop_async(&mut self) -> Result<Option<Self::Entry>, Self::Error> {
        (**self).pop_async().await
    }
}

/// Adapts any iterator into an infallible source.
///
/// ```
/// use logmerge_core::{IterSource, LogEntry, LogSource};
///
/// let mut source = IterSource::new(vec![LogEntry::new(1, "boot"), LogEntry::new(4, "ready")]);
/// assert_eq!(source.pop().unwrap(), Some(LogEntry::new(1, "boot")));
/// ```
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    iter: I,
}

impl<I: Iterator> IterSource<I> {
    pub fn new(entries: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            iter: entries.into_iter(),
        }
    }
}

impl<I> LogSource for IterSource<I>
where
    I: Iterator,
    I::Item: HasTimestamp,
{
    type Entry = I::Item;
    type Error = Infallible;

    fn pop(&mut self) -> Result<Option<Self::Entry>, Self::Error> {
        Ok(self.iter.next())
    }
}

#[async_trait]
impl<I> AsyncLogSource for IterSource<I>
where
    I: Iterator + Send,
    I::Item: HasTimestamp + Send,
{
    type Entry = I::Item;
    type Error = Infallible;

    async fn pop_async(&mut self) -> Result<Option<Self::Entry>, Self::Error> {
        Ok(self.iter.next())
    }
}

/// Adapts a stream of `Result`s into an [`AsyncLogSource`].
///
/// The end of the stream is the end of the source. Non-`Unpin` streams can be
/// wrapped after `Box::pin`.
#[derive(Debug)]
pub struct StreamSource<S> {
    stream: S,
}

impl<S> StreamSource<S> {
    pub const fn new(stream: S) -> Self {
        Self { stream }
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

#[async_trait]
impl<S, T, E> AsyncLogSource for StreamSource<S>
where
    S: Stream<Item = Result<T, E>> + Send + Unpin,
    T: HasTimestamp + Send,
    E: std::error::Error + Send + Sync + 'static,
{
    type Entry = T;
    type Error = E;

    async fn pop_async(&mut self) -> Result<Option<T>, E> {
        self.stream.next().await.transpose()
    }
}
