// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;

/// The ordered consumer of a merge.
///
/// `print` receives entries in emission order. `done` is called exactly once,
/// after the last `print`, on every exit path of a driver, including failures.
pub trait LogSink<T> {
    fn print(&mut self, entry: T);

    fn done(&mut self);
}

impl<T, K: LogSink<T> + ?Sized> LogSink<T> for Box<K> {
    fn print(&mut self, entry: T) {
        (**self).print(entry);
    }

    fn done(&mut self) {
        (**self).done();
    }
}

/// A sink whose `print` or `done` may suspend.
///
/// Every `Send` [`LogSink`] is usable here as well, so synchronous printers
/// plug straight into the concurrent driver.
#[async_trait]
pub trait AsyncLogSink<T: Send + 'static>: Send {
    async fn print(&mut self, entry: T);

    async fn done(&mut self);
}

#[async_trait]
impl<T, K> AsyncLogSink<T> for K
where
    T: Send + 'static,
    K: LogSink<T> + Send + ?Sized,
{
    async fn print(&mut self, entry: T) {
        LogSink::print(self, entry);
    }

    async fn done(&mut self) {
        LogSink::done(self);
    }
}
