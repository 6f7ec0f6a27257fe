// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// A trait for types that carry the timestamp they are merged by.
///
/// This is the only thing the merge engine needs to know about an entry. The
/// payload stays opaque: drivers read the timestamp, compare, and hand the
/// entry to the sink untouched.
///
/// # Type Parameters
/// * `Timestamp` - The type representing the timestamp (must be `Ord + Copy`)
///
/// # Examples
///
/// ```
/// use logmerge_core::HasTimestamp;
///
/// #[derive(Clone, Debug)]
/// struct AccessLog {
///     line: String,
///     epoch_millis: u64,
/// }
///
/// impl HasTimestamp for AccessLog {
///     type Timestamp = u64;
///
///     fn timestamp(&self) -> u64 {
///         self.epoch_millis
///     }
/// }
/// ```
///
/// Wall-clock types work just as well as counters:
///
/// ```
/// use logmerge_core::HasTimestamp;
/// use std::time::SystemTime;
///
/// struct Event {
///     at: SystemTime,
/// }
///
/// impl HasTimestamp for Event {
///     type Timestamp = SystemTime;
///
///     fn timestamp(&self) -> SystemTime {
///         self.at
///     }
/// }
/// ```
pub trait HasTimestamp {
    /// The type representing the timestamp
    type Timestamp: Ord + Copy + Send + Sync + std::fmt::Debug;

    /// Returns the timestamp value for this entry.
    /// Drivers use this to determine the global emission order.
    fn timestamp(&self) -> Self::Timestamp;
}

impl<T: HasTimestamp + ?Sized> HasTimestamp for Box<T> {
    type Timestamp = T::Timestamp;

    fn timestamp(&self) -> Self::Timestamp {
        (**self).timestamp()
    }
}
