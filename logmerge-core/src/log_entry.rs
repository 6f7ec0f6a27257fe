// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::HasTimestamp;
use std::fmt;

/// A timestamped log line with an opaque payload.
///
/// Equality covers both fields; ordering between entries is the merge
/// engine's business and goes through [`HasTimestamp`] only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogEntry<Ts, P> {
    pub timestamp: Ts,
    pub payload: P,
}

impl<Ts, P> LogEntry<Ts, P> {
    pub const fn new(timestamp: Ts, payload: P) -> Self {
        Self { timestamp, payload }
    }

    /// Gets a reference to the payload.
    pub const fn payload(&self) -> &P {
        &self.payload
    }

    /// Gets the payload, consuming the entry.
    pub fn into_payload(self) -> P {
        self.payload
    }
}

impl<Ts, P> HasTimestamp for LogEntry<Ts, P>
where
    Ts: Ord + Copy + Send + Sync + fmt::Debug,
{
    type Timestamp = Ts;

    fn timestamp(&self) -> Ts {
        self.timestamp
    }
}

impl<Ts, P> From<(Ts, P)> for LogEntry<Ts, P> {
    fn from((timestamp, payload): (Ts, P)) -> Self {
        Self::new(timestamp, payload)
    }
}

impl<Ts: fmt::Display, P: fmt::Display> fmt::Display for LogEntry<Ts, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.timestamp, self.payload)
    }
}
