// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::sync::Arc;

/// Tracks how many operations are in flight at once and the peak reached.
#[derive(Debug, Clone, Default)]
pub struct ConcurrencyProbe {
    state: Arc<Mutex<ProbeState>>,
}

#[derive(Debug, Default)]
struct ProbeState {
    current: usize,
    peak: usize,
    total: usize,
}

impl ConcurrencyProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an operation until the returned guard is dropped.
    pub fn enter(&self) -> ProbeGuard {
        let mut state = self.state.lock();
        state.current += 1;
        state.total += 1;
        state.peak = state.peak.max(state.current);
        ProbeGuard {
            state: self.state.clone(),
        }
    }

    pub fn peak(&self) -> usize {
        self.state.lock().peak
    }

    pub fn current(&self) -> usize {
        self.state.lock().current
    }

    pub fn total(&self) -> usize {
        self.state.lock().total
    }
}

#[derive(Debug)]
pub struct ProbeGuard {
    state: Arc<Mutex<ProbeState>>,
}

impl Drop for ProbeGuard {
    fn drop(&mut self) {
        self.state.lock().current -= 1;
    }
}
