// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mock clock configuration

use std::time::Instant;

/// Settings for a [`MockClock`](crate::MockClock).
///
/// ```ignore
/// let clock = MockClock::with_config(MockConfig::new().start(t0).warn_on_backward(false));
/// ```
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Initial virtual time. Defaults to the host's `Instant::now()` at construction.
    pub start: Option<Instant>,
    /// Log a warning when `set` moves virtual time backward.
    pub warn_on_backward: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self { start: None, warn_on_backward: true }
    }
}

impl MockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    crate::setters! {
        set { warn_on_backward: bool }
        option { start: Instant }
    }

    pub(crate) fn start_instant(&self) -> Instant {
        self.start.unwrap_or_else(Instant::now)
    }
}
