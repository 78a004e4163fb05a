// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{MockClock, MockConfig, Notification};
use std::time::{Duration, Instant};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for schedules.
pub mod strategies {
    use proptest::prelude::*;
    use std::time::Duration;

    /// Whole-second delays, including zero.
    pub fn arb_delay() -> impl Strategy<Value = Duration> {
        (0u64..120).prop_map(Duration::from_secs)
    }

    /// Non-zero whole-second ticker intervals.
    pub fn arb_interval() -> impl Strategy<Value = Duration> {
        (1u64..30).prop_map(Duration::from_secs)
    }

    pub fn arb_delays(max: usize) -> impl Strategy<Value = Vec<Duration>> {
        prop::collection::vec(arb_delay(), 1..max)
    }
}

// ── Tracing ─────────────────────────────────────────────────────────────

/// Install a test-writer subscriber filtered by `VTIME_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(crate::env::log_filter());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
}

// ── Clock helpers ───────────────────────────────────────────────────────

/// Mock clock pinned to `start`, so tests can compare exact instants.
pub fn mock_at(start: Instant) -> MockClock {
    MockClock::with_config(MockConfig::new().start(start))
}

/// `start + secs` seconds.
pub fn secs_after(start: Instant, secs: u64) -> Instant {
    start + Duration::from_secs(secs)
}

/// Take every value currently buffered on `notification`.
pub fn drain(notification: &mut Notification) -> Vec<Instant> {
    std::iter::from_fn(|| notification.try_recv()).collect()
}
