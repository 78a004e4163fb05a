//! Shared imports and helpers for specs.

pub use std::sync::Arc;
pub use std::time::{Duration, Instant};
pub use vtime::test_support::{drain, init_tracing, mock_at, secs_after};
pub use vtime::{Clock, ClockError, MockClock, MockConfig, RealClock, Ticker, Timer};

pub fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

/// A mock clock pinned to a fresh start instant, with tracing installed.
pub fn setup() -> (MockClock, Instant) {
    init_tracing();
    let start = Instant::now();
    (mock_at(start), start)
}
