//! Clock injection specs
//!
//! Time-dependent code takes a `C: Clock` and runs unchanged against the host
//! clock in production and a mock clock in tests.

use crate::prelude::*;

/// Retries `attempt` with a fixed backoff until it succeeds or `deadline` passes.
async fn retry_until<C, F>(clock: &C, backoff: Duration, deadline: Duration, mut attempt: F) -> bool
where
    C: Clock,
    F: FnMut() -> bool,
{
    let start = clock.now();
    loop {
        if attempt() {
            return true;
        }
        if clock.since(start) + backoff > deadline {
            return false;
        }
        clock.sleep(backoff).await;
    }
}

#[tokio::test]
async fn retry_loop_on_mock_clock() {
    let (clock, start) = setup();
    let driver = clock.clone();
    let task = tokio::spawn(async move {
        let mut calls = 0;
        let ok = retry_until(&driver, secs(5), secs(60), || {
            calls += 1;
            calls == 4
        })
        .await;
        (ok, calls)
    });

    for _ in 0..3 {
        while clock.pending_timers() == 0 {
            tokio::task::yield_now().await;
        }
        clock.advance(secs(5));
    }

    assert_eq!(task.await.unwrap(), (true, 4));
    assert_eq!(clock.now(), secs_after(start, 15));
}

#[tokio::test(start_paused = true)]
async fn retry_loop_on_real_clock_gives_up() {
    let clock = RealClock;
    let ok = retry_until(&clock, secs(5), secs(12), || false).await;
    assert!(!ok);
}
