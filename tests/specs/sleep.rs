//! Sleep specs
//!
//! `sleep` on a mock clock parks the task until some other actor moves time.

use crate::prelude::*;

/// Poll until `clock` has `n` pending timers, yielding to other tasks.
async fn wait_for_timers(clock: &MockClock, n: usize) {
    while clock.pending_timers() < n {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn sleeper_wakes_when_time_passes_deadline() {
    let (clock, start) = setup();
    let sleeper = clock.clone();
    let task = tokio::spawn(async move {
        sleeper.sleep(secs(10)).await;
        sleeper.now()
    });

    wait_for_timers(&clock, 1).await;
    clock.advance(secs(9));
    tokio::task::yield_now().await;
    assert!(!task.is_finished());

    clock.advance(secs(1));
    assert_eq!(task.await.unwrap(), secs_after(start, 10));
}

#[tokio::test]
async fn sleepers_wake_in_deadline_order() {
    let (clock, _) = setup();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    for (name, delay) in [("slow", 30), ("fast", 10), ("mid", 20)] {
        let clock = clock.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            clock.sleep(secs(delay)).await;
            let _ = tx.send(name);
        });
    }
    drop(tx);

    wait_for_timers(&clock, 3).await;
    let mut woke = Vec::new();
    for _ in 0..3 {
        clock.advance(secs(10));
        if let Some(name) = rx.recv().await {
            woke.push(name);
        }
    }
    assert_eq!(woke, vec!["fast", "mid", "slow"]);
}

#[test]
fn blocking_thread_waits_for_timer() {
    let (clock, start) = setup();
    let mut notification = clock.after(secs(5));

    let waiter = std::thread::spawn(move || notification.blocking_recv());
    while clock.pending_timers() == 0 {
        std::thread::yield_now();
    }
    clock.advance(secs(5));
    assert_eq!(waiter.join().unwrap(), Some(secs_after(start, 5)));
}
