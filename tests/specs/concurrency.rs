//! Concurrency specs
//!
//! Registration, cancellation and time control from several threads at once.

use crate::prelude::*;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Barrier;

#[test]
fn every_callback_fires_exactly_once_under_contention() {
    let (clock, _) = setup();
    let calls = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(5));

    let registrars: Vec<_> = (0..4)
        .map(|_| {
            let clock = clock.clone();
            let calls = Arc::clone(&calls);
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                for i in 0..100u64 {
                    let calls = Arc::clone(&calls);
                    let _ = clock.after_fn(Duration::from_millis(i), move || {
                        calls.fetch_add(1, Ordering::SeqCst);
                    });
                }
            })
        })
        .collect();

    let advancer = {
        let clock = clock.clone();
        let barrier = Arc::clone(&barrier);
        std::thread::spawn(move || {
            barrier.wait();
            for _ in 0..50 {
                clock.advance(Duration::from_millis(1));
            }
        })
    };

    for t in registrars {
        t.join().unwrap();
    }
    advancer.join().unwrap();

    clock.advance(secs(1));
    assert_eq!(calls.load(Ordering::SeqCst), 400);
    assert_eq!(clock.pending_timers(), 0);
}

#[test]
fn racing_stop_and_fire_pick_one_winner() {
    let (clock, _) = setup();
    let timers: Vec<_> = (0..200).map(|_| clock.new_timer(secs(1))).collect();
    let timers = Arc::new(Mutex::new(timers));

    let stopper = {
        let timers = Arc::clone(&timers);
        std::thread::spawn(move || timers.lock().iter().filter(|t| t.stop()).count())
    };
    clock.advance(secs(1));
    let stopped = stopper.join().unwrap();

    let fired = timers.lock().iter_mut().filter_map(Timer::try_recv).count();
    assert_eq!(stopped + fired, 200);
    assert_eq!(clock.pending_timers(), 0);
}

#[test]
fn tickers_stopped_from_other_threads_leave_the_schedule() {
    let (clock, _) = setup();
    let tickers: Vec<Ticker> = (1..=20).map(|i| clock.new_ticker(secs(i)).unwrap()).collect();

    let handles: Vec<_> = tickers
        .into_iter()
        .map(|ticker| {
            std::thread::spawn(move || {
                ticker.stop();
                ticker
            })
        })
        .collect();
    clock.advance(secs(5));
    for handle in handles {
        let mut ticker = handle.join().unwrap();
        ticker.stop();
        // A tick may have landed before the stop; nothing lands after.
        let _ = ticker.try_recv();
        clock.advance(secs(30));
        assert_eq!(ticker.try_recv(), None);
    }
    assert_eq!(clock.active_tickers(), 0);
}
