//! Mock clock scenarios
//!
//! End-to-end timer and ticker behavior driven through `set` and `advance`.

use crate::prelude::*;

#[test]
fn timers_created_out_of_order_fire_by_deadline() {
    let (clock, start) = setup();
    let mut a = clock.new_timer(secs(10));
    let mut b = clock.new_timer(secs(30));
    let mut c = clock.new_timer(secs(20));

    clock.set(secs_after(start, 10));
    assert_eq!(a.try_recv(), Some(secs_after(start, 10)));
    assert_eq!(c.try_recv(), None);

    clock.set(secs_after(start, 20));
    assert_eq!(c.try_recv(), Some(secs_after(start, 20)));
    assert_eq!(b.try_recv(), None);

    clock.set(secs_after(start, 30));
    assert_eq!(b.try_recv(), Some(secs_after(start, 30)));
}

#[test]
fn timer_fires_on_the_advance_that_reaches_it() {
    let (clock, start) = setup();
    let mut timer = clock.new_timer(secs(10));

    clock.advance(secs(5));
    assert_eq!(timer.try_recv(), None);
    clock.advance(secs(5));
    assert_eq!(timer.try_recv(), Some(secs_after(start, 10)));
}

#[test]
fn ticker_large_advance_buffers_first_tick_only() {
    let (clock, start) = setup();
    let mut ticker = clock.new_ticker(secs(10)).unwrap();

    clock.advance(secs(25));
    assert_eq!(drain(ticker.notification_mut()), vec![secs_after(start, 10)]);
}

#[test]
fn ticker_and_timer_share_one_timeline() {
    let (clock, start) = setup();
    let mut ticker = clock.new_ticker(secs(3)).unwrap();
    let mut timeout = clock.new_timer(secs(10));

    let mut ticks = Vec::new();
    while timeout.try_recv().is_none() {
        clock.advance(secs(1));
        ticks.extend(drain(ticker.notification_mut()));
    }

    assert_eq!(clock.now(), secs_after(start, 10));
    assert_eq!(ticks, vec![secs_after(start, 3), secs_after(start, 6), secs_after(start, 9)]);
    ticker.stop();
    assert_eq!(clock.next_deadline(), None);
}

#[test]
fn stopped_timer_stays_silent() {
    let (clock, _) = setup();
    let mut timer = clock.new_timer(secs(10));

    assert!(timer.stop());
    for _ in 0..5 {
        clock.advance(secs(10));
    }
    assert_eq!(timer.try_recv(), None);
    assert!(!timer.stop());
}

#[test]
fn rearming_a_timeout_postpones_it() {
    let (clock, start) = setup();
    let mut idle = clock.new_timer(secs(30));

    // Activity every 20s keeps pushing the idle timeout out.
    for _ in 0..3 {
        clock.advance(secs(20));
        assert!(idle.reset(secs(30)));
    }
    assert_eq!(idle.try_recv(), None);

    clock.advance(secs(30));
    assert_eq!(idle.try_recv(), Some(secs_after(start, 90)));
}

#[test]
fn checked_set_refuses_to_rewind() {
    let (clock, start) = setup();
    clock.advance(secs(10));

    assert_eq!(
        clock.set_forward(start),
        Err(ClockError::BackwardJump { behind: secs(10) })
    );
    assert!(clock.set_forward(secs_after(start, 11)).is_ok());
}

#[test]
fn quiet_config_still_accepts_rewind() {
    let start = Instant::now();
    let clock = MockClock::with_config(
        MockConfig::new().start(secs_after(start, 5)).warn_on_backward(false),
    );

    clock.set(start);
    assert_eq!(clock.now(), start);
}
