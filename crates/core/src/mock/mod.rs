// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Virtual-time clock.
//!
//! [`MockClock`] owns the current virtual time, a heap of pending timers and
//! a deadline-sorted list of tickers, all behind one lock. Time moves only on
//! [`MockClock::set`] / [`MockClock::advance`]; each move runs one processing
//! pass:
//!
//! 1. pop and fire every timer whose deadline has been reached, earliest first
//! 2. deliver one tick to every due ticker, earliest first, and move each
//!    fired ticker one interval forward
//!
//! Callback timers run on the thread that moved time, with no lock held.

mod ticker;
mod ticker_list;
mod timer;
mod timer_queue;

pub use ticker::MockTicker;
pub use timer::MockTimer;

use crate::clock::{deadline_after, Clock, Notification, Offer};
use crate::config::MockConfig;
use crate::error::ClockError;
use crate::ticker::Ticker;
use crate::timer::{Delivery, Timer};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use ticker::TickerEntry;
use ticker_list::TickerList;
use timer::TimerEntry;
use timer_queue::TimerQueue;

/// Back-reference from an entry to its slot in the queue or list.
///
/// Only written while the engine's write lock is held.
#[derive(Debug)]
pub(crate) struct Position(AtomicUsize);

impl Position {
    const NOT_QUEUED: usize = usize::MAX;

    pub(crate) fn get(&self) -> Option<usize> {
        match self.0.load(Ordering::Acquire) {
            Self::NOT_QUEUED => None,
            i => Some(i),
        }
    }

    pub(crate) fn set(&self, i: usize) {
        self.0.store(i, Ordering::Release);
    }

    pub(crate) fn clear(&self) {
        self.0.store(Self::NOT_QUEUED, Ordering::Release);
    }
}

impl Default for Position {
    fn default() -> Self {
        Self(AtomicUsize::new(Self::NOT_QUEUED))
    }
}

struct Schedule {
    now: Instant,
    timers: TimerQueue,
    tickers: TickerList,
    next_seq: u64,
}

impl Schedule {
    fn seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

struct Engine {
    schedule: RwLock<Schedule>,
    warn_on_backward: bool,
}

/// Clock whose time only moves when told to.
///
/// Clones share the same virtual time and schedule.
#[derive(Clone)]
pub struct MockClock {
    engine: Arc<Engine>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::with_config(MockConfig::default())
    }

    pub fn with_config(config: MockConfig) -> Self {
        let schedule = Schedule {
            now: config.start_instant(),
            timers: TimerQueue::default(),
            tickers: TickerList::default(),
            next_seq: 0,
        };
        Self {
            engine: Arc::new(Engine {
                schedule: RwLock::new(schedule),
                warn_on_backward: config.warn_on_backward,
            }),
        }
    }

    /// Move virtual time to `instant` and fire everything now due.
    ///
    /// Moving backward is accepted; nothing already fired is undone.
    pub fn set(&self, instant: Instant) {
        let previous = std::mem::replace(&mut self.engine.schedule.write().now, instant);
        if instant < previous && self.engine.warn_on_backward {
            tracing::warn!(
                behind = ?previous.duration_since(instant),
                "virtual time moved backward"
            );
        }
        self.process();
    }

    /// Like [`set`](Self::set), but refuses to move time backward.
    pub fn set_forward(&self, instant: Instant) -> Result<(), ClockError> {
        {
            let mut schedule = self.engine.schedule.write();
            if instant < schedule.now {
                return Err(ClockError::BackwardJump {
                    behind: schedule.now.duration_since(instant),
                });
            }
            schedule.now = instant;
        }
        self.process();
        Ok(())
    }

    /// Move virtual time forward by `duration` and fire everything now due.
    pub fn advance(&self, duration: Duration) {
        {
            let mut schedule = self.engine.schedule.write();
            schedule.now = deadline_after(schedule.now, duration);
        }
        self.process();
    }

    /// Number of timers waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.engine.schedule.read().timers.len()
    }

    /// Number of tickers that have not been stopped.
    pub fn active_tickers(&self) -> usize {
        self.engine.schedule.read().tickers.len()
    }

    /// Earliest deadline across timers and tickers.
    pub fn next_deadline(&self) -> Option<Instant> {
        let schedule = self.engine.schedule.read();
        match (schedule.timers.peek_deadline(), schedule.tickers.peek_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn process(&self) {
        let mut fired_timers = 0usize;
        while let Some((entry, now)) = self.pop_due_timer() {
            entry.deliver(now);
            fired_timers += 1;
        }
        let fired_ticks = self.fire_tickers();
        if fired_timers > 0 || fired_ticks > 0 {
            tracing::debug!(fired_timers, fired_ticks, "processed virtual time");
        }
    }

    /// Pop the earliest due timer and claim its firing.
    fn pop_due_timer(&self) -> Option<(Arc<TimerEntry>, Instant)> {
        let mut schedule = self.engine.schedule.write();
        let now = schedule.now;
        loop {
            if schedule.timers.peek_deadline()? > now {
                return None;
            }
            let (deadline, entry) = schedule.timers.pop()?;
            if entry.finish() {
                tracing::trace!(?deadline, "timer fired");
                return Some((entry, now));
            }
        }
    }

    /// Deliver one tick to each due ticker. Returns the number delivered.
    fn fire_tickers(&self) -> usize {
        let mut guard = self.engine.schedule.write();
        let schedule = &mut *guard;
        let now = schedule.now;
        let mut fired = 0usize;
        let mut rearm = Vec::new();
        while let Some((deadline, entry)) = schedule.tickers.pop_due(now) {
            match entry.offer(deadline) {
                Offer::Delivered => {
                    tracing::trace!(?deadline, "ticker fired");
                    fired += 1;
                }
                Offer::Dropped => tracing::trace!(?deadline, "tick dropped, consumer is behind"),
                Offer::Closed => {
                    entry.retire();
                    tracing::trace!("ticker receiver dropped, retiring");
                    continue;
                }
            }
            let next = deadline_after(deadline, entry.interval());
            rearm.push((entry, next));
        }
        for (entry, next) in rearm {
            let seq = schedule.seq();
            schedule.tickers.insert(entry, next, seq);
        }
        fired
    }

    fn register_timer(&self, duration: Duration, delivery: Delivery) -> Arc<TimerEntry> {
        let entry = Arc::new(TimerEntry::new(delivery));
        let mut schedule = self.engine.schedule.write();
        let deadline = deadline_after(schedule.now, duration);
        let seq = schedule.seq();
        schedule.timers.push(Arc::clone(&entry), deadline, seq);
        entry
    }

    pub(crate) fn stop_timer(&self, entry: &Arc<TimerEntry>) -> bool {
        let mut schedule = self.engine.schedule.write();
        if !entry.finish() {
            return false;
        }
        schedule.timers.remove(entry);
        true
    }

    pub(crate) fn reset_timer(&self, entry: &Arc<TimerEntry>, duration: Duration) -> bool {
        let mut schedule = self.engine.schedule.write();
        let deadline = deadline_after(schedule.now, duration);
        let seq = schedule.seq();
        let was_pending = entry.rearm();
        if entry.pos.get().is_none() {
            schedule.timers.push(Arc::clone(entry), deadline, seq);
        } else if !schedule.timers.update(entry, deadline, seq) {
            tracing::error!(?deadline, "timer left in place, queue position out of sync");
        }
        was_pending
    }

    pub(crate) fn stop_ticker(&self, entry: &Arc<TickerEntry>) {
        let mut schedule = self.engine.schedule.write();
        if entry.retire() {
            schedule.tickers.remove(entry);
        }
    }
}

/// Stops a sleeper's timer if its future is dropped before the timer fires.
struct CancelOnDrop(Timer);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.stop();
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let schedule = self.engine.schedule.read();
        f.debug_struct("MockClock")
            .field("now", &schedule.now)
            .field("timers", &schedule.timers.len())
            .field("tickers", &schedule.tickers.len())
            .finish()
    }
}

#[async_trait]
impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.engine.schedule.read().now
    }

    async fn sleep(&self, duration: Duration) {
        let mut sleep = CancelOnDrop(self.new_timer(duration));
        sleep.0.recv().await;
    }

    fn after(&self, duration: Duration) -> Notification {
        let (delivery, notification) = Delivery::channel();
        self.register_timer(duration, delivery);
        notification
    }

    fn new_timer(&self, duration: Duration) -> Timer {
        let (delivery, notification) = Delivery::channel();
        let entry = self.register_timer(duration, delivery);
        Timer::Mock(MockTimer::new(self.clone(), entry, Some(notification)))
    }

    fn after_fn<F>(&self, duration: Duration, f: F) -> Timer
    where
        F: Fn() + Send + Sync + 'static,
    {
        let entry = self.register_timer(duration, Delivery::callback(f));
        Timer::Mock(MockTimer::new(self.clone(), entry, None))
    }

    fn new_ticker(&self, interval: Duration) -> Result<Ticker, ClockError> {
        if interval.is_zero() {
            return Err(ClockError::ZeroInterval);
        }
        let (tx, notification) = Notification::channel();
        let entry = Arc::new(TickerEntry::new(interval, tx));
        {
            let mut schedule = self.engine.schedule.write();
            let deadline = deadline_after(schedule.now, interval);
            let seq = schedule.seq();
            schedule.tickers.insert(Arc::clone(&entry), deadline, seq);
        }
        Ok(Ticker::Mock(MockTicker::new(self.clone(), entry, notification)))
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
