// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling
//!
//! Code that needs time takes a `C: Clock` and never reaches for the host
//! clock directly. Production passes [`RealClock`](crate::RealClock); tests
//! pass a [`MockClock`](crate::MockClock) and drive it with `advance`/`set`.

use crate::error::ClockError;
use crate::ticker::Ticker;
use crate::timer::Timer;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// A source of time, timers and tickers
#[async_trait]
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;

    /// Time elapsed since `earlier`, zero if `earlier` is in the future.
    fn since(&self, earlier: Instant) -> Duration {
        self.now().saturating_duration_since(earlier)
    }

    /// Suspend the calling task until `duration` has passed on this clock.
    async fn sleep(&self, duration: Duration);

    /// Notification that receives one value once `duration` has passed.
    fn after(&self, duration: Duration) -> Notification;

    /// Notification for a ticker that is never stopped.
    ///
    /// Returns `None` for a zero interval.
    fn tick(&self, interval: Duration) -> Option<Notification> {
        self.new_ticker(interval).ok().map(Ticker::into_notification)
    }

    fn new_timer(&self, duration: Duration) -> Timer;

    /// Timer that calls `f` instead of sending on a notification.
    fn after_fn<F>(&self, duration: Duration, f: F) -> Timer
    where
        F: Fn() + Send + Sync + 'static;

    fn new_ticker(&self, interval: Duration) -> Result<Ticker, ClockError>;
}

/// Receiving half of a timer or ticker's single-slot channel.
///
/// Holds at most one undelivered value. Producers never block: a value sent
/// while the slot is occupied is dropped.
#[derive(Debug)]
pub struct Notification {
    rx: mpsc::Receiver<Instant>,
}

impl Notification {
    pub(crate) fn channel() -> (mpsc::Sender<Instant>, Self) {
        let (tx, rx) = mpsc::channel(1);
        (tx, Self { rx })
    }

    /// Wait for the next value. `None` once the producer is gone and the slot is empty.
    pub async fn recv(&mut self) -> Option<Instant> {
        self.rx.recv().await
    }

    /// Take the buffered value, if any.
    pub fn try_recv(&mut self) -> Option<Instant> {
        self.rx.try_recv().ok()
    }

    /// Blocking variant of [`recv`](Self::recv) for synchronous callers.
    ///
    /// Must not be called from inside an async runtime.
    pub fn blocking_recv(&mut self) -> Option<Instant> {
        self.rx.blocking_recv()
    }
}

/// Outcome of a drop-if-full send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Offer {
    Delivered,
    Dropped,
    Closed,
}

pub(crate) fn offer(tx: &mpsc::Sender<Instant>, at: Instant) -> Offer {
    match tx.try_send(at) {
        Ok(()) => Offer::Delivered,
        Err(TrySendError::Full(_)) => Offer::Dropped,
        Err(TrySendError::Closed(_)) => Offer::Closed,
    }
}

/// `now + d`, clamped to a far-future instant instead of overflowing.
pub(crate) fn deadline_after(now: Instant, d: Duration) -> Instant {
    const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);
    now.checked_add(d).or_else(|| now.checked_add(FAR_FUTURE)).unwrap_or(now)
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
