// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host clock backed by tokio's timer driver.
//!
//! Timers and tickers are driven by spawned tasks, so creating them requires
//! a tokio runtime with the time driver enabled. Time is read from tokio's
//! clock, which is the host clock unless a test pauses it.

use crate::clock::{deadline_after, offer, Clock, Notification, Offer};
use crate::error::ClockError;
use crate::ticker::Ticker;
use crate::timer::{Delivery, Timer};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct RealClock;

#[async_trait]
impl Clock for RealClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn after(&self, duration: Duration) -> Notification {
        let (tx, notification) = Notification::channel();
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            offer(&tx, tokio::time::Instant::now().into_std());
        });
        notification
    }

    fn new_timer(&self, duration: Duration) -> Timer {
        let (delivery, notification) = Delivery::channel();
        Timer::Real(RealTimer::start(duration, delivery, Some(notification)))
    }

    fn after_fn<F>(&self, duration: Duration, f: F) -> Timer
    where
        F: Fn() + Send + Sync + 'static,
    {
        Timer::Real(RealTimer::start(duration, Delivery::callback(f), None))
    }

    fn new_ticker(&self, interval: Duration) -> Result<Ticker, ClockError> {
        if interval.is_zero() {
            return Err(ClockError::ZeroInterval);
        }
        Ok(Ticker::Real(RealTicker::start(interval)))
    }
}

fn deadline_in(duration: Duration) -> tokio::time::Instant {
    deadline_after(tokio::time::Instant::now().into_std(), duration).into()
}

#[derive(Debug)]
struct Arming {
    deadline: tokio::time::Instant,
    pending: bool,
    /// Bumped on every reset so a stale sleep cannot fire the new arming.
    generation: u64,
    driver_running: bool,
}

#[derive(Debug)]
struct TimerShared {
    arming: Mutex<Arming>,
    wake: Notify,
    delivery: Delivery,
}

/// Timer driven by a tokio task
#[derive(Debug)]
pub struct RealTimer {
    shared: Arc<TimerShared>,
    pub(crate) notification: Option<Notification>,
}

impl RealTimer {
    fn start(duration: Duration, delivery: Delivery, notification: Option<Notification>) -> Self {
        let shared = Arc::new(TimerShared {
            arming: Mutex::new(Arming {
                deadline: deadline_in(duration),
                pending: true,
                generation: 0,
                driver_running: true,
            }),
            wake: Notify::new(),
            delivery,
        });
        tokio::spawn(drive_timer(Arc::clone(&shared)));
        Self { shared, notification }
    }

    pub fn stop(&self) -> bool {
        let was_pending = std::mem::replace(&mut self.shared.arming.lock().pending, false);
        if was_pending {
            self.shared.wake.notify_one();
        }
        was_pending
    }

    pub fn reset(&self, duration: Duration) -> bool {
        let mut arming = self.shared.arming.lock();
        let was_pending = arming.pending;
        arming.deadline = deadline_in(duration);
        arming.pending = true;
        arming.generation += 1;
        if arming.driver_running {
            self.shared.wake.notify_one();
        } else {
            arming.driver_running = true;
            tokio::spawn(drive_timer(Arc::clone(&self.shared)));
        }
        was_pending
    }
}

/// Sleeps until the current arming's deadline, restarting on every wake.
///
/// Exits once the timer is neither pending nor re-armed; `reset` spawns a
/// new driver if needed.
async fn drive_timer(shared: Arc<TimerShared>) {
    loop {
        let wake = shared.wake.notified();
        tokio::pin!(wake);
        wake.as_mut().enable();

        let (deadline, generation) = {
            let mut arming = shared.arming.lock();
            if !arming.pending {
                arming.driver_running = false;
                return;
            }
            (arming.deadline, arming.generation)
        };

        tokio::select! {
            () = tokio::time::sleep_until(deadline) => {
                let fire = {
                    let mut arming = shared.arming.lock();
                    let due = arming.pending && arming.generation == generation;
                    if due {
                        arming.pending = false;
                    }
                    due
                };
                if fire {
                    shared.delivery.deliver(tokio::time::Instant::now().into_std());
                }
            }
            () = &mut wake => {}
        }
    }
}

/// Ticker driven by a tokio interval
#[derive(Debug)]
pub struct RealTicker {
    pub(crate) interval: Duration,
    cancel: CancellationToken,
    pub(crate) notification: Notification,
}

impl RealTicker {
    fn start(interval: Duration) -> Self {
        let (tx, notification) = Notification::channel();
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let first = deadline_in(interval);
        tokio::spawn(async move {
            let mut ticks = tokio::time::interval_at(first, interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    () = token.cancelled() => return,
                    at = ticks.tick() => {
                        if offer(&tx, at.into_std()) == Offer::Closed {
                            return;
                        }
                    }
                }
            }
        });
        Self { interval, cancel, notification }
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
#[path = "real_tests.rs"]
mod tests;
