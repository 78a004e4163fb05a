// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot timer handles.
//!
//! A [`Timer`] is either backed by the host clock or by a [`MockClock`]'s
//! virtual schedule. Both variants share the same contract:
//!
//! - fires at most once per arming, by calling its callback or by sending the
//!   fire time on its [`Notification`]
//! - `stop` reports whether the timer was still pending
//! - `reset` re-arms the timer relative to its clock's current time and
//!   reports whether it was still pending beforehand
//!
//! [`MockClock`]: crate::MockClock

use crate::clock::{offer, Notification};
use crate::mock::MockTimer;
use crate::real::RealTimer;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Handle to a pending, fired or stopped one-shot timer
#[derive(Debug)]
pub enum Timer {
    Real(RealTimer),
    Mock(MockTimer),
}

impl Timer {
    /// Prevent the timer from firing.
    ///
    /// Returns `false` if it already fired or was already stopped.
    pub fn stop(&self) -> bool {
        match self {
            Timer::Real(t) => t.stop(),
            Timer::Mock(t) => t.stop(),
        }
    }

    /// Re-arm the timer to fire `duration` from its clock's current time.
    ///
    /// Returns whether the timer was pending before the call. A fired or
    /// stopped timer is re-armed as well; drain any buffered value first.
    pub fn reset(&self, duration: Duration) -> bool {
        match self {
            Timer::Real(t) => t.reset(duration),
            Timer::Mock(t) => t.reset(duration),
        }
    }

    /// Take the fire time if the timer has fired and the value is unread.
    ///
    /// Always `None` for callback timers.
    pub fn try_recv(&mut self) -> Option<Instant> {
        self.notification_mut()?.try_recv()
    }

    /// Wait for the timer to fire. Returns `None` immediately for callback timers.
    pub async fn recv(&mut self) -> Option<Instant> {
        match self.notification_mut() {
            Some(notification) => notification.recv().await,
            None => None,
        }
    }

    pub fn notification_mut(&mut self) -> Option<&mut Notification> {
        match self {
            Timer::Real(t) => t.notification.as_mut(),
            Timer::Mock(t) => t.notification.as_mut(),
        }
    }

    /// Give up the handle and keep only the notification.
    ///
    /// The timer stays scheduled.
    pub fn into_notification(self) -> Option<Notification> {
        match self {
            Timer::Real(t) => t.notification,
            Timer::Mock(t) => t.notification,
        }
    }
}

/// How a timer signals that it fired.
#[derive(Clone)]
pub(crate) enum Delivery {
    Channel(mpsc::Sender<Instant>),
    Callback(Arc<dyn Fn() + Send + Sync>),
}

impl Delivery {
    pub(crate) fn channel() -> (Self, Notification) {
        let (tx, notification) = Notification::channel();
        (Delivery::Channel(tx), notification)
    }

    pub(crate) fn callback<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Delivery::Callback(Arc::new(f))
    }

    pub(crate) fn deliver(&self, at: Instant) {
        match self {
            Delivery::Channel(tx) => {
                offer(tx, at);
            }
            Delivery::Callback(f) => f(),
        }
    }
}

impl std::fmt::Debug for Delivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Delivery::Channel(_) => f.write_str("Channel"),
            Delivery::Callback(_) => f.write_str("Callback"),
        }
    }
}
