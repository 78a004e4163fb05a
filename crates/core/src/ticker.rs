// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repeating ticker handles

use crate::clock::Notification;
use crate::mock::MockTicker;
use crate::real::RealTicker;
use std::time::{Duration, Instant};

/// Handle to a repeating ticker.
///
/// Each tick sends its scheduled time on the ticker's [`Notification`]. A slow
/// consumer sees dropped ticks, never a backlog.
#[derive(Debug)]
pub enum Ticker {
    Real(RealTicker),
    Mock(MockTicker),
}

impl Ticker {
    /// Stop the ticker permanently. Calling it again is a no-op.
    pub fn stop(&self) {
        match self {
            Ticker::Real(t) => t.stop(),
            Ticker::Mock(t) => t.stop(),
        }
    }

    pub fn interval(&self) -> Duration {
        match self {
            Ticker::Real(t) => t.interval,
            Ticker::Mock(t) => t.interval(),
        }
    }

    pub fn try_recv(&mut self) -> Option<Instant> {
        self.notification_mut().try_recv()
    }

    pub async fn recv(&mut self) -> Option<Instant> {
        self.notification_mut().recv().await
    }

    pub fn notification_mut(&mut self) -> &mut Notification {
        match self {
            Ticker::Real(t) => &mut t.notification,
            Ticker::Mock(t) => &mut t.notification,
        }
    }

    /// Give up the handle and keep only the notification.
    ///
    /// The ticker keeps running until the notification is dropped.
    pub fn into_notification(self) -> Notification {
        match self {
            Ticker::Real(t) => t.notification,
            Ticker::Mock(t) => t.notification,
        }
    }
}
