// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mock timer state machine.
//!
//! ```text
//!   new_timer ──► pending ──fire──► terminal
//!                  │  ▲               │
//!             stop │  └────reset──────┘
//!                  ▼
//!               terminal
//! ```
//!
//! The terminal flag is the single source of truth for "may this timer still
//! fire". It only changes while the engine's write lock is held, so the
//! engine's fire attempt and a caller's `stop` cannot both win.

use super::{MockClock, Position};
use crate::clock::Notification;
use crate::timer::Delivery;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub(crate) struct TimerEntry {
    pub(super) pos: Position,
    terminal: AtomicBool,
    delivery: Delivery,
}

impl TimerEntry {
    pub(crate) fn new(delivery: Delivery) -> Self {
        Self { pos: Position::default(), terminal: AtomicBool::new(false), delivery }
    }

    /// Move to terminal. Returns `true` if this call made the transition.
    pub(super) fn finish(&self) -> bool {
        !self.terminal.swap(true, Ordering::AcqRel)
    }

    /// Move back to pending. Returns `true` if it was already pending.
    pub(super) fn rearm(&self) -> bool {
        !self.terminal.swap(false, Ordering::AcqRel)
    }

    pub(super) fn deliver(&self, at: Instant) {
        self.delivery.deliver(at);
    }
}

/// Timer scheduled on a [`MockClock`]
#[derive(Debug)]
pub struct MockTimer {
    clock: MockClock,
    entry: Arc<TimerEntry>,
    pub(crate) notification: Option<Notification>,
}

impl MockTimer {
    pub(super) fn new(
        clock: MockClock,
        entry: Arc<TimerEntry>,
        notification: Option<Notification>,
    ) -> Self {
        Self { clock, entry, notification }
    }

    pub fn stop(&self) -> bool {
        self.clock.stop_timer(&self.entry)
    }

    pub fn reset(&self, duration: Duration) -> bool {
        self.clock.reset_timer(&self.entry, duration)
    }

    /// Whether the timer is waiting in the clock's queue.
    pub fn is_pending(&self) -> bool {
        self.entry.pos.get().is_some()
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
