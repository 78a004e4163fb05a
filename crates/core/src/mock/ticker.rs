// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mock ticker state

use super::{MockClock, Position};
use crate::clock::{offer, Notification, Offer};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

#[derive(Debug)]
pub(crate) struct TickerEntry {
    pub(super) pos: Position,
    stopped: AtomicBool,
    interval: Duration,
    tx: mpsc::Sender<Instant>,
}

impl TickerEntry {
    pub(crate) fn new(interval: Duration, tx: mpsc::Sender<Instant>) -> Self {
        Self { pos: Position::default(), stopped: AtomicBool::new(false), interval, tx }
    }

    /// Mark stopped. Returns `true` if this call made the transition.
    pub(super) fn retire(&self) -> bool {
        !self.stopped.swap(true, Ordering::AcqRel)
    }

    pub(super) fn interval(&self) -> Duration {
        self.interval
    }

    pub(super) fn offer(&self, at: Instant) -> Offer {
        offer(&self.tx, at)
    }
}

/// Ticker scheduled on a [`MockClock`]
#[derive(Debug)]
pub struct MockTicker {
    clock: MockClock,
    entry: Arc<TickerEntry>,
    pub(crate) notification: Notification,
}

impl MockTicker {
    pub(super) fn new(clock: MockClock, entry: Arc<TickerEntry>, notification: Notification) -> Self {
        Self { clock, entry, notification }
    }

    pub fn stop(&self) {
        self.clock.stop_ticker(&self.entry);
    }

    pub fn interval(&self) -> Duration {
        self.entry.interval
    }
}

#[cfg(test)]
#[path = "ticker_tests.rs"]
mod tests;
