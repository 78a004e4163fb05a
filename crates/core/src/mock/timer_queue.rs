// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Binary min-heap of pending mock timers.
//!
//! Ordered by `(deadline, seq)`. Every entry carries its own heap position,
//! kept in sync on each swap, so removal and re-keying are `O(log n)`.

use super::timer::TimerEntry;
use std::sync::Arc;
use std::time::Instant;

struct Slot {
    deadline: Instant,
    seq: u64,
    entry: Arc<TimerEntry>,
}

impl Slot {
    fn key(&self) -> (Instant, u64) {
        (self.deadline, self.seq)
    }
}

#[derive(Default)]
pub(crate) struct TimerQueue {
    heap: Vec<Slot>,
}

impl TimerQueue {
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    pub(crate) fn peek_deadline(&self) -> Option<Instant> {
        self.heap.first().map(|slot| slot.deadline)
    }

    pub(crate) fn push(&mut self, entry: Arc<TimerEntry>, deadline: Instant, seq: u64) {
        debug_assert!(entry.pos.get().is_none(), "pushing a timer that is already queued");
        let i = self.heap.len();
        entry.pos.set(i);
        self.heap.push(Slot { deadline, seq, entry });
        self.sift_up(i);
    }

    /// Remove and return the earliest timer with its deadline.
    pub(crate) fn pop(&mut self) -> Option<(Instant, Arc<TimerEntry>)> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(0, last);
        let slot = self.heap.pop()?;
        slot.entry.pos.clear();
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((slot.deadline, slot.entry))
    }

    /// Remove `entry` wherever it sits. Returns `false` if it was not queued.
    pub(crate) fn remove(&mut self, entry: &Arc<TimerEntry>) -> bool {
        let Some(i) = self.position_of(entry) else {
            return false;
        };
        let last = self.heap.len() - 1;
        if i != last {
            self.swap(i, last);
        }
        if let Some(slot) = self.heap.pop() {
            slot.entry.pos.clear();
        }
        if i < self.heap.len() {
            self.fix(i);
        }
        true
    }

    /// Re-key a queued entry. Returns `false` if it was not queued.
    pub(crate) fn update(&mut self, entry: &Arc<TimerEntry>, deadline: Instant, seq: u64) -> bool {
        let Some(i) = self.position_of(entry) else {
            return false;
        };
        self.heap[i].deadline = deadline;
        self.heap[i].seq = seq;
        self.fix(i);
        true
    }

    fn position_of(&self, entry: &Arc<TimerEntry>) -> Option<usize> {
        let i = entry.pos.get()?;
        let in_sync = self.heap.get(i).is_some_and(|slot| Arc::ptr_eq(&slot.entry, entry));
        debug_assert!(in_sync, "timer position {i} does not point at the timer");
        if !in_sync {
            tracing::error!(position = i, len = self.heap.len(), "timer position out of sync");
            return None;
        }
        Some(i)
    }

    fn less(&self, i: usize, j: usize) -> bool {
        self.heap[i].key() < self.heap[j].key()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.heap[i].entry.pos.set(i);
        self.heap[j].entry.pos.set(j);
    }

    fn fix(&mut self, i: usize) {
        if !self.sift_down(i) {
            self.sift_up(i);
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    /// Returns whether the element moved.
    fn sift_down(&mut self, start: usize) -> bool {
        let n = self.heap.len();
        let mut i = start;
        loop {
            let left = 2 * i + 1;
            if left >= n {
                break;
            }
            let mut child = left;
            let right = left + 1;
            if right < n && self.less(right, left) {
                child = right;
            }
            if !self.less(child, i) {
                break;
            }
            self.swap(i, child);
            i = child;
        }
        i > start
    }
}

#[cfg(test)]
#[path = "timer_queue_tests.rs"]
mod tests;
