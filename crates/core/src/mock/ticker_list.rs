// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Active mock tickers, sorted by next deadline

use super::ticker::TickerEntry;
use std::sync::Arc;
use std::time::Instant;

struct Slot {
    deadline: Instant,
    seq: u64,
    entry: Arc<TickerEntry>,
}

impl Slot {
    fn key(&self) -> (Instant, u64) {
        (self.deadline, self.seq)
    }
}

#[derive(Default)]
pub(crate) struct TickerList {
    slots: Vec<Slot>,
}

impl TickerList {
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn peek_deadline(&self) -> Option<Instant> {
        self.slots.first().map(|slot| slot.deadline)
    }

    pub(crate) fn insert(&mut self, entry: Arc<TickerEntry>, deadline: Instant, seq: u64) {
        debug_assert!(entry.pos.get().is_none(), "inserting a ticker that is already listed");
        let key = (deadline, seq);
        let i = self.slots.partition_point(|slot| slot.key() <= key);
        self.slots.insert(i, Slot { deadline, seq, entry });
        self.renumber(i);
    }

    /// Remove `entry`, returning its deadline. `None` if it was not listed.
    pub(crate) fn remove(&mut self, entry: &Arc<TickerEntry>) -> Option<Instant> {
        let i = entry.pos.get()?;
        let in_sync = self.slots.get(i).is_some_and(|slot| Arc::ptr_eq(&slot.entry, entry));
        debug_assert!(in_sync, "ticker position {i} does not point at the ticker");
        if !in_sync {
            tracing::error!(position = i, len = self.slots.len(), "ticker position out of sync");
            return None;
        }
        let slot = self.slots.remove(i);
        slot.entry.pos.clear();
        self.renumber(i);
        Some(slot.deadline)
    }

    /// Remove the earliest ticker if its deadline is at or before `now`.
    pub(crate) fn pop_due(&mut self, now: Instant) -> Option<(Instant, Arc<TickerEntry>)> {
        if self.peek_deadline()? > now {
            return None;
        }
        let slot = self.slots.remove(0);
        slot.entry.pos.clear();
        self.renumber(0);
        Some((slot.deadline, slot.entry))
    }

    fn renumber(&self, from: usize) {
        for (i, slot) in self.slots.iter().enumerate().skip(from) {
            slot.entry.pos.set(i);
        }
    }
}

#[cfg(test)]
#[path = "ticker_list_tests.rs"]
mod tests;
