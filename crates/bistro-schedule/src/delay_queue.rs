//! `DelayQueue` — sparse tick-keyed one-shot timers.
//!
//! Entries are grouped by due tick in a `BTreeMap`, so draining everything
//! due at `now` touches only the ticks that have something queued.  Entries
//! due at the same tick come out in push order.

use std::collections::BTreeMap;

use bistro_core::Tick;

/// Maps due ticks to the entries that fire at them.
#[derive(Debug, Clone)]
pub struct DelayQueue<E> {
    inner: BTreeMap<Tick, Vec<E>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl<E> Default for DelayQueue<E> {
    fn default() -> Self {
        Self { inner: BTreeMap::new(), total: 0 }
    }
}

impl<E> DelayQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `entry` to fire at `due`.
    pub fn push(&mut self, due: Tick, entry: E) {
        self.inner.entry(due).or_default().push(entry);
        self.total += 1;
    }

    /// Remove and return every entry with `due <= now`, earliest tick first.
    pub fn drain_due(&mut self, now: Tick) -> Vec<E> {
        let mut due = Vec::new();
        while let Some(entry) = self.inner.first_entry() {
            if *entry.key() > now {
                break;
            }
            due.extend(entry.remove());
        }
        self.total -= due.len();
        due
    }

    /// The earliest tick with at least one entry, or `None` if empty.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct future ticks with at least one entry.
    pub fn tick_count(&self) -> usize {
        self.inner.len()
    }
}
