//! `EventQueue` — scene-scoped FIFO of pending work for waiters.

use std::collections::VecDeque;

/// First-in first-out event queue.
#[derive(Debug, Clone)]
pub struct EventQueue<E> {
    inner: VecDeque<E>,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self { inner: VecDeque::new() }
    }
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `event` at the back.
    pub fn add(&mut self, event: E) {
        self.inner.push_back(event);
    }

    /// Take the oldest event, or `None` when nothing is pending.
    pub fn next(&mut self) -> Option<E> {
        self.inner.pop_front()
    }

    pub fn peek(&self) -> Option<&E> {
        self.inner.front()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.inner.iter()
    }

    /// Drop everything (scene teardown).
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<E> Extend<E> for EventQueue<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}
