//! `Mailbox` — single-slot store-and-forward notes between actors.
//!
//! Each recipient has at most one pending [`Message`].  Reading is
//! destructive and returns `None` when nothing is pending, which is the
//! normal outcome for an actor polling for a reply.  A second `send` to a
//! recipient that has not read the first overwrites it; the overwrite is
//! logged and counted so a run can be checked for lost notes.

use rustc_hash::FxHashMap;

use bistro_core::ActorId;

/// A pending note and its sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message<T> {
    pub content: T,
    pub from:    ActorId,
}

/// Scene-scoped mailbox keyed by recipient.
#[derive(Debug, Clone)]
pub struct Mailbox<T> {
    slots:      FxHashMap<ActorId, Message<T>>,
    overwrites: u64,
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self { slots: FxHashMap::default(), overwrites: 0 }
    }
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave `content` for `to`, replacing anything still pending.
    pub fn send(&mut self, content: T, from: ActorId, to: ActorId) {
        if let Some(lost) = self.slots.insert(to, Message { content, from }) {
            self.overwrites += 1;
            tracing::warn!(%to, %from, lost_from = %lost.from, "mailbox slot overwritten");
        }
    }

    /// Send the same content to every recipient in `to`.
    pub fn send_all(&mut self, content: T, from: ActorId, to: &[ActorId])
    where
        T: Clone,
    {
        for &recipient in to {
            self.send(content.clone(), from, recipient);
        }
    }

    /// Take the pending message for `to`, if any.
    pub fn receive(&mut self, to: ActorId) -> Option<Message<T>> {
        self.slots.remove(&to)
    }

    /// Take the pending message for `to` only if `pred` accepts it; anything
    /// else stays pending.
    pub fn take_if(
        &mut self,
        to:   ActorId,
        pred: impl FnOnce(&Message<T>) -> bool,
    ) -> Option<Message<T>> {
        if pred(self.slots.get(&to)?) {
            self.slots.remove(&to)
        } else {
            None
        }
    }

    pub fn peek(&self, to: ActorId) -> Option<&Message<T>> {
        self.slots.get(&to)
    }

    /// Drop whatever is pending for `to` (the actor left the scene).
    pub fn discard(&mut self, to: ActorId) -> Option<Message<T>> {
        self.slots.remove(&to)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Number of recipients with a pending message.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// How many pending messages were lost to overwrites so far.
    pub fn overwrites(&self) -> u64 {
        self.overwrites
    }
}
