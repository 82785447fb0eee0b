//! Guest groups and their shared state.
//!
//! # Barrier
//!
//! A group moves to its next [`GroupState`] only once every guest reports
//! done on its current life-cycle state.  Billing is delegated: the payer
//! deals with the waiter and the other guests finish only after the payer
//! has, so the barrier releases on the same tick the payer finishes.
//!
//! ```text
//! arrive
//!   → order(food)    → receive-order(food)    → eat-drink(food)
//!   → order(dessert) → receive-order(dessert) → eat-drink(dessert)
//!   → order(bill)    → receive-order(bill)
//!   → leave          → (finished, removed from the scene)
//! ```
//!
//! Entering an `order` state posts the matching `order-*` event so an idle
//! waiter comes over.

use std::fmt;

use bistro_core::{ActorId, GroupId, TableId, Tick};

use crate::{BehaviorResult, BillRole, Course, Event, Guest, Stage};

// ── GroupState ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum GroupState {
    Arrive,
    Order(Course),
    ReceiveOrder(Course),
    EatDrink(Course),
    Leave,
}

impl GroupState {
    pub fn name(self) -> &'static str {
        match self {
            GroupState::Arrive => "arrive",
            GroupState::Order(_) => "order",
            GroupState::ReceiveOrder(_) => "receive-order",
            GroupState::EatDrink(_) => "eat-drink",
            GroupState::Leave => "leave",
        }
    }

    /// The order type tag, if the state carries one.
    pub fn course(self) -> Option<Course> {
        match self {
            GroupState::Order(c) | GroupState::ReceiveOrder(c) | GroupState::EatDrink(c) => Some(c),
            GroupState::Arrive | GroupState::Leave => None,
        }
    }

    /// The state after this one, or `None` once the group has left.
    pub fn next(self) -> Option<GroupState> {
        use GroupState::*;
        Some(match self {
            Arrive => Order(Course::Food),
            Order(c) => ReceiveOrder(c),
            ReceiveOrder(Course::Bill) => Leave,
            ReceiveOrder(c) => EatDrink(c),
            EatDrink(Course::Food) => Order(Course::Dessert),
            EatDrink(Course::Dessert) => Order(Course::Bill),
            EatDrink(Course::Bill) => Leave,
            Leave => return None,
        })
    }
}

impl fmt::Display for GroupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.course() {
            Some(course) => write!(f, "{}({course})", self.name()),
            None => f.write_str(self.name()),
        }
    }
}

/// What one group update did.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum GroupStep {
    /// A required reference was missing; nothing ran this tick.
    Skipped,
    /// Guests ran but at least one is not done yet.
    Stayed,
    Advanced { from: GroupState, to: GroupState },
    /// Every guest finished leaving.  The group should be removed.
    Finished,
}

// ── GuestGroup ────────────────────────────────────────────────────────────────

/// A seated party: guests sharing one table and one shared state.
#[derive(Debug, Clone)]
pub struct GuestGroup {
    id:         GroupId,
    guests:     Vec<Guest>,
    state:      GroupState,
    table:      Option<TableId>,
    payer:      usize,
    finished:   bool,
    arrived_at: Tick,
}

impl GuestGroup {
    /// A newly arrived group.  `payer` indexes into `guests` and is clamped
    /// to a valid guest.
    pub fn new(id: GroupId, guests: Vec<Guest>, payer: usize, arrived_at: Tick) -> Self {
        let payer = payer.min(guests.len().saturating_sub(1));
        Self {
            id,
            guests,
            state: GroupState::Arrive,
            table: None,
            payer,
            finished: false,
            arrived_at,
        }
    }

    #[inline]
    pub fn id(&self) -> GroupId {
        self.id
    }

    #[inline]
    pub fn state(&self) -> GroupState {
        self.state
    }

    #[inline]
    pub fn table(&self) -> Option<TableId> {
        self.table
    }

    /// Called by the welcoming waiter once a table is reserved.
    pub fn assign_table(&mut self, table: TableId) {
        self.table = Some(table);
    }

    pub fn size(&self) -> usize {
        self.guests.len()
    }

    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    pub fn guests_mut(&mut self) -> &mut [Guest] {
        &mut self.guests
    }

    pub fn guest_ids(&self) -> Vec<ActorId> {
        self.guests.iter().map(Guest::id).collect()
    }

    pub fn payer_id(&self) -> Option<ActorId> {
        self.guests.get(self.payer).map(Guest::id)
    }

    /// Sum of every guest's tab.
    pub fn tab_total_cents(&self) -> u32 {
        self.guests.iter().map(Guest::tab_cents).sum()
    }

    pub fn all_done(&self) -> bool {
        self.guests.iter().all(Guest::is_done)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn arrived_at(&self) -> Tick {
        self.arrived_at
    }

    /// One tick for every guest, payer first, then the barrier check.
    pub fn update(&mut self, stage: &mut Stage<'_>) -> BehaviorResult<GroupStep> {
        if self.finished {
            return Ok(GroupStep::Skipped);
        }
        if self.state != GroupState::Arrive && self.table.is_none() {
            tracing::warn!(group = %self.id, state = %self.state, tick = %stage.now, "group has no table; update skipped");
            return Ok(GroupStep::Skipped);
        }

        let mut payer_done = false;
        if let Some(payer) = self.guests.get_mut(self.payer) {
            payer.update(stage, BillRole::Payer)?;
            payer_done = payer.is_done();
        }
        for (i, guest) in self.guests.iter_mut().enumerate() {
            if i != self.payer {
                guest.update(stage, BillRole::Follower { payer_done })?;
            }
        }

        if !self.all_done() {
            return Ok(GroupStep::Stayed);
        }
        Ok(self.advance(stage))
    }

    fn advance(&mut self, stage: &mut Stage<'_>) -> GroupStep {
        let from = self.state;
        let Some(to) = from.next() else {
            self.finished = true;
            tracing::info!(group = %self.id, tick = %stage.now, "group left");
            return GroupStep::Finished;
        };

        tracing::debug!(group = %self.id, %from, %to, tick = %stage.now, "group state");
        self.state = to;
        for guest in &mut self.guests {
            guest.enter(to);
        }
        if let GroupState::Order(course) = to {
            stage.events.add(Event::order(course, self.id));
        }
        GroupStep::Advanced { from, to }
    }
}
