//! What actors say to each other and what the event queue carries.

use std::fmt;

use bistro_core::{ActorId, Cell, GroupId, OrderId, TableId};

use crate::MenuItem;

/// Which part of the meal an order is for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Course {
    Food,
    Dessert,
    Bill,
}

impl Course {
    pub fn label(self) -> &'static str {
        match self {
            Course::Food => "food",
            Course::Dessert => "dessert",
            Course::Bill => "bill",
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Mailbox notes ─────────────────────────────────────────────────────────────

/// Content of a mailbox message between a waiter and a guest.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Note {
    /// Waiter → guest: follow me to seat `seat` at `table`.
    ///
    /// `trail` is the waiter's escort route up to the last waypoint it
    /// passed.  `complete` is set once the waiter has reached the table.
    FollowMe { table: TableId, seat: usize, trail: Vec<Cell>, complete: bool },
    /// Waiter → guest: what would you like?
    AskOrder(Course),
    /// Guest → waiter: these, please.  Empty when asking for the bill.
    OrderReply(Vec<MenuItem>),
    /// Waiter → guest: here you go.
    Served(Vec<MenuItem>),
    /// Guest → waiter.
    Thanks,
    /// Waiter → paying guest.
    Bill { total_cents: u32 },
    /// Paying guest → waiter.
    Payment { amount_cents: u32 },
}

// ── Orders and events ─────────────────────────────────────────────────────────

/// An order being taken or waiting to be served.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Order {
    pub id:     OrderId,
    pub group:  GroupId,
    pub table:  TableId,
    pub course: Course,
    /// One line per guest who replied, in asking order.
    pub lines:  Vec<(ActorId, Vec<MenuItem>)>,
}

impl Order {
    pub fn new(id: OrderId, group: GroupId, table: TableId, course: Course) -> Self {
        Self { id, group, table, course, lines: Vec::new() }
    }

    pub fn item_count(&self) -> usize {
        self.lines.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn total_cents(&self) -> u32 {
        self.lines
            .iter()
            .flat_map(|(_, items)| items)
            .map(|i| i.price_cents)
            .sum()
    }
}

/// Work items waiters pick up from the scene's event queue.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Event {
    Arrive(GroupId),
    OrderFood(GroupId),
    OrderDessert(GroupId),
    OrderBill(GroupId),
    OrderReady(Order),
}

impl Event {
    /// The request event for `course`.
    pub fn order(course: Course, group: GroupId) -> Self {
        match course {
            Course::Food => Event::OrderFood(group),
            Course::Dessert => Event::OrderDessert(group),
            Course::Bill => Event::OrderBill(group),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Event::Arrive(_) => "arrive",
            Event::OrderFood(_) => "order-food",
            Event::OrderDessert(_) => "order-dessert",
            Event::OrderBill(_) => "order-bill",
            Event::OrderReady(_) => "order-ready",
        }
    }

    pub fn group(&self) -> GroupId {
        match self {
            Event::Arrive(g) | Event::OrderFood(g) | Event::OrderDessert(g) | Event::OrderBill(g) => *g,
            Event::OrderReady(order) => order.group,
        }
    }
}
