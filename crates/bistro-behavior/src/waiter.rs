//! Waiters and their life-cycle state.
//!
//! A waiter idles in `Wait`, polling the scene's event queue once per tick
//! while it stands on a tile corner, and dispatches:
//!
//! | Event           | Life         | What happens                                   |
//! |-----------------|--------------|------------------------------------------------|
//! | `arrive`        | `Welcome`    | reserve a table, meet the group, escort it     |
//! | `order-*`       | `TakeOrder`  | ask each guest (payer only for the bill)       |
//! | `order-ready`   | `ServeOrder` | hand each guest their items, or bill the payer |
//!
//! Every guest exchange is one note out and one reply back before the next
//! guest is addressed, so the waiter never has two notes in flight.

use std::mem;

use bistro_actor::{ActionKind, ActionState, Actor};
use bistro_core::{ActorId, Cell, GroupId, TableId};

use crate::{BehaviorResult, Course, Event, FrontDesk, Note, Order, Stage};

/// Tag of a waiter's current life-cycle state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum WaiterLifeKind {
    Wait,
    Welcome,
    TakeOrder,
    ServeOrder,
}

#[derive(Clone, Debug)]
struct Escort {
    group:    GroupId,
    table:    TableId,
    /// Cells from the meeting cell to the table.  Empty while walking to
    /// the meeting cell.
    route:    Vec<Cell>,
    /// Waypoint last broadcast to the followers, if any.
    waypoint: Option<usize>,
    /// Guests told to follow so far.
    notified: usize,
}

#[derive(Clone, Debug)]
struct Taking {
    order:    Order,
    at_table: bool,
    asked:    usize,
    awaiting: bool,
}

#[derive(Clone, Debug)]
struct Serving {
    order:    Order,
    at_table: bool,
    line:     usize,
    awaiting: bool,
}

#[derive(Clone, Debug)]
enum WaiterLife {
    Wait,
    Welcome(Escort),
    TakeOrder(Taking),
    ServeOrder(Serving),
}

// ── Waiter ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Waiter {
    pub actor:      Actor,
    life:           WaiterLife,
    home:           Cell,
    groups_seated:  u32,
    orders_taken:   u32,
    orders_served:  u32,
    takings_cents:  u32,
}

impl Waiter {
    /// A waiter idling at `home`.
    pub fn new(actor: Actor, home: Cell) -> Self {
        Self {
            actor,
            life: WaiterLife::Wait,
            home,
            groups_seated: 0,
            orders_taken: 0,
            orders_served: 0,
            takings_cents: 0,
        }
    }

    #[inline]
    pub fn id(&self) -> ActorId {
        self.actor.id()
    }

    pub fn home(&self) -> Cell {
        self.home
    }

    pub fn life_kind(&self) -> WaiterLifeKind {
        match self.life {
            WaiterLife::Wait => WaiterLifeKind::Wait,
            WaiterLife::Welcome(_) => WaiterLifeKind::Welcome,
            WaiterLife::TakeOrder(_) => WaiterLifeKind::TakeOrder,
            WaiterLife::ServeOrder(_) => WaiterLifeKind::ServeOrder,
        }
    }

    pub fn groups_seated(&self) -> u32 {
        self.groups_seated
    }

    pub fn orders_taken(&self) -> u32 {
        self.orders_taken
    }

    pub fn orders_served(&self) -> u32 {
        self.orders_served
    }

    /// Total of all payments collected.
    pub fn takings_cents(&self) -> u32 {
        self.takings_cents
    }

    /// One tick: the life-cycle state first, then the active action.
    pub fn update(&mut self, stage: &mut Stage<'_>, desk: &mut FrontDesk<'_>) -> BehaviorResult<()> {
        let life = mem::replace(&mut self.life, WaiterLife::Wait);
        self.life = match life {
            WaiterLife::Wait => self.wait(stage, desk)?,
            WaiterLife::Welcome(escort) => self.welcome(escort, stage, desk)?,
            WaiterLife::TakeOrder(taking) => self.take_order(taking, stage, desk)?,
            WaiterLife::ServeOrder(serving) => self.serve_order(serving, stage, desk)?,
        };
        stage.step(&mut self.actor)
    }

    // ── Wait ──────────────────────────────────────────────────────────────────

    fn wait(&mut self, stage: &mut Stage<'_>, desk: &mut FrontDesk<'_>) -> BehaviorResult<WaiterLife> {
        // Walking can only start from a tile corner.
        let Some(cell) = self.actor.aligned_cell(stage.tile_size()) else {
            return Ok(WaiterLife::Wait);
        };
        if let Some(event) = stage.events.next() {
            return self.dispatch(event, stage, desk);
        }
        match self.actor.action_kind() {
            ActionKind::Walking if self.actor.action_done() => {
                stage.act(&mut self.actor, ActionState::idle_standing())?;
            }
            ActionKind::Walking => {}
            _ if cell != self.home => stage.walk(&mut self.actor, self.home)?,
            _ => {}
        }
        Ok(WaiterLife::Wait)
    }

    fn dispatch(
        &mut self,
        event: Event,
        stage: &mut Stage<'_>,
        desk:  &mut FrontDesk<'_>,
    ) -> BehaviorResult<WaiterLife> {
        let name = event.name();
        let group = event.group();
        tracing::debug!(waiter = %self.id(), event = name, %group, tick = %stage.now, "dispatch");

        let Some(size) = desk.group_mut(group).map(|g| g.size()) else {
            tracing::warn!(waiter = %self.id(), event = name, %group, "event for unknown group dropped");
            return Ok(WaiterLife::Wait);
        };

        match event {
            Event::Arrive(_) => {
                let Some(table) = desk.tables.reserve(stage.plan, group, size) else {
                    tracing::debug!(%group, size, "no free table; arrival requeued");
                    stage.events.add(Event::Arrive(group));
                    return Ok(WaiterLife::Wait);
                };
                if let Some(g) = desk.group_mut(group) {
                    g.assign_table(table);
                }
                let meeting = stage.plan.meeting_cell;
                stage.walk(&mut self.actor, meeting)?;
                Ok(WaiterLife::Welcome(Escort { group, table, route: Vec::new(), waypoint: None, notified: 0 }))
            }
            Event::OrderFood(_) => self.begin_order(Course::Food, group, stage, desk),
            Event::OrderDessert(_) => self.begin_order(Course::Dessert, group, stage, desk),
            Event::OrderBill(_) => self.begin_order(Course::Bill, group, stage, desk),
            Event::OrderReady(order) => {
                if !self.walk_to_table(order.table, stage)? {
                    return Ok(WaiterLife::Wait);
                }
                Ok(WaiterLife::ServeOrder(Serving { order, at_table: false, line: 0, awaiting: false }))
            }
        }
    }

    fn begin_order(
        &mut self,
        course: Course,
        group:  GroupId,
        stage:  &mut Stage<'_>,
        desk:   &mut FrontDesk<'_>,
    ) -> BehaviorResult<WaiterLife> {
        let Some(table) = desk.group_mut(group).and_then(|g| g.table()) else {
            tracing::warn!(waiter = %self.id(), %group, %course, "order for a group without a table dropped");
            return Ok(WaiterLife::Wait);
        };
        if !self.walk_to_table(table, stage)? {
            return Ok(WaiterLife::Wait);
        }
        let order = Order::new(desk.issue_order_id(), group, table, course);
        Ok(WaiterLife::TakeOrder(Taking { order, at_table: false, asked: 0, awaiting: false }))
    }

    /// Start walking to the table's waiter cell.  `false` if the table is
    /// not in the floor plan.
    fn walk_to_table(&mut self, table: TableId, stage: &mut Stage<'_>) -> BehaviorResult<bool> {
        let Some(goal) = stage.plan.table(table).map(|t| t.waiter_cell) else {
            tracing::warn!(waiter = %self.id(), %table, "unknown table");
            return Ok(false);
        };
        stage.walk(&mut self.actor, goal)?;
        Ok(true)
    }

    /// `true` once the walk to the table is over.  Switches to standing the
    /// first time.
    fn arrive_at_table(&mut self, at_table: &mut bool, stage: &mut Stage<'_>) -> BehaviorResult<bool> {
        if !*at_table {
            if !self.walk_finished() {
                return Ok(false);
            }
            stage.act(&mut self.actor, ActionState::idle_standing())?;
            *at_table = true;
        }
        Ok(true)
    }

    // ── Welcome ───────────────────────────────────────────────────────────────

    /// Meet the group, then lead it to the table.
    ///
    /// Every `escort_cadence_cells` cells the waiter broadcasts the trail it
    /// has walked so far to every follower told so far, plus one more.  The
    /// last broadcast, on arrival, carries the whole route and tells every
    /// guest the trail is complete.
    fn welcome(
        &mut self,
        mut escort: Escort,
        stage:      &mut Stage<'_>,
        desk:       &mut FrontDesk<'_>,
    ) -> BehaviorResult<WaiterLife> {
        let Some(guests) = desk.group_mut(escort.group).map(|g| g.guest_ids()) else {
            tracing::warn!(waiter = %self.id(), group = %escort.group, "escorted group vanished");
            return Ok(WaiterLife::Wait);
        };

        if escort.route.is_empty() {
            if !self.walk_finished() {
                return Ok(WaiterLife::Welcome(escort));
            }
            if !self.walk_to_table(escort.table, stage)? {
                return Ok(WaiterLife::Wait);
            }
            escort.route = self
                .actor
                .action()
                .walk_path()
                .map(|w| w.path().cells().to_vec())
                .unwrap_or_default();
        }

        // Once the escort walk is over (or was swapped for a step aside at a
        // taken table) the whole route counts as walked.
        let leg = self
            .actor
            .action()
            .walk_path()
            .filter(|w| w.path().cells() == escort.route.as_slice());
        let (walked, arrived) = match leg {
            Some(w) => (w.cell_count() as usize, w.has_reached_goal()),
            None => (escort.route.len().saturating_sub(1), true),
        };

        if arrived {
            self.broadcast_trail(&mut escort, &guests, walked, guests.len(), true, stage);
            if self.walk_finished() {
                stage.act(&mut self.actor, ActionState::idle_standing())?;
            }
            self.groups_seated += 1;
            tracing::debug!(waiter = %self.id(), group = %escort.group, table = %escort.table, "group seated");
            return Ok(WaiterLife::Wait);
        }

        let waypoint = walked / stage.config.escort_cadence_cells as usize;
        if escort.waypoint != Some(waypoint) {
            escort.waypoint = Some(waypoint);
            let upto = escort.notified.max(1 + waypoint);
            self.broadcast_trail(&mut escort, &guests, walked, upto, false, stage);
        }
        Ok(WaiterLife::Welcome(escort))
    }

    /// Send the first `walked + 1` route cells to guests `0..upto`, each
    /// with its own seat.
    fn broadcast_trail(
        &self,
        escort:   &mut Escort,
        guests:   &[ActorId],
        walked:   usize,
        upto:     usize,
        complete: bool,
        stage:    &mut Stage<'_>,
    ) {
        let upto = upto.min(guests.len());
        let end = (walked + 1).min(escort.route.len());
        let trail = &escort.route[..end];
        for (seat, &guest) in guests.iter().enumerate().take(upto) {
            let note = Note::FollowMe { table: escort.table, seat, trail: trail.to_vec(), complete };
            stage.mailbox.send(note, self.id(), guest);
        }
        escort.notified = escort.notified.max(upto);
    }

    // ── TakeOrder ─────────────────────────────────────────────────────────────

    fn take_order(
        &mut self,
        mut taking: Taking,
        stage:      &mut Stage<'_>,
        desk:       &mut FrontDesk<'_>,
    ) -> BehaviorResult<WaiterLife> {
        if !self.arrive_at_table(&mut taking.at_table, stage)? {
            return Ok(WaiterLife::TakeOrder(taking));
        }
        let course = taking.order.course;
        let Some(group) = desk.group_mut(taking.order.group) else {
            tracing::warn!(waiter = %self.id(), group = %taking.order.group, "ordering group vanished");
            return Ok(WaiterLife::Wait);
        };
        let targets: Vec<ActorId> = match course {
            Course::Bill => group.payer_id().into_iter().collect(),
            Course::Food | Course::Dessert => group.guest_ids(),
        };

        let Some(&target) = targets.get(taking.asked) else {
            return Ok(self.order_taken(taking.order, stage, desk));
        };
        let me = self.id();
        if !taking.awaiting {
            stage.mailbox.send(Note::AskOrder(course), me, target);
            taking.awaiting = true;
            return Ok(WaiterLife::TakeOrder(taking));
        }

        let reply = stage
            .mailbox
            .take_if(me, |m| m.from == target && matches!(m.content, Note::OrderReply(_)));
        if let Some(msg) = reply {
            if let Note::OrderReply(items) = msg.content {
                taking.order.lines.push((target, items));
            }
            taking.asked += 1;
            taking.awaiting = false;
            if taking.asked >= targets.len() {
                return Ok(self.order_taken(taking.order, stage, desk));
            }
        }
        Ok(WaiterLife::TakeOrder(taking))
    }

    /// Hand a complete order to the kitchen (or till): it comes back as
    /// `order-ready` after the configured delay.
    fn order_taken(&mut self, order: Order, stage: &mut Stage<'_>, desk: &mut FrontDesk<'_>) -> WaiterLife {
        let delay = match order.course {
            Course::Bill => stage.config.bill_delay_ticks,
            Course::Food | Course::Dessert => stage.config.kitchen_delay_ticks,
        };
        let due = stage.now + delay;
        tracing::debug!(
            waiter = %self.id(),
            order = %order.id,
            group = %order.group,
            course = %order.course,
            items = order.item_count(),
            ready = %due,
            "order taken"
        );
        desk.delays.push(due, Event::OrderReady(order));
        self.orders_taken += 1;
        WaiterLife::Wait
    }

    // ── ServeOrder ────────────────────────────────────────────────────────────

    fn serve_order(
        &mut self,
        mut serving: Serving,
        stage:       &mut Stage<'_>,
        desk:        &mut FrontDesk<'_>,
    ) -> BehaviorResult<WaiterLife> {
        if !self.arrive_at_table(&mut serving.at_table, stage)? {
            return Ok(WaiterLife::ServeOrder(serving));
        }
        let Some(group) = desk.group_mut(serving.order.group) else {
            tracing::warn!(waiter = %self.id(), group = %serving.order.group, "served group vanished");
            return Ok(WaiterLife::Wait);
        };
        let me = self.id();

        if serving.order.course == Course::Bill {
            let Some(payer) = group.payer_id() else {
                return Ok(WaiterLife::Wait);
            };
            if !serving.awaiting {
                let total_cents = group.tab_total_cents();
                stage.mailbox.send(Note::Bill { total_cents }, me, payer);
                serving.awaiting = true;
                return Ok(WaiterLife::ServeOrder(serving));
            }
            let payment = stage
                .mailbox
                .take_if(me, |m| m.from == payer && matches!(m.content, Note::Payment { .. }));
            if let Some(msg) = payment {
                if let Note::Payment { amount_cents } = msg.content {
                    self.takings_cents += amount_cents;
                }
                self.orders_served += 1;
                return Ok(WaiterLife::Wait);
            }
            return Ok(WaiterLife::ServeOrder(serving));
        }

        let Some((guest, items)) = serving.order.lines.get(serving.line).cloned() else {
            self.orders_served += 1;
            return Ok(WaiterLife::Wait);
        };
        if !serving.awaiting {
            stage.mailbox.send(Note::Served(items), me, guest);
            serving.awaiting = true;
            return Ok(WaiterLife::ServeOrder(serving));
        }
        if stage
            .mailbox
            .take_if(me, |m| m.from == guest && m.content == Note::Thanks)
            .is_some()
        {
            serving.line += 1;
            serving.awaiting = false;
            if serving.line >= serving.order.lines.len() {
                self.orders_served += 1;
                return Ok(WaiterLife::Wait);
            }
        }
        Ok(WaiterLife::ServeOrder(serving))
    }

    fn walk_finished(&self) -> bool {
        self.actor.action_kind() == ActionKind::Walking && self.actor.action_done()
    }
}
