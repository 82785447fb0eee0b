//! A guest and its life-cycle state.
//!
//! A guest's life follows its group's shared [`GroupState`].  On every group
//! transition the group calls [`Guest::enter`], which resets the guest's
//! `done` flag; the group moves on only once every guest is done again.
//!
//! Waiting for a waiter is a poll: each tick the guest looks in its mailbox
//! slot for the one note kind its current life expects and leaves anything
//! else pending.
//!
//! On arrival the guests follow their waiter in line.  The waiter sends the
//! trail it has walked so far; each guest walks that trail a few cells
//! behind it, and only the short leg from the trail to its own seat is
//! planned locally.

use bistro_actor::{ActionKind, ActionState, Actor};
use bistro_core::{ActorId, ActorRng, Cell, TableId};

use crate::{BehaviorResult, Course, Dish, GroupState, Menu, MenuItem, MenuKind, Note, Stage};

/// Chance that a guest also orders a drink with dessert.
const DESSERT_DRINK_CHANCE: f64 = 0.5;

/// Whether this guest deals with the bill for its group.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BillRole {
    Payer,
    /// Finishes a billing life only after the payer has.
    Follower { payer_done: bool },
}

/// Tag of a guest's current life-cycle state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum GuestLifeKind {
    Arrive,
    Order,
    ReceiveOrder,
    EatAndDrink,
    AskForBill,
    GetBill,
    Leave,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum ArrivePhase {
    AwaitingWaiter,
    /// On the waiter's trail.
    Following,
    /// From the trail to the seat.
    Walking,
    Sitting,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum LeavePhase {
    Start,
    /// Still seated, or standing when there is no seat.
    Lingering,
    StandingUp,
    Exiting,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum GuestLife {
    Arrive(ArrivePhase),
    Order(Course),
    ReceiveOrder,
    EatAndDrink,
    AskForBill,
    GetBill,
    Leave(LeavePhase),
}

impl GuestLife {
    fn kind(self) -> GuestLifeKind {
        match self {
            GuestLife::Arrive(_) => GuestLifeKind::Arrive,
            GuestLife::Order(_) => GuestLifeKind::Order,
            GuestLife::ReceiveOrder => GuestLifeKind::ReceiveOrder,
            GuestLife::EatAndDrink => GuestLifeKind::EatAndDrink,
            GuestLife::AskForBill => GuestLifeKind::AskForBill,
            GuestLife::GetBill => GuestLifeKind::GetBill,
            GuestLife::Leave(_) => GuestLifeKind::Leave,
        }
    }
}

/// The waiter's escort trail as last received.
#[derive(Debug, Clone, Default)]
struct Trail {
    cells:    Vec<Cell>,
    complete: bool,
    /// Index of the trail cell the guest last set out for.
    reached:  Option<usize>,
}

impl Trail {
    /// The first trail cell closest to `stand`, skipping `avoid`.  The last
    /// cell is left out while there are others: the waiter stands on it.
    fn leave_index(&self, stand: Cell, avoid: &[Cell]) -> usize {
        let len = self.cells.len();
        let keep = if len > 1 { len - 1 } else { len };
        self.cells[..keep]
            .iter()
            .enumerate()
            .filter(|(_, c)| !avoid.contains(c))
            .min_by_key(|&(_, c)| c.manhattan(stand))
            .map_or(0, |(i, _)| i)
    }
}

// ── Guest ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Guest {
    pub actor:       Actor,
    life:            GuestLife,
    done:            bool,
    seat:            Option<(TableId, usize)>,
    trail:           Trail,
    dishes:          Vec<Dish>,
    dishes_finished: u32,
    tab_cents:       u32,
    paid_cents:      u32,
    rng:             ActorRng,
}

impl Guest {
    /// A freshly arrived guest waiting to be shown to a table.
    pub fn new(actor: Actor, rng: ActorRng) -> Self {
        Self {
            actor,
            life: GuestLife::Arrive(ArrivePhase::AwaitingWaiter),
            done: false,
            seat: None,
            trail: Trail::default(),
            dishes: Vec::new(),
            dishes_finished: 0,
            tab_cents: 0,
            paid_cents: 0,
            rng,
        }
    }

    #[inline]
    pub fn id(&self) -> ActorId {
        self.actor.id()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn life_kind(&self) -> GuestLifeKind {
        self.life.kind()
    }

    /// Table and seat index the waiter assigned.
    pub fn seat(&self) -> Option<(TableId, usize)> {
        self.seat
    }

    /// Dishes still in front of the guest, current one first.
    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn dishes_finished(&self) -> u32 {
        self.dishes_finished
    }

    /// Price of everything served to this guest.
    pub fn tab_cents(&self) -> u32 {
        self.tab_cents
    }

    /// What this guest paid on behalf of the group.
    pub fn paid_cents(&self) -> u32 {
        self.paid_cents
    }

    /// Start the life-cycle state matching the group's new shared state.
    pub fn enter(&mut self, state: GroupState) {
        self.done = false;
        self.life = match state {
            GroupState::Arrive => GuestLife::Arrive(ArrivePhase::AwaitingWaiter),
            GroupState::Order(Course::Bill) => GuestLife::AskForBill,
            GroupState::Order(course) => GuestLife::Order(course),
            GroupState::ReceiveOrder(Course::Bill) => GuestLife::GetBill,
            GroupState::ReceiveOrder(_) => GuestLife::ReceiveOrder,
            GroupState::EatDrink(_) => GuestLife::EatAndDrink,
            GroupState::Leave => GuestLife::Leave(LeavePhase::Start),
        };
    }

    /// One tick: the life-cycle state first, then the active action.
    pub fn update(&mut self, stage: &mut Stage<'_>, role: BillRole) -> BehaviorResult<()> {
        if !self.done {
            self.update_life(stage, role)?;
        }
        stage.step(&mut self.actor)
    }

    fn update_life(&mut self, stage: &mut Stage<'_>, role: BillRole) -> BehaviorResult<()> {
        match self.life {
            GuestLife::Arrive(phase) => self.arrive(stage, phase),
            GuestLife::Order(course) => {
                self.order(stage, course);
                Ok(())
            }
            GuestLife::AskForBill => {
                self.ask_for_bill(stage, role);
                Ok(())
            }
            GuestLife::ReceiveOrder => {
                self.receive_order(stage);
                Ok(())
            }
            GuestLife::GetBill => {
                self.get_bill(stage, role);
                Ok(())
            }
            GuestLife::EatAndDrink => self.eat_and_drink(stage),
            GuestLife::Leave(phase) => self.leave(stage, phase),
        }
    }

    // ── Arrive ────────────────────────────────────────────────────────────────

    fn arrive(&mut self, stage: &mut Stage<'_>, phase: ArrivePhase) -> BehaviorResult<()> {
        match phase {
            ArrivePhase::AwaitingWaiter | ArrivePhase::Following => {
                self.take_trail(stage);
                if self.seat.is_some() {
                    self.life = GuestLife::Arrive(ArrivePhase::Following);
                    self.follow(stage)?;
                }
            }
            ArrivePhase::Walking => {
                if self.walk_finished() {
                    let Some(seat) = self.seat.and_then(|(t, i)| stage.plan.seat(t, i)).copied() else {
                        return Ok(());
                    };
                    // Stepped aside from a taken stand cell: go back.
                    if self.actor.aligned_cell(stage.tile_size()) != Some(seat.stand) {
                        return stage.walk(&mut self.actor, seat.stand);
                    }
                    let chair = seat.chair(stage.tile_size());
                    stage.act(&mut self.actor, ActionState::sitting_down(chair, seat.toward))?;
                    self.life = GuestLife::Arrive(ArrivePhase::Sitting);
                }
            }
            ArrivePhase::Sitting => {
                if self.actor.action_kind() == ActionKind::IdleSitting {
                    self.done = true;
                }
            }
        }
        Ok(())
    }

    /// Pick up a trail update, if the waiter sent one.
    fn take_trail(&mut self, stage: &mut Stage<'_>) {
        let id = self.id();
        let Some(msg) = stage
            .mailbox
            .take_if(id, |m| matches!(m.content, Note::FollowMe { .. }))
        else {
            return;
        };
        let Note::FollowMe { table, seat, trail, complete } = msg.content else {
            return;
        };
        if stage.plan.seat(table, seat).is_none() {
            tracing::warn!(guest = %id, %table, seat, "follow-me names an unknown seat");
            return;
        }
        self.seat = Some((table, seat));
        self.trail.cells = trail;
        self.trail.complete = complete;
    }

    /// Walk the trail behind the waiter.  Guest `n` in line stops `n + 1`
    /// cells short of the waiter's last waypoint.  Once the trail is
    /// complete the guest leaves it where it passes closest to the seat.
    fn follow(&mut self, stage: &mut Stage<'_>) -> BehaviorResult<()> {
        if self.actor.action_kind() == ActionKind::Walking && !self.actor.action_done() {
            return Ok(());
        }
        let Some((table, line)) = self.seat else {
            return Ok(());
        };
        let plan = stage.plan;
        let Some(seats) = plan.table(table).map(|t| &t.seats) else {
            return Ok(());
        };
        let Some(stand) = seats.get(line).map(|s| s.stand) else {
            return Ok(());
        };
        if self.trail.cells.is_empty() {
            return Ok(());
        }

        if self.trail.complete {
            // Someone else's seat is no place to stop.
            let others: Vec<Cell> = seats
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != line)
                .map(|(_, s)| s.stand)
                .collect();
            let leave = self.trail.leave_index(stand, &others);
            if self.trail.reached.is_none_or(|r| r < leave) {
                return self.walk_trail(stage, leave);
            }
            self.trail = Trail::default();
            stage.walk(&mut self.actor, stand)?;
            self.life = GuestLife::Arrive(ArrivePhase::Walking);
            return Ok(());
        }

        let Some(target) = self.trail.cells.len().checked_sub(2 + line) else {
            return Ok(());
        };
        if self.trail.reached.is_none_or(|r| r < target) {
            self.walk_trail(stage, target)?;
        }
        Ok(())
    }

    /// Walk along the trail up to cell `to`, first joining it at the cell
    /// last set out for (the trail's start the first time).
    fn walk_trail(&mut self, stage: &mut Stage<'_>, to: usize) -> BehaviorResult<()> {
        let Some(here) = self.actor.aligned_cell(stage.tile_size()) else {
            return Ok(());
        };
        let join = self.trail.reached.unwrap_or(0).min(to);
        let mut cells = stage.route(here, self.trail.cells[join])?;
        cells.extend_from_slice(&self.trail.cells[join + 1..=to]);
        stage.walk_along(&mut self.actor, cells)?;
        self.trail.reached = Some(to);
        Ok(())
    }

    // ── Ordering ──────────────────────────────────────────────────────────────

    fn order(&mut self, stage: &mut Stage<'_>, course: Course) {
        let id = self.id();
        let Some(msg) = stage
            .mailbox
            .take_if(id, |m| m.content == Note::AskOrder(course))
        else {
            return;
        };
        let items = self.choose(course, stage.menu);
        tracing::debug!(guest = %id, %course, items = items.len(), "order placed");
        stage.mailbox.send(Note::OrderReply(items), id, msg.from);
        self.done = true;
    }

    fn ask_for_bill(&mut self, stage: &mut Stage<'_>, role: BillRole) {
        match role {
            BillRole::Payer => {
                let id = self.id();
                if let Some(msg) = stage
                    .mailbox
                    .take_if(id, |m| m.content == Note::AskOrder(Course::Bill))
                {
                    stage.mailbox.send(Note::OrderReply(Vec::new()), id, msg.from);
                    self.done = true;
                }
            }
            BillRole::Follower { payer_done } => self.done = payer_done,
        }
    }

    fn choose(&mut self, course: Course, menu: &Menu) -> Vec<MenuItem> {
        let mut pick = |kind| self.rng.choose(&menu.of_kind(kind)).map(|&item| item.clone());
        match course {
            Course::Food => [pick(MenuKind::Food), pick(MenuKind::Drink)]
                .into_iter()
                .flatten()
                .collect(),
            Course::Dessert => {
                let mut items: Vec<_> = pick(MenuKind::Dessert).into_iter().collect();
                if self.rng.gen_bool(DESSERT_DRINK_CHANCE) {
                    let drink = self.rng.choose(&menu.of_kind(MenuKind::Drink)).map(|&item| item.clone());
                    items.extend(drink);
                }
                items
            }
            Course::Bill => Vec::new(),
        }
    }

    // ── Receiving ─────────────────────────────────────────────────────────────

    fn receive_order(&mut self, stage: &mut Stage<'_>) {
        let id = self.id();
        let Some(msg) = stage
            .mailbox
            .take_if(id, |m| matches!(m.content, Note::Served(_)))
        else {
            return;
        };
        let Note::Served(mut items) = msg.content else {
            return;
        };
        // Eat first, drink after.
        items.sort_by_key(MenuItem::is_drink);
        for item in items {
            self.tab_cents += item.price_cents;
            self.dishes.push(Dish::new(item));
        }
        stage.mailbox.send(Note::Thanks, id, msg.from);
        self.done = true;
    }

    fn get_bill(&mut self, stage: &mut Stage<'_>, role: BillRole) {
        match role {
            BillRole::Payer => {
                let id = self.id();
                let Some(msg) = stage
                    .mailbox
                    .take_if(id, |m| matches!(m.content, Note::Bill { .. }))
                else {
                    return;
                };
                let Note::Bill { total_cents } = msg.content else {
                    return;
                };
                self.paid_cents += total_cents;
                tracing::debug!(guest = %id, total_cents, "bill paid");
                stage.mailbox.send(Note::Payment { amount_cents: total_cents }, id, msg.from);
                self.done = true;
            }
            BillRole::Follower { payer_done } => self.done = payer_done,
        }
    }

    // ── Eating ────────────────────────────────────────────────────────────────

    fn eat_and_drink(&mut self, stage: &mut Stage<'_>) -> BehaviorResult<()> {
        let cycles = self.actor.take_cycles();
        if let Some(dish) = self.dishes.first_mut() {
            dish.bite(cycles);
        }

        match self.actor.action_kind() {
            ActionKind::Eating | ActionKind::Drinking if !self.actor.action_done() => return Ok(()),
            ActionKind::Eating | ActionKind::Drinking => {
                if !self.dishes.is_empty() {
                    self.dishes.remove(0);
                    self.dishes_finished += 1;
                }
            }
            _ => {}
        }

        match self.dishes.first() {
            Some(dish) if dish.item.is_drink() => stage.act(&mut self.actor, ActionState::drinking()),
            Some(_) => stage.act(&mut self.actor, ActionState::eating()),
            None => {
                stage.act(&mut self.actor, ActionState::idle_sitting())?;
                self.done = true;
                Ok(())
            }
        }
    }

    // ── Leaving ───────────────────────────────────────────────────────────────

    fn leave(&mut self, stage: &mut Stage<'_>, phase: LeavePhase) -> BehaviorResult<()> {
        let linger_until = stage.now + stage.config.linger_ticks;
        match phase {
            LeavePhase::Start => {
                let linger = match self.stand_cell(stage) {
                    Some(_) => ActionState::idle_sitting_until(linger_until),
                    None => ActionState::idle_standing_until(linger_until),
                };
                stage.act(&mut self.actor, linger)?;
                self.life = GuestLife::Leave(LeavePhase::Lingering);
            }
            LeavePhase::Lingering => {
                if !self.actor.action_done() {
                    return Ok(());
                }
                match self.stand_cell(stage) {
                    Some(stand) if self.actor.action_kind() == ActionKind::IdleSitting => {
                        let target = stand.to_point(stage.tile_size());
                        stage.act(&mut self.actor, ActionState::standing_up(target))?;
                        self.life = GuestLife::Leave(LeavePhase::StandingUp);
                    }
                    _ => self.head_out(stage)?,
                }
            }
            LeavePhase::StandingUp => {
                if self.actor.action_kind() == ActionKind::IdleStanding {
                    self.head_out(stage)?;
                }
            }
            LeavePhase::Exiting => {
                if self.walk_finished() {
                    self.done = true;
                }
            }
        }
        Ok(())
    }

    fn head_out(&mut self, stage: &mut Stage<'_>) -> BehaviorResult<()> {
        let exit = stage.plan.exit_cell;
        stage.walk(&mut self.actor, exit)?;
        self.life = GuestLife::Leave(LeavePhase::Exiting);
        Ok(())
    }

    fn stand_cell(&self, stage: &Stage<'_>) -> Option<Cell> {
        let (table, index) = self.seat?;
        stage.plan.seat(table, index).map(|s| s.stand)
    }

    fn walk_finished(&self) -> bool {
        self.actor.action_kind() == ActionKind::Walking && self.actor.action_done()
    }
}
