//! The `Sim` struct and its tick loop.

use std::mem;

use bistro_actor::{ActionCtx, ActionState, Actor, ActorKind, Animator, Mailbox, VariantPool};
use bistro_behavior::{
    Event, FloorPlan, FrontDesk, Guest, GuestGroup, GroupStep, Menu, Note, Stage, TableBook, Waiter,
};
use bistro_core::{ActorId, ActorRng, Cell, GroupId, OrderId, SimClock, SimConfig, SimRng, Tick};
use bistro_grid::{Grid, Marker, Pathfinder};
use bistro_schedule::{DelayQueue, EventQueue};

use crate::{SimError, SimObserver, SimResult};

/// Running totals over the whole run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    pub groups_spawned:  u32,
    pub groups_left:     u32,
    pub guests_left:     u32,
    pub dishes_finished: u32,
    /// Sum of every bill paid by a departed group.
    pub revenue_cents:   u64,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<P, A>` owns every piece of scene state and drives the tick loop:
///
/// 1. **Timers**: `order-ready` events whose delay has elapsed move from the
///    delay queue onto the event queue.
/// 2. **Animations**: the animator's clock advances to the current tick.
/// 3. **Spawner**: every `spawn_interval_ticks`, a randomly sized group
///    arrives while fewer than `max_active_groups` are present.
/// 4. **Waiters**: life-cycle then action update, in creation order.
/// 5. **Groups**: every guest's life-cycle then action update, payer first,
///    followed by the group barrier.
/// 6. **Occupancy**: cooldowns clear and every actor's position is written
///    back into the grid.
/// 7. **Departures**: finished groups release their table, cells, mailbox
///    slots, and appearance variants, and leave the scene.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: Pathfinder, A: Animator> {
    /// Global configuration (tile size, delays, total ticks, seed, …).
    pub config: SimConfig,

    /// Monotonic tick counter.
    pub clock: SimClock,

    /// Occupancy grid with table footprints carved out.
    pub grid: Grid,

    pub plan: FloorPlan,

    pub menu: Menu,

    /// Path planner shared by every walking actor.
    pub pathfinder: P,

    /// Rendering collaborator.
    pub animator: A,

    /// Single-slot notes between waiters and guests.
    pub mailbox: Mailbox<Note>,

    /// Work items waiting for an idle waiter.
    pub events: EventQueue<Event>,

    /// `order-ready` events waiting for their delay to elapse.
    pub delays: DelayQueue<Event>,

    pub tables: TableBook,

    pub waiters: Vec<Waiter>,

    /// Groups currently in the scene, in arrival order.
    pub groups: Vec<GuestGroup>,

    /// Guest appearance names not currently in use.
    pub variants: VariantPool,

    /// Scene-wide RNG: group sizes, payers, appearances.
    pub rng: SimRng,

    pub stats: SimStats,

    pub(crate) next_actor: ActorId,
    pub(crate) next_group: GroupId,
    pub(crate) next_order: OrderId,
}

impl<P: Pathfinder, A: Animator> Sim<P, A> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Run until `done` holds, checking before every tick, for at most
    /// `max_ticks` ticks.  Returns whether `done` was reached.
    pub fn run_until<O, F>(&mut self, max_ticks: u64, observer: &mut O, mut done: F) -> SimResult<bool>
    where
        O: SimObserver,
        F: FnMut(&Self) -> bool,
    {
        for _ in 0..max_ticks {
            if done(self) {
                return Ok(true);
            }
            self.step(observer)?;
        }
        Ok(done(self))
    }

    /// Place a group of `size` guests on free spawn cells and post its
    /// `arrive` event.
    ///
    /// Returns `Ok(None)` when fewer than `size` spawn cells are free; the
    /// caller may try again on a later tick.
    pub fn spawn_group(&mut self, size: usize) -> SimResult<Option<GroupId>> {
        if size == 0 || size > self.plan.max_capacity() {
            return Err(SimError::Config(format!(
                "a group of {size} cannot be seated (largest table seats {})",
                self.plan.max_capacity()
            )));
        }
        let cells: Vec<Cell> = self
            .plan
            .spawn_cells
            .iter()
            .copied()
            .filter(|&c| self.grid.get(c) == Some(Marker::Free))
            .take(size)
            .collect();
        let now = self.clock.current_tick;
        if cells.len() < size {
            tracing::debug!(size, free = cells.len(), tick = %now, "spawn deferred; spawn cells busy");
            return Ok(None);
        }

        let group = self.next_group;
        self.next_group = group.next();
        let mut guests = Vec::with_capacity(size);
        for cell in cells {
            let mut actor = self.place_actor(ActorKind::Guest, cell)?;
            actor.variant = self.variants.take(&mut self.rng);
            let rng = ActorRng::new(self.config.seed, actor.id());
            guests.push(Guest::new(actor, rng));
        }
        let payer = self.rng.pick_index(size).unwrap_or(0);

        self.groups.push(GuestGroup::new(group, guests, payer, now));
        self.events.add(Event::Arrive(group));
        self.stats.groups_spawned += 1;
        tracing::info!(%group, size, payer, tick = %now, "group arrived");
        Ok(Some(group))
    }

    /// Create a standing actor on `cell` and claim the cell for it.
    pub(crate) fn place_actor(&mut self, kind: ActorKind, cell: Cell) -> SimResult<Actor> {
        let id = self.next_actor;
        self.next_actor = id.next();
        let tile = self.config.tile_size;
        let mut actor = Actor::new(id, kind, cell.to_point(tile));
        let mut ctx = ActionCtx { now: self.clock.current_tick, animator: &mut self.animator };
        actor.set_action(ActionState::idle_standing(), &mut ctx)?;
        reconcile_actor(&mut self.grid, &mut actor, tile);
        Ok(actor)
    }

    pub fn group(&self, id: GroupId) -> Option<&GuestGroup> {
        self.groups.iter().find(|g| g.id() == id)
    }

    /// Guests currently in the scene.
    pub fn guest_count(&self) -> usize {
        self.groups.iter().map(GuestGroup::size).sum()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        self.process_tick(now, observer)?;
        observer.on_tick_end(now, self.groups.len());
        self.clock.advance();
        Ok(())
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        // ── Phase 1: due timers ───────────────────────────────────────────
        let due = self.delays.drain_due(now);
        self.events.extend(due);

        // ── Phase 2: animation clock ──────────────────────────────────────
        self.animator.advance(now);

        // ── Phase 3: spawner ──────────────────────────────────────────────
        let interval = self.config.spawn_interval_ticks;
        if interval > 0
            && now.0.is_multiple_of(interval)
            && self.groups.len() < self.config.max_active_groups
        {
            let size = self.rng.gen_range(1..=self.config.max_group_size);
            if let Some(group) = self.spawn_group(size)? {
                observer.on_group_spawned(now, group, size);
            }
        }

        // ── Phases 4–5: waiters, then groups ──────────────────────────────
        //
        // Explicit field borrows so the borrow checker sees disjoint access.
        let mut stage = Stage {
            now,
            config:     &self.config,
            grid:       &self.grid,
            pathfinder: &self.pathfinder,
            plan:       &self.plan,
            menu:       &self.menu,
            mailbox:    &mut self.mailbox,
            events:     &mut self.events,
            animator:   &mut self.animator,
        };
        let mut desk = FrontDesk {
            delays:     &mut self.delays,
            tables:     &mut self.tables,
            groups:     &mut self.groups,
            next_order: &mut self.next_order,
        };
        for waiter in &mut self.waiters {
            waiter.update(&mut stage, &mut desk)?;
        }
        for group in &mut self.groups {
            if let GroupStep::Advanced { from, to } = group.update(&mut stage)? {
                observer.on_group_state(now, group.id(), from, to);
            }
        }

        // ── Phase 6: occupancy ────────────────────────────────────────────
        let tile = self.config.tile_size;
        self.grid.clear_cooldowns();
        for waiter in &mut self.waiters {
            reconcile_actor(&mut self.grid, &mut waiter.actor, tile);
        }
        for group in &mut self.groups {
            for guest in group.guests_mut() {
                reconcile_actor(&mut self.grid, &mut guest.actor, tile);
            }
        }

        // ── Phase 7: departures ───────────────────────────────────────────
        if self.groups.iter().any(GuestGroup::is_finished) {
            let (left, active): (Vec<_>, Vec<_>) = mem::take(&mut self.groups)
                .into_iter()
                .partition(GuestGroup::is_finished);
            self.groups = active;
            for group in left {
                self.retire(group, now, observer);
            }
        }
        Ok(())
    }

    /// Remove every trace of a finished group from the scene.
    fn retire<O: SimObserver>(&mut self, mut group: GuestGroup, now: Tick, observer: &mut O) {
        let table = self.tables.release(group.id());
        for guest in group.guests_mut() {
            let id = guest.id();
            self.grid.vacate(id, &mut guest.actor.cell);
            self.mailbox.discard(id);
            self.animator.forget(id);
            if let Some(variant) = guest.actor.variant.take() {
                self.variants.release(variant);
            }
            self.stats.dishes_finished += guest.dishes_finished();
            self.stats.revenue_cents += u64::from(guest.paid_cents());
        }
        self.stats.groups_left += 1;
        self.stats.guests_left += group.size() as u32;
        tracing::debug!(
            group = %group.id(),
            table = ?table,
            stayed = now.since(group.arrived_at()),
            "group removed"
        );
        observer.on_group_left(now, &group);
    }
}

/// Write one actor's position back into the grid.
fn reconcile_actor(grid: &mut Grid, actor: &mut Actor, tile_size: u32) {
    let (id, pos) = (actor.id(), actor.pos());
    grid.reconcile(id, &mut actor.cell, pos, tile_size);
}
