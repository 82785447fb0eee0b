//! Fluent builder for constructing a [`Sim`].

use bistro_actor::{ActorKind, Animator, Mailbox, VariantPool};
use bistro_behavior::{FloorPlan, Menu, TableBook, Waiter};
use bistro_core::{ActorId, Cell, GroupId, OrderId, SimConfig, SimRng};
use bistro_grid::{Grid, Pathfinder};
use bistro_schedule::{DelayQueue, EventQueue};

use crate::{Sim, SimError, SimResult, SimStats};

/// Fluent builder for [`Sim<P, A>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: tile size, delays, seed, …
/// - [`Grid`]: the room's walls, usually from [`Grid::from_blueprint`]
/// - [`FloorPlan`]: tables, idle spots, spawn/meeting/exit cells
/// - `P: Pathfinder`: the path planner (e.g. [`bistro_grid::AStar`])
/// - `A: Animator`: the rendering collaborator (e.g.
///   [`bistro_actor::ClockAnimator`])
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                          |
/// |-----------------------|----------------------------------|
/// | `.menu(m)`            | [`Menu::house`]                  |
/// | `.waiters(n)`         | one waiter per idle spot         |
/// | `.variants(names)`    | empty pool (guests get none)     |
/// | `.initial_group(n)`   | no groups at tick 0              |
///
/// # Example
///
/// ```rust,ignore
/// let grid = Grid::from_blueprint(&ROOM)?;
/// let mut sim = SimBuilder::new(config, grid, plan, AStar, ClockAnimator::with_defaults(48, 32)?)
///     .waiters(2)
///     .initial_group(3)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: Pathfinder, A: Animator> {
    config:     SimConfig,
    grid:       Grid,
    plan:       FloorPlan,
    pathfinder: P,
    animator:   A,
    menu:       Option<Menu>,
    waiters:    Option<usize>,
    variants:   Vec<String>,
    groups:     Vec<usize>,
}

impl<P: Pathfinder, A: Animator> SimBuilder<P, A> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, grid: Grid, plan: FloorPlan, pathfinder: P, animator: A) -> Self {
        Self {
            config,
            grid,
            plan,
            pathfinder,
            animator,
            menu:     None,
            waiters:  None,
            variants: Vec::new(),
            groups:   Vec::new(),
        }
    }

    pub fn menu(mut self, menu: Menu) -> Self {
        self.menu = Some(menu);
        self
    }

    /// Number of waiters.  Each stands on its own idle spot, so `n` may not
    /// exceed the plan's idle spots.
    pub fn waiters(mut self, n: usize) -> Self {
        self.waiters = Some(n);
        self
    }

    /// Guest appearance names handed out at spawn.
    pub fn variants<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants = names.into_iter().map(Into::into).collect();
        self
    }

    /// A group of `size` guests already at the door on tick 0.
    pub fn initial_group(mut self, size: usize) -> Self {
        self.groups.push(size);
        self
    }

    /// Validate inputs, carve the floor plan into the grid, place waiters and
    /// initial groups, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P, A>> {
        // ── Validate configuration and menu ───────────────────────────────
        self.config.validate()?;
        let menu = self.menu.unwrap_or_else(Menu::house);
        menu.validate()?;

        // ── Carve and check the floor plan ────────────────────────────────
        let mut grid = self.grid;
        let plan = self.plan;
        plan.carve(&mut grid)?;
        plan.validate(&grid)?;
        if plan.tables.is_empty() {
            return Err(SimError::Config("floor plan has no tables".into()));
        }
        let max_group = self.config.max_group_size;
        if max_group > plan.max_capacity() {
            return Err(SimError::Config(format!(
                "max_group_size {max_group} exceeds the largest table ({} seats)",
                plan.max_capacity()
            )));
        }
        if max_group > plan.spawn_cells.len() {
            return Err(SimError::Config(format!(
                "max_group_size {max_group} exceeds the {} spawn cells",
                plan.spawn_cells.len()
            )));
        }
        let waiter_count = self.waiters.unwrap_or(plan.idle_spots.len());
        if waiter_count == 0 || waiter_count > plan.idle_spots.len() {
            return Err(SimError::Config(format!(
                "{waiter_count} waiters requested for {} idle spots",
                plan.idle_spots.len()
            )));
        }

        // ── Assemble the scene ────────────────────────────────────────────
        let mut sim = Sim {
            clock:      self.config.make_clock(),
            rng:        SimRng::new(self.config.seed),
            config:     self.config,
            grid,
            tables:     TableBook::new(plan.tables.len()),
            plan,
            menu,
            pathfinder: self.pathfinder,
            animator:   self.animator,
            mailbox:    Mailbox::new(),
            events:     EventQueue::new(),
            delays:     DelayQueue::new(),
            waiters:    Vec::with_capacity(waiter_count),
            groups:     Vec::new(),
            variants:   VariantPool::new(self.variants),
            stats:      SimStats::default(),
            next_actor: ActorId(0),
            next_group: GroupId(0),
            next_order: OrderId(0),
        };

        // ── Place waiters, then initial groups ────────────────────────────
        let homes: Vec<Cell> = sim.plan.idle_spots.iter().copied().take(waiter_count).collect();
        for home in homes {
            let actor = sim.place_actor(ActorKind::Waiter, home)?;
            sim.waiters.push(Waiter::new(actor, home));
        }
        for size in self.groups {
            if sim.spawn_group(size)?.is_none() {
                return Err(SimError::Config(format!(
                    "no free spawn cells for an initial group of {size}"
                )));
            }
        }
        Ok(sim)
    }
}
