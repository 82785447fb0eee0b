//! Per-tick context structs handed to guests, groups, and waiters.
//!
//! The scheduler owns every piece of scene state.  Each tick it lends the
//! shared parts out through a [`Stage`] and the waiter-only parts through a
//! [`FrontDesk`], so a waiter can mutate a group while the stage is also
//! borrowed.

use bistro_actor::{ActionCtx, ActionKind, ActionState, Actor, Animator, Mailbox};
use bistro_core::{Cell, GroupId, OrderId, SimConfig, Tick};
use bistro_grid::{Grid, Marker, Path, Pathfinder};
use bistro_schedule::{DelayQueue, EventQueue};
use bistro_walk::{WalkError, WalkPath};

use crate::{BehaviorResult, Event, FloorPlan, GuestGroup, Menu, Note, TableBook};

/// Scene state every actor may read or post to during one tick.
pub struct Stage<'a> {
    pub now:        Tick,
    pub config:     &'a SimConfig,
    pub grid:       &'a Grid,
    pub pathfinder: &'a dyn Pathfinder,
    pub plan:       &'a FloorPlan,
    pub menu:       &'a Menu,
    pub mailbox:    &'a mut Mailbox<Note>,
    pub events:     &'a mut EventQueue<Event>,
    pub animator:   &'a mut dyn Animator,
}

impl Stage<'_> {
    #[inline]
    pub fn tile_size(&self) -> u32 {
        self.config.tile_size
    }

    /// Action context for this tick.
    pub fn ctx(&mut self) -> ActionCtx<'_> {
        ActionCtx { now: self.now, animator: &mut *self.animator }
    }

    /// Replace `actor`'s action.
    pub fn act(&mut self, actor: &mut Actor, next: ActionState) -> BehaviorResult<()> {
        actor.set_action(next, &mut self.ctx())?;
        Ok(())
    }

    /// Plan a path from where `actor` stands to `goal` and start walking.
    pub fn walk(&mut self, actor: &mut Actor, goal: Cell) -> BehaviorResult<()> {
        let walk = WalkPath::plan(self.pathfinder, self.grid, actor.pos(), goal, self.tile_size())?;
        self.act(actor, ActionState::walking(walk))
    }

    /// Cells of a shortest path from `start` to `goal`, both included.
    pub fn route(&self, start: Cell, goal: Cell) -> BehaviorResult<Vec<Cell>> {
        let path = self.pathfinder.find_path(self.grid, start, goal).map_err(WalkError::from)?;
        Ok(path.cells().to_vec())
    }

    /// Walk `actor` along `cells`.  The first cell must be the one it
    /// stands on.
    pub fn walk_along(&mut self, actor: &mut Actor, cells: Vec<Cell>) -> BehaviorResult<()> {
        let walk = WalkPath::from_path(Path::new(cells), self.tile_size());
        self.act(actor, ActionState::walking(walk))
    }

    /// Run one tick of `actor`'s current action.
    ///
    /// An actor that comes to rest on a cell another actor holds (a walk
    /// that ended there, or standing idle) takes a one-cell walk to a free
    /// neighbour, so nobody settles on a held cell.
    pub fn step(&mut self, actor: &mut Actor) -> BehaviorResult<()> {
        actor.update_action(&mut self.ctx())?;
        self.step_aside(actor)
    }

    fn step_aside(&mut self, actor: &mut Actor) -> BehaviorResult<()> {
        let settling = match actor.action_kind() {
            ActionKind::Walking => actor.action_done(),
            ActionKind::IdleStanding => true,
            _ => false,
        };
        if !settling {
            return Ok(());
        }
        let Some(cell) = actor.aligned_cell(self.tile_size()) else {
            return Ok(());
        };
        let id = actor.id();
        let grid = self.grid;
        let Some(holder) = grid.holder(cell).filter(|&h| h != id) else {
            return Ok(());
        };
        let spot = grid.neighbors(cell).find(|&n| match grid.get(n) {
            Some(Marker::Free) => true,
            Some(Marker::Occupied(h)) => h == id,
            _ => false,
        });
        match spot {
            Some(spot) => {
                tracing::debug!(actor = %id, %cell, %holder, %spot, "cell taken; stepping aside");
                self.walk(actor, spot)
            }
            None => {
                tracing::debug!(actor = %id, %cell, %holder, "cell taken and boxed in");
                Ok(())
            }
        }
    }
}

/// The parts of the scene only waiters touch.
pub struct FrontDesk<'a> {
    pub delays:     &'a mut DelayQueue<Event>,
    pub tables:     &'a mut TableBook,
    pub groups:     &'a mut [GuestGroup],
    pub next_order: &'a mut OrderId,
}

impl FrontDesk<'_> {
    pub fn group_mut(&mut self, id: GroupId) -> Option<&mut GuestGroup> {
        self.groups.iter_mut().find(|g| g.id() == id)
    }

    /// Hand out the next order id.
    pub fn issue_order_id(&mut self) -> OrderId {
        let id = *self.next_order;
        *self.next_order = id.next();
        id
    }
}
