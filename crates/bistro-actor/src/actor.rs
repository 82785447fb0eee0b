//! Actor identity, body, and the active action.

use bistro_core::{ActorId, Cell, Direction, Point};

use crate::{ActionCtx, ActionKind, ActionState, ActorResult};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ActorKind {
    Guest,
    Waiter,
}

/// The physical part of an actor that actions move around.
#[derive(Debug, Clone)]
pub struct Body {
    pub id:     ActorId,
    pub kind:   ActorKind,
    pub pos:    Point,
    pub facing: Direction,
}

/// A guest or waiter: a body plus the action driving it.
///
/// `cell` is the grid cell the actor holds, maintained by occupancy
/// reconciliation.  `variant` is the appearance name taken from the scene's
/// [`VariantPool`][crate::VariantPool], if any.
#[derive(Debug, Clone)]
pub struct Actor {
    pub body:    Body,
    action:      ActionState,
    pub cell:    Option<Cell>,
    pub variant: Option<String>,
}

impl Actor {
    /// A standing actor at `pos`.  The idle action has not been initialised;
    /// call [`set_action`][Self::set_action] once an animator is at hand.
    pub fn new(id: ActorId, kind: ActorKind, pos: Point) -> Self {
        Self {
            body: Body { id, kind, pos, facing: Direction::default() },
            action: ActionState::idle_standing(),
            cell: None,
            variant: None,
        }
    }

    #[inline]
    pub fn id(&self) -> ActorId {
        self.body.id
    }

    #[inline]
    pub fn kind(&self) -> ActorKind {
        self.body.kind
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.body.pos
    }

    #[inline]
    pub fn facing(&self) -> Direction {
        self.body.facing
    }

    #[inline]
    pub fn action(&self) -> &ActionState {
        &self.action
    }

    #[inline]
    pub fn action_kind(&self) -> ActionKind {
        self.action.kind()
    }

    /// `true` once the active action has finished.
    #[inline]
    pub fn action_done(&self) -> bool {
        self.action.is_done()
    }

    /// The cell under the actor if it sits exactly on a tile corner.
    #[inline]
    pub fn aligned_cell(&self, tile_size: u32) -> Option<Cell> {
        self.body.pos.aligned_cell(tile_size)
    }

    /// Replace the active action and initialise the new one.
    pub fn set_action(&mut self, next: ActionState, ctx: &mut ActionCtx<'_>) -> ActorResult<()> {
        tracing::trace!(actor = %self.body.id, from = self.action.kind().label(), to = next.kind().label(), "action");
        self.action = next;
        self.action.init(&mut self.body, ctx)
    }

    /// Run one tick of the active action, swapping in its successor if it
    /// produced one.
    pub fn update_action(&mut self, ctx: &mut ActionCtx<'_>) -> ActorResult<()> {
        if let Some(next) = self.action.update(&mut self.body, ctx)? {
            self.set_action(next, ctx)?;
        }
        Ok(())
    }

    /// Loop boundaries reached by an eating or drinking action since the
    /// last call.
    pub fn take_cycles(&mut self) -> u32 {
        self.action.take_cycles()
    }
}
