//! Occupancy reconciliation.
//!
//! After every actor has moved for the tick, the scheduler writes actor
//! positions back into the grid:
//!
//! ```text
//! grid.clear_cooldowns();
//! for actor in actors {
//!     grid.reconcile(actor.id, &mut actor.cell, actor.pos, tile_size);
//! }
//! ```
//!
//! An actor holds at most one cell.  It claims a new cell only when it is
//! grid-aligned on it and the cell is free; the cell it leaves becomes
//! [`Marker::Cooldown`] until the next reconciliation, so a second actor
//! cannot step into it during the same tick.  A cell held by another actor
//! is never taken over.

use bistro_core::{ActorId, Cell, Point};

use crate::{Grid, Marker};

/// What `Grid::reconcile` did for one actor.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Occupancy {
    /// Between cells, or on a blocked tile: the previous hold is kept.
    Kept,
    /// Still standing on the held cell.
    Stayed,
    /// Claimed `to`; `from`, if any, is cooling down.
    Moved { from: Option<Cell>, to: Cell },
    /// The cell was vacated this tick by someone else; claim deferred.
    Cooling(Cell),
    /// Another actor holds the cell.
    Contested { cell: Cell, holder: ActorId },
}

impl Grid {
    /// Write one actor's position back into the grid.
    ///
    /// `held` is the cell the actor currently holds and is updated in place.
    pub fn reconcile(
        &mut self,
        actor:     ActorId,
        held:      &mut Option<Cell>,
        pos:       Point,
        tile_size: u32,
    ) -> Occupancy {
        let Some(cell) = pos.aligned_cell(tile_size) else {
            return Occupancy::Kept;
        };
        let Some(marker) = self.get(cell) else {
            return Occupancy::Kept;
        };

        if *held == Some(cell) {
            if marker != Marker::Occupied(actor) && marker != Marker::Blocked {
                self.put(cell, Marker::Occupied(actor));
            }
            return Occupancy::Stayed;
        }

        match marker {
            Marker::Blocked => Occupancy::Kept,
            Marker::Cooldown => Occupancy::Cooling(cell),
            Marker::Occupied(holder) if holder != actor => {
                tracing::debug!(%actor, %holder, %cell, "occupancy contested");
                Occupancy::Contested { cell, holder }
            }
            Marker::Free | Marker::Occupied(_) => {
                let from = held.take();
                if let Some(prev) = from {
                    if self.get(prev) == Some(Marker::Occupied(actor)) {
                        self.put(prev, Marker::Cooldown);
                    }
                }
                self.put(cell, Marker::Occupied(actor));
                *held = Some(cell);
                Occupancy::Moved { from, to: cell }
            }
        }
    }

    /// Release whatever `actor` holds (actor removed from the scene).
    pub fn vacate(&mut self, actor: ActorId, held: &mut Option<Cell>) {
        if let Some(cell) = held.take() {
            if self.get(cell) == Some(Marker::Occupied(actor)) {
                self.put(cell, Marker::Free);
            }
        }
    }

    /// Turn every cooldown marker back into a free cell.
    pub fn clear_cooldowns(&mut self) {
        for marker in &mut self.cells {
            if *marker == Marker::Cooldown {
                *marker = Marker::Free;
            }
        }
    }
}
