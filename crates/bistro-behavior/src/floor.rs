//! Dining-room geometry: tables, seats, and the spots actors walk to.
//!
//! Everything is in tile units.  Pixel positions come from the scene-wide
//! tile size.

use bistro_core::{Cell, Direction, GroupId, Point, TableId};
use bistro_grid::Grid;

use crate::{BehaviorError, BehaviorResult};

// ── Seat / Table ──────────────────────────────────────────────────────────────

/// A place at a table.
///
/// `stand` is the walkable cell the guest walks to; `toward` points from it
/// at the chair, which sits half a tile that way.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Seat {
    pub stand:  Cell,
    pub toward: Direction,
}

impl Seat {
    pub fn new(stand: Cell, toward: Direction) -> Self {
        Self { stand, toward }
    }

    /// Pixel position of the chair.
    pub fn chair(&self, tile_size: u32) -> Point {
        let (drow, dcol) = self.toward.delta();
        let half = (tile_size / 2) as i32;
        self.stand.to_point(tile_size).shifted(dcol * half, drow * half)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Table {
    pub id:          TableId,
    /// Cells the table itself covers.  Carved out of the grid as blocked.
    pub footprint:   Vec<Cell>,
    pub seats:       Vec<Seat>,
    /// Where a waiter stands to talk to the table.
    pub waiter_cell: Cell,
}

impl Table {
    pub fn new(id: TableId, waiter_cell: Cell) -> Self {
        Self { id, footprint: Vec::new(), seats: Vec::new(), waiter_cell }
    }

    pub fn with_footprint<I: IntoIterator<Item = Cell>>(mut self, cells: I) -> Self {
        self.footprint.extend(cells);
        self
    }

    pub fn with_seat(mut self, stand: Cell, toward: Direction) -> Self {
        self.seats.push(Seat::new(stand, toward));
        self
    }

    pub fn capacity(&self) -> usize {
        self.seats.len()
    }
}

// ── FloorPlan ─────────────────────────────────────────────────────────────────

/// Static scene geometry answered to the behaviour code.
#[derive(Clone, Debug, Default)]
pub struct FloorPlan {
    pub tables:       Vec<Table>,
    /// Where idle waiters stand, one per waiter.
    pub idle_spots:   Vec<Cell>,
    /// Where arriving guests appear.
    pub spawn_cells:  Vec<Cell>,
    /// Where the waiter greets an arriving group.
    pub meeting_cell: Cell,
    /// Where leaving guests walk to before they disappear.
    pub exit_cell:    Cell,
}

impl FloorPlan {
    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.get(id.index())
    }

    /// The seat `index` at table `id`.
    pub fn seat(&self, id: TableId, index: usize) -> Option<&Seat> {
        self.table(id)?.seats.get(index)
    }

    /// Size of the largest table.
    pub fn max_capacity(&self) -> usize {
        self.tables.iter().map(Table::capacity).max().unwrap_or(0)
    }

    /// Block every table footprint on `grid`.
    pub fn carve(&self, grid: &mut Grid) -> BehaviorResult<()> {
        for table in &self.tables {
            grid.block(table.footprint.iter().copied())?;
        }
        Ok(())
    }

    /// Check the plan against a carved grid: ids match positions and every
    /// spot an actor walks to is walkable.
    pub fn validate(&self, grid: &Grid) -> BehaviorResult<()> {
        let walkable = |what: &str, cell: Cell| {
            if grid.is_walkable(cell) {
                Ok(())
            } else {
                Err(BehaviorError::FloorPlan(format!("{what} {cell} is not walkable")))
            }
        };

        for (i, table) in self.tables.iter().enumerate() {
            if table.id.index() != i {
                return Err(BehaviorError::FloorPlan(format!(
                    "table at position {i} has id {}",
                    table.id
                )));
            }
            if table.seats.is_empty() {
                return Err(BehaviorError::FloorPlan(format!("{} has no seats", table.id)));
            }
            walkable("waiter cell", table.waiter_cell)?;
            for seat in &table.seats {
                walkable("seat", seat.stand)?;
            }
        }
        if self.idle_spots.is_empty() {
            return Err(BehaviorError::FloorPlan("no idle spots".into()));
        }
        if self.spawn_cells.is_empty() {
            return Err(BehaviorError::FloorPlan("no spawn cells".into()));
        }
        for &cell in &self.idle_spots {
            walkable("idle spot", cell)?;
        }
        for &cell in &self.spawn_cells {
            walkable("spawn cell", cell)?;
        }
        walkable("meeting cell", self.meeting_cell)?;
        walkable("exit cell", self.exit_cell)
    }
}

// ── TableBook ─────────────────────────────────────────────────────────────────

/// Which group holds which table.  A table is held by at most one group.
#[derive(Clone, Debug, Default)]
pub struct TableBook {
    holders: Vec<Option<GroupId>>,
}

impl TableBook {
    pub fn new(table_count: usize) -> Self {
        Self { holders: vec![None; table_count] }
    }

    /// Reserve the first free table with at least `size` seats.
    pub fn reserve(&mut self, plan: &FloorPlan, group: GroupId, size: usize) -> Option<TableId> {
        if let Some(held) = self.table_of(group) {
            return Some(held);
        }
        let (i, slot) = self
            .holders
            .iter_mut()
            .enumerate()
            .find(|(i, slot)| {
                slot.is_none() && plan.tables.get(*i).is_some_and(|t| t.capacity() >= size)
            })?;
        *slot = Some(group);
        Some(TableId(i as u16))
    }

    /// Free whatever table `group` holds.
    pub fn release(&mut self, group: GroupId) -> Option<TableId> {
        let i = self.holders.iter().position(|h| *h == Some(group))?;
        self.holders[i] = None;
        Some(TableId(i as u16))
    }

    pub fn table_of(&self, group: GroupId) -> Option<TableId> {
        self.holders
            .iter()
            .position(|h| *h == Some(group))
            .map(|i| TableId(i as u16))
    }

    pub fn holder(&self, table: TableId) -> Option<GroupId> {
        self.holders.get(table.index()).copied().flatten()
    }

    pub fn free_count(&self) -> usize {
        self.holders.iter().filter(|h| h.is_none()).count()
    }
}
