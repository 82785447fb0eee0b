//! The tile grid.
//!
//! A rectangular matrix of [`Marker`]s stored row-major in one `Vec`.  The
//! grid is built once per scene from a text blueprint, table footprints are
//! then carved out as blocked, and from then on only the occupancy step
//! writes to it.

use std::fmt;

use bistro_core::{ActorId, Cell};

use crate::{GridError, GridResult};

// ── Marker ────────────────────────────────────────────────────────────────────

/// What a grid cell currently holds.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Marker {
    /// Nobody is here.
    #[default]
    Free,
    /// Wall or furniture.  Never changes after scene setup.
    Blocked,
    /// An actor left this cell during the last reconciliation.  Walkable,
    /// but not claimable until the next reconciliation clears it.
    Cooldown,
    /// An actor is standing here.
    Occupied(ActorId),
}

impl Marker {
    /// Blueprint / debug-dump glyph.
    pub fn glyph(self) -> char {
        match self {
            Marker::Free => '.',
            Marker::Blocked => '#',
            Marker::Cooldown => '~',
            Marker::Occupied(_) => '@',
        }
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Row-major occupancy matrix.
#[derive(Clone, Debug)]
pub struct Grid {
    rows:             usize,
    cols:             usize,
    pub(crate) cells: Vec<Marker>,
}

impl Grid {
    /// An all-free grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, cells: vec![Marker::Free; rows * cols] }
    }

    /// Parse a text blueprint: `.` is free, `#` is blocked.  Every line must
    /// have the same width.
    ///
    /// ```
    /// use bistro_grid::{Grid, Marker};
    /// use bistro_core::Cell;
    ///
    /// let grid = Grid::from_blueprint(&["..#", "..."]).unwrap();
    /// assert_eq!(grid.get(Cell::new(0, 2)), Some(Marker::Blocked));
    /// ```
    pub fn from_blueprint<S: AsRef<str>>(lines: &[S]) -> GridResult<Self> {
        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.as_ref().chars().count());
        let mut cells = Vec::with_capacity(rows * cols);

        for (r, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            if line.chars().count() != cols {
                return Err(GridError::Blueprint(format!(
                    "row {r} has width {} but row 0 has width {cols}",
                    line.chars().count()
                )));
            }
            for (c, ch) in line.chars().enumerate() {
                cells.push(match ch {
                    '.' => Marker::Free,
                    '#' => Marker::Blocked,
                    other => {
                        return Err(GridError::Blueprint(format!(
                            "unexpected {other:?} at row {r}, col {c}"
                        )));
                    }
                });
            }
        }

        Ok(Self { rows, cols, cells })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.rows
            && (cell.col as usize) < self.cols
    }

    /// Row-major index of an in-bounds cell.
    #[inline]
    pub(crate) fn index_of(&self, cell: Cell) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.row as usize * self.cols + cell.col as usize)
    }

    /// Inverse of `index_of`.
    #[inline]
    pub(crate) fn cell_at(&self, index: usize) -> Cell {
        Cell::new((index / self.cols) as i32, (index % self.cols) as i32)
    }

    /// The marker at `cell`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, cell: Cell) -> Option<Marker> {
        self.index_of(cell).map(|i| self.cells[i])
    }

    pub fn set(&mut self, cell: Cell, marker: Marker) -> GridResult<()> {
        let i = self.index_of(cell).ok_or(GridError::OutOfBounds(cell))?;
        self.cells[i] = marker;
        Ok(())
    }

    /// Write an in-bounds cell; out-of-bounds writes are ignored.
    #[inline]
    pub(crate) fn put(&mut self, cell: Cell, marker: Marker) {
        if let Some(i) = self.index_of(cell) {
            self.cells[i] = marker;
        }
    }

    /// Mark every cell in `cells` as permanently blocked.
    pub fn block<I: IntoIterator<Item = Cell>>(&mut self, cells: I) -> GridResult<()> {
        for cell in cells {
            self.set(cell, Marker::Blocked)?;
        }
        Ok(())
    }

    /// `true` for in-bounds blocked cells.
    #[inline]
    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.get(cell) == Some(Marker::Blocked)
    }

    /// `true` for in-bounds cells the planner may route through.
    #[inline]
    pub fn is_walkable(&self, cell: Cell) -> bool {
        matches!(self.get(cell), Some(m) if m != Marker::Blocked)
    }

    /// The actor holding `cell`, if any.
    #[inline]
    pub fn holder(&self, cell: Cell) -> Option<ActorId> {
        match self.get(cell) {
            Some(Marker::Occupied(actor)) => Some(actor),
            _ => None,
        }
    }

    /// In-bounds orthogonal neighbours in the order up, down, left, right.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        const STEPS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        STEPS
            .into_iter()
            .map(move |(dr, dc)| cell.offset(dr, dc))
            .filter(move |&n| self.in_bounds(n))
    }

    /// Number of cells whose marker satisfies `pred`.
    pub fn count(&self, pred: impl Fn(Marker) -> bool) -> usize {
        self.cells.iter().filter(|&&m| pred(m)).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            for marker in row {
                write!(f, "{}", marker.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
