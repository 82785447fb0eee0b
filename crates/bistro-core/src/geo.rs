//! Tile and pixel geometry.
//!
//! The world is a grid of square tiles.  A [`Cell`] addresses one tile by
//! `(row, col)`; a [`Point`] is a continuous pixel position.  One scene-wide
//! `tile_size` converts between the two: the top-left pixel of cell
//! `(r, c)` is `(c * tile_size, r * tile_size)`.
//!
//! Coordinates are signed so neighbour arithmetic can step off the edge of
//! the grid and be rejected by a bounds check rather than wrapping.

use std::fmt;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// A tile coordinate.  Pure value, no identity.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The cell `drow` rows and `dcol` columns away.
    #[inline]
    pub fn offset(self, drow: i32, dcol: i32) -> Cell {
        Cell::new(self.row + drow, self.col + dcol)
    }

    /// The adjacent cell in `dir`.
    #[inline]
    pub fn toward(self, dir: Direction) -> Cell {
        let (drow, dcol) = dir.delta();
        self.offset(drow, dcol)
    }

    /// Taxicab distance in cells.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Straight-line distance in cells.
    #[inline]
    pub fn euclidean(self, other: Cell) -> f64 {
        let dr = f64::from(self.row - other.row);
        let dc = f64::from(self.col - other.col);
        (dr * dr + dc * dc).sqrt()
    }

    /// Top-left pixel of this cell.
    #[inline]
    pub fn to_point(self, tile_size: u32) -> Point {
        Point::from_cell(self, tile_size)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.row, self.col)
    }
}

// ── Point ─────────────────────────────────────────────────────────────────────

/// A continuous position in whole pixels.
///
/// Actors move at most one pixel per axis per tick, so integer pixels are
/// exact and keep the simulation deterministic.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn from_cell(cell: Cell, tile_size: u32) -> Self {
        let t = tile_size as i32;
        Self::new(cell.col * t, cell.row * t)
    }

    /// The cell whose tile contains this pixel.
    #[inline]
    pub fn cell(self, tile_size: u32) -> Cell {
        let t = tile_size as i32;
        Cell::new(self.y.div_euclid(t), self.x.div_euclid(t))
    }

    /// `true` when the point sits exactly on a tile's top-left corner.
    #[inline]
    pub fn is_aligned(self, tile_size: u32) -> bool {
        let t = tile_size as i32;
        self.x.rem_euclid(t) == 0 && self.y.rem_euclid(t) == 0
    }

    /// The cell this point stands in, if it is grid-aligned.
    #[inline]
    pub fn aligned_cell(self, tile_size: u32) -> Option<Cell> {
        self.is_aligned(tile_size).then(|| self.cell(tile_size))
    }

    #[inline]
    pub fn shifted(self, dx: i32, dy: i32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}px, {}px)", self.x, self.y)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// Eight-way facing used to pick directional animations.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Facing for a signed `(row, col)` delta.  Only the signs matter.
    ///
    /// Returns `None` for the zero delta.
    pub fn from_delta(drow: i32, dcol: i32) -> Option<Direction> {
        match (drow.signum(), dcol.signum()) {
            (-1, 0) => Some(Direction::Up),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            (-1, -1) => Some(Direction::UpLeft),
            (-1, 1) => Some(Direction::UpRight),
            (1, -1) => Some(Direction::DownLeft),
            (1, 1) => Some(Direction::DownRight),
            _ => None,
        }
    }

    /// Unit `(row, col)` delta for this facing.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (-1, 1),
            Direction::DownLeft => (1, -1),
            Direction::DownRight => (1, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        let (drow, dcol) = self.delta();
        // Negating a unit delta always yields another unit delta.
        Direction::from_delta(-drow, -dcol).unwrap_or(self)
    }

    /// Lower-case, dash-separated label used in animation keys.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::UpLeft => "up-left",
            Direction::UpRight => "up-right",
            Direction::DownLeft => "down-left",
            Direction::DownRight => "down-right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
