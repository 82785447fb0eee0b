//! One walking leg along a planned path.

use bistro_core::{Cell, Direction, Point};
use bistro_grid::{Grid, Path, Pathfinder};

use crate::{WalkError, WalkResult};

/// Continuous motion along a [`Path`], one pixel per [`update`][Self::update].
///
/// The cursor `curr_cell_idx` names the cell the walker last stood on;
/// `curr_pixel_diff` is how far it has moved toward the next one.  When the
/// offset reaches `tile_size` the cursor advances and `cell_count` goes up
/// by one.  Reaching the last cell sets `has_reached_goal`, after which
/// `update` does nothing.
#[derive(Debug, Clone)]
pub struct WalkPath {
    path:             Path,
    tile_size:        u32,
    curr_cell_idx:    usize,
    curr_pixel_diff:  u32,
    pos:              Point,
    facing:           Option<Direction>,
    has_reached_goal: bool,
    cell_count:       u32,
}

impl WalkPath {
    /// Plan a path from the cell under `pos` to `goal` and start walking it.
    ///
    /// `pos` must be grid-aligned.
    pub fn plan(
        pathfinder: &dyn Pathfinder,
        grid:       &Grid,
        pos:        Point,
        goal:       Cell,
        tile_size:  u32,
    ) -> WalkResult<Self> {
        let start = pos.aligned_cell(tile_size).ok_or(WalkError::NotAligned(pos))?;
        let path = pathfinder.find_path(grid, start, goal)?;
        Ok(Self::from_path(path, tile_size))
    }

    /// Start walking an already computed path from its first cell.
    pub fn from_path(path: Path, tile_size: u32) -> Self {
        let pos = path
            .start()
            .map(|c| c.to_point(tile_size))
            .unwrap_or_default();
        let mut walk = Self {
            tile_size,
            curr_cell_idx: 0,
            curr_pixel_diff: 0,
            pos,
            facing: None,
            has_reached_goal: path.is_trivial(),
            cell_count: 0,
            path,
        };
        walk.facing = walk.segment_facing(0);
        walk
    }

    /// Advance one pixel toward the next cell.
    pub fn update(&mut self) {
        if self.has_reached_goal {
            return;
        }
        let Some((drow, dcol)) = self.segment_delta(self.curr_cell_idx) else {
            self.has_reached_goal = true;
            return;
        };

        self.facing = Direction::from_delta(drow, dcol).or(self.facing);
        self.pos = self.pos.shifted(dcol, drow);
        self.curr_pixel_diff += 1;

        if self.curr_pixel_diff >= self.tile_size {
            self.curr_pixel_diff = 0;
            self.curr_cell_idx += 1;
            self.cell_count += 1;
            if let Some(cell) = self.path.cells().get(self.curr_cell_idx) {
                // Snap to the corner so integer drift can never accumulate.
                self.pos = cell.to_point(self.tile_size);
            }
            if self.curr_cell_idx + 1 >= self.path.len() {
                self.has_reached_goal = true;
            } else {
                self.facing = self.segment_facing(self.curr_cell_idx).or(self.facing);
            }
        }
    }

    /// Signed `(row, col)` delta of the segment leaving cell `idx`.
    fn segment_delta(&self, idx: usize) -> Option<(i32, i32)> {
        let cells = self.path.cells();
        let from = cells.get(idx)?;
        let to = cells.get(idx + 1)?;
        Some((to.row - from.row, to.col - from.col))
    }

    fn segment_facing(&self, idx: usize) -> Option<Direction> {
        self.segment_delta(idx)
            .and_then(|(drow, dcol)| Direction::from_delta(drow, dcol))
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Current pixel position, to be written back onto the actor.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Facing along the current segment, or along the last segment once the
    /// goal is reached.  `None` for a path that never moves.
    #[inline]
    pub fn facing(&self) -> Option<Direction> {
        self.facing
    }

    #[inline]
    pub fn has_reached_goal(&self) -> bool {
        self.has_reached_goal
    }

    /// Completed cell-to-cell transitions so far.
    #[inline]
    pub fn cell_count(&self) -> u32 {
        self.cell_count
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn goal(&self) -> Option<Cell> {
        self.path.goal()
    }

    /// The cell the walker last stood on.
    #[inline]
    pub fn current_cell(&self) -> Option<Cell> {
        self.path.cells().get(self.curr_cell_idx).copied()
    }

    /// Fraction of the leg completed, in `[0.0, 1.0]`.
    pub fn progress(&self) -> f32 {
        let total = self.path.steps() as u64 * u64::from(self.tile_size);
        if self.has_reached_goal || total == 0 {
            return 1.0;
        }
        let done = self.curr_cell_idx as u64 * u64::from(self.tile_size)
            + u64::from(self.curr_pixel_diff);
        (done as f32 / total as f32).min(1.0)
    }
}
