//! Pathfinding trait and the default A* implementation.
//!
//! # Pluggability
//!
//! Actors request paths through the [`Pathfinder`] trait, so the search can
//! be swapped (jump-point search, cached flow fields) without touching the
//! behaviour code.  [`AStar`] is the default.
//!
//! # Search model
//!
//! * 4-directional adjacency, uniform step cost 1, no diagonals.  Every
//!   consecutive pair of cells in a [`Path`] differs by one orthogonal step.
//! * Euclidean heuristic.  It never overestimates the remaining step count,
//!   so returned paths have minimal length.
//! * Ties on `f` go to the entry that entered the open set first.
//! * Only [`Marker::Blocked`][crate::Marker::Blocked] cells are obstacles.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bistro_core::Cell;

use crate::{BadPathRequest, Grid, PathError, PathResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// An ordered run of cells from a start to a goal, both inclusive.
///
/// Immutable once produced; owned by whichever walker requested it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    /// Wrap an already-validated cell sequence.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells, including start and goal.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cell-to-cell steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// `true` if start and goal are the same cell.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.cells.len() <= 1
    }

    #[inline]
    pub fn start(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    #[inline]
    pub fn goal(&self) -> Option<Cell> {
        self.cells.last().copied()
    }
}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable path search over the tile grid.
pub trait Pathfinder {
    /// Compute a path from `start` to `goal`.
    ///
    /// Fails with [`PathError::BadRequest`] if either endpoint is outside the
    /// grid or blocked, and with [`PathError::NotFound`] if the goal cannot
    /// be reached.  `start == goal` yields a one-cell path.
    fn find_path(&self, grid: &Grid, start: Cell, goal: Cell) -> PathResult<Path>;
}

// ── AStar ─────────────────────────────────────────────────────────────────────

/// A* with a Euclidean heuristic and insertion-order tie-breaking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar;

impl Pathfinder for AStar {
    fn find_path(&self, grid: &Grid, start: Cell, goal: Cell) -> PathResult<Path> {
        check_endpoint(grid, start)?;
        check_endpoint(grid, goal)?;
        if start == goal {
            return Ok(Path::new(vec![start]));
        }
        astar(grid, start, goal)
    }
}

fn check_endpoint(grid: &Grid, cell: Cell) -> Result<(), BadPathRequest> {
    if !grid.in_bounds(cell) {
        return Err(BadPathRequest::OutOfBounds(cell));
    }
    if grid.is_blocked(cell) {
        return Err(BadPathRequest::BlockedEndpoint(cell));
    }
    Ok(())
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// Open-set entry.  Ordered so that `BinaryHeap` (a max-heap) pops the
/// lowest `f` first, and among equal `f` the lowest `seq`.
struct Open {
    f:     f64,
    seq:   u64,
    index: usize,
}

impl Ord for Open {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Open {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Open {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Open {}

const NO_PARENT: usize = usize::MAX;

fn astar(grid: &Grid, start: Cell, goal: Cell) -> PathResult<Path> {
    let n = grid.len();
    // Endpoints were bounds-checked by the caller.
    let (Some(start_i), Some(goal_i)) = (grid.index_of(start), grid.index_of(goal)) else {
        return Err(PathError::NotFound { start, goal });
    };

    let mut g_score   = vec![u32::MAX; n];
    let mut came_from = vec![NO_PARENT; n];
    let mut closed    = vec![false; n];
    let mut open      = BinaryHeap::new();
    let mut seq: u64  = 0;

    g_score[start_i] = 0;
    open.push(Open { f: start.euclidean(goal), seq, index: start_i });

    while let Some(Open { index, .. }) = open.pop() {
        if index == goal_i {
            return Ok(reconstruct(grid, &came_from, goal_i));
        }
        // Skip stale entries for cells already expanded.
        if closed[index] {
            continue;
        }
        closed[index] = true;

        let cell = grid.cell_at(index);
        let next_g = g_score[index] + 1;

        for neighbor in grid.neighbors(cell) {
            if !grid.is_walkable(neighbor) {
                continue;
            }
            let Some(ni) = grid.index_of(neighbor) else { continue };
            if closed[ni] || next_g >= g_score[ni] {
                continue;
            }
            g_score[ni] = next_g;
            came_from[ni] = index;
            seq += 1;
            open.push(Open {
                f: f64::from(next_g) + neighbor.euclidean(goal),
                seq,
                index: ni,
            });
        }
    }

    Err(PathError::NotFound { start, goal })
}

fn reconstruct(grid: &Grid, came_from: &[usize], goal_i: usize) -> Path {
    let mut cells = Vec::new();
    let mut cur = goal_i;
    loop {
        cells.push(grid.cell_at(cur));
        let parent = came_from[cur];
        if parent == NO_PARENT {
            break;
        }
        cur = parent;
    }
    cells.reverse();
    Path::new(cells)
}
