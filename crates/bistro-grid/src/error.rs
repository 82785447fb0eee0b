//! Grid and pathfinding error types.

use thiserror::Error;

use bistro_core::Cell;

/// Errors produced while building or writing the grid.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("cell {0} is outside the grid")]
    OutOfBounds(Cell),

    #[error("invalid blueprint: {0}")]
    Blueprint(String),
}

pub type GridResult<T> = Result<T, GridError>;

/// Why a path request was rejected before any search ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BadPathRequest {
    #[error("endpoint {0} is outside the grid")]
    OutOfBounds(Cell),

    #[error("endpoint {0} is blocked")]
    BlockedEndpoint(Cell),
}

/// Errors produced by a [`Pathfinder`][crate::Pathfinder].
///
/// Both variants are programming or data errors: the floor plan is static
/// and every goal is precomputed from reachable geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("bad path request: {0}")]
    BadRequest(#[from] BadPathRequest),

    #[error("no path from {start} to {goal}")]
    NotFound { start: Cell, goal: Cell },
}

pub type PathResult<T> = Result<T, PathError>;
