//! Scripted single-axis stepping.
//!
//! Sitting down and standing up move the actor between a stand cell and a
//! chair point that need not be tile-aligned.  The x axis is resolved fully
//! before y, one pixel per tick.

use bistro_core::{Direction, Point};

/// One step from `pos` toward `target`: x first, then y.
///
/// Returns `pos` unchanged once it equals `target`.
pub fn approach(pos: Point, target: Point) -> Point {
    if pos.x != target.x {
        pos.shifted((target.x - pos.x).signum(), 0)
    } else if pos.y != target.y {
        pos.shifted(0, (target.y - pos.y).signum())
    } else {
        pos
    }
}

/// Eight-way facing from `from` toward `to`, or `None` if they coincide.
pub fn facing_toward(from: Point, to: Point) -> Option<Direction> {
    Direction::from_delta(to.y - from.y, to.x - from.x)
}
