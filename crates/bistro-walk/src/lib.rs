//! `bistro-walk` — turning cell paths into continuous per-tick motion.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`walk_path`] | `WalkPath` — one walking leg, one pixel per tick             |
//! | [`approach`]  | single-axis stepping toward a pixel target (sit / stand up)  |
//! | [`error`]     | `WalkError`, `WalkResult<T>`                                 |
//!
//! # Movement model
//!
//! Actors move exactly one pixel per tick.  Crossing one cell therefore
//! takes `tile_size` ticks, and a path of `N` cells takes `(N - 1) *
//! tile_size` ticks.  A `WalkPath` is built fresh for every goal and thrown
//! away when the goal is reached or the owning action is replaced; to
//! re-plan, build a new one.

pub mod approach;
pub mod error;
pub mod walk_path;

#[cfg(test)]
mod tests;

pub use approach::{approach, facing_toward};
pub use error::{WalkError, WalkResult};
pub use walk_path::WalkPath;
