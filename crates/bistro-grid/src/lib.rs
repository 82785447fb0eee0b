//! `bistro-grid` — the dining-room tile grid and pathfinding over it.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`grid`]        | `Grid` (row-major `Vec<Marker>`), blueprint parsing         |
//! | [`occupancy`]   | per-tick reconciliation of actor positions into the grid    |
//! | [`pathfinder`]  | `Pathfinder` trait, `Path`, `AStar`                         |
//! | [`error`]       | `GridError`, `PathError`, `BadPathRequest`                  |
//!
//! # Obstacle policy
//!
//! Only [`Marker::Blocked`] cells are obstacles to the planner.  Cells held
//! by an actor or cooling down are walkable during search; two actors never
//! share a cell because the occupancy step refuses to hand a held cell to a
//! second actor.

pub mod error;
pub mod grid;
pub mod occupancy;
pub mod pathfinder;

#[cfg(test)]
mod tests;

pub use error::{BadPathRequest, GridError, GridResult, PathError, PathResult};
pub use grid::{Grid, Marker};
pub use occupancy::Occupancy;
pub use pathfinder::{AStar, Path, Pathfinder};
