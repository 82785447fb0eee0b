//! `bistro-core` — foundational types for the bistro restaurant simulation.
//!
//! This crate is a dependency of every other `bistro-*` crate.  It has no
//! `bistro-*` dependencies and only `rand` and `thiserror` externally, plus
//! optional `serde`.
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`ids`]    | `ActorId`, `GroupId`, `TableId`, `OrderId`                |
//! | [`geo`]    | `Cell` (tile row/col), `Point` (pixels), `Direction`      |
//! | [`time`]   | `Tick`, `SimClock`, `SimConfig`                           |
//! | [`rng`]    | `ActorRng` (per-actor), `SimRng` (scene-wide)             |
//! | [`error`]  | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Cell, Direction, Point};
pub use ids::{ActorId, GroupId, OrderId, TableId};
pub use rng::{ActorRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};
