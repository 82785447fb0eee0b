//! `bistro-sim` — tick loop orchestrator for the bistro simulation.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Timers     — due order-ready events move onto the event queue.
//!   ② Animations — animator clock advances to `tick`.
//!   ③ Spawner    — optional periodic arrival of a random-size group.
//!   ④ Waiters    — life-cycle update (may poll one event), then action.
//!   ⑤ Groups     — each guest's life-cycle + action, then the barrier:
//!                    all guests done → next shared state (observer hook).
//!   ⑥ Occupancy  — clear cooldowns, reconcile every actor's grid cell.
//!   ⑦ Departures — finished groups release table, cells, mailbox slots,
//!                    variants, and are dropped from the scene.
//! ```
//!
//! Waiters run before guests, so a note sent by a waiter is seen by its
//! guest on the same tick and the reply reaches the waiter on the next.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bistro_actor::ClockAnimator;
//! use bistro_grid::{AStar, Grid};
//! use bistro_sim::{NoopObserver, SimBuilder};
//!
//! let grid = Grid::from_blueprint(&ROOM)?;
//! let mut sim = SimBuilder::new(config, grid, plan, AStar, ClockAnimator::with_defaults(48, 32)?)
//!     .initial_group(2)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, SimStats};
