//! `bistro-actor` — what every guest and waiter is made of.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`actor`]     | `Actor`, `Body`, `ActorKind`                                   |
//! | [`action`]    | `ActionState` (tagged union), `ActionKind`, `ActionCtx`        |
//! | [`animation`] | `Animation`, `Animator` trait, headless `ClockAnimator`        |
//! | [`mailbox`]   | `Mailbox<T>` — single-slot store-and-forward notes             |
//! | [`variant`]   | `VariantPool` — per-scene guest appearance pool                |
//! | [`error`]     | `ActorError`, `ActorResult<T>`                                 |
//!
//! # Two layers of state
//!
//! An actor runs exactly one [`ActionState`] at a time: a short physical
//! behaviour such as walking or eating.  The long-lived narrative (ordering,
//! paying, leaving) lives one crate up in `bistro-behavior` and swaps the
//! action whenever the current one is finished.  Swapping always runs the new
//! action's `init` before its first `update`.

pub mod action;
pub mod actor;
pub mod animation;
pub mod error;
pub mod mailbox;
pub mod variant;

#[cfg(test)]
mod tests;

pub use action::{ActionCtx, ActionKind, ActionState, Consume, DRINK_LOOPS, EAT_LOOPS};
pub use actor::{Actor, ActorKind, Body};
pub use animation::{Animation, Animator, ClockAnimator};
pub use error::{ActorError, ActorResult};
pub use mailbox::{Mailbox, Message};
pub use variant::VariantPool;
