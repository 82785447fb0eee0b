//! `bistro-schedule` — the scene's event queue and one-shot delay timers.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`event_queue`] | `EventQueue<E>` — FIFO, one consumer per tick          |
//! | [`delay_queue`] | `DelayQueue<E>` (`BTreeMap<Tick, Vec<E>>`)             |
//!
//! # Timing model
//!
//! Waiters poll the [`EventQueue`] once per tick.  Delayed events ("the
//! food is ready in 200 ticks") go into the [`DelayQueue`]; at the start of
//! every tick the scheduler moves everything that is due into the event
//! queue.  A delayed event therefore becomes visible no earlier than its
//! nominal tick, and possibly later if waiters are busy.  Timers are
//! fire-and-forget: nothing cancels them.

pub mod delay_queue;
pub mod event_queue;


pub use delay_queue::DelayQueue;
pub use event_queue::EventQueue;
