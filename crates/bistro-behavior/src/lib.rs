//! `bistro-behavior` — what guests and waiters do and why.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                         |
//! |------------|------------------------------------------------------------------|
//! | [`menu`]   | `MenuItem`, `Menu`, `Dish`, CSV loader                           |
//! | [`floor`]  | `FloorPlan`, `Table`, `Seat`, `TableBook`                        |
//! | [`note`]   | mailbox `Note`s, queue `Event`s, `Order`, `Course`               |
//! | [`stage`]  | `Stage<'a>` / `FrontDesk<'a>` — per-tick borrowed scene state    |
//! | [`guest`]  | `Guest` and its life cycle                                       |
//! | [`group`]  | `GuestGroup`, `GroupState`, `GroupStep` — the barrier            |
//! | [`waiter`] | `Waiter` and its life cycle                                      |
//! | [`error`]  | `BehaviorError`, `BehaviorResult<T>`                             |
//!
//! # Tick order
//!
//! The scheduler updates every waiter, then every group.  Within a group the
//! bill payer goes first.  Each actor runs its life-cycle state, which may
//! swap its action, and then runs the action itself.
//!
//! # Coordination
//!
//! Waiters learn about work from the event queue (`arrive`, `order-food`,
//! `order-dessert`, `order-bill`, `order-ready`).  Waiters and guests talk
//! through the single-slot mailbox, one note and one reply at a time.

pub mod error;
pub mod floor;
pub mod group;
pub mod guest;
pub mod menu;
pub mod note;
pub mod stage;
pub mod waiter;


pub use error::{BehaviorError, BehaviorResult};
pub use floor::{FloorPlan, Seat, Table, TableBook};
pub use group::{GroupState, GroupStep, GuestGroup};
pub use guest::{BillRole, Guest, GuestLifeKind};
pub use menu::{Dish, Menu, MenuItem, MenuKind, load_menu_csv, load_menu_reader};
pub use note::{Course, Event, Note, Order};
pub use stage::{FrontDesk, Stage};
pub use waiter::{Waiter, WaiterLifeKind};
