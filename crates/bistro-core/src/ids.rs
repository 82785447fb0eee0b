//! Strongly typed identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they work as map keys and give a
//! deterministic iteration order when sorted.  Identifiers are handed out
//! monotonically by the scene and never reused within one run.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The identifier following `self` in allocation order.
            #[inline]
            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Identity of a guest or waiter.  Also the value an occupied grid cell
    /// carries.
    pub struct ActorId(u32);
}

typed_id! {
    /// Identity of a seated party.
    pub struct GroupId(u32);
}

typed_id! {
    /// Index of a table in the floor plan.
    pub struct TableId(u16);
}

typed_id! {
    /// Identity of an order taken by a waiter.
    pub struct OrderId(u32);
}
