//! Strongly typed, zero-cost identifier wrappers.
//!
//! Every cross-reference in the generator (cell → incident edges, edge →
//! owning route, connection → trip) is one of these indices into a flat
//! arena, never a pointer.  All IDs are `Copy + Ord + Hash` so they can be
//! used as map keys and sorted without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
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

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of an ingested grid cell in the region arena.
    pub struct CellId(u32);
}

typed_id! {
    /// Index of an edge (real track or synthetic hop) in the region arena.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Index of a route in the final route list.
    pub struct RouteId(u32);
}

typed_id! {
    /// Groups the connections of one simulated vehicle run over a route.
    pub struct SequenceId(u32);
}
