//! `NodeId` / `ElementId`: strong, zero-cost handles for mesh entities
//!
//! Nodes and elements are addressed by the stable external identifiers the
//! mesh reader assigned them. All cross-references in this crate (neighbour
//! lists, bulk back-references, duplicate chains) are stored as these ids,
//! never as shared handles, so there is no ownership cycle between elements.
//!
//! Both types are `repr(transparent)` wrappers around `u64`. Unlike a storage
//! position, an id carries no ordering meaning beyond being a total order used
//! to build face signatures.

use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw external identifier.
            #[inline]
            pub const fn new(raw: u64) -> Self {
                $name(raw)
            }

            /// Returns the raw identifier.
            #[inline]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        /// Prints only the raw integer.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            #[inline]
            fn from(raw: u64) -> Self {
                $name(raw)
            }
        }
    };
}

id_type!(
    /// External identifier of a node (original or duplicate).
    NodeId
);

id_type!(
    /// External identifier of an element (bulk, interface, boundary or flow).
    ElementId
);
