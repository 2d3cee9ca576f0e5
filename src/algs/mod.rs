//! Re-export public algorithms.

pub mod adjacency;
pub mod boundary;
pub mod classify;
pub mod duplicate;
pub mod interface;
pub mod notch;

pub use adjacency::AdjacencyIndex;
pub use classify::{RegionMode, classify_by_regions};
pub use duplicate::DuplicateRegistry;
pub use interface::{InsertionSummary, InterfaceBuilder, InterfaceMesh};
pub use notch::Notch;
