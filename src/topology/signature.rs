//! Face/edge signatures.
//!
//! A signature is the vertex-id set of a face or edge sorted ascending. Two
//! faces are the same geometric entity iff their signatures are equal,
//! regardless of traversal direction or starting vertex. This is the only
//! equality test used for neighbour matching and "done" bookkeeping.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::topology::ids::NodeId;

/// Sorted vertex ids of a face or edge.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(Vec<NodeId>);

impl Signature {
    /// Builds the signature of the given vertices.
    pub fn new(vertices: impl IntoIterator<Item = NodeId>) -> Self {
        let mut ids: Vec<NodeId> = vertices.into_iter().collect();
        ids.sort_unstable();
        Signature(ids)
    }

    /// Sorted vertex ids.
    #[inline]
    pub fn vertices(&self) -> &[NodeId] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when a vertex occurs twice (coincident nodes).
    pub fn has_repeats(&self) -> bool {
        self.0.iter().tuple_windows().any(|(a, b)| a == b)
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.0.binary_search(&node).is_ok()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(","))
    }
}
