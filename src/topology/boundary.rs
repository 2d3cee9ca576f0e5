//! True external boundary: edges/faces that never receive interface elements.
//!
//! Each registered edge or face is keyed by its signature and carries the
//! physical group the reader assigned it. Boundary elements are later emitted
//! for these faces so external loads can be applied.

use std::collections::{BTreeMap, HashSet};

use crate::topology::ids::NodeId;
use crate::topology::signature::Signature;

/// Signature -> physical group table of true-boundary edges/faces.
#[derive(Clone, Debug, Default)]
pub struct TrueBoundary {
    groups: BTreeMap<Signature, i32>,
    nodes: HashSet<NodeId>,
}

impl TrueBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an edge or face. Re-registering a signature keeps the first
    /// group and returns `false`.
    pub fn insert(&mut self, vertices: impl IntoIterator<Item = NodeId>, group: i32) -> bool {
        let sig = Signature::new(vertices);
        if self.groups.contains_key(&sig) {
            return false;
        }
        self.nodes.extend(sig.vertices().iter().copied());
        self.groups.insert(sig, group);
        true
    }

    #[inline]
    pub fn group_of(&self, sig: &Signature) -> Option<i32> {
        self.groups.get(sig).copied()
    }

    #[inline]
    pub fn contains(&self, sig: &Signature) -> bool {
        self.groups.contains_key(sig)
    }

    /// True when `node` is a vertex of some registered edge/face.
    #[inline]
    pub fn touches(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Registered signatures in ascending order with their groups.
    pub fn iter(&self) -> impl Iterator<Item = (&Signature, i32)> + '_ {
        self.groups.iter().map(|(s, &g)| (s, g))
    }
}
