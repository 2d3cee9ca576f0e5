//! Duplicate-node registry.
//!
//! Maps every split original node to its ordered copies, one per incident
//! region (index 0 = first region met in input order). The registry is built
//! in one pass before traversal, which also rewrites each bulk element's
//! *current* connectivity to its region's copies; the original connectivity
//! is never touched. Flow nodes for hydraulic coupling are allocated lazily
//! afterwards, above every duplicate id.

use hashbrown::HashMap;
use itertools::Itertools;

use crate::algs::adjacency::AdjacencyIndex;
use crate::algs::classify::RegionMode;
use crate::config::Policy;
use crate::mesh_error::MeshError;
use crate::topology::element::Element;
use crate::topology::ids::NodeId;
use crate::topology::mesh::Mesh;
use crate::topology::node::{Node, NodeKind};
use crate::topology::signature::Signature;

/// original node -> duplicate sequence, plus flow nodes and boundary owners.
#[derive(Clone, Debug, Default)]
pub struct DuplicateRegistry {
    copies: HashMap<NodeId, Vec<NodeId>>,
    origin: HashMap<NodeId, NodeId>,
    flow: HashMap<NodeId, NodeId>,
    boundary_owner: HashMap<Signature, i32>,
    added: Vec<Node>,
    next_id: u64,
}

impl DuplicateRegistry {
    /// Splits the nodes of `mesh` according to `policy` and rewrites the
    /// current connectivity of `elements` (a working copy of
    /// `mesh.elements()`, same order).
    ///
    /// * MaterialInterface / Polycrystal: regions are domains; a node with
    ///   duplicity >= 2 gets `duplicity` fresh copies. More incident domains
    ///   than that is [`MeshError::RegionCountExceedsDuplicity`].
    /// * Everywhere: regions are elements; a node with duplicity >= 2 gets
    ///   `max(duplicity, regions)` fresh copies.
    /// * DomainBoundary: regions are elements; a node shared by >= 2
    ///   elements is split, keeping its own id as copy 0.
    pub fn build(
        mesh: &Mesh,
        adjacency: &AdjacencyIndex,
        policy: Policy,
        elements: &mut [Element],
    ) -> Result<Self, MeshError> {
        debug_assert_eq!(elements.len(), mesh.elements().len());
        let mode = policy.region_mode();
        let mut reg = DuplicateRegistry {
            next_id: mesh.max_node_id() + 1,
            ..Self::default()
        };
        // node -> region keys in first-encounter order; None when not split
        let mut plans: HashMap<NodeId, Option<Vec<i64>>> = HashMap::new();
        let mut unused_copies = 0usize;

        for (sig, group) in mesh.boundary().iter() {
            match Self::owner_of(mesh, adjacency, sig) {
                Some(domain) => {
                    reg.boundary_owner.insert(sig.clone(), domain);
                }
                None => log::debug!("boundary entity {sig} (group {group}) is no element face"),
            }
        }

        for (e, el) in mesh.elements().iter().enumerate() {
            let key = mode.key(e, el);
            for (k, &n) in el.original.iter().enumerate() {
                if !plans.contains_key(&n) {
                    let regions: Vec<i64> = adjacency
                        .elements_of_node(n)
                        .iter()
                        .map(|&p| mode.key(p, &mesh.elements()[p]))
                        .unique()
                        .collect();
                    let count = Self::copy_count(mesh, policy, n, regions.len())?;
                    if count > 0 {
                        unused_copies += count.saturating_sub(regions.len());
                        reg.allocate(mesh, policy, n, count)?;
                        plans.insert(n, Some(regions));
                    } else {
                        plans.insert(n, None);
                    }
                }
                if let Some(Some(regions)) = plans.get(&n) {
                    let r = regions.iter().position(|&x| x == key).ok_or(
                        MeshError::UnresolvedDuplicate {
                            node: n,
                            element: el.id,
                        },
                    )?;
                    elements[e].current[k] = reg.copies[&n][r];
                }
            }
        }

        if unused_copies > 0 {
            log::warn!(
                "{unused_copies} duplicate nodes belong to no element: node duplicity exceeds incident region count"
            );
        }
        log::debug!(
            "{} policy split {} nodes into {} new ids",
            policy.as_str(),
            reg.copies.len(),
            reg.added.len()
        );
        Ok(reg)
    }

    /// Domain of the first element, in input order, having `sig` as a face.
    fn owner_of(mesh: &Mesh, adjacency: &AdjacencyIndex, sig: &Signature) -> Option<i32> {
        let first = *sig.vertices().first()?;
        adjacency
            .elements_of_node(first)
            .iter()
            .map(|&p| &mesh.elements()[p])
            .find(|el| el.face_with_signature(sig).is_some())
            .map(|el| el.domain)
    }

    fn copy_count(
        mesh: &Mesh,
        policy: Policy,
        node: NodeId,
        regions: usize,
    ) -> Result<usize, MeshError> {
        if policy == Policy::DomainBoundary {
            return Ok(if regions >= 2 { regions } else { 0 });
        }
        let duplicity = mesh.class_of(node)?.duplicity;
        if duplicity < 2 {
            return Ok(0);
        }
        if policy.region_mode() == RegionMode::Domain && regions > usize::from(duplicity) {
            return Err(MeshError::RegionCountExceedsDuplicity {
                node,
                regions,
                duplicity,
            });
        }
        Ok(usize::from(duplicity).max(regions))
    }

    fn allocate(
        &mut self,
        mesh: &Mesh,
        policy: Policy,
        node: NodeId,
        count: usize,
    ) -> Result<(), MeshError> {
        let keep_original = policy == Policy::DomainBoundary;
        let mut ids = Vec::with_capacity(count);
        for i in 0..count {
            if i == 0 && keep_original {
                ids.push(node);
            } else {
                ids.push(self.fresh(mesh, node, NodeKind::Duplicate { of: node })?);
            }
        }
        self.copies.insert(node, ids);
        Ok(())
    }

    fn fresh(&mut self, mesh: &Mesh, of: NodeId, kind: NodeKind) -> Result<NodeId, MeshError> {
        let src = mesh.node(of).ok_or_else(|| MeshError::UnknownNode {
            node: of,
            context: "duplication".into(),
        })?;
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        self.origin.insert(id, of);
        self.added.push(Node {
            id,
            position: src.position,
            class: src.class,
            kind,
        });
        Ok(id)
    }

    /// Copies of `original` in region order; empty when it was not split.
    pub fn copies_of(&self, original: NodeId) -> &[NodeId] {
        self.copies.get(&original).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The original node a duplicate or flow node stems from (`id` itself
    /// for originals).
    pub fn original_of(&self, id: NodeId) -> NodeId {
        self.origin.get(&id).copied().unwrap_or(id)
    }

    /// For a node split in exactly two, the copy that is not `current`.
    pub fn other_copy(&self, current: NodeId) -> Option<NodeId> {
        match self.copies_of(self.original_of(current)) {
            [a, b] if *a == current => Some(*b),
            [a, b] if *b == current => Some(*a),
            _ => None,
        }
    }

    /// The copy of `original` (or `original` itself when unsplit) that
    /// occurs in `candidates`.
    pub fn copy_among(&self, original: NodeId, candidates: &[NodeId]) -> Option<NodeId> {
        match self.copies_of(original) {
            [] => candidates.contains(&original).then_some(original),
            copies => copies.iter().copied().find(|c| candidates.contains(c)),
        }
    }

    /// Flow node of `original`, allocated on first request.
    pub fn flow_node(&mut self, mesh: &Mesh, original: NodeId) -> Result<NodeId, MeshError> {
        if let Some(&f) = self.flow.get(&original) {
            return Ok(f);
        }
        let f = self.fresh(mesh, original, NodeKind::Flow { of: original })?;
        self.flow.insert(original, f);
        Ok(f)
    }

    pub fn flow_of(&self, original: NodeId) -> Option<NodeId> {
        self.flow.get(&original).copied()
    }

    /// Domain of the first element owning a true-boundary edge/face.
    pub fn boundary_owner(&self, sig: &Signature) -> Option<i32> {
        self.boundary_owner.get(sig).copied()
    }

    /// Node records created by the registry (duplicates, then flow nodes).
    pub fn added_nodes(&self) -> &[Node] {
        &self.added
    }

    /// Number of split original nodes.
    pub fn len(&self) -> usize {
        self.copies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.copies.is_empty()
    }

    /// Split originals with their copies, ascending by original id.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &[NodeId])> + '_ {
        self.copies
            .iter()
            .sorted_unstable_by_key(|(k, _)| **k)
            .map(|(k, v)| (*k, v.as_slice()))
    }
}
