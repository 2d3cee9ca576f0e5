//! Bulk, interface, boundary and flow element records.
//!
//! A bulk element keeps two independent connectivities: `original` is the
//! pre-duplication node list and never changes; `current` is rewritten as
//! nodes are replaced by their duplicates. Both are indexed by the same
//! local node numbering, so a local face maps onto either one through the
//! same face table row.

use serde::{Deserialize, Serialize};

use crate::topology::cell_type::ElementType;
use crate::topology::face_table::{LocalFace, faces_of};
use crate::topology::ids::{ElementId, NodeId};
use crate::topology::signature::Signature;

/// An ordinary finite element of the input mesh.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub ty: ElementType,
    /// Domain (material region, grain) the element belongs to.
    pub domain: i32,
    pub original: Vec<NodeId>,
    pub current: Vec<NodeId>,
}

impl Element {
    pub fn new(id: ElementId, ty: ElementType, domain: i32, connectivity: Vec<NodeId>) -> Self {
        Element {
            id,
            ty,
            domain,
            current: connectivity.clone(),
            original: connectivity,
        }
    }

    #[inline]
    pub fn faces(&self) -> &'static [LocalFace] {
        faces_of(self.ty)
    }

    /// Signature of local face `face` in the original connectivity.
    pub fn original_signature(&self, face: &LocalFace) -> Signature {
        Signature::new(face.corners.iter().map(|&i| self.original[i]))
    }

    /// Original ids of the face's full node sequence.
    pub fn original_full(&self, face: &LocalFace) -> Vec<NodeId> {
        face.full.iter().map(|&i| self.original[i]).collect()
    }

    /// Current ids of the face's full node sequence.
    pub fn current_full(&self, face: &LocalFace) -> Vec<NodeId> {
        face.full.iter().map(|&i| self.current[i]).collect()
    }

    /// Local index of `node` in the original connectivity.
    pub fn original_position(&self, node: NodeId) -> Option<usize> {
        self.original.iter().position(|&n| n == node)
    }

    /// Index of the local face whose original signature equals `sig`.
    pub fn face_with_signature(&self, sig: &Signature) -> Option<usize> {
        self.faces()
            .iter()
            .position(|f| f.corners.len() == sig.len() && &self.original_signature(f) == sig)
    }
}

/// Zero-thickness cohesive element between two bulk elements.
///
/// `connectivity` holds side A followed by side B; see the dispatcher for the
/// exact per-arity layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterfaceElement {
    pub id: ElementId,
    pub connectivity: Vec<NodeId>,
    /// `[side A, side B]` bulk elements.
    pub bulk: [ElementId; 2],
    /// 0 = bulk crack; >= 1 = material interface.
    pub material: i32,
    /// Apex of side A's bulk element opposite the face (solids only).
    pub opposite_vertex: Option<NodeId>,
    /// Original-id signature of the shared face.
    pub signature: Signature,
}

impl InterfaceElement {
    pub fn side_a(&self) -> &[NodeId] {
        &self.connectivity[..self.connectivity.len() / 2]
    }

    pub fn side_b(&self) -> &[NodeId] {
        &self.connectivity[self.connectivity.len() / 2..]
    }
}

/// Lower-dimensional element on the true external boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundaryElement {
    pub id: ElementId,
    pub connectivity: Vec<NodeId>,
    /// Physical group of the boundary edge/face.
    pub group: i32,
    /// Bulk element the face was taken from.
    pub bulk: ElementId,
    /// Domain owning the face.
    pub domain: i32,
}

/// Hydraulic companion of a planar interface element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowElement {
    pub id: ElementId,
    pub connectivity: Vec<NodeId>,
    /// Interface element this flow element runs along.
    pub interface: ElementId,
}
