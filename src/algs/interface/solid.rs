//! Side-B resolution for solid (3D) meshes.
//!
//! A vertex of the shared face may already carry a different copy on the
//! neighbour's side, so each one is resolved through the duplicate registry
//! against the neighbour's current full face.

use crate::algs::duplicate::DuplicateRegistry;
use crate::mesh_error::MeshError;
use crate::topology::element::Element;
use crate::topology::face_table::LocalFace;
use crate::topology::ids::NodeId;

pub fn registry_side(
    registry: &DuplicateRegistry,
    e: &Element,
    face: &LocalFace,
    n: &Element,
    n_face: &LocalFace,
) -> Result<Vec<NodeId>, MeshError> {
    let candidates = n.current_full(n_face);
    e.original_full(face)
        .into_iter()
        .map(|orig| {
            registry
                .copy_among(orig, &candidates)
                .ok_or(MeshError::UnresolvedDuplicate {
                    node: orig,
                    element: n.id,
                })
        })
        .collect()
}

/// Current id of the apex opposite `face`.
#[inline]
pub fn opposite_vertex(e: &Element, face: &LocalFace) -> Option<NodeId> {
    face.opposite.map(|i| e.current[i])
}
