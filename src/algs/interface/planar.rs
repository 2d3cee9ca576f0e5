//! Side-B resolution and flow elements for planar (2D) meshes.

use crate::algs::duplicate::DuplicateRegistry;
use crate::mesh_error::MeshError;
use crate::topology::element::Element;
use crate::topology::face_table::LocalFace;
use crate::topology::ids::NodeId;
use crate::topology::mesh::Mesh;

/// Maps each node of `face` on `e` through its position in the neighbour's
/// original connectivity onto the neighbour's current connectivity. Midside
/// nodes are located the same way as corners.
pub fn neighbor_side(e: &Element, face: &LocalFace, n: &Element) -> Result<Vec<NodeId>, MeshError> {
    face.full
        .iter()
        .map(|&i| {
            let orig = e.original[i];
            n.original_position(orig)
                .map(|p| n.current[p])
                .ok_or(MeshError::UnresolvedDuplicate {
                    node: orig,
                    element: n.id,
                })
        })
        .collect()
}

/// Plain grain-boundary edge: every split node takes its other copy, unsplit
/// nodes (typically midsides) stay shared.
pub fn other_copy_side(
    registry: &DuplicateRegistry,
    side_a: &[NodeId],
    neighbor: &Element,
) -> Result<Vec<NodeId>, MeshError> {
    side_a
        .iter()
        .map(|&id| {
            let orig = registry.original_of(id);
            if registry.copies_of(orig).is_empty() {
                return Ok(id);
            }
            registry
                .other_copy(id)
                .ok_or(MeshError::UnresolvedDuplicate {
                    node: orig,
                    element: neighbor.id,
                })
        })
        .collect()
}

/// Flow connectivity `[f(n1), f(n2)]` or `[f(n1), f(mid), f(n2)]`.
pub fn flow_connectivity(
    registry: &mut DuplicateRegistry,
    mesh: &Mesh,
    e: &Element,
    face: &LocalFace,
) -> Result<Vec<NodeId>, MeshError> {
    e.original_full(face)
        .into_iter()
        .map(|n| registry.flow_node(mesh, n))
        .collect()
}
