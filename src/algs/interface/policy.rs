//! Policy-supplied predicates of the shared traversal.
//!
//! The traversal skeleton is the same for every policy; policies differ only
//! in which faces are eligible, how side B is resolved and how the interface
//! element is tagged.

use crate::config::Policy;
use crate::mesh_error::MeshError;
use crate::topology::cell_type::Dimension;
use crate::topology::ids::NodeId;
use crate::topology::node::NodeClass;

/// Largest junction the polycrystal policy resolves (quadruple point).
pub const MAX_JUNCTION_DUPLICITY: u8 = 4;

/// How the far side of an eligible face is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SideB {
    /// Read the neighbour's current connectivity.
    Neighbor,
    /// Plain grain-boundary edge: take the other of the two copies.
    OtherCopy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Skip,
    Insert(SideB),
}

/// Eligibility of a face from the classification of its corners.
pub fn verdict(
    policy: Policy,
    corners: &[NodeId],
    classes: &[NodeClass],
) -> Result<Verdict, MeshError> {
    let tracked = classes.iter().all(|c| c.duplicity >= 2);
    match policy {
        Policy::DomainBoundary => Ok(Verdict::Insert(SideB::Neighbor)),
        Policy::MaterialInterface | Policy::Everywhere => Ok(if tracked {
            Verdict::Insert(SideB::Neighbor)
        } else {
            Verdict::Skip
        }),
        Policy::Polycrystal => {
            if !tracked {
                return Ok(Verdict::Skip);
            }
            if let Some((node, c)) = corners
                .iter()
                .zip(classes)
                .find(|(_, c)| c.duplicity > MAX_JUNCTION_DUPLICITY)
            {
                return Err(MeshError::UnexpectedDuplicity {
                    node: *node,
                    duplicity: c.duplicity,
                });
            }
            if classes.iter().all(|c| c.duplicity == 2) {
                Ok(Verdict::Insert(SideB::OtherCopy))
            } else {
                Ok(Verdict::Insert(SideB::Neighbor))
            }
        }
    }
}

/// Material tag of an interface element from its corner classification.
///
/// Under DomainBoundary a face whose corners are all interface nodes takes
/// the material of its first corner. Otherwise planar edges fall back to the
/// first non-interface corner, while solid faces are bulk cracks (tag 0).
pub fn material_tag(policy: Policy, dimension: Dimension, classes: &[NodeClass]) -> i32 {
    let all_interface = classes.iter().all(|c| c.is_interface);
    match policy {
        Policy::MaterialInterface | Policy::Polycrystal => 0,
        Policy::Everywhere => i32::from(all_interface),
        Policy::DomainBoundary if all_interface => classes.first().map_or(0, |c| c.material),
        Policy::DomainBoundary => match dimension {
            Dimension::Two => classes
                .iter()
                .find(|c| !c.is_interface)
                .map_or(0, |c| c.material),
            Dimension::Three => 0,
        },
    }
}
