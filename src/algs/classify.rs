//! Region classification pre-pass.
//!
//! Computes, for every original node, how many regions touch it (its
//! duplicity), whether it lies on a material interface and which material
//! tag it carries. Readers that already know this can skip the pass and call
//! [`MeshBuilder::classify_node`](crate::topology::mesh::MeshBuilder::classify_node)
//! instead.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::algs::adjacency::NodeIncidence;
use crate::topology::boundary::TrueBoundary;
use crate::topology::element::Element;
use crate::topology::ids::NodeId;
use crate::topology::mesh::Mesh;
use crate::topology::node::NodeClass;

/// What counts as one region when splitting nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionMode {
    /// Elements sharing a domain id form one region.
    Domain,
    /// Every element is its own region.
    Element,
}

impl RegionMode {
    /// Region key of the element stored at position `pos`.
    #[inline]
    pub(crate) fn key(self, pos: usize, element: &Element) -> i64 {
        match self {
            RegionMode::Domain => i64::from(element.domain),
            RegionMode::Element => pos as i64,
        }
    }
}

/// Classifies every original node from the regions of its incident elements.
///
/// * duplicity: region count when at least two regions meet, otherwise 1 for
///   nodes on `boundary` and 0 elsewhere;
/// * `is_interface`: at least two distinct domains meet;
/// * material: the domain id, or the sum of the distinct domain ids on an
///   interface node.
pub fn classify_by_regions(
    mesh: &Mesh,
    mode: RegionMode,
    boundary: &TrueBoundary,
) -> Vec<(NodeId, NodeClass)> {
    let incidence = NodeIncidence::build(mesh);
    mesh.nodes()
        .iter()
        .enumerate()
        .map(|(p, node)| {
            let incident = incidence.elements(p);
            let domains: Vec<i32> = incident
                .iter()
                .map(|&e| mesh.elements()[e].domain)
                .sorted_unstable()
                .dedup()
                .collect();
            let regions = match mode {
                RegionMode::Domain => domains.len(),
                RegionMode::Element => incident.len(),
            };
            let duplicity = if regions >= 2 {
                u8::try_from(regions).unwrap_or(u8::MAX)
            } else if boundary.touches(node.id) {
                1
            } else {
                0
            };
            let is_interface = domains.len() >= 2;
            let material = if is_interface {
                domains.iter().sum()
            } else {
                domains.first().copied().unwrap_or(0)
            };
            (node.id, NodeClass::new(duplicity, is_interface, material))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::cell_type::ElementType;
    use crate::topology::mesh::MeshBuilder;

    fn two_quads() -> Mesh {
        let mut b = MeshBuilder::new();
        b.node(1, [0.0, 0.0])
            .node(2, [1.0, 0.0])
            .node(3, [1.0, 1.0])
            .node(4, [0.0, 1.0])
            .node(5, [2.0, 0.0])
            .node(6, [2.0, 1.0])
            .element(1, ElementType::Quad4, 1, [1, 2, 3, 4])
            .element(2, ElementType::Quad4, 2, [2, 5, 6, 3])
            .boundary_edge(1, 2, 1)
            .boundary_edge(4, 1, 1);
        b.build().unwrap()
    }

    fn class(classes: &[(NodeId, NodeClass)], id: u64) -> NodeClass {
        classes
            .iter()
            .find(|(n, _)| n.get() == id)
            .map(|(_, c)| *c)
            .unwrap()
    }

    #[test]
    fn domain_mode_marks_the_shared_edge() {
        let mesh = two_quads();
        let classes = classify_by_regions(&mesh, RegionMode::Domain, mesh.boundary());
        assert_eq!(class(&classes, 2), NodeClass::new(2, true, 3));
        assert_eq!(class(&classes, 3), NodeClass::new(2, true, 3));
        assert_eq!(class(&classes, 1), NodeClass::new(1, false, 1));
        // not on a registered boundary edge
        assert_eq!(class(&classes, 6), NodeClass::new(0, false, 2));
    }

    #[test]
    fn element_mode_counts_elements() {
        let mut b = MeshBuilder::new();
        b.node(1, [0.0, 0.0])
            .node(2, [1.0, 0.0])
            .node(3, [0.0, 1.0])
            .node(4, [1.0, 1.0])
            .element(1, ElementType::Tri3, 4, [1, 2, 3])
            .element(2, ElementType::Tri3, 4, [2, 4, 3]);
        let mesh = b.build().unwrap();
        let classes = classify_by_regions(&mesh, RegionMode::Element, mesh.boundary());
        assert_eq!(class(&classes, 2), NodeClass::new(2, false, 4));
        assert_eq!(class(&classes, 1), NodeClass::new(0, false, 4));
    }

    #[test]
    fn builder_applies_auto_classification() {
        let mut b = MeshBuilder::new();
        b.node(1, [0.0, 0.0])
            .node(2, [1.0, 0.0])
            .node(3, [0.0, 1.0])
            .node(4, [1.0, 1.0])
            .element(1, ElementType::Tri3, 1, [1, 2, 3])
            .element(2, ElementType::Tri3, 2, [2, 4, 3])
            .auto_classify(RegionMode::Domain)
            .classify_node(4, NodeClass::new(0, false, 9));
        let mesh = b.build().unwrap();
        assert_eq!(mesh.class_of(NodeId::new(2)).unwrap().duplicity, 2);
        // explicit entries win over the pre-pass
        assert_eq!(mesh.class_of(NodeId::new(4)).unwrap().material, 9);
    }
}
