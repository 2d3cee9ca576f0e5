//! Mesh topology model: an arena of nodes and bulk elements addressed by id.
//!
//! [`MeshBuilder`] is the populate API used by mesh readers. It collects raw
//! node and element records, node classification and true-boundary
//! edges/faces, then validates everything at once in [`MeshBuilder::build`].
//! The resulting [`Mesh`] is read-only for the interface dispatcher.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::algs::classify::{RegionMode, classify_by_regions};
use crate::mesh_error::MeshError;
use crate::topology::boundary::TrueBoundary;
use crate::topology::cell_type::{Dimension, ElementOrder, ElementType};
use crate::topology::element::Element;
use crate::topology::ids::{ElementId, NodeId};
use crate::topology::node::{Node, NodeClass, Point};

/// Validated input mesh.
#[derive(Clone, Debug)]
pub struct Mesh {
    nodes: Vec<Node>,
    node_pos: HashMap<NodeId, usize>,
    elements: Vec<Element>,
    element_pos: HashMap<ElementId, usize>,
    dimension: Dimension,
    order: ElementOrder,
    boundary: TrueBoundary,
    neighbor_lists: Option<Vec<(ElementId, Vec<ElementId>)>>,
}

impl Mesh {
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Bulk elements in input order.
    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Zero-based storage position of a node id.
    #[inline]
    pub fn position_of(&self, id: NodeId) -> Option<usize> {
        self.node_pos.get(&id).copied()
    }

    #[inline]
    pub fn element_position(&self, id: ElementId) -> Option<usize> {
        self.element_pos.get(&id).copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.position_of(id).map(|i| &self.nodes[i])
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.element_position(id).map(|i| &self.elements[i])
    }

    /// Precomputed classification of an original node.
    pub fn class_of(&self, id: NodeId) -> Result<NodeClass, MeshError> {
        self.node(id)
            .map(|n| n.class)
            .ok_or_else(|| MeshError::UnknownNode {
                node: id,
                context: "classification lookup".into(),
            })
    }

    /// Replaces the classification of the listed nodes.
    pub fn set_classification(
        &mut self,
        classes: impl IntoIterator<Item = (NodeId, NodeClass)>,
    ) -> Result<(), MeshError> {
        for (id, class) in classes {
            let pos = self.position_of(id).ok_or_else(|| MeshError::UnknownNode {
                node: id,
                context: "classification".into(),
            })?;
            self.nodes[pos].class = class;
        }
        Ok(())
    }

    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    #[inline]
    pub fn order(&self) -> ElementOrder {
        self.order
    }

    #[inline]
    pub fn boundary(&self) -> &TrueBoundary {
        &self.boundary
    }

    /// Neighbour lists supplied by the reader, if any.
    pub fn neighbor_lists(&self) -> Option<&[(ElementId, Vec<ElementId>)]> {
        self.neighbor_lists.as_deref()
    }

    /// Largest input node id; fresh ids are allocated above it.
    pub fn max_node_id(&self) -> u64 {
        self.nodes.iter().map(|n| n.id.get()).max().unwrap_or(0)
    }
}

/// Populate API for [`Mesh`].
///
/// ```
/// use cohesive_mesh::prelude::*;
///
/// let mut b = MeshBuilder::new();
/// b.node(1, [0.0, 0.0]).node(2, [1.0, 0.0]).node(3, [0.0, 1.0]);
/// b.element(1, ElementType::Tri3, 1, [1, 2, 3]);
/// let mesh = b.build().unwrap();
/// assert_eq!(mesh.elements().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MeshBuilder {
    nodes: Vec<Node>,
    elements: Vec<Element>,
    classes: Vec<(NodeId, NodeClass)>,
    boundary: Vec<(Vec<NodeId>, i32)>,
    neighbors: Vec<(ElementId, Vec<ElementId>)>,
    auto_classify: Option<RegionMode>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&mut self, id: u64, coords: impl Into<Point>) -> &mut Self {
        self.nodes.push(Node::original(NodeId::new(id), coords.into()));
        self
    }

    /// Adds a bulk element with its domain id.
    pub fn element(
        &mut self,
        id: u64,
        ty: ElementType,
        domain: i32,
        connectivity: impl IntoIterator<Item = u64>,
    ) -> &mut Self {
        let conn = connectivity.into_iter().map(NodeId::new).collect();
        self.elements
            .push(Element::new(ElementId::new(id), ty, domain, conn));
        self
    }

    /// Adds a bulk element given its Gmsh type code.
    pub fn gmsh_element(
        &mut self,
        id: u64,
        code: i32,
        domain: i32,
        connectivity: impl IntoIterator<Item = u64>,
    ) -> Result<&mut Self, MeshError> {
        let ty = ElementType::from_gmsh(code)?;
        Ok(self.element(id, ty, domain, connectivity))
    }

    /// Sets the classification of one node explicitly.
    pub fn classify_node(&mut self, id: u64, class: NodeClass) -> &mut Self {
        self.classes.push((NodeId::new(id), class));
        self
    }

    /// Computes classification from element regions at build time.
    /// Explicit [`classify_node`](Self::classify_node) entries override it.
    pub fn auto_classify(&mut self, mode: RegionMode) -> &mut Self {
        self.auto_classify = Some(mode);
        self
    }

    /// Registers a true-boundary edge (2D).
    pub fn boundary_edge(&mut self, a: u64, b: u64, group: i32) -> &mut Self {
        self.boundary_face([a, b], group)
    }

    /// Registers a true-boundary face by its corner nodes (3D).
    pub fn boundary_face(
        &mut self,
        corners: impl IntoIterator<Item = u64>,
        group: i32,
    ) -> &mut Self {
        self.boundary
            .push((corners.into_iter().map(NodeId::new).collect(), group));
        self
    }

    /// Supplies the neighbour list of one element instead of deriving it
    /// from shared nodes.
    pub fn neighbors(&mut self, id: u64, list: impl IntoIterator<Item = u64>) -> &mut Self {
        self.neighbors.push((
            ElementId::new(id),
            list.into_iter().map(ElementId::new).collect(),
        ));
        self
    }

    /// Validates the collected records and produces the mesh.
    pub fn build(&mut self) -> Result<Mesh, MeshError> {
        let nodes = std::mem::take(&mut self.nodes);
        let elements = std::mem::take(&mut self.elements);
        let first = elements.first().ok_or(MeshError::EmptyMesh)?;
        let (dimension, order) = (first.ty.dimension(), first.ty.order());
        let family = first.ty.family();

        let mut node_pos = HashMap::with_capacity(nodes.len());
        for (i, n) in nodes.iter().enumerate() {
            if node_pos.insert(n.id, i).is_some() {
                return Err(MeshError::DuplicateNodeId(n.id));
            }
        }

        let mut element_pos = HashMap::with_capacity(elements.len());
        for (i, e) in elements.iter().enumerate() {
            match element_pos.entry(e.id) {
                Entry::Occupied(_) => return Err(MeshError::DuplicateElementId(e.id)),
                Entry::Vacant(v) => {
                    v.insert(i);
                }
            }
            if e.ty.dimension() != dimension || e.ty.order() != order {
                return Err(MeshError::MixedElementFamilies {
                    element: e.id,
                    expected: family.clone(),
                    found: e.ty.family(),
                });
            }
            if e.original.len() != e.ty.node_count() {
                return Err(MeshError::ConnectivityLength {
                    element: e.id,
                    expected: e.ty.node_count(),
                    found: e.original.len(),
                });
            }
            if let Some(&missing) = e.original.iter().find(|n| !node_pos.contains_key(n)) {
                return Err(MeshError::UnknownNode {
                    node: missing,
                    context: format!("element {}", e.id),
                });
            }
        }

        let mut boundary = TrueBoundary::new();
        for (corners, group) in std::mem::take(&mut self.boundary) {
            if let Some(&missing) = corners.iter().find(|n| !node_pos.contains_key(n)) {
                return Err(MeshError::UnknownNode {
                    node: missing,
                    context: format!("boundary group {group}"),
                });
            }
            if !boundary.insert(corners.iter().copied(), group) {
                log::debug!("boundary entity {corners:?} registered twice; keeping first group");
            }
        }

        let neighbor_lists = if self.neighbors.is_empty() {
            None
        } else {
            let lists = std::mem::take(&mut self.neighbors);
            for (id, list) in &lists {
                if let Some(bad) = std::iter::once(id).chain(list).find(|e| !element_pos.contains_key(e)) {
                    return Err(MeshError::UnknownElement(*bad));
                }
            }
            Some(lists)
        };

        let mut mesh = Mesh {
            nodes,
            node_pos,
            elements,
            element_pos,
            dimension,
            order,
            boundary,
            neighbor_lists,
        };

        if let Some(mode) = self.auto_classify.take() {
            let classes = classify_by_regions(&mesh, mode, &mesh.boundary);
            mesh.set_classification(classes)?;
        }
        mesh.set_classification(std::mem::take(&mut self.classes))?;

        log::debug!(
            "mesh built: {} nodes, {} {} elements, {} boundary entities",
            mesh.nodes.len(),
            mesh.elements.len(),
            family,
            mesh.boundary.len()
        );
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> MeshBuilder {
        let mut b = MeshBuilder::new();
        b.node(1, [0.0, 0.0])
            .node(2, [1.0, 0.0])
            .node(3, [1.0, 1.0])
            .node(4, [0.0, 1.0]);
        b
    }

    #[test]
    fn builds_and_indexes() {
        let mut b = square();
        b.element(10, ElementType::Quad4, 1, [1, 2, 3, 4])
            .boundary_edge(1, 2, 5)
            .classify_node(3, NodeClass::new(2, true, 3));
        let mesh = b.build().unwrap();
        assert_eq!(mesh.position_of(NodeId::new(3)), Some(2));
        assert_eq!(mesh.element_position(ElementId::new(10)), Some(0));
        assert_eq!(mesh.dimension(), Dimension::Two);
        assert_eq!(mesh.max_node_id(), 4);
        assert_eq!(mesh.class_of(NodeId::new(3)).unwrap().duplicity, 2);
        assert_eq!(mesh.boundary().len(), 1);
    }

    #[test]
    fn empty_mesh_is_rejected() {
        assert_eq!(square().build().unwrap_err(), MeshError::EmptyMesh);
    }

    #[test]
    fn rejects_bad_records() {
        let mut b = square();
        b.node(4, [2.0, 2.0]).element(1, ElementType::Tri3, 1, [1, 2, 3]);
        assert_eq!(b.build().unwrap_err(), MeshError::DuplicateNodeId(NodeId::new(4)));

        let mut b = square();
        b.element(1, ElementType::Tri3, 1, [1, 2, 3])
            .element(1, ElementType::Tri3, 1, [1, 3, 4]);
        assert_eq!(
            b.build().unwrap_err(),
            MeshError::DuplicateElementId(ElementId::new(1))
        );

        let mut b = square();
        b.element(1, ElementType::Tri3, 1, [1, 2]);
        assert!(matches!(
            b.build().unwrap_err(),
            MeshError::ConnectivityLength { expected: 3, found: 2, .. }
        ));

        let mut b = square();
        b.element(1, ElementType::Tri3, 1, [1, 2, 9]);
        assert!(matches!(b.build().unwrap_err(), MeshError::UnknownNode { .. }));
    }

    #[test]
    fn mixed_shapes_of_one_family_are_allowed() {
        let mut b = square();
        b.node(5, [2.0, 0.5])
            .element(1, ElementType::Quad4, 1, [1, 2, 3, 4])
            .element(2, ElementType::Tri3, 1, [2, 5, 3]);
        assert!(b.build().is_ok());

        let mut b = square();
        b.element(1, ElementType::Tri3, 1, [1, 2, 3])
            .element(2, ElementType::Tet4, 1, [1, 2, 3, 4]);
        assert!(matches!(
            b.build().unwrap_err(),
            MeshError::MixedElementFamilies { .. }
        ));
    }

    #[test]
    fn gmsh_codes_are_checked() {
        let mut b = square();
        assert!(b.gmsh_element(1, 2, 1, [1, 2, 3]).is_ok());
        assert_eq!(
            b.gmsh_element(2, 15, 1, [1]).unwrap_err(),
            MeshError::UnsupportedElementType(15)
        );
    }

    #[test]
    fn neighbour_lists_reference_known_elements() {
        let mut b = square();
        b.element(1, ElementType::Tri3, 1, [1, 2, 3]).neighbors(1, [7]);
        assert_eq!(
            b.build().unwrap_err(),
            MeshError::UnknownElement(ElementId::new(7))
        );
    }
}
