//! Result of an insertion run, as consumed by mesh writers.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::algs::duplicate::DuplicateRegistry;
use crate::config::Policy;
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshError;
use crate::topology::cell_type::Dimension;
use crate::topology::element::{BoundaryElement, Element, FlowElement, InterfaceElement};
use crate::topology::ids::{ElementId, NodeId};
use crate::topology::node::{Node, NodeKind};

/// Counts reported after a run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionSummary {
    pub interface_elements: usize,
    pub flow_elements: usize,
    pub boundary_elements: usize,
    /// Original nodes that were split.
    pub split_nodes: usize,
    /// Duplicate plus flow node records created.
    pub nodes_added: usize,
    /// Distinct interface material tags.
    pub material_tags: usize,
    /// Interfaces with a material tag >= 1.
    pub on_material_interfaces: usize,
    /// Interfaces with tag 0 (bulk cracks).
    pub in_bulk: usize,
    /// Faces skipped because they lie on a notch.
    pub notch_excluded: usize,
}

impl InsertionSummary {
    pub(crate) fn collect(
        interfaces: &[InterfaceElement],
        flow: &[FlowElement],
        boundary: &[BoundaryElement],
        registry: &DuplicateRegistry,
        notch_excluded: usize,
    ) -> Self {
        let tags: BTreeSet<i32> = interfaces.iter().map(|ie| ie.material).collect();
        let on_material_interfaces = interfaces.iter().filter(|ie| ie.material >= 1).count();
        InsertionSummary {
            interface_elements: interfaces.len(),
            flow_elements: flow.len(),
            boundary_elements: boundary.len(),
            split_nodes: registry.len(),
            nodes_added: registry.added_nodes().len(),
            material_tags: tags.len(),
            on_material_interfaces,
            in_bulk: interfaces.len() - on_material_interfaces,
            notch_excluded,
        }
    }

    pub(crate) fn log(&self) {
        log::info!(
            "inserted {} interface elements ({} on material interfaces, {} in the bulk, {} material tags)",
            self.interface_elements,
            self.on_material_interfaces,
            self.in_bulk,
            self.material_tags
        );
        log::info!(
            "{} flow elements, {} boundary elements, {} nodes split into {} new node records",
            self.flow_elements,
            self.boundary_elements,
            self.split_nodes,
            self.nodes_added
        );
    }
}

/// Augmented mesh: original and new nodes, bulk elements with both
/// connectivities, and every emitted element list.
#[derive(Clone, Debug)]
pub struct InterfaceMesh {
    pub policy: Policy,
    pub dimension: Dimension,
    /// Original nodes followed by duplicates and flow nodes.
    pub nodes: Vec<Node>,
    /// Bulk elements in input order; `current` is post-duplication.
    pub bulk: Vec<Element>,
    pub boundary: Vec<BoundaryElement>,
    pub interfaces: Vec<InterfaceElement>,
    pub flow: Vec<FlowElement>,
    pub registry: DuplicateRegistry,
    pub summary: InsertionSummary,
}

impl InterfaceMesh {
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn bulk_element(&self, id: ElementId) -> Option<&Element> {
        self.bulk.iter().find(|e| e.id == id)
    }

    /// Interface elements grouped by material tag.
    pub fn interfaces_by_material(&self) -> BTreeMap<i32, Vec<&InterfaceElement>> {
        let mut out: BTreeMap<i32, Vec<&InterfaceElement>> = BTreeMap::new();
        for ie in &self.interfaces {
            out.entry(ie.material).or_default().push(ie);
        }
        out
    }

    /// Boundary elements grouped by physical group.
    pub fn boundary_by_group(&self) -> BTreeMap<i32, Vec<&BoundaryElement>> {
        let mut out: BTreeMap<i32, Vec<&BoundaryElement>> = BTreeMap::new();
        for be in &self.boundary {
            out.entry(be.group).or_default().push(be);
        }
        out
    }
}

impl DebugInvariants for InterfaceMesh {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "InterfaceMesh invalid");
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        let bulk: HashMap<ElementId, &Element> = self.bulk.iter().map(|e| (e.id, e)).collect();

        // 1) back-references are valid, distinct and share the face
        for ie in &self.interfaces {
            let [a, b] = ie.bulk;
            if a == b {
                return Err(MeshError::InvariantViolation(format!(
                    "interface {} references bulk element {a} twice",
                    ie.id
                )));
            }
            for id in [a, b] {
                let el = bulk.get(&id).ok_or(MeshError::UnknownElement(id))?;
                if el.face_with_signature(&ie.signature).is_none() {
                    return Err(MeshError::InvariantViolation(format!(
                        "interface {}: bulk element {id} has no face {}",
                        ie.id, ie.signature
                    )));
                }
            }
        }

        // 2) no face emitted twice
        let mut seen = HashSet::new();
        if let Some(ie) = self.interfaces.iter().find(|ie| !seen.insert(&ie.signature)) {
            return Err(MeshError::InvariantViolation(format!(
                "face {} has more than one interface element",
                ie.signature
            )));
        }

        if self.policy.duplicates_both_sides() {
            // 3) registry holds at least `duplicity` copies
            let used: HashSet<NodeId> = self
                .bulk
                .iter()
                .flat_map(|e| e.original.iter().copied())
                .collect();
            for n in self
                .nodes
                .iter()
                .filter(|n| n.kind == NodeKind::Original && used.contains(&n.id))
            {
                let copies = self.registry.copies_of(n.id).len();
                if n.class.duplicity >= 2 && copies < usize::from(n.class.duplicity) {
                    return Err(MeshError::InvariantViolation(format!(
                        "node {} has duplicity {} but {copies} copies",
                        n.id, n.class.duplicity
                    )));
                }
            }
            // 4) interfaces never reference a split original
            for ie in &self.interfaces {
                if let Some(n) = ie
                    .connectivity
                    .iter()
                    .find(|&&n| !self.registry.copies_of(n).is_empty())
                {
                    return Err(MeshError::InvariantViolation(format!(
                        "interface {} references split original node {n}",
                        ie.id
                    )));
                }
            }
        }

        // 5) flow elements follow existing interfaces
        if let Some(fe) = self
            .flow
            .iter()
            .find(|fe| fe.interface.get() as usize >= self.interfaces.len())
        {
            return Err(MeshError::InvariantViolation(format!(
                "flow element {} follows missing interface {}",
                fe.id, fe.interface
            )));
        }
        Ok(())
    }
}
