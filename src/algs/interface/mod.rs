//! Interface dispatcher.
//!
//! Walks every bulk element in input order and, for each local face (3D) or
//! edge (2D), decides in this order:
//!
//! 1. a repeated vertex is a [`MeshError::DegenerateFace`];
//! 2. a registered true-boundary face yields a boundary element;
//! 3. a face already processed from the other side is skipped;
//! 4. a face lying on a notch is skipped (and marked processed);
//! 5. the policy decides eligibility from the corner classification;
//! 6. the neighbour sharing the face is searched among the element's
//!    adjacency neighbours by signature ([`MeshError::MissingNeighbor`]
//!    when none does);
//! 7. side B is resolved and one interface element is emitted, plus a flow
//!    element when hydraulic coupling is on.
//!
//! # Parallel variants
//!
//! The traversal is single-threaded. Face discovery order only decides which
//! bulk element becomes side A. A sharded traversal must still merge its
//! "done" sets by signature with a global first-writer-wins rule, otherwise
//! both sides of a face emit a (geometrically identical) interface element.

mod output;
mod planar;
mod policy;
mod solid;

pub use output::{InsertionSummary, InterfaceMesh};
pub use policy::{MAX_JUNCTION_DUPLICITY, SideB, Verdict, material_tag, verdict};

use hashbrown::HashSet;

use crate::algs::adjacency::AdjacencyIndex;
use crate::algs::boundary::BoundaryElementBuilder;
use crate::algs::classify::RegionMode;
use crate::algs::duplicate::DuplicateRegistry;
use crate::config::InsertionConfig;
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshError;
use crate::topology::cell_type::Dimension;
use crate::topology::element::{Element, FlowElement, InterfaceElement};
use crate::topology::face_table::LocalFace;
use crate::topology::ids::{ElementId, NodeId};
use crate::topology::mesh::Mesh;
use crate::topology::node::NodeClass;
use crate::topology::signature::Signature;

/// Drives one insertion run over a read-only mesh and adjacency index.
///
/// ```
/// use cohesive_mesh::prelude::*;
///
/// let mut b = MeshBuilder::new();
/// b.node(1, [0.0, 0.0]).node(2, [1.0, 0.0]).node(3, [1.0, 1.0])
///     .node(4, [0.0, 1.0]).node(5, [2.0, 0.0]).node(6, [2.0, 1.0])
///     .element(1, ElementType::Quad4, 1, [1, 2, 3, 4])
///     .element(2, ElementType::Quad4, 2, [2, 5, 6, 3])
///     .boundary_edge(1, 2, 1).boundary_edge(2, 5, 1).boundary_edge(5, 6, 1)
///     .boundary_edge(6, 3, 1).boundary_edge(3, 4, 1).boundary_edge(4, 1, 1);
/// let mesh = b.build().unwrap();
/// let adjacency = AdjacencyIndex::build(&mesh).unwrap();
/// let config = InsertionConfig::new(Dimension::Two, ElementOrder::Linear, Policy::DomainBoundary);
/// let out = InterfaceBuilder::new(&mesh, &adjacency, config).unwrap().run().unwrap();
/// assert_eq!(out.interfaces.len(), 1);
/// ```
#[derive(Debug)]
pub struct InterfaceBuilder<'a> {
    mesh: &'a Mesh,
    adjacency: &'a AdjacencyIndex,
    config: InsertionConfig,
}

/// Mutable working context of one run.
struct Insertion {
    elements: Vec<Element>,
    registry: DuplicateRegistry,
    done: HashSet<Signature>,
    boundary: BoundaryElementBuilder,
    interfaces: Vec<InterfaceElement>,
    flow: Vec<FlowElement>,
    notch_excluded: usize,
}

impl<'a> InterfaceBuilder<'a> {
    /// Validates `config` on its own and against `mesh`.
    pub fn new(
        mesh: &'a Mesh,
        adjacency: &'a AdjacencyIndex,
        config: InsertionConfig,
    ) -> Result<Self, MeshError> {
        config.validate()?;
        config.validate_against(mesh)?;
        if adjacency.num_elements() != mesh.elements().len() {
            return Err(MeshError::InvalidConfig(format!(
                "adjacency index covers {} elements, mesh has {}",
                adjacency.num_elements(),
                mesh.elements().len()
            )));
        }
        Ok(InterfaceBuilder {
            mesh,
            adjacency,
            config,
        })
    }

    pub fn config(&self) -> &InsertionConfig {
        &self.config
    }

    /// Runs the traversal to completion, or aborts on the first error.
    pub fn run(self) -> Result<InterfaceMesh, MeshError> {
        let policy = self.config.policy;
        log::info!(
            "interface insertion: policy {}, {}D {} mesh, {} bulk elements",
            policy.as_str(),
            self.config.dimension.as_u8(),
            self.config.order.as_str(),
            self.mesh.elements().len()
        );

        let mut elements = self.mesh.elements().to_vec();
        let registry = DuplicateRegistry::build(self.mesh, self.adjacency, policy, &mut elements)?;
        let mut st = Insertion {
            elements,
            registry,
            done: HashSet::new(),
            boundary: BoundaryElementBuilder::new(),
            interfaces: Vec::new(),
            flow: Vec::new(),
            notch_excluded: 0,
        };

        for e in 0..self.mesh.elements().len() {
            self.visit(&mut st, e)?;
        }

        if st.interfaces.is_empty() && !self.config.allow_empty {
            return Err(MeshError::NoInterfaceElements);
        }
        if !self.config.notches.is_empty() && st.notch_excluded == 0 {
            log::warn!(
                "{} notch geometries configured but none excluded a face",
                self.config.notches.len()
            );
        }

        let boundary = st.boundary.finish();
        let summary = InsertionSummary::collect(
            &st.interfaces,
            &st.flow,
            &boundary,
            &st.registry,
            st.notch_excluded,
        );
        summary.log();

        let mut nodes = self.mesh.nodes().to_vec();
        nodes.extend_from_slice(st.registry.added_nodes());
        let out = InterfaceMesh {
            policy,
            dimension: self.config.dimension,
            nodes,
            bulk: st.elements,
            boundary,
            interfaces: st.interfaces,
            flow: st.flow,
            registry: st.registry,
            summary,
        };
        out.debug_assert_invariants();
        Ok(out)
    }

    fn visit(&self, st: &mut Insertion, e: usize) -> Result<(), MeshError> {
        let el = &self.mesh.elements()[e];
        for (f, face) in el.faces().iter().enumerate() {
            let sig = el.original_signature(face);
            if sig.has_repeats() {
                return Err(MeshError::DegenerateFace {
                    element: el.id,
                    face: f,
                    signature: sig,
                });
            }

            if let Some(group) = self.mesh.boundary().group_of(&sig) {
                let domain = st.registry.boundary_owner(&sig).ok_or_else(|| {
                    MeshError::InvariantViolation(format!(
                        "true-boundary face {sig} of element {} has no owner",
                        el.id
                    ))
                })?;
                if st.boundary.record(&sig, group, domain, &st.elements[e], face) {
                    log::debug!("element {}, face {f}: true boundary {sig}, group {group}", el.id);
                }
                continue;
            }

            if st.done.contains(&sig) {
                continue;
            }

            let corners: Vec<NodeId> = face.corners.iter().map(|&i| el.original[i]).collect();
            if self.on_notch(&corners)? {
                log::debug!("element {}, face {f}: {sig} lies on a notch", el.id);
                st.notch_excluded += 1;
                st.done.insert(sig);
                continue;
            }

            let classes = corners
                .iter()
                .map(|&n| self.mesh.class_of(n))
                .collect::<Result<Vec<NodeClass>, _>>()?;
            let rule = match verdict(self.config.policy, &corners, &classes)? {
                Verdict::Skip => continue,
                Verdict::Insert(rule) => rule,
            };

            let (n, nf) = self
                .find_neighbor(e, &sig)
                .ok_or_else(|| MeshError::MissingNeighbor {
                    element: el.id,
                    face: f,
                    signature: sig.clone(),
                })?;
            let neighbor = &self.mesh.elements()[n];
            if self.config.policy.region_mode() == RegionMode::Domain
                && neighbor.domain == el.domain
            {
                log::debug!(
                    "element {}, face {f}: {sig} lies inside domain {}",
                    el.id,
                    el.domain
                );
                st.done.insert(sig);
                continue;
            }

            self.emit(st, e, face, n, &neighbor.faces()[nf], rule, &classes, sig)?;
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn emit(
        &self,
        st: &mut Insertion,
        e: usize,
        face: &LocalFace,
        n: usize,
        n_face: &LocalFace,
        rule: SideB,
        classes: &[NodeClass],
        sig: Signature,
    ) -> Result<(), MeshError> {
        let el = &st.elements[e];
        let neighbor = &st.elements[n];
        let side_a = el.current_full(face);
        let side_b = match (self.config.dimension, rule) {
            (Dimension::Three, _) => solid::registry_side(&st.registry, el, face, neighbor, n_face)?,
            (Dimension::Two, SideB::OtherCopy) => {
                planar::other_copy_side(&st.registry, &side_a, neighbor)?
            }
            (Dimension::Two, SideB::Neighbor) => planar::neighbor_side(el, face, neighbor)?,
        };

        let id = ElementId::new(st.interfaces.len() as u64);
        let mut connectivity = side_a;
        connectivity.extend(side_b);
        st.interfaces.push(InterfaceElement {
            id,
            connectivity,
            bulk: [el.id, neighbor.id],
            material: material_tag(self.config.policy, self.config.dimension, classes),
            opposite_vertex: solid::opposite_vertex(el, face),
            signature: sig.clone(),
        });

        if self.config.hydraulic && self.config.dimension == Dimension::Two {
            let connectivity = planar::flow_connectivity(&mut st.registry, self.mesh, &st.elements[e], face)?;
            st.flow.push(FlowElement {
                id: ElementId::new(st.flow.len() as u64),
                connectivity,
                interface: id,
            });
        }
        st.done.insert(sig);
        Ok(())
    }

    /// First adjacency neighbour of element `e` with a face matching `sig`,
    /// as `(element position, local face)`.
    fn find_neighbor(&self, e: usize, sig: &Signature) -> Option<(usize, usize)> {
        self.adjacency.neighbors(e).iter().find_map(|&n| {
            self.mesh.elements()[n]
                .face_with_signature(sig)
                .map(|f| (n, f))
        })
    }

    fn on_notch(&self, corners: &[NodeId]) -> Result<bool, MeshError> {
        if self.config.notches.is_empty() {
            return Ok(false);
        }
        let points = corners
            .iter()
            .map(|&id| {
                self.mesh
                    .node(id)
                    .map(|n| n.position)
                    .ok_or_else(|| MeshError::UnknownNode {
                        node: id,
                        context: "notch test".into(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let tol = self.config.notch_tolerance;
        Ok(self
            .config
            .notches
            .iter()
            .any(|notch| notch.contains_all(points.iter().copied(), tol)))
    }
}
