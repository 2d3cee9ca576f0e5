#![cfg_attr(docsrs, feature(doc_cfg))]
//! # cohesive-mesh
//!
//! cohesive-mesh augments a finite-element mesh with zero-thickness cohesive
//! interface elements inserted between adjacent bulk elements. Shared nodes
//! are duplicated so each side of an inter-element boundary owns its own
//! copy, which is what cohesive-zone fracture and debonding solvers expect.
//!
//! ## Features
//! - Linear and quadratic triangles, quadrilaterals, tetrahedra and hexahedra
//!   (Gmsh node ordering) with declarative face tables
//! - Four insertion policies: along material interfaces, along every domain
//!   boundary, along polycrystal grain boundaries (junction aware), and
//!   everywhere
//! - Boundary elements on the true external boundary, grouped by physical group
//! - Notch exclusion for pre-existing cracks
//! - Flow elements for hydraulically coupled 2D meshes
//!
//! ## Pipeline
//! 1. Populate a [`Mesh`](topology::Mesh) with a [`MeshBuilder`](topology::MeshBuilder)
//!    (nodes, elements, node classification, true-boundary edges/faces).
//! 2. Build the [`AdjacencyIndex`](algs::AdjacencyIndex) once.
//! 3. Run an [`InterfaceBuilder`](algs::InterfaceBuilder) with an
//!    [`InsertionConfig`](config::InsertionConfig).
//!
//! Any inconsistency aborts the whole run with a [`MeshError`]; there is no
//! partial output.
//!
//! ## Logging
//! The crate logs through the [`log`] facade and never installs a logger.

pub mod algs;
pub mod config;
pub mod debug_invariants;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;
pub use mesh_error::MeshError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::adjacency::AdjacencyIndex;
    pub use crate::algs::classify::{RegionMode, classify_by_regions};
    pub use crate::algs::duplicate::DuplicateRegistry;
    pub use crate::algs::interface::{InsertionSummary, InterfaceBuilder, InterfaceMesh};
    pub use crate::algs::notch::Notch;
    pub use crate::config::{InsertionConfig, Policy};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh_error::MeshError;
    pub use crate::topology::{
        BoundaryElement, Dimension, Element, ElementId, ElementOrder, ElementType, FlowElement,
        InterfaceElement, Mesh, MeshBuilder, Node, NodeClass, NodeId, NodeKind, Point, Signature,
        TrueBoundary,
    };
}
