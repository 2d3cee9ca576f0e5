//! MeshError: unified error type for cohesive-mesh public APIs
//!
//! Interface insertion is a batch transform: any inconsistency detected in the
//! configuration or the input mesh invalidates the whole output. Every variant
//! below therefore aborts the run; nothing is retried or patched up locally.

use thiserror::Error;

use crate::topology::ids::{ElementId, NodeId};
use crate::topology::signature::Signature;

/// Unified error type for interface insertion.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    // ---------------------------------------------------------------------
    // configuration errors
    // ---------------------------------------------------------------------
    /// Element type code has no face table.
    #[error("unsupported element type code {0}")]
    UnsupportedElementType(i32),
    /// Bulk elements of different dimension or order were mixed in one mesh.
    #[error("element {element} is {found}, but the mesh was started as {expected}")]
    MixedElementFamilies {
        element: ElementId,
        expected: String,
        found: String,
    },
    /// Configured dimension disagrees with the element types present.
    #[error("configuration asks for a {configured}D mesh but the elements are {found}D")]
    DimensionMismatch { configured: u8, found: u8 },
    /// Configured element order disagrees with the element types present.
    #[error("configuration asks for {configured} elements but the mesh is {found}")]
    OrderMismatch {
        configured: &'static str,
        found: &'static str,
    },
    /// Contradictory or out-of-range configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ---------------------------------------------------------------------
    // input-mesh defects
    // ---------------------------------------------------------------------
    /// No bulk elements were supplied.
    #[error("mesh has no bulk elements")]
    EmptyMesh,
    /// Two node records share an id.
    #[error("node id {0} appears more than once")]
    DuplicateNodeId(NodeId),
    /// Two element records share an id.
    #[error("element id {0} appears more than once")]
    DuplicateElementId(ElementId),
    /// A record references a node that was never declared.
    #[error("unknown node {node} referenced by {context}")]
    UnknownNode { node: NodeId, context: String },
    /// A lookup referenced an element that was never declared.
    #[error("unknown element {0}")]
    UnknownElement(ElementId),
    /// Connectivity length disagrees with the element type.
    #[error("element {element} has {found} nodes, its type needs {expected}")]
    ConnectivityLength {
        element: ElementId,
        expected: usize,
        found: usize,
    },
    /// A face or edge repeats a vertex (coincident nodes).
    #[error("element {element}, local face {face}: degenerate face {signature}")]
    DegenerateFace {
        element: ElementId,
        face: usize,
        signature: Signature,
    },
    /// No neighbour shares an eligible inter-element face.
    #[error("element {element}, local face {face}: no neighbour shares face {signature}")]
    MissingNeighbor {
        element: ElementId,
        face: usize,
        signature: Signature,
    },
    /// The run finished without a single interface element.
    #[error("no interface elements were generated")]
    NoInterfaceElements,

    // ---------------------------------------------------------------------
    // logical impossibilities under a policy's assumptions
    // ---------------------------------------------------------------------
    /// A junction vertex has a duplicity the policy cannot handle.
    #[error("node {node} has duplicity {duplicity}; expected at most a quadruple junction")]
    UnexpectedDuplicity { node: NodeId, duplicity: u8 },
    /// The far-side copy of a vertex could not be found on the neighbour.
    #[error("node {node} has no duplicate on element {element}")]
    UnresolvedDuplicate { node: NodeId, element: ElementId },
    /// More regions meet at a node than its duplicity allows.
    #[error("node {node} touches {regions} regions but has duplicity {duplicity}")]
    RegionCountExceedsDuplicity {
        node: NodeId,
        regions: usize,
        duplicity: u8,
    },

    // ---------------------------------------------------------------------
    // output checks
    // ---------------------------------------------------------------------
    /// An output invariant does not hold.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
