//! Top-level module for the mesh topology model.
//!
//! It includes:
//! - strong node/element ids and node records
//! - bulk element types with their declarative face tables
//! - face/edge signatures used for all geometric identity tests
//! - the [`Mesh`] arena and its [`MeshBuilder`] populate API
//!
//! Everything here is read-only once [`MeshBuilder::build`] returns.

pub mod boundary;
pub mod cell_type;
pub mod element;
pub mod face_table;
pub mod ids;
pub mod mesh;
pub mod node;
pub mod signature;

pub use boundary::TrueBoundary;
pub use cell_type::{Dimension, ElementOrder, ElementType};
pub use element::{BoundaryElement, Element, FlowElement, InterfaceElement};
pub use face_table::{LocalFace, faces_of};
pub use ids::{ElementId, NodeId};
pub use mesh::{Mesh, MeshBuilder};
pub use node::{Node, NodeClass, NodeKind, Point};
pub use signature::Signature;
