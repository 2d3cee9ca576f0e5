//! Node records: coordinates, duplicity classification and provenance.

use std::ops::Sub;

use serde::{Deserialize, Serialize};

use crate::topology::ids::NodeId;

/// A point in 2D or 3D space (`z == 0` for planar meshes).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Point { x, y, z }
    }

    #[inline]
    pub const fn planar(x: f64, y: f64) -> Self {
        Point { x, y, z: 0.0 }
    }

    #[inline]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn norm(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self - other).norm()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point::planar(x, y)
    }
}

impl From<[f64; 3]> for Point {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Point::new(x, y, z)
    }
}

/// Precomputed classification of an input node.
///
/// * `duplicity`: number of regions touching the node; 0 = untracked,
///   1 = on the true external boundary only, 2 = simple two-region boundary,
///   3+ = junction.
/// * `is_interface`: the node lies on a material interface.
/// * `material`: material tag used by the domain-boundary tagging rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeClass {
    pub duplicity: u8,
    pub is_interface: bool,
    pub material: i32,
}

impl NodeClass {
    pub const fn new(duplicity: u8, is_interface: bool, material: i32) -> Self {
        NodeClass {
            duplicity,
            is_interface,
            material,
        }
    }
}

/// Where a node record came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Supplied by the mesh reader.
    Original,
    /// Copy of an original node created for one side of an interface.
    Duplicate { of: NodeId },
    /// Hydraulic degree-of-freedom node attached to an original node.
    Flow { of: NodeId },
}

/// A node of the input or output mesh.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub position: Point,
    pub class: NodeClass,
    pub kind: NodeKind,
}

impl Node {
    pub fn original(id: NodeId, position: Point) -> Self {
        Node {
            id,
            position,
            class: NodeClass::default(),
            kind: NodeKind::Original,
        }
    }

    /// The original node this record was derived from (itself for originals).
    pub fn source(&self) -> NodeId {
        match self.kind {
            NodeKind::Original => self.id,
            NodeKind::Duplicate { of } | NodeKind::Flow { of } => of,
        }
    }
}
