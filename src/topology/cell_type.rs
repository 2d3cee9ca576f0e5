//! Bulk element types and their Gmsh codes.

use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshError;

/// Spatial dimension of the bulk mesh.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Planar mesh; faces are element edges.
    #[default]
    Two,
    /// Solid mesh; faces are polygons from the face tables.
    Three,
}

impl Dimension {
    pub fn as_u8(self) -> u8 {
        match self {
            Dimension::Two => 2,
            Dimension::Three => 3,
        }
    }
}

/// Interpolation order of the bulk mesh.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementOrder {
    #[default]
    Linear,
    /// Elements carry midside nodes after their corners.
    Quadratic,
}

impl ElementOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementOrder::Linear => "linear",
            ElementOrder::Quadratic => "quadratic",
        }
    }
}

/// Supported bulk element types.
///
/// Node numbering follows Gmsh: corner nodes first, then midside nodes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    /// 3-node triangle.
    Tri3,
    /// 6-node triangle.
    Tri6,
    /// 4-node quadrilateral.
    Quad4,
    /// 8-node serendipity quadrilateral.
    Quad8,
    /// 9-node Lagrange quadrilateral (centre node last).
    Quad9,
    /// 4-node tetrahedron.
    Tet4,
    /// 10-node tetrahedron.
    Tet10,
    /// 8-node hexahedron.
    Hex8,
    /// 20-node serendipity hexahedron.
    Hex20,
}

impl ElementType {
    /// Every supported type, in declaration order.
    pub const ALL: [ElementType; 9] = [
        ElementType::Tri3,
        ElementType::Tri6,
        ElementType::Quad4,
        ElementType::Quad8,
        ElementType::Quad9,
        ElementType::Tet4,
        ElementType::Tet10,
        ElementType::Hex8,
        ElementType::Hex20,
    ];

    /// Maps a Gmsh element type code onto a supported type.
    ///
    /// Line, point and surface-of-solid codes are boundary records, not bulk
    /// elements; they are rejected here like any other unknown code.
    pub fn from_gmsh(code: i32) -> Result<Self, MeshError> {
        match code {
            2 => Ok(ElementType::Tri3),
            3 => Ok(ElementType::Quad4),
            4 => Ok(ElementType::Tet4),
            5 => Ok(ElementType::Hex8),
            9 => Ok(ElementType::Tri6),
            10 => Ok(ElementType::Quad9),
            11 => Ok(ElementType::Tet10),
            16 => Ok(ElementType::Quad8),
            17 => Ok(ElementType::Hex20),
            other => Err(MeshError::UnsupportedElementType(other)),
        }
    }

    /// Gmsh element type code.
    pub fn gmsh_code(self) -> i32 {
        match self {
            ElementType::Tri3 => 2,
            ElementType::Quad4 => 3,
            ElementType::Tet4 => 4,
            ElementType::Hex8 => 5,
            ElementType::Tri6 => 9,
            ElementType::Quad9 => 10,
            ElementType::Tet10 => 11,
            ElementType::Quad8 => 16,
            ElementType::Hex20 => 17,
        }
    }

    /// Total number of nodes in the connectivity.
    pub fn node_count(self) -> usize {
        match self {
            ElementType::Tri3 => 3,
            ElementType::Tri6 => 6,
            ElementType::Quad4 => 4,
            ElementType::Quad8 => 8,
            ElementType::Quad9 => 9,
            ElementType::Tet4 => 4,
            ElementType::Tet10 => 10,
            ElementType::Hex8 => 8,
            ElementType::Hex20 => 20,
        }
    }

    /// Number of corner (vertex) nodes, which lead the connectivity.
    pub fn corner_count(self) -> usize {
        match self {
            ElementType::Tri3 | ElementType::Tri6 => 3,
            ElementType::Quad4 | ElementType::Quad8 | ElementType::Quad9 => 4,
            ElementType::Tet4 | ElementType::Tet10 => 4,
            ElementType::Hex8 | ElementType::Hex20 => 8,
        }
    }

    pub fn dimension(self) -> Dimension {
        match self {
            ElementType::Tri3
            | ElementType::Tri6
            | ElementType::Quad4
            | ElementType::Quad8
            | ElementType::Quad9 => Dimension::Two,
            ElementType::Tet4 | ElementType::Tet10 | ElementType::Hex8 | ElementType::Hex20 => {
                Dimension::Three
            }
        }
    }

    pub fn order(self) -> ElementOrder {
        match self {
            ElementType::Tri3 | ElementType::Quad4 | ElementType::Tet4 | ElementType::Hex8 => {
                ElementOrder::Linear
            }
            ElementType::Tri6
            | ElementType::Quad8
            | ElementType::Quad9
            | ElementType::Tet10
            | ElementType::Hex20 => ElementOrder::Quadratic,
        }
    }

    #[inline]
    pub fn is_quadratic(self) -> bool {
        self.order() == ElementOrder::Quadratic
    }

    /// Human readable `dimension/order` pair used in diagnostics.
    pub fn family(self) -> String {
        format!("{}D {}", self.dimension().as_u8(), self.order().as_str())
    }
}
