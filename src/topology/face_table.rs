//! Declarative face tables.
//!
//! Every element type decomposes into a fixed, ordered list of local faces:
//! polygon faces for solids (from the tables below) and edges for planar
//! elements (derived from the polygon's own corner ordering). Each local face
//! lists
//!
//! * `corners`: corner-node local indices in outward-normal order;
//! * `full`: the node sequence used when emitting interface and boundary
//!   elements. For solids this is the corners followed by the midside nodes;
//!   for planar edges it is `[c1, mid, c2]` (or just `[c1, c2]` when linear);
//! * `opposite`: for solids, the apex not on the face.
//!
//! The ordering for a given `(type, local face)` pair never changes, so the
//! original and the current connectivity of an element map through the same
//! indices onto different node ids.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::topology::cell_type::{Dimension, ElementType};

/// One local face (solid) or edge (planar) of an element type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalFace {
    pub corners: Vec<usize>,
    pub full: Vec<usize>,
    pub opposite: Option<usize>,
}

/// `(corners, midsides, opposite)` rows for solid element types.
type SolidRow = (&'static [usize], &'static [usize], usize);

const TET4: [SolidRow; 4] = [
    (&[0, 1, 3], &[], 2),
    (&[1, 2, 3], &[], 0),
    (&[0, 2, 3], &[], 1),
    (&[0, 1, 2], &[], 3),
];

const TET10: [SolidRow; 4] = [
    (&[0, 1, 3], &[4, 9, 7], 2),
    (&[1, 2, 3], &[5, 8, 9], 0),
    (&[0, 2, 3], &[6, 8, 7], 1),
    (&[0, 1, 2], &[4, 5, 6], 3),
];

const HEX8: [SolidRow; 6] = [
    (&[0, 3, 2, 1], &[], 4),
    (&[4, 7, 6, 5], &[], 0),
    (&[4, 0, 1, 5], &[], 7),
    (&[7, 6, 2, 3], &[], 4),
    (&[1, 5, 6, 2], &[], 0),
    (&[3, 0, 4, 7], &[], 2),
];

// Quadratic hexahedron faces walk their corners in the direction matching the
// midside list, which differs from the linear corner order above.
const HEX20_FULL_CORNERS: [&[usize]; 6] = [
    &[0, 1, 2, 3],
    &[4, 5, 6, 7],
    &[4, 5, 1, 0],
    &[7, 6, 2, 3],
    &[1, 2, 6, 5],
    &[3, 7, 4, 0],
];

const HEX20_MIDSIDES: [&[usize]; 6] = [
    &[8, 11, 13, 9],
    &[16, 18, 19, 17],
    &[16, 12, 8, 10],
    &[19, 14, 13, 15],
    &[11, 14, 18, 12],
    &[15, 17, 10, 9],
];

static TABLES: Lazy<HashMap<ElementType, Vec<LocalFace>>> = Lazy::new(|| {
    ElementType::ALL
        .iter()
        .map(|&ty| (ty, build_table(ty)))
        .collect()
});

/// Ordered local faces of `ty`.
pub fn faces_of(ty: ElementType) -> &'static [LocalFace] {
    TABLES.get(&ty).map(Vec::as_slice).unwrap_or(&[])
}

fn build_table(ty: ElementType) -> Vec<LocalFace> {
    match ty {
        ElementType::Tet4 => solid_rows(&TET4),
        ElementType::Tet10 => solid_rows(&TET10),
        ElementType::Hex8 => solid_rows(&HEX8),
        ElementType::Hex20 => HEX8
            .iter()
            .zip(HEX20_FULL_CORNERS.iter().zip(HEX20_MIDSIDES.iter()))
            .map(|(&(corners, _, opposite), (full_corners, mids))| LocalFace {
                corners: corners.to_vec(),
                full: full_corners.iter().chain(mids.iter()).copied().collect(),
                opposite: Some(opposite),
            })
            .collect(),
        ElementType::Tri3
        | ElementType::Tri6
        | ElementType::Quad4
        | ElementType::Quad8
        | ElementType::Quad9 => polygon_edges(ty),
    }
}

fn solid_rows(rows: &[SolidRow]) -> Vec<LocalFace> {
    rows.iter()
        .map(|&(corners, mids, opposite)| LocalFace {
            corners: corners.to_vec(),
            full: corners.iter().chain(mids.iter()).copied().collect(),
            opposite: Some(opposite),
        })
        .collect()
}

/// Edge `i` joins corners `i` and `i + 1`; its midside node is `corners + i`.
fn polygon_edges(ty: ElementType) -> Vec<LocalFace> {
    debug_assert_eq!(ty.dimension(), Dimension::Two);
    let n = ty.corner_count();
    (0..n)
        .map(|i| {
            let (a, b) = (i, (i + 1) % n);
            let full = if ty.is_quadratic() {
                vec![a, n + i, b]
            } else {
                vec![a, b]
            };
            LocalFace {
                corners: vec![a, b],
                full,
                opposite: None,
            }
        })
        .collect()
}
