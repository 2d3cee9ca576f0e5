#![allow(dead_code)]
use std::collections::BTreeMap;

use cohesive_mesh::prelude::*;
use cohesive_mesh::topology::faces_of;

pub fn nid(u: u64) -> NodeId {
    NodeId::new(u)
}

pub fn eid(u: u64) -> ElementId {
    ElementId::new(u)
}

pub fn ids(raw: &[u64]) -> Vec<NodeId> {
    raw.iter().copied().map(NodeId::new).collect()
}

/// Builds the adjacency index and runs one insertion.
pub fn run(mesh: &Mesh, config: InsertionConfig) -> Result<InterfaceMesh, MeshError> {
    let adjacency = AdjacencyIndex::build(mesh)?;
    InterfaceBuilder::new(mesh, &adjacency, config)?.run()
}

pub fn config(dimension: Dimension, order: ElementOrder, policy: Policy) -> InsertionConfig {
    InsertionConfig::new(dimension, order, policy)
}

/// Two unit quads side by side sharing edge 2-3, domains 1 and 2, with the
/// whole outer boundary registered in group 1.
///
/// ```text
/// 4 --- 3 --- 6
/// |  1  |  2  |
/// 1 --- 2 --- 5
/// ```
pub fn two_quads() -> MeshBuilder {
    let mut b = MeshBuilder::new();
    b.node(1, [0.0, 0.0])
        .node(2, [1.0, 0.0])
        .node(3, [1.0, 1.0])
        .node(4, [0.0, 1.0])
        .node(5, [2.0, 0.0])
        .node(6, [2.0, 1.0])
        .element(1, ElementType::Quad4, 1, [1, 2, 3, 4])
        .element(2, ElementType::Quad4, 2, [2, 5, 6, 3]);
    for (a, c) in [(1, 2), (2, 5), (5, 6), (6, 3), (3, 4), (4, 1)] {
        b.boundary_edge(a, c, 1);
    }
    b
}

/// Node id of grid vertex `(i, j)` on a grid `nx` cells wide.
pub fn grid_node(nx: usize, i: usize, j: usize) -> u64 {
    (j * (nx + 1) + i + 1) as u64
}

fn grid_nodes_and_boundary(b: &mut MeshBuilder, nx: usize, ny: usize) {
    for j in 0..=ny {
        for i in 0..=nx {
            b.node(grid_node(nx, i, j), [i as f64, j as f64]);
        }
    }
    for i in 0..nx {
        b.boundary_edge(grid_node(nx, i, 0), grid_node(nx, i + 1, 0), 1);
        b.boundary_edge(grid_node(nx, i, ny), grid_node(nx, i + 1, ny), 3);
    }
    for j in 0..ny {
        b.boundary_edge(grid_node(nx, 0, j), grid_node(nx, 0, j + 1), 4);
        b.boundary_edge(grid_node(nx, nx, j), grid_node(nx, nx, j + 1), 2);
    }
}

/// `nx` x `ny` unit quads; cell `(i, j)` has element id `j * nx + i + 1`.
pub fn quad_grid(nx: usize, ny: usize, domain: impl Fn(usize, usize) -> i32) -> MeshBuilder {
    let mut b = MeshBuilder::new();
    grid_nodes_and_boundary(&mut b, nx, ny);
    for j in 0..ny {
        for i in 0..nx {
            b.element(
                (j * nx + i + 1) as u64,
                ElementType::Quad4,
                domain(i, j),
                [
                    grid_node(nx, i, j),
                    grid_node(nx, i + 1, j),
                    grid_node(nx, i + 1, j + 1),
                    grid_node(nx, i, j + 1),
                ],
            );
        }
    }
    b
}

/// `nx` x `ny` unit squares, each split along its rising diagonal.
pub fn tri_grid(nx: usize, ny: usize, domain: impl Fn(usize, usize) -> i32) -> MeshBuilder {
    let mut b = MeshBuilder::new();
    grid_nodes_and_boundary(&mut b, nx, ny);
    let mut id = 1;
    for j in 0..ny {
        for i in 0..nx {
            let (n00, n10) = (grid_node(nx, i, j), grid_node(nx, i + 1, j));
            let (n11, n01) = (grid_node(nx, i + 1, j + 1), grid_node(nx, i, j + 1));
            b.element(id, ElementType::Tri3, domain(i, j), [n00, n10, n11]);
            b.element(id + 1, ElementType::Tri3, domain(i, j), [n00, n11, n01]);
            id += 2;
        }
    }
    b
}

/// Hexahedron corners in Gmsh order, in doubled unit coordinates.
const HEX_CORNERS: [(i64, i64, i64); 8] = [
    (0, 0, 0),
    (2, 0, 0),
    (2, 2, 0),
    (0, 2, 0),
    (0, 0, 2),
    (2, 0, 2),
    (2, 2, 2),
    (0, 2, 2),
];

/// Corner pairs of the Gmsh Hex20 midside nodes 8..19.
const HEX20_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (0, 3),
    (0, 4),
    (1, 2),
    (1, 5),
    (2, 3),
    (2, 6),
    (3, 7),
    (4, 5),
    (4, 7),
    (5, 6),
    (6, 7),
];

/// `nx` unit hexahedra (Hex8 or Hex20) along x; element `i + 1` spans
/// `[i, i + 1]`. Node ids follow first use; every outer face is registered
/// in group 1.
pub fn hex_row(nx: usize, ty: ElementType, domain: impl Fn(usize) -> i32) -> MeshBuilder {
    let mut b = MeshBuilder::new();
    let mut ids: BTreeMap<(i64, i64, i64), u64> = BTreeMap::new();
    let mut keys: BTreeMap<u64, (i64, i64, i64)> = BTreeMap::new();
    for i in 0..nx {
        let x0 = 2 * i as i64;
        let mut local: Vec<(i64, i64, i64)> =
            HEX_CORNERS.iter().map(|&(x, y, z)| (x0 + x, y, z)).collect();
        if ty == ElementType::Hex20 {
            let mids: Vec<_> = HEX20_EDGES
                .iter()
                .map(|&(a, c)| {
                    let (p, q) = (local[a], local[c]);
                    ((p.0 + q.0) / 2, (p.1 + q.1) / 2, (p.2 + q.2) / 2)
                })
                .collect();
            local.extend(mids);
        }
        let conn: Vec<u64> = local
            .iter()
            .map(|&key| {
                let next = ids.len() as u64 + 1;
                let id = *ids.entry(key).or_insert(next);
                if keys.insert(id, key).is_none() {
                    b.node(id, [key.0 as f64 / 2.0, key.1 as f64 / 2.0, key.2 as f64 / 2.0]);
                }
                id
            })
            .collect();
        for face in faces_of(ty) {
            let corners: Vec<u64> = face.corners.iter().map(|&k| conn[k]).collect();
            let outer = |f: fn(&(i64, i64, i64)) -> i64, v: i64| {
                corners.iter().all(|id| f(&keys[id]) == v)
            };
            if outer(|k| k.0, 0)
                || outer(|k| k.0, 2 * nx as i64)
                || outer(|k| k.1, 0)
                || outer(|k| k.1, 2)
                || outer(|k| k.2, 0)
                || outer(|k| k.2, 2)
            {
                b.boundary_face(corners.iter().copied(), 1);
            }
        }
        b.element(i as u64 + 1, ty, domain(i), conn);
    }
    b
}

/// Interior edge count of a quad grid.
pub fn quad_grid_interior_edges(nx: usize, ny: usize) -> usize {
    nx * (ny - 1) + ny * (nx - 1)
}

/// Interior edge count of a triangulated grid.
pub fn tri_grid_interior_edges(nx: usize, ny: usize) -> usize {
    3 * nx * ny - nx - ny
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Clone + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}

/// Signatures of all emitted interface elements.
pub fn interface_signatures(out: &InterfaceMesh) -> Vec<Signature> {
    out.interfaces.iter().map(|ie| ie.signature.clone()).collect()
}
