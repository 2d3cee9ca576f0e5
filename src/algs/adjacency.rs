//! Element adjacency index.
//!
//! Two CSR tables built once from the original connectivity:
//! - node -> incident elements (element positions, ascending = input order);
//! - element -> neighbouring elements sharing at least one node.
//!
//! Determinism:
//! - neighbour lists are sorted by element position and deduplicated, so the
//!   dispatcher's neighbour scan is independent of hashing order.

use std::collections::HashMap;

use crate::mesh_error::MeshError;
use crate::topology::ids::{ElementId, NodeId};
use crate::topology::mesh::Mesh;

/// CSR-style node incidence, indexed by node storage position.
#[derive(Debug, Clone)]
pub struct NodeIncidence {
    /// CSR offsets into `adj` for each node position.
    pub xadj: Vec<usize>,
    /// Element positions incident on each node.
    pub adj: Vec<usize>,
}

impl NodeIncidence {
    /// Derives the incidence from the original connectivity of `mesh`.
    pub fn build(mesh: &Mesh) -> Self {
        let n = mesh.nodes().len();
        let mut counts = vec![0usize; n + 1];
        let mut pairs = Vec::new();
        for (e, el) in mesh.elements().iter().enumerate() {
            let mut seen: Vec<usize> = el
                .original
                .iter()
                .filter_map(|&id| mesh.position_of(id))
                .collect();
            seen.sort_unstable();
            seen.dedup();
            for p in seen {
                counts[p + 1] += 1;
                pairs.push((p, e));
            }
        }
        for i in 0..n {
            counts[i + 1] += counts[i];
        }
        let xadj = counts.clone();
        let mut cursor = counts;
        let mut adj = vec![0usize; pairs.len()];
        // elements were visited in ascending order, so each row stays sorted
        for (p, e) in pairs {
            adj[cursor[p]] = e;
            cursor[p] += 1;
        }
        NodeIncidence { xadj, adj }
    }

    /// Element positions incident on node position `i`.
    #[inline]
    pub fn elements(&self, i: usize) -> &[usize] {
        &self.adj[self.xadj[i]..self.xadj[i + 1]]
    }
}

/// Neighbour lookups consumed read-only by the dispatcher.
#[derive(Debug, Clone)]
pub struct AdjacencyIndex {
    /// CSR offsets into `adjncy` for each element position.
    pub xadj: Vec<usize>,
    /// CSR adjacency list (element positions).
    pub adjncy: Vec<usize>,
    /// Element ids in storage order.
    pub order: Vec<ElementId>,
    incidence: NodeIncidence,
    node_pos: HashMap<NodeId, usize>,
    element_pos: HashMap<ElementId, usize>,
}

impl AdjacencyIndex {
    /// Builds the index, preferring reader-supplied neighbour lists when the
    /// mesh carries them.
    pub fn build(mesh: &Mesh) -> Result<Self, MeshError> {
        match mesh.neighbor_lists() {
            Some(lists) => Self::from_neighbor_lists(mesh, lists.iter().cloned()),
            None => Ok(Self::from_shared_nodes(mesh)),
        }
    }

    /// Elements are neighbours when they share at least one node.
    pub fn from_shared_nodes(mesh: &Mesh) -> Self {
        let incidence = NodeIncidence::build(mesh);
        let rows = (0..mesh.elements().len()).map(|e| {
            let mut row: Vec<usize> = mesh.elements()[e]
                .original
                .iter()
                .filter_map(|&id| mesh.position_of(id))
                .flat_map(|p| incidence.elements(p).iter().copied())
                .filter(|&n| n != e)
                .collect();
            row.sort_unstable();
            row.dedup();
            row
        });
        let (xadj, adjncy) = pack_rows(rows);
        Self::assemble(mesh, xadj, adjncy, incidence)
    }

    /// Uses externally established neighbour lists. Elements absent from
    /// `lists` get no neighbours; lists are symmetrized.
    pub fn from_neighbor_lists(
        mesh: &Mesh,
        lists: impl IntoIterator<Item = (ElementId, Vec<ElementId>)>,
    ) -> Result<Self, MeshError> {
        let n = mesh.elements().len();
        let pos = |id: ElementId| mesh.element_position(id).ok_or(MeshError::UnknownElement(id));
        let mut rows = vec![Vec::new(); n];
        for (id, list) in lists {
            let e = pos(id)?;
            for other in list {
                let o = pos(other)?;
                if o != e {
                    rows[e].push(o);
                    rows[o].push(e);
                }
            }
        }
        for row in &mut rows {
            row.sort_unstable();
            row.dedup();
        }
        let (xadj, adjncy) = pack_rows(rows);
        Ok(Self::assemble(mesh, xadj, adjncy, NodeIncidence::build(mesh)))
    }

    fn assemble(mesh: &Mesh, xadj: Vec<usize>, adjncy: Vec<usize>, incidence: NodeIncidence) -> Self {
        let order: Vec<ElementId> = mesh.elements().iter().map(|e| e.id).collect();
        let element_pos = order.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let node_pos = mesh
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id, i))
            .collect();
        AdjacencyIndex {
            xadj,
            adjncy,
            order,
            incidence,
            node_pos,
            element_pos,
        }
    }

    /// Neighbour positions of element position `i`.
    #[inline]
    pub fn neighbors(&self, i: usize) -> &[usize] {
        &self.adjncy[self.xadj[i]..self.xadj[i + 1]]
    }

    /// Neighbour ids of element `id`.
    pub fn neighbors_of(&self, id: ElementId) -> Result<Vec<ElementId>, MeshError> {
        let e = *self
            .element_pos
            .get(&id)
            .ok_or(MeshError::UnknownElement(id))?;
        Ok(self.neighbors(e).iter().map(|&n| self.order[n]).collect())
    }

    /// Zero-based storage position of an original node id.
    #[inline]
    pub fn position_of(&self, id: NodeId) -> Option<usize> {
        self.node_pos.get(&id).copied()
    }

    /// Positions of the elements incident on node `id` (input order).
    pub fn elements_of_node(&self, id: NodeId) -> &[usize] {
        match self.position_of(id) {
            Some(p) => self.incidence.elements(p),
            None => &[],
        }
    }

    #[inline]
    pub fn num_elements(&self) -> usize {
        self.order.len()
    }
}

fn pack_rows(rows: impl IntoIterator<Item = Vec<usize>>) -> (Vec<usize>, Vec<usize>) {
    let mut xadj = vec![0];
    let mut adjncy = Vec::new();
    for row in rows {
        adjncy.extend(row);
        xadj.push(adjncy.len());
    }
    (xadj, adjncy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::cell_type::ElementType;
    use crate::topology::mesh::MeshBuilder;

    /// Three triangles in a strip: 1-2 share an edge, 2-3 share an edge,
    /// 1-3 share a single vertex.
    fn strip() -> Mesh {
        let mut b = MeshBuilder::new();
        b.node(1, [0.0, 0.0])
            .node(2, [1.0, 0.0])
            .node(3, [0.0, 1.0])
            .node(4, [1.0, 1.0])
            .node(5, [2.0, 1.0])
            .element(1, ElementType::Tri3, 1, [1, 2, 3])
            .element(2, ElementType::Tri3, 1, [2, 4, 3])
            .element(3, ElementType::Tri3, 1, [2, 5, 4]);
        b.build().unwrap()
    }

    #[test]
    fn shared_node_neighbours() {
        let adj = AdjacencyIndex::build(&strip()).unwrap();
        assert_eq!(adj.neighbors(0), &[1, 2]);
        assert_eq!(adj.neighbors(1), &[0, 2]);
        assert_eq!(
            adj.neighbors_of(ElementId::new(3)).unwrap(),
            vec![ElementId::new(1), ElementId::new(2)]
        );
        assert_eq!(adj.elements_of_node(NodeId::new(2)), &[0, 1, 2]);
        assert_eq!(adj.elements_of_node(NodeId::new(5)), &[2]);
        assert_eq!(adj.position_of(NodeId::new(4)), Some(3));
    }

    #[test]
    fn supplied_lists_are_symmetrized() {
        let mesh = strip();
        let adj = AdjacencyIndex::from_neighbor_lists(
            &mesh,
            [(ElementId::new(1), vec![ElementId::new(2)])],
        )
        .unwrap();
        assert_eq!(adj.neighbors(0), &[1]);
        assert_eq!(adj.neighbors(1), &[0]);
        assert!(adj.neighbors(2).is_empty());
    }

    #[test]
    fn unknown_neighbour_is_an_error() {
        let mesh = strip();
        let err = AdjacencyIndex::from_neighbor_lists(
            &mesh,
            [(ElementId::new(1), vec![ElementId::new(99)])],
        )
        .unwrap_err();
        assert_eq!(err, MeshError::UnknownElement(ElementId::new(99)));
        assert!(AdjacencyIndex::build(&mesh).unwrap().neighbors_of(ElementId::new(42)).is_err());
    }
}
