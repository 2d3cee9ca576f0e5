//! Boundary element builder.
//!
//! Every bulk face that matches a registered true-boundary signature yields
//! one boundary element carrying the face's current node ids and its physical
//! group. A signature is emitted once; the first bulk element to reach it
//! wins.

use hashbrown::HashSet;

use crate::topology::element::{BoundaryElement, Element};
use crate::topology::face_table::LocalFace;
use crate::topology::ids::ElementId;
use crate::topology::signature::Signature;

#[derive(Debug, Default)]
pub struct BoundaryElementBuilder {
    seen: HashSet<Signature>,
    elements: Vec<BoundaryElement>,
}

impl BoundaryElementBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits the boundary element of `face` on `bulk` unless `sig` was
    /// already recorded. Returns whether an element was emitted.
    pub fn record(
        &mut self,
        sig: &Signature,
        group: i32,
        domain: i32,
        bulk: &Element,
        face: &LocalFace,
    ) -> bool {
        if !self.seen.insert(sig.clone()) {
            return false;
        }
        self.elements.push(BoundaryElement {
            id: ElementId::new(self.elements.len() as u64),
            connectivity: bulk.current_full(face),
            group,
            bulk: bulk.id,
            domain,
        });
        true
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn finish(self) -> Vec<BoundaryElement> {
        self.elements
    }
}
