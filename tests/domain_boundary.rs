mod util;

use cohesive_mesh::prelude::*;
use util::*;

fn linear_2d() -> InsertionConfig {
    config(Dimension::Two, ElementOrder::Linear, Policy::DomainBoundary)
}

#[test]
fn two_quads_get_one_interface() {
    let mesh = two_quads().auto_classify(RegionMode::Domain).build().unwrap();
    let out = run(&mesh, linear_2d()).unwrap();

    assert_eq!(out.interfaces.len(), 1);
    let ie = &out.interfaces[0];
    assert_eq!(ie.connectivity, ids(&[2, 3, 7, 8]));
    assert_eq!(ie.bulk, [eid(1), eid(2)]);
    // interface nodes 2 and 3 carry the sum of the domains they touch
    assert_eq!(ie.material, 3);
    assert_eq!(ie.opposite_vertex, None);

    assert_eq!(out.registry.copies_of(nid(2)), ids(&[2, 7]).as_slice());
    assert_eq!(out.registry.copies_of(nid(3)), ids(&[3, 8]).as_slice());
    assert_eq!(out.bulk[0].current, ids(&[1, 2, 3, 4]));
    assert_eq!(out.bulk[1].current, ids(&[7, 5, 6, 8]));
    assert_eq!(out.bulk[1].original, ids(&[2, 5, 6, 3]));
    assert_eq!(out.nodes.len(), 8);
    out.validate_invariants().unwrap();
}

#[test]
fn boundary_elements_cover_the_outer_edges() {
    let mesh = two_quads().build().unwrap();
    let out = run(&mesh, linear_2d()).unwrap();

    assert_eq!(out.boundary.len(), 6);
    let conns: Vec<Vec<NodeId>> = out.boundary.iter().map(|b| b.connectivity.clone()).collect();
    // right element's edges use its current (duplicated) ids
    assert!(conns.contains(&ids(&[7, 5])));
    assert!(conns.contains(&ids(&[6, 8])));
    assert!(conns.contains(&ids(&[1, 2])));
    assert!(out.boundary.iter().all(|b| b.group == 1));
    let right = out.boundary.iter().find(|b| b.connectivity == ids(&[5, 6])).unwrap();
    assert_eq!(right.bulk, eid(2));
    assert_eq!(right.domain, 2);
    assert_eq!(out.boundary_by_group()[&1].len(), 6);
}

#[test]
fn material_falls_back_to_non_interface_corner() {
    // without classification every node is a non-interface node of material 0
    let mesh = two_quads().build().unwrap();
    let out = run(&mesh, linear_2d()).unwrap();
    assert_eq!(out.interfaces[0].material, 0);
    assert_eq!(out.summary.in_bulk, 1);
}

#[test]
fn unregistered_outer_edge_is_a_missing_neighbour() {
    let mut b = MeshBuilder::new();
    b.node(1, [0.0, 0.0])
        .node(2, [1.0, 0.0])
        .node(3, [1.0, 1.0])
        .node(4, [0.0, 1.0])
        .node(5, [2.0, 0.0])
        .node(6, [2.0, 1.0])
        .element(1, ElementType::Quad4, 1, [1, 2, 3, 4])
        .element(2, ElementType::Quad4, 2, [2, 5, 6, 3]);
    let mesh = b.build().unwrap();
    let err = run(&mesh, linear_2d()).unwrap_err();
    assert_eq!(
        err,
        MeshError::MissingNeighbor {
            element: eid(1),
            face: 0,
            signature: Signature::new(ids(&[1, 2])),
        }
    );
}

/// Quadratic variant of [`two_quads`]: midside 8 sits on the shared edge.
fn two_quad8() -> MeshBuilder {
    let mut b = MeshBuilder::new();
    b.node(1, [0.0, 0.0])
        .node(2, [1.0, 0.0])
        .node(3, [1.0, 1.0])
        .node(4, [0.0, 1.0])
        .node(5, [2.0, 0.0])
        .node(6, [2.0, 1.0])
        .node(7, [0.5, 0.0])
        .node(8, [1.0, 0.5])
        .node(9, [0.5, 1.0])
        .node(10, [0.0, 0.5])
        .node(11, [1.5, 0.0])
        .node(12, [2.0, 0.5])
        .node(13, [1.5, 1.0])
        .element(1, ElementType::Quad8, 1, [1, 2, 3, 4, 7, 8, 9, 10])
        .element(2, ElementType::Quad8, 2, [2, 5, 6, 3, 11, 12, 13, 8]);
    for (a, c) in [(1, 2), (2, 5), (5, 6), (6, 3), (3, 4), (4, 1)] {
        b.boundary_edge(a, c, 1);
    }
    b
}

#[test]
fn quadratic_edges_interleave_midsides() {
    let mesh = two_quad8().build().unwrap();
    let cfg = config(Dimension::Two, ElementOrder::Quadratic, Policy::DomainBoundary);
    let out = run(&mesh, cfg).unwrap();

    assert_eq!(out.interfaces.len(), 1);
    assert_eq!(out.interfaces[0].connectivity, ids(&[2, 8, 3, 14, 16, 15]));
    let first = out.boundary.iter().find(|b| b.bulk == eid(1)).unwrap();
    assert_eq!(first.connectivity, ids(&[1, 7, 2]));
    out.validate_invariants().unwrap();
}

#[test]
fn hydraulic_coupling_adds_flow_nodes_after_duplicates() {
    let mesh = two_quad8().build().unwrap();
    let cfg = config(Dimension::Two, ElementOrder::Quadratic, Policy::DomainBoundary)
        .with_hydraulic(true);
    let out = run(&mesh, cfg).unwrap();

    assert_eq!(out.flow.len(), 1);
    assert_eq!(out.flow[0].connectivity, ids(&[17, 18, 19]));
    assert_eq!(out.flow[0].interface, out.interfaces[0].id);
    assert_eq!(out.registry.flow_of(nid(8)), Some(nid(18)));
    let flow = out.node(nid(18)).unwrap();
    assert_eq!(flow.kind, NodeKind::Flow { of: nid(8) });
    assert_eq!(flow.position, Point::planar(1.0, 0.5));
    assert_eq!(out.nodes.len(), 19);
    assert_eq!(out.summary.flow_elements, 1);
    assert_eq!(out.summary.nodes_added, 6);
}

#[test]
fn planar_edge_takes_material_of_its_non_interface_corner() {
    let mesh = two_quads()
        .classify_node(2, NodeClass::new(2, true, 3))
        .classify_node(3, NodeClass::new(2, false, 5))
        .build()
        .unwrap();
    let out = run(&mesh, linear_2d()).unwrap();
    assert_eq!(out.interfaces[0].material, 5);
}

#[test]
fn solid_faces_inside_one_domain_are_bulk_cracks() {
    let mesh = hex_row(4, ElementType::Hex8, |i| if i < 2 { 1 } else { 2 })
        .auto_classify(RegionMode::Element)
        .build()
        .unwrap();
    let out = run(&mesh, config(Dimension::Three, ElementOrder::Linear, Policy::DomainBoundary))
        .unwrap();

    let tags: Vec<i32> = out.interfaces.iter().map(|ie| ie.material).collect();
    assert_eq!(tags, vec![0, 3, 0]);
    assert_eq!(out.summary.on_material_interfaces, 1);
    assert_eq!(out.summary.in_bulk, 2);
    let bulk: Vec<[ElementId; 2]> = out.interfaces.iter().map(|ie| ie.bulk).collect();
    assert_eq!(bulk, vec![[eid(1), eid(2)], [eid(2), eid(3)], [eid(3), eid(4)]]);
    // four side faces per hexahedron plus the two end caps
    assert_eq!(out.boundary.len(), 18);
    assert!(out.boundary.iter().all(|b| b.domain == out.bulk_element(b.bulk).unwrap().domain));
    out.validate_invariants().unwrap();
}
