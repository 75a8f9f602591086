// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use trifaces::geometry::spatial_element::SpatialElement;
use trifaces::geometry::Point3;
use trifaces::mesh::basic_types::Mesh;
use trifaces::numeric::float::F64;
use trifaces::MeshError;

fn square_points() -> Vec<Point3<F64>> {
    [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]
        .into_iter()
        .map(Point3::from_vals)
        .collect()
}

fn create_test_tetrahedron() -> Mesh<F64, 3> {
    let points: Vec<Point3<F64>> = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ]
    .into_iter()
    .map(Point3::from_vals)
    .collect();
    Mesh::from_polygons(points, &[[0usize, 2, 1], [0, 1, 3], [1, 2, 3], [0, 3, 2]]).unwrap()
}

#[test]
fn test_add_polygon_face() {
    let mut mesh = Mesh::<F64, 3>::new();
    for p in square_points() {
        mesh.add_vertex(p);
    }
    let f = mesh.add_face(&[0, 1, 2, 3]).unwrap();
    mesh.build_boundary_loops();

    assert_eq!(mesh.face_degree(f), 4);
    assert_eq!(mesh.face_vertices(f).to_vec(), vec![0, 1, 2, 3]);
    assert_eq!(mesh.target(mesh.halfedge(f)), 0);
    assert!(!mesh.is_triangle(f));
    assert_eq!(mesh.half_edges.len(), 8);

    // border loop runs the other way
    let border = mesh.opposite(mesh.halfedge(f));
    assert!(mesh.is_border(border));
    let mut cur = border;
    let mut targets = Vec::new();
    for _ in 0..4 {
        targets.push(mesh.target(cur));
        cur = mesh.next(cur);
    }
    assert_eq!(cur, border);
    assert_eq!(targets, vec![3, 2, 1, 0]);
    mesh.validate_connectivity();
}

#[test]
fn test_add_face_rejects_bad_input() {
    let mut mesh = Mesh::<F64, 3>::new();
    for p in square_points() {
        mesh.add_vertex(p);
    }
    assert!(matches!(mesh.add_face(&[0, 1]), Err(MeshError::DegenerateFace(_))));
    assert!(matches!(mesh.add_face(&[0, 1, 1]), Err(MeshError::DegenerateFace(_))));
    assert!(matches!(
        mesh.add_face(&[0, 1, 9]),
        Err(MeshError::InvalidVertexIndex { index: 9, count: 4 })
    ));

    mesh.add_face(&[0, 1, 2]).unwrap();
    let before = mesh.clone();
    assert!(matches!(
        mesh.add_face(&[3, 1, 2]),
        Err(MeshError::NonManifoldEdge(1, 2))
    ));
    assert_eq!(mesh, before);
}

#[test]
fn test_tetrahedron_is_closed() {
    let mesh = create_test_tetrahedron();
    let counts = mesh.element_counts();
    assert_eq!(counts.vertices, 4);
    assert_eq!(counts.faces, 4);
    assert_eq!(counts.edges, 6);
    assert!(mesh.half_edges.iter().all(|he| he.face.is_some()));
    mesh.validate_connectivity();
}

#[test]
fn test_open_fan_boundary() {
    let mesh = Mesh::<F64, 3>::from_polygons(square_points(), &[[0usize, 1, 2], [0, 2, 3]]).unwrap();
    let d = mesh.half_edge_between(0, 2).unwrap();
    assert_eq!(mesh.half_edge_between(2, 0), Some(mesh.opposite(d)));
    assert!(mesh.half_edge_between(1, 3).is_none());
    assert!(!mesh.is_border(d) && !mesh.is_border(mesh.opposite(d)));
    for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
        let h = mesh.half_edge_between(a, b).unwrap();
        assert!(mesh.is_border(mesh.opposite(h)));
    }
    mesh.validate_connectivity();
}

#[test]
fn test_split_face() {
    let mut mesh = Mesh::<F64, 3>::from_polygons(square_points(), &[[0usize, 1, 2, 3]]).unwrap();
    let hs = mesh.face_half_edges(0);

    let h = mesh.split_face(hs[1], hs[3]);
    assert_eq!(mesh.source(h), 1);
    assert_eq!(mesh.target(h), 3);
    assert_eq!(mesh.face(h), Some(0));
    assert_eq!(mesh.face(mesh.opposite(h)), Some(1));
    assert!(mesh.is_triangle(0));
    assert!(mesh.is_triangle(1));
    assert_eq!(mesh.half_edge_between(1, 3), Some(h));
    assert_eq!(mesh.half_edge_between(3, 1), Some(mesh.opposite(h)));
    assert_eq!(mesh.face_count(), 2);
    assert_eq!(mesh.edge_count(), 5);
    mesh.validate_connectivity();
}

#[test]
fn test_split_face_shadows_an_existing_edge() {
    let mut points = square_points();
    points.push(Point3::from_vals([2.0, 2.0, 0.0]));
    let polygons: Vec<Vec<usize>> = vec![vec![0, 1, 2, 3], vec![2, 0, 4]];
    let mut mesh = Mesh::<F64, 3>::from_polygons(points, &polygons).unwrap();
    let old = mesh.half_edge_between(2, 0).unwrap();
    assert_eq!(mesh.face(old), Some(1));

    // hs targets are 0, 1, 2, 3, so the new edge duplicates 0-2
    let hs = mesh.face_half_edges(0);
    let h = mesh.split_face(hs[0], hs[2]);
    assert_eq!(mesh.half_edge_between(0, 2), Some(h));
    assert_eq!(mesh.half_edge_between(2, 0), Some(mesh.opposite(h)));
    assert_eq!(mesh.face(old), Some(1));
    assert!(mesh.is_triangle(0));
    assert!(mesh.is_triangle(2));
}

#[test]
fn test_fill_hole_over_a_new_cycle() {
    let mut mesh = Mesh::<F64, 3>::from_polygons(square_points(), &[[0usize, 1, 2, 3]]).unwrap();
    let hs = mesh.face_half_edges(0);

    for &h in &hs {
        mesh.set_border(h);
    }
    mesh.remove_face(0);
    assert_eq!(mesh.face_count(), 0);

    let d = mesh.add_edge();
    let d_opp = mesh.opposite(d);
    mesh.set_target(d, 0);
    mesh.set_target(d_opp, 2);

    // hs targets are 0, 1, 2, 3; d runs 2 -> 0 and closes 0-1-2
    mesh.set_next(hs[1], hs[2]);
    mesh.set_next(hs[2], d);
    mesh.set_next(d, hs[1]);
    mesh.set_next(hs[3], hs[0]);
    mesh.set_next(hs[0], d_opp);
    mesh.set_next(d_opp, hs[3]);
    let f1 = mesh.fill_hole(hs[1]);
    let f2 = mesh.fill_hole(hs[3]);

    assert_eq!(mesh.face_count(), 2);
    assert_eq!(mesh.face_degree(f1), 3);
    assert_eq!(mesh.face_degree(f2), 3);
    assert_eq!(mesh.half_edge_between(2, 0), Some(d));
    mesh.validate_connectivity();

    mesh.remove_invalidated_faces();
    assert_eq!(mesh.faces.len(), 2);
    mesh.validate_connectivity();
}

#[test]
fn test_face_normal_and_area() {
    let mesh = Mesh::<F64, 3>::from_polygons(square_points(), &[[0usize, 1, 2, 3]]).unwrap();
    assert_eq!(mesh.face_normal(0), trifaces::geometry::Vector3::from_vals([0.0, 0.0, 2.0]));
    assert_eq!(mesh.face_area(0), 1.0);
    assert_eq!(mesh.total_area(), 1.0);
}
