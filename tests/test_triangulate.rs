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

use std::f64::consts::PI;

use approx::assert_relative_eq;
use rand::{Rng, SeedableRng, rngs::StdRng};

use trifaces::geometry::spatial_element::SpatialElement;
use trifaces::geometry::Point3;
use trifaces::mesh::basic_types::Mesh;
use trifaces::mesh::property_map::SlicePoints;
use trifaces::mesh_processing::triangulate::{
    FaceTriangulation, TriangulateModifier, TriangulateParams, triangulate_face,
    triangulate_face_with, triangulate_faces, triangulate_mesh,
};
use trifaces::numeric::float::F64;
use trifaces::numeric::rational::Rational;
use trifaces::TriangulationError;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn polygon_mesh(pts: &[[f64; 3]]) -> Mesh<F64, 3> {
    let ring: Vec<usize> = (0..pts.len()).collect();
    Mesh::from_polygons(pts.iter().map(|&p| Point3::from_vals(p)), &[ring]).unwrap()
}

/// Face vertex cycles rotated to start at their smallest index, sorted.
fn face_cycles<T: trifaces::numeric::scalar::Scalar>(mesh: &Mesh<T, 3>) -> Vec<Vec<usize>>
where
    for<'a> &'a T: trifaces::numeric::scalar::RefArith<T>,
{
    let mut cycles: Vec<Vec<usize>> = mesh
        .live_faces()
        .into_iter()
        .map(|f| {
            let mut vs = mesh.face_vertices(f).to_vec();
            let k = (0..vs.len()).min_by_key(|&i| vs[i]).unwrap();
            vs.rotate_left(k);
            vs
        })
        .collect();
    cycles.sort();
    cycles
}

fn point_in_polygon(p: [f64; 2], poly: &[[f64; 3]]) -> bool {
    let mut inside = false;
    let n = poly.len();
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (poly[i][0], poly[i][1]);
        let (xj, yj) = (poly[j][0], poly[j][1]);
        if (yi > p[1]) != (yj > p[1]) && p[0] < (xj - xi) * (p[1] - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn centroid(mesh: &Mesh<F64, 3>, f: usize) -> [f64; 2] {
    let vs = mesh.face_vertices(f);
    let mut c = [0.0, 0.0];
    for &v in &vs {
        c[0] += mesh.vertices[v].position[0].0;
        c[1] += mesh.vertices[v].position[1].0;
    }
    [c[0] / vs.len() as f64, c[1] / vs.len() as f64]
}

#[test]
fn test_triangles_are_left_alone() {
    init();
    let mut mesh = polygon_mesh(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    let before = mesh.clone();

    assert!(triangulate_mesh(&mut mesh));
    assert_eq!(mesh, before);

    let report = TriangulateModifier::<F64>::default().triangulate_faces_report(0..1, &mut mesh);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.triangulated, 0);
    assert!(report.is_success());
}

#[test]
fn test_square_takes_the_quad_split() {
    init();
    let mut mesh = polygon_mesh(&[
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
    ]);
    let counts = mesh.element_counts();

    let modifier = TriangulateModifier::<F64>::default();
    let result = modifier.triangulate_face(0, &mut mesh).unwrap();
    let FaceTriangulation::QuadSplit { diagonal } = result else {
        panic!("expected a quad split, got {:?}", result);
    };

    let after = mesh.element_counts();
    assert_eq!(after.faces, counts.faces + 1);
    assert_eq!(after.edges, counts.edges + 1);
    assert_eq!(mesh.target(diagonal), 2);
    assert_eq!(mesh.source(diagonal), 0);
    assert_eq!(face_cycles(&mesh), vec![vec![0, 1, 2], vec![0, 2, 3]]);
    assert_relative_eq!(mesh.total_area(), 1.0, epsilon = 1e-12);
    mesh.validate_connectivity();
}

#[test]
fn test_quad_diagonal_choice() {
    init();
    let mut kite = polygon_mesh(&[
        [0.0, 0.0, 0.0],
        [2.0, -1.0, 0.0],
        [4.0, 0.0, 0.0],
        [2.0, 2.0, 0.0],
    ]);
    assert!(triangulate_face(0, &mut kite));
    assert_eq!(face_cycles(&kite), vec![vec![0, 1, 2], vec![0, 2, 3]]);

    // arrow head with its reflex corner at v1: (v0, v2) would leave the quad
    let mut arrow = polygon_mesh(&[
        [0.0, 0.0, 0.0],
        [2.0, 1.0, 0.0],
        [4.0, 0.0, 0.0],
        [2.0, 3.0, 0.0],
    ]);
    assert!(triangulate_face(0, &mut arrow));
    assert_eq!(face_cycles(&arrow), vec![vec![0, 1, 3], vec![1, 2, 3]]);
    assert_relative_eq!(arrow.total_area(), 4.0, epsilon = 1e-12);
    arrow.validate_connectivity();
}

#[test]
fn test_convex_polygons_on_a_tilted_plane() {
    init();
    let mut rng = StdRng::seed_from_u64(0x7ace);
    for n in 5..=12 {
        let step = 2.0 * PI / n as f64;
        let pts: Vec<[f64; 3]> = (0..n)
            .map(|k| {
                let t = k as f64 * step + rng.random_range(0.0..0.3 * step);
                let (x, y) = (2.0 * t.cos(), t.sin());
                [x, y, 0.5 * x - 0.25 * y + 1.0]
            })
            .collect();
        let mut mesh = polygon_mesh(&pts);
        let area = mesh.total_area();
        let half_edges = mesh.element_counts().half_edges;

        let result = TriangulateModifier::<F64>::default()
            .triangulate_face(0, &mut mesh)
            .unwrap();
        let FaceTriangulation::Constrained {
            triangles,
            diagonals,
        } = result
        else {
            panic!("expected a constrained triangulation, got {:?}", result);
        };

        assert_eq!(triangles.len(), n - 2);
        assert_eq!(diagonals.len(), n - 3);
        assert_eq!(mesh.face_count(), n - 2);
        let boundary: usize = triangles.iter().map(|&f| mesh.face_degree(f)).sum();
        assert_eq!(boundary, 3 * (n - 2));
        assert_eq!(mesh.element_counts().half_edges, half_edges + 2 * diagonals.len());
        assert_relative_eq!(mesh.total_area(), area, max_relative = 1e-9);
        mesh.validate_connectivity();
    }
}

#[test]
fn test_collinear_face_is_rejected_untouched() {
    init();
    let mut mesh = polygon_mesh(&[
        [0.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [2.0, 2.0, 0.0],
        [3.0, 3.0, 0.0],
        [4.0, 4.0, 0.0],
    ]);
    let before = mesh.clone();

    let err = TriangulateModifier::<F64>::default()
        .triangulate_face(0, &mut mesh)
        .unwrap_err();
    assert_eq!(err, TriangulationError::DegenerateNormal(0));
    assert!(!triangulate_mesh(&mut mesh));
    assert_eq!(mesh, before);
}

#[test]
fn test_reflex_vertex_does_not_leak() {
    init();
    // arrow head, reflex at (2, 1)
    let pts = [
        [0.0, 0.0, 0.0],
        [4.0, 0.0, 0.0],
        [4.0, 4.0, 0.0],
        [2.0, 1.0, 0.0],
        [0.0, 4.0, 0.0],
    ];
    let mut mesh = polygon_mesh(&pts);
    assert_relative_eq!(mesh.total_area(), 10.0, epsilon = 1e-12);

    assert!(triangulate_face(0, &mut mesh));
    assert_eq!(mesh.face_count(), 3);
    for f in mesh.live_faces() {
        assert!(mesh.is_triangle(f));
        assert!(point_in_polygon(centroid(&mesh, f), &pts), "face {} is outside", f);
    }
    assert_relative_eq!(mesh.total_area(), 10.0, epsilon = 1e-12);
    mesh.validate_connectivity();
}

#[test]
fn test_l_shape() {
    init();
    let pts = [
        [0.0, 0.0, 0.0],
        [2.0, 0.0, 0.0],
        [2.0, 1.0, 0.0],
        [1.0, 1.0, 0.0],
        [1.0, 2.0, 0.0],
        [0.0, 2.0, 0.0],
    ];
    let mut mesh = polygon_mesh(&pts);
    assert!(triangulate_mesh(&mut mesh));
    assert_eq!(mesh.face_count(), 4);
    for f in mesh.live_faces() {
        assert!(point_in_polygon(centroid(&mesh, f), &pts));
    }
    assert_relative_eq!(mesh.total_area(), 3.0, epsilon = 1e-12);
}

#[test]
fn test_self_intersecting_boundary_fails() {
    init();
    let mut mesh = polygon_mesh(&[
        [0.0, 0.0, 0.0],
        [4.0, 0.0, 0.0],
        [0.0, 3.0, 0.0],
        [4.0, 3.0, 0.0],
        [2.0, 5.0, 0.0],
    ]);
    let before = mesh.clone();

    let err = TriangulateModifier::<F64>::default()
        .triangulate_face(0, &mut mesh)
        .unwrap_err();
    assert_eq!(err, TriangulationError::InconsistentTriangulation(0));
    assert_eq!(mesh, before);
}

#[test]
fn test_boundary_touching_itself_fails() {
    init();
    // vertex 3 lies on the edge from vertex 0 to vertex 1
    let mut mesh = polygon_mesh(&[
        [0.0, 0.0, 0.0],
        [4.0, 0.0, 0.0],
        [4.0, 4.0, 0.0],
        [2.0, 0.0, 0.0],
        [0.0, 4.0, 0.0],
    ]);
    let before = mesh.clone();

    let err = TriangulateModifier::<F64>::default()
        .triangulate_face(0, &mut mesh)
        .unwrap_err();
    assert_eq!(err, TriangulationError::InconsistentTriangulation(0));
    assert_eq!(mesh, before);
    mesh.validate_connectivity();
}

#[test]
fn test_duplicate_points_fail() {
    init();
    let mut mesh = polygon_mesh(&[
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
    ]);
    let before = mesh.clone();
    assert!(!triangulate_face(0, &mut mesh));
    assert_eq!(mesh, before);
}

#[test]
fn test_rational_hexagon() {
    init();
    let pts = [[0, 0], [3, 0], [5, 2], [4, 5], [1, 5], [-1, 2]];
    let points: Vec<Point3<Rational>> = pts
        .iter()
        .map(|p| Point3::from_vals([p[0], p[1], p[0] + p[1]]))
        .collect();
    let mut mesh = Mesh::from_polygons(points, &[[0usize, 1, 2, 3, 4, 5]]).unwrap();
    let area = mesh.total_area();

    assert!(triangulate_mesh(&mut mesh));
    assert_eq!(mesh.face_count(), 4);
    assert_relative_eq!(mesh.total_area(), area, max_relative = 1e-12);
    mesh.validate_connectivity();
}

#[test]
fn test_second_pass_is_a_no_op() {
    init();
    let points = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.5, 1.5, 0.0],
        [0.0, 1.0, 0.0],
        [2.0, 0.5, 0.0],
        [2.0, 1.5, 0.0],
    ];
    let mut mesh = Mesh::<F64, 3>::from_polygons(
        points.iter().map(|&p| Point3::from_vals(p)),
        &[vec![0usize, 1, 2, 3, 4], vec![1, 5, 6, 2]],
    )
    .unwrap();

    assert!(triangulate_mesh(&mut mesh));
    assert_eq!(mesh.face_count(), 5);
    mesh.validate_connectivity();

    let once = mesh.clone();
    assert!(triangulate_mesh(&mut mesh));
    assert_eq!(mesh, once);
}

#[test]
fn test_batch_keeps_going_after_a_failure() {
    init();
    let points = [
        // square
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        // collinear pentagon
        [0.0, 0.0, 2.0],
        [1.0, 0.0, 2.0],
        [2.0, 0.0, 2.0],
        [3.0, 0.0, 2.0],
        [4.0, 0.0, 2.0],
        // triangle
        [5.0, 0.0, 0.0],
        [6.0, 0.0, 0.0],
        [5.0, 1.0, 0.0],
        // convex pentagon
        [10.0, 0.0, 0.0],
        [12.0, 0.0, 0.0],
        [13.0, 1.0, 0.0],
        [11.0, 2.0, 0.0],
        [9.0, 1.0, 0.0],
    ];
    let polygons: Vec<Vec<usize>> = vec![
        vec![0, 1, 2, 3],
        vec![4, 5, 6, 7, 8],
        vec![9, 10, 11],
        vec![12, 13, 14, 15, 16],
    ];
    let mut mesh = Mesh::<F64, 3>::from_polygons(points.iter().map(|&p| Point3::from_vals(p)), &polygons)
        .unwrap();

    let report =
        TriangulateModifier::<F64>::default().triangulate_faces_report(mesh.live_faces(), &mut mesh);
    assert_eq!(report.triangulated, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failures, vec![(1, TriangulationError::DegenerateNormal(1))]);
    assert!(!report.is_success());

    // square -> 2, pentagon -> 3, triangle, and the untouched collinear face
    assert_eq!(mesh.face_count(), 7);
    assert_eq!(mesh.face_degree(1), 5);
    mesh.validate_connectivity();

    assert!(!triangulate_faces(mesh.live_faces(), &mut mesh));
}

#[test]
fn test_removed_face_is_not_a_face() {
    init();
    let mut mesh = polygon_mesh(&[
        [0.0, 0.0, 0.0],
        [2.0, 0.0, 0.0],
        [3.0, 1.0, 0.0],
        [1.0, 2.0, 0.0],
        [-1.0, 1.0, 0.0],
    ]);
    let modifier = TriangulateModifier::<F64>::default();
    modifier.triangulate_face(0, &mut mesh).unwrap();
    assert_eq!(
        modifier.triangulate_face(0, &mut mesh),
        Err(TriangulationError::NotAFace(0))
    );
    assert_eq!(
        modifier.triangulate_face(42, &mut mesh),
        Err(TriangulationError::NotAFace(42))
    );
}

#[test]
fn test_external_vertex_point_map() {
    init();
    // stored positions are degenerate, the external ones form a pentagon
    let mut mesh = polygon_mesh(&[[0.0, 0.0, 0.0]; 5]);
    let external: Vec<Point3<F64>> = [
        [0.0, 0.0, 0.0],
        [2.0, 0.0, 0.0],
        [3.0, 1.0, 0.0],
        [1.0, 2.0, 0.0],
        [-1.0, 1.0, 0.0],
    ]
    .into_iter()
    .map(Point3::from_vals)
    .collect();

    let mut plain = mesh.clone();
    assert!(!triangulate_face(0, &mut plain));

    let params = TriangulateParams::new().with_vertex_point_map(SlicePoints(&external));
    assert!(triangulate_face_with(0, &mut mesh, params));
    assert_eq!(mesh.face_count(), 3);
}
