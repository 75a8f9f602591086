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

use approx::assert_relative_eq;

use trifaces::io::off::{read_off_from, write_off_to};
use trifaces::mesh_processing::triangulate::triangulate_mesh;
use trifaces::numeric::float::F64;

// hexagonal prism: two hexagonal caps, six quad sides
const PRISM: &str = "OFF
12 8 0
1 0 0
0.5 0.866 0
-0.5 0.866 0
-1 0 0
-0.5 -0.866 0
0.5 -0.866 0
1 0 1
0.5 0.866 1
-0.5 0.866 1
-1 0 1
-0.5 -0.866 1
0.5 -0.866 1
6 5 4 3 2 1 0
6 6 7 8 9 10 11
4 0 1 7 6
4 1 2 8 7
4 2 3 9 8
4 3 4 10 9
4 4 5 11 10
4 5 0 6 11
";

#[test]
fn test_hexagonal_prism_round_trip() {
    let mut mesh = read_off_from::<F64, _>(PRISM.as_bytes()).unwrap();
    assert_eq!(mesh.face_count(), 8);
    mesh.validate_connectivity();
    let area = mesh.total_area();

    assert!(triangulate_mesh(&mut mesh));
    // 2 hexagons -> 4 triangles each, 6 quads -> 2 each
    assert_eq!(mesh.face_count(), 20);
    assert_eq!(mesh.edge_count(), 30);
    assert!(mesh.half_edges.iter().all(|he| he.face.is_some()));
    mesh.validate_connectivity();
    assert_relative_eq!(mesh.total_area(), area, max_relative = 1e-9);

    let mut buf = Vec::new();
    write_off_to(&mesh, &mut buf).unwrap();
    let back = read_off_from::<F64, _>(buf.as_slice()).unwrap();
    assert_eq!(back.face_count(), 20);
    for f in back.live_faces() {
        assert_eq!(back.face_degree(f), 3);
    }
    back.validate_connectivity();
}
