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

use ahash::AHashMap;

use crate::{
    mesh::basic_types::Mesh,
    numeric::scalar::{RefArith, Scalar},
    operations::triangulation::{Edge2, Triangulation2, VertexHandle, ccw, cw},
};

use super::classify::FaceInfo;

/// Detaches every half-edge of `f` from it and removes the face record.
///
/// Unlike a generic hole operation the opposite half-edges may already be
/// border, so an isolated face can be reopened as well.
pub fn open_face<T: Scalar>(mesh: &mut Mesh<T, 3>, f: usize)
where
    for<'a> &'a T: RefArith<T>,
{
    for h in mesh.face_half_edges(f) {
        mesh.set_border(h);
    }
    mesh.remove_face(f);
}

/// Mesh elements created by [`rebuild_connectivity`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rebuilt {
    pub faces: Vec<usize>,
    /// One half-edge per new interior edge.
    pub diagonals: Vec<usize>,
}

/// Fills the hole left by [`open_face`] with the interior faces of `cdt`.
///
/// `vertex_info` maps each triangulation vertex to the boundary half-edge
/// entering its mesh vertex. Constrained edges reuse those half-edges, every
/// other edge touching an interior face gets a new edge.
///
/// # Panics
///
/// If an interior face ends up with an unassigned side, which means the
/// classification disagrees with the constraints.
pub fn rebuild_connectivity<T, Tr>(
    mesh: &mut Mesh<T, 3>,
    cdt: &Tr,
    info: &mut [FaceInfo],
    vertex_info: &AHashMap<VertexHandle, usize>,
) -> Rebuilt
where
    T: Scalar,
    for<'a> &'a T: RefArith<T>,
    Tr: Triangulation2<T>,
{
    let half_edge_of = |v: VertexHandle| -> usize {
        match vertex_info.get(&v) {
            Some(&h) => h,
            None => panic!("triangulation vertex {} has no boundary half-edge", v),
        }
    };

    let mut rebuilt = Rebuilt::default();
    for e in cdt.finite_edges() {
        let (fh, i) = (e.face, e.index);
        let opp = cdt.neighbor(fh, i);
        let opp_i = cdt.mirror_index(fh, i);
        let va = cdt.vertex(fh, cw(i));
        let vb = cdt.vertex(fh, ccw(i));

        let constrained = cdt.is_constrained(Edge2 { face: fh, index: i });
        if !constrained && !(info[fh].is_external && info[opp].is_external) {
            let h_new = mesh.add_edge();
            let h_opp = mesh.opposite(h_new);
            info[fh].e[i] = Some(h_new);
            info[opp].e[opp_i] = Some(h_opp);

            let ta = mesh.target(half_edge_of(va));
            let tb = mesh.target(half_edge_of(vb));
            mesh.set_target(h_new, ta);
            mesh.set_target(h_opp, tb);
            rebuilt.diagonals.push(h_new);
        } else if constrained {
            if !info[fh].is_external {
                info[fh].e[i] = Some(half_edge_of(va));
            }
            if !info[opp].is_external {
                info[opp].e[opp_i] = Some(half_edge_of(vb));
            }
        }
    }

    for fh in cdt.finite_faces() {
        if info[fh].is_external {
            continue;
        }
        let [h0, h1, h2] = info[fh].e.map(|h| match h {
            Some(h) => h,
            None => panic!("interior triangle {} has a side without a half-edge", fh),
        });
        mesh.set_next(h0, h1);
        mesh.set_next(h1, h2);
        mesh.set_next(h2, h0);
        rebuilt.faces.push(mesh.fill_hole(h0));
    }
    rebuilt
}
