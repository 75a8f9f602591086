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

use crate::{
    impl_mesh,
    mesh::{face::Face, half_edge::HalfEdge},
};

// Low-level mutators and Euler operations. The mutators may leave the mesh
// temporarily invalid; the Euler operations leave it valid when their
// preconditions hold.
impl_mesh! {
    /// Allocates a detached half-edge pair and returns one of them.
    /// Targets and links are set by the caller.
    pub fn add_edge(&mut self) -> usize {
        let h = self.half_edges.len();
        let mut he = HalfEdge::new(usize::MAX);
        he.twin = h + 1;
        let mut opp = HalfEdge::new(usize::MAX);
        opp.twin = h;
        self.half_edges.push(he);
        self.half_edges.push(opp);
        h
    }

    /// Appends an empty face record.
    pub fn add_face_record(&mut self) -> usize {
        let f = self.faces.len();
        self.faces.push(Face::new(usize::MAX));
        f
    }

    #[inline]
    pub fn set_target(&mut self, h: usize, v: usize) {
        self.half_edges[h].vertex = v;
    }

    /// Sets `next(h) = n` and `prev(n) = h`.
    #[inline]
    pub fn set_next(&mut self, h: usize, n: usize) {
        self.half_edges[h].next = n;
        self.half_edges[n].prev = h;
    }

    #[inline]
    pub fn set_face(&mut self, h: usize, f: Option<usize>) {
        self.half_edges[h].face = f;
    }

    #[inline]
    pub fn set_border(&mut self, h: usize) {
        self.half_edges[h].face = None;
    }

    #[inline]
    pub fn set_halfedge(&mut self, f: usize, h: usize) {
        self.faces[f].half_edge = h;
    }

    /// Marks the face as removed. Its half-edges must already be border.
    pub fn remove_face(&mut self, f: usize) {
        self.faces[f].removed = true;
    }

    /// Assigns `f` to every half-edge of the `next` cycle through `h`.
    pub fn set_face_in_face_loop(&mut self, h: usize, f: usize) {
        let mut cur = h;
        loop {
            self.half_edges[cur].face = Some(f);
            cur = self.half_edges[cur].next;
            if cur == h {
                break;
            }
        }
    }

    /// Splits the face of `h1` and `h2` with a new edge from `target(h1)` to
    /// `target(h2)`. The returned half-edge keeps the face of `h1`, its
    /// opposite bounds a new face.
    pub fn split_face(&mut self, h1: usize, h2: usize) -> usize {
        debug_assert_eq!(self.half_edges[h1].face, self.half_edges[h2].face);

        let hnew = self.add_edge();
        let opp = self.opposite(hnew);
        let fnew = self.add_face_record();

        let next_h1 = self.next(h1);
        let next_h2 = self.next(h2);

        self.set_target(hnew, self.target(h2));
        self.set_next(hnew, next_h2);
        self.set_next(h2, opp);

        self.set_target(opp, self.target(h1));
        self.set_next(opp, next_h1);
        self.set_next(h1, hnew);

        let f = self.half_edges[h1].face;
        self.set_face(hnew, f);
        self.set_face_in_face_loop(opp, fnew);
        if let Some(f) = f {
            self.set_halfedge(f, hnew);
        }
        self.set_halfedge(fnew, opp);

        self.register_half_edge(hnew);
        self.register_half_edge(opp);
        hnew
    }

    /// Creates a face over the existing `next` cycle through `h`.
    pub fn fill_hole(&mut self, h: usize) -> usize {
        let f = self.add_face_record();
        self.set_face_in_face_loop(h, f);
        self.set_halfedge(f, h);

        let mut cur = h;
        loop {
            self.register_half_edge(cur);
            cur = self.half_edges[cur].next;
            if cur == h {
                break;
            }
        }
        f
    }

    /// Points `edge_map` at `h`. An edge that already joins the same pair of
    /// vertices elsewhere (a diagonal duplicating an existing edge) stays in
    /// the mesh but is no longer found through `half_edge_between`.
    fn register_half_edge(&mut self, h: usize) {
        let key = (self.source(h), self.target(h));
        self.edge_map.insert(key, h);
    }
}
