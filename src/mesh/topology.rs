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

use ahash::AHashSet;
use smallvec::SmallVec;

use crate::{
    geometry::{
        point::Point3,
        vector::{Vector3, VectorOps},
    },
    impl_mesh,
    kernel::kernel::{DefaultKernel, Kernel3},
    mesh::basic_types::Mesh,
    numeric::scalar::{RefArith, Scalar},
};

impl_mesh! {
    #[inline]
    pub fn target(&self, he: usize) -> usize {
        self.half_edges[he].vertex
    }

    /// Reads the twin, so it also works on border half-edges whose loops
    /// have not been wired yet.
    #[inline]
    pub fn source(&self, he: usize) -> usize {
        self.half_edges[self.half_edges[he].twin].vertex
    }

    #[inline]
    pub fn next(&self, he: usize) -> usize {
        self.half_edges[he].next
    }

    #[inline]
    pub fn prev(&self, he: usize) -> usize {
        self.half_edges[he].prev
    }

    #[inline]
    pub fn opposite(&self, he: usize) -> usize {
        self.half_edges[he].twin
    }

    #[inline]
    pub fn face(&self, he: usize) -> Option<usize> {
        self.half_edges[he].face
    }

    #[inline]
    pub fn halfedge(&self, f: usize) -> usize {
        self.faces[f].half_edge
    }

    #[inline]
    pub fn is_border(&self, he: usize) -> bool {
        self.half_edges[he].face.is_none()
    }

    #[inline]
    pub fn face_ok(&self, h: usize) -> bool {
        match self.half_edges[h].face {
            Some(f) => !self.faces[f].removed,
            None => false,
        }
    }

    #[inline]
    pub fn is_live_face(&self, f: usize) -> bool {
        f < self.faces.len() && !self.faces[f].removed
    }

    /// Indices of the faces that have not been removed.
    pub fn live_faces(&self) -> Vec<usize> {
        (0..self.faces.len()).filter(|&f| !self.faces[f].removed).collect()
    }

    /// Returns the indices of the half-edges bounding face `f`,
    /// starting at `halfedge(f)`.
    pub fn face_half_edges(&self, f: usize) -> SmallVec<[usize; 4]> {
        if self.faces[f].removed {
            panic!("face_half_edges called on removed face {}", f);
        }
        let mut result = SmallVec::new();
        let start = self.faces[f].half_edge;
        let mut h = start;
        loop {
            result.push(h);
            h = self.half_edges[h].next;
            if h == start {
                break;
            }
        }
        result
    }

    pub fn face_degree(&self, f: usize) -> usize {
        self.face_half_edges(f).len()
    }

    /// `next(next(h)) == prev(h)` on the face's half-edge.
    #[inline]
    pub fn is_triangle(&self, f: usize) -> bool {
        let h = self.faces[f].half_edge;
        self.next(self.next(h)) == self.prev(h)
    }

    /// Target vertices of the face's half-edges, in cycle order.
    pub fn face_vertices(&self, f: usize) -> SmallVec<[usize; 4]> {
        self.face_half_edges(f)
            .into_iter()
            .map(|h| self.half_edges[h].vertex)
            .collect()
    }

    pub fn half_edge_between(&self, from: usize, to: usize) -> Option<usize> {
        self.edge_map
            .get(&(from, to))
            .copied()
            .filter(|&h| !self.half_edges[h].removed)
    }

    pub fn validate_connectivity(&self) {
        for (i, he) in self.half_edges.iter().enumerate() {
            if he.removed {
                continue;
            }
            assert_eq!(self.half_edges[he.next].prev, i, "he {} next -> prev mismatch", i);
            assert_eq!(self.half_edges[he.prev].next, i, "he {} prev -> next mismatch", i);
            assert_eq!(self.half_edges[he.twin].twin, i, "he {} twin -> twin mismatch", i);
            assert_ne!(
                self.half_edges[he.twin].vertex, he.vertex,
                "he {} twin has the same target",
                i
            );

            if let Some(f) = he.face {
                assert!(!self.faces[f].removed, "he {} bound to removed face {}", i, f);
                let mut cur = self.faces[f].half_edge;
                loop {
                    if cur == i {
                        break;
                    }
                    cur = self.half_edges[cur].next;
                    assert!(cur != self.faces[f].half_edge, "he {} not in face {}", i, f);
                }
            }
        }

        let mut edge_set = AHashSet::new();
        for he in self.half_edges.iter().filter(|he| !he.removed) {
            let src = self.half_edges[he.twin].vertex;
            let dst = he.vertex;
            assert!(edge_set.insert((src, dst)), "duplicate half-edge ({},{})", src, dst);
        }

        for (fi, face) in self.faces.iter().enumerate() {
            if face.removed {
                continue;
            }
            let start = face.half_edge;
            let mut cur = start;
            loop {
                assert_eq!(
                    self.half_edges[cur].face,
                    Some(fi),
                    "face {} half-edge {} points at wrong face",
                    fi,
                    cur
                );
                cur = self.half_edges[cur].next;
                if cur == start {
                    break;
                }
            }
        }

        for (vi, v) in self.vertices.iter().enumerate() {
            if let Some(he0) = v.half_edge {
                assert_eq!(
                    self.source(he0),
                    vi,
                    "vertex {}: half_edge {} is not outgoing from this vertex",
                    vi,
                    he0
                );
            }
        }
    }
}

impl<T: Scalar> Mesh<T, 3>
where
    for<'a> &'a T: RefArith<T>,
{
    /// Unnormalized face normal: sum of the fan normals taken from the
    /// source of `halfedge(f)`. Null for collinear boundaries.
    pub fn face_normal(&self, f: usize) -> Vector3<T> {
        let h = self.faces[f].half_edge;
        let mut ring: Vec<Point3<T>> = vec![self.vertices[self.source(h)].position.clone()];
        ring.extend(
            self.face_vertices(f)
                .into_iter()
                .take_while(|&v| v != self.source(h))
                .map(|v| self.vertices[v].position.clone()),
        );
        DefaultKernel.polygon_normal(&ring)
    }

    /// Area of a planar face, in floating point.
    pub fn face_area(&self, f: usize) -> f64 {
        let n2 = self.face_normal(f).norm2().to_f64().unwrap_or(0.0);
        0.5 * n2.sqrt()
    }

    pub fn total_area(&self) -> f64 {
        self.live_faces().into_iter().map(|f| self.face_area(f)).sum()
    }
}
