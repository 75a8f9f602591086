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

use std::collections::HashMap;

use ahash::AHashSet;
use smallvec::SmallVec;

use crate::{
    error::MeshError,
    geometry::point::Point,
    impl_mesh,
    mesh::{basic_types::ElementCounts, face::Face, half_edge::HalfEdge, vertex::Vertex},
};

impl_mesh! {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            half_edges: Vec::new(),
            faces: Vec::new(),
            edge_map: HashMap::new(),
        }
    }

    /// Builds a polygon mesh from a point list and faces given as vertex cycles.
    /// Border loops are wired before returning.
    pub fn from_polygons<P: AsRef<[usize]>>(
        points: impl IntoIterator<Item = Point<T, N>>,
        polygons: &[P],
    ) -> Result<Self, MeshError> {
        let mut mesh = Self::new();
        for p in points {
            mesh.add_vertex(p);
        }
        for poly in polygons {
            mesh.add_face(poly.as_ref())?;
        }
        mesh.build_boundary_loops();
        Ok(mesh)
    }

    pub fn add_vertex(&mut self, position: Point<T, N>) -> usize {
        let idx = self.vertices.len();
        self.vertices.push(Vertex::new(position));
        idx
    }

    /// Adds a polygonal face given its vertex cycle (any degree >= 3).
    ///
    /// Edges shared with existing faces reuse the free border half-edge of
    /// that edge. `halfedge(f)` of the new face is the half-edge entering
    /// `vertices[0]`, so walking the face visits `vertices` in order.
    ///
    /// Border `next`/`prev` links are left stale; call
    /// `build_boundary_loops` once all faces are in.
    pub fn add_face(&mut self, vertices: &[usize]) -> Result<usize, MeshError> {
        let n = vertices.len();
        if n < 3 {
            return Err(MeshError::DegenerateFace(format!(
                "a face needs at least 3 vertices, got {}",
                n
            )));
        }

        let count = self.vertices.len();
        let mut seen = AHashSet::with_capacity(n);
        for &v in vertices {
            if v >= count {
                return Err(MeshError::InvalidVertexIndex { index: v, count });
            }
            if !seen.insert(v) {
                return Err(MeshError::DegenerateFace(format!("vertex {} repeated", v)));
            }
        }

        // Check every directed edge before touching anything.
        for i in 0..n {
            let (from, to) = (vertices[i], vertices[(i + 1) % n]);
            if let Some(&h) = self.edge_map.get(&(from, to)) {
                if self.half_edges[h].face.is_some() {
                    return Err(MeshError::NonManifoldEdge(from, to));
                }
            }
        }

        let face_idx = self.faces.len();
        self.faces.push(Face::new(usize::MAX));

        let mut ring: SmallVec<[usize; 4]> = SmallVec::with_capacity(n);
        for i in 0..n {
            let (from, to) = (vertices[i], vertices[(i + 1) % n]);
            let h = match self.edge_map.get(&(from, to)) {
                Some(&h) => h,
                None => {
                    let h = self.half_edges.len();
                    let t = h + 1;

                    let mut he = HalfEdge::new(to);
                    he.twin = t;
                    let mut border = HalfEdge::new(from);
                    border.twin = h;

                    self.half_edges.push(he);
                    self.half_edges.push(border);
                    self.edge_map.insert((from, to), h);
                    self.edge_map.insert((to, from), t);
                    h
                }
            };
            self.half_edges[h].face = Some(face_idx);
            self.vertices[from].half_edge.get_or_insert(h);
            ring.push(h);
        }

        for i in 0..n {
            let h = ring[i];
            let nx = ring[(i + 1) % n];
            self.half_edges[h].next = nx;
            self.half_edges[nx].prev = h;
        }

        self.faces[face_idx].half_edge = ring[n - 1];
        Ok(face_idx)
    }

    /// - Border half-edges have `face == None` and a twin `t = twin(b)`.
    /// - For each border `b = u->v`, `b.next` is the next border spoke leaving `v`,
    ///   found by rotating through the interior faces around `v`.
    /// - `prev` is derived from `next` so both directions agree.
    pub fn build_boundary_loops(&mut self) {
        let m = self.half_edges.len();

        let borders: Vec<usize> = (0..m)
            .filter(|&i| !self.half_edges[i].removed && self.half_edges[i].face.is_none())
            .collect();

        let mut next_of = vec![usize::MAX; m];
        for &b in &borders {
            // interior v->u, rotated around v until a border spoke shows up
            let mut t = self.half_edges[b].twin;
            let mut steps = 0usize;
            let b_next = loop {
                if t >= m || !self.face_ok(t) {
                    break b;
                }
                let prev_t = self.half_edges[t].prev;
                let cand = self.half_edges[prev_t].twin;
                if cand >= m || self.half_edges[cand].removed {
                    break b;
                }
                if self.half_edges[cand].face.is_none() {
                    break cand;
                }
                t = cand;

                steps += 1;
                if steps > m {
                    break b;
                }
            };
            next_of[b] = b_next;
        }

        for &b in &borders {
            self.half_edges[b].next = next_of[b];
        }
        for &b in &borders {
            let nb = self.half_edges[b].next;
            self.half_edges[nb].prev = b;
        }

        #[cfg(debug_assertions)]
        {
            for &b in &borders {
                let he = &self.half_edges[b];
                assert!(self.half_edges[he.next].face.is_none(), "b.next must be border at {}", b);
                assert_eq!(self.half_edges[he.next].prev, b, "boundary next->prev mismatch at {}", b);
            }
        }
    }

    /// Drops removed faces and renumbers the survivors.
    pub fn remove_invalidated_faces(&mut self) {
        let mut new_faces = Vec::new();
        let mut face_mapping = vec![None; self.faces.len()];

        for (old_idx, face) in self.faces.iter().enumerate() {
            if !face.removed {
                face_mapping[old_idx] = Some(new_faces.len());
                new_faces.push(face.clone());
            }
        }

        for he in &mut self.half_edges {
            if he.removed {
                continue;
            }
            if let Some(f) = he.face {
                he.face = face_mapping[f];
            }
        }

        self.faces = new_faces;
    }

    pub fn face_count(&self) -> usize {
        self.faces.iter().filter(|f| !f.removed).count()
    }

    pub fn edge_count(&self) -> usize {
        self.half_edges.iter().filter(|h| !h.removed).count() / 2
    }

    pub fn element_counts(&self) -> ElementCounts {
        let half_edges = self.half_edges.iter().filter(|h| !h.removed).count();
        ElementCounts {
            vertices: self.vertices.len(),
            edges: half_edges / 2,
            half_edges,
            faces: self.face_count(),
        }
    }
}
