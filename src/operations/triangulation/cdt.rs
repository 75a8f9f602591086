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

use std::collections::VecDeque;

use log::trace;
use smallvec::SmallVec;

use crate::{
    geometry::{
        point::{Point2, Point3, PointOps},
        vector::VectorOps,
    },
    kernel::predicates::{are_equal, incircle, orient2d},
    numeric::scalar::{RefArith, Scalar},
    operations::triangulation::{
        Edge2, FaceHandle, ProjectionTraits, Triangulation2, VertexHandle, ccw, cw,
    },
};

const NONE: usize = usize::MAX;
const INFINITE: VertexHandle = 0;
const MAX_SPLIT_DEPTH: usize = 64;

#[derive(Clone, Debug)]
struct TdsVertex<T: Scalar> {
    point: Point3<T>,
    projected: Point2<T>,
    face: FaceHandle,
}

#[derive(Clone, Debug)]
struct TdsFace {
    v: [VertexHandle; 3],
    n: [FaceHandle; 3],
    constrained: [bool; 3],
}

enum Locate {
    Face(FaceHandle),
    Edge(FaceHandle, usize),
    Vertex(VertexHandle),
    Outside(FaceHandle),
    Nowhere,
}

enum Walk {
    /// Unconstrained edges crossed by the segment, as (left, right) pairs.
    Edges(Vec<(VertexHandle, VertexHandle)>),
    /// A vertex lying on the segment.
    Through(VertexHandle),
    /// A constrained edge (left, right) crossed by the segment.
    Crossing(VertexHandle, VertexHandle),
    Failed,
}

/// Constrained Delaunay triangulation with an infinite vertex.
///
/// Points are inserted incrementally (Lawson flips), constraints are forced
/// by flipping the edges they cross. A constraint crossing another one is
/// split at their intersection point, which becomes a new vertex. Faces are
/// never deleted, splits and flips reuse their slots.
#[derive(Clone, Debug)]
pub struct ConstrainedDelaunay<T: Scalar> {
    traits: ProjectionTraits<T>,
    vertices: Vec<TdsVertex<T>>,
    faces: Vec<TdsFace>,
    /// Constraints received before the triangulation became 2D.
    pending: Vec<(VertexHandle, VertexHandle)>,
    unrealized: bool,
}

impl<T: Scalar> ConstrainedDelaunay<T>
where
    for<'a> &'a T: RefArith<T>,
{
    #[inline]
    fn orient(&self, a: VertexHandle, b: VertexHandle, c: VertexHandle) -> i8 {
        orient2d(
            &self.vertices[a].projected,
            &self.vertices[b].projected,
            &self.vertices[c].projected,
        )
        .sign()
    }

    fn orient_point(&self, a: VertexHandle, b: VertexHandle, p: &Point2<T>) -> i8 {
        orient2d(&self.vertices[a].projected, &self.vertices[b].projected, p).sign()
    }

    /// `x` lies ahead of `a` in the direction of `b`.
    fn points_forward(&self, a: VertexHandle, b: VertexHandle, x: VertexHandle) -> bool {
        let pa = &self.vertices[a].projected;
        let ab = &self.vertices[b].projected - pa;
        let ax = &self.vertices[x].projected - pa;
        ab.dot(&ax).is_positive()
    }

    #[inline]
    fn is_infinite_face(&self, f: FaceHandle) -> bool {
        self.faces[f].v.contains(&INFINITE)
    }

    #[inline]
    fn index_of(&self, f: FaceHandle, v: VertexHandle) -> Option<usize> {
        self.faces[f].v.iter().position(|&x| x == v)
    }

    /// Index of the edge `(u, w)` in face `f`, i.e. of its third vertex.
    fn third_index(&self, f: FaceHandle, u: VertexHandle, w: VertexHandle) -> usize {
        let v = &self.faces[f].v;
        match (0..3).find(|&k| v[k] != u && v[k] != w) {
            Some(k) => k,
            None => panic!("face {} does not contain edge ({}, {})", f, u, w),
        }
    }

    fn mirror(&self, f: FaceHandle, i: usize) -> usize {
        let g = self.faces[f].n[i];
        let face = &self.faces[f];
        self.third_index(g, face.v[ccw(i)], face.v[cw(i)])
    }

    /// Points the neighbor slot of `x` across edge `(u, w)` at `new_face`.
    fn relink(&mut self, x: FaceHandle, u: VertexHandle, w: VertexHandle, new_face: FaceHandle) {
        let k = self.third_index(x, u, w);
        self.faces[x].n[k] = new_face;
    }

    fn find_vertex(&self, p: &Point2<T>) -> Option<VertexHandle> {
        let eps = T::tolerance();
        (1..self.vertices.len()).find(|&v| are_equal(&self.vertices[v].projected, p, &eps))
    }

    fn find_edge(&self, a: VertexHandle, b: VertexHandle) -> Option<(FaceHandle, usize)> {
        (0..self.faces.len()).find_map(|f| {
            let ia = self.index_of(f, a)?;
            let ib = self.index_of(f, b)?;
            Some((f, 3 - ia - ib))
        })
    }

    fn push_vertex(&mut self, point: Point3<T>, projected: Point2<T>) -> VertexHandle {
        let vh = self.vertices.len();
        self.vertices.push(TdsVertex {
            point,
            projected,
            face: NONE,
        });
        vh
    }

    fn locate(&self, p: &Point2<T>) -> Locate {
        for f in 0..self.faces.len() {
            if self.is_infinite_face(f) {
                continue;
            }
            let [v0, v1, v2] = self.faces[f].v;
            let o = [
                self.orient_point(v1, v2, p),
                self.orient_point(v2, v0, p),
                self.orient_point(v0, v1, p),
            ];
            if o.iter().any(|&s| s < 0) {
                continue;
            }
            let zeros: SmallVec<[usize; 3]> = (0..3).filter(|&i| o[i] == 0).collect();
            return match zeros.len() {
                0 => Locate::Face(f),
                1 => Locate::Edge(f, zeros[0]),
                _ => {
                    // on two edges: the shared corner
                    let k = 3 - zeros[0] - zeros[1];
                    Locate::Vertex(self.faces[f].v[k])
                }
            };
        }

        for f in 0..self.faces.len() {
            let Some(i) = self.index_of(f, INFINITE) else {
                continue;
            };
            let u = self.faces[f].v[ccw(i)];
            let w = self.faces[f].v[cw(i)];
            if self.orient_point(u, w, p) > 0 {
                return Locate::Outside(f);
            }
        }
        Locate::Nowhere
    }

    /// Builds the first triangle once a point leaves the common line of the
    /// points received so far, then replays the buffered vertices and constraints.
    fn try_bootstrap(&mut self, vh: VertexHandle) {
        if vh < 3 || self.orient(1, 2, vh) == 0 {
            return;
        }
        let (a, b, c) = if self.orient(1, 2, vh) > 0 {
            (1, 2, vh)
        } else {
            (2, 1, vh)
        };

        self.faces = vec![
            TdsFace {
                v: [a, b, c],
                n: [1, 2, 3],
                constrained: [false; 3],
            },
            TdsFace {
                v: [INFINITE, c, b],
                n: [0, 3, 2],
                constrained: [false; 3],
            },
            TdsFace {
                v: [INFINITE, a, c],
                n: [0, 1, 3],
                constrained: [false; 3],
            },
            TdsFace {
                v: [INFINITE, b, a],
                n: [0, 2, 1],
                constrained: [false; 3],
            },
        ];
        self.vertices[INFINITE].face = 1;
        for v in [a, b, c] {
            self.vertices[v].face = 0;
        }

        for w in 3..vh {
            let projected = self.vertices[w].projected.clone();
            let loc = self.locate(&projected);
            self.place(w, loc);
        }

        for (u, w) in std::mem::take(&mut self.pending) {
            self.insert_constraint(u, w);
        }
    }

    fn place(&mut self, vh: VertexHandle, loc: Locate) {
        match loc {
            Locate::Face(f) => {
                let created = self.split_face(f, vh);
                self.legalize(vh, created.to_vec());
            }
            Locate::Edge(f, i) => {
                let created = self.split_edge(f, i, vh);
                self.legalize(vh, created.to_vec());
            }
            Locate::Outside(f) => self.insert_outside(f, vh),
            Locate::Vertex(_) | Locate::Nowhere => {
                trace!("cdt: vertex {} could not be placed", vh);
                self.unrealized = true;
            }
        }
    }

    /// 1 -> 3 split of `f` by the new vertex `p`.
    fn split_face(&mut self, f: FaceHandle, p: VertexHandle) -> [FaceHandle; 3] {
        let [a, b, c] = self.faces[f].v;
        let [na, nb, nc] = self.faces[f].n;
        let [ca, cb, cc] = self.faces[f].constrained;
        let f2 = self.faces.len();
        let f3 = f2 + 1;

        self.faces[f] = TdsFace {
            v: [p, b, c],
            n: [na, f2, f3],
            constrained: [ca, false, false],
        };
        self.faces.push(TdsFace {
            v: [a, p, c],
            n: [f, nb, f3],
            constrained: [false, cb, false],
        });
        self.faces.push(TdsFace {
            v: [a, b, p],
            n: [f, f2, nc],
            constrained: [false, false, cc],
        });
        self.relink(nb, c, a, f2);
        self.relink(nc, a, b, f3);

        self.vertices[p].face = f;
        self.vertices[b].face = f;
        self.vertices[c].face = f;
        self.vertices[a].face = f2;
        [f, f2, f3]
    }

    /// 2 -> 4 split of edge `i` of `f` by the new vertex `p` lying on it.
    /// Both halves inherit the constraint flag of the edge.
    fn split_edge(&mut self, f: FaceHandle, i: usize, p: VertexHandle) -> [FaceHandle; 4] {
        let g = self.faces[f].n[i];
        let j = self.mirror(f, i);

        let a = self.faces[f].v[i];
        let b = self.faces[f].v[ccw(i)];
        let c = self.faces[f].v[cw(i)];
        let d = self.faces[g].v[j];
        let cons = self.faces[f].constrained[i];

        let (n_fb, c_fb) = (self.faces[f].n[ccw(i)], self.faces[f].constrained[ccw(i)]);
        let (n_fc, c_fc) = (self.faces[f].n[cw(i)], self.faces[f].constrained[cw(i)]);
        let (n_gc, c_gc) = (self.faces[g].n[ccw(j)], self.faces[g].constrained[ccw(j)]);
        let (n_gb, c_gb) = (self.faces[g].n[cw(j)], self.faces[g].constrained[cw(j)]);

        let f2 = self.faces.len();
        let g2 = f2 + 1;

        self.faces[f] = TdsFace {
            v: [a, b, p],
            n: [g2, f2, n_fc],
            constrained: [cons, false, c_fc],
        };
        self.faces[g] = TdsFace {
            v: [d, c, p],
            n: [f2, g2, n_gb],
            constrained: [cons, false, c_gb],
        };
        self.faces.push(TdsFace {
            v: [a, p, c],
            n: [g, n_fb, f],
            constrained: [cons, c_fb, false],
        });
        self.faces.push(TdsFace {
            v: [d, p, b],
            n: [f, n_gc, g],
            constrained: [cons, c_gc, false],
        });
        self.relink(n_fb, c, a, f2);
        self.relink(n_gc, b, d, g2);

        self.vertices[a].face = f;
        self.vertices[b].face = f;
        self.vertices[p].face = f;
        self.vertices[c].face = f2;
        self.vertices[d].face = g;
        [f, f2, g, g2]
    }

    /// Replaces edge `i` of `f` by the other diagonal of the quad formed with
    /// its neighbor. Afterwards `f = (a, b, d)` and the neighbor is `(a, d, c)`,
    /// with `a` the vertex of `f` opposite to the old edge.
    fn flip(&mut self, f: FaceHandle, i: usize) {
        let g = self.faces[f].n[i];
        let j = self.mirror(f, i);

        let a = self.faces[f].v[i];
        let b = self.faces[f].v[ccw(i)];
        let c = self.faces[f].v[cw(i)];
        let d = self.faces[g].v[j];

        let (n_fb, c_fb) = (self.faces[f].n[ccw(i)], self.faces[f].constrained[ccw(i)]);
        let (n_fc, c_fc) = (self.faces[f].n[cw(i)], self.faces[f].constrained[cw(i)]);
        let (n_gc, c_gc) = (self.faces[g].n[ccw(j)], self.faces[g].constrained[ccw(j)]);
        let (n_gb, c_gb) = (self.faces[g].n[cw(j)], self.faces[g].constrained[cw(j)]);

        self.faces[f] = TdsFace {
            v: [a, b, d],
            n: [n_gc, g, n_fc],
            constrained: [c_gc, false, c_fc],
        };
        self.faces[g] = TdsFace {
            v: [a, d, c],
            n: [n_gb, n_fb, f],
            constrained: [c_gb, c_fb, false],
        };
        self.relink(n_gc, b, d, f);
        self.relink(n_fb, c, a, g);

        self.vertices[a].face = f;
        self.vertices[b].face = f;
        self.vertices[d].face = f;
        self.vertices[c].face = g;
    }

    /// Flipping edge `i` of `f` keeps both triangles counter-clockwise.
    fn is_convex_quad(&self, f: FaceHandle, i: usize) -> bool {
        let g = self.faces[f].n[i];
        let j = self.mirror(f, i);
        let a = self.faces[f].v[i];
        let b = self.faces[f].v[ccw(i)];
        let c = self.faces[f].v[cw(i)];
        let d = self.faces[g].v[j];
        if [a, b, c, d].contains(&INFINITE) {
            return false;
        }
        self.orient(a, b, d) > 0 && self.orient(a, d, c) > 0
    }

    fn violates_delaunay(&self, f: FaceHandle, i: usize) -> bool {
        let g = self.faces[f].n[i];
        if self.is_infinite_face(f) || self.is_infinite_face(g) {
            return false;
        }
        let d = self.faces[g].v[self.mirror(f, i)];
        let [x, y, z] = self.faces[f].v;
        incircle(
            &self.vertices[x].projected,
            &self.vertices[y].projected,
            &self.vertices[z].projected,
            &self.vertices[d].projected,
        )
        .is_positive()
    }

    /// Lawson flips around the freshly inserted vertex `p`.
    ///
    /// Every flip keeps the triangulation valid and the constraints in place.
    /// The step limit only matters when inexact predicates disagree with each
    /// other; stopping there leaves a valid triangulation whose free diagonals
    /// may not be Delaunay.
    fn legalize(&mut self, p: VertexHandle, seeds: Vec<FaceHandle>) {
        let mut stack = seeds;
        let limit = 64 * (self.faces.len() + 16);
        let mut steps = 0usize;

        while let Some(f) = stack.pop() {
            steps += 1;
            if steps > limit {
                trace!("cdt: legalization around {} stopped after {} steps", p, limit);
                break;
            }
            let Some(i) = self.index_of(f, p) else {
                continue;
            };
            if self.faces[f].constrained[i] {
                continue;
            }
            if self.violates_delaunay(f, i) && self.is_convex_quad(f, i) {
                let g = self.faces[f].n[i];
                self.flip(f, i);
                stack.push(f);
                stack.push(g);
            }
        }
    }

    /// Inserts `p` outside the convex hull, seen from the hull edge of the
    /// infinite face `f`, then flips the hull back to convex.
    fn insert_outside(&mut self, f: FaceHandle, p: VertexHandle) {
        self.split_face(f, p);

        let limit = 4 * (self.faces.len() + 4);
        for _ in 0..limit {
            let mut flipped = false;
            for fi in 0..self.faces.len() {
                if !self.is_infinite_face(fi) {
                    continue;
                }
                let Some(ip) = self.index_of(fi, p) else {
                    continue;
                };
                let g = self.faces[fi].n[ip];
                let Some(k) = self.index_of(g, INFINITE) else {
                    continue;
                };
                let u = self.faces[g].v[ccw(k)];
                let w = self.faces[g].v[cw(k)];
                if u == p || w == p {
                    continue;
                }
                if self.orient(u, w, p) > 0 {
                    self.flip(fi, ip);
                    flipped = true;
                    break;
                }
            }
            if !flipped {
                break;
            }
        }

        let around: Vec<FaceHandle> = (0..self.faces.len())
            .filter(|&fi| !self.is_infinite_face(fi) && self.faces[fi].v.contains(&p))
            .collect();
        self.legalize(p, around);
    }

    fn mark_constrained(&mut self, a: VertexHandle, b: VertexHandle) -> bool {
        let Some((f, i)) = self.find_edge(a, b) else {
            return false;
        };
        let g = self.faces[f].n[i];
        let j = self.mirror(f, i);
        self.faces[f].constrained[i] = true;
        self.faces[g].constrained[j] = true;
        true
    }

    /// Walks from `a` towards `b` through the triangulation.
    fn walk(&self, a: VertexHandle, b: VertexHandle) -> Walk {
        let mut start = None;
        for f in 0..self.faces.len() {
            if self.is_infinite_face(f) {
                continue;
            }
            let Some(ia) = self.index_of(f, a) else {
                continue;
            };
            let u = self.faces[f].v[ccw(ia)];
            let w = self.faces[f].v[cw(ia)];
            for x in [u, w] {
                if self.orient(a, b, x) == 0 && self.points_forward(a, b, x) {
                    return Walk::Through(x);
                }
            }
            if self.orient(a, u, b) > 0 && self.orient(a, b, w) > 0 {
                start = Some((f, w, u));
                break;
            }
        }

        let Some((mut f, mut l, mut r)) = start else {
            return Walk::Failed;
        };
        let mut crossed = Vec::new();
        for _ in 0..=self.faces.len() {
            let i = self.third_index(f, l, r);
            if self.faces[f].constrained[i] {
                return Walk::Crossing(l, r);
            }
            crossed.push((l, r));

            let g = self.faces[f].n[i];
            let d = self.faces[g].v[self.mirror(f, i)];
            if d == b {
                return Walk::Edges(crossed);
            }
            if d == INFINITE {
                return Walk::Failed;
            }
            match self.orient(a, b, d) {
                0 => return Walk::Through(d),
                s if s > 0 => l = d,
                _ => r = d,
            }
            f = g;
        }
        Walk::Failed
    }

    /// Inserts the intersection of segment `ab` with the constrained edge `lr`.
    fn insert_intersection(
        &mut self,
        a: VertexHandle,
        b: VertexHandle,
        l: VertexHandle,
        r: VertexHandle,
    ) -> Option<VertexHandle> {
        let pa = &self.vertices[a].projected;
        let pb = &self.vertices[b].projected;
        let ol = orient2d(pa, pb, &self.vertices[l].projected);
        let or = orient2d(pa, pb, &self.vertices[r].projected);
        let denom = &ol - &or;
        if denom.is_zero() {
            return None;
        }
        let t = &ol / &denom;
        let point = self.vertices[l].point.lerp(&self.vertices[r].point, &t);
        Some(self.insert(point))
    }

    fn insert_segment(&mut self, a: VertexHandle, b: VertexHandle, depth: usize) {
        if a == b {
            return;
        }
        if depth > MAX_SPLIT_DEPTH
            || self.vertices[a].face == NONE
            || self.vertices[b].face == NONE
        {
            trace!("cdt: constraint ({}, {}) dropped", a, b);
            self.unrealized = true;
            return;
        }
        if self.mark_constrained(a, b) {
            return;
        }

        match self.walk(a, b) {
            Walk::Edges(crossed) => self.flip_crossed(a, b, crossed),
            Walk::Through(x) => {
                self.insert_segment(a, x, depth + 1);
                self.insert_segment(x, b, depth + 1);
            }
            Walk::Crossing(l, r) => match self.insert_intersection(a, b, l, r) {
                Some(x) => {
                    trace!("cdt: constraint ({}, {}) crosses ({}, {}) at vertex {}", a, b, l, r, x);
                    for (u, w) in [(l, x), (x, r), (a, x), (x, b)] {
                        self.insert_segment(u, w, depth + 1);
                    }
                }
                None => self.unrealized = true,
            },
            Walk::Failed => {
                trace!("cdt: no walk from {} to {}", a, b);
                self.unrealized = true;
            }
        }
    }

    /// Flips the edges crossed by `ab` until `ab` is an edge, then restores
    /// the Delaunay property on the edges created on the way.
    fn flip_crossed(
        &mut self,
        a: VertexHandle,
        b: VertexHandle,
        crossed: Vec<(VertexHandle, VertexHandle)>,
    ) {
        let limit = 8 * (crossed.len() + 1) * (self.faces.len() + 1);
        let mut queue: VecDeque<(VertexHandle, VertexHandle)> = crossed.into();
        let mut created = Vec::new();
        let mut steps = 0usize;

        while let Some((u, w)) = queue.pop_front() {
            steps += 1;
            if steps > limit {
                trace!("cdt: constraint ({}, {}) still crossed after {} flips", a, b, limit);
                break;
            }
            let Some((f, i)) = self.find_edge(u, w) else {
                continue;
            };
            if !self.is_convex_quad(f, i) {
                queue.push_back((u, w));
                continue;
            }
            let x = self.faces[f].v[i];
            let y = self.faces[self.faces[f].n[i]].v[self.mirror(f, i)];
            self.flip(f, i);

            let touches_end = [a, b].contains(&x) || [a, b].contains(&y);
            if !touches_end && self.orient(a, b, x) * self.orient(a, b, y) < 0 {
                queue.push_back((x, y));
            } else {
                created.push((x, y));
            }
        }

        if !self.mark_constrained(a, b) {
            self.unrealized = true;
            return;
        }
        self.restore_delaunay(a, b, created);
    }

    /// Lawson flips starting from `edges`, leaving constrained edges alone.
    /// Hitting the step limit has the same consequence as in [`Self::legalize`].
    fn restore_delaunay(
        &mut self,
        a: VertexHandle,
        b: VertexHandle,
        edges: Vec<(VertexHandle, VertexHandle)>,
    ) {
        let limit = 16 * (edges.len() + 1) * (self.faces.len() + 1);
        let mut stack = edges;
        let mut steps = 0usize;

        while let Some((u, w)) = stack.pop() {
            steps += 1;
            if steps > limit {
                trace!("cdt: delaunay restoration after ({}, {}) stopped", a, b);
                break;
            }
            let Some((f, i)) = self.find_edge(u, w) else {
                continue;
            };
            if self.faces[f].constrained[i] {
                continue;
            }
            if self.violates_delaunay(f, i) && self.is_convex_quad(f, i) {
                let x = self.faces[f].v[i];
                let y = self.faces[self.faces[f].n[i]].v[self.mirror(f, i)];
                self.flip(f, i);
                // outer edges of the quad (x, u, y, w)
                stack.extend([(x, u), (u, y), (y, w), (w, x)]);
            }
        }
    }
}

impl<T: Scalar> Triangulation2<T> for ConstrainedDelaunay<T>
where
    for<'a> &'a T: RefArith<T>,
{
    fn new(traits: ProjectionTraits<T>) -> Self {
        Self {
            traits,
            vertices: vec![TdsVertex {
                point: Point3::default(),
                projected: Point2::default(),
                face: NONE,
            }],
            faces: Vec::new(),
            pending: Vec::new(),
            unrealized: false,
        }
    }

    fn insert(&mut self, point: Point3<T>) -> VertexHandle {
        let projected = self.traits.project(&point);
        if let Some(v) = self.find_vertex(&projected) {
            return v;
        }
        if self.faces.is_empty() {
            let vh = self.push_vertex(point, projected);
            self.try_bootstrap(vh);
            return vh;
        }

        let loc = self.locate(&projected);
        if let Locate::Vertex(v) = loc {
            return v;
        }
        let vh = self.push_vertex(point, projected);
        self.place(vh, loc);
        vh
    }

    fn insert_constraint(&mut self, a: VertexHandle, b: VertexHandle) {
        if a == b {
            return;
        }
        if self.faces.is_empty() {
            self.pending.push((a, b));
            return;
        }
        self.insert_segment(a, b, 0);
    }

    fn dimension(&self) -> i32 {
        if !self.faces.is_empty() {
            return 2;
        }
        match self.number_of_vertices() {
            0 => -1,
            1 => 0,
            _ => 1,
        }
    }

    fn number_of_vertices(&self) -> usize {
        self.vertices.len() - 1
    }

    fn infinite_vertex(&self) -> VertexHandle {
        INFINITE
    }

    fn incident_face(&self, v: VertexHandle) -> Option<FaceHandle> {
        let f = self.vertices[v].face;
        (f != NONE).then_some(f)
    }

    fn face_slots(&self) -> usize {
        self.faces.len()
    }

    fn all_faces(&self) -> Vec<FaceHandle> {
        (0..self.faces.len()).collect()
    }

    fn finite_faces(&self) -> Vec<FaceHandle> {
        (0..self.faces.len())
            .filter(|&f| !self.is_infinite_face(f))
            .collect()
    }

    fn finite_edges(&self) -> Vec<Edge2> {
        let mut edges = Vec::new();
        for (f, face) in self.faces.iter().enumerate() {
            for i in 0..3 {
                if f < face.n[i] && face.v[ccw(i)] != INFINITE && face.v[cw(i)] != INFINITE {
                    edges.push(Edge2 { face: f, index: i });
                }
            }
        }
        edges
    }

    fn is_infinite(&self, f: FaceHandle) -> bool {
        self.is_infinite_face(f)
    }

    fn vertex(&self, f: FaceHandle, i: usize) -> VertexHandle {
        self.faces[f].v[i]
    }

    fn neighbor(&self, f: FaceHandle, i: usize) -> FaceHandle {
        self.faces[f].n[i]
    }

    fn mirror_index(&self, f: FaceHandle, i: usize) -> usize {
        self.mirror(f, i)
    }

    fn is_constrained(&self, e: Edge2) -> bool {
        self.faces[e.face].constrained[e.index]
    }

    fn is_constrained_edge(&self, a: VertexHandle, b: VertexHandle) -> bool {
        self.find_edge(a, b)
            .is_some_and(|(f, i)| self.faces[f].constrained[i])
    }

    fn constraints_realized(&self) -> bool {
        !self.unrealized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geometry::{spatial_element::SpatialElement, vector::Vector3},
        numeric::{float::F64, rational::Rational},
    };

    fn xy_plane<T: Scalar>() -> ConstrainedDelaunay<T>
    where
        for<'a> &'a T: RefArith<T>,
    {
        ConstrainedDelaunay::new(ProjectionTraits::new(Vector3::from_vals([0, 0, 1])))
    }

    fn insert_xy(cdt: &mut ConstrainedDelaunay<F64>, pts: &[[f64; 2]]) -> Vec<VertexHandle> {
        pts.iter()
            .map(|p| cdt.insert(Point3::from_vals([p[0], p[1], 0.0])))
            .collect()
    }

    fn close_polygon<T: Scalar>(cdt: &mut ConstrainedDelaunay<T>, vs: &[VertexHandle])
    where
        for<'a> &'a T: RefArith<T>,
    {
        for k in 0..vs.len() {
            cdt.insert_constraint(vs[k], vs[(k + 1) % vs.len()]);
        }
    }

    fn assert_valid<T: Scalar>(cdt: &ConstrainedDelaunay<T>)
    where
        for<'a> &'a T: RefArith<T>,
    {
        for f in 0..cdt.faces.len() {
            for i in 0..3 {
                let g = cdt.neighbor(f, i);
                let j = cdt.mirror_index(f, i);
                assert_eq!(cdt.neighbor(g, j), f, "neighbor symmetry at ({}, {})", f, i);
                assert_eq!(
                    cdt.is_constrained(Edge2 { face: f, index: i }),
                    cdt.is_constrained(Edge2 { face: g, index: j }),
                    "constraint flag mismatch at ({}, {})",
                    f,
                    i
                );
            }
            if !cdt.is_infinite(f) {
                let [a, b, c] = cdt.faces[f].v;
                assert!(cdt.orient(a, b, c) > 0, "face {} is not counter-clockwise", f);
            }
        }
    }

    fn assert_constrained_delaunay<T: Scalar>(cdt: &ConstrainedDelaunay<T>)
    where
        for<'a> &'a T: RefArith<T>,
    {
        for e in cdt.finite_edges() {
            if !cdt.is_constrained(e) {
                assert!(
                    !cdt.violates_delaunay(e.face, e.index),
                    "edge {:?} is not locally Delaunay",
                    e
                );
            }
        }
    }

    #[test]
    fn collinear_points_stay_one_dimensional() {
        let mut cdt = xy_plane::<F64>();
        insert_xy(&mut cdt, &[[0.0, 0.0], [1.0, 0.0], [3.0, 0.0]]);
        assert_eq!(cdt.dimension(), 1);
        assert_eq!(cdt.number_of_vertices(), 3);
        assert!(cdt.finite_faces().is_empty());
    }

    #[test]
    fn duplicates_are_merged() {
        let mut cdt = xy_plane::<F64>();
        let vs = insert_xy(&mut cdt, &[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(vs[1], vs[3]);
        assert_eq!(cdt.number_of_vertices(), 3);
    }

    #[test]
    fn square_with_boundary_constraints() {
        let mut cdt = xy_plane::<F64>();
        let vs = insert_xy(&mut cdt, &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        close_polygon(&mut cdt, &vs);

        assert_eq!(cdt.dimension(), 2);
        assert_eq!(cdt.number_of_vertices(), 4);
        assert_eq!(cdt.finite_faces().len(), 2);
        assert_eq!(cdt.finite_edges().len(), 5);
        assert!(cdt.constraints_realized());
        for k in 0..4 {
            assert!(cdt.is_constrained_edge(vs[k], vs[(k + 1) % 4]));
        }
        assert_valid(&cdt);
    }

    #[test]
    fn buffered_collinear_points_are_replayed() {
        let mut cdt = xy_plane::<F64>();
        let vs = insert_xy(&mut cdt, &[[0.0, 0.0], [2.0, 0.0], [1.0, 0.0], [3.0, 0.0], [1.0, 2.0]]);
        cdt.insert_constraint(vs[0], vs[2]);
        assert_eq!(cdt.dimension(), 2);
        assert_eq!(cdt.number_of_vertices(), 5);
        assert_eq!(cdt.finite_faces().len(), 3);
        assert!(cdt.is_constrained_edge(vs[0], vs[2]));
        assert_valid(&cdt);
    }

    #[test]
    fn points_outside_the_hull() {
        let mut cdt = xy_plane::<F64>();
        insert_xy(
            &mut cdt,
            &[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [5.0, 5.0], [-3.0, 1.0], [2.0, -4.0], [0.2, 0.2]],
        );
        assert_eq!(cdt.number_of_vertices(), 7);
        assert_valid(&cdt);
        assert_constrained_delaunay(&cdt);
    }

    #[test]
    fn constraint_forced_through_delaunay_edges() {
        // A long horizontal constraint cuts through a fan of vertical-ish edges.
        let mut cdt = xy_plane::<F64>();
        let vs = insert_xy(
            &mut cdt,
            &[
                [0.0, 0.0],
                [10.0, 0.0],
                [2.0, 1.0],
                [4.0, -1.0],
                [6.0, 1.0],
                [8.0, -1.0],
                [5.0, 3.0],
                [5.0, -3.0],
            ],
        );
        cdt.insert_constraint(vs[0], vs[1]);

        assert!(cdt.constraints_realized());
        assert!(cdt.is_constrained_edge(vs[0], vs[1]));
        assert_eq!(cdt.number_of_vertices(), 8);
        assert_valid(&cdt);
        assert_constrained_delaunay(&cdt);
    }

    #[test]
    fn constraint_through_a_vertex_is_split() {
        let mut cdt = xy_plane::<F64>();
        let vs = insert_xy(&mut cdt, &[[0.0, 0.0], [2.0, 0.0], [1.0, 0.0], [1.0, 1.0], [1.0, -1.0]]);
        cdt.insert_constraint(vs[0], vs[1]);
        assert!(cdt.is_constrained_edge(vs[0], vs[2]));
        assert!(cdt.is_constrained_edge(vs[2], vs[1]));
        assert!(cdt.find_edge(vs[0], vs[1]).is_none());
    }

    #[test]
    fn vertex_on_a_constraint_splits_it() {
        let mut cdt = xy_plane::<F64>();
        let vs = insert_xy(&mut cdt, &[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0]]);
        cdt.insert_constraint(vs[0], vs[1]);
        let m = cdt.insert(Point3::from_vals([2.0, 0.0, 0.0]));

        assert!(cdt.constraints_realized());
        assert!(cdt.is_constrained_edge(vs[0], m));
        assert!(cdt.is_constrained_edge(m, vs[1]));
        assert!(!cdt.is_constrained_edge(vs[0], vs[1]));
        assert_valid(&cdt);
    }

    #[test]
    fn non_convex_polygon_keeps_its_boundary() {
        // L-shape
        let mut cdt = xy_plane::<F64>();
        let vs = insert_xy(
            &mut cdt,
            &[[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [1.0, 1.0], [1.0, 2.0], [0.0, 2.0]],
        );
        close_polygon(&mut cdt, &vs);

        assert!(cdt.constraints_realized());
        for k in 0..vs.len() {
            assert!(cdt.is_constrained_edge(vs[k], vs[(k + 1) % vs.len()]));
        }
        // convex hull of the L has 5 vertices, 6 points in total
        assert_eq!(cdt.finite_faces().len(), 2 * 6 - 5 - 2);
        assert_valid(&cdt);
    }

    #[test]
    fn crossing_constraints_meet_at_an_exact_vertex() {
        let mut cdt = xy_plane::<Rational>();
        let pts = [[0, 0], [3, 0], [3, 1], [0, 2]];
        let vs: Vec<VertexHandle> = pts
            .iter()
            .map(|p| cdt.insert(Point3::from_vals([p[0], p[1], 0])))
            .collect();
        // bow-tie: 0-2 and 1-3 cross
        cdt.insert_constraint(vs[0], vs[2]);
        cdt.insert_constraint(vs[1], vs[3]);

        assert_eq!(cdt.number_of_vertices(), 5);
        let x = 5;
        // y = x / 3 meets y = 2 - 2x / 3 at x = 2
        assert_eq!(
            &cdt.vertices[x].point,
            &Point3::from_vals([Rational::from(2), Rational::from_num_den(2, 3), Rational::from(0)])
        );
        for (u, w) in [(vs[0], x), (x, vs[2]), (vs[1], x), (x, vs[3])] {
            assert!(cdt.is_constrained_edge(u, w));
        }
        assert_valid(&cdt);
    }
}
