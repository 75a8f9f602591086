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

//! 2D triangulations of points living on a plane in 3D.
//!
//! Face handles and vertex handles are plain indices. Vertex `i` of a face is
//! opposite to its edge `i`, and neighbor `i` is the face across that edge.
//! Vertices of every face are stored counter-clockwise with respect to the
//! projection normal.

use crate::{geometry::point::Point3, numeric::scalar::Scalar};

pub mod cdt;
pub mod projection;

pub use cdt::ConstrainedDelaunay;
pub use projection::ProjectionTraits;

pub type VertexHandle = usize;
pub type FaceHandle = usize;

/// Edge `index` of `face`, i.e. the edge opposite to `vertex(face, index)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge2 {
    pub face: FaceHandle,
    pub index: usize,
}

#[inline]
pub fn ccw(i: usize) -> usize {
    (i + 1) % 3
}

#[inline]
pub fn cw(i: usize) -> usize {
    (i + 2) % 3
}

/// Capabilities the face triangulation engine needs from a 2D constrained
/// triangulation. The unbounded region is covered by infinite faces incident
/// to `infinite_vertex()`.
pub trait Triangulation2<T: Scalar>: Sized {
    fn new(traits: ProjectionTraits<T>) -> Self;

    /// Inserts a point, or returns the vertex already at that position.
    fn insert(&mut self, p: Point3<T>) -> VertexHandle;

    fn insert_constraint(&mut self, a: VertexHandle, b: VertexHandle);

    /// -1 when empty, 0 for a single vertex, 1 when all vertices are collinear.
    fn dimension(&self) -> i32;

    /// Finite vertices only.
    fn number_of_vertices(&self) -> usize;

    fn infinite_vertex(&self) -> VertexHandle;

    /// A face incident to `v`, if `v` is part of a 2D triangulation.
    fn incident_face(&self, v: VertexHandle) -> Option<FaceHandle>;

    /// Upper bound on face handles, for side tables indexed by face.
    fn face_slots(&self) -> usize;

    fn all_faces(&self) -> Vec<FaceHandle>;
    fn finite_faces(&self) -> Vec<FaceHandle>;

    /// Each edge between two finite vertices, reported once.
    fn finite_edges(&self) -> Vec<Edge2>;

    fn is_infinite(&self, f: FaceHandle) -> bool;
    fn vertex(&self, f: FaceHandle, i: usize) -> VertexHandle;
    fn neighbor(&self, f: FaceHandle, i: usize) -> FaceHandle;

    /// Index of `f` in the neighbor list of `neighbor(f, i)`.
    fn mirror_index(&self, f: FaceHandle, i: usize) -> usize;

    fn is_constrained(&self, e: Edge2) -> bool;

    /// Whether `a` and `b` are joined by a single constrained edge.
    fn is_constrained_edge(&self, a: VertexHandle, b: VertexHandle) -> bool;

    /// False when some constraint could not be made an edge.
    fn constraints_realized(&self) -> bool {
        true
    }
}
