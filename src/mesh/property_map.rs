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

use crate::{geometry::point::Point3, mesh::basic_types::Mesh, numeric::scalar::Scalar};

/// Read-only association from mesh vertices to 3D points.
pub trait VertexPointMap<T: Scalar> {
    fn point(&self, mesh: &Mesh<T, 3>, v: usize) -> Point3<T>;
}

/// Reads the positions stored in the mesh itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeshVertexPoints;

impl<T: Scalar> VertexPointMap<T> for MeshVertexPoints {
    fn point(&self, mesh: &Mesh<T, 3>, v: usize) -> Point3<T> {
        mesh.vertices[v].position.clone()
    }
}

/// External point array indexed by vertex.
#[derive(Clone, Copy, Debug)]
pub struct SlicePoints<'a, T: Scalar>(pub &'a [Point3<T>]);

impl<'a, T: Scalar> VertexPointMap<T> for SlicePoints<'a, T> {
    fn point(&self, _mesh: &Mesh<T, 3>, v: usize) -> Point3<T> {
        self.0[v].clone()
    }
}
