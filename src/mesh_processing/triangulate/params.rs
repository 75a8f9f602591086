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

use crate::{kernel::kernel::DefaultKernel, mesh::property_map::MeshVertexPoints};

/// Options of the triangulation functions.
///
/// `vertex_point_map` supplies the vertex positions, `geom_traits` the
/// constructions used for face normals and the quad diagonal choice.
#[derive(Clone, Copy, Debug, Default)]
pub struct TriangulateParams<V = MeshVertexPoints, K = DefaultKernel> {
    pub vertex_point_map: V,
    pub geom_traits: K,
}

impl TriangulateParams {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V, K> TriangulateParams<V, K> {
    pub fn with_vertex_point_map<W>(self, vertex_point_map: W) -> TriangulateParams<W, K> {
        TriangulateParams {
            vertex_point_map,
            geom_traits: self.geom_traits,
        }
    }

    pub fn with_geom_traits<L>(self, geom_traits: L) -> TriangulateParams<V, L> {
        TriangulateParams {
            vertex_point_map: self.vertex_point_map,
            geom_traits,
        }
    }
}
