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
    error::TriangulationError,
    geometry::{point::Point3, vector::Vector3},
    kernel::kernel::Kernel3,
    mesh::{basic_types::Mesh, property_map::VertexPointMap},
    numeric::scalar::{RefArith, Scalar},
    operations::triangulation::ProjectionTraits,
};

use super::params::TriangulateParams;

/// Boundary points of `f`, starting at the source of `halfedge(f)`.
pub fn face_ring<T, V>(mesh: &Mesh<T, 3>, f: usize, vpm: &V) -> Vec<Point3<T>>
where
    T: Scalar,
    for<'a> &'a T: RefArith<T>,
    V: VertexPointMap<T>,
{
    let hs = mesh.face_half_edges(f);
    let last = hs[hs.len() - 1];
    std::iter::once(last)
        .chain(hs[..hs.len() - 1].iter().copied())
        .map(|h| vpm.point(mesh, mesh.target(h)))
        .collect()
}

/// Unnormalized normal of `f` as seen through the parameters' point map and kernel.
pub fn compute_face_normal<T, V, K>(
    mesh: &Mesh<T, 3>,
    f: usize,
    params: &TriangulateParams<V, K>,
) -> Vector3<T>
where
    T: Scalar,
    for<'a> &'a T: RefArith<T>,
    V: VertexPointMap<T>,
    K: Kernel3<T>,
{
    let ring = face_ring(mesh, f, &params.vertex_point_map);
    params.geom_traits.polygon_normal(&ring)
}

/// Projection onto the plane of `f`, or `DegenerateNormal` when the
/// boundary of `f` spans no area.
pub fn project_face<T, V, K>(
    mesh: &Mesh<T, 3>,
    f: usize,
    params: &TriangulateParams<V, K>,
) -> Result<ProjectionTraits<T>, TriangulationError>
where
    T: Scalar,
    for<'a> &'a T: RefArith<T>,
    V: VertexPointMap<T>,
    K: Kernel3<T>,
{
    let normal = compute_face_normal(mesh, f, params);
    if params.geom_traits.is_null(&normal) {
        return Err(TriangulationError::DegenerateNormal(f));
    }
    Ok(ProjectionTraits::new(normal))
}
