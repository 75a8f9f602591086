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

//! Triangulation of polygonal faces.
//!
//! Quadrilaterals are split along one diagonal. Any other face is projected
//! onto its plane and triangulated with a 2D constrained triangulation whose
//! constraints are the face boundary; the triangles inside the boundary then
//! replace the face. A face that cannot be triangulated is left untouched.

pub mod classify;
pub mod params;
pub mod projector;
pub mod rebuild;

use std::marker::PhantomData;

use ahash::AHashMap;
use log::{debug, warn};

use crate::{
    error::TriangulationError,
    kernel::kernel::{DefaultKernel, Kernel3},
    mesh::{
        basic_types::Mesh,
        property_map::{MeshVertexPoints, VertexPointMap},
    },
    numeric::scalar::{RefArith, Scalar},
    operations::triangulation::{ConstrainedDelaunay, Triangulation2, VertexHandle},
};

pub use classify::{FaceInfo, mark_exterior_faces};
pub use params::TriangulateParams;
pub use projector::project_face;
pub use rebuild::{Rebuilt, open_face, rebuild_connectivity};

/// What happened to a face that was triangulated successfully.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FaceTriangulation {
    /// The face already was a triangle.
    Triangle,
    /// A quadrilateral split by the edge of half-edge `diagonal`.
    QuadSplit { diagonal: usize },
    /// A polygon replaced by `triangles`, with one half-edge per new interior edge.
    Constrained {
        triangles: Vec<usize>,
        diagonals: Vec<usize>,
    },
}

/// Outcome of a batch run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TriangulationReport {
    pub triangulated: usize,
    /// Faces that already were triangles.
    pub skipped: usize,
    pub failures: Vec<(usize, TriangulationError)>,
}

impl TriangulationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Face triangulation driver. `Tr` is the 2D constrained triangulation used
/// for faces that are neither triangles nor quadrilaterals.
pub struct TriangulateModifier<T: Scalar, V = MeshVertexPoints, K = DefaultKernel, Tr = ConstrainedDelaunay<T>> {
    params: TriangulateParams<V, K>,
    _marker: PhantomData<fn() -> (T, Tr)>,
}

impl<T, V, K, Tr> TriangulateModifier<T, V, K, Tr>
where
    T: Scalar,
    for<'a> &'a T: RefArith<T>,
    V: VertexPointMap<T>,
    K: Kernel3<T>,
    Tr: Triangulation2<T>,
{
    pub fn new(params: TriangulateParams<V, K>) -> Self {
        Self {
            params,
            _marker: PhantomData,
        }
    }

    pub fn params(&self) -> &TriangulateParams<V, K> {
        &self.params
    }

    /// Triangulates face `f` in place. On error the mesh is unchanged.
    pub fn triangulate_face(
        &self,
        f: usize,
        mesh: &mut Mesh<T, 3>,
    ) -> Result<FaceTriangulation, TriangulationError> {
        if !mesh.is_live_face(f) {
            return Err(TriangulationError::NotAFace(f));
        }
        if mesh.is_triangle(f) {
            return Ok(FaceTriangulation::Triangle);
        }

        let traits = project_face(mesh, f, &self.params)?;

        let hs = mesh.face_half_edges(f);
        if hs.len() == 4 {
            let diagonal = self.split_quad(mesh, [hs[0], hs[1], hs[2], hs[3]]);
            return Ok(FaceTriangulation::QuadSplit { diagonal });
        }

        let vpm = &self.params.vertex_point_map;
        let mut cdt = Tr::new(traits);
        let mut vertex_info: AHashMap<VertexHandle, usize> = AHashMap::with_capacity(hs.len());
        let mut ring: Vec<VertexHandle> = Vec::with_capacity(hs.len());
        for &h in &hs {
            let vh = cdt.insert(vpm.point(mesh, mesh.target(h)));
            vertex_info.insert(vh, h);
            if let Some(&p) = ring.last() {
                if p != vh {
                    cdt.insert_constraint(p, vh);
                }
            }
            ring.push(vh);
        }
        if let (Some(&p), Some(&q)) = (ring.last(), ring.first()) {
            cdt.insert_constraint(p, q);
        }

        // A boundary vertex lying on another boundary edge splits that
        // constraint without adding a vertex, so every boundary edge must
        // come out as a single constrained edge.
        if cdt.dimension() != 2
            || cdt.number_of_vertices() != hs.len()
            || !cdt.constraints_realized()
            || !ring
                .iter()
                .zip(ring.iter().cycle().skip(1))
                .all(|(&a, &b)| cdt.is_constrained_edge(a, b))
        {
            debug!(
                "face {}: projected triangulation has dimension {} and {} vertices for {} boundary vertices",
                f,
                cdt.dimension(),
                cdt.number_of_vertices(),
                hs.len()
            );
            return Err(TriangulationError::InconsistentTriangulation(f));
        }

        let mut info = FaceInfo::table(cdt.face_slots());
        mark_exterior_faces::<T, Tr>(&cdt, &mut info);

        open_face(mesh, f);
        let rebuilt = rebuild_connectivity(mesh, &cdt, &mut info, &vertex_info);
        debug!(
            "face {}: {} boundary vertices, {} triangles",
            f,
            hs.len(),
            rebuilt.faces.len()
        );
        Ok(FaceTriangulation::Constrained {
            triangles: rebuilt.faces,
            diagonals: rebuilt.diagonals,
        })
    }

    /// Splits a quadrilateral along `(v0, v2)` when the two triangles on either
    /// side of that diagonal face the same way, along `(v1, v3)` otherwise.
    fn split_quad(&self, mesh: &mut Mesh<T, 3>, v: [usize; 4]) -> usize {
        let vpm = &self.params.vertex_point_map;
        let k = &self.params.geom_traits;
        let m: &Mesh<T, 3> = mesh;
        let [p0, p1, p2, p3] = v.map(|h| vpm.point(m, m.target(h)));

        let n1 = k.cross_product(&k.construct_vector(&p1, &p2), &k.construct_vector(&p1, &p0));
        let n3 = k.cross_product(&k.construct_vector(&p3, &p0), &k.construct_vector(&p3, &p2));
        if k.scalar_product(&n1, &n3).is_positive() {
            debug!("quad split along ({}, {})", mesh.target(v[0]), mesh.target(v[2]));
            mesh.split_face(v[0], v[2])
        } else {
            debug!("quad split along ({}, {})", mesh.target(v[1]), mesh.target(v[3]));
            mesh.split_face(v[1], v[3])
        }
    }

    /// Triangulates every non-triangular face among `faces`.
    ///
    /// The face list is fixed before the mesh changes, so faces created on
    /// the way are not visited.
    pub fn triangulate_faces_report<I>(&self, faces: I, mesh: &mut Mesh<T, 3>) -> TriangulationReport
    where
        I: IntoIterator<Item = usize>,
    {
        let mut report = TriangulationReport::default();
        let mut todo = Vec::new();
        for f in faces {
            if mesh.is_live_face(f) && mesh.is_triangle(f) {
                report.skipped += 1;
            } else {
                todo.push(f);
            }
        }

        for f in todo {
            match self.triangulate_face(f, mesh) {
                Ok(_) => report.triangulated += 1,
                Err(e) => {
                    warn!("{}", e);
                    report.failures.push((f, e));
                }
            }
        }
        report
    }

    /// Same as [`Self::triangulate_faces_report`], reduced to success of every face.
    pub fn triangulate_faces<I>(&self, faces: I, mesh: &mut Mesh<T, 3>) -> bool
    where
        I: IntoIterator<Item = usize>,
    {
        self.triangulate_faces_report(faces, mesh).is_success()
    }
}

impl<T: Scalar, V, K, Tr> Default for TriangulateModifier<T, V, K, Tr>
where
    V: Default,
    K: Default,
{
    fn default() -> Self {
        Self {
            params: TriangulateParams {
                vertex_point_map: V::default(),
                geom_traits: K::default(),
            },
            _marker: PhantomData,
        }
    }
}

/// Triangulates face `f` with mesh positions and the default kernel.
/// Returns `false` and leaves the mesh unchanged on failure.
pub fn triangulate_face<T: Scalar>(f: usize, mesh: &mut Mesh<T, 3>) -> bool
where
    for<'a> &'a T: RefArith<T>,
{
    triangulate_face_with(f, mesh, TriangulateParams::new())
}

pub fn triangulate_face_with<T, V, K>(
    f: usize,
    mesh: &mut Mesh<T, 3>,
    params: TriangulateParams<V, K>,
) -> bool
where
    T: Scalar,
    for<'a> &'a T: RefArith<T>,
    V: VertexPointMap<T>,
    K: Kernel3<T>,
{
    let modifier: TriangulateModifier<T, V, K> = TriangulateModifier::new(params);
    match modifier.triangulate_face(f, mesh) {
        Ok(_) => true,
        Err(e) => {
            warn!("{}", e);
            false
        }
    }
}

/// Triangulates the given faces. Returns `true` only if all of them succeeded;
/// a failing face does not stop the others.
pub fn triangulate_faces<T: Scalar, I>(faces: I, mesh: &mut Mesh<T, 3>) -> bool
where
    for<'a> &'a T: RefArith<T>,
    I: IntoIterator<Item = usize>,
{
    triangulate_faces_with(faces, mesh, TriangulateParams::new())
}

pub fn triangulate_faces_with<T, V, K, I>(
    faces: I,
    mesh: &mut Mesh<T, 3>,
    params: TriangulateParams<V, K>,
) -> bool
where
    T: Scalar,
    for<'a> &'a T: RefArith<T>,
    V: VertexPointMap<T>,
    K: Kernel3<T>,
    I: IntoIterator<Item = usize>,
{
    let modifier: TriangulateModifier<T, V, K> = TriangulateModifier::new(params);
    modifier.triangulate_faces(faces, mesh)
}

/// Triangulates every face of the mesh.
pub fn triangulate_mesh<T: Scalar>(mesh: &mut Mesh<T, 3>) -> bool
where
    for<'a> &'a T: RefArith<T>,
{
    triangulate_mesh_with(mesh, TriangulateParams::new())
}

pub fn triangulate_mesh_with<T, V, K>(mesh: &mut Mesh<T, 3>, params: TriangulateParams<V, K>) -> bool
where
    T: Scalar,
    for<'a> &'a T: RefArith<T>,
    V: VertexPointMap<T>,
    K: Kernel3<T>,
{
    let faces = mesh.live_faces();
    triangulate_faces_with(faces, mesh, params)
}
