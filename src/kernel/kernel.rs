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
    geometry::{
        point::Point3,
        vector::{Cross3, Vector3, VectorOps},
    },
    numeric::scalar::{RefArith, Scalar},
    operations::Zero,
};

/// Geometric constructions the triangulation engine needs from a kernel.
pub trait Kernel3<T: Scalar> {
    fn construct_vector(&self, from: &Point3<T>, to: &Point3<T>) -> Vector3<T>;
    fn cross_product(&self, u: &Vector3<T>, v: &Vector3<T>) -> Vector3<T>;
    fn scalar_product(&self, u: &Vector3<T>, v: &Vector3<T>) -> T;

    fn is_null(&self, v: &Vector3<T>) -> bool {
        v.is_zero()
    }

    /// `(q - p) x (r - p)`, twice the area of `pqr` along its normal.
    fn triangle_normal(&self, p: &Point3<T>, q: &Point3<T>, r: &Point3<T>) -> Vector3<T> {
        self.cross_product(&self.construct_vector(p, q), &self.construct_vector(p, r))
    }

    /// Sum of the fan normals of a polygon ring, fanned from `ring[0]`.
    ///
    /// Not normalized: for a planar ring its length is twice the enclosed area.
    fn polygon_normal(&self, ring: &[Point3<T>]) -> Vector3<T> {
        let mut sum = Vector3::zero();
        if ring.len() < 3 {
            return sum;
        }
        for w in ring[1..].windows(2) {
            sum += &self.triangle_normal(&ring[0], &w[0], &w[1]);
        }
        sum
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultKernel;

impl<T: Scalar> Kernel3<T> for DefaultKernel
where
    for<'a> &'a T: RefArith<T>,
{
    fn construct_vector(&self, from: &Point3<T>, to: &Point3<T>) -> Vector3<T> {
        to - from
    }

    fn cross_product(&self, u: &Vector3<T>, v: &Vector3<T>) -> Vector3<T> {
        u.cross(v)
    }

    fn scalar_product(&self, u: &Vector3<T>, v: &Vector3<T>) -> T {
        u.dot(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{geometry::spatial_element::SpatialElement, numeric::float::F64};

    #[test]
    fn square_normal_is_twice_its_area() {
        let ring: Vec<Point3<F64>> = [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 2.0, 0.0], [0.0, 2.0, 0.0]]
            .into_iter()
            .map(Point3::from_vals)
            .collect();
        let n = DefaultKernel.polygon_normal(&ring);
        assert_eq!(n, Vector3::from_vals([0.0, 0.0, 8.0]));
    }

    #[test]
    fn collinear_ring_is_null() {
        let ring: Vec<Point3<F64>> = [[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [2.0, 2.0, 0.0], [3.0, 3.0, 0.0]]
            .into_iter()
            .map(Point3::from_vals)
            .collect();
        let k = DefaultKernel;
        assert!(Kernel3::<F64>::is_null(&k, &k.polygon_normal(&ring)));
    }
}
