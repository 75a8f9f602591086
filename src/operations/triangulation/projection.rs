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
        point::{Point2, Point3, PointOps},
        spatial_element::SpatialElement,
        vector::{Cross3, Vector3, VectorOps},
    },
    kernel::predicates::{Orientation, are_equal, incircle, orientation},
    numeric::scalar::{RefArith, Scalar},
    operations::Zero,
};

/// Lets a 2D triangulation work on 3D points by projecting them onto the
/// plane orthogonal to `normal`.
///
/// The plane basis is `b1 = n x e_k`, `b2 = n x b1`, with `e_k` the axis where
/// `|n_k|` is smallest. Neither vector is normalized, so the projection stays
/// exact for exact scalars. Counter-clockwise in the projection means
/// counter-clockwise seen from the tip of `normal`.
#[derive(Clone, Debug)]
pub struct ProjectionTraits<T: Scalar> {
    normal: Vector3<T>,
    b1: Vector3<T>,
    b2: Vector3<T>,
}

impl<T: Scalar> ProjectionTraits<T>
where
    for<'a> &'a T: RefArith<T>,
{
    pub fn new(normal: Vector3<T>) -> Self {
        let mut k = 0;
        for i in 1..3 {
            if normal[i].abs() < normal[k].abs() {
                k = i;
            }
        }
        let mut axis = Vector3::zero();
        axis[k] = T::one();

        let b1 = normal.cross(&axis);
        let b2 = normal.cross(&b1);
        Self { normal, b1, b2 }
    }

    pub fn normal(&self) -> &Vector3<T> {
        &self.normal
    }

    pub fn project(&self, p: &Point3<T>) -> Point2<T> {
        let v = p.as_vector();
        Point2::new([v.dot(&self.b1), v.dot(&self.b2)])
    }

    pub fn orientation(&self, p: &Point3<T>, q: &Point3<T>, r: &Point3<T>) -> Orientation {
        orientation(&self.project(p), &self.project(q), &self.project(r))
    }

    /// Positive when `s` is inside the circle through the counter-clockwise
    /// triangle `pqr`, measured in the projection plane.
    pub fn side_of_oriented_circle(
        &self,
        p: &Point3<T>,
        q: &Point3<T>,
        r: &Point3<T>,
        s: &Point3<T>,
    ) -> T {
        incircle(
            &self.project(p),
            &self.project(q),
            &self.project(r),
            &self.project(s),
        )
    }

    /// Points that project onto the same 2D position.
    pub fn equal(&self, p: &Point3<T>, q: &Point3<T>) -> bool {
        are_equal(&self.project(p), &self.project(q), &T::tolerance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::{float::F64, rational::Rational};

    fn p3(x: f64, y: f64, z: f64) -> Point3<F64> {
        Point3::from_vals([x, y, z])
    }

    #[test]
    fn ccw_follows_the_normal() {
        let up = ProjectionTraits::new(Vector3::<F64>::from_vals([0.0, 0.0, 2.0]));
        let (a, b, c) = (p3(0.0, 0.0, 0.0), p3(1.0, 0.0, 0.0), p3(0.0, 1.0, 0.0));
        assert_eq!(up.orientation(&a, &b, &c), Orientation::CounterClockwise);

        let down = ProjectionTraits::new(Vector3::<F64>::from_vals([0.0, 0.0, -1.0]));
        assert_eq!(down.orientation(&a, &b, &c), Orientation::Clockwise);
    }

    #[test]
    fn tilted_plane() {
        // plane x + y + z = 1
        let traits = ProjectionTraits::new(Vector3::<F64>::from_vals([1.0, 1.0, 1.0]));
        let (a, b, c) = (p3(1.0, 0.0, 0.0), p3(0.0, 1.0, 0.0), p3(0.0, 0.0, 1.0));
        assert_eq!(traits.orientation(&a, &b, &c), Orientation::CounterClockwise);
        assert_eq!(traits.orientation(&a, &c, &b), Orientation::Clockwise);
    }

    #[test]
    fn points_along_the_normal_collapse() {
        let traits = ProjectionTraits::new(Vector3::<Rational>::from_vals([0, 0, 1]));
        let p = Point3::<Rational>::from_vals([1, 2, 3]);
        let q = Point3::<Rational>::from_vals([1, 2, -5]);
        assert!(traits.equal(&p, &q));
    }
}
