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
    geometry::point::{Point, Point2},
    numeric::scalar::{RefArith, Scalar},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

impl Orientation {
    pub fn from_value<T: Scalar>(v: &T) -> Self {
        if v.is_positive() {
            Orientation::CounterClockwise
        } else if v.is_negative() {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }
}

pub fn are_equal<T: Scalar, const N: usize>(p1: &Point<T, N>, p2: &Point<T, N>, eps: &T) -> bool
where
    for<'a> &'a T: RefArith<T>,
{
    for i in 0..N {
        let d = &p1.coords[i] - &p2.coords[i];
        if d.abs() > *eps {
            return false;
        }
    }
    true
}

/// Returns:
/// - >0 if counter-clockwise
/// - <0 if clockwise
/// - =0 if collinear
pub fn orient2d<T: Scalar>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> T
where
    for<'a> &'a T: RefArith<T>,
{
    let abx = &b[0] - &a[0];
    let aby = &b[1] - &a[1];
    let acx = &c[0] - &a[0];
    let acy = &c[1] - &a[1];
    &(&abx * &acy) - &(&aby * &acx)
}

pub fn orientation<T: Scalar>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> Orientation
where
    for<'a> &'a T: RefArith<T>,
{
    Orientation::from_value(&orient2d(a, b, c))
}

/// Positive when `d` lies strictly inside the circle through the
/// counter-clockwise triangle `(a, b, c)`.
pub fn incircle<T: Scalar>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>, d: &Point2<T>) -> T
where
    for<'a> &'a T: RefArith<T>,
{
    let adx = &a[0] - &d[0];
    let ady = &a[1] - &d[1];
    let bdx = &b[0] - &d[0];
    let bdy = &b[1] - &d[1];
    let cdx = &c[0] - &d[0];
    let cdy = &c[1] - &d[1];

    let alift = &(&adx * &adx) + &(&ady * &ady);
    let blift = &(&bdx * &bdx) + &(&bdy * &bdy);
    let clift = &(&cdx * &cdx) + &(&cdy * &cdy);

    let bc = &(&bdx * &cdy) - &(&bdy * &cdx);
    let ca = &(&cdx * &ady) - &(&cdy * &adx);
    let ab = &(&adx * &bdy) - &(&ady * &bdx);

    &(&(&alift * &bc) + &(&blift * &ca)) + &(&clift * &ab)
}
