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

use std::{
    array,
    ops::{Add, Index, IndexMut, Sub},
};

use crate::{
    geometry::{spatial_element::SpatialElement, vector::Vector},
    numeric::scalar::{RefArith, Scalar},
    operations::Zero,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Point<T: Scalar, const N: usize> {
    pub coords: [T; N],
}

pub type Point2<T> = Point<T, 2>;
pub type Point3<T> = Point<T, 3>;

pub trait PointOps<T: Scalar, const N: usize>: Sized {
    fn as_vector(&self) -> Vector<T, N>;
    fn add_vector(&self, v: &Vector<T, N>) -> Self;
    fn vector_to(&self, other: &Self) -> Vector<T, N>;
    /// Point at parameter `t` on the segment `self -> other`.
    fn lerp(&self, other: &Self, t: &T) -> Self;
}

impl<T: Scalar, const N: usize> Default for Point<T, N> {
    fn default() -> Point<T, N> {
        Point {
            coords: array::from_fn(|_| T::default()),
        }
    }
}

impl<T: Scalar, const N: usize> SpatialElement<T, N> for Point<T, N> {
    fn new(coords: [T; N]) -> Point<T, N> {
        Point { coords }
    }

    fn coords(&self) -> &[T; N] {
        &self.coords
    }

    fn coords_mut(&mut self) -> &mut [T; N] {
        &mut self.coords
    }
}

impl<T: Scalar, const N: usize> Index<usize> for Point<T, N> {
    type Output = T;
    fn index(&self, i: usize) -> &Self::Output {
        &self.coords[i]
    }
}

impl<T: Scalar, const N: usize> IndexMut<usize> for Point<T, N> {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.coords[i]
    }
}

impl<'a, 'b, T: Scalar, const N: usize> Sub<&'b Point<T, N>> for &'a Point<T, N> {
    type Output = Vector<T, N>;
    fn sub(self, rhs: &'b Point<T, N>) -> Self::Output {
        let mut out = self.coords.clone();
        for i in 0..N {
            out[i] -= &rhs.coords[i];
        }
        Vector::new(out)
    }
}

impl<'a, 'b, T: Scalar, const N: usize> Add<&'b Vector<T, N>> for &'a Point<T, N> {
    type Output = Point<T, N>;
    fn add(self, rhs: &'b Vector<T, N>) -> Self::Output {
        let mut out = self.clone();
        for i in 0..N {
            out.coords[i] += &rhs.coords[i];
        }
        out
    }
}

impl<T: Scalar, const N: usize> Zero for Point<T, N> {
    fn zero() -> Self {
        Point {
            coords: array::from_fn(|_| T::zero()),
        }
    }

    fn is_zero(&self) -> bool {
        self.coords.iter().all(|c| c.is_zero())
    }
    fn is_positive(&self) -> bool {
        self.coords.iter().all(|c| c.is_positive())
    }
    fn is_negative(&self) -> bool {
        self.coords.iter().all(|c| c.is_negative())
    }
    fn is_positive_or_zero(&self) -> bool {
        self.coords.iter().all(|c| c.is_positive_or_zero())
    }
    fn is_negative_or_zero(&self) -> bool {
        self.coords.iter().all(|c| c.is_negative_or_zero())
    }
}

impl<T: Scalar, const N: usize> PointOps<T, N> for Point<T, N>
where
    for<'a> &'a T: RefArith<T>,
{
    fn as_vector(&self) -> Vector<T, N> {
        Vector::new(self.coords.clone())
    }

    fn add_vector(&self, v: &Vector<T, N>) -> Self {
        self + v
    }

    fn vector_to(&self, other: &Self) -> Vector<T, N> {
        other - self
    }

    fn lerp(&self, other: &Self, t: &T) -> Self {
        let d = other - self;
        Point::new(array::from_fn(|i| &self.coords[i] + &(&d.coords[i] * t)))
    }
}
