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
    ops::{Add, AddAssign, Index, IndexMut, Sub},
};

use crate::{
    geometry::spatial_element::SpatialElement,
    numeric::scalar::{RefArith, Scalar},
    operations::Zero,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Vector<T: Scalar, const N: usize> {
    pub coords: [T; N],
}

pub type Vector2<T> = Vector<T, 2>;
pub type Vector3<T> = Vector<T, 3>;

pub trait VectorOps<T: Scalar, const N: usize>: Sized {
    fn dot(&self, other: &Self) -> T;
    fn norm2(&self) -> T;
    fn scale(&self, s: &T) -> Self;
}

pub trait Cross3<T: Scalar> {
    fn cross(&self, other: &Self) -> Self;
}

impl<T: Scalar, const N: usize> SpatialElement<T, N> for Vector<T, N> {
    fn new(coords: [T; N]) -> Vector<T, N> {
        Vector { coords }
    }

    fn coords(&self) -> &[T; N] {
        &self.coords
    }

    fn coords_mut(&mut self) -> &mut [T; N] {
        &mut self.coords
    }
}

impl<T: Scalar, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;
    fn index(&self, i: usize) -> &Self::Output {
        &self.coords[i]
    }
}

impl<T: Scalar, const N: usize> IndexMut<usize> for Vector<T, N> {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.coords[i]
    }
}

impl<T: Scalar, const N: usize> Zero for Vector<T, N> {
    fn zero() -> Self {
        Vector {
            coords: array::from_fn(|_| T::zero()),
        }
    }

    /// Null vector test: every coordinate is zero.
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

impl<'a, T: Scalar, const N: usize> AddAssign<&'a Vector<T, N>> for Vector<T, N> {
    fn add_assign(&mut self, rhs: &'a Vector<T, N>) {
        for i in 0..N {
            self.coords[i] += &rhs.coords[i];
        }
    }
}

impl<'a, 'b, T: Scalar, const N: usize> Add<&'b Vector<T, N>> for &'a Vector<T, N> {
    type Output = Vector<T, N>;
    fn add(self, rhs: &'b Vector<T, N>) -> Self::Output {
        let mut out = self.clone();
        out += rhs;
        out
    }
}

impl<'a, 'b, T: Scalar, const N: usize> Sub<&'b Vector<T, N>> for &'a Vector<T, N> {
    type Output = Vector<T, N>;
    fn sub(self, rhs: &'b Vector<T, N>) -> Self::Output {
        let mut out = self.clone();
        for i in 0..N {
            out.coords[i] -= &rhs.coords[i];
        }
        out
    }
}

impl<T: Scalar, const N: usize> VectorOps<T, N> for Vector<T, N>
where
    for<'a> &'a T: RefArith<T>,
{
    fn dot(&self, other: &Self) -> T {
        let mut acc = T::zero();
        for i in 0..N {
            acc += &(&self.coords[i] * &other.coords[i]);
        }
        acc
    }

    fn norm2(&self) -> T {
        self.dot(self)
    }

    fn scale(&self, s: &T) -> Self {
        Vector::new(array::from_fn(|i| &self.coords[i] * s))
    }
}

impl<T: Scalar> Cross3<T> for Vector<T, 3>
where
    for<'a> &'a T: RefArith<T>,
{
    fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = &self.coords;
        let [bx, by, bz] = &other.coords;
        Vector::new([
            &(ay * bz) - &(az * by),
            &(az * bx) - &(ax * bz),
            &(ax * by) - &(ay * bx),
        ])
    }
}
