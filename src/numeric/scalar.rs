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
    fmt::Debug,
    ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign},
};

use num_traits::ToPrimitive;

use crate::operations::{Abs, One, Zero};

/// Arithmetic on borrowed scalars, so `&a - &b` works without cloning.
///
/// Used as `for<'a> &'a T: RefArith<T>`, in the same way as `num_traits::RefNum`.
pub trait RefArith<T>:
    Sized
    + for<'r> Add<&'r T, Output = T>
    + for<'r> Sub<&'r T, Output = T>
    + for<'r> Mul<&'r T, Output = T>
    + for<'r> Div<&'r T, Output = T>
    + Neg<Output = T>
{
}

impl<T, R> RefArith<T> for R where
    R: Sized
        + for<'r> Add<&'r T, Output = T>
        + for<'r> Sub<&'r T, Output = T>
        + for<'r> Mul<&'r T, Output = T>
        + for<'r> Div<&'r T, Output = T>
        + Neg<Output = T>
{
}

pub trait Scalar:
    Clone
    + Default
    + Debug
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + Abs
    + Zero
    + One
    + ToPrimitive
    + From<i32>
    + From<f64>
{
    fn from_num_den(num: i32, den: i32) -> Self;

    /// Absolute tolerance used by equality tests. Zero for exact types.
    fn tolerance() -> Self;

    /// True when arithmetic never rounds.
    fn is_exact() -> bool {
        false
    }

    /// Returns -1, 0, or +1.
    fn sign(&self) -> i8 {
        if self.is_positive() {
            1
        } else if self.is_negative() {
            -1
        } else {
            0
        }
    }
}
