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

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use num_traits::ToPrimitive;

use crate::{
    numeric::scalar::Scalar,
    operations::{Abs, One, Zero},
};

pub const EPS: f64 = 1e-12;

/// Fast inexact scalar. Sign tests are taken with an `EPS` dead zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct F64(pub f64);

impl Scalar for F64 {
    fn from_num_den(num: i32, den: i32) -> Self {
        F64(num as f64 / den as f64)
    }

    fn tolerance() -> Self {
        F64(EPS)
    }
}

impl Add for F64 {
    type Output = F64;
    fn add(self, rhs: F64) -> F64 {
        F64(self.0 + rhs.0)
    }
}

impl Sub for F64 {
    type Output = F64;
    fn sub(self, rhs: F64) -> F64 {
        F64(self.0 - rhs.0)
    }
}

impl Mul for F64 {
    type Output = F64;
    fn mul(self, rhs: F64) -> F64 {
        F64(self.0 * rhs.0)
    }
}

impl Div for F64 {
    type Output = F64;
    fn div(self, rhs: F64) -> F64 {
        F64(self.0 / rhs.0)
    }
}

impl<'a, 'b> Add<&'b F64> for &'a F64 {
    type Output = F64;
    fn add(self, rhs: &'b F64) -> F64 {
        F64(self.0 + rhs.0)
    }
}

impl<'a, 'b> Sub<&'b F64> for &'a F64 {
    type Output = F64;
    fn sub(self, rhs: &'b F64) -> F64 {
        F64(self.0 - rhs.0)
    }
}

impl<'a, 'b> Mul<&'b F64> for &'a F64 {
    type Output = F64;
    fn mul(self, rhs: &'b F64) -> F64 {
        F64(self.0 * rhs.0)
    }
}

impl<'a, 'b> Div<&'b F64> for &'a F64 {
    type Output = F64;
    fn div(self, rhs: &'b F64) -> F64 {
        F64(self.0 / rhs.0)
    }
}

impl<'a> AddAssign<&'a F64> for F64 {
    fn add_assign(&mut self, rhs: &'a F64) {
        self.0 += rhs.0;
    }
}

impl<'a> SubAssign<&'a F64> for F64 {
    fn sub_assign(&mut self, rhs: &'a F64) {
        self.0 -= rhs.0;
    }
}

impl Neg for F64 {
    type Output = F64;
    fn neg(self) -> F64 {
        F64(-self.0)
    }
}

impl<'a> Neg for &'a F64 {
    type Output = F64;
    fn neg(self) -> F64 {
        F64(-self.0)
    }
}

impl Zero for F64 {
    fn zero() -> Self {
        F64(0.0)
    }

    fn is_zero(&self) -> bool {
        self.0.abs() < EPS
    }

    fn is_positive(&self) -> bool {
        self.0 > EPS
    }
    fn is_negative(&self) -> bool {
        self.0 < -EPS
    }
    fn is_positive_or_zero(&self) -> bool {
        self.0 >= -EPS
    }
    fn is_negative_or_zero(&self) -> bool {
        self.0 <= EPS
    }
}

impl One for F64 {
    fn one() -> Self {
        F64(1.0)
    }
}

impl Abs for F64 {
    fn abs(&self) -> Self {
        F64(self.0.abs())
    }
}

impl ToPrimitive for F64 {
    fn to_i64(&self) -> Option<i64> {
        self.0.to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.0)
    }
}

impl From<i32> for F64 {
    fn from(value: i32) -> Self {
        F64(value as f64)
    }
}

impl From<f64> for F64 {
    fn from(value: f64) -> Self {
        F64(value)
    }
}

impl From<F64> for f64 {
    fn from(value: F64) -> Self {
        value.0
    }
}
