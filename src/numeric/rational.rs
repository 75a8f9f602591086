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
    cmp::Ordering,
    ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign},
};

use num_traits::ToPrimitive;

use crate::{
    numeric::scalar::Scalar,
    operations::{Abs, One, Zero},
};

/// Exact scalar backed by `rug::Rational`.
#[derive(Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Rational(pub rug::Rational);

impl Scalar for Rational {
    fn from_num_den(num: i32, den: i32) -> Self {
        Rational(rug::Rational::from((num, den)))
    }

    fn tolerance() -> Self {
        Rational::zero()
    }

    fn is_exact() -> bool {
        true
    }
}

impl Add for Rational {
    type Output = Rational;
    fn add(self, rhs: Rational) -> Rational {
        Rational(self.0 + rhs.0)
    }
}

impl Sub for Rational {
    type Output = Rational;
    fn sub(self, rhs: Rational) -> Rational {
        Rational(self.0 - rhs.0)
    }
}

impl Mul for Rational {
    type Output = Rational;
    fn mul(self, rhs: Rational) -> Rational {
        Rational(self.0 * rhs.0)
    }
}

impl Div for Rational {
    type Output = Rational;
    fn div(self, rhs: Rational) -> Rational {
        Rational(self.0 / rhs.0)
    }
}

impl<'a, 'b> Add<&'b Rational> for &'a Rational {
    type Output = Rational;

    fn add(self, rhs: &'b Rational) -> Rational {
        let mut result = self.0.clone();
        result += &rhs.0;
        Rational(result)
    }
}

impl<'a, 'b> Sub<&'b Rational> for &'a Rational {
    type Output = Rational;

    fn sub(self, rhs: &'b Rational) -> Rational {
        let mut result = self.0.clone();
        result -= &rhs.0;
        Rational(result)
    }
}

impl<'a, 'b> Mul<&'b Rational> for &'a Rational {
    type Output = Rational;

    fn mul(self, rhs: &'b Rational) -> Rational {
        let mut result = self.0.clone();
        result *= &rhs.0;
        Rational(result)
    }
}

impl<'a, 'b> Div<&'b Rational> for &'a Rational {
    type Output = Rational;

    fn div(self, rhs: &'b Rational) -> Rational {
        let mut result = self.0.clone();
        result /= &rhs.0;
        Rational(result)
    }
}

impl<'a> AddAssign<&'a Rational> for Rational {
    fn add_assign(&mut self, rhs: &'a Rational) {
        self.0 += &rhs.0;
    }
}

impl<'a> SubAssign<&'a Rational> for Rational {
    fn sub_assign(&mut self, rhs: &'a Rational) {
        self.0 -= &rhs.0;
    }
}

impl Neg for Rational {
    type Output = Rational;
    fn neg(self) -> Rational {
        Rational(-self.0)
    }
}

impl<'a> Neg for &'a Rational {
    type Output = Rational;
    fn neg(self) -> Rational {
        Rational(-self.0.clone())
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Rational(rug::Rational::new())
    }

    fn is_zero(&self) -> bool {
        self.0.cmp0() == Ordering::Equal
    }

    fn is_positive(&self) -> bool {
        self.0.cmp0() == Ordering::Greater
    }
    fn is_negative(&self) -> bool {
        self.0.cmp0() == Ordering::Less
    }
    fn is_positive_or_zero(&self) -> bool {
        self.0.cmp0() != Ordering::Less
    }
    fn is_negative_or_zero(&self) -> bool {
        self.0.cmp0() != Ordering::Greater
    }
}

impl One for Rational {
    fn one() -> Self {
        Rational(rug::Rational::from(1))
    }
}

impl Abs for Rational {
    fn abs(&self) -> Self {
        Rational(self.0.clone().abs())
    }
}

impl ToPrimitive for Rational {
    fn to_i64(&self) -> Option<i64> {
        self.0.clone().trunc().numer().to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.0.clone().trunc().numer().to_u64()
    }

    fn to_f64(&self) -> Option<f64> {
        Some(self.0.to_f64())
    }
}

impl From<i32> for Rational {
    fn from(value: i32) -> Self {
        Rational(rug::Rational::from(value))
    }
}

// Every finite double is a dyadic rational, so the conversion is exact.
impl From<f64> for Rational {
    fn from(value: f64) -> Self {
        Rational(rug::Rational::from_f64(value).unwrap_or_default())
    }
}

impl From<rug::Rational> for Rational {
    fn from(value: rug::Rational) -> Self {
        Rational(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirds_are_exact() {
        let third = Rational::from_num_den(1, 3);
        let sum = &(&third + &third) + &third;
        assert!((&sum - &Rational::one()).is_zero());
    }

    #[test]
    fn f64_conversion_is_exact() {
        let r = Rational::from(0.1);
        assert_eq!(r.to_f64(), Some(0.1));
        assert_ne!(r, Rational::from_num_den(1, 10));
    }

    #[test]
    fn truncation_to_integer() {
        assert_eq!(Rational::from_num_den(-7, 2).to_i64(), Some(-3));
    }
}
