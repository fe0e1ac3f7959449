// Copyright © 2025 Hs293Go
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES
// OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE
// OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use core::ops::{Add, Mul};

use num_traits::Float;

/// A polynomial in `s`, stored as coefficients in descending powers.
///
/// `[a, b, c]` is `a·s² + b·s + c`. Leading zeros are stripped on construction so that the
/// degree is always `len - 1`; the zero polynomial is stored as `[0]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial<T: Float> {
    coeffs: Vec<T>,
}

impl<T: Float> Polynomial<T> {
    /// Builds a polynomial from coefficients in descending powers, stripping leading zeros.
    pub fn new(coeffs: impl Into<Vec<T>>) -> Self {
        let mut coeffs = coeffs.into();
        let first_nonzero = coeffs
            .iter()
            .position(|c| !c.is_zero())
            .unwrap_or(coeffs.len().saturating_sub(1));
        coeffs.drain(..first_nonzero);
        if coeffs.is_empty() {
            coeffs.push(T::zero());
        }
        Polynomial { coeffs }
    }

    /// Coefficients in descending powers.
    pub fn coeffs(&self) -> &[T] {
        &self.coeffs
    }

    /// Highest power with a non-zero coefficient; 0 for constants.
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// True for the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_zero()
    }

    /// Coefficient of the highest power.
    pub fn leading(&self) -> T {
        self.coeffs[0]
    }

    /// True if no coefficient is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_finite())
    }

    /// Evaluates the polynomial at `s` with Horner's scheme.
    pub fn eval(&self, s: T) -> T {
        self.coeffs
            .iter()
            .fold(T::zero(), |acc, &c| acc.mul_add(s, c))
    }
}

impl<T: Float> Add for &Polynomial<T> {
    type Output = Polynomial<T>;

    fn add(self, rhs: Self) -> Polynomial<T> {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let mut sum = vec![T::zero(); len];
        // Align on the constant term
        for (dst, &c) in sum.iter_mut().rev().zip(self.coeffs.iter().rev()) {
            *dst = *dst + c;
        }
        for (dst, &c) in sum.iter_mut().rev().zip(rhs.coeffs.iter().rev()) {
            *dst = *dst + c;
        }
        Polynomial::new(sum)
    }
}

impl<T: Float> Mul for &Polynomial<T> {
    type Output = Polynomial<T>;

    fn mul(self, rhs: Self) -> Polynomial<T> {
        let mut product = vec![T::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in rhs.coeffs.iter().enumerate() {
                product[i + j] = product[i + j] + a * b;
            }
        }
        Polynomial::new(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_zeros_are_stripped() {
        let p = Polynomial::new(vec![0.0, 0.0, 2.0, 1.0]);
        assert_eq!(p.coeffs(), &[2.0, 1.0]);
        assert_eq!(p.degree(), 1);

        let zero = Polynomial::<f64>::new(vec![0.0, 0.0]);
        assert!(zero.is_zero());
        assert_eq!(zero.degree(), 0);
    }

    #[test]
    fn test_add_aligns_constant_terms() {
        let a = Polynomial::new(vec![1.0, 2.0, 3.0]);
        let b = Polynomial::new(vec![10.0, 20.0]);
        assert_eq!((&a + &b).coeffs(), &[1.0, 12.0, 23.0]);
    }

    #[test]
    fn test_mul_convolves() {
        // (s + 1)(s - 1) = s² - 1
        let a = Polynomial::new(vec![1.0, 1.0]);
        let b = Polynomial::new(vec![1.0, -1.0]);
        assert_eq!((&a * &b).coeffs(), &[1.0, 0.0, -1.0]);
        assert_eq!((&a * &b).eval(3.0), 8.0);
    }
}
