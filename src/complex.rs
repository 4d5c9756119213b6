// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The handful of complex operations the escape-time generators need
//! beyond what `num::Complex` already gives us through `+`, `-` and
//! `*`.  Division is the only operation that can fail, and it does so
//! explicitly rather than quietly producing NaNs.

use num::Complex;

use crate::error::FractalError;

/// Extension methods for `Complex<f64>`.
pub trait ComplexExt: Sized {
    /// A complex number lying on the real axis.
    fn from_real(x: f64) -> Self;

    /// The squared modulus, re² + im².
    fn sqr_mod(&self) -> f64;

    /// Divide `self` by `divisor`, refusing when the divisor's squared
    /// modulus is exactly zero.
    fn checked_div(&self, divisor: &Self) -> Result<Self, FractalError>;
}

impl ComplexExt for Complex<f64> {
    #[inline]
    fn from_real(x: f64) -> Self {
        Complex::new(x, 0.0)
    }

    #[inline]
    fn sqr_mod(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    fn checked_div(&self, divisor: &Self) -> Result<Self, FractalError> {
        let k = divisor.sqr_mod();
        if k == 0.0 {
            return Err(FractalError::DivisionByZero);
        }
        Ok(Complex::new(
            (self.re * divisor.re + self.im * divisor.im) / k,
            (self.im * divisor.re - self.re * divisor.im) / k,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqr_mod_is_sum_of_squares() {
        assert_eq!(Complex::<f64>::new(3.0, 4.0).sqr_mod(), 25.0);
        assert_eq!(Complex::<f64>::from_real(-2.0).sqr_mod(), 4.0);
    }

    #[test]
    fn checked_div_inverts_multiplication() {
        let a = Complex::<f64>::new(1.5, -2.0);
        let b = Complex::new(0.5, 3.0);
        let q = (a * b).checked_div(&b).unwrap();
        assert!((q - a).sqr_mod() < 1e-24);
    }

    #[test]
    fn checked_div_by_i() {
        let q = Complex::<f64>::from_real(4.0)
            .checked_div(&Complex::new(0.0, -4.0))
            .unwrap();
        assert_eq!(q, Complex::new(0.0, 1.0));
    }

    #[test]
    fn checked_div_refuses_zero() {
        let r = Complex::<f64>::new(1.0, 1.0).checked_div(&Complex::<f64>::from_real(0.0));
        assert_eq!(r, Err(FractalError::DivisionByZero));
    }
}
