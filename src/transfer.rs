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

//! Rational transfer functions of the identified process and of the PID controller.
//!
//! The dead time `exp(-θs)` is not rational; it is replaced by its Padé approximation so that
//! the plant, the controller and their feedback interconnection are all ratios of polynomials
//! that [`crate::sim`] can realize and simulate.

use num_traits::Float;

use crate::config::MAX_PADE_ORDER;
use crate::error::FopdtError;
use crate::model::ModelParameters;
use crate::poly::Polynomial;
use crate::tuning::PidGains;

/// `num(s) / den(s)`, single input single output.
#[derive(Clone, Debug, PartialEq)]
pub struct TransferFunction<T: Float> {
    num: Polynomial<T>,
    den: Polynomial<T>,
}

impl<T: Float> TransferFunction<T> {
    /// Builds `num / den`.
    ///
    /// # Errors
    /// `FopdtError::NumericalError` if any coefficient is not finite or the denominator is the
    /// zero polynomial.
    pub fn new(num: Polynomial<T>, den: Polynomial<T>) -> Result<Self, FopdtError> {
        if !num.is_finite() {
            return Err(FopdtError::numerical(
                "transfer function numerator",
                first_non_finite(&num),
            ));
        }
        if !den.is_finite() {
            return Err(FopdtError::numerical(
                "transfer function denominator",
                first_non_finite(&den),
            ));
        }
        if den.is_zero() {
            return Err(FopdtError::numerical("transfer function denominator", 0.0));
        }
        Ok(TransferFunction { num, den })
    }

    /// Builds a transfer function from coefficient slices in descending powers of `s`.
    pub fn from_coeffs(num: &[T], den: &[T]) -> Result<Self, FopdtError> {
        TransferFunction::new(Polynomial::new(num), Polynomial::new(den))
    }

    /// Numerator polynomial.
    pub fn num(&self) -> &Polynomial<T> {
        &self.num
    }

    /// Denominator polynomial.
    pub fn den(&self) -> &Polynomial<T> {
        &self.den
    }

    /// True if the numerator degree does not exceed the denominator degree.
    pub fn is_proper(&self) -> bool {
        self.num.degree() <= self.den.degree()
    }

    /// Cascade `self` followed by `other`.
    pub fn series(&self, other: &Self) -> Self {
        TransferFunction {
            num: &self.num * &other.num,
            den: &self.den * &other.den,
        }
    }

    /// Closes a unity negative feedback loop around `self`: `G / (1 + G) = num / (den + num)`.
    ///
    /// # Errors
    /// `FopdtError::NumericalError` if the closed-loop denominator vanishes identically, i.e.
    /// `num == -den`.
    pub fn unity_feedback(&self) -> Result<Self, FopdtError> {
        let den = &self.den + &self.num;
        TransferFunction::new(self.num.clone(), den)
    }

    /// Steady-state gain `num(0) / den(0)`; infinite for systems with a pole at the origin.
    pub fn dc_gain(&self) -> T {
        self.num.eval(T::zero()) / self.den.eval(T::zero())
    }
}

fn first_non_finite<T: Float>(p: &Polynomial<T>) -> f64 {
    p.coeffs()
        .iter()
        .find(|c| !c.is_finite())
        .and_then(|c| c.to_f64())
        .unwrap_or(f64::NAN)
}

/// Padé approximation of the pure delay `exp(-theta·s)` of the given `order`.
///
/// Coefficients are returned in descending powers of `s` with unit constant terms. For order 1
/// this is `(1 - θs/2) / (1 + θs/2)`, i.e. `([-θ/2, 1], [θ/2, 1])`. A zero delay yields
/// `([1], [1])` for any valid order.
///
/// # Errors
/// `FopdtError::NumericalError` if `order` lies outside `1..=MAX_PADE_ORDER`, or `theta` is
/// negative or not finite.
pub fn pade(theta: f64, order: usize) -> Result<(Vec<f64>, Vec<f64>), FopdtError> {
    check_pade_order(order)?;
    if !theta.is_finite() || theta < 0.0 {
        return Err(FopdtError::numerical("Padé dead time", theta));
    }
    if theta == 0.0 {
        return Ok((vec![1.0], vec![1.0]));
    }

    let n = order as f64;
    let mut num = vec![0.0; order + 1];
    let mut den = vec![0.0; order + 1];
    num[order] = 1.0;
    den[order] = 1.0;

    let mut c = 1.0;
    for j in 1..=order {
        let j_f = j as f64;
        c = c * theta * (n - j_f + 1.0) / ((2.0 * n - j_f + 1.0) * j_f);
        num[order - j] = if j % 2 == 0 { c } else { -c };
        den[order - j] = c;
    }
    Ok((num, den))
}

/// Rejects Padé orders outside `1..=MAX_PADE_ORDER`.
pub fn check_pade_order(order: usize) -> Result<usize, FopdtError> {
    if order == 0 || order > MAX_PADE_ORDER {
        return Err(FopdtError::numerical("pade order", order as f64));
    }
    Ok(order)
}

/// Rational transfer function `k / (τs + 1)` of the process without its dead time.
pub fn lag_transfer_function(params: &ModelParameters) -> Result<TransferFunction<f64>, FopdtError> {
    TransferFunction::from_coeffs(&[params.k()], &[params.tau(), 1.0])
}

/// The identified process `k·exp(-θs) / (τs + 1)` with the dead time replaced by its Padé
/// approximation of order `pade_order`.
pub fn delayed_transfer_function(
    params: &ModelParameters,
    pade_order: usize,
) -> Result<TransferFunction<f64>, FopdtError> {
    let (num, den) = pade(params.theta(), pade_order)?;
    let delay = TransferFunction::from_coeffs(&num, &den)?;
    Ok(lag_transfer_function(params)?.series(&delay))
}

/// Ideal PID controller `Kp + Ki/s + Kd·s` as the single rational function
/// `(Kp·Ti·Td·s² + Kp·Ti·s + Kp) / (Ti·s)`.
///
/// # Errors
/// `FopdtError::NumericalError` if a gain is not finite or `Ti` is zero.
pub fn pid_transfer_function(gains: &PidGains) -> Result<TransferFunction<f64>, FopdtError> {
    let PidGains { kp, ti, td } = *gains;
    for (context, value) in [
        ("proportional gain kp", kp),
        ("integral time ti", ti),
        ("derivative time td", td),
    ] {
        if !value.is_finite() {
            return Err(FopdtError::numerical(context, value));
        }
    }
    if ti == 0.0 {
        return Err(FopdtError::numerical("integral time ti", ti));
    }
    TransferFunction::from_coeffs(&[kp * ti * td, kp * ti, kp], &[ti, 0.0])
}

/// Coefficients describing the identified process, as reported to callers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TransferFunctionCoefficients {
    /// Numerator of `k / (τs + 1)`
    pub numerator: Vec<f64>,
    /// Denominator of `k / (τs + 1)`
    pub denominator: Vec<f64>,
    /// Padé `(numerator, denominator)` of the dead time; `None` without dead time
    pub pade: Option<(Vec<f64>, Vec<f64>)>,
}

/// Coefficients of `k / (τs + 1)` and, when `θ > 0`, of the Padé approximation of order
/// `pade_order`.
///
/// # Errors
/// `FopdtError::NumericalError` if `pade_order` lies outside `1..=MAX_PADE_ORDER`.
pub fn transfer_function_coefficients(
    params: &ModelParameters,
    pade_order: usize,
) -> Result<TransferFunctionCoefficients, FopdtError> {
    check_pade_order(pade_order)?;
    let delay = if params.theta() > 0.0 {
        Some(pade(params.theta(), pade_order)?)
    } else {
        None
    };
    Ok(TransferFunctionCoefficients {
        numerator: vec![params.k()],
        denominator: vec![params.tau(), 1.0],
        pade: delay,
    })
}
