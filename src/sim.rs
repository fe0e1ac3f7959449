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

//! Time-domain simulation of rational transfer functions.
//!
//! A proper transfer function is realized in controllable canonical form and propagated from a
//! zero initial state. Inputs are held constant between samples, so each step is advanced with
//! the exact zero-order-hold discretization `(e^{AΔt}, ∫e^{Aτ}dτ·B)` obtained from the matrix
//! exponential of the augmented matrix `[[A, B], [0, 0]]·Δt`.

use log::debug;
use nalgebra as na;

use crate::error::FopdtError;
use crate::transfer::TransferFunction;

/// State-space realization
///
/// ```text
/// x' = A x + B u
/// y  = C x + D u
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct StateSpace {
    /// State matrix
    pub a: na::DMatrix<f64>,
    /// Input vector
    pub b: na::DVector<f64>,
    /// Output row
    pub c: na::RowDVector<f64>,
    /// Direct feedthrough
    pub d: f64,
}

impl StateSpace {
    /// Controllable canonical realization of a proper transfer function.
    ///
    /// With the denominator normalized to `s^n + a1 s^(n-1) + ... + an` and the numerator padded
    /// to `b0 s^n + ... + bn`:
    /// ```text
    ///     ┌                  ┐       ┌   ┐
    ///     │ -a1 -a2 ... -an  │       │ 1 │
    /// A = │  1   0  ...  0   │   B = │ 0 │   C = [b1 - b0 a1, ..., bn - b0 an]   D = b0
    ///     │      ...         │       │...│
    ///     │  0  ...   1  0   │       │ 0 │
    ///     └                  ┘       └   ┘
    /// ```
    ///
    /// # Errors
    /// `FopdtError::NumericalError` if the transfer function is improper.
    pub fn from_transfer_function(tf: &TransferFunction<f64>) -> Result<Self, FopdtError> {
        if !tf.is_proper() {
            return Err(FopdtError::numerical(
                "improper transfer function, numerator degree",
                tf.num().degree() as f64,
            ));
        }

        let n = tf.den().degree();
        let lead = tf.den().leading();
        let den: Vec<f64> = tf.den().coeffs().iter().map(|c| c / lead).collect();

        let mut num = vec![0.0; n + 1];
        let offset = n - tf.num().degree();
        for (dst, c) in num[offset..].iter_mut().zip(tf.num().coeffs()) {
            *dst = c / lead;
        }

        let d = num[0];
        let mut a = na::DMatrix::zeros(n, n);
        let b = if n > 0 {
            na::DVector::from_fn(n, |i, _| if i == 0 { 1.0 } else { 0.0 })
        } else {
            na::DVector::zeros(0)
        };
        let c = na::RowDVector::from_fn(n, |_, j| num[j + 1] - d * den[j + 1]);
        for j in 0..n {
            a[(0, j)] = -den[j + 1];
        }
        for i in 1..n {
            a[(i, i - 1)] = 1.0;
        }

        Ok(StateSpace { a, b, c, d })
    }

    /// Number of states
    pub fn order(&self) -> usize {
        self.a.nrows()
    }

    /// Output map `C x + D u`.
    pub fn h(&self, x: &na::DVector<f64>, u: f64) -> f64 {
        (&self.c * x)[(0, 0)] + self.d * u
    }

    /// Zero-order-hold discretization over a step of `dt`.
    pub fn discretize(&self, dt: f64) -> (na::DMatrix<f64>, na::DVector<f64>) {
        let n = self.order();
        let mut augmented = na::DMatrix::zeros(n + 1, n + 1);
        augmented.view_mut((0, 0), (n, n)).copy_from(&self.a);
        augmented.view_mut((0, n), (n, 1)).copy_from(&self.b);
        let phi = (augmented * dt).exp();
        let ad = phi.view((0, 0), (n, n)).into_owned();
        let bd = phi.view((0, n), (n, 1)).column(0).into_owned();
        (ad, bd)
    }
}

/// Response of `tf`, starting from rest at `time[0]`, to the input sequence `input` sampled on
/// `time`. The input is held constant from one sample to the next.
///
/// # Errors
/// - `FopdtError::LengthMismatch` if `time` and `input` differ in length.
/// - `FopdtError::NumericalError` if the system is improper or the response is not finite.
pub fn forced_response(
    tf: &TransferFunction<f64>,
    time: &[f64],
    input: &[f64],
) -> Result<Vec<f64>, FopdtError> {
    if time.len() != input.len() {
        return Err(FopdtError::LengthMismatch {
            measured: time.len(),
            simulated: input.len(),
        });
    }

    let ss = StateSpace::from_transfer_function(tf)?;
    debug!(
        "simulating order-{} system over {} samples",
        ss.order(),
        time.len()
    );

    let mut x = na::DVector::zeros(ss.order());
    let mut response = Vec::with_capacity(time.len());
    // Uniform grids reuse one discretization
    let mut cached: Option<(f64, na::DMatrix<f64>, na::DVector<f64>)> = None;

    for (i, (&t, &u)) in time.iter().zip(input).enumerate() {
        if i > 0 {
            let dt = t - time[i - 1];
            let reuse = matches!(&cached, Some((h, _, _)) if (h - dt).abs() <= 1e-12 * dt.abs().max(1.0));
            if !reuse {
                let (ad, bd) = ss.discretize(dt);
                cached = Some((dt, ad, bd));
            }
            if let Some((_, ad, bd)) = &cached {
                x = ad * &x + bd * input[i - 1];
            }
        }

        let y = ss.h(&x, u);
        if !y.is_finite() {
            return Err(FopdtError::numerical("simulated response", y));
        }
        response.push(y);
    }

    Ok(response)
}

/// Unit step response of `tf` on the time grid `time`.
pub fn step_response(tf: &TransferFunction<f64>, time: &[f64]) -> Result<Vec<f64>, FopdtError> {
    forced_response(tf, time, &vec![1.0; time.len()])
}
