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

use crate::error::FopdtError;

/// Parameters of the first-order-plus-dead-time model
///
/// ```text
///          k · exp(-θs)
///  G(s) = ──────────────
///            τs + 1
/// ```
///
/// Values of this type are always valid models: `k` is finite and non-zero, `tau` is finite and
/// positive, `theta` is finite and non-negative. The only way to obtain one is [`Self::new`] (or
/// identification, which goes through it), so "not yet identified" is expressed as the absence of
/// a `ModelParameters`, never as zeroed fields.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ModelParameters {
    k: f64,
    tau: f64,
    theta: f64,
}

impl ModelParameters {
    /// Validates and builds a model.
    ///
    /// # Errors
    /// `FopdtError::NumericalError` naming the first offending parameter if
    /// - `k` is zero or not finite,
    /// - `tau` is not strictly positive or not finite,
    /// - `theta` is negative or not finite.
    pub fn new(k: f64, tau: f64, theta: f64) -> Result<Self, FopdtError> {
        if !k.is_finite() || k == 0.0 {
            return Err(FopdtError::numerical("process gain k", k));
        }
        if !tau.is_finite() || tau <= 0.0 {
            return Err(FopdtError::numerical("time constant tau", tau));
        }
        if !theta.is_finite() || theta < 0.0 {
            return Err(FopdtError::numerical("dead time theta", theta));
        }
        Ok(ModelParameters { k, tau, theta })
    }

    /// Static process gain.
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Time constant.
    pub fn tau(&self) -> f64 {
        self.tau
    }

    /// Dead time.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Closed-form response at time `t` to a step of height `amplitude` applied at `t = 0`.
    pub fn step_response_at(&self, t: f64, amplitude: f64) -> f64 {
        let shifted = t - self.theta;
        if shifted < 0.0 {
            0.0
        } else {
            self.k * amplitude * (1.0 - (-shifted / self.tau).exp())
        }
    }
}

/// Predicts the process output on the time grid `time` for a step of height `mean_input`.
///
/// The output is zero before the dead time elapses and then rises exponentially towards
/// `k · mean_input`.
pub fn simulate(time: &[f64], mean_input: f64, params: &ModelParameters) -> Vec<f64> {
    time.iter()
        .map(|&t| params.step_response_at(t, mean_input))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_invalid_parameters_are_rejected() {
        assert!(matches!(
            ModelParameters::new(0.0, 1.0, 0.0),
            Err(FopdtError::NumericalError { .. })
        ));
        assert!(matches!(
            ModelParameters::new(1.0, 0.0, 0.0),
            Err(FopdtError::NumericalError { .. })
        ));
        assert!(matches!(
            ModelParameters::new(1.0, 1.0, -0.1),
            Err(FopdtError::NumericalError { .. })
        ));
        assert!(matches!(
            ModelParameters::new(f64::NAN, 1.0, 0.0),
            Err(FopdtError::NumericalError { .. })
        ));
        // A negative gain is a valid (reverse-acting) process
        assert!(ModelParameters::new(-2.0, 1.0, 0.0).is_ok());
    }

    #[test]
    fn test_response_is_zero_until_dead_time() {
        let params = ModelParameters::new(2.0, 3.0, 1.5).unwrap();
        let response = simulate(&[0.0, 0.5, 1.0, 1.5], 4.0, &params);
        assert_eq!(response, vec![0.0; 4]);
    }

    #[test]
    fn test_response_reaches_63_percent_after_one_time_constant() {
        let params = ModelParameters::new(2.0, 3.0, 1.0).unwrap();
        let response = simulate(&[4.0, 1000.0], 0.5, &params);
        assert_relative_eq!(response[0], 1.0 - (-1.0f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(response[1], 1.0, epsilon = 1e-12);
    }
}
