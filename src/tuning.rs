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

use core::str::FromStr;

use crate::error::{ensure_finite, FopdtError, MethodKind};
use crate::model::ModelParameters;

/// PID tuning law.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TuningMethod {
    /// Internal model control, parameterized by the closed-loop time constant λ
    Imc,
    /// Integral of time-weighted absolute error correlations (setpoint tracking)
    Itae,
}

impl TuningMethod {
    /// Lowercase name, as accepted by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            TuningMethod::Imc => "imc",
            TuningMethod::Itae => "itae",
        }
    }
}

impl core::fmt::Display for TuningMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TuningMethod {
    type Err = FopdtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "imc" => Ok(TuningMethod::Imc),
            "itae" => Ok(TuningMethod::Itae),
            _ => Err(FopdtError::InvalidMethod {
                kind: MethodKind::Tuning,
                name: s.to_owned(),
            }),
        }
    }
}

/// Gains of an ideal (parallel, non-interacting) PID controller
/// `C(s) = Kp · (1 + 1/(Ti·s) + Td·s)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PidGains {
    /// Proportional gain
    pub kp: f64,
    /// Integral (reset) time
    pub ti: f64,
    /// Derivative time
    pub td: f64,
}

impl PidGains {
    /// Integral gain `Kp / Ti`.
    pub fn ki(&self) -> f64 {
        self.kp / self.ti
    }

    /// Derivative gain `Kp · Td`.
    pub fn kd(&self) -> f64 {
        self.kp * self.td
    }

    /// Applies `f` to each gain.
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        PidGains {
            kp: f(self.kp),
            ti: f(self.ti),
            td: f(self.td),
        }
    }
}

/// The outcome of a tuning request as reported to callers: rounded gains plus the nominal
/// operating setpoint of the experiment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TuningReport {
    /// Tuning law used
    pub method: TuningMethod,
    /// Gains rounded to the configured number of digits
    pub gains: PidGains,
    /// Mean input of the experiment
    pub setpoint: f64,
}

/// Computes full-precision PID gains for `params` using `method`.
///
/// `lambda` overrides the IMC closed-loop time constant, which otherwise defaults to the process
/// time constant. It is ignored by ITAE.
///
/// # Errors
/// `FopdtError::NumericalError` if
/// - `lambda` is supplied but is not finite and positive,
/// - ITAE is requested for a model without dead time (the correlations divide by `theta`),
/// - any resulting gain is not finite.
pub fn tune(
    params: &ModelParameters,
    method: TuningMethod,
    lambda: Option<f64>,
) -> Result<PidGains, FopdtError> {
    let (k, tau, theta) = (params.k(), params.tau(), params.theta());

    let gains = match method {
        TuningMethod::Imc => {
            let lambda = match lambda {
                Some(l) if !(l.is_finite() && l > 0.0) => {
                    return Err(FopdtError::numerical("IMC lambda", l))
                }
                Some(l) => l,
                None => tau,
            };
            PidGains {
                kp: (2.0 * tau + theta) / (k * (2.0 * lambda + theta)),
                ti: theta / 2.0 + tau,
                td: (tau * theta) / (2.0 * tau + theta),
            }
        }
        TuningMethod::Itae => {
            if theta == 0.0 {
                return Err(FopdtError::numerical("ITAE dead time theta", theta));
            }
            let ratio = theta / tau;
            PidGains {
                kp: (0.965 / k) * (tau / theta).powf(-0.85),
                ti: tau / (0.796 - 0.147 * ratio),
                td: tau * 0.308 * ratio.powf(0.929),
            }
        }
    };

    Ok(PidGains {
        kp: ensure_finite("proportional gain kp", gains.kp)?,
        ti: ensure_finite("integral time ti", gains.ti)?,
        td: ensure_finite("derivative time td", gains.td)?,
    })
}
