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

//! Graphical identification of FOPDT models from a recorded step response.
//!
//! Both methods read off the instants at which the zero-referenced output first crosses two
//! fractions of its final value, then map those instants to a time constant and a dead time.

use core::str::FromStr;

use log::{debug, warn};

use crate::dataset::Dataset;
use crate::error::{FopdtError, MethodKind};
use crate::model::ModelParameters;

/// Graphical step-response identification method.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IdentificationMethod {
    /// Crossings at 28.3% and 63.2% of the final value
    Smith,
    /// Crossings at 35.3% and 85.3% of the final value
    Sundaresan,
}

impl IdentificationMethod {
    /// Every method, in tie-break order.
    pub const ALL: [IdentificationMethod; 2] =
        [IdentificationMethod::Smith, IdentificationMethod::Sundaresan];

    /// Lowercase name, as accepted by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            IdentificationMethod::Smith => "smith",
            IdentificationMethod::Sundaresan => "sundaresan",
        }
    }

    /// The two fractions of the final value whose crossing times the method reads off.
    pub fn thresholds(&self) -> (f64, f64) {
        match self {
            IdentificationMethod::Smith => (0.283, 0.632),
            IdentificationMethod::Sundaresan => (0.353, 0.853),
        }
    }

    /// Maps the crossing times `(t1, t2)` to `(tau, theta)`.
    fn time_constant_and_dead_time(&self, t1: f64, t2: f64) -> (f64, f64) {
        match self {
            IdentificationMethod::Smith => {
                let tau = 1.5 * (t2 - t1);
                (tau, t2 - tau)
            }
            IdentificationMethod::Sundaresan => ((2.0 / 3.0) * (t2 - t1), 1.3 * t1 - 0.29 * t2),
        }
    }
}

impl core::fmt::Display for IdentificationMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IdentificationMethod {
    type Err = FopdtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smith" => Ok(IdentificationMethod::Smith),
            "sundaresan" => Ok(IdentificationMethod::Sundaresan),
            _ => Err(FopdtError::InvalidMethod {
                kind: MethodKind::Identification,
                name: s.to_owned(),
            }),
        }
    }
}

/// Returns the time at which `response` first reaches `fraction` of `final_value`.
fn crossing_time(
    time: &[f64],
    response: &[f64],
    fraction: f64,
    final_value: f64,
    method: IdentificationMethod,
) -> Result<f64, FopdtError> {
    let level = fraction * final_value;
    response
        .iter()
        .position(|&y| y >= level)
        .map(|i| time[i])
        .ok_or(FopdtError::InsufficientData {
            method: method.name(),
            threshold: fraction,
        })
}

/// Identifies an FOPDT model from `dataset` using the graphical `method`.
///
/// The gain is the ratio of the output's final rise to the mean input, and therefore does not
/// depend on the method. The time constant and dead time come from the method's two threshold
/// crossings.
///
/// # Errors
/// - `FopdtError::InsufficientData` if the output never crosses one of the thresholds.
/// - `FopdtError::NumericalError` if the result is not a valid model, e.g. a zero mean input, a
///   flat response, or a negative dead time on datasets the heuristic does not fit.
pub fn identify(
    dataset: &Dataset,
    method: IdentificationMethod,
) -> Result<ModelParameters, FopdtError> {
    let time = dataset.time();
    let response = dataset.zero_referenced_output();
    let final_value = response[response.len() - 1];
    let k = final_value / dataset.mean_input();

    let (p1, p2) = method.thresholds();
    let t1 = crossing_time(time, &response, p1, final_value, method)?;
    let t2 = crossing_time(time, &response, p2, final_value, method)?;
    let (tau, theta) = method.time_constant_and_dead_time(t1, t2);

    let params = ModelParameters::new(k, tau, theta).inspect_err(|e| {
        warn!("{method} identification rejected: {e} (t1={t1}, t2={t2})");
    })?;
    debug!(
        "{method} identification: t1={t1}, t2={t2}, k={}, tau={}, theta={}",
        params.k(),
        params.tau(),
        params.theta()
    );
    Ok(params)
}
