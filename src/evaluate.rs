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

//! Goodness of fit of identified models against the recorded experiment.

use log::debug;

use crate::config::round_to;
use crate::dataset::Dataset;
use crate::error::FopdtError;
use crate::identify::{identify, IdentificationMethod};
use crate::model::{simulate, ModelParameters};

/// Unrounded root-mean-square error between two equally long trajectories.
pub fn rmse_raw(measured: &[f64], simulated: &[f64]) -> Result<f64, FopdtError> {
    if measured.len() != simulated.len() {
        return Err(FopdtError::LengthMismatch {
            measured: measured.len(),
            simulated: simulated.len(),
        });
    }
    if measured.is_empty() {
        return Err(FopdtError::numerical("RMSE of empty trajectories", 0.0));
    }
    let sum_sq: f64 = measured
        .iter()
        .zip(simulated)
        .map(|(m, s)| (m - s).powi(2))
        .sum();
    Ok((sum_sq / measured.len() as f64).sqrt())
}

/// Root-mean-square error between `measured` and `simulated`, rounded to 4 decimal places.
pub fn rmse(measured: &[f64], simulated: &[f64]) -> Result<f64, FopdtError> {
    rmse_raw(measured, simulated).map(|e| round_to(e, 4))
}

/// An identified model together with how well it reproduces the experiment
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MethodEvaluation {
    /// Method the model was identified with
    pub method: IdentificationMethod,
    /// Identified model
    pub params: ModelParameters,
    /// Rounded RMSE against the zero-referenced measurement
    pub rmse: f64,
}

/// Identifies a model with `method`, simulates it on the dataset's time grid, and scores it
/// against the zero-referenced measurement. The RMSE is rounded to `digits` decimal places.
pub fn evaluate_method(
    dataset: &Dataset,
    method: IdentificationMethod,
    digits: u32,
) -> Result<MethodEvaluation, FopdtError> {
    let params = identify(dataset, method)?;
    let simulated = simulate(dataset.time(), dataset.mean_input(), &params);
    let rmse = round_to(rmse_raw(&dataset.zero_referenced_output(), &simulated)?, digits);
    debug!("{method} model scored rmse={rmse}");
    Ok(MethodEvaluation {
        method,
        params,
        rmse,
    })
}

/// Both identification methods evaluated on the same dataset.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MethodComparison {
    /// Smith identification and its score
    pub smith: MethodEvaluation,
    /// Sundaresan identification and its score
    pub sundaresan: MethodEvaluation,
}

impl MethodComparison {
    /// The method whose model has the lower RMSE. On equal (rounded) RMSE, Smith is preferred.
    pub fn preferred(&self) -> &MethodEvaluation {
        if self.sundaresan.rmse < self.smith.rmse {
            &self.sundaresan
        } else {
            &self.smith
        }
    }
}

/// Evaluates every identification method on `dataset`.
///
/// Fails with the first error encountered, in tie-break order.
pub fn compare_methods(dataset: &Dataset, digits: u32) -> Result<MethodComparison, FopdtError> {
    Ok(MethodComparison {
        smith: evaluate_method(dataset, IdentificationMethod::Smith, digits)?,
        sundaresan: evaluate_method(dataset, IdentificationMethod::Sundaresan, digits)?,
    })
}

/// Measured and modelled output side by side on the experiment's time grid
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResponseComparison {
    /// Time grid of the experiment
    pub time: Vec<f64>,
    /// Zero-referenced measured output
    pub measured: Vec<f64>,
    /// Closed-form model output
    pub simulated: Vec<f64>,
}

/// Pairs the zero-referenced measurement with the output `params` predicts on the same grid.
pub fn compare_response(dataset: &Dataset, params: &ModelParameters) -> ResponseComparison {
    ResponseComparison {
        time: dataset.time().to_vec(),
        measured: dataset.zero_referenced_output(),
        simulated: simulate(dataset.time(), dataset.mean_input(), params),
    }
}
