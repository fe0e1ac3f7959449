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

use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

use crate::config::SimulationConfig;
use crate::dataset::{Dataset, DatasetSummary};
use crate::error::FopdtError;
use crate::evaluate::{self, MethodComparison, ResponseComparison};
use crate::identify::{self, IdentificationMethod};
use crate::metrics::{self, StepInfo};
use crate::model::ModelParameters;
use crate::sim;
use crate::transfer::{self, TransferFunctionCoefficients};
use crate::tuning::{self, PidGains, TuningMethod, TuningReport};

/// A simulated trajectory on the experiment's time grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimulationResult {
    /// Time grid of the experiment
    pub time: Vec<f64>,
    /// Simulated output at each instant
    pub response: Vec<f64>,
    /// Constant reference the loop was driven with; `None` for unit-step simulations
    pub reference: Option<Vec<f64>>,
}

impl SimulationResult {
    /// Step-response characteristics, with the settling band relative to the final value.
    pub fn step_info(&self, settling_band: f64) -> StepInfo {
        let reference = self.reference.as_ref().and_then(|r| r.last().copied());
        metrics::step_info(&self.time, &self.response, settling_band, reference)
    }
}

/// The working state of one identification/tuning session: the imported experiment and the
/// model identified from it.
///
/// The session is an explicit value owned by the caller. Identification is the only operation
/// that mutates it and therefore takes `&mut self`; everything downstream borrows it immutably.
/// The current model is an `Option`, so tuning or simulating before a successful
/// identification fails with `FopdtError::ModelNotIdentified`.
///
/// ```rust
/// use fopdt_tune::identify::IdentificationMethod;
/// use fopdt_tune::session::Session;
/// use fopdt_tune::tuning::TuningMethod;
///
/// let mut session = Session::default();
/// session
///     .load_dataset(
///         vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
///         vec![1.0; 6],
///         vec![0.0, 0.5, 0.8, 0.95, 0.98, 1.0],
///     )
///     .expect("valid dataset");
///
/// let model = session.identify(IdentificationMethod::Smith).unwrap();
/// assert_eq!((model.tau(), model.theta()), (1.5, 0.5));
///
/// let report = session.tune(TuningMethod::Itae, None).unwrap();
/// assert!(report.gains.kp.is_finite());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Session {
    config: SimulationConfig,
    dataset: Option<Dataset>,
    model: Option<ModelParameters>,
}

impl Session {
    /// An empty session using `config`.
    pub fn new(config: SimulationConfig) -> Self {
        Session {
            config,
            dataset: None,
            model: None,
        }
    }

    /// The settings used by simulations and reports.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Mutable access to the configuration; setters keep it valid.
    pub fn config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }

    /// The loaded experiment, if any.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// The current model, if one has been identified.
    pub fn model(&self) -> Option<&ModelParameters> {
        self.model.as_ref()
    }

    fn require_dataset(&self) -> Result<&Dataset, FopdtError> {
        self.dataset.as_ref().ok_or(FopdtError::DatasetNotLoaded)
    }

    fn require_model(&self) -> Result<&ModelParameters, FopdtError> {
        self.model.as_ref().ok_or(FopdtError::ModelNotIdentified)
    }

    fn require_both(&self) -> Result<(&Dataset, &ModelParameters), FopdtError> {
        let model = self.require_model()?;
        Ok((self.require_dataset()?, model))
    }

    /// Validates and imports an experiment, replacing any previous one.
    ///
    /// The model identified from a previous dataset no longer describes the data and is dropped.
    /// On failure the session is left untouched.
    pub fn load_dataset(
        &mut self,
        time: Vec<f64>,
        input: Vec<f64>,
        output: Vec<f64>,
    ) -> Result<DatasetSummary, FopdtError> {
        let dataset = Dataset::new(time, input, output)?;
        Ok(self.replace_dataset(dataset))
    }

    /// Installs an already validated dataset, replacing any previous one.
    pub fn replace_dataset(&mut self, dataset: Dataset) -> DatasetSummary {
        let summary = dataset.summary();
        debug!("dataset loaded: {summary:?}");
        self.dataset = Some(dataset);
        self.model = None;
        summary
    }

    /// Identifies a model from the loaded dataset and makes it the current model.
    ///
    /// On failure the previous model, if any, is kept.
    pub fn identify(
        &mut self,
        method: IdentificationMethod,
    ) -> Result<ModelParameters, FopdtError> {
        let params = identify::identify(self.require_dataset()?, method)?;
        self.model = Some(params);
        Ok(params)
    }

    /// RMSE of the model `method` identifies, against the loaded dataset.
    ///
    /// This is a pure evaluation: the current model is left unchanged.
    pub fn compute_rmse(&self, method: IdentificationMethod) -> Result<f64, FopdtError> {
        evaluate::evaluate_method(self.require_dataset()?, method, self.config.rounding_digits())
            .map(|evaluation| evaluation.rmse)
    }

    /// Evaluates both identification methods; see [`MethodComparison::preferred`].
    pub fn compare_methods(&self) -> Result<MethodComparison, FopdtError> {
        evaluate::compare_methods(self.require_dataset()?, self.config.rounding_digits())
    }

    /// Measured output next to the current model's prediction.
    pub fn compare_response(&self) -> Result<ResponseComparison, FopdtError> {
        let (dataset, model) = self.require_both()?;
        Ok(evaluate::compare_response(dataset, model))
    }

    /// Tunes a PID controller for the current model.
    ///
    /// Gains and the nominal setpoint (mean input of the experiment) are rounded to the
    /// configured number of digits.
    pub fn tune(
        &self,
        method: TuningMethod,
        lambda: Option<f64>,
    ) -> Result<TuningReport, FopdtError> {
        let (dataset, model) = self.require_both()?;
        let gains = tuning::tune(model, method, lambda)?;
        debug!("{method} tuning: {gains:?}");
        Ok(TuningReport {
            method,
            gains: gains.map(|g| self.config.round(g)),
            setpoint: self.config.round(dataset.mean_input()),
        })
    }

    /// Coefficients of `k / (τs + 1)` and, with dead time, of its Padé approximation.
    pub fn transfer_function_coefficients(
        &self,
    ) -> Result<TransferFunctionCoefficients, FopdtError> {
        transfer::transfer_function_coefficients(self.require_model()?, self.config.pade_order())
    }

    /// Unit step response of the delayed plant on the dataset's time grid.
    pub fn simulate_open_loop(&self) -> Result<SimulationResult, FopdtError> {
        let (dataset, model) = self.require_both()?;
        let plant = transfer::delayed_transfer_function(model, self.config.pade_order())?;
        let response = sim::step_response(&plant, dataset.time())?;
        Ok(SimulationResult {
            time: dataset.time().to_vec(),
            response,
            reference: None,
        })
    }

    /// Unit step response of the plant under unity negative feedback, without a controller.
    pub fn simulate_closed_loop(&self) -> Result<SimulationResult, FopdtError> {
        let (dataset, model) = self.require_both()?;
        let closed = transfer::delayed_transfer_function(model, self.config.pade_order())?
            .unity_feedback()?;
        let response = sim::step_response(&closed, dataset.time())?;
        Ok(SimulationResult {
            time: dataset.time().to_vec(),
            response,
            reference: None,
        })
    }

    /// Closed loop of the plant and the PID controller `(kp, ti, td)`, tracking a constant
    /// `setpoint`, with the configured Padé order.
    pub fn simulate_custom_pid(
        &self,
        kp: f64,
        ti: f64,
        td: f64,
        setpoint: f64,
    ) -> Result<SimulationResult, FopdtError> {
        self.simulate_custom_pid_with_order(
            PidGains { kp, ti, td },
            setpoint,
            self.config.pade_order(),
        )
    }

    /// As [`Self::simulate_custom_pid`], with an explicit Padé order for this request only.
    ///
    /// The order is validated like [`SimulationConfig::set_pade_order`]: outside
    /// `1..=MAX_PADE_ORDER` it fails with `FopdtError::NumericalError`.
    pub fn simulate_custom_pid_with_order(
        &self,
        gains: PidGains,
        setpoint: f64,
        pade_order: usize,
    ) -> Result<SimulationResult, FopdtError> {
        let (dataset, model) = self.require_both()?;
        transfer::check_pade_order(pade_order)?;
        if !setpoint.is_finite() {
            return Err(FopdtError::numerical("setpoint", setpoint));
        }

        let controller = transfer::pid_transfer_function(&gains)?;
        let plant = transfer::delayed_transfer_function(model, pade_order)?;
        let closed = controller.series(&plant).unity_feedback()?;

        let reference = vec![setpoint; dataset.len()];
        let response = sim::forced_response(&closed, dataset.time(), &reference)?;
        debug!("custom PID {gains:?} simulated against setpoint {setpoint}");
        Ok(SimulationResult {
            time: dataset.time().to_vec(),
            response,
            reference: Some(reference),
        })
    }
}

/// A [`Session`] shared between threads.
///
/// Identification takes the write lock for the whole computation, other operations take the read
/// lock, so readers always observe a complete model, either the one before or the one after an
/// identification.
#[derive(Clone, Debug, Default)]
pub struct SharedSession {
    inner: Arc<RwLock<Session>>,
}

impl SharedSession {
    /// Shares `session` between threads.
    pub fn new(session: Session) -> Self {
        SharedSession {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    /// Runs `f` with exclusive access to the session.
    pub fn write<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Runs `f` with shared access to the session.
    pub fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.inner.read())
    }

    /// Validates the experiment without holding the lock, then installs it as in
    /// [`Session::replace_dataset`].
    pub fn load_dataset(
        &self,
        time: Vec<f64>,
        input: Vec<f64>,
        output: Vec<f64>,
    ) -> Result<DatasetSummary, FopdtError> {
        let dataset = Dataset::new(time, input, output)?;
        Ok(self.write(|session| session.replace_dataset(dataset)))
    }

    /// Identifies under the write lock; see [`Session::identify`].
    pub fn identify(&self, method: IdentificationMethod) -> Result<ModelParameters, FopdtError> {
        self.write(|session| session.identify(method))
    }

    /// A copy of the current model.
    pub fn model(&self) -> Option<ModelParameters> {
        self.read(|session| session.model().copied())
    }

    /// Tunes under the read lock; see [`Session::tune`].
    pub fn tune(
        &self,
        method: TuningMethod,
        lambda: Option<f64>,
    ) -> Result<TuningReport, FopdtError> {
        self.read(|session| session.tune(method, lambda))
    }
}
