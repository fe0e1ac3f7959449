#![warn(missing_docs)]

//! # FOPDT Identification and PID Tuning Library
//!
//! This library identifies a first-order-plus-dead-time (FOPDT) process model
//!
//! ```text
//!          k · exp(-θs)
//!  G(s) = ──────────────
//!            τs + 1
//! ```
//!
//! from a recorded step-response experiment, derives PID gains from the model, and simulates the
//! resulting loops.
//!
//! ## Features
//!
//! - Graphical identification from two threshold crossings of the step response:
//!   - Smith (28.3% / 63.2%)
//!   - Sundaresan (35.3% / 85.3%)
//!   - RMSE scoring of each method against the experiment, and selection of the better one.
//!
//! - PID tuning laws:
//!   - IMC, with an optional closed-loop time constant λ
//!   - ITAE (setpoint tracking correlations)
//!
//! - Loop simulation on the experiment's own time grid, with the dead time replaced by a Padé
//!   approximation of configurable order:
//!   - Open loop step response
//!   - Unity feedback step response
//!   - Closed loop with an arbitrary ideal PID controller tracking a constant setpoint
//!
//! ## Usage
//!
//! ### Functional API
//!
//! Each stage is a pure function of its inputs, so the model can be passed around explicitly.
//!
//! ```rust
//! use fopdt_tune::dataset::Dataset;
//! use fopdt_tune::identify::{identify, IdentificationMethod};
//! use fopdt_tune::tuning::{tune, TuningMethod};
//!
//! let dataset = Dataset::new(
//!     vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
//!     vec![1.0; 6],
//!     vec![0.0, 0.5, 0.8, 0.95, 0.98, 1.0],
//! )
//! .expect("Invalid dataset");
//!
//! let model = identify(&dataset, IdentificationMethod::Sundaresan).expect("Identification failed");
//! let gains = tune(&model, TuningMethod::Imc, None).expect("Tuning failed");
//! assert!(gains.kp > 0.0);
//! ```
//!
//! ### Stateful session
//!
//! A [`session::Session`] keeps the dataset and the current model together and enforces the
//! order of operations: a dataset must be loaded before identification, and a model must be
//! identified before tuning or simulation.
//!
//! ```rust
//! use fopdt_tune::error::FopdtError;
//! use fopdt_tune::identify::IdentificationMethod;
//! use fopdt_tune::session::Session;
//! use fopdt_tune::tuning::TuningMethod;
//!
//! let mut session = Session::default();
//! session
//!     .load_dataset(
//!         vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
//!         vec![1.0; 6],
//!         vec![0.0, 0.5, 0.8, 0.95, 0.98, 1.0],
//!     )
//!     .expect("Invalid dataset");
//!
//! assert_eq!(
//!     session.simulate_open_loop().map(|_| ()),
//!     Err(FopdtError::ModelNotIdentified)
//! );
//!
//! let preferred = session.compare_methods().unwrap().preferred().method;
//! session.identify(preferred).unwrap();
//!
//! let report = session.tune(TuningMethod::Imc, None).unwrap();
//! let closed = session
//!     .simulate_custom_pid(report.gains.kp, report.gains.ti, report.gains.td, report.setpoint)
//!     .unwrap();
//! assert_eq!(closed.time.len(), closed.response.len());
//! ```

/// Errors shared by every fallible operation
pub mod error;

/// Validated settings for simulations and reports
pub mod config;

/// The recorded step-response experiment
pub mod dataset;

/// FOPDT model parameters and their closed-form step response
pub mod model;

/// Graphical model identification
pub mod identify;

/// RMSE scoring and comparison of identification methods
pub mod evaluate;

/// PID tuning laws
pub mod tuning;

/// Polynomials in `s`
pub mod poly;

/// Rational transfer functions, Padé delay approximation and PID controller construction
pub mod transfer;

/// State-space simulation of transfer functions
pub mod sim;

/// Step-response characteristics
pub mod metrics;

/// Session state and simulation orchestration
pub mod session;

pub use error::FopdtError;
pub use identify::IdentificationMethod;
pub use model::ModelParameters;
pub use session::{Session, SharedSession};
pub use tuning::{PidGains, TuningMethod};
