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

use thiserror::Error;

/// Which family of method names an [`FopdtError::InvalidMethod`] was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// Graphical identification methods (`smith`, `sundaresan`)
    Identification,
    /// PID tuning laws (`imc`, `itae`)
    Tuning,
}

impl core::fmt::Display for MethodKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MethodKind::Identification => write!(f, "identification"),
            MethodKind::Tuning => write!(f, "tuning"),
        }
    }
}

/// Reasons a dataset is rejected on import.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Fewer than two samples; carries the sample count
    #[error("dataset has {0} samples, at least 2 are required")]
    TooFewSamples(usize),

    /// The three sequences differ in length
    #[error("sequence lengths differ: time={time}, input={input}, output={output}")]
    UnequalLengths {
        /// Length of the time sequence
        time: usize,
        /// Length of the input sequence
        input: usize,
        /// Length of the output sequence
        output: usize,
    },

    /// A NaN or infinite sample
    #[error("non-finite value {value} in `{sequence}` at index {index}")]
    NonFinite {
        /// `"time"`, `"input"` or `"output"`
        sequence: &'static str,
        /// Index of the first offending sample
        index: usize,
        /// The offending value
        value: f64,
    },

    /// Time stalls or runs backwards
    #[error("time is not strictly increasing at index {index} ({previous} -> {current})")]
    NonMonotonicTime {
        /// Index of the first sample not later than its predecessor
        index: usize,
        /// Time of the preceding sample
        previous: f64,
        /// Time of the offending sample
        current: f64,
    },
}

/// The error type shared by every fallible operation of the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FopdtError {
    /// The dataset was rejected on import
    #[error("invalid dataset: {0}")]
    Parse(#[from] ParseError),

    /// A method name that is not recognized
    #[error("unsupported {kind} method `{name}`")]
    InvalidMethod {
        /// Family of methods the name was looked up in
        kind: MethodKind,
        /// The name as given
        name: String,
    },

    /// The output never crosses one of the identification thresholds
    #[error("{method}: output never reaches {threshold} of its final value")]
    InsufficientData {
        /// Identification method that needed the crossing
        method: &'static str,
        /// Fraction of the final value that was never reached
        threshold: f64,
    },

    /// Tuning or simulation was requested before a successful identification
    #[error("no model has been identified yet")]
    ModelNotIdentified,

    /// Identification or scoring was requested before a dataset was loaded
    #[error("no dataset has been loaded yet")]
    DatasetNotLoaded,

    /// Measured and simulated trajectories differ in length
    #[error("length mismatch: measured has {measured} samples, simulated has {simulated}")]
    LengthMismatch {
        /// Length of the measured trajectory
        measured: usize,
        /// Length of the simulated trajectory
        simulated: usize,
    },

    /// An input or intermediate result outside the domain of the computation
    #[error("numerical error in {context}: {value}")]
    NumericalError {
        /// What was being computed or validated
        context: &'static str,
        /// The offending value
        value: f64,
    },
}

impl FopdtError {
    pub(crate) fn numerical(context: &'static str, value: f64) -> Self {
        FopdtError::NumericalError { context, value }
    }
}

/// Rejects non-finite intermediate results instead of letting NaN leak out.
pub(crate) fn ensure_finite(context: &'static str, value: f64) -> Result<f64, FopdtError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FopdtError::numerical(context, value))
    }
}

/// Errors reported when building or mutating a [`crate::config::SimulationConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// Padé order of zero or above the supported maximum
    #[error("Padé order must lie in 1..={max}")]
    InvalidPadeOrder {
        /// Highest accepted order
        max: usize,
    },

    /// Settling band outside `(0, 1)`
    #[error("settling band must lie strictly between 0 and 1")]
    InvalidSettlingBand,

    /// More rounding digits than supported
    #[error("rounding digits must lie in 0..={max}")]
    InvalidRoundingDigits {
        /// Highest accepted number of digits
        max: u32,
    },
}
