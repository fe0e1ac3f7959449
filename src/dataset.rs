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

use crate::error::ParseError;

/// A recorded step-response experiment: elapsed time, the applied step input and the measured
/// process output, sample by sample.
///
/// A `Dataset` can only be obtained through [`Dataset::new`], which guarantees that
/// - all three sequences have the same length, at least 2;
/// - every value is finite;
/// - time is strictly increasing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Dataset {
    time: Vec<f64>,
    input: Vec<f64>,
    output: Vec<f64>,
}

/// Sample counts reported after a successful import
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DatasetSummary {
    /// Length of the time sequence
    pub time_samples: usize,
    /// Length of the input sequence
    pub input_samples: usize,
    /// Length of the output sequence
    pub output_samples: usize,
}

impl Dataset {
    /// Validates and takes ownership of the three sequences.
    pub fn new(time: Vec<f64>, input: Vec<f64>, output: Vec<f64>) -> Result<Self, ParseError> {
        if time.len() != input.len() || time.len() != output.len() {
            return Err(ParseError::UnequalLengths {
                time: time.len(),
                input: input.len(),
                output: output.len(),
            });
        }
        if time.len() < 2 {
            return Err(ParseError::TooFewSamples(time.len()));
        }

        for (sequence, values) in [("time", &time), ("input", &input), ("output", &output)] {
            if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite())
            {
                return Err(ParseError::NonFinite {
                    sequence,
                    index,
                    value,
                });
            }
        }

        if let Some(index) = (1..time.len()).find(|&i| time[i] <= time[i - 1]) {
            return Err(ParseError::NonMonotonicTime {
                index,
                previous: time[index - 1],
                current: time[index],
            });
        }

        Ok(Dataset {
            time,
            input,
            output,
        })
    }

    /// Elapsed time of each sample.
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Applied step input.
    pub fn input(&self) -> &[f64] {
        &self.input
    }

    /// Measured process output.
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    /// Number of samples; always at least 2.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Always `false`, a dataset holds at least two samples.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Mean of the input sequence, taken as the amplitude of the applied step.
    pub fn mean_input(&self) -> f64 {
        self.input.iter().sum::<f64>() / self.input.len() as f64
    }

    /// The output shifted so that its first sample is zero.
    pub fn zero_referenced_output(&self) -> Vec<f64> {
        let initial = self.output[0];
        self.output.iter().map(|y| y - initial).collect()
    }

    /// Sample counts of the three sequences.
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            time_samples: self.time.len(),
            input_samples: self.input.len(),
            output_samples: self.output.len(),
        }
    }
}
