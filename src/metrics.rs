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

//! Step-response characteristics of simulated loops.

/// Characteristics of a response that starts at rest and settles towards its last sample.
///
/// Fields are `None` when the response does not provide enough information, e.g. a response
/// that never moves has no rise time.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StepInfo {
    /// Time between reaching 10% and 90% of the final value
    pub rise_time: Option<f64>,
    /// Largest excursion in the direction of the final value
    pub peak: Option<f64>,
    /// Time at which the peak occurs
    pub peak_time: Option<f64>,
    /// Excursion beyond the final value, in percent of the final value
    pub overshoot_pct: Option<f64>,
    /// Time after which the response stays within the settling band
    pub settling_time: Option<f64>,
    /// Last sample of the response
    pub final_value: f64,
    /// `reference - final_value`, if a reference was supplied
    pub steady_state_error: Option<f64>,
}

fn first_crossing(time: &[f64], normalized: &[f64], level: f64) -> Option<f64> {
    normalized
        .iter()
        .position(|&y| y >= level)
        .map(|i| time[i])
}

/// Computes [`StepInfo`] for `response` sampled on `time`.
///
/// `settling_band` is relative to the final value (0.02 for ±2%). `reference` is the commanded
/// value, used for the steady-state error only.
pub fn step_info(
    time: &[f64],
    response: &[f64],
    settling_band: f64,
    reference: Option<f64>,
) -> StepInfo {
    let Some(&final_value) = response.last() else {
        return StepInfo::default();
    };
    let steady_state_error = reference.map(|r| r - final_value);

    if final_value == 0.0 || time.len() != response.len() {
        return StepInfo {
            final_value,
            steady_state_error,
            ..StepInfo::default()
        };
    }

    // Normalized to a rising unit response regardless of sign
    let normalized: Vec<f64> = response.iter().map(|y| y / final_value).collect();

    let rise_time = match (
        first_crossing(time, &normalized, 0.1),
        first_crossing(time, &normalized, 0.9),
    ) {
        (Some(t10), Some(t90)) => Some(t90 - t10),
        _ => None,
    };

    let (peak_index, peak_normalized) = normalized
        .iter()
        .copied()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (i, y)| {
            if y > best.1 {
                (i, y)
            } else {
                best
            }
        });

    let settling_time = normalized
        .iter()
        .rposition(|y| (y - 1.0).abs() > settling_band)
        .map_or(Some(time[0]), |i| time.get(i + 1).copied());

    StepInfo {
        rise_time,
        peak: Some(response[peak_index]),
        peak_time: Some(time[peak_index]),
        overshoot_pct: Some((100.0 * (peak_normalized - 1.0)).max(0.0)),
        settling_time,
        final_value,
        steady_state_error,
    }
}
