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

use crate::error::ConfigError;

/// Highest Padé order accepted, for configured and per-request simulations alike.
pub const MAX_PADE_ORDER: usize = 20;

/// Highest number of decimal digits kept in reported figures.
pub const MAX_ROUNDING_DIGITS: u32 = 12;

/// Settings shared by the simulations and reports of a [`crate::session::Session`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    /// Order of the Padé approximation of the dead time.
    /// Defaults to 1.
    pade_order: usize,

    /// Relative band around the final value used to compute settling time.
    /// Defaults to 0.02, i.e. ±2%.
    settling_band: f64,

    /// Decimal digits kept in reported RMSE values and PID gains.
    /// Defaults to 4.
    rounding_digits: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            pade_order: 1,
            settling_band: 0.02,
            rounding_digits: 4,
        }
    }
}

impl SimulationConfig {
    /// Returns the Padé order used for the dead time.
    pub fn pade_order(&self) -> usize {
        self.pade_order
    }

    /// Returns the relative settling band.
    pub fn settling_band(&self) -> f64 {
        self.settling_band
    }

    /// Returns the number of decimal digits kept in reported figures.
    pub fn rounding_digits(&self) -> u32 {
        self.rounding_digits
    }

    /// Sets the Padé order.
    ///
    /// # Returns
    /// - `Ok(())` if the order lies in `1..=MAX_PADE_ORDER`.
    /// - `Err(ConfigError::InvalidPadeOrder)` otherwise; the order is left unchanged.
    pub fn set_pade_order(&mut self, pade_order: usize) -> Result<(), ConfigError> {
        if pade_order == 0 || pade_order > MAX_PADE_ORDER {
            return Err(ConfigError::InvalidPadeOrder {
                max: MAX_PADE_ORDER,
            });
        }
        self.pade_order = pade_order;
        Ok(())
    }

    /// Sets the relative settling band.
    ///
    /// # Returns
    /// - `Ok(())` if the band lies strictly between 0 and 1.
    /// - `Err(ConfigError::InvalidSettlingBand)` otherwise, including NaN.
    pub fn set_settling_band(&mut self, settling_band: f64) -> Result<(), ConfigError> {
        if !(settling_band > 0.0 && settling_band < 1.0) {
            return Err(ConfigError::InvalidSettlingBand);
        }
        self.settling_band = settling_band;
        Ok(())
    }

    /// Sets the number of decimal digits kept in reported figures.
    pub fn set_rounding_digits(&mut self, rounding_digits: u32) -> Result<(), ConfigError> {
        if rounding_digits > MAX_ROUNDING_DIGITS {
            return Err(ConfigError::InvalidRoundingDigits {
                max: MAX_ROUNDING_DIGITS,
            });
        }
        self.rounding_digits = rounding_digits;
        Ok(())
    }

    /// Rounds `value` to the configured number of decimal digits.
    pub fn round(&self, value: f64) -> f64 {
        round_to(value, self.rounding_digits)
    }
}

/// Rounds half away from zero to `digits` decimal places.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (value * scale).round() / scale
}

/// Builder for [`SimulationConfig`]. Every setting is validated once, in [`Self::build`].
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    pade_order: Option<usize>,
    settling_band: Option<f64>,
    rounding_digits: Option<u32>,
}

impl SimulationConfigBuilder {
    /// Sets the Padé order.
    pub fn pade_order(mut self, pade_order: usize) -> Self {
        self.pade_order = Some(pade_order);
        self
    }

    /// Sets the relative settling band.
    pub fn settling_band(mut self, settling_band: f64) -> Self {
        self.settling_band = Some(settling_band);
        self
    }

    /// Sets the number of decimal digits kept in reported figures.
    pub fn rounding_digits(mut self, rounding_digits: u32) -> Self {
        self.rounding_digits = Some(rounding_digits);
        self
    }

    /// Validates the collected settings, falling back to defaults for unset ones.
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let mut config = SimulationConfig::default();
        if let Some(pade_order) = self.pade_order {
            config.set_pade_order(pade_order)?;
        }
        if let Some(settling_band) = self.settling_band {
            config.set_settling_band(settling_band)?;
        }
        if let Some(rounding_digits) = self.rounding_digits {
            config.set_rounding_digits(rounding_digits)?;
        }
        Ok(config)
    }
}
