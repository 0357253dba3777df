//! LM35 analog temperature sensor (10 mV / °C).
//!
//! The calibration adapter: one raw ADC sample is converted to millivolts
//! by the ADC calibration driver (curve fitting, line fitting, or the
//! linear host model) and then to degrees Celsius.
//!
//! If no calibration scheme is available the reading is reported as
//! [`SensorError::CalibrationUnavailable`]; the temperature controller
//! treats that as a degraded cycle and retries next period.

use crate::app::ports::{RawSampleSource, TemperatureProbe, VoltageCalibration};
use crate::error::SensorError;

/// LM35 transfer function: 10 mV per °C, 0 mV at 0 °C.
pub const MILLIVOLTS_PER_DEGREE: f32 = 10.0;

/// Calibrated LM35 probe over an ADC channel.
pub struct Lm35<S, C> {
    source: S,
    calibration: C,
}

impl<S: RawSampleSource, C: VoltageCalibration> Lm35<S, C> {
    pub fn new(source: S, calibration: C) -> Self {
        Self {
            source,
            calibration,
        }
    }

    pub fn calibrated(&self) -> bool {
        self.calibration.is_available()
    }
}

impl<S: RawSampleSource, C: VoltageCalibration> TemperatureProbe for Lm35<S, C> {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        let raw = self.source.read_raw()?;
        let millivolts = self.calibration.raw_to_millivolts(raw)?;
        Ok(millivolts as f32 / MILLIVOLTS_PER_DEGREE)
    }
}
