//! ADC1 oneshot channel and calibration drivers for the LM35.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH5 via the oneshot API and converts with the
//! eFuse calibration handle created by hw_init.
//! On host/test: reads from the simulation atomic in `hw_init::sim` and
//! converts with an ideal linear model.

use crate::app::ports::{RawSampleSource, VoltageCalibration};
use crate::drivers::hw_init::{self, CalibrationScheme};
use crate::error::SensorError;

/// One ADC1 channel in oneshot mode.
pub struct Adc1Channel {
    channel: u32,
}

impl Adc1Channel {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }
}

impl RawSampleSource for Adc1Channel {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        hw_init::adc1_read(self.channel)
    }
}

/// The calibration scheme chosen at boot, or none.
#[derive(Debug, Clone, Copy)]
pub struct AdcCalibration {
    scheme: Option<CalibrationScheme>,
}

impl AdcCalibration {
    pub fn new(scheme: Option<CalibrationScheme>) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> Option<CalibrationScheme> {
        self.scheme
    }
}

impl VoltageCalibration for AdcCalibration {
    fn is_available(&self) -> bool {
        self.scheme.is_some()
    }

    fn raw_to_millivolts(&self, raw: u16) -> Result<u32, SensorError> {
        if self.scheme.is_none() {
            return Err(SensorError::CalibrationUnavailable);
        }
        hw_init::adc1_raw_to_mv(raw)
    }
}
