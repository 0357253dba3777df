//! Unified error types for the Thermoguard firmware.
//!
//! A single `Error` enum that every subsystem can convert into. All
//! variants are `Copy` so they can be returned from port calls inside the
//! periodic workers without allocation.
//!
//! None of these are fatal at runtime: the workers log them and retry on
//! their next natural cycle. Only boot-time initialisation aborts.

use core::fmt;

use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read or returned unusable data.
    Sensor(SensorError),
    /// An actuator command failed.
    Actuator(ActuatorError),
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// ADC oneshot read returned an error.
    AdcReadFailed,
    /// No ADC calibration scheme is available; raw counts cannot be
    /// converted to millivolts.
    CalibrationUnavailable,
    /// The ranging echo line never rose after the trigger pulse, or was
    /// still high from a previous measurement.
    PingTimeout,
    /// The echo pulse outlasted the time-of-flight for the maximum range.
    EchoTimeout,
    /// A trigger/echo GPIO access returned an error.
    GpioFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcReadFailed => write!(f, "ADC read failed"),
            Self::CalibrationUnavailable => write!(f, "ADC calibration unavailable"),
            Self::PingTimeout => write!(f, "ranging ping timeout"),
            Self::EchoTimeout => write!(f, "ranging echo timeout (out of range)"),
            Self::GpioFailed => write!(f, "GPIO access failed"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// PWM duty-cycle write failed.
    PwmWriteFailed,
    /// GPIO set failed.
    GpioWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
