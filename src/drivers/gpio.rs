//! Raw GPIO pin wrappers.
//!
//! `GpioOutput` drives the actuator and presence-indicator pins through
//! the [`BinaryOutput`] port, and the HC-SR04 trigger through
//! `embedded-hal`'s `OutputPin`. `GpioInput` reads the echo line.
//! Pins are configured once by `hw_init`; these types only touch the
//! level registers.

use embedded_hal::digital::{self, ErrorKind, ErrorType, InputPin, OutputPin};

use crate::app::ports::BinaryOutput;
use crate::drivers::hw_init;
use crate::error::ActuatorError;

/// GPIO level write rejected by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioError;

impl digital::Error for GpioError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// A push-pull output configured by `hw_init`.
pub struct GpioOutput {
    pin: i32,
    level: bool,
}

impl GpioOutput {
    pub fn new(pin: i32) -> Self {
        Self { pin, level: false }
    }

    /// Last level successfully written.
    pub fn level(&self) -> bool {
        self.level
    }

    fn write(&mut self, high: bool) -> Result<(), ActuatorError> {
        hw_init::gpio_write(self.pin, high)?;
        self.level = high;
        Ok(())
    }
}

impl BinaryOutput for GpioOutput {
    fn set_level(&mut self, high: bool) -> Result<(), ActuatorError> {
        self.write(high)
    }
}

impl ErrorType for GpioOutput {
    type Error = GpioError;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), GpioError> {
        self.write(false).map_err(|_| GpioError)
    }

    fn set_high(&mut self) -> Result<(), GpioError> {
        self.write(true).map_err(|_| GpioError)
    }
}

/// A floating input configured by `hw_init`.
pub struct GpioInput {
    pin: i32,
}

impl GpioInput {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }
}

impl ErrorType for GpioInput {
    type Error = GpioError;
}

impl InputPin for GpioInput {
    fn is_high(&mut self) -> Result<bool, GpioError> {
        Ok(hw_init::gpio_read(self.pin))
    }

    fn is_low(&mut self) -> Result<bool, GpioError> {
        Ok(!hw_init::gpio_read(self.pin))
    }
}
