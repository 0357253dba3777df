//! Cooling fan driver (LEDC channel 0, 13-bit, 500 Hz).
//!
//! A dumb actuator: the cooling duty controller decides the duty, this
//! driver clamps it to the channel's full scale and writes the register.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the LEDC duty via hw_init helpers.
//! On host/test: hw_init records the duty in a simulation atomic.

use crate::app::ports::DutyOutput;
use crate::drivers::hw_init;
use crate::error::ActuatorError;
use crate::pins;

/// Full-scale duty for the configured LEDC resolution.
pub const FULL_SCALE_DUTY: u32 = (1 << pins::COOLING_PWM_RESOLUTION_BITS) - 1;

pub struct CoolingFan {
    duty: u32,
}

impl Default for CoolingFan {
    fn default() -> Self {
        Self::new()
    }
}

impl CoolingFan {
    pub fn new() -> Self {
        Self { duty: 0 }
    }

    pub fn current_duty(&self) -> u32 {
        self.duty
    }

    pub fn is_running(&self) -> bool {
        self.duty > 0
    }
}

impl DutyOutput for CoolingFan {
    fn set_duty(&mut self, duty: u32) -> Result<(), ActuatorError> {
        let duty = duty.min(FULL_SCALE_DUTY);
        hw_init::ledc_set_duty(hw_init::LEDC_CH_COOLING, duty)?;
        self.duty = duty;
        Ok(())
    }
}
