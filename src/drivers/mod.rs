//! Peripheral drivers, hardware initialisation, and task placement.

pub mod adc;
pub mod cooling_fan;
pub mod gpio;
pub mod hw_init;
pub mod task_pin;
