//! Sensor drivers.
//!
//! Both are generic over the hardware seam (ADC port traits for the
//! LM35, `embedded-hal` pins for the HC-SR04) so they run unchanged on
//! the board and against host mocks.

pub mod lm35;
pub mod ultrasonic;

pub use lm35::Lm35;
pub use ultrasonic::{Hcsr04, MicrosClock};
