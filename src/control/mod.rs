//! Pure control laws. No I/O or logging.
//!
//! The periodic workers feed measurements into these and drive outputs
//! from the result, which keeps the laws testable on the host.

pub mod duty;
pub mod hysteresis;
