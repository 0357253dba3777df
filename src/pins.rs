//! GPIO / peripheral pin assignments for the Thermoguard board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Digital outputs
// ---------------------------------------------------------------------------

/// Binary actuator (relay / LED) driven by the temperature hysteresis.
pub const ACTUATOR_GPIO: i32 = 2;
/// Presence indicator driven by the ranging monitor.
pub const PRESENCE_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// HC-SR04 ultrasonic ranger
// ---------------------------------------------------------------------------

/// Trigger output: 10 µs HIGH pulse starts a measurement.
pub const TRIGGER_GPIO: i32 = 5;
/// Echo input: HIGH for the round-trip time of flight.
pub const ECHO_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// LM35 temperature sensor (ADC1)
// ---------------------------------------------------------------------------

/// ADC1 channel 5 (GPIO 33 on ESP32).
pub const LM35_ADC1_CHANNEL: u32 = 5;

// ---------------------------------------------------------------------------
// Cooling fan PWM (LEDC)
// ---------------------------------------------------------------------------

pub const COOLING_PWM_GPIO: i32 = 32;
/// LEDC timer resolution (bits).  13-bit gives 0 – 8191 duty levels.
pub const COOLING_PWM_RESOLUTION_BITS: u32 = 13;
/// LEDC base frequency for the cooling fan.
pub const COOLING_PWM_FREQ_HZ: u32 = 500;
