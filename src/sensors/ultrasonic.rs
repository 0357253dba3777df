//! HC-SR04 ultrasonic ranger.
//!
//! Protocol: a 10 µs HIGH pulse on TRIG starts a burst; ECHO then goes
//! HIGH for the round-trip time of flight.  Both waits are bounded:
//!
//! * echo must rise within [`PING_TIMEOUT_US`] of the trigger, and must
//!   not already be HIGH from a previous burst ([`SensorError::PingTimeout`]);
//! * echo must fall within the round-trip time of the maximum range
//!   ([`SensorError::EchoTimeout`]).
//!
//! Generic over `embedded-hal` 1.0 pins and delay so the same driver runs
//! on `esp-idf-hal` `PinDriver`s and on host mocks.  Timing is busy-wait
//! against a microsecond clock; the longest possible wait is
//! `PING_TIMEOUT_US + max_round_trip_us`.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::RangeFinder;
use crate::error::SensorError;

/// Maximum wait for the echo line to rise after triggering.
pub const PING_TIMEOUT_US: u64 = 6000;

/// Speed of sound at ~20 °C, in cm/µs.
pub const SPEED_OF_SOUND_CM_PER_US: f32 = 0.0343;

/// Monotonic microsecond counter used for echo timing.
pub trait MicrosClock {
    fn now_us(&self) -> u64;
}

/// Round-trip time (µs) → one-way distance (cm).
pub fn round_trip_us_to_cm(round_trip_us: u32) -> f32 {
    round_trip_us as f32 * SPEED_OF_SOUND_CM_PER_US / 2.0
}

/// Longest round trip (µs) that still corresponds to `max_distance_cm`.
pub fn max_round_trip_us(max_distance_cm: f32) -> u32 {
    (max_distance_cm * 2.0 / SPEED_OF_SOUND_CM_PER_US) as u32
}

/// HC-SR04 driver.
pub struct Hcsr04<T, E, D, C> {
    trigger: T,
    echo: E,
    delay: D,
    clock: C,
}

impl<T, E, D, C> Hcsr04<T, E, D, C>
where
    T: OutputPin,
    E: InputPin,
    D: DelayNs,
    C: MicrosClock,
{
    pub fn new(mut trigger: T, echo: E, delay: D, clock: C) -> Self {
        // Idle low; a failure here surfaces on the first measurement.
        let _ = trigger.set_low();
        Self {
            trigger,
            echo,
            delay,
            clock,
        }
    }

    fn echo_high(&mut self) -> Result<bool, SensorError> {
        self.echo.is_high().map_err(|_| SensorError::GpioFailed)
    }

    fn pulse_trigger(&mut self) -> Result<(), SensorError> {
        self.trigger.set_low().map_err(|_| SensorError::GpioFailed)?;
        self.delay.delay_us(4);
        self.trigger.set_high().map_err(|_| SensorError::GpioFailed)?;
        self.delay.delay_us(10);
        self.trigger.set_low().map_err(|_| SensorError::GpioFailed)
    }
}

impl<T, E, D, C> RangeFinder for Hcsr04<T, E, D, C>
where
    T: OutputPin,
    E: InputPin,
    D: DelayNs,
    C: MicrosClock,
{
    fn measure_round_trip_us(&mut self, max_round_trip_us: u32) -> Result<u32, SensorError> {
        // Previous echo still in flight.
        if self.echo_high()? {
            return Err(SensorError::PingTimeout);
        }

        self.pulse_trigger()?;

        let ping_start = self.clock.now_us();
        while !self.echo_high()? {
            if self.clock.now_us().saturating_sub(ping_start) >= PING_TIMEOUT_US {
                return Err(SensorError::PingTimeout);
            }
        }

        let echo_start = self.clock.now_us();
        loop {
            let elapsed = self.clock.now_us().saturating_sub(echo_start);
            if !self.echo_high()? {
                return Ok(elapsed as u32);
            }
            if elapsed >= u64::from(max_round_trip_us) {
                return Err(SensorError::EchoTimeout);
            }
        }
    }
}
