//! Port traits: the hexagonal boundary between the control workers and
//! the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Worker (domain)
//! ```
//!
//! Driven adapters (ADC, GPIO, LEDC, ultrasonic ranger, wall clock, SNTP,
//! monitor channel) implement these traits.  The workers consume them via
//! generics, so the control logic never touches hardware directly and
//! every worker can be exercised on the host with mocks.
//!
//! Every port call is bounded in time: the hardware adapters carry their
//! own timeouts, so no worker can block indefinitely inside a port.

use crate::error::{ActuatorError, SensorError};

// ───────────────────────────────────────────────────────────────
// Temperature acquisition (driven adapter: ADC → domain)
// ───────────────────────────────────────────────────────────────

/// One raw ADC acquisition, in device-specific counts.
pub trait RawSampleSource {
    fn read_raw(&mut self) -> Result<u16, SensorError>;
}

/// Counts → millivolts transform supplied by the ADC calibration driver.
pub trait VoltageCalibration {
    /// Whether a calibration scheme is available at all.
    fn is_available(&self) -> bool;

    /// Convert raw counts to millivolts.
    ///
    /// Returns [`SensorError::CalibrationUnavailable`] when
    /// [`is_available`](Self::is_available) is false.
    fn raw_to_millivolts(&self, raw: u16) -> Result<u32, SensorError>;
}

/// A calibrated temperature probe (the Calibration Adapter).
pub trait TemperatureProbe {
    /// Acquire one sample and convert it to degrees Celsius.
    fn read_celsius(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Ranging (driven adapter: ultrasonic ranger → domain)
// ───────────────────────────────────────────────────────────────

/// Bounded time-of-flight measurement.
pub trait RangeFinder {
    /// Trigger one measurement and return the echo round-trip time in
    /// microseconds.  Must give up after `max_round_trip_us`.
    fn measure_round_trip_us(&mut self, max_round_trip_us: u32) -> Result<u32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator outputs (driven adapter: domain → GPIO / LEDC)
// ───────────────────────────────────────────────────────────────

/// A single digital output pin.
pub trait BinaryOutput {
    fn set_level(&mut self, high: bool) -> Result<(), ActuatorError>;
}

/// A PWM duty register.
pub trait DutyOutput {
    /// Write the duty (0 ..= full scale of the channel).
    fn set_duty(&mut self, duty: u32) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Time (driven adapter: RTC / SNTP → domain)
// ───────────────────────────────────────────────────────────────

/// Wall-clock source.
pub trait WallClock {
    /// Seconds since the Unix epoch, UTC.  Before SNTP has synced this is
    /// whatever the RTC booted with (typically 1970).
    fn now_unix(&self) -> i64;
}

/// External time-synchronisation service.
pub trait TimeSyncService {
    /// Start the SNTP client.  Called at most once per process.
    fn request_sync(&mut self);

    /// Apply the local timezone (POSIX `TZ` string) to the platform.
    fn set_timezone(&mut self, posix_tz: &str);
}

// ───────────────────────────────────────────────────────────────
// Monitor notification (driven adapter: domain → HTTP monitor)
// ───────────────────────────────────────────────────────────────

/// Messages pushed to the monitoring collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorMessage {
    /// Wall-clock time is now valid; timestamps can be served.
    TimeServiceInitialized,
}

/// Fire-and-forget notification to the monitoring collaborator.
pub trait MonitorNotifier {
    fn notify(&mut self, message: MonitorMessage);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The workers emit structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log today).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
