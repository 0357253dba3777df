//! Shared telemetry state.
//!
//! The published scalars that the monitoring collaborator reads. Every
//! field is an independent lock-free cell with exactly one producing
//! worker:
//!
//! | Field                         | Producer                |
//! |-------------------------------|-------------------------|
//! | temperature, temperature_valid, actuator_engaged | temperature controller |
//! | distance, distance_measured, presence_detected   | ranging monitor        |
//! | cooling_duty, cooling_power   | cooling duty controller |
//! | synced                        | time sync gate          |
//!
//! `f32` values are stored as their bit pattern in an `AtomicU32`, so a
//! reader never observes a torn value. There is **no** cross-field
//! atomicity: a reader may see a temperature from cycle N next to a
//! cooling power from cycle N±1. Producers never block on readers.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Single-writer, multi-reader `f32` cell.
#[derive(Debug)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub const fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Acquire))
    }

    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Release);
    }
}

/// Field-wise copy of the telemetry cells, for logging.
///
/// Not a consistent snapshot; see the module docs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySnapshot {
    pub temperature_c: f32,
    pub temperature_valid: bool,
    pub actuator_engaged: bool,
    pub distance_cm: f32,
    pub distance_measured: bool,
    pub presence_detected: bool,
    pub cooling_duty: u32,
    pub cooling_power_percent: f32,
    pub synced: bool,
}

/// The process-lifetime telemetry aggregate.
///
/// `const`-constructible so it can live in a `static` and be shared with
/// the worker threads and the HTTP handler without reference counting.
#[derive(Debug)]
pub struct Telemetry {
    temperature_c: AtomicF32,
    temperature_valid: AtomicBool,
    actuator_engaged: AtomicBool,
    distance_cm: AtomicF32,
    distance_measured: AtomicBool,
    presence_detected: AtomicBool,
    cooling_duty: AtomicU32,
    cooling_power_percent: AtomicF32,
    synced: AtomicBool,
}

/// The firmware's single telemetry instance.
pub static TELEMETRY: Telemetry = Telemetry::new();

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry {
    pub const fn new() -> Self {
        Self {
            temperature_c: AtomicF32::new(0.0),
            temperature_valid: AtomicBool::new(false),
            actuator_engaged: AtomicBool::new(false),
            distance_cm: AtomicF32::new(0.0),
            distance_measured: AtomicBool::new(false),
            presence_detected: AtomicBool::new(false),
            cooling_duty: AtomicU32::new(0),
            cooling_power_percent: AtomicF32::new(0.0),
            synced: AtomicBool::new(false),
        }
    }

    // ── Temperature controller ────────────────────────────────

    /// Publish a valid reading. The Celsius value is only replaced on
    /// valid reads so readers keep seeing the last good temperature.
    pub fn publish_temperature(&self, celsius: f32) {
        self.temperature_c.store(celsius);
        self.temperature_valid.store(true, Ordering::Release);
    }

    /// Mark the latest reading as degraded; the last valid value stays.
    pub fn publish_temperature_invalid(&self) {
        self.temperature_valid.store(false, Ordering::Release);
    }

    pub fn publish_actuator(&self, engaged: bool) {
        self.actuator_engaged.store(engaged, Ordering::Release);
    }

    // ── Ranging monitor ───────────────────────────────────────

    pub fn publish_distance(&self, centimeters: f32, presence: bool) {
        self.distance_cm.store(centimeters);
        self.presence_detected.store(presence, Ordering::Release);
        self.distance_measured.store(true, Ordering::Release);
    }

    /// Measurement failed: only the `measured` flag changes.
    pub fn publish_distance_failed(&self) {
        self.distance_measured.store(false, Ordering::Release);
    }

    // ── Cooling duty controller ───────────────────────────────

    pub fn publish_cooling(&self, duty: u32, power_percent: f32) {
        self.cooling_duty.store(duty, Ordering::Release);
        self.cooling_power_percent.store(power_percent);
    }

    // ── Time sync gate ────────────────────────────────────────

    pub fn publish_synced(&self) {
        self.synced.store(true, Ordering::Release);
    }

    // ── Readers ───────────────────────────────────────────────

    pub fn temperature_c(&self) -> f32 {
        self.temperature_c.load()
    }

    pub fn temperature_valid(&self) -> bool {
        self.temperature_valid.load(Ordering::Acquire)
    }

    pub fn actuator_engaged(&self) -> bool {
        self.actuator_engaged.load(Ordering::Acquire)
    }

    pub fn distance_cm(&self) -> f32 {
        self.distance_cm.load()
    }

    pub fn distance_measured(&self) -> bool {
        self.distance_measured.load(Ordering::Acquire)
    }

    pub fn presence_detected(&self) -> bool {
        self.presence_detected.load(Ordering::Acquire)
    }

    pub fn cooling_duty(&self) -> u32 {
        self.cooling_duty.load(Ordering::Acquire)
    }

    pub fn cooling_power_percent(&self) -> f32 {
        self.cooling_power_percent.load()
    }

    pub fn synced(&self) -> bool {
        self.synced.load(Ordering::Acquire)
    }

    /// Read every field once, in declaration order.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            temperature_c: self.temperature_c(),
            temperature_valid: self.temperature_valid(),
            actuator_engaged: self.actuator_engaged(),
            distance_cm: self.distance_cm(),
            distance_measured: self.distance_measured(),
            presence_detected: self.presence_detected(),
            cooling_duty: self.cooling_duty(),
            cooling_power_percent: self.cooling_power_percent(),
            synced: self.synced(),
        }
    }
}
