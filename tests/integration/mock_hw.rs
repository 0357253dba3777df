//! Mock hardware adapters for integration tests.
//!
//! Each mock records every write behind an `Arc<Mutex<_>>` handle so a
//! test can keep a clone and assert on the full history after the
//! worker has taken ownership of the mock (and so the mocks are `Send`
//! for the threaded tests).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use thermoguard::app::events::AppEvent;
use thermoguard::app::ports::{
    BinaryOutput, DutyOutput, EventSink, MonitorMessage, MonitorNotifier, RangeFinder,
    TemperatureProbe, TimeSyncService, WallClock,
};
use thermoguard::error::{ActuatorError, SensorError};
use thermoguard::sensors::ultrasonic::SPEED_OF_SOUND_CM_PER_US;

// ── Sensors ───────────────────────────────────────────────────

/// Replays a script of readings, then keeps failing.
pub struct ScriptedProbe {
    script: VecDeque<Result<f32, SensorError>>,
}

impl ScriptedProbe {
    pub fn new(script: impl IntoIterator<Item = Result<f32, SensorError>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl TemperatureProbe for ScriptedProbe {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        self.script.pop_front().unwrap_or(Err(SensorError::AdcReadFailed))
    }
}

/// Replays distances (cm) as echo round-trip times.
pub struct ScriptedRanger {
    script: VecDeque<Result<f32, SensorError>>,
}

impl ScriptedRanger {
    pub fn new(script: impl IntoIterator<Item = Result<f32, SensorError>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl RangeFinder for ScriptedRanger {
    fn measure_round_trip_us(&mut self, _max_round_trip_us: u32) -> Result<u32, SensorError> {
        self.script
            .pop_front()
            .unwrap_or(Err(SensorError::PingTimeout))
            .map(|cm| (cm * 2.0 / SPEED_OF_SOUND_CM_PER_US).round() as u32)
    }
}

// ── Outputs ───────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockPin {
    pub writes: Arc<Mutex<Vec<bool>>>,
}

#[allow(dead_code)]
impl MockPin {
    pub fn history(&self) -> Vec<bool> {
        self.writes.lock().unwrap().clone()
    }

    pub fn level(&self) -> Option<bool> {
        self.writes.lock().unwrap().last().copied()
    }
}

impl BinaryOutput for MockPin {
    fn set_level(&mut self, high: bool) -> Result<(), ActuatorError> {
        self.writes.lock().unwrap().push(high);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockFan {
    pub duties: Arc<Mutex<Vec<u32>>>,
}

#[allow(dead_code)]
impl MockFan {
    pub fn last(&self) -> Option<u32> {
        self.duties.lock().unwrap().last().copied()
    }
}

impl DutyOutput for MockFan {
    fn set_duty(&mut self, duty: u32) -> Result<(), ActuatorError> {
        self.duties.lock().unwrap().push(duty);
        Ok(())
    }
}

// ── Time ──────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockClock {
    pub unix: Arc<Mutex<i64>>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn set(&self, unix: i64) {
        *self.unix.lock().unwrap() = unix;
    }
}

impl WallClock for MockClock {
    fn now_unix(&self) -> i64 {
        *self.unix.lock().unwrap()
    }
}

#[derive(Clone, Default)]
pub struct MockSntp {
    pub requests: Arc<Mutex<u32>>,
    pub timezone: Arc<Mutex<Option<String>>>,
}

impl TimeSyncService for MockSntp {
    fn request_sync(&mut self) {
        *self.requests.lock().unwrap() += 1;
    }

    fn set_timezone(&mut self, posix_tz: &str) {
        *self.timezone.lock().unwrap() = Some(posix_tz.to_owned());
    }
}

#[derive(Clone, Default)]
pub struct MockNotifier {
    pub messages: Arc<Mutex<Vec<MonitorMessage>>>,
}

impl MonitorNotifier for MockNotifier {
    fn notify(&mut self, message: MonitorMessage) {
        self.messages.lock().unwrap().push(message);
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
