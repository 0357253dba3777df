//! Workers over the real driver stack, backed by the host simulation
//! (`hw_init::sim`, simulated wall clock).

#![cfg(not(target_os = "espidf"))]

use embedded_hal::delay::DelayNs;

use thermoguard::adapters::sntp::{SntpAdapter, DEFAULT_POSIX_TZ};
use thermoguard::adapters::time::{self, Esp32TimeAdapter};
use thermoguard::app::events::AppEvent;
use thermoguard::app::{RangingMonitor, SyncState, TemperatureController, TimeSyncGate};
use thermoguard::config::SystemConfig;
use thermoguard::drivers::adc::{Adc1Channel, AdcCalibration};
use thermoguard::drivers::gpio::{GpioInput, GpioOutput};
use thermoguard::drivers::hw_init::{self, CalibrationScheme};
use thermoguard::error::SensorError;
use thermoguard::pins;
use thermoguard::sensors::{Hcsr04, Lm35};
use thermoguard::telemetry::Telemetry;

use super::mock_hw::*;

struct NoDelay;
impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

#[test]
fn lm35_over_sim_adc_drives_actuator_pin() {
    let telemetry = Telemetry::new();
    // 1241 counts ≈ 1000 mV ≈ 100 °C with the linear host model.
    hw_init::sim::set_adc_raw(1241);
    let probe = Lm35::new(
        Adc1Channel::new(pins::LM35_ADC1_CHANNEL),
        AdcCalibration::new(Some(CalibrationScheme::Linear)),
    );
    let mut worker = TemperatureController::new(
        &SystemConfig::default(),
        probe,
        GpioOutput::new(pins::ACTUATOR_GPIO),
        &telemetry,
    );
    let mut sink = RecordingSink::default();
    worker.cycle(&mut sink);

    assert!(telemetry.temperature_valid());
    assert!((telemetry.temperature_c() - 100.0).abs() < 0.5);
    assert!(hw_init::sim::gpio_level(pins::ACTUATOR_GPIO));
}

#[test]
fn missing_calibration_is_degraded_not_fatal() {
    let telemetry = Telemetry::new();
    let probe = Lm35::new(
        Adc1Channel::new(pins::LM35_ADC1_CHANNEL),
        AdcCalibration::new(None),
    );
    let mut worker =
        TemperatureController::new(&SystemConfig::default(), probe, MockPin::default(), &telemetry);
    let mut sink = RecordingSink::default();
    for _ in 0..3 {
        worker.cycle(&mut sink);
    }
    assert!(!telemetry.temperature_valid());
    assert!(!worker.engaged());
}

#[test]
fn silent_echo_line_times_out() {
    let telemetry = Telemetry::new();
    // Echo pin is never driven high in this binary.
    let ranger = Hcsr04::new(
        GpioOutput::new(pins::TRIGGER_GPIO),
        GpioInput::new(pins::ECHO_GPIO),
        NoDelay,
        Esp32TimeAdapter::new(),
    );
    let presence = MockPin::default();
    let mut worker = RangingMonitor::new(&SystemConfig::default(), ranger, presence.clone(), &telemetry);
    let mut sink = RecordingSink::default();
    worker.cycle(&mut sink);

    assert!(!telemetry.distance_measured());
    assert!(!telemetry.presence_detected());
    assert_eq!(presence.history(), vec![false]);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::RangingFailed(SensorError::PingTimeout))), 1);
    // Trigger left low after the pulse.
    assert!(!hw_init::sim::gpio_level(pins::TRIGGER_GPIO));
}

#[test]
fn sync_gate_over_sim_clock() {
    let telemetry = Telemetry::new();
    let notifier = MockNotifier::default();
    let mut gate = TimeSyncGate::new(
        &SystemConfig::default(),
        DEFAULT_POSIX_TZ,
        Esp32TimeAdapter::new(),
        SntpAdapter::new(),
        notifier.clone(),
        &telemetry,
    );
    let mut sink = RecordingSink::default();

    time::sim_set_wall_clock(0);
    gate.cycle(&mut sink);
    assert_eq!(gate.state(), SyncState::Unsynced);

    // 2024-03-05 15:04:05 UTC
    time::sim_set_wall_clock(1_709_651_045);
    gate.cycle(&mut sink);
    assert_eq!(gate.state(), SyncState::Synced);
    assert_eq!(gate.format_timestamp().as_str(), "05/03/2024 12:04:05");
    assert_eq!(notifier.messages.lock().unwrap().len(), 1);
}
