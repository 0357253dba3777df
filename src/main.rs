//! Thermoguard firmware entry point.
//!
//! Four periodic workers pinned to the APP core, sharing only the
//! lock-free telemetry cells.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  Lm35/Adc1Channel  Hcsr04/GpioInput  GpioOutput  CoolingFan    │
//! │  Esp32TimeAdapter  SntpAdapter  ChannelNotifier  LogEventSink  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  temperature (1 s)  ranging (0.5 s)  cooling (1 s)  sync (10 s)│
//! │         └──────────────┬──────────────────┘                    │
//! │                   TELEMETRY (atomics) ──▶ MonitorApi           │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use log::info;

use thermoguard::adapters::log_sink::LogEventSink;
use thermoguard::adapters::monitor::{self, ChannelNotifier, MonitorApi};
use thermoguard::adapters::sntp::{SntpAdapter, DEFAULT_POSIX_TZ};
use thermoguard::adapters::time::Esp32TimeAdapter;
use thermoguard::app::events::AppEvent;
use thermoguard::app::ports::EventSink;
use thermoguard::app::{CoolingDutyController, RangingMonitor, TemperatureController, TimeSyncGate};
use thermoguard::config::{
    SystemConfig, COOLING_TASK, RANGING_TASK, TEMPERATURE_TASK, TIME_SYNC_TASK,
};
use thermoguard::drivers::adc::{Adc1Channel, AdcCalibration};
use thermoguard::drivers::cooling_fan::CoolingFan;
use thermoguard::drivers::gpio::{GpioInput, GpioOutput};
use thermoguard::drivers::hw_init;
use thermoguard::drivers::task_pin::spawn_on_core;
use thermoguard::pins;
use thermoguard::scheduler::run_periodic;
use thermoguard::sensors::{Hcsr04, Lm35};
use thermoguard::telemetry::TELEMETRY;

fn period(ms: u32) -> Duration {
    Duration::from_millis(u64::from(ms))
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Thermoguard v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config ─────────────────────────────────────────────
    let config = SystemConfig::default();
    config.validate()?;

    // ── 3. Peripherals ────────────────────────────────────────
    // Init failure is the only fatal condition; everything after this
    // point degrades and retries.
    let scheme = hw_init::init_peripherals()?;

    // ── 4. Workers ────────────────────────────────────────────
    let cfg = config.clone();
    spawn_on_core(&TEMPERATURE_TASK, move || {
        let probe = Lm35::new(
            Adc1Channel::new(pins::LM35_ADC1_CHANNEL),
            AdcCalibration::new(scheme),
        );
        let actuator = GpioOutput::new(pins::ACTUATOR_GPIO);
        let mut worker = TemperatureController::new(&cfg, probe, actuator, &TELEMETRY);
        let mut sink = LogEventSink::new();
        run_periodic("temperature", period(cfg.temperature_period_ms), || {
            worker.cycle(&mut sink)
        })
    })?;

    let cfg = config.clone();
    spawn_on_core(&RANGING_TASK, move || {
        let ranger = Hcsr04::new(
            GpioOutput::new(pins::TRIGGER_GPIO),
            GpioInput::new(pins::ECHO_GPIO),
            esp_idf_hal::delay::Ets,
            Esp32TimeAdapter::new(),
        );
        let indicator = GpioOutput::new(pins::PRESENCE_GPIO);
        let mut worker = RangingMonitor::new(&cfg, ranger, indicator, &TELEMETRY);
        let mut sink = LogEventSink::new();
        run_periodic("ranging", period(cfg.ranging_period_ms), || {
            worker.cycle(&mut sink)
        })
    })?;

    let cfg = config.clone();
    spawn_on_core(&COOLING_TASK, move || {
        let mut worker = CoolingDutyController::new(&cfg, CoolingFan::new(), &TELEMETRY);
        let mut sink = LogEventSink::new();
        run_periodic("cooling", period(cfg.cooling_period_ms), || {
            worker.cycle(&mut sink)
        })
    })?;

    let cfg = config.clone();
    spawn_on_core(&TIME_SYNC_TASK, move || {
        let mut worker = TimeSyncGate::new(
            &cfg,
            DEFAULT_POSIX_TZ,
            Esp32TimeAdapter::new(),
            SntpAdapter::new(),
            ChannelNotifier,
            &TELEMETRY,
        );
        let mut sink = LogEventSink::new();
        run_periodic("time-sync", period(cfg.time_sync_period_ms), || {
            worker.cycle(&mut sink)
        })
    })?;

    info!("System ready. Workers running.");

    // ── 5. Console monitor ────────────────────────────────────
    // Stands in for the HTTP monitor: drains notifications and logs a
    // telemetry line every `telemetry_interval_secs`.
    let api = MonitorApi::new(&TELEMETRY, Esp32TimeAdapter::new(), config.utc_offset_secs);
    let mut log_sink = LogEventSink::new();
    loop {
        std::thread::sleep(Duration::from_secs(u64::from(config.telemetry_interval_secs)));
        while let Some(msg) = monitor::poll_message() {
            info!("MONITOR | {:?}", msg);
        }
        log_sink.emit(&AppEvent::Telemetry(TELEMETRY.snapshot()));
        info!("MONITOR | {}", api.get_time_string());
    }
}
