//! Workers running concurrently over one telemetry instance.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use thermoguard::adapters::monitor::MonitorApi;
use thermoguard::app::{CoolingDutyController, RangingMonitor, TemperatureController};
use thermoguard::config::SystemConfig;
use thermoguard::telemetry::Telemetry;

use super::mock_hw::*;

const CYCLES: usize = 2_000;

#[test]
fn concurrent_workers_publish_consistent_fields() {
    let telemetry = Telemetry::new();
    let config = SystemConfig::default();
    let done = AtomicBool::new(false);

    // Sweep across both thresholds so every field keeps changing.
    let temps: Vec<_> = (0..CYCLES).map(|i| Ok(20.0 + (i % 40) as f32)).collect();
    let dists: Vec<_> = (0..CYCLES).map(|i| Ok(10.0 + (i % 100) as f32)).collect();

    thread::scope(|s| {
        let (t, cfg) = (&telemetry, &config);
        let temperature = s.spawn(move || {
            let mut w = TemperatureController::new(cfg, ScriptedProbe::new(temps), MockPin::default(), t);
            let mut sink = RecordingSink::default();
            for _ in 0..CYCLES {
                w.cycle(&mut sink);
            }
        });
        let ranging = s.spawn(move || {
            let mut w = RangingMonitor::new(cfg, ScriptedRanger::new(dists), MockPin::default(), t);
            let mut sink = RecordingSink::default();
            for _ in 0..CYCLES {
                w.cycle(&mut sink);
            }
        });
        let cooling = s.spawn(move || {
            let mut w = CoolingDutyController::new(cfg, MockFan::default(), t);
            let mut sink = RecordingSink::default();
            for _ in 0..CYCLES {
                w.cycle(&mut sink);
            }
        });

        // Reader: every field it sees must be one a producer could publish.
        s.spawn(|| {
            let api = MonitorApi::new(&telemetry, MockClock::default(), 0);
            while !done.load(Ordering::Relaxed) {
                let pct = api.get_cooling_power_percent();
                assert!((0.0..=100.0).contains(&pct), "power {pct}");
                let temp = api.get_temperature();
                assert!(temp == 0.0 || (20.0..60.0).contains(&temp), "temperature {temp}");
                let dist = api.get_distance();
                assert!(dist == 0.0 || (9.9..110.1).contains(&dist), "distance {dist}");
                assert!(telemetry.cooling_duty() <= config.duty_max);
            }
        });

        temperature.join().unwrap();
        ranging.join().unwrap();
        cooling.join().unwrap();
        done.store(true, Ordering::Relaxed);
    });

    assert!(telemetry.temperature_valid());
    assert!(telemetry.distance_measured());
}
