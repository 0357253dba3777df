//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART in production). Transitions log at
//! `info`/`warn`; per-cycle samples at `debug` to keep the console quiet.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::ActuatorEngaged { celsius, threshold } => {
                info!("TEMP | {:.1}\u{00b0}C >= {:.1} -> actuator ON", celsius, threshold);
            }
            AppEvent::ActuatorReleased { celsius, threshold } => {
                info!("TEMP | {:.1}\u{00b0}C <= {:.1} -> actuator OFF", celsius, threshold);
            }
            AppEvent::TemperatureDegraded(e) => {
                warn!("TEMP | reading unavailable ({}), actuator held", e);
            }
            AppEvent::TemperatureRecovered { celsius } => {
                info!("TEMP | reading valid again: {:.1}\u{00b0}C", celsius);
            }
            AppEvent::TemperatureSampled { celsius, engaged } => {
                debug!(
                    "TEMP | {:.1}\u{00b0}C actuator={}",
                    celsius,
                    if *engaged { "ON" } else { "OFF" }
                );
            }
            AppEvent::PresenceDetected { distance_cm } => {
                info!("RANGE | presence detected at {:.1} cm", distance_cm);
            }
            AppEvent::PresenceCleared { distance_cm } => {
                info!("RANGE | presence cleared at {:.1} cm", distance_cm);
            }
            AppEvent::DistanceMeasured { distance_cm } => {
                debug!("RANGE | {:.1} cm", distance_cm);
            }
            AppEvent::RangingFailed(e) => {
                debug!("RANGE | measurement failed: {}", e);
            }
            AppEvent::CoolingUpdated {
                celsius,
                duty,
                power_percent,
            } => {
                info!(
                    "COOL | {:.1}\u{00b0}C -> duty {} ({:.1}%)",
                    celsius, duty, power_percent
                );
            }
            AppEvent::TimeSyncRequested => {
                info!("SYNC | clock not set, SNTP requested");
            }
            AppEvent::TimeSynced { year } => {
                info!("SYNC | time service initialized (year {})", year);
            }
            AppEvent::OutputFault { output, error } => {
                warn!("FAULT | {} output: {}", output, error);
            }
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | T={:.1}\u{00b0}C{} actuator={} | d={:.1}cm{} presence={} | \
                     fan={} ({:.1}%) | synced={}",
                    t.temperature_c,
                    if t.temperature_valid { "" } else { " (stale)" },
                    if t.actuator_engaged { "ON" } else { "OFF" },
                    t.distance_cm,
                    if t.distance_measured { "" } else { " (stale)" },
                    t.presence_detected,
                    t.cooling_duty,
                    t.cooling_power_percent,
                    t.synced,
                );
            }
        }
    }
}
