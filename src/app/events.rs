//! Outbound application events.
//!
//! The periodic workers emit these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them; today they log to serial.

use crate::error::{ActuatorError, SensorError};
use crate::telemetry::TelemetrySnapshot;

/// Structured events emitted by the workers.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Temperature crossed the on-threshold; actuator engaged.
    ActuatorEngaged { celsius: f32, threshold: f32 },
    /// Temperature crossed the off-threshold; actuator released.
    ActuatorReleased { celsius: f32, threshold: f32 },
    /// Temperature sample could not be taken; actuator held.
    TemperatureDegraded(SensorError),
    /// First valid temperature after one or more degraded cycles.
    TemperatureRecovered { celsius: f32 },
    /// Per-cycle temperature reading (valid only).
    TemperatureSampled { celsius: f32, engaged: bool },

    /// Something entered the presence zone.
    PresenceDetected { distance_cm: f32 },
    /// The presence zone is clear again.
    PresenceCleared { distance_cm: f32 },
    /// Per-cycle distance reading.
    DistanceMeasured { distance_cm: f32 },
    /// Ranging measurement failed; distance and presence held.
    RangingFailed(SensorError),

    /// Cooling fan duty recomputed.
    CoolingUpdated { celsius: f32, duty: u32, power_percent: f32 },

    /// Wall clock implausible; SNTP requested.
    TimeSyncRequested,
    /// Wall clock became plausible.
    TimeSynced { year: i32 },

    /// An output write failed; the worker carries on.
    OutputFault { output: &'static str, error: ActuatorError },

    /// Periodic field-wise telemetry dump.
    Telemetry(TelemetrySnapshot),
}
