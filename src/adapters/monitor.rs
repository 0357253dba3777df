//! Monitor adapter: the read side exposed to the HTTP monitoring task.
//!
//! [`MonitorApi`] answers the monitor's synchronous getters straight from
//! the telemetry cells. One-shot notifications (time service ready) go
//! through [`MONITOR_CHANNEL`], a bounded `embassy-sync` channel the
//! monitor drains at its own pace.
//!
//! ```text
//! ┌────────────────┐ MonitorMessage ┌──────────────┐
//! │ time-sync gate │───────────────▶│  HTTP monitor│
//! └────────────────┘                │              │
//!   Telemetry ◀──── MonitorApi ─────│  (getters)   │
//!                                   └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use crate::app::ports::{MonitorMessage, MonitorNotifier, WallClock};
use crate::app::time_sync::{format_timestamp, TimestampString};
use crate::telemetry::Telemetry;

/// Channel depth for monitor notifications.
const MONITOR_DEPTH: usize = 4;

/// Notifications: firmware workers → HTTP monitor.
pub static MONITOR_CHANNEL: Channel<CriticalSectionRawMutex, MonitorMessage, MONITOR_DEPTH> =
    Channel::new();

/// Non-blocking sender into [`MONITOR_CHANNEL`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ChannelNotifier;

impl MonitorNotifier for ChannelNotifier {
    fn notify(&mut self, message: MonitorMessage) {
        if MONITOR_CHANNEL.try_send(message).is_err() {
            warn!("monitor channel full, dropped {:?}", message);
        }
    }
}

/// Take the next pending notification, if any.
pub fn poll_message() -> Option<MonitorMessage> {
    MONITOR_CHANNEL.try_receive().ok()
}

/// Read-only getters for the monitoring collaborator.
pub struct MonitorApi<'t, W> {
    telemetry: &'t Telemetry,
    clock: W,
    utc_offset_secs: i32,
}

impl<'t, W: WallClock> MonitorApi<'t, W> {
    pub fn new(telemetry: &'t Telemetry, clock: W, utc_offset_secs: i32) -> Self {
        Self {
            telemetry,
            clock,
            utc_offset_secs,
        }
    }

    /// Last valid temperature (°C).
    pub fn get_temperature(&self) -> f32 {
        self.telemetry.temperature_c()
    }

    /// Last measured distance (cm).
    pub fn get_distance(&self) -> f32 {
        self.telemetry.distance_cm()
    }

    pub fn get_actuator_engaged(&self) -> bool {
        self.telemetry.actuator_engaged()
    }

    pub fn get_presence_detected(&self) -> bool {
        self.telemetry.presence_detected()
    }

    /// Cooling fan power in `[0, 100]`.
    pub fn get_cooling_power_percent(&self) -> f32 {
        self.telemetry.cooling_power_percent()
    }

    /// `DD/MM/YYYY HH:MM:SS`, or the sync placeholder.
    pub fn get_time_string(&self) -> TimestampString {
        format_timestamp(
            self.clock.now_unix(),
            self.utc_offset_secs,
            self.telemetry.synced(),
        )
    }
}
