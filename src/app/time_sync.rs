//! Time synchronisation gate.
//!
//! ```text
//!   Unsynced ──(local year ≥ sync_min_year)──▶ Synced   (terminal)
//!      │
//!      └─ first cycle with an implausible clock: start SNTP, apply TZ
//! ```
//!
//! SNTP is requested at most once per boot; the gate then just waits for
//! the wall clock to become plausible. The synced transition publishes
//! the telemetry flag and notifies the monitor exactly once.

use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use core::fmt::Write as _;

use crate::config::SystemConfig;
use crate::telemetry::Telemetry;

use super::events::AppEvent;
use super::ports::{EventSink, MonitorMessage, MonitorNotifier, TimeSyncService, WallClock};

/// Shown by the monitor until the wall clock is trusted.
pub const SYNC_PLACEHOLDER: &str = "Waiting for sync...";

/// Fits `DD/MM/YYYY HH:MM:SS` and the placeholder.
pub type TimestampString = heapless::String<32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Unsynced,
    Synced,
}

fn to_local(now_unix: i64, utc_offset_secs: i32) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(utc_offset_secs)?;
    Some(DateTime::from_timestamp(now_unix, 0)?.with_timezone(&offset))
}

/// Calendar year of `now_unix` in the given local offset.
pub fn local_year(now_unix: i64, utc_offset_secs: i32) -> Option<i32> {
    to_local(now_unix, utc_offset_secs).map(|t| t.year())
}

/// `DD/MM/YYYY HH:MM:SS` in local time, or [`SYNC_PLACEHOLDER`] when
/// the clock is not synced (or not representable).
pub fn format_timestamp(now_unix: i64, utc_offset_secs: i32, synced: bool) -> TimestampString {
    let mut out = TimestampString::new();
    let local = if synced { to_local(now_unix, utc_offset_secs) } else { None };
    let written = match local {
        Some(t) => write!(
            out,
            "{:02}/{:02}/{:04} {:02}:{:02}:{:02}",
            t.day(),
            t.month(),
            t.year(),
            t.hour(),
            t.minute(),
            t.second()
        ),
        None => Err(core::fmt::Error),
    };
    if written.is_err() {
        out.clear();
        // The placeholder is shorter than the buffer.
        let _ = out.push_str(SYNC_PLACEHOLDER);
    }
    out
}

pub struct TimeSyncGate<'t, W, S, N> {
    clock: W,
    sntp: S,
    notifier: N,
    telemetry: &'t Telemetry,
    state: SyncState,
    sync_requested: bool,
    sync_min_year: i32,
    utc_offset_secs: i32,
    posix_tz: &'static str,
}

impl<'t, W, S, N> TimeSyncGate<'t, W, S, N>
where
    W: WallClock,
    S: TimeSyncService,
    N: MonitorNotifier,
{
    pub fn new(
        config: &SystemConfig,
        posix_tz: &'static str,
        clock: W,
        sntp: S,
        notifier: N,
        telemetry: &'t Telemetry,
    ) -> Self {
        Self {
            clock,
            sntp,
            notifier,
            telemetry,
            state: SyncState::Unsynced,
            sync_requested: false,
            sync_min_year: config.sync_min_year,
            utc_offset_secs: config.utc_offset_secs,
            posix_tz,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn cycle(&mut self, sink: &mut impl EventSink) {
        if self.state == SyncState::Synced {
            return;
        }

        let now = self.clock.now_unix();
        let year = local_year(now, self.utc_offset_secs).unwrap_or(i32::MIN);

        if year < self.sync_min_year {
            if !self.sync_requested {
                self.sync_requested = true;
                self.sntp.request_sync();
                self.sntp.set_timezone(self.posix_tz);
                sink.emit(&AppEvent::TimeSyncRequested);
            }
            return;
        }

        self.state = SyncState::Synced;
        self.telemetry.publish_synced();
        self.notifier.notify(MonitorMessage::TimeServiceInitialized);
        sink.emit(&AppEvent::TimeSynced { year });
    }

    /// Current local time for display; computed on demand.
    pub fn format_timestamp(&self) -> TimestampString {
        format_timestamp(
            self.clock.now_unix(),
            self.utc_offset_secs,
            self.state == SyncState::Synced,
        )
    }
}
