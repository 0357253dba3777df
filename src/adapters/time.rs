//! ESP32 time adapter.
//!
//! Monotonic microseconds for echo timing ([`MicrosClock`]) and the
//! wall clock the time-sync gate inspects ([`WallClock`]).
//!
//! - **`target_os = "espidf"`**: `esp_timer_get_time()` for uptime and
//!   `gettimeofday()` for wall time (set by SNTP).
//! - **`not(target_os = "espidf")`**: `std::time::Instant` for uptime and
//!   an injectable atomic for wall time, so sync can be simulated.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicI64, Ordering};

use crate::app::ports::WallClock;
use crate::sensors::MicrosClock;

/// Simulated seconds since the Unix epoch. Boots at 0 (1970), like an
/// unsynced RTC.
#[cfg(not(target_os = "espidf"))]
static SIM_WALL_CLOCK: AtomicI64 = AtomicI64::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_wall_clock(unix_secs: i64) {
    SIM_WALL_CLOCK.store(unix_secs, Ordering::Relaxed);
}

/// Time adapter for the ESP32 platform.
#[derive(Debug, Clone, Copy)]
pub struct Esp32TimeAdapter {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Esp32TimeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32TimeAdapter {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Seconds since boot (monotonic).
    pub fn uptime_secs(&self) -> u64 {
        self.uptime_us() / 1_000_000
    }

    /// Microseconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since boot (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

impl MicrosClock for Esp32TimeAdapter {
    fn now_us(&self) -> u64 {
        self.uptime_us()
    }
}

impl WallClock for Esp32TimeAdapter {
    #[cfg(target_os = "espidf")]
    fn now_unix(&self) -> i64 {
        let mut tv = esp_idf_svc::sys::timeval {
            tv_sec: 0,
            tv_usec: 0,
        };
        // SAFETY: plain libc call writing into a stack-local timeval.
        if unsafe { esp_idf_svc::sys::gettimeofday(&mut tv, core::ptr::null_mut()) } != 0 {
            return 0;
        }
        tv.tv_sec as i64
    }

    #[cfg(not(target_os = "espidf"))]
    fn now_unix(&self) -> i64 {
        SIM_WALL_CLOCK.load(Ordering::Relaxed)
    }
}
