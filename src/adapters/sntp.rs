//! SNTP client adapter.
//!
//! Implements [`TimeSyncService`]. On ESP-IDF the client is
//! `esp_idf_svc::sntp::EspSntp` in poll mode against `pool.ntp.org`, and
//! the timezone is applied through the POSIX `TZ` variable + `tzset()`.
//! On host targets the calls are only recorded.

use log::{info, warn};

use crate::app::ports::TimeSyncService;

pub const SNTP_SERVER: &str = "pool.ntp.org";

/// POSIX TZ for Brasília time (UTC−3, no DST).
pub const DEFAULT_POSIX_TZ: &str = "BRT3";

#[cfg(target_os = "espidf")]
pub struct SntpAdapter {
    client: Option<esp_idf_svc::sntp::EspSntp<'static>>,
}

#[cfg(target_os = "espidf")]
impl SntpAdapter {
    pub fn new() -> Self {
        Self { client: None }
    }

    pub fn started(&self) -> bool {
        self.client.is_some()
    }
}

#[cfg(target_os = "espidf")]
impl TimeSyncService for SntpAdapter {
    fn request_sync(&mut self) {
        use esp_idf_svc::sntp::{EspSntp, OperatingMode, SntpConf};

        if self.client.is_some() {
            return;
        }
        let mut conf = SntpConf::default();
        conf.servers[0] = SNTP_SERVER;
        conf.operating_mode = OperatingMode::Poll;
        match EspSntp::new(&conf) {
            Ok(client) => {
                info!("SNTP started (server={})", SNTP_SERVER);
                self.client = Some(client);
            }
            Err(e) => warn!("SNTP init failed: {}", e),
        }
    }

    fn set_timezone(&mut self, posix_tz: &str) {
        // SAFETY: only the time-sync worker touches the environment after
        // boot; no other thread reads TZ concurrently.
        unsafe {
            std::env::set_var("TZ", posix_tz);
            esp_idf_svc::sys::tzset();
        }
        info!("Timezone set to {}", posix_tz);
    }
}

/// Host stand-in that records what the gate asked for.
#[cfg(not(target_os = "espidf"))]
pub struct SntpAdapter {
    requests: u32,
    timezone: heapless::String<16>,
}

#[cfg(not(target_os = "espidf"))]
impl SntpAdapter {
    pub fn new() -> Self {
        Self {
            requests: 0,
            timezone: heapless::String::new(),
        }
    }

    pub fn started(&self) -> bool {
        self.requests > 0
    }

    pub fn requests(&self) -> u32 {
        self.requests
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }
}

#[cfg(not(target_os = "espidf"))]
impl TimeSyncService for SntpAdapter {
    fn request_sync(&mut self) {
        self.requests += 1;
        info!("SNTP(sim): sync requested (server={})", SNTP_SERVER);
    }

    fn set_timezone(&mut self, posix_tz: &str) {
        self.timezone.clear();
        if self.timezone.push_str(posix_tz).is_err() {
            warn!("SNTP(sim): timezone '{}' too long", posix_tz);
        }
    }
}

impl Default for SntpAdapter {
    fn default() -> Self {
        Self::new()
    }
}
