//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                     | Connects to             |
//! |------------|--------------------------------|-------------------------|
//! | `log_sink` | EventSink                      | Serial log output       |
//! | `monitor`  | MonitorNotifier, MonitorApi    | HTTP monitor task       |
//! | `sntp`     | TimeSyncService                | ESP-IDF SNTP client     |
//! | `time`     | WallClock, MicrosClock         | ESP32 system timer/RTC  |
//!
//! The ADC, GPIO and LEDC adapters live in `drivers`, next to hw_init.

pub mod log_sink;
pub mod monitor;
pub mod sntp;
pub mod time;
