//! Thermoguard firmware library.
//!
//! Exposes the control workers, port traits and drivers for the binary
//! and for host integration testing. All ESP-IDF-specific code is
//! guarded by `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod pins;
pub mod scheduler;
pub mod telemetry;

pub mod adapters;
pub mod drivers;
pub mod sensors;
