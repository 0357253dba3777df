//! Core-pinned worker spawning for the ESP32 dual-core.
//!
//! Wraps `esp_pthread_set_cfg()` so that `std::thread::Builder::spawn`
//! creates a FreeRTOS task pinned to a specific CPU core with explicit
//! priority and stack size. On non-ESP targets, falls back to a plain
//! thread with the requested stack.
//!
//! `esp_pthread_set_cfg()` sets thread-local configuration that applies
//! to the *next* `pthread_create()` from the calling thread, so the
//! config→spawn pair must not be interleaved with other thread creation
//! on the same thread. All workers are spawned from `main`.

use std::io;
use std::thread::JoinHandle;

use crate::config::TaskConfig;

/// CPU core a worker is pinned to. Core 0 (PRO_CPU) is left to the
/// WiFi/lwIP stack, so only the APP core is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Core {
    /// Core 1 (APP_CPU): sensing and control workers.
    App = 1,
}

/// Spawn a worker with the placement described by `task`.
///
/// `task.name` must be NUL-terminated (e.g. `"ranging\0"`).
#[cfg(target_os = "espidf")]
pub fn spawn_on_core(
    task: &TaskConfig,
    f: impl FnOnce() + Send + 'static,
) -> io::Result<JoinHandle<()>> {
    // SAFETY: `cfg` outlives the call and `task.name` is a 'static
    // NUL-terminated string.
    let ret = unsafe {
        let mut cfg = esp_idf_sys::esp_create_default_pthread_config();
        cfg.pin_to_core = task.core as i32;
        cfg.prio = i32::from(task.priority);
        cfg.stack_size = (task.stack_kb * 1024) as _;
        cfg.thread_name = task.name.as_ptr() as *const _;
        esp_idf_sys::esp_pthread_set_cfg(&cfg)
    };
    if ret != esp_idf_sys::ESP_OK as i32 {
        return Err(io::Error::other(format!("esp_pthread_set_cfg failed: {ret}")));
    }

    let display_name = task.name.trim_end_matches('\0');
    log::info!(
        "Spawning '{}' on {:?} (pri={}, stack={}KB)",
        display_name,
        task.core,
        task.priority,
        task.stack_kb
    );

    std::thread::Builder::new()
        .name(display_name.into())
        .spawn(f)
}

/// Simulation fallback: ignores core affinity and priority.
#[cfg(not(target_os = "espidf"))]
pub fn spawn_on_core(
    task: &TaskConfig,
    f: impl FnOnce() + Send + 'static,
) -> io::Result<JoinHandle<()>> {
    let display_name = task.name.trim_end_matches('\0');
    log::info!(
        "Spawning '{}' (sim, no core pinning, stack={}KB)",
        display_name,
        task.stack_kb
    );

    std::thread::Builder::new()
        .name(display_name.into())
        .stack_size(task.stack_kb * 1024)
        .spawn(f)
}
