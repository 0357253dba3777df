//! Application core: the four periodic workers, with no direct I/O.
//!
//! Each worker owns its physical output and talks to hardware only
//! through the **port traits** in [`ports`], so every control law is
//! testable on the host with mock adapters. Workers share nothing but
//! the lock-free [`Telemetry`](crate::telemetry::Telemetry) cells.

pub mod cooling;
pub mod events;
pub mod ports;
pub mod ranging;
pub mod temperature;
pub mod time_sync;

pub use cooling::CoolingDutyController;
pub use ranging::RangingMonitor;
pub use temperature::TemperatureController;
pub use time_sync::{SyncState, TimeSyncGate};
