//! System configuration parameters
//!
//! All tunable parameters for the Thermoguard control loop. Defaults are
//! the calibrated values for the LM35 / HC-SR04 / 13-bit LEDC board and
//! must be kept as-is for behavioural compatibility.

use serde::{Deserialize, Serialize};

use crate::drivers::task_pin::Core;
use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Hysteresis (binary actuator) ---
    /// Temperature (°C) at or above which the actuator engages.
    pub actuator_on_c: f32,
    /// Temperature (°C) at or below which the actuator releases.
    pub actuator_off_c: f32,

    // --- Cooling fan (proportional duty) ---
    /// Temperature (°C) at or below which the fan is off.
    pub cooling_min_c: f32,
    /// Temperature (°C) at or above which the fan runs at full duty.
    pub cooling_max_c: f32,
    /// Full-scale duty value of the PWM channel (13-bit LEDC → 8191).
    pub duty_max: u32,

    // --- Ranging ---
    /// Distance (cm) below which presence is reported.
    pub presence_threshold_cm: f32,
    /// Maximum ranging distance (cm); bounds the echo wait.
    pub max_distance_cm: f32,

    // --- Time sync ---
    /// Earliest calendar year considered a plausible (synced) wall clock.
    pub sync_min_year: i32,
    /// Local timezone offset east of UTC, in seconds (BRT = -3 h).
    pub utc_offset_secs: i32,

    // --- Timing ---
    /// Temperature controller period (milliseconds)
    pub temperature_period_ms: u32,
    /// Ranging monitor period (milliseconds)
    pub ranging_period_ms: u32,
    /// Cooling duty controller period (milliseconds)
    pub cooling_period_ms: u32,
    /// Time sync gate period (milliseconds)
    pub time_sync_period_ms: u32,
    /// Interval between telemetry log lines on the console (seconds)
    pub telemetry_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Hysteresis: 3.0 °C band
            actuator_on_c: 40.0,
            actuator_off_c: 37.0,

            // Cooling
            cooling_min_c: 25.0,
            cooling_max_c: 50.0,
            duty_max: 8191,

            // Ranging
            presence_threshold_cm: 50.0,
            max_distance_cm: 400.0, // 4 m

            // Time sync
            sync_min_year: 2016,
            utc_offset_secs: -3 * 3600,

            // Timing
            temperature_period_ms: 1000,
            ranging_period_ms: 500,
            cooling_period_ms: 1000,
            time_sync_period_ms: 10_000,
            telemetry_interval_secs: 30,
        }
    }
}

impl SystemConfig {
    /// Reject parameter sets that would break a control law.
    ///
    /// Comparisons are negated so that NaN fields fail validation.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<()> {
        if !(self.actuator_on_c > self.actuator_off_c) {
            return Err(Error::Config("actuator on threshold must be above off threshold"));
        }
        if !(self.cooling_max_c > self.cooling_min_c) {
            return Err(Error::Config("cooling range is empty"));
        }
        if self.duty_max == 0 {
            return Err(Error::Config("duty_max must be non-zero"));
        }
        if !(self.max_distance_cm > 0.0) || !(self.presence_threshold_cm > 0.0) {
            return Err(Error::Config("ranging distances must be positive"));
        }
        if self.temperature_period_ms == 0
            || self.ranging_period_ms == 0
            || self.cooling_period_ms == 0
            || self.time_sync_period_ms == 0
            || self.telemetry_interval_secs == 0
        {
            return Err(Error::Config("worker periods must be non-zero"));
        }
        Ok(())
    }
}

/// Placement of one periodic worker: FreeRTOS core, priority and stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskConfig {
    /// Null-terminated task name (required by `esp_pthread_set_cfg`).
    pub name: &'static str,
    pub core: Core,
    pub priority: u8,
    pub stack_kb: usize,
}

/// Sensor and control tasks live on the APP core; core 0 is left to the
/// WiFi / HTTP stack.
pub const TEMPERATURE_TASK: TaskConfig = TaskConfig {
    name: "temperature\0",
    core: Core::App,
    priority: 5,
    stack_kb: 4,
};

pub const RANGING_TASK: TaskConfig = TaskConfig {
    name: "ranging\0",
    core: Core::App,
    priority: 5,
    stack_kb: 4,
};

pub const COOLING_TASK: TaskConfig = TaskConfig {
    name: "cooling\0",
    core: Core::App,
    priority: 4,
    stack_kb: 4,
};

pub const TIME_SYNC_TASK: TaskConfig = TaskConfig {
    name: "time-sync\0",
    core: Core::App,
    priority: 4,
    stack_kb: 4,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SystemConfig::default().validate().is_ok());
    }

    #[test]
    fn default_constants_match_board_calibration() {
        let c = SystemConfig::default();
        assert_eq!(c.actuator_on_c, 40.0);
        assert_eq!(c.actuator_off_c, 37.0);
        assert_eq!(c.actuator_on_c - c.actuator_off_c, 3.0);
        assert_eq!(c.cooling_min_c, 25.0);
        assert_eq!(c.cooling_max_c, 50.0);
        assert_eq!(c.duty_max, 8191);
        assert_eq!(c.presence_threshold_cm, 50.0);
        assert_eq!(c.sync_min_year, 2016);
    }

    #[test]
    fn inverted_thresholds_rejected() {
        let c = SystemConfig {
            actuator_on_c: 35.0,
            ..SystemConfig::default()
        };
        assert!(matches!(c.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn empty_cooling_range_rejected() {
        let c = SystemConfig {
            cooling_max_c: 25.0,
            ..SystemConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn zero_period_rejected() {
        let c = SystemConfig {
            ranging_period_ms: 0,
            ..SystemConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn nan_distance_rejected() {
        let c = SystemConfig {
            max_distance_cm: f32::NAN,
            ..SystemConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn timing_ratios_make_sense() {
        let c = SystemConfig::default();
        assert!(
            c.ranging_period_ms < c.temperature_period_ms,
            "ranging should sample faster than temperature"
        );
        assert!(
            c.temperature_period_ms < c.time_sync_period_ms,
            "sync check should be the slowest worker"
        );
    }

    #[test]
    fn task_names_are_nul_terminated() {
        for t in [TEMPERATURE_TASK, RANGING_TASK, COOLING_TASK, TIME_SYNC_TASK] {
            assert!(t.name.ends_with('\0'), "{} not NUL-terminated", t.name);
            assert_eq!(t.core, Core::App);
        }
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert!((c.actuator_on_c - c2.actuator_on_c).abs() < 0.001);
        assert_eq!(c.duty_max, c2.duty_max);
        assert_eq!(c.utc_offset_secs, c2.utc_offset_secs);
    }
}
