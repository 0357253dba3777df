//! Two-threshold switching law for the binary actuator.
//!
//! Engages at or above `on_threshold`, releases at or below
//! `off_threshold`, and latches in between. The band must stay open
//! (`off < on`) or the output chatters around a single setpoint.

/// Latched two-threshold switch.
#[derive(Debug, Clone, Copy)]
pub struct Hysteresis {
    on_threshold: f32,
    off_threshold: f32,
    engaged: bool,
}

/// Result of one [`Hysteresis::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Engaged,
    Released,
    Held,
}

impl Hysteresis {
    /// New switch in the released state.
    pub fn new(on_threshold: f32, off_threshold: f32) -> Self {
        debug_assert!(off_threshold < on_threshold, "hysteresis band inverted");
        Self {
            on_threshold,
            off_threshold,
            engaged: false,
        }
    }

    /// Feed one measurement.
    ///
    /// NaN compares false against both thresholds and therefore holds.
    pub fn update(&mut self, value: f32) -> Transition {
        if value >= self.on_threshold && !self.engaged {
            self.engaged = true;
            Transition::Engaged
        } else if value <= self.off_threshold && self.engaged {
            self.engaged = false;
            Transition::Released
        } else {
            Transition::Held
        }
    }

    pub fn engaged(&self) -> bool {
        self.engaged
    }

    pub fn on_threshold(&self) -> f32 {
        self.on_threshold
    }

    pub fn off_threshold(&self) -> f32 {
        self.off_threshold
    }
}
