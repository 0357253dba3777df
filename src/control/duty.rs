//! Temperature-proportional PWM duty for the cooling fan.
//!
//! ```text
//!  duty
//!  max ┤            ┌──────
//!      │          ╱
//!      │        ╱
//!    0 ┼──────┘
//!      └──────┬─────┬──────▶ °C
//!           min    max
//! ```
//!
//! Linear between `min_c` and `max_c`, clamped to `[0, duty_max]` and
//! non-decreasing in temperature.

/// Linear clamped temperature → duty map.
#[derive(Debug, Clone, Copy)]
pub struct DutyCurve {
    min_c: f32,
    max_c: f32,
    duty_max: u32,
}

impl DutyCurve {
    pub fn new(min_c: f32, max_c: f32, duty_max: u32) -> Self {
        debug_assert!(min_c < max_c, "duty curve range is empty");
        Self {
            min_c,
            max_c,
            duty_max,
        }
    }

    /// Duty for the given temperature. NaN maps to 0.
    pub fn duty_for(&self, celsius: f32) -> u32 {
        if celsius.is_nan() || celsius <= self.min_c {
            return 0;
        }
        let fraction = (celsius - self.min_c) / (self.max_c - self.min_c);
        let duty = fraction * self.duty_max as f32;
        // Float → int casts saturate, but clamp explicitly for +inf.
        (duty as u32).min(self.duty_max)
    }

    /// `duty / duty_max * 100`, in `[0, 100]`.
    pub fn power_percent(&self, duty: u32) -> f32 {
        duty.min(self.duty_max) as f32 / self.duty_max as f32 * 100.0
    }
}
