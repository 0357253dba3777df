//! Cooling duty controller: latest published temperature → fan duty.
//!
//! Reads the telemetry cell rather than the sensor, so it tolerates a
//! stale or degraded temperature (the last valid value is used). There
//! is no failure path in the control law; NaN and out-of-range inputs
//! clamp.

use crate::config::SystemConfig;
use crate::control::duty::DutyCurve;
use crate::telemetry::Telemetry;

use super::events::AppEvent;
use super::ports::{DutyOutput, EventSink};

pub struct CoolingDutyController<'t, F> {
    fan: F,
    curve: DutyCurve,
    telemetry: &'t Telemetry,
}

impl<'t, F: DutyOutput> CoolingDutyController<'t, F> {
    pub fn new(config: &SystemConfig, fan: F, telemetry: &'t Telemetry) -> Self {
        Self {
            fan,
            curve: DutyCurve::new(config.cooling_min_c, config.cooling_max_c, config.duty_max),
            telemetry,
        }
    }

    pub fn cycle(&mut self, sink: &mut impl EventSink) {
        let celsius = self.telemetry.temperature_c();
        let duty = self.curve.duty_for(celsius);
        let power_percent = self.curve.power_percent(duty);

        if let Err(error) = self.fan.set_duty(duty) {
            sink.emit(&AppEvent::OutputFault {
                output: "cooling",
                error,
            });
        }

        self.telemetry.publish_cooling(duty, power_percent);
        sink.emit(&AppEvent::CoolingUpdated {
            celsius,
            duty,
            power_percent,
        });
    }
}
