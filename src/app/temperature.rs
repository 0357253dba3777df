//! Temperature controller: LM35 sample → hysteresis → binary actuator.
//!
//! ```text
//!  TemperatureProbe ──▶ ┌────────────────────────┐ ──▶ BinaryOutput
//!                       │ TemperatureController  │ ──▶ Telemetry
//!                       │      Hysteresis        │ ──▶ EventSink
//!                       └────────────────────────┘
//! ```
//!
//! A degraded sample (ADC failure, no calibration) publishes
//! `temperature_valid = false`, skips the hysteresis and leaves the
//! actuator untouched. The next cycle simply retries.

use crate::config::SystemConfig;
use crate::control::hysteresis::{Hysteresis, Transition};
use crate::telemetry::Telemetry;

use super::events::AppEvent;
use super::ports::{BinaryOutput, EventSink, TemperatureProbe};

pub struct TemperatureController<'t, P, O> {
    probe: P,
    actuator: O,
    hysteresis: Hysteresis,
    telemetry: &'t Telemetry,
    degraded: bool,
}

impl<'t, P: TemperatureProbe, O: BinaryOutput> TemperatureController<'t, P, O> {
    pub fn new(config: &SystemConfig, probe: P, actuator: O, telemetry: &'t Telemetry) -> Self {
        Self {
            probe,
            actuator,
            hysteresis: Hysteresis::new(config.actuator_on_c, config.actuator_off_c),
            telemetry,
            // Nothing valid published yet; the first good sample is a recovery.
            degraded: true,
        }
    }

    pub fn engaged(&self) -> bool {
        self.hysteresis.engaged()
    }

    /// One control cycle.
    pub fn cycle(&mut self, sink: &mut impl EventSink) {
        let celsius = match self.probe.read_celsius() {
            Ok(c) => c,
            Err(e) => {
                self.telemetry.publish_temperature_invalid();
                if !self.degraded {
                    sink.emit(&AppEvent::TemperatureDegraded(e));
                }
                self.degraded = true;
                return;
            }
        };

        if self.degraded {
            self.degraded = false;
            sink.emit(&AppEvent::TemperatureRecovered { celsius });
        }

        match self.hysteresis.update(celsius) {
            Transition::Engaged => sink.emit(&AppEvent::ActuatorEngaged {
                celsius,
                threshold: self.hysteresis.on_threshold(),
            }),
            Transition::Released => sink.emit(&AppEvent::ActuatorReleased {
                celsius,
                threshold: self.hysteresis.off_threshold(),
            }),
            Transition::Held => {}
        }

        let engaged = self.hysteresis.engaged();
        if let Err(error) = self.actuator.set_level(engaged) {
            sink.emit(&AppEvent::OutputFault {
                output: "actuator",
                error,
            });
        }

        self.telemetry.publish_temperature(celsius);
        self.telemetry.publish_actuator(engaged);
        sink.emit(&AppEvent::TemperatureSampled { celsius, engaged });
    }
}
