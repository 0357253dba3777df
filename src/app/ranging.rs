//! Ranging monitor: HC-SR04 round trip → distance → presence indicator.
//!
//! Presence is `distance < threshold` with no hysteresis band. A failed
//! measurement (ping or echo timeout) only clears `distance_measured`;
//! the last distance and presence stay published. The indicator pin is
//! driven to the current presence state every cycle either way.

use crate::config::SystemConfig;
use crate::sensors::ultrasonic::{max_round_trip_us, round_trip_us_to_cm};
use crate::telemetry::Telemetry;

use super::events::AppEvent;
use super::ports::{BinaryOutput, EventSink, RangeFinder};

pub struct RangingMonitor<'t, R, O> {
    ranger: R,
    indicator: O,
    telemetry: &'t Telemetry,
    presence_threshold_cm: f32,
    max_round_trip_us: u32,
    presence: bool,
}

impl<'t, R: RangeFinder, O: BinaryOutput> RangingMonitor<'t, R, O> {
    pub fn new(config: &SystemConfig, ranger: R, indicator: O, telemetry: &'t Telemetry) -> Self {
        Self {
            ranger,
            indicator,
            telemetry,
            presence_threshold_cm: config.presence_threshold_cm,
            max_round_trip_us: max_round_trip_us(config.max_distance_cm),
            presence: false,
        }
    }

    pub fn presence(&self) -> bool {
        self.presence
    }

    pub fn cycle(&mut self, sink: &mut impl EventSink) {
        match self.ranger.measure_round_trip_us(self.max_round_trip_us) {
            Ok(round_trip) => {
                let distance_cm = round_trip_us_to_cm(round_trip);
                let presence = distance_cm < self.presence_threshold_cm;

                if presence != self.presence {
                    sink.emit(&if presence {
                        AppEvent::PresenceDetected { distance_cm }
                    } else {
                        AppEvent::PresenceCleared { distance_cm }
                    });
                }
                self.presence = presence;

                self.telemetry.publish_distance(distance_cm, presence);
                sink.emit(&AppEvent::DistanceMeasured { distance_cm });
            }
            Err(e) => {
                self.telemetry.publish_distance_failed();
                sink.emit(&AppEvent::RangingFailed(e));
            }
        }

        if let Err(error) = self.indicator.set_level(self.presence) {
            sink.emit(&AppEvent::OutputFault {
                output: "presence",
                error,
            });
        }
    }
}
