//! # Synthetic simulator-state source (`SimStateSource`)
//!
//! Emits a plausible flight-state walk — speed, altitude, heading — on a
//! fixed interval. Stands in for a simulator-bridge plugin in demos and
//! end-to-end runs where no simulator session is attached.
//!
//! Each tick perturbs the previous state by a small random step and pushes
//! one attribute per gauge, so downstream sinks see a steady multi-gauge
//! stream with stable keys.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::attribute::{Attribute, AttributeValue};
use crate::error::HubError;
use crate::queue::QueuePusher;
use crate::sources::Source;

/// Gauge walk state carried between ticks.
#[derive(Debug, Clone, Copy)]
struct SimState {
    speed: f64,
    altitude: f64,
    heading: f64,
}

impl SimState {
    fn level_cruise() -> Self {
        Self {
            speed: 120.0,
            altitude: 4500.0,
            heading: 270.0,
        }
    }

    /// Advances the walk one tick with bounded random steps.
    fn step<R: Rng>(&mut self, rng: &mut R) {
        self.speed = (self.speed + rng.gen_range(-2.0..2.0)).clamp(60.0, 180.0);
        self.altitude = (self.altitude + rng.gen_range(-25.0..25.0)).clamp(0.0, 12_000.0);
        self.heading = (self.heading + rng.gen_range(-1.5..1.5)).rem_euclid(360.0);
    }
}

/// Synthetic simulator-state feed.
pub struct SimStateSource {
    name: String,
    interval: Duration,
    stop: Option<CancellationToken>,
    started: bool,
}

impl SimStateSource {
    /// Creates a sim feed ticking every `interval`.
    pub fn new(name: impl Into<String>, interval: Duration) -> Self {
        Self {
            name: name.into(),
            interval: interval.max(Duration::from_millis(10)),
            stop: None,
            started: false,
        }
    }
}

impl Source for SimStateSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&mut self, queue: QueuePusher, stop: CancellationToken) -> Result<(), HubError> {
        if self.started {
            return Err(HubError::registration(
                self.name.clone(),
                "source already started",
            ));
        }
        self.started = true;
        self.stop = Some(stop.clone());

        let name = self.name.clone();
        let interval = self.interval;

        tokio::spawn(async move {
            // The RNG lives across await points inside a spawned task, so
            // it must be Send; ThreadRng is not.
            let mut rng = StdRng::from_entropy();
            let mut state = SimState::level_cruise();
            let mut ticker = time::interval(interval);

            'production: loop {
                tokio::select! {
                    _ = stop.cancelled() => break 'production,
                    _ = ticker.tick() => {
                        state.step(&mut rng);
                        let readings = [
                            Attribute::new("speed", AttributeValue::Float(state.speed)),
                            Attribute::new("altitude", AttributeValue::Float(state.altitude)),
                            Attribute::new("heading", AttributeValue::Float(state.heading)),
                        ];
                        for reading in readings {
                            if queue.push(reading.with_origin(name.clone())).await.is_err() {
                                warn!(source = %name, "queue closed mid-tick; ending production");
                                break 'production;
                            }
                        }
                    }
                }
            }
            debug!(source = %name, "sim source stopped");
        });

        Ok(())
    }

    fn stop(&mut self) {
        if let Some(token) = self.stop.take() {
            token.cancel();
        }
    }
}
