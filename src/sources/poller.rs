//! # Closure-driven interval poller (`PollSource`)
//!
//! [`PollSource`] wraps a closure `F: FnMut() -> Option<AttributeValue>` and
//! polls it on a fixed interval, pushing each produced value as an attribute
//! keyed by the configured gauge name. This is the generalized shape of a
//! device-poller plugin: the closure stands in for one hardware read.
//!
//! ## Semantics
//! - `None` from the closure means "no new reading this tick" and pushes
//!   nothing.
//! - The closure is consumed on start; starting twice is a registration
//!   error (one production mechanism per source instance).
//! - A closed-queue push ends production with a warning — the controller is
//!   ceasing and no further readings are wanted.

use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::attribute::{Attribute, AttributeValue};
use crate::error::HubError;
use crate::queue::QueuePusher;
use crate::sources::Source;

/// Interval-polling source backed by a closure.
///
/// The closure produces at most one reading per tick. State lives inside
/// the closure itself; wrap shared state in `Arc` explicitly if the caller
/// needs to observe it.
pub struct PollSource<F> {
    name: String,
    gauge: String,
    interval: Duration,
    poll: Option<F>,
    stop: Option<CancellationToken>,
}

impl<F> PollSource<F>
where
    F: FnMut() -> Option<AttributeValue> + Send + Sync + 'static,
{
    /// Creates a poller producing attributes named `gauge` every `interval`.
    pub fn new(
        name: impl Into<String>,
        gauge: impl Into<String>,
        interval: Duration,
        poll: F,
    ) -> Self {
        Self {
            name: name.into(),
            gauge: gauge.into(),
            interval: interval.max(Duration::from_millis(1)),
            poll: Some(poll),
            stop: None,
        }
    }
}

impl<F> Source for PollSource<F>
where
    F: FnMut() -> Option<AttributeValue> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&mut self, queue: QueuePusher, stop: CancellationToken) -> Result<(), HubError> {
        let Some(mut poll) = self.poll.take() else {
            return Err(HubError::registration(
                self.name.clone(),
                "source already started",
            ));
        };
        self.stop = Some(stop.clone());

        let name = self.name.clone();
        let gauge = self.gauge.clone();
        let interval = self.interval;

        tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            // The first tick fires immediately; that gives one reading at
            // startup, matching a device poll on plugin load.
            loop {
                tokio::select! {
                    _ = stop.cancelled() => break,
                    _ = ticker.tick() => {
                        let Some(value) = poll() else { continue };
                        let attribute = Attribute::new(gauge.clone(), value).with_origin(name.clone());
                        if queue.push(attribute).await.is_err() {
                            warn!(source = %name, "queue closed mid-poll; ending production");
                            break;
                        }
                    }
                }
            }
            debug!(source = %name, "poll source stopped");
        });

        Ok(())
    }

    fn stop(&mut self) {
        if let Some(token) = self.stop.take() {
            token.cancel();
        }
    }
}
