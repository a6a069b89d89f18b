//! # EventController: owns the queue, the plugin sets, and the dispatch loop.
//!
//! ## Architecture
//! ```text
//! Source 1 ──┐
//! Source 2 ──┼─ push ─► [DeliveryQueue] ─ pop ─► dispatch loop
//! Source N ──┘                                      │
//!                                   (sequentially, registration order)
//!                                      ├─► Sink 1.deliver()   ─┐ failures
//!                                      ├─► Sink 2.deliver()    ├ isolated
//!                                      └─► Sink M.deliver()   ─┘ per sink
//!                                               │
//!                                  on_delivered(&attr, any_succeeded)
//! ```
//!
//! ## Lifecycle
//! ```text
//! Uninitialized ── run_event_loop ──► Running ── cease ──► Ceasing ──► Terminated
//!       │                                                    (drain)
//!       └─ register_source / register_sink valid here ONLY
//! ```
//!
//! ## Rules
//! - Registries are frozen at the `Running` transition; nothing but the
//!   queue is shared across threads, so dispatch needs no locking.
//! - Sinks are invoked **sequentially in registration order** for every
//!   value; one sink's failure (or timeout) never prevents delivery to
//!   subsequent sinks.
//! - A terminated controller is done for good: restart means building a
//!   fresh instance, never resurrecting this one.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::attribute::Attribute;
use crate::controller::ControllerHandle;
use crate::error::HubError;
use crate::queue::{DeliveryQueue, Popped, QueuePusher};
use crate::sinks::Sink;
use crate::sources::Source;

/// Lifecycle state of one controller instance.
///
/// Transitions are strictly forward; `Terminated` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Constructed; plugins may be registered.
    Uninitialized,
    /// Dispatch loop active.
    Running,
    /// Cease observed; draining already-queued values.
    Ceasing,
    /// Loop returned; instance is dead. Build a new one to continue.
    Terminated,
}

impl ControllerState {
    /// Short stable label for logs and errors.
    pub fn as_label(&self) -> &'static str {
        match self {
            ControllerState::Uninitialized => "uninitialized",
            ControllerState::Running => "running",
            ControllerState::Ceasing => "ceasing",
            ControllerState::Terminated => "terminated",
        }
    }
}

/// Explicitly owned event controller.
///
/// Exactly one instance is active at a time, enforced by ownership: the
/// supervisor constructs it, runs it to completion, and drops it before
/// building a successor. There is no global accessor.
pub struct EventController {
    queue: DeliveryQueue,
    pusher: QueuePusher,
    sources: Vec<Box<dyn Source>>,
    sinks: Vec<Arc<dyn Sink>>,
    state: ControllerState,
    cease: CancellationToken,
    /// Global delivery-bound override from configuration; `None` defers to
    /// each sink's own `deliver_timeout`.
    sink_timeout: Option<Duration>,
}

impl EventController {
    /// Creates an uninitialized controller with a queue of `queue_capacity`.
    pub fn new(queue_capacity: usize) -> Self {
        let (queue, pusher) = DeliveryQueue::bounded(queue_capacity);
        let cease = queue.close_token();
        Self {
            queue,
            pusher,
            sources: Vec::new(),
            sinks: Vec::new(),
            state: ControllerState::Uninitialized,
            cease,
            sink_timeout: None,
        }
    }

    /// Overrides every sink's delivery bound. `Duration::ZERO` means "no
    /// override" (sinks keep their own bounds).
    #[must_use]
    pub fn with_sink_timeout(mut self, bound: Duration) -> Self {
        self.sink_timeout = (bound > Duration::ZERO).then_some(bound);
        self
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Cease handle for the supervisor's signal task.
    pub fn handle(&self) -> ControllerHandle {
        ControllerHandle::new(self.cease.clone())
    }

    /// Registers a source plugin. Valid only before the loop starts.
    pub fn register_source(&mut self, source: Box<dyn Source>) -> Result<(), HubError> {
        self.ensure_uninitialized("register_source")?;
        debug!(source = %source.name(), "source registered");
        self.sources.push(source);
        Ok(())
    }

    /// Registers a sink plugin. Valid only before the loop starts.
    ///
    /// Sinks are invoked in registration order for every dispatched value.
    pub fn register_sink(&mut self, sink: Arc<dyn Sink>) -> Result<(), HubError> {
        self.ensure_uninitialized("register_sink")?;
        debug!(sink = %sink.name(), "sink registered");
        self.sinks.push(sink);
        Ok(())
    }

    /// Number of registered sources.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Runs the dispatch loop until cease.
    ///
    /// Starts every registered source, then pops attributes in arrival
    /// order and fans each out to every sink. The aggregated outcome —
    /// `true` when at least one sink succeeded — is reported through
    /// `on_delivered` after each value's dispatch. The callback is an
    /// independent best-effort side channel: nothing it does can fail the
    /// loop.
    ///
    /// ### Errors
    /// - [`HubError::InvalidState`] when called on anything but a fresh
    ///   controller (no resurrection of a terminated instance).
    /// - [`HubError::Registration`] when a source fails to start; sources
    ///   started so far are stopped and the controller is terminated
    ///   without entering `Running`.
    pub async fn run_event_loop<F>(&mut self, mut on_delivered: F) -> Result<(), HubError>
    where
        F: FnMut(&Attribute, bool),
    {
        self.ensure_uninitialized("run_event_loop")?;

        if let Err(err) = self.start_sources() {
            self.stop_sources();
            self.cease.cancel();
            self.state = ControllerState::Terminated;
            error!(label = err.as_label(), "startup failed; run aborted");
            return Err(err);
        }

        self.state = ControllerState::Running;
        info!(
            sources = self.sources.len(),
            sinks = self.sinks.len(),
            "event loop running"
        );

        loop {
            match self.queue.pop().await {
                Popped::Item(attribute) => {
                    self.observe_cease();
                    let delivered = self.dispatch(&attribute).await;
                    on_delivered(&attribute, delivered);
                }
                Popped::Closed => {
                    // The queue only closes via the cease token, so the
                    // Ceasing hop happens even when nothing was queued.
                    self.observe_cease();
                    break;
                }
            }
        }

        self.stop_sources();
        self.state = ControllerState::Terminated;
        info!("event loop terminated");
        Ok(())
    }

    /// Transitions `Running → Ceasing` once the cease token is observed.
    fn observe_cease(&mut self) {
        if self.state == ControllerState::Running && self.cease.is_cancelled() {
            self.state = ControllerState::Ceasing;
            debug!("cease observed; delivering remaining queued values");
        }
    }

    /// Starts every registered source with a child of the cease token.
    ///
    /// Fatal on first failure: the error is returned and the caller tears
    /// the instance down.
    fn start_sources(&mut self) -> Result<(), HubError> {
        for source in &mut self.sources {
            let stop = self.cease.child_token();
            source.start(self.pusher.clone(), stop).map_err(|err| {
                error!(
                    source = %source.name(),
                    error = %err,
                    "source failed to start"
                );
                err
            })?;
        }
        Ok(())
    }

    /// Stops every source. Safe to call repeatedly; `Source::stop` is
    /// idempotent by contract.
    fn stop_sources(&mut self) {
        for source in &mut self.sources {
            source.stop();
        }
    }

    /// Delivers one value to every sink, sequentially in registration
    /// order, isolating per-sink failures.
    ///
    /// Returns `true` if at least one sink accepted the value.
    async fn dispatch(&self, attribute: &Attribute) -> bool {
        let mut any_succeeded = false;

        for sink in &self.sinks {
            let bound = self.sink_timeout.unwrap_or_else(|| sink.deliver_timeout());
            match time::timeout(bound, sink.deliver(attribute)).await {
                Ok(Ok(())) => any_succeeded = true,
                Ok(Err(err)) => {
                    warn!(
                        sink = %sink.name(),
                        attribute = %attribute.name(),
                        origin = %attribute.origin(),
                        error = %err,
                        label = err.as_label(),
                        "sink delivery failed"
                    );
                }
                Err(_elapsed) => {
                    warn!(
                        sink = %sink.name(),
                        attribute = %attribute.name(),
                        origin = %attribute.origin(),
                        timeout = ?bound,
                        label = "sink_timeout",
                        "sink delivery timed out"
                    );
                }
            }
        }

        any_succeeded
    }

    fn ensure_uninitialized(&self, operation: &'static str) -> Result<(), HubError> {
        if self.state != ControllerState::Uninitialized {
            return Err(HubError::InvalidState {
                operation,
                state: self.state.as_label(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for EventController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventController")
            .field("state", &self.state)
            .field("sources", &self.sources.len())
            .field("sinks", &self.sinks.len())
            .finish()
    }
}
