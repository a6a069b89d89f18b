//! # telehub
//!
//! **telehub** is a telemetry event hub: it collects attribute readings from
//! source plugins and fans each value out to sink plugins, with cooperative
//! shutdown and full in-process reload driven by OS signals.
//!
//! ## Architecture
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │    Source    │   │    Source    │   │    Source    │
//!     │ (device poll)│   │ (sim bridge) │   │     ...      │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ push             │ push             │ push
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │                DeliveryQueue (bounded FIFO)               │
//! └────────────────────────────┬──────────────────────────────┘
//!                              │ pop (single consumer)
//!                              ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  EventController (dispatch loop)                          │
//! │  - pops values in arrival order                           │
//! │  - delivers to sinks sequentially, registration order     │
//! │  - isolates per-sink failures, applies per-call timeouts  │
//! │  - reports the aggregated outcome via the result callback │
//! └──────┬──────────────────┬──────────────────┬──────────────┘
//!        ▼                  ▼                  ▼
//!   ┌─────────┐       ┌──────────┐       ┌──────────┐
//!   │  Sink   │       │   Sink   │       │   Sink   │
//!   │(console)│       │ (null)   │       │   ...    │
//!   └─────────┘       └──────────┘       └──────────┘
//! ```
//!
//! ## Lifecycle
//! ```text
//! Supervisor::run(build, on_delivered)
//!
//! loop {
//!   ├─► controller = build()            (fresh config, fresh plugins)
//!   ├─► spawn signal watcher ──► ControllerHandle::cease() on signal
//!   ├─► controller.run_event_loop(on_delivered)
//!   │       Uninitialized → Running → Ceasing (drain) → Terminated
//!   ├─► drop(controller)                (full teardown, no leakage)
//!   └─► Reload? continue : return
//! }
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use telehub::{ConsoleSink, EventController, SimStateSource, Supervisor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let supervisor = Supervisor::new();
//!     supervisor
//!         .run(
//!             || {
//!                 let mut controller = EventController::new(256);
//!                 controller.register_source(Box::new(SimStateSource::new(
//!                     "sim",
//!                     Duration::from_millis(250),
//!                 )))?;
//!                 controller.register_sink(Arc::new(ConsoleSink::new()))?;
//!                 Ok(controller)
//!             },
//!             |_attribute, _delivered| {},
//!         )
//!         .await?;
//!     Ok(())
//! }
//! ```

mod attribute;
pub mod config;
mod controller;
mod error;
mod queue;
mod sinks;
mod sources;
mod supervisor;

// ---- Public re-exports ----

pub use attribute::{Attribute, AttributeValue};
pub use config::{ConfigError, HubConfig, SinkConfig, SourceConfig};
pub use controller::{ControllerHandle, ControllerState, EventController};
pub use error::{HubError, QueueError, SinkError};
pub use queue::{DeliveryQueue, Popped, QueuePusher};
pub use sinks::{ConsoleSink, NullSink, Sink};
pub use sources::{PollSource, SimStateSource, Source};
pub use supervisor::{wait_for_shutdown_signal, ShutdownKind, Supervisor};

// ---- Test modules (sibling *_test.rs files) ----

#[cfg(test)]
mod queue_test;
#[cfg(test)]
mod sources_test;
