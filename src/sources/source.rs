//! # Core source trait
//!
//! `Source` is the extension point for ingestion plugins. A source
//! encapsulates one production mechanism (interval poll, device callback,
//! network bridge) and pushes every observed reading into the shared
//! delivery queue exactly once.
//!
//! ## Contract
//! - [`Source::start`] begins asynchronous production and **returns
//!   immediately**; the work runs on the source's own task. Failure to
//!   initialize (missing device, bad session) is fatal to the run.
//! - [`Source::stop`] requests production to end. It must be idempotent and
//!   safe when `start` was never called. It does not flush in-flight
//!   pushes; it only guarantees no *new* pushes after the request lands.
//! - A push rejected with `QueueError::Closed` means shutdown has begun:
//!   log a warning and end production. Never crash the shared queue.
//!
//! ## Example (skeleton)
//! ```ignore
//! struct GearSwitch { stop: Option<CancellationToken> }
//!
//! impl Source for GearSwitch {
//!     fn name(&self) -> &str { "gear-switch" }
//!     fn start(&mut self, queue: QueuePusher, stop: CancellationToken) -> Result<(), HubError> {
//!         self.stop = Some(stop.clone());
//!         tokio::spawn(async move { /* poll hardware, queue.push(..) */ });
//!         Ok(())
//!     }
//!     fn stop(&mut self) {
//!         if let Some(token) = self.stop.take() { token.cancel(); }
//!     }
//! }
//! ```

use tokio_util::sync::CancellationToken;

use crate::error::HubError;
use crate::queue::QueuePusher;

/// Contract for ingestion plugins.
///
/// Registered with the controller while it is still uninitialized; started
/// when the event loop starts; stopped when the controller ceases.
pub trait Source: Send + Sync + 'static {
    /// Stable, human-readable source name (used as attribute origin and in
    /// logs).
    fn name(&self) -> &str;

    /// Begins asynchronous production into `queue`.
    ///
    /// Must not block the caller. The provided `stop` token is the
    /// cooperative cancellation signal: production loops should exit
    /// promptly once it is cancelled. Implementations typically keep a
    /// clone so [`Source::stop`] can cancel it directly.
    fn start(&mut self, queue: QueuePusher, stop: CancellationToken) -> Result<(), HubError>;

    /// Requests production to end. Idempotent; safe when never started.
    fn stop(&mut self);
}
