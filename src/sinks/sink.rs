//! # Core sink trait
//!
//! `Sink` is the extension point for delivery plugins. Each registered sink
//! receives every dispatched attribute once, in arrival order, on the
//! controller's dispatch task.
//!
//! ## Contract
//! - `deliver` is **best-effort, at-most-once** per value. The controller
//!   never retries a failed delivery for the same value — a newer reading
//!   will arrive shortly for live telemetry, and latency beats completeness
//!   here.
//! - Any internal fault must surface as a [`SinkError`], never as an
//!   uncontained panic.
//! - Each sink **declares** its delivery bound via
//!   [`Sink::deliver_timeout`]; the controller enforces it at the dispatch
//!   boundary, so a misbehaving sink cannot stall later-arriving values.
//! - A sink that does not handle some [`AttributeValue`] variants rejects
//!   them with `SinkError::Unsupported` (or ignores them deliberately and
//!   returns `Ok`).
//!
//! ## Example (skeleton)
//! ```ignore
//! struct Display { panel: PanelHandle }
//!
//! #[async_trait]
//! impl Sink for Display {
//!     fn name(&self) -> &'static str { "display" }
//!     async fn deliver(&self, attribute: &Attribute) -> Result<(), SinkError> {
//!         self.panel.show(attribute).await.map_err(SinkError::failed)
//!     }
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;

use crate::attribute::Attribute;
use crate::error::SinkError;

/// Default per-delivery bound enforced by the controller.
pub const DEFAULT_DELIVER_TIMEOUT: Duration = Duration::from_secs(2);

/// Contract for delivery plugins.
///
/// Called from the dispatch task. Implementations should prefer async I/O
/// and stay well inside their declared timeout.
#[async_trait]
pub trait Sink: Send + Sync + 'static {
    /// Stable, human-readable sink name (for logs).
    fn name(&self) -> &str;

    /// Delivers one attribute to this sink's destination.
    async fn deliver(&self, attribute: &Attribute) -> Result<(), SinkError>;

    /// Upper bound for one `deliver` call.
    ///
    /// The controller wraps every delivery in this timeout; elapse is
    /// reported as `SinkError::Timeout` and isolated like any other
    /// delivery failure.
    fn deliver_timeout(&self) -> Duration {
        DEFAULT_DELIVER_TIMEOUT
    }
}
