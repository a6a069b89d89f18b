//! # ControllerHandle: the cease side of the controller.
//!
//! Signal-driven control flow is abstracted as a cancellation token: the
//! process supervisor translates OS signals into [`ControllerHandle::cease`]
//! calls, and the dispatch loop reacts to the token at its suspension point
//! (the queue pop) — never from inside a signal handler.

use tokio_util::sync::CancellationToken;
use tracing::info;

/// Clonable handle that requests cooperative shutdown of one controller.
///
/// The handle shares the controller's cease token, which is also the delivery
/// queue's close token and the parent of every source's stop token: one
/// cancel stops production, closes the queue, and lets the loop drain out.
#[derive(Clone, Debug)]
pub struct ControllerHandle {
    cease: CancellationToken,
}

impl ControllerHandle {
    pub(crate) fn new(cease: CancellationToken) -> Self {
        Self { cease }
    }

    /// Requests the event loop to cease. Idempotent.
    ///
    /// Already-queued values are still delivered before the loop returns;
    /// new pushes are rejected from this point on.
    pub fn cease(&self) {
        if !self.cease.is_cancelled() {
            info!("cease requested; draining remaining values");
        }
        self.cease.cancel();
    }

    /// True once cease has been requested.
    #[inline]
    pub fn is_ceasing(&self) -> bool {
        self.cease.is_cancelled()
    }
}
