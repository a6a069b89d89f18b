//! # Concurrent delivery queue: bounded FIFO hand-off from sources to the dispatch loop.
//!
//! [`DeliveryQueue::bounded`] returns the consumer half and a clonable
//! [`QueuePusher`] producer half.
//!
//! ## Architecture
//! ```text
//! Producers (many):                       Consumer (one):
//!   Source 1 ── push ──┐
//!   Source 2 ── push ──┼──► [bounded mpsc] ──► pop() ──► dispatch loop
//!   Source N ── push ──┘
//! ```
//!
//! ## Rules
//! - **FIFO**: values are popped in the exact order they were pushed; no
//!   reordering, no priority.
//! - **Bounded**: `push` awaits capacity, so producers never block
//!   indefinitely under normal load and never grow the buffer unboundedly.
//! - **Close is idempotent** and shared: cancelling the close token rejects
//!   new pushes while already-queued values still drain to the consumer.
//! - **Loud failure**: `push` after close returns [`QueueError::Closed`]
//!   instead of silently dropping — a source must stop producing once told
//!   the controller is ceasing.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::attribute::Attribute;
use crate::error::QueueError;

/// Result of a blocking pop.
#[derive(Debug, PartialEq)]
pub enum Popped {
    /// The next value in push order.
    Item(Attribute),
    /// The queue is closed and fully drained; no further values will arrive.
    Closed,
}

/// Producer half of the delivery queue.
///
/// Cheap to clone; every source holds its own pusher. Safe to push from any
/// number of tasks concurrently.
#[derive(Clone, Debug)]
pub struct QueuePusher {
    tx: mpsc::Sender<Attribute>,
    closed: CancellationToken,
}

impl QueuePusher {
    /// Pushes one attribute, waking a waiting consumer.
    ///
    /// Awaits channel capacity when the queue is full. Returns
    /// [`QueueError::Closed`] once the queue has been closed; the value is
    /// handed back to the drop path rather than enqueued.
    pub async fn push(&self, attribute: Attribute) -> Result<(), QueueError> {
        if self.closed.is_cancelled() {
            return Err(QueueError::Closed);
        }
        self.tx
            .send(attribute)
            .await
            .map_err(|_| QueueError::Closed)
    }

    /// True once the queue has been closed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }
}

/// Consumer half of the delivery queue.
///
/// Exactly one consumer exists: the controller's dispatch loop. `pop` takes
/// `&mut self`, which makes the single-consumer contract a compile-time fact.
#[derive(Debug)]
pub struct DeliveryQueue {
    rx: mpsc::Receiver<Attribute>,
    closed: CancellationToken,
}

impl DeliveryQueue {
    /// Creates a bounded queue and its producer half.
    ///
    /// Capacity is clamped to a minimum of 1.
    pub fn bounded(capacity: usize) -> (Self, QueuePusher) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let closed = CancellationToken::new();
        let pusher = QueuePusher {
            tx,
            closed: closed.clone(),
        };
        (Self { rx, closed }, pusher)
    }

    /// Blocks until a value is available or the queue is closed **and**
    /// drained.
    ///
    /// After close, values that were already queued are still returned in
    /// order; only then does `pop` yield [`Popped::Closed`]. This is the
    /// graceful-drain guarantee: no silently-dropped in-flight readings.
    pub async fn pop(&mut self) -> Popped {
        loop {
            if self.closed.is_cancelled() {
                // Reject any further sends while keeping buffered values
                // available for draining.
                self.rx.close();
                return match self.rx.recv().await {
                    Some(attribute) => Popped::Item(attribute),
                    None => Popped::Closed,
                };
            }
            tokio::select! {
                received = self.rx.recv() => {
                    return match received {
                        Some(attribute) => Popped::Item(attribute),
                        None => Popped::Closed,
                    };
                }
                _ = self.closed.cancelled() => {
                    // Fall through to the drain path above.
                }
            }
        }
    }

    /// Closes the queue. Idempotent.
    ///
    /// Pending `pop` calls unblock after the drain; subsequent pushes are
    /// rejected with [`QueueError::Closed`].
    pub fn close(&self) {
        self.closed.cancel();
    }

    /// True once the queue has been closed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    /// Token observed by the close path.
    ///
    /// The controller shares this token with its cease handle and its
    /// sources' stop tokens, so one cancellation ceases the whole pipeline.
    pub fn close_token(&self) -> CancellationToken {
        self.closed.clone()
    }
}
