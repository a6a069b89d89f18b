//! # NullSink — discard all values
//!
//! Accepts every attribute and does nothing with it. Used for throughput
//! checks and as an always-succeeding delivery target in mixed sink sets.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::attribute::Attribute;
use crate::error::SinkError;
use crate::sinks::Sink;

/// Sink that discards everything, counting what it saw.
#[derive(Debug, Default)]
pub struct NullSink {
    delivered: AtomicU64,
}

impl NullSink {
    /// Constructs a new [`NullSink`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of values accepted so far.
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Sink for NullSink {
    fn name(&self) -> &str {
        "null"
    }

    async fn deliver(&self, _attribute: &Attribute) -> Result<(), SinkError> {
        self.delivered.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
