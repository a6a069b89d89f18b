//! # ConsoleSink — human-readable line output
//!
//! Prints each delivered attribute to stdout. Useful for demos, smoke
//! tests, and as the "hardware display" stand-in when no panel is attached.
//!
//! ## Example output
//! ```text
//! [telehub] speed=121.4 (sim)
//! [telehub] gear_down=true (poller)
//! ```

use async_trait::async_trait;

use crate::attribute::Attribute;
use crate::error::SinkError;
use crate::sinks::Sink;

/// Line-per-value stdout sink.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    /// Constructs a new [`ConsoleSink`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Sink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    async fn deliver(&self, attribute: &Attribute) -> Result<(), SinkError> {
        println!("[telehub] {attribute}");
        Ok(())
    }
}
