//! Sink capabilities: plugins that deliver attributes to external destinations.
//!
//! ## Contents
//! - [`Sink`] — the consumer contract (bounded, fault-contained `deliver`).
//! - [`ConsoleSink`] — human-readable line output.
//! - [`NullSink`] — accepts and discards everything.
//!
//! Sinks are invoked sequentially in registration order on the dispatch
//! task; see `controller/core.rs` for the isolation and timeout rules.

mod console;
mod null;
mod sink;

pub use console::ConsoleSink;
pub use null::NullSink;
pub use sink::Sink;
