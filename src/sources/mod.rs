//! Source capabilities: plugins that produce attributes asynchronously.
//!
//! ## Contents
//! - [`Source`] — the producer contract (non-blocking `start`, idempotent
//!   `stop`).
//! - [`PollSource`] — closure-driven interval poller (device-poller shape).
//! - [`SimStateSource`] — synthetic simulator-state feed for demos and
//!   end-to-end runs without hardware.
//!
//! Every source owns its production task; the controller only hands it a
//! queue pusher and a stop token. See `controller/core.rs` for the wiring.

mod poller;
mod sim;
mod source;

pub use poller::PollSource;
pub use sim::SimStateSource;
pub use source::Source;
