//! Event controller: dispatch loop, plugin registries, lifecycle state machine.
//!
//! The only public types from this module are [`EventController`] — the
//! explicitly owned controller instance — and [`ControllerHandle`], the
//! clonable cease handle the process supervisor uses to request shutdown
//! from its signal task.
//!
//! Internal layout:
//! - [`core`]: registration, the dispatch loop, and the
//!   `Uninitialized → Running → Ceasing → Terminated` state machine;
//! - [`handle`]: the cancellation-token wrapper shared with signal handling.

mod core;
mod handle;

pub use self::core::{ControllerState, EventController};
pub use handle::ControllerHandle;
