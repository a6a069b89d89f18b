//! Error types used by the hub runtime and plugins.
//!
//! This module defines three error enums:
//!
//! - [`HubError`] — errors raised by the controller/supervisor runtime itself.
//! - [`SinkError`] — errors raised by individual sink deliveries.
//! - [`QueueError`] — errors raised by the delivery queue.
//!
//! [`HubError`] and [`SinkError`] provide an `as_label` helper producing a
//! short stable snake_case label for logs.

use std::time::Duration;
use thiserror::Error;

/// Errors produced by the hub runtime.
///
/// Registration failures are fatal to the run that observed them: the
/// controller refuses to enter `Running` and the caller decides whether to
/// retry via the restart loop.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HubError {
    /// A plugin failed to initialize during startup.
    #[error("plugin '{plugin}' failed to initialize: {reason}")]
    Registration {
        /// Name of the plugin that failed.
        plugin: String,
        /// Why initialization failed.
        reason: String,
    },

    /// An operation was invoked in a controller state that forbids it
    /// (e.g. registering a plugin after the event loop started).
    #[error("operation '{operation}' is invalid in controller state '{state}'")]
    InvalidState {
        /// The operation that was attempted.
        operation: &'static str,
        /// The controller state at the time of the call.
        state: &'static str,
    },

    /// OS signal listener registration failed.
    #[error("signal handling unavailable: {0}")]
    Signal(#[from] std::io::Error),
}

impl HubError {
    /// Creates a registration error for the named plugin.
    pub fn registration(plugin: impl Into<String>, reason: impl Into<String>) -> Self {
        HubError::Registration {
            plugin: plugin.into(),
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use telehub::HubError;
    ///
    /// let err = HubError::registration("pokey", "device not found");
    /// assert_eq!(err.as_label(), "hub_registration");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HubError::Registration { .. } => "hub_registration",
            HubError::InvalidState { .. } => "hub_invalid_state",
            HubError::Signal(_) => "hub_signal",
        }
    }
}

/// Errors produced by a single sink delivery.
///
/// These are isolated by the controller: a failing sink never prevents
/// delivery to subsequent sinks, and no redelivery is attempted for the
/// same value.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SinkError {
    /// Delivery did not complete within the sink's bound.
    ///
    /// Raised by the controller's boundary timeout rather than the sink
    /// itself, so a stalled sink cannot hold up later values.
    #[error("delivery timed out after {timeout:?}")]
    Timeout {
        /// The bound that was exceeded.
        timeout: Duration,
    },

    /// Delivery failed; the value is not retried.
    #[error("delivery failed: {reason}")]
    Failed {
        /// The underlying failure message.
        reason: String,
    },

    /// The sink does not handle this value variant and chose to reject it
    /// explicitly instead of silently ignoring it.
    #[error("unsupported value kind '{kind}'")]
    Unsupported {
        /// The rejected variant label (see `AttributeValue::kind`).
        kind: &'static str,
    },
}

impl SinkError {
    /// Creates a failure error from any displayable cause.
    pub fn failed(reason: impl Into<String>) -> Self {
        SinkError::Failed {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SinkError::Timeout { .. } => "sink_timeout",
            SinkError::Failed { .. } => "sink_failed",
            SinkError::Unsupported { .. } => "sink_unsupported",
        }
    }
}

/// Errors produced by the delivery queue.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueueError {
    /// A push was attempted after the queue was closed.
    ///
    /// Signals a race between a source and shutdown; callers log a warning
    /// and stop producing.
    #[error("delivery queue is closed")]
    Closed,
}
