//! # Telemetry attribute: the value record flowing through the hub.
//!
//! An [`Attribute`] is an immutable reading produced by a source: a stable
//! key naming what is measured, a tagged [`AttributeValue`] payload, and the
//! origin of the producing source for diagnostics.
//!
//! ## Rules
//! - Once constructed, an attribute is never mutated; the dispatch loop and
//!   every sink it calls read the same record.
//! - Cloning is cheap: the key and origin are `Arc<str>`.
//! - No retained history: after dispatch to all sinks the value is dropped.
//!
//! ## Example
//! ```rust
//! use telehub::{Attribute, AttributeValue};
//!
//! let attr = Attribute::new("speed", AttributeValue::Int(120)).with_origin("sim");
//!
//! assert_eq!(attr.name(), "speed");
//! assert_eq!(attr.origin(), "sim");
//! assert_eq!(attr.value().kind(), "int");
//! ```

use std::fmt;
use std::sync::Arc;

/// Tagged payload of an attribute.
///
/// Sinks must handle every variant or reject unsupported ones explicitly
/// with `SinkError::Unsupported`.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Boolean state (e.g. a switch position).
    Bool(bool),
    /// Integer gauge (e.g. rounded airspeed).
    Int(i64),
    /// Floating-point gauge (e.g. altitude in feet).
    Float(f64),
    /// Free-form text (e.g. a phrase for a speech sink).
    Text(Arc<str>),
}

impl AttributeValue {
    /// Returns a short stable label for the variant, for logs and
    /// `SinkError::Unsupported`.
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Int(_) => "int",
            AttributeValue::Float(_) => "float",
            AttributeValue::Text(_) => "text",
        }
    }

    /// Creates a text value from anything string-like.
    pub fn text(s: impl Into<Arc<str>>) -> Self {
        AttributeValue::Text(s.into())
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(v) => write!(f, "{v}"),
            AttributeValue::Int(v) => write!(f, "{v}"),
            AttributeValue::Float(v) => write!(f, "{v}"),
            AttributeValue::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        AttributeValue::Bool(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Int(v)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Float(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::Text(Arc::from(v))
    }
}

/// Immutable telemetry value record.
///
/// Identity (`name`), payload (`value`), and producing source (`origin`).
/// Ownership transfers into the delivery queue on push; the dispatch loop
/// borrows it out to every sink in turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: Arc<str>,
    value: AttributeValue,
    origin: Arc<str>,
}

impl Attribute {
    /// Creates an attribute with an unknown origin.
    ///
    /// Sources normally attach themselves via [`Attribute::with_origin`].
    pub fn new(name: impl Into<Arc<str>>, value: impl Into<AttributeValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            origin: Arc::from("unknown"),
        }
    }

    /// Attaches the producing source's name.
    #[inline]
    pub fn with_origin(mut self, origin: impl Into<Arc<str>>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Stable key identifying what is measured.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tagged payload.
    #[inline]
    pub fn value(&self) -> &AttributeValue {
        &self.value
    }

    /// Name of the producing source, for diagnostics.
    #[inline]
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.name, self.value, self.origin)
    }
}
