//! # Hub configuration
//!
//! TOML-based configuration with sensible defaults: a minimal config only
//! names the plugins to run. The controller never parses configuration —
//! the binary loads a [`HubConfig`] and assembles the plugin list from it.
//!
//! ## Example
//! ```toml
//! queue_capacity = 256
//! sink_timeout_ms = 2000
//!
//! [sources.sim]
//! type = "sim"
//! interval_ms = 250
//!
//! [sinks.console]
//! type = "console"
//!
//! [sinks.drain]
//! type = "null"
//! ```
//!
//! A reload signal re-reads the file, so edits take effect on the next
//! controller cycle without a process restart.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Errors produced while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config file '{path}': {source}")]
    Io {
        /// Path that failed to load.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The parsed config cannot produce a runnable hub.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level hub configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Delivery queue capacity (values buffered between sources and the
    /// dispatch loop). Clamped to a minimum of 1 by the queue.
    pub queue_capacity: usize,

    /// Global per-sink delivery bound in milliseconds. `0` keeps each
    /// sink's own `deliver_timeout`.
    pub sink_timeout_ms: u64,

    /// Named source plugin instances.
    pub sources: SourcesConfig,

    /// Named sink plugin instances.
    pub sinks: SinksConfig,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 256,
            sink_timeout_ms: 2_000,
            sources: SourcesConfig::default(),
            sinks: SinksConfig::default(),
        }
    }
}

impl HubConfig {
    /// Loads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = raw.parse()?;
        config.validate()?;
        Ok(config)
    }

    /// Global sink timeout override, `None` when disabled.
    pub fn sink_timeout(&self) -> Option<Duration> {
        (self.sink_timeout_ms > 0).then(|| Duration::from_millis(self.sink_timeout_ms))
    }

    /// Checks the config can produce a runnable hub: at least one source
    /// and one sink, with sane per-plugin settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::Invalid("no sources configured".into()));
        }
        if self.sinks.is_empty() {
            return Err(ConfigError::Invalid("no sinks configured".into()));
        }
        for (name, source) in self.sources.iter() {
            source.validate(name)?;
        }
        Ok(())
    }
}

impl FromStr for HubConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

/// Container for named source instances.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    #[serde(flatten)]
    sources: HashMap<String, SourceConfig>,
}

impl SourcesConfig {
    /// Iterates over all configured sources.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SourceConfig)> {
        self.sources.iter()
    }

    /// Number of configured sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// True when no sources are configured.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Configuration for a single source instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Synthetic simulator-state feed.
    Sim(SimSourceConfig),
}

impl SourceConfig {
    fn validate(&self, name: &str) -> Result<(), ConfigError> {
        match self {
            SourceConfig::Sim(sim) => {
                if sim.interval_ms == 0 {
                    return Err(ConfigError::Invalid(format!(
                        "source '{name}': interval_ms must be > 0"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Settings for a [`SourceConfig::Sim`] source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimSourceConfig {
    /// Milliseconds between state ticks.
    pub interval_ms: u64,
}

impl Default for SimSourceConfig {
    fn default() -> Self {
        Self { interval_ms: 250 }
    }
}

impl SimSourceConfig {
    /// Tick interval as a `Duration`.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Container for named sink instances.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SinksConfig {
    #[serde(flatten)]
    sinks: HashMap<String, SinkConfig>,
}

impl SinksConfig {
    /// Iterates over all configured sinks.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SinkConfig)> {
        self.sinks.iter()
    }

    /// Number of configured sinks.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// True when no sinks are configured.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

/// Configuration for a single sink instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SinkConfig {
    /// Human-readable stdout sink.
    Console(ConsoleSinkConfig),
    /// Discard-everything sink.
    Null(NullSinkConfig),
}

/// Settings for a [`SinkConfig::Console`] sink (currently none).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConsoleSinkConfig {}

/// Settings for a [`SinkConfig::Null`] sink (currently none).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NullSinkConfig {}
