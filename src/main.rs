//! telehub - telemetry event hub
//!
//! # Usage
//!
//! ```bash
//! # Run with the default config
//! telehub
//!
//! # Explicit config and log level
//! telehub --config configs/telehub.toml --log-level debug
//! ```
//!
//! SIGINT/SIGTERM stop the hub; SIGHUP (or SIGQUIT, i.e. ctrl+\) reloads
//! the configuration and rebuilds the whole plugin set in-process.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use telehub::{
    ConsoleSink, EventController, HubConfig, HubError, NullSink, SimStateSource, SinkConfig,
    SourceConfig, Supervisor,
};

/// telehub - telemetry event hub
#[derive(Parser, Debug)]
#[command(name = "telehub")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "configs/telehub.toml")]
    config: std::path::PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let supervisor = Supervisor::new();
    let config_path = cli.config.clone();

    supervisor
        .run(
            // Rebuilt per cycle: a reload re-reads the file, so config
            // edits take effect on the next controller.
            move || {
                let config = HubConfig::load(&config_path)
                    .map_err(|err| HubError::registration("config", err.to_string()))?;
                build_controller(&config)
            },
            |attribute, delivered| {
                if delivered {
                    debug!(attribute = %attribute, "delivered");
                } else {
                    warn!(attribute = %attribute, "value reached no sink");
                }
            },
        )
        .await?;

    Ok(())
}

/// Assembles a controller from configuration: the runtime-registered
/// capability list. Optional sinks are just entries that are present or
/// absent in the config, not compile-time features.
fn build_controller(config: &HubConfig) -> Result<EventController, HubError> {
    let mut controller = EventController::new(config.queue_capacity);
    if let Some(bound) = config.sink_timeout() {
        controller = controller.with_sink_timeout(bound);
    }

    for (name, source) in config.sources.iter() {
        match source {
            SourceConfig::Sim(sim) => {
                controller
                    .register_source(Box::new(SimStateSource::new(name.clone(), sim.interval())))?;
            }
        }
    }

    for (name, sink) in config.sinks.iter() {
        match sink {
            SinkConfig::Console(_) => controller.register_sink(Arc::new(ConsoleSink::new()))?,
            SinkConfig::Null(_) => controller.register_sink(Arc::new(NullSink::new()))?,
        }
        debug!(sink = %name, "sink configured");
    }

    Ok(controller)
}

/// Initialize the tracing subscriber for logging.
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();

    Ok(())
}
