//! # Process supervisor: OS signals, cease, and the in-process restart loop.
//!
//! The supervisor owns the controller's lifetime: it builds a fresh
//! [`EventController`] from a factory, runs its event loop, and — when the
//! shutdown signal asked for a reload — drops the instance and builds the
//! next one. "Exactly one active controller" is an ownership fact, not a
//! global pointer.
//!
//! ## Signal matrix
//! **Unix:**
//! - `SIGINT` / `SIGTERM` / Ctrl-C → [`ShutdownKind::Stop`]
//! - `SIGHUP` / `SIGQUIT` → [`ShutdownKind::Reload`] (destroy, rebuild
//!   controller *and* configuration, run again)
//!
//! **Non-unix:** Ctrl-C → [`ShutdownKind::Stop`].
//!
//! ## Shutdown path
//! ```text
//! signal ──► watcher task ──► ControllerHandle::cease()
//!                                   │
//!                  sources stop, queue closes, loop drains
//!                                   │
//!                 run_event_loop returns ──► drop(controller)
//!                                   │
//!                     Reload? ── yes ──► build() again
//!                         └───── no ───► supervisor returns
//! ```

use std::future::Future;

use tracing::{info, warn};

use crate::attribute::Attribute;
use crate::controller::EventController;
use crate::error::HubError;

/// What the observed shutdown signal asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownKind {
    /// End the process run; no restart.
    Stop,
    /// Destroy the controller, rebuild it (and its configuration), run again.
    Reload,
}

/// Waits for a termination or reload signal.
///
/// Each call creates independent signal listeners. Returns the requested
/// [`ShutdownKind`], or `Err` if listener registration fails.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<ShutdownKind> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;
    // SIGQUIT doubles as a keyboard shortcut for reload (ctrl+\).
    let mut sigquit = signal(SignalKind::quit())?;

    let kind = tokio::select! {
        _ = tokio::signal::ctrl_c() => ShutdownKind::Stop,
        _ = sigint.recv() => ShutdownKind::Stop,
        _ = sigterm.recv() => ShutdownKind::Stop,
        _ = sighup.recv() => ShutdownKind::Reload,
        _ = sigquit.recv() => ShutdownKind::Reload,
    };
    Ok(kind)
}

/// Waits for a termination signal.
///
/// Non-unix platforms have no reload signal; Ctrl-C always stops.
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<ShutdownKind> {
    tokio::signal::ctrl_c().await.map(|_| ShutdownKind::Stop)
}

/// Drives controller instances until a stop is requested.
#[derive(Debug, Default)]
pub struct Supervisor;

impl Supervisor {
    /// Creates a new supervisor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Runs the restart loop against OS signals.
    ///
    /// `build` is called once per cycle and should assemble a fresh
    /// controller from freshly loaded configuration; `on_delivered` is the
    /// per-value result callback handed to every event loop.
    ///
    /// Returns when a stop was requested, or with the first build/startup
    /// error (the supervisor does not retry failed startups).
    pub async fn run<B, F>(&self, build: B, on_delivered: F) -> Result<(), HubError>
    where
        B: FnMut() -> Result<EventController, HubError>,
        F: FnMut(&Attribute, bool),
    {
        self.run_with(build, on_delivered, wait_for_shutdown_signal)
            .await
    }

    /// Restart loop with an injectable shutdown future, the seam the OS
    /// signal boundary plugs into.
    pub(crate) async fn run_with<B, F, S, Fut>(
        &self,
        mut build: B,
        mut on_delivered: F,
        mut shutdown: S,
    ) -> Result<(), HubError>
    where
        B: FnMut() -> Result<EventController, HubError>,
        F: FnMut(&Attribute, bool),
        S: FnMut() -> Fut,
        Fut: Future<Output = std::io::Result<ShutdownKind>> + Send + 'static,
    {
        loop {
            let mut controller = build()?;
            let handle = controller.handle();

            let watcher = tokio::spawn({
                let shutdown = shutdown();
                async move {
                    let kind = match shutdown.await {
                        Ok(kind) => kind,
                        Err(err) => {
                            warn!(error = %err, "signal listener failed; stopping");
                            ShutdownKind::Stop
                        }
                    };
                    match kind {
                        ShutdownKind::Stop => info!("shutdown requested, ceasing event loop"),
                        ShutdownKind::Reload => info!("reload requested, ceasing event loop"),
                    }
                    handle.cease();
                    kind
                }
            });

            if let Err(err) = controller.run_event_loop(&mut on_delivered).await {
                watcher.abort();
                let _ = watcher.await;
                return Err(err);
            }

            // The loop only returns after cease, so the watcher has resolved
            // (or is about to); a join failure degrades to a plain stop.
            let kind = watcher.await.unwrap_or(ShutdownKind::Stop);

            // Previous instance is fully destroyed before any rebuild; no
            // plugin or queue state survives into the next cycle.
            drop(controller);

            match kind {
                ShutdownKind::Reload => {
                    info!("rebuilding controller");
                }
                ShutdownKind::Stop => return Ok(()),
            }
        }
    }
}
