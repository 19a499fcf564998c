//! Connection supervisor.
//!
//! Owns the single transport client across connects, reconnects, and
//! process signals. One client exists at a time: it is created lazily on
//! `start`, and the transport's close notification clears the handle so
//! the next `start` builds a fresh one; that is the whole reconnect
//! mechanism. Reconnection is immediate and unconditional unless a stop
//! was requested; there is no backoff or attempt cap (known limitation,
//! a persistently unreachable endpoint will be re-dialed in a tight loop).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use rocketbot_hooks::HookRegistry;

use crate::transport::{Transport, TransportFactory};

/// Where the supervisor currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No live connection.
    Stopped,
    /// A connection is up (or being established).
    Running,
    /// A stop was asked for; waiting for the transport to close.
    StopRequested,
}

struct SupervisorState {
    phase: ConnectionState,
    client: Option<Arc<dyn Transport>>,
}

/// Process-wide connection supervisor.
///
/// Constructed once by the embedding process and driven by [`Server::run`],
/// which only returns if signal registration fails; in normal operation
/// the process ends via a trapped termination signal.
pub struct Server {
    hooks: Arc<HookRegistry>,
    url: String,
    factory: TransportFactory,
    // Client slot and phase share one lock: close notifications, stop
    // requests, and lazy creation all race here (the signal handler can
    // run at any point), and which client is "current" must stay coherent.
    state: Mutex<SupervisorState>,
    signals_armed: AtomicBool,
}

impl Server {
    pub fn new(hooks: HookRegistry, url: impl Into<String>, factory: TransportFactory) -> Arc<Self> {
        Arc::new(Self {
            hooks: Arc::new(hooks),
            url: url.into(),
            factory,
            state: Mutex::new(SupervisorState {
                phase: ConnectionState::Stopped,
                client: None,
            }),
            signals_armed: AtomicBool::new(false),
        })
    }

    /// The long-lived entry point: arm signal handlers, then connect and
    /// reconnect forever.
    pub async fn run(self: &Arc<Self>) -> anyhow::Result<()> {
        info!(url = %self.url, "supervisor starting");
        loop {
            // Re-arming every iteration is redundant but harmless; the
            // watcher is only spawned once.
            self.install_signal_handlers()?;
            self.start().await;
        }
    }

    /// One connection lifetime: clear any pending stop request, obtain the
    /// client (creating it if absent), and block until the connection ends.
    /// Normally driven by [`Server::run`].
    pub async fn start(self: &Arc<Self>) {
        {
            let mut state = self.lock_state();
            state.phase = ConnectionState::Running;
        }

        let client = self.client();
        if let Err(e) = client.connect().await {
            // A failed connect and a normal close take the same path.
            debug!("connection ended: {e}");
        }
    }

    /// Idempotently request a stop and ask the current client, if any, to
    /// close. Safe to call concurrently with an in-flight `start`; the
    /// close is cooperative, not forced.
    pub async fn stop(&self) {
        let client = {
            let mut state = self.lock_state();
            state.phase = ConnectionState::StopRequested;
            state.client.clone()
        };

        match client {
            Some(client) => client.request_close().await,
            None => debug!("stop requested with no active client"),
        }
    }

    /// Current lifecycle phase.
    pub fn state(&self) -> ConnectionState {
        self.lock_state().phase
    }

    /// Current client, lazily constructed. The close notification wired
    /// here clears the slot, which is what makes the *next* call build a
    /// brand-new client.
    fn client(self: &Arc<Self>) -> Arc<dyn Transport> {
        let mut state = self.lock_state();
        if let Some(client) = &state.client {
            return Arc::clone(client);
        }

        debug!(url = %self.url, "creating transport client");
        let client = (self.factory)(Arc::clone(&self.hooks), &self.url);

        let server = Arc::downgrade(self);
        client.on_close(Box::new(move || {
            if let Some(server) = server.upgrade() {
                server.connection_closed();
            }
        }));

        state.client = Some(Arc::clone(&client));
        client
    }

    fn connection_closed(&self) {
        let mut state = self.lock_state();
        state.client = None;
        state.phase = ConnectionState::Stopped;
        debug!("transport closed, client handle dropped");
    }

    /// Spawn the watcher for interrupt/terminate. On signal: request a
    /// clean stop, then exit the process.
    fn install_signal_handlers(self: &Arc<Self>) -> anyhow::Result<()> {
        if self.signals_armed.load(Ordering::SeqCst) {
            return Ok(());
        }

        #[cfg(unix)]
        let mut terminate =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

        self.signals_armed.store(true, Ordering::SeqCst);

        let server = Arc::clone(self);
        tokio::spawn(async move {
            #[cfg(unix)]
            let signal = tokio::select! {
                _ = tokio::signal::ctrl_c() => "interrupt",
                _ = terminate.recv() => "terminate",
            };
            #[cfg(not(unix))]
            let signal = {
                let _ = tokio::signal::ctrl_c().await;
                "interrupt"
            };

            info!(signal, "termination signal received, shutting down");
            server.stop().await;
            std::process::exit(0);
        });

        Ok(())
    }

    fn lock_state(&self) -> MutexGuard<'_, SupervisorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
