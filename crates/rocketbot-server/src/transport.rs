//! Transport client boundary.
//!
//! The supervisor does not know about framing, handshakes, or sockets; it
//! only requires this narrow contract of whatever owns the duplex
//! connection. Implementations use `&self` with interior mutability.

use std::sync::Arc;

use rocketbot_hooks::HookRegistry;
use rocketbot_types::Outbound;

/// Callback invoked exactly once when the connection ends, regardless of
/// cause (peer close, error, or requested close).
pub type CloseHandler = Box<dyn Fn() + Send + Sync>;

/// Builds a transport client for one connection lifetime.
///
/// Receives the bot definition's hook registry (the transport dispatches
/// protocol events to it) and the websocket address to dial. Construction
/// must not perform I/O; connecting happens in [`Transport::connect`].
pub type TransportFactory = Box<dyn Fn(Arc<HookRegistry>, &str) -> Arc<dyn Transport> + Send + Sync>;

/// The external collaborator owning the actual network connection.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Run the connection. Resolves only when it ends: closed by the
    /// peer, by error, or by [`Transport::request_close`]. An `Err` here
    /// means the connection failed; the supervisor treats it exactly like
    /// a normal close.
    async fn connect(&self) -> anyhow::Result<()>;

    /// Ask the connection to close cooperatively. Idempotent, safe to
    /// call at any time, including while `connect` is in flight.
    async fn request_close(&self);

    /// Register the close notification. The supervisor uses this to learn
    /// that its client handle is dead.
    fn on_close(&self, handler: CloseHandler);

    /// Transmit one payload. Success or failure of the remote call itself
    /// is not the supervisor's concern.
    async fn send(&self, payload: Outbound) -> anyhow::Result<()>;
}
