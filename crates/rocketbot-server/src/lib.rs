//! rocketbot-server: connection supervision for the realtime bot runtime.
//!
//! The [`Server`] owns the single transport client, reconnects on closure,
//! and traps process termination signals for a clean stop. The transport
//! itself lives behind the [`Transport`] trait; the supervisor only
//! requires connect/request-close/notify-on-close/send of it.
//!
//! ```rust,ignore
//! use rocketbot_hooks::HookRegistry;
//! use rocketbot_server::Server;
//!
//! let mut hooks = HookRegistry::new();
//! hooks.on_authenticated(/* join rooms, subscribe, ... */);
//!
//! let server = Server::new(hooks, config.websocket_url()?, websocket_factory());
//! server.run().await?; // returns only on signal-registration failure
//! ```

pub mod server;
pub mod transport;

pub use server::{ConnectionState, Server};
pub use transport::{CloseHandler, Transport, TransportFactory};
