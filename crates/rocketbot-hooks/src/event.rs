//! Well-known event names.
//!
//! Event keys are plain strings so protocol-level event names (collection
//! changes, stream notifications, ...) can be registered without touching
//! this list.

/// Keepalive probe from the service; answered by the built-in hook.
pub const PING: &str = "ping";

/// Connection session established.
pub const CONNECTED: &str = "connected";

/// Login completed; the usual place to subscribe and join rooms.
pub const AUTHENTICATED: &str = "authenticated";

/// Connection is going away.
pub const CLOSING: &str = "closing";
