//! rocketbot-hooks: per-bot-definition event hook registry.
//!
//! A bot definition owns one [`HookRegistry`]: an ordered mapping from
//! event names (lifecycle and protocol events) to callback chains. Hooks
//! run in registration order. Every fresh registry carries the built-in
//! keepalive hook that answers the service's `ping`.

pub mod event;
pub mod registry;

pub use registry::{HookContext, HookHandler, HookRegistry};
