//! Hook registry — ordered event→callback chains, one per bot definition.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use rocketbot_types::{MethodCall, Outbound};

use crate::event;

/// Async hook handler function type.
pub type HookHandler =
    Arc<dyn Fn(HookContext) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// What a hook sees when it runs: the event, its payload, and a way to
/// push payloads back to the transport.
#[derive(Clone)]
pub struct HookContext {
    pub event: String,
    pub payload: Value,
    outbound: mpsc::Sender<Outbound>,
}

impl HookContext {
    pub fn new(event: impl Into<String>, payload: Value, outbound: mpsc::Sender<Outbound>) -> Self {
        Self {
            event: event.into(),
            payload,
            outbound,
        }
    }

    /// Hand one payload to the transport for transmission.
    pub async fn send(&self, payload: Outbound) -> anyhow::Result<()> {
        self.outbound
            .send(payload)
            .await
            .map_err(|_| anyhow::anyhow!("outbound channel closed"))
    }

    /// Convenience for the common case: send a remote method call.
    pub async fn call(&self, call: MethodCall) -> anyhow::Result<()> {
        self.send(Outbound::Method(call)).await
    }
}

/// Ordered event→callback-chain store owned by one bot definition.
///
/// Cloning produces a *derived* definition with independent storage:
/// registrations on the clone are invisible to the original and vice
/// versa. Handlers themselves stay shared behind `Arc`s, which is fine
/// since they are immutable.
#[derive(Clone)]
pub struct HookRegistry {
    hooks: HashMap<String, Vec<HookHandler>>,
}

impl HookRegistry {
    /// Fresh registry with the built-in keepalive hook on [`event::PING`].
    pub fn new() -> Self {
        let mut registry = Self {
            hooks: HashMap::new(),
        };
        registry.on(event::PING, Arc::new(keepalive));
        registry
    }

    /// Append `handler` to the chain for `event`, creating the chain on
    /// first registration. No deduplication: a handler registered twice
    /// runs twice.
    pub fn on(&mut self, event: impl Into<String>, handler: HookHandler) {
        self.hooks.entry(event.into()).or_default().push(handler);
    }

    /// Alias for `on(event::AUTHENTICATED, ...)`.
    pub fn on_authenticated(&mut self, handler: HookHandler) {
        self.on(event::AUTHENTICATED, handler);
    }

    /// Alias for `on(event::CLOSING, ...)`.
    pub fn on_closing(&mut self, handler: HookHandler) {
        self.on(event::CLOSING, handler);
    }

    /// The ordered chain for `event`; empty when nothing is registered.
    pub fn hooks_for(&self, event: &str) -> &[HookHandler] {
        self.hooks.get(event).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Invoke the chain for `event` sequentially, in registration order.
    ///
    /// Ordering is part of the contract, so handlers are awaited one by
    /// one rather than spawned.
    pub async fn dispatch(&self, event: &str, payload: Value, outbound: &mpsc::Sender<Outbound>) {
        let chain = self.hooks_for(event);
        if chain.is_empty() {
            debug!(event, "no hooks registered");
            return;
        }

        for handler in chain {
            handler(HookContext::new(event, payload.clone(), outbound.clone())).await;
        }
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Built-in keepalive: answer `ping` with `pong`.
fn keepalive(ctx: HookContext) -> Pin<Box<dyn Future<Output = ()> + Send>> {
    Box::pin(async move {
        if let Err(e) = ctx.send(Outbound::Pong).await {
            warn!("keepalive pong not sent: {e}");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording_handler(log: Arc<Mutex<Vec<&'static str>>>, tag: &'static str) -> HookHandler {
        Arc::new(move |_ctx| {
            let log = log.clone();
            Box::pin(async move {
                log.lock().unwrap().push(tag);
            })
        })
    }

    #[test]
    fn fresh_registry_has_keepalive_hook() {
        let registry = HookRegistry::new();
        assert!(!registry.hooks_for(event::PING).is_empty());
        assert!(registry.hooks_for(event::AUTHENTICATED).is_empty());
    }

    #[test]
    fn derived_registry_does_not_share_storage() {
        let log = Arc::new(Mutex::new(Vec::new()));

        let base = HookRegistry::new();
        let mut derived = base.clone();
        derived.on("test", recording_handler(log.clone(), "derived"));

        assert!(base.hooks_for("test").is_empty());
        assert_eq!(derived.hooks_for("test").len(), 1);

        // And the other direction: the base gaining a hook later must not
        // leak into the already-derived definition.
        let mut base = base;
        base.on("other", recording_handler(log, "base"));
        assert!(derived.hooks_for("other").is_empty());
    }

    #[tokio::test]
    async fn dispatch_runs_hooks_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = HookRegistry::new();
        registry.on("test", recording_handler(log.clone(), "first"));
        registry.on("test", recording_handler(log.clone(), "second"));
        // Same handler twice runs twice.
        let twice = recording_handler(log.clone(), "again");
        registry.on("test", twice.clone());
        registry.on("test", twice);

        let (tx, _rx) = mpsc::channel(8);
        registry.dispatch("test", Value::Null, &tx).await;

        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "again", "again"]);
    }

    #[tokio::test]
    async fn aliases_register_on_the_expected_events() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = HookRegistry::new();
        registry.on_authenticated(recording_handler(log.clone(), "auth"));
        registry.on_closing(recording_handler(log.clone(), "closing"));

        assert_eq!(registry.hooks_for(event::AUTHENTICATED).len(), 1);
        assert_eq!(registry.hooks_for(event::CLOSING).len(), 1);

        let (tx, _rx) = mpsc::channel(8);
        registry.dispatch(event::AUTHENTICATED, Value::Null, &tx).await;
        assert_eq!(*log.lock().unwrap(), vec!["auth"]);
    }

    #[tokio::test]
    async fn keepalive_answers_ping_with_pong() {
        let registry = HookRegistry::new();
        let (tx, mut rx) = mpsc::channel(8);

        registry
            .dispatch(event::PING, serde_json::json!({"msg": "ping"}), &tx)
            .await;

        assert_eq!(rx.recv().await, Some(Outbound::Pong));
    }

    #[tokio::test]
    async fn hook_can_send_method_calls() {
        // The usual connected-hook job: kick off a login.
        let mut registry = HookRegistry::new();
        registry.on(
            event::CONNECTED,
            Arc::new(|ctx| {
                Box::pin(async move {
                    let _ = ctx.call(MethodCall::new("login", vec![])).await;
                })
            }),
        );

        let (tx, mut rx) = mpsc::channel(8);
        registry.dispatch(event::CONNECTED, Value::Null, &tx).await;

        match rx.recv().await {
            Some(Outbound::Method(call)) => assert_eq!(call.method, "login"),
            other => panic!("expected method call, got {other:?}"),
        }
    }
}
