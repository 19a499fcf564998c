//! Shared wire types for the rocketbot runtime.
//!
//! The realtime protocol discriminates payloads on a `msg` field. The core
//! only ever *produces* two payload kinds: method calls built by the API
//! encoder, and the keepalive pong answered by the built-in ping hook.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single remote method call, ready for transmission.
///
/// Pure value: carries no correlation id and no connection reference.
/// Correlation and response matching are the transport's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    /// Remote operation name, e.g. `"login"` or `"rooms/get"`.
    pub method: String,
    /// Positional arguments. `None` means the `params` field is omitted
    /// from the wire form entirely (a few service queries expect that).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<Value>>,
}

impl MethodCall {
    /// Method call with positional arguments (possibly an empty list).
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params: Some(params),
        }
    }

    /// Method call with no `params` field at all.
    pub fn bare(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: None,
        }
    }
}

/// Outgoing payload, tagged on the protocol's `msg` discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "msg", rename_all = "lowercase")]
pub enum Outbound {
    /// Keepalive answer to the service's `ping`.
    Pong,
    /// A remote method call.
    Method(MethodCall),
}

impl From<MethodCall> for Outbound {
    fn from(call: MethodCall) -> Self {
        Outbound::Method(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_call_serializes_with_msg_tag() {
        let out = Outbound::Method(MethodCall::new("getUserRoles", vec![]));
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!({"msg": "method", "method": "getUserRoles", "params": []})
        );
    }

    #[test]
    fn bare_method_call_omits_params() {
        let out = Outbound::Method(MethodCall::bare("public-settings/get"));
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!({"msg": "method", "method": "public-settings/get"})
        );
    }

    #[test]
    fn pong_serializes_as_msg_only() {
        assert_eq!(
            serde_json::to_value(Outbound::Pong).unwrap(),
            json!({"msg": "pong"})
        );
    }
}
