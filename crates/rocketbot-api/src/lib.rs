//! rocketbot-api: realtime RPC encoder.
//!
//! Maps named high-level intents ("log in", "join a room", "list channels")
//! onto the service's canonical method-call payloads, validating and
//! defaulting arguments along the way. Every operation is described by a
//! static schema ([`schema`]) interpreted by one generic encode routine, so
//! adding an operation is a data change.
//!
//! Encoders are pure: they produce a connection-agnostic [`MethodCall`]
//! value and never touch the transport.
//!
//! ```
//! use rocketbot_api::{args, methods};
//!
//! let call = methods::join_channel(&args! { room_id: "GENERAL" }).unwrap();
//! assert_eq!(call.method, "joinRoom");
//! ```

pub mod methods;
mod schema;

use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;

pub use rocketbot_types::MethodCall;

/// Validation failure raised by an encoder. Always local and recoverable
/// by the caller; never reaches the connection supervisor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),
    #[error("argument `{argument}` does not allow value {value}")]
    ArgumentNotAllowed {
        argument: &'static str,
        value: String,
    },
}

/// Ordered keyword arguments for an operation, usually built with [`args!`].
///
/// Insertion order is preserved; unknown keys are ignored by the encoders.
#[derive(Debug, Clone, Default)]
pub struct Args(Vec<(String, Value)>);

impl Args {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.push((key.into(), value));
    }

    /// Last-wins lookup, matching keyword-argument semantics.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// Keyword-argument literal for the operation encoders.
///
/// ```
/// use rocketbot_api::args;
///
/// let a = args! { filter: "dev", limit: 50 };
/// assert!(a.get("filter").is_some());
/// ```
#[macro_export]
macro_rules! args {
    () => { $crate::Args::new() };
    ($($key:ident: $value:expr),+ $(,)?) => {{
        let mut args = $crate::Args::new();
        $(args.insert(stringify!($key), $crate::__private::serde_json::json!($value));)+
        args
    }};
}

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}

/// Lowercase-hex sha-256 of a plaintext password, the digest form the
/// `login` operation expects.
pub fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_last_value_wins() {
        let mut args = Args::new();
        args.insert("status", serde_json::json!("online"));
        args.insert("status", serde_json::json!("away"));
        assert_eq!(args.get("status"), Some(&serde_json::json!("away")));
    }

    #[test]
    fn password_digest_is_hex_sha256() {
        // echo -n password | sha256sum
        assert_eq!(
            password_digest("password"),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }
}
