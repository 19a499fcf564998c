//! The closed family of remote operations.
//!
//! One public function per operation. Arguments arrive as keyword-style
//! [`Args`]; each function's schema lives next to it as static data and is
//! interpreted by [`schema::encode`]. Wire method names are the service's
//! canonical ones (`joinRoom`, `rooms/get`, ...), which is why several
//! differ from the snake_case intent names.

use serde_json::json;

use rocketbot_types::MethodCall;

use crate::schema::{self, DefaultValue, OpSpec, ParamSpec, Shape};
use crate::{ApiError, Args};

/// `login` — authenticate the connection.
///
/// Exactly one of two credential forms: a resume `token`, or a `username`
/// plus sha-256 `digest` (see [`crate::password_digest`]). When both are
/// supplied the token wins and the credential pair is ignored.
pub fn login(args: &Args) -> Result<MethodCall, ApiError> {
    if let Some(token) = args.get("token") {
        return Ok(MethodCall::new("login", vec![json!({ "resume": token })]));
    }

    match (args.get("username"), args.get("digest")) {
        (Some(username), Some(digest)) => Ok(MethodCall::new(
            "login",
            vec![json!({
                "user": { "username": username },
                "password": { "digest": digest, "algorithm": "sha-256" },
            })],
        )),
        _ => Err(ApiError::MissingArgument("token or username+digest")),
    }
}

/// `registerUser` — create an account. `secret_url` is only included when
/// the server requires a secret registration URL.
pub fn register_user(args: &Args) -> Result<MethodCall, ApiError> {
    const SPEC: OpSpec = OpSpec {
        method: "registerUser",
        shape: Shape::Bundle,
        params: &[
            ParamSpec::new("email").required(),
            ParamSpec::new("pass").required(),
            ParamSpec::new("name").required(),
            ParamSpec::new("secret_url").wire("secretURL"),
        ],
    };
    schema::encode(&SPEC, args)
}

/// `subscriptions/get` — subscriptions changed since the marker
/// (epoch 0 when unspecified, i.e. all of them).
pub fn get_subscriptions(args: &Args) -> Result<MethodCall, ApiError> {
    const SPEC: OpSpec = OpSpec {
        method: "subscriptions/get",
        shape: Shape::Positional,
        params: &[ParamSpec::new("since").default(DefaultValue::Int(0)).date_marker()],
    };
    schema::encode(&SPEC, args)
}

/// `rooms/get` — rooms changed since the marker (epoch 0 when unspecified).
pub fn get_rooms(args: &Args) -> Result<MethodCall, ApiError> {
    const SPEC: OpSpec = OpSpec {
        method: "rooms/get",
        shape: Shape::Positional,
        params: &[ParamSpec::new("since").default(DefaultValue::Int(0)).date_marker()],
    };
    schema::encode(&SPEC, args)
}

/// `permissions/get`
pub fn get_permissions() -> MethodCall {
    MethodCall::new("permissions/get", vec![])
}

/// `getUserRoles`
pub fn get_user_roles() -> MethodCall {
    MethodCall::new("getUserRoles", vec![])
}

/// `readMessages`
pub fn read_messages() -> MethodCall {
    MethodCall::new("readMessages", vec![])
}

/// `public-settings/get` — one of the parameterless service queries that
/// expects no `params` field at all.
pub fn get_public_settings() -> MethodCall {
    MethodCall::bare("public-settings/get")
}

/// `getRoomRoles`
pub fn room_roles(args: &Args) -> Result<MethodCall, ApiError> {
    const SPEC: OpSpec = OpSpec {
        method: "getRoomRoles",
        shape: Shape::Positional,
        params: &[ParamSpec::new("room_id").required()],
    };
    schema::encode(&SPEC, args)
}

/// `UserPresence:setDefaultStatus`
pub fn set_presence(args: &Args) -> Result<MethodCall, ApiError> {
    const SPEC: OpSpec = OpSpec {
        method: "UserPresence:setDefaultStatus",
        shape: Shape::Positional,
        params: &[ParamSpec::new("status")
            .required()
            .one_of(&["online", "away", "busy", "offline"])],
    };
    schema::encode(&SPEC, args)
}

/// `createDirectMessage`
pub fn create_direct_message(args: &Args) -> Result<MethodCall, ApiError> {
    const SPEC: OpSpec = OpSpec {
        method: "createDirectMessage",
        shape: Shape::Positional,
        params: &[ParamSpec::new("username").required()],
    };
    schema::encode(&SPEC, args)
}

/// `createChannel` — `users` must be a list, not a scalar.
pub fn create_channel(args: &Args) -> Result<MethodCall, ApiError> {
    const SPEC: OpSpec = OpSpec {
        method: "createChannel",
        shape: Shape::Positional,
        params: &[
            ParamSpec::new("name").required(),
            ParamSpec::new("users").required().list(),
            ParamSpec::new("read_only").default(DefaultValue::Bool(false)),
        ],
    };
    schema::encode(&SPEC, args)
}

/// `createPrivateGroup` — `users` must be a list, not a scalar.
pub fn create_private_group(args: &Args) -> Result<MethodCall, ApiError> {
    const SPEC: OpSpec = OpSpec {
        method: "createPrivateGroup",
        shape: Shape::Positional,
        params: &[
            ParamSpec::new("name").required(),
            ParamSpec::new("users").required().list(),
        ],
    };
    schema::encode(&SPEC, args)
}

macro_rules! single_room_op {
    ($(#[$meta:meta])* $fn_name:ident => $method:literal) => {
        $(#[$meta])*
        pub fn $fn_name(args: &Args) -> Result<MethodCall, ApiError> {
            const SPEC: OpSpec = OpSpec {
                method: $method,
                shape: Shape::Positional,
                params: &[ParamSpec::new("room_id").required()],
            };
            schema::encode(&SPEC, args)
        }
    };
}

single_room_op!(
    /// `eraseRoom`
    erase_room => "eraseRoom"
);
single_room_op!(
    /// `archiveRoom`
    archive_room => "archiveRoom"
);
single_room_op!(
    /// `unarchiveRoom`
    unarchive_room => "unarchiveRoom"
);
single_room_op!(
    /// `leaveRoom`
    leave_room => "leaveRoom"
);
single_room_op!(
    /// `hideRoom`
    hide_room => "hideRoom"
);
single_room_op!(
    /// `openRoom`
    open_room => "openRoom"
);

/// `joinRoom` — `join_code` is appended only when the channel needs one.
pub fn join_channel(args: &Args) -> Result<MethodCall, ApiError> {
    const SPEC: OpSpec = OpSpec {
        method: "joinRoom",
        shape: Shape::Positional,
        params: &[
            ParamSpec::new("room_id").required(),
            ParamSpec::new("join_code"),
        ],
    };
    schema::encode(&SPEC, args)
}

/// `sendMessage` — the one operation whose arguments travel as a single
/// structured object (`message_id`, `rid`, `msg` in that order).
pub fn send_message(args: &Args) -> Result<MethodCall, ApiError> {
    const SPEC: OpSpec = OpSpec {
        method: "sendMessage",
        shape: Shape::Bundle,
        params: &[
            ParamSpec::new("message_id").required(),
            ParamSpec::new("room_id").required().wire("rid"),
            ParamSpec::new("msg").required(),
        ],
    };
    schema::encode(&SPEC, args)
}

/// `loadHistory` — the unused end-timestamp slot stays an explicit null,
/// which is what the service expects.
pub fn load_history(args: &Args) -> Result<MethodCall, ApiError> {
    const SPEC: OpSpec = OpSpec {
        method: "loadHistory",
        shape: Shape::Positional,
        params: &[
            ParamSpec::new("room_id").required(),
            ParamSpec::new("end").default(DefaultValue::Null),
            ParamSpec::new("limit").default(DefaultValue::Int(50)),
            ParamSpec::new("since").default(DefaultValue::Int(0)).date_marker(),
        ],
    };
    schema::encode(&SPEC, args)
}

/// `getRoomIdByNameOrId`
pub fn get_room_id(args: &Args) -> Result<MethodCall, ApiError> {
    const SPEC: OpSpec = OpSpec {
        method: "getRoomIdByNameOrId",
        shape: Shape::Positional,
        params: &[ParamSpec::new("room").required()],
    };
    schema::encode(&SPEC, args)
}

/// `channelsList` — positional order is filter, type, limit, sort_by.
pub fn channels_list(args: &Args) -> Result<MethodCall, ApiError> {
    const SPEC: OpSpec = OpSpec {
        method: "channelsList",
        shape: Shape::Positional,
        params: &[
            ParamSpec::new("filter").required(),
            ParamSpec::new("type")
                .default(DefaultValue::Str("public"))
                .one_of(&["public", "private"]),
            ParamSpec::new("limit").default(DefaultValue::Int(500)),
            ParamSpec::new("sort_by")
                .default(DefaultValue::Str("name"))
                .one_of(&["name", "msgs"]),
        ],
    };
    schema::encode(&SPEC, args)
}

/// `getUsersOfRoom` — the second slot is the literal string "false"
/// (show offline members), preserved from the service's contract.
pub fn get_users_of_room(args: &Args) -> Result<MethodCall, ApiError> {
    const SPEC: OpSpec = OpSpec {
        method: "getUsersOfRoom",
        shape: Shape::Positional,
        params: &[
            ParamSpec::new("room_id").required(),
            ParamSpec::new("show_all").default(DefaultValue::Str("false")),
        ],
    };
    schema::encode(&SPEC, args)
}
