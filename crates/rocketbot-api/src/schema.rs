//! Declarative operation schemas and the generic encode routine.
//!
//! Each remote operation is a static [`OpSpec`]: a wire method name, a
//! wire shape, and an ordered parameter list with per-parameter
//! requiredness, defaults, constraints, and rendering. `encode` interprets
//! an [`OpSpec`] against caller-supplied [`Args`].

use serde_json::{Map, Value, json};

use rocketbot_types::MethodCall;

use crate::{ApiError, Args};

/// How an operation's arguments are laid out on the wire.
///
/// The handful of queries that expect no `params` field at all skip the
/// schema entirely and use [`MethodCall::bare`].
pub(crate) enum Shape {
    /// Ordered positional list, one slot per parameter (possibly empty).
    Positional,
    /// All parameters folded into a single object, keys in declared order.
    Bundle,
}

/// Value used when an optional parameter is not supplied.
pub(crate) enum DefaultValue {
    /// Omit the slot entirely.
    Absent,
    /// Emit an explicit null placeholder.
    Null,
    Int(i64),
    Bool(bool),
    Str(&'static str),
}

/// Structural constraint checked on supplied values.
pub(crate) enum Constraint {
    Any,
    /// Value must be one of an enumerated set of strings.
    OneOf(&'static [&'static str]),
    /// Value must be a list, not a scalar.
    List,
}

/// Wire rendering applied after validation.
pub(crate) enum Render {
    Plain,
    /// Wrap as the service's timestamp marker: `{"$date": <value>}`.
    DateMarker,
}

pub(crate) struct ParamSpec {
    arg: &'static str,
    wire: &'static str,
    required: bool,
    default: DefaultValue,
    constraint: Constraint,
    render: Render,
}

impl ParamSpec {
    pub(crate) const fn new(arg: &'static str) -> Self {
        Self {
            arg,
            wire: arg,
            required: false,
            default: DefaultValue::Absent,
            constraint: Constraint::Any,
            render: Render::Plain,
        }
    }

    pub(crate) const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Key used in bundled form when it differs from the argument name.
    pub(crate) const fn wire(mut self, wire: &'static str) -> Self {
        self.wire = wire;
        self
    }

    pub(crate) const fn default(mut self, default: DefaultValue) -> Self {
        self.default = default;
        self
    }

    pub(crate) const fn one_of(mut self, allowed: &'static [&'static str]) -> Self {
        self.constraint = Constraint::OneOf(allowed);
        self
    }

    pub(crate) const fn list(mut self) -> Self {
        self.constraint = Constraint::List;
        self
    }

    pub(crate) const fn date_marker(mut self) -> Self {
        self.render = Render::DateMarker;
        self
    }
}

pub(crate) struct OpSpec {
    pub(crate) method: &'static str,
    pub(crate) shape: Shape,
    pub(crate) params: &'static [ParamSpec],
}

/// Interpret `op` against `args`, producing the canonical method call.
pub(crate) fn encode(op: &OpSpec, args: &Args) -> Result<MethodCall, ApiError> {
    match op.shape {
        Shape::Positional => {
            let mut params = Vec::with_capacity(op.params.len());
            for param in op.params {
                if let Some(value) = resolve(param, args)? {
                    params.push(value);
                }
            }
            Ok(MethodCall::new(op.method, params))
        }
        Shape::Bundle => {
            let mut bundle = Map::new();
            for param in op.params {
                if let Some(value) = resolve(param, args)? {
                    bundle.insert(param.wire.to_string(), value);
                }
            }
            Ok(MethodCall::new(op.method, vec![Value::Object(bundle)]))
        }
    }
}

/// Resolve one parameter: supplied value (validated) or default.
/// `Ok(None)` means the slot is omitted from the wire form.
fn resolve(param: &ParamSpec, args: &Args) -> Result<Option<Value>, ApiError> {
    let value = match args.get(param.arg) {
        Some(supplied) => {
            check(param, supplied)?;
            supplied.clone()
        }
        None if param.required => return Err(ApiError::MissingArgument(param.arg)),
        None => match param.default {
            DefaultValue::Absent => return Ok(None),
            DefaultValue::Null => Value::Null,
            DefaultValue::Int(n) => json!(n),
            DefaultValue::Bool(b) => json!(b),
            DefaultValue::Str(s) => json!(s),
        },
    };

    Ok(Some(match param.render {
        Render::Plain => value,
        Render::DateMarker => json!({ "$date": value }),
    }))
}

fn check(param: &ParamSpec, value: &Value) -> Result<(), ApiError> {
    let allowed = match param.constraint {
        Constraint::Any => true,
        Constraint::OneOf(set) => value
            .as_str()
            .is_some_and(|s| set.contains(&s)),
        Constraint::List => value.is_array(),
    };

    if allowed {
        Ok(())
    } else {
        Err(ApiError::ArgumentNotAllowed {
            argument: param.arg,
            value: value.to_string(),
        })
    }
}
