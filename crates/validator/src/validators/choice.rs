//! Choice checks: `boolean` / `bool`, `enum` and `accepted`.

use serde_json::Value;

use crate::foundation::value::display;
use crate::foundation::{Check, CheckResult, ConfigError, Failure, Message, ValidationContext};
use crate::rule::RuleArgs;

/// JSON equality, except that numbers compare by value (`1 == 1.0`).
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x == y || x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Boolean;

impl Check for Boolean {
    fn name(&self) -> &str {
        "boolean"
    }

    fn check(&self, value: &Value, _ctx: &ValidationContext<'_>) -> CheckResult {
        if value.is_boolean() {
            Ok(())
        } else {
            Err(Failure::invalid("should be a boolean").into())
        }
    }
}

// ============================================================================
// ENUM
// ============================================================================

/// Membership in a fixed list of values.
#[derive(Debug, Clone)]
pub(crate) struct Enum {
    values: Vec<Value>,
    listing: String,
}

impl Enum {
    pub(crate) fn from_args(args: &RuleArgs<'_>) -> Result<Self, ConfigError> {
        let Some(Value::Array(values)) = args.get("values") else {
            return Err(ConfigError::MissingOption {
                rule: args.rule().to_owned(),
                option: "values",
                expected: "array type",
            });
        };
        let listing = values.iter().map(display).collect::<Vec<_>>().join(", ");
        Ok(Self {
            values: values.clone(),
            listing,
        })
    }
}

impl Check for Enum {
    fn name(&self) -> &str {
        "enum"
    }

    fn check(&self, value: &Value, _ctx: &ValidationContext<'_>) -> CheckResult {
        if self.values.iter().any(|allowed| same_value(allowed, value)) {
            Ok(())
        } else {
            let message = Message::new("should be one of %s").with_arg(&self.listing);
            Err(Failure::invalid(message).into())
        }
    }
}

// ============================================================================
// ACCEPTED
// ============================================================================

/// Terms-of-service style consent: `"yes"`, `"on"`, `"1"`, `1`, `true` or
/// `"true"`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Accepted;

impl Check for Accepted {
    fn name(&self) -> &str {
        "accepted"
    }

    fn check(&self, value: &Value, _ctx: &ValidationContext<'_>) -> CheckResult {
        let accepted = match value {
            Value::String(s) => matches!(s.as_str(), "yes" | "on" | "1" | "true"),
            Value::Number(n) => n.as_f64() == Some(1.0),
            Value::Bool(b) => *b,
            _ => false,
        };
        if accepted {
            Ok(())
        } else {
            Err(Failure::invalid("should be accepted").into())
        }
    }
}
