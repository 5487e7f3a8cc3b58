//! Composite checks: `object` and `array`.
//!
//! Nested schemas and element rules are compiled together with the parent
//! rule; at validation time they re-enter the engine through the context
//! and report [`Violation::Nested`] errors with full paths.

use serde_json::{Map, Value};

use crate::foundation::{
    Check, CheckResult, ConfigError, Failure, Message, ValidationContext, Violation,
};
use crate::rule::{CompiledRule, CompiledSchema, RuleArgs};
use crate::validators::string::{TOO_LONG, TOO_SHORT};

fn object_rule(schema: Option<&Value>) -> Value {
    let mut descriptor = Map::new();
    descriptor.insert("type".to_owned(), Value::String("object".to_owned()));
    if let Some(schema) = schema {
        descriptor.insert("rule".to_owned(), schema.clone());
    }
    Value::Object(descriptor)
}

fn is_descriptor(value: &Value) -> bool {
    value.get("type").is_some()
}

// ============================================================================
// OBJECT
// ============================================================================

/// A JSON object, optionally validated against a nested schema.
#[derive(Debug, Clone)]
pub(crate) struct Object {
    schema: Option<CompiledSchema>,
}

impl Object {
    pub(crate) fn from_args(args: &RuleArgs<'_>) -> Result<Self, ConfigError> {
        let schema = args
            .get("rule")
            .map(|rule| args.compiler().schema_value(rule))
            .transpose()?;
        Ok(Self { schema })
    }
}

impl Check for Object {
    fn name(&self) -> &str {
        "object"
    }

    fn check(&self, value: &Value, ctx: &ValidationContext<'_>) -> CheckResult {
        if !value.is_object() {
            return Err(Failure::invalid("should be an object").into());
        }
        let Some(schema) = &self.schema else {
            return Ok(());
        };
        let errors = ctx.validate_object(schema, value);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Violation::Nested(errors))
        }
    }
}

// ============================================================================
// ARRAY
// ============================================================================

/// A JSON array with optional length bounds and a rule for every element.
///
/// The element rule comes from `itemType` and `rule`:
///
/// - `itemType: "object"` validates each element against the schema in
///   `rule`;
/// - any other `itemType` is an element rule on its own, unless `rule` is a
///   descriptor (has a `type`), which then takes precedence;
/// - `rule` without `itemType` is an element descriptor if it has a `type`,
///   otherwise an object schema.
#[derive(Debug, Clone)]
pub(crate) struct Array {
    min: Option<usize>,
    max: Option<usize>,
    item: Option<CompiledRule>,
}

impl Array {
    pub(crate) fn from_args(args: &RuleArgs<'_>) -> Result<Self, ConfigError> {
        let rule = args.get("rule");
        let element = match (args.get("itemType"), rule) {
            (Some(Value::String(kind)), rule) if kind == "object" => Some(object_rule(rule)),
            (Some(_), Some(rule)) if is_descriptor(rule) => Some(rule.clone()),
            (Some(item_type), _) => Some(item_type.clone()),
            (None, Some(rule)) if is_descriptor(rule) => Some(rule.clone()),
            (None, Some(schema)) => Some(object_rule(Some(schema))),
            (None, None) => None,
        };
        let item = match element {
            Some(element) => Some(args.compiler().rule_value(args.field(), &element)?),
            None => None,
        };

        Ok(Self {
            min: args.count("min")?,
            max: args.count("max")?,
            item,
        })
    }
}

impl Check for Array {
    fn name(&self) -> &str {
        "array"
    }

    fn check(&self, value: &Value, ctx: &ValidationContext<'_>) -> CheckResult {
        let Value::Array(items) = value else {
            return Err(Failure::invalid("should be an array").into());
        };
        if let Some(max) = self.max {
            if items.len() > max {
                let message = Message::new(TOO_LONG).with_arg(max);
                return Err(Failure::invalid(message).into());
            }
        }
        if let Some(min) = self.min {
            if items.len() < min {
                let message = Message::new(TOO_SHORT).with_arg(min);
                return Err(Failure::invalid(message).into());
            }
        }
        let Some(item) = &self.item else {
            return Ok(());
        };
        let errors = ctx.validate_items(item, items);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Violation::Nested(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_rule_wraps_schema() {
        assert_eq!(object_rule(None), json!({"type": "object"}));
        assert_eq!(
            object_rule(Some(&json!({"a": "int"}))),
            json!({"type": "object", "rule": {"a": "int"}})
        );
    }

    #[test]
    fn descriptors_have_a_type() {
        assert!(is_descriptor(&json!({"type": "int"})));
        assert!(!is_descriptor(&json!({"name": "string"})));
        assert!(!is_descriptor(&json!("string")));
    }
}
