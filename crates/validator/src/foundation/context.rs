//! Validation context handed to every check
//!
//! A check sees the value under test directly; everything else (sibling
//! fields, the root input, the current path, nested validation) goes
//! through [`ValidationContext`].

use serde_json::Value;

use crate::engine::Session;
use crate::foundation::error::FieldError;
use crate::rule::{CompiledRule, CompiledSchema};

/// Read-only view of the record a field belongs to.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    record: &'a Value,
    path: &'a str,
    session: &'a Session<'a>,
}

impl<'a> ValidationContext<'a> {
    pub(crate) fn new(record: &'a Value, path: &'a str, session: &'a Session<'a>) -> Self {
        Self {
            record,
            path,
            session,
        }
    }

    /// The mapping that contains the field under check.
    ///
    /// For top-level fields this is the whole input; inside an `object`
    /// rule it is the nested object.
    #[must_use]
    pub fn record(&self) -> &'a Value {
        self.record
    }

    /// The whole input passed to `validate`.
    #[must_use]
    pub fn root(&self) -> &'a Value {
        self.session.root()
    }

    /// Dotted path of the field under check.
    #[must_use]
    pub fn field(&self) -> &'a str {
        self.path
    }

    /// Looks up another field of the same record.
    #[must_use]
    pub fn sibling(&self, name: &str) -> Option<&'a Value> {
        self.record.get(name)
    }

    /// Validates `value` against a nested schema, prefixing reported paths
    /// with the current field.
    #[must_use]
    pub fn validate_object(&self, schema: &CompiledSchema, value: &Value) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let prefix = Some(self.path);
        self.session.run_schema(schema, value, prefix, &mut errors);
        errors
    }

    /// Validates every element of `items` against `rule`, in index order.
    ///
    /// Element paths are the current field, or `field[i]` when the
    /// validator is configured with indexed array paths.
    #[must_use]
    pub fn validate_items(&self, rule: &CompiledRule, items: &[Value]) -> Vec<FieldError> {
        let mut errors = Vec::new();
        self.session.run_items(rule, items, self.path, &mut errors);
        errors
    }
}

impl std::fmt::Debug for ValidationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationContext")
            .field("field", &self.path)
            .finish_non_exhaustive()
    }
}
