//! Rule compiler
//!
//! Turns [`RuleSpec`]s into ordered lists of bound checks. Compilation is
//! eager: nested schemas and element rules are compiled with their parent,
//! so every configuration error surfaces before any value is inspected.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::trace;

use crate::foundation::{Check, ConfigError};
use crate::registry::CheckRegistry;
use crate::rule::{RuleArgs, RuleDescriptor, RuleSpec, Schema};

const REQUIRED: &str = "required";

// ============================================================================
// COMPILED FORMS
// ============================================================================

/// A bound check together with the name it was declared under.
///
/// The declared name (`integer`, not `int`) keys message overrides.
#[derive(Clone)]
pub struct CompiledCheck {
    name: String,
    check: Arc<dyn Check>,
}

impl CompiledCheck {
    /// Name the check was declared under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The bound check.
    #[must_use]
    pub fn check(&self) -> &dyn Check {
        self.check.as_ref()
    }
}

impl fmt::Debug for CompiledCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompiledCheck")
            .field(&self.name)
            .field(&self.check)
            .finish()
    }
}

/// Ordered checks for one field. A `required` check always comes first.
#[derive(Debug, Clone, Default)]
pub struct CompiledRule {
    checks: Vec<CompiledCheck>,
    required: bool,
}

impl CompiledRule {
    /// Checks in evaluation order.
    #[must_use]
    pub fn checks(&self) -> &[CompiledCheck] {
        &self.checks
    }

    /// Whether an absent value is an error rather than a skip.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Number of checks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns `true` if the rule has no checks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

/// A whole schema, compiled. Holds no mutable state and can be reused
/// across calls and threads.
#[derive(Debug, Clone, Default)]
pub struct CompiledSchema {
    fields: Vec<(String, CompiledRule)>,
}

impl CompiledSchema {
    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &CompiledRule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Compiled rule for `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&CompiledRule> {
        self.fields
            .iter()
            .find_map(|(field, rule)| (field == name).then_some(rule))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ============================================================================
// COMPILER
// ============================================================================

/// Compiles rules against one registry.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Compiler<'a> {
    registry: &'a CheckRegistry,
}

impl<'a> Compiler<'a> {
    pub(crate) fn new(registry: &'a CheckRegistry) -> Self {
        Self { registry }
    }

    pub(crate) fn schema(&self, schema: &Schema) -> Result<CompiledSchema, ConfigError> {
        let mut fields = Vec::new();
        for (field, spec) in schema.iter() {
            fields.push((field.to_owned(), self.rule(field, spec)?));
        }
        Ok(CompiledSchema { fields })
    }

    /// Compiles a nested schema given as JSON (the `rule` option).
    pub(crate) fn schema_value(&self, value: &Value) -> Result<CompiledSchema, ConfigError> {
        self.schema(&Schema::from_value(value)?)
    }

    /// Compiles a single rule given as JSON (`itemType`, or `rule` on an
    /// array).
    pub(crate) fn rule_value(
        &self,
        field: &str,
        value: &Value,
    ) -> Result<CompiledRule, ConfigError> {
        self.rule(field, &RuleSpec::from_value(field, value)?)
    }

    pub(crate) fn rule(&self, field: &str, spec: &RuleSpec) -> Result<CompiledRule, ConfigError> {
        let rule = match spec {
            RuleSpec::Pipe(pipe) => self.pipe(field, pipe)?,
            RuleSpec::Descriptor(descriptor) => self.descriptor(field, descriptor)?,
            RuleSpec::Values(values) => {
                let mut options = Map::new();
                options.insert("values".to_owned(), Value::Array(values.clone()));
                self.single(field, "enum", Cow::Owned(options))?
            }
            RuleSpec::Pattern(source) => {
                let mut options = Map::new();
                options.insert("format".to_owned(), Value::String(source.clone()));
                self.single(field, "string", Cow::Owned(options))?
            }
        };
        trace!(
            field,
            checks = rule.len(),
            required = rule.required,
            "compiled rule"
        );
        Ok(rule)
    }

    fn pipe(&self, field: &str, pipe: &str) -> Result<CompiledRule, ConfigError> {
        let mut required = Vec::new();
        let mut rest = Vec::new();

        for token in pipe.split('|') {
            let token = token.trim();
            let (name, raw) = match token.split_once(':') {
                Some((name, raw)) => (name.trim(), Some(raw.trim()).filter(|r| !r.is_empty())),
                None => (token, None),
            };
            let entry = self
                .registry
                .resolve(name)
                .ok_or_else(|| ConfigError::unknown_rule(name))?;

            let mut options = Map::new();
            if let Some(raw) = raw {
                entry.params().bind(raw, &mut options);
            }
            let args = RuleArgs::new(name, field, Cow::Owned(options), raw, self.registry);
            let check = CompiledCheck {
                name: name.to_owned(),
                check: Arc::from(entry.build(&args)?),
            };
            if name == REQUIRED {
                required.push(check);
            } else {
                rest.push(check);
            }
        }

        let is_required = !required.is_empty();
        required.extend(rest);
        Ok(CompiledRule {
            checks: required,
            required: is_required,
        })
    }

    fn descriptor(
        &self,
        field: &str,
        descriptor: &RuleDescriptor,
    ) -> Result<CompiledRule, ConfigError> {
        let options = Cow::Borrowed(descriptor.options());
        let mut rule = self.single(field, descriptor.kind(), options)?;
        if descriptor.is_required() && !rule.required {
            let required = self.build(field, REQUIRED, Cow::Owned(Map::new()))?;
            rule.checks.insert(0, required);
            rule.required = true;
        }
        Ok(rule)
    }

    fn single(
        &self,
        field: &str,
        name: &str,
        options: Cow<'_, Map<String, Value>>,
    ) -> Result<CompiledRule, ConfigError> {
        let check = self.build(field, name, options)?;
        Ok(CompiledRule {
            required: name == REQUIRED,
            checks: vec![check],
        })
    }

    fn build(
        &self,
        field: &str,
        name: &str,
        options: Cow<'_, Map<String, Value>>,
    ) -> Result<CompiledCheck, ConfigError> {
        let entry = self
            .registry
            .resolve(name)
            .ok_or_else(|| ConfigError::unknown_rule(name))?;
        let args = RuleArgs::new(name, field, options, None, self.registry);
        Ok(CompiledCheck {
            name: name.to_owned(),
            check: Arc::from(entry.build(&args)?),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
