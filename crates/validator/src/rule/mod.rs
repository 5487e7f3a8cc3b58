//! Rule declarations and their compiled form
//!
//! A [`Schema`] maps field names to [`RuleSpec`]s. Four surface forms are
//! accepted and all compile to the same [`CompiledRule`]:
//!
//! | form | example | meaning |
//! |---|---|---|
//! | pipe string | `"required\|numeric:6"` | checks run left to right |
//! | descriptor | `{"type": "int", "max": 100}` | one check plus options |
//! | enum shorthand | `[1, 2, 3]` | `{"type": "enum", "values": [1, 2, 3]}` |
//! | pattern shorthand | [`RuleSpec::Pattern`] | `{"type": "string", "format": ...}` |
//!
//! In JSON a bare string is always read as a pipe string; build
//! [`RuleSpec::Pattern`] programmatically (or via [`RuleSpec::pattern`]).

mod args;
mod compiler;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::foundation::ConfigError;
use crate::foundation::value::type_name;

pub use args::{Bound, Pattern, PatternError, RuleArgs};
pub use compiler::{CompiledCheck, CompiledRule, CompiledSchema};

pub(crate) use compiler::Compiler;

// ============================================================================
// RULE SPEC
// ============================================================================

/// Declaration for one field.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSpec {
    /// Check names joined by `|`, each with an optional `:params` suffix.
    Pipe(String),
    /// A `type` plus options.
    Descriptor(RuleDescriptor),
    /// Allowed values; same as an `enum` descriptor.
    Values(Vec<Value>),
    /// A regular expression; same as a `string` descriptor with `format`.
    Pattern(String),
}

impl RuleSpec {
    /// Pattern shorthand.
    pub fn pattern(source: impl Into<String>) -> Self {
        Self::Pattern(source.into())
    }

    /// Reads a rule from JSON.
    ///
    /// Strings are pipe rules, arrays are enum shorthand and objects are
    /// descriptors.
    ///
    /// # Errors
    ///
    /// Fails on `null`, numbers, booleans and descriptors without `type`.
    pub fn from_value(field: &str, value: &Value) -> Result<Self, ConfigError> {
        match value {
            Value::String(pipe) => Ok(Self::Pipe(pipe.clone())),
            Value::Array(values) => Ok(Self::Values(values.clone())),
            Value::Object(map) => RuleDescriptor::from_map(field, map).map(Self::Descriptor),
            other => Err(ConfigError::invalid_rule(
                field,
                format!("expected string, array or object, got {}", type_name(other)),
            )),
        }
    }

    /// JSON form of this rule. Pattern shorthand becomes a `string`
    /// descriptor.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Pipe(pipe) => Value::String(pipe.clone()),
            Self::Values(values) => Value::Array(values.clone()),
            Self::Descriptor(descriptor) => descriptor.to_value(),
            Self::Pattern(source) => RuleDescriptor::new("string").format(source).to_value(),
        }
    }
}

impl From<&str> for RuleSpec {
    fn from(pipe: &str) -> Self {
        Self::Pipe(pipe.to_owned())
    }
}

impl From<String> for RuleSpec {
    fn from(pipe: String) -> Self {
        Self::Pipe(pipe)
    }
}

impl From<RuleDescriptor> for RuleSpec {
    fn from(descriptor: RuleDescriptor) -> Self {
        Self::Descriptor(descriptor)
    }
}

impl From<Vec<Value>> for RuleSpec {
    fn from(values: Vec<Value>) -> Self {
        Self::Values(values)
    }
}

// ============================================================================
// RULE DESCRIPTOR
// ============================================================================

/// Structured rule: a check `type`, the `required` flag and options.
///
/// # Examples
///
/// ```rust,ignore
/// use param_validator::RuleDescriptor;
///
/// let age = RuleDescriptor::new("int").required(true).min(1).max(100);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDescriptor {
    kind: String,
    required: bool,
    options: Map<String, Value>,
}

impl RuleDescriptor {
    /// A descriptor for check `kind` with no options.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            required: false,
            options: Map::new(),
        }
    }

    fn from_map(field: &str, map: &Map<String, Value>) -> Result<Self, ConfigError> {
        let kind = match map.get("type") {
            Some(Value::String(kind)) if !kind.trim().is_empty() => kind.trim().to_owned(),
            Some(Value::String(_)) | None | Some(Value::Null) => {
                return Err(ConfigError::invalid_rule(field, "missing `type`"));
            }
            Some(other) => {
                return Err(ConfigError::invalid_rule(
                    field,
                    format!("`type` should be a string, got {}", type_name(other)),
                ));
            }
        };
        let required = match map.get("required") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(required)) => *required,
            Some(other) => {
                return Err(ConfigError::invalid_rule(
                    field,
                    format!("`required` should be a boolean, got {}", type_name(other)),
                ));
            }
        };
        let options = map
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "type" | "required"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Ok(Self {
            kind,
            required,
            options,
        })
    }

    /// Name of the check.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Whether the field must be present.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Options other than `type` and `required`.
    #[must_use]
    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets an arbitrary option.
    #[must_use]
    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// Lower bound (value, length or element count, depending on the check).
    #[must_use]
    pub fn min(self, min: impl Into<Value>) -> Self {
        self.option("min", min)
    }

    /// Upper bound.
    #[must_use]
    pub fn max(self, max: impl Into<Value>) -> Self {
        self.option("max", max)
    }

    /// Regular expression for `string` and `password`.
    #[must_use]
    pub fn format(self, format: impl Into<String>) -> Self {
        self.option("format", format.into())
    }

    /// Allowed values for `enum`.
    #[must_use]
    pub fn values<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.option("values", values)
    }

    /// Nested schema for `object`, or element schema for `array`.
    #[must_use]
    pub fn rule(self, schema: Schema) -> Self {
        self.option("rule", schema.to_value())
    }

    /// Element check for `array`.
    #[must_use]
    pub fn item_type(self, item_type: impl Into<String>) -> Self {
        self.option("itemType", item_type.into())
    }

    /// Sibling field a `password` must equal.
    #[must_use]
    pub fn compare(self, field: impl Into<String>) -> Self {
        self.option("compare", field.into())
    }

    /// Lets empty strings pass text checks.
    #[must_use]
    pub fn allow_empty(self, allow: bool) -> Self {
        self.option("allowEmpty", allow)
    }

    /// JSON form of this descriptor.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = Map::with_capacity(self.options.len() + 2);
        map.insert("type".to_owned(), Value::String(self.kind.clone()));
        if self.required {
            map.insert("required".to_owned(), Value::Bool(true));
        }
        for (key, value) in &self.options {
            map.insert(key.clone(), value.clone());
        }
        Value::Object(map)
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

/// Ordered mapping from field name to rule. Declaration order drives error
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: IndexMap<String, RuleSpec>,
}

impl Schema {
    /// An empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, builder style.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, rule: impl Into<RuleSpec>) -> Self {
        self.insert(name, rule);
        self
    }

    /// Adds or replaces a field. A replaced field keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, rule: impl Into<RuleSpec>) {
        self.fields.insert(name.into(), rule.into());
    }

    /// Rule declared for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RuleSpec> {
        self.fields.get(name)
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSpec)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Reads a schema from a JSON object.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSchema`] if `value` is not an object, or the
    /// first field whose rule cannot be read.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let Value::Object(map) = value else {
            return Err(ConfigError::InvalidSchema {
                found: type_name(value),
            });
        };
        let mut fields = IndexMap::with_capacity(map.len());
        for (field, rule) in map {
            fields.insert(field.clone(), RuleSpec::from_value(field, rule)?);
        }
        Ok(Self { fields })
    }

    /// Reads a schema from JSON text.
    ///
    /// # Errors
    ///
    /// Malformed JSON is reported as an invalid schema.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::from_value(&value),
            Err(err) => Err(ConfigError::invalid_rule("<schema>", err.to_string())),
        }
    }

    /// JSON form of this schema.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = Map::with_capacity(self.fields.len());
        for (name, rule) in &self.fields {
            map.insert(name.clone(), rule.to_value());
        }
        Value::Object(map)
    }
}

impl<K, R> FromIterator<(K, R)> for Schema
where
    K: Into<String>,
    R: Into<RuleSpec>,
{
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        let mut schema = Self::new();
        for (name, rule) in iter {
            schema.insert(name, rule);
        }
        schema
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// TESTS
// ============================================================================
