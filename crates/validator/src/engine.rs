//! Validation engine
//!
//! [`Validator`] owns a [`CheckRegistry`] and a [`ValidatorConfig`]. Each
//! call compiles the schema, then walks the declared fields in order:
//!
//! ```text
//! PENDING ──absent, not required──► SHORT_CIRCUITED (no error)
//!    │
//!    ├──first failing check───────► FAILED (one error, chain stops)
//!    └──every check passes────────► PASSED
//! ```
//!
//! Object and array checks re-enter the engine through
//! [`ValidationContext`]; their errors are flattened into the parent list.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::foundation::message::MessageResolver;
use crate::foundation::value::is_absent;
use crate::foundation::{
    ConfigError, ErrorCode, FieldError, Messages, TranslateFn, Translator, ValidationContext,
    ValidationErrors, ValidationResult, Violation,
};
use crate::registry::{CheckRegistry, CustomCheck};
use crate::rule::{CompiledRule, CompiledSchema, Compiler, Schema};

static NULL: Value = Value::Null;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Validator-wide settings.
///
/// The data parts deserialize from camelCase JSON; the translator is
/// attached in code.
///
/// ```json
/// { "messages": { "captcha": "wrong code" }, "indexArrayPaths": true }
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidatorConfig {
    /// Translates every message template and code of a call.
    #[serde(skip)]
    pub translate: Option<Translator>,
    /// Replaces built-in default messages, keyed by check name.
    pub messages: HashMap<String, String>,
    /// Report array elements as `parent[i]` instead of `parent`.
    pub index_array_paths: bool,
}

impl fmt::Debug for ValidatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorConfig")
            .field("translate", &self.translate.as_ref().map(|_| "<fn>"))
            .field("messages", &self.messages)
            .field("index_array_paths", &self.index_array_paths)
            .finish()
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Validates records against rule schemas.
///
/// Cloning is cheap: the registry sits behind an `Arc` and is copied only
/// when a clone registers a new check.
///
/// # Examples
///
/// ```rust,ignore
/// use param_validator::{Schema, Validator};
/// use serde_json::json;
///
/// let validator = Validator::new();
/// let rules = Schema::new().field("username", "required|alpha");
/// let errors = validator.validate(&json!({}), &rules)?.unwrap();
/// assert_eq!(errors.first().code, "missing_field");
/// ```
#[derive(Clone)]
pub struct Validator {
    registry: Arc<CheckRegistry>,
    config: ValidatorConfig,
}

impl Validator {
    /// A validator with the built-in checks and default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    /// A validator with the built-in checks.
    #[must_use]
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self::with_registry(CheckRegistry::new(), config)
    }

    /// A validator over an explicit registry.
    #[must_use]
    pub fn with_registry(registry: CheckRegistry, config: ValidatorConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            config,
        }
    }

    /// Starts a builder.
    #[must_use]
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    /// The check registry.
    #[must_use]
    pub fn registry(&self) -> &CheckRegistry {
        &self.registry
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Registers a custom check; see [`CheckRegistry::register`].
    ///
    /// # Errors
    ///
    /// Fails if `name` is blank or a pattern does not compile.
    pub fn add_rule(
        &mut self,
        name: impl Into<String>,
        check: impl Into<CustomCheck>,
        message: Option<&str>,
        code: Option<ErrorCode>,
    ) -> Result<(), ConfigError> {
        Arc::make_mut(&mut self.registry).register(name, check, message, code)
    }

    /// Compiles a schema for repeated use with
    /// [`validate_compiled`](Self::validate_compiled).
    ///
    /// # Errors
    ///
    /// Any unknown check name or invalid option.
    pub fn compile(&self, rules: &Schema) -> Result<CompiledSchema, ConfigError> {
        Compiler::new(&self.registry).schema(rules)
    }

    /// Validates `data` against `rules`.
    ///
    /// Returns `Ok(None)` when every field passes.
    ///
    /// # Errors
    ///
    /// A [`ConfigError`] if the schema does not compile; no field is
    /// evaluated in that case.
    pub fn validate(&self, data: &Value, rules: &Schema) -> ValidationResult {
        let compiled = self.compile(rules)?;
        Ok(self.validate_compiled(data, &compiled, None))
    }

    /// Like [`validate`](Self::validate), with per-call message overrides
    /// keyed `"field.check"`.
    ///
    /// # Errors
    ///
    /// A [`ConfigError`] if the schema does not compile.
    pub fn validate_with_messages(
        &self,
        data: &Value,
        rules: &Schema,
        messages: &Messages,
    ) -> ValidationResult {
        let compiled = self.compile(rules)?;
        Ok(self.validate_compiled(data, &compiled, Some(messages)))
    }

    /// Validates against a schema given as JSON.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidSchema`] if `rules` is not an object, or any
    /// compile error.
    pub fn validate_json(
        &self,
        data: &Value,
        rules: &Value,
        messages: Option<&Messages>,
    ) -> ValidationResult {
        let schema = Schema::from_value(rules)?;
        let compiled = self.compile(&schema)?;
        Ok(self.validate_compiled(data, &compiled, messages))
    }

    /// Validates against an already compiled schema.
    #[must_use]
    pub fn validate_compiled(
        &self,
        data: &Value,
        compiled: &CompiledSchema,
        messages: Option<&Messages>,
    ) -> Option<ValidationErrors> {
        debug!(fields = compiled.len(), "validating record");
        let session = Session {
            root: data,
            resolver: MessageResolver::new(
                messages,
                &self.config.messages,
                self.config.translate.as_deref(),
            ),
            index_array_paths: self.config.index_array_paths,
        };
        let mut errors = Vec::new();
        session.run_schema(compiled, data, None, &mut errors);
        debug!(errors = errors.len(), "validation finished");
        ValidationErrors::from_vec(errors)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("checks", &self.registry.len())
            .field("config", &self.config)
            .finish()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for [`Validator`].
///
/// # Examples
///
/// ```rust,ignore
/// use param_validator::Validator;
///
/// let validator = Validator::builder()
///     .translate(|template, args| format_template(&translate(template), args))
///     .message("captcha", "wrong verification code")
///     .index_array_paths(true)
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct ValidatorBuilder {
    registry: Option<CheckRegistry>,
    config: ValidatorConfig,
}

impl ValidatorBuilder {
    /// Uses `registry` instead of the built-in one.
    #[must_use]
    pub fn registry(mut self, registry: CheckRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the message translator.
    #[must_use]
    pub fn translate<F>(mut self, translate: F) -> Self
    where
        F: Fn(&str, &[String]) -> String + Send + Sync + 'static,
    {
        let translate: Arc<TranslateFn> = Arc::new(translate);
        self.config.translate = Some(translate);
        self
    }

    /// Replaces the default message of one check.
    #[must_use]
    pub fn message(mut self, check: impl Into<String>, text: impl Into<String>) -> Self {
        self.config.messages.insert(check.into(), text.into());
        self
    }

    /// Toggles `parent[i]` element paths.
    #[must_use]
    pub fn index_array_paths(mut self, enabled: bool) -> Self {
        self.config.index_array_paths = enabled;
        self
    }

    /// Registers a custom check.
    ///
    /// # Errors
    ///
    /// Fails if `name` is blank or a pattern does not compile.
    pub fn rule(
        mut self,
        name: impl Into<String>,
        check: impl Into<CustomCheck>,
        message: Option<&str>,
        code: Option<ErrorCode>,
    ) -> Result<Self, ConfigError> {
        self.registry
            .get_or_insert_with(CheckRegistry::new)
            .register(name, check, message, code)?;
        Ok(self)
    }

    /// Finishes the validator.
    #[must_use]
    pub fn build(self) -> Validator {
        let registry = self.registry.unwrap_or_else(CheckRegistry::new);
        Validator::with_registry(registry, self.config)
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// Terminal state of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldState {
    ShortCircuited,
    Passed,
    Failed,
}

/// Per-call state shared by every check of one `validate` call.
pub(crate) struct Session<'a> {
    root: &'a Value,
    resolver: MessageResolver<'a>,
    index_array_paths: bool,
}

impl<'a> Session<'a> {
    pub(crate) fn root(&self) -> &'a Value {
        self.root
    }

    /// Runs every field of `schema` against the mapping `record`.
    ///
    /// Non-object records have no keys, so every field reads as absent.
    pub(crate) fn run_schema(
        &self,
        schema: &CompiledSchema,
        record: &Value,
        prefix: Option<&str>,
        errors: &mut Vec<FieldError>,
    ) {
        for (field, rule) in schema.fields() {
            let path = match prefix {
                Some(prefix) => format!("{prefix}.{field}"),
                None => field.to_owned(),
            };
            let value = record.get(field).unwrap_or(&NULL);
            self.run_rule(rule, value, record, &path, errors);
        }
    }

    /// Runs `rule` against each element, in index order.
    pub(crate) fn run_items(
        &self,
        rule: &CompiledRule,
        items: &[Value],
        path: &str,
        errors: &mut Vec<FieldError>,
    ) {
        for (index, item) in items.iter().enumerate() {
            let path = if self.index_array_paths {
                format!("{path}[{index}]")
            } else {
                path.to_owned()
            };
            self.run_rule(rule, item, &NULL, &path, errors);
        }
    }

    fn run_rule(
        &self,
        rule: &CompiledRule,
        value: &Value,
        record: &Value,
        path: &str,
        errors: &mut Vec<FieldError>,
    ) -> FieldState {
        if is_absent(value) && !rule.is_required() {
            trace!(field = path, "short-circuited");
            return FieldState::ShortCircuited;
        }

        let ctx = ValidationContext::new(record, path, self);
        for compiled in rule.checks() {
            match compiled.check().check(value, &ctx) {
                Ok(()) => {}
                Err(Violation::Failed(failure)) => {
                    trace!(field = path, check = compiled.name(), "failed");
                    errors.push(self.resolver.resolve(path, compiled.name(), failure));
                    return FieldState::Failed;
                }
                Err(Violation::Nested(nested)) => {
                    trace!(
                        field = path,
                        check = compiled.name(),
                        nested = nested.len(),
                        "failed"
                    );
                    errors.extend(nested);
                    return FieldState::Failed;
                }
            }
        }
        trace!(field = path, "passed");
        FieldState::Passed
    }
}

// ============================================================================
// TESTS
// ============================================================================
