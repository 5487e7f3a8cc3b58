//! Check registry
//!
//! Maps check names to factories that bind rule options into a boxed
//! [`Check`]. Each [`Validator`](crate::Validator) owns one registry, seeded
//! with the built-in catalogue; custom checks are added with
//! [`CheckRegistry::register`].

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::foundation::message::interpolate;
use crate::foundation::value::{display, is_absent, scalar_text};
use crate::foundation::{
    Check, CheckResult, ConfigError, ErrorCode, Failure, Message, ValidationContext,
};
use crate::rule::{Pattern, RuleArgs};

/// Builds a check from its bound options.
pub type CheckFactory =
    dyn Fn(&RuleArgs<'_>) -> Result<Box<dyn Check>, ConfigError> + Send + Sync;

/// Signature of a custom predicate: the value, the rule's options and the
/// validation context.
pub type PredicateFn =
    dyn Fn(&Value, &Map<String, Value>, &ValidationContext<'_>) -> bool + Send + Sync;

// ============================================================================
// PARAMETER STYLE
// ============================================================================

/// How pipe-form parameters (`numeric:6`, `enum:a,b,c`) bind to options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParamStyle {
    /// Parameters are ignored.
    #[default]
    None,
    /// The `i`-th comma-separated item binds to the `i`-th name.
    Positional(Vec<Cow<'static, str>>),
    /// All items bind to one option as an array.
    List(Cow<'static, str>),
    /// The unsplit text binds to one option.
    Raw(Cow<'static, str>),
}

impl ParamStyle {
    /// Positional binding from a list of option names.
    #[must_use]
    pub fn positional(names: &[&'static str]) -> Self {
        Self::Positional(names.iter().map(|n| Cow::Borrowed(*n)).collect())
    }

    /// Binds raw parameter text into `options` according to this style.
    pub(crate) fn bind(&self, raw: &str, options: &mut Map<String, Value>) {
        let raw = raw.trim();
        if raw.is_empty() {
            return;
        }
        let items = || raw.split(',').map(|item| Value::from(item.trim()));
        match self {
            Self::None => {}
            Self::Positional(names) => {
                for (name, item) in names.iter().zip(items()) {
                    options.insert(name.to_string(), item);
                }
            }
            Self::List(name) => {
                options.insert(name.to_string(), Value::Array(items().collect()));
            }
            Self::Raw(name) => {
                options.insert(name.to_string(), Value::String(raw.to_owned()));
            }
        }
    }
}

// ============================================================================
// REGISTRY ENTRY
// ============================================================================

/// One named check: its parameter style and factory.
#[derive(Clone)]
pub struct RegistryEntry {
    name: String,
    params: ParamStyle,
    build: Arc<CheckFactory>,
}

impl RegistryEntry {
    /// Registered name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How pipe parameters bind for this check.
    #[must_use]
    pub fn params(&self) -> &ParamStyle {
        &self.params
    }

    /// Builds a check instance from bound options.
    pub fn build(&self, args: &RuleArgs<'_>) -> Result<Box<dyn Check>, ConfigError> {
        (self.build)(args)
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// CUSTOM CHECKS
// ============================================================================

#[derive(Clone)]
enum CustomKind {
    Predicate(Arc<PredicateFn>),
    Pattern(String),
}

/// A user-supplied check: a predicate closure or a regular expression.
///
/// # Examples
///
/// ```rust,ignore
/// use param_validator::CustomCheck;
///
/// let prefix = CustomCheck::predicate(|value, options, _ctx| {
///     let prefix = options.get("prefix").and_then(|p| p.as_str()).unwrap_or("");
///     value.as_str().is_some_and(|s| s.starts_with(prefix))
/// })
/// .with_params(&["prefix"]);
/// ```
#[derive(Clone)]
pub struct CustomCheck {
    kind: CustomKind,
    params: Vec<Cow<'static, str>>,
}

impl CustomCheck {
    /// A check that passes when `predicate` returns `true`.
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&Value, &Map<String, Value>, &ValidationContext<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            kind: CustomKind::Predicate(Arc::new(predicate)),
            params: Vec::new(),
        }
    }

    /// A check that passes when the value's text matches `source`.
    ///
    /// The expression is compiled on registration.
    pub fn pattern(source: impl Into<String>) -> Self {
        Self {
            kind: CustomKind::Pattern(source.into()),
            params: Vec::new(),
        }
    }

    /// Names the pipe-form parameters, so `prefix:abc` binds `abc` to the
    /// `prefix` option.
    #[must_use]
    pub fn with_params(mut self, names: &[&'static str]) -> Self {
        self.params = names.iter().map(|n| Cow::Borrowed(*n)).collect();
        self
    }
}

impl From<Regex> for CustomCheck {
    fn from(regex: Regex) -> Self {
        Self::pattern(regex.as_str())
    }
}

impl fmt::Debug for CustomCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            CustomKind::Predicate(_) => "predicate",
            CustomKind::Pattern(source) => source.as_str(),
        };
        f.debug_struct("CustomCheck")
            .field("kind", &kind)
            .field("params", &self.params)
            .finish()
    }
}

enum Matcher {
    Predicate(Arc<PredicateFn>),
    Pattern(Pattern),
}

/// Compiled form of a [`CustomCheck`] with its options bound.
struct CustomRule {
    name: String,
    matcher: Arc<Matcher>,
    options: Map<String, Value>,
    message: String,
    code: ErrorCode,
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule")
            .field("name", &self.name)
            .field("message", &self.message)
            .field("code", &self.code)
            .finish_non_exhaustive()
    }
}

impl Check for CustomRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self, value: &Value, ctx: &ValidationContext<'_>) -> CheckResult {
        let passed = match self.matcher.as_ref() {
            Matcher::Predicate(predicate) => predicate(value, &self.options, ctx),
            Matcher::Pattern(pattern) => {
                scalar_text(value).is_some_and(|text| pattern.is_match(&text))
            }
        };
        if passed {
            Ok(())
        } else {
            let message = Message::new(self.message.clone());
            Err(Failure::new(message, self.code).into())
        }
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Instance-scoped mapping from check name to factory.
#[derive(Clone, Default)]
pub struct CheckRegistry {
    entries: HashMap<String, RegistryEntry>,
}

impl CheckRegistry {
    /// A registry seeded with every built-in check.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        crate::validators::register_builtins(&mut registry);
        registry
    }

    /// A registry with no checks at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registers a check that produces its own failures.
    ///
    /// Last registration wins.
    pub fn register_factory<F>(&mut self, name: impl Into<String>, params: ParamStyle, factory: F)
    where
        F: Fn(&RuleArgs<'_>) -> Result<Box<dyn Check>, ConfigError> + Send + Sync + 'static,
    {
        let name = name.into();
        let entry = RegistryEntry {
            name: name.clone(),
            params,
            build: Arc::new(factory),
        };
        if self.entries.insert(name.clone(), entry).is_some() {
            debug!(check = %name, "overwrote registered check");
        }
    }

    /// Registers a custom check.
    ///
    /// `message` may reference rule options as `{option}`; placeholders are
    /// filled when a rule using the check is compiled. Without a message, a
    /// pattern check reports `should match /<pattern>/`. `code` defaults to
    /// `invalid`.
    ///
    /// # Errors
    ///
    /// Fails if `name` is blank or a pattern does not compile.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        check: impl Into<CustomCheck>,
        message: Option<&str>,
        code: Option<ErrorCode>,
    ) -> Result<(), ConfigError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::MissingRuleName);
        }
        let CustomCheck { kind, params } = check.into();
        let matcher = match kind {
            CustomKind::Predicate(predicate) => Matcher::Predicate(predicate),
            CustomKind::Pattern(source) => match Pattern::parse(&source) {
                Ok(pattern) => Matcher::Pattern(pattern),
                Err(err) => {
                    return Err(ConfigError::InvalidCheck {
                        name,
                        reason: err.to_string(),
                    });
                }
            },
        };
        let template = match (message, &matcher) {
            (Some(message), _) => message.to_owned(),
            (None, Matcher::Pattern(pattern)) => format!("should match {pattern}"),
            (None, Matcher::Predicate(_)) => format!("should be a valid {name}"),
        };
        let code = code.unwrap_or_default();
        let matcher = Arc::new(matcher);
        let check_name = name.clone();

        self.register_factory(name, ParamStyle::Positional(params), move |args| {
            let options = args.options().clone();
            let message = interpolate(&template, |key| {
                options.get(key).filter(|v| !is_absent(v)).map(display)
            });
            Ok(Box::new(CustomRule {
                name: check_name.clone(),
                matcher: Arc::clone(&matcher),
                options,
                message,
                code,
            }))
        });
        Ok(())
    }

    /// Looks up a check by name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    /// Returns `true` if a check is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered checks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckRegistry")
            .field("names", &self.names())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
