//! Options bound to a check at compile time
//!
//! Both rule front-ends (pipe strings and descriptors) converge on
//! [`RuleArgs`]: a name → JSON value map plus, for pipe strings, the raw
//! parameter text. Accessors coerce numeric strings so `numeric:6` and
//! `{ "len": 6 }` read the same.

use std::borrow::Cow;
use std::fmt;

use regex::Regex;
use serde_json::{Map, Value};

use crate::foundation::ConfigError;
use crate::foundation::value::{display, type_name};
use crate::registry::CheckRegistry;
use crate::rule::compiler::Compiler;

/// Options for one check instance.
#[derive(Clone)]
pub struct RuleArgs<'a> {
    rule: &'a str,
    field: &'a str,
    options: Cow<'a, Map<String, Value>>,
    raw: Option<&'a str>,
    registry: &'a CheckRegistry,
}

impl<'a> RuleArgs<'a> {
    pub(crate) fn new(
        rule: &'a str,
        field: &'a str,
        options: Cow<'a, Map<String, Value>>,
        raw: Option<&'a str>,
        registry: &'a CheckRegistry,
    ) -> Self {
        Self {
            rule,
            field,
            options,
            raw,
            registry,
        }
    }

    /// Name of the check being built.
    #[must_use]
    pub fn rule(&self) -> &str {
        self.rule
    }

    /// Field the rule is declared on.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field
    }

    /// Unsplit parameter text from the pipe form (`"6"` in `numeric:6`).
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw
    }

    /// All bound options.
    #[must_use]
    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    /// A single option.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.options.get(name).filter(|v| !v.is_null())
    }

    /// Returns `true` if the option is present and not null.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// A compiler for nested rules, backed by the same registry.
    pub(crate) fn compiler(&self) -> Compiler<'a> {
        Compiler::new(self.registry)
    }

    fn invalid(&self, option: &str, reason: impl Into<String>) -> ConfigError {
        ConfigError::invalid_option(self.rule, option, reason)
    }

    fn mismatch(&self, option: &str, expected: &str, found: &Value) -> ConfigError {
        let reason = format!("expected {expected}, got {}", type_name(found));
        self.invalid(option, reason)
    }

    /// Reads a boolean option; absent means `false`.
    pub fn flag(&self, name: &str) -> Result<bool, ConfigError> {
        match self.get(name) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::String(s)) if s == "true" => Ok(true),
            Some(Value::String(s)) if s == "false" => Ok(false),
            Some(other) => Err(self.mismatch(name, "boolean", other)),
        }
    }

    /// Reads a text option.
    pub fn text(&self, name: &str) -> Result<Option<&str>, ConfigError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(self.mismatch(name, "string", other)),
        }
    }

    /// Reads a non-negative integer option (number or numeric string).
    pub fn count(&self, name: &str) -> Result<Option<usize>, ConfigError> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        let parsed = match value {
            Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
            Value::String(s) => s.trim().parse::<usize>().ok(),
            _ => None,
        };
        match parsed {
            Some(count) => Ok(Some(count)),
            None => {
                let reason = format!("expected a non-negative integer, got {}", display(value));
                Err(self.invalid(name, reason))
            }
        }
    }

    /// Reads a numeric bound (number or numeric string).
    pub fn bound(&self, name: &str) -> Result<Option<Bound>, ConfigError> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(limit) if limit.is_finite() => {
                let text = display(value).trim().to_owned();
                Ok(Some(Bound { limit, text }))
            }
            _ => {
                let reason = format!("expected a number, got {}", display(value));
                Err(self.invalid(name, reason))
            }
        }
    }

    /// Reads a regular expression option.
    pub fn pattern(&self, name: &str) -> Result<Option<Pattern>, ConfigError> {
        match self.text(name)? {
            None => Ok(None),
            Some(source) => Pattern::parse(source)
                .map(Some)
                .map_err(|err| self.invalid(name, err.to_string())),
        }
    }

    /// Reads an array option.
    pub fn list(&self, name: &str) -> Result<Option<&[Value]>, ConfigError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(other) => Err(self.mismatch(name, "array", other)),
        }
    }
}

impl fmt::Debug for RuleArgs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleArgs")
            .field("rule", &self.rule)
            .field("field", &self.field)
            .field("options", &self.options)
            .field("raw", &self.raw)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// BOUND
// ============================================================================

/// An inclusive numeric bound, remembering how it was written for messages.
#[derive(Debug, Clone, PartialEq)]
pub struct Bound {
    /// Numeric value of the bound.
    pub limit: f64,
    /// Source text, e.g. `100` rather than `100.0`.
    pub text: String,
}

impl Bound {
    /// Creates a bound from a plain integer.
    #[must_use]
    pub fn from_count(limit: usize) -> Self {
        Self {
            limit: limit as f64,
            text: limit.to_string(),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// ============================================================================
// PATTERN
// ============================================================================

/// A compiled regular expression with its display form.
///
/// Accepts either a bare pattern (`^\d+$`) or a slash-delimited literal with
/// optional flags (`/^abc/i`). Messages always show the slash form.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    display: String,
}

impl Pattern {
    /// Parses a pattern.
    ///
    /// A literal may carry the `i`, `m` and `s` flags; `g` and `u` are
    /// accepted and have no effect on a single match. Any other flag is an
    /// error rather than being dropped.
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        let Some((body, flags)) = split_literal(source) else {
            return Ok(Self {
                regex: Regex::new(source)?,
                display: format!("/{source}/"),
            });
        };
        let mut prefix = String::new();
        for flag in flags.chars() {
            match flag {
                'i' | 'm' | 's' => prefix.push(flag),
                'g' | 'u' => {}
                other => return Err(PatternError::UnknownFlag(other)),
            }
        }
        let expr = if prefix.is_empty() {
            body.to_owned()
        } else {
            format!("(?{prefix}){body}")
        };
        Ok(Self {
            regex: Regex::new(&expr)?,
            display: source.to_owned(),
        })
    }

    /// Wraps an already compiled expression with an explicit display form.
    #[must_use]
    pub fn with_display(regex: Regex, display: impl Into<String>) -> Self {
        Self {
            regex,
            display: display.into(),
        }
    }

    /// Wraps an already compiled expression.
    #[must_use]
    pub fn from_regex(regex: Regex) -> Self {
        let display = format!("/{}/", regex.as_str());
        Self { regex, display }
    }

    /// Returns `true` if `text` matches.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Slash-delimited display form used in messages.
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }
}

/// Why a pattern could not be compiled.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatternError {
    /// The expression itself is invalid.
    #[error(transparent)]
    Regex(#[from] regex::Error),
    /// A `/re/flags` literal used a flag with no meaning here.
    #[error("unsupported regular expression flag `{0}`")]
    UnknownFlag(char),
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

fn split_literal(source: &str) -> Option<(&str, &str)> {
    let rest = source.strip_prefix('/')?;
    let end = rest.rfind('/')?;
    let (body, flags) = (&rest[..end], &rest[end + 1..]);
    flags
        .chars()
        .all(|c| c.is_ascii_alphabetic())
        .then_some((body, flags))
}

// ============================================================================
// TESTS
// ============================================================================
