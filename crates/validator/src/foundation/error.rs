//! Error types for validation failures and schema misconfiguration
//!
//! Two classes of error live here:
//!
//! - [`FieldError`] / [`ValidationErrors`]: data errors found while
//!   checking a record. These are *returned*, never raised.
//! - [`ConfigError`]: programmer errors in a rule schema or a custom check
//!   registration. These abort a validation call before any field runs.

use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

// ============================================================================
// ERROR CODE
// ============================================================================

/// Machine-readable code attached to every failing check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The value is present but does not satisfy the check.
    #[default]
    Invalid,
    /// The value is absent or empty where one is required.
    MissingField,
}

impl ErrorCode {
    /// Wire representation of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::MissingField => "missing_field",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// FIELD ERROR
// ============================================================================

/// A single field-level failure.
///
/// Serializes as `{ "code", "field", "message" }` in that order, which is
/// the shape request-handling layers put in their error bodies.
///
/// `code` is a string rather than [`ErrorCode`] because a configured
/// translator may rewrite it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// `invalid`, `missing_field`, or a translated equivalent.
    pub code: Cow<'static, str>,
    /// Dotted path of the field, e.g. `object.age`.
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(
        field: impl Into<String>,
        code: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns `true` when the error was produced by a `required` failure
    /// and the code was not rewritten.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.code == ErrorCode::MissingField.as_str()
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.field, self.code, self.message)
    }
}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// The ordered, non-empty list of failures produced by one validation call.
///
/// A successful validation yields no `ValidationErrors` at all, so holding
/// one always means at least one field failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Wraps `errors`, returning `None` when the list is empty.
    #[must_use]
    pub fn from_vec(errors: Vec<FieldError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// The first failure, in field declaration order.
    #[must_use]
    pub fn first(&self) -> &FieldError {
        &self.errors[0]
    }

    /// Returns the errors reported for `field` (exact path match).
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.field == field)
    }

    /// Consumes the collection, returning the underlying list.
    #[must_use]
    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }
}

impl Deref for ValidationErrors {
    type Target = [FieldError];

    fn deref(&self) -> &Self::Target {
        &self.errors
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed with {} error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// CONFIGURATION ERROR
// ============================================================================

/// A fatal problem with a rule schema or a check registration.
///
/// Every variant indicates programmer error; validation stops before any
/// field is evaluated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The rule schema is not a mapping.
    #[error("need object type rule, got {found}")]
    InvalidSchema { found: &'static str },

    /// A single field's rule could not be understood.
    #[error("invalid rule for `{field}`: {reason}")]
    InvalidRule { field: String, reason: String },

    /// A check name did not resolve in the registry.
    #[error("Rule {name} is not builtin, check your type or you should add custom rule")]
    UnknownRule { name: String },

    /// A required option is missing, e.g. `enum` without `values`.
    #[error("check {rule} need {expected} {option}")]
    MissingOption {
        rule: String,
        option: &'static str,
        expected: &'static str,
    },

    /// An option is present but has the wrong shape.
    #[error("invalid `{option}` for {rule}: {reason}")]
    InvalidOption {
        rule: String,
        option: String,
        reason: String,
    },

    /// `min`/`max` bounds that cannot describe any value.
    #[error("min and max should be in the valid range for {rule}: min={min}, max={max}")]
    InvalidBounds {
        rule: String,
        min: usize,
        max: usize,
    },

    /// A custom check registration without a name.
    #[error("`type` required: a check needs a non-empty name")]
    MissingRuleName,

    /// A custom check registration whose pattern does not compile.
    #[error("check `{name}` must be a predicate or a valid regular expression: {reason}")]
    InvalidCheck { name: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid_rule(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRule {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown_rule(name: impl Into<String>) -> Self {
        Self::UnknownRule { name: name.into() }
    }

    pub(crate) fn invalid_option(
        rule: impl Into<String>,
        option: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            rule: rule.into(),
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Broad error category for grouping in logs.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidSchema { .. } | Self::InvalidRule { .. } => "schema",
            Self::UnknownRule { .. } => "lookup",
            Self::MissingOption { .. }
            | Self::InvalidOption { .. }
            | Self::InvalidBounds { .. } => "option",
            Self::MissingRuleName | Self::InvalidCheck { .. } => "registration",
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSchema { .. } => "RULE_INVALID_SCHEMA",
            Self::InvalidRule { .. } => "RULE_INVALID",
            Self::UnknownRule { .. } => "RULE_UNKNOWN",
            Self::MissingOption { .. } => "RULE_MISSING_OPTION",
            Self::InvalidOption { .. } => "RULE_INVALID_OPTION",
            Self::InvalidBounds { .. } => "RULE_INVALID_BOUNDS",
            Self::MissingRuleName => "CHECK_MISSING_NAME",
            Self::InvalidCheck { .. } => "CHECK_INVALID",
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
