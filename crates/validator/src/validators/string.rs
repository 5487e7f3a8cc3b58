//! String checks
//!
//! `string` itself plus the shared [`StringRules`] that `id`, `date`,
//! `dateTime` and `email` are built on.

use serde_json::Value;

use crate::foundation::{Check, CheckResult, ConfigError, Failure, Message, ValidationContext};
use crate::rule::{Pattern, RuleArgs};

pub(crate) const NOT_A_STRING: &str = "should be a string";
pub(crate) const EMPTY: &str = "should not be empty";
pub(crate) const TOO_LONG: &str = "length should smaller than %s";
pub(crate) const TOO_SHORT: &str = "length should bigger than %s";
pub(crate) const NO_MATCH: &str = "should match %s";

/// Returns the string, `None` for an allowed empty string, or the failure.
pub(crate) fn string_value(value: &Value, allow_empty: bool) -> Result<Option<&str>, Failure> {
    match value {
        Value::String(s) if s.is_empty() && allow_empty => Ok(None),
        Value::String(s) if s.is_empty() => Err(Failure::invalid(EMPTY)),
        Value::String(s) => Ok(Some(s)),
        _ => Err(Failure::invalid(NOT_A_STRING)),
    }
}

/// Reads `allowEmpty`, or its `empty` alias.
pub(crate) fn allow_empty(args: &RuleArgs<'_>) -> Result<bool, ConfigError> {
    Ok(args.flag("allowEmpty")? || args.flag("empty")?)
}

/// Length checks are by character, not byte.
fn char_len(s: &str) -> usize {
    s.chars().count()
}

// ============================================================================
// STRING RULES
// ============================================================================

/// Options understood by every string-shaped check.
#[derive(Debug, Clone, Default)]
pub(crate) struct StringRules {
    pub(crate) allow_empty: bool,
    pub(crate) min: Option<usize>,
    pub(crate) max: Option<usize>,
    pub(crate) format: Option<Pattern>,
    /// Replaces `should match /re/` when the format fails.
    pub(crate) message: Option<String>,
}

impl StringRules {
    pub(crate) fn from_args(args: &RuleArgs<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            allow_empty: allow_empty(args)?,
            min: args.count("min")?,
            max: args.count("max")?,
            format: args.pattern("format")?,
            message: args.text("message")?.map(str::to_owned),
        })
    }

    /// Rules with a fixed format and only `allowEmpty` read from options.
    pub(crate) fn with_format(
        args: &RuleArgs<'_>,
        format: Pattern,
        message: Option<&str>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            allow_empty: allow_empty(args)?,
            format: Some(format),
            message: message.map(str::to_owned),
            ..Self::default()
        })
    }

    pub(crate) fn apply(&self, value: &Value) -> Result<(), Failure> {
        let Some(text) = string_value(value, self.allow_empty)? else {
            return Ok(());
        };
        if let Some(max) = self.max {
            if char_len(text) > max {
                return Err(Failure::invalid(Message::new(TOO_LONG).with_arg(max)));
            }
        }
        if let Some(min) = self.min {
            if char_len(text) < min {
                return Err(Failure::invalid(Message::new(TOO_SHORT).with_arg(min)));
            }
        }
        if let Some(format) = &self.format {
            if !format.is_match(text) {
                let message = match &self.message {
                    Some(message) => Message::new(message.clone()),
                    None => Message::new(NO_MATCH).with_arg(format),
                };
                return Err(Failure::invalid(message));
            }
        }
        Ok(())
    }
}

// ============================================================================
// STRING CHECK
// ============================================================================

/// `string`: text with optional length bounds and format.
#[derive(Debug, Clone)]
pub(crate) struct StringCheck {
    name: &'static str,
    rules: StringRules,
}

impl StringCheck {
    pub(crate) fn new(name: &'static str, rules: StringRules) -> Self {
        Self { name, rules }
    }

    pub(crate) fn from_args(args: &RuleArgs<'_>) -> Result<Self, ConfigError> {
        Ok(Self::new("string", StringRules::from_args(args)?))
    }
}

impl Check for StringCheck {
    fn name(&self) -> &str {
        self.name
    }

    fn check(&self, value: &Value, _ctx: &ValidationContext<'_>) -> CheckResult {
        self.rules.apply(value).map_err(Into::into)
    }
}
