//! The `password` check.
//!
//! By default a password is 8 to 18 characters drawn from ASCII letters,
//! digits and `&*;+$,?#[]%`. A regular expression given as `format` (or as
//! non-numeric pipe parameters, `password:^\w{6,}$`) replaces the length
//! and character rules. `compare` names a sibling field that must hold the
//! same value.

use serde_json::Value;

use crate::foundation::{Check, CheckResult, ConfigError, Failure, Message, ValidationContext};
use crate::rule::{Pattern, RuleArgs};
use crate::validators::string::{NO_MATCH, TOO_LONG, TOO_SHORT, string_value};

const DEFAULT_MIN: usize = 8;
const DEFAULT_MAX: usize = 18;
const SYMBOLS: &str = "&*;+$,?#[]%";

fn is_password_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || SYMBOLS.contains(c)
}

#[derive(Debug, Clone)]
enum Charset {
    Default { min: usize, max: usize },
    Custom(Pattern),
}

#[derive(Debug, Clone)]
pub(crate) struct Password {
    charset: Charset,
    compare: Option<String>,
}

impl Password {
    pub(crate) fn from_args(args: &RuleArgs<'_>) -> Result<Self, ConfigError> {
        let custom = match args.pattern("format")? {
            Some(pattern) => Some(pattern),
            None => raw_format(args)?,
        };

        let charset = match custom {
            Some(pattern) => Charset::Custom(pattern),
            None => {
                let min = args.count("min")?.unwrap_or(DEFAULT_MIN);
                let max = args.count("max")?.unwrap_or(DEFAULT_MAX);
                if min < 1 || min > max {
                    return Err(ConfigError::InvalidBounds {
                        rule: args.rule().to_owned(),
                        min,
                        max,
                    });
                }
                Charset::Default { min, max }
            }
        };

        Ok(Self {
            charset,
            compare: args.text("compare")?.map(str::to_owned),
        })
    }
}

/// Non-numeric pipe parameters are a format: `password:^\w{6,}$`.
fn raw_format(args: &RuleArgs<'_>) -> Result<Option<Pattern>, ConfigError> {
    let Some(raw) = args.raw().filter(|raw| !is_numeric_list(raw)) else {
        return Ok(None);
    };
    match Pattern::parse(raw) {
        Ok(pattern) => Ok(Some(pattern)),
        Err(err) => {
            let reason = err.to_string();
            Err(ConfigError::invalid_option(args.rule(), "format", reason))
        }
    }
}

fn is_numeric_list(raw: &str) -> bool {
    let is_count = |part: &str| part.trim().parse::<usize>().is_ok();
    raw.split(',').all(is_count)
}

fn reject(template: &'static str, arg: impl ToString) -> CheckResult {
    let message = Message::new(template).with_arg(arg);
    Err(Failure::invalid(message).into())
}

impl Check for Password {
    fn name(&self) -> &str {
        "password"
    }

    fn check(&self, value: &Value, ctx: &ValidationContext<'_>) -> CheckResult {
        let text = string_value(value, false)?.unwrap_or_default();

        match &self.charset {
            Charset::Custom(pattern) => {
                if !pattern.is_match(text) {
                    return reject(NO_MATCH, pattern);
                }
            }
            Charset::Default { min, max } => {
                let len = text.chars().count();
                if len > *max {
                    return reject(TOO_LONG, max);
                }
                if len < *min {
                    return reject(TOO_SHORT, min);
                }
                if !text.chars().all(is_password_char) {
                    let message = format!("should only contain letters, digits and {SYMBOLS}");
                    return Err(Failure::invalid(message).into());
                }
            }
        }

        if let Some(other) = &self.compare {
            if ctx.sibling(other) != Some(value) {
                return reject("should equal to %s", other);
            }
        }
        Ok(())
    }
}
