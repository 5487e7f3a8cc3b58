//! Text pattern checks
//!
//! `alpha`, `numeric`, `captcha` and `phone` read strings and numbers by
//! their text; `id`, `date` and `dateTime` are strings with a fixed format.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::foundation::value::scalar_text;
use crate::foundation::{Check, CheckResult, ConfigError, Failure, Message, ValidationContext};
use crate::rule::{Pattern, RuleArgs};
use crate::validators::string::{StringCheck, StringRules};

static ALPHA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:0|86|17951)?(?:13[0-9]|15[012356789]|166|17[3678]|18[0-9]|14[57])[0-9]{8}$")
        .unwrap()
});

// Digit classes are spelled `[0-9]`: `\d` would also admit non-ASCII digits.
static ID: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::with_display(Regex::new(r"^[0-9]+$").unwrap(), r"/^\d+$/")
});

static DATE: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::with_display(
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap(),
        r"/^\d{4}\-\d{2}\-\d{2}$/",
    )
});

static DATE_TIME: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::with_display(
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}$").unwrap(),
        r"/^\d{4}\-\d{2}\-\d{2} \d{2}:\d{2}:\d{2}$/",
    )
});

const ALPHA_MESSAGE: &str = "The field must be entirely alphabetic characters.";

fn all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

// ============================================================================
// ALPHA
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub(crate) struct Alpha;

impl Check for Alpha {
    fn name(&self) -> &str {
        "alpha"
    }

    fn check(&self, value: &Value, _ctx: &ValidationContext<'_>) -> CheckResult {
        match scalar_text(value) {
            Some(text) if ALPHA.is_match(&text) => Ok(()),
            _ => Err(Failure::invalid(ALPHA_MESSAGE).into()),
        }
    }
}

// ============================================================================
// NUMERIC
// ============================================================================

/// Digits only; `len` forces an exact count.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Numeric {
    len: usize,
}

impl Numeric {
    pub(crate) fn from_args(args: &RuleArgs<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            len: args.count("len")?.unwrap_or(0),
        })
    }
}

impl Check for Numeric {
    fn name(&self) -> &str {
        "numeric"
    }

    fn check(&self, value: &Value, _ctx: &ValidationContext<'_>) -> CheckResult {
        let text = scalar_text(value).unwrap_or_default();
        if all_digits(&text) && (self.len == 0 || text.len() == self.len) {
            Ok(())
        } else {
            Err(Failure::invalid("all chars should be numeric").into())
        }
    }
}

// ============================================================================
// CAPTCHA
// ============================================================================

const CAPTCHA_LEN: usize = 6;

/// A numeric verification code, six digits unless `len` says otherwise.
/// `len` of zero accepts any number of digits.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Captcha {
    len: usize,
}

impl Captcha {
    pub(crate) fn from_args(args: &RuleArgs<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            len: args.count("len")?.unwrap_or(CAPTCHA_LEN),
        })
    }
}

impl Check for Captcha {
    fn name(&self) -> &str {
        "captcha"
    }

    fn check(&self, value: &Value, _ctx: &ValidationContext<'_>) -> CheckResult {
        let text = scalar_text(value);
        if self.len == 0 {
            return match text {
                Some(text) if all_digits(&text) => Ok(()),
                _ => Err(Failure::invalid("should be digits").into()),
            };
        }
        match text {
            Some(text) if all_digits(&text) && text.len() == self.len => Ok(()),
            _ => {
                let message = Message::new("should be %s digits").with_arg(self.len);
                Err(Failure::invalid(message).into())
            }
        }
    }
}

// ============================================================================
// PHONE
// ============================================================================

/// Domestic mobile number, with optional `0`, `86` or `17951` prefix.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Phone;

impl Check for Phone {
    fn name(&self) -> &str {
        "phone"
    }

    fn check(&self, value: &Value, _ctx: &ValidationContext<'_>) -> CheckResult {
        match scalar_text(value) {
            Some(text) if PHONE.is_match(&text) => Ok(()),
            _ => Err(Failure::invalid("should be a valid phone number").into()),
        }
    }
}

// ============================================================================
// FIXED FORMATS
// ============================================================================

pub(crate) fn id(args: &RuleArgs<'_>) -> Result<StringCheck, ConfigError> {
    let rules = StringRules::with_format(args, ID.clone(), None)?;
    Ok(StringCheck::new("id", rules))
}

pub(crate) fn date(args: &RuleArgs<'_>) -> Result<StringCheck, ConfigError> {
    let rules = StringRules::with_format(args, DATE.clone(), None)?;
    Ok(StringCheck::new("date", rules))
}

pub(crate) fn date_time(args: &RuleArgs<'_>) -> Result<StringCheck, ConfigError> {
    let rules = StringRules::with_format(args, DATE_TIME.clone(), None)?;
    Ok(StringCheck::new("dateTime", rules))
}
