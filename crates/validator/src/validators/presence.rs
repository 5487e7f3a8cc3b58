//! The `required` check.

use serde_json::Value;

use crate::foundation::value::is_blank;
use crate::foundation::{Check, CheckResult, Failure, ValidationContext};

/// Fails on absent values, whitespace-only strings, empty arrays and empty
/// objects. Always runs first in its rule.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Required;

impl Check for Required {
    fn name(&self) -> &str {
        "required"
    }

    fn check(&self, value: &Value, _ctx: &ValidationContext<'_>) -> CheckResult {
        if is_blank(value) {
            Err(Failure::missing("required").into())
        } else {
            Ok(())
        }
    }
}
