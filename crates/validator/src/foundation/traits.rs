//! Core traits for the validation system
//!
//! Every compiled check, built-in or custom, implements [`Check`]. The
//! engine drives checks through this trait only, so the rule compiler can
//! hand it any mix of boxed checks resolved from the registry.

use std::fmt;

use serde_json::Value;

use crate::foundation::context::ValidationContext;
use crate::foundation::error::{ErrorCode, FieldError};
use crate::foundation::message::Message;

// ============================================================================
// FAILURE TYPES
// ============================================================================

/// A single failing check: default message plus error code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Default message, before overrides and translation.
    pub message: Message,
    /// Error code reported with the message.
    pub code: ErrorCode,
}

impl Failure {
    /// Creates a failure with an explicit code.
    pub fn new(message: impl Into<Message>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    /// A failure with code `invalid`.
    pub fn invalid(message: impl Into<Message>) -> Self {
        Self::new(message, ErrorCode::Invalid)
    }

    /// A failure with code `missing_field`.
    pub fn missing(message: impl Into<Message>) -> Self {
        Self::new(message, ErrorCode::MissingField)
    }
}

/// Why a check rejected a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The check itself failed; the engine resolves the final message.
    Failed(Failure),
    /// A composite check recursed and its nested fields failed. The errors
    /// are already resolved and carry their full paths.
    Nested(Vec<FieldError>),
}

impl From<Failure> for Violation {
    fn from(failure: Failure) -> Self {
        Self::Failed(failure)
    }
}

/// Result of running one check against one value.
pub type CheckResult = Result<(), Violation>;

// ============================================================================
// CHECK TRAIT
// ============================================================================

/// A compiled, parameter-bound check.
///
/// Checks are pure: they must not mutate shared state or perform I/O, and
/// the same `(value, context)` always yields the same result. They are
/// compiled once per schema and may be shared across threads.
///
/// # Examples
///
/// ```rust,ignore
/// use param_validator::foundation::{Check, CheckResult, Failure, ValidationContext};
/// use serde_json::Value;
///
/// #[derive(Debug)]
/// struct Lowercase;
///
/// impl Check for Lowercase {
///     fn name(&self) -> &str {
///         "lowercase"
///     }
///
///     fn check(&self, value: &Value, _ctx: &ValidationContext<'_>) -> CheckResult {
///         match value.as_str() {
///             Some(s) if s == s.to_lowercase() => Ok(()),
///             _ => Err(Failure::invalid("should be lowercase").into()),
///         }
///     }
/// }
/// ```
pub trait Check: Send + Sync + fmt::Debug {
    /// Registry name of the check, used for message override keys.
    fn name(&self) -> &str;

    /// Runs the check.
    ///
    /// `value` is `Value::Null` when the field is absent; only the
    /// `required` check is ever invoked in that state.
    fn check(&self, value: &Value, ctx: &ValidationContext<'_>) -> CheckResult;
}
