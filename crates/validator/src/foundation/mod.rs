//! Core validation types and traits
//!
//! This module contains the building blocks shared by the compiler, the
//! engine and the built-in checks:
//!
//! - **Traits**: [`Check`]
//! - **Failures**: [`Failure`], [`Violation`], [`ErrorCode`]
//! - **Errors**: [`FieldError`], [`ValidationErrors`], [`ConfigError`]
//! - **Messages**: [`Message`], [`Messages`], [`Translator`]
//! - **Context**: [`ValidationContext`]
//!
//! # Examples
//!
//! ```rust,ignore
//! use param_validator::foundation::{Check, CheckResult, Failure, ValidationContext};
//!
//! #[derive(Debug)]
//! struct NotZero;
//!
//! impl Check for NotZero {
//!     fn name(&self) -> &str {
//!         "not_zero"
//!     }
//!
//!     fn check(&self, value: &serde_json::Value, _ctx: &ValidationContext<'_>) -> CheckResult {
//!         if value.as_f64() == Some(0.0) {
//!             return Err(Failure::invalid("should not be zero").into());
//!         }
//!         Ok(())
//!     }
//! }
//! ```

pub mod context;
pub mod error;
pub mod message;
pub mod traits;
pub mod value;

pub use context::ValidationContext;
pub use error::{ConfigError, ErrorCode, FieldError, ValidationErrors};
pub use message::{Message, Messages, TranslateFn, Translator, format_template};
pub use traits::{Check, CheckResult, Failure, Violation};

/// Result of a validation call: `Ok(None)` when every field passed.
pub type ValidationResult = Result<Option<ValidationErrors>, ConfigError>;
