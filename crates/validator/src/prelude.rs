//! Prelude module for convenient imports.
//!
//! Provides a single `use param_validator::prelude::*;` import that brings
//! in the validator, rule types, errors and the pieces needed to write a
//! custom check.
//!
//! # Examples
//!
//! ```rust,ignore
//! use param_validator::prelude::*;
//!
//! let rules = Schema::new()
//!     .field("email", "required|email")
//!     .field("level", RuleSpec::Values(vec![json!(1), json!(2)]));
//! let errors = Validator::new().validate(&json!({"email": "x"}), &rules)?;
//! ```

// ============================================================================
// ENGINE
// ============================================================================

pub use crate::engine::{Validator, ValidatorBuilder, ValidatorConfig};
pub use crate::response::ValidationFailed;

// ============================================================================
// RULES
// ============================================================================

pub use crate::registry::{CheckRegistry, CustomCheck, ParamStyle};
pub use crate::rule::{CompiledRule, CompiledSchema, RuleArgs, RuleDescriptor, RuleSpec, Schema};

// ============================================================================
// FOUNDATION
// ============================================================================

pub use crate::foundation::{
    Check, CheckResult, ConfigError, ErrorCode, Failure, FieldError, Message, Messages, Translator,
    ValidationContext, ValidationErrors, ValidationResult, Violation, format_template,
};

pub use serde_json::{Value, json};
