//! # param-validator
//!
//! Declarative rule-schema validation for request parameters and other
//! JSON-shaped input.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use param_validator::prelude::*;
//!
//! let validator = Validator::new();
//! let rules = Schema::from_value(&json!({
//!     "username": "required|alpha",
//!     "age": {"type": "int", "min": 1, "max": 100},
//! }))?;
//!
//! match validator.validate(&json!({"age": 101}), &rules)? {
//!     None => println!("ok"),
//!     Some(errors) => {
//!         // [username] missing_field: required
//!         // [age] invalid: should smaller than 100
//!         println!("{errors}");
//!     }
//! }
//! ```
//!
//! ## Rules
//!
//! A field's rule is a pipe string (`"required|numeric:6"`), a descriptor
//! (`{"type": "string", "max": 20}`), an array of allowed values, or a
//! [`RuleSpec::Pattern`]. See [`rule`] for the forms and [`validators`] for
//! the built-in catalogue.
//!
//! ## Messages
//!
//! Each failure's message comes from, in order: a per-call override keyed
//! `"field.check"`, the configured translator, then the check's default
//! (which [`ValidatorConfig::messages`] can replace per check name).
//!
//! ## Custom Checks
//!
//! [`Validator::add_rule`] registers a predicate or a regular expression
//! under a new name; it can then be used in any rule form.

pub mod engine;
pub mod foundation;
pub mod prelude;
pub mod registry;
pub mod response;
pub mod rule;
pub mod validators;

pub use engine::{Validator, ValidatorBuilder, ValidatorConfig};
pub use foundation::{
    ConfigError, ErrorCode, FieldError, Messages, ValidationErrors, ValidationResult,
};
pub use registry::{CheckRegistry, CustomCheck, ParamStyle};
pub use response::ValidationFailed;
pub use rule::{CompiledSchema, RuleDescriptor, RuleSpec, Schema};
