//! Registering and using custom checks.

use param_validator::prelude::*;
use pretty_assertions::assert_eq;
use regex::Regex;

fn prefix_check() -> CustomCheck {
    CustomCheck::predicate(|value, options, _ctx| {
        let prefix = options.get("prefix").and_then(Value::as_str);
        let prefix = prefix.unwrap_or_default();
        value.as_str().is_some_and(|s| s.starts_with(prefix))
    })
    .with_params(&["prefix"])
}

fn validator() -> Validator {
    let mut validator = Validator::new();
    let message = Some("should start with {prefix}");
    validator
        .add_rule("prefix", prefix_check(), message, None)
        .unwrap();
    validator
}

#[test]
fn message_placeholders_come_from_descriptor_options() {
    let rules = json!({"key": {"type": "prefix", "prefix": "abc"}});
    let errors = validator()
        .validate_json(&json!({"key": "xyz"}), &rules, None)
        .unwrap()
        .unwrap();
    assert_eq!(
        errors.into_vec(),
        vec![FieldError::new("key", "invalid", "should start with abc")]
    );
}

#[test]
fn pipe_parameters_bind_by_position() {
    let validator = validator();
    let rules = Schema::new().field("key", "required|prefix:ab");
    let ok = validator.validate(&json!({"key": "abc"}), &rules).unwrap();
    assert!(ok.is_none());
    let errors = validator.validate(&json!({"key": "c"}), &rules).unwrap();
    assert_eq!(errors.unwrap().first().message, "should start with ab");
}

#[test]
fn regex_checks_default_to_should_match() {
    let mut validator = Validator::new();
    validator
        .add_rule("slug", Regex::new("^[a-z-]+$").unwrap(), None, None)
        .unwrap();
    let hex = CustomCheck::pattern("^[0-9a-f]+$");
    let code = Some(ErrorCode::MissingField);
    validator.add_rule("hex", hex, None, code).unwrap();

    let rules = Schema::new().field("slug", "slug").field("hex", "hex");
    let errors = validator
        .validate(&json!({"slug": "Not A Slug", "hex": "xyz"}), &rules)
        .unwrap()
        .unwrap();
    assert_eq!(
        errors.into_vec(),
        vec![
            FieldError::new("slug", "invalid", "should match /^[a-z-]+$/"),
            FieldError::new("hex", "missing_field", "should match /^[0-9a-f]+$/"),
        ]
    );
}

#[test]
fn predicates_can_read_siblings() {
    let mut validator = Validator::new();
    let after_start = CustomCheck::predicate(|value, _options, ctx| {
        let start = ctx.sibling("start").and_then(Value::as_i64);
        match (start, value.as_i64()) {
            (Some(start), Some(end)) => end > start,
            _ => false,
        }
    });
    let message = Some("should be after start");
    validator
        .add_rule("after_start", after_start, message, None)
        .unwrap();

    let rules = Schema::new().field("end", "required|after_start");
    let data = json!({"start": 1, "end": 2});
    assert!(validator.validate(&data, &rules).unwrap().is_none());
    let data = json!({"start": 3, "end": 2});
    let errors = validator.validate(&data, &rules).unwrap().unwrap();
    assert_eq!(errors.first().message, "should be after start");
}

#[test]
fn custom_checks_are_skipped_for_absent_optional_fields() {
    let rule = RuleDescriptor::new("prefix").option("prefix", "a");
    let rules = Schema::new().field("key", rule);
    assert!(validator().validate(&json!({}), &rules).unwrap().is_none());
}

#[test]
fn overriding_a_builtin() {
    let mut validator = Validator::new();
    let phone = CustomCheck::pattern(r"^\+\d{6,15}$");
    validator
        .add_rule("phone", phone, Some("bad phone"), None)
        .unwrap();
    let rules = Schema::new().field("tel", "phone");

    let data = json!({"tel": "+4915112345678"});
    assert!(validator.validate(&data, &rules).unwrap().is_none());
    let data = json!({"tel": "13800138000"});
    let errors = validator.validate(&data, &rules).unwrap().unwrap();
    assert_eq!(errors.first().message, "bad phone");
}

#[test]
fn invalid_registrations() {
    let mut validator = Validator::new();
    assert_eq!(
        validator.add_rule("", CustomCheck::pattern("a"), None, None),
        Err(ConfigError::MissingRuleName)
    );
    let unclosed = CustomCheck::pattern("(unclosed");
    let result = validator.add_rule("bad", unclosed, None, None);
    let err = result.unwrap_err();
    assert_eq!(err.code(), "CHECK_INVALID");
}

#[test]
fn builder_registers_rules() {
    let even = CustomCheck::pattern("^[0-9]*[02468]$");
    let validator = Validator::builder()
        .rule("even", even, Some("should be even"), None)
        .unwrap()
        .build();
    assert!(validator.registry().contains("even"));
    assert!(validator.registry().contains("required"));
}
