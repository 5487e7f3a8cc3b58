//! Validating a sign-up request with built-in and custom checks.

use param_validator::prelude::*;

fn main() -> Result<(), ConfigError> {
    let mut validator = Validator::builder()
        .message("captcha", "enter the 6-digit code")
        .build();

    validator.add_rule(
        "nickname",
        CustomCheck::pattern("^[a-z][a-z0-9_]{2,15}$"),
        Some("3-16 lowercase letters, digits or underscores"),
        None,
    )?;

    let password = RuleDescriptor::new("password")
        .required(true)
        .compare("confirm");
    let rules = Schema::new()
        .field("username", "required|alpha")
        .field("nick", "nickname")
        .field("age", RuleDescriptor::new("int").min(13).max(120))
        .field("password", password)
        .field("captcha", "required|captcha");

    let compiled = validator.compile(&rules)?;

    let good = json!({
        "username": "alice",
        "nick": "alice_01",
        "age": 30,
        "password": "s3cret&pass",
        "confirm": "s3cret&pass",
        "captcha": "123456",
    });
    match validator.validate_compiled(&good, &compiled, None) {
        None => println!("✓ good request is valid"),
        Some(errors) => println!("✗ {errors}"),
    }

    let bad = json!({
        "username": "al1ce",
        "nick": "A",
        "age": 7,
        "password": "short",
        "captcha": "12",
    });
    if let Some(errors) = validator.validate_compiled(&bad, &compiled, None) {
        let body = ValidationFailed::from(errors);
        println!(
            "HTTP {}\n{}",
            ValidationFailed::STATUS,
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );
    }

    Ok(())
}
