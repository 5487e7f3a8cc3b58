//! Property-based tests for param-validator.

use param_validator::prelude::*;
use proptest::prelude::*;

fn field_values() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z0-9 ]{0,8}".prop_map(Value::from),
        prop::collection::vec(any::<u8>().prop_map(Value::from), 0..3).prop_map(Value::from),
    ]
}

const PIPES: &[&str] = &[
    "required",
    "alpha",
    "numeric",
    "int",
    "string",
    "boolean",
    "required|int",
    "alpha|required",
    "captcha:4",
    "accepted",
];

// ============================================================================
// DETERMINISM: validate(x) == validate(x)
// ============================================================================

proptest! {
    #[test]
    fn validation_is_deterministic(value in field_values(), rule in prop::sample::select(PIPES)) {
        let validator = Validator::new();
        let rules = Schema::new().field("f", rule);
        let data = json!({"f": value});
        let first = validator.validate(&data, &rules).unwrap();
        let second = validator.validate(&data, &rules).unwrap();
        prop_assert_eq!(first, second);
    }
}

// ============================================================================
// ONE ERROR PER SCALAR FIELD
// ============================================================================

proptest! {
    #[test]
    fn at_most_one_error_per_field(
        values in prop::collection::vec(field_values(), 1..6),
        rule in prop::sample::select(PIPES),
    ) {
        let validator = Validator::new();
        let mut rules = Schema::new();
        let mut data = serde_json::Map::new();
        for (i, value) in values.into_iter().enumerate() {
            rules.insert(format!("f{i}"), rule);
            data.insert(format!("f{i}"), value);
        }
        let count = rules.len();
        if let Some(errors) = validator.validate(&Value::Object(data), &rules).unwrap() {
            prop_assert!(errors.len() <= count);
            for (name, _) in rules.iter() {
                prop_assert!(errors.for_field(name).count() <= 1);
            }
        }
    }
}

// ============================================================================
// SHORT-CIRCUIT: absent optional fields never fail
// ============================================================================

proptest! {
    #[test]
    fn absent_optional_fields_pass(rule in prop::sample::select(PIPES)) {
        prop_assume!(!rule.contains("required"));
        let rules = Schema::new().field("f", rule);
        let passed = Validator::new().validate(&json!({}), &rules).unwrap().is_none();
        prop_assert!(passed);
    }

    #[test]
    fn required_absent_is_always_missing_field(rule in prop::sample::select(PIPES)) {
        prop_assume!(rule.contains("required"));
        let rules = Schema::new().field("f", rule);
        let errors = Validator::new().validate(&json!({}), &rules).unwrap().unwrap();
        prop_assert_eq!(errors.len(), 1);
        prop_assert!(errors.first().is_missing());
    }
}

// ============================================================================
// BOUNDS
// ============================================================================

proptest! {
    #[test]
    fn int_bounds_are_inclusive(n in -1000i64..1000, min in -500i64..0, max in 0i64..500) {
        let rules = Schema::new().field("n", RuleDescriptor::new("int").min(min).max(max));
        let result = Validator::new().validate(&json!({"n": n}), &rules).unwrap();
        prop_assert_eq!(result.is_none(), (min..=max).contains(&n));
    }

    #[test]
    fn string_length_bounds(s in "[a-z]{1,20}", max in 1usize..15) {
        let rules = Schema::new().field("s", RuleDescriptor::new("string").max(max));
        let result = Validator::new().validate(&json!({"s": s}), &rules).unwrap();
        prop_assert_eq!(result.is_none(), s.len() <= max);
    }

    #[test]
    fn numeric_accepts_digit_strings(s in "[0-9]{1,12}") {
        let rules = Schema::new().field("n", "numeric");
        let passed = Validator::new().validate(&json!({"n": s}), &rules).unwrap().is_none();
        prop_assert!(passed);
    }
}
