//! Number checks: `int` / `integer` and `number`.

use serde_json::Value;

use crate::foundation::value::{finite_number, is_integer};
use crate::foundation::{Check, CheckResult, ConfigError, Failure, Message, ValidationContext};
use crate::rule::{Bound, RuleArgs};

/// Inclusive bounds; `max` is checked first.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Bounds {
    min: Option<Bound>,
    max: Option<Bound>,
}

impl Bounds {
    pub(crate) fn from_args(args: &RuleArgs<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            min: args.bound("min")?,
            max: args.bound("max")?,
        })
    }

    fn apply(&self, n: f64) -> Result<(), Failure> {
        if let Some(max) = &self.max {
            if n > max.limit {
                let message = Message::new("should smaller than %s").with_arg(max);
                return Err(Failure::invalid(message));
            }
        }
        if let Some(min) = &self.min {
            if n < min.limit {
                let message = Message::new("should bigger than %s").with_arg(min);
                return Err(Failure::invalid(message));
            }
        }
        Ok(())
    }
}

/// A finite number with no fractional part.
#[derive(Debug, Clone)]
pub(crate) struct Int {
    bounds: Bounds,
}

impl Int {
    pub(crate) fn from_args(args: &RuleArgs<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            bounds: Bounds::from_args(args)?,
        })
    }
}

impl Check for Int {
    fn name(&self) -> &str {
        "int"
    }

    fn check(&self, value: &Value, _ctx: &ValidationContext<'_>) -> CheckResult {
        match finite_number(value) {
            Some(n) if is_integer(value) => Ok(self.bounds.apply(n)?),
            _ => Err(Failure::invalid("should be an integer").into()),
        }
    }
}

/// Any finite number.
#[derive(Debug, Clone)]
pub(crate) struct Number {
    bounds: Bounds,
}

impl Number {
    pub(crate) fn from_args(args: &RuleArgs<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            bounds: Bounds::from_args(args)?,
        })
    }
}

impl Check for Number {
    fn name(&self) -> &str {
        "number"
    }

    fn check(&self, value: &Value, _ctx: &ValidationContext<'_>) -> CheckResult {
        match finite_number(value) {
            Some(n) => Ok(self.bounds.apply(n)?),
            None => Err(Failure::invalid("should be a number").into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bounds(min: Option<usize>, max: Option<usize>) -> Bounds {
        Bounds {
            min: min.map(Bound::from_count),
            max: max.map(Bound::from_count),
        }
    }

    fn message(bounds: &Bounds, n: f64) -> String {
        match bounds.apply(n) {
            Ok(()) => String::new(),
            Err(failure) => failure.message.render(),
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let b = bounds(Some(1), Some(100));
        assert_eq!(message(&b, 1.0), "");
        assert_eq!(message(&b, 100.0), "");
        assert_eq!(message(&b, 101.0), "should smaller than 100");
        assert_eq!(message(&b, 0.5), "should bigger than 1");
    }

    #[test]
    fn max_wins_when_both_fail() {
        let b = bounds(Some(10), Some(5));
        assert_eq!(message(&b, 7.0), "should smaller than 5");
    }
}
