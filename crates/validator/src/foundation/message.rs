//! Message templates and resolution
//!
//! Built-in checks describe failures with a [`Message`]: a `%s` template plus
//! positional arguments, e.g. `should smaller than %s` with `["100"]`.
//! Keeping template and arguments apart lets a translator look the template
//! up in a catalogue before substituting.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::foundation::error::FieldError;
use crate::foundation::traits::Failure;

/// Per-call message overrides keyed by `"<field>.<check>"`.
pub type Messages = HashMap<String, String>;

/// Global translation hook: `(template, args) -> message`.
///
/// Applied to every error of a call, to the message template and to the
/// error code (with no arguments).
pub type TranslateFn = dyn Fn(&str, &[String]) -> String + Send + Sync;

/// Shared handle to a translator.
pub type Translator = Arc<TranslateFn>;

// ============================================================================
// MESSAGE
// ============================================================================

/// A message template with positional `%s` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    template: Cow<'static, str>,
    args: SmallVec<[String; 2]>,
}

impl Message {
    /// Creates a message with no arguments.
    pub fn new(template: impl Into<Cow<'static, str>>) -> Self {
        Self {
            template: template.into(),
            args: SmallVec::new(),
        }
    }

    /// Appends a positional argument.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_arg(mut self, arg: impl ToString) -> Self {
        self.args.push(arg.to_string());
        self
    }

    /// The raw template.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The positional arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Substitutes arguments into the template.
    #[must_use]
    pub fn render(&self) -> String {
        format_template(&self.template, &self.args)
    }
}

impl From<&'static str> for Message {
    fn from(template: &'static str) -> Self {
        Self::new(template)
    }
}

impl From<String> for Message {
    fn from(template: String) -> Self {
        Self::new(template)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// `printf`-style substitution of `%s` placeholders.
///
/// `%%` renders a literal percent sign. Placeholders without a matching
/// argument are kept verbatim; surplus arguments are appended, separated by
/// spaces.
#[must_use]
pub fn format_template(template: &str, args: &[String]) -> String {
    let capacity = template.len() + args.iter().map(String::len).sum::<usize>();
    let mut out = String::with_capacity(capacity);
    let mut rest = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('s') => {
                chars.next();
                match rest.next() {
                    Some(arg) => out.push_str(arg),
                    None => out.push_str("%s"),
                }
            }
            Some('%') => {
                chars.next();
                out.push('%');
            }
            _ => out.push('%'),
        }
    }

    for arg in rest {
        out.push(' ');
        out.push_str(arg);
    }
    out
}

/// Fills `{name}` placeholders from `lookup`; unknown names are left as-is.
pub(crate) fn interpolate<'a>(
    template: &str,
    lookup: impl Fn(&str) -> Option<Cow<'a, str>>,
) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match lookup(name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Turns a check failure into the [`FieldError`] the caller sees.
///
/// Precedence: per-call override (`"field.check"`), then the translator,
/// then the default message. Validator-level per-check defaults replace the
/// built-in template before translation.
pub(crate) struct MessageResolver<'a> {
    overrides: Option<&'a Messages>,
    defaults: &'a HashMap<String, String>,
    translator: Option<&'a TranslateFn>,
}

impl<'a> MessageResolver<'a> {
    pub(crate) fn new(
        overrides: Option<&'a Messages>,
        defaults: &'a HashMap<String, String>,
        translator: Option<&'a TranslateFn>,
    ) -> Self {
        Self {
            overrides,
            defaults,
            translator,
        }
    }

    pub(crate) fn resolve(&self, field: &str, check: &str, failure: Failure) -> FieldError {
        let Failure { message, code } = failure;
        let message = match self.defaults.get(check) {
            Some(text) => Message::new(text.clone()),
            None => message,
        };

        let overridden = self
            .overrides
            .and_then(|table| table.get(&format!("{field}.{check}")))
            .cloned();

        match self.translator {
            Some(translate) => FieldError::new(
                field,
                translate(code.as_str(), &[]),
                overridden.unwrap_or_else(|| translate(message.template(), message.args())),
            ),
            None => FieldError::new(
                field,
                code.as_str(),
                overridden.unwrap_or_else(|| message.render()),
            ),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn suffixing(template: &str, args: &[String]) -> String {
        format_template(&format!("{template}-add."), args)
    }

    #[test]
    fn renders_positional_arguments() {
        let message = Message::new("should smaller than %s").with_arg(100);
        assert_eq!(message.render(), "should smaller than 100");
        assert_eq!(message.to_string(), "should smaller than 100");
    }

    #[test]
    fn template_edge_cases() {
        assert_eq!(format_template("100%%", &[]), "100%");
        assert_eq!(format_template("missing %s", &[]), "missing %s");
        assert_eq!(format_template("a %s", &["b".into(), "c".into()]), "a b c");
        assert_eq!(format_template("50% off", &[]), "50% off");
    }

    #[test]
    fn interpolates_named_placeholders() {
        let text = interpolate("should start with {prefix}{unknown}", |name| {
            (name == "prefix").then(|| Cow::Borrowed("abc"))
        });
        assert_eq!(text, "should start with abc{unknown}");
        assert_eq!(interpolate("open { brace", |_| None), "open { brace");
    }

    #[test]
    fn default_message_when_nothing_configured() {
        let defaults = HashMap::new();
        let resolver = MessageResolver::new(None, &defaults, None);
        let error = resolver.resolve("int", "int", Failure::invalid("should be an integer"));
        assert_eq!(
            error,
            FieldError::new("int", "invalid", "should be an integer")
        );
    }

    #[test]
    fn override_beats_translator() {
        let defaults = HashMap::new();
        let overrides: Messages = [("name.alpha".to_owned(), "letters only".to_owned())].into();
        let translate: &TranslateFn = &suffixing;
        let resolver = MessageResolver::new(Some(&overrides), &defaults, Some(translate));

        let error = resolver.resolve("name", "alpha", Failure::invalid("not alpha"));
        assert_eq!(error.message, "letters only");
        assert_eq!(error.code, "invalid-add.");
    }

    #[test]
    fn translator_receives_template_and_args() {
        let defaults = HashMap::new();
        let translate: &TranslateFn = &suffixing;
        let resolver = MessageResolver::new(None, &defaults, Some(translate));
        let error = resolver.resolve(
            "int",
            "int",
            Failure::invalid(Message::new("should smaller than %s").with_arg(100)),
        );
        assert_eq!(error.message, "should smaller than 100-add.");
        assert_eq!(error.code, "invalid-add.");

        let missing = resolver.resolve("name", "required", Failure::missing("required"));
        assert_eq!(missing.message, "required-add.");
        assert_eq!(missing.code, "missing_field-add.");
    }

    #[test]
    fn per_check_default_replaces_builtin_text() {
        let defaults = HashMap::from([("captcha".to_owned(), "six digits".to_owned())]);
        let resolver = MessageResolver::new(None, &defaults, None);
        let error = resolver.resolve("code", "captcha", Failure::invalid("should be 6 digits"));
        assert_eq!(error.message, "six digits");
    }
}
