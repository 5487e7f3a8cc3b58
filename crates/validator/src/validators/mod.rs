//! Built-in checks
//!
//! Every check here is registered by [`register_builtins`] when a
//! [`CheckRegistry`] is created with [`CheckRegistry::new`].
//!
//! # Catalogue
//!
//! - **Presence**: `required`, `accepted`
//! - **Text**: `alpha`, `numeric`, `captcha`, `phone`
//! - **String**: `string`, `id`, `date`, `dateTime` / `datetime`, `email`, `url`, `password`
//! - **Numeric**: `int` / `integer`, `number`
//! - **Choice**: `boolean` / `bool`, `enum`
//! - **Structure**: `object`, `array`
//!
//! # Examples
//!
//! ```rust,ignore
//! use param_validator::prelude::*;
//!
//! let rules = Schema::from_value(&json!({
//!     "code": "required|numeric:6",
//!     "age": {"type": "int", "min": 18, "max": 100},
//!     "tags": {"type": "array", "itemType": "string", "max": 10},
//! }))?;
//! ```

mod choice;
mod content;
mod numeric;
mod password;
mod presence;
mod string;
mod structure;
mod text;

use crate::foundation::{Check, ConfigError};
use crate::registry::{CheckRegistry, ParamStyle};
use crate::rule::RuleArgs;

use choice::{Accepted, Boolean, Enum};
use content::Url;
use numeric::{Int, Number};
use password::Password;
use presence::Required;
use string::StringCheck;
use structure::{Array, Object};
use text::{Alpha, Captcha, Numeric, Phone};

/// Registers the check built by `make` under each of `names`.
fn register<C, F>(registry: &mut CheckRegistry, names: &[&str], params: &ParamStyle, make: F)
where
    C: Check + 'static,
    F: Fn(&RuleArgs<'_>) -> Result<C, ConfigError> + Clone + Send + Sync + 'static,
{
    for name in names {
        let make = make.clone();
        registry.register_factory(*name, params.clone(), move |args| {
            let check: Box<dyn Check> = Box::new(make(args)?);
            Ok(check)
        });
    }
}

/// Seeds `registry` with the built-in catalogue.
pub(crate) fn register_builtins(registry: &mut CheckRegistry) {
    let none = ParamStyle::None;
    let length = ParamStyle::positional(&["len"]);
    let bounds = ParamStyle::positional(&["min", "max"]);
    let values = ParamStyle::List("values".into());

    register(registry, &["required"], &none, |_| Ok(Required));
    register(registry, &["accepted"], &none, |_| Ok(Accepted));

    register(registry, &["alpha"], &none, |_| Ok(Alpha));
    register(registry, &["numeric"], &length, Numeric::from_args);
    register(registry, &["captcha"], &length, Captcha::from_args);
    register(registry, &["phone"], &none, |_| Ok(Phone));

    register(registry, &["string"], &bounds, StringCheck::from_args);
    register(registry, &["id"], &none, text::id);
    register(registry, &["date"], &none, text::date);
    register(registry, &["dateTime", "datetime"], &none, text::date_time);
    register(registry, &["email"], &none, content::email);
    register(registry, &["url"], &none, Url::from_args);
    register(registry, &["password"], &bounds, Password::from_args);

    register(registry, &["int", "integer"], &bounds, Int::from_args);
    register(registry, &["number"], &bounds, Number::from_args);

    register(registry, &["boolean", "bool"], &none, |_| Ok(Boolean));
    register(registry, &["enum"], &values, Enum::from_args);

    register(registry, &["object"], &none, Object::from_args);
    register(registry, &["array"], &bounds, Array::from_args);
}
