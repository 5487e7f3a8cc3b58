//! Wire shape for a rejected request
//!
//! HTTP glue is left to the host application; this is the body it sends
//! with status `422` when validation fails.
//!
//! ```json
//! {
//!   "code": "invalid_param",
//!   "message": "Validation Failed",
//!   "errors": [{ "code": "invalid", "field": "int", "message": "should smaller than 100" }]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::foundation::{FieldError, ValidationErrors};

/// Body of a `422 Unprocessable Entity` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}: {} error(s)", .errors.len())]
pub struct ValidationFailed {
    /// Always [`ValidationFailed::CODE`].
    pub code: String,
    /// Always [`ValidationFailed::MESSAGE`].
    pub message: String,
    /// Field errors in validation order.
    pub errors: Vec<FieldError>,
}

impl ValidationFailed {
    /// HTTP status to send with this body.
    pub const STATUS: u16 = 422;
    /// Top-level error code.
    pub const CODE: &'static str = "invalid_param";
    /// Top-level message.
    pub const MESSAGE: &'static str = "Validation Failed";

    /// Wraps the errors of a failed validation.
    #[must_use]
    pub fn new(errors: ValidationErrors) -> Self {
        Self {
            code: Self::CODE.to_owned(),
            message: Self::MESSAGE.to_owned(),
            errors: errors.into_vec(),
        }
    }

    /// HTTP status to send with this body.
    #[must_use]
    pub const fn status(&self) -> u16 {
        Self::STATUS
    }
}

impl From<ValidationErrors> for ValidationFailed {
    fn from(errors: ValidationErrors) -> Self {
        Self::new(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn serializes_wire_body() {
        let error = FieldError::new("int", "invalid", "should smaller than 100");
        let errors = ValidationErrors::from_vec(vec![error]).unwrap();
        let body = ValidationFailed::from(errors);

        assert_eq!(body.status(), 422);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "code": "invalid_param",
                "message": "Validation Failed",
                "errors": [
                    {"code": "invalid", "field": "int", "message": "should smaller than 100"}
                ],
            })
        );
        assert_eq!(body.to_string(), "Validation Failed: 1 error(s)");
    }
}
