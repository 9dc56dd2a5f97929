//! Login form payload.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::entities::Credentials;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Submitted login form (`application/x-www-form-urlencoded`).
///
/// Missing fields deserialize as empty strings so that they fail validation
/// instead of being rejected by the extractor. Intentionally not `Debug`.
#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(length(max = 255), custom(function = "not_blank"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(max = 1024), custom(function = "not_blank"))]
    pub password: String,

    /// Checkbox value; browsers omit the field entirely when unchecked.
    #[serde(rename = "remember-me", default)]
    pub remember_me: Option<String>,
}

impl LoginForm {
    /// Whether the remember-me checkbox was ticked.
    pub fn remember_me(&self) -> bool {
        self.remember_me.as_deref().is_some_and(|v| {
            matches!(
                v.to_ascii_lowercase().as_str(),
                "on" | "true" | "yes" | "1"
            )
        })
    }

    pub fn into_credentials(self) -> Credentials {
        let remember_me = self.remember_me();
        Credentials::new(self.username, self.password, remember_me)
    }
}

/// Query flags accepted by `GET /login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub error: Option<String>,
    pub logout: Option<String>,
}

impl LoginQuery {
    /// User-facing message for the `error` flag.
    ///
    /// Every authentication failure renders the same text.
    pub fn error_message(&self) -> Option<&'static str> {
        match self.error.as_deref()? {
            "input" => Some("Please check your input"),
            _ => Some("Invalid username or password"),
        }
    }

    pub fn logged_out(&self) -> bool {
        self.logout.is_some()
    }
}
