use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ValidationError;

pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Contact form payload as it arrives on the wire.
///
/// Fields are kept as raw JSON values so a missing or oddly typed `email` or
/// `message` surfaces as a validation failure instead of a decoding one.
/// `company`, `project_type`, `budget` and `timeline` are accepted but never
/// validated or forwarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitInput {
    pub name: Option<Value>,
    pub email: Option<Value>,
    pub message: Option<Value>,
    pub company: Option<Value>,
    pub project_type: Option<Value>,
    pub budget: Option<Value>,
    pub timeline: Option<Value>,
}

/// A submission that passed server-side validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Visitor")
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Text of a submitted value, or `None` when it counts as blank.
///
/// `null`, `false`, `0` and `""` are blank. Anything else uses its JSON text.
fn text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

impl TryFrom<SubmitInput> for ContactSubmission {
    type Error = ValidationError;

    fn try_from(input: SubmitInput) -> Result<Self, Self::Error> {
        let email_is_string = matches!(input.email, Some(Value::String(_)));
        let email = text(input.email);
        let message = text(input.message);

        let (email, message) = match (email, message) {
            (Some(email), Some(message)) => (email, message),
            (email, message) => {
                let mut missing = Vec::new();
                if email.is_none() {
                    missing.push("email");
                }
                if message.is_none() {
                    missing.push("message");
                }
                return Err(ValidationError::MissingFields(missing));
            }
        };

        if !email_is_string || !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(Self {
            name: text(input.name),
            email,
            message,
        })
    }
}
