use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::EnumString;
use tracing::error;
use validator::Validate;

use crate::EMAIL_REGEX;

pub const NETWORK_ERROR: &str = "Network error. Please try again.";

/// Field values as the form posts them. Blank fields are sent as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub company: String,
    pub project_type: String,
    pub budget: String,
    pub timeline: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Company,
    ProjectType,
    Budget,
    Timeline,
    Message,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Success,
    Error,
}

/// Body returned by the contact endpoint, success or failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReplyBody {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub body: ReplyBody,
}

impl ApiReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request could not be completed or its reply could not be read.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[async_trait]
pub trait ContactApi: Send + Sync {
    async fn submit(&self, fields: &FormFields) -> Result<ApiReply, TransportError>;
}

#[derive(Validate)]
struct FormCheck {
    #[validate(length(min = 2, message = "Name must be at least 2 characters long"))]
    name: Option<String>,
    #[validate(
        required(message = "Email is required"),
        regex(path = *EMAIL_REGEX, message = "Please enter a valid email address")
    )]
    email: Option<String>,
    #[validate(
        required(message = "Message is required"),
        length(min = 10, message = "Message must be at least 10 characters long")
    )]
    message: Option<String>,
}

fn present(value: &str) -> Option<&str> {
    (!value.trim().is_empty()).then_some(value)
}

impl FormCheck {
    fn new(fields: &FormFields) -> Self {
        Self {
            name: present(&fields.name).map(|v| v.trim().to_owned()),
            email: present(&fields.email).map(str::to_owned),
            message: present(&fields.message).map(|v| v.trim().to_owned()),
        }
    }
}

/// Read-only view of a form's in-flight flag, usable while `submit` holds the form.
#[derive(Debug, Clone)]
pub struct InFlight(Arc<AtomicBool>);

impl InFlight {
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Sets the in-flight flag and clears it when dropped, cancellation included.
struct SubmitGuard<'a>(&'a AtomicBool);

impl<'a> SubmitGuard<'a> {
    fn start(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag)
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// State of one contact form instance on the client.
#[derive(Debug, Default)]
pub struct ContactForm {
    fields: FormFields,
    errors: BTreeMap<String, String>,
    status: SubmitStatus,
    submitting: Arc<AtomicBool>,
    notice: Option<String>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(fields: FormFields) -> Self {
        Self {
            fields,
            ..Default::default()
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub fn in_flight(&self) -> InFlight {
        InFlight(Arc::clone(&self.submitting))
    }

    /// Acknowledgement returned by the server on the last successful submit.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.fields.name = value,
            Field::Email => self.fields.email = value,
            Field::Company => self.fields.company = value,
            Field::ProjectType => self.fields.project_type = value,
            Field::Budget => self.fields.budget = value,
            Field::Timeline => self.fields.timeline = value,
            Field::Message => self.fields.message = value,
        }
    }

    /// Update a field by its wire name (`projectType`, `email`, ...).
    pub fn set_field(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), strum::ParseError> {
        let field = name.parse::<Field>()?;
        self.set(field, value);

        Ok(())
    }

    /// Check the current fields and replace the error map with the result.
    pub fn validate(&mut self) -> bool {
        self.errors = match FormCheck::new(&self.fields).validate() {
            Ok(()) => BTreeMap::new(),
            Err(errors) => errors
                .field_errors()
                .into_iter()
                .filter_map(|(field, errors)| {
                    let message = errors.first()?.message.as_ref()?;
                    Some((field.to_string(), message.to_string()))
                })
                .collect(),
        };

        self.errors.is_empty()
    }

    /// Validate, then post the fields through `api` and record the outcome.
    ///
    /// Nothing is sent when validation fails. Submission is re-enabled on
    /// every exit path.
    pub async fn submit<A: ContactApi + ?Sized>(&mut self, api: &A) -> SubmitStatus {
        if !self.validate() {
            return self.status;
        }

        let flag = Arc::clone(&self.submitting);
        let _guard = SubmitGuard::start(&flag);

        self.status = SubmitStatus::Idle;
        self.notice = None;
        self.errors.clear();

        match api.submit(&self.fields).await {
            Ok(reply) if reply.is_success() => {
                self.status = SubmitStatus::Success;
                self.notice = reply.body.message;
                self.fields = FormFields::default();
            }
            Ok(reply) => {
                self.status = SubmitStatus::Error;
                if let Some(message) = reply.body.error {
                    self.errors.insert("submit".to_owned(), message);
                }
            }
            Err(e) => {
                error!(error = %e, "Error submitting contact form");
                self.status = SubmitStatus::Error;
                self.errors
                    .insert("submit".to_owned(), NETWORK_ERROR.to_owned());
            }
        }

        self.status
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Replays canned replies and records every request.
    struct ScriptedApi {
        reply: fn() -> Result<ApiReply, TransportError>,
        requests: Mutex<Vec<FormFields>>,
        watched: Mutex<Option<InFlight>>,
        in_flight_seen: Mutex<Vec<bool>>,
    }

    impl ScriptedApi {
        fn new(reply: fn() -> Result<ApiReply, TransportError>) -> Self {
            Self {
                reply,
                requests: Mutex::new(Vec::new()),
                watched: Mutex::new(None),
                in_flight_seen: Mutex::new(Vec::new()),
            }
        }

        /// Sample `flag` whenever a request arrives.
        fn watch(&self, flag: InFlight) {
            *self.watched.lock().unwrap() = Some(flag);
        }

        fn requests(&self) -> Vec<FormFields> {
            self.requests.lock().unwrap().clone()
        }

        fn in_flight_seen(&self) -> Vec<bool> {
            self.in_flight_seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContactApi for ScriptedApi {
        async fn submit(&self, fields: &FormFields) -> Result<ApiReply, TransportError> {
            if let Some(flag) = self.watched.lock().unwrap().as_ref() {
                self.in_flight_seen.lock().unwrap().push(flag.get());
            }
            self.requests.lock().unwrap().push(fields.clone());
            (self.reply)()
        }
    }

    fn ok_reply() -> Result<ApiReply, TransportError> {
        Ok(ApiReply {
            status: 200,
            body: ReplyBody {
                success: Some(true),
                message: Some("Thanks!".to_owned()),
                error: None,
            },
        })
    }

    fn valid_form() -> ContactForm {
        let mut form = ContactForm::new();
        form.set(Field::Email, "a@b.com");
        form.set(Field::Message, "Hello there, testing.");
        form
    }

    #[test]
    fn test_validate_accepts_absent_name() {
        let mut form = valid_form();
        assert!(form.validate());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_validate_rejects_one_letter_name() {
        let mut form = valid_form();
        form.set(Field::Name, "A");

        assert!(!form.validate());
        assert_eq!(
            form.error("name"),
            Some("Name must be at least 2 characters long")
        );
    }

    #[test]
    fn test_validate_required_fields() {
        let mut form = ContactForm::new();
        form.set(Field::Message, "   ");

        assert!(!form.validate());
        assert_eq!(form.error("email"), Some("Email is required"));
        assert_eq!(form.error("message"), Some("Message is required"));
        assert_eq!(form.error("name"), None);
    }

    #[test]
    fn test_validate_email_shape_and_message_length() {
        let mut form = ContactForm::new();
        form.set(Field::Email, "a@b");
        form.set(Field::Message, " too short ");

        assert!(!form.validate());
        assert_eq!(
            form.error("email"),
            Some("Please enter a valid email address")
        );
        assert_eq!(
            form.error("message"),
            Some("Message must be at least 10 characters long")
        );
    }

    #[test]
    fn test_validate_clears_previous_errors() {
        let mut form = ContactForm::new();
        assert!(!form.validate());

        form.set(Field::Email, "a@b.com");
        form.set(Field::Message, "Long enough message");
        assert!(form.validate());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_set_field_by_wire_name() {
        let mut form = ContactForm::new();
        form.set_field("projectType", "arkit").unwrap();
        form.set_field("budget", "10k-25k").unwrap();

        assert_eq!(form.fields().project_type, "arkit");
        assert_eq!(form.fields().budget, "10k-25k");
        assert!(form.set_field("favouriteColour", "blue").is_err());
    }

    #[tokio::test]
    async fn test_short_message_sends_nothing() {
        let api = ScriptedApi::new(ok_reply);
        let mut form = valid_form();
        form.set(Field::Message, "Too short");

        let status = form.submit(&api).await;

        assert_eq!(status, SubmitStatus::Idle);
        assert!(api.requests().is_empty());
        assert!(form.error("message").is_some());
    }

    #[tokio::test]
    async fn test_success_clears_fields() {
        let api = ScriptedApi::new(ok_reply);
        let mut form = valid_form();
        form.set(Field::Company, "Acme");

        let status = form.submit(&api).await;

        assert_eq!(status, SubmitStatus::Success);
        assert_eq!(form.notice(), Some("Thanks!"));
        assert_eq!(form.fields(), &FormFields::default());
        assert!(!form.is_submitting());

        let requests = api.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].company, "Acme");
        assert_eq!(requests[0].email, "a@b.com");
    }

    #[tokio::test]
    async fn test_submitting_only_while_request_in_flight() {
        let api = ScriptedApi::new(|| Err(TransportError("timed out".to_owned())));
        let mut form = valid_form();
        api.watch(form.in_flight());

        assert!(!form.is_submitting());
        form.submit(&api).await;
        assert!(!form.is_submitting());
        form.submit(&api).await;

        assert_eq!(api.in_flight_seen(), vec![true, true]);
        assert!(!form.in_flight().get());
    }

    #[tokio::test]
    async fn test_cancelled_submit_re_enables_form() {
        struct Stalled;

        #[async_trait]
        impl ContactApi for Stalled {
            async fn submit(&self, _fields: &FormFields) -> Result<ApiReply, TransportError> {
                std::future::pending().await
            }
        }

        let mut form = valid_form();
        let in_flight = form.in_flight();

        let outcome = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            form.submit(&Stalled),
        )
        .await;

        assert!(outcome.is_err());
        assert!(!in_flight.get());
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_server_error_message_is_surfaced() {
        let api = ScriptedApi::new(|| {
            Ok(ApiReply {
                status: 400,
                body: ReplyBody {
                    error: Some("Invalid email format".to_owned()),
                    ..Default::default()
                },
            })
        });
        let mut form = valid_form();

        let status = form.submit(&api).await;

        assert_eq!(status, SubmitStatus::Error);
        assert_eq!(form.error("submit"), Some("Invalid email format"));
        assert_eq!(form.fields().email, "a@b.com");
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_network_failure_uses_fallback_message() {
        let api = ScriptedApi::new(|| Err(TransportError("connection refused".to_owned())));
        let mut form = valid_form();

        let status = form.submit(&api).await;

        assert_eq!(status, SubmitStatus::Error);
        assert_eq!(form.error("submit"), Some(NETWORK_ERROR));
        assert!(!form.is_submitting());
        assert_eq!(api.requests().len(), 1);
    }
}
