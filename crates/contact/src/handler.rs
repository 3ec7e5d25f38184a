use std::sync::Arc;

use tracing::info;

use crate::{Ack, ContactSubmission, Envelope, Mailer, ProcessingError, Result, SubmitInput};

pub const ACKNOWLEDGEMENT: &str = "Thank you for your message! I'll get back to you soon.";
pub const PROCESSING_FAILURE: &str = "Failed to send message. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub message: String,
    pub ack: Ack,
}

/// Validates contact submissions and forwards accepted ones to the mailer.
///
/// Stateless apart from the shared mailer, so a single instance serves
/// concurrent requests. Identical submissions are handled independently.
#[derive(Clone)]
pub struct Handler {
    mailer: Arc<dyn Mailer>,
    envelope: Envelope,
}

impl Handler {
    pub fn new(mailer: Arc<dyn Mailer>, envelope: Envelope) -> Self {
        Self { mailer, envelope }
    }

    pub async fn submit_json(&self, body: &[u8]) -> Result<Receipt> {
        let input: SubmitInput = serde_json::from_slice(body).map_err(ProcessingError::from)?;

        self.submit(input).await
    }

    pub async fn submit(&self, input: SubmitInput) -> Result<Receipt> {
        let submission = ContactSubmission::try_from(input)?;

        let email =
            crate::email::compose(&submission, &self.envelope).map_err(ProcessingError::from)?;

        let ack = self
            .mailer
            .send(email)
            .await
            .map_err(ProcessingError::from)?;

        info!(
            name = submission.display_name(),
            email = %submission.email,
            provider_id = ack.id.as_deref().unwrap_or("-"),
            "Contact form submission forwarded"
        );

        Ok(Receipt {
            message: ACKNOWLEDGEMENT.to_owned(),
            ack,
        })
    }
}
