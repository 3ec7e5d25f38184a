use async_trait::async_trait;
use folio_contact::{Ack, Mailer, OutgoingEmail, SendError};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

/// Delivery through the Resend HTTP API
#[derive(Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ResendMailer {
    pub fn new(base_url: &str, api_key: &str) -> anyhow::Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            endpoint: format!("{}/emails", base_url.trim_end_matches('/')),
            api_key: api_key.to_owned(),
        })
    }
}

fn transport(e: reqwest::Error) -> SendError {
    SendError::Transport(e.to_string())
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<Ack, SendError> {
        let request = SendEmailRequest {
            from: &email.from,
            to: [&email.to],
            reply_to: email.reply_to.as_deref(),
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| "Unknown error".to_string());

            error!(status = status.as_u16(), %message, "Email service error");

            return Err(SendError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .json::<SendEmailResponse>()
            .await
            .map_err(transport)?;

        info!(
            to = %email.to,
            id = body.id.as_deref().unwrap_or("-"),
            "Contact notification sent via Resend"
        );

        Ok(Ack { id: body.id })
    }
}
