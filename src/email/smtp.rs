use async_trait::async_trait;
use folio_contact::{Ack, Mailer, OutgoingEmail, SendError};
use lettre::{
    Message, SmtpTransport, Transport,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};
use tracing::{error, info, warn};

use crate::config::EmailConfig;

/// SMTP delivery using lettre
#[derive(Clone)]
pub struct SmtpMailer {
    mailer: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> anyhow::Result<Self> {
        let mailer = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );
            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP mailer initialized with authentication and TLS"
            );
            // relay() negotiates STARTTLS
            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());
            SmtpTransport::relay(&config.smtp_host)?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        Ok(Self { mailer })
    }
}

fn mailbox(address: &str) -> Result<Mailbox, SendError> {
    address
        .parse()
        .map_err(|e| SendError::Address(format!("{address}: {e}")))
}

fn build_message(email: &OutgoingEmail) -> Result<Message, SendError> {
    let mut builder = Message::builder()
        .from(mailbox(&email.from)?)
        .to(mailbox(&email.to)?)
        .subject(email.subject.clone());

    // Visitor addresses are only pattern-checked; drop the header if lettre rejects one
    if let Some(reply_to) = &email.reply_to {
        match reply_to.parse::<Mailbox>() {
            Ok(mailbox) => builder = builder.reply_to(mailbox),
            Err(e) => warn!(%reply_to, error = %e, "Omitting unparsable Reply-To address"),
        }
    }

    builder
        .multipart(MultiPart::alternative_plain_html(
            email.text.clone(),
            email.html.clone(),
        ))
        .map_err(|e| SendError::Build(e.to_string()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<Ack, SendError> {
        let message = build_message(&email)?;
        let mailer = self.mailer.clone();

        // lettre's SmtpTransport blocks
        let response = tokio::task::spawn_blocking(move || mailer.send(&message))
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?
            .map_err(|e| {
                error!(error = %e, to = %email.to, "Failed to send contact notification via SMTP");
                SendError::Transport(e.to_string())
            })?;

        info!(to = %email.to, code = %response.code(), "Contact notification sent via SMTP");

        Ok(Ack {
            id: response.first_line().map(str::to_owned),
        })
    }
}
