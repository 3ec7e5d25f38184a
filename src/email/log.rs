use async_trait::async_trait;
use folio_contact::{Ack, Mailer, OutgoingEmail, SendError};
use tracing::info;

/// Development mailer: records the notification in the log instead of sending it
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<Ack, SendError> {
        info!(
            from = %email.from,
            to = %email.to,
            reply_to = email.reply_to.as_deref().unwrap_or("-"),
            subject = %email.subject,
            body = %email.text,
            "Contact form submission"
        );

        Ok(Ack::default())
    }
}
