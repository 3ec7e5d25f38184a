use async_trait::async_trait;

/// Sender and recipient used for every contact notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Provider acknowledgement. `id` is set when the provider hands one back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ack {
    pub id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("invalid address: {0}")]
    Address(String),

    #[error("message could not be built: {0}")]
    Build(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider rejected message ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Transactional mail delivery.
///
/// One best-effort attempt per call: implementations must not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<Ack, SendError>;
}
