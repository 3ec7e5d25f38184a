//! Delivery backends for contact notifications

mod log;
mod resend;
mod smtp;

use std::sync::Arc;

use folio_contact::{Envelope, Mailer};
use tracing::info;

use crate::config::{EmailConfig, MailProvider};

pub use log::LogMailer;
pub use resend::ResendMailer;
pub use smtp::SmtpMailer;

/// Build the mailer selected by `email.provider`
pub fn build_mailer(config: &EmailConfig) -> anyhow::Result<Arc<dyn Mailer>> {
    info!(provider = %config.provider, "Configuring contact mailer");

    let mailer: Arc<dyn Mailer> = match config.provider {
        MailProvider::Log => Arc::new(LogMailer),
        MailProvider::Smtp => Arc::new(SmtpMailer::new(config)?),
        MailProvider::Resend => Arc::new(ResendMailer::new(
            &config.resend_base_url,
            &config.resend_api_key,
        )?),
    };

    Ok(mailer)
}

pub fn envelope(config: &EmailConfig) -> Envelope {
    Envelope {
        from: config.from_address.to_owned(),
        to: config.contact_address.to_owned(),
    }
}
