use askama::Template;

use crate::{ContactSubmission, Envelope, OutgoingEmail};

#[derive(Template)]
#[template(path = "emails/contact.html")]
struct ContactHtmlTemplate<'a> {
    name: &'a str,
    email: &'a str,
    lines: Vec<&'a str>,
}

#[derive(Template)]
#[template(path = "emails/contact.txt")]
struct ContactTextTemplate<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// Build the notification sent to the site owner for one submission.
pub fn compose(
    submission: &ContactSubmission,
    envelope: &Envelope,
) -> Result<OutgoingEmail, askama::Error> {
    let name = submission.name.as_deref().unwrap_or("Not provided");

    let html = ContactHtmlTemplate {
        name,
        email: &submission.email,
        lines: submission.message.lines().collect(),
    }
    .render()?;

    let text = ContactTextTemplate {
        name,
        email: &submission.email,
        message: &submission.message,
    }
    .render()?;

    Ok(OutgoingEmail {
        from: envelope.from.to_owned(),
        to: envelope.to.to_owned(),
        reply_to: Some(submission.email.to_owned()),
        subject: format!("New message from {}", submission.display_name()),
        html,
        text,
    })
}
