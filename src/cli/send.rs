use std::time::Duration;

use anyhow::Result;
use clap::Args;
use folio_contact::{ContactForm, FormFields, HttpContactApi, SubmitStatus};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Base URL of the site (overrides config file)
    #[arg(long)]
    pub url: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub message: String,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub project_type: Option<String>,

    #[arg(long)]
    pub budget: Option<String>,

    #[arg(long)]
    pub timeline: Option<String>,
}

impl From<SendArgs> for FormFields {
    fn from(args: SendArgs) -> Self {
        Self {
            name: args.name.unwrap_or_default(),
            email: args.email,
            company: args.company.unwrap_or_default(),
            project_type: args.project_type.unwrap_or_default(),
            budget: args.budget.unwrap_or_default(),
            timeline: args.timeline.unwrap_or_default(),
            message: args.message,
        }
    }
}

/// Fill in a contact form and submit it to a running site
pub async fn send(config: &Config, args: SendArgs) -> Result<()> {
    let base_url = args
        .url
        .clone()
        .unwrap_or_else(|| config.client.base_url.to_owned());
    let api = HttpContactApi::new(&base_url, Duration::from_secs(config.client.timeout_secs))?;

    tracing::info!(endpoint = api.endpoint(), "Submitting contact form");

    let mut form = ContactForm::with_fields(args.into());

    if form.submit(&api).await == SubmitStatus::Success {
        println!("{}", form.notice().unwrap_or("Message sent"));
        return Ok(());
    }

    for (field, message) in form.errors() {
        eprintln!("{field}: {message}");
    }

    anyhow::bail!("contact form was not submitted")
}
