use std::time::Duration;

use async_trait::async_trait;

use crate::{ApiReply, ContactApi, FormFields, ReplyBody, TransportError};

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        Self(value.to_string())
    }
}

/// Posts contact forms to a running site over HTTP.
#[derive(Clone)]
pub struct HttpContactApi {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpContactApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/contact", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContactApi for HttpContactApi {
    async fn submit(&self, fields: &FormFields) -> Result<ApiReply, TransportError> {
        let response = self.client.post(&self.endpoint).json(fields).send().await?;
        let status = response.status().as_u16();
        let body = response.json::<ReplyBody>().await?;

        Ok(ApiReply { status, body })
    }
}
