// Outbound HTTP to the image hosting providers.
// Adapters describe a multipart form as a list of text fields; the transport sends it
// and hands back the decoded JSON reply. Tests swap in a recording stub.

use crate::error::UploadError;
use async_trait::async_trait;
use reqwest::{Client, multipart::Form};
use std::time::Duration;
use tracing::debug;

/// One text field of a multipart/form-data body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub value: String,
}

impl FormField {
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `fields` as multipart/form-data to `url` and decode the reply body as JSON.
    ///
    /// The HTTP status is not inspected: both providers describe failures in the body.
    async fn post_form(
        &self,
        url: &str,
        fields: Vec<FormField>,
    ) -> Result<serde_json::Value, UploadError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(
        &self,
        url: &str,
        fields: Vec<FormField>,
    ) -> Result<serde_json::Value, UploadError> {
        let form = fields
            .into_iter()
            .fold(Form::new(), |form, field| form.text(field.name, field.value));

        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!("Image host replied {} ({} bytes) for {}", status, body.len(), url);

        Ok(serde_json::from_slice(&body)?)
    }
}
