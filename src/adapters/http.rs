use crate::domain::model::{Candidate, UploadResponse, UploadTarget, DEFAULT_FIELD_NAME};
use crate::domain::ports::Transport;
use crate::utils::error::{IngestError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use std::time::Duration;
use tokio_util::io::ReaderStream;

/// Posts candidates as `multipart/form-data` with reqwest.
///
/// The file is streamed from disk into the request body; the handle is owned
/// by the body and dropped once the request settles.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    field_name: String,
}

impl HttpTransport {
    pub fn new(field_name: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            field_name: field_name.into(),
        })
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    async fn build_form(&self, candidate: &Candidate) -> Result<Form> {
        let file = tokio::fs::File::open(&candidate.file_path).await?;
        let length = file.metadata().await?.len();

        let body = Body::wrap_stream(ReaderStream::new(file));
        let part = Part::stream_with_length(body, length)
            .file_name(candidate.file_name.clone())
            .mime_str(candidate.content_type)?;

        Ok(Form::new().part(self.field_name.clone(), part))
    }

    async fn send(&self, target: &UploadTarget, candidate: &Candidate) -> Result<UploadResponse> {
        let form = self.build_form(candidate).await?;
        let url = target.url();

        tracing::debug!("POST {} ({})", url, candidate.file_name);
        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!("{} answered {} for {}", url, status, candidate.file_name);

        Ok(UploadResponse { status, body })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self {
            client: Client::new(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn upload(&self, target: &UploadTarget, candidate: &Candidate) -> Result<UploadResponse> {
        self.send(target, candidate)
            .await
            .map_err(|e| IngestError::TransportError {
                file: candidate.file_name.clone(),
                message: error_chain(&e),
            })
    }
}

/// Renders an error with its sources, since reqwest keeps the useful part
/// (connection refused, timed out) in the chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
