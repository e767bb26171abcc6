use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Path every document is posted to on the upload service.
pub const UPLOAD_ENDPOINT: &str = "/backoffice/upload/";

/// Declared content type of every uploaded part.
pub const XML_CONTENT_TYPE: &str = "text/xml";

/// Name of the multipart field the service reads the document from.
pub const DEFAULT_FIELD_NAME: &str = "uploadedFiles";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination of every upload in a run. Built once, shared read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub scheme: Scheme,
    pub host: String,
    pub port: Option<u16>,
    pub endpoint_path: &'static str,
}

impl UploadTarget {
    pub fn new(scheme: Scheme, host: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            scheme,
            host: host.into(),
            port,
            endpoint_path: UPLOAD_ENDPOINT,
        }
    }

    pub fn url(&self) -> String {
        match self.port {
            Some(port) => format!(
                "{}://{}:{}{}",
                self.scheme, self.host, port, self.endpoint_path
            ),
            None => format!("{}://{}{}", self.scheme, self.host, self.endpoint_path),
        }
    }
}

/// A file selected by the scanner, uploaded exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub file_name: String,
    pub file_path: PathBuf,
    pub content_type: &'static str,
}

impl Candidate {
    pub fn new(file_name: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            file_path: file_path.into(),
            content_type: XML_CONTENT_TYPE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResponse {
    pub status: u16,
    pub body: String,
}

impl UploadResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// How HTTP status codes of completed uploads are judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Any completed response counts as delivered.
    #[default]
    Lenient,
    /// Non-2xx responses are reported as server errors.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Server,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResult {
    Delivered(UploadResponse),
    Failed { kind: FailureKind, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub file_name: String,
    pub result: UploadResult,
}

impl UploadOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self.result, UploadResult::Delivered(_))
    }
}
