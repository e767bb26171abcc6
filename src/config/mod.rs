#[cfg(feature = "cli")]
pub mod cli;
pub mod file_config;

use crate::domain::model::{Scheme, StatusPolicy, UploadTarget, DEFAULT_FIELD_NAME};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_required_field,
    validate_url, Validate,
};
use file_config::FileConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Corpus location used when neither the file nor the command line names one.
pub const DEFAULT_CORPUS_DIR: &str = "../resources/dataset/dataseer/corpus/";

/// Upper bound accepted for `timeout_seconds`.
pub const MAX_TIMEOUT_SECONDS: u64 = 3600;

/// Fully resolved settings of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadConfig {
    pub host: String,
    pub port: Option<u16>,
    pub scheme: Scheme,
    pub corpus_dir: PathBuf,
    pub field_name: String,
    pub timeout_seconds: Option<u64>,
    pub status_policy: StatusPolicy,
}

impl UploadConfig {
    pub fn new(host: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            host: host.into(),
            port,
            scheme: Scheme::default(),
            corpus_dir: PathBuf::from(DEFAULT_CORPUS_DIR),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            timeout_seconds: None,
            status_policy: StatusPolicy::default(),
        }
    }

    pub fn with_corpus_dir(mut self, corpus_dir: impl Into<PathBuf>) -> Self {
        self.corpus_dir = corpus_dir.into();
        self
    }

    pub fn with_status_policy(mut self, status_policy: StatusPolicy) -> Self {
        self.status_policy = status_policy;
        self
    }

    /// Fills defaults for everything the file leaves out. `host` is required.
    pub fn from_file_config(file: FileConfig) -> Result<Self> {
        let host = validate_required_field("host", &file.host)?.clone();

        Ok(Self {
            host,
            port: file.port,
            scheme: file.scheme.unwrap_or_default(),
            corpus_dir: file
                .corpus_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CORPUS_DIR)),
            field_name: file
                .field_name
                .unwrap_or_else(|| DEFAULT_FIELD_NAME.to_string()),
            timeout_seconds: file.timeout_seconds,
            status_policy: file.status_policy.unwrap_or_default(),
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file_config(FileConfig::from_file(path)?)
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)?;
        if let Some(port) = self.port {
            validate_range("port", port, 1, u16::MAX)?;
        }
        validate_url("target", &self.target().url())?;

        let corpus_dir = self.corpus_dir.to_string_lossy();
        validate_path("corpus_dir", &corpus_dir)?;

        validate_non_empty_string("field_name", &self.field_name)?;

        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, MAX_TIMEOUT_SECONDS)?;
        }

        Ok(())
    }
}

impl ConfigProvider for UploadConfig {
    fn target(&self) -> UploadTarget {
        UploadTarget::new(self.scheme, self.host.clone(), self.port)
    }

    fn corpus_dir(&self) -> &Path {
        &self.corpus_dir
    }

    fn field_name(&self) -> &str {
        &self.field_name
    }

    fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for UploadConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::IngestError;

    #[test]
    fn test_defaults_from_minimal_file() {
        let file = FileConfig::from_json_str(r#"{ "host": "localhost", "port": 8060 }"#).unwrap();
        let config = UploadConfig::from_file_config(file).unwrap();

        assert_eq!(config.scheme, Scheme::Http);
        assert_eq!(config.corpus_dir, PathBuf::from(DEFAULT_CORPUS_DIR));
        assert_eq!(config.field_name, "uploadedFiles");
        assert_eq!(config.status_policy, StatusPolicy::Lenient);
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.target().url(), "http://localhost:8060/backoffice/upload/");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_host_is_required() {
        let err = UploadConfig::from_file_config(FileConfig::default()).unwrap_err();
        assert!(matches!(err, IngestError::MissingConfigError { field } if field == "host"));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(UploadConfig::new("  ", None).validate().is_err());
        assert!(UploadConfig::new("localhost", Some(0)).validate().is_err());
        assert!(UploadConfig::new("bad host/name", None).validate().is_err());

        let mut config = UploadConfig::new("localhost", None);
        config.field_name = String::new();
        assert!(config.validate().is_err());

        let mut config = UploadConfig::new("localhost", None);
        config.timeout_seconds = Some(0);
        assert!(config.validate().is_err());

        let config = UploadConfig::new("localhost", None).with_corpus_dir("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_is_exposed_as_duration() {
        let mut config = UploadConfig::new("localhost", None);
        config.timeout_seconds = Some(30);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }
}
