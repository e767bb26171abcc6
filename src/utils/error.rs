use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Cannot scan directory {}: {source}", path.display())]
    ScanError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Upload of {file} failed: {message}")]
    TransportError { file: String, message: String },

    #[error("Server rejected {file} with status {status}: {body}")]
    ServerError {
        file: String,
        status: u16,
        body: String,
    },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration ({format}): {message}")]
    ConfigParseError { format: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Filesystem,
    Network,
    Server,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Affects a single document; the batch carries on.
    Medium,
    /// Ends the run before anything is uploaded.
    High,
}

impl IngestError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            IngestError::ScanError { .. } | IngestError::IoError(_) => ErrorCategory::Filesystem,
            IngestError::TransportError { .. } | IngestError::ApiError(_) => {
                ErrorCategory::Network
            }
            IngestError::ServerError { .. } => ErrorCategory::Server,
            IngestError::ConfigParseError { .. }
            | IngestError::MissingConfigError { .. }
            | IngestError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Server => ErrorSeverity::Medium,
            ErrorCategory::Filesystem | ErrorCategory::Configuration => ErrorSeverity::High,
        }
    }

    /// Process exit code for an error that ends the run.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            IngestError::ScanError { path, .. } => format!(
                "Check that {} exists, is a directory and is readable",
                path.display()
            ),
            IngestError::TransportError { .. } | IngestError::ApiError(_) => {
                "Check that the upload service is running and reachable".to_string()
            }
            IngestError::ServerError { status, .. } if *status >= 500 => {
                "The service failed while processing the file; check its logs".to_string()
            }
            IngestError::ServerError { .. } => {
                "The service refused the file; check the document and the endpoint".to_string()
            }
            IngestError::IoError(_) => "Check file permissions and disk state".to_string(),
            IngestError::ConfigParseError { format, .. } => {
                format!("Make sure the configuration file is valid {}", format)
            }
            IngestError::MissingConfigError { field } => {
                format!("Set '{}' in the configuration file or on the command line", field)
            }
            IngestError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}'", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            IngestError::ScanError { path, .. } => {
                format!("Could not read the corpus directory {}", path.display())
            }
            IngestError::TransportError { file, .. } => format!("Could not upload {}", file),
            IngestError::ServerError { file, status, .. } => {
                format!("The server answered {} for {}", status, file)
            }
            IngestError::MissingConfigError { field } => {
                format!("Configuration value '{}' is missing", field)
            }
            IngestError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
