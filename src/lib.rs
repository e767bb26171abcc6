pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;
pub use config::{file_config::FileConfig, UploadConfig};

pub use adapters::HttpTransport;
pub use core::{dispatcher::UploadDispatcher, engine::IngestEngine, scanner::scan_directory};
pub use domain::model::{
    Candidate, FailureKind, Scheme, StatusPolicy, UploadOutcome, UploadResponse, UploadResult,
    UploadTarget,
};
pub use domain::ports::{ConfigProvider, Transport};
pub use utils::error::{IngestError, Result};
