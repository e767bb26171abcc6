use super::file_config::FileConfig;
use super::UploadConfig;
use crate::domain::model::{Scheme, StatusPolicy};
use crate::utils::error::{IngestError, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "corpus-uploader")]
#[command(about = "Uploads the XML documents of a corpus directory to the back office")]
pub struct CliArgs {
    /// Configuration file (JSON, or TOML when the extension is .toml)
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Host of the upload service; makes the configuration file optional
    #[arg(long)]
    pub host: Option<String>,

    /// Port of the upload service
    #[arg(long)]
    pub port: Option<u16>,

    /// Use https instead of http
    #[arg(long)]
    pub https: bool,

    /// Directory holding the documents to upload
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Report non-2xx responses as failures
    #[arg(long)]
    pub strict_status: bool,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// List the documents that would be uploaded without sending anything
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Log CPU and memory usage of the run
    #[arg(long)]
    pub monitor: bool,
}

impl CliArgs {
    /// Reads the configuration file and applies the command line on top.
    ///
    /// The file may be absent only when `--host` is given. A file that exists
    /// but cannot be read or parsed is always an error.
    pub fn resolve(&self) -> Result<UploadConfig> {
        let file = match FileConfig::from_file(&self.config) {
            Ok(file) => file,
            Err(IngestError::IoError(e))
                if self.host.is_some() && e.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::debug!(
                    "No configuration file at {}, using command line only",
                    self.config.display()
                );
                FileConfig::default()
            }
            Err(e) => return Err(e),
        };

        self.apply_overrides(file)
    }

    pub fn apply_overrides(&self, mut file: FileConfig) -> Result<UploadConfig> {
        if let Some(host) = &self.host {
            file.host = Some(host.clone());
        }
        if let Some(port) = self.port {
            file.port = Some(port);
        }
        if self.https {
            file.scheme = Some(Scheme::Https);
        }
        if let Some(dir) = &self.dir {
            file.corpus_dir = Some(dir.clone());
        }
        if self.strict_status {
            file.status_policy = Some(StatusPolicy::Strict);
        }
        if let Some(timeout) = self.timeout {
            file.timeout_seconds = Some(timeout);
        }

        UploadConfig::from_file_config(file)
    }
}
