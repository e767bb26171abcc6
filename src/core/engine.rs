use crate::core::dispatcher::UploadDispatcher;
use crate::core::scanner::scan_directory;
use crate::domain::model::{Candidate, UploadOutcome};
use crate::domain::ports::{ConfigProvider, Transport};
use crate::utils::error::{IngestError, Result};
use crate::utils::monitor::RunMonitor;
use std::path::PathBuf;

/// Scans the corpus directory, then uploads every candidate.
pub struct IngestEngine<T: Transport + 'static> {
    corpus_dir: PathBuf,
    dispatcher: UploadDispatcher<T>,
    monitor: RunMonitor,
}

impl<T: Transport + 'static> IngestEngine<T> {
    pub fn new<C: ConfigProvider>(config: &C, transport: T) -> Self {
        Self::new_with_monitoring(config, transport, false)
    }

    pub fn new_with_monitoring<C: ConfigProvider>(
        config: &C,
        transport: T,
        monitor_enabled: bool,
    ) -> Self {
        Self {
            corpus_dir: config.corpus_dir().to_path_buf(),
            dispatcher: UploadDispatcher::new(transport, config.target(), config.status_policy()),
            monitor: RunMonitor::new(monitor_enabled),
        }
    }

    pub fn scan(&self) -> Result<Vec<Candidate>> {
        scan_directory(&self.corpus_dir)
    }

    /// Runs the batch. Only a failed scan is an error; per-file failures are
    /// reported through the returned outcomes and the log.
    pub async fn run(&self) -> Result<Vec<UploadOutcome>> {
        tracing::info!(
            "Scanning {} for documents to upload",
            self.corpus_dir.display()
        );

        // Scan
        let corpus_dir = self.corpus_dir.clone();
        let candidates = tokio::task::spawn_blocking(move || scan_directory(&corpus_dir))
            .await
            .map_err(|e| IngestError::ScanError {
                path: self.corpus_dir.clone(),
                source: std::io::Error::other(e),
            })??;
        tracing::info!(
            "Uploading {} document(s) to {}",
            candidates.len(),
            self.dispatcher.target().url()
        );
        self.monitor.log_stats("After scan");

        // Upload
        let outcomes = self.dispatcher.dispatch(candidates).await;

        tracing::info!("{} upload(s) attempted", outcomes.len());
        self.monitor.log_final_stats();
        Ok(outcomes)
    }

    pub fn target_url(&self) -> String {
        self.dispatcher.target().url()
    }
}
