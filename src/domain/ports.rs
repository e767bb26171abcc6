use crate::domain::model::{Candidate, StatusPolicy, UploadResponse, UploadTarget};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn target(&self) -> UploadTarget;
    fn corpus_dir(&self) -> &Path;
    fn field_name(&self) -> &str;
    fn status_policy(&self) -> StatusPolicy;
    fn request_timeout(&self) -> Option<Duration>;
}

/// Delivers one candidate to the upload service.
///
/// Returns `Err` only for transport-level failures; any completed HTTP
/// exchange is an `Ok` regardless of its status code.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn upload(&self, target: &UploadTarget, candidate: &Candidate) -> Result<UploadResponse>;
}
