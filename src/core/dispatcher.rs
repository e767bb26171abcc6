use crate::domain::model::{
    Candidate, FailureKind, StatusPolicy, UploadOutcome, UploadResult, UploadTarget,
};
use crate::domain::ports::Transport;
use crate::utils::error::IngestError;
use futures::future::join_all;
use std::sync::Arc;
use tracing::Instrument;

/// Fans out one upload task per candidate and waits for all of them.
pub struct UploadDispatcher<T: Transport + 'static> {
    transport: Arc<T>,
    target: Arc<UploadTarget>,
    policy: StatusPolicy,
}

impl<T: Transport + 'static> UploadDispatcher<T> {
    pub fn new(transport: T, target: UploadTarget, policy: StatusPolicy) -> Self {
        Self {
            transport: Arc::new(transport),
            target: Arc::new(target),
            policy,
        }
    }

    pub fn target(&self) -> &UploadTarget {
        &self.target
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Uploads every candidate concurrently.
    ///
    /// Each candidate settles on its own; a failure never stops the others.
    /// Outcomes are returned in candidate order once every task has finished.
    pub async fn dispatch(&self, candidates: Vec<Candidate>) -> Vec<UploadOutcome> {
        let (file_names, handles): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .map(|candidate| {
                let transport = Arc::clone(&self.transport);
                let target = Arc::clone(&self.target);
                let policy = self.policy;
                let span = tracing::info_span!("upload", file = %candidate.file_name);

                let file_name = candidate.file_name.clone();
                let handle = tokio::spawn(
                    async move { upload_one(transport.as_ref(), &target, &candidate, policy).await }
                        .instrument(span),
                );
                (file_name, handle)
            })
            .unzip();

        // Wait for every upload to settle
        let joined = join_all(handles).await;

        file_names
            .into_iter()
            .zip(joined)
            .map(|(file_name, joined)| {
                let result = joined.unwrap_or_else(|e| {
                    tracing::error!("upload failed: {}: task aborted: {}", file_name, e);
                    UploadResult::Failed {
                        kind: FailureKind::Transport,
                        message: format!("upload task aborted: {}", e),
                    }
                });
                UploadOutcome { file_name, result }
            })
            .collect()
    }
}

async fn upload_one<T: Transport + ?Sized>(
    transport: &T,
    target: &UploadTarget,
    candidate: &Candidate,
    policy: StatusPolicy,
) -> UploadResult {
    tracing::info!("{}", candidate.file_name);

    // Transport failures stay local to this candidate
    let response = match transport.upload(target, candidate).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("upload failed: {}", e);
            return UploadResult::Failed {
                kind: FailureKind::Transport,
                message: e.to_string(),
            };
        }
    };

    if policy == StatusPolicy::Strict && !response.is_success() {
        let err = IngestError::ServerError {
            file: candidate.file_name.clone(),
            status: response.status,
            body: response.body,
        };
        tracing::error!("upload failed: {}", err);
        tracing::debug!("💡 {}", err.recovery_suggestion());
        return UploadResult::Failed {
            kind: FailureKind::Server,
            message: err.to_string(),
        };
    }

    if !response.is_success() {
        tracing::warn!(
            "{} answered with status {}",
            candidate.file_name,
            response.status
        );
    }
    tracing::info!(
        "Upload successful!  Server responded with: {}",
        response.body
    );
    UploadResult::Delivered(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Scheme, UploadResponse};
    use crate::utils::error::Result;
    use std::sync::Mutex;

    /// Answers from a fixed table keyed by file name; unknown files fail.
    struct ScriptedTransport {
        answers: Vec<(&'static str, u16)>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        fn new(answers: Vec<(&'static str, u16)>) -> Self {
            Self {
                answers,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl Transport for ScriptedTransport {
        async fn upload(&self, _target: &UploadTarget, candidate: &Candidate) -> Result<UploadResponse> {
            self.calls.lock().unwrap().push(candidate.file_name.clone());
            match self.answers.iter().find(|(name, _)| *name == candidate.file_name) {
                Some((_, status)) => Ok(UploadResponse {
                    status: *status,
                    body: format!("{} received", candidate.file_name),
                }),
                None => Err(IngestError::TransportError {
                    file: candidate.file_name.clone(),
                    message: "connection refused".to_string(),
                }),
            }
        }
    }

    fn target() -> UploadTarget {
        UploadTarget::new(Scheme::Http, "localhost", Some(8060))
    }

    fn candidates(names: &[&str]) -> Vec<Candidate> {
        names
            .iter()
            .map(|name| Candidate::new(*name, format!("/corpus/{}", name)))
            .collect()
    }

    #[tokio::test]
    async fn test_failure_of_one_candidate_does_not_stop_others() {
        let dispatcher = UploadDispatcher::new(
            ScriptedTransport::new(vec![("b.xml", 200)]),
            target(),
            StatusPolicy::Lenient,
        );

        let outcomes = dispatcher.dispatch(candidates(&["a.xml", "b.xml"])).await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].file_name, "a.xml");
        assert!(matches!(
            outcomes[0].result,
            UploadResult::Failed { kind: FailureKind::Transport, .. }
        ));
        assert_eq!(outcomes[1].file_name, "b.xml");
        assert!(outcomes[1].is_delivered());
    }

    #[tokio::test]
    async fn test_every_candidate_is_attempted_once() {
        let dispatcher = UploadDispatcher::new(
            ScriptedTransport::new(vec![("c.xml", 200)]),
            target(),
            StatusPolicy::Lenient,
        );

        let names = ["a.xml", "b.xml", "c.xml", "d.xml", "e.xml"];
        let outcomes = dispatcher.dispatch(candidates(&names)).await;

        let mut calls = dispatcher.transport.calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(calls, names.to_vec());
        assert_eq!(outcomes.len(), names.len());
        assert_eq!(outcomes.iter().filter(|o| o.is_delivered()).count(), 1);
    }

    #[tokio::test]
    async fn test_lenient_policy_reports_server_errors_as_delivered() {
        let dispatcher = UploadDispatcher::new(
            ScriptedTransport::new(vec![("a.xml", 500)]),
            target(),
            StatusPolicy::Lenient,
        );

        let outcomes = dispatcher.dispatch(candidates(&["a.xml"])).await;

        match &outcomes[0].result {
            UploadResult::Delivered(response) => {
                assert_eq!(response.status, 500);
                assert_eq!(response.body, "a.xml received");
            }
            other => panic!("expected delivery, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_strict_policy_rejects_non_success_status() {
        let dispatcher = UploadDispatcher::new(
            ScriptedTransport::new(vec![("a.xml", 500), ("b.xml", 204)]),
            target(),
            StatusPolicy::Strict,
        );

        let outcomes = dispatcher.dispatch(candidates(&["a.xml", "b.xml"])).await;

        assert!(matches!(
            outcomes[0].result,
            UploadResult::Failed { kind: FailureKind::Server, .. }
        ));
        assert!(outcomes[1].is_delivered());
    }

    #[tokio::test]
    async fn test_no_candidates_means_no_uploads() {
        let dispatcher = UploadDispatcher::new(
            ScriptedTransport::new(vec![]),
            target(),
            StatusPolicy::Lenient,
        );

        let outcomes = dispatcher.dispatch(Vec::new()).await;

        assert!(outcomes.is_empty());
        assert!(dispatcher.transport.calls.lock().unwrap().is_empty());
    }
}
