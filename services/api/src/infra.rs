use metrics_exporter_prometheus::PrometheusHandle;
use ospa_scorer::config::SubmissionConfig;
use ospa_scorer::error::AppError;
use ospa_scorer::workflows::nomination::{
    encode_attachment, AttachmentPolicy, CandidateRecord, HttpSubmissionSink, MovFile,
    SinkError, SubmissionPayload, SubmissionSink, UnconfiguredSink,
};
use std::future::Future;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Sink chosen at startup from `OSPA_SUBMISSION_URL`.
#[derive(Debug, Clone)]
pub(crate) enum ConfiguredSink {
    Http(HttpSubmissionSink),
    Unconfigured(UnconfiguredSink),
}

impl ConfiguredSink {
    pub(crate) fn from_config(config: &SubmissionConfig) -> Self {
        match &config.endpoint {
            Some(endpoint) => Self::Http(HttpSubmissionSink::new(endpoint.clone())),
            None => Self::Unconfigured(UnconfiguredSink),
        }
    }
}

impl SubmissionSink for ConfiguredSink {
    fn deliver(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<(), SinkError>> + Send {
        async move {
            match self {
                ConfiguredSink::Http(sink) => sink.deliver(payload).await,
                ConfiguredSink::Unconfigured(sink) => sink.deliver(payload).await,
            }
        }
    }
}

/// Keeps payloads in memory; backs `submit --dry-run`.
#[derive(Default, Clone)]
pub(crate) struct InMemorySubmissionSink {
    payloads: Arc<Mutex<Vec<SubmissionPayload>>>,
}

impl SubmissionSink for InMemorySubmissionSink {
    fn deliver(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<(), SinkError>> + Send {
        let stored = self
            .payloads
            .lock()
            .map(|mut guard| guard.push(payload.clone()))
            .map_err(|_| SinkError::Transport("dry-run sink poisoned".to_string()));
        async move { stored }
    }
}

impl InMemorySubmissionSink {
    pub(crate) fn payloads(&self) -> Vec<SubmissionPayload> {
        self.payloads
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

pub(crate) fn load_record(path: &Path) -> Result<CandidateRecord, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Read a file from disk and encode it as the consolidated MOV upload.
pub(crate) fn load_attachment(path: &Path, policy: &AttachmentPolicy) -> Result<MovFile, AppError> {
    let bytes = std::fs::read(path)?;
    let mime_type = mime_guess::from_path(path).first_or_octet_stream();
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment.pdf".to_string());

    encode_attachment(&name, mime_type.essence_str(), &bytes, policy)
        .map_err(|err| AppError::Submission(err.into()))
}
