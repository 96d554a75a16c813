use std::future::Future;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;

use crate::workflows::nomination::{
    apply_all, nomination_router, AchievementCategory, AttachmentPolicy, CandidateRecord,
    Division, Level, MovFile, NominationService, NominationType, RecordCommand, Rank,
    ScoringEngine, SinkError, SubmissionPayload, SubmissionSink,
};

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::default()
}

pub(super) fn pdf_file() -> MovFile {
    MovFile {
        name: "consolidated.pdf".to_string(),
        data: STANDARD.encode(b"%PDF-1.7\n%%EOF"),
        mime_type: "application/pdf".to_string(),
    }
}

/// PDF attachment whose decoded body is `len` bytes long.
pub(super) fn pdf_of_len(len: usize) -> MovFile {
    let mut bytes = b"%PDF-1.7\n".to_vec();
    bytes.resize(len, b'0');
    MovFile {
        name: "portfolio.pdf".to_string(),
        data: STANDARD.encode(bytes),
        mime_type: "application/pdf".to_string(),
    }
}

pub(super) fn record_with(kind: NominationType, commands: Vec<RecordCommand>) -> CandidateRecord {
    apply_all(CandidateRecord::new(kind), commands).expect("commands apply")
}

pub(super) fn national_first(category: AchievementCategory) -> RecordCommand {
    RecordCommand::AddAchievement {
        category,
        level: Level::National,
        rank: Rank::First,
        year: "2024".to_string(),
    }
}

/// Adviser record with every required submission field filled in.
pub(super) fn complete_adviser() -> CandidateRecord {
    record_with(
        NominationType::Adviser,
        vec![
            RecordCommand::SetCandidateName {
                value: "Maria Clara Santos".to_string(),
            },
            RecordCommand::SetSchoolName {
                value: "Rizal High School".to_string(),
            },
            RecordCommand::SetDivision {
                value: Some(Division::Pasig),
            },
            national_first(AchievementCategory::IndividualContests),
            RecordCommand::AttachFile { file: pdf_file() },
        ],
    )
}

#[derive(Default, Clone)]
pub(super) struct RecordingSink {
    payloads: Arc<Mutex<Vec<SubmissionPayload>>>,
}

impl RecordingSink {
    pub(super) fn payloads(&self) -> Vec<SubmissionPayload> {
        self.payloads.lock().expect("sink mutex poisoned").clone()
    }
}

impl SubmissionSink for RecordingSink {
    fn deliver(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<(), SinkError>> + Send {
        self.payloads
            .lock()
            .expect("sink mutex poisoned")
            .push(payload.clone());
        async { Ok(()) }
    }
}

#[derive(Default, Clone, Copy)]
pub(super) struct OfflineSink;

impl SubmissionSink for OfflineSink {
    fn deliver(
        &self,
        _payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<(), SinkError>> + Send {
        async { Err(SinkError::Transport("connection reset".to_string())) }
    }
}

pub(super) fn service_with<S>(sink: Arc<S>) -> NominationService<S>
where
    S: SubmissionSink + 'static,
{
    NominationService::new(engine(), sink, AttachmentPolicy::default())
}

pub(super) fn build_router() -> (axum::Router, RecordingSink) {
    let sink = RecordingSink::default();
    let service = Arc::new(service_with(Arc::new(sink.clone())));
    (nomination_router(service), sink)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
