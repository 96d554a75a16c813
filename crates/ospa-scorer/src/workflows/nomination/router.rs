use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::attachment::AttachmentPolicy;
use super::commands::RecordCommand;
use super::domain::{CandidateRecord, NominationType};
use super::service::NominationService;
use super::submission::{SubmissionError, SubmissionSink};

/// Room for the JSON record around the base64 attachment.
const RECORD_SLACK_BYTES: u64 = 1024 * 1024;

/// Largest request body that can still carry an attachment the policy accepts.
pub fn request_body_limit(policy: &AttachmentPolicy) -> usize {
    let encoded = policy.max_bytes.saturating_mul(4) / 3 + 4;
    usize::try_from(encoded.saturating_add(RECORD_SLACK_BYTES)).unwrap_or(usize::MAX)
}

/// Router builder exposing the stateless scoring and submission endpoints.
pub fn nomination_router<S>(service: Arc<NominationService<S>>) -> Router
where
    S: SubmissionSink + 'static,
{
    let body_limit = request_body_limit(service.attachment_policy());
    Router::new()
        .route("/api/v1/rubric", get(rubric_handler::<S>))
        .route("/api/v1/nominations/new", post(new_record_handler::<S>))
        .route("/api/v1/nominations/commands", post(command_handler::<S>))
        .route("/api/v1/nominations/score", post(score_handler::<S>))
        .route("/api/v1/nominations/submit", post(submit_handler::<S>))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewRecordRequest {
    pub(crate) nomination_type: NominationType,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommandRequest {
    pub(crate) record: CandidateRecord,
    pub(crate) command: RecordCommand,
}

pub(crate) async fn rubric_handler<S>(State(service): State<Arc<NominationService<S>>>) -> Response
where
    S: SubmissionSink + 'static,
{
    (StatusCode::OK, Json(service.rubric().clone())).into_response()
}

pub(crate) async fn new_record_handler<S>(
    State(service): State<Arc<NominationService<S>>>,
    Json(request): Json<NewRecordRequest>,
) -> Response
where
    S: SubmissionSink + 'static,
{
    let record = service.new_record(request.nomination_type);
    match service.sheet(&record) {
        Ok(score) => (
            StatusCode::OK,
            Json(json!({ "record": record, "score": score })),
        )
            .into_response(),
        Err(error) => unprocessable(error.to_string()),
    }
}

pub(crate) async fn command_handler<S>(
    State(service): State<Arc<NominationService<S>>>,
    Json(request): Json<CommandRequest>,
) -> Response
where
    S: SubmissionSink + 'static,
{
    match service.apply(request.record, request.command) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(error) => unprocessable(error.to_string()),
    }
}

pub(crate) async fn score_handler<S>(
    State(service): State<Arc<NominationService<S>>>,
    Json(record): Json<CandidateRecord>,
) -> Response
where
    S: SubmissionSink + 'static,
{
    match service.sheet(&record) {
        Ok(sheet) => (StatusCode::OK, Json(sheet)).into_response(),
        Err(error) => unprocessable(error.to_string()),
    }
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<NominationService<S>>>,
    Json(record): Json<CandidateRecord>,
) -> Response
where
    S: SubmissionSink + 'static,
{
    match service.submit(&record).await {
        Ok(receipt) => (StatusCode::ACCEPTED, Json(receipt)).into_response(),
        Err(SubmissionError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "missing": error.missing,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(SubmissionError::Attachment(error)) => unprocessable(error.to_string()),
        Err(SubmissionError::InvalidScores(error)) => unprocessable(error.to_string()),
        Err(SubmissionError::Transport(error)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

fn unprocessable(message: String) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}
