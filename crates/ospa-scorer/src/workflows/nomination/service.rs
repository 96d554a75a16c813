use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::attachment::{normalized_file_name, validate_attachment, AttachmentPolicy};
use super::commands::{self, validate_scores, CommandError, RecordCommand};
use super::domain::{CandidateRecord, MovFile, NominationType, DEFAULT_PERFORMANCE_RATING};
use super::projection::ScoreSheet;
use super::rubric::RubricSet;
use super::scoring::{ScoreOutcome, ScoringEngine};
use super::submission::{
    build_payload, validate_record, SubmissionError, SubmissionReceipt, SubmissionSink,
};

/// Locale-style stamp the tracking sheet shows in its first column.
const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Service composing the scoring engine, command reducer and submission sink.
pub struct NominationService<S> {
    engine: Arc<ScoringEngine>,
    sink: Arc<S>,
    attachments: AttachmentPolicy,
    default_rating: f64,
}

/// Next record plus its freshly computed score sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub record: CandidateRecord,
    pub score: ScoreSheet,
}

impl<S> NominationService<S>
where
    S: SubmissionSink + 'static,
{
    pub fn new(engine: ScoringEngine, sink: Arc<S>, attachments: AttachmentPolicy) -> Self {
        Self {
            engine: Arc::new(engine),
            sink,
            attachments,
            default_rating: DEFAULT_PERFORMANCE_RATING,
        }
    }

    /// Starting score for every adviser performance rating year.
    pub fn with_default_rating(mut self, default_rating: f64) -> Self {
        self.default_rating = default_rating;
        self
    }

    pub fn rubric(&self) -> &RubricSet {
        self.engine.rubric()
    }

    pub fn attachment_policy(&self) -> &AttachmentPolicy {
        &self.attachments
    }

    pub fn new_record(&self, kind: NominationType) -> CandidateRecord {
        CandidateRecord::with_default_rating(kind, self.default_rating)
    }

    /// Score a record after checking the ranges the reducer would enforce.
    pub fn score(&self, record: &CandidateRecord) -> Result<ScoreOutcome, CommandError> {
        validate_scores(record)?;
        Ok(self.engine.score(record))
    }

    pub fn sheet(&self, record: &CandidateRecord) -> Result<ScoreSheet, CommandError> {
        Ok(ScoreSheet::from_outcome(&self.score(record)?))
    }

    /// Apply an edit and rescore the resulting record.
    pub fn apply(
        &self,
        record: CandidateRecord,
        command: RecordCommand,
    ) -> Result<CommandOutcome, CommandError> {
        let record = commands::apply(record, command)?;
        let score = self.sheet(&record)?;
        Ok(CommandOutcome { record, score })
    }

    /// Validate, score and hand the nomination to the sink. The caller keeps
    /// `record` untouched, so a failed delivery can simply be retried.
    pub async fn submit(
        &self,
        record: &CandidateRecord,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let attachment = validate_record(record)?;
        validate_scores(record)?;
        validate_attachment(attachment, &self.attachments)?;

        let file_name = normalized_file_name(&record.identity);
        let mov_file = MovFile {
            name: file_name.clone(),
            ..attachment.clone()
        };

        let sheet = self.sheet(record)?;
        let submitted_at = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let payload = build_payload(record, &sheet, mov_file, submitted_at.clone())?;

        info!(
            nomination = record.kind().label(),
            file = %file_name,
            grand_total = %sheet.grand_total,
            "submitting nomination"
        );

        if let Err(err) = self.sink.deliver(&payload).await {
            warn!(file = %file_name, error = %err, "nomination submission failed");
            return Err(err.into());
        }

        Ok(SubmissionReceipt {
            file_name,
            grand_total: sheet.grand_total,
            average_rating: sheet.average_rating,
            submitted_at,
        })
    }
}
