mod payload;
mod sink;

pub use payload::SubmissionPayload;
pub use sink::{HttpSubmissionSink, SinkError, SubmissionSink, UnconfiguredSink};

pub(crate) use payload::build_payload;

use std::fmt;

use serde::{Deserialize, Serialize};

use super::attachment::AttachmentError;
use super::commands::CommandError;
use super::domain::{CandidateRecord, MovFile};

/// Fields that must be filled before a nomination may leave the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    Division,
    SchoolName,
    CandidateName,
    MovFile,
}

impl RequiredField {
    pub const fn label(self) -> &'static str {
        match self {
            RequiredField::Division => "Division",
            RequiredField::SchoolName => "School Name",
            RequiredField::CandidateName => "Candidate Name",
            RequiredField::MovFile => "Consolidated MOV PDF",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub missing: Vec<RequiredField>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.missing.iter().map(|field| field.label()).collect();
        write!(f, "please complete the following: {}", labels.join(", "))
    }
}

impl std::error::Error for ValidationError {}

/// Check the identity fields and attachment, returning the attachment when
/// everything required is present.
pub fn validate_record(record: &CandidateRecord) -> Result<&MovFile, ValidationError> {
    let mut missing = Vec::new();
    if record.identity.division.is_none() {
        missing.push(RequiredField::Division);
    }
    if record.identity.school_name.trim().is_empty() {
        missing.push(RequiredField::SchoolName);
    }
    if record.identity.candidate_name.trim().is_empty() {
        missing.push(RequiredField::CandidateName);
    }

    match &record.mov_file {
        Some(file) if missing.is_empty() => Ok(file),
        Some(_) => Err(ValidationError { missing }),
        None => {
            missing.push(RequiredField::MovFile);
            Err(ValidationError { missing })
        }
    }
}

/// Confirmation returned once the payload has been handed to the sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub file_name: String,
    pub grand_total: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<String>,
    pub submitted_at: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
    #[error(transparent)]
    InvalidScores(#[from] CommandError),
    #[error("unable to encode submission payload: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Transport(#[from] SinkError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::nomination::domain::{Division, NominationType};

    #[test]
    fn blank_record_lists_every_missing_field_in_form_order() {
        let record = CandidateRecord::new(NominationType::Adviser);

        let err = validate_record(&record).expect_err("blank record rejected");

        assert_eq!(
            err.missing,
            vec![
                RequiredField::Division,
                RequiredField::SchoolName,
                RequiredField::CandidateName,
                RequiredField::MovFile,
            ]
        );
        assert!(err.to_string().contains("Consolidated MOV PDF"));
    }

    #[test]
    fn whitespace_names_count_as_missing() {
        let mut record = CandidateRecord::new(NominationType::Journalist);
        record.identity.division = Some(Division::Pasig);
        record.identity.school_name = "   ".to_string();
        record.identity.candidate_name = "Ana".to_string();
        record.mov_file = Some(MovFile {
            name: "mov.pdf".to_string(),
            data: "JVBERg==".to_string(),
            mime_type: "application/pdf".to_string(),
        });

        let err = validate_record(&record).expect_err("blank school rejected");

        assert_eq!(err.missing, vec![RequiredField::SchoolName]);
    }
}
