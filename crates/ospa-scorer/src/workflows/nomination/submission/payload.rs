use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{CandidateRecord, MovFile};
use super::super::projection::ScoreSheet;

/// JSON body posted to the tracking sheet endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub timestamp: String,
    pub nomination_type: String,
    pub candidate_name: String,
    pub division: String,
    pub school_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_band: Option<String>,
    pub grand_total: String,
    pub details: BTreeMap<String, String>,
    pub categories: BTreeMap<String, String>,
    pub mov_file: MovFile,
    /// The full record without the attachment body, for audit.
    pub raw_json: String,
}

pub(crate) fn build_payload(
    record: &CandidateRecord,
    sheet: &ScoreSheet,
    mov_file: MovFile,
    timestamp: String,
) -> Result<SubmissionPayload, serde_json::Error> {
    let mut audit_copy = record.clone();
    audit_copy.mov_file = None;
    let raw_json = serde_json::to_string(&audit_copy)?;

    let categories = sheet
        .categories
        .iter()
        .map(|line| (line.label.clone(), line.score.clone()))
        .collect();

    Ok(SubmissionPayload {
        timestamp,
        nomination_type: sheet.nomination_label.clone(),
        candidate_name: record.identity.candidate_name.trim().to_string(),
        division: record
            .identity
            .division
            .map(|division| division.label().to_string())
            .unwrap_or_default(),
        school_name: record.identity.school_name.trim().to_string(),
        average_rating: sheet.average_rating.clone(),
        rating_band: sheet.rating_band.clone(),
        grand_total: sheet.grand_total.clone(),
        details: sheet.details.clone(),
        categories,
        mov_file,
        raw_json,
    })
}
