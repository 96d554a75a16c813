use std::sync::Arc;

use super::common::*;
use crate::workflows::nomination::{
    AttachmentError, AttachmentPolicy, CandidateRecord, CommandError, NominationService,
    NominationType, RequiredField, SinkError, SubmissionError,
};

#[tokio::test]
async fn submit_delivers_normalized_payload() {
    let sink = RecordingSink::default();
    let service = service_with(Arc::new(sink.clone()));
    let record = complete_adviser();

    let receipt = service.submit(&record).await.expect("submission accepted");

    assert_eq!(
        receipt.file_name,
        "Pasig_Rizal_High_School_Maria_Clara_Santos.pdf"
    );
    assert_eq!(receipt.grand_total, "1.60");
    assert_eq!(receipt.average_rating.as_deref(), Some("4.000"));

    let payloads = sink.payloads();
    assert_eq!(payloads.len(), 1);
    let payload = &payloads[0];
    assert_eq!(payload.nomination_type, "Outstanding School Paper Adviser");
    assert_eq!(payload.division, "Pasig");
    assert_eq!(payload.mov_file.name, receipt.file_name);
    assert_eq!(payload.mov_file.data, pdf_file().data);
    assert_eq!(payload.rating_band.as_deref(), Some("Very Satisfactory"));
    assert_eq!(
        payload.categories.get("Individual Contests").map(String::as_str),
        Some("1.60")
    );
    assert_eq!(payload.timestamp, receipt.submitted_at);
}

#[tokio::test]
async fn audit_copy_omits_attachment_body() {
    let sink = RecordingSink::default();
    let service = service_with(Arc::new(sink.clone()));

    service
        .submit(&complete_adviser())
        .await
        .expect("submission accepted");

    let payload = sink.payloads().remove(0);
    let audit: CandidateRecord =
        serde_json::from_str(&payload.raw_json).expect("audit copy parses");
    assert!(audit.mov_file.is_none());
    assert_eq!(audit.identity.candidate_name, "Maria Clara Santos");
    assert_eq!(audit.kind(), NominationType::Adviser);
}

#[tokio::test]
async fn incomplete_record_is_not_sent() {
    let sink = RecordingSink::default();
    let service = service_with(Arc::new(sink.clone()));
    let mut record = complete_adviser();
    record.identity.division = None;
    record.mov_file = None;

    let err = service.submit(&record).await.expect_err("incomplete record");

    match err {
        SubmissionError::Validation(validation) => assert_eq!(
            validation.missing,
            vec![RequiredField::Division, RequiredField::MovFile]
        ),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(sink.payloads().is_empty());
}

#[tokio::test]
async fn non_pdf_attachment_is_rejected_before_delivery() {
    let sink = RecordingSink::default();
    let service = service_with(Arc::new(sink.clone()));
    let mut record = complete_adviser();
    if let Some(file) = record.mov_file.as_mut() {
        file.mime_type = "image/png".to_string();
    }

    let err = service.submit(&record).await.expect_err("png rejected");

    assert!(matches!(
        err,
        SubmissionError::Attachment(AttachmentError::NotPdf(_))
    ));
    assert!(sink.payloads().is_empty());
}

#[tokio::test]
async fn out_of_range_interview_is_not_sent() {
    let sink = RecordingSink::default();
    let service = service_with(Arc::new(sink.clone()));
    let mut record = complete_adviser();
    record.interview.principles = -50.0;

    let err = service.submit(&record).await.expect_err("negative interview");

    assert!(matches!(
        err,
        SubmissionError::InvalidScores(CommandError::OutOfRange {
            field: "interview score",
            ..
        })
    ));
    assert!(sink.payloads().is_empty());
}

#[tokio::test]
async fn oversized_attachment_is_rejected() {
    let sink = Arc::new(RecordingSink::default());
    let service = NominationService::new(engine(), sink, AttachmentPolicy { max_bytes: 4 });

    let err = service
        .submit(&complete_adviser())
        .await
        .expect_err("attachment over the limit");

    assert!(matches!(
        err,
        SubmissionError::Attachment(AttachmentError::TooLarge { limit: 4, .. })
    ));
}

#[tokio::test]
async fn transport_failure_leaves_record_ready_for_retry() {
    let service = service_with(Arc::new(OfflineSink));
    let record = complete_adviser();
    let before = record.clone();

    let err = service.submit(&record).await.expect_err("sink offline");

    assert!(matches!(
        err,
        SubmissionError::Transport(SinkError::Transport(_))
    ));
    assert_eq!(record, before);

    let retry = service_with(Arc::new(RecordingSink::default()));
    retry.submit(&record).await.expect("retry succeeds");
}

#[tokio::test]
async fn journalist_payload_has_no_rating() {
    let sink = RecordingSink::default();
    let service = service_with(Arc::new(sink.clone()));
    let mut record = complete_adviser();
    record.nomination = CandidateRecord::new(NominationType::Journalist).nomination;

    let receipt = service.submit(&record).await.expect("submission accepted");

    assert!(receipt.average_rating.is_none());
    let payload = sink.payloads().remove(0);
    assert_eq!(payload.nomination_type, "Outstanding Campus Journalist");
    assert!(payload.rating_band.is_none());
}
