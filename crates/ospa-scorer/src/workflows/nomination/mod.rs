//! OSPA nomination scoring: candidate records, the rubric, the aggregation
//! engine and the outbound submission pipeline.

pub mod attachment;
pub mod commands;
pub mod domain;
pub mod projection;
pub mod router;
pub mod rubric;
pub mod scoring;
pub mod service;
pub mod submission;

#[cfg(test)]
mod tests;

pub use attachment::{encode_attachment, normalized_file_name, AttachmentError, AttachmentPolicy};
pub use commands::{apply, apply_all, validate_scores, CommandError, RecordCommand};
pub use domain::{
    AcademicRank, Achievement, AchievementCategory, AdviserFields, CandidateIdentity,
    CandidateRecord, Division, EntryId, InterviewCriterion, InterviewScores, JournalistFields,
    LeadershipEntry, Level, MovFile, Nomination, NominationType, Position, PublicationPosition,
    Rank, RatingEntry, ServiceCategory, ServiceEntry,
};
pub use projection::{ProjectionError, ScoreSheet};
pub use router::nomination_router;
pub use rubric::{AdviserRubric, JournalistRubric, RubricError, RubricSet};
pub use scoring::{
    RatingBand, RatingBands, ScoreCategory, ScoreComponent, ScoreGroup, ScoreOutcome,
    ScoringEngine,
};
pub use service::{CommandOutcome, NominationService};
pub use submission::{
    HttpSubmissionSink, RequiredField, SinkError, SubmissionError, SubmissionPayload,
    SubmissionReceipt, SubmissionSink, UnconfiguredSink, ValidationError,
};
