//! Pure state transitions for a candidate record.
//!
//! Every edit the form makes is expressed as a [`RecordCommand`]. [`apply`]
//! takes the current record by value and either returns the next record or
//! rejects the command, in which case the caller keeps its previous copy.

use serde::{Deserialize, Serialize};

use super::domain::{
    AcademicRank, Achievement, AchievementCategory, CandidateRecord, Division, EntryId,
    InterviewCriterion, JournalistFields, LeadershipEntry, Level, MovFile, Nomination,
    NominationType, Position, PublicationPosition, Rank, ServiceCategory, ServiceEntry,
};

/// Upper bound of a single performance rating.
pub const MAX_PERFORMANCE_RATING: f64 = 5.0;

/// Upper bound of a single interview sub-score.
pub const MAX_INTERVIEW_SCORE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordCommand {
    SetCandidateName {
        value: String,
    },
    SetSchoolName {
        value: String,
    },
    SetDivision {
        value: Option<Division>,
    },
    SetRating {
        year: String,
        score: f64,
    },
    SetAcademicRank {
        value: AcademicRank,
    },
    SetPublicationPosition {
        value: Option<PublicationPosition>,
    },
    SetInterview {
        criterion: InterviewCriterion,
        score: f64,
    },
    AttachFile {
        file: MovFile,
    },
    ClearFile,
    AddAchievement {
        category: AchievementCategory,
        level: Level,
        rank: Rank,
        #[serde(default)]
        year: String,
    },
    AddService {
        category: ServiceCategory,
        level: Level,
    },
    AddLeadership {
        level: Level,
        position: Position,
    },
    RemoveEntry {
        id: EntryId,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("{field} is not recorded for {} nominations", .mode.label())]
    NotApplicable {
        field: &'static str,
        mode: NominationType,
    },
    #[error("no entry with id {0}")]
    UnknownEntry(String),
    #[error("entry id sequence exhausted at {0}")]
    EntryIdsExhausted(u64),
    #[error("no performance rating recorded for {0}")]
    UnknownRatingYear(String),
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Apply `command` to `record`, returning the next record.
pub fn apply(
    mut record: CandidateRecord,
    command: RecordCommand,
) -> Result<CandidateRecord, CommandError> {
    let mode = record.kind();

    match command {
        RecordCommand::SetCandidateName { value } => record.identity.candidate_name = value,
        RecordCommand::SetSchoolName { value } => record.identity.school_name = value,
        RecordCommand::SetDivision { value } => record.identity.division = value,
        RecordCommand::SetRating { year, score } => {
            check_range("performance rating", score, MAX_PERFORMANCE_RATING)?;
            let Nomination::Adviser(fields) = &mut record.nomination else {
                return Err(CommandError::NotApplicable {
                    field: "performance ratings",
                    mode,
                });
            };
            let entry = fields
                .performance_ratings
                .iter_mut()
                .find(|entry| entry.year == year)
                .ok_or(CommandError::UnknownRatingYear(year))?;
            entry.score = score;
        }
        RecordCommand::SetAcademicRank { value } => {
            journalist_fields(&mut record.nomination, "academic rank")?.academic_rank = value;
        }
        RecordCommand::SetPublicationPosition { value } => {
            journalist_fields(&mut record.nomination, "publication position")?.pub_position =
                value;
        }
        RecordCommand::SetInterview { criterion, score } => {
            check_range("interview score", score, MAX_INTERVIEW_SCORE)?;
            record.interview.set(criterion, score);
        }
        RecordCommand::AttachFile { file } => record.mov_file = Some(file),
        RecordCommand::ClearFile => record.mov_file = None,
        RecordCommand::AddAchievement {
            category,
            level,
            rank,
            year,
        } => {
            let id = next_entry_id(&mut record)?;
            record
                .nomination
                .achievements_mut(category)
                .push(Achievement {
                    id,
                    level,
                    rank,
                    year,
                });
        }
        RecordCommand::AddService { category, level } => {
            if record.nomination.services_mut(category).is_none() {
                return Err(CommandError::NotApplicable {
                    field: service_label(category),
                    mode,
                });
            }
            let id = next_entry_id(&mut record)?;
            if let Some(entries) = record.nomination.services_mut(category) {
                entries.push(ServiceEntry { id, level });
            }
        }
        RecordCommand::AddLeadership { level, position } => {
            let id = next_entry_id(&mut record)?;
            record.nomination.leadership_mut().push(LeadershipEntry {
                id,
                level,
                position,
            });
        }
        RecordCommand::RemoveEntry { id } => {
            if !record.nomination.remove_entry(&id) {
                return Err(CommandError::UnknownEntry(id.0));
            }
        }
    }

    Ok(record)
}

/// Fold a sequence of commands, stopping at the first rejection.
pub fn apply_all(
    record: CandidateRecord,
    commands: impl IntoIterator<Item = RecordCommand>,
) -> Result<CandidateRecord, CommandError> {
    commands.into_iter().try_fold(record, apply)
}

/// Range checks for a record posted whole instead of built through [`apply`].
pub fn validate_scores(record: &CandidateRecord) -> Result<(), CommandError> {
    let interview = &record.interview;
    for score in [
        interview.principles,
        interview.leadership,
        interview.engagement,
        interview.commitment,
        interview.communication,
    ] {
        check_range("interview score", score, MAX_INTERVIEW_SCORE)?;
    }

    if let Nomination::Adviser(fields) = &record.nomination {
        for entry in &fields.performance_ratings {
            check_range("performance rating", entry.score, MAX_PERFORMANCE_RATING)?;
        }
    }
    Ok(())
}

fn next_entry_id(record: &mut CandidateRecord) -> Result<EntryId, CommandError> {
    let current = record.next_entry;
    record
        .allocate_entry_id()
        .ok_or(CommandError::EntryIdsExhausted(current))
}

fn journalist_fields<'a>(
    nomination: &'a mut Nomination,
    field: &'static str,
) -> Result<&'a mut JournalistFields, CommandError> {
    match nomination {
        Nomination::Journalist(fields) => Ok(fields),
        Nomination::Adviser(_) => Err(CommandError::NotApplicable {
            field,
            mode: NominationType::Adviser,
        }),
    }
}

fn check_range(field: &'static str, value: f64, max: f64) -> Result<(), CommandError> {
    if value.is_finite() && (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(CommandError::OutOfRange {
            field,
            value,
            min: 0.0,
            max,
        })
    }
}

fn service_label(category: ServiceCategory) -> &'static str {
    match category {
        ServiceCategory::ExtensionServices => "extension services",
        ServiceCategory::Innovations => "innovations",
        ServiceCategory::Speakership => "speakership",
        ServiceCategory::PublishedBooks => "published books",
        ServiceCategory::PublishedArticles => "published articles",
        ServiceCategory::PublishedWorks => "published works",
        ServiceCategory::TrainingsAttended => "trainings attended",
    }
}
