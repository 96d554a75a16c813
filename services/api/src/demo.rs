use crate::infra::{load_attachment, load_record, ConfiguredSink, InMemorySubmissionSink};
use chrono::Local;
use clap::{Args, ValueEnum};
use ospa_scorer::config::{AppConfig, SubmissionConfig};
use ospa_scorer::error::AppError;
use ospa_scorer::telemetry;
use ospa_scorer::workflows::nomination::{
    apply_all, validate_scores, AcademicRank, AchievementCategory, CandidateIdentity,
    CandidateRecord, Division, InterviewCriterion, Level, NominationService, NominationType,
    Position, PublicationPosition, Rank, RecordCommand, ScoreSheet, ScoringEngine,
    ServiceCategory, SubmissionReceipt, SubmissionSink,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Candidate record JSON file
    pub(crate) record: PathBuf,
    /// Output format for the score sheet
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Candidate record JSON file
    pub(crate) record: PathBuf,
    /// Consolidated MOV PDF to attach before submitting
    #[arg(long)]
    pub(crate) attachment: Option<PathBuf>,
    /// Override the configured submission endpoint
    #[arg(long)]
    pub(crate) endpoint: Option<String>,
    /// Build and print the payload without sending it
    #[arg(long)]
    pub(crate) dry_run: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Use the campus journalist sample instead of the adviser one
    #[arg(long)]
    pub(crate) journalist: bool,
    /// Output format for the score sheet
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreReport<'a> {
    candidate: &'a CandidateIdentity,
    score: &'a ScoreSheet,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = config.scoring.engine()?;
    let record = load_record(&args.record)?;
    validate_scores(&record)?;

    let sheet = ScoreSheet::from_outcome(&engine.score(&record));
    render_sheet(&record.identity, &sheet, args.format)
}

pub(crate) fn run_rubric() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let rubric = config.scoring.rubric()?;
    println!("{}", serde_json::to_string_pretty(&rubric)?);
    Ok(())
}

pub(crate) async fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    let SubmitArgs {
        record,
        attachment,
        endpoint,
        dry_run,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let engine = config.scoring.engine()?;
    let policy = config.submission.attachments;

    let mut record = load_record(&record)?;
    if let Some(path) = attachment {
        let file = load_attachment(&path, &policy)?;
        record = apply_all(record, [RecordCommand::AttachFile { file }])?;
    }

    if dry_run {
        let sink = InMemorySubmissionSink::default();
        let receipt = submit_with(engine, Arc::new(sink.clone()), &config, &record).await?;
        render_receipt(&receipt, true);
        for payload in sink.payloads() {
            println!("Payload fields:");
            println!("- nominationType: {}", payload.nomination_type);
            println!("- candidateName: {}", payload.candidate_name);
            println!("- division: {}", payload.division);
            println!("- schoolName: {}", payload.school_name);
            println!("- grandTotal: {}", payload.grand_total);
            for (group, total) in &payload.details {
                println!("- details.{group}: {total}");
            }
            println!(
                "- movFile: {} ({} base64 chars)",
                payload.mov_file.name,
                payload.mov_file.data.len()
            );
        }
        return Ok(());
    }

    let submission = SubmissionConfig {
        endpoint: endpoint.or_else(|| config.submission.endpoint.clone()),
        attachments: policy,
    };
    let sink = Arc::new(ConfiguredSink::from_config(&submission));
    let receipt = submit_with(engine, sink, &config, &record).await?;
    render_receipt(&receipt, false);
    Ok(())
}

async fn submit_with<S>(
    engine: ScoringEngine,
    sink: Arc<S>,
    config: &AppConfig,
    record: &CandidateRecord,
) -> Result<SubmissionReceipt, AppError>
where
    S: SubmissionSink + 'static,
{
    let service = NominationService::new(engine, sink, config.submission.attachments)
        .with_default_rating(config.scoring.default_rating);
    Ok(service.submit(record).await?)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let kind = if args.journalist {
        NominationType::Journalist
    } else {
        NominationType::Adviser
    };
    let record = sample_record(kind)?;
    let sheet = ScoreSheet::from_outcome(&ScoringEngine::default().score(&record));

    if args.format == OutputFormat::Text {
        println!("OSPA nomination scoring demo");
    }
    render_sheet(&record.identity, &sheet, args.format)
}

fn sample_record(kind: NominationType) -> Result<CandidateRecord, AppError> {
    let mut commands = vec![
        RecordCommand::SetCandidateName {
            value: "Maria Clara Santos".to_string(),
        },
        RecordCommand::SetSchoolName {
            value: "Rizal High School".to_string(),
        },
        RecordCommand::SetDivision {
            value: Some(Division::Pasig),
        },
        RecordCommand::AddAchievement {
            category: AchievementCategory::IndividualContests,
            level: Level::National,
            rank: Rank::First,
            year: "2024".to_string(),
        },
        RecordCommand::AddAchievement {
            category: AchievementCategory::PublicationContests,
            level: Level::Regional,
            rank: Rank::Second,
            year: "2023".to_string(),
        },
        RecordCommand::AddLeadership {
            level: Level::Division,
            position: Position::President,
        },
        RecordCommand::AddLeadership {
            level: Level::Division,
            position: Position::VicePresident,
        },
        RecordCommand::AddService {
            category: ServiceCategory::ExtensionServices,
            level: Level::Regional,
        },
    ];

    match kind {
        NominationType::Adviser => {
            commands.push(RecordCommand::AddService {
                category: ServiceCategory::Speakership,
                level: Level::Division,
            });
            commands.push(RecordCommand::SetRating {
                year: "2024-2025".to_string(),
                score: 4.8,
            });
        }
        NominationType::Journalist => {
            commands.push(RecordCommand::SetAcademicRank {
                value: AcademicRank::Honors,
            });
            commands.push(RecordCommand::SetPublicationPosition {
                value: Some(PublicationPosition::EditorInChief),
            });
            commands.push(RecordCommand::AddService {
                category: ServiceCategory::PublishedWorks,
                level: Level::National,
            });
        }
    }

    for criterion in [
        InterviewCriterion::Principles,
        InterviewCriterion::Leadership,
        InterviewCriterion::Engagement,
        InterviewCriterion::Commitment,
        InterviewCriterion::Communication,
    ] {
        commands.push(RecordCommand::SetInterview {
            criterion,
            score: 0.8,
        });
    }

    Ok(apply_all(CandidateRecord::new(kind), commands)?)
}

fn render_sheet(
    identity: &CandidateIdentity,
    sheet: &ScoreSheet,
    format: OutputFormat,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Text => {
            println!(
                "Candidate: {} | School: {} | Division: {}",
                display_or_dash(&identity.candidate_name),
                display_or_dash(&identity.school_name),
                identity.division.map_or("-", |division| division.label())
            );
            println!(
                "Scored on {}",
                Local::now().format("%B %-d, %Y %-I:%M %p")
            );
            println!("{sheet}");
        }
        OutputFormat::Json => {
            let report = ScoreReport {
                candidate: identity,
                score: sheet,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Csv => print!("{}", sheet.to_csv(identity)?),
    }
    Ok(())
}

fn render_receipt(receipt: &SubmissionReceipt, dry_run: bool) {
    if dry_run {
        println!("Dry run: payload built but not sent");
    } else {
        println!("Nomination submitted");
    }
    println!("- file: {}", receipt.file_name);
    println!("- grand total: {}", receipt.grand_total);
    if let Some(average) = &receipt.average_rating {
        println!("- average rating: {average}");
    }
    println!("- timestamp: {}", receipt.submitted_at);
}

fn display_or_dash(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "-"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ospa_scorer::workflows::nomination::ScoreCategory;

    #[test]
    fn adviser_sample_scores_every_populated_category() {
        let record = sample_record(NominationType::Adviser).expect("sample builds");
        let sheet = ScoreSheet::from_outcome(&ScoringEngine::default().score(&record));

        let score = |category| {
            sheet
                .line(category)
                .map(|line| line.score.clone())
                .expect("category listed")
        };
        assert_eq!(score(ScoreCategory::IndividualContests), "1.60");
        assert_eq!(score(ScoreCategory::Leadership), "1.95");
        assert_eq!(score(ScoreCategory::Interview), "8.00");
        assert_eq!(sheet.average_rating.as_deref(), Some("4.160"));
    }

    #[test]
    fn journalist_sample_skips_adviser_only_edits() {
        let record = sample_record(NominationType::Journalist).expect("sample builds");

        assert_eq!(record.kind(), NominationType::Journalist);
        let sheet = ScoreSheet::from_outcome(&ScoringEngine::default().score(&record));
        assert!(sheet.average_rating.is_none());
        assert_eq!(
            sheet
                .line(ScoreCategory::PublicationPosition)
                .map(|line| line.score.as_str()),
            Some("10.00")
        );
    }

    #[test]
    fn blank_identity_renders_as_dash() {
        assert_eq!(display_or_dash("  "), "-");
        assert_eq!(display_or_dash(" Ana "), "Ana");
    }
}
