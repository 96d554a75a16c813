mod rating;
mod rules;

pub use rating::{average_rating, RatingBand, RatingBands, RatingSummary};

use serde::{Deserialize, Serialize};

use super::domain::{CandidateRecord, Nomination, NominationType};
use super::rubric::RubricSet;

/// Stateless evaluator that applies the rubric to a candidate record.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    rubric: RubricSet,
    bands: RatingBands,
}

impl ScoringEngine {
    pub fn new(rubric: RubricSet, bands: RatingBands) -> Self {
        Self { rubric, bands }
    }

    pub fn rubric(&self) -> &RubricSet {
        &self.rubric
    }

    pub fn bands(&self) -> &RatingBands {
        &self.bands
    }

    pub fn score(&self, record: &CandidateRecord) -> ScoreOutcome {
        let (components, rating) = match &record.nomination {
            Nomination::Adviser(fields) => (
                rules::score_adviser(fields, &record.interview, &self.rubric.adviser),
                Some(rating::summarize(&fields.performance_ratings, &self.bands)),
            ),
            Nomination::Journalist(fields) => (
                rules::score_journalist(fields, &record.interview, &self.rubric.journalist),
                None,
            ),
        };

        let grand_total = components.iter().map(|component| component.score).sum();

        ScoreOutcome {
            nomination: record.kind(),
            components,
            grand_total,
            rating,
        }
    }
}

/// Scored categories across both nomination tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    AcademicStanding,
    IndividualContests,
    GroupContests,
    SpecialAwards,
    PublicationContests,
    PublicationPosition,
    Leadership,
    GuildLeadership,
    ExtensionServices,
    CommunityInvolvement,
    Innovations,
    Speakership,
    PublishedBooks,
    PublishedArticles,
    PublishedWorks,
    TrainingsAttended,
    Interview,
}

impl ScoreCategory {
    pub const fn label(self) -> &'static str {
        match self {
            ScoreCategory::AcademicStanding => "Academic Standing",
            ScoreCategory::IndividualContests => "Individual Contests",
            ScoreCategory::GroupContests => "Group Contests",
            ScoreCategory::SpecialAwards => "Special Awards",
            ScoreCategory::PublicationContests => "Publication Contests",
            ScoreCategory::PublicationPosition => "Publication Position",
            ScoreCategory::Leadership => "Leadership",
            ScoreCategory::GuildLeadership => "Guild Leadership",
            ScoreCategory::ExtensionServices => "Extension Services",
            ScoreCategory::CommunityInvolvement => "Community Involvement",
            ScoreCategory::Innovations => "Innovations",
            ScoreCategory::Speakership => "Speakership",
            ScoreCategory::PublishedBooks => "Published Books",
            ScoreCategory::PublishedArticles => "Published Articles",
            ScoreCategory::PublishedWorks => "Published Works",
            ScoreCategory::TrainingsAttended => "Trainings Attended",
            ScoreCategory::Interview => "Interview",
        }
    }

    pub const fn group(self) -> ScoreGroup {
        match self {
            ScoreCategory::IndividualContests
            | ScoreCategory::GroupContests
            | ScoreCategory::SpecialAwards
            | ScoreCategory::PublicationContests => ScoreGroup::Contests,
            ScoreCategory::Leadership
            | ScoreCategory::GuildLeadership
            | ScoreCategory::PublicationPosition => ScoreGroup::Leadership,
            ScoreCategory::ExtensionServices
            | ScoreCategory::CommunityInvolvement
            | ScoreCategory::Innovations
            | ScoreCategory::Speakership
            | ScoreCategory::TrainingsAttended => ScoreGroup::Services,
            ScoreCategory::PublishedBooks
            | ScoreCategory::PublishedArticles
            | ScoreCategory::PublishedWorks => ScoreGroup::Publications,
            ScoreCategory::AcademicStanding => ScoreGroup::Academics,
            ScoreCategory::Interview => ScoreGroup::Interview,
        }
    }
}

/// Summary buckets shown alongside the grand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreGroup {
    Academics,
    Contests,
    Leadership,
    Services,
    Publications,
    Interview,
}

impl ScoreGroup {
    pub const fn key(self) -> &'static str {
        match self {
            ScoreGroup::Academics => "academics",
            ScoreGroup::Contests => "contests",
            ScoreGroup::Leadership => "leadership",
            ScoreGroup::Services => "services",
            ScoreGroup::Publications => "publications",
            ScoreGroup::Interview => "interview",
        }
    }
}

/// Discrete contribution to the grand total, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub category: ScoreCategory,
    /// Rubric points before any weight is applied.
    pub points: f64,
    pub score: f64,
    pub notes: String,
}

/// Engine output: itemised components, the unrounded grand total, and the
/// adviser rating summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub nomination: NominationType,
    pub components: Vec<ScoreComponent>,
    pub grand_total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingSummary>,
}

impl ScoreOutcome {
    pub fn component(&self, category: ScoreCategory) -> Option<&ScoreComponent> {
        self.components
            .iter()
            .find(|component| component.category == category)
    }

    /// Weighted score of `category`; categories outside this track are zero.
    pub fn score_of(&self, category: ScoreCategory) -> f64 {
        self.component(category)
            .map_or(0.0, |component| component.score)
    }

    pub fn group_total(&self, group: ScoreGroup) -> f64 {
        self.components
            .iter()
            .filter(|component| component.category.group() == group)
            .map(|component| component.score)
            .sum()
    }
}
