use std::collections::BTreeMap;

use super::super::domain::{
    Achievement, AdviserFields, InterviewScores, JournalistFields, Level, LeadershipEntry,
    ServiceEntry,
};
use super::super::rubric::{
    AdviserRubric, JournalistRubric, LevelTable, PositionTable, RankTable, WeightedLevelTable,
    WeightedPositionTable, WeightedRankTable,
};
use super::{ScoreCategory, ScoreComponent};

/// Interview sub-scores are doubled so the panel contributes up to ten points.
pub(crate) const INTERVIEW_MULTIPLIER: f64 = 2.0;

pub(crate) fn score_adviser(
    fields: &AdviserFields,
    interview: &InterviewScores,
    rubric: &AdviserRubric,
) -> Vec<ScoreComponent> {
    vec![
        weighted_achievements(
            ScoreCategory::IndividualContests,
            &fields.individual_contests,
            &rubric.individual,
        ),
        weighted_achievements(
            ScoreCategory::GroupContests,
            &fields.group_contests,
            &rubric.group,
        ),
        weighted_achievements(
            ScoreCategory::SpecialAwards,
            &fields.special_awards,
            &rubric.special_awards,
        ),
        weighted_achievements(
            ScoreCategory::PublicationContests,
            &fields.publication_contests,
            &rubric.publication,
        ),
        weighted_leadership(&fields.leadership, &rubric.leadership),
        weighted_services(
            ScoreCategory::ExtensionServices,
            &fields.extension_services,
            &rubric.extension,
        ),
        weighted_services(
            ScoreCategory::Innovations,
            &fields.innovations,
            &rubric.innovations,
        ),
        weighted_services(
            ScoreCategory::Speakership,
            &fields.speakership,
            &rubric.speakership,
        ),
        weighted_services(
            ScoreCategory::PublishedBooks,
            &fields.published_books,
            &rubric.books,
        ),
        weighted_services(
            ScoreCategory::PublishedArticles,
            &fields.published_articles,
            &rubric.articles,
        ),
        interview_component(interview),
    ]
}

pub(crate) fn score_journalist(
    fields: &JournalistFields,
    interview: &InterviewScores,
    rubric: &JournalistRubric,
) -> Vec<ScoreComponent> {
    let academic = f64::from(rubric.academic_points(fields.academic_rank));
    let position = f64::from(rubric.position_points(fields.pub_position));

    vec![
        ScoreComponent {
            category: ScoreCategory::AcademicStanding,
            points: academic,
            score: academic,
            notes: format!("academic rank {}", fields.academic_rank.label()),
        },
        flat_achievements(
            ScoreCategory::IndividualContests,
            &fields.individual_contests,
            &rubric.individual,
        ),
        flat_achievements(
            ScoreCategory::GroupContests,
            &fields.group_contests,
            &rubric.group,
        ),
        flat_achievements(
            ScoreCategory::SpecialAwards,
            &fields.special_awards,
            &rubric.special_awards,
        ),
        flat_achievements(
            ScoreCategory::PublicationContests,
            &fields.publication_contests,
            &rubric.publication,
        ),
        ScoreComponent {
            category: ScoreCategory::PublicationPosition,
            points: position,
            score: position,
            notes: match fields.pub_position {
                Some(role) => format!("publication role {}", role.label()),
                None => "no publication role recorded".to_string(),
            },
        },
        leadership(
            ScoreCategory::GuildLeadership,
            &fields.guild_leadership,
            &rubric.guild_leadership,
        ),
        services(
            ScoreCategory::CommunityInvolvement,
            &fields.extension_services,
            &rubric.community,
        ),
        services(
            ScoreCategory::PublishedWorks,
            &fields.published_works,
            &rubric.published_works,
        ),
        services(
            ScoreCategory::TrainingsAttended,
            &fields.trainings_attended,
            &rubric.trainings,
        ),
        interview_component(interview),
    ]
}

/// Sum of every entry's rank points per level, scaled by that level's weight.
fn weighted_achievements(
    category: ScoreCategory,
    entries: &[Achievement],
    table: &WeightedRankTable,
) -> ScoreComponent {
    let mut points = 0.0;
    let mut score = 0.0;
    let mut breakdown = Vec::new();

    for (level, weighted) in table.levels() {
        let level_points: u32 = entries
            .iter()
            .filter(|entry| entry.level == level)
            .map(|entry| table.points(level, entry.rank))
            .sum();
        if level_points == 0 {
            continue;
        }

        let level_points = f64::from(level_points);
        points += level_points;
        score += level_points * weighted.weight;
        breakdown.push(format!(
            "{} {} x {}",
            level.label(),
            level_points,
            weighted.weight
        ));
    }

    ScoreComponent {
        category,
        points,
        score,
        notes: entry_notes(entries.len(), &breakdown),
    }
}

fn flat_achievements(
    category: ScoreCategory,
    entries: &[Achievement],
    table: &RankTable,
) -> ScoreComponent {
    let total: u32 = entries
        .iter()
        .map(|entry| table.points(entry.level, entry.rank))
        .sum();
    let total = f64::from(total);

    ScoreComponent {
        category,
        points: total,
        score: total,
        notes: entry_notes(entries.len(), &[]),
    }
}

/// Keeps only the best-scoring role per level and sums those maxima.
fn leadership(
    category: ScoreCategory,
    entries: &[LeadershipEntry],
    table: &PositionTable,
) -> ScoreComponent {
    let mut best_by_level: BTreeMap<Level, u32> = BTreeMap::new();
    for entry in entries {
        let points = table.points(entry.level, entry.position);
        let best = best_by_level.entry(entry.level).or_insert(0);
        if points > *best {
            *best = points;
        }
    }

    let points = f64::from(best_by_level.values().sum::<u32>());
    let breakdown: Vec<String> = best_by_level
        .iter()
        .filter(|(_, best)| **best > 0)
        .map(|(level, best)| format!("{} max {}", level.label(), best))
        .collect();

    ScoreComponent {
        category,
        points,
        score: points,
        notes: entry_notes(entries.len(), &breakdown),
    }
}

/// Adviser leadership: the weight applies to the sum of per-level maxima.
fn weighted_leadership(
    entries: &[LeadershipEntry],
    table: &WeightedPositionTable,
) -> ScoreComponent {
    let component = leadership(ScoreCategory::Leadership, entries, &table.levels);
    apply_weight(component, table.weight, entries.is_empty())
}

/// Every entry counts; no per-level collapsing.
fn services(
    category: ScoreCategory,
    entries: &[ServiceEntry],
    table: &LevelTable,
) -> ScoreComponent {
    let total: u32 = entries.iter().map(|entry| table.points(entry.level)).sum();
    let points = f64::from(total);

    ScoreComponent {
        category,
        points,
        score: points,
        notes: entry_notes(entries.len(), &[]),
    }
}

fn weighted_services(
    category: ScoreCategory,
    entries: &[ServiceEntry],
    table: &WeightedLevelTable,
) -> ScoreComponent {
    let component = services(category, entries, &table.levels);
    apply_weight(component, table.weight, entries.is_empty())
}

fn apply_weight(mut component: ScoreComponent, weight: f64, empty: bool) -> ScoreComponent {
    component.score = component.points * weight;
    if !empty {
        component.notes.push_str(&format!("; weight {weight}"));
    }
    component
}

pub(crate) fn interview_total(scores: &InterviewScores) -> f64 {
    scores.sum() * INTERVIEW_MULTIPLIER
}

fn interview_component(scores: &InterviewScores) -> ScoreComponent {
    let raw = scores.sum();
    ScoreComponent {
        category: ScoreCategory::Interview,
        points: raw,
        score: interview_total(scores),
        notes: format!("sub-scores sum {raw:.2} x {INTERVIEW_MULTIPLIER}"),
    }
}

fn entry_notes(count: usize, breakdown: &[String]) -> String {
    match (count, breakdown.is_empty()) {
        (0, _) => "no entries".to_string(),
        (1, true) => "1 entry".to_string(),
        (n, true) => format!("{n} entries"),
        (1, false) => format!("1 entry: {}", breakdown.join(", ")),
        (n, false) => format!("{n} entries: {}", breakdown.join(", ")),
    }
}
