//! Point tables and weights for both nomination tracks.
//!
//! The rubric is plain data: the aggregation rules in `scoring` never hard-code
//! a point value, so an adjusted rubric can be loaded from JSON without
//! touching the engine.

mod tables;

pub use tables::{
    LevelTable, PositionTable, RankPoints, RankTable, WeightedLevel, WeightedLevelTable,
    WeightedPositionTable, WeightedRankTable,
};

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::domain::{AcademicRank, Level, PublicationPosition};

/// Adviser rubric: contest tables weighted per level, leadership and services
/// weighted per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviserRubric {
    pub individual: WeightedRankTable,
    pub group: WeightedRankTable,
    pub special_awards: WeightedRankTable,
    pub publication: WeightedRankTable,
    pub leadership: WeightedPositionTable,
    pub extension: WeightedLevelTable,
    pub innovations: WeightedLevelTable,
    pub speakership: WeightedLevelTable,
    pub books: WeightedLevelTable,
    pub articles: WeightedLevelTable,
}

impl AdviserRubric {
    pub fn standard() -> Self {
        Self {
            individual: contest_table(),
            group: contest_table(),
            special_awards: WeightedRankTable::default()
                .with_level(Level::National, &[15, 14, 13, 12, 11, 10, 9], 0.03)
                .with_level(Level::Regional, &[7, 6, 5], 0.02)
                .with_level(Level::Division, &[4, 3, 2], 0.01),
            publication: WeightedRankTable::default()
                .with_level(Level::National, &[13, 12, 11, 10, 9, 8, 7], 0.06)
                .with_level(Level::Regional, &[6, 5, 4], 0.03)
                .with_level(Level::Division, &[3, 2, 1], 0.02),
            leadership: WeightedPositionTable::new(0.13)
                .with_level(Level::National, [25, 20, 18])
                .with_level(Level::Regional, [20, 15, 12])
                .with_level(Level::Division, [15, 10, 8]),
            extension: WeightedLevelTable::new(0.13, &[10, 7, 5]),
            innovations: WeightedLevelTable::new(0.13, &[15, 12, 10, 8, 6]),
            speakership: WeightedLevelTable::new(0.10, &[10, 7, 5]),
            books: WeightedLevelTable::new(0.05, &[10, 7, 5]),
            articles: WeightedLevelTable::new(0.05, &[5, 3, 1]),
        }
    }
}

fn contest_table() -> WeightedRankTable {
    WeightedRankTable::default()
        .with_level(Level::National, &[20, 19, 18, 17, 16, 15, 14], 0.08)
        .with_level(Level::Regional, &[12, 11, 10], 0.05)
        .with_level(Level::Division, &[7, 6, 5], 0.03)
}

/// Journalist rubric: every table is flat, contributions are summed as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalistRubric {
    pub individual: RankTable,
    pub group: RankTable,
    pub special_awards: RankTable,
    pub publication: RankTable,
    pub guild_leadership: PositionTable,
    pub academic_rank: BTreeMap<AcademicRank, u32>,
    pub publication_position: BTreeMap<PublicationPosition, u32>,
    pub community: LevelTable,
    pub published_works: LevelTable,
    pub trainings: LevelTable,
}

impl JournalistRubric {
    pub fn standard() -> Self {
        Self {
            individual: RankTable::default()
                .with_level(Level::National, &[25, 23, 21, 19, 17, 15, 13])
                .with_level(Level::Regional, &[15, 13, 11])
                .with_level(Level::Division, &[10, 8, 6]),
            group: RankTable::default()
                .with_level(Level::National, &[20, 18, 16, 14, 12, 10, 8])
                .with_level(Level::Regional, &[12, 10, 8])
                .with_level(Level::Division, &[8, 6, 4]),
            special_awards: RankTable::default()
                .with_level(Level::National, &[15, 14, 13, 12, 11, 10, 9])
                .with_level(Level::Regional, &[7, 6, 5])
                .with_level(Level::Division, &[4, 3, 2]),
            publication: RankTable::default()
                .with_level(Level::National, &[13, 12, 11, 10, 9, 8, 7])
                .with_level(Level::Regional, &[6, 5, 4])
                .with_level(Level::Division, &[3, 2, 1]),
            guild_leadership: PositionTable::default()
                .with_level(Level::National, [10, 8, 6])
                .with_level(Level::Regional, [8, 6, 4])
                .with_level(Level::Division, [6, 4, 2]),
            academic_rank: BTreeMap::from([
                (AcademicRank::Highest, 10),
                (AcademicRank::High, 8),
                (AcademicRank::Honors, 5),
                (AcademicRank::Average, 3),
                (AcademicRank::None, 0),
            ]),
            publication_position: BTreeMap::from([
                (PublicationPosition::EditorInChief, 10),
                (PublicationPosition::AssociateEditor, 8),
                (PublicationPosition::SectionEditor, 6),
                (PublicationPosition::Writer, 4),
            ]),
            community: LevelTable::default().with_points(&[10, 7, 5]),
            published_works: LevelTable::default().with_points(&[5, 3, 1]),
            trainings: LevelTable::default().with_points(&[3, 2, 1]),
        }
    }

    pub fn academic_points(&self, rank: AcademicRank) -> u32 {
        self.academic_rank.get(&rank).copied().unwrap_or(0)
    }

    pub fn position_points(&self, position: Option<PublicationPosition>) -> u32 {
        position
            .and_then(|position| self.publication_position.get(&position))
            .copied()
            .unwrap_or(0)
    }
}

/// Rubric for both tracks, the unit loaded from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricSet {
    pub adviser: AdviserRubric,
    pub journalist: JournalistRubric,
}

impl RubricSet {
    pub fn standard() -> Self {
        Self {
            adviser: AdviserRubric::standard(),
            journalist: JournalistRubric::standard(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, RubricError> {
        serde_json::from_str(raw).map_err(RubricError::Parse)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RubricError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RubricError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }
}

impl Default for RubricSet {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RubricError {
    #[error("unable to read rubric file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("rubric is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
}
