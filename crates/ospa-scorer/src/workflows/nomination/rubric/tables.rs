use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{Level, Position, Rank};

/// Points per rank within one level.
pub type RankPoints = BTreeMap<Rank, u32>;

/// Rank table for a single level together with the weight applied to the
/// level's summed points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedLevel {
    pub points: RankPoints,
    pub weight: f64,
}

/// `level -> rank -> points`, each level carrying its own weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightedRankTable {
    levels: BTreeMap<Level, WeightedLevel>,
}

impl WeightedRankTable {
    pub fn with_level(mut self, level: Level, points: &[u32], weight: f64) -> Self {
        self.levels.insert(
            level,
            WeightedLevel {
                points: rank_points(points),
                weight,
            },
        );
        self
    }

    pub fn level(&self, level: Level) -> Option<&WeightedLevel> {
        self.levels.get(&level)
    }

    pub fn levels(&self) -> impl Iterator<Item = (Level, &WeightedLevel)> {
        self.levels.iter().map(|(level, entry)| (*level, entry))
    }

    /// Raw points for a placement; unmapped combinations are worth nothing.
    pub fn points(&self, level: Level, rank: Rank) -> u32 {
        self.levels
            .get(&level)
            .and_then(|entry| entry.points.get(&rank))
            .copied()
            .unwrap_or(0)
    }

    /// Weight of `level`, zero when the level is not part of the table.
    pub fn weight(&self, level: Level) -> f64 {
        self.levels.get(&level).map_or(0.0, |entry| entry.weight)
    }
}

/// `level -> rank -> points` without weighting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankTable {
    levels: BTreeMap<Level, RankPoints>,
}

impl RankTable {
    pub fn with_level(mut self, level: Level, points: &[u32]) -> Self {
        self.levels.insert(level, rank_points(points));
        self
    }

    pub fn points(&self, level: Level, rank: Rank) -> u32 {
        self.levels
            .get(&level)
            .and_then(|ranks| ranks.get(&rank))
            .copied()
            .unwrap_or(0)
    }
}

/// `level -> position -> points`, no weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionTable {
    levels: BTreeMap<Level, BTreeMap<Position, u32>>,
}

impl PositionTable {
    /// `president`, `vice president`, `other positions` points for `level`.
    pub fn with_level(mut self, level: Level, points: [u32; 3]) -> Self {
        let [president, vice_president, other] = points;
        self.levels.insert(
            level,
            BTreeMap::from([
                (Position::President, president),
                (Position::VicePresident, vice_president),
                (Position::Other, other),
            ]),
        );
        self
    }

    pub fn points(&self, level: Level, position: Position) -> u32 {
        self.levels
            .get(&level)
            .and_then(|positions| positions.get(&position))
            .copied()
            .unwrap_or(0)
    }
}

/// Position table scaled by a category weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedPositionTable {
    pub levels: PositionTable,
    #[serde(default = "unit_weight")]
    pub weight: f64,
}

impl WeightedPositionTable {
    pub fn new(weight: f64) -> Self {
        Self {
            levels: PositionTable::default(),
            weight,
        }
    }

    pub fn with_level(mut self, level: Level, points: [u32; 3]) -> Self {
        self.levels = self.levels.with_level(level, points);
        self
    }

    pub fn points(&self, level: Level, position: Position) -> u32 {
        self.levels.points(level, position)
    }
}

/// `level -> points`, no weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelTable {
    levels: BTreeMap<Level, u32>,
}

impl LevelTable {
    /// Assigns `points` to levels in `Level::ALL` order, widest first.
    pub fn with_points(mut self, points: &[u32]) -> Self {
        for (level, value) in Level::ALL.into_iter().zip(points) {
            self.levels.insert(level, *value);
        }
        self
    }

    pub fn points(&self, level: Level) -> u32 {
        self.levels.get(&level).copied().unwrap_or(0)
    }
}

/// Level table scaled by a category weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedLevelTable {
    pub levels: LevelTable,
    #[serde(default = "unit_weight")]
    pub weight: f64,
}

impl WeightedLevelTable {
    pub fn new(weight: f64, points: &[u32]) -> Self {
        Self {
            levels: LevelTable::default().with_points(points),
            weight,
        }
    }

    pub fn points(&self, level: Level) -> u32 {
        self.levels.points(level)
    }
}

fn unit_weight() -> f64 {
    1.0
}

fn rank_points(points: &[u32]) -> RankPoints {
    Rank::ALL
        .into_iter()
        .zip(points.iter().copied())
        .collect()
}
