use serde::{Deserialize, Serialize};

use super::super::domain::RatingEntry;

/// Thresholds separating the performance rating bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingBands {
    pub outstanding: f64,
    pub very_satisfactory: f64,
}

impl Default for RatingBands {
    fn default() -> Self {
        Self {
            outstanding: 4.5,
            very_satisfactory: 3.5,
        }
    }
}

impl RatingBands {
    pub fn classify(&self, average: f64) -> RatingBand {
        if average >= self.outstanding {
            RatingBand::Outstanding
        } else if average >= self.very_satisfactory {
            RatingBand::VerySatisfactory
        } else {
            RatingBand::NeedsImprovement
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBand {
    Outstanding,
    VerySatisfactory,
    NeedsImprovement,
}

impl RatingBand {
    pub const fn label(self) -> &'static str {
        match self {
            RatingBand::Outstanding => "Outstanding",
            RatingBand::VerySatisfactory => "Very Satisfactory",
            RatingBand::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// Informational rating summary; never part of the grand total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: f64,
    pub band: RatingBand,
    pub years: usize,
}

/// Arithmetic mean over however many years were recorded.
pub fn average_rating(ratings: &[RatingEntry]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: f64 = ratings.iter().map(|entry| entry.score).sum();
    sum / ratings.len() as f64
}

pub(crate) fn summarize(ratings: &[RatingEntry], bands: &RatingBands) -> RatingSummary {
    let average = average_rating(ratings);
    RatingSummary {
        average,
        band: bands.classify(average),
        years: ratings.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(scores: &[f64]) -> Vec<RatingEntry> {
        scores
            .iter()
            .enumerate()
            .map(|(index, score)| RatingEntry {
                year: format!("year-{index}"),
                score: *score,
            })
            .collect()
    }

    #[test]
    fn five_ratings_of_four_are_very_satisfactory() {
        let summary = summarize(&ratings(&[4.0; 5]), &RatingBands::default());

        assert_eq!(summary.average, 4.0);
        assert_eq!(summary.band, RatingBand::VerySatisfactory);
        assert_ne!(summary.band, RatingBand::Outstanding);
    }

    #[test]
    fn average_divides_by_recorded_years() {
        assert_eq!(average_rating(&ratings(&[5.0, 4.0, 4.5])), 4.5);
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn thresholds_are_inclusive_and_configurable() {
        let bands = RatingBands::default();
        assert_eq!(bands.classify(4.5), RatingBand::Outstanding);
        assert_eq!(bands.classify(3.5), RatingBand::VerySatisfactory);
        assert_eq!(bands.classify(3.49), RatingBand::NeedsImprovement);

        let strict = RatingBands {
            outstanding: 4.8,
            very_satisfactory: 4.0,
        };
        assert_eq!(strict.classify(4.6), RatingBand::VerySatisfactory);
        assert_eq!(strict.classify(3.9), RatingBand::NeedsImprovement);
    }
}
