use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{CandidateIdentity, NominationType};
use super::scoring::{ScoreCategory, ScoreOutcome};

/// Two decimal places for every subtotal and the grand total.
pub fn format_score(value: f64) -> String {
    format!("{value:.2}")
}

/// Three decimal places for the average performance rating.
pub fn format_rating(value: f64) -> String {
    format!("{value:.3}")
}

/// Display-ready projection of a [`ScoreOutcome`]. Rounding happens here and
/// nowhere earlier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSheet {
    pub nomination_type: NominationType,
    pub nomination_label: String,
    pub grand_total: String,
    pub categories: Vec<CategoryLine>,
    /// Group subtotals keyed by group name (`contests`, `leadership`, ...).
    pub details: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_band: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLine {
    pub category: ScoreCategory,
    pub label: String,
    pub points: String,
    pub score: String,
    pub notes: String,
}

impl ScoreSheet {
    pub fn from_outcome(outcome: &ScoreOutcome) -> Self {
        let categories = outcome
            .components
            .iter()
            .map(|component| CategoryLine {
                category: component.category,
                label: component.category.label().to_string(),
                points: format_score(component.points),
                score: format_score(component.score),
                notes: component.notes.clone(),
            })
            .collect();

        let mut groups = BTreeMap::new();
        for component in &outcome.components {
            *groups.entry(component.category.group()).or_insert(0.0) += component.score;
        }
        let details = groups
            .into_iter()
            .map(|(group, total)| (group.key().to_string(), format_score(total)))
            .collect();

        Self {
            nomination_type: outcome.nomination,
            nomination_label: outcome.nomination.label().to_string(),
            grand_total: format_score(outcome.grand_total),
            categories,
            details,
            average_rating: outcome
                .rating
                .map(|summary| format_rating(summary.average)),
            rating_band: outcome
                .rating
                .map(|summary| summary.band.label().to_string()),
        }
    }

    pub fn line(&self, category: ScoreCategory) -> Option<&CategoryLine> {
        self.categories
            .iter()
            .find(|line| line.category == category)
    }

    /// One header row plus one data row, the shape the tracking sheet stores.
    pub fn to_csv(&self, identity: &CandidateIdentity) -> Result<String, ProjectionError> {
        let mut header = vec![
            "Candidate".to_string(),
            "School".to_string(),
            "Division".to_string(),
            "Nomination".to_string(),
        ];
        let mut row = vec![
            identity.candidate_name.clone(),
            identity.school_name.clone(),
            identity
                .division
                .map(|division| division.label().to_string())
                .unwrap_or_default(),
            self.nomination_label.clone(),
        ];

        if let Some(average) = &self.average_rating {
            header.push("Average Rating".to_string());
            row.push(average.clone());
            header.push("Rating Band".to_string());
            row.push(self.rating_band.clone().unwrap_or_default());
        }

        for line in &self.categories {
            header.push(line.label.clone());
            row.push(line.score.clone());
        }
        header.push("Grand Total".to_string());
        row.push(self.grand_total.clone());

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&header)?;
        writer.write_record(&row)?;
        let bytes = writer
            .into_inner()
            .map_err(|err| ProjectionError::Flush(err.to_string()))?;
        Ok(String::from_utf8(bytes)?)
    }
}

impl fmt::Display for ScoreSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.nomination_label)?;
        if let (Some(average), Some(band)) = (&self.average_rating, &self.rating_band) {
            writeln!(f, "Average performance rating: {average} ({band})")?;
        }

        writeln!(f, "\nCategory scores")?;
        for line in &self.categories {
            writeln!(
                f,
                "- {}: {} (raw {}; {})",
                line.label, line.score, line.points, line.notes
            )?;
        }

        writeln!(f, "\nSummary")?;
        for (group, total) in &self.details {
            writeln!(f, "- {group}: {total}")?;
        }

        write!(f, "\nGrand total: {}", self.grand_total)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("unable to flush csv buffer: {0}")]
    Flush(String),
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::nomination::scoring::{ScoreComponent, ScoreOutcome};

    fn outcome(grand_total: f64) -> ScoreOutcome {
        ScoreOutcome {
            nomination: NominationType::Journalist,
            components: vec![
                ScoreComponent {
                    category: ScoreCategory::IndividualContests,
                    points: 25.0,
                    score: 25.0,
                    notes: "1 entry".to_string(),
                },
                ScoreComponent {
                    category: ScoreCategory::Interview,
                    points: 3.0,
                    score: 6.0,
                    notes: "sub-scores sum 3.00 x 2".to_string(),
                },
            ],
            grand_total,
            rating: None,
        }
    }

    #[test]
    fn formats_to_two_decimals_at_the_boundary() {
        let sheet = ScoreSheet::from_outcome(&outcome(31.004));

        assert_eq!(sheet.grand_total, "31.00");
        assert_eq!(
            sheet.line(ScoreCategory::Interview).map(|line| line.score.as_str()),
            Some("6.00")
        );
        assert_eq!(sheet.details.get("contests").map(String::as_str), Some("25.00"));
        assert!(sheet.average_rating.is_none());
    }

    #[test]
    fn rating_uses_three_decimals() {
        assert_eq!(format_rating(4.0), "4.000");
        assert_eq!(format_rating(4.2666666), "4.267");
        assert_eq!(format_score(1.9500000000000002), "1.95");
    }

    #[test]
    fn csv_row_lists_categories_and_total() {
        let sheet = ScoreSheet::from_outcome(&outcome(31.0));
        let identity = CandidateIdentity {
            candidate_name: "Ana, Reyes".to_string(),
            school_name: "Rizal High".to_string(),
            division: None,
        };

        let csv = sheet.to_csv(&identity).expect("csv renders");
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("Candidate,School,Division,Nomination,Individual Contests,Interview,Grand Total")
        );
        assert_eq!(
            lines.next(),
            Some("\"Ana, Reyes\",Rizal High,,Outstanding Campus Journalist,25.00,6.00,31.00")
        );
    }
}
