//! Award and award category display models

use serde::Serialize;
use tabled::Tabled;

use super::common::truncate_string;
use crate::aggregate::{AwardType, EntitySummary, TRACKED_CATEGORIES};
use crate::client::models::Award;
use crate::output::DisplayRow;
use crate::output::formatters::format_rate;

const AWARD_NAME_WIDTH: usize = 60;

/// Award display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AwardDisplay {
    #[tabled(rename = "YEAR")]
    pub year: i32,

    #[tabled(rename = "EVENT")]
    pub event_key: String,

    /// Category name, or the raw code for categories this build doesn't know
    #[tabled(rename = "CATEGORY")]
    pub category: String,

    #[tabled(rename = "AWARD")]
    pub name: String,
}

impl From<&Award> for AwardDisplay {
    fn from(award: &Award) -> Self {
        let category = match AwardType::from_code(award.award_type) {
            Some(award_type) => award_type.to_string(),
            None => format!("Unknown ({})", award.award_type),
        };
        Self {
            year: award.year,
            event_key: award.event_key.clone(),
            category,
            name: truncate_string(&award.name, AWARD_NAME_WIDTH),
        }
    }
}

impl AwardDisplay {
    /// Rows for `awards`, oldest first
    pub fn rows(awards: &[Award]) -> Vec<Self> {
        let mut rows: Vec<Self> = awards.iter().map(Self::from).collect();
        rows.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.event_key.cmp(&b.event_key)));
        rows
    }
}

impl DisplayRow for AwardDisplay {
    const NUMERIC_COLUMNS: &'static [usize] = &[0];
}

/// Hexfecta category tally for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct CategoryDisplay {
    #[tabled(rename = "CATEGORY")]
    pub category: String,

    #[tabled(rename = "AWARDS")]
    pub count: u32,

    #[tabled(rename = "PER YEAR")]
    pub per_year: String,
}

impl CategoryDisplay {
    /// One row per hexfecta category, in category table order
    pub fn rows(summary: &EntitySummary) -> Vec<Self> {
        TRACKED_CATEGORIES
            .iter()
            .map(|c| Self {
                category: c.name.to_string(),
                count: summary
                    .awards_by_tracked_category
                    .get(c.name)
                    .copied()
                    .unwrap_or(0),
                per_year: format_rate(
                    summary
                        .awards_per_year_by_tracked_category
                        .get(c.name)
                        .copied()
                        .unwrap_or(0.0),
                ),
            })
            .collect()
    }
}

impl DisplayRow for CategoryDisplay {
    const NUMERIC_COLUMNS: &'static [usize] = &[1, 2];
}
