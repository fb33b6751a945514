//! Per-team award summary

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::award_type::{TRACKED_CATEGORIES, tracked_category};
use crate::client::models::{Award, Team};

/// Derived award metrics for one team.
///
/// Recomputed from the award list on every run; never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySummary {
    /// All awards received
    pub total_awards: u32,

    /// Award name -> count, only names the team has received
    pub awards_by_category: BTreeMap<String, u32>,

    /// Awards in a hexfecta category
    pub tracked_category_count: u32,

    /// Hexfecta category -> count, zero-filled over all six categories
    pub awards_by_tracked_category: BTreeMap<String, u32>,

    /// Seasons since the rookie year, inclusive, at least 1
    pub years_active: u32,

    pub awards_per_year: f64,
    pub tracked_category_awards_per_year: f64,
    pub awards_per_year_by_tracked_category: BTreeMap<String, f64>,

    /// Complete hexfectas: the lowest count across the hexfecta categories
    pub tracked_set_completions: u32,
    pub tracked_set_completions_per_year: f64,
}

/// Rookie year to assume when the API has none
pub fn default_rookie_year(current_year: i32) -> i32 {
    current_year.saturating_sub(1)
}

/// Seasons a team has been active, never less than 1
pub fn years_active(rookie_year: i32, current_year: i32) -> u32 {
    let years = i64::from(current_year) - i64::from(rookie_year) + 1;
    u32::try_from(years.clamp(1, i64::from(u32::MAX))).unwrap_or(u32::MAX)
}

/// Summarize one team's awards as of `current_year`.
///
/// A missing rookie year is replaced by [`default_rookie_year`] with a
/// warning.
pub fn summarize(team: &Team, awards: &[Award], current_year: i32) -> EntitySummary {
    let rookie_year = team.rookie_year.unwrap_or_else(|| {
        log::warn!("Team has no rookie_year! {}", team.key);
        default_rookie_year(current_year)
    });
    let years = years_active(rookie_year, current_year);
    let per_year = |count: u32| f64::from(count) / f64::from(years);

    let mut awards_by_category: BTreeMap<String, u32> = BTreeMap::new();
    for award in awards {
        let count = awards_by_category.entry(award.name.clone()).or_default();
        *count = count.saturating_add(1);
    }

    let mut awards_by_tracked_category: BTreeMap<String, u32> = TRACKED_CATEGORIES
        .iter()
        .map(|c| (c.name.to_string(), 0))
        .collect();
    let mut tracked_category_count: u32 = 0;
    for category in awards.iter().filter_map(|a| tracked_category(a.award_type)) {
        tracked_category_count = tracked_category_count.saturating_add(1);
        let count = awards_by_tracked_category
            .entry(category.name.to_string())
            .or_default();
        *count = count.saturating_add(1);
    }

    let tracked_set_completions = awards_by_tracked_category
        .values()
        .copied()
        .min()
        .unwrap_or(0);

    let awards_per_year_by_tracked_category = awards_by_tracked_category
        .iter()
        .map(|(name, &count)| (name.clone(), per_year(count)))
        .collect();

    let total_awards = u32::try_from(awards.len()).unwrap_or(u32::MAX);

    EntitySummary {
        total_awards,
        awards_by_category,
        tracked_category_count,
        awards_by_tracked_category,
        years_active: years,
        awards_per_year: per_year(total_awards),
        tracked_category_awards_per_year: per_year(tracked_category_count),
        awards_per_year_by_tracked_category,
        tracked_set_completions,
        tracked_set_completions_per_year: per_year(tracked_set_completions),
    }
}
