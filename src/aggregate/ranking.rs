//! Cross-team hexfecta ranking

use serde::{Deserialize, Serialize};

/// One row of the ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTeam {
    pub team_number: u32,
    pub team_name: Option<String>,
    pub rookie_year: Option<i32>,
    pub tracked_set_completions: u32,
}

/// Teams ordered by hexfecta completions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalRanking {
    /// Leading rows of `all_by_completions`, down to and including the sentinel team
    pub top_n: Vec<RankedTeam>,

    /// Every team with at least one completion, most completions first
    pub all_by_completions: Vec<RankedTeam>,
}

/// Rank teams by completions.
///
/// Teams without a completion are dropped. Ties keep their input order. The
/// `top_n` list stops at the first row for `sentinel_team`, or covers every
/// row when that team is not ranked.
pub fn rank<I>(teams: I, sentinel_team: u32) -> GlobalRanking
where
    I: IntoIterator<Item = RankedTeam>,
{
    let mut all_by_completions: Vec<RankedTeam> = teams
        .into_iter()
        .filter(|t| t.tracked_set_completions > 0)
        .collect();
    // sort_by is stable
    all_by_completions.sort_by(|a, b| b.tracked_set_completions.cmp(&a.tracked_set_completions));

    let cutoff = all_by_completions
        .iter()
        .position(|t| t.team_number == sentinel_team)
        .map_or(all_by_completions.len(), |i| i + 1);
    let top_n = all_by_completions[..cutoff].to_vec();

    GlobalRanking {
        top_n,
        all_by_completions,
    }
}
