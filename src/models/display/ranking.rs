//! Hexfecta ranking display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{or_dash, truncate_string};
use crate::aggregate::RankedTeam;
use crate::output::DisplayRow;

const NAME_WIDTH: usize = 40;

/// One ranking row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RankingDisplay {
    #[tabled(rename = "RANK")]
    pub rank: usize,

    #[tabled(rename = "TEAM")]
    pub team_number: u32,

    #[tabled(rename = "NAME")]
    #[serde(skip_serializing_if = "String::is_empty")]
    pub team_name: String,

    #[tabled(rename = "ROOKIE")]
    pub rookie_year: String,

    #[tabled(rename = "HEXFECTAS")]
    pub completions: u32,
}

impl RankingDisplay {
    /// Rows for `teams`, ranked from 1
    pub fn rows(teams: &[RankedTeam]) -> Vec<Self> {
        teams
            .iter()
            .enumerate()
            .map(|(i, team)| Self {
                rank: i + 1,
                team_number: team.team_number,
                team_name: truncate_string(team.team_name.as_deref().unwrap_or(""), NAME_WIDTH),
                rookie_year: or_dash(team.rookie_year),
                completions: team.tracked_set_completions,
            })
            .collect()
    }
}

impl DisplayRow for RankingDisplay {
    const NUMERIC_COLUMNS: &'static [usize] = &[0, 1, 4];
}
