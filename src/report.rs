//! Aggregated results artifact
//!
//! The JSON document written by `scrape` and read back by the display
//! commands. It is the only thing downstream renderers consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::aggregate::{EntitySummary, GlobalRanking, RankedTeam, rank};
use crate::client::models::Award;
use crate::error::{Error, Result};

/// Everything collected for one team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAwards {
    pub team_number: u32,
    pub team_name: Option<String>,
    pub rookie_year: Option<i32>,
    /// When the award list was last fetched or revalidated
    pub last_updated: DateTime<Utc>,
    pub awards: Vec<Award>,
    pub summaries: EntitySummary,
}

impl From<&TeamAwards> for RankedTeam {
    fn from(team: &TeamAwards) -> Self {
        Self {
            team_number: team.team_number,
            team_name: team.team_name.clone(),
            rookie_year: team.rookie_year,
            tracked_set_completions: team.summaries.tracked_set_completions,
        }
    }
}

/// The full results document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardsReport {
    /// Teams keyed by team number, in team number order
    pub teams: BTreeMap<u32, TeamAwards>,

    /// Ranking across all teams
    pub summaries: GlobalRanking,

    /// When the last team page was fetched or revalidated
    pub last_updated: Option<DateTime<Utc>>,
}

impl AwardsReport {
    /// Build the report, ranking teams in team number order.
    pub fn new(
        teams: BTreeMap<u32, TeamAwards>,
        last_updated: Option<DateTime<Utc>>,
        sentinel_team: u32,
    ) -> Self {
        let summaries = rank(teams.values().map(RankedTeam::from), sentinel_team);
        Self {
            teams,
            summaries,
            last_updated,
        }
    }

    /// Read a report written by [`AwardsReport::save`]
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Other(format!(
                    "No results at {}. Run `hexfecta scrape` first.",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;
        Ok(serde_json::from_slice(&contents)?)
    }

    /// Write the report as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }

    /// Look up one team
    pub fn team(&self, team_number: u32) -> Result<&TeamAwards> {
        self.teams
            .get(&team_number)
            .ok_or(Error::TeamNotFound(team_number))
    }
}
