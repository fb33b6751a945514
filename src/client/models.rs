//! API resource models
//!
//! Only the fields aggregation needs are decoded; everything else the API
//! sends is ignored.

use serde::{Deserialize, Serialize};

/// Team resource from `/teams/{page}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Team key (e.g. `frc254`)
    pub key: String,

    /// Team number
    pub team_number: u32,

    /// Team nickname (missing for a handful of old teams)
    #[serde(default)]
    pub nickname: Option<String>,

    /// First season the team competed; some teams have no value
    #[serde(default)]
    pub rookie_year: Option<i32>,
}

/// Award resource from `/team/{key}/awards`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Award {
    /// Award name as shown at the event
    pub name: String,

    /// Award category code, see [`crate::aggregate::AwardType`]
    pub award_type: u16,

    /// Season the award was given
    pub year: i32,

    /// Event the award was given at (e.g. `2025cave`)
    pub event_key: String,
}
